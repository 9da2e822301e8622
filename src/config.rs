//! Signer configuration

/// 기본 nonce 재시도 횟수
pub const DEFAULT_MAX_ATTEMPTS: u32 = 32;

/// 서명 nonce 생성 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonceStrategy {
    /// RFC 6979 결정적 nonce (같은 키와 해시는 항상 같은 서명)
    #[default]
    Deterministic,
    /// 시도마다 OS 난수로 새 nonce 생성
    Random,
}

/// 서명 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerConfig {
    nonce_strategy: NonceStrategy,
    max_attempts: u32,
}

impl SignerConfig {
    /// 기본 설정 생성 (결정적 nonce, 재시도 32회)
    pub fn new() -> Self {
        Self {
            nonce_strategy: NonceStrategy::Deterministic,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// nonce 생성 방식 설정
    pub fn with_nonce_strategy(mut self, strategy: NonceStrategy) -> Self {
        self.nonce_strategy = strategy;
        self
    }

    /// 최대 시도 횟수 설정 (최소 1)
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    // === Getters ===

    pub fn nonce_strategy(&self) -> NonceStrategy {
        self.nonce_strategy
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// 결정적 nonce 사용 여부
    pub fn is_deterministic(&self) -> bool {
        self.nonce_strategy == NonceStrategy::Deterministic
    }
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self::new()
    }
}

//! Internal Macros
//!
//! Boilerplate for the modular integer types.
//!
//! # Available Macros
//!
//! - [`impl_modular_ops!`] - `+ - *` and unary `-` for every owned/borrowed combination

/// Implements the arithmetic operator traits for a modular integer type.
///
/// The type must provide `add_elem`, `sub_elem`, `mul_elem` and `neg_elem`
/// taking references and returning an owned, reduced value.
///
/// # Example
///
/// ```ignore
/// impl_modular_ops!(FieldElement);
///
/// let c = &a * &b + a;
/// ```
macro_rules! impl_modular_ops {
    (@binary $ty:ident, $op:ident, $method:ident, $inner:ident) => {
        impl std::ops::$op<&$ty> for &$ty {
            type Output = $ty;

            fn $method(self, rhs: &$ty) -> $ty {
                $ty::$inner(self, rhs)
            }
        }

        impl std::ops::$op<$ty> for $ty {
            type Output = $ty;

            fn $method(self, rhs: $ty) -> $ty {
                $ty::$inner(&self, &rhs)
            }
        }

        impl std::ops::$op<&$ty> for $ty {
            type Output = $ty;

            fn $method(self, rhs: &$ty) -> $ty {
                $ty::$inner(&self, rhs)
            }
        }

        impl std::ops::$op<$ty> for &$ty {
            type Output = $ty;

            fn $method(self, rhs: $ty) -> $ty {
                $ty::$inner(self, &rhs)
            }
        }
    };
    ($ty:ident) => {
        impl_modular_ops!(@binary $ty, Add, add, add_elem);
        impl_modular_ops!(@binary $ty, Sub, sub, sub_elem);
        impl_modular_ops!(@binary $ty, Mul, mul, mul_elem);

        impl std::ops::Neg for &$ty {
            type Output = $ty;

            fn neg(self) -> $ty {
                $ty::neg_elem(self)
            }
        }

        impl std::ops::Neg for $ty {
            type Output = $ty;

            fn neg(self) -> $ty {
                $ty::neg_elem(&self)
            }
        }
    };
}

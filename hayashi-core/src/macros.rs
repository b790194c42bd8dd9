/// Implements the arithmetic between a point type and its difference type.
///
/// Both must be tuple structs over the same numeric type, and the caller must have `Add`, `Sub`
/// and `Neg` from `core::ops` in scope.
#[doc(hidden)]
#[macro_export]
macro_rules! impl_ops {
    (@binary $trait:ident, $method:ident, $op:tt, $lhs:ty, $rhs:ty => $output:ty) => {
        impl $trait<$rhs> for $lhs {
            type Output = $output;

            #[inline]
            fn $method(self, rhs: $rhs) -> Self::Output {
                Self::Output { 0: self.0 $op rhs.0 }
            }
        }
    };

    (@between $type:ty) => {
        impl $type {
            /// Returns `true` if `self` lies strictly inside `(start, end)`.
            #[inline]
            pub fn is_strictly_between(self, start: $type, end: $type) -> bool {
                start.0 < self.0 && self.0 < end.0
            }
        }
    };

    ($type:ty, $type_difference:ty) => {
        $crate::impl_ops!(@binary Sub, sub, -, $type, $type => $type_difference);
        $crate::impl_ops!(@binary Add, add, +, $type, $type_difference => $type);
        $crate::impl_ops!(@binary Sub, sub, -, $type, $type_difference => $type);
        $crate::impl_ops!(@binary Add, add, +, $type_difference, $type => $type);
        $crate::impl_ops!(@binary Add, add, +, $type_difference, $type_difference => $type_difference);
        $crate::impl_ops!(@binary Sub, sub, -, $type_difference, $type_difference => $type_difference);

        impl Neg for $type_difference {
            type Output = $type_difference;

            #[inline]
            fn neg(self) -> Self::Output {
                Self::Output { 0: -self.0 }
            }
        }

        $crate::impl_ops!(@between $type);
        $crate::impl_ops!(@between $type_difference);
    };
}

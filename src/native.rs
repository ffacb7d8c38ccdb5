//! Scalar types whose width follows the target's pointer size.
//!
//! Resolved once at build time; the `var_from_int`/`var_to_int` family and
//! [`Tag::NATIVE_INT`](crate::Tag::NATIVE_INT) and friends are plain aliases of these.

use crate::tag::Width;

cfg_if::cfg_if! {
    if #[cfg(target_pointer_width = "64")] {
        pub type NativeInt = i64;
        pub type NativeUint = u64;
        pub type NativeFloat = f64;
        pub const NATIVE_WIDTH: Width = Width::W64;
    } else {
        pub type NativeInt = i32;
        pub type NativeUint = u32;
        pub type NativeFloat = f32;
        pub const NATIVE_WIDTH: Width = Width::W32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_width_matches_pointer() {
        assert_eq!(
            NATIVE_WIDTH.bits() as usize,
            std::mem::size_of::<usize>() * 8
        );
        assert_eq!(std::mem::size_of::<NativeInt>(), std::mem::size_of::<usize>());
        assert_eq!(std::mem::size_of::<NativeUint>(), std::mem::size_of::<usize>());
        assert_eq!(
            std::mem::size_of::<NativeFloat>(),
            std::mem::size_of::<usize>()
        );
    }
}

//! Per-type glue between native scalars and [`Var`].
//!
//! Every supported scalar implements [`Scalar`]; the named constructors and accessors on `Var`
//! (`Var::from_int8`, `Var::to_float32`, ...) and the C entry points in [`crate::abi`] are thin
//! wrappers around these impls.

use crate::{
    native::{NativeFloat, NativeInt, NativeUint},
    tag::Tag,
    var::Var,
};

mod sealed {
    pub trait Sealed {}
}

/// A native scalar that can be boxed into a [`Var`] and unboxed back.
pub trait Scalar: Copy + sealed::Sealed {
    const TAG: Tag;

    fn into_var(self) -> Var;

    fn from_var(var: Var) -> Self;
}

macro_rules! int_scalar {
    ($($ty:ident => $tag:ident),*) => {$(
        impl sealed::Sealed for $ty {}

        impl Scalar for $ty {
            const TAG: Tag = Tag::$tag;

            /// Sign extends signed types, zero extends unsigned ones.
            #[inline(always)]
            fn into_var(self) -> Var {
                Var::encode(self as i64, Self::TAG)
            }

            #[inline(always)]
            fn from_var(var: Var) -> Self {
                var.decode(Self::TAG) as $ty
            }
        }
    )*};
}

int_scalar! {
    i8 => INT8, i16 => INT16, i32 => INT32, i64 => INT64,
    u8 => UINT8, u16 => UINT16, u32 => UINT32, u64 => UINT64
}

impl sealed::Sealed for f64 {}

impl Scalar for f64 {
    const TAG: Tag = Tag::FLOAT64;

    #[inline(always)]
    fn into_var(self) -> Var {
        Var::encode_float(self, Self::TAG)
    }

    #[inline(always)]
    fn from_var(var: Var) -> Self {
        var.decode_float(Self::TAG)
    }
}

const F32_MANTISSA: u32 = 0x007f_ffff;
const F32_QUIET: u32 = 0x0040_0000;
const F64_MANTISSA: u64 = 0x000f_ffff_ffff_ffff;
const MANTISSA_SHIFT: u32 = 52 - 23;

/// Widens a NaN keeping sign, quiet bit and payload. Hardware conversion would quiet it.
fn widen_nan(x: f32) -> f64 {
    let bits = x.to_bits();
    let sign = ((bits >> 31) as u64) << 63;
    let mantissa = ((bits & F32_MANTISSA) as u64) << MANTISSA_SHIFT;
    f64::from_bits(sign | 0x7ff << 52 | mantissa)
}

/// Inverse of [`widen_nan`]. Payload bits that do not fit are dropped; a NaN whose surviving
/// mantissa would be zero comes back quiet so it stays a NaN.
fn narrow_nan(x: f64) -> f32 {
    let bits = x.to_bits();
    let sign = ((bits >> 63) as u32) << 31;
    let mut mantissa = ((bits & F64_MANTISSA) >> MANTISSA_SHIFT) as u32;
    if mantissa == 0 {
        mantissa = F32_QUIET;
    }
    f32::from_bits(sign | 0xff << 23 | mantissa)
}

impl sealed::Sealed for f32 {}

impl Scalar for f32 {
    const TAG: Tag = Tag::FLOAT32;

    /// Widening to `f64` is exact.
    #[inline(always)]
    fn into_var(self) -> Var {
        let wide = if self.is_nan() {
            widen_nan(self)
        } else {
            self as f64
        };
        Var::encode_float(wide, Self::TAG)
    }

    /// Rounds to nearest, ties to even.
    #[inline(always)]
    fn from_var(var: Var) -> Self {
        let wide = var.decode_float(Self::TAG);
        if wide.is_nan() {
            narrow_nan(wide)
        } else {
            wide as f32
        }
    }
}

macro_rules! var_accessors {
    ($($name:ident: $ty:ty),*) => {
        paste::paste! {
            impl Var {
                $(
                    #[inline(always)]
                    pub fn [<from_ $name>](value: $ty) -> Var {
                        <$ty as Scalar>::into_var(value)
                    }

                    #[inline(always)]
                    pub fn [<to_ $name>](self) -> $ty {
                        <$ty as Scalar>::from_var(self)
                    }
                )*
            }
        }
    };
}

var_accessors! {
    int8: i8, int16: i16, int32: i32, int64: i64,
    uint8: u8, uint16: u16, uint32: u32, uint64: u64,
    float32: f32, float64: f64,
    int: NativeInt, uint: NativeUint, float: NativeFloat
}

macro_rules! var_from {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Var {
            fn from(value: $ty) -> Var {
                <$ty as Scalar>::into_var(value)
            }
        }
    )*};
}

var_from!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl Var {
    /// Boxes any supported scalar.
    pub fn of<T: Scalar>(value: T) -> Var {
        value.into_var()
    }

    /// Unboxes as `T`. The caller is responsible for asking for the type the value was boxed as.
    pub fn get<T: Scalar>(self) -> T {
        T::from_var(self)
    }
}

//! C entry points of the value box.
//!
//! Symbols match the runtime header (`var_from_int8`, `var_to_float`, ...). `Var` is passed and
//! returned by value. The unsuffixed `int`/`uint`/`float` entries take the target's native width.

use crate::{
    native::{NativeFloat, NativeInt, NativeUint},
    var::Var,
};

/// Bumped whenever the layout of `Var` or a signature below changes.
pub const ABI_VERSION: u32 = 1;

#[no_mangle]
pub extern "C" fn var_abi_version() -> u32 {
    ABI_VERSION
}

macro_rules! entry_points {
    ($($name:ident: $ty:ty),*) => {
        paste::paste! {
            $(
                #[no_mangle]
                pub extern "C" fn [<var_from_ $name>](value: $ty) -> Var {
                    Var::[<from_ $name>](value)
                }

                #[no_mangle]
                pub extern "C" fn [<var_to_ $name>](var: Var) -> $ty {
                    var.[<to_ $name>]()
                }
            )*
        }
    };
}

entry_points! {
    int: NativeInt, uint: NativeUint, float: NativeFloat,
    int64: i64, int32: i32, int16: i16, int8: i8,
    uint64: u64, uint32: u32, uint16: u16, uint8: u8,
    float64: f64, float32: f32
}

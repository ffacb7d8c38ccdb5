//! Fixed-size boxed scalar for the katana runtime's native call boundary.
//!
//! [`Var`] holds any 8/16/32/64 bit integer or 32/64 bit float in two machine words. It carries no
//! type information of its own: you box with `from_*` and unbox with the matching `to_*`.
//! Build with the `tagged` feature to record and check the boxed kind.

pub mod abi;
pub mod error;
pub mod header;
pub mod native;
pub mod probe;
pub mod scalar;
pub mod tag;
pub mod var;

pub use error::{ParseTagError, TagMismatch};
pub use native::{NativeFloat, NativeInt, NativeUint, NATIVE_WIDTH};
pub use scalar::Scalar;
pub use tag::{Kind, Tag, Width};
pub use var::Var;

pub mod prelude {
    pub use crate::{Kind, Scalar, Tag, Var, Width};
}

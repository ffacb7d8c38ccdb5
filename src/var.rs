use std::{fmt, mem::size_of};

use crate::{error::TagMismatch, tag::Tag};

/// A boxed scalar passed across the native call boundary.
///
/// Layout is two 64 bit words, ABI compatible with `struct katana_var_t { long long int data[2]; }`:
///
/// ```text
///     data[0]  payload carrier
///     data[1]  descriptor (0 unless built with the `tagged` feature)
/// ```
///
/// The payload carrier holds one of three 64 bit representations:
/// - signed integers, sign extended from their own width,
/// - unsigned integers, zero extended from their own width,
/// - floats, as the IEEE-754 bits of the value converted to `f64`.
///
/// A `Var` does not know what it holds. Decoding truncates the carrier back to the requested width,
/// so decoding under a different kind or width than the one used to box is well defined but usually
/// meaningless. With `tagged` the descriptor remembers the kind and width and a kind mismatch is fatal.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Var {
    data: [i64; 2],
}

const _: () = assert!(size_of::<Var>() == 2 * size_of::<i64>());

impl Var {
    const PAYLOAD: usize = 0;
    const DESCRIPTOR: usize = 1;

    /// Places a 64 bit carrier into a new box. `raw` must already be extended to 64 bits.
    #[inline(always)]
    pub(crate) const fn encode(raw: i64, tag: Tag) -> Var {
        Var {
            data: [raw, Self::descriptor(tag)],
        }
    }

    /// Returns the 64 bit carrier. Narrowing to the requested width is up to the caller.
    #[inline(always)]
    pub(crate) fn decode(self, tag: Tag) -> i64 {
        self.expect_tag(tag);
        self.data[Self::PAYLOAD]
    }

    #[inline(always)]
    pub(crate) fn encode_float(value: f64, tag: Tag) -> Var {
        Var::encode(value.to_bits() as i64, tag)
    }

    #[inline(always)]
    pub(crate) fn decode_float(self, tag: Tag) -> f64 {
        f64::from_bits(self.decode(tag) as u64)
    }

    #[cfg(feature = "tagged")]
    #[inline(always)]
    const fn descriptor(tag: Tag) -> i64 {
        tag.encode()
    }

    #[cfg(not(feature = "tagged"))]
    #[inline(always)]
    const fn descriptor(_tag: Tag) -> i64 {
        0
    }

    #[cfg(feature = "tagged")]
    fn expect_tag(self, requested: Tag) {
        if let Err(mismatch) = self.check(requested) {
            log::error!("fatal: {} ({:?})", mismatch, self);
            panic!("{}", mismatch);
        }
    }

    #[cfg(not(feature = "tagged"))]
    #[inline(always)]
    fn expect_tag(self, _requested: Tag) {}

    /// Kind and width this value was boxed as. Always `None` unless built with `tagged`.
    pub fn tag(self) -> Option<Tag> {
        if cfg!(feature = "tagged") {
            Tag::decode(self.data[Self::DESCRIPTOR])
        } else {
            None
        }
    }

    /// Checks that unboxing as `requested` is meaningful.
    ///
    /// Any width of the boxed kind is accepted: narrowing truncates and widening is exact.
    /// A zero descriptor means untagged and always passes; any other word that is not a valid
    /// tag is rejected. Without `tagged` nothing is checked.
    pub fn check(self, requested: Tag) -> Result<(), TagMismatch> {
        let descriptor = self.data[Self::DESCRIPTOR];
        if !cfg!(feature = "tagged") || descriptor == 0 {
            return Ok(());
        }
        match Tag::decode(descriptor) {
            Some(boxed) if boxed.kind != requested.kind => {
                Err(TagMismatch::Kind { boxed, requested })
            }
            Some(_) => Ok(()),
            None => Err(TagMismatch::Corrupt {
                descriptor,
                requested,
            }),
        }
    }

    /// Raw words, for diagnostics and marshalling only.
    pub const fn words(self) -> [i64; 2] {
        self.data
    }

    /// Rebuilds a value from words previously obtained with [`Var::words`] or from native code.
    ///
    /// # Safety
    ///
    /// `data` must be the words of a value produced by a `from_*` call of this build. Any other
    /// words bypass the boxing discipline: the payload decodes as garbage, and with `tagged` a
    /// descriptor that is not a valid tag is fatal on the next `to_*` call.
    pub const unsafe fn from_words(data: [i64; 2]) -> Var {
        Var { data }
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Var({:#018x}, {:#018x})",
            self.data[Self::PAYLOAD],
            self.data[Self::DESCRIPTOR]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::align_of;

    #[test]
    fn layout_matches_c_struct() {
        assert_eq!(size_of::<Var>(), 16);
        assert_eq!(align_of::<Var>(), align_of::<i64>());
    }

    #[test]
    fn carrier_is_stored_verbatim() {
        let var = Var::encode(-2, Tag::INT64);
        assert_eq!(var.words()[0], -2);
        assert_eq!(var.decode(Tag::INT64), -2);
    }

    #[test]
    fn float_carrier_keeps_bits() {
        let var = Var::encode_float(-0.0, Tag::FLOAT64);
        assert_eq!(var.words()[0] as u64, 0x8000_0000_0000_0000);
        assert!(var.decode_float(Tag::FLOAT64).is_sign_negative());
    }

    #[test]
    fn default_is_zero() {
        let var = Var::default();
        assert_eq!(var.words(), [0, 0]);
        assert_eq!(var.tag(), None);
        assert_eq!(var.decode(Tag::UINT64), 0);
        assert_eq!(var.decode_float(Tag::FLOAT64), 0.0);
    }

    #[test]
    fn words_round_trip() {
        let var = Var::encode(0x1234, Tag::UINT16);
        assert_eq!(unsafe { Var::from_words(var.words()) }, var);
    }

    #[test]
    fn debug_prints_words() {
        let var = Var::encode(0xff, Tag::UINT8);
        let text = format!("{:?}", var);
        assert!(text.starts_with("Var(0x00000000000000ff, "));
    }

    #[cfg(not(feature = "tagged"))]
    #[test]
    fn untagged_descriptor_is_zero() {
        let var = Var::encode(7, Tag::INT8);
        assert_eq!(var.words()[1], 0);
        assert_eq!(var.tag(), None);
        assert_eq!(var.check(Tag::FLOAT32), Ok(()));
    }

    #[cfg(feature = "tagged")]
    #[test]
    fn tagged_descriptor() {
        let var = Var::encode(7, Tag::INT8);
        assert_eq!(var.tag(), Some(Tag::INT8));
        assert_eq!(var.check(Tag::INT64), Ok(()));
        assert_eq!(
            var.check(Tag::UINT8),
            Err(TagMismatch::Kind {
                boxed: Tag::INT8,
                requested: Tag::UINT8
            })
        );
    }

    #[cfg(feature = "tagged")]
    #[test]
    fn tagged_accepts_untagged_default() {
        let var = Var::default();
        for tag in Tag::FIXED {
            assert_eq!(var.check(tag), Ok(()));
        }
        assert_eq!(var.decode(Tag::INT32), 0);
        assert_eq!(var.decode_float(Tag::FLOAT32), 0.0);
    }

    #[cfg(feature = "tagged")]
    #[test]
    fn tagged_rejects_corrupt_descriptor() {
        let var = unsafe { Var::from_words([0x3ff0_0000_0000_0000, 0x0301]) };
        assert_eq!(var.tag(), None);
        assert_eq!(
            var.check(Tag::INT64),
            Err(TagMismatch::Corrupt {
                descriptor: 0x0301,
                requested: Tag::INT64
            })
        );
    }

    #[cfg(feature = "tagged")]
    #[test]
    #[should_panic(expected = "var with corrupt descriptor 0x301 unboxed as int64")]
    fn tagged_corrupt_descriptor_is_fatal() {
        let var = unsafe { Var::from_words([0x3ff0_0000_0000_0000, 0x0301]) };
        var.decode(Tag::INT64);
    }

    #[cfg(not(feature = "tagged"))]
    #[test]
    fn untagged_ignores_descriptor() {
        let var = unsafe { Var::from_words([5, 0x0301]) };
        assert_eq!(var.check(Tag::INT64), Ok(()));
        assert_eq!(var.decode(Tag::INT64), 5);
    }

    #[cfg(feature = "tagged")]
    #[test]
    #[should_panic(expected = "var boxed as float64 unboxed as int32")]
    fn tagged_mismatch_is_fatal() {
        Var::encode_float(1.0, Tag::FLOAT64).decode(Tag::INT32);
    }
}

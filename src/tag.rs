use std::{fmt, str::FromStr};

use crate::error::ParseTagError;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum Kind {
    Int = 1,
    Uint = 2,
    Float = 3,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum Width {
    W8 = 8,
    W16 = 16,
    W32 = 32,
    W64 = 64,
}

impl Width {
    pub const fn bits(self) -> u32 {
        self as u32
    }

    pub const fn from_bits(bits: u32) -> Option<Width> {
        match bits {
            8 => Some(Width::W8),
            16 => Some(Width::W16),
            32 => Some(Width::W32),
            64 => Some(Width::W64),
            _ => None,
        }
    }
}

/// Kind and width of a boxed scalar.
///
/// The runtime never needs this to decode a [`Var`](crate::Var); callers track it themselves.
/// It exists for the optional `tagged` build, for diagnostics and for the header renderer.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Tag {
    pub kind: Kind,
    pub width: Width,
}

impl Tag {
    pub const INT8: Tag = Tag::new(Kind::Int, Width::W8);
    pub const INT16: Tag = Tag::new(Kind::Int, Width::W16);
    pub const INT32: Tag = Tag::new(Kind::Int, Width::W32);
    pub const INT64: Tag = Tag::new(Kind::Int, Width::W64);
    pub const UINT8: Tag = Tag::new(Kind::Uint, Width::W8);
    pub const UINT16: Tag = Tag::new(Kind::Uint, Width::W16);
    pub const UINT32: Tag = Tag::new(Kind::Uint, Width::W32);
    pub const UINT64: Tag = Tag::new(Kind::Uint, Width::W64);
    pub const FLOAT32: Tag = Tag::new(Kind::Float, Width::W32);
    pub const FLOAT64: Tag = Tag::new(Kind::Float, Width::W64);

    pub const NATIVE_INT: Tag = Tag::new(Kind::Int, crate::native::NATIVE_WIDTH);
    pub const NATIVE_UINT: Tag = Tag::new(Kind::Uint, crate::native::NATIVE_WIDTH);
    pub const NATIVE_FLOAT: Tag = Tag::new(Kind::Float, crate::native::NATIVE_WIDTH);

    /// Every fixed-width tag, in the order the runtime header declares them.
    pub const FIXED: [Tag; 10] = [
        Tag::INT64,
        Tag::INT32,
        Tag::INT16,
        Tag::INT8,
        Tag::UINT64,
        Tag::UINT32,
        Tag::UINT16,
        Tag::UINT8,
        Tag::FLOAT64,
        Tag::FLOAT32,
    ];

    pub const fn new(kind: Kind, width: Width) -> Tag {
        Tag { kind, width }
    }

    /// There are no 8 or 16 bit floats.
    pub const fn is_valid(self) -> bool {
        !matches!(
            (self.kind, self.width),
            (Kind::Float, Width::W8) | (Kind::Float, Width::W16)
        )
    }

    /// Packs the tag into the descriptor word. Zero is reserved for "untagged".
    pub(crate) const fn encode(self) -> i64 {
        ((self.kind as i64) << 8) | self.width as i64
    }

    pub(crate) const fn decode(word: i64) -> Option<Tag> {
        let kind = match (word >> 8) & 0xff {
            1 => Kind::Int,
            2 => Kind::Uint,
            3 => Kind::Float,
            _ => return None,
        };
        let tag = match Width::from_bits((word & 0xff) as u32) {
            Some(width) => Tag { kind, width },
            None => return None,
        };
        if tag.is_valid() && tag.encode() == word {
            Some(tag)
        } else {
            None
        }
    }

    /// C spelling of the scalar in the rendered header.
    ///
    /// Only spellings with the same width on ILP32, LP64 and LLP64 are used: `long` would be
    /// 64 bits for a 32 bit export on LP64, and plain `char` is unsigned on AArch64.
    pub const fn c_type(self) -> &'static str {
        match (self.kind, self.width) {
            (Kind::Int, Width::W8) => "signed char",
            (Kind::Int, Width::W16) => "short int",
            (Kind::Int, Width::W32) => "int",
            (Kind::Int, Width::W64) => "long long int",
            (Kind::Uint, Width::W8) => "unsigned char",
            (Kind::Uint, Width::W16) => "unsigned short int",
            (Kind::Uint, Width::W32) => "unsigned int",
            (Kind::Uint, Width::W64) => "unsigned long long int",
            (Kind::Float, Width::W64) => "double",
            (Kind::Float, _) => "float",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
        };
        write!(f, "{}{}", kind, self.width.bits())
    }
}

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => return Ok(Tag::NATIVE_INT),
            "uint" => return Ok(Tag::NATIVE_UINT),
            "float" => return Ok(Tag::NATIVE_FLOAT),
            _ => {}
        }

        let (kind, digits) = if let Some(rest) = s.strip_prefix("uint") {
            (Kind::Uint, rest)
        } else if let Some(rest) = s.strip_prefix("int") {
            (Kind::Int, rest)
        } else if let Some(rest) = s.strip_prefix("float") {
            (Kind::Float, rest)
        } else {
            return Err(ParseTagError::UnknownKind(s.to_owned()));
        };

        let width = Some(digits)
            .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|d| d.parse::<u32>().ok())
            .and_then(Width::from_bits)
            .ok_or_else(|| ParseTagError::BadWidth(s.to_owned()))?;

        let tag = Tag::new(kind, width);
        if !tag.is_valid() {
            return Err(ParseTagError::BadWidth(s.to_owned()));
        }
        Ok(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixed_names() {
        for tag in Tag::FIXED {
            assert_eq!(tag.to_string().parse::<Tag>(), Ok(tag));
        }
    }

    #[test]
    fn parses_native_names() {
        assert_eq!("int".parse::<Tag>(), Ok(Tag::NATIVE_INT));
        assert_eq!("uint".parse::<Tag>(), Ok(Tag::NATIVE_UINT));
        assert_eq!("float".parse::<Tag>(), Ok(Tag::NATIVE_FLOAT));
    }

    #[test]
    fn rejects_bad_names() {
        assert!(matches!(
            "bool".parse::<Tag>(),
            Err(ParseTagError::UnknownKind(_))
        ));
        assert!(matches!(
            "int12".parse::<Tag>(),
            Err(ParseTagError::BadWidth(_))
        ));
        assert!(matches!(
            "uint+8".parse::<Tag>(),
            Err(ParseTagError::BadWidth(_))
        ));
        assert!(matches!(
            "float16".parse::<Tag>(),
            Err(ParseTagError::BadWidth(_))
        ));
    }

    #[test]
    fn descriptor_word() {
        for tag in Tag::FIXED {
            assert_ne!(tag.encode(), 0);
            assert_eq!(Tag::decode(tag.encode()), Some(tag));
        }
        assert_eq!(Tag::decode(0), None);
        assert_eq!(Tag::decode(0x0301), None);
        assert_eq!(Tag::decode(0x0310), None);
        assert_eq!(Tag::decode(Tag::INT8.encode() | 1 << 32), None);
    }

    #[test]
    fn c_types() {
        assert_eq!(Tag::INT8.c_type(), "signed char");
        assert_eq!(Tag::INT32.c_type(), "int");
        assert_eq!(Tag::UINT32.c_type(), "unsigned int");
        for tag in Tag::FIXED {
            assert!(!tag.c_type().contains("long int") || tag.width == Width::W64);
        }
        assert_eq!(Tag::FLOAT64.c_type(), "double");
    }
}

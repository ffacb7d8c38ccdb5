use std::fmt;

use crate::tag::Tag;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseTagError {
    UnknownKind(String),
    BadWidth(String),
}

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind(name) => write!(f, "unknown scalar type '{}'", name),
            Self::BadWidth(name) => write!(f, "unsupported width in scalar type '{}'", name),
        }
    }
}

impl std::error::Error for ParseTagError {}

/// A `to_*` call asked for something the value was not boxed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagMismatch {
    Kind { boxed: Tag, requested: Tag },
    /// The descriptor word is neither zero nor a valid tag.
    Corrupt { descriptor: i64, requested: Tag },
}

impl fmt::Display for TagMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind { boxed, requested } => {
                write!(f, "var boxed as {} unboxed as {}", boxed, requested)
            }
            Self::Corrupt {
                descriptor,
                requested,
            } => write!(
                f,
                "var with corrupt descriptor {:#x} unboxed as {}",
                descriptor, requested
            ),
        }
    }
}

impl std::error::Error for TagMismatch {}

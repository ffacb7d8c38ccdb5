use std::fmt::Write;

use crate::tag::Tag;

pub const STRUCT_NAME: &str = "struct katana_var_t";

/// Renders the C declarations of the entry points in [`crate::abi`].
///
/// The native `int`/`uint`/`float` prototypes are emitted already resolved for the target this
/// crate was built for, so the output must be regenerated per architecture.
pub fn render() -> String {
    let mut out = String::new();
    let natives = [
        ("int", Tag::NATIVE_INT),
        ("uint", Tag::NATIVE_UINT),
        ("float", Tag::NATIVE_FLOAT),
    ];

    writeln!(out, "{} {{ long long int data[2]; }};", STRUCT_NAME).ok();
    writeln!(out).ok();

    for (name, tag) in natives {
        writeln!(out, "{} var_from_{}({});", STRUCT_NAME, name, tag.c_type()).ok();
    }
    for tag in Tag::FIXED {
        writeln!(out, "{} var_from_{}({});", STRUCT_NAME, tag, tag.c_type()).ok();
    }
    writeln!(out).ok();

    for (name, tag) in natives {
        writeln!(out, "{} var_to_{}({});", tag.c_type(), name, STRUCT_NAME).ok();
    }
    for tag in Tag::FIXED {
        writeln!(out, "{} var_to_{}({});", tag.c_type(), tag, STRUCT_NAME).ok();
    }

    log::trace!("rendered header, {} bytes", out.len());
    out
}

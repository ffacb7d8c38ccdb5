//! Text front end for boxing and unboxing, used by the `var-probe` binary.

use num_traits::Num;

use crate::{
    tag::{Kind, Tag, Width},
    var::Var,
};

fn parse_num<T: Num>(literal: &str) -> Result<T, String> {
    let invalid = || format!("invalid literal '{}'", literal);

    let (negative, digits) = match literal.as_bytes().first() {
        Some(b'-') => (true, &literal[1..]),
        Some(b'+') => (false, &literal[1..]),
        _ => (false, literal),
    };
    let (radix, digits) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex)
    } else if let Some(bin) = digits.strip_prefix("0b") {
        (2, bin)
    } else {
        (10, digits)
    };
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(invalid());
    }

    let text = if negative {
        format!("-{}", digits)
    } else {
        digits.to_owned()
    };
    T::from_str_radix(&text, radix).map_err(|_| invalid())
}

/// Boxes `literal` as `tag`. With `bits`, float literals are taken as raw IEEE-754 bit patterns.
pub fn box_literal(tag: Tag, literal: &str, bits: bool) -> Result<Var, String> {
    let var = match (tag.kind, tag.width) {
        (Kind::Int, Width::W8) => Var::from_int8(parse_num(literal)?),
        (Kind::Int, Width::W16) => Var::from_int16(parse_num(literal)?),
        (Kind::Int, Width::W32) => Var::from_int32(parse_num(literal)?),
        (Kind::Int, Width::W64) => Var::from_int64(parse_num(literal)?),
        (Kind::Uint, Width::W8) => Var::from_uint8(parse_num(literal)?),
        (Kind::Uint, Width::W16) => Var::from_uint16(parse_num(literal)?),
        (Kind::Uint, Width::W32) => Var::from_uint32(parse_num(literal)?),
        (Kind::Uint, Width::W64) => Var::from_uint64(parse_num(literal)?),
        (Kind::Float, Width::W32) if bits => {
            Var::from_float32(f32::from_bits(parse_num(literal)?))
        }
        (Kind::Float, Width::W64) if bits => {
            Var::from_float64(f64::from_bits(parse_num(literal)?))
        }
        (Kind::Float, Width::W32) => Var::from_float32(parse_num(literal)?),
        (Kind::Float, Width::W64) => Var::from_float64(parse_num(literal)?),
        (Kind::Float, _) => return Err(format!("'{}' is not a boxable type", tag)),
    };
    log::trace!("boxed {} as {}: {:?}", literal, tag, var);
    Ok(var)
}

/// Unboxes `var` as `tag` and formats the result. Floats also show their bit pattern.
pub fn unbox_to_string(var: Var, tag: Tag) -> Result<String, String> {
    if let Err(mismatch) = var.check(tag) {
        return Err(mismatch.to_string());
    }
    let text = match (tag.kind, tag.width) {
        (Kind::Int, Width::W8) => var.to_int8().to_string(),
        (Kind::Int, Width::W16) => var.to_int16().to_string(),
        (Kind::Int, Width::W32) => var.to_int32().to_string(),
        (Kind::Int, Width::W64) => var.to_int64().to_string(),
        (Kind::Uint, Width::W8) => var.to_uint8().to_string(),
        (Kind::Uint, Width::W16) => var.to_uint16().to_string(),
        (Kind::Uint, Width::W32) => var.to_uint32().to_string(),
        (Kind::Uint, Width::W64) => var.to_uint64().to_string(),
        (Kind::Float, Width::W32) => {
            let x = var.to_float32();
            format!("{:?} ({:#010x})", x, x.to_bits())
        }
        (Kind::Float, Width::W64) => {
            let x = var.to_float64();
            format!("{:?} ({:#018x})", x, x.to_bits())
        }
        (Kind::Float, _) => return Err(format!("'{}' is not a boxable type", tag)),
    };
    Ok(text)
}

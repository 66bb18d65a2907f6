//! Number formatting compatible with CSS authoring tools.
//!
//! Stylesheet generators conventionally print numbers the way ECMAScript
//! does: `Number#toString` for raw values and `Number#toFixed` for rounded
//! ones. Rust's `{}` and `{:.N}` differ in a few places (`inf`, `-0`,
//! half-even ties, no exponent form), so both are implemented here on top of
//! the exact decimal expansion of the binary value.

/// Largest magnitude printed in positional notation.
const EXPONENT_ABOVE: f64 = 1e21;
/// Smallest non-zero magnitude printed in positional notation.
const EXPONENT_BELOW: f64 = 1e-6;
/// Enough fractional digits to print any finite `f64` exactly.
const EXACT_DIGITS: usize = 1074;

/// Format like ECMAScript `Number#toString`.
///
/// Shortest round-trip digits; exponent form (`1e+21`, `1.5e-7`) outside
/// `[1e-6, 1e21)`; `NaN`, `Infinity`, `-Infinity` for non-finite values;
/// negative zero prints as `0`.
pub fn display(value: f64) -> String {
    if let Some(token) = non_finite(value) {
        return token.to_owned();
    }
    if value == 0.0 {
        return "0".to_owned();
    }
    let abs = value.abs();
    if (EXPONENT_BELOW..EXPONENT_ABOVE).contains(&abs) {
        return format!("{value}");
    }
    let s = format!("{value:e}");
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => s,
    }
}

/// Format like ECMAScript `Number#toFixed(digits)`.
///
/// The exact binary value is rounded half away from zero and always shows
/// `digits` fractional digits. Magnitudes of `1e21` and above fall back to
/// [`display`].
pub fn to_fixed(value: f64, digits: usize) -> String {
    if let Some(token) = non_finite(value) {
        return token.to_owned();
    }
    let abs = value.abs();
    if abs >= EXPONENT_ABOVE {
        return display(value);
    }

    let exact = format!("{:.*}", EXACT_DIGITS, abs);
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(digits))
        .collect();
    let round_up = frac_part.as_bytes().get(digits).is_some_and(|d| *d >= b'5');
    if round_up {
        increment_decimal(&mut kept);
    }

    let int_len = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(kept[..int_len].iter().map(|b| char::from(*b)));
    if digits > 0 {
        out.push('.');
        out.extend(kept[int_len..].iter().map(|b| char::from(*b)));
    }
    out
}

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("Infinity")
    } else if value == f64::NEG_INFINITY {
        Some("-Infinity")
    } else {
        None
    }
}

/// Add one unit in the last place to an ASCII digit string, growing it on carry-out.
fn increment_decimal(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

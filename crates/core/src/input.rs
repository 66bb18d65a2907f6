/// Coerce raw form input to a number.
///
/// Follows the ECMAScript `Number(string)` rules that HTML number inputs are
/// read through: surrounding whitespace is ignored, an empty string is `0`,
/// decimal literals may carry a sign and an exponent, `0x`/`0o`/`0b`
/// prefixes select an unsigned integer radix, and `Infinity` is spelled out.
/// Everything else is `NaN`. Coercion never fails.
pub fn coerce_number(raw: &str) -> f64 {
    let s = raw.trim_matches(is_js_whitespace);
    if s.is_empty() {
        return 0.0;
    }

    if let Some(value) = parse_radix(s) {
        return value;
    }

    let (sign, unsigned) = match s.as_bytes()[0] {
        b'-' => (-1.0, &s[1..]),
        b'+' => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }
    if !is_decimal_literal(unsigned) {
        return f64::NAN;
    }
    unsigned.parse::<f64>().map_or(f64::NAN, |v| sign * v)
}

/// ECMAScript `WhiteSpace` and `LineTerminator`: Unicode white space plus the
/// byte order mark, minus NEL.
fn is_js_whitespace(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{85}')
}

fn parse_radix(s: &str) -> Option<f64> {
    let (radix, digits) = match s.get(..2)? {
        "0x" | "0X" => (16, &s[2..]),
        "0o" | "0O" => (8, &s[2..]),
        "0b" | "0B" => (2, &s[2..]),
        _ => return None,
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(f64::NAN);
    }
    // Accumulate in f64 so literals wider than u128 still saturate sensibly.
    let value = digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0.0_f64, |acc, d| acc * f64::from(radix) + f64::from(d));
    Some(value)
}

/// `digits [. digits] [(e|E) [sign] digits]`, where either side of the dot may be empty but not both.
fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        mantissa_digits += i - frac_start;
    }
    if mantissa_digits == 0 {
        return false;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_decimals() {
        assert_eq!(coerce_number("16"), 16.0);
        assert_eq!(coerce_number("3.5"), 3.5);
        assert_eq!(coerce_number("-0.25"), -0.25);
        assert_eq!(coerce_number("+2"), 2.0);
        assert_eq!(coerce_number(".5"), 0.5);
        assert_eq!(coerce_number("5."), 5.0);
        assert_eq!(coerce_number("1e3"), 1000.0);
        assert_eq!(coerce_number("2.5E-1"), 0.25);
    }

    #[test]
    fn whitespace_and_empty() {
        assert_eq!(coerce_number("  360\t"), 360.0);
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("   "), 0.0);
    }

    #[test]
    fn unicode_spaces_and_byte_order_mark() {
        assert_eq!(coerce_number("\u{00A0}5\u{FEFF}"), 5.0);
        assert_eq!(coerce_number("\u{FEFF}"), 0.0);
        assert_eq!(coerce_number("\u{2028}1.5\u{3000}"), 1.5);
        // NEL is not ECMAScript white space.
        assert!(coerce_number("\u{85}1").is_nan());
    }

    #[test]
    fn radix_prefixes() {
        assert_eq!(coerce_number("0x10"), 16.0);
        assert_eq!(coerce_number("0o17"), 15.0);
        assert_eq!(coerce_number("0b101"), 5.0);
        assert!(coerce_number("0x").is_nan());
        assert!(coerce_number("-0x10").is_nan());
        assert!(coerce_number("0b102").is_nan());
    }

    #[test]
    fn infinity_spelling() {
        assert_eq!(coerce_number("Infinity"), f64::INFINITY);
        assert_eq!(coerce_number("-Infinity"), f64::NEG_INFINITY);
        assert!(coerce_number("inf").is_nan());
        assert!(coerce_number("infinity").is_nan());
        assert!(coerce_number("NaN").is_nan());
    }

    #[test]
    fn garbage_is_nan() {
        for raw in ["abc", "1px", "1.2.3", "e5", ".", "-", "1e", "1e+", "--1", "1_000"] {
            assert!(coerce_number(raw).is_nan(), "{raw:?} should coerce to NaN");
        }
    }
}

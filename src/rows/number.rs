//! Lenient numeric parsing of extracted fields.
//!
//! Both parsers read the longest numeric prefix of the field, the way the C
//! library's `strtoll(s, NULL, 0)` and `strtof` do, and fall back to zero when
//! no prefix is numeric. They never fail.

/// Whitespace as understood by C `isspace` in the "C" locale.
fn is_c_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn skip_space(text: &[u8]) -> &[u8] {
    let start = text.iter().position(|&b| !is_c_space(b)).unwrap_or(text.len());
    &text[start..]
}

fn split_sign(text: &[u8]) -> (bool, &[u8]) {
    match text.first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

fn has_hex_prefix(text: &[u8]) -> bool {
    text.len() >= 2 && text[0] == b'0' && (text[1] == b'x' || text[1] == b'X')
}

/// Parse a signed 64-bit integer with C base detection: `0x` is hexadecimal,
/// a leading `0` is octal, anything else decimal. Out-of-range values saturate.
pub fn parse_int(text: &[u8]) -> i64 {
    let (negative, body) = split_sign(skip_space(text));

    let (radix, digits) = if has_hex_prefix(body) && body.get(2).is_some_and(u8::is_ascii_hexdigit) {
        (16, &body[2..])
    } else if body.first() == Some(&b'0') {
        (8, body)
    } else {
        (10, body)
    };

    let mut magnitude: u64 = 0;
    let mut overflow = false;
    for &byte in digits {
        let Some(digit) = char::from(byte).to_digit(radix) else {
            break;
        };
        match magnitude
            .checked_mul(u64::from(radix))
            .and_then(|m| m.checked_add(u64::from(digit)))
        {
            Some(next) => magnitude = next,
            None => overflow = true,
        }
    }

    if negative {
        if overflow || magnitude > i64::MIN.unsigned_abs() {
            i64::MIN
        } else {
            (magnitude as i64).wrapping_neg()
        }
    } else if overflow || magnitude > i64::MAX as u64 {
        i64::MAX
    } else {
        magnitude as i64
    }
}

/// Parse a 32-bit float: decimal with optional exponent, hexadecimal with
/// optional binary exponent, or `inf`/`infinity`/`nan` in any case.
pub fn parse_float(text: &[u8]) -> f32 {
    let (negative, body) = split_sign(skip_space(text));

    let magnitude = parse_special(body)
        .or_else(|| parse_hex_float(body))
        .unwrap_or_else(|| parse_decimal_float(body));

    if negative { -magnitude } else { magnitude }
}

fn starts_with_ignore_case(text: &[u8], word: &[u8]) -> bool {
    text.len() >= word.len() && text[..word.len()].eq_ignore_ascii_case(word)
}

fn parse_special(body: &[u8]) -> Option<f32> {
    if starts_with_ignore_case(body, b"inf") {
        Some(f32::INFINITY)
    } else if starts_with_ignore_case(body, b"nan") {
        Some(f32::NAN)
    } else {
        None
    }
}

fn count_digits(text: &[u8], is_digit: impl Fn(&u8) -> bool) -> usize {
    text.iter().take_while(|&b| is_digit(b)).count()
}

/// Length of an exponent suffix such as `e-12` or `p+3`, or 0 if there is none.
fn exponent_len(text: &[u8], markers: [u8; 2]) -> usize {
    if !text.first().is_some_and(|b| markers.contains(b)) {
        return 0;
    }
    let signed = usize::from(matches!(text.get(1), Some(b'+' | b'-')));
    let digits = count_digits(&text[1 + signed..], u8::is_ascii_digit);
    if digits == 0 { 0 } else { 1 + signed + digits }
}

fn parse_decimal_float(body: &[u8]) -> f32 {
    let int_digits = count_digits(body, u8::is_ascii_digit);
    let mut end = int_digits;
    let mut frac_digits = 0;
    if body.get(end) == Some(&b'.') {
        frac_digits = count_digits(&body[end + 1..], u8::is_ascii_digit);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return 0.0;
    }
    end += exponent_len(&body[end..], [b'e', b'E']);

    std::str::from_utf8(&body[..end])
        .ok()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(0.0)
}

/// Hexadecimal float such as `0x1.8p3`. `None` when the text after `0x` has
/// no hex digits, in which case only the leading `0` is numeric.
fn parse_hex_float(body: &[u8]) -> Option<f32> {
    if !has_hex_prefix(body) {
        return None;
    }
    let text = &body[2..];

    let int_digits = count_digits(text, u8::is_ascii_hexdigit);
    let mut end = int_digits;
    let mut frac_digits = 0;
    if text.get(end) == Some(&b'.') {
        frac_digits = count_digits(&text[end + 1..], u8::is_ascii_hexdigit);
        end += 1;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    // Digits past the 60-bit mantissa only move the exponent.
    let mut mantissa: u64 = 0;
    let mut exponent: i64 = 0;
    let int_part = &text[..int_digits];
    let frac_part = &text[end..end + frac_digits];
    for &byte in int_part {
        let digit = u64::from(char::from(byte).to_digit(16).unwrap_or(0));
        if mantissa >> 60 == 0 {
            mantissa = mantissa * 16 + digit;
        } else {
            exponent += 4;
        }
    }
    for &byte in frac_part {
        let digit = u64::from(char::from(byte).to_digit(16).unwrap_or(0));
        if mantissa >> 60 == 0 {
            mantissa = mantissa * 16 + digit;
            exponent -= 4;
        }
    }
    end += frac_digits;

    let exp_len = exponent_len(&text[end..], [b'p', b'P']);
    if exp_len > 0 {
        let exp_text = &text[end + 1..end + exp_len];
        let (exp_negative, exp_digits) = split_sign(exp_text);
        let value = exp_digits
            .iter()
            .fold(0i64, |acc, &b| (acc * 10 + i64::from(b - b'0')).min(100_000));
        exponent += if exp_negative { -value } else { value };
    }

    let exponent = exponent.clamp(-4_000, 4_000) as i32;
    let half = exponent / 2;
    let value = mantissa as f64 * 2f64.powi(half) * 2f64.powi(exponent - half);
    Some(value as f32)
}

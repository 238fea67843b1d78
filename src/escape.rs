//! Hex digit and short-escape conversion tables.
//!
//! Companion utilities for scanners and emitters sitting on top of the
//! codec: the 0..=15 ⇄ ASCII hex digit bijection and the standard C-style
//! short escape mapping, plus the JSON subset (JSON omits `\a`, `\v`, `\'`
//! and `\?`).
//!
//! All conversions return -1 when there is no mapping.

use crate::Rune;

/// Converts an ASCII hex digit scalar to its 4-bit value, or -1.
///
/// Accepts both `"0123456789abcdef"` and `"0123456789ABCDEF"`.
#[inline]
pub const fn rune_to_hex(rune: Rune) -> i32 {
    match rune as u32 {
        u @ 0x30..=0x39 => (u - 0x30) as i32,
        u if (u | 0x20) >= 0x61 && (u | 0x20) <= 0x66 => ((u | 0x20) - 0x61 + 10) as i32,
        _ => -1,
    }
}

/// Converts a 4-bit value to a lower-case ASCII hex digit.
#[inline]
pub const fn hex_to_lower_rune(hex: i32) -> Rune {
    let n = hex & 15;
    if n < 10 {
        0x30 + n
    } else {
        0x61 + n - 10
    }
}

/// Converts a 4-bit value to an upper-case ASCII hex digit.
#[inline]
pub const fn hex_to_upper_rune(hex: i32) -> Rune {
    let n = hex & 15;
    if n < 10 {
        0x30 + n
    } else {
        0x41 + n - 10
    }
}

/// Converts a scalar to its standard short-escape code character, or -1.
pub const fn to_short_escape(rune: Rune) -> Rune {
    match rune as u32 {
        0x0007 => 0x0061, // '\a' (bell) -> 'a'
        0x0008 => 0x0062, // '\b' (back-space) -> 'b'
        0x0009 => 0x0074, // '\t' (tab) -> 't'
        0x000A => 0x006E, // '\n' (line-feed) -> 'n'
        0x000B => 0x0076, // '\v' (vertical tab) -> 'v'
        0x000C => 0x0066, // '\f' (form-feed) -> 'f'
        0x000D => 0x0072, // '\r' (carriage return) -> 'r'
        0x0022 => 0x0022, // '"'
        0x0027 => 0x0027, // '\''
        0x002F => 0x002F, // '/'
        0x003F => 0x003F, // '?'
        0x005C => 0x005C, // '\'
        _ => -1,
    }
}

/// Converts a standard short-escape code character to its scalar, or -1.
pub const fn from_short_escape(rune: Rune) -> Rune {
    match rune as u32 {
        0x0022 => 0x0022, // '"'
        0x0027 => 0x0027, // '\''
        0x002F => 0x002F, // '/'
        0x003F => 0x003F, // '?'
        0x005C => 0x005C, // '\'
        0x0061 => 0x0007, // 'a' -> '\a' (bell)
        0x0062 => 0x0008, // 'b' -> '\b' (back-space)
        0x0066 => 0x000C, // 'f' -> '\f' (form-feed)
        0x006E => 0x000A, // 'n' -> '\n' (line-feed)
        0x0072 => 0x000D, // 'r' -> '\r' (carriage return)
        0x0074 => 0x0009, // 't' -> '\t' (tab)
        0x0076 => 0x000B, // 'v' -> '\v' (vertical tab)
        _ => -1,
    }
}

/// Converts a scalar to its JSON short-escape code character, or -1.
pub const fn to_short_escape_json(rune: Rune) -> Rune {
    match rune as u32 {
        0x0008 => 0x0062, // '\b' (back-space) -> 'b'
        0x0009 => 0x0074, // '\t' (tab) -> 't'
        0x000A => 0x006E, // '\n' (line-feed) -> 'n'
        0x000C => 0x0066, // '\f' (form-feed) -> 'f'
        0x000D => 0x0072, // '\r' (carriage return) -> 'r'
        0x0022 => 0x0022, // '"'
        0x002F => 0x002F, // '/'
        0x005C => 0x005C, // '\'
        _ => -1,
    }
}

/// Converts a JSON short-escape code character to its scalar, or -1.
pub const fn from_short_escape_json(rune: Rune) -> Rune {
    match rune as u32 {
        0x0022 => 0x0022, // '"'
        0x002F => 0x002F, // '/'
        0x005C => 0x005C, // '\'
        0x0062 => 0x0008, // 'b' -> '\b' (back-space)
        0x0066 => 0x000C, // 'f' -> '\f' (form-feed)
        0x006E => 0x000A, // 'n' -> '\n' (line-feed)
        0x0072 => 0x000D, // 'r' -> '\r' (carriage return)
        0x0074 => 0x0009, // 't' -> '\t' (tab)
        _ => -1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_digits_round_trip() {
        for n in 0..16 {
            assert_eq!(rune_to_hex(hex_to_lower_rune(n)), n);
            assert_eq!(rune_to_hex(hex_to_upper_rune(n)), n);
        }
        assert_eq!(rune_to_hex('g' as Rune), -1);
        assert_eq!(rune_to_hex(' ' as Rune), -1);
        assert_eq!(hex_to_lower_rune(10), 'a' as Rune);
        assert_eq!(hex_to_upper_rune(15), 'F' as Rune);
    }

    #[test]
    fn short_escapes_round_trip() {
        for c in [0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x22, 0x27, 0x2F, 0x3F, 0x5C] {
            let escaped = to_short_escape(c);
            assert_ne!(escaped, -1, "U+{:04X}", c);
            assert_eq!(from_short_escape(escaped), c);
        }
        assert_eq!(to_short_escape('x' as Rune), -1);
    }

    #[test]
    fn json_omits_non_json_escapes() {
        assert_eq!(to_short_escape_json(0x07), -1, "\\a is not JSON");
        assert_eq!(to_short_escape_json(0x0B), -1, "\\v is not JSON");
        assert_eq!(from_short_escape_json('v' as Rune), -1);
        assert_eq!(from_short_escape_json('?' as Rune), -1);
        assert_eq!(to_short_escape_json(0x0A), 'n' as Rune);
        assert_eq!(from_short_escape_json('t' as Rune), 0x09);
    }
}

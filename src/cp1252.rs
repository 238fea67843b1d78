//! Windows code page 1252 codec.
//!
//! CP-1252 is byte-for-byte Latin-1 except in the 0x80..=0x9F region, where
//! Windows assigns printable characters (€, curly quotes, dashes, …) in
//! place of the C1 controls. Five slots there are undefined: 0x81, 0x8D,
//! 0x8F, 0x90 and 0x9D. In Windows-compatible mode these pass through as
//! their C1 control values; in strict mode they refuse to convert.

use crate::byte::classify_unencodable;
use crate::diag::{check_cursor, Decoded, Diag, Encoded};
use crate::encoding::{Codec, SubType, UtfType};
use crate::Rune;

/// Decode options for the CP-1252 codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cp1252Mode {
    /// Refuse the five undefined C1 slots instead of passing them through.
    pub strict: bool,
    /// Treat a run of consecutive undecodable bytes as a single code point.
    pub coalesce: bool,
}

impl Default for Cp1252Mode {
    fn default() -> Self {
        Cp1252Mode {
            strict: false,
            coalesce: true,
        }
    }
}

/// Unicode mappings for CP-1252 bytes 0x80..=0x9F.
const TRANSLATE: [u16; 32] = [
    0x20AC, 0x0081, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, //
    0x02C6, 0x2030, 0x0160, 0x2039, 0x0152, 0x008D, 0x017D, 0x008F, //
    0x0090, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014, //
    0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0x009D, 0x017E, 0x0178,
];

#[inline]
const fn is_undefined_c1(rune: Rune) -> bool {
    matches!(rune as u32, 0x81 | 0x8D | 0x8F | 0x90 | 0x9D)
}

/// Converts a CP-1252 byte to a Unicode scalar.
///
/// Returns `None` only in strict mode for the five undefined C1 slots.
pub const fn cp1252_to_rune(byte: u8, strict: bool) -> Option<Rune> {
    let index = byte ^ 0x80;
    let rune = if index < 32 {
        TRANSLATE[index as usize] as Rune
    } else {
        byte as Rune
    };
    if strict && is_undefined_c1(rune) {
        None
    } else {
        Some(rune)
    }
}

/// Converts a Unicode scalar to a CP-1252 byte, or `None` when the scalar
/// has no CP-1252 representation.
pub const fn rune_to_cp1252(rune: Rune, strict: bool) -> Option<u8> {
    let u = rune as u32;
    if u <= 0xFF {
        return if u <= 0x7F || u >= 0xA0 || (!strict && is_undefined_c1(rune)) {
            Some(u as u8)
        } else {
            None
        };
    }
    let byte = match u {
        0x0152 => 0x8C,
        0x0153 => 0x9C,
        0x0160 => 0x8A,
        0x0161 => 0x9A,
        0x0178 => 0x9F,
        0x017D => 0x8E,
        0x017E => 0x9E,
        0x0192 => 0x83,
        0x02C6 => 0x88,
        0x02DC => 0x98,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201A => 0x82,
        0x201C => 0x93,
        0x201D => 0x94,
        0x201E => 0x84,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x2022 => 0x95,
        0x2026 => 0x85,
        0x2030 => 0x89,
        0x2039 => 0x8B,
        0x203A => 0x9B,
        0x20AC => 0x80,
        0x2122 => 0x99,
        _ => return None,
    };
    Some(byte)
}

/// Returns the encoded length of `rune`: 1 when the inverse translation
/// hits, 0 otherwise.
#[inline]
pub const fn len_cp1252(rune: Rune, strict: bool) -> usize {
    if rune_to_cp1252(rune, strict).is_some() {
        1
    } else {
        0
    }
}

/// Encodes one scalar as a CP-1252 byte at `buf[offset]`.
pub fn encode_cp1252(buf: &mut [u8], offset: usize, rune: Rune, strict: bool) -> Encoded {
    let mut diag = check_cursor(buf, offset);
    let mut cp1252 = 0u8;
    if rune <= 0 {
        diag |= if rune != 0 {
            Diag::FAILED | Diag::NOT_ENCODABLE | Diag::INVALID_POINT | Diag::NOT_ENOUGH_BITS
        } else {
            Diag::DELIMIT_STRING
        };
    } else {
        match rune_to_cp1252(rune, strict) {
            Some(byte) => cp1252 = byte,
            None => {
                diag |= Diag::FAILED | Diag::NOT_ENCODABLE;
                diag |= classify_unencodable(rune);
            }
        }
    }
    let mut bytes = 0;
    if diag.no_error() {
        if buf.len() - offset < 1 {
            diag |= Diag::FAILED | Diag::WRITE_OVERFLOW;
        } else {
            buf[offset] = cp1252;
            bytes = 1;
        }
    }
    Encoded { bytes, diag }
}

/// Decodes one scalar from `buf[offset]`.
///
/// The failed scalar is the first byte of the undecodable run, so callers
/// can forward the raw byte or substitute a replacement character.
pub fn decode_cp1252(buf: &[u8], offset: usize, mode: Cp1252Mode) -> Decoded {
    let mut out = Decoded::empty();
    out.diag = check_cursor(buf, offset);
    if out.diag.error() {
        return out;
    }
    let tail = &buf[offset..];
    if tail.is_empty() {
        out.diag |= Diag::READ_EXHAUSTED;
        return out;
    }
    out.bytes = 1;
    match cp1252_to_rune(tail[0], mode.strict) {
        Some(rune) => {
            out.rune = rune;
            if rune == 0 {
                out.diag |= Diag::DELIMIT_STRING;
            }
        }
        None => {
            out.rune = tail[0] as Rune;
            out.diag |= Diag::FAILED | Diag::NOT_DECODABLE;
            if mode.coalesce {
                let mut count = tail.len();
                for (index, byte) in tail.iter().enumerate().skip(1) {
                    if cp1252_to_rune(*byte, mode.strict).is_some() {
                        count = index;
                        break;
                    }
                }
                out.bytes = count;
            }
        }
    }
    out
}

/// Steps the cursor forward over up to `count` code points, returning the
/// number of code points consumed.
pub fn step_cp1252(buf: &[u8], offset: &mut usize, count: usize, mode: Cp1252Mode) -> usize {
    let mut points = 0;
    if count == 0 || check_cursor(buf, *offset).error() {
        return points;
    }
    if mode.coalesce {
        let mut limit = buf.len() - *offset;
        let mut index = *offset;
        let mut valid = true;
        while points < count && limit > 0 {
            limit -= 1;
            if cp1252_to_rune(buf[index], mode.strict).is_some() {
                points += 1;
                valid = true;
            } else if valid {
                points += 1;
                valid = false;
            }
            index += 1;
        }
        *offset = buf.len() - limit;
    } else {
        let limit = buf.len() - *offset;
        points = count.min(limit);
        *offset += points;
    }
    points
}

/// Steps the cursor backward over up to `count` code points, returning the
/// number of code points consumed.
pub fn back_cp1252(buf: &[u8], offset: &mut usize, count: usize, mode: Cp1252Mode) -> usize {
    let mut points = 0;
    if count == 0 || check_cursor(buf, *offset).error() {
        return points;
    }
    if mode.coalesce {
        let mut limit = *offset;
        let mut valid = true;
        while points < count && limit > 0 {
            limit -= 1;
            if cp1252_to_rune(buf[limit], mode.strict).is_some() {
                points += 1;
                valid = true;
            } else if valid {
                points += 1;
                valid = false;
            }
        }
        *offset = limit;
    } else {
        points = count.min(*offset);
        *offset -= points;
    }
    points
}

/// Handler for the CP-1252 tags.
#[derive(Debug)]
pub struct Cp1252Codec {
    sub: SubType,
    mode: Cp1252Mode,
}

pub(crate) static CP1252: Cp1252Codec = Cp1252Codec {
    sub: SubType::Cp1252,
    mode: Cp1252Mode {
        strict: false,
        coalesce: true,
    },
};
pub(crate) static CP1252_NS: Cp1252Codec = Cp1252Codec {
    sub: SubType::Cp1252Ns,
    mode: Cp1252Mode {
        strict: false,
        coalesce: false,
    },
};
pub(crate) static CP1252_ST: Cp1252Codec = Cp1252Codec {
    sub: SubType::Cp1252St,
    mode: Cp1252Mode {
        strict: true,
        coalesce: false,
    },
};

impl Codec for Cp1252Codec {
    fn utf_type(&self) -> UtfType {
        UtfType::Other
    }

    fn sub_type(&self) -> SubType {
        self.sub
    }

    fn unit_size(&self) -> usize {
        1
    }

    fn len(&self, rune: Rune) -> usize {
        len_cp1252(rune, self.mode.strict)
    }

    fn bom_len(&self) -> usize {
        0
    }

    fn null_len(&self) -> usize {
        1
    }

    fn get(&self, buf: &[u8], offset: usize) -> Decoded {
        decode_cp1252(buf, offset, self.mode)
    }

    fn set(&self, buf: &mut [u8], offset: usize, rune: Rune) -> Encoded {
        encode_cp1252(buf, offset, rune, self.mode.strict)
    }

    fn set_bom(&self, _buf: &mut [u8], _offset: usize) -> Encoded {
        // CP-1252 has no byte order mark.
        Encoded {
            bytes: 0,
            diag: Diag::NONE,
        }
    }

    fn set_null(&self, buf: &mut [u8], offset: usize) -> Encoded {
        crate::utf8::encode_utf8_null(buf, offset)
    }

    fn step(&self, buf: &[u8], offset: &mut usize, count: usize) -> usize {
        step_cp1252(buf, offset, count, self.mode)
    }

    fn back(&self, buf: &[u8], offset: &mut usize, count: usize) -> usize {
        back_cp1252(buf, offset, count, self.mode)
    }
}

#[cfg(feature = "registry")]
inventory::submit! {
    crate::registry::EncodingEntry {
        name: "windows-1252",
        aliases: &["CP1252", "cp-1252", "CP-1252"],
        sub_type: SubType::Cp1252,
    }
}

#[cfg(feature = "registry")]
inventory::submit! {
    crate::registry::EncodingEntry {
        name: "windows-1252ns",
        aliases: &["CP1252ns"],
        sub_type: SubType::Cp1252Ns,
    }
}

#[cfg(feature = "registry")]
inventory::submit! {
    crate::registry::EncodingEntry {
        name: "windows-1252st",
        aliases: &["CP1252st"],
        sub_type: SubType::Cp1252St,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euro_sign_round_trip() {
        assert_eq!(rune_to_cp1252(0x20AC, true), Some(0x80));
        assert_eq!(cp1252_to_rune(0x80, true), Some(0x20AC));
        let mut buf = [0u8; 1];
        let enc = encode_cp1252(&mut buf, 0, 0x20AC, false);
        assert!(enc.diag.no_error());
        assert_eq!(buf[0], 0x80);
        let dec = decode_cp1252(&buf, 0, Cp1252Mode::default());
        assert_eq!(dec.rune, 0x20AC);
    }

    #[test]
    fn undefined_c1_slots() {
        for byte in [0x81u8, 0x8D, 0x8F, 0x90, 0x9D] {
            assert_eq!(cp1252_to_rune(byte, false), Some(byte as Rune));
            assert_eq!(cp1252_to_rune(byte, true), None);
            assert_eq!(rune_to_cp1252(byte as Rune, false), Some(byte));
            assert_eq!(rune_to_cp1252(byte as Rune, true), None);
        }
        // Defined slots translate in both modes.
        assert_eq!(cp1252_to_rune(0x8C, true), Some(0x0152));
    }

    #[test]
    fn c1_controls_are_not_encodable() {
        // U+0080 is a C1 control, shadowed by the euro sign in CP-1252.
        assert_eq!(rune_to_cp1252(0x80, false), None);
        assert_eq!(len_cp1252(0x80, false), 0);
        assert_eq!(len_cp1252(0x20AC, false), 1);
    }

    #[test]
    fn strict_decode_returns_lead_byte() {
        let mode = Cp1252Mode {
            strict: true,
            coalesce: false,
        };
        let dec = decode_cp1252(b"\x81\x41", 0, mode);
        assert!(dec.diag.contains(Diag::NOT_DECODABLE));
        assert_eq!(dec.rune, 0x81);
        assert_eq!(dec.bytes, 1);
    }

    #[test]
    fn coalesced_decode_consumes_the_run() {
        let mode = Cp1252Mode {
            strict: true,
            coalesce: true,
        };
        let dec = decode_cp1252(b"\x81\x8D\x90\x41", 0, mode);
        assert!(dec.diag.contains(Diag::NOT_DECODABLE));
        assert_eq!(dec.rune, 0x81);
        assert_eq!(dec.bytes, 3);
    }

    #[test]
    fn strict_coalesce_step_over_invalid_byte() {
        // "A", one invalid run, "B".
        let mode = Cp1252Mode {
            strict: true,
            coalesce: true,
        };
        let buf = b"\x41\x81\x42";
        let mut offset = 0;
        let points = step_cp1252(buf, &mut offset, 10, mode);
        assert_eq!(points, 3);
        assert_eq!(offset, 3);
        assert_eq!(back_cp1252(buf, &mut offset, 10, mode), 3);
        assert_eq!(offset, 0);
    }

    #[test]
    fn unencodable_scalar_classification() {
        let enc = encode_cp1252(&mut [0u8; 1], 0, 0xDC00, false);
        assert!(enc.diag.contains(Diag::LOW_SURROGATE));
        assert!(enc.diag.contains(Diag::NOT_ENCODABLE));
        let enc = encode_cp1252(&mut [0u8; 1], 0, 0x1F600, false);
        assert!(enc.diag.contains(Diag::SUPPLEMENTARY));
    }
}

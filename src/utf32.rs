//! UTF-32 codec, little- and big-endian, with UCS-4 and CESU extensions.
//!
//! Cursor offsets and buffer lengths must be four-byte aligned. The `ucs4`
//! flag promotes the extended range U+110000..=U+7FFFFFFF from irregular to
//! standards compliant; the `cesu` flag stores supplementary scalars as two
//! successive 32-bit surrogate code units, mirroring the UTF-16 convention
//! inside 32-bit units.

use crate::diag::{check_cursor_aligned, Decoded, Diag, Encoded};
use crate::encoding::{Codec, SubType, UtfType};
use crate::{classify, Rune, RUNE_INVALID};

/// Decode and skip options for UTF-32.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Utf32Mode {
    /// Little-endian byte order; big-endian is assumed otherwise.
    pub le: bool,
    /// Join supplementary scalars stored as two surrogate code units.
    pub cesu: bool,
    /// Treat the extended UCS-4 range as standards compliant.
    pub ucs4: bool,
}

/// Returns the encoded byte length of `rune`: 4 normally, 8 for a CESU
/// surrogate pair, 0 beyond U+10FFFF unless UCS-4 is enabled.
pub const fn len_utf32(rune: Rune, use_cesu: bool, use_ucs4: bool) -> usize {
    let u = rune as u32;
    let max = if use_ucs4 { 0x7FFF_FFFF } else { 0x0010_FFFF };
    if u > max {
        return 0;
    }
    if use_cesu && u >= 0x0001_0000 && u <= 0x0010_FFFF {
        8
    } else {
        4
    }
}

#[inline]
fn read_unit(buf: &[u8], le: bool) -> u32 {
    if le {
        u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]])
    } else {
        u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]])
    }
}

#[inline]
fn write_unit(buf: &mut [u8], value: u32, le: bool) {
    let bytes = if le {
        value.to_le_bytes()
    } else {
        value.to_be_bytes()
    };
    buf[..4].copy_from_slice(&bytes);
}

/// Encodes one scalar at `buf[offset]`.
///
/// Negative and extended values are written as-is with warnings; only
/// buffer problems are hard errors here. Under `cesu`, supplementary
/// scalars become two zero-padded surrogate units.
pub fn encode_utf32(buf: &mut [u8], offset: usize, rune: Rune, mode: Utf32Mode) -> Encoded {
    let mut diag = check_cursor_aligned(buf, offset, 3);
    if rune <= 0 {
        diag |= if rune != 0 {
            Diag::INVALID_POINT
        } else {
            Diag::DELIMIT_STRING
        };
    } else {
        let u = rune as u32;
        if u > 0x0010_FFFF {
            diag |= if mode.ucs4 {
                Diag::EXTENDED_UCS4
            } else {
                Diag::EXTENDED_UCS4 | Diag::IRREGULAR_FORM
            };
        } else if u >= 0xFDD0 {
            if classify::is_non_character(rune) {
                diag |= Diag::NON_CHARACTER;
            }
            if u > 0xFFFF {
                diag |= if mode.cesu {
                    Diag::SUPPLEMENTARY | Diag::SURROGATE_PAIR
                } else {
                    Diag::SUPPLEMENTARY
                };
            }
        } else if classify::is_surrogate(rune) {
            diag |= if classify::is_low_surrogate(rune) {
                Diag::LOW_SURROGATE | Diag::IRREGULAR_FORM
            } else {
                Diag::HIGH_SURROGATE | Diag::IRREGULAR_FORM
            };
        }
    }
    let mut bytes = 0;
    if diag.no_error() {
        let limit = buf.len() - offset;
        let u = rune as u32;
        if diag.contains(Diag::SURROGATE_PAIR) {
            if limit < 8 {
                diag |= Diag::FAILED | Diag::WRITE_OVERFLOW;
            } else {
                let high = 0xD800 + ((u - 0x0001_0000) >> 10);
                let low = 0xDC00 + (u & 0x3FF);
                write_unit(&mut buf[offset..], high, mode.le);
                write_unit(&mut buf[offset + 4..], low, mode.le);
                bytes = 8;
            }
        } else if limit < 4 {
            diag |= Diag::FAILED | Diag::WRITE_OVERFLOW;
        } else {
            write_unit(&mut buf[offset..], u, mode.le);
            bytes = 4;
        }
    }
    Encoded { bytes, diag }
}

/// Decodes one scalar from `buf[offset]`.
pub fn decode_utf32(buf: &[u8], offset: usize, mode: Utf32Mode) -> Decoded {
    let mut out = Decoded::empty();
    out.diag = check_cursor_aligned(buf, offset, 3);
    if out.diag.error() {
        return out;
    }
    let tail = &buf[offset..];
    if tail.len() < 4 {
        if tail.is_empty() {
            out.diag |= Diag::READ_EXHAUSTED;
        } else {
            out.diag |= Diag::FAILED | Diag::READ_TRUNCATED;
            out.rune = RUNE_INVALID;
        }
        return out;
    }
    let unit = read_unit(tail, mode.le);
    out.rune = unit as Rune;
    out.bytes = 4;
    if out.rune <= 0 {
        out.diag |= if out.rune != 0 {
            Diag::INVALID_POINT | Diag::IRREGULAR_FORM
        } else {
            Diag::DELIMIT_STRING
        };
    } else if unit >= 0xD800 {
        if unit > 0x0010_FFFF {
            out.diag |= if mode.ucs4 {
                Diag::EXTENDED_UCS4
            } else {
                Diag::EXTENDED_UCS4 | Diag::IRREGULAR_FORM
            };
        } else if unit >= 0xFDD0 {
            if classify::is_non_character(out.rune) {
                out.diag |= Diag::NON_CHARACTER;
            }
            if unit > 0xFFFF {
                out.diag |= Diag::SUPPLEMENTARY;
            }
        } else if classify::is_low_surrogate(out.rune) {
            out.diag |= Diag::LOW_SURROGATE | Diag::IRREGULAR_FORM;
        } else if classify::is_high_surrogate(out.rune) {
            out.diag |= Diag::HIGH_SURROGATE | Diag::IRREGULAR_FORM;
            if mode.cesu {
                if tail.len() < 8 {
                    out.diag |= Diag::TRUNCATED_PAIR;
                } else {
                    let low = read_unit(&tail[4..], mode.le);
                    if (low & 0xFFFF_FC00) == 0xDC00 {
                        out.rune = ((unit & 0x3FF) << 10) as Rune
                            + (low & 0x3FF) as Rune
                            + 0x0001_0000;
                        out.bytes = 8;
                        out.diag ^= Diag::SURROGATE_PAIR
                            | Diag::SUPPLEMENTARY
                            | Diag::HIGH_SURROGATE
                            | Diag::IRREGULAR_FORM;
                        if (out.rune as u32 & 0xFFFE) == 0xFFFE {
                            out.diag |= Diag::NON_CHARACTER;
                        }
                    }
                }
            }
        }
    }
    out
}

/// Writes the UTF-32 byte order mark at `buf[offset]`.
pub fn encode_utf32_bom(buf: &mut [u8], offset: usize, le: bool) -> Encoded {
    let mut diag = check_cursor_aligned(buf, offset, 3);
    let mut bytes = 0;
    if diag.no_error() {
        if buf.len() - offset < 4 {
            diag |= Diag::FAILED | Diag::WRITE_OVERFLOW;
        } else {
            let bom = if le {
                [0xFF, 0xFE, 0x00, 0x00]
            } else {
                [0x00, 0x00, 0xFE, 0xFF]
            };
            buf[offset..offset + 4].copy_from_slice(&bom);
            bytes = 4;
        }
    }
    Encoded { bytes, diag }
}

/// Writes a four-byte NULL at `buf[offset]`.
pub fn encode_utf32_null(buf: &mut [u8], offset: usize) -> Encoded {
    let mut diag = check_cursor_aligned(buf, offset, 3);
    let mut bytes = 0;
    if diag.no_error() {
        if buf.len() - offset < 4 {
            diag |= Diag::FAILED | Diag::WRITE_OVERFLOW;
        } else {
            buf[offset..offset + 4].fill(0);
            bytes = 4;
        }
    }
    Encoded { bytes, diag }
}

/// Steps the cursor forward over up to `count` code points; under `cesu`
/// two adjacent surrogate units count as one code point.
pub fn step_utf32(buf: &[u8], offset: &mut usize, count: usize, mode: Utf32Mode) -> usize {
    let mut points = 0;
    if count == 0 || check_cursor_aligned(buf, *offset, 3).error() {
        return points;
    }
    let mut limit = buf.len() - *offset;
    if mode.cesu {
        let mut index = *offset;
        while points < count && limit >= 4 {
            let unit = read_unit(&buf[index..], mode.le);
            let mut advance = 4;
            if (unit & 0xFFFF_FC00) == 0xD800 && limit >= 8 {
                let low = read_unit(&buf[index + 4..], mode.le);
                if (low & 0xFFFF_FC00) == 0xDC00 {
                    advance = 8;
                }
            }
            points += 1;
            index += advance;
            limit -= advance;
        }
        *offset = index;
    } else {
        points = count.min(limit >> 2);
        *offset += points << 2;
    }
    points
}

/// Steps the cursor backward over up to `count` code points.
pub fn back_utf32(buf: &[u8], offset: &mut usize, count: usize, mode: Utf32Mode) -> usize {
    let mut points = 0;
    if count == 0 || check_cursor_aligned(buf, *offset, 3).error() {
        return points;
    }
    let mut limit = *offset;
    if mode.cesu {
        while points < count && limit >= 4 {
            let unit = read_unit(&buf[limit - 4..], mode.le);
            let mut advance = 4;
            if (unit & 0xFFFF_FC00) == 0xDC00 && limit >= 8 {
                let high = read_unit(&buf[limit - 8..], mode.le);
                if (high & 0xFFFF_FC00) == 0xD800 {
                    advance = 8;
                }
            }
            points += 1;
            limit -= advance;
        }
        *offset = limit;
    } else {
        points = count.min(limit >> 2);
        *offset -= points << 2;
    }
    points
}

/// Handler for the UTF-32 tags.
///
/// The CESU4 tags are aliases: they keep their own dispatch entries but
/// report the CESU32 sub-type and use the UCS-4-enabled codec.
#[derive(Debug)]
pub struct Utf32Codec {
    sub: SubType,
    mode: Utf32Mode,
}

macro_rules! utf32_codec {
    ($name:ident, $sub:ident, $le:expr, $cesu:expr, $ucs4:expr) => {
        pub(crate) static $name: Utf32Codec = Utf32Codec {
            sub: SubType::$sub,
            mode: Utf32Mode {
                le: $le,
                cesu: $cesu,
                ucs4: $ucs4,
            },
        };
    };
}

utf32_codec!(UTF32_LE, Utf32Le, true, false, false);
utf32_codec!(UTF32_BE, Utf32Be, false, false, false);
utf32_codec!(UCS4_LE, Ucs4Le, true, false, true);
utf32_codec!(UCS4_BE, Ucs4Be, false, false, true);
utf32_codec!(CESU32_LE, Cesu32Le, true, true, false);
utf32_codec!(CESU32_BE, Cesu32Be, false, true, false);
// CESU4le/CESU4be report the CESU32 sub-type; see DESIGN.md.
utf32_codec!(CESU4_LE, Cesu32Le, true, true, true);
utf32_codec!(CESU4_BE, Cesu32Be, false, true, true);

impl Codec for Utf32Codec {
    fn utf_type(&self) -> UtfType {
        if self.mode.le {
            UtfType::Utf32Le
        } else {
            UtfType::Utf32Be
        }
    }

    fn sub_type(&self) -> SubType {
        self.sub
    }

    fn unit_size(&self) -> usize {
        4
    }

    fn len(&self, rune: Rune) -> usize {
        len_utf32(rune, self.mode.cesu, self.mode.ucs4)
    }

    fn bom_len(&self) -> usize {
        4
    }

    fn null_len(&self) -> usize {
        4
    }

    fn get(&self, buf: &[u8], offset: usize) -> Decoded {
        decode_utf32(buf, offset, self.mode)
    }

    fn set(&self, buf: &mut [u8], offset: usize, rune: Rune) -> Encoded {
        encode_utf32(buf, offset, rune, self.mode)
    }

    fn set_bom(&self, buf: &mut [u8], offset: usize) -> Encoded {
        encode_utf32_bom(buf, offset, self.mode.le)
    }

    fn set_null(&self, buf: &mut [u8], offset: usize) -> Encoded {
        encode_utf32_null(buf, offset)
    }

    fn step(&self, buf: &[u8], offset: &mut usize, count: usize) -> usize {
        step_utf32(buf, offset, count, self.mode)
    }

    fn back(&self, buf: &[u8], offset: &mut usize, count: usize) -> usize {
        back_utf32(buf, offset, count, self.mode)
    }
}

#[cfg(feature = "registry")]
mod registry_entries {
    use super::SubType;

    inventory::submit! {
        crate::registry::EncodingEntry {
            name: "UTF-32LE",
            aliases: &["UTF32LE", "UTF-32le"],
            sub_type: SubType::Utf32Le,
        }
    }
    inventory::submit! {
        crate::registry::EncodingEntry {
            name: "UTF-32BE",
            aliases: &["UTF32BE", "UTF-32be"],
            sub_type: SubType::Utf32Be,
        }
    }
    inventory::submit! {
        crate::registry::EncodingEntry {
            name: "UCS-4LE",
            aliases: &["UCS4LE"],
            sub_type: SubType::Ucs4Le,
        }
    }
    inventory::submit! {
        crate::registry::EncodingEntry {
            name: "UCS-4BE",
            aliases: &["UCS4BE"],
            sub_type: SubType::Ucs4Be,
        }
    }
    inventory::submit! {
        crate::registry::EncodingEntry {
            name: "CESU-32LE",
            aliases: &["CESU32LE"],
            sub_type: SubType::Cesu32Le,
        }
    }
    inventory::submit! {
        crate::registry::EncodingEntry {
            name: "CESU-32BE",
            aliases: &["CESU32BE"],
            sub_type: SubType::Cesu32Be,
        }
    }
    inventory::submit! {
        crate::registry::EncodingEntry {
            name: "CESU-4LE",
            aliases: &["CESU4LE"],
            sub_type: SubType::Cesu4Le,
        }
    }
    inventory::submit! {
        crate::registry::EncodingEntry {
            name: "CESU-4BE",
            aliases: &["CESU4BE"],
            sub_type: SubType::Cesu4Be,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LE: Utf32Mode = Utf32Mode {
        le: true,
        cesu: false,
        ucs4: false,
    };
    const BE: Utf32Mode = Utf32Mode {
        le: false,
        cesu: false,
        ucs4: false,
    };
    const CESU: Utf32Mode = Utf32Mode {
        le: true,
        cesu: true,
        ucs4: false,
    };
    const UCS4: Utf32Mode = Utf32Mode {
        le: true,
        cesu: false,
        ucs4: true,
    };

    #[test]
    fn plain_round_trip_both_orders() {
        let mut buf = [0u8; 4];
        assert_eq!(encode_utf32(&mut buf, 0, 0x1F600, LE).bytes, 4);
        assert_eq!(&buf, &[0x00, 0xF6, 0x01, 0x00]);
        let dec = decode_utf32(&buf, 0, LE);
        assert_eq!((dec.rune, dec.bytes), (0x1F600, 4));
        assert!(dec.diag.contains(Diag::SUPPLEMENTARY));

        assert_eq!(encode_utf32(&mut buf, 0, 0x1F600, BE).bytes, 4);
        assert_eq!(&buf, &[0x00, 0x01, 0xF6, 0x00]);
        assert_eq!(decode_utf32(&buf, 0, BE).rune, 0x1F600);
    }

    #[test]
    fn cesu_pair_round_trip() {
        let mut buf = [0u8; 8];
        let enc = encode_utf32(&mut buf, 0, 0x1F600, CESU);
        assert_eq!(enc.bytes, 8);
        assert!(enc
            .diag
            .contains_all(Diag::SURROGATE_PAIR | Diag::SUPPLEMENTARY));
        // two zero-padded surrogate units: D83D then DE00
        assert_eq!(&buf, &[0x3D, 0xD8, 0x00, 0x00, 0x00, 0xDE, 0x00, 0x00]);

        let dec = decode_utf32(&buf, 0, CESU);
        assert_eq!((dec.rune, dec.bytes), (0x1F600, 8));
        assert!(dec
            .diag
            .contains_all(Diag::SURROGATE_PAIR | Diag::SUPPLEMENTARY));
        assert!(!dec.diag.contains(Diag::IRREGULAR_FORM));
    }

    #[test]
    fn extended_range_is_mode_dependent() {
        assert_eq!(len_utf32(0x0011_0000, false, false), 0);
        assert_eq!(len_utf32(0x0011_0000, false, true), 4);
        assert_eq!(len_utf32(0x7FFF_FFFF, false, true), 4);

        let mut buf = [0u8; 4];
        let enc = encode_utf32(&mut buf, 0, 0x0011_0000, LE);
        assert!(enc
            .diag
            .contains_all(Diag::EXTENDED_UCS4 | Diag::IRREGULAR_FORM));
        assert_eq!(enc.bytes, 4, "still written, permissively");

        let dec = decode_utf32(&buf, 0, LE);
        assert!(dec
            .diag
            .contains_all(Diag::EXTENDED_UCS4 | Diag::IRREGULAR_FORM));
        let dec = decode_utf32(&buf, 0, UCS4);
        assert!(dec.diag.contains(Diag::EXTENDED_UCS4));
        assert!(!dec.diag.contains(Diag::IRREGULAR_FORM));
    }

    #[test]
    fn lone_surrogate_unit() {
        let mut buf = [0u8; 4];
        assert_eq!(encode_utf32(&mut buf, 0, 0xDC00, LE).bytes, 4);
        let dec = decode_utf32(&buf, 0, LE);
        assert_eq!(dec.rune, 0xDC00);
        assert!(dec
            .diag
            .contains_all(Diag::LOW_SURROGATE | Diag::IRREGULAR_FORM));
    }

    #[test]
    fn truncated_cesu_pair() {
        let mut buf = [0u8; 8];
        assert_eq!(encode_utf32(&mut buf, 0, 0xD83D, LE).bytes, 4);
        let dec = decode_utf32(&buf[..4], 0, CESU);
        assert_eq!((dec.rune, dec.bytes), (0xD83D, 4));
        assert!(dec.diag.contains(Diag::TRUNCATED_PAIR));
        assert!(dec.diag.no_error());
    }

    #[test]
    fn null_and_negative_units() {
        let buf = [0u8; 4];
        let dec = decode_utf32(&buf, 0, LE);
        assert_eq!(dec.rune, 0);
        assert!(dec.diag.contains(Diag::DELIMIT_STRING));

        let buf = [0xFF, 0xFF, 0xFF, 0xFF];
        let dec = decode_utf32(&buf, 0, LE);
        assert_eq!(dec.rune, -1);
        assert!(dec
            .diag
            .contains_all(Diag::INVALID_POINT | Diag::IRREGULAR_FORM));
        assert!(dec.diag.no_error());
    }

    #[test]
    fn alignment_is_enforced() {
        let buf = [0u8; 8];
        assert!(decode_utf32(&buf, 2, LE).diag.contains(Diag::MISALIGNED_OFFSET));
        assert!(decode_utf32(&buf[..6], 0, LE)
            .diag
            .contains(Diag::MISALIGNED_LENGTH));
    }

    #[test]
    fn bom_bytes() {
        let mut buf = [0u8; 4];
        assert_eq!(encode_utf32_bom(&mut buf, 0, true).bytes, 4);
        assert_eq!(&buf, &[0xFF, 0xFE, 0x00, 0x00]);
        assert_eq!(encode_utf32_bom(&mut buf, 0, false).bytes, 4);
        assert_eq!(&buf, &[0x00, 0x00, 0xFE, 0xFF]);
    }

    #[test]
    fn cesu_step_joins_units() {
        let mut buf = [0u8; 12];
        assert_eq!(encode_utf32(&mut buf, 0, 0x1F600, CESU).bytes, 8);
        assert_eq!(encode_utf32(&mut buf, 8, 0x41, CESU).bytes, 4);

        let mut offset = 0;
        assert_eq!(step_utf32(&buf, &mut offset, 1, CESU), 1);
        assert_eq!(offset, 8);
        assert_eq!(step_utf32(&buf, &mut offset, 1, CESU), 1);
        assert_eq!(offset, 12);
        assert_eq!(back_utf32(&buf, &mut offset, 2, CESU), 2);
        assert_eq!(offset, 0);

        // plain UTF-32 counts each unit
        let mut offset = 0;
        assert_eq!(step_utf32(&buf, &mut offset, 10, LE), 3);
        assert_eq!(offset, 12);
    }
}

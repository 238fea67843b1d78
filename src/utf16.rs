//! UTF-16 codec, little- and big-endian, with a UCS-2 restriction.
//!
//! Cursor offsets and buffer lengths must be two-byte aligned; misalignment
//! is reported before any byte is touched. Surrogate pairing is the normal
//! encoding for supplementary scalars; the `ucs2` flag disables pairing and
//! restricts the repertoire to the basic multilingual plane, leaving any
//! surrogate unit unpaired and irregular.

use crate::diag::{check_cursor_aligned, Decoded, Diag, Encoded};
use crate::encoding::{Codec, SubType, UtfType};
use crate::{classify, Rune, RUNE_INVALID};

/// Decode and skip options for UTF-16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Utf16Mode {
    /// Little-endian byte order; big-endian is assumed otherwise.
    pub le: bool,
    /// Restrict to the BMP and treat surrogate units as unpaired.
    pub ucs2: bool,
}

/// Returns the encoded byte length of `rune`: 2 for BMP scalars, 4 for a
/// surrogate pair, 0 when not encodable (surrogate scalars always, and
/// supplementary scalars under UCS-2).
pub const fn len_utf16(rune: Rune, use_ucs2: bool) -> usize {
    let u = rune as u32;
    if u > 0x0010_FFFF {
        return 0;
    }
    if u <= 0xFFFF {
        2
    } else if use_ucs2 {
        0
    } else {
        4
    }
}

#[inline]
fn read_unit(buf: &[u8], le: bool) -> u32 {
    if le {
        u16::from_le_bytes([buf[0], buf[1]]) as u32
    } else {
        u16::from_be_bytes([buf[0], buf[1]]) as u32
    }
}

#[inline]
fn write_unit(buf: &mut [u8], value: u16, le: bool) {
    let bytes = if le {
        value.to_le_bytes()
    } else {
        value.to_be_bytes()
    };
    buf[0] = bytes[0];
    buf[1] = bytes[1];
}

/// Encodes one scalar at `buf[offset]`: two bytes for BMP scalars, four for
/// a surrogate pair.
pub fn encode_utf16(buf: &mut [u8], offset: usize, rune: Rune, mode: Utf16Mode) -> Encoded {
    let mut diag = check_cursor_aligned(buf, offset, 1);
    if rune <= 0 {
        diag |= if rune != 0 {
            Diag::FAILED | Diag::NOT_ENCODABLE | Diag::INVALID_POINT | Diag::NOT_ENOUGH_BITS
        } else {
            Diag::DELIMIT_STRING
        };
    } else {
        let u = rune as u32;
        if u > 0x0010_FFFF {
            diag |= Diag::FAILED | Diag::EXTENDED_UCS4 | Diag::NOT_ENOUGH_BITS;
        } else if u >= 0xFDD0 {
            if classify::is_non_character(rune) {
                diag |= Diag::NON_CHARACTER;
            }
            if u > 0xFFFF {
                diag |= if mode.ucs2 {
                    Diag::FAILED | Diag::SUPPLEMENTARY | Diag::NOT_ENOUGH_BITS
                } else {
                    Diag::SUPPLEMENTARY | Diag::SURROGATE_PAIR
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
            if limit < 4 {
                diag |= Diag::FAILED | Diag::WRITE_OVERFLOW;
            } else {
                let high = 0xD800 + ((u - 0x0001_0000) >> 10) as u16;
                let low = 0xDC00 + (u & 0x3FF) as u16;
                write_unit(&mut buf[offset..], high, mode.le);
                write_unit(&mut buf[offset + 2..], low, mode.le);
                bytes = 4;
            }
        } else if limit < 2 {
            diag |= Diag::FAILED | Diag::WRITE_OVERFLOW;
        } else {
            write_unit(&mut buf[offset..], u as u16, mode.le);
            bytes = 2;
        }
    }
    Encoded { bytes, diag }
}

/// Decodes one scalar from `buf[offset]`.
///
/// A high surrogate followed by a valid low surrogate combines into a
/// supplementary scalar consuming four bytes; otherwise it stays unpaired
/// with `TRUNCATED_PAIR` when the buffer ended before its partner.
pub fn decode_utf16(buf: &[u8], offset: usize, mode: Utf16Mode) -> Decoded {
    let mut out = Decoded::empty();
    out.diag = check_cursor_aligned(buf, offset, 1);
    if out.diag.error() {
        return out;
    }
    let tail = &buf[offset..];
    if tail.len() < 2 {
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
    out.bytes = 2;
    if unit >= 0xD800 {
        if unit >= 0xFDD0 {
            if classify::is_non_character(out.rune) {
                out.diag |= Diag::NON_CHARACTER;
            }
        } else if classify::is_low_surrogate(out.rune) {
            out.diag |= Diag::LOW_SURROGATE | Diag::IRREGULAR_FORM;
        } else if classify::is_high_surrogate(out.rune) {
            out.diag |= Diag::HIGH_SURROGATE | Diag::IRREGULAR_FORM;
            if !mode.ucs2 {
                if tail.len() < 4 {
                    out.diag |= Diag::TRUNCATED_PAIR;
                } else {
                    let low = read_unit(&tail[2..], mode.le);
                    if (low & 0xFFFF_FC00) == 0xDC00 {
                        out.rune = ((unit & 0x3FF) << 10) as Rune
                            + (low & 0x3FF) as Rune
                            + 0x0001_0000;
                        out.bytes = 4;
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
    } else if unit == 0 {
        out.diag |= Diag::DELIMIT_STRING;
    }
    out
}

/// Writes the UTF-16 byte order mark at `buf[offset]`.
pub fn encode_utf16_bom(buf: &mut [u8], offset: usize, le: bool) -> Encoded {
    let mut diag = check_cursor_aligned(buf, offset, 1);
    let mut bytes = 0;
    if diag.no_error() {
        if buf.len() - offset < 2 {
            diag |= Diag::FAILED | Diag::WRITE_OVERFLOW;
        } else {
            if le {
                buf[offset] = 0xFF;
                buf[offset + 1] = 0xFE;
            } else {
                buf[offset] = 0xFE;
                buf[offset + 1] = 0xFF;
            }
            bytes = 2;
        }
    }
    Encoded { bytes, diag }
}

/// Writes a two-byte NULL at `buf[offset]`.
pub fn encode_utf16_null(buf: &mut [u8], offset: usize) -> Encoded {
    let mut diag = check_cursor_aligned(buf, offset, 1);
    let mut bytes = 0;
    if diag.no_error() {
        if buf.len() - offset < 2 {
            diag |= Diag::FAILED | Diag::WRITE_OVERFLOW;
        } else {
            buf[offset] = 0;
            buf[offset + 1] = 0;
            bytes = 2;
        }
    }
    Encoded { bytes, diag }
}

/// Steps the cursor forward over up to `count` code points, pairing a high
/// surrogate with the low surrogate that follows it unless UCS-2. A pair is
/// consumed atomically so the cursor never lands between its halves.
pub fn step_utf16(buf: &[u8], offset: &mut usize, count: usize, mode: Utf16Mode) -> usize {
    let mut points = 0;
    if count == 0 || check_cursor_aligned(buf, *offset, 1).error() {
        return points;
    }
    let mut limit = buf.len() - *offset;
    if mode.ucs2 {
        points = count.min(limit >> 1);
        *offset += points << 1;
    } else {
        let mut index = *offset;
        while points < count && limit >= 2 {
            let unit = read_unit(&buf[index..], mode.le);
            let mut advance = 2;
            if (unit & 0xFFFF_FC00) == 0xD800 && limit >= 4 {
                let low = read_unit(&buf[index + 2..], mode.le);
                if (low & 0xFFFF_FC00) == 0xDC00 {
                    advance = 4;
                }
            }
            points += 1;
            index += advance;
            limit -= advance;
        }
        *offset = index;
    }
    points
}

/// Steps the cursor backward over up to `count` code points.
pub fn back_utf16(buf: &[u8], offset: &mut usize, count: usize, mode: Utf16Mode) -> usize {
    let mut points = 0;
    if count == 0 || check_cursor_aligned(buf, *offset, 1).error() {
        return points;
    }
    let mut limit = *offset;
    if mode.ucs2 {
        points = count.min(limit >> 1);
        *offset -= points << 1;
    } else {
        while points < count && limit >= 2 {
            let unit = read_unit(&buf[limit - 2..], mode.le);
            let mut advance = 2;
            if (unit & 0xFFFF_FC00) == 0xDC00 && limit >= 4 {
                let high = read_unit(&buf[limit - 4..], mode.le);
                if (high & 0xFFFF_FC00) == 0xD800 {
                    advance = 4;
                }
            }
            points += 1;
            limit -= advance;
        }
        *offset = limit;
    }
    points
}

/// Handler for the UTF-16 tags.
#[derive(Debug)]
pub struct Utf16Codec {
    sub: SubType,
    mode: Utf16Mode,
}

pub(crate) static UTF16_LE: Utf16Codec = Utf16Codec {
    sub: SubType::Utf16Le,
    mode: Utf16Mode {
        le: true,
        ucs2: false,
    },
};
pub(crate) static UTF16_BE: Utf16Codec = Utf16Codec {
    sub: SubType::Utf16Be,
    mode: Utf16Mode {
        le: false,
        ucs2: false,
    },
};
pub(crate) static UCS2_LE: Utf16Codec = Utf16Codec {
    sub: SubType::Ucs2Le,
    mode: Utf16Mode {
        le: true,
        ucs2: true,
    },
};
pub(crate) static UCS2_BE: Utf16Codec = Utf16Codec {
    sub: SubType::Ucs2Be,
    mode: Utf16Mode {
        le: false,
        ucs2: true,
    },
};

impl Codec for Utf16Codec {
    fn utf_type(&self) -> UtfType {
        if self.mode.le {
            UtfType::Utf16Le
        } else {
            UtfType::Utf16Be
        }
    }

    fn sub_type(&self) -> SubType {
        self.sub
    }

    fn unit_size(&self) -> usize {
        2
    }

    fn len(&self, rune: Rune) -> usize {
        len_utf16(rune, self.mode.ucs2)
    }

    fn bom_len(&self) -> usize {
        2
    }

    fn null_len(&self) -> usize {
        2
    }

    fn get(&self, buf: &[u8], offset: usize) -> Decoded {
        decode_utf16(buf, offset, self.mode)
    }

    fn set(&self, buf: &mut [u8], offset: usize, rune: Rune) -> Encoded {
        encode_utf16(buf, offset, rune, self.mode)
    }

    fn set_bom(&self, buf: &mut [u8], offset: usize) -> Encoded {
        encode_utf16_bom(buf, offset, self.mode.le)
    }

    fn set_null(&self, buf: &mut [u8], offset: usize) -> Encoded {
        encode_utf16_null(buf, offset)
    }

    fn step(&self, buf: &[u8], offset: &mut usize, count: usize) -> usize {
        step_utf16(buf, offset, count, self.mode)
    }

    fn back(&self, buf: &[u8], offset: &mut usize, count: usize) -> usize {
        back_utf16(buf, offset, count, self.mode)
    }
}

#[cfg(feature = "registry")]
mod registry_entries {
    use super::SubType;

    inventory::submit! {
        crate::registry::EncodingEntry {
            name: "UTF-16LE",
            aliases: &["UTF16LE", "UTF-16le"],
            sub_type: SubType::Utf16Le,
        }
    }
    inventory::submit! {
        crate::registry::EncodingEntry {
            name: "UTF-16BE",
            aliases: &["UTF16BE", "UTF-16be"],
            sub_type: SubType::Utf16Be,
        }
    }
    inventory::submit! {
        crate::registry::EncodingEntry {
            name: "UCS-2LE",
            aliases: &["UCS2LE"],
            sub_type: SubType::Ucs2Le,
        }
    }
    inventory::submit! {
        crate::registry::EncodingEntry {
            name: "UCS-2BE",
            aliases: &["UCS2BE"],
            sub_type: SubType::Ucs2Be,
        }
    }
}

//! Single-byte pass-through codecs: BYTE (ISO-8859-1) and 7-bit ASCII.
//!
//! BYTE reads and writes full byte values, mapping them directly to the
//! first 256 scalars. ASCII buffers are considered 7-bit despite being
//! stored as bytes: values with the top bit set are treated as illegal and
//! either coalesced into a single invalid run or consumed one per code
//! point, depending on the mode.

use crate::diag::{check_cursor, Decoded, Diag, Encoded};
use crate::encoding::{Codec, SubType, UtfType};
use crate::{classify, Rune};

/// Decode options for the BYTE and ASCII codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteMode {
    /// Limit decoding to 7 bits; bytes with the top bit set are illegal.
    pub ascii: bool,
    /// Treat a run of consecutive illegal bytes as a single code point.
    pub coalesce: bool,
}

impl Default for ByteMode {
    fn default() -> Self {
        ByteMode {
            ascii: false,
            coalesce: true,
        }
    }
}

/// Returns the encoded length of `rune`: 1 when it fits the byte (or 7-bit)
/// range, 0 when it is not encodable.
#[inline]
pub const fn len_byte(rune: Rune, use_ascii: bool) -> usize {
    let max = if use_ascii { 0x7F } else { 0xFF };
    if rune as u32 <= max {
        1
    } else {
        0
    }
}

/// Encodes one scalar as a single byte at `buf[offset]`.
pub fn encode_byte(buf: &mut [u8], offset: usize, rune: Rune, use_ascii: bool) -> Encoded {
    let mut diag = check_cursor(buf, offset);
    if rune <= 0 {
        diag |= if rune != 0 {
            Diag::FAILED | Diag::NOT_ENCODABLE | Diag::INVALID_POINT | Diag::NOT_ENOUGH_BITS
        } else {
            Diag::DELIMIT_STRING
        };
    } else if rune as u32 > if use_ascii { 0x7F } else { 0xFF } {
        diag |= Diag::FAILED | Diag::NOT_ENCODABLE | Diag::NOT_ENOUGH_BITS;
        diag |= classify_unencodable(rune);
    }
    let mut bytes = 0;
    if diag.no_error() {
        if buf.len() - offset < 1 {
            diag |= Diag::FAILED | Diag::WRITE_OVERFLOW;
        } else {
            buf[offset] = rune as u8;
            bytes = 1;
        }
    }
    Encoded { bytes, diag }
}

/// Scalar-range warnings attached to a failed single-byte encode.
pub(crate) fn classify_unencodable(rune: Rune) -> Diag {
    let u = rune as u32;
    let mut diag = Diag::NONE;
    if u >= 0xD800 {
        if u > 0x0010_FFFF {
            diag |= Diag::EXTENDED_UCS4;
        } else if u >= 0xFDD0 {
            if classify::is_non_character(rune) {
                diag |= Diag::NON_CHARACTER;
            }
            if u > 0xFFFF {
                diag |= Diag::SUPPLEMENTARY;
            }
        } else if classify::is_surrogate(rune) {
            diag |= if classify::is_low_surrogate(rune) {
                Diag::LOW_SURROGATE
            } else {
                Diag::HIGH_SURROGATE
            };
        }
    }
    diag
}

/// Decodes one scalar from `buf[offset]`.
///
/// In ASCII mode an illegal byte fails the decode; with `coalesce` the whole
/// run of consecutive illegal bytes is consumed as one invalid code point,
/// otherwise exactly one byte is consumed. The failed scalar is the first
/// byte of the run.
pub fn decode_byte(buf: &[u8], offset: usize, mode: ByteMode) -> Decoded {
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
    out.rune = tail[0] as Rune;
    out.bytes = 1;
    if mode.ascii && tail[0] & 0x80 != 0 {
        out.diag |= Diag::FAILED | Diag::NOT_DECODABLE | Diag::DISALLOWED_BYTE;
        if mode.coalesce {
            let mut count = tail.len();
            for (index, byte) in tail.iter().enumerate().skip(1) {
                if byte & 0x80 != 0x80 {
                    count = index;
                    break;
                }
            }
            out.bytes = count;
        }
    } else if out.rune == 0 {
        out.diag |= Diag::DELIMIT_STRING;
    }
    out
}

/// Steps the cursor forward over up to `count` code points, returning the
/// number of code points consumed.
pub fn step_byte(buf: &[u8], offset: &mut usize, count: usize, mode: ByteMode) -> usize {
    let mut points = 0;
    if count == 0 || check_cursor(buf, *offset).error() {
        return points;
    }
    if mode.ascii && mode.coalesce {
        let mut limit = buf.len() - *offset;
        let mut index = *offset;
        let mut ascii = true;
        while points < count && limit > 0 {
            limit -= 1;
            if buf[index] & 0x80 != 0x80 {
                points += 1;
                ascii = true;
            } else if ascii {
                points += 1;
                ascii = false;
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
pub fn back_byte(buf: &[u8], offset: &mut usize, count: usize, mode: ByteMode) -> usize {
    let mut points = 0;
    if count == 0 || check_cursor(buf, *offset).error() {
        return points;
    }
    if mode.ascii && mode.coalesce {
        let mut limit = *offset;
        let mut ascii = true;
        while points < count && limit > 0 {
            limit -= 1;
            if buf[limit] & 0x80 != 0x80 {
                points += 1;
                ascii = true;
            } else if ascii {
                points += 1;
                ascii = false;
            }
        }
        *offset = limit;
    } else {
        points = count.min(*offset);
        *offset -= points;
    }
    points
}

/// Handler for the BYTE and ASCII tags.
#[derive(Debug)]
pub struct ByteCodec {
    sub: SubType,
    mode: ByteMode,
}

pub(crate) static BYTE: ByteCodec = ByteCodec {
    sub: SubType::Byte,
    mode: ByteMode {
        ascii: false,
        coalesce: true,
    },
};
pub(crate) static BYTE_NS: ByteCodec = ByteCodec {
    sub: SubType::ByteNs,
    mode: ByteMode {
        ascii: false,
        coalesce: false,
    },
};
pub(crate) static ASCII: ByteCodec = ByteCodec {
    sub: SubType::Ascii,
    mode: ByteMode {
        ascii: true,
        coalesce: true,
    },
};
pub(crate) static ASCII_NS: ByteCodec = ByteCodec {
    sub: SubType::AsciiNs,
    mode: ByteMode {
        ascii: true,
        coalesce: false,
    },
};

impl Codec for ByteCodec {
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
        len_byte(rune, self.mode.ascii)
    }

    fn bom_len(&self) -> usize {
        3
    }

    fn null_len(&self) -> usize {
        1
    }

    fn get(&self, buf: &[u8], offset: usize) -> Decoded {
        decode_byte(buf, offset, self.mode)
    }

    fn set(&self, buf: &mut [u8], offset: usize, rune: Rune) -> Encoded {
        encode_byte(buf, offset, rune, self.mode.ascii)
    }

    fn set_bom(&self, buf: &mut [u8], offset: usize) -> Encoded {
        crate::utf8::encode_utf8_bom(buf, offset)
    }

    fn set_null(&self, buf: &mut [u8], offset: usize) -> Encoded {
        crate::utf8::encode_utf8_null(buf, offset)
    }

    fn step(&self, buf: &[u8], offset: &mut usize, count: usize) -> usize {
        step_byte(buf, offset, count, self.mode)
    }

    fn back(&self, buf: &[u8], offset: &mut usize, count: usize) -> usize {
        back_byte(buf, offset, count, self.mode)
    }
}

#[cfg(feature = "registry")]
inventory::submit! {
    crate::registry::EncodingEntry {
        name: "ISO-8859-1",
        aliases: &["ISO8859-1", "latin1", "BYTE"],
        sub_type: SubType::Byte,
    }
}

#[cfg(feature = "registry")]
inventory::submit! {
    crate::registry::EncodingEntry {
        name: "ISO-8859-1ns",
        aliases: &["BYTEns"],
        sub_type: SubType::ByteNs,
    }
}

#[cfg(feature = "registry")]
inventory::submit! {
    crate::registry::EncodingEntry {
        name: "ASCII",
        aliases: &["US-ASCII", "ANSI_X3.4-1968"],
        sub_type: SubType::Ascii,
    }
}

#[cfg(feature = "registry")]
inventory::submit! {
    crate::registry::EncodingEntry {
        name: "ASCIIns",
        aliases: &["US-ASCIIns"],
        sub_type: SubType::AsciiNs,
    }
}

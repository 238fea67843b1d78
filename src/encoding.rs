//! Encoding tags, the [`Codec`] handler trait and handler dispatch.
//!
//! A [`SubType`] names one concrete (family, variant, endianness) triple;
//! [`handler`] maps it to a process-wide stateless singleton implementing
//! [`Codec`]. The trait's required methods are thin wrappers over the
//! family primitives with the tag's flag combination baked in; the provided
//! methods add cursor-advancing reads and writes, whole-buffer validation,
//! normalized line-feed reading and line extraction.
//!
//! # Example
//!
//! ```
//! use runely::{handler, SubType};
//!
//! let utf8 = handler(SubType::Utf8);
//! let mut buf = [0u8; 8];
//! let mut offset = 0;
//! assert!(!utf8.write(&mut buf, &mut offset, 0x1F600 as i32).diag.error());
//!
//! let mut read_at = 0;
//! let out = utf8.read(&buf, &mut read_at);
//! assert_eq!(out.rune, 0x1F600);
//! assert_eq!(read_at, offset);
//! ```

use core::ops::Range;

use crate::diag::{check_cursor, Decoded, Diag, Encoded};
use crate::Rune;

/// Coarse encoding families, as reported by BOM sniffing and
/// [`Codec::utf_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UtfType {
    /// UTF-8.
    Utf8,
    /// Little-endian UTF-16.
    Utf16Le,
    /// Big-endian UTF-16.
    Utf16Be,
    /// Little-endian UTF-32.
    Utf32Le,
    /// Big-endian UTF-32.
    Utf32Be,
    /// Non-UTF or unidentified; defaults to Java-style strict UTF-8.
    Other,
}

/// The concrete encoding tags.
///
/// Suffixes: `Ns` is non-skipping (a malformed sequence consumes one byte
/// instead of a coalesced run), `St` is strict (irregular forms are decode
/// failures consuming one byte). The `J` prefix is Java-modified UTF-8 and
/// the `Cesu` prefix stores supplementary scalars as surrogate pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubType {
    /// Permissive UTF-8.
    Utf8,
    /// Non-skipping UTF-8.
    Utf8Ns,
    /// Strict UTF-8.
    Utf8St,
    /// Permissive Java-modified UTF-8.
    JUtf8,
    /// Non-skipping Java-modified UTF-8.
    JUtf8Ns,
    /// Strict Java-modified UTF-8.
    JUtf8St,
    /// Permissive CESU-8.
    Cesu8,
    /// Non-skipping CESU-8.
    Cesu8Ns,
    /// Strict CESU-8.
    Cesu8St,
    /// Permissive Java-modified CESU-8.
    JCesu8,
    /// Non-skipping Java-modified CESU-8.
    JCesu8Ns,
    /// Strict Java-modified CESU-8.
    JCesu8St,
    /// Little-endian UTF-16.
    Utf16Le,
    /// Big-endian UTF-16.
    Utf16Be,
    /// Little-endian UCS-2.
    Ucs2Le,
    /// Big-endian UCS-2.
    Ucs2Be,
    /// Little-endian UTF-32.
    Utf32Le,
    /// Big-endian UTF-32.
    Utf32Be,
    /// Little-endian UCS-4.
    Ucs4Le,
    /// Big-endian UCS-4.
    Ucs4Be,
    /// Little-endian CESU UTF-32.
    Cesu32Le,
    /// Big-endian CESU UTF-32.
    Cesu32Be,
    /// Little-endian CESU UCS-4. Routed to the UCS-4-enabled CESU-32 codec.
    Cesu4Le,
    /// Big-endian CESU UCS-4. Routed to the UCS-4-enabled CESU-32 codec.
    Cesu4Be,
    /// ISO-8859-1 byte pass-through.
    Byte,
    /// Non-skipping ISO-8859-1.
    ByteNs,
    /// 7-bit ASCII.
    Ascii,
    /// Non-skipping 7-bit ASCII.
    AsciiNs,
    /// Permissive Windows code page 1252.
    Cp1252,
    /// Non-skipping Windows code page 1252.
    Cp1252Ns,
    /// Strict Windows code page 1252.
    Cp1252St,
}

/// Non-UTF and non-strict encodings selectable as a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OtherType {
    /// Java-style UTF-8, the default.
    JUtf8,
    /// ISO-8859-1, 8-bit pass-through.
    Iso8859_1,
    /// Strict 7-bit ASCII.
    Ascii,
    /// Windows code page 1252.
    Cp1252,
}

/// A line extracted by [`Codec::get_line`] or [`Codec::read_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Byte range of the line content within the scanned buffer, excluding
    /// the terminator.
    pub span: Range<usize>,
    /// Bytes consumed, including the terminator.
    pub bytes: usize,
    /// Accumulated diagnostics from reading the line.
    pub diag: Diag,
}

/// Encoded code-point handler: one stateless, reentrant singleton per
/// [`SubType`], obtained from [`handler`].
///
/// The `get`/`set` primitives never move the cursor; the `read`/`write`
/// wrappers advance `offset` by the reported byte count, including after a
/// truncating or coalescing failure, so a caller can keep going.
pub trait Codec: Sync {
    /// The encoding family this handler belongs to.
    fn utf_type(&self) -> UtfType;
    /// The concrete tag this handler implements.
    fn sub_type(&self) -> SubType;
    /// Code-unit size in bytes: 1, 2 or 4.
    fn unit_size(&self) -> usize;
    /// Encoded byte length of `rune` under this tag, 0 if not encodable.
    fn len(&self, rune: Rune) -> usize;
    /// Byte length of this tag's byte order mark (0 when it has none).
    fn bom_len(&self) -> usize;
    /// Byte length of this tag's NULL terminator.
    fn null_len(&self) -> usize;
    /// Decodes one scalar at `buf[offset]` without moving the cursor.
    fn get(&self, buf: &[u8], offset: usize) -> Decoded;
    /// Encodes one scalar at `buf[offset]` without moving the cursor.
    fn set(&self, buf: &mut [u8], offset: usize, rune: Rune) -> Encoded;
    /// Writes the byte order mark at `buf[offset]` without moving the cursor.
    fn set_bom(&self, buf: &mut [u8], offset: usize) -> Encoded;
    /// Writes the NULL terminator at `buf[offset]` without moving the cursor.
    fn set_null(&self, buf: &mut [u8], offset: usize) -> Encoded;
    /// Moves `offset` forward by up to `count` code points; returns the
    /// count actually consumed. Lands on decoder boundaries exactly.
    fn step(&self, buf: &[u8], offset: &mut usize, count: usize) -> usize;
    /// Moves `offset` backward by up to `count` code points; returns the
    /// count actually consumed.
    fn back(&self, buf: &[u8], offset: &mut usize, count: usize) -> usize;

    /// Decodes one scalar and advances `offset` by the bytes consumed.
    fn read(&self, buf: &[u8], offset: &mut usize) -> Decoded {
        let out = self.get(buf, *offset);
        *offset += out.bytes;
        out
    }

    /// Encodes one scalar and advances `offset` by the bytes written.
    fn write(&self, buf: &mut [u8], offset: &mut usize, rune: Rune) -> Encoded {
        let out = self.set(buf, *offset, rune);
        *offset += out.bytes;
        out
    }

    /// Writes the byte order mark and advances `offset`.
    fn write_bom(&self, buf: &mut [u8], offset: &mut usize) -> Encoded {
        let out = self.set_bom(buf, *offset);
        *offset += out.bytes;
        out
    }

    /// Writes the NULL terminator and advances `offset`.
    fn write_null(&self, buf: &mut [u8], offset: &mut usize) -> Encoded {
        let out = self.set_null(buf, *offset);
        *offset += out.bytes;
        out
    }

    /// Reads `buf[offset..]` to the end, accumulating warnings and stopping
    /// at the first hard error. Returns the combined diagnostic.
    fn validate(&self, buf: &[u8], offset: usize) -> Diag {
        let mut diag = check_cursor(buf, offset);
        if diag.no_error() {
            let mut pos = offset;
            while pos < buf.len() {
                diag |= self.read(buf, &mut pos).diag;
                if diag.error() {
                    break;
                }
            }
        }
        diag
    }

    /// Decodes one scalar with line-feed normalization, without moving the
    /// cursor.
    ///
    /// U+000A, U+000B, U+000C, U+000D, U+0085, U+2028 and U+2029 all read
    /// as U+000A. A CR/LF or LF/CR two-scalar sequence is consumed whole:
    /// the pairing rule is that the partner's value is the first scalar
    /// XOR 7.
    fn get_nlf(&self, buf: &[u8], offset: usize) -> Decoded {
        let mut out = self.get(buf, offset);
        if out.diag.no_error() {
            match out.rune {
                0x0A | 0x0D => {
                    let pair = self.get(buf, offset + out.bytes);
                    if out.rune == pair.rune ^ 0x07 {
                        out.bytes += pair.bytes;
                        out.diag |= pair.diag;
                    }
                    out.rune = 0x0A;
                }
                0x0B | 0x0C | 0x85 | 0x2028 | 0x2029 => out.rune = 0x0A,
                _ => {}
            }
        }
        out
    }

    /// [`Codec::get_nlf`] plus cursor advance.
    fn read_nlf(&self, buf: &[u8], offset: &mut usize) -> Decoded {
        let out = self.get_nlf(buf, *offset);
        *offset += out.bytes;
        out
    }

    /// Scans from `buf[offset]` up to the next logical newline or NULL and
    /// returns the line content span, without moving the cursor. The end of
    /// the buffer terminates the final line.
    fn get_line(&self, buf: &[u8], offset: usize) -> Line {
        let mut diag = check_cursor(buf, offset);
        let mut span = offset..offset;
        let mut bytes = 0;
        if diag.no_error() {
            let mut pos = offset;
            loop {
                let out = self.get_nlf(buf, pos);
                diag |= out.diag;
                if diag.error() {
                    bytes = out.bytes;
                    break;
                }
                if out.rune == 0x0A || out.rune == 0 {
                    span = offset..pos;
                    bytes = (pos - offset) + out.bytes;
                    break;
                }
                pos += out.bytes;
            }
        }
        Line { span, bytes, diag }
    }

    /// [`Codec::get_line`] plus cursor advance past the terminator.
    fn read_line(&self, buf: &[u8], offset: &mut usize) -> Line {
        let out = self.get_line(buf, *offset);
        *offset += out.bytes;
        out
    }
}

/// Returns the process-wide handler singleton for an encoding tag.
pub fn handler(sub: SubType) -> &'static dyn Codec {
    match sub {
        SubType::Utf8 => &crate::utf8::UTF8,
        SubType::Utf8Ns => &crate::utf8::UTF8_NS,
        SubType::Utf8St => &crate::utf8::UTF8_ST,
        SubType::JUtf8 => &crate::utf8::JUTF8,
        SubType::JUtf8Ns => &crate::utf8::JUTF8_NS,
        SubType::JUtf8St => &crate::utf8::JUTF8_ST,
        SubType::Cesu8 => &crate::utf8::CESU8,
        SubType::Cesu8Ns => &crate::utf8::CESU8_NS,
        SubType::Cesu8St => &crate::utf8::CESU8_ST,
        SubType::JCesu8 => &crate::utf8::JCESU8,
        SubType::JCesu8Ns => &crate::utf8::JCESU8_NS,
        SubType::JCesu8St => &crate::utf8::JCESU8_ST,
        SubType::Utf16Le => &crate::utf16::UTF16_LE,
        SubType::Utf16Be => &crate::utf16::UTF16_BE,
        SubType::Ucs2Le => &crate::utf16::UCS2_LE,
        SubType::Ucs2Be => &crate::utf16::UCS2_BE,
        SubType::Utf32Le => &crate::utf32::UTF32_LE,
        SubType::Utf32Be => &crate::utf32::UTF32_BE,
        SubType::Ucs4Le => &crate::utf32::UCS4_LE,
        SubType::Ucs4Be => &crate::utf32::UCS4_BE,
        SubType::Cesu32Le => &crate::utf32::CESU32_LE,
        SubType::Cesu32Be => &crate::utf32::CESU32_BE,
        SubType::Cesu4Le => &crate::utf32::CESU4_LE,
        SubType::Cesu4Be => &crate::utf32::CESU4_BE,
        SubType::Byte => &crate::byte::BYTE,
        SubType::ByteNs => &crate::byte::BYTE_NS,
        SubType::Ascii => &crate::byte::ASCII,
        SubType::AsciiNs => &crate::byte::ASCII_NS,
        SubType::Cp1252 => &crate::cp1252::CP1252,
        SubType::Cp1252Ns => &crate::cp1252::CP1252_NS,
        SubType::Cp1252St => &crate::cp1252::CP1252_ST,
    }
}

/// Returns the strict default handler for an encoding family; `Other` maps
/// to Java-style strict UTF-8.
pub fn handler_for_type(ty: UtfType) -> &'static dyn Codec {
    handler(match ty {
        UtfType::Utf8 => SubType::Utf8St,
        UtfType::Utf16Le => SubType::Utf16Le,
        UtfType::Utf16Be => SubType::Utf16Be,
        UtfType::Utf32Le => SubType::Utf32Le,
        UtfType::Utf32Be => SubType::Utf32Be,
        UtfType::Other => SubType::JUtf8St,
    })
}

/// Returns the handler for a non-UTF selection: the non-skipping byte
/// codecs and strict CP-1252, with Java-style strict UTF-8 as the default.
pub fn handler_for_other(other: OtherType) -> &'static dyn Codec {
    handler(match other {
        OtherType::JUtf8 => SubType::JUtf8St,
        OtherType::Iso8859_1 => SubType::ByteNs,
        OtherType::Ascii => SubType::AsciiNs,
        OtherType::Cp1252 => SubType::Cp1252St,
    })
}

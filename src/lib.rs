//! Scalar-level transcoding between Unicode and byte-level text encodings.
//!
//! This crate decodes, validates, skips over and re-emits code points
//! against caller-owned byte buffers, with precise control over which
//! deviations from the strict standards are accepted, warned about or
//! rejected. It is aimed at code that ingests text of unknown or mixed
//! provenance: file importers, protocol parsers, text editors and log
//! processors.
//!
//! # Model
//!
//! A scalar is a [`Rune`]: a signed 32-bit candidate code point that can
//! carry surrogates, the extended UCS-4 range and failure sentinels, which
//! is why it is not a `char`. A cursor is a byte slice plus an offset; the
//! primitives never move the offset themselves, while the handler
//! `read`/`write` wrappers advance it on success. Every call returns a
//! [`Diag`] bitset classifying what was observed.
//!
//! Encodings are named by [`SubType`] tags combining a family (UTF-8,
//! UTF-16, UTF-32, BYTE, ASCII, CP-1252) with variant flags: Java-modified
//! NULL, CESU surrogate pairs, UCS-2/UCS-4 range handling, non-skipping or
//! strict malformed-input recovery, and byte order. [`handler`] maps a tag
//! to its stateless singleton; for ad-hoc flag combinations the flag-level
//! functions in the family modules remain available.
//!
//! # Example
//!
//! ```
//! use runely::{handler, SubType};
//!
//! // transcode a CP-1252 byte to UTF-8
//! let cp1252 = handler(SubType::Cp1252);
//! let utf8 = handler(SubType::Utf8);
//!
//! let input = [0x80u8]; // the euro sign in CP-1252
//! let mut offset = 0;
//! let dec = cp1252.read(&input, &mut offset);
//! assert_eq!(dec.rune, 0x20AC);
//!
//! let mut out = [0u8; 4];
//! let mut written = 0;
//! let enc = utf8.write(&mut out, &mut written, dec.rune);
//! assert!(!enc.diag.error());
//! assert_eq!(&out[..written], "€".as_bytes());
//! ```
//!
//! Malformed input never panics and never loses the cursor: a failed decode
//! reports how many bytes to skip (a whole coalesced run, or exactly one
//! byte under the non-skipping and strict tags) and returns the offending
//! lead byte so the caller can substitute U+FFFD when
//! [`Diag::use_replacement_character`] says so.

#![no_std]
#![deny(missing_docs)]

#[cfg(feature = "registry")]
extern crate alloc;

/// BYTE (ISO-8859-1) and 7-bit ASCII codecs.
pub mod byte;
/// Classification predicates over Unicode scalars.
pub mod classify;
/// Windows code page 1252 codec and translation tables.
pub mod cp1252;
/// Diagnostic bitset and call result types.
pub mod diag;
/// Encoding tags, the handler trait and dispatch.
pub mod encoding;
/// Hex digit and short-escape conversion tables.
pub mod escape;
/// CCITT-16 text hashing with ASCII-hex packing.
pub mod hash;
/// Runtime encoding registry for name-based handler selection.
#[cfg(feature = "registry")]
pub mod registry;
/// Encoding identification from BOMs and leading ASCII.
pub mod sniff;
/// UTF-16 codec with UCS-2 restriction.
pub mod utf16;
/// UTF-32 codec with UCS-4 and CESU extensions.
pub mod utf32;
/// UTF-8 codec family, including Java-modified and CESU variants.
pub mod utf8;

pub use byte::{back_byte, decode_byte, encode_byte, len_byte, step_byte, ByteMode};
pub use cp1252::{
    back_cp1252, cp1252_to_rune, decode_cp1252, encode_cp1252, len_cp1252, rune_to_cp1252,
    step_cp1252, Cp1252Mode,
};
pub use diag::{Decoded, Diag, Encoded};
pub use encoding::{
    handler, handler_for_other, handler_for_type, Codec, Line, OtherType, SubType, UtfType,
};
pub use sniff::identify;
pub use utf16::{
    back_utf16, decode_utf16, encode_utf16, encode_utf16_bom, encode_utf16_null, len_utf16,
    step_utf16, Utf16Mode,
};
pub use utf32::{
    back_utf32, decode_utf32, encode_utf32, encode_utf32_bom, encode_utf32_null, len_utf32,
    step_utf32, Utf32Mode,
};
pub use utf8::{
    back_utf8, decode_utf8, encode_utf8, encode_utf8_bom, encode_utf8_n, encode_utf8_null,
    index_to_overlong, is_overlong_utf8, len_utf8, len_utf8_strict, overlong_to_index, step_utf8,
    Utf8Mode,
};

/// A candidate Unicode code point.
///
/// Valid Unicode occupies U+0000..=U+10FFFF excluding the surrogate block;
/// the extended UCS-4 range up to U+7FFFFFFF is representable but
/// non-standard. Negative values are reserved failure sentinels, which is
/// why this is an `i32` rather than a `char`.
pub type Rune = i32;

/// Failure sentinel returned by the UTF-16 and UTF-32 decoders when no
/// scalar could be recovered.
pub const RUNE_INVALID: Rune = i32::MIN;

/// The Unicode replacement character, U+FFFD.
pub const RUNE_REPLACEMENT: Rune = 0xFFFD;

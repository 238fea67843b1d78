//! Per-call diagnostics for encode, decode and skip operations.
//!
//! Every codec primitive reports through a [`Diag`] bitset rather than a
//! `Result`: a single call can carry several warnings alongside a hard error,
//! and callers routinely `|=` diagnostics across many calls to build a
//! cumulative report for a whole buffer.
//!
//! The bit layout is split into three disjoint groups:
//!
//! - **Hard errors** abort the current code point (`FAILED` is always set
//!   alongside any of them).
//! - **Warnings** are informative and may coexist with a successful decode.
//! - The **byte index** occupies the three low bits and locates the first
//!   offending byte inside a failed sequence. It is excluded from [`Diag::any`]
//!   and from the error/warning masks.
//!
//! # Example
//!
//! ```
//! use runely::{Diag, decode_utf8, Utf8Mode};
//!
//! let out = decode_utf8(b"\xC0\x80", 0, Utf8Mode::default());
//! assert!(out.diag.contains(Diag::MODIFIED_UTF8));
//! assert!(out.diag.use_replacement_character());
//! ```

use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::encoding::SubType;
use crate::Rune;

/// Diagnostic bitset returned by every codec call.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Diag(u32);

impl Diag {
    /// No diagnostics.
    pub const NONE: Diag = Diag(0);
    /// The operation failed; set whenever any other hard error is set.
    pub const FAILED: Diag = Diag(1 << 31);
    /// The buffer reference is absent. Kept for layout compatibility with
    /// foreign callers; the safe slice-based API never produces it.
    pub const INVALID_BUFFER: Diag = Diag(1 << 30);
    /// The cursor offset is greater than the buffer length.
    pub const INVALID_OFFSET: Diag = Diag(1 << 29);
    /// The cursor offset is not a multiple of the code-unit size.
    pub const MISALIGNED_OFFSET: Diag = Diag(1 << 28);
    /// The buffer length is not a multiple of the code-unit size.
    pub const MISALIGNED_LENGTH: Diag = Diag(1 << 27);
    /// The write would overflow the buffer.
    pub const WRITE_OVERFLOW: Diag = Diag(1 << 26);
    /// The read would overrun the buffer part-way through a sequence.
    pub const READ_TRUNCATED: Diag = Diag(1 << 25);
    /// The read is at the end of the buffer; no data was produced.
    pub const READ_EXHAUSTED: Diag = Diag(1 << 24);
    /// The scalar is not encodable under the requested encoding.
    pub const NOT_ENCODABLE: Diag = Diag(1 << 23);
    /// The byte sequence is not decodable under the requested encoding.
    pub const NOT_DECODABLE: Diag = Diag(1 << 22);
    /// The scalar is in the invalid range (high bit set).
    pub const INVALID_POINT: Diag = Diag(1 << 21);
    /// The scalar is in the extended UCS-4 range (U+110000 to U+7FFFFFFF).
    pub const EXTENDED_UCS4: Diag = Diag(1 << 20);
    /// The scalar is in the supplementary planes (U+10000 to U+10FFFF).
    pub const SUPPLEMENTARY: Diag = Diag(1 << 19);
    /// The scalar is a Unicode non-character.
    pub const NON_CHARACTER: Diag = Diag(1 << 18);
    /// A high surrogate lead was present but its low partner was truncated.
    pub const TRUNCATED_PAIR: Diag = Diag(1 << 17);
    /// The scalar was encoded as a surrogate pair.
    pub const SURROGATE_PAIR: Diag = Diag(1 << 16);
    /// The scalar is an unpaired high surrogate (U+D800 to U+DBFF).
    pub const HIGH_SURROGATE: Diag = Diag(1 << 15);
    /// The scalar is an unpaired low surrogate (U+DC00 to U+DFFF).
    pub const LOW_SURROGATE: Diag = Diag(1 << 14);
    /// The scalar is U+0000 serving as a string delimiter.
    pub const DELIMIT_STRING: Diag = Diag(1 << 13);
    /// The encoding can be processed but is not standards compliant.
    pub const IRREGULAR_FORM: Diag = Diag(1 << 12);
    /// The requested explicit UTF-8 length is outside 1..=6.
    pub const BAD_SIZE_UTF8: Diag = Diag(1 << 11);
    /// The encoding is the modified two-byte NULL (`C0 80`).
    pub const MODIFIED_UTF8: Diag = Diag(1 << 10);
    /// The encoding is overlong.
    pub const OVERLONG_UTF8: Diag = Diag(1 << 9);
    /// The encoding is more than four bytes long.
    pub const EXTENDED_UTF8: Diag = Diag(1 << 8);
    /// The scalar cannot be transformed between Unicode and the target set.
    pub const UNTRANSFORMABLE: Diag = Diag(1 << 7);
    /// The scalar needs more bits than the encoding provides.
    pub const NOT_ENOUGH_BITS: Diag = Diag(1 << 6);
    /// An illegal byte was found (never allowed by the encoding).
    pub const DISALLOWED_BYTE: Diag = Diag(1 << 5);
    /// A valid byte was found in an unexpected position.
    pub const UNEXPECTED_BYTE: Diag = Diag(1 << 4);

    const ERRORS_MASK: u32 = Self::FAILED.0
        | Self::INVALID_BUFFER.0
        | Self::INVALID_OFFSET.0
        | Self::MISALIGNED_OFFSET.0
        | Self::MISALIGNED_LENGTH.0
        | Self::WRITE_OVERFLOW.0
        | Self::READ_TRUNCATED.0
        | Self::NOT_ENCODABLE.0
        | Self::NOT_DECODABLE.0
        | Self::BAD_SIZE_UTF8.0
        | Self::UNTRANSFORMABLE.0
        | Self::NOT_ENOUGH_BITS.0
        | Self::DISALLOWED_BYTE.0
        | Self::UNEXPECTED_BYTE.0;

    const WARNINGS_MASK: u32 = Self::READ_EXHAUSTED.0
        | Self::INVALID_POINT.0
        | Self::EXTENDED_UCS4.0
        | Self::SUPPLEMENTARY.0
        | Self::NON_CHARACTER.0
        | Self::TRUNCATED_PAIR.0
        | Self::SURROGATE_PAIR.0
        | Self::HIGH_SURROGATE.0
        | Self::LOW_SURROGATE.0
        | Self::DELIMIT_STRING.0
        | Self::IRREGULAR_FORM.0
        | Self::MODIFIED_UTF8.0
        | Self::OVERLONG_UTF8.0
        | Self::EXTENDED_UTF8.0;

    const BUFFER_ERRORS_MASK: u32 = Self::INVALID_BUFFER.0
        | Self::INVALID_OFFSET.0
        | Self::MISALIGNED_OFFSET.0
        | Self::MISALIGNED_LENGTH.0;

    const RESERVED_MASK: u32 = 0xF;
    const BYTE_INDEX_MASK: u32 = 0x7;

    const RUNE_TOLERATED: u32 = Self::SUPPLEMENTARY.0
        | Self::NON_CHARACTER.0
        | Self::SURROGATE_PAIR.0
        | Self::IRREGULAR_FORM.0
        | Self::MODIFIED_UTF8.0
        | Self::OVERLONG_UTF8.0
        | Self::EXTENDED_UTF8.0;

    const UTF16_RUNE_TOLERATED: u32 =
        Self::SUPPLEMENTARY.0 | Self::NON_CHARACTER.0 | Self::SURROGATE_PAIR.0;

    const UTF32_RUNE_TOLERATED: u32 = Self::SUPPLEMENTARY.0 | Self::NON_CHARACTER.0;

    const USE_REPLACEMENT_MASK: u32 =
        Self::NOT_DECODABLE.0 | Self::NON_CHARACTER.0 | Self::IRREGULAR_FORM.0;

    /// Builds a diagnostic from a raw bit pattern.
    #[inline]
    pub const fn from_raw(raw: u32) -> Diag {
        Diag(raw)
    }

    /// Returns the raw bit pattern.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns `true` if any bit outside the reserved byte-index region is set.
    #[inline]
    pub const fn any(self) -> bool {
        (self.0 & !Self::RESERVED_MASK) != 0
    }

    /// Returns `true` if no diagnostic bit is set.
    #[inline]
    pub const fn none(self) -> bool {
        !self.any()
    }

    /// Returns `true` if any bit of `mask` is set.
    #[inline]
    pub const fn contains(self, mask: Diag) -> bool {
        (self.0 & mask.0) != 0
    }

    /// Returns `true` if every bit of `mask` is set.
    #[inline]
    pub const fn contains_all(self, mask: Diag) -> bool {
        (self.0 & mask.0) == mask.0
    }

    /// Clears every bit of `mask`.
    #[inline]
    pub fn clear(&mut self, mask: Diag) {
        self.0 &= !mask.0;
    }

    /// Returns `true` if the `FAILED` bit is set.
    #[inline]
    pub const fn failed(self) -> bool {
        (self.0 & Self::FAILED.0) != 0
    }

    /// Returns `true` if any hard-error bit is set.
    #[inline]
    pub const fn error(self) -> bool {
        (self.0 & Self::ERRORS_MASK) != 0
    }

    /// Returns `true` if no hard-error bit is set.
    #[inline]
    pub const fn no_error(self) -> bool {
        !self.error()
    }

    /// Returns `true` if any buffer pre-flight error is set.
    #[inline]
    pub const fn buffer_error(self) -> bool {
        (self.0 & Self::BUFFER_ERRORS_MASK) != 0
    }

    /// Keeps only the hard-error bits.
    #[inline]
    pub const fn errors_only(self) -> Diag {
        Diag(self.0 & Self::ERRORS_MASK)
    }

    /// Keeps only the warning bits.
    #[inline]
    pub const fn warnings_only(self) -> Diag {
        Diag(self.0 & Self::WARNINGS_MASK)
    }

    /// Returns `true` if the decoded scalar is a plain rune value: not a
    /// surrogate, not supplementary, not a non-character, with no
    /// irregularities of any kind.
    #[inline]
    pub const fn is_rune_value(self) -> bool {
        (self.0 & !Self::RUNE_TOLERATED & !Self::RESERVED_MASK) == 0
    }

    /// Stricter per-encoding variant of [`Diag::is_rune_value`].
    ///
    /// The UTF-8 and UTF-32 non-skipping/strict tags tolerate the
    /// supplementary and non-character warnings; the UTF-16 tags additionally
    /// tolerate `SURROGATE_PAIR`, since pairing is the normal encoding there.
    /// Every other tag yields `false`.
    pub const fn is_strict_rune(self, sub_type: SubType) -> bool {
        let tolerated = match sub_type {
            SubType::Utf8Ns | SubType::Utf8St | SubType::Utf32Le | SubType::Utf32Be => {
                Self::UTF32_RUNE_TOLERATED
            }
            SubType::Utf16Le | SubType::Utf16Be => Self::UTF16_RUNE_TOLERATED,
            _ => return false,
        };
        (self.0 & !tolerated & !Self::RESERVED_MASK) == 0
    }

    /// Returns `true` if the consumer should substitute U+FFFD for the
    /// decoded scalar.
    #[inline]
    pub const fn use_replacement_character(self) -> bool {
        (self.0 & Self::USE_REPLACEMENT_MASK) != 0
    }

    /// Returns the relative index (0..=7) of the first offending byte inside
    /// a failed sequence, or 0 when not applicable.
    #[inline]
    pub const fn byte_index(self) -> usize {
        (self.0 & Self::BYTE_INDEX_MASK) as usize
    }

    /// Stores the relative index of the first offending byte.
    #[inline]
    pub fn set_byte_index(&mut self, index: usize) {
        self.0 = (self.0 & !Self::BYTE_INDEX_MASK) | (index as u32 & Self::BYTE_INDEX_MASK);
    }
}

impl BitOr for Diag {
    type Output = Diag;
    #[inline]
    fn bitor(self, rhs: Diag) -> Diag {
        Diag(self.0 | rhs.0)
    }
}

impl BitOrAssign for Diag {
    #[inline]
    fn bitor_assign(&mut self, rhs: Diag) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Diag {
    type Output = Diag;
    #[inline]
    fn bitand(self, rhs: Diag) -> Diag {
        Diag(self.0 & rhs.0)
    }
}

impl BitAndAssign for Diag {
    #[inline]
    fn bitand_assign(&mut self, rhs: Diag) {
        self.0 &= rhs.0;
    }
}

impl BitXor for Diag {
    type Output = Diag;
    #[inline]
    fn bitxor(self, rhs: Diag) -> Diag {
        Diag(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Diag {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Diag) {
        self.0 ^= rhs.0;
    }
}

impl Not for Diag {
    type Output = Diag;
    #[inline]
    fn not(self) -> Diag {
        Diag(!self.0)
    }
}

impl fmt::Debug for Diag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(u32, &str); 28] = [
            (1 << 31, "FAILED"),
            (1 << 30, "INVALID_BUFFER"),
            (1 << 29, "INVALID_OFFSET"),
            (1 << 28, "MISALIGNED_OFFSET"),
            (1 << 27, "MISALIGNED_LENGTH"),
            (1 << 26, "WRITE_OVERFLOW"),
            (1 << 25, "READ_TRUNCATED"),
            (1 << 24, "READ_EXHAUSTED"),
            (1 << 23, "NOT_ENCODABLE"),
            (1 << 22, "NOT_DECODABLE"),
            (1 << 21, "INVALID_POINT"),
            (1 << 20, "EXTENDED_UCS4"),
            (1 << 19, "SUPPLEMENTARY"),
            (1 << 18, "NON_CHARACTER"),
            (1 << 17, "TRUNCATED_PAIR"),
            (1 << 16, "SURROGATE_PAIR"),
            (1 << 15, "HIGH_SURROGATE"),
            (1 << 14, "LOW_SURROGATE"),
            (1 << 13, "DELIMIT_STRING"),
            (1 << 12, "IRREGULAR_FORM"),
            (1 << 11, "BAD_SIZE_UTF8"),
            (1 << 10, "MODIFIED_UTF8"),
            (1 << 9, "OVERLONG_UTF8"),
            (1 << 8, "EXTENDED_UTF8"),
            (1 << 7, "UNTRANSFORMABLE"),
            (1 << 6, "NOT_ENOUGH_BITS"),
            (1 << 5, "DISALLOWED_BYTE"),
            (1 << 4, "UNEXPECTED_BYTE"),
        ];
        write!(f, "Diag(")?;
        let mut first = true;
        for (bit, name) in NAMES {
            if (self.0 & bit) != 0 {
                if !first {
                    write!(f, " | ")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        if first {
            write!(f, "NONE")?;
        }
        if self.byte_index() != 0 {
            write!(f, ", byte_index={}", self.byte_index())?;
        }
        write!(f, ")")
    }
}

/// Result of a decode or skip primitive: the scalar, the byte count
/// consumed, and the diagnostics produced while reading it.
///
/// On a hard decode failure `rune` is the first byte of the offending
/// sequence for byte-unit encodings, [`crate::RUNE_INVALID`] for UTF-16 and
/// UTF-32, and 0 when the read was exhausted before producing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded scalar, or a failure sentinel.
    pub rune: Rune,
    /// Bytes consumed from the cursor position.
    pub bytes: usize,
    /// Diagnostics observed while decoding.
    pub diag: Diag,
}

impl Decoded {
    pub(crate) const fn empty() -> Decoded {
        Decoded {
            rune: 0,
            bytes: 0,
            diag: Diag::NONE,
        }
    }
}

/// Result of an encode primitive: the byte count written and diagnostics.
///
/// On any hard error `bytes` is 0 and nothing was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoded {
    /// Bytes written at the cursor position.
    pub bytes: usize,
    /// Diagnostics observed while encoding.
    pub diag: Diag,
}

/// Pre-flight check shared by the single-byte-unit codecs.
#[inline]
pub(crate) fn check_cursor(buf: &[u8], offset: usize) -> Diag {
    if offset > buf.len() {
        Diag::FAILED | Diag::INVALID_OFFSET
    } else {
        Diag::NONE
    }
}

/// Pre-flight check for the multi-byte-unit codecs; `mask` is 1 for UTF-16
/// and 3 for UTF-32.
#[inline]
pub(crate) fn check_cursor_aligned(buf: &[u8], offset: usize, mask: usize) -> Diag {
    let mut diag = check_cursor(buf, offset);
    if offset & mask != 0 {
        diag |= Diag::FAILED | Diag::MISALIGNED_OFFSET;
    }
    if buf.len() & mask != 0 {
        diag |= Diag::FAILED | Diag::MISALIGNED_LENGTH;
    }
    diag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_diag_is_clean() {
        let d = Diag::NONE;
        assert!(!d.any());
        assert!(d.none());
        assert!(!d.failed());
        assert!(!d.error());
    }

    #[test]
    fn error_and_warning_separation() {
        let mut d = Diag::NONE;
        d |= Diag::FAILED;
        d |= Diag::INVALID_BUFFER;
        d |= Diag::READ_EXHAUSTED;
        d |= Diag::INVALID_POINT;

        let errors = d.errors_only();
        assert!(errors.contains(Diag::FAILED));
        assert!(errors.contains(Diag::INVALID_BUFFER));
        assert!(!errors.contains(Diag::READ_EXHAUSTED));
        assert!(!errors.contains(Diag::INVALID_POINT));

        let warnings = d.warnings_only();
        assert!(!warnings.contains(Diag::FAILED));
        assert!(warnings.contains(Diag::READ_EXHAUSTED));
        assert!(warnings.contains(Diag::INVALID_POINT));
    }

    #[test]
    fn buffer_error_classification() {
        let d = Diag::INVALID_OFFSET | Diag::MISALIGNED_LENGTH;
        assert!(d.buffer_error());
        assert!(!Diag::FAILED.buffer_error());
    }

    #[test]
    fn byte_index_round_trip() {
        let mut d = Diag::NONE;
        d.set_byte_index(5);
        assert_eq!(d.byte_index(), 5);
        assert!(!d.any(), "byte index alone is not a diagnostic");
        d.set_byte_index(0);
        assert_eq!(d.byte_index(), 0);
    }

    #[test]
    fn byte_index_excluded_from_masks() {
        let mut d = Diag::NOT_DECODABLE;
        d.set_byte_index(3);
        assert_eq!(d.errors_only().byte_index(), 0);
        assert_eq!(d.warnings_only().byte_index(), 0);
    }

    #[test]
    fn replacement_character_mask() {
        assert!(Diag::NOT_DECODABLE.use_replacement_character());
        assert!(Diag::NON_CHARACTER.use_replacement_character());
        assert!(Diag::IRREGULAR_FORM.use_replacement_character());
        assert!(!Diag::SUPPLEMENTARY.use_replacement_character());
    }

    #[test]
    fn rune_value_tolerates_supplementary() {
        let d = Diag::SUPPLEMENTARY | Diag::SURROGATE_PAIR;
        assert!(d.is_rune_value());
        assert!(!(d | Diag::HIGH_SURROGATE).is_rune_value());
    }

    #[test]
    fn strict_rune_is_per_tag() {
        let d = Diag::SURROGATE_PAIR | Diag::SUPPLEMENTARY;
        assert!(d.is_strict_rune(SubType::Utf16Le));
        assert!(!d.is_strict_rune(SubType::Utf8St));
        assert!(Diag::SUPPLEMENTARY.is_strict_rune(SubType::Utf8Ns));
        assert!(!Diag::NONE.is_strict_rune(SubType::Cesu8));
    }
}

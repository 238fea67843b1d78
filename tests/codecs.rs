//! Per-tag test suites for every encoding handler.
//!
//! Each tag gets the same battery: encode/decode round trips with
//! length-consistency checks, streaming write-then-read over a scalar
//! sequence, forward-skip/backward-skip inversion, and agreement between
//! the skipper and the decoder on byte boundaries.

use paste::paste;

/// Scalars valid under every Unicode-complete tag.
const UNICODE_RUNES: &[i32] = &[
    0x00, 0x41, 0x7F, 0x80, 0x7FF, 0x800, 0xE9, 0x4E16, 0xFFFD, 0x1_0000, 0x1F600, 0x10_FFFF,
];

/// BMP-only scalars for the UCS-2 tags.
const BMP_RUNES: &[i32] = &[0x00, 0x41, 0x7F, 0xE9, 0x4E16, 0xFFFD];

/// Scalars in the extended UCS-4 range plus regular Unicode.
const UCS4_RUNES: &[i32] = &[
    0x00, 0x41, 0xE9, 0x4E16, 0x1F600, 0x10_FFFF, 0x11_0000, 0x0100_0000, 0x7FFF_FFFF,
];

/// Full byte range for the BYTE tags.
const BYTE_RUNES: &[i32] = &[0x00, 0x41, 0x7F, 0x80, 0xA9, 0xFF];

/// 7-bit range for the ASCII tags.
const ASCII_RUNES: &[i32] = &[0x00, 0x09, 0x41, 0x7F];

/// CP-1252 repertoire samples, including remapped 0x80..0x9F slots.
const CP1252_RUNES: &[i32] = &[0x00, 0x41, 0x7F, 0xE9, 0x20AC, 0x0152, 0x2122, 0xFF];

macro_rules! codec_suite {
    ($sub:ident, $runes:ident) => {
        paste! {
            mod [<$sub:snake>] {
                use runely::{handler, Codec, SubType};

                const RUNES: &[i32] = super::$runes;

                fn codec() -> &'static dyn Codec {
                    handler(SubType::$sub)
                }

                #[test]
                fn encode_decode_round_trip() {
                    let codec = codec();
                    for &rune in RUNES {
                        let mut buf = [0u8; 16];
                        let enc = codec.set(&mut buf, 0, rune);
                        assert!(enc.diag.no_error(), "U+{:04X}: {:?}", rune, enc.diag);
                        assert_eq!(enc.bytes, codec.len(rune), "U+{:04X}", rune);
                        let dec = codec.get(&buf[..enc.bytes], 0);
                        assert_eq!(dec.rune, rune, "diag {:?}", dec.diag);
                        assert_eq!(dec.bytes, enc.bytes);
                        assert!(dec.diag.no_error(), "U+{:04X}: {:?}", rune, dec.diag);
                    }
                }

                #[test]
                fn streaming_round_trip() {
                    let codec = codec();
                    let mut buf = [0u8; 256];
                    let mut offset = 0;
                    for &rune in RUNES {
                        let enc = codec.write(&mut buf, &mut offset, rune);
                        assert!(enc.diag.no_error());
                    }
                    let written = offset;
                    let mut pos = 0;
                    for &rune in RUNES {
                        let dec = codec.read(&buf[..written], &mut pos);
                        assert_eq!(dec.rune, rune);
                        assert!(dec.diag.no_error());
                    }
                    assert_eq!(pos, written);
                }

                #[test]
                fn step_then_back_returns_to_start() {
                    let codec = codec();
                    let mut buf = [0u8; 256];
                    let mut offset = 0;
                    for &rune in RUNES {
                        codec.write(&mut buf, &mut offset, rune);
                    }
                    let text = &buf[..offset];

                    let mut cursor = 0;
                    let stepped = codec.step(text, &mut cursor, RUNES.len());
                    assert_eq!(stepped, RUNES.len());
                    assert_eq!(cursor, text.len());

                    let backed = codec.back(text, &mut cursor, stepped);
                    assert_eq!(backed, stepped);
                    assert_eq!(cursor, 0);
                }

                #[test]
                fn step_walks_decoder_boundaries() {
                    let codec = codec();
                    let mut buf = [0u8; 256];
                    let mut offset = 0;
                    for &rune in RUNES {
                        codec.write(&mut buf, &mut offset, rune);
                    }
                    let text = &buf[..offset];

                    let mut decoded = 0;
                    let mut stepped = 0;
                    while decoded < text.len() {
                        let out = codec.read(text, &mut decoded);
                        assert!(out.bytes > 0);
                        assert_eq!(codec.step(text, &mut stepped, 1), 1);
                        assert_eq!(stepped, decoded);
                    }
                }

                #[test]
                fn bom_write_matches_declared_length() {
                    let codec = codec();
                    let mut buf = [0u8; 8];
                    let out = codec.set_bom(&mut buf, 0);
                    assert!(out.diag.no_error());
                    assert_eq!(out.bytes, codec.bom_len());
                    let out = codec.set_null(&mut buf, 0);
                    assert!(out.diag.no_error());
                    assert_eq!(out.bytes, codec.null_len());
                }
            }
        }
    };
}

codec_suite!(Utf8, UNICODE_RUNES);
codec_suite!(Utf8Ns, UNICODE_RUNES);
codec_suite!(Utf8St, UNICODE_RUNES);
codec_suite!(JUtf8, UNICODE_RUNES);
codec_suite!(JUtf8Ns, UNICODE_RUNES);
codec_suite!(JUtf8St, UNICODE_RUNES);
codec_suite!(Cesu8, UNICODE_RUNES);
codec_suite!(Cesu8Ns, UNICODE_RUNES);
codec_suite!(Cesu8St, UNICODE_RUNES);
codec_suite!(JCesu8, UNICODE_RUNES);
codec_suite!(JCesu8Ns, UNICODE_RUNES);
codec_suite!(JCesu8St, UNICODE_RUNES);
codec_suite!(Utf16Le, UNICODE_RUNES);
codec_suite!(Utf16Be, UNICODE_RUNES);
codec_suite!(Ucs2Le, BMP_RUNES);
codec_suite!(Ucs2Be, BMP_RUNES);
codec_suite!(Utf32Le, UNICODE_RUNES);
codec_suite!(Utf32Be, UNICODE_RUNES);
codec_suite!(Ucs4Le, UCS4_RUNES);
codec_suite!(Ucs4Be, UCS4_RUNES);
codec_suite!(Cesu32Le, UNICODE_RUNES);
codec_suite!(Cesu32Be, UNICODE_RUNES);
codec_suite!(Cesu4Le, UCS4_RUNES);
codec_suite!(Cesu4Be, UCS4_RUNES);
codec_suite!(Byte, BYTE_RUNES);
codec_suite!(ByteNs, BYTE_RUNES);
codec_suite!(Ascii, ASCII_RUNES);
codec_suite!(AsciiNs, ASCII_RUNES);
codec_suite!(Cp1252, CP1252_RUNES);
codec_suite!(Cp1252Ns, CP1252_RUNES);
codec_suite!(Cp1252St, CP1252_RUNES);

mod unencodable {
    use runely::{handler, len_byte, len_cp1252, len_utf16, SubType};

    #[test]
    fn length_zero_means_encode_fails() {
        let cases: &[(SubType, i32)] = &[
            (SubType::Ascii, 0x80),
            (SubType::Byte, 0x100),
            (SubType::Cp1252, 0x4E16),
            (SubType::Cp1252St, 0x81),
            (SubType::Ucs2Le, 0x1_0000),
            (SubType::Utf16Le, 0x11_0000),
        ];
        for &(sub, rune) in cases {
            let codec = handler(sub);
            assert_eq!(codec.len(rune), 0, "{:?} U+{:04X}", sub, rune);
            let enc = codec.set(&mut [0u8; 8], 0, rune);
            assert!(enc.diag.error(), "{:?} U+{:04X}", sub, rune);
            assert_eq!(enc.bytes, 0);
        }
    }

    #[test]
    fn length_helpers_agree_with_tags() {
        assert_eq!(len_byte(0x80, true), 0);
        assert_eq!(len_byte(0x80, false), 1);
        assert_eq!(len_utf16(0x1F600, true), 0);
        assert_eq!(len_utf16(0x1F600, false), 4);
        assert_eq!(len_cp1252(0x81, true), 0);
        assert_eq!(len_cp1252(0x81, false), 1);
    }
}

mod overlong_index {
    use runely::{index_to_overlong, overlong_to_index};

    #[test]
    fn bijection_over_sampled_indices() {
        // stride through the whole 0x0421_0880 space
        let mut index = 0u32;
        while index < 0x0421_0880 {
            let (rune, width) = index_to_overlong(index).unwrap();
            assert_eq!(
                overlong_to_index(rune, width),
                Some(index),
                "index {:#X}",
                index
            );
            index = index.wrapping_add(0x101).max(index + 1);
        }
        assert!(index_to_overlong(0x0421_0880).is_none());
        assert!(index_to_overlong(u32::MAX).is_none());
    }
}

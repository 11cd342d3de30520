//! Decoding of the Shift-JIS text stored in names, titles and descriptions

use encoding_rs::SHIFT_JIS;

/// Decode Shift-JIS bytes, stopping at the first NUL if there is one
///
/// Invalid sequences are replaced with U+FFFD rather than rejected, names in real archives
/// are occasionally produced by tools that wrote other encodings.
pub fn decode_shift_jis(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    let (text, _) = SHIFT_JIS.decode_without_bom_handling(&bytes[..end]);
    text.into_owned()
}

#[cfg(test)]
mod test {
    use crate::text::decode_shift_jis;

    #[test]
    fn ascii_passes_through() {
        assert_eq!(decode_shift_jis(b"Params.arc"), "Params.arc");
    }

    #[test]
    fn stops_at_nul() {
        assert_eq!(decode_shift_jis(b"title\0\0\0garbage"), "title");
        assert_eq!(decode_shift_jis(b"\0"), "");
    }

    #[test]
    fn decodes_kana() {
        // "ゼルダ"
        assert_eq!(decode_shift_jis(&[0x83, 0x5B, 0x83, 0x8B, 0x83, 0x5F]), "ゼルダ");
    }
}

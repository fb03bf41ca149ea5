use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// Body text plus the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding_label: String,
}

/// Decode raw bytes into UTF-8 using: BOM -> Content-Type charset ->
/// chardetng fallback. Undecodable sequences become replacement
/// characters; this never fails.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> DecodedText {
    // 1) BOM aware decode using encoding_rs helper
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    // 2) Content-Type header charset
    if let Some(label) = content_type.and_then(extract_charset) {
        if let Some(enc) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, enc);
        }
    }

    // 3) chardetng detection over the full body
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let part = part.trim();
            part.strip_prefix("charset=")
                .or_else(|| part.strip_prefix("Charset="))
                .or_else(|| part.strip_prefix("CHARSET="))
                .map(|v| v.trim_matches([' ', '"', '\''].as_ref()))
        })
        .next()
        .map(|s| s.to_string())
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> DecodedText {
    let (text, actual, _had_errors) = enc.decode(bytes);
    DecodedText {
        text: text.into_owned(),
        encoding_label: actual.name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::decode_body;

    #[test]
    fn plain_utf8_passes_through() {
        let decoded = decode_body("merhaba".as_bytes(), Some("text/plain"));
        assert_eq!(decoded.text, "merhaba");
        assert_eq!(decoded.encoding_label, "windows-1252");
    }

    #[test]
    fn content_type_charset_wins() {
        // "café" in windows-1252
        let bytes = [0x63, 0x61, 0x66, 0xe9];
        let decoded = decode_body(&bytes, Some("text/plain; charset=windows-1252"));
        assert_eq!(decoded.text, "café");
    }

    #[test]
    fn utf8_bom_overrides_the_header() {
        let mut bytes = vec![0xef, 0xbb, 0xbf];
        bytes.extend_from_slice("hi".as_bytes());
        let decoded = decode_body(&bytes, Some("text/plain; charset=windows-1252"));
        assert_eq!(decoded.text, "hi");
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn invalid_bytes_never_error() {
        let bytes = [0xff, 0xfe, 0x00, 0xd8];
        let decoded = decode_body(&bytes, Some("application/json; charset=utf-8"));
        assert!(!decoded.text.is_empty());
    }
}

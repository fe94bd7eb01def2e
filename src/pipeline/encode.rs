//! Chart encoding: rendered chart bytes → base64 `data:` URI.
//!
//! The dashboard is a single HTML response with no static asset routes, so
//! every chart travels inline in an `<img src="data:…">`. Base64 (rather than
//! percent-encoding the SVG) keeps arbitrary token text, quotes and `#`
//! characters from ever breaking the attribute.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

/// Wrap `bytes` as a base64 `data:` URI with the given MIME type.
pub fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    let b64 = STANDARD.encode(bytes);
    debug!("Encoded {} bytes → {} bytes base64", bytes.len(), b64.len());
    format!("data:{mime_type};base64,{b64}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_small_svg() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#;
        let uri = data_uri("image/svg+xml", svg.as_bytes());
        let b64 = uri
            .strip_prefix("data:image/svg+xml;base64,")
            .expect("data uri prefix");
        let decoded = STANDARD.decode(b64).expect("valid base64");
        assert_eq!(decoded, svg.as_bytes());
    }
}

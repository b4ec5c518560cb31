//! `data:` URI encoding for serialized avatars.

use crate::{SvgError, SvgResult};
use base64::Engine;

const SVG_MEDIA_TYPE: &str = "data:image/svg+xml";

/// `data:image/svg+xml;base64,...` over the UTF-8 bytes of `markup`.
pub fn to_base64_data_uri(markup: &str) -> String {
    format!(
        "{};base64,{}",
        SVG_MEDIA_TYPE,
        base64::engine::general_purpose::STANDARD.encode(markup.as_bytes())
    )
}

/// `data:image/svg+xml;utf8,...` with the markup percent-encoded.
pub fn to_utf8_data_uri(markup: &str) -> String {
    format!("{};utf8,{}", SVG_MEDIA_TYPE, urlencoding::encode(markup))
}

/// Recover the markup from a data URI in either encoding.
pub fn decode_data_uri(uri: &str) -> SvgResult<String> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| SvgError::InvalidDataUri("missing data: scheme".into()))?;

    // data:[<mediatype>][;base64],<data>
    let comma_pos = rest
        .find(',')
        .ok_or_else(|| SvgError::InvalidDataUri("missing ',' separator".into()))?;
    let metadata = &rest[..comma_pos];
    let data = &rest[comma_pos + 1..];

    if metadata.split(';').any(|part| part == "base64") {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| SvgError::InvalidDataUri(format!("Base64 decode error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| SvgError::InvalidDataUri(format!("Invalid UTF-8: {}", e)))
    } else {
        urlencoding::decode(data)
            .map(|s| s.into_owned())
            .map_err(|e| SvgError::InvalidDataUri(format!("URL decode error: {}", e)))
    }
}

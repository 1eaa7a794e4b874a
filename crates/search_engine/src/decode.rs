use encoding_rs::{Encoding, UTF_8};
use serde_json::Value;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode bytes with {encoding}")]
    Charset { encoding: String },
    #[error("malformed json: {message}")]
    Json { message: String },
}

/// Decodes a response body into a JSON value.
///
/// Charset resolution: BOM -> Content-Type charset -> UTF-8.
pub fn decode_json(bytes: &[u8], content_type: Option<&str>) -> Result<Value, DecodeError> {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| {
            content_type
                .and_then(extract_charset)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or(UTF_8);

    // `decode` strips a matching BOM itself.
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::Charset {
            encoding: encoding.name().to_string(),
        });
    }
    serde_json::from_str(&text).map_err(|err| DecodeError::Json {
        message: err.to_string(),
    })
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            if key.trim().eq_ignore_ascii_case("charset") {
                Some(value.trim_matches([' ', '"', '\''].as_ref()).to_string())
            } else {
                None
            }
        })
        .next()
}

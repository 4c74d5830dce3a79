//! Destination key construction and content-type sniffing for the
//! object being uploaded.

/// Sniffing only ever looks at the leading bytes, matching the window
/// standard HTTP content sniffers use.
const SNIFF_WINDOW: usize = 512;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Where the payload ends up in the object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDestination {
    pub bucket: String,
    pub key: String,
}

/// Joins prefix and base name with `/` unconditionally. With an empty
/// prefix the key starts with a leading `/`; that shape is part of the
/// upload contract and is kept as-is.
pub fn object_key(prefix: &str, base_name: &str) -> String {
    format!("{prefix}/{base_name}")
}

/// Magic-byte sniff of the payload's MIME type. Pure: the same leading
/// bytes always produce the same answer. Unrecognised content falls back
/// to `application/octet-stream`.
pub fn detect_content_type(content: &[u8]) -> &'static str {
    let head = &content[..content.len().min(SNIFF_WINDOW)];
    infer::get(head)
        .map(|kind| kind.mime_type())
        .unwrap_or(FALLBACK_CONTENT_TYPE)
}

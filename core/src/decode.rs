//! Byte-level decoding of documents before XML parsing.
//!
//! The encoding is taken from, in order: a byte order mark, the byte
//! pattern of a BOM-less UTF-16 `<?`, the `encoding` pseudo-attribute of the
//! XML declaration. With none of these the document is UTF-8.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use std::borrow::Cow;

/// The declaration must close within this many bytes of the start.
const MAX_DECLARATION: usize = 1024;

/// Decode `bytes` to text, returning the encoding that failed on error.
pub(crate) fn decode(bytes: &[u8]) -> Result<Cow<'_, str>, &'static Encoding> {
    let (encoding, body) = sniff(bytes);
    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or(encoding)
}

/// Pick an encoding and return the bytes that follow any BOM.
fn sniff(bytes: &[u8]) -> (&'static Encoding, &[u8]) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return (encoding, &bytes[bom_len..]);
    }
    if bytes.starts_with(b"<\0?\0") {
        return (UTF_16LE, bytes);
    }
    if bytes.starts_with(b"\0<\0?") {
        return (UTF_16BE, bytes);
    }
    // An ASCII-readable declaration cannot truthfully name UTF-16.
    let encoding = declared_encoding(bytes).map_or(UTF_8, Encoding::output_encoding);
    (encoding, bytes)
}

/// The label in `<?xml version="1.0" encoding="LABEL"?>`, if it names an
/// encoding known to the WHATWG registry.
fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = bytes.strip_prefix(b"<?xml")?;
    let head = &head[..head.len().min(MAX_DECLARATION)];
    let end = head.windows(2).position(|w| w == b"?>")?;
    let declaration = std::str::from_utf8(&head[..end]).ok()?;

    let after = &declaration[declaration.find("encoding")? + "encoding".len()..];
    let value = after.trim_start().strip_prefix('=')?.trim_start();
    let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &value[1..];
    let label = &value[..value.find(quote)?];
    Encoding::for_label(label.as_bytes())
}

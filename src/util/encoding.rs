/*!
 Contains logic for decoding raw document bytes and for reinterpreting
 already-decoded text when an XML declaration names a different encoding.
*/

use encoding_rs::{Encoding, UTF_8};

/// Decode a raw document into text, honoring a BOM if one is present
///
/// Without a BOM the input is treated as UTF-8; malformed sequences are
/// replaced rather than rejected.
pub fn decode_input(bytes: &[u8]) -> String {
    let (text, _, _) = UTF_8.decode(bytes);
    text.into_owned()
}

/// Look up a declared encoding label in the encoding registry
///
/// Returns `None` for labels the registry does not know, in which case the
/// declaration is ignored.
pub fn lookup(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Re-decode text under a newly declared encoding
///
/// The text has already been interpreted once, so its raw bytes are run back
/// through the new encoding's decoder without BOM handling.
pub fn reinterpret(text: &str, encoding: &'static Encoding) -> String {
    let (decoded, _) = encoding.decode_without_bom_handling(text.as_bytes());
    decoded.into_owned()
}

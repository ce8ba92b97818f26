/*!
 Contains logic and data structures used to parse XML property list documents
 into native Rust values.

 ## Overview

 The XML property list format wraps a single typed value tree in a `<plist>`
 element. Parsing is a single forward pass: the
 [`StreamScanner`](scanner::StreamScanner) classifies the text into lexical
 events, the [`TreeBuilder`](builder::TreeBuilder) folds those events into a
 tree of [`Element`](models::Element)s with an explicit stack, and the
 completed root converts itself into a [`Value`](models::Value).

 ## Features

 - Pure Rust implementation with no dependency on Apple frameworks
 - Mid-document encoding reinterpretation from the XML declaration
 - Robust error handling for malformed, truncated, or mistyped documents
*/

pub mod builder;
pub mod models;
pub mod registry;
pub mod scanner;
mod tests;

use crate::{
    error::plist::PlistError,
    stream::{builder::TreeBuilder, scanner::StreamScanner},
    util::encoding,
};

pub use models::{PayloadTransform, Value};

/// The transform used by [`parse`]: declines every payload, so `<data>`
/// elements keep their raw decoded bytes
fn keep_raw_bytes(_: &[u8]) -> Option<Value> {
    None
}

/// Parse a property list document into its root value
///
/// Returns `Ok(None)` only for a document whose `<plist>` wrapper is empty.
///
/// # Example
///
/// ```
/// use plist_stream::{parse, Value};
///
/// let document = "<plist><dict><key>name</key><string>plist</string></dict></plist>";
/// let Some(Value::Dictionary(settings)) = parse(document).unwrap() else {
///     panic!("expected a dictionary root");
/// };
/// assert_eq!(
///     settings.get("name"),
///     Some(&Value::String("plist".to_string()))
/// );
/// ```
pub fn parse(input: &str) -> Result<Option<Value>, PlistError> {
    parse_with_transform(input, keep_raw_bytes)
}

/// Parse a property list document, applying `transform` to every decoded
/// `<data>` payload
///
/// A payload the transform declines is not an error; its raw bytes are kept
/// as [`Value::Data`].
pub fn parse_with_transform(
    input: &str,
    transform: PayloadTransform,
) -> Result<Option<Value>, PlistError> {
    let mut scanner = StreamScanner::new(input);
    let mut builder = TreeBuilder::new();
    while let Some(event) = scanner.next_event()? {
        builder.handle(event, scanner.position())?;
    }
    builder.finish()?.into_value(transform)
}

/// Parse a raw property list document, sniffing a leading BOM to pick the
/// initial text encoding
pub fn parse_bytes(bytes: &[u8]) -> Result<Option<Value>, PlistError> {
    parse(&encoding::decode_input(bytes))
}

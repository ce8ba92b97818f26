/*!
 Errors that can happen when parsing XML property list data.
*/

use std::fmt::{Display, Formatter, Result};

/// Errors that can happen when parsing XML property list data
#[derive(Debug, PartialEq, Eq)]
pub enum PlistError {
    /// A start or end tag used a name outside of the plist vocabulary
    UnknownTag(String),
    /// The scanner could not classify the text at the given byte offset
    MalformedDocument(usize),
    /// The input ended while one or more elements were still open
    UnterminatedDocument,
    /// A `dict` element had an odd number of children; carries the child count
    MalformedDict(usize),
    /// A scalar element's text could not be parsed as its declared type
    UnsupportedScalar(&'static str, String),
}

impl Display for PlistError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            PlistError::UnknownTag(name) => write!(fmt, "Unknown plist tag: {name}"),
            PlistError::MalformedDocument(offset) => {
                write!(fmt, "Unrecognized content at byte offset {offset:x}")
            }
            PlistError::UnterminatedDocument => {
                write!(fmt, "Document ended with unclosed elements!")
            }
            PlistError::MalformedDict(count) => {
                write!(fmt, "Dict has an odd number of children: {count}")
            }
            PlistError::UnsupportedScalar(kind, text) => {
                write!(fmt, "Cannot parse {text:?} as {kind}")
            }
        }
    }
}

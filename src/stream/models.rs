/*!
 Data structures used to represent a parsed property list document and the
 native values it converts into.
*/

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::{error::plist::PlistError, util::dates::parse_plist_date};

/// The payload transform applied to decoded `<data>` bytes
///
/// Property lists embed opaque serialized payloads whose format the parser
/// does not own. A transform that recognizes the payload returns its value;
/// one that declines returns `None`, and the raw bytes are kept as
/// [`Value::Data`] instead.
pub type PayloadTransform = fn(&[u8]) -> Option<Value>;

/// Element variants recognized in a property list document, one per
/// registered tag name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Document root wrapper
    Plist,
    /// Ordered key/value pairs
    Dict,
    /// A dict key
    Key,
    /// Text scalar
    String,
    /// Ordered list
    Array,
    /// Signed integer scalar
    Integer,
    /// Floating-point scalar
    Real,
    /// Boolean literal
    True,
    /// Boolean literal
    False,
    /// Timestamp scalar
    Date,
    /// Base64-encoded binary payload
    Data,
}

/// One element of the parsed document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// The variant this element was resolved to
    pub tag: Tag,
    /// Raw character data collected between the start and end tags
    ///
    /// `None` when the element is self-closing or contains only child elements.
    pub text: Option<String>,
    /// Nested elements collected while this element was the top of the open stack
    pub children: Vec<Element>,
}

/// Native values produced by converting a completed element tree
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Unescaped text from a `string` or `key` element
    String(String),
    /// A signed integer
    Integer(i64),
    /// A floating-point number
    Real(f64),
    /// A boolean literal
    Boolean(bool),
    /// A timestamp
    Date(DateTime<Utc>),
    /// Raw decoded bytes of a `data` element the payload transform declined
    Data(Vec<u8>),
    /// An ordered list
    Array(Vec<Value>),
    /// An insertion-ordered mapping; duplicate keys keep their first
    /// position with the last value written
    Dictionary(IndexMap<String, Value>),
}

impl Value {
    /// For [`Value::Data`], a seekable reader over the raw decoded bytes
    pub fn as_reader(&self) -> Option<Cursor<&[u8]>> {
        match self {
            Value::Data(bytes) => Some(Cursor::new(bytes.as_slice())),
            _ => None,
        }
    }
}

impl Element {
    pub(crate) fn new(tag: Tag) -> Self {
        Self {
            tag,
            text: None,
            children: vec![],
        }
    }

    /// Append one run of character data; the scanner may deliver the text
    /// between two tags in several runs
    pub(crate) fn append_text(&mut self, contents: &str) {
        self.text.get_or_insert_with(String::new).push_str(contents);
    }

    /// Convert a completed element into its native value
    ///
    /// Called once on the document root after the full tree is built; recurses
    /// into children. Only the root `plist` wrapper can produce `None`, when it
    /// has no children at all.
    pub fn into_value(self, transform: PayloadTransform) -> Result<Option<Value>, PlistError> {
        match self.tag {
            Tag::Plist => match self.children.into_iter().next() {
                Some(child) => child.into_value(transform),
                None => Ok(None),
            },
            Tag::Dict => {
                if self.children.len() % 2 != 0 {
                    return Err(PlistError::MalformedDict(self.children.len()));
                }
                let mut map = IndexMap::with_capacity(self.children.len() / 2);
                let mut children = self.children.into_iter();
                while let (Some(key), Some(value)) = (children.next(), children.next()) {
                    let key = unescape(&key.text.unwrap_or_default());
                    if let Some(value) = value.into_value(transform)? {
                        map.insert(key, value);
                    }
                }
                Ok(Some(Value::Dictionary(map)))
            }
            Tag::Key | Tag::String => Ok(Some(Value::String(unescape(
                &self.text.unwrap_or_default(),
            )))),
            Tag::Array => {
                let mut items = Vec::with_capacity(self.children.len());
                for child in self.children {
                    if let Some(value) = child.into_value(transform)? {
                        items.push(value);
                    }
                }
                Ok(Some(Value::Array(items)))
            }
            Tag::Integer => {
                let text = self.text.unwrap_or_default();
                let trimmed = text.trim();
                trimmed
                    .parse::<i64>()
                    .map(|value| Some(Value::Integer(value)))
                    .map_err(|_| PlistError::UnsupportedScalar("integer", trimmed.to_string()))
            }
            Tag::Real => {
                let text = self.text.unwrap_or_default();
                let trimmed = text.trim();
                trimmed
                    .parse::<f64>()
                    .map(|value| Some(Value::Real(value)))
                    .map_err(|_| PlistError::UnsupportedScalar("real", trimmed.to_string()))
            }
            // Any text inside a boolean literal is ignored
            Tag::True => Ok(Some(Value::Boolean(true))),
            Tag::False => Ok(Some(Value::Boolean(false))),
            Tag::Date => {
                let text = self.text.unwrap_or_default();
                parse_plist_date(text.trim()).map(|date| Some(Value::Date(date)))
            }
            Tag::Data => {
                let text: String = self
                    .text
                    .unwrap_or_default()
                    .split_whitespace()
                    .collect();
                let bytes = STANDARD
                    .decode(text.as_bytes())
                    .map_err(|_| PlistError::UnsupportedScalar("data", text))?;
                Ok(Some(match transform(&bytes) {
                    Some(value) => value,
                    None => Value::Data(bytes),
                }))
            }
        }
    }
}

/// Expand the five predefined XML entities and numeric character references
///
/// Unrecognized references are left verbatim; there is no general entity
/// expansion.
pub(crate) fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let reference = &rest[start..];
        let Some(end) = reference.find(';') else {
            // A bare ampersand with no terminator
            out.push_str(reference);
            return out;
        };
        if reference[1..end].contains('&') {
            // This ampersand does not begin a reference
            out.push('&');
            rest = &reference[1..];
            continue;
        }
        match &reference[1..end] {
            "amp" => out.push('&'),
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "quot" => out.push('"'),
            "apos" => out.push('\''),
            entity => match numeric_reference(entity) {
                Some(character) => out.push(character),
                None => out.push_str(&reference[..=end]),
            },
        }
        rest = &reference[end + 1..];
    }
    out.push_str(rest);
    out
}

/// Decode a `#NN` or `#xNN` character reference body
fn numeric_reference(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

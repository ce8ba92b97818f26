/*!
 Contains logic to scan an XML property list document into a flat stream of
 lexical events.

 The scanner owns a text buffer and a cursor. At every cursor position it
 classifies the next lexical unit in a strict priority order: comment, XML
 declaration, doctype, start tag, text run, end tag. It knows nothing about
 nesting; all structural interpretation happens in the
 [`TreeBuilder`](crate::stream::builder::TreeBuilder).
*/

use encoding_rs::{Encoding, UTF_8};
use log::{debug, warn};

use crate::{error::plist::PlistError, util::encoding};

/// Lexical events produced while scanning the document text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An element's start tag was consumed; carries the element name
    TagStart(String),
    /// A run of character data between tags
    Text(String),
    /// An element's end tag was consumed; carries the element name
    TagEnd(String),
}

/// Scans a property list document into [`Event`]s
#[derive(Debug)]
pub struct StreamScanner {
    /// The document text being scanned
    ///
    /// Replaced wholesale when an XML declaration names a different encoding:
    /// the remaining unscanned text is re-decoded and the cursor restarts at
    /// the head of the new buffer.
    text: String,
    /// Byte offset of the scan cursor within `text`
    idx: usize,
    /// Bytes consumed before the buffer was last re-decoded, so reported
    /// offsets stay anchored to the start of the document
    base: usize,
    /// The encoding the buffer is currently interpreted under
    encoding: &'static Encoding,
    /// Holds the synthesized end event of a self-closing tag
    pending: Option<Event>,
}

impl StreamScanner {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            idx: 0,
            base: 0,
            encoding: UTF_8,
            pending: None,
        }
    }

    /// Byte offset of the cursor from the start of the document
    ///
    /// After an encoding switch this is the bytes consumed before the switch
    /// plus the cursor position in the re-decoded buffer.
    pub fn position(&self) -> usize {
        self.base + self.idx
    }

    /// Classify and consume the next lexical unit, producing its event
    ///
    /// Comments, XML declarations, and doctypes are consumed silently, so a
    /// single call may advance past several of them before an event is
    /// available. Returns `None` once the input is exhausted.
    pub fn next_event(&mut self) -> Result<Option<Event>, PlistError> {
        if let Some(event) = self.pending.take() {
            return Ok(Some(event));
        }
        loop {
            if self.idx >= self.text.len() {
                return Ok(None);
            }
            let rest = &self.text[self.idx..];
            if let Some(body) = rest.strip_prefix("<!--") {
                match body.find("-->") {
                    Some(end) => {
                        self.idx += "<!--".len() + end + "-->".len();
                        continue;
                    }
                    None => return Err(PlistError::MalformedDocument(self.position())),
                }
            }
            if let Some(body) = rest.strip_prefix("<?xml") {
                let Some(end) = body.find("?>") else {
                    return Err(PlistError::MalformedDocument(self.position()));
                };
                let label = declared_encoding(&body[..end]).map(str::to_string);
                self.idx += "<?xml".len() + end + "?>".len();
                if let Some(label) = label {
                    self.switch_encoding(&label);
                }
                continue;
            }
            if rest.starts_with("<!DOCTYPE") {
                match rest.find('>') {
                    Some(end) => {
                        self.idx += end + 1;
                        continue;
                    }
                    None => return Err(PlistError::MalformedDocument(self.position())),
                }
            }
            if let Some((event, consumed)) = scan_start_tag(rest) {
                self.idx += consumed;
                if let Event::TagStart(name) = &event {
                    if rest[..consumed].ends_with("/>") {
                        self.pending = Some(Event::TagEnd(name.clone()));
                    }
                }
                return Ok(Some(event));
            }
            if !rest.starts_with('<') {
                let end = rest.find('<').unwrap_or(rest.len());
                let contents = rest[..end].to_string();
                self.idx += end;
                return Ok(Some(Event::Text(contents)));
            }
            if let Some((event, consumed)) = scan_end_tag(rest) {
                self.idx += consumed;
                return Ok(Some(event));
            }
            return Err(PlistError::MalformedDocument(self.position()));
        }
    }

    /// Reinterpret the remaining unscanned text under a newly declared encoding
    ///
    /// Text already scanned is unaffected. An unresolvable label is ignored; a
    /// later declaration simply overwrites the choice again.
    fn switch_encoding(&mut self, label: &str) {
        match encoding::lookup(label) {
            Some(declared) if declared != self.encoding => {
                debug!("Reinterpreting remaining input as {}", declared.name());
                self.text = encoding::reinterpret(&self.text[self.idx..], declared);
                self.base += self.idx;
                self.idx = 0;
                self.encoding = declared;
            }
            Some(_) => {}
            None => warn!("Ignoring unknown encoding label: {label}"),
        }
    }
}

/// Extract the value of an `encoding="…"` or `encoding='…'` attribute from
/// the body of an XML declaration
fn declared_encoding(declaration: &str) -> Option<&str> {
    let at = declaration.find("encoding")?;
    let rest = declaration[at + "encoding".len()..].trim_start();
    let rest = rest.strip_prefix('=')?.trim_start();
    let quote = rest.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let body = &rest[1..];
    Some(&body[..body.find(quote)?])
}

/// Match `<name …>` or `<name …/>` at the head of the input, returning the
/// event and the number of bytes consumed
fn scan_start_tag(rest: &str) -> Option<(Event, usize)> {
    let body = rest.strip_prefix('<')?;
    let name_end = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.'))
        .unwrap_or(body.len());
    if name_end == 0 {
        return None;
    }
    let after = body[name_end..].chars().next()?;
    if after != '>' && after != '/' && !after.is_whitespace() {
        return None;
    }
    // Attributes are skipped without inspection, but a ">" inside a quoted
    // attribute value must not close the tag
    let close = find_tag_close(body)?;
    let name = body[..name_end].to_string();
    Some((Event::TagStart(name), 1 + close + 1))
}

/// Find the byte offset of the `>` closing a start tag, ignoring any `>`
/// inside quoted attribute values
fn find_tag_close(body: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (at, character) in body.char_indices() {
        match quote {
            Some(opened) if character == opened => quote = None,
            Some(_) => {}
            None => match character {
                '"' | '\'' => quote = Some(character),
                '>' => return Some(at),
                _ => {}
            },
        }
    }
    None
}

/// Match `</name>` at the head of the input, returning the event and the
/// number of bytes consumed
fn scan_end_tag(rest: &str) -> Option<(Event, usize)> {
    let body = rest.strip_prefix("</")?;
    let close = body.find('>')?;
    let name = body[..close].trim();
    if name.is_empty() || name.contains(|c: char| c.is_whitespace()) {
        return None;
    }
    Some((Event::TagEnd(name.to_string()), 2 + close + 1))
}

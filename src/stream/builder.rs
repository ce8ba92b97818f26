/*!
 Contains logic to assemble the element tree from the scanner's flat event
 stream.

 The builder keeps an explicit stack of open elements. A start tag pushes a
 fresh element, text accumulates on the top of the stack, and an end tag pops
 the top and moves it into its parent's children. When the last open element
 closes, it becomes the document result.
*/

use crate::{
    error::plist::PlistError,
    stream::{models::Element, registry, scanner::Event},
};

/// Listens to scanner events and maintains the stack of open elements
#[derive(Debug, Default)]
pub struct TreeBuilder {
    /// Elements whose start tag has been seen but whose end tag has not
    stack: Vec<Element>,
    /// The completed document root, set once the stack empties
    result: Option<Element>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch one scanner event
    ///
    /// `offset` is the scan cursor position, used to report where a stray end
    /// tag was found. Events arriving after the document has closed are
    /// ignored.
    pub fn handle(&mut self, event: Event, offset: usize) -> Result<(), PlistError> {
        if self.result.is_some() {
            return Ok(());
        }
        match event {
            Event::TagStart(name) => self.tag_start(&name),
            Event::Text(contents) => {
                self.text(&contents);
                Ok(())
            }
            Event::TagEnd(name) => self.tag_end(&name, offset),
        }
    }

    fn tag_start(&mut self, name: &str) -> Result<(), PlistError> {
        let tag = registry::resolve(name)?;
        self.stack.push(Element::new(tag));
        Ok(())
    }

    fn text(&mut self, contents: &str) {
        // Text outside of any open element is ignorable whitespace
        if let Some(top) = self.stack.last_mut() {
            top.append_text(contents);
        }
    }

    /// Close the element on top of the stack
    ///
    /// The closing name is resolved against the registry but not cross-checked
    /// against the popped element's variant; a mismatched pair closes whichever
    /// element is currently open.
    fn tag_end(&mut self, name: &str, offset: usize) -> Result<(), PlistError> {
        registry::resolve(name)?;
        let Some(element) = self.stack.pop() else {
            return Err(PlistError::MalformedDocument(offset));
        };
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None => self.result = Some(element),
        }
        Ok(())
    }

    /// Consume the builder, yielding the completed document root
    ///
    /// Fails with [`PlistError::UnterminatedDocument`] when elements are still
    /// open, or when the input never produced a root at all.
    pub fn finish(self) -> Result<Element, PlistError> {
        if !self.stack.is_empty() {
            return Err(PlistError::UnterminatedDocument);
        }
        self.result.ok_or(PlistError::UnterminatedDocument)
    }
}

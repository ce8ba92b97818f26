/*!
 The registry mapping recognized plist element names to their node variants.

 The mapping is populated exactly once, before the first parse, and is
 read-only afterwards, so concurrent parses can share it without locking.
*/

use std::{collections::HashMap, sync::OnceLock};

use crate::{error::plist::PlistError, stream::models::Tag};

static REGISTRY: OnceLock<HashMap<&'static str, Tag>> = OnceLock::new();

fn registry() -> &'static HashMap<&'static str, Tag> {
    REGISTRY.get_or_init(|| {
        HashMap::from([
            ("plist", Tag::Plist),
            ("dict", Tag::Dict),
            ("key", Tag::Key),
            ("string", Tag::String),
            ("array", Tag::Array),
            ("integer", Tag::Integer),
            ("real", Tag::Real),
            ("true", Tag::True),
            ("false", Tag::False),
            ("date", Tag::Date),
            ("data", Tag::Data),
        ])
    })
}

/// Resolve an element name to its variant
///
/// Names are matched case-insensitively; unregistered names fail with
/// [`PlistError::UnknownTag`].
pub fn resolve(name: &str) -> Result<Tag, PlistError> {
    registry()
        .get(name.to_ascii_lowercase().as_str())
        .copied()
        .ok_or_else(|| PlistError::UnknownTag(name.to_string()))
}

/// Every registered element name
pub fn all_names() -> Vec<&'static str> {
    registry().keys().copied().collect()
}

/*!
 Contains logic for parsing the timestamp format used by plist `<date>` elements.
*/

use chrono::{DateTime, Utc};

use crate::error::plist::PlistError;

/// Parse an ISO-8601 timestamp like `2024-01-05T12:30:00Z` into a [`DateTime<Utc>`]
///
/// There is no fallback for unparsable text; the caller receives the error.
pub fn parse_plist_date(text: &str) -> Result<DateTime<Utc>, PlistError> {
    DateTime::parse_from_rfc3339(text)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|_| PlistError::UnsupportedScalar("date", text.to_string()))
}

/*!
 This module defines common utilities used across the parser.
*/

pub mod dates;
pub mod encoding;

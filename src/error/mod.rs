/*!
 This module contains types of errors that can happen when parsing plist data.
*/

pub mod plist;

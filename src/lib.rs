#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod error;
pub mod stream;
pub mod util;

pub use stream::models::Value;
pub use stream::{parse, parse_bytes, parse_with_transform, PayloadTransform};

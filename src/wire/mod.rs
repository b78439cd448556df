//! Protocol buffer codec for `Survey` and `Surveys` messages.
//!
//! Encoding and decoding are driven by [`schema::SURVEY_SCHEMA`], a table of
//! field number, attribute name and kind. Unknown fields are skipped on
//! decode; default-valued fields are omitted on encode.

pub mod codec;
pub mod error;
pub mod schema;
mod survey;

pub use error::DecodeError;
pub use survey::{decode_survey, decode_surveys, encode_survey, encode_surveys};

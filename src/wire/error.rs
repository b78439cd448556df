use thiserror::Error;

use super::codec::WireType;

/// Reasons a wire buffer is rejected. Decoding is all-or-nothing: any of these
/// aborts the whole call.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("unexpected end of buffer at offset {offset}")]
    UnexpectedEof { offset: usize },
    #[error("varint at offset {offset} is longer than 10 bytes")]
    VarintOverflow { offset: usize },
    #[error("invalid wire type {wire_type} at offset {offset}")]
    InvalidWireType { wire_type: u8, offset: usize },
    #[error("invalid field number {number} at offset {offset}")]
    InvalidFieldNumber { number: u64, offset: usize },
    #[error("field {field} ({name}) expects {expected:?}, found {found:?}")]
    WireTypeMismatch {
        field: u32,
        name: &'static str,
        expected: WireType,
        found: WireType,
    },
    #[error("field {field} holds invalid UTF-8")]
    InvalidUtf8 { field: u32 },
    #[error("group {field} is not terminated")]
    UnterminatedGroup { field: u32 },
    #[error("end of group {field} without a matching start")]
    UnexpectedEndGroup { field: u32 },
    #[error("group {field} nested deeper than {limit} levels")]
    RecursionLimitExceeded { field: u32, limit: u32 },
}

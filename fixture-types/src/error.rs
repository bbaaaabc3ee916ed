use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("price {0} is outside [1, 9999]")]
    Price(u64),
    #[error("quantity {0} is outside [1, 99]")]
    Quantity(u64),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty record")]
    Empty,
    #[error("unknown side `{0}`")]
    UnknownSide(String),
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("invalid `{field}`: {source}")]
    InvalidNumber {
        field: &'static str,
        #[source]
        source: ParseIntError,
    },
    #[error("`{field}` must be plain decimal digits, found `{value}`")]
    NotDecimal { field: &'static str, value: String },
    #[error("unexpected trailing field `{0}`")]
    TrailingField(String),
    #[error(transparent)]
    Range(#[from] RangeError),
}

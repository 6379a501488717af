use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EccError {
    #[error("attempted to divide by the zero field element")]
    InvalidOperand,
    #[error("invalid encoding: {0}")]
    InvalidEncoding(&'static str),
    #[error("private key is not in the range [1, n-1]")]
    InvalidKey,
    #[error("cannot recode scalar: {0}")]
    InvalidRecoding(&'static str),
    #[error("invalid hex string: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

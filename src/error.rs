//! Error types for JSON encoding.
//!
//! Every failure is fatal for the whole encode: the engine unwinds, releases
//! every open node context and reports the error without any partial output.
//!
//! ## Error Categories
//!
//! - **Invalid types**: no classifier rule or fallback could place a value
//! - **Overflow**: an integer or duration does not fit a signed 64-bit integer
//! - **Conversion failures**: a scalar converter could not produce output
//! - **Label mismatches**: an axis label array does not match the data shape
//! - **Resource limits**: allocation failures and the recursion ceiling
//!
//! ## Examples
//!
//! ```rust
//! use num_bigint::BigInt;
//! use objson::{to_string, Error, Value};
//!
//! let huge = Value::BigInt(BigInt::from(u64::MAX));
//! let err = to_string(&huge).unwrap_err();
//! assert!(matches!(err, Error::Overflow(_)));
//! ```

use std::collections::TryReserveError;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding a value.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error while writing the finished document
    #[error("IO error: {0}")]
    Io(String),

    /// No classifier rule applied and no fallback succeeded
    #[error("Unsupported type: {0}")]
    InvalidType(String),

    /// Integer or duration does not fit the target width
    #[error("Overflow: {0}")]
    Overflow(String),

    /// A scalar converter failed
    #[error("Conversion failed: {0}")]
    Conversion(String),

    /// Axis labels do not match the corresponding data extent
    #[error("Label array sizes do not match corresponding data shape: expected {expected}, found {found}")]
    LabelMismatch { expected: usize, found: usize },

    /// Scratch or output buffer allocation failed
    #[error("Out of memory: {0}")]
    Allocation(String),

    /// Nesting exceeded the configured ceiling
    #[error("Maximum recursion level reached (limit {max})")]
    RecursionLimit { max: usize },

    /// An option was given a value outside its domain
    #[error("Invalid value '{value}' for option '{option}'")]
    InvalidOption { option: String, value: String },

    /// A host array was constructed with inconsistent dimensions
    #[error("Invalid array shape: {0}")]
    Shape(String),

    /// Custom error, typically raised by a default handler
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an invalid type error for values no rule can encode.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use objson::Error;
    ///
    /// let err = Error::invalid_type("callable");
    /// assert!(err.to_string().contains("callable"));
    /// ```
    pub fn invalid_type(msg: &str) -> Self {
        Error::InvalidType(msg.to_string())
    }

    /// Creates an overflow error.
    pub fn overflow(msg: &str) -> Self {
        Error::Overflow(msg.to_string())
    }

    /// Creates a conversion error tagged with a descriptive message.
    pub fn conversion(msg: &str) -> Self {
        Error::Conversion(msg.to_string())
    }

    /// Creates a label mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use objson::Error;
    ///
    /// let err = Error::label_mismatch(3, 2);
    /// assert!(err.to_string().contains("expected 3, found 2"));
    /// ```
    pub fn label_mismatch(expected: usize, found: usize) -> Self {
        Error::LabelMismatch { expected, found }
    }

    /// Creates a recursion limit error.
    pub fn recursion_limit(max: usize) -> Self {
        Error::RecursionLimit { max }
    }

    /// Creates an invalid option error.
    pub fn invalid_option(option: &str, value: impl fmt::Display) -> Self {
        Error::InvalidOption {
            option: option.to_string(),
            value: value.to_string(),
        }
    }

    /// Creates an array shape error.
    pub fn shape(msg: &str) -> Self {
        Error::Shape(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use objson::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Self {
        Error::Allocation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

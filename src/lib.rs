//! # objson
//!
//! A JSON encoder for dynamic host values, strided numeric arrays and
//! labeled tables.
//!
//! ## What does it encode?
//!
//! [`Value`] models the runtime values of a dynamically typed host: scalars,
//! dates and durations, lists, tuples, sets, insertion-ordered dictionaries,
//! n-dimensional numeric arrays, one-axis labeled series and two-axis data
//! frames. Values that fit none of these are reached through the
//! [`HostObject`] capability trait, or through a default handler.
//!
//! ## Key Features
//!
//! - **No intermediate tree**: values are classified and written in one pass
//! - **Strided arrays**: n-dimensional arrays are walked in place, transposed
//!   views included, without copying their data
//! - **Five tabular orientations**: `split`, `records`, `index`, `columns`
//!   and `values`
//! - **Bounded recursion**: a configurable nesting ceiling
//! - **No partial output**: any failure aborts the whole document
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! objson = "0.1"
//! ```
//!
//! ### Basic Encoding
//!
//! ```rust
//! use objson::{to_string, value};
//!
//! let nan = f64::NAN;
//! let data = value!({"a": [1, 2, nan], "b": null});
//! assert_eq!(to_string(&data).unwrap(), r#"{"a":[1,2,null],"b":null}"#);
//! ```
//!
//! ### Working with Tables
//!
//! ```rust
//! use objson::{to_string_with_options, DataFrame, EncodeOptions, Index, NdArray, Orient, Value};
//!
//! let frame = DataFrame::new(NdArray::from_rows(vec![vec![1i64, 2, 3], vec![4, 5, 6]]).unwrap())
//!     .unwrap()
//!     .with_index(Index::new(vec![Value::from("r0"), Value::from("r1")]))
//!     .with_columns(Index::new(vec![Value::from("c0"), Value::from("c1"), Value::from("c2")]));
//!
//! let options = EncodeOptions::new().with_orient(Orient::Index);
//! let json = to_string_with_options(&Value::from(frame), options).unwrap();
//! assert_eq!(json, r#"{"r0":{"c0":1,"c1":2,"c2":3},"r1":{"c0":4,"c1":5,"c2":6}}"#);
//! ```
//!
//! ## Lossy Policies
//!
//! - NaN and infinities encode as `null`
//! - Decimals encode as doubles
//! - Byte strings are re-encoded to UTF-8, replacing invalid sequences
//!
//! ## Logging
//!
//! Diagnostics are emitted through [`tracing`]; no subscriber is installed.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Encoding nested host values
//! - **`tabular.rs`** - One table in every orientation
//!
//! Run any example with: `cargo run --example <name>`

pub mod array;
mod classify;
pub mod convert;
pub mod error;
pub mod frame;
pub mod iter;
pub mod labels;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod traverse;
pub mod value;
pub mod writer;

pub use array::{ArrayData, DType, NdArray};
pub use error::{Error, Result};
pub use frame::{DataFrame, Index, Series};
pub use map::{Dict, Key};
pub use options::{DateUnit, DefaultHandler, EncodeOptions, Orient, MAX_DOUBLE_PRECISION};
pub use ser::Encoder;
pub use value::{Datetime64, Decimal, HostObject, Numeric, Value, NAT};
pub use writer::format_double;

use std::borrow::Cow;
use std::io;

/// Encode a value to a JSON string with default options.
///
/// # Examples
///
/// ```rust
/// use objson::{to_string, value};
///
/// let json = to_string(&value!({"x": 1, "y": 2})).unwrap();
/// assert_eq!(json, r#"{"x":1,"y":2}"#);
/// ```
///
/// # Errors
///
/// Returns an error if any node cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(value: &Value) -> Result<String> {
    to_string_with_options(value, EncodeOptions::default())
}

/// Encode a value to a JSON string with custom options.
///
/// # Examples
///
/// ```rust
/// use objson::{to_string_with_options, EncodeOptions, Value};
///
/// let options = EncodeOptions::new().with_ensure_ascii(false);
/// let json = to_string_with_options(&Value::from("café"), options).unwrap();
/// assert_eq!(json, "\"café\"");
/// ```
///
/// # Errors
///
/// Returns an error for invalid options or if any node cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(value: &Value, options: EncodeOptions) -> Result<String> {
    let mut encoder = Encoder::new(options)?;
    encoder.encode(value)?;
    encoder.into_string()
}

/// Encode a value to JSON bytes with custom options.
///
/// # Errors
///
/// Returns an error for invalid options or if any node cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec_with_options(value: &Value, options: EncodeOptions) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(options)?;
    encoder.encode(value)?;
    Ok(encoder.into_bytes())
}

/// Encode a value into a caller-supplied buffer.
///
/// The result borrows `buf` when the document fits, and is an owned,
/// larger buffer otherwise.
///
/// # Examples
///
/// ```rust
/// use objson::{to_buffer, value, EncodeOptions};
/// use std::borrow::Cow;
///
/// let mut buf = [0u8; 8];
/// let small = to_buffer(&value!([1, 2]), EncodeOptions::new(), &mut buf).unwrap();
/// assert!(matches!(small, Cow::Borrowed(b"[1,2]")));
///
/// let mut buf = [0u8; 8];
/// let large = to_buffer(&value!(["a long string"]), EncodeOptions::new(), &mut buf).unwrap();
/// assert!(matches!(large, Cow::Owned(_)));
/// ```
///
/// # Errors
///
/// Returns an error for invalid options or if any node cannot be encoded.
pub fn to_buffer<'b>(
    value: &Value,
    options: EncodeOptions,
    buf: &'b mut [u8],
) -> Result<Cow<'b, [u8]>> {
    let mut encoder = Encoder::with_buffer(options, buf)?;
    encoder.encode(value)?;
    Ok(encoder.into_output())
}

/// Encode a value as JSON into a writer.
///
/// # Examples
///
/// ```rust
/// use objson::{to_writer, value};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &value!([true])).unwrap();
/// assert_eq!(buffer, b"[true]");
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, value: &Value) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, value, EncodeOptions::default())
}

/// Encode a value as JSON into a writer with custom options.
///
/// Nothing is written unless encoding succeeds.
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(mut writer: W, value: &Value, options: EncodeOptions) -> Result<()>
where
    W: io::Write,
{
    let bytes = to_vec_with_options(value, options)?;
    writer
        .write_all(&bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

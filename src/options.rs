//! Configuration options for JSON encoding.
//!
//! This module provides types to customize the encoder output:
//!
//! - [`EncodeOptions`]: Main configuration struct
//! - [`Orient`]: Shape used for series and data frames
//! - [`DateUnit`]: Granularity of epoch-based date output
//!
//! Options are immutable for the duration of one encode call.
//!
//! ## Examples
//!
//! ```rust
//! use objson::{to_string_with_options, value, EncodeOptions, Orient};
//!
//! let options = EncodeOptions::new()
//!     .with_orient(Orient::Records)
//!     .with_double_precision(3);
//!
//! let json = to_string_with_options(&value!([1.23456]), options).unwrap();
//! assert_eq!(json, "[1.235]");
//! ```

use crate::{Error, Result, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Largest accepted value for [`EncodeOptions::double_precision`].
pub const MAX_DOUBLE_PRECISION: usize = 15;

/// Default nesting ceiling.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Callback invoked on values no classifier rule can place.
///
/// The returned value is encoded in place of the original one.
pub type DefaultHandler = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// Output shape for one-axis labeled sequences and two-axis tables.
///
/// | orientation | shape produced |
/// |---|---|
/// | `split` | object with `columns`, `index` and `data` |
/// | `records` | array of per-row objects keyed by column label |
/// | `index` | object keyed by row label, values keyed by column label |
/// | `columns` | object keyed by column label, values keyed by row label |
/// | `values` | bare nested array, no labels |
///
/// # Examples
///
/// ```rust
/// use objson::Orient;
///
/// assert_eq!("records".parse::<Orient>().unwrap(), Orient::Records);
/// assert_eq!(Orient::default().as_str(), "columns");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orient {
    Split,
    Records,
    Index,
    #[default]
    Columns,
    Values,
}

impl Orient {
    /// Returns the option string for this orientation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Orient::Split => "split",
            Orient::Records => "records",
            Orient::Index => "index",
            Orient::Columns => "columns",
            Orient::Values => "values",
        }
    }
}

impl FromStr for Orient {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "split" => Ok(Orient::Split),
            "records" => Ok(Orient::Records),
            "index" => Ok(Orient::Index),
            "columns" => Ok(Orient::Columns),
            "values" => Ok(Orient::Values),
            other => Err(Error::invalid_option("orient", other)),
        }
    }
}

impl fmt::Display for Orient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time unit for epoch-based date output and datetime64 storage.
///
/// # Examples
///
/// ```rust
/// use objson::DateUnit;
///
/// assert_eq!("us".parse::<DateUnit>().unwrap(), DateUnit::Micros);
/// assert_eq!(DateUnit::Nanos.per_second(), 1_000_000_000);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DateUnit {
    #[serde(rename = "s")]
    Seconds,
    #[default]
    #[serde(rename = "ms")]
    Millis,
    #[serde(rename = "us")]
    Micros,
    #[serde(rename = "ns")]
    Nanos,
}

impl DateUnit {
    /// Returns the option string for this unit.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DateUnit::Seconds => "s",
            DateUnit::Millis => "ms",
            DateUnit::Micros => "us",
            DateUnit::Nanos => "ns",
        }
    }

    /// Number of units in one second.
    #[must_use]
    pub const fn per_second(&self) -> i64 {
        match self {
            DateUnit::Seconds => 1,
            DateUnit::Millis => 1_000,
            DateUnit::Micros => 1_000_000,
            DateUnit::Nanos => 1_000_000_000,
        }
    }
}

impl FromStr for DateUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "s" => Ok(DateUnit::Seconds),
            "ms" => Ok(DateUnit::Millis),
            "us" => Ok(DateUnit::Micros),
            "ns" => Ok(DateUnit::Nanos),
            other => Err(Error::invalid_option("date_unit", other)),
        }
    }
}

impl fmt::Display for DateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration options for JSON encoding.
///
/// # Examples
///
/// ```rust
/// use objson::{DateUnit, EncodeOptions, Orient};
///
/// // Defaults: ASCII output, 10 digits, columns orientation, ms dates
/// let options = EncodeOptions::new();
/// assert!(options.ensure_ascii);
/// assert_eq!(options.double_precision, 10);
///
/// // Custom configuration
/// let options = EncodeOptions::new()
///     .with_orient(Orient::Split)
///     .with_date_unit(DateUnit::Seconds)
///     .with_iso_dates(true);
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    pub ensure_ascii: bool,
    pub double_precision: usize,
    pub encode_html_chars: bool,
    pub orient: Orient,
    pub date_unit: DateUnit,
    pub iso_dates: bool,
    pub max_depth: Option<usize>,
    #[serde(skip)]
    pub default_handler: Option<DefaultHandler>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            ensure_ascii: true,
            double_precision: 10,
            encode_html_chars: false,
            orient: Orient::default(),
            date_unit: DateUnit::default(),
            iso_dates: false,
            max_depth: Some(DEFAULT_MAX_DEPTH),
            default_handler: None,
        }
    }
}

impl fmt::Debug for EncodeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodeOptions")
            .field("ensure_ascii", &self.ensure_ascii)
            .field("double_precision", &self.double_precision)
            .field("encode_html_chars", &self.encode_html_chars)
            .field("orient", &self.orient)
            .field("date_unit", &self.date_unit)
            .field("iso_dates", &self.iso_dates)
            .field("max_depth", &self.max_depth)
            .field("default_handler", &self.default_handler.is_some())
            .finish()
    }
}

impl EncodeOptions {
    /// Creates default options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use objson::{EncodeOptions, Orient};
    ///
    /// let options = EncodeOptions::new();
    /// assert_eq!(options.orient, Orient::Columns);
    /// assert!(!options.iso_dates);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Escape every non-ASCII character as `\uXXXX` when `true`.
    #[must_use]
    pub fn with_ensure_ascii(mut self, ensure_ascii: bool) -> Self {
        self.ensure_ascii = ensure_ascii;
        self
    }

    /// Sets the number of digits written after the decimal point (0 to 15).
    ///
    /// Out-of-range values are rejected when encoding starts.
    #[must_use]
    pub fn with_double_precision(mut self, digits: usize) -> Self {
        self.double_precision = digits;
        self
    }

    /// Escape `<`, `>` and `&` when `true`.
    #[must_use]
    pub fn with_encode_html_chars(mut self, encode: bool) -> Self {
        self.encode_html_chars = encode;
        self
    }

    /// Sets the tabular orientation.
    #[must_use]
    pub fn with_orient(mut self, orient: Orient) -> Self {
        self.orient = orient;
        self
    }

    /// Sets the epoch granularity used when ISO dates are disabled.
    #[must_use]
    pub fn with_date_unit(mut self, unit: DateUnit) -> Self {
        self.date_unit = unit;
        self
    }

    /// Render dates as ISO-8601 strings instead of epoch integers.
    #[must_use]
    pub fn with_iso_dates(mut self, iso: bool) -> Self {
        self.iso_dates = iso;
        self
    }

    /// Sets the nesting ceiling; `None` disables the check.
    #[must_use]
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Installs a fallback for values the classifier cannot place.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use objson::{to_string_with_options, EncodeOptions, Value};
    ///
    /// let options = EncodeOptions::new()
    ///     .with_default_handler(|_: &Value| Ok(Value::from("opaque")));
    /// let json = to_string_with_options(&Value::Callable("f".into()), options).unwrap();
    /// assert_eq!(json, r#""opaque""#);
    /// ```
    #[must_use]
    pub fn with_default_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.default_handler = Some(Arc::new(handler));
        self
    }

    /// Checks option values that the builder cannot constrain statically.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] when `double_precision` exceeds
    /// [`MAX_DOUBLE_PRECISION`].
    pub fn validate(&self) -> Result<()> {
        if self.double_precision > MAX_DOUBLE_PRECISION {
            return Err(Error::invalid_option(
                "double_precision",
                format!("{} (max is {})", self.double_precision, MAX_DOUBLE_PRECISION),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orient_roundtrip_names() {
        for orient in [
            Orient::Split,
            Orient::Records,
            Orient::Index,
            Orient::Columns,
            Orient::Values,
        ] {
            assert_eq!(orient.as_str().parse::<Orient>().unwrap(), orient);
        }
        assert!(matches!(
            "table".parse::<Orient>(),
            Err(Error::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_date_unit_names() {
        assert_eq!("s".parse::<DateUnit>().unwrap(), DateUnit::Seconds);
        assert_eq!("ns".parse::<DateUnit>().unwrap(), DateUnit::Nanos);
        assert!("D".parse::<DateUnit>().is_err());
    }

    #[test]
    fn test_validate_precision() {
        assert!(EncodeOptions::new().with_double_precision(15).validate().is_ok());
        let err = EncodeOptions::new()
            .with_double_precision(16)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("double_precision"));
    }

    #[test]
    fn test_deserialize_from_json() {
        let options: EncodeOptions =
            serde_json::from_str(r#"{"orient":"index","date_unit":"ns","iso_dates":true}"#)
                .unwrap();
        assert_eq!(options.orient, Orient::Index);
        assert_eq!(options.date_unit, DateUnit::Nanos);
        assert!(options.iso_dates);
        assert!(options.ensure_ascii);
        assert_eq!(options.max_depth, Some(DEFAULT_MAX_DEPTH));
    }
}

//! Host value model.
//!
//! This module provides [`Value`], the closed set of runtime value kinds the
//! encoder knows how to classify, and [`HostObject`], the capability trait
//! for opaque objects that are only reachable through attribute lookup,
//! iteration or a dictionary-conversion method.
//!
//! ## Core Types
//!
//! - [`Value`]: scalars, date/time kinds, containers, numeric arrays and tables
//! - [`Numeric`]: scalars extracted from numeric arrays
//! - [`Decimal`]: arbitrary-precision decimals, encoded lossily as doubles
//! - [`Datetime64`]: an epoch count with its storage unit
//!
//! ## Usage Patterns
//!
//! ```rust
//! use objson::{value, Value};
//!
//! // From primitives
//! let flag = Value::from(true);
//! let number = Value::from(42);
//! let text = Value::from("hello");
//! assert!(number.is_int());
//!
//! // Using the value! macro
//! let obj = value!({
//!     "name": "Alice",
//!     "scores": [1, 2, 3]
//! });
//! assert!(obj.is_dict());
//! ```

use crate::{DataFrame, DateUnit, Dict, Error, Index, NdArray, Result, Series};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use num_bigint::BigInt;
use std::fmt;
use std::sync::Arc;

/// Sentinel used by [`Datetime64`] and [`Value::Timedelta64`] for "not a time".
pub const NAT: i64 = i64::MIN;

/// A runtime value from the host object model.
///
/// Each variant corresponds to one classifier rule. Values are never copied
/// by the encoder, only inspected.
///
/// # Examples
///
/// ```rust
/// use objson::{to_string, Value};
///
/// let list = Value::List(vec![Value::from(1), Value::None, Value::from(f64::NAN)]);
/// assert_eq!(to_string(&list).unwrap(), "[1,null,null]");
/// ```
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    /// Fixed-width integer.
    Int(i64),
    /// Arbitrary-precision integer; fails with overflow outside the i64 range.
    BigInt(BigInt),
    /// NaN and infinities encode as `null`.
    Float(f64),
    /// Byte string, re-encoded to UTF-8 lossily when needed.
    Bytes(Vec<u8>),
    Str(String),
    Decimal(Decimal),
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    /// The "not a time" sentinel.
    NaT,
    Time(NaiveTime),
    Datetime64(Datetime64),
    Timedelta(Duration),
    /// Nanosecond duration taken from a numeric array; [`NAT`] encodes as `null`.
    Timedelta64(i64),
    Numeric(Numeric),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(Vec<Value>),
    Dict(Dict),
    Array(NdArray),
    Index(Index),
    Series(Series),
    DataFrame(DataFrame),
    /// A callable member such as a bound method. Never encoded directly.
    Callable(String),
    Object(Arc<dyn HostObject>),
}

/// Capability interface for opaque host objects.
///
/// The encoder tries, in order: [`iter`](HostObject::iter) (encoded as an
/// array), [`to_dict`](HostObject::to_dict) (encoded as the returned
/// dictionary), the configured default handler, and finally attribute
/// reflection over [`dir`](HostObject::dir) and
/// [`getattr`](HostObject::getattr).
///
/// # Examples
///
/// ```rust
/// use objson::{to_string, HostObject, Value};
/// use std::sync::Arc;
///
/// #[derive(Debug)]
/// struct Point { x: i64, y: i64 }
///
/// impl HostObject for Point {
///     fn type_name(&self) -> &str { "Point" }
///     fn dir(&self) -> Vec<String> { vec!["x".into(), "y".into()] }
///     fn getattr(&self, name: &str) -> Option<Value> {
///         match name {
///             "x" => Some(Value::from(self.x)),
///             "y" => Some(Value::from(self.y)),
///             _ => None,
///         }
///     }
/// }
///
/// let point = Value::Object(Arc::new(Point { x: 1, y: 2 }));
/// assert_eq!(to_string(&point).unwrap(), r#"{"x":1,"y":2}"#);
/// ```
pub trait HostObject: fmt::Debug + Send + Sync {
    /// Name of the object's type, used in diagnostics.
    fn type_name(&self) -> &str;

    /// Pull-based iteration, if the object is iterable.
    fn iter(&self) -> Option<Box<dyn Iterator<Item = Value> + '_>> {
        None
    }

    /// Result of the object's dictionary-conversion method, if it has one.
    ///
    /// A failing call or a non-dictionary result encodes as `null`.
    fn to_dict(&self) -> Option<Result<Value>> {
        None
    }

    /// Member names. The encoder sorts them before use.
    fn dir(&self) -> Vec<String> {
        Vec::new()
    }

    /// Looks up a member by name; `None` means the lookup failed.
    fn getattr(&self, _name: &str) -> Option<Value> {
        None
    }
}

/// A scalar extracted from a numeric array.
///
/// # Examples
///
/// ```rust
/// use objson::{to_string, Numeric, Value};
///
/// assert_eq!(to_string(&Value::Numeric(Numeric::UInt(7))).unwrap(), "7");
/// assert!(to_string(&Value::Numeric(Numeric::UInt(u64::MAX))).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Numeric {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
}

/// An arbitrary-precision decimal: `mantissa * 10^exponent`.
///
/// # Examples
///
/// ```rust
/// use num_bigint::BigInt;
/// use objson::Decimal;
///
/// let price = Decimal::new(BigInt::from(1999), -2);
/// assert_eq!(price.to_f64(), 19.99);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decimal {
    pub mantissa: BigInt,
    pub exponent: i32,
}

impl Decimal {
    #[must_use]
    pub fn new(mantissa: BigInt, exponent: i32) -> Self {
        Decimal { mantissa, exponent }
    }

    /// Lossy conversion to a double; out-of-range magnitudes become infinite.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        format!("{}e{}", self.mantissa, self.exponent)
            .parse()
            .unwrap_or(f64::NAN)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}e{}", self.mantissa, self.exponent)
    }
}

/// A datetime stored as a count of `unit` since the Unix epoch.
///
/// # Examples
///
/// ```rust
/// use objson::{Datetime64, DateUnit};
///
/// let instant = Datetime64::new(1_356_998_400, DateUnit::Seconds);
/// assert!(!instant.is_nat());
/// assert!(Datetime64::nat(DateUnit::Nanos).is_nat());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Datetime64 {
    pub value: i64,
    pub unit: DateUnit,
}

impl Datetime64 {
    #[must_use]
    pub const fn new(value: i64, unit: DateUnit) -> Self {
        Datetime64 { value, unit }
    }

    #[must_use]
    pub const fn nat(unit: DateUnit) -> Self {
        Datetime64 { value: NAT, unit }
    }

    #[must_use]
    pub const fn is_nat(&self) -> bool {
        self.value == NAT
    }

    /// Converts the epoch count to a UTC datetime.
    ///
    /// # Errors
    ///
    /// Returns a conversion error for NaT and out-of-range counts.
    pub fn to_datetime(&self) -> Result<DateTime<Utc>> {
        let per_second = self.unit.per_second();
        let secs = self.value.div_euclid(per_second);
        let nanos = self.value.rem_euclid(per_second) * (1_000_000_000 / per_second);
        if self.is_nat() {
            return Err(Error::conversion("cannot convert NaT to a datetime"));
        }
        DateTime::from_timestamp(secs, nanos as u32)
            .ok_or_else(|| Error::conversion("Could not convert datetime value to string"))
    }
}

impl Value {
    /// Returns `true` if the value is the none sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns `true` if the value is a fixed-width or arbitrary-precision integer.
    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Value::Int(_) | Value::BigInt(_))
    }

    /// Returns `true` if the value is a text or byte string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::Str(_) | Value::Bytes(_))
    }

    /// Returns `true` for any date, time or duration kind, including NaT.
    #[inline]
    #[must_use]
    pub const fn is_temporal(&self) -> bool {
        matches!(
            self,
            Value::DateTime(_)
                | Value::Date(_)
                | Value::NaT
                | Value::Time(_)
                | Value::Datetime64(_)
                | Value::Timedelta(_)
                | Value::Timedelta64(_)
        )
    }

    /// Returns `true` if the value is a dictionary.
    #[inline]
    #[must_use]
    pub const fn is_dict(&self) -> bool {
        matches!(self, Value::Dict(_))
    }

    /// Returns `true` for lists, tuples and sets.
    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Value::List(_) | Value::Tuple(_) | Value::Set(_))
    }

    /// Returns `true` for numeric arrays and the tabular containers built on them.
    #[inline]
    #[must_use]
    pub const fn is_array_like(&self) -> bool {
        matches!(
            self,
            Value::Array(_) | Value::Index(_) | Value::Series(_) | Value::DataFrame(_)
        )
    }

    /// Returns `true` if the value is a callable member.
    #[inline]
    #[must_use]
    pub const fn is_callable(&self) -> bool {
        matches!(self, Value::Callable(_))
    }

    /// If the value is a boolean, returns it.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a fixed-width integer, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a double, returns it.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is a text string, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a dictionary, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Short name of the value's kind, used in diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::BigInt(_) => "bigint",
            Value::Float(_) => "float",
            Value::Bytes(_) => "bytes",
            Value::Str(_) => "str",
            Value::Decimal(_) => "decimal",
            Value::DateTime(_) => "datetime",
            Value::Date(_) => "date",
            Value::NaT => "nat",
            Value::Time(_) => "time",
            Value::Datetime64(_) => "datetime64",
            Value::Timedelta(_) => "timedelta",
            Value::Timedelta64(_) => "timedelta64",
            Value::Numeric(_) => "numeric",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Set(_) => "set",
            Value::Dict(_) => "dict",
            Value::Array(_) => "ndarray",
            Value::Index(_) => "index",
            Value::Series(_) => "series",
            Value::DataFrame(_) => "dataframe",
            Value::Callable(_) => "callable",
            Value::Object(obj) => obj.type_name(),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => Value::Int(v),
            Err(_) => Value::BigInt(BigInt::from(value)),
        }
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::BigInt(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<NaiveTime> for Value {
    fn from(value: NaiveTime) -> Self {
        Value::Time(value)
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        Value::Timedelta(value)
    }
}

impl From<Datetime64> for Value {
    fn from(value: Datetime64) -> Self {
        Value::Datetime64(value)
    }
}

impl From<Numeric> for Value {
    fn from(value: Numeric) -> Self {
        Value::Numeric(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Dict> for Value {
    fn from(value: Dict) -> Self {
        Value::Dict(value)
    }
}

impl From<NdArray> for Value {
    fn from(value: NdArray) -> Self {
        Value::Array(value)
    }
}

impl From<Index> for Value {
    fn from(value: Index) -> Self {
        Value::Index(value)
    }
}

impl From<Series> for Value {
    fn from(value: Series) -> Self {
        Value::Series(value)
    }
}

impl From<DataFrame> for Value {
    fn from(value: DataFrame) -> Self {
        Value::DataFrame(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

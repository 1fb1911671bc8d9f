//! Scalar converters.
//!
//! Each function turns one classified host scalar into a [`Scalar`]: the
//! small set of primitive shapes the writer can emit directly.

use crate::value::{Datetime64, Numeric, NAT};
use crate::{DateUnit, EncodeOptions, Error, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use num_bigint::BigInt;
use std::borrow::Cow;

/// A primitive JSON value ready to be written.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar<'v> {
    Null,
    Bool(bool),
    Long(i64),
    Double(f64),
    Utf8(Cow<'v, str>),
}

/// Finite doubles pass through; NaN and infinities become null.
pub fn double(value: f64) -> Scalar<'static> {
    if value.is_finite() {
        Scalar::Double(value)
    } else {
        Scalar::Null
    }
}

pub fn bigint_to_long(value: &BigInt) -> Result<i64> {
    i64::try_from(value).map_err(|_| Error::overflow(&format!("{} does not fit in 64 bits", value)))
}

pub fn unsigned_to_long(value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| Error::overflow(&format!("{} does not fit in 64 bits", value)))
}

/// Re-encodes a byte string as UTF-8, replacing invalid sequences.
pub fn bytes_to_utf8(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

pub fn numeric(value: &Numeric) -> Result<Scalar<'static>> {
    Ok(match *value {
        Numeric::Bool(b) => Scalar::Bool(b),
        Numeric::Int(i) => Scalar::Long(i),
        Numeric::UInt(u) => Scalar::Long(unsigned_to_long(u)?),
        Numeric::Float(f) => double(f),
    })
}

fn iso_format(unit: DateUnit) -> &'static str {
    match unit {
        DateUnit::Seconds => "%Y-%m-%dT%H:%M:%SZ",
        DateUnit::Millis => "%Y-%m-%dT%H:%M:%S%.3fZ",
        DateUnit::Micros => "%Y-%m-%dT%H:%M:%S%.6fZ",
        DateUnit::Nanos => "%Y-%m-%dT%H:%M:%S%.9fZ",
    }
}

/// Renders a datetime as an ISO string or an epoch count in `date_unit`.
pub fn datetime(value: &DateTime<Utc>, options: &EncodeOptions) -> Result<Scalar<'static>> {
    let unit = options.date_unit;
    if options.iso_dates {
        return Ok(Scalar::Utf8(Cow::Owned(
            value.format(iso_format(unit)).to_string(),
        )));
    }
    let per_second = unit.per_second();
    let subunits = i64::from(value.timestamp_subsec_nanos()) / (1_000_000_000 / per_second);
    value
        .timestamp()
        .checked_mul(per_second)
        .and_then(|count| count.checked_add(subunits))
        .map(Scalar::Long)
        .ok_or_else(|| Error::overflow(&format!("{} does not fit in 64-bit {}", value, unit)))
}

/// Dates encode as midnight UTC.
pub fn date(value: &NaiveDate, options: &EncodeOptions) -> Result<Scalar<'static>> {
    let midnight = value
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| Error::conversion("Could not convert date value to string"))?
        .and_utc();
    datetime(&midnight, options)
}

/// Epoch counts are rescaled from the stored unit to `date_unit`.
pub fn datetime64(value: &Datetime64, options: &EncodeOptions) -> Result<Scalar<'static>> {
    if value.is_nat() {
        return Ok(Scalar::Null);
    }
    if options.iso_dates {
        return datetime(&value.to_datetime()?, options);
    }
    let from = value.unit.per_second();
    let to = options.date_unit.per_second();
    let count = if to >= from {
        value.value.checked_mul(to / from).ok_or_else(|| {
            Error::overflow(&format!("{}{} does not fit in 64-bit {}", value.value, value.unit, options.date_unit))
        })?
    } else {
        value.value.div_euclid(from / to)
    };
    Ok(Scalar::Long(count))
}

/// Time of day as `HH:MM:SS`, with microseconds only when non-zero.
pub fn time(value: &NaiveTime) -> Scalar<'static> {
    let text = if value.nanosecond() / 1_000 == 0 {
        value.format("%H:%M:%S").to_string()
    } else {
        value.format("%H:%M:%S%.6f").to_string()
    };
    Scalar::Utf8(Cow::Owned(text))
}

/// Durations encode as integer nanoseconds.
pub fn timedelta(value: &Duration) -> Result<Scalar<'static>> {
    value
        .num_nanoseconds()
        .map(Scalar::Long)
        .ok_or_else(|| Error::overflow("timedelta does not fit in 64-bit nanoseconds"))
}

pub fn timedelta64(nanos: i64) -> Scalar<'static> {
    if nanos == NAT {
        Scalar::Null
    } else {
        Scalar::Long(nanos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn epoch_options(unit: DateUnit) -> EncodeOptions {
        EncodeOptions::new().with_date_unit(unit)
    }

    fn iso_options(unit: DateUnit) -> EncodeOptions {
        EncodeOptions::new().with_date_unit(unit).with_iso_dates(true)
    }

    #[test]
    fn test_non_finite_doubles_are_null() {
        assert_eq!(double(f64::NAN), Scalar::Null);
        assert_eq!(double(f64::NEG_INFINITY), Scalar::Null);
        assert_eq!(double(1.5), Scalar::Double(1.5));
    }

    #[test]
    fn test_integer_overflow() {
        assert_eq!(bigint_to_long(&BigInt::from(i64::MIN)).unwrap(), i64::MIN);
        assert!(matches!(
            bigint_to_long(&(BigInt::from(i64::MAX) + 1)),
            Err(Error::Overflow(_))
        ));
        assert!(unsigned_to_long(u64::MAX).is_err());
    }

    #[test]
    fn test_datetime_epoch_units() {
        let dt = Utc.with_ymd_and_hms(2013, 1, 1, 0, 0, 0).unwrap()
            + Duration::milliseconds(5);
        assert_eq!(datetime(&dt, &epoch_options(DateUnit::Seconds)).unwrap(), Scalar::Long(1_356_998_400));
        assert_eq!(datetime(&dt, &epoch_options(DateUnit::Millis)).unwrap(), Scalar::Long(1_356_998_400_005));
        assert_eq!(
            datetime(&dt, &epoch_options(DateUnit::Nanos)).unwrap(),
            Scalar::Long(1_356_998_400_005_000_000)
        );
    }

    #[test]
    fn test_datetime_iso_fraction_follows_unit() {
        let dt = Utc.with_ymd_and_hms(2013, 1, 1, 12, 30, 0).unwrap();
        assert_eq!(
            datetime(&dt, &iso_options(DateUnit::Seconds)).unwrap(),
            Scalar::Utf8("2013-01-01T12:30:00Z".into())
        );
        assert_eq!(
            datetime(&dt, &iso_options(DateUnit::Millis)).unwrap(),
            Scalar::Utf8("2013-01-01T12:30:00.000Z".into())
        );
    }

    #[test]
    fn test_date_is_midnight() {
        let d = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
        assert_eq!(date(&d, &epoch_options(DateUnit::Seconds)).unwrap(), Scalar::Long(86_400));
    }

    #[test]
    fn test_datetime64_rescaling() {
        let ns = Datetime64::new(1_500_000_000, DateUnit::Nanos);
        assert_eq!(datetime64(&ns, &epoch_options(DateUnit::Seconds)).unwrap(), Scalar::Long(1));
        let neg = Datetime64::new(-1, DateUnit::Millis);
        assert_eq!(datetime64(&neg, &epoch_options(DateUnit::Seconds)).unwrap(), Scalar::Long(-1));
        let s = Datetime64::new(2, DateUnit::Seconds);
        assert_eq!(datetime64(&s, &epoch_options(DateUnit::Micros)).unwrap(), Scalar::Long(2_000_000));
        assert_eq!(
            datetime64(&Datetime64::nat(DateUnit::Nanos), &epoch_options(DateUnit::Millis)).unwrap(),
            Scalar::Null
        );
        assert!(datetime64(&Datetime64::new(i64::MAX, DateUnit::Seconds), &epoch_options(DateUnit::Nanos)).is_err());
    }

    #[test]
    fn test_time_isoformat() {
        let t = NaiveTime::from_hms_opt(9, 5, 7).unwrap();
        assert_eq!(time(&t), Scalar::Utf8("09:05:07".into()));
        let t = NaiveTime::from_hms_micro_opt(9, 5, 7, 250).unwrap();
        assert_eq!(time(&t), Scalar::Utf8("09:05:07.000250".into()));
    }

    #[test]
    fn test_timedelta_nanoseconds() {
        assert_eq!(timedelta(&Duration::seconds(2)).unwrap(), Scalar::Long(2_000_000_000));
        assert!(timedelta(&Duration::days(200_000)).is_err());
        assert_eq!(timedelta64(NAT), Scalar::Null);
        assert_eq!(timedelta64(-5), Scalar::Long(-5));
    }
}

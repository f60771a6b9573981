use chrono::{DateTime, LocalResult, TimeZone, Utc};
use ordered_float::NotNan;
use serde::{Deserialize, Serialize, Serializer};

/// JSON numeric value representing the number of seconds from
/// 1970-01-01T00:00:00Z UTC until the specified UTC date/time, ignoring leap
/// seconds.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc7519#section-2>
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NumericDate(#[serde(serialize_with = "interop_serialize")] NotNan<f64>);

/// Integral dates are serialized as integers, as many JWT libraries only
/// accept those.
fn interop_serialize<S>(x: &f64, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if x.fract() != 0.0 {
        s.serialize_f64(*x)
    } else {
        s.serialize_i64(*x as i64)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum NumericDateConversionError {
    #[error("Not a number")]
    Nan,

    #[error("date out of range")]
    OutOfRange,
}

impl From<ordered_float::FloatIsNan> for NumericDateConversionError {
    fn from(_: ordered_float::FloatIsNan) -> Self {
        Self::Nan
    }
}

impl NumericDate {
    /// Return the f64-valued number of seconds represented by this NumericDate.
    pub fn as_seconds(self) -> f64 {
        *self.0
    }

    pub fn try_from_seconds(seconds: f64) -> Result<Self, NumericDateConversionError> {
        Ok(Self(NotNan::new(seconds)?))
    }

    /// Converts this date into a UTC date-time, failing if it cannot be
    /// represented.
    pub fn to_date_time(self) -> Result<DateTime<Utc>, NumericDateConversionError> {
        let seconds = self.as_seconds();
        if !seconds.is_finite() || seconds.abs() > i64::MAX as f64 {
            return Err(NumericDateConversionError::OutOfRange);
        }

        let whole_seconds = seconds.floor();
        let nanoseconds = ((seconds - whole_seconds) * 1_000_000_000.0).floor() as u32;

        match Utc.timestamp_opt(whole_seconds as i64, nanoseconds.min(999_999_999)) {
            LocalResult::Single(date_time) => Ok(date_time),
            _ => Err(NumericDateConversionError::OutOfRange),
        }
    }
}

impl From<i32> for NumericDate {
    fn from(value: i32) -> Self {
        Self(NotNan::from(value))
    }
}

impl TryFrom<i64> for NumericDate {
    type Error = NumericDateConversionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_from_seconds(value as f64)
    }
}

impl TryFrom<f64> for NumericDate {
    type Error = NumericDateConversionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_from_seconds(value)
    }
}

impl From<DateTime<Utc>> for NumericDate {
    fn from(date_time: DateTime<Utc>) -> Self {
        let seconds =
            date_time.timestamp() as f64 + date_time.timestamp_subsec_nanos() as f64 * 1.0e-9;
        // A finite sum is never NaN.
        Self(NotNan::new(seconds).unwrap_or_else(|_| NotNan::from(0i32)))
    }
}

impl TryFrom<NumericDate> for DateTime<Utc> {
    type Error = NumericDateConversionError;

    fn try_from(value: NumericDate) -> Result<Self, Self::Error> {
        value.to_date_time()
    }
}

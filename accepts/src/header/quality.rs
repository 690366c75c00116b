use std::{fmt, str};

use derive_more::{Display, Error};

use crate::error::ParseError;

const MAX_QUALITY_INT: u16 = 1000;
const MAX_QUALITY_FLOAT: f32 = 1.0;

/// A q-factor: the weight a client attaches to a header item.
///
/// Stored in thousandths, since [RFC 7231 §5.3.1] allows at most three decimal places, so
/// `q=0.5` is kept as `500`. `Quality::MAX` (`q=1`) is the default and `Quality::ZERO` marks a
/// rejected item.
///
/// # Parsing
/// Parsing from a header (the [`FromStr`](str::FromStr) impl) is lenient: values outside the
/// valid range are clamped into it. Only text that is not a finite number is an error.
///
/// # Examples
/// ```
/// use accepts::header::{Quality, q};
/// assert_eq!(q(1.0), Quality::MAX);
///
/// assert_eq!(q(0.42).to_string(), "0.42");
/// assert_eq!(q(1.0).to_string(), "1");
/// assert_eq!(Quality::MIN.to_string(), "0.001");
/// assert_eq!(Quality::ZERO.to_string(), "0");
///
/// assert_eq!(".5".parse::<Quality>().unwrap(), q(0.5));
/// assert_eq!("1.7".parse::<Quality>().unwrap(), Quality::MAX);
/// assert_eq!("-2".parse::<Quality>().unwrap(), Quality::ZERO);
/// ```
///
/// [RFC 7231 §5.3.1]: https://datatracker.ietf.org/doc/html/rfc7231#section-5.3.1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(pub(super) u16);

impl Quality {
    /// `q=1`, the weight of an item without a q-factor.
    pub const MAX: Quality = Quality(MAX_QUALITY_INT);

    /// `q=0.001`, the lowest weight that still accepts an item.
    pub const MIN: Quality = Quality(1);

    /// `q=0`, an explicit rejection.
    pub const ZERO: Quality = Quality(0);

    /// Returns true if this quality marks an explicit rejection (`q=0`).
    #[inline]
    pub fn is_zero(self) -> bool {
        self == Quality::ZERO
    }

    /// Rounds an in-range float to thousandths.
    fn from_f32(value: f32) -> Self {
        debug_assert!(
            (0.0..=MAX_QUALITY_FLOAT).contains(&value),
            "q value must be between 0.0 and 1.0"
        );

        let int = (value * MAX_QUALITY_INT as f32).round() as u16;

        // a non-zero weight must not collapse into a rejection
        if int == 0 && value > 0.0 {
            Quality::MIN
        } else {
            Quality(int)
        }
    }
}

/// The default value is [`Quality::MAX`].
impl Default for Quality {
    fn default() -> Quality {
        Quality::MAX
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => f.write_str("0"),
            MAX_QUALITY_INT => f.write_str("1"),

            thousandths => {
                // drop trailing zeroes, keeping leading ones: 500 => "5", 50 => "05", 5 => "005"
                let mut digits = thousandths;
                let mut width = 3;

                while digits % 10 == 0 {
                    digits /= 10;
                    width -= 1;
                }

                let mut buf = itoa::Buffer::new();
                let digits = buf.format(digits);

                f.write_str("0.")?;

                for _ in digits.len()..width {
                    f.write_str("0")?;
                }

                f.write_str(digits)
            }
        }
    }
}

/// Error returned when converting a float outside 0.0–1.0 into a [`Quality`].
#[derive(Debug, Clone, Display, Error)]
#[display("quality out of bounds")]
#[non_exhaustive]
pub struct QualityOutOfBounds;

impl TryFrom<f32> for Quality {
    type Error = QualityOutOfBounds;

    #[inline]
    fn try_from(value: f32) -> Result<Self, Self::Error> {
        if (0.0..=MAX_QUALITY_FLOAT).contains(&value) {
            Ok(Quality::from_f32(value))
        } else {
            Err(QualityOutOfBounds)
        }
    }
}

impl str::FromStr for Quality {
    type Err = ParseError;

    fn from_str(q_val: &str) -> Result<Self, Self::Err> {
        let value = q_val
            .trim()
            .parse::<f32>()
            .map_err(|_| ParseError::Quality)?;

        // "NaN" and "inf" are accepted by the float parser but are not q-values
        if !value.is_finite() {
            return Err(ParseError::Quality);
        }

        Ok(Quality::from_f32(value.clamp(0.0, MAX_QUALITY_FLOAT)))
    }
}

/// Convenience function to create a [`Quality`] from an `f32` (0.0–1.0).
///
/// Not recommended for use with user input. Rely on the `FromStr` or `TryFrom` impls where
/// possible.
///
/// # Panics
/// Panics if value is out of range.
///
/// # Examples
/// ```
/// # use accepts::header::{q, Quality};
/// let q1 = q(1.0);
/// assert_eq!(q1, Quality::MAX);
///
/// let q2 = q(0.001);
/// assert_eq!(q2, Quality::MIN);
///
/// let q3 = q(0.0);
/// assert_eq!(q3, Quality::ZERO);
/// ```
///
/// An out-of-range `f32` quality will panic.
/// ```should_panic
/// # use accepts::header::q;
/// let _q2 = q(1.42);
/// ```
#[inline]
pub fn q<T>(quality: T) -> Quality
where
    T: TryInto<Quality>,
    T::Error: fmt::Debug,
{
    quality.try_into().expect("quality value was out of bounds")
}

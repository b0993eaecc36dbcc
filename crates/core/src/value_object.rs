//! Value objects: equality by value, not identity.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Shelf price of a device.
///
/// Always finite. No currency and no range are attached; a negative or zero
/// price is accepted as entered.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl ValueObject for Price {}

impl Price {
    pub fn new(value: f64) -> DomainResult<Self> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(DomainError::malformed_numeric(value.to_string()))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Price {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

/// Parses operator-entered text. Surrounding whitespace is ignored and an
/// underscore between two digits groups them (`1_000`); `inf` and `NaN`
/// parse as floats but are rejected as non-finite.
impl FromStr for Price {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = strip_digit_groups(s.trim())
            .parse()
            .map_err(|_| DomainError::malformed_numeric(s))?;
        if !value.is_finite() {
            return Err(DomainError::malformed_numeric(s));
        }
        Ok(Self(value))
    }
}

/// Drops every `_` that sits directly between two ASCII digits. Any other
/// underscore is kept so that parsing fails on it.
fn strip_digit_groups(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            let grouping = c == '_'
                && i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).is_some_and(char::is_ascii_digit);
            !grouping
        })
        .map(|(_, &c)| c)
        .collect()
}

/// Magnitudes below `1e-4` or from `1e16` up are written in exponent form
/// with a signed, two-digit exponent (`1e+16`, `1.5e-07`). Otherwise whole
/// amounts keep one decimal place (`50.0`) and everything else uses the
/// shortest representation that parses back to the same value (`49.99`).
impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let value = self.0;
        let magnitude = value.abs();

        if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
            let scientific = format!("{value:e}");
            let parts = scientific
                .split_once('e')
                .and_then(|(mantissa, exp)| Some((mantissa, exp.parse::<i32>().ok()?)));
            return match parts {
                Some((mantissa, exp)) => {
                    let sign = if exp < 0 { '-' } else { '+' };
                    write!(f, "{mantissa}e{sign}{:02}", exp.unsigned_abs())
                }
                None => f.write_str(&scientific),
            };
        }

        if value.fract() == 0.0 {
            write!(f, "{value:.1}")
        } else {
            write!(f, "{value}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_padded_numbers() {
        assert_eq!("49.99".parse::<Price>().unwrap().value(), 49.99);
        assert_eq!("  12 \n".parse::<Price>().unwrap().value(), 12.0);
        assert_eq!("-3.5".parse::<Price>().unwrap().value(), -3.5);
        assert_eq!("1e3".parse::<Price>().unwrap().value(), 1000.0);
    }

    #[test]
    fn rejects_non_numeric_text() {
        for text in ["abc", "", "   ", "12,50", "4 9"] {
            match text.parse::<Price>() {
                Err(DomainError::MalformedNumeric(raw)) => assert_eq!(raw, text),
                other => panic!("expected MalformedNumeric for {text:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(matches!("inf".parse::<Price>(), Err(DomainError::MalformedNumeric(_))));
        assert!(matches!("NaN".parse::<Price>(), Err(DomainError::MalformedNumeric(_))));
        assert!(Price::new(f64::INFINITY).is_err());
        assert!(Price::new(f64::NAN).is_err());
    }

    #[test]
    fn display_keeps_one_decimal_for_whole_amounts() {
        assert_eq!(Price::new(50.0).unwrap().to_string(), "50.0");
        assert_eq!(Price::new(49.99).unwrap().to_string(), "49.99");
        assert_eq!(Price::new(0.1).unwrap().to_string(), "0.1");
    }

    #[test]
    fn display_switches_to_exponent_form_at_the_extremes() {
        assert_eq!(Price::new(1e16).unwrap().to_string(), "1e+16");
        assert_eq!(Price::new(1.2345e20).unwrap().to_string(), "1.2345e+20");
        assert_eq!(Price::new(1e-5).unwrap().to_string(), "1e-05");
        assert_eq!(Price::new(1.5e-7).unwrap().to_string(), "1.5e-07");
        assert_eq!(Price::new(-2e-5).unwrap().to_string(), "-2e-05");

        assert_eq!(Price::new(0.0001).unwrap().to_string(), "0.0001");
        assert_eq!(Price::new(9999999999999998.0).unwrap().to_string(), "9999999999999998.0");
        assert_eq!(Price::new(0.0).unwrap().to_string(), "0.0");
    }

    #[test]
    fn accepts_underscores_between_digits() {
        assert_eq!("1_000".parse::<Price>().unwrap().value(), 1000.0);
        assert_eq!("1_234.5_6".parse::<Price>().unwrap().value(), 1234.56);

        for text in ["_1", "1_", "1__0", "1_.5", "_"] {
            assert!(
                matches!(text.parse::<Price>(), Err(DomainError::MalformedNumeric(_))),
                "{text:?}"
            );
        }
    }

    #[test]
    fn serializes_as_bare_number() {
        let price: Price = serde_json::from_str("19.5").unwrap();
        assert_eq!(price.value(), 19.5);
        assert_eq!(serde_json::to_string(&price).unwrap(), "19.5");
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the rendered price parses back to the same value.
            #[test]
            fn display_parses_back(value in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
                let price = Price::new(value).unwrap();
                let reparsed: Price = price.to_string().parse().unwrap();
                prop_assert_eq!(reparsed, price);
            }
        }
    }
}

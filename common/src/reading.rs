//! Numeric tokens as printed by nodetool
//!
//! nodetool prints the literal `NaN` where a ratio or latency has no samples.
//! That is a legitimate outcome, not a conversion failure, so it gets its own
//! variant and turns into IEEE-754 NaN when used in arithmetic.

use std::str::FromStr;

use tracing::debug;

/// A floating point reading that may be reported as not-a-number
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Value(f64),
    NotANumber,
}

impl Reading {
    /// Parse a token; `None` only when it is neither a number nor `NaN`
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token == "NaN" {
            return Some(Reading::NotANumber);
        }
        match token.parse::<f64>() {
            Ok(value) if value.is_nan() => Some(Reading::NotANumber),
            Ok(value) => Some(Reading::Value(value)),
            Err(_) => None,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Reading::Value(value) => value,
            Reading::NotANumber => f64::NAN,
        }
    }
}

/// Float field value, NaN-aware; a malformed token degrades to 0.0
pub fn float_or_zero(field: &str, token: &str) -> f64 {
    match Reading::parse(token) {
        Some(reading) => reading.as_f64(),
        None => {
            debug!(field, token, "Unparseable float, using 0");
            0.0
        }
    }
}

/// Integer field value; a malformed or overflowing token degrades to zero
pub fn int_or_zero<T>(field: &str, token: &str) -> T
where
    T: FromStr + Default,
{
    token.trim().parse().unwrap_or_else(|_| {
        debug!(field, token, "Unparseable integer, using 0");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_literal_is_a_reading() {
        assert_eq!(Reading::parse("NaN"), Some(Reading::NotANumber));
        assert!(Reading::parse("NaN").unwrap().as_f64().is_nan());
    }

    #[test]
    fn test_finite_values() {
        assert_eq!(Reading::parse("0.827"), Some(Reading::Value(0.827)));
        assert_eq!(Reading::parse(" 12 "), Some(Reading::Value(12.0)));
    }

    #[test]
    fn test_garbage_is_not_a_reading() {
        assert_eq!(Reading::parse("1.2.3"), None);
        assert_eq!(Reading::parse(""), None);
    }

    #[test]
    fn test_float_or_zero_degrades() {
        assert_eq!(float_or_zero("latency", "1..5"), 0.0);
        assert!(float_or_zero("latency", "NaN").is_nan());
        assert_eq!(float_or_zero("latency", "2.5"), 2.5);
    }

    #[test]
    fn test_int_or_zero_degrades_on_overflow() {
        let value: u32 = int_or_zero("tokens", "99999999999");
        assert_eq!(value, 0);
        let value: u64 = int_or_zero("count", "2711500");
        assert_eq!(value, 2711500);
    }

}

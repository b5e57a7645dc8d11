use std::fmt;

use serde::{Serialize, Serializer};

/// A mean sound level in dB(A), rounded to two fractional digits.
///
/// Displays and serializes as a fixed two-digit decimal string (`"51.00"`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Level(f64);

impl Level {
    /// Rounds half away from zero to hundredths.
    pub fn from_mean(mean: f64) -> Self {
        Level((mean * 100.0).round() / 100.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_two_digits() {
        assert_eq!(Level::from_mean(48.0).to_string(), "48.00");
        assert_eq!(Level::from_mean(51.0 / 3.0).to_string(), "17.00");
        assert_eq!(Level::from_mean(52.346).to_string(), "52.35");
    }

    #[test]
    fn rounds_exact_halves_up() {
        assert_eq!(Level::from_mean(50.125).to_string(), "50.13");
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&Level::from_mean(43.1)).unwrap();
        assert_eq!(json, "\"43.10\"");
    }
}

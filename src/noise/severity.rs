use serde::Serialize;

use crate::noise::AggregatedReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Ok,
    Elevated,
    Exceeded,
}

impl Severity {
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Ok => "ok",
            Severity::Elevated => "elevated",
            Severity::Exceeded => "exceeded",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Severity::Ok => "😊",
            Severity::Elevated => "😐",
            Severity::Exceeded => "😡",
        }
    }
}

/// Day and night limits in dB(A). Daytime is `day_start_hour <= hour < day_end_hour`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub day_start_hour: u32,
    pub day_end_hour: u32,
    pub day_elevated: f64,
    pub day_exceeded: f64,
    pub night_elevated: f64,
    pub night_exceeded: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            day_start_hour: 6,
            day_end_hour: 22,
            day_elevated: 55.0,
            day_exceeded: 60.0,
            night_elevated: 43.0,
            night_exceeded: 45.0,
        }
    }
}

impl Thresholds {
    pub fn is_daytime(&self, hour: u32) -> bool {
        hour >= self.day_start_hour && hour < self.day_end_hour
    }

    pub fn classify(&self, hour: u32, level: f64) -> Severity {
        self.classify_period(self.is_daytime(hour), level)
    }

    /// Readings whose label has no numeric hour are judged against the night limits.
    pub fn classify_reading(&self, reading: &AggregatedReading) -> Severity {
        let daytime = reading.hour().is_some_and(|h| self.is_daytime(h));
        self.classify_period(daytime, reading.mean_level.value())
    }

    fn classify_period(&self, daytime: bool, level: f64) -> Severity {
        let (elevated, exceeded) = if daytime {
            (self.day_elevated, self.day_exceeded)
        } else {
            (self.night_elevated, self.night_exceeded)
        };

        if level >= exceeded {
            Severity::Exceeded
        } else if level >= elevated {
            Severity::Elevated
        } else {
            Severity::Ok
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::Level;

    #[test]
    fn day_boundaries() {
        let t = Thresholds::default();
        assert_eq!(t.classify(6, 54.99), Severity::Ok);
        assert_eq!(t.classify(6, 55.0), Severity::Elevated);
        assert_eq!(t.classify(21, 59.99), Severity::Elevated);
        assert_eq!(t.classify(21, 60.0), Severity::Exceeded);
    }

    #[test]
    fn night_boundaries() {
        let t = Thresholds::default();
        assert_eq!(t.classify(5, 42.9), Severity::Ok);
        assert_eq!(t.classify(22, 43.0), Severity::Elevated);
        assert_eq!(t.classify(0, 45.0), Severity::Exceeded);
        assert_eq!(t.classify(22, 50.0), Severity::Exceeded);
    }

    #[test]
    fn unparsable_hour_uses_night_limits() {
        let t = Thresholds::default();
        let reading = AggregatedReading {
            date: String::new(),
            time_label: "??:15".to_string(),
            mean_level: Level::from_mean(50.0),
        };
        assert_eq!(t.classify_reading(&reading), Severity::Exceeded);
    }
}

use serde::Serialize;

use crate::noise::Level;

/// Mean level of one quarter-hour run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedReading {
    pub date: String,

    /// `HH:MM` of the first reading in the run.
    pub time_label: String,

    pub mean_level: Level,
}

impl AggregatedReading {
    /// Hour component of the label, if it is numeric.
    pub fn hour(&self) -> Option<u32> {
        let (hour, _) = self.time_label.split_once(':')?;
        hour.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(time_label: &str) -> AggregatedReading {
        AggregatedReading {
            date: "01.08.2024".to_string(),
            time_label: time_label.to_string(),
            mean_level: Level::from_mean(50.0),
        }
    }

    #[test]
    fn parses_hour_from_label() {
        assert_eq!(reading("08:15").hour(), Some(8));
        assert_eq!(reading("23:45").hour(), Some(23));
        assert_eq!(reading("xx:45").hour(), None);
        assert_eq!(reading("0815").hour(), None);
    }
}

/// One row of a sound level meter export, exactly as it appears in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawReading {
    pub date: String,

    /// `H:MM:SS` or similar.
    pub time_of_day: String,

    /// LAS value with a comma decimal separator, e.g. `"52,3"`.
    pub level: String,
}

impl RawReading {
    pub fn new(
        date: impl Into<String>,
        time_of_day: impl Into<String>,
        level: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            time_of_day: time_of_day.into(),
            level: level.into(),
        }
    }
}

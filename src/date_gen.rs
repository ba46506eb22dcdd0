use chrono::{Duration, NaiveDate};

/// Number of selectable days, today included.
pub const DAY_WINDOW: i64 = 7;

/// Format shown to the user in the day selector.
pub const LABEL_FORMAT: &str = "%d/%m/%Y";
/// Format embedded in Sentinel-1 product names.
pub const STAMP_FORMAT: &str = "%Y%m%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayOption {
    pub date: NaiveDate,
}

impl DayOption {
    pub fn label(&self) -> String {
        self.date.format(LABEL_FORMAT).to_string()
    }

    pub fn stamp(&self) -> String {
        self.date.format(STAMP_FORMAT).to_string()
    }
}

pub struct DayGenerator {
    today: NaiveDate,
}

impl DayGenerator {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Today followed by the six preceding calendar days, newest first.
    pub fn generate_day_series(&self) -> Vec<DayOption> {
        (0..DAY_WINDOW)
            .map(|offset| DayOption {
                date: self.today - Duration::days(offset),
            })
            .collect()
    }

    /// Resolves a selector label back to its day, if it is in the window.
    pub fn find_by_label(&self, label: &str) -> Option<DayOption> {
        let date = NaiveDate::parse_from_str(label, LABEL_FORMAT).ok()?;
        self.generate_day_series()
            .into_iter()
            .find(|day| day.date == date)
    }
}

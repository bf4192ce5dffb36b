use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// A weekly schedule in the venue's local time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpeningHours {
    periods: Vec<Period>,
}

/// One opening interval. A `close` at or before `open` runs past midnight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub day: Weekday,
    pub open: NaiveTime,
    pub close: NaiveTime,
}

pub const ALL_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

impl OpeningHours {
    pub fn new(periods: Vec<Period>) -> Self {
        Self { periods }
    }

    pub fn daily(open: NaiveTime, close: NaiveTime) -> Self {
        Self::on(&ALL_DAYS, open, close)
    }

    pub fn on(days: &[Weekday], open: NaiveTime, close: NaiveTime) -> Self {
        Self::default().and(days, open, close)
    }

    pub fn and(mut self, days: &[Weekday], open: NaiveTime, close: NaiveTime) -> Self {
        self.periods
            .extend(days.iter().map(|&day| Period { day, open, close }));
        self
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn is_open_at(&self, at: NaiveDateTime) -> bool {
        let day = at.weekday();
        let time = at.time();

        self.periods.iter().any(|period| period.covers(day, time))
    }
}

impl Period {
    fn covers(&self, day: Weekday, time: NaiveTime) -> bool {
        if self.close > self.open {
            return self.day == day && time >= self.open && time < self.close;
        }

        (self.day == day && time >= self.open) || (self.day.succ() == day && time < self.close)
    }
}

use chrono::{Local, NaiveDate};

/// Source of the calendar date the activity windows end on.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Pins "today" when an override is given, otherwise follows the local date.
pub fn resolve_clock(today_override: Option<NaiveDate>) -> Box<dyn Clock> {
    match today_override {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(LocalClock),
    }
}

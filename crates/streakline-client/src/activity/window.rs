use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::ClientResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: i64,
}

/// Zero-filled daily counts for one user, oldest first, one entry per
/// consecutive calendar date ending on the window's `today`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyCountSeries {
    entries: Vec<DayCount>,
}

impl DailyCountSeries {
    /// Lays `counts` (oldest first) onto the consecutive dates that end on `today`.
    pub fn ending_on(today: NaiveDate, counts: &[i64]) -> Self {
        let days = counts.len() as i64;
        let start = today - Duration::days(days - 1);
        let entries = counts
            .iter()
            .enumerate()
            .map(|(offset, count)| DayCount {
                date: start + Duration::days(offset as i64),
                count: *count,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[DayCount] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.entries.iter().map(|entry| entry.date).collect()
    }

    pub fn counts(&self) -> Vec<i64> {
        self.entries.iter().map(|entry| entry.count).collect()
    }

    pub fn count_on(&self, date: NaiveDate) -> i64 {
        self.entries
            .iter()
            .find(|entry| entry.date == date)
            .map_or(0, |entry| entry.count)
    }
}

/// Read access to per-day record counts. Implementations must zero-fill and
/// return exactly `days` ascending entries ending on their notion of today.
pub trait DailyCountSource {
    fn counts_for_window(&self, user_id: &str, days: u32) -> ClientResult<DailyCountSeries>;
}

pub fn window_start(today: NaiveDate, days: u32) -> NaiveDate {
    today - Duration::days(i64::from(days.saturating_sub(1)))
}

pub fn build_series(
    today: NaiveDate,
    days: u32,
    counts_by_date: &HashMap<NaiveDate, i64>,
) -> DailyCountSeries {
    let start = window_start(today, days);
    let entries = (0..i64::from(days))
        .map(|offset| {
            let date = start + Duration::days(offset);
            DayCount {
                date,
                count: counts_by_date.get(&date).copied().unwrap_or(0),
            }
        })
        .collect();
    DailyCountSeries { entries }
}

/// Counts held in memory, keyed by user id. Dates outside the requested
/// window are ignored exactly like the store query ignores them.
#[derive(Debug, Clone)]
pub struct InMemoryDailyCounts {
    today: NaiveDate,
    counts: HashMap<String, HashMap<NaiveDate, i64>>,
}

impl InMemoryDailyCounts {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            counts: HashMap::new(),
        }
    }

    pub fn set(&mut self, user_id: &str, date: NaiveDate, count: i64) {
        self.counts
            .entry(user_id.to_string())
            .or_default()
            .insert(date, count);
    }

    /// Records `counts` (oldest first) for the days ending today.
    pub fn set_trailing(&mut self, user_id: &str, counts: &[i64]) {
        let series = DailyCountSeries::ending_on(self.today, counts);
        for entry in series.entries() {
            self.set(user_id, entry.date, entry.count);
        }
    }
}

impl DailyCountSource for InMemoryDailyCounts {
    fn counts_for_window(&self, user_id: &str, days: u32) -> ClientResult<DailyCountSeries> {
        let empty = HashMap::new();
        let by_date = self.counts.get(user_id).unwrap_or(&empty);
        Ok(build_series(self.today, days, by_date))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{Duration, NaiveDate};

    use super::{DailyCountSeries, DailyCountSource, InMemoryDailyCounts, build_series};

    fn day(year: i32, month: u32, dom: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, dom).unwrap_or_default()
    }

    #[test]
    fn series_is_zero_filled_consecutive_and_oldest_first() {
        let today = day(2026, 3, 2);
        let mut counts = HashMap::new();
        counts.insert(day(2026, 2, 27), 4);
        counts.insert(today, 9);

        let series = build_series(today, 7, &counts);
        assert_eq!(series.len(), 7);
        assert_eq!(series.entries()[0].date, day(2026, 2, 24));
        assert_eq!(series.entries()[6].date, today);
        assert_eq!(series.counts(), vec![0, 0, 0, 4, 0, 0, 9]);

        for pair in series.entries().windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }

    #[test]
    fn dates_outside_the_window_are_ignored() {
        let today = day(2026, 1, 10);
        let mut source = InMemoryDailyCounts::new(today);
        source.set("usr_a", day(2026, 1, 3), 12);
        source.set("usr_a", day(2026, 1, 4), 5);

        let series = source.counts_for_window("usr_a", 7);
        assert!(series.is_ok());
        if let Ok(value) = series {
            assert_eq!(value.counts(), vec![5, 0, 0, 0, 0, 0, 0]);
        }
    }

    #[test]
    fn unknown_user_yields_all_zero_window() {
        let source = InMemoryDailyCounts::new(day(2026, 1, 10));
        let series = source.counts_for_window("usr_missing", 30);
        assert!(series.is_ok());
        if let Ok(value) = series {
            assert_eq!(value.len(), 30);
            assert!(value.counts().iter().all(|count| *count == 0));
        }
    }

    #[test]
    fn ending_on_crosses_month_boundaries() {
        let series = DailyCountSeries::ending_on(day(2026, 3, 1), &[3, 4, 5]);
        assert_eq!(
            series.dates(),
            vec![day(2026, 2, 27), day(2026, 2, 28), day(2026, 3, 1)]
        );
        assert_eq!(series.count_on(day(2026, 2, 28)), 4);
        assert_eq!(series.count_on(day(2026, 1, 1)), 0);
    }
}

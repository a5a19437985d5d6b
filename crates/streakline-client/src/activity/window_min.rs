use crate::activity::policy::{DEFAULT_LIMIT, MIN_DAILY_COUNT};
use crate::activity::window::DailyCountSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowStatus {
    pub is_active: bool,
    pub current_limit: i64,
}

impl WindowStatus {
    pub const INACTIVE: Self = Self {
        is_active: false,
        current_limit: DEFAULT_LIMIT,
    };
}

/// Active only when every day of the window reached the minimum; the limit is
/// then the weakest day of the window.
pub fn evaluate_window_min(series: &DailyCountSeries) -> WindowStatus {
    let counts = series.counts();
    if counts.iter().any(|count| *count < MIN_DAILY_COUNT) {
        return WindowStatus::INACTIVE;
    }

    match counts.iter().min() {
        Some(minimum) => WindowStatus {
            is_active: true,
            current_limit: *minimum,
        },
        None => WindowStatus::INACTIVE,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{WindowStatus, evaluate_window_min};
    use crate::activity::window::DailyCountSeries;

    fn series(counts: &[i64]) -> DailyCountSeries {
        let today = NaiveDate::from_ymd_opt(2026, 5, 20).unwrap_or_default();
        DailyCountSeries::ending_on(today, counts)
    }

    #[test]
    fn empty_window_is_inactive_at_default_limit() {
        assert_eq!(evaluate_window_min(&series(&[])), WindowStatus::INACTIVE);
    }

    #[test]
    fn any_day_below_minimum_makes_window_inactive() {
        let status = evaluate_window_min(&series(&[9, 9, 9, 2, 9, 9, 9]));
        assert_eq!(status, WindowStatus::INACTIVE);
    }

    #[test]
    fn full_window_reports_its_minimum() {
        let status = evaluate_window_min(&series(&[3, 4, 3, 5, 3, 4, 3]));
        assert_eq!(
            status,
            WindowStatus {
                is_active: true,
                current_limit: 3
            }
        );

        let steady = evaluate_window_min(&series(&[5; 7]));
        assert_eq!(steady.current_limit, 5);
        assert!(steady.is_active);
    }

    #[test]
    fn counts_above_the_streak_range_still_count_as_active_here() {
        let status = evaluate_window_min(&series(&[30, 26, 40, 25, 27, 31, 28]));
        assert!(status.is_active);
        assert_eq!(status.current_limit, 25);
    }
}

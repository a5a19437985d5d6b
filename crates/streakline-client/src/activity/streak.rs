use chrono::NaiveDate;

use crate::activity::policy::{DEFAULT_LIMIT, MAX_RUN_AT_LIMIT, is_in_range};
use crate::activity::window::{DailyCountSeries, DayCount};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityStatus {
    pub is_active: bool,
    pub streak_dates: Vec<NaiveDate>,
    pub streak_counts: Vec<i64>,
    pub current_limit: i64,
}

impl ActivityStatus {
    pub fn inactive() -> Self {
        Self {
            is_active: false,
            streak_dates: Vec::new(),
            streak_counts: Vec::new(),
            current_limit: DEFAULT_LIMIT,
        }
    }
}

/// Scan state of the streak rule. Every reset path lands on `NoStreak`, so the
/// limit, run length and accumulated days can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreakState {
    NoStreak,
    InStreak {
        current_limit: i64,
        run_length: u32,
        days: Vec<DayCount>,
    },
}

impl StreakState {
    fn start(day: DayCount) -> Self {
        Self::InStreak {
            current_limit: day.count,
            run_length: 1,
            days: vec![day],
        }
    }

    /// Applies one day of the scan.
    pub fn advance(self, day: DayCount) -> Self {
        if !is_in_range(day.count) {
            return Self::NoStreak;
        }

        let (current_limit, run_length, mut days) = match self {
            Self::NoStreak => return Self::start(day),
            Self::InStreak {
                current_limit,
                run_length,
                days,
            } => (current_limit, run_length, days),
        };

        days.push(day);

        let next = if day.count < current_limit {
            // A downgrade drops everything accumulated before this day.
            Self::start(day)
        } else if day.count > current_limit {
            // An upgrade keeps the accumulated days.
            Self::InStreak {
                current_limit: day.count,
                run_length: 1,
                days,
            }
        } else {
            Self::InStreak {
                current_limit,
                run_length: run_length + 1,
                days,
            }
        };

        match next {
            Self::InStreak { run_length, .. } if run_length > MAX_RUN_AT_LIMIT => Self::NoStreak,
            other => other,
        }
    }

    pub fn into_status(self) -> ActivityStatus {
        match self {
            Self::NoStreak => ActivityStatus::inactive(),
            Self::InStreak {
                current_limit,
                days,
                ..
            } => ActivityStatus {
                is_active: true,
                streak_dates: days.iter().map(|day| day.date).collect(),
                streak_counts: days.iter().map(|day| day.count).collect(),
                current_limit,
            },
        }
    }
}

/// Classifies a window by the streak still live after its newest day.
pub fn evaluate_streak(series: &DailyCountSeries) -> ActivityStatus {
    series
        .entries()
        .iter()
        .fold(StreakState::NoStreak, |state, day| state.advance(*day))
        .into_status()
}

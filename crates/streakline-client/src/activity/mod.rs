pub mod clock;
pub mod policy;
pub mod query;
pub mod streak;
pub mod window;
pub mod window_min;

use crate::ClientResult;
use crate::activity::policy::{STATUS_WINDOW_DAYS, STREAK_WINDOW_DAYS};
use crate::activity::streak::{ActivityStatus, evaluate_streak};
use crate::activity::window::DailyCountSource;
use crate::activity::window_min::{WindowStatus, evaluate_window_min};

/// Streak status over the last 30 days.
pub fn compute_activity_status(
    source: &dyn DailyCountSource,
    user_id: &str,
) -> ClientResult<ActivityStatus> {
    let series = source.counts_for_window(user_id, STREAK_WINDOW_DAYS)?;
    let status = evaluate_streak(&series);
    tracing::debug!(
        user_id,
        is_active = status.is_active,
        current_limit = status.current_limit,
        streak_days = status.streak_dates.len(),
        "computed activity status"
    );
    Ok(status)
}

/// Quick status over the last 7 days, without streak detail.
pub fn compute_window_status(
    source: &dyn DailyCountSource,
    user_id: &str,
) -> ClientResult<WindowStatus> {
    let series = source.counts_for_window(user_id, STATUS_WINDOW_DAYS)?;
    Ok(evaluate_window_min(&series))
}

use chrono::NaiveDate;
use proptest::prelude::*;
use streakline_client::activity::policy::{DEFAULT_LIMIT, STREAK_WINDOW_DAYS};
use streakline_client::activity::streak::evaluate_streak;
use streakline_client::activity::window::DailyCountSeries;
use streakline_client::activity::window_min::evaluate_window_min;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 15).unwrap_or_default()
}

fn series(counts: &[i64]) -> DailyCountSeries {
    DailyCountSeries::ending_on(today(), counts)
}

fn window_counts() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0_i64..30, STREAK_WINDOW_DAYS as usize)
}

proptest! {
    #[test]
    fn limit_is_default_or_taken_from_the_input(counts in window_counts()) {
        let status = evaluate_streak(&series(&counts));
        prop_assert!(status.current_limit == DEFAULT_LIMIT || counts.contains(&status.current_limit));
        prop_assert_eq!(status.streak_dates.len(), status.streak_counts.len());
        prop_assert_eq!(status.is_active, !status.streak_dates.is_empty());
    }

    #[test]
    fn evaluation_is_idempotent(counts in window_counts()) {
        let input = series(&counts);
        prop_assert_eq!(evaluate_streak(&input), evaluate_streak(&input));
        prop_assert_eq!(evaluate_window_min(&input), evaluate_window_min(&input));
    }

    #[test]
    fn streak_never_spans_an_out_of_range_day(
        counts in window_counts(),
        position in 0_usize..30,
        bad in prop_oneof![0_i64..3, 25_i64..40],
    ) {
        let mut counts = counts;
        counts[position] = bad;
        let input = series(&counts);
        let status = evaluate_streak(&input);
        let bad_date = input.entries()[position].date;
        prop_assert!(status.streak_dates.iter().all(|date| *date > bad_date));
    }

    #[test]
    fn eight_equal_days_ending_today_are_inactive(value in 3_i64..25, prefix in window_counts()) {
        let mut counts = prefix[..22].to_vec();
        counts[21] = 0;
        counts.extend(std::iter::repeat_n(value, 8));
        let status = evaluate_streak(&series(&counts));
        prop_assert!(!status.is_active);
        prop_assert_eq!(status.current_limit, DEFAULT_LIMIT);
    }

    #[test]
    fn downgrade_on_the_last_day_restarts_with_that_day_alone(
        higher in 4_i64..25,
        run in 1_usize..7,
        drop_by in 1_i64..22,
    ) {
        let lower = (higher - drop_by).max(3);
        prop_assume!(lower < higher);
        let mut counts = vec![0; 30 - run - 1];
        counts.extend(std::iter::repeat_n(higher, run));
        counts.push(lower);
        let status = evaluate_streak(&series(&counts));
        prop_assert!(status.is_active);
        prop_assert_eq!(status.streak_counts, vec![lower]);
        prop_assert_eq!(status.streak_dates, vec![today()]);
        prop_assert_eq!(status.current_limit, lower);
    }

    #[test]
    fn full_week_in_range_reports_its_minimum(counts in prop::collection::vec(3_i64..25, 7)) {
        let status = evaluate_window_min(&series(&counts));
        prop_assert!(status.is_active);
        prop_assert_eq!(Some(status.current_limit), counts.iter().min().copied());
    }
}

pub mod streak_testkit;

mod support;

use streakline_client::commands::records::{self, CustomerEntry, RecordsListOptions};

use support::streak_testkit::{
    customers, date, error_code, payload, register, temp_home_in_tmp, try_log_day,
};

#[test]
fn first_entry_of_the_day_needs_three_customers() {
    let temp = temp_home_in_tmp("streakline-records-first-day");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        register(&home, "asha", "user", "bbsr");
        let today = date(2026, 5, 10);

        let code = error_code(try_log_day(&home, "asha", today, customers(2)));
        assert_eq!(code, "first_day_minimum");

        let saved = payload(try_log_day(&home, "asha", today, customers(3)));
        assert_eq!(saved["data"]["total_for_day"], 3);
        assert_eq!(saved["data"]["message"], "Saved! Total customers for today: 3");

        // Once the day has records, a single extra contact is fine.
        let extra = payload(try_log_day(&home, "asha", today, customers(1)));
        assert_eq!(extra["data"]["total_for_day"], 4);
    }
}

#[test]
fn daily_maximum_rejects_the_whole_batch() {
    let temp = temp_home_in_tmp("streakline-records-maximum");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        register(&home, "asha", "user", "bbsr");
        let today = date(2026, 5, 10);

        assert!(try_log_day(&home, "asha", today, customers(20)).is_ok());
        let code = error_code(try_log_day(&home, "asha", today, customers(6)));
        assert_eq!(code, "daily_maximum_exceeded");

        let filled = payload(try_log_day(&home, "asha", today, customers(5)));
        assert_eq!(filled["data"]["total_for_day"], 25);
    }
}

#[test]
fn blank_entries_are_skipped_and_not_counted() {
    let temp = temp_home_in_tmp("streakline-records-blank");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        register(&home, "asha", "user", "bbsr");
        let today = date(2026, 5, 10);

        let mut entries = customers(3);
        entries.push(CustomerEntry::new("", "9000000001"));
        entries.push(CustomerEntry::new("Nobody", "  "));
        let saved = payload(try_log_day(&home, "asha", today, entries));
        assert_eq!(saved["data"]["added"], 3);
        assert_eq!(saved["data"]["skipped"], 2);

        let mut too_few = customers(2);
        too_few.push(CustomerEntry::new(" ", " "));
        let other_day = date(2026, 5, 11);
        let code = error_code(try_log_day(&home, "asha", other_day, too_few));
        assert_eq!(code, "first_day_minimum");
    }
}

#[test]
fn list_returns_records_for_the_selected_date_in_insertion_order() {
    let temp = temp_home_in_tmp("streakline-records-list");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        register(&home, "asha", "user", "bbsr");
        let yesterday = date(2026, 5, 9);
        let today = date(2026, 5, 10);
        assert!(try_log_day(&home, "asha", yesterday, customers(4)).is_ok());
        assert!(try_log_day(&home, "asha", today, customers(3)).is_ok());

        let listed = payload(records::list_with_options(RecordsListOptions {
            username: "asha".to_string(),
            date: Some("2026-05-09".to_string()),
            today: Some(today),
            home_override: Some(&home),
        }));
        assert_eq!(listed["data"]["date"], "2026-05-09");
        assert_eq!(listed["data"]["total"], 4);
        assert_eq!(listed["data"]["rows"][0]["name"], "Customer 0");
        assert_eq!(listed["data"]["rows"][3]["name"], "Customer 3");

        let default_day = payload(records::list_with_options(RecordsListOptions {
            username: "asha".to_string(),
            date: None,
            today: Some(today),
            home_override: Some(&home),
        }));
        assert_eq!(default_day["data"]["total"], 3);
    }
}

#[test]
fn records_for_unknown_user_fail_with_user_not_found() {
    let temp = temp_home_in_tmp("streakline-records-unknown");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let code = error_code(try_log_day(&home, "ghost", date(2026, 5, 10), customers(3)));
        assert_eq!(code, "user_not_found");
    }
}

#[test]
fn malformed_list_date_is_invalid_argument() {
    let temp = temp_home_in_tmp("streakline-records-bad-date");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        register(&home, "asha", "user", "bbsr");
        let code = error_code(records::list_with_options(RecordsListOptions {
            username: "asha".to_string(),
            date: Some("2026-02-30".to_string()),
            today: Some(date(2026, 5, 10)),
            home_override: Some(&home),
        }));
        assert_eq!(code, "invalid_argument");
    }
}

mod support;

use std::thread;

use rusqlite::{Connection, params};
use streakline_client::commands::users::{self, UserCreateOptions, UsersListOptions};

use support::streak_testkit::{error_code, payload, register, temp_home_in_tmp};

#[test]
fn created_user_is_listed_with_role_label() {
    let temp = temp_home_in_tmp("streakline-users-create");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let created = payload(users::create_with_options(UserCreateOptions {
            username: "asha".to_string(),
            role: "user".to_string(),
            center: "bbsr".to_string(),
            home_override: Some(&home),
        }));
        assert_eq!(created["command"], "users create");
        assert_eq!(created["data"]["user"]["username"], "asha");
        assert_eq!(created["data"]["user"]["role_label"], "User");

        let listed = payload(users::list_with_options(UsersListOptions {
            home_override: Some(&home),
            ..UsersListOptions::default()
        }));
        assert_eq!(listed["data"]["rows"].as_array().map(Vec::len), Some(1));
        assert_eq!(listed["data"]["rows"][0]["center"], "bbsr");
    }
}

#[test]
fn duplicate_username_is_rejected() {
    let temp = temp_home_in_tmp("streakline-users-duplicate");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        register(&home, "asha", "user", "bbsr");
        let code = error_code(users::create_with_options(UserCreateOptions {
            username: "asha".to_string(),
            role: "user".to_string(),
            center: "basta".to_string(),
            home_override: Some(&home),
        }));
        assert_eq!(code, "username_taken");
    }
}

#[test]
fn second_owner_for_a_center_is_rejected() {
    let temp = temp_home_in_tmp("streakline-users-owner");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        register(&home, "meena", "centerowner", "bbsr");
        let code = error_code(users::create_with_options(UserCreateOptions {
            username: "ravi".to_string(),
            role: "centerowner".to_string(),
            center: "bbsr".to_string(),
            home_override: Some(&home),
        }));
        assert_eq!(code, "center_owner_exists");

        // Another center can still take an owner.
        register(&home, "ravi", "centerowner", "basta");
    }
}

#[test]
fn concurrent_owner_signups_leave_at_most_one_owner() {
    let temp = temp_home_in_tmp("streakline-users-owner-race");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        register(&home, "asha", "user", "bbsr");

        let outcomes = thread::scope(|scope| {
            let handles = (0..8)
                .map(|index| {
                    let home = home.as_path();
                    scope.spawn(move || {
                        users::create_with_options(UserCreateOptions {
                            username: format!("owner{index}"),
                            role: "centerowner".to_string(),
                            center: "bbsr".to_string(),
                            home_override: Some(home),
                        })
                        .map(|_envelope| ())
                        .map_err(|error| error.code)
                    })
                })
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Vec<_>>()
        });

        let mut registered = 0_usize;
        for outcome in outcomes {
            assert!(outcome.is_ok(), "signup thread panicked");
            match outcome {
                Ok(Ok(())) => registered += 1,
                Ok(Err(code)) => assert!(
                    code == "center_owner_exists" || code == "store_locked",
                    "unexpected error code {code}"
                ),
                Err(_) => {}
            }
        }
        assert!(registered <= 1);

        let owners = payload(users::list_with_options(UsersListOptions {
            center: Some("bbsr".to_string()),
            role: Some("centerowner".to_string()),
            home_override: Some(&home),
        }));
        assert_eq!(owners["data"]["rows"].as_array().map(Vec::len), Some(registered));
    }
}

#[test]
fn store_schema_refuses_a_second_owner_row() {
    let temp = temp_home_in_tmp("streakline-users-owner-index");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        register(&home, "meena", "centerowner", "bbsr");

        let opened = Connection::open(home.join("streakline.db"));
        assert!(opened.is_ok());
        if let Ok(connection) = opened {
            let insert = |user_id: &str, username: &str, role: &str| {
                connection.execute(
                    "INSERT INTO internal_users (user_id, username, role, center, created_at)
                     VALUES (?1, ?2, ?3, 'bbsr', '0')",
                    params![user_id, username, role],
                )
            };
            assert!(insert("usr_second_owner", "ravi", "centerowner").is_err());
            assert!(insert("usr_member", "asha", "user").is_ok());
        }
    }
}

#[test]
fn empty_center_and_unknown_role_are_invalid_arguments() {
    let temp = temp_home_in_tmp("streakline-users-invalid");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let empty_center = error_code(users::create_with_options(UserCreateOptions {
            username: "asha".to_string(),
            role: "user".to_string(),
            center: "   ".to_string(),
            home_override: Some(&home),
        }));
        assert_eq!(empty_center, "invalid_argument");

        let unknown_role = error_code(users::create_with_options(UserCreateOptions {
            username: "asha".to_string(),
            role: "admin".to_string(),
            center: "bbsr".to_string(),
            home_override: Some(&home),
        }));
        assert_eq!(unknown_role, "invalid_argument");
    }
}

#[test]
fn list_filters_by_center_and_role_and_orders_by_center_then_username() {
    let temp = temp_home_in_tmp("streakline-users-list");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        register(&home, "zara", "user", "bbsr");
        register(&home, "asha", "user", "bbsr");
        register(&home, "bina", "user", "balasore");
        register(&home, "meena", "centerowner", "bbsr");

        let all = payload(users::list_with_options(UsersListOptions {
            home_override: Some(&home),
            ..UsersListOptions::default()
        }));
        let names = all["data"]["rows"]
            .as_array()
            .map(|rows| {
                rows.iter()
                    .filter_map(|row| row["username"].as_str().map(str::to_string))
                    .collect::<Vec<String>>()
            })
            .unwrap_or_default();
        assert_eq!(names, vec!["bina", "asha", "meena", "zara"]);

        let bbsr_users = payload(users::list_with_options(UsersListOptions {
            center: Some("bbsr".to_string()),
            role: Some("user".to_string()),
            home_override: Some(&home),
        }));
        assert_eq!(bbsr_users["data"]["rows"].as_array().map(Vec::len), Some(2));
        assert_eq!(bbsr_users["data"]["role"], "user");
    }
}

#[test]
fn centers_merge_registered_and_base_centers() {
    let temp = temp_home_in_tmp("streakline-centers");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        register(&home, "asha", "user", "cuttack");
        register(&home, "bina", "user", "bbsr");

        let centers = payload(users::centers_with_home_override(Some(&home)));
        assert_eq!(
            centers["data"]["centers"],
            serde_json::json!(["balasore", "basta", "bbsr", "cuttack"])
        );
    }
}

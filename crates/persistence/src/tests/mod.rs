// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod session_tests;

use time::{Date, Month};

use agrizone_domain::{NewCrop, NewUser, NewZone, User, UserType};

use crate::Persistence;

/// Lowest cost bcrypt accepts; keeps hashing fast in tests.
pub const TEST_PASSWORD_COST: u32 = 4;

pub fn create_test_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence.set_password_cost(TEST_PASSWORD_COST);
    persistence
}

pub fn create_test_new_user(email: &str, cnic: &str, user_type: UserType) -> NewUser {
    NewUser {
        first_name: String::from("Ali"),
        middle_name: String::new(),
        last_name: String::from("Khan"),
        father_name: String::from("Akbar Khan"),
        phone_number: String::from("03001234567"),
        email: email.to_string(),
        date_of_birth: Date::from_calendar_date(1990, Month::May, 17).unwrap(),
        cnic: cnic.to_string(),
        user_type,
    }
}

pub fn create_test_landowner(persistence: &mut Persistence, tag: &str) -> User {
    persistence
        .create_user(
            &create_test_new_user(
                &format!("landowner-{tag}@example.com"),
                &format!("L-{tag}"),
                UserType::Landowner,
            ),
            "secret",
        )
        .unwrap()
}

pub fn create_test_hari(persistence: &mut Persistence, tag: &str) -> User {
    persistence
        .create_user(
            &create_test_new_user(
                &format!("hari-{tag}@example.com"),
                &format!("H-{tag}"),
                UserType::Hari,
            ),
            "secret",
        )
        .unwrap()
}

pub fn create_test_zone(name: &str) -> NewZone {
    NewZone {
        name: name.to_string(),
        location: String::from("Sindh"),
        total_area: 10.0,
        description: String::new(),
    }
}

pub fn create_test_crop(name: &str) -> NewCrop {
    NewCrop {
        name: name.to_string(),
        crop_type: String::from("grain"),
        season: String::from("rabi"),
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::sync::Mutex;

use agrizone_domain::UserType;
use agrizone_persistence::Persistence;
use time::Duration;

use crate::{
    AppConfig, AuthResponse, AuthenticatedActor, CreateCropRequest, CreateZoneRequest, CropInfo,
    Mailer, MailerError, SignupRequest, ZoneInfo, create_crop, create_zone, signup,
};

pub const TEST_PASSWORD: &str = "secret";

pub fn create_test_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence.set_password_cost(4);
    persistence
}

pub fn create_test_config() -> AppConfig {
    AppConfig::default()
}

pub fn create_test_signup_request(email: &str, cnic: &str, user_type: &str) -> SignupRequest {
    SignupRequest {
        first_name: Some(String::from("Ali")),
        middle_name: None,
        last_name: Some(String::from("Khan")),
        father_name: Some(String::from("Akbar Khan")),
        phone_number: Some(String::from("03001234567")),
        email: Some(email.to_string()),
        password: Some(String::from(TEST_PASSWORD)),
        date_of_birth: Some(String::from("1990-05-17")),
        cnic: Some(cnic.to_string()),
        user_type: Some(user_type.to_string()),
    }
}

pub fn signup_landowner(persistence: &mut Persistence, tag: &str) -> AuthenticatedActor {
    let response: AuthResponse = signup(
        persistence,
        &create_test_config(),
        &create_test_signup_request(
            &format!("landowner-{tag}@example.com"),
            &format!("L-{tag}"),
            "landowner",
        ),
    )
    .unwrap();
    AuthenticatedActor::new(response.user.id, UserType::Landowner)
}

pub fn signup_hari(persistence: &mut Persistence, tag: &str) -> AuthenticatedActor {
    let response: AuthResponse = signup(
        persistence,
        &create_test_config(),
        &create_test_signup_request(
            &format!("hari-{tag}@example.com"),
            &format!("H-{tag}"),
            "hari",
        ),
    )
    .unwrap();
    AuthenticatedActor::new(response.user.id, UserType::Hari)
}

pub fn create_test_zone(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    name: &str,
) -> ZoneInfo {
    create_zone(
        persistence,
        actor,
        &CreateZoneRequest {
            name: Some(name.to_string()),
            location: Some(String::from("Sindh")),
            total_area: Some(12.5),
            description: None,
        },
    )
    .unwrap()
}

pub fn create_test_crop(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    name: &str,
) -> CropInfo {
    create_crop(
        persistence,
        actor,
        &CreateCropRequest {
            name: Some(name.to_string()),
            crop_type: Some(String::from("grain")),
            season: Some(String::from("rabi")),
        },
    )
    .unwrap()
}

/// A mailer that keeps every delivered `(recipient, code)` pair.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    pub fn last_code(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, code)| code.clone())
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Mailer for RecordingMailer {
    fn send_reset_code(
        &self,
        recipient: &str,
        code: &str,
        _valid_for: Duration,
    ) -> Result<(), MailerError> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), code.to_string()));
        Ok(())
    }
}

/// A mailer whose deliveries always fail. It still records the code it was
/// asked to send.
#[derive(Default)]
pub struct FailingMailer {
    pub attempted: Mutex<Vec<String>>,
}

impl Mailer for FailingMailer {
    fn send_reset_code(
        &self,
        recipient: &str,
        code: &str,
        _valid_for: Duration,
    ) -> Result<(), MailerError> {
        self.attempted.lock().unwrap().push(code.to_string());
        Err(MailerError::DeliveryFailed {
            recipient: recipient.to_string(),
            reason: String::from("smtp unreachable"),
        })
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use agrizone_domain::User;

use crate::{Persistence, ResetCodeData, SessionData};

use super::{create_test_hari, create_test_landowner, create_test_persistence};

const FAR_FUTURE: &str = "2999-01-01T00:00:00.000000000Z";
const LONG_AGO: &str = "2000-01-01T00:00:00.000000000Z";

#[test]
fn test_create_and_get_session() {
    let mut persistence: Persistence = create_test_persistence();
    let user: User = create_test_landowner(&mut persistence, "s");

    let session_id: i64 = persistence
        .create_session("token-abc", user.user_id, FAR_FUTURE)
        .unwrap();
    assert!(session_id > 0);

    let session: SessionData = persistence
        .get_session_by_token("token-abc")
        .unwrap()
        .unwrap();
    assert_eq!(session.session_id, session_id);
    assert_eq!(session.user_id, user.user_id);
    assert_eq!(session.expires_at, FAR_FUTURE);
}

#[test]
fn test_unknown_session_token_returns_none() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(persistence.get_session_by_token("nope").unwrap().is_none());
}

#[test]
fn test_delete_session() {
    let mut persistence: Persistence = create_test_persistence();
    let user: User = create_test_landowner(&mut persistence, "s");
    persistence
        .create_session("token-abc", user.user_id, FAR_FUTURE)
        .unwrap();

    persistence.delete_session("token-abc").unwrap();

    assert!(persistence.get_session_by_token("token-abc").unwrap().is_none());
}

#[test]
fn test_delete_sessions_for_user_leaves_other_users() {
    let mut persistence: Persistence = create_test_persistence();
    let landowner: User = create_test_landowner(&mut persistence, "s");
    let hari: User = create_test_hari(&mut persistence, "s");
    persistence
        .create_session("l-1", landowner.user_id, FAR_FUTURE)
        .unwrap();
    persistence
        .create_session("l-2", landowner.user_id, FAR_FUTURE)
        .unwrap();
    persistence
        .create_session("h-1", hari.user_id, FAR_FUTURE)
        .unwrap();

    let removed: usize = persistence
        .delete_sessions_for_user(landowner.user_id)
        .unwrap();

    assert_eq!(removed, 2);
    assert!(persistence.get_session_by_token("h-1").unwrap().is_some());
}

#[test]
fn test_delete_expired_sessions() {
    let mut persistence: Persistence = create_test_persistence();
    let user: User = create_test_landowner(&mut persistence, "s");
    persistence
        .create_session("old", user.user_id, LONG_AGO)
        .unwrap();
    persistence
        .create_session("fresh", user.user_id, FAR_FUTURE)
        .unwrap();

    let removed: usize = persistence.delete_expired_sessions().unwrap();

    assert_eq!(removed, 1);
    assert!(persistence.get_session_by_token("old").unwrap().is_none());
    assert!(persistence.get_session_by_token("fresh").unwrap().is_some());
}

#[test]
fn test_session_for_unknown_user_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(persistence.create_session("orphan", 999, FAR_FUTURE).is_err());
}

#[test]
fn test_reset_code_lookup_matches_email_and_code() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_reset_code("ali@example.com", "123456", FAR_FUTURE)
        .unwrap();

    let found: ResetCodeData = persistence
        .find_reset_code("ali@example.com", "123456")
        .unwrap()
        .unwrap();
    assert_eq!(found.email, "ali@example.com");
    assert_eq!(found.expires_at, FAR_FUTURE);

    assert!(persistence
        .find_reset_code("ali@example.com", "654321")
        .unwrap()
        .is_none());
    assert!(persistence
        .find_reset_code("other@example.com", "123456")
        .unwrap()
        .is_none());
}

#[test]
fn test_reset_code_lookup_prefers_newest() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_reset_code("ali@example.com", "111111", LONG_AGO)
        .unwrap();
    let newest: i64 = persistence
        .create_reset_code("ali@example.com", "111111", FAR_FUTURE)
        .unwrap();

    let found: ResetCodeData = persistence
        .find_reset_code("ali@example.com", "111111")
        .unwrap()
        .unwrap();
    assert_eq!(found.reset_code_id, newest);
}

#[test]
fn test_delete_reset_code() {
    let mut persistence: Persistence = create_test_persistence();
    let id: i64 = persistence
        .create_reset_code("ali@example.com", "123456", FAR_FUTURE)
        .unwrap();

    persistence.delete_reset_code(id).unwrap();

    assert!(persistence
        .find_reset_code("ali@example.com", "123456")
        .unwrap()
        .is_none());
}

use crate::tests::{alice, alice_profile};
use crate::{AuthStatus, Role, SessionState};

use googletest::assert_that;
use googletest::prelude::eq;

#[test]
fn given_default_state_when_status_then_unauthenticated() {
    let state = SessionState::default();

    assert_that!(state.status(), eq(AuthStatus::Unauthenticated));
    assert!(!state.is_loading());
}

#[test]
fn given_adopted_pair_when_status_then_authenticated() {
    let mut state = SessionState::default();

    state.adopt(alice(), alice_profile());

    assert_that!(state.status(), eq(AuthStatus::Authenticated));
}

#[test]
fn given_authenticated_when_degrade_then_profile_dropped() {
    let mut state = SessionState::default();
    state.adopt(alice(), alice_profile());

    state.degrade(alice());

    assert_that!(state.status(), eq(AuthStatus::DegradedAuthenticated));
    assert!(state.profile().is_none());
    assert_eq!(state.identity(), Some(&alice()));
}

#[test]
fn given_authenticated_when_clear_then_nothing_held() {
    let mut state = SessionState::default();
    state.adopt(alice(), alice_profile());

    state.clear();

    assert_eq!(state, SessionState::default());
}

#[test]
fn given_state_when_serialized_then_roles_and_fields_lowercase() {
    let mut state = SessionState::default();
    state.adopt(alice(), alice_profile());

    let json = serde_json::to_value(&state).unwrap();

    assert_eq!(json["profile"]["role"], "admin");
    assert_eq!(json["identity"]["email"], "alice@breakfree.com");
    assert_eq!(json["loading"], false);
}

#[test]
fn given_role_tags_when_parsed_then_unknown_falls_back_to_user() {
    assert_that!(Role::from_tag("ADMIN"), eq(Role::Admin));
    assert_that!(Role::from_tag("editor"), eq(Role::User));
    assert!(Role::Admin.is_elevated());
    assert!(!Role::User.is_elevated());
}

#[test]
fn given_status_when_serialized_then_snake_case() {
    let json = serde_json::to_string(&AuthStatus::DegradedAuthenticated).unwrap();

    assert_eq!(json, "\"degraded_authenticated\"");
}

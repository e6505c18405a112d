// Integration tests for the login state machine: intent ordering, async
// completion handling, and state/effect delivery semantics.
use authflow::machine::{LoginEffect, LoginIntent, LoginState};
use authflow::testing::constants::{TEST_EMAIL, TEST_PASSWORD};
use authflow::testing::{connect_failure, login_success, machine_against, wait_for_state};
use authflow::AuthError;
use tokio::sync::broadcast::error::TryRecvError;

fn dispatch_valid_credentials(machine: &authflow::LoginStateMachine) {
    machine.dispatch(LoginIntent::EmailChanged(TEST_EMAIL.to_string()));
    machine.dispatch(LoginIntent::PasswordChanged(TEST_PASSWORD.to_string()));
    machine.dispatch(LoginIntent::LoginClicked);
}

#[tokio::test]
async fn test_successful_login_reaches_terminal_state_and_navigates() {
    let (machine, api) = machine_against(vec![Ok(login_success())]);
    let mut states = machine.subscribe_state();
    let mut effects = machine.subscribe_effects();

    dispatch_valid_credentials(&machine);

    let state = wait_for_state(&mut states, |s| s.is_login_successful).await;
    assert!(!state.is_loading);
    assert!(state.login_error.is_none());
    assert!(state.email_error.is_none());
    assert!(state.password_error.is_none());

    assert_eq!(effects.recv().await.unwrap(), LoginEffect::NavigateToHome);

    let requests = api.login_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].email, TEST_EMAIL);
    assert_eq!(requests[0].password, TEST_PASSWORD);
}

#[tokio::test]
async fn test_invalid_form_sets_field_errors_without_network() {
    let (machine, api) = machine_against(Vec::new());
    let mut states = machine.subscribe_state();

    machine.dispatch(LoginIntent::EmailChanged("bad".to_string()));
    machine.dispatch(LoginIntent::PasswordChanged("x".to_string()));
    machine.dispatch(LoginIntent::LoginClicked);

    let state = wait_for_state(&mut states, |s| s.email_error.is_some()).await;
    assert_eq!(state.email_error, Some(AuthError::InvalidEmailFormat));
    assert_eq!(state.password_error, Some(AuthError::WeakPassword));
    assert!(!state.is_loading);
    assert!(!state.is_login_successful);

    assert!(api.login_requests().is_empty());
}

#[tokio::test]
async fn test_transport_failure_surfaces_error_state_and_banner() {
    let (machine, _api) = machine_against(vec![Err(connect_failure())]);
    let mut states = machine.subscribe_state();
    let mut effects = machine.subscribe_effects();

    dispatch_valid_credentials(&machine);

    let state = wait_for_state(&mut states, |s| s.login_error.is_some()).await;
    assert!(!state.is_loading);
    assert!(!state.is_login_successful);
    assert_eq!(
        state.login_error.as_deref(),
        Some("Network connection failed")
    );

    assert_eq!(
        effects.recv().await.unwrap(),
        LoginEffect::ShowError("Network connection failed".to_string())
    );
}

#[tokio::test]
async fn test_second_submit_while_loading_is_a_noop() {
    let (machine, api) = machine_against(vec![Ok(login_success())]);
    let mut states = machine.subscribe_state();
    let mut effects = machine.subscribe_effects();
    api.hold_logins();

    dispatch_valid_credentials(&machine);
    wait_for_state(&mut states, |s| s.is_loading).await;

    // Submit again mid-flight, then process a further intent to prove the
    // duplicate click was consumed without starting a second call.
    machine.dispatch(LoginIntent::LoginClicked);
    machine.dispatch(LoginIntent::TogglePasswordVisibility);
    let state = wait_for_state(&mut states, |s| s.is_password_visible).await;
    assert!(state.is_loading);
    assert_eq!(api.login_requests().len(), 1);

    api.release_login();
    let state = wait_for_state(&mut states, |s| s.is_login_successful).await;
    assert!(!state.is_loading);

    assert_eq!(api.login_requests().len(), 1);
    assert_eq!(effects.recv().await.unwrap(), LoginEffect::NavigateToHome);
    assert!(matches!(effects.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn test_late_subscribers_see_state_but_not_past_effects() {
    let (machine, _api) = machine_against(vec![Ok(login_success())]);
    let mut states = machine.subscribe_state();

    dispatch_valid_credentials(&machine);
    wait_for_state(&mut states, |s| s.is_login_successful).await;

    // The latest snapshot replays to any number of new observers.
    let late_states = machine.subscribe_state();
    assert!(late_states.borrow().is_login_successful);
    let another = machine.subscribe_state();
    assert!(another.borrow().is_login_successful);

    // Effects emitted before subscription are gone for good.
    let mut late_effects = machine.subscribe_effects();
    assert!(matches!(late_effects.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn test_failed_login_then_edit_clears_banner() {
    let (machine, _api) = machine_against(vec![Err(connect_failure())]);
    let mut states = machine.subscribe_state();

    dispatch_valid_credentials(&machine);
    wait_for_state(&mut states, |s| s.login_error.is_some()).await;

    machine.dispatch(LoginIntent::PasswordChanged("another-try1".to_string()));
    let state = wait_for_state(&mut states, |s| s.login_error.is_none()).await;
    assert_eq!(state.password, "another-try1");
}

#[tokio::test]
async fn test_load_screen_discards_a_failed_attempt() {
    let (machine, _api) = machine_against(vec![Err(connect_failure())]);
    let mut states = machine.subscribe_state();

    dispatch_valid_credentials(&machine);
    wait_for_state(&mut states, |s| s.login_error.is_some()).await;

    machine.dispatch(LoginIntent::LoadScreen);
    let state = wait_for_state(&mut states, |s| s.login_error.is_none()).await;
    assert_eq!(state, LoginState::default());
}

//! Login state machine
//!
//! The machine owns a single [`LoginState`] value and mutates it from one
//! event-loop task: intents and async login completions are folded into one
//! internal event stream, so no two mutations ever interleave. State
//! snapshots are published through a `watch` channel (replayable latest
//! value, any number of observers); effects go through a `broadcast` channel
//! (at most once per subscriber, never replayed to late subscribers).

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};

use crate::errors::AuthResult;
use crate::models::UserProfile;
use crate::usecases::LoginUseCase;
use crate::validation::{validate_email, validate_password};

pub mod effect;
pub mod intent;
pub mod state;

pub use effect::LoginEffect;
pub use intent::LoginIntent;
pub use state::LoginState;

/// Buffered effects per subscriber before the oldest is dropped
const EFFECT_CHANNEL_CAPACITY: usize = 16;

/// Everything the event loop reacts to, in strict arrival order
#[derive(Debug)]
enum MachineEvent {
    Intent(LoginIntent),
    LoginFinished(AuthResult<UserProfile>),
    Shutdown,
}

/// Handle to a running login state machine
///
/// Dropping the handle shuts the event loop down; a login call still in
/// flight at that point completes into a closed channel and mutates nothing.
pub struct LoginStateMachine {
    events: mpsc::UnboundedSender<MachineEvent>,
    state_rx: watch::Receiver<LoginState>,
    effects_tx: broadcast::Sender<LoginEffect>,
}

impl LoginStateMachine {
    /// Spawn the event-loop task and return the handle
    #[must_use]
    pub fn spawn(login: Arc<LoginUseCase>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(LoginState::default());
        let (effects_tx, _) = broadcast::channel(EFFECT_CHANNEL_CAPACITY);

        let loop_events = events_tx.clone();
        let loop_effects = effects_tx.clone();
        tokio::spawn(event_loop(
            events_rx,
            loop_events,
            state_tx,
            loop_effects,
            login,
        ));

        Self {
            events: events_tx,
            state_rx,
            effects_tx,
        }
    }

    /// Queue an intent for processing
    ///
    /// Intents are handled strictly in arrival order. Dispatching after the
    /// machine shut down is a no-op.
    pub fn dispatch(&self, intent: LoginIntent) {
        let _ = self.events.send(MachineEvent::Intent(intent));
    }

    /// Observe state snapshots as a replayable latest-value stream
    ///
    /// A new subscriber immediately sees the most recent snapshot.
    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<LoginState> {
        self.state_rx.clone()
    }

    /// The most recent state snapshot
    #[must_use]
    pub fn current_state(&self) -> LoginState {
        self.state_rx.borrow().clone()
    }

    /// Observe effects as an at-most-once stream
    ///
    /// Only effects emitted after subscription are delivered; nothing is
    /// replayed.
    #[must_use]
    pub fn subscribe_effects(&self) -> broadcast::Receiver<LoginEffect> {
        self.effects_tx.subscribe()
    }
}

impl Drop for LoginStateMachine {
    fn drop(&mut self) {
        let _ = self.events.send(MachineEvent::Shutdown);
    }
}

async fn event_loop(
    mut events: mpsc::UnboundedReceiver<MachineEvent>,
    events_tx: mpsc::UnboundedSender<MachineEvent>,
    state_tx: watch::Sender<LoginState>,
    effects_tx: broadcast::Sender<LoginEffect>,
    login: Arc<LoginUseCase>,
) {
    let mut state = LoginState::default();

    while let Some(event) = events.recv().await {
        match event {
            MachineEvent::Intent(intent) => {
                handle_intent(&mut state, intent, &state_tx, &events_tx, &login);
            }
            MachineEvent::LoginFinished(result) => {
                handle_login_finished(&mut state, result, &state_tx, &effects_tx);
            }
            MachineEvent::Shutdown => break,
        }
    }
    log::debug!("login state machine stopped");
}

fn handle_intent(
    state: &mut LoginState,
    intent: LoginIntent,
    state_tx: &watch::Sender<LoginState>,
    events_tx: &mpsc::UnboundedSender<MachineEvent>,
    login: &Arc<LoginUseCase>,
) {
    match intent {
        LoginIntent::LoadScreen => {
            *state = LoginState::default();
            publish(state_tx, state);
        }
        LoginIntent::EmailChanged(email) => {
            state.email = email;
            state.email_error = None;
            state.login_error = None;
            publish(state_tx, state);
        }
        LoginIntent::PasswordChanged(password) => {
            state.password = password;
            state.password_error = None;
            state.login_error = None;
            publish(state_tx, state);
        }
        LoginIntent::TogglePasswordVisibility => {
            state.is_password_visible = !state.is_password_visible;
            publish(state_tx, state);
        }
        LoginIntent::LoginClicked => handle_login_clicked(state, state_tx, events_tx, login),
    }
}

fn handle_login_clicked(
    state: &mut LoginState,
    state_tx: &watch::Sender<LoginState>,
    events_tx: &mpsc::UnboundedSender<MachineEvent>,
    login: &Arc<LoginUseCase>,
) {
    // Re-entrancy guard: a submit while one is in flight changes nothing
    // and triggers no second network call.
    if state.is_loading {
        log::debug!("login already in flight, ignoring submit");
        return;
    }

    let email_error = validate_email(&state.email);
    let password_error = validate_password(&state.password);
    if email_error.is_some() || password_error.is_some() {
        state.email_error = email_error;
        state.password_error = password_error;
        publish(state_tx, state);
        return;
    }

    state.is_loading = true;
    state.email_error = None;
    state.password_error = None;
    state.login_error = None;
    state.is_login_successful = false;
    publish(state_tx, state);

    let use_case = Arc::clone(login);
    let events_tx = events_tx.clone();
    let email = state.email.clone();
    let password = state.password.clone();
    tokio::spawn(async move {
        let result = use_case.run(&email, &password).await;
        // The machine may have shut down while we were waiting; the
        // completion then lands in a closed channel and is discarded.
        let _ = events_tx.send(MachineEvent::LoginFinished(result));
    });
}

fn handle_login_finished(
    state: &mut LoginState,
    result: AuthResult<UserProfile>,
    state_tx: &watch::Sender<LoginState>,
    effects_tx: &broadcast::Sender<LoginEffect>,
) {
    state.is_loading = false;
    match result {
        Ok(profile) => {
            log::info!("login succeeded for user {}", profile.id);
            state.is_login_successful = true;
            state.login_error = None;
            publish(state_tx, state);
            emit(effects_tx, LoginEffect::NavigateToHome);
        }
        Err(error) => {
            log::warn!("login failed: {error}");
            let message = error.to_string();
            state.is_login_successful = false;
            state.login_error = Some(message.clone());
            publish(state_tx, state);
            emit(effects_tx, LoginEffect::ShowError(message));
        }
    }
}

fn publish(state_tx: &watch::Sender<LoginState>, state: &LoginState) {
    // Fails only when every observer is gone; the snapshot is then moot.
    let _ = state_tx.send(state.clone());
}

fn emit(effects_tx: &broadcast::Sender<LoginEffect>, effect: LoginEffect) {
    // Fails only when nobody subscribes; effects are advisory one-shots.
    let _ = effects_tx.send(effect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{machine_against, wait_for_state};

    #[tokio::test]
    async fn test_toggle_flips_password_visibility() {
        let (machine, _api) = machine_against(Vec::new());
        let mut states = machine.subscribe_state();

        machine.dispatch(LoginIntent::TogglePasswordVisibility);
        let state = wait_for_state(&mut states, |s| s.is_password_visible).await;
        assert!(state.is_password_visible);

        machine.dispatch(LoginIntent::TogglePasswordVisibility);
        let state = wait_for_state(&mut states, |s| !s.is_password_visible).await;
        assert!(!state.is_password_visible);
    }

    #[tokio::test]
    async fn test_field_change_clears_field_and_submission_errors() {
        let (machine, _api) = machine_against(Vec::new());
        let mut states = machine.subscribe_state();

        // Provoke both field errors with an invalid form.
        machine.dispatch(LoginIntent::EmailChanged("bad".to_string()));
        machine.dispatch(LoginIntent::LoginClicked);
        let state = wait_for_state(&mut states, |s| s.email_error.is_some()).await;
        assert!(state.password_error.is_some());

        machine.dispatch(LoginIntent::EmailChanged("demo@example.com".to_string()));
        let state = wait_for_state(&mut states, |s| s.email_error.is_none()).await;
        // Only the email error is cleared by an email edit.
        assert!(state.password_error.is_some());

        machine.dispatch(LoginIntent::PasswordChanged("password123".to_string()));
        let state = wait_for_state(&mut states, |s| s.password_error.is_none()).await;
        assert!(state.email_error.is_none());
    }

    #[tokio::test]
    async fn test_load_screen_resets_to_default() {
        let (machine, _api) = machine_against(Vec::new());
        let mut states = machine.subscribe_state();

        machine.dispatch(LoginIntent::EmailChanged("demo@example.com".to_string()));
        machine.dispatch(LoginIntent::TogglePasswordVisibility);
        wait_for_state(&mut states, |s| s.is_password_visible).await;

        machine.dispatch(LoginIntent::LoadScreen);
        let state = wait_for_state(&mut states, |s| s.email.is_empty()).await;
        assert_eq!(state, LoginState::default());
    }

    #[tokio::test]
    async fn test_dispatch_after_drop_is_a_noop() {
        let (machine, _api) = machine_against(Vec::new());
        let states = machine.subscribe_state();
        drop(machine);

        // The loop has shut down; the old snapshot stays observable.
        assert_eq!(*states.borrow(), LoginState::default());
    }
}

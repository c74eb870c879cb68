//! Authentication flow state machine
//!
//! `Unauthenticated -> Pending -> Authenticated(tier)`, with logout returning
//! to `Unauthenticated`. A failed attempt is not its own state; it lands back
//! in `Unauthenticated` with an error message attached. Starting a demo
//! session skips `Pending` entirely because no request leaves the process.

use crate::domain::tier::AccessTier;

/// Where the authentication flow currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    /// A submit is in flight; further submits are suppressed
    Pending,
    Authenticated(AccessTier),
}

impl AuthState {
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Flow state plus the error currently shown on the form
///
/// Pure data, no locking; the access manager serializes mutation. The error
/// tracks the stale-error invariant: it survives only until the user edits an
/// input or a new attempt resolves.
#[derive(Debug, Clone, Default)]
pub struct AuthFlow {
    state: AuthState,
    error: Option<String>,
}

impl AuthFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Enter `Pending`. Refused while another submit is in flight.
    pub fn begin_submit(&mut self) -> Result<(), DoubleSubmit> {
        if self.state.is_pending() {
            return Err(DoubleSubmit);
        }

        self.state = AuthState::Pending;
        self.error = None;
        Ok(())
    }

    /// A submit resolved successfully.
    pub fn complete_success(&mut self, tier: AccessTier) {
        self.state = AuthState::Authenticated(tier);
        self.error = None;
    }

    /// A submit resolved with a failure; the message replaces any prior one.
    pub fn complete_failure(&mut self, message: impl Into<String>) {
        self.state = AuthState::Unauthenticated;
        self.error = Some(message.into());
    }

    /// Demo entry: straight to `Authenticated(Demo)`, no pending phase.
    pub fn enter_demo(&mut self) {
        self.state = AuthState::Authenticated(AccessTier::Demo);
        self.error = None;
    }

    /// The user edited an input field; any displayed error is now stale.
    pub fn edit_input(&mut self) {
        self.error = None;
    }

    /// Abandon an in-flight submit (navigation away). The eventual response
    /// must be discarded by the caller.
    pub fn cancel_pending(&mut self) {
        if self.state.is_pending() {
            self.state = AuthState::Unauthenticated;
        }
    }

    pub fn logout(&mut self) {
        self.state = AuthState::Unauthenticated;
        self.error = None;
    }
}

/// A submit arrived while another was already pending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleSubmit;

//! Access manager - the single convergence point for session production
//!
//! All three entry surfaces (login/signup, team code redemption, demo) drive
//! their producer through this facade. Producers return `Session` values;
//! the manager is the only code that writes the session store, so a failed
//! or abandoned attempt can never leave a partial record behind.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::{
    AccessError, AuthFlow, AuthMode, AuthState, Credentials, Session, TeamCodeStatus,
};
use crate::infrastructure::auth::{
    CredentialAuthenticator, DemoSessionBootstrapper, TeamCodeValidator,
};
use crate::infrastructure::http::ApiClient;
use crate::infrastructure::session_store::SessionStore;

/// What to do when a demo is requested while a real session is current
///
/// The demo entry point must never silently downgrade an authenticated
/// account, so replacement is an explicit choice the caller makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemoOverwrite {
    /// Refuse with a conflict error
    #[default]
    Block,
    /// Replace the current session
    Replace,
}

/// Facade over the producers, the store, and the auth flow state
#[derive(Debug)]
pub struct AccessManager<C: ApiClient> {
    store: Arc<dyn SessionStore>,
    authenticator: CredentialAuthenticator<Arc<C>>,
    validator: TeamCodeValidator<Arc<C>>,
    bootstrapper: DemoSessionBootstrapper,
    flow: Mutex<AuthFlow>,
    // Bumped by logout/cancel; an in-flight submit that observes a bump
    // discards its result instead of writing the store.
    epoch: AtomicU64,
}

impl<C: ApiClient> AccessManager<C> {
    pub fn new(client: Arc<C>, store: Arc<dyn SessionStore>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();

        Self {
            store,
            authenticator: CredentialAuthenticator::new(Arc::clone(&client), base_url.clone()),
            validator: TeamCodeValidator::new(client, base_url),
            bootstrapper: DemoSessionBootstrapper::new(),
            flow: Mutex::new(AuthFlow::new()),
            epoch: AtomicU64::new(0),
        }
    }

    /// Log in with email and password.
    pub async fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Session, AccessError> {
        self.submit(AuthMode::Login, Credentials::login(email, password))
            .await
    }

    /// Create an account, optionally redeeming a team access code.
    pub async fn signup(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        team_code: Option<String>,
    ) -> Result<Session, AccessError> {
        self.submit(
            AuthMode::Signup,
            Credentials::signup(email, password, name, team_code),
        )
        .await
    }

    async fn submit(
        &self,
        mode: AuthMode,
        credentials: Credentials,
    ) -> Result<Session, AccessError> {
        let attempt_epoch = {
            let mut flow = self.flow.lock().unwrap();
            flow.begin_submit()
                .map_err(|_| AccessError::conflict("A sign-in attempt is already in progress"))?;
            self.epoch.load(Ordering::SeqCst)
        };

        let result = self.authenticator.authenticate(mode, &credentials).await;

        let mut flow = self.flow.lock().unwrap();

        // Stale-response guard: the user logged out or navigated away while
        // the request was in flight.
        if self.epoch.load(Ordering::SeqCst) != attempt_epoch {
            tracing::debug!("discarding stale authentication response");
            return Err(AccessError::conflict("The sign-in attempt was cancelled"));
        }

        match result {
            Ok(session) => {
                // The store write is the last effect before the state flip a
                // navigation guard would observe.
                if let Err(e) = self.store.set(session.clone()) {
                    flow.complete_failure(e.to_string());
                    return Err(e);
                }

                flow.complete_success(session.access_tier());
                Ok(session)
            }
            Err(e) => {
                flow.complete_failure(e.to_string());
                Err(e)
            }
        }
    }

    /// Start a locally synthesized demo session.
    ///
    /// Refused while a non-demo session is current unless the caller passes
    /// `DemoOverwrite::Replace`; restarting an existing demo is always fine.
    pub fn start_demo(&self, overwrite: DemoOverwrite) -> Result<Session, AccessError> {
        if overwrite == DemoOverwrite::Block {
            if let Some(current) = self.store.get()? {
                if !current.is_demo() {
                    return Err(AccessError::conflict(
                        "Already signed in; log out before starting a demo",
                    ));
                }
            }
        }

        let session = self.bootstrapper.start_demo();
        self.store.set(session.clone())?;
        self.flow.lock().unwrap().enter_demo();

        Ok(session)
    }

    /// Check a team access code. Purely informational; the store is never
    /// touched.
    pub async fn validate_team_code(&self, code: &str) -> Result<TeamCodeStatus, AccessError> {
        self.validator.validate(code).await
    }

    /// Log out. Idempotent; also discards any in-flight submit.
    ///
    /// The epoch bump and the store clear happen under the flow lock, the
    /// same lock `submit` holds across its epoch check and store write. A
    /// completion that already passed the check finishes its write first and
    /// is then cleared here; one that has not yet checked sees the new epoch
    /// and discards. Either way the store is empty when this returns.
    pub fn logout(&self) -> Result<(), AccessError> {
        let mut flow = self.flow.lock().unwrap();

        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.store.clear()?;
        flow.logout();

        tracing::info!("logged out");
        Ok(())
    }

    /// Abandon an in-flight submit; its eventual response is discarded.
    pub fn cancel_pending(&self) {
        let mut flow = self.flow.lock().unwrap();

        self.epoch.fetch_add(1, Ordering::SeqCst);
        flow.cancel_pending();
    }

    /// The current session, if any.
    pub fn current_session(&self) -> Result<Option<Session>, AccessError> {
        self.store.get()
    }

    pub fn auth_state(&self) -> AuthState {
        self.flow.lock().unwrap().state()
    }

    /// The error currently attached to the form, if any.
    pub fn form_error(&self) -> Option<String> {
        self.flow.lock().unwrap().error().map(str::to_string)
    }

    /// The user edited an input field; any displayed error is now stale.
    pub fn edit_input(&self) {
        self.flow.lock().unwrap().edit_input();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AccessTier;
    use crate::infrastructure::http::mock::MockApiClient;
    use crate::infrastructure::session_store::InMemorySessionStore;

    const BASE: &str = "https://backend.test";

    fn manager(client: MockApiClient) -> AccessManager<MockApiClient> {
        AccessManager::new(
            Arc::new(client),
            Arc::new(InMemorySessionStore::new()),
            BASE,
        )
    }

    fn login_response(id: &str, tier: &str, token: &str) -> serde_json::Value {
        serde_json::json!({
            "access_token": token,
            "user": {"id": id, "email": "a@b.com", "name": "Ada", "accessTier": tier}
        })
    }

    #[tokio::test]
    async fn test_login_writes_store() {
        let client = MockApiClient::new().with_response(
            format!("{}/api/auth/login", BASE),
            login_response("u1", "Free", "tok1"),
        );
        let manager = manager(client);

        let session = manager.login("a@b.com", "secret").await.unwrap();
        assert_eq!(session.token(), "tok1");

        let stored = manager.current_session().unwrap().unwrap();
        assert_eq!(stored.token(), "tok1");
        assert_eq!(stored.access_tier(), AccessTier::Free);
        assert_eq!(manager.auth_state(), AuthState::Authenticated(AccessTier::Free));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_store_untouched() {
        let client = MockApiClient::new()
            .with_rejection(format!("{}/api/auth/login", BASE), "Invalid email or password");
        let manager = manager(client);

        let err = manager.login("a@b.com", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");

        assert!(manager.current_session().unwrap().is_none());
        assert_eq!(manager.auth_state(), AuthState::Unauthenticated);
        assert_eq!(
            manager.form_error(),
            Some("Invalid email or password".to_string())
        );
    }

    #[tokio::test]
    async fn test_failed_login_keeps_prior_session() {
        let client = MockApiClient::new()
            .with_response(
                format!("{}/api/auth/login", BASE),
                login_response("u1", "Unlimited", "tok1"),
            )
            .with_rejection(format!("{}/api/auth/signup", BASE), "Email already registered");
        let manager = manager(client);

        manager.login("a@b.com", "secret").await.unwrap();
        manager
            .signup("a@b.com", "secret", "Ada", None)
            .await
            .unwrap_err();

        // The earlier session survives the failed attempt.
        let stored = manager.current_session().unwrap().unwrap();
        assert_eq!(stored.token(), "tok1");
    }

    #[tokio::test]
    async fn test_new_login_replaces_session_whole() {
        let client = MockApiClient::new().with_response(
            format!("{}/api/auth/login", BASE),
            login_response("u2", "Free", "tok2"),
        );
        let store = Arc::new(InMemorySessionStore::new());
        let manager =
            AccessManager::new(Arc::new(client), Arc::clone(&store) as Arc<dyn SessionStore>, BASE);

        store
            .set(Session::authenticated(
                crate::domain::UserId::new("u1"),
                "Old",
                "old@b.com",
                AccessTier::Unlimited,
                "tok1",
            ))
            .unwrap();

        manager.login("a@b.com", "secret").await.unwrap();

        let stored = manager.current_session().unwrap().unwrap();
        assert_eq!(stored.user_id().as_str(), "u2");
        assert_eq!(stored.access_tier(), AccessTier::Free);
    }

    #[tokio::test]
    async fn test_demo_blocked_over_real_session() {
        let client = MockApiClient::new().with_response(
            format!("{}/api/auth/login", BASE),
            login_response("u1", "Free", "tok1"),
        );
        let manager = manager(client);

        manager.login("a@b.com", "secret").await.unwrap();

        let err = manager.start_demo(DemoOverwrite::Block).unwrap_err();
        assert!(matches!(err, AccessError::Conflict { .. }));

        // The real session is untouched.
        assert!(!manager.current_session().unwrap().unwrap().is_demo());
    }

    #[tokio::test]
    async fn test_demo_replace_is_explicit() {
        let client = MockApiClient::new().with_response(
            format!("{}/api/auth/login", BASE),
            login_response("u1", "Free", "tok1"),
        );
        let manager = manager(client);

        manager.login("a@b.com", "secret").await.unwrap();
        let session = manager.start_demo(DemoOverwrite::Replace).unwrap();

        assert!(session.is_demo());
        assert!(manager.current_session().unwrap().unwrap().is_demo());
        assert_eq!(manager.auth_state(), AuthState::Authenticated(AccessTier::Demo));
    }

    #[test]
    fn test_demo_over_demo_allowed() {
        let manager = manager(MockApiClient::new());

        let first = manager.start_demo(DemoOverwrite::Block).unwrap();
        let second = manager.start_demo(DemoOverwrite::Block).unwrap();

        assert_ne!(first.user_id(), second.user_id());
    }

    #[tokio::test]
    async fn test_team_code_check_never_touches_store() {
        let client = MockApiClient::new()
            .with_rejection(format!("{}/api/auth/team-code/BAD-CODE", BASE), "Not found");
        let manager = manager(client);

        let status = manager.validate_team_code("BAD-CODE").await.unwrap();
        assert!(!status.valid);
        assert!(manager.current_session().unwrap().is_none());

        let again = manager.validate_team_code("BAD-CODE").await.unwrap();
        assert_eq!(status, again);
        assert!(manager.current_session().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_store_and_state() {
        let manager = manager(MockApiClient::new());

        manager.start_demo(DemoOverwrite::Block).unwrap();
        manager.logout().unwrap();
        manager.logout().unwrap(); // idempotent

        assert!(manager.current_session().unwrap().is_none());
        assert_eq!(manager.auth_state(), AuthState::Unauthenticated);
    }

    /// Store whose writes take a while, like the file store under slow IO.
    #[derive(Debug)]
    struct SlowWriteStore {
        inner: InMemorySessionStore,
        write_entered: Arc<std::sync::atomic::AtomicBool>,
        delay: std::time::Duration,
    }

    impl SessionStore for SlowWriteStore {
        fn get(&self) -> Result<Option<Session>, AccessError> {
            self.inner.get()
        }

        fn set(&self, session: Session) -> Result<(), AccessError> {
            self.write_entered.store(true, Ordering::SeqCst);
            std::thread::sleep(self.delay);
            self.inner.set(session)
        }

        fn clear(&self) -> Result<(), AccessError> {
            self.inner.clear()
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_logout_during_store_write_leaves_store_empty() {
        let client = MockApiClient::new().with_response(
            format!("{}/api/auth/login", BASE),
            login_response("u1", "Free", "tok1"),
        );

        let write_entered = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let store = Arc::new(SlowWriteStore {
            inner: InMemorySessionStore::new(),
            write_entered: Arc::clone(&write_entered),
            delay: std::time::Duration::from_millis(200),
        });
        let manager = Arc::new(AccessManager::new(
            Arc::new(client),
            Arc::clone(&store) as Arc<dyn SessionStore>,
            BASE,
        ));

        let login = {
            let manager = Arc::clone(&manager);
            tokio::spawn(async move { manager.login("a@b.com", "secret").await })
        };

        while !write_entered.load(Ordering::SeqCst) {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        // Logout lands while the session write is in progress. It must wait
        // for the write to settle and clear it, never the other way around.
        {
            let manager = Arc::clone(&manager);
            tokio::task::spawn_blocking(move || manager.logout().unwrap())
                .await
                .unwrap();
        }

        // Whatever the login call returned, the write must not outlive the
        // logout.
        let _ = login.await.unwrap();
        assert!(manager.current_session().unwrap().is_none());
        assert_eq!(manager.auth_state(), AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_cancel_with_nothing_in_flight_is_harmless() {
        let client = MockApiClient::new().with_response(
            format!("{}/api/auth/login", BASE),
            login_response("u1", "Free", "tok1"),
        );
        let manager = manager(client);

        manager.cancel_pending();

        // A later login proceeds normally under the new epoch.
        manager.login("a@b.com", "secret").await.unwrap();
        assert!(manager.current_session().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_edit_input_clears_form_error() {
        let client = MockApiClient::new()
            .with_rejection(format!("{}/api/auth/login", BASE), "Invalid email or password");
        let manager = manager(client);

        manager.login("a@b.com", "wrong").await.unwrap_err();
        assert!(manager.form_error().is_some());

        manager.edit_input();
        assert!(manager.form_error().is_none());
    }

    #[tokio::test]
    async fn test_validation_failure_never_dispatches() {
        let manager = manager(MockApiClient::new());

        let err = manager.login("not-an-email", "secret").await.unwrap_err();
        assert!(matches!(err, AccessError::Validation { .. }));
        assert!(manager.current_session().unwrap().is_none());
    }
}

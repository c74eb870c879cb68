use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::domain::{Session, UserId};

const DEMO_ID_SUFFIX_LEN: usize = 12;

/// Demo session producer
///
/// Synthesizes a quota-capped session entirely locally; the no-auth-server
/// fallback path. No network, no failure mode. Like the other producers it
/// only returns the session; whether it may replace an existing one is the
/// access manager's decision.
#[derive(Debug, Default)]
pub struct DemoSessionBootstrapper;

impl DemoSessionBootstrapper {
    pub fn new() -> Self {
        Self
    }

    /// Synthesize a fresh demo session.
    pub fn start_demo(&self) -> Session {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(DEMO_ID_SUFFIX_LEN)
            .map(char::from)
            .collect();

        let user_id = UserId::new(format!("demo-user-{}", suffix.to_lowercase()));

        tracing::info!(user_id = %user_id, "demo session started");

        Session::demo(user_id)
    }
}

//! Three11 access client
//!
//! Session and access-tier resolution for the Three11 content studio. Three
//! entry paths (password login/signup, team-access-code redemption, and a
//! no-backend demo bootstrap) converge on a single canonical [`Session`]
//! record that the rest of the application reads to gate features and
//! quotas.
//!
//! The [`AccessManager`] facade is the only writer of the session store;
//! producers return sessions as plain values, so a failed or abandoned
//! attempt can never leave a partial record behind.

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    AccessError, AccessTier, AuthMode, AuthState, Credentials, Feature, GenerationLimit, Session,
    TeamCodeStatus, TierLimits, UserId,
};
pub use infrastructure::{
    AccessManager, ApiClient, CredentialAuthenticator, DemoOverwrite, DemoSessionBootstrapper,
    FileSessionStore, InMemorySessionStore, ReqwestApiClient, SessionStore, TeamCodeValidator,
};

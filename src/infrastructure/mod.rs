//! Infrastructure layer - HTTP, persistence, producers, and the manager

pub mod auth;
pub mod http;
pub mod logging;
pub mod manager;
pub mod session_store;

pub use auth::{CredentialAuthenticator, DemoSessionBootstrapper, TeamCodeValidator};
pub use http::{ApiClient, ReqwestApiClient};
pub use manager::{AccessManager, DemoOverwrite};
pub use session_store::{FileSessionStore, InMemorySessionStore, SessionStore};

//! Session producers: login/signup, team code lookup, demo bootstrap
//!
//! Each producer returns a value; none of them writes the session store. The
//! access manager is the only writer.

mod authenticator;
mod demo;
mod team_code;

pub use authenticator::CredentialAuthenticator;
pub use demo::DemoSessionBootstrapper;
pub use team_code::TeamCodeValidator;

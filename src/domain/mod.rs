//! Domain layer - entities, policy, and flow rules

pub mod credentials;
pub mod error;
pub mod session;
pub mod team_code;
pub mod tier;

pub use credentials::{AuthMode, CredentialValidationError, Credentials};
pub use error::AccessError;
pub use session::{AuthFlow, AuthState, DoubleSubmit, Session, UserId};
pub use team_code::TeamCodeStatus;
pub use tier::{AccessTier, Feature, GenerationLimit, TierLimits};

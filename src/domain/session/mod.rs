//! Session entity and authentication flow state

mod entity;
mod state;

pub use entity::{Session, UserId};
pub use state::{AuthFlow, AuthState, DoubleSubmit};

//! Credential validation
//!
//! Local checks performed before any request is dispatched. A violation here
//! never reaches the network.

use thiserror::Error;

/// Errors that can occur during credential validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CredentialValidationError {
    #[error("Email is required")]
    EmptyEmail,

    #[error("Email address is not valid")]
    InvalidEmail,

    #[error("Password is required")]
    EmptyPassword,

    #[error("Name is required to create an account")]
    EmptyName,

    #[error("Team code cannot be empty")]
    EmptyTeamCode,
}

/// Validate an email address
///
/// Deliberately shallow: the backend is authoritative, this only catches
/// obvious slips before a round trip.
pub fn validate_email(email: &str) -> Result<(), CredentialValidationError> {
    if email.trim().is_empty() {
        return Err(CredentialValidationError::EmptyEmail);
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or(CredentialValidationError::InvalidEmail)?;

    if local.is_empty() || domain.is_empty() {
        return Err(CredentialValidationError::InvalidEmail);
    }

    Ok(())
}

/// Validate a password
pub fn validate_password(password: &str) -> Result<(), CredentialValidationError> {
    if password.is_empty() {
        return Err(CredentialValidationError::EmptyPassword);
    }

    Ok(())
}

/// Validate a display name for signup
pub fn validate_name(name: &str) -> Result<(), CredentialValidationError> {
    if name.trim().is_empty() {
        return Err(CredentialValidationError::EmptyName);
    }

    Ok(())
}

/// Validate a team access code before lookup
///
/// The code itself is opaque; only emptiness is checked.
pub fn validate_team_code(code: &str) -> Result<(), CredentialValidationError> {
    if code.trim().is_empty() {
        return Err(CredentialValidationError::EmptyTeamCode);
    }

    Ok(())
}

//! Transient credentials for login and signup

mod validation;

pub use validation::{
    validate_email, validate_name, validate_password, validate_team_code,
    CredentialValidationError,
};

use crate::domain::error::AccessError;

/// Which authentication endpoint a submit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

/// Credentials for a single authentication request
///
/// Never persisted; dropped as soon as the request resolves. `name` is only
/// meaningful for signup, `team_code` is optional and forwarded opaquely for
/// the backend to resolve.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub team_code: Option<String>,
}

impl Credentials {
    /// Login credentials.
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: None,
            team_code: None,
        }
    }

    /// Signup credentials, optionally carrying a team access code.
    pub fn signup(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        team_code: Option<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: Some(name.into()),
            team_code,
        }
    }

    /// Run the local checks appropriate for `mode`.
    pub fn validate(&self, mode: AuthMode) -> Result<(), AccessError> {
        validate_email(&self.email).map_err(|e| AccessError::validation(e.to_string()))?;
        validate_password(&self.password).map_err(|e| AccessError::validation(e.to_string()))?;

        if mode == AuthMode::Signup {
            validate_name(self.name.as_deref().unwrap_or(""))
                .map_err(|e| AccessError::validation(e.to_string()))?;

            if let Some(code) = &self.team_code {
                validate_team_code(code).map_err(|e| AccessError::validation(e.to_string()))?;
            }
        }

        Ok(())
    }
}

// Keep passwords out of logs and panic messages.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("team_code", &self.team_code)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_validation() {
        let creds = Credentials::login("a@b.com", "secret");
        assert!(creds.validate(AuthMode::Login).is_ok());
    }

    #[test]
    fn test_login_rejects_empty_password() {
        let creds = Credentials::login("a@b.com", "");
        assert!(creds.validate(AuthMode::Login).is_err());
    }

    #[test]
    fn test_signup_requires_name() {
        let creds = Credentials::login("a@b.com", "secret");
        assert!(creds.validate(AuthMode::Signup).is_err());

        let creds = Credentials::signup("a@b.com", "secret", "Ada", None);
        assert!(creds.validate(AuthMode::Signup).is_ok());
    }

    #[test]
    fn test_signup_rejects_blank_team_code() {
        let creds = Credentials::signup("a@b.com", "secret", "Ada", Some("  ".to_string()));
        assert!(creds.validate(AuthMode::Signup).is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::login("a@b.com", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}

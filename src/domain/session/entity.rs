//! Session entity
//!
//! The canonical authenticated-state record. Exactly one session is current
//! at any time; every feature gate and navigation guard reads it through the
//! session store rather than keeping its own copy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::tier::{AccessTier, GenerationLimit};

/// Opaque account identifier
///
/// `demo-user-<random>` for demo sessions; otherwise whatever the backend
/// issued. Never parsed or validated client-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The canonical record of who is using the application and at what tier
///
/// Consumers must read `token`, the user fields, and `is_demo` together; the
/// token alone does not distinguish a synthetic demo credential from a real
/// one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique account identifier
    user_id: UserId,
    /// Informational only, never used for authorization
    display_name: String,
    /// Informational only, never used for authorization
    email: String,
    /// Authorization level governing quota and feature visibility
    access_tier: AccessTier,
    /// Opaque bearer credential; empty for demo sessions
    token: String,
    /// Generations consumed so far
    generations_used: u32,
    /// Quota for this session; `-1` sentinel when serialized means unlimited
    generation_limit: GenerationLimit,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Whether this session was synthesized locally without a backend account
    is_demo: bool,
}

impl Session {
    /// Build a session from a successful backend authentication.
    ///
    /// The quota is derived from the tier policy table; the backend does not
    /// send one.
    pub fn authenticated(
        user_id: UserId,
        display_name: impl Into<String>,
        email: impl Into<String>,
        access_tier: AccessTier,
        token: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            email: email.into(),
            access_tier,
            token: token.into(),
            generations_used: 0,
            generation_limit: access_tier.limits().generation_limit,
            created_at: Utc::now(),
            is_demo: false,
        }
    }

    /// Build a locally synthesized demo session.
    pub fn demo(user_id: UserId) -> Self {
        let tier = AccessTier::Demo;

        Self {
            user_id,
            display_name: "Demo".to_string(),
            email: String::new(),
            access_tier: tier,
            token: String::new(),
            generations_used: 0,
            generation_limit: tier.limits().generation_limit,
            created_at: Utc::now(),
            is_demo: true,
        }
    }

    // Getters

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn access_tier(&self) -> AccessTier {
        self.access_tier
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn generations_used(&self) -> u32 {
        self.generations_used
    }

    pub fn generation_limit(&self) -> GenerationLimit {
        self.generation_limit
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_demo(&self) -> bool {
        self.is_demo
    }

    /// Whether the session has used up its generation quota.
    pub fn quota_exhausted(&self) -> bool {
        self.generation_limit.is_exhausted(self.generations_used)
    }

    /// Record one consumed generation.
    pub fn record_generation(&mut self) {
        self.generations_used = self.generations_used.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tier::Feature;

    #[test]
    fn test_authenticated_session_derives_quota_from_tier() {
        let session = Session::authenticated(
            UserId::new("u1"),
            "Ada",
            "ada@example.com",
            AccessTier::Free,
            "tok1",
        );

        assert_eq!(session.access_tier(), AccessTier::Free);
        assert_eq!(session.generation_limit(), GenerationLimit::Limited(25));
        assert_eq!(session.generations_used(), 0);
        assert_eq!(session.token(), "tok1");
        assert!(!session.is_demo());
    }

    #[test]
    fn test_demo_session_shape() {
        let session = Session::demo(UserId::new("demo-user-abc123"));

        assert_eq!(session.access_tier(), AccessTier::Demo);
        assert_eq!(session.generation_limit(), GenerationLimit::Limited(5));
        assert_eq!(session.generations_used(), 0);
        assert!(session.token().is_empty());
        assert!(session.is_demo());
    }

    #[test]
    fn test_quota_exhaustion() {
        let mut session = Session::demo(UserId::new("demo-user-x"));

        for _ in 0..5 {
            assert!(!session.quota_exhausted());
            session.record_generation();
        }

        assert!(session.quota_exhausted());
    }

    #[test]
    fn test_unlimited_tier_never_exhausts() {
        let session = Session::authenticated(
            UserId::new("u2"),
            "Lin",
            "lin@example.com",
            AccessTier::TeamMember,
            "tok2",
        );

        assert_eq!(session.generation_limit(), GenerationLimit::Unlimited);
        assert!(!session.quota_exhausted());
        assert!(session.access_tier().has_feature(Feature::VoiceStudio));
    }

    #[test]
    fn test_serialized_limit_uses_sentinel() {
        let session = Session::authenticated(
            UserId::new("u3"),
            "Sam",
            "sam@example.com",
            AccessTier::Unlimited,
            "tok3",
        );

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["generation_limit"], -1);

        let restored: Session = serde_json::from_value(json).unwrap();
        assert_eq!(restored, session);
    }
}

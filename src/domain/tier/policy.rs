//! Access tier policy
//!
//! Pure mapping from an access tier to its generation quota and feature set.
//! This is the single table every feature gate in the application consults;
//! nothing here performs IO or can fail.

use serde::{Deserialize, Serialize};

/// Quota for demo sessions
pub const DEMO_GENERATION_LIMIT: u32 = 5;

/// Quota for free accounts
pub const FREE_GENERATION_LIMIT: u32 = 25;

/// Authorization level of a session
///
/// Serialized names match the backend wire format exactly (`"TeamMember"`,
/// not `"team_member"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AccessTier {
    /// Locally synthesized, quota-capped session with no backend account
    Demo,
    /// Default tier for a plain signup
    #[default]
    Free,
    /// Granted by redeeming a team access code at signup
    TeamMember,
    /// Team administrators and paid unlimited accounts
    Unlimited,
}

impl AccessTier {
    /// Resolve the quota and feature set for this tier.
    pub fn limits(self) -> TierLimits {
        match self {
            Self::Demo => TierLimits {
                generation_limit: GenerationLimit::Limited(DEMO_GENERATION_LIMIT),
                features: &[Feature::Generation],
            },
            Self::Free => TierLimits {
                generation_limit: GenerationLimit::Limited(FREE_GENERATION_LIMIT),
                features: &[Feature::Generation],
            },
            Self::TeamMember => TierLimits {
                generation_limit: GenerationLimit::Unlimited,
                features: PREMIUM_FEATURES,
            },
            Self::Unlimited => TierLimits {
                generation_limit: GenerationLimit::Unlimited,
                features: ALL_FEATURES,
            },
        }
    }

    /// Check whether this tier grants a feature.
    pub fn has_feature(self, feature: Feature) -> bool {
        self.limits().features.contains(&feature)
    }
}

impl std::fmt::Display for AccessTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Demo => write!(f, "Demo"),
            Self::Free => write!(f, "Free"),
            Self::TeamMember => write!(f, "TeamMember"),
            Self::Unlimited => write!(f, "Unlimited"),
        }
    }
}

/// Product surfaces a tier can unlock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Base content generation
    Generation,
    /// Capture studio
    CaptureStudio,
    /// Voice studio
    VoiceStudio,
    /// Trend insights dashboard
    TrendInsights,
    /// Team member and code administration
    TeamAdministration,
}

const PREMIUM_FEATURES: &[Feature] = &[
    Feature::Generation,
    Feature::CaptureStudio,
    Feature::VoiceStudio,
    Feature::TrendInsights,
];

const ALL_FEATURES: &[Feature] = &[
    Feature::Generation,
    Feature::CaptureStudio,
    Feature::VoiceStudio,
    Feature::TrendInsights,
    Feature::TeamAdministration,
];

/// Generation quota, finite or uncapped
///
/// On the wire and in the persisted session record this is an `i64` with `-1`
/// meaning unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum GenerationLimit {
    Limited(u32),
    Unlimited,
}

impl GenerationLimit {
    /// Whether `used` generations exhaust this limit.
    pub fn is_exhausted(self, used: u32) -> bool {
        match self {
            Self::Limited(limit) => used >= limit,
            Self::Unlimited => false,
        }
    }
}

impl From<GenerationLimit> for i64 {
    fn from(limit: GenerationLimit) -> Self {
        match limit {
            GenerationLimit::Limited(n) => i64::from(n),
            GenerationLimit::Unlimited => -1,
        }
    }
}

impl TryFrom<i64> for GenerationLimit {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Unlimited),
            n if n >= 0 => u32::try_from(n)
                .map(Self::Limited)
                .map_err(|_| format!("generation limit out of range: {}", n)),
            n => Err(format!("invalid generation limit: {}", n)),
        }
    }
}

impl std::fmt::Display for GenerationLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Limited(n) => write!(f, "{}", n),
            Self::Unlimited => write!(f, "unlimited"),
        }
    }
}

/// Quota and feature set granted by a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierLimits {
    pub generation_limit: GenerationLimit,
    pub features: &'static [Feature],
}

//! Access tier policy

mod policy;

pub use policy::{
    AccessTier, Feature, GenerationLimit, TierLimits, DEMO_GENERATION_LIMIT, FREE_GENERATION_LIMIT,
};

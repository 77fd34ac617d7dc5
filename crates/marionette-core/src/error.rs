//! Error types for the sampling core.

use serde::{Deserialize, Serialize};

/// Error type covering playback misuse and corrupt asset data.
///
/// Structural blend incompatibility and curve non-convergence are not errors:
/// the former falls back to single-animation sampling, the latter to
/// bisection. Everything here aborts the triggering call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SampleError {
    /// Animation name not present on the entity
    #[error("animation not found: {name}")]
    AnimationNotFound { name: String },

    /// Entity index out of range for the model
    #[error("entity index {index} out of range")]
    EntityNotFound { index: usize },

    /// Entity declares no animations at all
    #[error("entity '{entity}' has no animations to play")]
    NoAnimations { entity: String },

    /// Animation has no mainline keys to sample
    #[error("animation '{animation}' has an empty mainline")]
    EmptyMainline { animation: String },

    /// Mainline reference points at a timeline that does not exist
    #[error("animation '{animation}' mainline key {key} references missing timeline {timeline}")]
    DanglingTimeline {
        animation: String,
        key: usize,
        timeline: usize,
    },

    /// Mainline reference points at a timeline key that does not exist
    #[error("timeline '{timeline}' in animation '{animation}' has no key {key}")]
    DanglingTimelineKey {
        animation: String,
        timeline: String,
        key: usize,
    },

    /// A bone reference resolved to a non-bone timeline key
    #[error("timeline '{timeline}' in animation '{animation}' is referenced as a bone but holds object data")]
    NotABone {
        animation: String,
        timeline: String,
    },

    /// An object reference resolved to a bone timeline key
    #[error("timeline '{timeline}' in animation '{animation}' is referenced as an object but holds bone data")]
    NotAnObject {
        animation: String,
        timeline: String,
    },

    /// A bone or object reference names a parent slot that is not resolved
    /// before it
    #[error("reference {reference} in animation '{animation}' names unresolved parent {parent}")]
    DanglingParent {
        animation: String,
        reference: usize,
        parent: usize,
    },

    /// A sprite key carries no asset reference to draw
    #[error("sprite timeline '{timeline}' in animation '{animation}' has a key without an asset")]
    MissingAsset {
        animation: String,
        timeline: String,
    },

    /// An instance object points outside the model's entity/animation tables
    #[error("instance object on timeline '{timeline}' in animation '{animation}' references a missing target")]
    MissingInstanceTarget {
        animation: String,
        timeline: String,
    },

    /// Instance nesting exceeded the configured depth limit
    #[error("instance recursion deeper than {limit} while sampling animation '{animation}'")]
    RecursionLimit { animation: String, limit: usize },

    /// A variable line references a definition the entity does not declare
    #[error("variable line {index} in animation '{animation}' references a missing definition")]
    DanglingVarDef { animation: String, index: usize },
}

impl SampleError {
    /// Get error category for logging/metrics
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::AnimationNotFound { .. }
            | Self::EntityNotFound { .. }
            | Self::NoAnimations { .. } => "playback",
            Self::EmptyMainline { .. }
            | Self::DanglingTimeline { .. }
            | Self::DanglingTimelineKey { .. }
            | Self::NotABone { .. }
            | Self::NotAnObject { .. }
            | Self::DanglingParent { .. }
            | Self::MissingAsset { .. }
            | Self::MissingInstanceTarget { .. }
            | Self::RecursionLimit { .. }
            | Self::DanglingVarDef { .. } => "data",
        }
    }
}

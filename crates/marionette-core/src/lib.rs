//! Marionette Animation Core (renderer-agnostic)
//!
//! A deterministic, time-driven skeletal animation sampler: given an
//! immutable animation model (hierarchical bones, attached objects,
//! keyframe tracks, timing curves, and auxiliary variable/tag/event/sound
//! tracks) and a query time, it reconstructs the exact pose and side-channel
//! state visible at that instant, and can blend two animations during a
//! transition. Asset loading, format parsing and rendering live in adapter
//! crates; this core only evaluates declarative keyframe data into flat
//! snapshots.

pub mod config;
pub mod curve;
pub mod data;
pub mod error;
pub mod event;
pub mod player;
pub mod sampler;
pub mod snapshot;
pub mod spatial;

// Re-export common types for consumers (adapters)
pub use config::Config;
pub use curve::Curve;
pub use data::{
    Animation, AssetRef, BoneRef, Entity, EventLine, InstanceRef, KeyData, MainlineKey, Meta,
    Model, ObjectData, ObjectInfo, ObjectKind, ObjectRef, SoundKey, SoundLine, TagKey, TagLine,
    Timeline, TimelineKey, VarDef, VarKey, VarLine, VarValue,
};
pub use error::SampleError;
pub use event::{EventDispatcher, Listener, PlaybackEvent};
pub use player::Player;
pub use sampler::{sample_metadata, sample_pose, sample_pose_blended};
pub use snapshot::{BoxEntry, MetadataSnapshot, PoseSnapshot, SoundCue, VisualEntry};
pub use spatial::{closer_angle, spin_angle, Spatial};

/// Sampling core result type
pub type Result<T> = core::result::Result<T, SampleError>;

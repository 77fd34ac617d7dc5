//! Output contracts published by a player update.
//!
//! Snapshots carry the fully resolved pose and side-channel state for one
//! update and are recomputed from scratch every call, never patched. The
//! player clears and refills its own buffers, so consumers must treat a
//! published snapshot as read-only until the next update.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::data::{AssetRef, VarValue};
use crate::spatial::Spatial;

/// One drawable entry of the pose, in world space, in paint order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualEntry {
    pub asset: AssetRef,
    pub spatial: Spatial,
    pub pivot: [f32; 2],
}

/// A resolved collision rectangle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxEntry {
    pub spatial: Spatial,
    pub pivot: [f32; 2],
    pub size: [f32; 2],
}

/// The spatial result of sampling one animation instant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseSnapshot {
    /// Paint-ordered drawables (z order of the top-level mainline key, with
    /// embedded instances spliced in place).
    pub visuals: Vec<VisualEntry>,
    /// Named reference points.
    pub points: HashMap<String, Spatial>,
    /// Collision boxes keyed by the entity's object-info index.
    pub boxes: HashMap<usize, BoxEntry>,
}

impl PoseSnapshot {
    pub fn with_capacity(cfg: &Config) -> Self {
        Self {
            visuals: Vec::with_capacity(cfg.visuals_capacity),
            points: HashMap::new(),
            boxes: HashMap::new(),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.visuals.clear();
        self.points.clear();
        self.boxes.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty() && self.points.is_empty() && self.boxes.is_empty()
    }
}

/// An emitted sound cue: what to play and how.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoundCue {
    pub asset: AssetRef,
    pub volume: f32,
    pub panning: f32,
}

/// Variable, tag and trigger state for one update.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataSnapshot {
    pub animation_vars: HashMap<String, VarValue>,
    /// Per-object variables keyed by timeline name.
    pub object_vars: HashMap<String, HashMap<String, VarValue>>,
    pub animation_tags: Vec<String>,
    pub object_tags: HashMap<String, Vec<String>>,
    /// Events whose key time was crossed by this update, in track order.
    pub events: Vec<String>,
    /// Sound cues triggered by this update.
    pub sounds: Vec<SoundCue>,
}

impl MetadataSnapshot {
    #[inline]
    pub fn clear(&mut self) {
        self.animation_vars.clear();
        self.object_vars.clear();
        self.animation_tags.clear();
        self.object_tags.clear();
        self.events.clear();
        self.sounds.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.animation_vars.is_empty()
            && self.object_vars.is_empty()
            && self.animation_tags.is_empty()
            && self.object_tags.is_empty()
            && self.events.is_empty()
            && self.sounds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_empties_every_table() {
        let mut pose = PoseSnapshot::default();
        pose.points.insert("tip".into(), Spatial::default());
        pose.visuals.push(VisualEntry {
            asset: AssetRef::default(),
            spatial: Spatial::default(),
            pivot: [0.0, 0.0],
        });
        assert!(!pose.is_empty());
        pose.clear();
        assert!(pose.is_empty());

        let mut meta = MetadataSnapshot::default();
        meta.events.push("footstep".into());
        meta.clear();
        assert!(meta.is_empty());
    }
}

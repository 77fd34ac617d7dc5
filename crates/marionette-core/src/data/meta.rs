//! Auxiliary metadata tracks: variables, tags, events and sound cues.
//! Independent of the spatial pose; sampled by `sampler::meta`.

use serde::{Deserialize, Serialize};

use crate::data::model::VarValue;
use crate::data::timeline::AssetRef;

/// Variable and tag tracks attached to an animation or a single timeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub varlines: Vec<VarLine>,
    #[serde(default)]
    pub taglines: Vec<TagLine>,
}

impl Meta {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.varlines.is_empty() && self.taglines.is_empty()
    }
}

/// Keyframed values for one variable definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VarLine {
    /// Index into the owning entity's variable definitions.
    pub def: u32,
    pub keys: Vec<VarKey>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VarKey {
    pub time: f32,
    pub value: VarValue,
}

/// Discrete tag sets; the set attached to the latest key at or before the
/// query time is active verbatim, no interpolation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TagLine {
    pub keys: Vec<TagKey>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TagKey {
    pub time: f32,
    pub tags: Vec<String>,
}

/// A named trigger track; the event fires when an update window crosses a
/// key time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLine {
    pub name: String,
    pub keys: Vec<f32>,
}

/// Trigger track for sound cues.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundLine {
    pub name: String,
    pub keys: Vec<SoundKey>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoundKey {
    pub time: f32,
    /// Keys without the flag are decorative and never emitted.
    pub trigger: bool,
    pub asset: AssetRef,
    pub volume: f32,
    pub panning: f32,
}

use serde::{Deserialize, Serialize};

use crate::curve::Curve;
use crate::data::meta::{EventLine, Meta, SoundLine};
use crate::data::timeline::Timeline;
use crate::data::{key_after, key_at};

/// One keyframed animation owned by an entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub name: String,
    /// Total duration, always > 0. Looping interpolation wraps from the last
    /// key back to the first across `length == 0`.
    pub length: f32,
    #[serde(default)]
    pub looping: bool,
    /// Top-level track: which bones/objects are live per key, and in what
    /// paint order.
    pub mainline_keys: Vec<MainlineKey>,
    #[serde(default)]
    pub timelines: Vec<Timeline>,
    #[serde(default)]
    pub eventlines: Vec<EventLine>,
    #[serde(default)]
    pub soundlines: Vec<SoundLine>,
    #[serde(default)]
    pub meta: Meta,
}

impl Animation {
    /// Bracketing mainline key index for a query time.
    #[inline]
    pub fn mainline_key_at(&self, time: f32) -> Option<usize> {
        key_at(&self.mainline_keys, time, |k| k.time)
    }

    /// The mainline key after `index`, honoring the looping flag.
    #[inline]
    pub fn mainline_key_after(&self, index: usize) -> Option<usize> {
        key_after(index, self.mainline_keys.len(), self.looping)
    }
}

/// A mainline key: timestamp, segment curve, and the bone/object references
/// active until the next key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MainlineKey {
    pub time: f32,
    #[serde(default)]
    pub curve: Curve,
    #[serde(default)]
    pub bone_refs: Vec<BoneRef>,
    /// Sorted by `z_index`; this order is the paint order.
    #[serde(default)]
    pub object_refs: Vec<ObjectRef>,
}

/// Reference into a bone timeline. `parent` < 0 means unparented; otherwise
/// it names an earlier slot in the same key's bone list (forward-only).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoneRef {
    pub parent: i32,
    pub timeline: u32,
    pub key: u32,
}

/// Reference into an object timeline, with its paint position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub parent: i32,
    pub timeline: u32,
    pub key: u32,
    pub z_index: u32,
}

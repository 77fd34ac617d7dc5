use serde::{Deserialize, Serialize};

use crate::curve::Curve;
use crate::data::meta::Meta;
use crate::data::model::ObjectKind;
use crate::data::{key_after, key_at};
use crate::spatial::{lerp, Spatial};

/// A per-bone or per-object keyframe channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub name: String,
    #[serde(default)]
    pub kind: ObjectKind,
    /// Index into the entity's object-info table, when this channel animates
    /// a defined object type (boxes use it as their snapshot key).
    #[serde(default)]
    pub obj: Option<u32>,
    #[serde(default)]
    pub meta: Meta,
    pub keys: Vec<TimelineKey>,
}

impl Timeline {
    /// Bracketing key index for a query time.
    #[inline]
    pub fn key_at(&self, time: f32) -> Option<usize> {
        key_at(&self.keys, time, |k| k.time)
    }

    /// The key after `index`, honoring the owning animation's looping flag.
    #[inline]
    pub fn key_after(&self, index: usize, looping: bool) -> Option<usize> {
        key_after(index, self.keys.len(), looping)
    }
}

/// One timeline key: timestamp, segment curve, rotation direction and the
/// sampled payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineKey {
    pub time: f32,
    #[serde(default)]
    pub curve: Curve,
    /// +1 clockwise, -1 counter-clockwise, 0 = no rotation interpolation.
    #[serde(default = "default_spin")]
    pub spin: i32,
    pub data: KeyData,
}

fn default_spin() -> i32 {
    1
}

/// Payload of a timeline key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum KeyData {
    Bone(Spatial),
    Object(ObjectData),
}

impl KeyData {
    #[inline]
    pub fn as_bone(&self) -> Option<&Spatial> {
        match self {
            KeyData::Bone(s) => Some(s),
            KeyData::Object(_) => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&ObjectData> {
        match self {
            KeyData::Object(o) => Some(o),
            KeyData::Bone(_) => None,
        }
    }
}

/// Opaque folder/file identity pair naming a drawable or playable asset.
/// Resolution to real resources happens outside the sampler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetRef {
    pub folder: u32,
    pub file: u32,
}

/// An embedded sub-animation: another entity's animation played as an
/// object, at local time ratio `t` of its own length.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstanceRef {
    pub entity: u32,
    pub animation: u32,
    pub t: f32,
}

/// Object-key payload: spatial plus object-specific fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectData {
    pub spatial: Spatial,
    #[serde(default)]
    pub pivot: [f32; 2],
    #[serde(default)]
    pub asset: Option<AssetRef>,
    #[serde(default)]
    pub instance: Option<InstanceRef>,
}

impl ObjectData {
    /// Blend two object payloads by `f`. Identity fields (asset, instance
    /// target) cannot interpolate and carry over from `self`; the instance
    /// time ratio does interpolate.
    pub fn interpolate(&self, other: &ObjectData, f: f32, spin: i32) -> ObjectData {
        ObjectData {
            spatial: self.spatial.interpolate(&other.spatial, f, spin),
            pivot: [
                lerp(self.pivot[0], other.pivot[0], f),
                lerp(self.pivot[1], other.pivot[1], f),
            ],
            asset: self.asset,
            instance: match (self.instance, other.instance) {
                (Some(a), Some(b)) => Some(InstanceRef {
                    t: lerp(a.t, b.t, f),
                    ..a
                }),
                (a, _) => a,
            },
        }
    }
}

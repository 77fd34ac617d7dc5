use serde::{Deserialize, Serialize};

use crate::data::Animation;
use crate::spatial::lerp;

/// Root asset: the full set of entities shipped by one animation document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub entities: Vec<Entity>,
}

impl Model {
    #[inline]
    pub fn entity(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }
}

/// A named bundle of animations plus the object-type and variable
/// definitions shared across them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(default)]
    pub object_infos: Vec<ObjectInfo>,
    #[serde(default)]
    pub var_defs: Vec<VarDef>,
    pub animations: Vec<Animation>,
}

impl Entity {
    /// Look up an animation by name.
    #[inline]
    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.animations.iter().find(|a| a.name == name)
    }

    /// Look up an animation's index by name.
    #[inline]
    pub fn animation_index(&self, name: &str) -> Option<usize> {
        self.animations.iter().position(|a| a.name == name)
    }
}

/// What kind of node a timeline animates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    #[default]
    Sprite,
    Bone,
    /// Indexed collision rectangle.
    Box,
    /// Named reference point.
    Point,
    Sound,
    /// Embedded sub-entity animation.
    Instance,
}

/// Per-object-type definition owned by the entity (box sizes etc.).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectInfo {
    pub name: String,
    pub kind: ObjectKind,
    #[serde(default)]
    pub size: [f32; 2],
}

/// Declaration of an animation variable with its static default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VarDef {
    pub name: String,
    pub default: VarValue,
}

/// A typed variable value. Numeric variants interpolate; strings never do.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum VarValue {
    Str(String),
    Int(i32),
    Float(f32),
}

impl VarValue {
    /// Blend toward `other` by `f`. The earlier value's type tag carries
    /// forward unchanged; mismatched or string pairs hold the earlier value.
    pub fn interpolate(&self, other: &VarValue, f: f32) -> VarValue {
        match (self, other) {
            (VarValue::Float(a), VarValue::Float(b)) => VarValue::Float(lerp(*a, *b, f)),
            (VarValue::Int(a), VarValue::Int(b)) => {
                VarValue::Int(lerp(*a as f32, *b as f32, f).round() as i32)
            }
            _ => self.clone(),
        }
    }
}

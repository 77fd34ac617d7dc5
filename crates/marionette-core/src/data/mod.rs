//! Immutable animation asset model.
//!
//! Supplied by an external asset provider, already validated: key times are
//! strictly ordered per track, mainline object references arrive sorted by
//! z-order, and cross references resolve. The sampler trusts these
//! invariants and does not re-validate them.

mod animation;
mod meta;
mod model;
mod timeline;

pub use animation::{Animation, BoneRef, MainlineKey, ObjectRef};
pub use meta::{EventLine, Meta, SoundKey, SoundLine, TagKey, TagLine, VarKey, VarLine};
pub use model::{Entity, Model, ObjectInfo, ObjectKind, VarDef, VarValue};
pub use timeline::{AssetRef, InstanceRef, KeyData, ObjectData, Timeline, TimelineKey};

/// Index of the last key whose time is at or before `time`, resolving ties
/// to the later index. A query before the whole track lands on the final
/// key, which is what a looping track whose first key is not at 0 needs.
/// `None` only for an empty track.
pub(crate) fn key_at<T>(keys: &[T], time: f32, time_of: impl Fn(&T) -> f32) -> Option<usize> {
    if keys.is_empty() {
        return None;
    }
    let mut found = None;
    for (i, key) in keys.iter().enumerate() {
        if time_of(key) > time {
            break;
        }
        found = Some(i);
    }
    found.or(Some(keys.len() - 1))
}

/// Index of the key after `index`, wrapping to 0 only on looping tracks.
/// `None` for tracks that cannot interpolate past `index`.
pub(crate) fn key_after(index: usize, len: usize, looping: bool) -> Option<usize> {
    if len < 2 {
        return None;
    }
    if index + 1 < len {
        Some(index + 1)
    } else if looping {
        Some(0)
    } else {
        None
    }
}

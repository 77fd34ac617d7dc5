//! Two-animation blend sampling.
//!
//! Samples both animations independently and merges the poses by a blend
//! factor. Blending is best-effort: structurally incompatible bracketing
//! keys fall back silently to single-animation sampling of the first
//! animation. Rotation merges take the shortest path (closer-angle), not
//! the authored spin; two unrelated animations have no shared rotation
//! direction to preserve.

use log::warn;

use crate::config::Config;
use crate::data::{Animation, Entity, InstanceRef, Model, ObjectData};
use crate::error::SampleError;
use crate::sampler::pose::{
    locate, place_object, resolve_bones, sample_object, sample_pose, timeline_for,
};
use crate::snapshot::PoseSnapshot;
use crate::spatial::{closer_angle, lerp, Spatial};
use crate::Result;

/// Sample `first` and `second` at the same proportional instant and merge
/// by `factor` (0 = first, 1 = second). `time` is expressed against
/// `first`'s timeline and rescaled into `second`'s.
#[allow(clippy::too_many_arguments)]
pub fn sample_pose_blended(
    model: &Model,
    entity: &Entity,
    first: &Animation,
    second: &Animation,
    time: f32,
    factor: f32,
    parent: Option<&Spatial>,
    out: &mut PoseSnapshot,
    cfg: &Config,
) -> Result<()> {
    if std::ptr::eq(first, second) {
        return sample_pose(model, entity, first, time, parent, out, cfg);
    }
    let factor = factor.clamp(0.0, 1.0);
    let time_second = time / first.length * second.length;

    let (first_index, first_adjusted) = locate(first, time)?;
    let (second_index, second_adjusted) = locate(second, time_second)?;
    let key_first = &first.mainline_keys[first_index];
    let key_second = &second.mainline_keys[second_index];

    if key_first.bone_refs.len() != key_second.bone_refs.len()
        || key_first.object_refs.len() != key_second.object_refs.len()
    {
        warn!(
            "animations '{}' and '{}' are structurally incompatible, sampling '{}' alone",
            first.name, second.name, first.name
        );
        return sample_pose(model, entity, first, time, parent, out, cfg);
    }

    let bones_first = resolve_bones(first, first_index, first_adjusted, parent)?;
    let bones_second = resolve_bones(second, second_index, second_adjusted, parent)?;
    let mut bones: Vec<Spatial> = Vec::with_capacity(bones_first.len());
    for (a, b) in bones_first.iter().zip(bones_second.iter()) {
        let mut merged = a.interpolate(b, factor, 1);
        merged.angle = closer_angle(a.angle, b.angle, factor);
        bones.push(merged);
    }

    // The side the factor is closer to supplies z order, identity fields
    // and the timelines used for dispatch; 0.5 ties toward the second.
    let first_is_base = factor < 0.5;
    let (base, base_key, base_index, base_adjusted) = if first_is_base {
        (first, key_first, first_index, first_adjusted)
    } else {
        (second, key_second, second_index, second_adjusted)
    };
    let (other, other_key, other_index, other_adjusted) = if first_is_base {
        (second, key_second, second_index, second_adjusted)
    } else {
        (first, key_first, first_index, first_adjusted)
    };

    for (slot, base_ref) in base_key.object_refs.iter().enumerate() {
        let other_ref = &other_key.object_refs[slot];
        let base_timeline = timeline_for(base, base_index, base_ref.timeline)?;
        let other_timeline = timeline_for(other, other_index, other_ref.timeline)?;
        let base_object = sample_object(base, base_timeline, base_ref.key as usize, base_adjusted)?;
        let other_object =
            sample_object(other, other_timeline, other_ref.key as usize, other_adjusted)?;

        let (object_first, object_second) = if first_is_base {
            (&base_object, &other_object)
        } else {
            (&other_object, &base_object)
        };
        let mut merged = merge_objects(object_first, object_second, factor, first_is_base);

        if base_ref.parent >= 0 {
            let parent_slot = base_ref.parent as usize;
            let bone = bones
                .get(parent_slot)
                .ok_or_else(|| SampleError::DanglingParent {
                    animation: base.name.clone(),
                    reference: slot,
                    parent: parent_slot,
                })?;
            merged.spatial.apply_parent(bone);
        } else if let Some(ambient) = parent {
            merged.spatial.apply_parent(ambient);
        }

        place_object(
            model,
            entity,
            base,
            base_timeline,
            base_ref.timeline as usize,
            merged,
            out,
            0,
            cfg,
        )?;
    }
    Ok(())
}

/// Merge one object pair: linear components, shortest-path angle, identity
/// fields (asset, instance target) from the base side.
fn merge_objects(
    first: &ObjectData,
    second: &ObjectData,
    factor: f32,
    first_is_base: bool,
) -> ObjectData {
    let identity = if first_is_base { first } else { second };
    let mut merged = first.interpolate(second, factor, 1);
    merged.spatial.angle = closer_angle(first.spatial.angle, second.spatial.angle, factor);
    merged.asset = identity.asset;
    merged.instance = match (first.instance, second.instance) {
        (Some(a), Some(b)) => identity.instance.map(|id| InstanceRef {
            t: lerp(a.t, b.t, factor),
            ..id
        }),
        _ => identity.instance,
    };
    merged
}

//! Single-animation pose sampling.
//!
//! Walks one animation's keyframe hierarchy at a resolved time: mainline
//! bracketing, per-timeline interpolation, parent composition, and the
//! recursive expansion of embedded entity instances. Dangling references are
//! data-integrity errors and abort the call; a corrupt asset must never
//! degrade into a silent default pose.

use crate::config::Config;
use crate::data::{Animation, Entity, Model, ObjectData, ObjectKind, Timeline};
use crate::error::SampleError;
use crate::sampler::{adjusted_time, segment_factor};
use crate::snapshot::{BoxEntry, PoseSnapshot, VisualEntry};
use crate::spatial::Spatial;
use crate::Result;

/// Sample `animation` at `time` into `out`, composing every node with
/// `parent` when supplied (the ambient transform of an embedding context).
/// Entries land in mainline z order; visuals of embedded instances are
/// spliced in place of their object entry.
pub fn sample_pose(
    model: &Model,
    entity: &Entity,
    animation: &Animation,
    time: f32,
    parent: Option<&Spatial>,
    out: &mut PoseSnapshot,
    cfg: &Config,
) -> Result<()> {
    sample_into(model, entity, animation, time, parent, out, 0, cfg)
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn sample_into(
    model: &Model,
    entity: &Entity,
    animation: &Animation,
    time: f32,
    parent: Option<&Spatial>,
    out: &mut PoseSnapshot,
    depth: usize,
    cfg: &Config,
) -> Result<()> {
    if depth > cfg.max_instance_depth {
        return Err(SampleError::RecursionLimit {
            animation: animation.name.clone(),
            limit: cfg.max_instance_depth,
        });
    }

    let (key_index, adjusted) = locate(animation, time)?;
    let bones = resolve_bones(animation, key_index, adjusted, parent)?;

    let key = &animation.mainline_keys[key_index];
    for (slot, object_ref) in key.object_refs.iter().enumerate() {
        let timeline = timeline_for(animation, key_index, object_ref.timeline)?;
        let mut object = sample_object(animation, timeline, object_ref.key as usize, adjusted)?;
        if object_ref.parent >= 0 {
            let parent_slot = object_ref.parent as usize;
            let bone =
                bones
                    .get(parent_slot)
                    .ok_or_else(|| SampleError::DanglingParent {
                        animation: animation.name.clone(),
                        reference: slot,
                        parent: parent_slot,
                    })?;
            object.spatial.apply_parent(bone);
        } else if let Some(ambient) = parent {
            object.spatial.apply_parent(ambient);
        }
        let timeline_index = object_ref.timeline as usize;
        place_object(
            model,
            entity,
            animation,
            timeline,
            timeline_index,
            object,
            out,
            depth,
            cfg,
        )?;
    }
    Ok(())
}

/// Bracketing mainline key plus the segment-adjusted target time that feeds
/// every timeline lookup of this sample.
pub(crate) fn locate(animation: &Animation, time: f32) -> Result<(usize, f32)> {
    let index =
        animation
            .mainline_key_at(time)
            .ok_or_else(|| SampleError::EmptyMainline {
                animation: animation.name.clone(),
            })?;
    let key = &animation.mainline_keys[index];
    let adjusted = match animation.mainline_key_after(index) {
        Some(next_index) => {
            let next = &animation.mainline_keys[next_index];
            adjusted_time(key.time, next.time, key.curve, animation.length, time)
        }
        None => time,
    };
    Ok((index, adjusted))
}

/// Resolve every bone reference of a mainline key to world space, in list
/// order. The forward-only parent invariant guarantees a declared parent is
/// already present in the output table; `parent` composes into unparented
/// roots.
pub(crate) fn resolve_bones(
    animation: &Animation,
    key_index: usize,
    adjusted: f32,
    parent: Option<&Spatial>,
) -> Result<Vec<Spatial>> {
    let key = &animation.mainline_keys[key_index];
    let mut bones: Vec<Spatial> = Vec::with_capacity(key.bone_refs.len());
    for (slot, bone_ref) in key.bone_refs.iter().enumerate() {
        let timeline = timeline_for(animation, key_index, bone_ref.timeline)?;
        let mut spatial = sample_bone(animation, timeline, bone_ref.key as usize, adjusted)?;
        if bone_ref.parent >= 0 {
            let parent_slot = bone_ref.parent as usize;
            let resolved =
                bones
                    .get(parent_slot)
                    .ok_or_else(|| SampleError::DanglingParent {
                        animation: animation.name.clone(),
                        reference: slot,
                        parent: parent_slot,
                    })?;
            spatial.apply_parent(resolved);
        } else if let Some(ambient) = parent {
            spatial.apply_parent(ambient);
        }
        bones.push(spatial);
    }
    Ok(bones)
}

pub(crate) fn timeline_for(
    animation: &Animation,
    key_index: usize,
    timeline: u32,
) -> Result<&Timeline> {
    animation
        .timelines
        .get(timeline as usize)
        .ok_or_else(|| SampleError::DanglingTimeline {
            animation: animation.name.clone(),
            key: key_index,
            timeline: timeline as usize,
        })
}

fn dangling_key(animation: &Animation, timeline: &Timeline, key: usize) -> SampleError {
    SampleError::DanglingTimelineKey {
        animation: animation.name.clone(),
        timeline: timeline.name.clone(),
        key,
    }
}

/// Interpolated bone spatial at `time` starting from the referenced key.
/// Single-key tracks and final keys of non-looping tracks return verbatim.
pub(crate) fn sample_bone(
    animation: &Animation,
    timeline: &Timeline,
    key_index: usize,
    time: f32,
) -> Result<Spatial> {
    let key = timeline
        .keys
        .get(key_index)
        .ok_or_else(|| dangling_key(animation, timeline, key_index))?;
    let start = key.data.as_bone().ok_or_else(|| SampleError::NotABone {
        animation: animation.name.clone(),
        timeline: timeline.name.clone(),
    })?;
    let next_index = match timeline.key_after(key_index, animation.looping) {
        Some(n) => n,
        None => return Ok(*start),
    };
    let next = &timeline.keys[next_index];
    let end = next.data.as_bone().ok_or_else(|| SampleError::NotABone {
        animation: animation.name.clone(),
        timeline: timeline.name.clone(),
    })?;
    let f = segment_factor(key.time, next.time, animation.length, time, key.curve);
    Ok(start.interpolate(end, f, key.spin))
}

/// Interpolated object payload at `time` starting from the referenced key.
pub(crate) fn sample_object(
    animation: &Animation,
    timeline: &Timeline,
    key_index: usize,
    time: f32,
) -> Result<ObjectData> {
    let key = timeline
        .keys
        .get(key_index)
        .ok_or_else(|| dangling_key(animation, timeline, key_index))?;
    let start = key
        .data
        .as_object()
        .ok_or_else(|| SampleError::NotAnObject {
            animation: animation.name.clone(),
            timeline: timeline.name.clone(),
        })?;
    let next_index = match timeline.key_after(key_index, animation.looping) {
        Some(n) => n,
        None => return Ok(start.clone()),
    };
    let next = &timeline.keys[next_index];
    let end = next
        .data
        .as_object()
        .ok_or_else(|| SampleError::NotAnObject {
            animation: animation.name.clone(),
            timeline: timeline.name.clone(),
        })?;
    let f = segment_factor(key.time, next.time, animation.length, time, key.curve);
    Ok(start.interpolate(end, f, key.spin))
}

/// Route one resolved object into the snapshot: sprites become pose entries,
/// points and boxes land in their side tables, instances recurse with the
/// resolved spatial as the ambient parent.
#[allow(clippy::too_many_arguments)]
pub(crate) fn place_object(
    model: &Model,
    entity: &Entity,
    animation: &Animation,
    timeline: &Timeline,
    timeline_index: usize,
    object: ObjectData,
    out: &mut PoseSnapshot,
    depth: usize,
    cfg: &Config,
) -> Result<()> {
    match timeline.kind {
        ObjectKind::Sprite => {
            let asset = object.asset.ok_or_else(|| SampleError::MissingAsset {
                animation: animation.name.clone(),
                timeline: timeline.name.clone(),
            })?;
            out.visuals.push(VisualEntry {
                asset,
                spatial: object.spatial,
                pivot: object.pivot,
            });
        }
        ObjectKind::Point => {
            out.points.insert(timeline.name.clone(), object.spatial);
        }
        ObjectKind::Box => {
            let index = timeline.obj.map(|o| o as usize).unwrap_or(timeline_index);
            let size = entity
                .object_infos
                .get(index)
                .map(|info| info.size)
                .unwrap_or_default();
            out.boxes.insert(
                index,
                BoxEntry {
                    spatial: object.spatial,
                    pivot: object.pivot,
                    size,
                },
            );
        }
        ObjectKind::Instance => {
            let missing = || SampleError::MissingInstanceTarget {
                animation: animation.name.clone(),
                timeline: timeline.name.clone(),
            };
            let instance = object.instance.ok_or_else(missing)?;
            let sub_entity = model.entity(instance.entity as usize).ok_or_else(missing)?;
            let sub_animation = sub_entity
                .animations
                .get(instance.animation as usize)
                .ok_or_else(missing)?;
            let sub_time = instance.t * sub_animation.length;
            sample_into(
                model,
                sub_entity,
                sub_animation,
                sub_time,
                Some(&object.spatial),
                out,
                depth + 1,
                cfg,
            )?;
        }
        // Sound objects are driven by sound lines, not the pose.
        ObjectKind::Sound => {}
        ObjectKind::Bone => {
            return Err(SampleError::NotAnObject {
                animation: animation.name.clone(),
                timeline: timeline.name.clone(),
            })
        }
    }
    Ok(())
}

//! Metadata sampling: variables, tags, and edge-triggered events/sounds.

use std::collections::HashMap;

use crate::curve::Curve;
use crate::data::{key_after, key_at, Animation, Entity, Meta, VarLine, VarValue};
use crate::error::SampleError;
use crate::sampler::segment_factor;
use crate::snapshot::{MetadataSnapshot, SoundCue};
use crate::Result;

/// Sample every auxiliary track of `animation` into `out`: variable and tag
/// state at `time`, plus the events and sound cues whose keys were crossed
/// by the `(previous_time, time]` window of this update.
pub fn sample_metadata(
    entity: &Entity,
    animation: &Animation,
    previous_time: f32,
    time: f32,
    out: &mut MetadataSnapshot,
) -> Result<()> {
    collect_vars(
        entity,
        animation,
        &animation.meta,
        time,
        &mut out.animation_vars,
    )?;
    active_tags(&animation.meta, time, &mut out.animation_tags);

    for timeline in &animation.timelines {
        if timeline.meta.is_empty() {
            continue;
        }
        if !timeline.meta.varlines.is_empty() {
            let vars = out.object_vars.entry(timeline.name.clone()).or_default();
            collect_vars(entity, animation, &timeline.meta, time, vars)?;
        }
        if !timeline.meta.taglines.is_empty() {
            let mut tags = Vec::new();
            active_tags(&timeline.meta, time, &mut tags);
            if !tags.is_empty() {
                out.object_tags.insert(timeline.name.clone(), tags);
            }
        }
    }

    for line in &animation.eventlines {
        for &key_time in &line.keys {
            if crossed(
                previous_time,
                time,
                key_time,
                animation.length,
                animation.looping,
            ) {
                out.events.push(line.name.clone());
            }
        }
    }

    for line in &animation.soundlines {
        for key in &line.keys {
            if key.trigger
                && crossed(
                    previous_time,
                    time,
                    key.time,
                    animation.length,
                    animation.looping,
                )
            {
                out.sounds.push(SoundCue {
                    asset: key.asset,
                    volume: key.volume,
                    panning: key.panning,
                });
            }
        }
    }
    Ok(())
}

fn collect_vars(
    entity: &Entity,
    animation: &Animation,
    meta: &Meta,
    time: f32,
    into: &mut HashMap<String, VarValue>,
) -> Result<()> {
    for (index, line) in meta.varlines.iter().enumerate() {
        let def = entity
            .var_defs
            .get(line.def as usize)
            .ok_or_else(|| SampleError::DanglingVarDef {
                animation: animation.name.clone(),
                index,
            })?;
        let value = sample_varline(line, time, animation.length, animation.looping)
            .unwrap_or_else(|| def.default.clone());
        into.insert(def.name.clone(), value);
    }
    Ok(())
}

/// Current value of one variable track. `None` when the track has no keys
/// (the caller substitutes the definition default). A single resolvable key
/// is returned verbatim; otherwise numeric fields lerp and the earlier
/// key's type tag carries forward.
fn sample_varline(line: &VarLine, time: f32, length: f32, looping: bool) -> Option<VarValue> {
    let index = key_at(&line.keys, time, |k| k.time)?;
    let key = &line.keys[index];
    let next_index = match key_after(index, line.keys.len(), looping) {
        Some(n) => n,
        None => return Some(key.value.clone()),
    };
    let next = &line.keys[next_index];
    let f = segment_factor(key.time, next.time, length, time, Curve::Linear);
    Some(key.value.interpolate(&next.value, f))
}

/// Tags are discrete per-key sets: emit everything attached to the latest
/// key at or before `time`, no interpolation.
fn active_tags(meta: &Meta, time: f32, into: &mut Vec<String>) {
    for line in &meta.taglines {
        if let Some(index) = key_at(&line.keys, time, |k| k.time) {
            into.extend(line.keys[index].tags.iter().cloned());
        }
    }
}

/// Edge trigger: the key time lies in the half-open window between the
/// previous update's time and this update's time, excluding the departure
/// bound. A reversed window on a non-looping clip is a plain backward step,
/// so the bounds swap; on a looping clip it crossed the seam, and the bound
/// on the wrong side of the key is folded by one animation length, so a key
/// near the seam fires exactly once per pass.
fn crossed(previous: f32, current: f32, key_time: f32, length: f32, looping: bool) -> bool {
    if previous == current {
        false
    } else if previous < current {
        previous < key_time && key_time <= current
    } else if !looping {
        current <= key_time && key_time < previous
    } else if key_time <= current {
        previous - length < key_time && key_time <= current
    } else {
        previous < key_time && key_time <= current + length
    }
}

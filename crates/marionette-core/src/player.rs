//! Playback control: time advance, looping, and timed cross-fade between
//! two animations.
//!
//! A `Player` owns everything one animated instance needs: current/next
//! animation, elapsed time, speed, the instance transform, its own snapshot
//! buffers and its listener list. `update` drives the samplers and publishes
//! fresh snapshots; a failed update leaves the previously published
//! snapshots current. There is no shared mutable state between players.

use std::sync::Arc;

use log::debug;

use crate::config::Config;
use crate::data::{Entity, Model};
use crate::error::SampleError;
use crate::event::{EventDispatcher, Listener, PlaybackEvent};
use crate::sampler::{sample_metadata, sample_pose, sample_pose_blended};
use crate::snapshot::{MetadataSnapshot, PoseSnapshot};
use crate::spatial::Spatial;
use crate::Result;

/// A pending switch to another animation. `total == 0` pins a static,
/// caller-fixed blend factor instead of a timed cross-fade.
#[derive(Clone, Copy, Debug)]
struct Transition {
    target: usize,
    total: f32,
    elapsed: f32,
    factor: f32,
}

/// Per-instance playback state machine.
#[derive(Debug)]
pub struct Player {
    model: Arc<Model>,
    entity_index: usize,
    cfg: Config,

    current: usize,
    next: Option<Transition>,
    time: f32,
    speed: f32,
    /// Base transform applied uniformly to the whole pose.
    root: Spatial,

    pose: PoseSnapshot,
    pose_scratch: PoseSnapshot,
    meta: MetadataSnapshot,
    meta_scratch: MetadataSnapshot,

    dispatcher: EventDispatcher,
    pending: Vec<PlaybackEvent>,
}

impl Player {
    /// Create a player for one entity of the model, starting on its first
    /// animation at time 0.
    pub fn new(model: Arc<Model>, entity_index: usize) -> Result<Self> {
        Self::with_config(model, entity_index, Config::default())
    }

    pub fn with_config(model: Arc<Model>, entity_index: usize, cfg: Config) -> Result<Self> {
        let entity = model
            .entity(entity_index)
            .ok_or(SampleError::EntityNotFound {
                index: entity_index,
            })?;
        if entity.animations.is_empty() {
            return Err(SampleError::NoAnimations {
                entity: entity.name.clone(),
            });
        }
        Ok(Self {
            pose: PoseSnapshot::with_capacity(&cfg),
            pose_scratch: PoseSnapshot::with_capacity(&cfg),
            meta: MetadataSnapshot::default(),
            meta_scratch: MetadataSnapshot::default(),
            pending: Vec::with_capacity(cfg.events_capacity),
            model,
            entity_index,
            cfg,
            current: 0,
            next: None,
            time: 0.0,
            speed: 1.0,
            root: Spatial::default(),
            dispatcher: EventDispatcher::new(),
        })
    }

    /// Start an animation from time 0, dropping any pending transition.
    pub fn play(&mut self, name: &str) -> Result<()> {
        let model = Arc::clone(&self.model);
        let entity = self.entity_of(&model)?;
        let index = entity
            .animation_index(name)
            .ok_or_else(|| SampleError::AnimationNotFound {
                name: name.to_string(),
            })?;
        self.switch_to(entity, index);
        Ok(())
    }

    /// Cross-fade into `name` over `duration`. The blend factor evolves on
    /// every update; once it reaches 1 the target becomes current with its
    /// elapsed time preserved.
    pub fn transition(&mut self, name: &str, duration: f32) -> Result<()> {
        let model = Arc::clone(&self.model);
        let entity = self.entity_of(&model)?;
        let target = entity
            .animation_index(name)
            .ok_or_else(|| SampleError::AnimationNotFound {
                name: name.to_string(),
            })?;
        self.next = Some(Transition {
            target,
            total: duration.max(0.0),
            elapsed: 0.0,
            factor: 0.0,
        });
        Ok(())
    }

    /// Play `first` overlaid with `second` at a caller-fixed blend factor.
    /// Unlike `transition`, the factor never evolves on its own.
    pub fn blend(&mut self, first: &str, second: &str, factor: f32) -> Result<()> {
        let model = Arc::clone(&self.model);
        let entity = self.entity_of(&model)?;
        let first_index =
            entity
                .animation_index(first)
                .ok_or_else(|| SampleError::AnimationNotFound {
                    name: first.to_string(),
                })?;
        let second_index =
            entity
                .animation_index(second)
                .ok_or_else(|| SampleError::AnimationNotFound {
                    name: second.to_string(),
                })?;
        self.switch_to(entity, first_index);
        self.next = Some(Transition {
            target: second_index,
            total: 0.0,
            elapsed: 0.0,
            factor: factor.clamp(0.0, 1.0),
        });
        Ok(())
    }

    /// Advance playback by `delta_time`, resample, and publish new pose and
    /// metadata snapshots. Listener notifications fan out at the very end,
    /// in registration order, after the snapshots are live.
    pub fn update(&mut self, delta_time: f32) -> Result<()> {
        let model = Arc::clone(&self.model);
        let entity = self.entity_of(&model)?;

        let initial_time = self.time;
        let mut elapsed = delta_time * self.speed;

        // Timed cross-fade: warp elapsed toward the target's timescale as
        // the blend advances, then advance the fade by magnitude only.
        let mut adopt = None;
        if let Some(fade) = self.next.as_mut() {
            if fade.total > 0.0 {
                let current_length = entity.animations[self.current].length;
                let target_length = entity.animations[fade.target].length;
                elapsed += elapsed * fade.factor * (current_length / target_length);
                fade.elapsed += elapsed.abs();
                fade.factor = (fade.elapsed / fade.total).min(1.0);
                if fade.elapsed >= fade.total {
                    adopt = Some(fade.target);
                }
            }
        }
        if let Some(target) = adopt {
            let keep = self.time;
            self.switch_to(entity, target);
            self.time = keep;
        }

        self.time += elapsed;

        let animation = &entity.animations[self.current];
        if self.time < 0.0 {
            self.time = if animation.looping {
                self.time + animation.length
            } else {
                0.0
            };
            if self.time != initial_time {
                self.pending.push(PlaybackEvent::AnimationFinished {
                    animation: animation.name.clone(),
                });
            }
        } else if self.time >= animation.length {
            self.time = if animation.looping {
                self.time - animation.length
            } else {
                animation.length
            };
            if self.time != initial_time {
                self.pending.push(PlaybackEvent::AnimationFinished {
                    animation: animation.name.clone(),
                });
            }
        }

        self.refresh_snapshots(&model, entity, initial_time)?;

        for name in &self.meta.events {
            self.pending
                .push(PlaybackEvent::EventTriggered { name: name.clone() });
        }
        for cue in &self.meta.sounds {
            self.pending.push(PlaybackEvent::SoundTriggered { cue: *cue });
        }

        let mut pending = std::mem::take(&mut self.pending);
        for event in &pending {
            self.dispatcher.dispatch(event);
        }
        pending.clear();
        self.pending = pending;

        Ok(())
    }

    /// The pose published by the last successful update.
    #[inline]
    pub fn pose(&self) -> &PoseSnapshot {
        &self.pose
    }

    /// The metadata published by the last successful update.
    #[inline]
    pub fn metadata(&self) -> &MetadataSnapshot {
        &self.meta
    }

    #[inline]
    pub fn current_animation(&self) -> &str {
        &self.model.entities[self.entity_index].animations[self.current].name
    }

    #[inline]
    pub fn next_animation(&self) -> Option<&str> {
        self.next.as_ref().map(|fade| {
            self.model.entities[self.entity_index].animations[fade.target]
                .name
                .as_str()
        })
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Seek to an absolute time, wrapped into the animation for looping
    /// clips and clamped otherwise.
    pub fn set_time(&mut self, time: f32) {
        let animation = &self.model.entities[self.entity_index].animations[self.current];
        self.time = if animation.looping {
            time.rem_euclid(animation.length)
        } else {
            time.clamp(0.0, animation.length)
        };
    }

    /// Normalized position in the current animation.
    #[inline]
    pub fn progress(&self) -> f32 {
        let length = self.model.entities[self.entity_index].animations[self.current].length;
        self.time / length
    }

    #[inline]
    pub fn set_progress(&mut self, progress: f32) {
        let length = self.model.entities[self.entity_index].animations[self.current].length;
        self.set_time(progress * length);
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Playback speed multiplier; negative plays backward.
    #[inline]
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// The base transform applied uniformly to the whole pose.
    #[inline]
    pub fn instance_transform(&self) -> &Spatial {
        &self.root
    }

    #[inline]
    pub fn set_instance_transform(&mut self, transform: Spatial) {
        self.root = transform;
    }

    #[inline]
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.root.x = x;
        self.root.y = y;
    }

    #[inline]
    pub fn set_rotation(&mut self, angle: f32) {
        self.root.angle = angle;
    }

    #[inline]
    pub fn set_scale(&mut self, scale_x: f32, scale_y: f32) {
        self.root.scale_x = scale_x;
        self.root.scale_y = scale_y;
    }

    /// Register a listener for playback notifications. Listeners stay
    /// registered for the player's lifetime and run in registration order.
    #[inline]
    pub fn on_event(&mut self, listener: Listener) {
        self.dispatcher.subscribe(listener);
    }

    fn entity_of<'m>(&self, model: &'m Model) -> Result<&'m Entity> {
        model
            .entity(self.entity_index)
            .ok_or(SampleError::EntityNotFound {
                index: self.entity_index,
            })
    }

    /// Make `index` the current animation from time 0, dropping any pending
    /// transition. Queues the change notification when the animation
    /// actually differs.
    fn switch_to(&mut self, entity: &Entity, index: usize) {
        if index != self.current {
            debug!(
                "entity '{}': '{}' -> '{}'",
                entity.name, entity.animations[self.current].name, entity.animations[index].name
            );
            self.pending.push(PlaybackEvent::AnimationChanged {
                from: entity.animations[self.current].name.clone(),
                to: entity.animations[index].name.clone(),
            });
        }
        self.current = index;
        self.time = 0.0;
        self.next = None;
    }

    /// Resample into the scratch buffers and publish them. Publication is
    /// all-or-nothing: any sampling error leaves the previous snapshots in
    /// place.
    fn refresh_snapshots(
        &mut self,
        model: &Model,
        entity: &Entity,
        previous_time: f32,
    ) -> Result<()> {
        self.pose_scratch.clear();
        self.meta_scratch.clear();

        let animation = &entity.animations[self.current];
        let root = self.root;
        match self.next.as_ref() {
            Some(fade) if fade.target != self.current => {
                let target = &entity.animations[fade.target];
                sample_pose_blended(
                    model,
                    entity,
                    animation,
                    target,
                    self.time,
                    fade.factor,
                    Some(&root),
                    &mut self.pose_scratch,
                    &self.cfg,
                )?;
            }
            _ => {
                sample_pose(
                    model,
                    entity,
                    animation,
                    self.time,
                    Some(&root),
                    &mut self.pose_scratch,
                    &self.cfg,
                )?;
            }
        }
        sample_metadata(
            entity,
            animation,
            previous_time,
            self.time,
            &mut self.meta_scratch,
        )?;

        std::mem::swap(&mut self.pose, &mut self.pose_scratch);
        std::mem::swap(&mut self.meta, &mut self.meta_scratch);
        Ok(())
    }
}

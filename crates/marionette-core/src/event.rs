//! Playback notifications and listener fan-out.
//!
//! Listeners are owned by the player and invoked synchronously, in
//! registration order, at the end of `update`, never mid-sample. A listener
//! observes only fully published snapshots.

use crate::snapshot::SoundCue;

/// Discrete signals emitted while stepping a player.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum PlaybackEvent {
    /// The current animation reached its boundary this update (loop wrap or
    /// clamp at either end).
    AnimationFinished { animation: String },
    /// The current animation switched, by `play` or a completed transition.
    AnimationChanged { from: String, to: String },
    /// An event line key was crossed this update.
    EventTriggered { name: String },
    /// A sound line key with the trigger flag was crossed this update.
    SoundTriggered { cue: SoundCue },
}

/// Listener callback. Boxed so callers can capture state.
pub type Listener = Box<dyn FnMut(&PlaybackEvent)>;

/// Registration-order synchronous fan-out of playback events.
#[derive(Default)]
pub struct EventDispatcher {
    listeners: Vec<Listener>,
}

impl EventDispatcher {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it stays registered for the player's lifetime.
    #[inline]
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver one event to every listener, in registration order.
    pub fn dispatch(&mut self, event: &PlaybackEvent) {
        for listener in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

//! Event System
//!
//! Systems report what happened during a frame by pushing events instead of
//! calling each other. The runtime drains the queues after the update pass:
//! sound cues go to the audio system, hit/kill events feed the HUD and log.

use macroquad::math::Vec3;
use crate::audio::Sfx;

/// A queue for events of a single type.
/// Events are collected during the frame and drained at specific points.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Who received a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Slot in the enemy pool
    Pool(usize),
    /// The single legacy enemy on `GameState`
    Legacy,
}

/// Damage was dealt to an enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitEvent {
    pub target: HitTarget,
    pub amount: i32,
    /// Where the hit landed (for VFX)
    pub position: Vec3,
}

/// An enemy died
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KillEvent {
    pub target: HitTarget,
    pub position: Vec3,
}

/// Container for all game events
#[derive(Debug, Default)]
pub struct Events {
    /// Sounds to play at the end of the frame
    pub sfx: EventQueue<Sfx>,
    pub hits: EventQueue<HitEvent>,
    pub kills: EventQueue<KillEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all event queues. Call at end of frame.
    pub fn clear_all(&mut self) {
        self.sfx.clear();
        self.hits.clear();
        self.kills.clear();
    }
}

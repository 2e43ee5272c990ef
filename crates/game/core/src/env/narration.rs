//! Narration output: one-way, human-readable combat messages.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Fire-and-forget sink for narration lines. Never read back by the core.
pub trait NarrationSink: Send + Sync {
    fn narrate(&self, message: String);
}

/// Sink that drops every message.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentNarration;

impl NarrationSink for SilentNarration {
    fn narrate(&self, _message: String) {}
}

/// Bounded message log. Oldest lines are evicted once `capacity` is reached.
#[derive(Debug)]
pub struct MessageQueue {
    capacity: usize,
    messages: Mutex<VecDeque<String>>,
}

impl MessageQueue {
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            messages: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Removes and returns every queued line, oldest first.
    pub fn drain(&self) -> Vec<String> {
        let mut messages = self.messages.lock().unwrap_or_else(PoisonError::into_inner);
        messages.drain(..).collect()
    }

    /// Copies the queued lines without consuming them.
    pub fn snapshot(&self) -> Vec<String> {
        let messages = self.messages.lock().unwrap_or_else(PoisonError::into_inner);
        messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MessageQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl NarrationSink for MessageQueue {
    fn narrate(&self, message: String) {
        let mut messages = self.messages.lock().unwrap_or_else(PoisonError::into_inner);
        if messages.len() == self.capacity {
            messages.pop_front();
        }
        messages.push_back(message);
    }
}

/// Message templates shared by the ability pipeline.
pub mod messages {
    pub fn cast_damage(ability: &str, amount: f32, target: &str) -> String {
        format!("You cast {ability} for {amount} damage to {target}.")
    }

    pub fn cast_heal(ability: &str, target: &str, amount: f32) -> String {
        format!("You cast {ability} and healed {target} for {amount}.")
    }

    pub fn self_heal(ability: &str, amount: f32) -> String {
        format!("You healed yourself for {amount} with {ability}.")
    }

    pub fn gained_block(ability: &str, amount: f32) -> String {
        format!("You gained {amount} block from {ability}.")
    }

    pub fn missed(ability: &str) -> String {
        format!("You missed {ability}.")
    }
}

//! Animation scheduler
//!
//! Holds every in-flight scroll tween, keyed by what it scrolls, and
//! advances them on each host frame. Starting a tween for a key that is
//! already animating replaces the running one.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::tween::ScrollTween;

/// One tween's output for a frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame<K> {
    pub key: K,
    pub value: f64,
    /// The tween reached its end and was dropped
    pub finished: bool,
}

/// The scheduler that ticks all active tweens
pub struct AnimationScheduler<K> {
    tweens: IndexMap<K, ScrollTween>,
}

impl<K: Copy + Eq + Hash + std::fmt::Debug> AnimationScheduler<K> {
    pub fn new() -> Self {
        Self {
            tweens: IndexMap::new(),
        }
    }

    /// Start a tween, returning the one it interrupted
    pub fn animate(&mut self, key: K, tween: ScrollTween) -> Option<ScrollTween> {
        let previous = self.tweens.insert(key, tween);
        if previous.is_some() {
            tracing::debug!(?key, "restarting in-flight scroll animation");
        }
        previous
    }

    pub fn cancel(&mut self, key: &K) -> Option<ScrollTween> {
        self.tweens.shift_remove(key)
    }

    pub fn get(&self, key: &K) -> Option<&ScrollTween> {
        self.tweens.get(key)
    }

    pub fn is_animating(&self, key: &K) -> bool {
        self.tweens.contains_key(key)
    }

    /// Check if any tweens are still running
    pub fn has_active_animations(&self) -> bool {
        !self.tweens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Advance all tweens by `dt_ms`, in start order. Finished tweens
    /// report their final value once and are removed.
    pub fn tick(&mut self, dt_ms: f32) -> Vec<Frame<K>> {
        let mut frames = Vec::with_capacity(self.tweens.len());
        for (key, tween) in self.tweens.iter_mut() {
            tween.tick(dt_ms);
            frames.push(Frame {
                key: *key,
                value: tween.value(),
                finished: tween.is_finished(),
            });
        }
        self.tweens.retain(|_, tween| !tween.is_finished());
        frames
    }
}

impl<K: Copy + Eq + Hash + std::fmt::Debug> Default for AnimationScheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

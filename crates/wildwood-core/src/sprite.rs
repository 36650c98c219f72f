//! Sprite metadata resolved from a catalog of animation frame counts.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Named animation strip with a fixed frame count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpriteSet {
    key: String,
    frames: usize,
}

impl SpriteSet {
    /// Build a sprite set; the frame count is clamped to at least one.
    #[must_use]
    pub fn new(key: impl Into<String>, frames: usize) -> Self {
        Self {
            key: key.into(),
            frames: frames.max(1),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Number of frames in the strip.
    #[must_use]
    pub const fn frames(&self) -> usize {
        self.frames
    }
}

/// Catalog mapping sprite keys to frame counts.
///
/// Lookups are total: a key the catalog does not know resolves to a
/// single-frame set that keeps the requested key, so entities always render
/// and log under the name they asked for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpriteLibrary {
    frame_counts: HashMap<String, usize>,
}

impl SpriteLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `frames` frames under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, frames: usize) {
        self.frame_counts.insert(key.into(), frames.max(1));
    }

    /// Resolve `key` to a sprite set, falling back to one frame.
    #[must_use]
    pub fn get(&self, key: &str) -> SpriteSet {
        let frames = self.frame_counts.get(key).copied().unwrap_or(1);
        SpriteSet::new(key, frames)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.frame_counts.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frame_counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frame_counts.is_empty()
    }
}

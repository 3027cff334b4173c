//! Third-party video embed and the process-wide script registry.

use std::{
    collections::BTreeMap,
    sync::{Mutex, OnceLock},
};

pub const TIKTOK_SCRIPT_ID: &str = "tiktok-embed-script";
pub const TIKTOK_SCRIPT_SRC: &str = "https://www.tiktok.com/embed.js";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTag {
    pub id: &'static str,
    pub src: &'static str,
    pub is_async: bool,
}

impl ScriptTag {
    pub const fn tiktok() -> Self {
        ScriptTag {
            id: TIKTOK_SCRIPT_ID,
            src: TIKTOK_SCRIPT_SRC,
            is_async: true,
        }
    }
}

/// Scripts injected into the document, keyed by id.
#[derive(Debug, Default)]
pub struct ScriptRegistry {
    scripts: Mutex<BTreeMap<&'static str, ScriptTag>>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by every view in this process.
    pub fn global() -> &'static ScriptRegistry {
        static GLOBAL: OnceLock<ScriptRegistry> = OnceLock::new();
        GLOBAL.get_or_init(ScriptRegistry::new)
    }

    /// Injects `tag` unless a script with the same id is already present.
    ///
    /// Returns `true` when the tag was newly injected.
    pub fn ensure(&self, tag: ScriptTag) -> bool {
        let mut scripts = self.scripts.lock().unwrap_or_else(|e| e.into_inner());
        if scripts.contains_key(tag.id) {
            return false;
        }
        tracing::info!(
            id = tag.id,
            src = tag.src,
            is_async = tag.is_async,
            "injecting embed script"
        );
        scripts.insert(tag.id, tag);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.scripts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(id)
    }
}

/// A video rendered through the embed script.
#[derive(Debug, Clone)]
pub struct VideoEmbed {
    pub cite: &'static str,
    pub video_id: &'static str,
    /// Width bounds of the embed card in logical pixels.
    pub min_width: f32,
    pub max_width: f32,
}

pub const WISH_VIDEO: VideoEmbed = VideoEmbed {
    cite: "https://www.tiktok.com/@vvink_ph/video/7543960600209231112",
    video_id: "7543960600209231112",
    min_width: 225.0,
    max_width: 325.0,
};

//! Tree artwork source with a one-shot fallback.

use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use thiserror::Error;

use super::blob::ObjectUrl;

pub const PRIMARY_TREE_IMAGE: &str = "tree-illustration.png";
pub const FALLBACK_TREE_IMAGE: &str = "Gemini_Generated_Image_pwmv3rpwmv3rpwmv.png";

/// Extensions offered by the "Replace Tree Image" picker.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

#[derive(Debug, PartialEq)]
pub enum TreeImageSource {
    Asset(PathBuf),
    Local(ObjectUrl),
}

impl TreeImageSource {
    pub fn describe(&self) -> String {
        match self {
            TreeImageSource::Asset(path) => path.display().to_string(),
            TreeImageSource::Local(url) => match url.file_name() {
                Some(name) => format!("{} ({name})", url.url()),
                None => url.url(),
            },
        }
    }
}

#[derive(Debug)]
pub struct TreeImageState {
    source: TreeImageSource,
    fallback_attempted: bool,
    generation: u64,
    primary: PathBuf,
    fallback: PathBuf,
}

impl TreeImageState {
    /// Primary and fallback artwork inside `assets_dir`.
    pub fn new(assets_dir: impl AsRef<Path>) -> Self {
        let dir = assets_dir.as_ref();
        Self::with_paths(dir.join(PRIMARY_TREE_IMAGE), dir.join(FALLBACK_TREE_IMAGE))
    }

    pub fn with_paths(primary: impl Into<PathBuf>, fallback: impl Into<PathBuf>) -> Self {
        let primary = primary.into();
        Self {
            source: TreeImageSource::Asset(primary.clone()),
            fallback_attempted: false,
            generation: 0,
            primary,
            fallback: fallback.into(),
        }
    }

    pub fn source(&self) -> &TreeImageSource {
        &self.source
    }

    pub fn primary_path(&self) -> &Path {
        &self.primary
    }

    pub fn fallback_attempted(&self) -> bool {
        self.fallback_attempted
    }

    /// Bumped on every source change.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Switches to the fallback artwork the first time it is called.
    ///
    /// Returns `true` if the source changed.
    pub fn on_load_error(&mut self) -> bool {
        if self.fallback_attempted {
            tracing::debug!(source = %self.source.describe(), "tree image failed again, no further fallback");
            return false;
        }
        tracing::debug!(
            failed = %self.source.describe(),
            fallback = %self.fallback.display(),
            "tree image failed, trying fallback"
        );
        self.fallback_attempted = true;
        self.replace(TreeImageSource::Asset(self.fallback.clone()));
        true
    }

    /// Whether a load started at `generation` is for the source still showing.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Handles a failed load started at `generation`.
    ///
    /// Failures for a superseded source are ignored. Returns the request for
    /// the fallback artwork when this failure triggered it.
    pub fn on_load_failed(&mut self, generation: u64) -> Option<LoadRequest> {
        if !self.is_current(generation) {
            tracing::debug!(generation, current = self.generation, "ignoring stale tree image failure");
            return None;
        }
        self.on_load_error().then(|| self.load_request())
    }

    /// Shows a user-picked file. Any previously picked file is released.
    pub fn select_local(&mut self, url: ObjectUrl) {
        self.replace(TreeImageSource::Local(url));
    }

    /// Releases a picked file, going back to the bundled artwork.
    pub fn release_local(&mut self) {
        if matches!(self.source, TreeImageSource::Local(_)) {
            let asset = if self.fallback_attempted {
                self.fallback.clone()
            } else {
                self.primary.clone()
            };
            self.replace(TreeImageSource::Asset(asset));
        }
    }

    pub fn load_request(&self) -> LoadRequest {
        let target = match &self.source {
            TreeImageSource::Asset(path) => LoadTarget::Path(path.clone()),
            TreeImageSource::Local(url) => match url.bytes() {
                Some(bytes) => LoadTarget::Bytes(bytes),
                None => LoadTarget::Revoked,
            },
        };
        LoadRequest {
            generation: self.generation,
            target,
        }
    }

    fn replace(&mut self, source: TreeImageSource) {
        // Dropping the old source revokes a superseded object url.
        self.source = source;
        self.generation += 1;
    }
}

#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub generation: u64,
    pub target: LoadTarget,
}

#[derive(Debug, Clone)]
pub enum LoadTarget {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
    Revoked,
}

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to decode tree image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("object url was revoked before the image loaded")]
    Revoked,
    #[error("decoder task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// RGBA8 pixels ready for the renderer.
#[derive(Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

pub async fn load(target: LoadTarget) -> Result<DecodedImage, ImageLoadError> {
    let bytes: Arc<[u8]> = match target {
        LoadTarget::Path(path) => match tokio::fs::read(&path).await {
            Ok(bytes) => bytes.into(),
            Err(source) => return Err(ImageLoadError::Io { path, source }),
        },
        LoadTarget::Bytes(bytes) => bytes,
        LoadTarget::Revoked => return Err(ImageLoadError::Revoked),
    };
    tokio::task::spawn_blocking(move || decode(&bytes)).await?
}

pub fn decode(bytes: &[u8]) -> Result<DecodedImage, ImageLoadError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(DecodedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

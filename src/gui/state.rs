use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding the tree artwork.
    pub assets_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("public"),
        }
    }
}

#[derive(Debug, Default)]
pub struct AppState {
    pub settings: Settings,
}

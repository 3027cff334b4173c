mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from wishtree for tests
pub use wishtree::wish::{
    LoadTarget, LocalFile, ScriptRegistry, SubmittedNote, TreeImageSource,
    ViewStage, WishDraft, WishTreeView,
};

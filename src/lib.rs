pub mod wish;

pub use wish::{
    ClearTicket, LocalFile, SubmittedNote, TreeImageState, ViewStage, WishDraft, WishTreeView,
};

#[cfg(feature = "gui")]
pub mod gui;

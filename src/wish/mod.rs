//! Window-independent model of the wish tree.

pub mod blob;
pub mod draft;
pub mod embed;
pub mod model;
pub mod note;
pub mod timer;
pub mod tree_image;
pub mod view;

pub use blob::{BlobStore, ObjectUrl};
pub use draft::WishDraft;
pub use embed::{ScriptRegistry, ScriptTag, VideoEmbed, WISH_VIDEO};
pub use model::Color;
pub use note::{FloatFrame, NoteId, OVERLAY_DURATION, SubmittedNote, float_up, initials};
pub use tree_image::{ImageLoadError, LoadRequest, LoadTarget, TreeImageSource, TreeImageState};
pub use view::{ClearTicket, LocalFile, ViewStage, WishTreeView};

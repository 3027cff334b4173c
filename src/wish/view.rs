//! The wish tree view model.

use std::path::{Path, PathBuf};

use super::{
    blob::BlobStore,
    draft::WishDraft,
    embed::{ScriptRegistry, ScriptTag},
    note::SubmittedNote,
    tree_image::{LoadRequest, TreeImageState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewStage {
    #[default]
    Form,
    Confirmed,
}

/// Identifies one armed overlay clear. Only the latest ticket is honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClearTicket(u64);

/// A file picked by the user for the tree display.
#[derive(Debug, Clone)]
pub struct LocalFile {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub struct WishTreeView {
    draft: WishDraft,
    stage: ViewStage,
    note: Option<SubmittedNote>,
    tree: TreeImageState,
    blobs: BlobStore,
    armed: Option<ClearTicket>,
    next_ticket: u64,
    mounted: bool,
    torn_down: bool,
}

impl WishTreeView {
    pub fn new(assets_dir: impl AsRef<Path>) -> Self {
        Self::with_tree(TreeImageState::new(assets_dir))
    }

    pub fn with_tree(tree: TreeImageState) -> Self {
        Self {
            draft: WishDraft::default(),
            stage: ViewStage::Form,
            note: None,
            tree,
            blobs: BlobStore::new(),
            armed: None,
            next_ticket: 0,
            mounted: false,
            torn_down: false,
        }
    }

    /// First-mount side effect: make sure the embed script is present.
    ///
    /// Returns `true` if this call injected the script.
    pub fn mount(&mut self, scripts: &ScriptRegistry) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        self.torn_down = false;
        scripts.ensure(ScriptTag::tiktok())
    }

    /// Cancels the armed clear and releases the picked tree image.
    pub fn teardown(&mut self) {
        if let Some(ticket) = self.armed.take() {
            tracing::debug!(?ticket, "cancelling overlay clear on teardown");
        }
        self.note = None;
        self.tree.release_local();
        self.mounted = false;
        self.torn_down = true;
    }

    pub fn draft(&self) -> &WishDraft {
        &self.draft
    }

    pub fn name(&self) -> &str {
        &self.draft.name
    }

    pub fn wish(&self) -> &str {
        &self.draft.wish
    }

    pub fn stage(&self) -> ViewStage {
        self.stage
    }

    pub fn note(&self) -> Option<&SubmittedNote> {
        self.note.as_ref()
    }

    pub fn tree(&self) -> &TreeImageState {
        &self.tree
    }

    pub fn blobs(&self) -> &BlobStore {
        &self.blobs
    }

    pub fn armed_ticket(&self) -> Option<ClearTicket> {
        self.armed
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_wish(&mut self, wish: impl Into<String>) {
        self.draft.wish = wish.into();
    }

    /// Submits the current draft.
    pub fn submit(&mut self) -> Option<ClearTicket> {
        let WishDraft { name, wish } = self.draft.clone();
        self.submit_wish(name, wish)
    }

    /// Seals a wish onto the tree.
    ///
    /// Does nothing unless the form is showing and both fields have
    /// non-whitespace content. On success the caller must deliver the returned
    /// ticket to [`WishTreeView::on_overlay_elapsed`] after
    /// [`OVERLAY_DURATION`](super::note::OVERLAY_DURATION).
    pub fn submit_wish(
        &mut self,
        name: impl Into<String>,
        wish: impl Into<String>,
    ) -> Option<ClearTicket> {
        if self.torn_down || self.stage != ViewStage::Form {
            return None;
        }
        let draft = WishDraft::new(name, wish);
        let (trimmed_name, _) = draft.validated()?;
        let note = SubmittedNote::new(trimmed_name);
        tracing::info!(
            note = %note.id,
            color = %note.color.to_hex_string(),
            "wish submitted"
        );

        self.note = Some(note);
        self.draft = draft;
        self.stage = ViewStage::Confirmed;

        let ticket = ClearTicket(self.next_ticket);
        self.next_ticket += 1;
        self.armed = Some(ticket);
        Some(ticket)
    }

    /// Timer callback: drops the note and empties the wish text.
    ///
    /// Stale tickets and calls after teardown are ignored. Name and stage are
    /// left alone.
    pub fn on_overlay_elapsed(&mut self, ticket: ClearTicket) -> bool {
        if self.torn_down || self.armed != Some(ticket) {
            return false;
        }
        self.armed = None;
        self.note = None;
        self.draft.wish.clear();
        true
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
        self.stage = ViewStage::Form;
    }

    pub fn restart_after_confirmation(&mut self) {
        self.stage = ViewStage::Form;
        self.draft.clear();
    }

    /// Replaces the tree artwork with a picked file. `None` (picker cancelled)
    /// changes nothing.
    pub fn select_tree_image(&mut self, file: Option<LocalFile>) -> bool {
        let Some(file) = file else {
            return false;
        };
        let url = self.blobs.create_object_url_for(&file.path, file.bytes);
        self.tree.select_local(url);
        tracing::info!(source = %self.tree.source().describe(), "replacing tree image");
        true
    }

    pub fn on_tree_image_load_error(&mut self) -> bool {
        self.tree.on_load_error()
    }

    /// Generation-aware variant for asynchronous loads, see
    /// [`TreeImageState::on_load_failed`].
    pub fn on_tree_image_load_failed(&mut self, generation: u64) -> Option<LoadRequest> {
        self.tree.on_load_failed(generation)
    }

    pub fn show_missing_image_notice(&self) -> bool {
        self.tree.fallback_attempted()
    }

    pub fn show_hanging_message(&self) -> bool {
        self.stage == ViewStage::Confirmed && self.note.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> WishTreeView {
        WishTreeView::new("public")
    }

    #[test]
    fn blank_submission_changes_nothing() {
        let mut view = view();
        view.set_name("Juan");
        view.set_wish("   ");
        assert_eq!(view.submit(), None);
        assert_eq!(view.stage(), ViewStage::Form);
        assert_eq!(view.draft(), &WishDraft::new("Juan", "   "));
        assert!(view.note().is_none());
        assert!(view.armed_ticket().is_none());
    }

    #[test]
    fn valid_submission_confirms_with_trimmed_note() {
        let mut view = view();
        let ticket = view.submit_wish("  Juan Dela Cruz ", " peace ").unwrap();
        assert_eq!(view.stage(), ViewStage::Confirmed);
        assert_eq!(view.note().unwrap().name, "Juan Dela Cruz");
        assert_eq!(view.note().unwrap().initials(), "JD");
        assert_eq!(view.armed_ticket(), Some(ticket));
        assert!(!view.show_hanging_message());
    }

    #[test]
    fn elapsed_clears_note_and_wish_only() {
        let mut view = view();
        let ticket = view.submit_wish("Maria", "a new house").unwrap();
        assert!(view.on_overlay_elapsed(ticket));
        assert!(view.note().is_none());
        assert_eq!(view.wish(), "");
        assert_eq!(view.name(), "Maria");
        assert_eq!(view.stage(), ViewStage::Confirmed);
        assert!(view.show_hanging_message());

        // A second delivery is stale.
        assert!(!view.on_overlay_elapsed(ticket));
    }

    #[test]
    fn cannot_submit_from_confirmation() {
        let mut view = view();
        view.submit_wish("Maria", "one").unwrap();
        assert_eq!(view.submit_wish("Maria", "two"), None);
    }

    #[test]
    fn stale_ticket_after_resubmit_is_ignored() {
        let mut view = view();
        let first = view.submit_wish("Maria", "one").unwrap();
        view.restart_after_confirmation();
        let second = view.submit_wish("Ana", "two").unwrap();
        assert_ne!(first, second);

        assert!(!view.on_overlay_elapsed(first));
        assert_eq!(view.note().unwrap().name, "Ana");
        assert!(view.on_overlay_elapsed(second));
        assert!(view.note().is_none());
    }

    #[test]
    fn late_timer_empties_wish_after_restart() {
        let mut view = view();
        let ticket = view.submit_wish("Maria", "one").unwrap();
        view.restart_after_confirmation();
        view.set_name("Ana");
        view.set_wish("typed again");
        assert!(view.on_overlay_elapsed(ticket));
        assert_eq!(view.wish(), "");
        assert_eq!(view.name(), "Ana");
        assert_eq!(view.stage(), ViewStage::Form);
        assert!(view.note().is_none());
    }

    #[test]
    fn clear_draft_from_confirmation_returns_to_form() {
        let mut view = view();
        let ticket = view.submit_wish("Maria", "one").unwrap();
        view.clear_draft();
        assert_eq!(view.stage(), ViewStage::Form);
        assert!(view.draft().is_empty());
        assert_eq!(view.armed_ticket(), Some(ticket));
        assert!(view.note().is_some());
    }

    #[test]
    fn clear_and_restart_reset_the_form() {
        let mut view = view();
        view.set_name("Juan");
        view.set_wish("x");
        view.clear_draft();
        assert!(view.draft().is_empty());
        assert_eq!(view.stage(), ViewStage::Form);

        view.submit_wish("Juan", "x").unwrap();
        view.restart_after_confirmation();
        assert_eq!(view.stage(), ViewStage::Form);
        assert!(view.draft().is_empty());
    }

    #[test]
    fn teardown_cancels_and_releases() {
        let mut view = view();
        view.select_tree_image(Some(LocalFile {
            path: PathBuf::from("/tmp/tree.png"),
            bytes: vec![1, 2, 3],
        }));
        assert_eq!(view.blobs().len(), 1);

        let ticket = view.submit_wish("Juan", "x").unwrap();
        view.teardown();
        assert!(view.is_torn_down());
        assert!(view.blobs().is_empty());
        assert!(!view.on_overlay_elapsed(ticket));
        assert_eq!(view.submit_wish("Juan", "x"), None);
    }

    #[test]
    fn cancelled_picker_keeps_source() {
        let mut view = view();
        let generation = view.tree().generation();
        assert!(!view.select_tree_image(None));
        assert_eq!(view.tree().generation(), generation);
    }
}

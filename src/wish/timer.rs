use super::{note::OVERLAY_DURATION, view::ClearTicket};

/// Resolves with `ticket` once the overlay has been on screen long enough.
pub async fn overlay_elapsed(ticket: ClearTicket) -> ClearTicket {
    tokio::time::sleep(OVERLAY_DURATION).await;
    ticket
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::wish::WishTreeView;

    #[tokio::test(start_paused = true)]
    async fn fires_after_overlay_duration() {
        let mut view = WishTreeView::new("public");
        let ticket = view.submit_wish("Juan", "x").unwrap();
        let timer = tokio::spawn(overlay_elapsed(ticket));

        tokio::time::sleep(Duration::from_millis(1599)).await;
        assert!(!timer.is_finished());

        tokio::time::sleep(Duration::from_millis(2)).await;
        let fired = timer.await.unwrap();
        assert!(view.on_overlay_elapsed(fired));
        assert!(view.note().is_none());
    }
}

use crate::gui::screens::{ScreenMessage, wish_tree::WishTreeScreen};

#[derive(Debug, Clone)]
pub enum Message {
    WishTree(ScreenMessage<WishTreeScreen>),
}

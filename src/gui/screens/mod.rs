pub mod wish_tree;

use std::fmt;

use iced::{Element, Subscription, Task};

use crate::gui::AppState;

/// Either a message for the screen itself or one it hands up to the app.
pub enum ScreenMessage<S: Screen> {
    ScreenMessage(S::Message),
    ParentMessage(S::ParentMessage),
}

impl<S: Screen> Clone for ScreenMessage<S> {
    fn clone(&self) -> Self {
        match self {
            ScreenMessage::ScreenMessage(msg) => ScreenMessage::ScreenMessage(msg.clone()),
            ScreenMessage::ParentMessage(msg) => ScreenMessage::ParentMessage(msg.clone()),
        }
    }
}

impl<S: Screen> fmt::Debug for ScreenMessage<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenMessage::ScreenMessage(msg) => f.debug_tuple("ScreenMessage").field(msg).finish(),
            ScreenMessage::ParentMessage(msg) => f.debug_tuple("ParentMessage").field(msg).finish(),
        }
    }
}

pub trait Screen: Sized {
    type Message: fmt::Debug + Clone + Send + 'static;
    type ParentMessage: fmt::Debug + Clone + Send + 'static;

    fn view(&self) -> Element<'_, ScreenMessage<Self>>;
    fn update(&mut self, message: Self::Message, state: &mut AppState)
    -> Task<ScreenMessage<Self>>;

    fn subscription(&self) -> Subscription<ScreenMessage<Self>> {
        Subscription::none()
    }
}

use iced::{Element, Subscription, Task, Theme};

use super::{AppState, Message, Settings};
use crate::gui::screens::{
    Screen, ScreenMessage,
    wish_tree::{WishTreeParentMessage, WishTreeScreen},
};

pub struct WishTreeApp {
    state: AppState,
    screen: WishTreeScreen,
}

impl WishTreeApp {
    pub fn new(settings: Settings) -> (Self, Task<Message>) {
        let state = AppState { settings };
        let (screen, task) = WishTreeScreen::new(&state);
        (Self { state, screen }, task.map(Message::WishTree))
    }

    pub fn title(&self) -> String {
        "Tatlong Hiling — Wish Tree".to_string()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::WishTree(ScreenMessage::ScreenMessage(msg)) => self
                .screen
                .update(msg, &mut self.state)
                .map(Message::WishTree),
            Message::WishTree(ScreenMessage::ParentMessage(parent_msg)) => match parent_msg {
                WishTreeParentMessage::OpenVideo(url) => {
                    // The embed degrades silently if no browser is available.
                    if let Err(err) = webbrowser::open(url) {
                        tracing::warn!(%url, error = %err, "could not open video");
                    }
                    Task::none()
                }
            },
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        self.screen.view().map(Message::WishTree)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        self.screen.subscription().map(Message::WishTree)
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}

pub fn run(settings: Settings) -> iced::Result {
    iced::application(
        move || WishTreeApp::new(settings.clone()),
        WishTreeApp::update,
        WishTreeApp::view,
    )
    .title(WishTreeApp::title)
    .subscription(WishTreeApp::subscription)
    .theme(WishTreeApp::theme)
    .window_size((1100.0, 760.0))
    .run()
}

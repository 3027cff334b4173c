use std::sync::Arc;

use iced::{
    Alignment::Center,
    ContentFit, Element, Font, Length, Padding, Subscription, Task,
    font::Weight,
    time::Instant,
    widget::{button, column, container, image, row, stack, text, text_input},
    window,
};
use rfd::AsyncFileDialog;

use crate::{
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
        widgets::{self, ang_pao_note, muted},
    },
    wish::{
        ClearTicket, LoadRequest, LocalFile, ScriptRegistry, ViewStage, WISH_VIDEO,
        WishTreeView,
        embed::TIKTOK_SCRIPT_ID,
        note,
        timer,
        tree_image::{self, IMAGE_EXTENSIONS, ImageLoadError},
    },
};

/// What the tree panel currently has to draw.
#[derive(Debug, Clone)]
enum TreeDisplay {
    Loading,
    Loaded(image::Handle),
    Failed,
}

pub struct WishTreeScreen {
    view: WishTreeView,
    tree: TreeDisplay,
    /// Aborts the overlay timer when replaced or dropped.
    overlay_timer: Option<iced::task::Handle>,
    note_spawned: Option<Instant>,
    now: Instant,
}

#[derive(Debug, Clone)]
pub enum WishTreeMessage {
    NameChanged(String),
    WishChanged(String),
    Submit,
    Clear,
    SubmitAnother,
    OverlayElapsed(ClearTicket),
    Frame(Instant),
    PickTreeImage,
    TreeImagePicked(Option<LocalFile>),
    TreeImageLoaded {
        generation: u64,
        result: Result<image::Handle, Arc<ImageLoadError>>,
    },
}

#[derive(Debug, Clone)]
pub enum WishTreeParentMessage {
    OpenVideo(&'static str),
}

impl WishTreeScreen {
    pub fn new(state: &AppState) -> (Self, Task<ScreenMessage<Self>>) {
        let mut view = WishTreeView::new(&state.settings.assets_dir);
        view.mount(ScriptRegistry::global());
        let load = load_tree(view.tree().load_request());
        (
            Self {
                view,
                tree: TreeDisplay::Loading,
                overlay_timer: None,
                note_spawned: None,
                now: Instant::now(),
            },
            load.map(ScreenMessage::ScreenMessage),
        )
    }

    fn header(&self) -> Element<'_, ScreenMessage<Self>> {
        let title = text("Tatlong Hiling — Wish Tree").size(28).font(Font {
            weight: Weight::Semibold,
            ..Font::DEFAULT
        });
        let replace = button(text("Replace Tree Image").size(12))
            .style(button::secondary)
            .on_press(ScreenMessage::ScreenMessage(WishTreeMessage::PickTreeImage));

        column![
            row![container(title).width(Length::Fill), replace].align_y(Center),
            text(format!(
                "Tip: Put your tree image at {}, or click \"Replace Tree Image\" to preview a file.",
                self.view.tree().primary_path().display(),
            ))
            .size(12)
            .color(muted(0.6)),
        ]
        .spacing(8)
        .into()
    }

    fn form(&self) -> Element<'_, ScreenMessage<Self>> {
        let msg = ScreenMessage::ScreenMessage;
        let name = text_input("Your name or alias", self.view.name())
            .on_input(move |s| msg(WishTreeMessage::NameChanged(s)))
            .on_submit(msg(WishTreeMessage::Submit))
            .padding(10);
        let wish = text_input("Type your wish here… (kept private)", self.view.wish())
            .on_input(move |s| msg(WishTreeMessage::WishChanged(s)))
            .on_submit(msg(WishTreeMessage::Submit))
            .padding(10);

        column![
            text("Leave your wish").size(20),
            column![text("Name").size(14), name].spacing(4),
            column![text("Your Wish").size(14), wish].spacing(4),
            row![
                button("Submit Wish")
                    .style(button::primary)
                    .on_press(msg(WishTreeMessage::Submit)),
                button("Clear")
                    .style(button::secondary)
                    .on_press(msg(WishTreeMessage::Clear)),
            ]
            .spacing(12),
        ]
        .spacing(12)
        .into()
    }

    fn confirmation(&self) -> Element<'_, ScreenMessage<Self>> {
        let embed: Element<'_, ScreenMessage<Self>> =
            if ScriptRegistry::global().contains(TIKTOK_SCRIPT_ID) {
                container(
                    column![
                        text("@vvink_ph").size(14),
                        text(format!("Video {}", WISH_VIDEO.video_id))
                            .size(12)
                            .color(muted(0.7)),
                        button(text("Open on TikTok").size(12))
                            .style(button::secondary)
                            .on_press(ScreenMessage::ParentMessage(
                                WishTreeParentMessage::OpenVideo(WISH_VIDEO.cite),
                            )),
                    ]
                    .spacing(8)
                    .align_x(Center),
                )
                .padding(12)
                .width(Length::Fixed(WISH_VIDEO.min_width))
                .max_width(WISH_VIDEO.max_width)
                .style(widgets::panel)
                .into()
            } else {
                text(WISH_VIDEO.cite).size(12).color(muted(0.7)).into()
            };

        column![
            text("Thank you! ✨").size(18),
            text("Your wish has been sealed and placed on the tree.")
                .size(14)
                .color(muted(0.7)),
            container(text("Watch on TikTok").size(14)).padding(Padding::ZERO.top(16.0)),
            embed,
            button(text("Submit another wish").size(12))
                .style(button::secondary)
                .on_press(ScreenMessage::ScreenMessage(WishTreeMessage::SubmitAnother)),
        ]
        .spacing(8)
        .align_x(Center)
        .into()
    }

    fn tree_panel(&self) -> Element<'_, ScreenMessage<Self>> {
        let artwork: Element<'_, ScreenMessage<Self>> = match &self.tree {
            TreeDisplay::Loaded(handle) => image(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            TreeDisplay::Loading => container(text("Loading tree…").color(muted(0.5)))
                .center(Length::Fill)
                .into(),
            TreeDisplay::Failed => container(text(""))
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
        };

        let mut layers = stack![artwork].width(Length::Fill).height(Length::Fill);

        if self.view.show_missing_image_notice() {
            layers = layers.push(
                container(
                    container(
                        text(format!(
                            "Image not found. Place your tree artwork in {} or use the Replace button above.",
                            self.view.tree().primary_path().display(),
                        ))
                        .size(14)
                        .align_x(Center),
                    )
                    .padding([8, 16])
                    .style(widgets::scrim),
                )
                .center(Length::Fill),
            );
        }

        if let (Some(note), Some(spawned)) = (self.view.note(), self.note_spawned) {
            let frame = note::float_up(note::progress(self.now.saturating_duration_since(spawned)));
            layers = layers.push(ang_pao_note(&note.name, note.color, frame));
        }

        if self.view.show_hanging_message() {
            layers = layers.push(
                container(
                    text("Your wish is now hanging on the tree ✨")
                        .size(14)
                        .color(muted(0.8)),
                )
                .center_x(Length::Fill)
                .align_bottom(Length::Fill)
                .padding(24),
            );
        }

        container(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(widgets::panel)
            .into()
    }

    fn reload_tree(&mut self) -> Task<WishTreeMessage> {
        self.tree = TreeDisplay::Loading;
        load_tree(self.view.tree().load_request())
    }
}

impl Screen for WishTreeScreen {
    type Message = WishTreeMessage;
    type ParentMessage = WishTreeParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let left = match self.view.stage() {
            ViewStage::Form => self.form(),
            ViewStage::Confirmed => self.confirmation(),
        };

        let main = row![
            container(left)
                .padding(24)
                .width(Length::FillPortion(1))
                .style(widgets::panel),
            container(self.tree_panel()).width(Length::FillPortion(1)),
        ]
        .spacing(24)
        .height(Length::Fill);

        container(column![self.header(), main].spacing(16))
            .padding(24)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(widgets::page)
            .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        let task = match message {
            WishTreeMessage::NameChanged(name) => {
                self.view.set_name(name);
                Task::none()
            }
            WishTreeMessage::WishChanged(wish) => {
                self.view.set_wish(wish);
                Task::none()
            }
            WishTreeMessage::Submit => match self.view.submit() {
                Some(ticket) => {
                    let now = Instant::now();
                    self.note_spawned = Some(now);
                    self.now = now;
                    let (timer, handle) = Task::perform(
                        timer::overlay_elapsed(ticket),
                        WishTreeMessage::OverlayElapsed,
                    )
                    .abortable();
                    // Replacing the handle aborts any earlier timer.
                    self.overlay_timer = Some(handle.abort_on_drop());
                    timer
                }
                None => Task::none(),
            },
            WishTreeMessage::OverlayElapsed(ticket) => {
                if self.view.on_overlay_elapsed(ticket) {
                    self.overlay_timer = None;
                    self.note_spawned = None;
                }
                Task::none()
            }
            WishTreeMessage::Frame(now) => {
                self.now = now;
                Task::none()
            }
            WishTreeMessage::Clear => {
                self.view.clear_draft();
                Task::none()
            }
            WishTreeMessage::SubmitAnother => {
                self.view.restart_after_confirmation();
                Task::none()
            }
            WishTreeMessage::PickTreeImage => Task::perform(
                async {
                    let handle = AsyncFileDialog::new()
                        .set_title("Replace Tree Image")
                        .add_filter("Image", IMAGE_EXTENSIONS)
                        .pick_file()
                        .await?;
                    let bytes = handle.read().await;
                    Some(LocalFile {
                        path: handle.path().to_path_buf(),
                        bytes,
                    })
                },
                WishTreeMessage::TreeImagePicked,
            ),
            WishTreeMessage::TreeImagePicked(file) => {
                if self.view.select_tree_image(file) {
                    self.reload_tree()
                } else {
                    Task::none()
                }
            }
            WishTreeMessage::TreeImageLoaded { generation, result } => {
                match result {
                    Ok(handle) => {
                        if self.view.tree().is_current(generation) {
                            self.tree = TreeDisplay::Loaded(handle);
                        }
                        Task::none()
                    }
                    Err(err) => {
                        if !self.view.tree().is_current(generation) {
                            return Task::none();
                        }
                        tracing::warn!(error = %err, "tree image failed to load");
                        self.tree = TreeDisplay::Failed;
                        match self.view.on_tree_image_load_failed(generation) {
                            Some(request) => {
                                self.tree = TreeDisplay::Loading;
                                load_tree(request)
                            }
                            None => Task::none(),
                        }
                    }
                }
            }
        };
        task.map(ScreenMessage::ScreenMessage)
    }

    fn subscription(&self) -> Subscription<ScreenMessage<Self>> {
        if self.view.note().is_some() {
            window::frames()
                .map(WishTreeMessage::Frame)
                .map(ScreenMessage::ScreenMessage)
        } else {
            Subscription::none()
        }
    }
}

impl Drop for WishTreeScreen {
    fn drop(&mut self) {
        self.overlay_timer = None;
        self.view.teardown();
    }
}

fn load_tree(request: LoadRequest) -> Task<WishTreeMessage> {
    let LoadRequest { generation, target } = request;
    Task::perform(tree_image::load(target), move |result| {
        WishTreeMessage::TreeImageLoaded {
            generation,
            result: result
                .map(|img| image::Handle::from_rgba(img.width, img.height, img.pixels))
                .map_err(Arc::new),
        }
    })
}

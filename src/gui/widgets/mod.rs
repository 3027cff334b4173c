use iced::{
    Background, Border, Color, Element, Font, Length, Padding, Shadow, Theme, Vector,
    font::Weight,
    widget::{container, container::Style, text},
};
use iced_widget::container::bordered_box;

use crate::wish::{
    self,
    note::{INITIALS_COLOR, INITIALS_SIZE, NOTE_HEIGHT, NOTE_RADIUS, NOTE_WIDTH},
};

/// Page background.
pub const BACKGROUND: Color = Color::from_rgb(0.043, 0.059, 0.098);

pub fn to_iced(color: wish::Color) -> Color {
    Color::from_rgb8(color.r, color.g, color.b)
}

/// Translucent rounded card used for the form, confirmation and tree panels.
pub fn panel(theme: &Theme) -> Style {
    bordered_box(theme)
        .background(Color::from_rgba(1.0, 1.0, 1.0, 0.05))
        .border(Border {
            color: Color::from_rgba(1.0, 1.0, 1.0, 0.1),
            width: 1.0,
            radius: 16.0.into(),
        })
        .color(Color::WHITE)
}

pub fn page(_theme: &Theme) -> Style {
    Style::default()
        .background(BACKGROUND)
        .color(Color::WHITE)
}

/// Dark strip behind overlay text on the tree.
pub fn scrim(_theme: &Theme) -> Style {
    Style::default()
        .background(Color::from_rgba(0.0, 0.0, 0.0, 0.5))
        .border(Border {
            radius: 6.0.into(),
            ..Border::default()
        })
        .color(Color::WHITE)
}

pub fn muted(alpha: f32) -> Color {
    Color::from_rgba(1.0, 1.0, 1.0, alpha)
}

/// The red envelope tag with the submitter's initials, sampled at `frame`.
pub fn ang_pao_note<'a, Message: 'a>(
    name: &str,
    color: wish::Color,
    frame: wish::FloatFrame,
) -> Element<'a, Message> {
    let opacity = frame.opacity.clamp(0.0, 1.0);
    let tag_color = Color {
        a: opacity,
        ..to_iced(color)
    };
    let initials_color = Color {
        a: opacity,
        ..to_iced(INITIALS_COLOR)
    };

    let initials = text(wish::initials(name))
        .size(INITIALS_SIZE * frame.scale)
        .font(Font {
            weight: Weight::Bold,
            ..Font::DEFAULT
        })
        .color(initials_color);

    let tag = container(initials)
        .padding(Padding::new(8.0).bottom(0.0))
        .center_x(Length::Fixed(NOTE_WIDTH * frame.scale))
        .center_y(Length::Fixed(NOTE_HEIGHT * frame.scale))
        .style(move |_theme: &Theme| Style {
            background: Some(Background::Color(tag_color)),
            border: Border {
                radius: NOTE_RADIUS.into(),
                ..Border::default()
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.4 * opacity),
                offset: Vector::new(0.0, 8.0),
                blur_radius: 20.0,
            },
            ..Style::default()
        });

    container(tag)
        .center_x(Length::Fill)
        .align_bottom(Length::Fill)
        .padding(Padding::ZERO.bottom(80.0 - frame.offset_y))
        .into()
}

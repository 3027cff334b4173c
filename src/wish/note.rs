//! The transient "ang pao" note that floats up the tree after a submission.

use std::{
    fmt,
    sync::atomic::{AtomicI64, Ordering},
    time::Duration,
};

use time::OffsetDateTime;

use super::model::Color;

/// How long the note stays on screen before the view clears it.
pub const OVERLAY_DURATION: Duration = Duration::from_millis(1600);

/// Red envelope tag color.
pub const NOTE_COLOR: Color = Color::from_rgb8(0xd6, 0x28, 0x28);

/// Gold used for the initials printed on the tag.
pub const INITIALS_COLOR: Color = Color::from_rgb8(0xff, 0xd1, 0x66);

pub const NOTE_WIDTH: f32 = 60.0;
pub const NOTE_HEIGHT: f32 = 100.0;
pub const NOTE_RADIUS: f32 = 6.0;
pub const INITIALS_SIZE: f32 = 11.0;

const NO_INITIALS: &str = "★";

static LAST_NOTE_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Creation timestamp in unix milliseconds.
///
/// Two notes created within the same millisecond get consecutive values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteId(String);

impl NoteId {
    pub fn fresh() -> Self {
        let now = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
        let mut prev = LAST_NOTE_MILLIS.load(Ordering::Relaxed);
        loop {
            let next = now.max(prev + 1);
            match LAST_NOTE_MILLIS.compare_exchange_weak(
                prev,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return NoteId(next.to_string()),
                Err(actual) => prev = actual,
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedNote {
    pub id: NoteId,
    pub name: String,
    pub color: Color,
}

impl SubmittedNote {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NoteId::fresh(),
            name: name.into(),
            color: NOTE_COLOR,
        }
    }

    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

/// Up to two uppercased initials from the first whitespace-separated tokens,
/// or a star when the name has none.
pub fn initials(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .take(2)
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    if initials.is_empty() {
        NO_INITIALS.to_string()
    } else {
        initials
    }
}

/// One sampled frame of the float-up animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatFrame {
    /// Vertical offset in logical pixels, negative is up.
    pub offset_y: f32,
    pub scale: f32,
    pub opacity: f32,
}

const OFFSET_TRACK: &[(f32, f32)] = &[(0.0, 0.0), (0.8, -120.0), (1.0, -150.0)];
const SCALE_TRACK: &[(f32, f32)] = &[(0.0, 1.0), (0.8, 1.05), (1.0, 1.0)];
const OPACITY_TRACK: &[(f32, f32)] = &[(0.0, 0.0), (0.2, 1.0), (1.0, 1.0)];

/// Samples the float-up keyframes at `progress` (0.0 ..= 1.0).
///
/// Each property has its own track and every segment between two keyframes
/// is eased out independently.
pub fn float_up(progress: f32) -> FloatFrame {
    let t = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    FloatFrame {
        offset_y: sample(OFFSET_TRACK, t),
        scale: sample(SCALE_TRACK, t),
        opacity: sample(OPACITY_TRACK, t),
    }
}

/// Progress of the float-up animation after `elapsed`.
pub fn progress(elapsed: Duration) -> f32 {
    (elapsed.as_secs_f32() / OVERLAY_DURATION.as_secs_f32()).clamp(0.0, 1.0)
}

fn sample(track: &[(f32, f32)], t: f32) -> f32 {
    for pair in track.windows(2) {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        if t <= t1 {
            let local = if t1 > t0 { (t - t0) / (t1 - t0) } else { 1.0 };
            return v0 + (v1 - v0) * ease_out(local);
        }
    }
    track.last().map(|&(_, v)| v).unwrap_or_default()
}

/// `cubic-bezier(0, 0, 0.58, 1)`.
fn ease_out(x: f32) -> f32 {
    const X2: f32 = 0.58;
    let bezier_x = |s: f32| 3.0 * (1.0 - s) * s * s * X2 + s * s * s;
    let bezier_y = |s: f32| 3.0 * (1.0 - s) * s * s + s * s * s;

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    for _ in 0..32 {
        let mid = (lo + hi) / 2.0;
        if bezier_x(mid) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    bezier_y((lo + hi) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn initials_from_first_two_tokens() {
        assert_eq!(initials("Juan Dela Cruz"), "JD");
        assert_eq!(initials("maria"), "M");
        assert_eq!(initials("  ana   reyes "), "AR");
    }

    #[test]
    fn initials_fall_back_to_star() {
        assert_eq!(initials(""), "★");
        assert_eq!(initials(" \t\n "), "★");
    }

    #[test]
    fn note_uses_fixed_color() {
        let note = SubmittedNote::new("Juan");
        assert_eq!(note.color, NOTE_COLOR);
        assert_eq!(note.color.to_hex_string(), "#d62828");
        assert_eq!(note.initials(), "J");
    }

    #[test]
    fn note_ids_are_unique() {
        let a = NoteId::fresh();
        let b = NoteId::fresh();
        assert_ne!(a, b);
        assert!(a.as_str().parse::<i64>().unwrap() < b.as_str().parse::<i64>().unwrap());
    }

    #[test]
    fn float_up_hits_keyframes() {
        let start = float_up(0.0);
        assert!(close(start.offset_y, 0.0));
        assert!(close(start.scale, 1.0));
        assert!(close(start.opacity, 0.0));

        assert!(close(float_up(0.2).opacity, 1.0));

        let peak = float_up(0.8);
        assert!(close(peak.offset_y, -120.0));
        assert!(close(peak.scale, 1.05));

        let end = float_up(1.0);
        assert!(close(end.offset_y, -150.0));
        assert!(close(end.scale, 1.0));
        assert!(close(end.opacity, 1.0));
    }

    #[test]
    fn float_up_eases_out_and_clamps() {
        // Ease-out is ahead of linear halfway through a segment.
        let mid = float_up(0.4);
        assert!(mid.offset_y < -60.0);
        assert_eq!(float_up(2.0), float_up(1.0));
        assert_eq!(float_up(-1.0), float_up(0.0));
    }

    #[test]
    fn progress_is_relative_to_overlay_duration() {
        assert!(close(progress(Duration::ZERO), 0.0));
        assert!(close(progress(Duration::from_millis(800)), 0.5));
        assert!(close(progress(Duration::from_secs(5)), 1.0));
    }
}

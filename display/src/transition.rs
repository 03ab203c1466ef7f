//! CSS values for the entrance animations used across the display pages.
//!
//! Only the style strings live here; applying them to DOM elements is done by
//! the browser module.

use std::time::Duration;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

/// Delay before the end state is applied, so the initial state gets painted first.
pub const KICKOFF_DELAY: Duration = Duration::from_millis(10);

/// Transform every slide ends on.
pub const SLIDE_END_TRANSFORM: &str = "translateX(0)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideDirection {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
}

impl SlideDirection {
    /// Unrecognized names slide in from the left.
    pub fn parse(name: &str) -> Self {
        match name {
            "right" => Self::Right,
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            _ => Self::Left,
        }
    }

    pub fn initial_transform(self) -> &'static str {
        match self {
            Self::Left => "translateX(-100%)",
            Self::Right => "translateX(100%)",
            Self::Top => "translateY(-100%)",
            Self::Bottom => "translateY(100%)",
        }
    }
}

pub fn fade_transition(duration: Duration) -> String {
    format!("opacity {}ms ease-in", duration.as_millis())
}

pub fn slide_transition(duration: Duration) -> String {
    format!("transform {}ms ease-out", duration.as_millis())
}

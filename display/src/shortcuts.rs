//! Keyboard shortcuts as a routing table from `(scope, key)` to an action.
//!
//! Resolution is pure: it only needs the pressed key, the current page and a
//! lookup of the branch flag, so every binding is testable without a browser.

use crate::api::{DetailStyle, LayoutBody, LayoutMode, RunStyle, StyleBody};
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    LineMap,
    LineDetail,
    Arrival,
    Other,
}

impl Page {
    /// Pages are matched on the exact path; `/line_map/` is [`Page::Other`].
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Self::Home,
            "/line_map" => Self::LineMap,
            "/line_detail" => Self::LineDetail,
            "/arrival" => Self::Arrival,
            _ => Self::Other,
        }
    }

    pub fn path(self) -> Option<&'static str> {
        match self {
            Self::Home => Some("/"),
            Self::LineMap => Some("/line_map"),
            Self::LineDetail => Some("/line_detail"),
            Self::Arrival => Some("/arrival"),
            Self::Other => None,
        }
    }
}

/// When a successful POST is followed by a page reload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReloadPolicy {
    /// Reload only when the backend answers `status: "success"`.
    OnSuccess,
    /// Reload whenever a JSON body comes back, whatever its status.
    Always,
    Never,
}

/// A state mutation on the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    ToggleDoor,
    NextStationQuiet,
    NextStation,
    PrevStation,
    Reverse,
    NextRoute,
    PrevRoute,
    NextLine,
    PrevLine,
    SetLayout(LayoutMode),
    SetRunStyle(RunStyle),
    SetDetailStyle(DetailStyle),
}

impl Command {
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::ToggleDoor => "/api/state/door/toggle",
            Self::NextStationQuiet => "/api/state/next_no_refresh",
            Self::NextStation => "/api/state/next",
            Self::PrevStation => "/api/state/prev",
            Self::Reverse => "/api/state/reverse",
            Self::NextRoute => "/api/state/route/next",
            Self::PrevRoute => "/api/state/route/prev",
            Self::NextLine => "/api/state/line/next",
            Self::PrevLine => "/api/state/line/prev",
            Self::SetLayout(_) => "/api/state/layout",
            Self::SetRunStyle(_) => "/api/state/run_style",
            Self::SetDetailStyle(_) => "/api/state/detail_style",
        }
    }

    pub fn body(self) -> Option<Value> {
        let body = match self {
            Self::SetLayout(mode) => serde_json::to_value(LayoutBody { mode }),
            Self::SetRunStyle(style) => serde_json::to_value(StyleBody { style }),
            Self::SetDetailStyle(style) => serde_json::to_value(StyleBody { style }),
            _ => return None,
        };
        body.ok()
    }

    pub fn reload_policy(self) -> ReloadPolicy {
        match self {
            Self::NextStationQuiet => ReloadPolicy::Never,
            Self::NextStation
            | Self::PrevStation
            | Self::Reverse
            | Self::NextRoute
            | Self::PrevRoute
            | Self::NextLine
            | Self::PrevLine => ReloadPolicy::Always,
            Self::ToggleDoor
            | Self::SetLayout(_)
            | Self::SetRunStyle(_)
            | Self::SetDetailStyle(_) => ReloadPolicy::OnSuccess,
        }
    }

    /// Short label used in log lines.
    pub fn describe(self) -> &'static str {
        match self {
            Self::ToggleDoor => "toggle door side",
            Self::NextStationQuiet | Self::NextStation => "next station",
            Self::PrevStation => "previous station",
            Self::Reverse => "reverse direction",
            Self::NextRoute => "next route",
            Self::PrevRoute => "previous route",
            Self::NextLine => "next line",
            Self::PrevLine => "previous line",
            Self::SetLayout(_) => "update layout",
            Self::SetRunStyle(_) => "update run style",
            Self::SetDetailStyle(_) => "update detail style",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Navigate(&'static str),
    Send(Command),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scope {
    Global,
    On(Page),
}

#[derive(Clone, Copy, Debug)]
enum Target {
    Fixed(Action),
    /// `o` on the home page depends on whether the current route branches.
    RunStyleByBranches,
}

struct Binding {
    key: char,
    scope: Scope,
    target: Target,
}

const fn global(key: char, action: Action) -> Binding {
    Binding {
        key,
        scope: Scope::Global,
        target: Target::Fixed(action),
    }
}

const fn on(page: Page, key: char, action: Action) -> Binding {
    Binding {
        key,
        scope: Scope::On(page),
        target: Target::Fixed(action),
    }
}

static BINDINGS: &[Binding] = &[
    global('1', Action::Navigate("/")),
    global('2', Action::Navigate("/line_map")),
    global('3', Action::Navigate("/line_detail")),
    global('4', Action::Navigate("/arrival")),
    global('t', Action::Send(Command::ToggleDoor)),
    global('f', Action::Send(Command::NextStationQuiet)),
    global('d', Action::Send(Command::NextStation)),
    global('a', Action::Send(Command::PrevStation)),
    global('r', Action::Send(Command::Reverse)),
    global('s', Action::Send(Command::NextRoute)),
    global('w', Action::Send(Command::PrevRoute)),
    global('l', Action::Send(Command::NextLine)),
    global('k', Action::Send(Command::PrevLine)),
    on(Page::LineMap, 'i', Action::Send(Command::SetLayout(LayoutMode::OneLine))),
    on(Page::Home, 'i', Action::Send(Command::SetRunStyle(RunStyle::Default))),
    on(
        Page::LineDetail,
        'i',
        Action::Send(Command::SetDetailStyle(DetailStyle::Default)),
    ),
    on(Page::LineMap, 'o', Action::Send(Command::SetLayout(LayoutMode::TwoLine))),
    Binding {
        key: 'o',
        scope: Scope::On(Page::Home),
        target: Target::RunStyleByBranches,
    },
    on(
        Page::LineDetail,
        'o',
        Action::Send(Command::SetDetailStyle(DetailStyle::Column)),
    ),
    on(Page::LineMap, 'p', Action::Send(Command::SetLayout(LayoutMode::Auto))),
];

/// Normalize a `KeyboardEvent.key` value to the character bindings use.
///
/// Named keys such as `Enter` or `ArrowUp` never map to a shortcut.
pub fn normalize_key(key: &str) -> Option<char> {
    let mut chars = key.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if c.is_ascii_digit() {
        Some(c)
    } else {
        c.to_lowercase().next()
    }
}

/// Find the action bound to `key` on `page`.
///
/// `has_branches` is only consulted when the answer depends on it.
pub fn resolve(key: &str, page: Page, has_branches: impl FnOnce() -> bool) -> Option<Action> {
    let key = normalize_key(key)?;
    let binding = BINDINGS.iter().find(|binding| {
        binding.key == key
            && match binding.scope {
                Scope::Global => true,
                Scope::On(scope) => scope == page,
            }
    })?;

    Some(match binding.target {
        Target::Fixed(action) => action,
        Target::RunStyleByBranches => {
            Action::Send(Command::SetRunStyle(RunStyle::for_branches(has_branches())))
        }
    })
}

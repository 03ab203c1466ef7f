//! Terminal session that drives a display backend with the page shortcuts.

use display::dispatcher::{CommandOutcome, Dispatched, Dispatcher, Host};
use display::shortcuts::Page;
use std::cell::Cell;
use std::rc::Rc;
use tracing::info;

pub const HELP: &str = "\
keys       any run of shortcut keys, e.g. `dd` or `2o`
:lines     list all lines
:routes L  list the routes of line L
:info L R  station info for line L, route R
:branches on|off   whether the current route branches (affects `o` on /)
:page      show the page the remote acts on
:help      this text";

/// Stands in for the browser: remembers the current page and counts reloads.
#[derive(Clone, Debug)]
pub struct TerminalHost {
    page: Rc<Cell<Page>>,
    has_branches: Rc<Cell<bool>>,
    reloads: Rc<Cell<usize>>,
}

impl TerminalHost {
    pub fn new(page: Page) -> Self {
        Self {
            page: Rc::new(Cell::new(page)),
            has_branches: Rc::new(Cell::new(false)),
            reloads: Rc::new(Cell::new(0)),
        }
    }

    pub fn page(&self) -> Page {
        self.page.get()
    }

    pub fn has_branches(&self) -> bool {
        self.has_branches.get()
    }

    pub fn set_has_branches(&self, value: bool) {
        self.has_branches.set(value);
    }

    pub fn reloads(&self) -> usize {
        self.reloads.get()
    }
}

impl Host for TerminalHost {
    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
        info!("Display reloaded");
    }

    fn navigate(&self, path: &str) {
        self.page.set(Page::from_path(path));
        info!("Display now on {}", path);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    Keys(Vec<String>),
    Lines,
    Routes(String),
    StationInfo { line: String, route: String },
    Branches(bool),
    CurrentPage,
    Help,
    Unknown(String),
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }

    let Some(command) = line.strip_prefix(':') else {
        return Input::Keys(
            line.chars()
                .filter(|c| !c.is_whitespace())
                .map(String::from)
                .collect(),
        );
    };

    let mut words = command.split_whitespace();
    match (words.next(), words.next(), words.next(), words.next()) {
        (Some("lines"), None, _, _) => Input::Lines,
        (Some("routes"), Some(line), None, _) => Input::Routes(line.to_string()),
        (Some("info"), Some(line), Some(route), None) => Input::StationInfo {
            line: line.to_string(),
            route: route.to_string(),
        },
        (Some("branches"), Some("on"), None, _) => Input::Branches(true),
        (Some("branches"), Some("off"), None, _) => Input::Branches(false),
        (Some("page"), None, _, _) => Input::CurrentPage,
        (Some("help"), None, _, _) => Input::Help,
        _ => Input::Unknown(line.to_string()),
    }
}

pub struct Session {
    dispatcher: Dispatcher<TerminalHost>,
}

impl Session {
    pub fn new(dispatcher: Dispatcher<TerminalHost>) -> Self {
        Self { dispatcher }
    }

    pub fn host(&self) -> &TerminalHost {
        self.dispatcher.host()
    }

    /// Run one line of input and return what should be printed.
    pub async fn handle(&self, input: Input) -> Vec<String> {
        let client = self.dispatcher.client();
        match input {
            Input::Empty => Vec::new(),
            Input::Keys(keys) => {
                let mut out = Vec::new();
                for key in keys {
                    out.push(self.press(&key).await);
                }
                out
            }
            Input::Lines => vec![client.all_lines().await.to_string()],
            Input::Routes(line) => vec![client.routes_for_line(&line).await.to_string()],
            Input::StationInfo { line, route } => {
                vec![client.station_info(&line, &route).await.to_string()]
            }
            Input::Branches(value) => {
                self.host().set_has_branches(value);
                vec![format!("branches: {}", if value { "on" } else { "off" })]
            }
            Input::CurrentPage => vec![format!(
                "page: {}",
                self.host().page().path().unwrap_or("(other)")
            )],
            Input::Help => vec![HELP.to_string()],
            Input::Unknown(text) => vec![format!("unknown command `{text}`, try :help")],
        }
    }

    async fn press(&self, key: &str) -> String {
        let host = self.host();
        let page = host.page();
        match self
            .dispatcher
            .handle_key(key, page, || host.has_branches())
            .await
        {
            None => format!("{key}: no shortcut here"),
            Some(Dispatched::Navigated(path)) => format!("{key}: -> {path}"),
            Some(Dispatched::Sent(command, outcome)) => {
                let result = match outcome {
                    CommandOutcome::Reloaded(_) => "ok, reloaded".to_string(),
                    CommandOutcome::Applied(_) => "ok".to_string(),
                    CommandOutcome::Rejected(response) => {
                        format!("refused: {}", response.message_or_status())
                    }
                    CommandOutcome::Failed(e) => format!("failed: {e}"),
                };
                format!("{key}: {} {result}", command.describe())
            }
        }
    }
}

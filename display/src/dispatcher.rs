//! Runs shortcut actions against the backend and the hosting page.

use crate::api::{DetailStyle, LayoutMode, RunStyle, StateResponse};
use crate::client::StateClient;
use crate::error::DisplayError;
use crate::format::coerce_to_string;
use crate::shortcuts::{self, Action, Command, Page, ReloadPolicy};
use serde_json::Value;
use tracing::{error, info, warn};

/// The environment a display page runs in.
pub trait Host {
    fn reload(&self);

    fn navigate(&self, path: &str);
}

/// What happened after a [`Command`] was sent.
#[derive(Debug)]
pub enum CommandOutcome {
    /// The backend answered and the page was reloaded.
    Reloaded(StateResponse),
    /// The backend accepted the change; the page was left as is.
    Applied(StateResponse),
    /// The backend answered with a non-success status.
    Rejected(StateResponse),
    /// No usable answer: transport failure or an undecodable body.
    Failed(DisplayError),
}

impl CommandOutcome {
    pub fn reloaded(&self) -> bool {
        matches!(self, Self::Reloaded(_))
    }
}

#[derive(Debug)]
pub enum Dispatched {
    Navigated(&'static str),
    Sent(Command, CommandOutcome),
}

#[derive(Clone)]
pub struct Dispatcher<H> {
    client: StateClient,
    host: H,
}

impl<H: Host> Dispatcher<H> {
    pub fn new(client: StateClient, host: H) -> Self {
        Self { client, host }
    }

    pub fn client(&self) -> &StateClient {
        &self.client
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Resolve `key` for `page` and carry out whatever it is bound to.
    pub async fn handle_key(
        &self,
        key: &str,
        page: Page,
        has_branches: impl FnOnce() -> bool,
    ) -> Option<Dispatched> {
        let action = shortcuts::resolve(key, page, has_branches)?;
        Some(self.perform(action).await)
    }

    pub async fn perform(&self, action: Action) -> Dispatched {
        match action {
            Action::Navigate(path) => {
                self.host.navigate(path);
                Dispatched::Navigated(path)
            }
            Action::Send(command) => Dispatched::Sent(command, self.execute(command).await),
        }
    }

    /// Send `command` once and apply its reload policy. Never retries.
    pub async fn execute(&self, command: Command) -> CommandOutcome {
        let body = command.body();
        let response = match self
            .client
            .post_state(command.endpoint(), body.as_ref())
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to {}: {}", command.describe(), e);
                return CommandOutcome::Failed(e);
            }
        };

        match command.reload_policy() {
            ReloadPolicy::Always => {
                log_applied(command, &response);
                self.host.reload();
                CommandOutcome::Reloaded(response)
            }
            ReloadPolicy::OnSuccess if response.is_success() => {
                log_applied(command, &response);
                self.host.reload();
                CommandOutcome::Reloaded(response)
            }
            ReloadPolicy::Never if response.is_success() => {
                log_applied(command, &response);
                CommandOutcome::Applied(response)
            }
            ReloadPolicy::OnSuccess => {
                error!(
                    "Backend refused to {}: {}",
                    command.describe(),
                    response.message_or_status()
                );
                CommandOutcome::Rejected(response)
            }
            ReloadPolicy::Never => {
                warn!(
                    "Backend refused to {}: {}",
                    command.describe(),
                    response.message_or_status()
                );
                CommandOutcome::Rejected(response)
            }
        }
    }

    pub async fn set_layout(&self, mode: LayoutMode) -> CommandOutcome {
        self.execute(Command::SetLayout(mode)).await
    }

    pub async fn set_detail_style(&self, style: DetailStyle) -> CommandOutcome {
        self.execute(Command::SetDetailStyle(style)).await
    }

    pub async fn set_run_style(&self, style: RunStyle) -> CommandOutcome {
        self.execute(Command::SetRunStyle(style)).await
    }
}

fn log_applied(command: Command, response: &StateResponse) {
    match command {
        Command::NextStationQuiet | Command::NextStation | Command::PrevStation => {
            let station = field_text(response.next_station.as_ref());
            info!("{}: now at {}", command.describe(), station);
        }
        Command::Reverse => {
            let direction = match response.direction.as_ref().and_then(Value::as_i64) {
                Some(0) => "forward",
                Some(_) => "backward",
                None => "unknown",
            };
            info!("Direction switched to {}", direction);
        }
        Command::NextRoute | Command::PrevRoute => {
            info!("Route switched to {}", field_text(response.route_name.as_ref()));
        }
        Command::NextLine | Command::PrevLine => {
            info!("Line switched to {}", field_text(response.line_name.as_ref()));
        }
        Command::SetLayout(mode) => {
            let layout = response
                .layout
                .as_ref()
                .map_or_else(|| mode.to_string(), coerce_to_string);
            info!("Layout updated to {}", layout);
        }
        Command::SetRunStyle(style) => info!("Run style updated to {}", style),
        Command::SetDetailStyle(style) => info!("Detail style updated to {}", style),
        Command::ToggleDoor => info!("Door side toggled"),
    }
}

fn field_text(value: Option<&Value>) -> String {
    value.map_or_else(|| "unknown".to_string(), coerce_to_string)
}

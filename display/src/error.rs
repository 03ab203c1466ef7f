use std::fmt;

#[derive(Debug)]
pub enum DisplayError {
    Http(reqwest::Error),
    Status(u16),
    Decode(serde_json::Error),
    Config(String),
    Dom(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "Request failed: {e}"),
            Self::Status(code) => write!(f, "HTTP error! status: {code}"),
            Self::Decode(e) => write!(f, "Invalid JSON response: {e}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Dom(msg) => write!(f, "DOM error: {msg}"),
        }
    }
}

impl std::error::Error for DisplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Decode(e) => Some(e),
            Self::Status(_) | Self::Config(_) | Self::Dom(_) => None,
        }
    }
}

impl From<reqwest::Error> for DisplayError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => Self::Status(status.as_u16()),
            None => Self::Http(e),
        }
    }
}

impl From<serde_json::Error> for DisplayError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e)
    }
}

pub type Result<T> = std::result::Result<T, DisplayError>;

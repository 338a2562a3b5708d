use std::fmt::Display;

/// Failures while reconstructing a meal plan from markup. All of these
/// abort the parse: a partially filled plan is never handed out, because
/// every one of them means either the wrong language was requested or the
/// site changed its markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    UnknownMarker(String),
    PriceParse(String),
    Structure(String),
}

impl Error {
    pub fn unknown_marker(msg: &str) -> Self {
        Self::UnknownMarker(msg.to_string())
    }

    pub fn price_parse(msg: &str) -> Self {
        Self::PriceParse(msg.to_string())
    }

    pub fn structure(msg: &str) -> Self {
        Self::Structure(msg.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownMarker(msg) => write!(f, "Unknown marker text: {msg}"),
            Self::PriceParse(msg) => write!(f, "Price parse error: {msg}"),
            Self::Structure(msg) => write!(f, "Unexpected markup structure: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

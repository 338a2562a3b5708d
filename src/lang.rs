use std::fmt::{self, Display, Formatter};

use clap::ValueEnum;

/// Languages the meal plan endpoint can serve.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum Language {
    De,
    En,
}

impl Language {
    /// Value of the `L` form field in the meal plan request.
    pub const fn request_id(self) -> &'static str {
        match self {
            Self::De => "0",
            Self::En => "1",
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::De => write!(f, "de"),
            Self::En => write!(f, "en"),
        }
    }
}

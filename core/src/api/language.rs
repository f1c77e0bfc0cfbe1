//! Source languages accepted by the engine.

use core::fmt;
use core::str::FromStr;

use super::Error;

/// Expression language of the source text.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Language {
    /// C-like expressions: arithmetic, relational, logical and indexing.
    #[default]
    C,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::C => write!(f, "c"),
        }
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Error> {
        match name {
            "c" | "C" => Ok(Language::C),
            other => Err(Error::UnsupportedLanguage(other.to_string())),
        }
    }
}

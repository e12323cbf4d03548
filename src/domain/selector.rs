use super::ServiceKey;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

pub const ALL_SERVICES: &str = "all";

/// The `--service` argument: every entry, or the one whose key matches.
///
/// A name that matches no key is not an error; it simply selects nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ServiceSelector {
    #[default]
    All,
    Named(String),
}

impl ServiceSelector {
    pub fn matches(&self, key: ServiceKey) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => key.as_str() == name.as_str(),
        }
    }
}

impl FromStr for ServiceSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == ALL_SERVICES {
            Self::All
        } else {
            Self::Named(s.to_string())
        })
    }
}

impl fmt::Display for ServiceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_SERVICES),
            Self::Named(name) => f.write_str(name),
        }
    }
}

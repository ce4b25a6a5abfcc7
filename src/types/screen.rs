use std::{fmt, str::FromStr};

use crate::error::UnknownOption;

/// Top-level screen of the desk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Home,
    Sell,
    Profile,
    Rewards,
    Auth,
}

impl Screen {
    /// All screens in navigation order.
    pub const ALL: [Screen; 5] = [
        Screen::Home,
        Screen::Sell,
        Screen::Profile,
        Screen::Rewards,
        Screen::Auth,
    ];

    /// Identifier persisted in the key-value store.
    pub fn id(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Sell => "sell",
            Screen::Profile => "profile",
            Screen::Rewards => "rewards",
            Screen::Auth => "auth",
        }
    }
}

impl FromStr for Screen {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|screen| screen.id() == s)
            .ok_or_else(|| UnknownOption::new("screen", s))
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// Screen navigation state
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    SignUp,
    #[default]
    Login,
    Ponds,
    Devices,
    Connect,
    Readings,
    Live,
    Settings,
    Profile,
}

impl Screen {
    pub const ALL: [Screen; 9] = [
        Screen::SignUp,
        Screen::Login,
        Screen::Ponds,
        Screen::Devices,
        Screen::Connect,
        Screen::Readings,
        Screen::Live,
        Screen::Settings,
        Screen::Profile,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Screen::SignUp => "signup",
            Screen::Login => "login",
            Screen::Ponds => "ponds",
            Screen::Devices => "devices",
            Screen::Connect => "connect",
            Screen::Readings => "readings",
            Screen::Live => "live",
            Screen::Settings => "settings",
            Screen::Profile => "profile",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown screen {0:?}")]
pub struct ScreenParseError(String);

impl FromStr for Screen {
    type Err = ScreenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::ALL
            .into_iter()
            .find(|screen| screen.id() == s)
            .ok_or_else(|| ScreenParseError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: Screen,
    pub to: Screen,
}

/// Which screen is showing. Starts on the login screen.
#[derive(Debug, Clone, Default)]
pub struct NavigationContext {
    current: Screen,
}

impl NavigationContext {
    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn navigate(&mut self, to: Screen) -> Transition {
        let from = std::mem::replace(&mut self.current, to);
        Transition { from, to }
    }
}

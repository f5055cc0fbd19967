// Outlet addressing and action codes.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Which outlet(s) a control request addresses.
///
/// The firmware uses the literal query key `a` for "all outlets" and
/// the decimal outlet number otherwise. Index 0 is the device
/// convention for "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutletSelector {
    All,
    Single(u32),
}

impl From<u32> for OutletSelector {
    fn from(index: u32) -> Self {
        if index == 0 { Self::All } else { Self::Single(index) }
    }
}

impl OutletSelector {
    /// The target key used in the `/outlet` query string.
    pub fn target(self) -> String {
        match self {
            Self::All => "a".into(),
            Self::Single(n) => n.to_string(),
        }
    }
}

impl fmt::Display for OutletSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "ALL outlets"),
            Self::Single(n) => write!(f, "outlet #{n}"),
        }
    }
}

/// Power action to apply to an outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    On,
    Off,
    Cycle,
}

impl Action {
    /// Three-letter code the firmware expects in the `/outlet` query.
    pub fn device_code(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
            Self::Cycle => "CCL",
        }
    }

    /// Human-readable description of applying this action to `outlet`.
    pub fn describe(self, outlet: OutletSelector) -> String {
        let verb = match self {
            Self::On => "Turning ON",
            Self::Off => "Turning OFF",
            Self::Cycle => "Cycling",
        };
        format!("{verb} {outlet}...")
    }
}

impl FromStr for Action {
    type Err = Error;

    /// Case-insensitive; anything but on/off/cycle is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            "cycle" => Ok(Self::Cycle),
            _ => Err(Error::UnsupportedAction(s.to_owned())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Cycle => "cycle",
        };
        f.write_str(name)
    }
}

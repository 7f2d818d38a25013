//! VPN connection state as reported by the Mullvad D-Bus service

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unrecognized connection state: {0:?}")]
pub struct ParseStateError(pub String);

/// Connection state values the service may report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    Disconnected,
    Unknown,
    Uninitialized,
}

impl ConnectionState {
    pub fn name(self) -> &'static str {
        match self {
            ConnectionState::Connected => "Connected",
            ConnectionState::Disconnected => "Disconnected",
            ConnectionState::Unknown => "Unknown",
            ConnectionState::Uninitialized => "Uninitialized",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse by exact member name; no trimming, no case folding
impl FromStr for ConnectionState {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Connected" => Ok(ConnectionState::Connected),
            "Disconnected" => Ok(ConnectionState::Disconnected),
            "Unknown" => Ok(ConnectionState::Unknown),
            "Uninitialized" => Ok(ConnectionState::Uninitialized),
            other => Err(ParseStateError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        for state in [
            ConnectionState::Connected,
            ConnectionState::Disconnected,
            ConnectionState::Unknown,
            ConnectionState::Uninitialized,
        ] {
            assert_eq!(state.to_string().parse::<ConnectionState>(), Ok(state));
        }
    }

    #[test]
    fn test_parse_is_exact() {
        assert!("connected".parse::<ConnectionState>().is_err());
        assert!(" Connected".parse::<ConnectionState>().is_err());
        assert!("".parse::<ConnectionState>().is_err());
    }

    #[test]
    fn test_parse_error_keeps_input() {
        let err = "Frobnicated".parse::<ConnectionState>().unwrap_err();
        assert_eq!(err, ParseStateError("Frobnicated".to_string()));
        assert!(err.to_string().contains("Frobnicated"));
    }
}

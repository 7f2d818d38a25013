//! Turns a state query into a renderable block

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::host::{Color, Host};
use crate::ipc::{query_state, StateSource};
use crate::state::ConnectionState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("No display mapping for state {0}")]
    UnexpectedState(ConnectionState),
}

/// Output of one render cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub text: String,
    pub color: Color,
    pub cache_until: DateTime<Utc>,
}

/// i3bar/py3status block representation of a `DisplayRecord`
#[derive(Debug, Serialize)]
pub struct Block<'a> {
    pub full_text: &'a str,
    pub color: &'a str,
    pub cached_until: i64,
}

impl DisplayRecord {
    pub fn to_block<'a>(&'a self, host: &'a impl Host) -> Block<'a> {
        Block {
            full_text: &self.text,
            color: host.color(self.color),
            cached_until: self.cache_until.timestamp(),
        }
    }

    pub fn to_json(&self, host: &impl Host) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_block(host))
    }
}

/// Icon and color for a state
///
/// `Uninitialized` is never published by the service once it has completed
/// its first check, so seeing it here is an error rather than a display case.
pub fn display_for(
    state: ConnectionState,
    config: &Config,
) -> Result<(&str, Color), RenderError> {
    match state {
        ConnectionState::Connected => Ok((config.icon_on.as_str(), Color::Good)),
        ConnectionState::Disconnected => Ok((config.icon_off.as_str(), Color::Bad)),
        ConnectionState::Unknown => Ok((config.icon_unknown.as_str(), Color::Bad)),
        ConnectionState::Uninitialized => Err(RenderError::UnexpectedState(state)),
    }
}

/// Poll the service once and build the block for it
///
/// Query failures of any kind render like the `Unknown` state. The only
/// error returned is a state with no display mapping.
pub fn render(
    config: &Config,
    source: &impl StateSource,
    host: &impl Host,
) -> Result<DisplayRecord, RenderError> {
    let (icon, color) = match query_state(source) {
        Ok(state) => {
            log::debug!("vpn state is {}", state);
            display_for(state, config)?
        }
        Err(err) => {
            log::trace!("state query failed: {}", err);
            (config.icon_unknown.as_str(), Color::Bad)
        }
    };

    Ok(DisplayRecord {
        text: host.safe_format(&config.format, &[("icon", icon)]),
        color,
        cache_until: host.time_in(config.cache_timeout),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::tests::FixedHost;
    use crate::host::SystemHost;
    use crate::ipc::tests::{NoService, Reply};
    use chrono::Duration;

    fn render_default(source: &impl StateSource) -> Result<DisplayRecord, RenderError> {
        render(&Config::default(), source, &FixedHost::new())
    }

    #[test]
    fn test_display_mapping() {
        let config = Config::default();
        assert_eq!(
            display_for(ConnectionState::Connected, &config),
            Ok(("●", Color::Good))
        );
        assert_eq!(
            display_for(ConnectionState::Disconnected, &config),
            Ok(("■", Color::Bad))
        );
        assert_eq!(
            display_for(ConnectionState::Unknown, &config),
            Ok(("X", Color::Bad))
        );
    }

    #[test]
    fn test_uninitialized_is_error() {
        let config = Config::default();
        assert_eq!(
            display_for(ConnectionState::Uninitialized, &config),
            Err(RenderError::UnexpectedState(ConnectionState::Uninitialized))
        );
        let err = render_default(&Reply("Uninitialized")).unwrap_err();
        assert!(err.to_string().contains("Uninitialized"));
    }

    #[test]
    fn test_render_connected() {
        let record = render_default(&Reply("Connected")).unwrap();
        assert_eq!(record.text, "●");
        assert_eq!(record.color, Color::Good);
    }

    #[test]
    fn test_render_disconnected() {
        let record = render_default(&Reply("Disconnected")).unwrap();
        assert_eq!(record.text, "■");
        assert_eq!(record.color, Color::Bad);
    }

    #[test]
    fn test_failures_match_unknown_state() {
        let unknown = render_default(&Reply("Unknown")).unwrap();
        let no_service = render_default(&NoService).unwrap();
        let garbage = render_default(&Reply("Frobnicated")).unwrap();

        assert_eq!(unknown.text, "X");
        assert_eq!(unknown.color, Color::Bad);
        assert_eq!(no_service, unknown);
        assert_eq!(garbage, unknown);
    }

    #[test]
    fn test_custom_format_and_icons() {
        let config = Config {
            icon_on: "on".to_string(),
            format: "VPN:{icon}".to_string(),
            ..Config::default()
        };
        let record = render(&config, &Reply("Connected"), &FixedHost::new()).unwrap();
        assert_eq!(record.text, "VPN:on");
    }

    #[test]
    fn test_format_without_placeholder() {
        let config = Config {
            format: "VPN".to_string(),
            ..Config::default()
        };
        let record = render(&config, &NoService, &FixedHost::new()).unwrap();
        assert_eq!(record.text, "VPN");
        assert_eq!(record.color, Color::Bad);
    }

    #[test]
    fn test_cache_until() {
        for timeout in [0, 1] {
            let config = Config {
                cache_timeout: timeout,
                ..Config::default()
            };
            let before = Utc::now();
            let record = render(&config, &NoService, &SystemHost::default()).unwrap();
            assert!(record.cache_until >= before + Duration::seconds(i64::from(timeout)));

            let host = FixedHost::new();
            let record = render(&config, &Reply("Connected"), &host).unwrap();
            assert_eq!(
                record.cache_until,
                host.now + Duration::seconds(i64::from(timeout))
            );
        }
    }

    #[test]
    fn test_block_json() {
        let host = FixedHost::new();
        let record = render(&Config::default(), &Reply("Connected"), &host).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&record.to_json(&host).unwrap()).unwrap();

        assert_eq!(value["full_text"], "●");
        assert_eq!(value["color"], "good");
        assert_eq!(value["cached_until"], 1_700_000_001);
    }
}

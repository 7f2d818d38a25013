//! D-Bus client for the Mullvad state service

use thiserror::Error;

use crate::state::{ConnectionState, ParseStateError};

/// Well-known name of the state service on the session bus
pub const SERVICE_NAME: &str = "org.mbachry.Mullvad";
/// Object path the service exports its interface at
pub const OBJECT_PATH: &str = "/org/mbachry/Mullvad";

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("D-Bus error: {0}")]
    Transport(#[from] zbus::Error),
    #[error("Unrecognized state from service: {0:?}")]
    UnrecognizedState(String),
}

impl From<ParseStateError> for QueryError {
    fn from(err: ParseStateError) -> Self {
        QueryError::UnrecognizedState(err.0)
    }
}

#[zbus::proxy(
    interface = "org.mbachry.Mullvad",
    default_service = "org.mbachry.Mullvad",
    default_path = "/org/mbachry/Mullvad"
)]
trait Mullvad {
    fn get_vpn_state(&self) -> zbus::Result<String>;
}

/// Anything that can answer the raw `GetVpnState` query
pub trait StateSource {
    fn get_vpn_state(&self) -> Result<String, QueryError>;
}

/// Opens a fresh session-bus connection for every query
///
/// The connection is dropped as soon as the call returns.
#[derive(Debug, Default, Clone, Copy)]
pub struct SessionBusSource;

impl StateSource for SessionBusSource {
    fn get_vpn_state(&self) -> Result<String, QueryError> {
        log::trace!("connecting to session bus for {}", SERVICE_NAME);
        let connection = zbus::blocking::Connection::session()?;
        let proxy = MullvadProxyBlocking::new(&connection)?;
        let value = proxy.get_vpn_state()?;
        log::trace!("{} at {} reported {:?}", SERVICE_NAME, OBJECT_PATH, value);
        Ok(value)
    }
}

/// Query the source and resolve the answer into a `ConnectionState`
pub fn query_state(source: &impl StateSource) -> Result<ConnectionState, QueryError> {
    let raw = source.get_vpn_state()?;
    Ok(raw.parse::<ConnectionState>()?)
}

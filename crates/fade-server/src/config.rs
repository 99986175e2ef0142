//! Configuration for the game server.
//!
//! Values are layered, later layers winning:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`--config path`)
//! 3. environment variables:
//!    - `FADE_BIND_ADDR`      (default: "0.0.0.0")
//!    - `FADE_PORT`           (default: "8080")
//!    - `FADE_MAX_CLIENTS`    (default: "1024")
//!    - `FADE_WS_PATH`        (default: "/ws")
//!    - `FADE_FADING_WINDOW`  (default: "5")
//!    - `FADE_ROOM_CODE_LEN`  (default: "6")
//! 4. command-line flags (applied by `main`)

use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use fade_core::{
    Rules, CELL_COUNT, DEFAULT_FADING_WINDOW, DEFAULT_ROOM_CODE_LEN, MAX_ROOM_CODE_LEN, MIN_ROOM_CODE_LEN,
};
use fade_protocol::wire_types::DEFAULT_WS_PATH;
use serde::Deserialize;
use tokio::sync::Semaphore;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// IP address / interface to bind to (e.g. "0.0.0.0" or "127.0.0.1").
    pub bind_addr: String,

    /// TCP port to listen on.
    pub port: u16,

    /// Maximum number of simultaneously connected clients.
    pub max_clients: usize,

    /// Path the WebSocket endpoint is mounted on.
    pub ws_path: String,

    /// Number of live marks kept on the board.
    pub fading_window: usize,

    /// Length of generated room codes.
    pub room_code_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "0.0.0.0".to_string(),
            port: 8080,
            max_clients: 1024,
            ws_path: DEFAULT_WS_PATH.to_string(),
            fading_window: DEFAULT_FADING_WINDOW,
            room_code_len: DEFAULT_ROOM_CODE_LEN,
        }
    }
}

impl Config {
    /// Defaults, then `file` (if given), then the process environment.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                Self::from_toml_str(&text)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
            None => Config::default(),
        };
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Override fields from environment-style lookups.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("FADE_BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(path) = lookup("FADE_WS_PATH") {
            self.ws_path = path;
        }
        read_override(&lookup, "FADE_PORT", &mut self.port)?;
        read_override(&lookup, "FADE_MAX_CLIENTS", &mut self.max_clients)?;
        read_override(&lookup, "FADE_FADING_WINDOW", &mut self.fading_window)?;
        read_override(&lookup, "FADE_ROOM_CODE_LEN", &mut self.room_code_len)?;
        Ok(())
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(1..=CELL_COUNT).contains(&self.fading_window) {
            bail!("fading_window must be between 1 and {CELL_COUNT}, got {}", self.fading_window);
        }
        if !(MIN_ROOM_CODE_LEN..=MAX_ROOM_CODE_LEN).contains(&self.room_code_len) {
            bail!(
                "room_code_len must be between {MIN_ROOM_CODE_LEN} and {MAX_ROOM_CODE_LEN}, got {}",
                self.room_code_len
            );
        }
        if !self.ws_path.starts_with('/') {
            bail!("ws_path must start with '/', got {:?}", self.ws_path);
        }
        if self.max_clients == 0 || self.max_clients > Semaphore::MAX_PERMITS {
            bail!("max_clients must be between 1 and {}, got {}", Semaphore::MAX_PERMITS, self.max_clients);
        }
        Ok(())
    }

    /// Convenience: `addr:port` socket string.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn rules(&self) -> Rules {
        Rules::with_window(self.fading_window)
    }
}

fn read_override<F, T>(lookup: &F, key: &str, slot: &mut T) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if let Some(val) = lookup(key) {
        *slot = val
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {val:?}"))?;
    }
    Ok(())
}

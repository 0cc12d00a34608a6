//! Server and API key resolution.
//!
//! Each setting is looked up in an ordered list of candidate sources
//! (flag, then environment, then built-in default) exactly once at startup.
//! Empty values count as unset.

use std::fmt;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_SERVER: &str = "https://api.openchargemap.io/v3";
pub const SERVER_ENV: &str = "OCM_SERVER";
pub const KEY_ENV: &str = "OCM_KEY";

/// Where a setting may come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate<'a> {
    Flag(Option<&'a str>),
    Env(&'a str),
    Default(&'a str),
}

/// Return the first candidate that yields a non-empty value.
pub fn first_set<E>(candidates: &[Candidate<'_>], env: &E) -> Option<String>
where
    E: Fn(&str) -> Option<String>,
{
    candidates.iter().find_map(|c| {
        let value = match *c {
            Candidate::Flag(v) => v.map(str::to_string),
            Candidate::Env(name) => env(name),
            Candidate::Default(v) => Some(v.to_string()),
        }
        .filter(|v| !v.trim().is_empty())?;
        debug!(source = ?c, "setting resolved");
        Some(value)
    })
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("must set OCM_KEY environment variable or pass --key")]
    MissingApiKey,
}

/// OpenChargeMap endpoint and key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub server: String,
    pub api_key: String,
}

impl Credentials {
    /// Resolve from flags and the process environment.
    pub fn from_env(server_flag: Option<&str>, key_flag: Option<&str>) -> Result<Self, ConfigError> {
        Self::resolve(server_flag, key_flag, |name| std::env::var(name).ok())
    }

    /// Resolve from flags and an arbitrary environment lookup.
    pub fn resolve<E>(
        server_flag: Option<&str>,
        key_flag: Option<&str>,
        env: E,
    ) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let server = first_set(
            &[
                Candidate::Flag(server_flag),
                Candidate::Env(SERVER_ENV),
                Candidate::Default(DEFAULT_SERVER),
            ],
            &env,
        )
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());

        let api_key = first_set(&[Candidate::Flag(key_flag), Candidate::Env(KEY_ENV)], &env)
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self { server, api_key })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("server", &self.server)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

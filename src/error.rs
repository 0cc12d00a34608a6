//! Top-level error for a `chargemeup` run.

use thiserror::Error;

use crate::area::AreaError;
use crate::config::ConfigError;
use crate::ocm::{ClientError, DispatchError};

/// Every way a run can fail. All of them are terminal.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Area(#[from] AreaError),

    #[error("failed to create client: {0}")]
    Client(#[from] ClientError),

    #[error("error: {0}")]
    Dispatch(#[from] DispatchError),
}

use thiserror::Error;

/// Why a carousel could not be attached. Never surfaced to the page; the
/// binding logs it and leaves the markup untouched.
#[derive(Debug, Error)]
pub enum ReelError {
    #[error("container #{0} not found")]
    MissingContainer(String),
    #[error("no tiles matching `{0}` inside the container")]
    NoTiles(String),
    #[error("dom: {0}")]
    Dom(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a finite, non-negative number (got {value})")]
    NotNonNegative { name: &'static str, value: f32 },
    #[error("settle delay must be greater than zero")]
    ZeroSettleDelay,
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Credential file missing, unreadable or without a usable host.
    #[error("config error: {0}")]
    Config(String),

    /// Network failure, non-success status or a body that is not JSON.
    #[error("transport error calling `{method}`: {source}")]
    Transport {
        method: String,
        #[source]
        source: reqwest::Error,
    },

    /// Conduit answered with an `error_code`.
    #[error("conduit `{method}` failed with {code}: {info}")]
    Api {
        method: String,
        code: String,
        info: String,
    },

    /// A payload is missing a field the report needs.
    #[error("unexpected data: {0}")]
    DataShape(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    pub fn data_shape(message: impl ToString) -> Self {
        Error::DataShape(message.to_string())
    }

    /// Whether the report can continue past the revision that raised this error.
    pub fn is_skippable(&self) -> bool {
        matches!(self, Error::DataShape(_))
    }
}

use std::fmt;
use thiserror::Error;

/// Which of the two source series an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Inflation,
    Unemployment,
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKind::Inflation => f.write_str("inflation (IPCA)"),
            SeriesKind::Unemployment => f.write_str("unemployment (PNAD)"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unexpected response root: {0}")]
    UnexpectedRoot(String),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("fetching {kind} failed: {source}")]
    Fetch {
        kind: SeriesKind,
        #[source]
        source: FetchError,
    },
    #[error("parsing {kind} failed: {source}")]
    Parse {
        kind: SeriesKind,
        #[source]
        source: ParseError,
    },
    #[error("{0} series has no usable observations")]
    EmptySeries(SeriesKind),
    #[error("no (region, quarter) pair is present in both series")]
    EmptyJoin,
}

//! Failure taxonomy for a fetch cycle.

use std::fmt::Display;
use thiserror::Error;

/// The remote resource a request was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    ExchangeRates,
    Summary,
}

impl Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Resource::ExchangeRates => "exchange rates",
                Resource::Summary => "summary",
            }
        )
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error fetching {resource}: {source}")]
    Network {
        resource: Resource,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error: {status} for {resource}")]
    Protocol {
        resource: Resource,
        status: reqwest::StatusCode,
    },

    #[error("Failed to decode {resource} response: {source}")]
    Decode {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn resource(&self) -> Resource {
        match self {
            FetchError::Network { resource, .. }
            | FetchError::Protocol { resource, .. }
            | FetchError::Decode { resource, .. } => *resource,
        }
    }
}

use std::fmt;

use bsale_core::ProductId;
use thiserror::Error;

/// Proxy resource a request was loading, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Products,
    Product,
    Variants,
    Stock,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Products => write!(f, "products"),
            Resource::Product => write!(f, "product"),
            Resource::Variants => write!(f, "variants"),
            Resource::Stock => write!(f, "stock"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: DNS, TLS, connect, timeout, or body read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The envelope came back with `"success": false`.
    #[error("proxy reported failure loading {resource}")]
    ApiReportedFailure { resource: Resource },

    #[error("product {product_id} not found")]
    NotFound { product_id: ProductId },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid proxy base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ClientError {
    /// Localized message shown in place of a view that failed to load.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http(e) => format!("Error de conexion: {e}"),
            ClientError::Deserialize { source, .. } => format!("Error de conexion: {source}"),
            ClientError::UnexpectedStatus { status, .. } => {
                format!("Error de conexion: HTTP {status}")
            }
            ClientError::ApiReportedFailure { resource } => match resource {
                Resource::Products => "Error al cargar productos".to_string(),
                Resource::Product => "Error al cargar el producto".to_string(),
                Resource::Variants => "Error al cargar variantes".to_string(),
                Resource::Stock => "Error al cargar stock".to_string(),
            },
            ClientError::NotFound { .. } => "Error al cargar el producto".to_string(),
            ClientError::InvalidBaseUrl { .. } => self.to_string(),
        }
    }
}

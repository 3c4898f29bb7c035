//! API layer module
//!
//! This module provides HTTP/REST API functionality for compliance_fort.
//! It is only available when the `api` feature is enabled.
//!
//! # Example
//!
//! ```rust,no_run
//! use compliance_fort::api::{ApiClient, ApiServer};
//! use compliance_fort::config::EngineConfig;
//!
//! # async fn serve() -> anyhow::Result<()> {
//! // Start API server
//! let server = ApiServer::new("127.0.0.1:8000".parse()?, EngineConfig::default());
//! server.start().await?;
//! # Ok(())
//! # }
//! # async fn call() -> anyhow::Result<()> {
//!
//! // Use API client from another process
//! let client = ApiClient::new("http://127.0.0.1:8000");
//! let public_key = client.generate_public_key(7).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod server;

// Re-export main types
pub use client::ApiClient;
pub use error::ApiError;
pub use server::{router, ApiServer, AppState};

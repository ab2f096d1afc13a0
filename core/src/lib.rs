//! Validating client for the Server Density monitoring HTTP API.
//!
//! # Overview
//! Given a (module, method, params) triple, the client verifies the call
//! against a static schema table, coerces or rejects malformed parameter
//! values, builds the request URL and body, executes it over HTTPS, and
//! parses the JSON response.
//!
//! ```no_run
//! use sd_core::{Params, SdClient, SdConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SdClient::new(SdConfig::from_env()?);
//! let call = client.set_call("devices", "list", Params::new())?;
//! let response = client.call(&call)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - The schema table is immutable, built once, and shared process-wide;
//!   calls are otherwise stateless and safe to issue from multiple call
//!   sites concurrently.
//! - Validation failures aggregate into one error raised before any
//!   network I/O; warnings (auto-coerced values) never block.
//! - `set_call` / `build_request` / `parse_response` are deterministic and
//!   network-free; only `call` touches the wire.
//! - The response shape is opaque `serde_json::Value`; malformed bodies
//!   parse to `None`, never an error.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod schema;
pub mod transport;

mod validate;

pub use client::{ApiCall, Params, SdClient, DEFAULT_BASE_URL};
pub use config::SdConfig;
pub use error::{ApiError, CoercionWarning, ConfigError, ValidationError, ValidationLog};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use schema::{CallSpec, ParameterKind, ParameterSpec};

//! # orgdrill-tableau
//!
//! Blocking client for a Tableau-style BI server:
//! - [`RestClient`] - sign in/out, workbook listing, user lookup
//! - [`owners`] - export every workbook with its owner to CSV
//! - [`metadata`] - run GraphQL queries against the metadata API and save the JSON

pub mod auth;
pub mod config;
pub mod error;
pub mod metadata;
pub mod model;
pub mod owners;
pub mod rest;

pub use auth::{AuthSession, Credentials};
pub use config::ServerConfig;
pub use error::{Result, TableauError};
pub use metadata::MetadataQuery;
pub use model::{Pagination, ServerInfo, User, Workbook};
pub use owners::WorkbookOwnerRecord;
pub use rest::RestClient;

/// API version used to ask the server for its own REST API version
pub const SERVER_INFO_API_VERSION: &str = "2.4";

/// Header carrying the session token on authenticated requests
pub const AUTH_HEADER: &str = "X-Tableau-Auth";

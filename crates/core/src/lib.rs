//! Domain logic for the environmental-enforcement case service.
//!
//! Zero persistence dependencies: field mapping, the in-memory query engine,
//! validation, permissions and the authentication seam all live here so the
//! repository layer, the HTTP API and tests share one implementation.

pub mod auth;
pub mod debounce;
pub mod error;
pub mod field_mapping;
pub mod keys;
pub mod permissions;
pub mod prosecution;
pub mod roles;
pub mod search;
pub mod tables;
pub mod types;
pub mod validation;

//! Shared types, errors, and configuration for the douane backend.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error taxonomy
//! - JWT claims and token service
//! - Authentication request/response payloads
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, JwtService};

//! Core use-case services.
//!
//! # Responsibility
//! - Validate font and group workflows above the repository layer.
//! - Orchestrate repository and blob store calls into use-case APIs.
//! - Translate storage outcomes into user-facing `ServiceError`s.

pub mod error;
pub mod font_service;
pub mod group_service;

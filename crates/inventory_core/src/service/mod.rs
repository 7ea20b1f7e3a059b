//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate provider calls into typed use-case APIs.
//! - Keep UI/FFI layers decoupled from locator and SQL details.

pub mod dummy;
pub mod inventory_service;

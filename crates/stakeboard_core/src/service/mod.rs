//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository, LCD and staking calls into use-case APIs.
//! - Keep UI/FFI/CLI layers decoupled from storage and network details.

pub mod account_service;
pub mod dashboard_service;
pub mod tx_service;

//! Persisted domain records.
//!
//! # Responsibility
//! - Define the records the local store owns (watched accounts).
//!
//! # Invariants
//! - Every record is validated before it reaches storage.
//! - LCD payloads are not modelled here; they live in `lcd::types` and are
//!   cached verbatim.

pub mod account;

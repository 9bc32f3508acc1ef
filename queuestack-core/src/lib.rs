//! Core types for queuestack
//!
//! This crate provides the pieces shared by the queue and topic registries:
//! resource identifier derivation and the bootstrap error taxonomy.

pub mod error;
pub mod ident;

pub use error::BootstrapError;

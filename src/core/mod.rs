//! Core components of the `devstats-rs` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`DsClient`] and its builder.
//! - The primary [`DsError`] type.
//! - Shared data models like [`Record`] and [`CollectionResult`].
//! - Internal networking helpers.

/// The main client (`DsClient`), builder, and target country.
pub mod client;
/// The primary error type (`DsError`) for the crate.
pub mod error;
/// Shared data models (`Record`, `Value`, `Topic`, `CollectionResult`).
pub mod models;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::DsClient`
pub use client::{Country, DsClient, DsClientBuilder};
pub use error::DsError;
pub use models::{
    Collection, CollectionResult, Metadata, RECORD_COLUMNS, Record, TOPICS, Topic, Value,
};

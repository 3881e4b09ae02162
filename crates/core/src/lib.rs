//! Merch Shop Core - Shared types library.
//!
//! This crate provides the records shared by every merch shop component:
//! - `store` - Shop state reducer, persistence bridge and catalog
//! - `cli` - Command-line front end that drives the store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no clocks.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices and emails, plus the
//!   product, cart line and order records that make up the persisted state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

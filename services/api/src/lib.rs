//! Lesson Lab API Library Crate
//!
//! This library contains all the logic for the Lesson Lab web service,
//! including configuration, the in-memory lesson store, API handlers, the
//! browser page, and routing. The `api` binary is a thin wrapper around
//! this library.

pub mod config;
pub mod handlers;
pub mod models;
pub mod page;
pub mod router;
pub mod state;
pub mod store;

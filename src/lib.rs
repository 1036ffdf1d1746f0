//! SIGHT-Lipa terminal client.
//!
//! Landmark registry and tourist-visit logging for the Lipa City tourism
//! office. The crate holds the whole client: the REST client and offline
//! store, the auth and navigation state, the form validator and the
//! `ratatui` screens that sit on top of them.

pub mod api;
pub mod app;
pub mod auth;
pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod logger;
pub mod state;
pub mod store;
pub mod ui;

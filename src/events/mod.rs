//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Network events: landmark, contact and login requests
//! - Terminal events: key presses and the render tick

pub mod network;
pub mod terminal;

//! API module
//!
//! Contains HTTP request handlers for the relay and its companion endpoints

pub mod agents;
pub mod relay;

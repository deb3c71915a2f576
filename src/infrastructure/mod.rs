//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (ChatProvider, ResourceClient, Brain).

pub mod api;
pub mod brain;
pub mod console;
pub mod matrix;

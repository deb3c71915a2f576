//! # Interface Layer
//!
//! User-facing entry points: the chat command handlers.

pub mod commands;

//! # Strings Module
//!
//! Centralizes user-facing replies and log lines.
//! Ensures consistency in messaging and easier updates.

pub mod help;
pub mod logs;
pub mod messages;

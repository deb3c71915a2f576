//! # Application Layer
//!
//! Contains the orchestration of the bot: command routing, the attention window,
//! error reporting and the shared services handed to every command.

pub mod attention;
pub mod bot;
pub mod reporter;
pub mod router;
pub mod services;
pub mod utils;

#[cfg(test)]
pub mod testing;

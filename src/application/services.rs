//! # Services
//!
//! The collaborators every command handler can reach, bundled once at startup and shared
//! behind an `Arc`.

use std::sync::Arc;

use crate::application::attention::AttentionWindow;
use crate::domain::config::AppConfig;
use crate::domain::traits::{ChatProvider, ResourceClient};

pub struct Services {
    pub config: Arc<AppConfig>,
    pub chat: Arc<dyn ChatProvider>,
    pub api: Arc<dyn ResourceClient>,
    pub attention: AttentionWindow,
}

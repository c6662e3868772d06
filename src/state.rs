//! Application state shared by all handlers. Read-only after startup: the
//! Content Store handle, the loaded config and the optional OpenAI client.

use tracing::{info, instrument, warn};

use crate::config::ServiceConfig;
use crate::openai::OpenAI;
use crate::store::ContentStore;

#[derive(Clone)]
pub struct AppState {
    pub store: ContentStore,
    pub config: ServiceConfig,
    pub openai: Option<OpenAI>,
}

impl AppState {
    pub fn new(config: ServiceConfig, openai: Option<OpenAI>) -> Self {
        Self {
            store: ContentStore::new(config.data_dir.clone()),
            config,
            openai,
        }
    }

    /// Build state from config plus env (OpenAI key), logging what's enabled.
    #[instrument(level = "info", skip_all)]
    pub fn from_config(config: ServiceConfig) -> Self {
        let state = Self::new(config, OpenAI::from_env());

        let root = state.store.root();
        if root.is_dir() {
            info!(target: "lesson_backend", data_dir = %root.display(), "Content Store ready");
        } else {
            warn!(target: "lesson_backend", data_dir = %root.display(), "Content Store directory missing; every lesson lookup will fail with 404");
        }

        if let Some(oa) = &state.openai {
            info!(target: "lesson_backend", base_url = %oa.base_url, chat_model = %oa.chat_model, "OpenAI enabled.");
        } else {
            info!(target: "lesson_backend", "OpenAI disabled (no OPENAI_API_KEY). /api/chat will answer 503.");
        }
        state
    }
}

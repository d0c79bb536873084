//! Application state: per-session contexts, prompts and the optional OpenAI client.
//!
//! This module owns:
//!   - the session store (by id); each session holds its own document, challenge set and RNG
//!   - the prompts struct (from TOML or defaults)
//!   - optional OpenAI client
//!
//! Sessions are never shared: every operation names exactly one session id.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::{load_config_from_env, Prompts};
use crate::error::SessionError;
use crate::openai::OpenAI;
use crate::session::Session;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<String, Session>>>,
    pub openai: Option<OpenAI>,
    pub prompts: Prompts,
}

impl AppState {
    /// Build state from env: load config and init OpenAI.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let prompts = load_config_from_env()
            .map(|c| c.prompts)
            .unwrap_or_default();

        // Build optional OpenAI client (if API key present).
        let openai = OpenAI::from_env();
        if let Some(oa) = &openai {
            info!(target: "docassist", base_url = %oa.base_url, fast_model = %oa.fast_model, strong_model = %oa.strong_model, "OpenAI enabled.");
        } else {
            info!(target: "docassist", "OpenAI disabled (no OPENAI_API_KEY). Using local summarizer and QA.");
        }

        Self::with_parts(prompts, openai)
    }

    pub fn with_parts(prompts: Prompts, openai: Option<OpenAI>) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            openai,
            prompts,
        }
    }

    /// Register a fresh, empty session and return its id.
    #[instrument(level = "info", skip(self))]
    pub async fn create_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions
            .write()
            .await
            .insert(id.clone(), Session::new(id.clone()));
        info!(target: "docassist", session = %id, "Session created");
        id
    }

    /// Remove a session. Returns whether it existed.
    #[instrument(level = "info", skip(self), fields(%id))]
    pub async fn drop_session(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            info!(target: "docassist", session = %id, "Session dropped");
        }
        removed
    }

    /// Run `f` against one session under the store's write lock.
    /// `f` must not await; collaborator calls happen outside the lock.
    pub async fn with_session<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Result<T, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::UnknownSession(id.to_string()))?;
        Ok(f(session))
    }

    /// Cheap handle to the session's document text.
    pub async fn document_text(&self, id: &str) -> Result<Arc<str>, SessionError> {
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(id)
            .ok_or_else(|| SessionError::UnknownSession(id.to_string()))?;
        session
            .document()
            .map(|d| d.text.clone())
            .ok_or(SessionError::NoDocument)
    }
}

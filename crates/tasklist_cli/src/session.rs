use tasklist_core::config::{Config, Palette, palette_for_theme};
use tasklist_core::error::AppError;
use tasklist_core::model::DEFAULT_PRIORITY;
use tasklist_core::store::TaskStore;

/// Environment variable that pre-signs a session in, standing in for
/// an identity provider. Useful for one-shot scripting and tests.
pub const USER_ENV_VAR: &str = "TASKLIST_USER";

/// Live state of one running session: the task collection, the
/// signed-in user, and the presentation config. Dropped on exit; tasks
/// do not outlive the session.
pub struct Session {
    pub store: TaskStore,
    user: Option<String>,
    config: Config,
    palette: Palette,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let user = std::env::var(USER_ENV_VAR)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let palette = palette_for_theme(config.theme.as_deref());

        Self {
            store: TaskStore::new(),
            user,
            config,
            palette,
        }
    }

    pub fn signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn sign_in(&mut self, name: &str) -> Result<&str, AppError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input("name is required"));
        }
        self.user = Some(trimmed.to_string());
        Ok(self.user.as_deref().unwrap_or_default())
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn default_priority(&self) -> &str {
        self.config
            .default_priority
            .as_deref()
            .unwrap_or(DEFAULT_PRIORITY)
    }

    pub fn set_config(&mut self, config: Config) {
        self.palette = palette_for_theme(config.theme.as_deref());
        self.config = config;
    }
}

use crate::command::ChatId;
use crate::error::Error;
use crate::formatter::ParseMode;
use once_cell::sync::Lazy;
use std::sync::Mutex;

/// Default Bot API endpoint
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

static CONFIGURATION: Lazy<Mutex<Configuration>> =
    Lazy::new(|| Mutex::new(Configuration::default()));

/// HTTP client options for API requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions { timeout: 30 }
    }
}

/// Configuration for the Telegrama client
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Telegram Bot API token
    bot_token: Option<String>,
    /// Bot API base URL
    api_url: String,
    /// Default chat for commands without a destination
    chat_id: Option<String>,
    /// Default parse mode for commands that accept one
    default_parse_mode: Option<ParseMode>,
    /// HTTP client options
    client_options: ClientOptions,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            bot_token: None,
            api_url: DEFAULT_API_URL.to_string(),
            chat_id: None,
            default_parse_mode: None,
            client_options: ClientOptions::default(),
        }
    }
}

impl Configuration {
    /// Snapshot of the global configuration
    pub fn current() -> Configuration {
        match CONFIGURATION.lock() {
            Ok(config) => config.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Modify the global configuration
    pub fn update<F>(config_fn: F)
    where
        F: FnOnce(&mut Configuration),
    {
        let mut config = match CONFIGURATION.lock() {
            Ok(config) => config,
            Err(poisoned) => poisoned.into_inner(),
        };
        config_fn(&mut config);
    }

    /// Set the Telegram Bot API token
    pub fn set_bot_token<S: AsRef<str>>(&mut self, token: S) {
        self.bot_token = Some(token.as_ref().to_string());
    }

    /// Get the Telegram Bot API token
    pub fn bot_token(&self) -> Result<&str, Error> {
        self.bot_token
            .as_deref()
            .ok_or_else(|| Error::configuration("Bot token not configured"))
    }

    /// Point the client at another Bot API server (e.g. a local one)
    pub fn set_api_url<S: AsRef<str>>(&mut self, url: S) {
        self.api_url = url.as_ref().trim_end_matches('/').to_string();
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Set the default chat ID
    pub fn set_chat_id<S: AsRef<str>>(&mut self, chat_id: S) {
        let chat_id = chat_id.as_ref().trim();
        self.chat_id = if chat_id.is_empty() {
            None
        } else {
            Some(chat_id.to_string())
        };
    }

    /// Get the default chat ID
    pub fn chat_id(&self) -> Result<ChatId, Error> {
        self.chat_id
            .as_deref()
            .map(ChatId::from)
            .ok_or_else(|| Error::configuration("Chat ID not configured"))
    }

    /// Set the default parse mode; an empty string clears it
    pub fn set_default_parse_mode<S: AsRef<str>>(&mut self, mode: S) -> Result<(), Error> {
        let mode = mode.as_ref();
        self.default_parse_mode = if mode.is_empty() {
            None
        } else {
            Some(mode.parse()?)
        };
        Ok(())
    }

    /// Get the default parse mode
    pub fn default_parse_mode(&self) -> Option<ParseMode> {
        self.default_parse_mode
    }

    /// Set client options
    pub fn set_client_options(&mut self, options: ClientOptions) {
        self.client_options = options;
    }

    /// Get client options
    pub fn client_options(&self) -> &ClientOptions {
        &self.client_options
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Error> {
        let token = self.bot_token()?;
        if token.trim().is_empty() || token.contains('/') {
            return Err(Error::configuration("Bot token is malformed"));
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(Error::configuration(format!(
                "Invalid API URL: '{}'. Must start with http:// or https://",
                self.api_url
            )));
        }

        if self.client_options.timeout == 0 {
            return Err(Error::configuration("Timeout must be at least one second"));
        }

        Ok(())
    }
}

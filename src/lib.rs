/*!
 * Telegrama-wire - schema-driven typed wire objects for the Telegram Bot API
 *
 * Every Bot API object and method is described once, as data, in a static
 * schema table. A single generic engine uses those tables to build,
 * validate, serialize and deserialize values, and commands are sent through
 * a pluggable transport with a one-shot fallback for stale reply references.
 */

pub mod client;
mod codec;
pub mod command;
pub mod configuration;
pub mod error;
pub mod formatter;
pub mod methods;
pub mod schema;
pub mod transport;
pub mod types;
pub mod value;

/// The main entry point for the Telegrama library.
///
/// Provides static methods for configuration and sending commands.
pub struct Telegrama;

impl Telegrama {
    /// Configure the Telegrama library with the provided settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use telegrama_wire::Telegrama;
    ///
    /// Telegrama::configure(|config| {
    ///     config.set_bot_token("YOUR_BOT_TOKEN");
    ///     config.set_chat_id("12345");
    /// });
    /// ```
    pub fn configure<F>(config_fn: F)
    where
        F: FnOnce(&mut configuration::Configuration),
    {
        configuration::Configuration::update(config_fn);
    }

    /// Build an HTTP client from the current configuration
    pub fn client() -> Result<client::Client, error::Error> {
        client::Client::new(&configuration::Configuration::current())
    }

    /// Resolve and send a command using the configured settings.
    ///
    /// The configured default chat and parse mode fill whatever `context`
    /// leaves unset.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use telegrama_wire::{methods, Context, Telegrama};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let command = methods::send_message("Hello from Telegrama!")?;
    /// let sent = Telegrama::send(&command, &Context::default())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn send(
        command: &command::Command,
        context: &command::Context,
    ) -> Result<value::Value, error::Error> {
        let config = configuration::Configuration::current();
        let client = client::Client::new(&config)?;

        let mut context = context.clone();
        if context.destination.is_none() {
            context.destination = config.chat_id().ok();
        }
        if context.parse_mode.is_none() {
            context.parse_mode = config.default_parse_mode();
        }

        command.apply_context(&context)?.dispatch(&client)
    }
}

// Re-export main components for easy access
pub use client::{Client, Response};
pub use command::{ChatId, Command, Context, ReplyTarget, ResolvedCommand};
pub use configuration::{ClientOptions, Configuration};
pub use error::{ApiError, Error, ValidationError};
pub use formatter::{Formatter, ParseMode};
pub use schema::{CommandSchema, FieldSchema, FieldType, ObjectSchema};
pub use transport::Transport;
pub use value::{Value, WireMap, WireObject};

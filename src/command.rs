//! Sendable commands: context resolution and dispatch.
//!
//! A [`Command`] carries its parameters plus two context slots, the
//! destination chat and the message it replies to. [`Command::apply_context`]
//! fills any unset slot from a [`Context`] and returns a [`ResolvedCommand`],
//! which is what actually gets serialized and sent.

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::codec;
use crate::error::{Error, ValidationError};
use crate::formatter::ParseMode;
use crate::schema::{CommandSchema, FieldSchema, FieldType};
use crate::transport::Transport;
use crate::value::{Value, WireMap, WireObject};

/// Target chat: numeric id or `@channelusername`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        ChatId::Id(id)
    }
}

impl From<i32> for ChatId {
    fn from(id: i32) -> Self {
        ChatId::Id(i64::from(id))
    }
}

impl From<&str> for ChatId {
    fn from(value: &str) -> Self {
        match value.parse::<i64>() {
            Ok(id) => ChatId::Id(id),
            Err(_) => ChatId::Username(value.to_string()),
        }
    }
}

impl From<String> for ChatId {
    fn from(value: String) -> Self {
        ChatId::from(value.as_str())
    }
}

impl FromStr for ChatId {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(ChatId::from(value))
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatId::Id(id) => write!(f, "{}", id),
            ChatId::Username(name) => f.write_str(name),
        }
    }
}

impl ChatId {
    fn to_json(&self) -> Json {
        match self {
            ChatId::Id(id) => Json::from(*id),
            ChatId::Username(name) => Json::String(name.clone()),
        }
    }

    fn from_json(raw: &Json) -> Option<ChatId> {
        match raw {
            Json::Number(n) => n.as_i64().map(ChatId::Id),
            Json::String(s) => Some(ChatId::Username(s.clone())),
            _ => None,
        }
    }
}

/// Reply slot of a [`Command`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyTarget {
    /// Take the reply target from the context
    #[default]
    Unresolved,
    /// Reply to this message id
    Message(i64),
    /// Never reply, whatever the context says
    Omitted,
}

/// Defaults applied to commands right before sending.
///
/// Usually derived from the update being handled, so that a handler's
/// commands go back to the chat the update came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    pub destination: Option<ChatId>,
    pub reply_target: Option<i64>,
    pub parse_mode: Option<ParseMode>,
}

impl Context {
    pub fn new<C: Into<ChatId>>(destination: C) -> Self {
        Context {
            destination: Some(destination.into()),
            ..Context::default()
        }
    }

    pub fn replying_to(mut self, message_id: i64) -> Self {
        self.reply_target = Some(message_id);
        self
    }

    pub fn with_parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = Some(parse_mode);
        self
    }

    /// Context pointing back at the message carried by an update.
    ///
    /// Looks at `message`, `edited_message`, `channel_post`,
    /// `edited_channel_post` and finally `callback_query.message`. Returns
    /// an empty context if none is present.
    pub fn from_update(update: &WireObject) -> Self {
        let message = ["message", "edited_message", "channel_post", "edited_channel_post"]
            .iter()
            .find_map(|key| update.get_object(key))
            .or_else(|| {
                update
                    .get_object("callback_query")
                    .and_then(|query| query.get_object("message"))
            });

        match message {
            Some(message) => Context {
                destination: message
                    .get_object("chat")
                    .and_then(|chat| chat.get_i64("id"))
                    .map(ChatId::Id),
                reply_target: message.get_i64("message_id"),
                parse_mode: None,
            },
            None => Context::default(),
        }
    }
}

/// A command built by application code, not yet bound to a context
#[derive(Debug, Clone)]
pub struct Command {
    schema: &'static CommandSchema,
    params: WireObject,
    destination: Option<ChatId>,
    reply_target: ReplyTarget,
}

impl Command {
    pub fn new(schema: &'static CommandSchema) -> Self {
        Command {
            schema,
            params: WireObject::new(schema.params),
            destination: None,
            reply_target: ReplyTarget::Unresolved,
        }
    }

    pub fn schema(&self) -> &'static CommandSchema {
        self.schema
    }

    pub fn method(&self) -> &'static str {
        self.schema.method
    }

    pub fn params(&self) -> &WireObject {
        &self.params
    }

    pub fn destination(&self) -> Option<&ChatId> {
        self.destination.as_ref()
    }

    pub fn reply_target(&self) -> ReplyTarget {
        self.reply_target
    }

    /// Set a parameter
    pub fn set<V: Into<Value>>(&mut self, name: &str, value: V) -> Result<(), ValidationError> {
        self.params.set(name, value)
    }

    pub fn with<V: Into<Value>>(mut self, name: &str, value: V) -> Result<Self, ValidationError> {
        self.params.set(name, value)?;
        Ok(self)
    }

    /// Send to this chat regardless of the context
    pub fn to<C: Into<ChatId>>(mut self, destination: C) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Reply to this message regardless of the context
    pub fn reply_to(mut self, message_id: i64) -> Self {
        self.reply_target = ReplyTarget::Message(message_id);
        self
    }

    /// Do not reply, even if the context carries a reply target
    pub fn without_reply(mut self) -> Self {
        self.reply_target = ReplyTarget::Omitted;
        self
    }

    /// Bind the command to a context.
    ///
    /// Explicit values set on the command win over the context, slot by
    /// slot. Fails if the method needs a destination and neither side has
    /// one.
    pub fn apply_context(&self, context: &Context) -> Result<ResolvedCommand, ValidationError> {
        let destination = match self.schema.destination_key {
            Some(key) => {
                let chat = self
                    .destination
                    .clone()
                    .or_else(|| context.destination.clone())
                    .ok_or(ValidationError::MissingRequiredField {
                        object: self.schema.method,
                        field: key,
                    })?;
                Some(chat)
            }
            None => None,
        };

        let reply_target = match (self.schema.reply_key, self.reply_target) {
            (None, _) | (Some(_), ReplyTarget::Omitted) => None,
            (Some(_), ReplyTarget::Message(id)) => Some(id),
            (Some(_), ReplyTarget::Unresolved) => context.reply_target,
        };

        let mut params = self.params.clone();
        if let Some(mode) = context.parse_mode {
            if params.schema().field("parse_mode").is_some() && !params.contains("parse_mode") {
                params.set("parse_mode", mode.as_str())?;
            }
        }

        Ok(ResolvedCommand {
            schema: self.schema,
            params,
            destination,
            reply_target,
        })
    }
}

/// A command with its context slots filled, ready to be sent
#[derive(Debug, Clone)]
pub struct ResolvedCommand {
    schema: &'static CommandSchema,
    params: WireObject,
    destination: Option<ChatId>,
    reply_target: Option<i64>,
}

impl ResolvedCommand {
    pub fn schema(&self) -> &'static CommandSchema {
        self.schema
    }

    pub fn method(&self) -> &'static str {
        self.schema.method
    }

    pub fn params(&self) -> &WireObject {
        &self.params
    }

    pub fn destination(&self) -> Option<&ChatId> {
        self.destination.as_ref()
    }

    pub fn reply_target(&self) -> Option<i64> {
        self.reply_target
    }

    /// Same command with the reply reference dropped
    pub fn without_reply(&self) -> ResolvedCommand {
        ResolvedCommand {
            reply_target: None,
            ..self.clone()
        }
    }

    /// Serialize parameters and slots into one wire map.
    ///
    /// The destination comes first, the reply reference is omitted when
    /// unset.
    pub fn to_wire(&self) -> Result<WireMap, ValidationError> {
        let params = self.params.to_wire()?;
        let mut map = WireMap::with_capacity(params.len() + 2);
        if let Some(key) = self.schema.destination_key {
            let chat = self
                .destination
                .as_ref()
                .ok_or(ValidationError::MissingRequiredField {
                    object: self.schema.method,
                    field: key,
                })?;
            map.insert(key.to_string(), chat.to_json());
        }
        map.extend(params);
        if let (Some(key), Some(id)) = (self.schema.reply_key, self.reply_target) {
            map.insert(key.to_string(), Json::from(id));
        }
        Ok(map)
    }

    /// Rebuild a resolved command from its wire map
    pub fn from_wire(
        schema: &'static CommandSchema,
        map: &WireMap,
    ) -> Result<ResolvedCommand, ValidationError> {
        let destination = match schema.destination_key {
            Some(key) => match map.get(key) {
                None | Some(Json::Null) => {
                    return Err(ValidationError::MissingRequiredField {
                        object: schema.method,
                        field: key,
                    });
                }
                Some(raw) => {
                    Some(
                        ChatId::from_json(raw).ok_or_else(|| ValidationError::TypeMismatch {
                            object: schema.method,
                            field: key,
                            expected: "integer or string".to_string(),
                            found: "other",
                        })?,
                    )
                }
            },
            None => None,
        };

        let reply_target = match schema.reply_key {
            Some(key) => match map.get(key) {
                None | Some(Json::Null) => None,
                Some(raw) => Some(raw.as_i64().ok_or_else(|| ValidationError::TypeMismatch {
                    object: schema.method,
                    field: key,
                    expected: FieldType::Integer.describe(),
                    found: "other",
                })?),
            },
            None => None,
        };

        Ok(ResolvedCommand {
            schema,
            params: WireObject::from_wire(schema.params, map)?,
            destination,
            reply_target,
        })
    }

    /// Send the command, retrying once without the reply reference if the
    /// replied-to message has vanished in the meantime.
    ///
    /// The retry goes through [`ResolvedCommand::send_once`], so a second
    /// failure of any kind is returned as is.
    pub fn dispatch<T: Transport + ?Sized>(&self, transport: &T) -> Result<Value, Error> {
        match self.send_once(transport) {
            Err(Error::Api(err)) if err.is_reply_not_found() => {
                warn!(
                    "{}: replied-to message not found, resending without reply ({})",
                    self.method(),
                    err.description
                );
                self.without_reply().send_once(transport)
            }
            outcome => outcome,
        }
    }

    /// Single request with no recovery
    pub fn send_once<T: Transport + ?Sized>(&self, transport: &T) -> Result<Value, Error> {
        let params = self.to_wire()?;
        debug!(
            "invoking {} with {} parameter(s)",
            self.method(),
            params.len()
        );
        let response = transport.invoke(self.method(), &params)?;
        self.decode_result(&response)
    }

    fn decode_result(&self, response: &Json) -> Result<Value, Error> {
        let field = FieldSchema {
            name: "result",
            wire_key: "result",
            ty: self.schema.result,
            required: true,
        };
        Ok(codec::decode_value(
            self.schema.method,
            &field,
            &self.schema.result,
            response,
        )?)
    }
}

impl PartialEq for ResolvedCommand {
    fn eq(&self, other: &Self) -> bool {
        self.schema.is(other.schema)
            && self.params == other.params
            && self.destination == other.destination
            && self.reply_target == other.reply_target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::{self, DELETE_MESSAGE, GET_ME, SEND_MESSAGE};
    use crate::types::UPDATE;
    use serde_json::json;

    #[test]
    fn explicit_reply_wins_over_context() {
        let command = methods::send_message("hi").unwrap().reply_to(42);
        let resolved = command
            .apply_context(&Context::new(7).replying_to(99))
            .unwrap();
        assert_eq!(resolved.reply_target(), Some(42));
        assert_eq!(resolved.destination(), Some(&ChatId::Id(7)));
    }

    #[test]
    fn unresolved_reply_takes_context_value() {
        let command = methods::send_message("hi").unwrap();
        let resolved = command
            .apply_context(&Context::new(7).replying_to(99))
            .unwrap();
        assert_eq!(resolved.reply_target(), Some(99));
    }

    #[test]
    fn omitted_reply_ignores_context() {
        let command = methods::send_message("hi").unwrap().without_reply();
        let resolved = command
            .apply_context(&Context::new(7).replying_to(99))
            .unwrap();
        assert_eq!(resolved.reply_target(), None);
    }

    #[test]
    fn explicit_destination_wins_over_context() {
        let command = methods::send_message("hi").unwrap().to("@news");
        let resolved = command.apply_context(&Context::new(7)).unwrap();
        assert_eq!(
            resolved.destination(),
            Some(&ChatId::Username("@news".to_string()))
        );
    }

    #[test]
    fn apply_context_leaves_the_command_untouched() {
        let command = methods::send_message("hi").unwrap();
        let _ = command.apply_context(&Context::new(7).replying_to(99));
        assert_eq!(command.destination(), None);
        assert_eq!(command.reply_target(), ReplyTarget::Unresolved);
    }

    #[test]
    fn missing_destination_is_reported_on_the_wire_key() {
        let err = methods::send_message("hi")
            .unwrap()
            .apply_context(&Context::default())
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingRequiredField {
                object: "sendMessage",
                field: "chat_id",
            }
        );
    }

    #[test]
    fn methods_without_reply_key_drop_context_reply() {
        let resolved = Command::new(&DELETE_MESSAGE)
            .with("message_id", 5)
            .unwrap()
            .apply_context(&Context::new(7).replying_to(99))
            .unwrap();
        assert_eq!(resolved.reply_target(), None);
        assert!(!resolved
            .to_wire()
            .unwrap()
            .contains_key("reply_to_message_id"));
    }

    #[test]
    fn methods_without_destination_need_no_context() {
        let resolved = Command::new(&GET_ME)
            .apply_context(&Context::default())
            .unwrap();
        assert!(resolved.to_wire().unwrap().is_empty());
    }

    #[test]
    fn context_parse_mode_fills_unset_parameter_only() {
        let context = Context::new(1).with_parse_mode(ParseMode::Html);

        let resolved = methods::send_message("<b>hi</b>")
            .unwrap()
            .apply_context(&context)
            .unwrap();
        assert_eq!(resolved.params().get_str("parse_mode"), Some("HTML"));

        let resolved = methods::send_message("*hi*")
            .unwrap()
            .with("parse_mode", "MarkdownV2")
            .unwrap()
            .apply_context(&context)
            .unwrap();
        assert_eq!(resolved.params().get_str("parse_mode"), Some("MarkdownV2"));

        let resolved = Command::new(&DELETE_MESSAGE)
            .with("message_id", 1)
            .unwrap()
            .apply_context(&context)
            .unwrap();
        assert!(!resolved.params().contains("parse_mode"));
    }

    #[test]
    fn wire_map_puts_destination_first_and_reply_last() {
        let resolved = methods::send_message("hi")
            .unwrap()
            .reply_to(3)
            .apply_context(&Context::new(10))
            .unwrap();
        let wire = resolved.to_wire().unwrap();
        let keys: Vec<&str> = wire.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["chat_id", "text", "reply_to_message_id"]);
        assert_eq!(
            ResolvedCommand::from_wire(&SEND_MESSAGE, &wire).unwrap(),
            resolved
        );
    }

    #[test]
    fn context_from_update_points_at_the_message() {
        let raw = json!({
            "update_id": 1,
            "message": {
                "message_id": 55,
                "date": 0,
                "chat": {"id": -100, "type": "group"},
                "text": "ping"
            }
        });
        let update = WireObject::from_wire(&UPDATE, raw.as_object().unwrap()).unwrap();
        let context = Context::from_update(&update);
        assert_eq!(context.destination, Some(ChatId::Id(-100)));
        assert_eq!(context.reply_target, Some(55));
    }

    #[test]
    fn context_from_callback_query_uses_attached_message() {
        let raw = json!({
            "update_id": 2,
            "callback_query": {
                "id": "cb",
                "from": {"id": 1, "is_bot": false, "first_name": "A"},
                "chat_instance": "ci",
                "message": {
                    "message_id": 8,
                    "date": 0,
                    "chat": {"id": 4, "type": "private"}
                }
            }
        });
        let update = WireObject::from_wire(&UPDATE, raw.as_object().unwrap()).unwrap();
        let context = Context::from_update(&update);
        assert_eq!(context.destination, Some(ChatId::Id(4)));
        assert_eq!(context.reply_target, Some(8));
    }

    #[test]
    fn chat_id_parses_numbers_and_usernames() {
        assert_eq!(ChatId::from("-1001"), ChatId::Id(-1001));
        assert_eq!(
            "@channel".parse::<ChatId>().unwrap(),
            ChatId::Username("@channel".to_string())
        );
        assert_eq!(ChatId::Id(5).to_string(), "5");
    }
}

//! Schema table for Bot API methods, plus shortcuts for the common ones.
//!
//! Destination (`chat_id`) and reply (`reply_to_message_id`) are not listed
//! as parameters: they are context slots on [`Command`] and are written
//! into the wire map when the command is resolved.

use crate::command::Command;
use crate::error::ValidationError;
use crate::schema::{optional, renamed, required, CommandSchema, FieldType, ObjectSchema};
use crate::types::{
    MESSAGE, MESSAGE_ENTITY_ITEM, REPLY_MARKUP, STRING_ITEM, UPDATE_ITEM, USER,
};

use FieldType::{Boolean, Float, Integer, Object, OneOf};

const CHAT_ID: Option<&str> = Some("chat_id");
const REPLY_TO: Option<&str> = Some("reply_to_message_id");

pub static GET_ME: CommandSchema = CommandSchema {
    method: "getMe",
    params: &ObjectSchema {
        name: "getMe",
        fields: &[],
    },
    result: Object(&USER),
    destination_key: None,
    reply_key: None,
};

/// Fetch pending updates. Only the request shape is described; polling is
/// left to the caller.
pub static GET_UPDATES: CommandSchema = CommandSchema {
    method: "getUpdates",
    params: &ObjectSchema {
        name: "getUpdates",
        fields: &[
            optional("offset", Integer),
            optional("limit", Integer),
            optional("timeout", Integer),
            optional("allowed_updates", FieldType::List(&STRING_ITEM)),
        ],
    },
    result: FieldType::List(&UPDATE_ITEM),
    destination_key: None,
    reply_key: None,
};

pub static SEND_MESSAGE: CommandSchema = CommandSchema {
    method: "sendMessage",
    params: &ObjectSchema {
        name: "sendMessage",
        fields: &[
            required("text", FieldType::String),
            optional("parse_mode", FieldType::String),
            optional("entities", FieldType::List(&MESSAGE_ENTITY_ITEM)),
            optional("disable_web_page_preview", Boolean),
            optional("disable_notification", Boolean),
            optional("reply_markup", OneOf(&REPLY_MARKUP)),
        ],
    },
    result: Object(&MESSAGE),
    destination_key: CHAT_ID,
    reply_key: REPLY_TO,
};

/// Photo by file id or HTTP URL.
pub static SEND_PHOTO: CommandSchema = CommandSchema {
    method: "sendPhoto",
    params: &ObjectSchema {
        name: "sendPhoto",
        fields: &[
            required("photo", FieldType::String),
            optional("caption", FieldType::String),
            optional("parse_mode", FieldType::String),
            optional("disable_notification", Boolean),
            optional("reply_markup", OneOf(&REPLY_MARKUP)),
        ],
    },
    result: Object(&MESSAGE),
    destination_key: CHAT_ID,
    reply_key: REPLY_TO,
};

pub static SEND_DOCUMENT: CommandSchema = CommandSchema {
    method: "sendDocument",
    params: &ObjectSchema {
        name: "sendDocument",
        fields: &[
            required("document", FieldType::String),
            optional("caption", FieldType::String),
            optional("parse_mode", FieldType::String),
            optional("disable_notification", Boolean),
            optional("reply_markup", OneOf(&REPLY_MARKUP)),
        ],
    },
    result: Object(&MESSAGE),
    destination_key: CHAT_ID,
    reply_key: REPLY_TO,
};

pub static SEND_STICKER: CommandSchema = CommandSchema {
    method: "sendSticker",
    params: &ObjectSchema {
        name: "sendSticker",
        fields: &[
            required("sticker", FieldType::String),
            optional("disable_notification", Boolean),
            optional("reply_markup", OneOf(&REPLY_MARKUP)),
        ],
    },
    result: Object(&MESSAGE),
    destination_key: CHAT_ID,
    reply_key: REPLY_TO,
};

pub static SEND_LOCATION: CommandSchema = CommandSchema {
    method: "sendLocation",
    params: &ObjectSchema {
        name: "sendLocation",
        fields: &[
            required("latitude", Float),
            required("longitude", Float),
            optional("live_period", Integer),
            optional("disable_notification", Boolean),
            optional("reply_markup", OneOf(&REPLY_MARKUP)),
        ],
    },
    result: Object(&MESSAGE),
    destination_key: CHAT_ID,
    reply_key: REPLY_TO,
};

pub static SEND_CONTACT: CommandSchema = CommandSchema {
    method: "sendContact",
    params: &ObjectSchema {
        name: "sendContact",
        fields: &[
            required("phone_number", FieldType::String),
            required("first_name", FieldType::String),
            optional("last_name", FieldType::String),
            optional("disable_notification", Boolean),
            optional("reply_markup", OneOf(&REPLY_MARKUP)),
        ],
    },
    result: Object(&MESSAGE),
    destination_key: CHAT_ID,
    reply_key: REPLY_TO,
};

pub static SEND_POLL: CommandSchema = CommandSchema {
    method: "sendPoll",
    params: &ObjectSchema {
        name: "sendPoll",
        fields: &[
            required("question", FieldType::String),
            required("options", FieldType::List(&STRING_ITEM)),
            optional("is_anonymous", Boolean),
            renamed("kind", "type", FieldType::String, false),
            optional("allows_multiple_answers", Boolean),
            optional("is_closed", Boolean),
            optional("disable_notification", Boolean),
            optional("reply_markup", OneOf(&REPLY_MARKUP)),
        ],
    },
    result: Object(&MESSAGE),
    destination_key: CHAT_ID,
    reply_key: REPLY_TO,
};

pub static FORWARD_MESSAGE: CommandSchema = CommandSchema {
    method: "forwardMessage",
    params: &ObjectSchema {
        name: "forwardMessage",
        fields: &[
            required("from_chat_id", Integer),
            required("message_id", Integer),
            optional("disable_notification", Boolean),
        ],
    },
    result: Object(&MESSAGE),
    destination_key: CHAT_ID,
    reply_key: None,
};

/// "typing", "upload_photo", ...
pub static SEND_CHAT_ACTION: CommandSchema = CommandSchema {
    method: "sendChatAction",
    params: &ObjectSchema {
        name: "sendChatAction",
        fields: &[required("action", FieldType::String)],
    },
    result: Boolean,
    destination_key: CHAT_ID,
    reply_key: None,
};

pub static DELETE_MESSAGE: CommandSchema = CommandSchema {
    method: "deleteMessage",
    params: &ObjectSchema {
        name: "deleteMessage",
        fields: &[required("message_id", Integer)],
    },
    result: Boolean,
    destination_key: CHAT_ID,
    reply_key: None,
};

pub static ANSWER_CALLBACK_QUERY: CommandSchema = CommandSchema {
    method: "answerCallbackQuery",
    params: &ObjectSchema {
        name: "answerCallbackQuery",
        fields: &[
            required("callback_query_id", FieldType::String),
            optional("text", FieldType::String),
            optional("show_alert", Boolean),
            optional("url", FieldType::String),
        ],
    },
    result: Boolean,
    destination_key: None,
    reply_key: None,
};

/// Every method in the table
pub static ALL: [&CommandSchema; 13] = [
    &GET_ME,
    &GET_UPDATES,
    &SEND_MESSAGE,
    &SEND_PHOTO,
    &SEND_DOCUMENT,
    &SEND_STICKER,
    &SEND_LOCATION,
    &SEND_CONTACT,
    &SEND_POLL,
    &FORWARD_MESSAGE,
    &SEND_CHAT_ACTION,
    &DELETE_MESSAGE,
    &ANSWER_CALLBACK_QUERY,
];

/// Look a method up by its Bot API name
pub fn by_name(method: &str) -> Option<&'static CommandSchema> {
    ALL.iter().copied().find(|schema| schema.method == method)
}

pub fn send_message<S: Into<String>>(text: S) -> Result<Command, ValidationError> {
    Command::new(&SEND_MESSAGE).with("text", text.into())
}

pub fn send_photo<S: Into<String>>(photo: S) -> Result<Command, ValidationError> {
    Command::new(&SEND_PHOTO).with("photo", photo.into())
}

pub fn send_sticker<S: Into<String>>(sticker: S) -> Result<Command, ValidationError> {
    Command::new(&SEND_STICKER).with("sticker", sticker.into())
}

pub fn send_location(latitude: f64, longitude: f64) -> Result<Command, ValidationError> {
    Command::new(&SEND_LOCATION)
        .with("latitude", latitude)?
        .with("longitude", longitude)
}

pub fn send_poll<Q, O>(question: Q, options: Vec<O>) -> Result<Command, ValidationError>
where
    Q: Into<String>,
    O: Into<String>,
{
    let options: Vec<String> = options.into_iter().map(Into::into).collect();
    Command::new(&SEND_POLL)
        .with("question", question.into())?
        .with("options", options)
}

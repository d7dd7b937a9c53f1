//! Schema table for objects received from the Bot API.
//!
//! Field names and wire keys follow <https://core.telegram.org/bots/api#available-types>.

use crate::schema::{optional, renamed, required, FieldType, ObjectSchema};

use FieldType::{Boolean, Float, Integer, Object};

/// A Telegram user or bot.
pub static USER: ObjectSchema = ObjectSchema {
    name: "User",
    fields: &[
        required("id", Integer),
        required("is_bot", Boolean),
        required("first_name", FieldType::String),
        optional("last_name", FieldType::String),
        optional("username", FieldType::String),
        optional("language_code", FieldType::String),
    ],
};

/// A private chat, group, supergroup or channel.
pub static CHAT: ObjectSchema = ObjectSchema {
    name: "Chat",
    fields: &[
        required("id", Integer),
        renamed("kind", "type", FieldType::String, true),
        optional("title", FieldType::String),
        optional("username", FieldType::String),
        optional("first_name", FieldType::String),
        optional("last_name", FieldType::String),
    ],
};

/// One size of a photo or a file / sticker thumbnail.
pub static PHOTO_SIZE: ObjectSchema = ObjectSchema {
    name: "PhotoSize",
    fields: &[
        required("file_id", FieldType::String),
        required("file_unique_id", FieldType::String),
        required("width", Integer),
        required("height", Integer),
        optional("file_size", Integer),
    ],
};

pub static STICKER: ObjectSchema = ObjectSchema {
    name: "Sticker",
    fields: &[
        required("file_id", FieldType::String),
        required("file_unique_id", FieldType::String),
        required("width", Integer),
        required("height", Integer),
        required("is_animated", Boolean),
        optional("thumb", Object(&PHOTO_SIZE)),
        optional("emoji", FieldType::String),
        optional("set_name", FieldType::String),
        optional("file_size", Integer),
    ],
};

/// A general file (as opposed to photos, voice messages and audio files).
pub static DOCUMENT: ObjectSchema = ObjectSchema {
    name: "Document",
    fields: &[
        required("file_id", FieldType::String),
        required("file_unique_id", FieldType::String),
        optional("thumb", Object(&PHOTO_SIZE)),
        optional("file_name", FieldType::String),
        optional("mime_type", FieldType::String),
        optional("file_size", Integer),
    ],
};

/// A point on the map.
pub static LOCATION: ObjectSchema = ObjectSchema {
    name: "Location",
    fields: &[required("longitude", Float), required("latitude", Float)],
};

pub static CONTACT: ObjectSchema = ObjectSchema {
    name: "Contact",
    fields: &[
        required("phone_number", FieldType::String),
        required("first_name", FieldType::String),
        optional("last_name", FieldType::String),
        optional("user_id", Integer),
    ],
};

/// One special entity in a text message: hashtag, username, URL, etc.
pub static MESSAGE_ENTITY: ObjectSchema = ObjectSchema {
    name: "MessageEntity",
    fields: &[
        renamed("kind", "type", FieldType::String, true),
        required("offset", Integer),
        required("length", Integer),
        optional("url", FieldType::String),
        optional("user", Object(&USER)),
    ],
};

pub static POLL_OPTION: ObjectSchema = ObjectSchema {
    name: "PollOption",
    fields: &[
        required("text", FieldType::String),
        required("voter_count", Integer),
    ],
};

pub static POLL: ObjectSchema = ObjectSchema {
    name: "Poll",
    fields: &[
        required("id", FieldType::String),
        required("question", FieldType::String),
        required("options", FieldType::List(&POLL_OPTION_ITEM)),
        required("total_voter_count", Integer),
        required("is_closed", Boolean),
        required("is_anonymous", Boolean),
        renamed("kind", "type", FieldType::String, true),
        required("allows_multiple_answers", Boolean),
    ],
};

/// Button of a custom reply keyboard.
pub static KEYBOARD_BUTTON: ObjectSchema = ObjectSchema {
    name: "KeyboardButton",
    fields: &[
        required("text", FieldType::String),
        optional("request_contact", Boolean),
        optional("request_location", Boolean),
    ],
};

/// Button of an inline keyboard.
pub static INLINE_KEYBOARD_BUTTON: ObjectSchema = ObjectSchema {
    name: "InlineKeyboardButton",
    fields: &[
        required("text", FieldType::String),
        optional("url", FieldType::String),
        optional("callback_data", FieldType::String),
        optional("switch_inline_query", FieldType::String),
    ],
};

/// Inline keyboard attached to a message.
pub static INLINE_KEYBOARD_MARKUP: ObjectSchema = ObjectSchema {
    name: "InlineKeyboardMarkup",
    fields: &[required(
        "inline_keyboard",
        FieldType::List(&INLINE_KEYBOARD_ROW),
    )],
};

/// Custom keyboard with reply options.
pub static REPLY_KEYBOARD_MARKUP: ObjectSchema = ObjectSchema {
    name: "ReplyKeyboardMarkup",
    fields: &[
        required("keyboard", FieldType::List(&KEYBOARD_ROW)),
        optional("resize_keyboard", Boolean),
        optional("one_time_keyboard", Boolean),
        optional("selective", Boolean),
    ],
};

pub static REPLY_KEYBOARD_REMOVE: ObjectSchema = ObjectSchema {
    name: "ReplyKeyboardRemove",
    fields: &[
        required("remove_keyboard", Boolean),
        optional("selective", Boolean),
    ],
};

pub static FORCE_REPLY: ObjectSchema = ObjectSchema {
    name: "ForceReply",
    fields: &[
        required("force_reply", Boolean),
        optional("selective", Boolean),
    ],
};

/// A message.
///
/// The sender lives under the wire key `from`; it is exposed as `sender`.
pub static MESSAGE: ObjectSchema = ObjectSchema {
    name: "Message",
    fields: &[
        required("message_id", Integer),
        renamed("sender", "from", Object(&USER), false),
        required("date", Integer),
        required("chat", Object(&CHAT)),
        optional("forward_from", Object(&USER)),
        optional("forward_date", Integer),
        optional("reply_to_message", Object(&MESSAGE)),
        optional("edit_date", Integer),
        optional("text", FieldType::String),
        optional("entities", FieldType::List(&MESSAGE_ENTITY_ITEM)),
        optional("caption", FieldType::String),
        optional("photo", FieldType::List(&PHOTO_SIZE_ITEM)),
        optional("sticker", Object(&STICKER)),
        optional("document", Object(&DOCUMENT)),
        optional("location", Object(&LOCATION)),
        optional("contact", Object(&CONTACT)),
        optional("poll", Object(&POLL)),
        optional("reply_markup", Object(&INLINE_KEYBOARD_MARKUP)),
    ],
};

/// Incoming callback query from an inline keyboard button.
pub static CALLBACK_QUERY: ObjectSchema = ObjectSchema {
    name: "CallbackQuery",
    fields: &[
        required("id", FieldType::String),
        renamed("sender", "from", Object(&USER), true),
        optional("message", Object(&MESSAGE)),
        optional("inline_message_id", FieldType::String),
        required("chat_instance", FieldType::String),
        optional("data", FieldType::String),
    ],
};

/// An incoming update.
pub static UPDATE: ObjectSchema = ObjectSchema {
    name: "Update",
    fields: &[
        required("update_id", Integer),
        optional("message", Object(&MESSAGE)),
        optional("edited_message", Object(&MESSAGE)),
        optional("channel_post", Object(&MESSAGE)),
        optional("edited_channel_post", Object(&MESSAGE)),
        optional("callback_query", Object(&CALLBACK_QUERY)),
    ],
};

/// Accepted values of a `reply_markup` parameter, in matching priority.
pub static REPLY_MARKUP: [&ObjectSchema; 4] = [
    &INLINE_KEYBOARD_MARKUP,
    &REPLY_KEYBOARD_MARKUP,
    &REPLY_KEYBOARD_REMOVE,
    &FORCE_REPLY,
];

// List element types
pub static STRING_ITEM: FieldType = FieldType::String;
pub static PHOTO_SIZE_ITEM: FieldType = Object(&PHOTO_SIZE);
pub static MESSAGE_ENTITY_ITEM: FieldType = Object(&MESSAGE_ENTITY);
pub static POLL_OPTION_ITEM: FieldType = Object(&POLL_OPTION);
pub static UPDATE_ITEM: FieldType = Object(&UPDATE);
static KEYBOARD_BUTTON_ITEM: FieldType = Object(&KEYBOARD_BUTTON);
static KEYBOARD_ROW: FieldType = FieldType::List(&KEYBOARD_BUTTON_ITEM);
static INLINE_KEYBOARD_BUTTON_ITEM: FieldType = Object(&INLINE_KEYBOARD_BUTTON);
static INLINE_KEYBOARD_ROW: FieldType = FieldType::List(&INLINE_KEYBOARD_BUTTON_ITEM);

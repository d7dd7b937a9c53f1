use serde_json::json;
use telegrama_wire::methods::{self, SEND_MESSAGE, SEND_POLL};
use telegrama_wire::types::{
    CHAT, FORCE_REPLY, INLINE_KEYBOARD_BUTTON, INLINE_KEYBOARD_MARKUP, LOCATION, MESSAGE,
    PHOTO_SIZE, REPLY_KEYBOARD_MARKUP, UPDATE, USER,
};
use telegrama_wire::{
    Command, Context, ObjectSchema, ResolvedCommand, ValidationError, Value, WireMap, WireObject,
};

fn map(value: serde_json::Value) -> WireMap {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

fn user() -> WireObject {
    WireObject::new(&USER)
        .with("id", 7)
        .and_then(|u| u.with("is_bot", false))
        .and_then(|u| u.with("first_name", "Ada"))
        .unwrap()
}

fn chat() -> WireObject {
    WireObject::new(&CHAT)
        .with("id", -100123_i64)
        .and_then(|c| c.with("kind", "supergroup"))
        .and_then(|c| c.with("title", "Builders"))
        .unwrap()
}

fn photo(width: i64) -> WireObject {
    WireObject::new(&PHOTO_SIZE)
        .with("file_id", format!("file-{}", width))
        .and_then(|p| p.with("file_unique_id", format!("u-{}", width)))
        .and_then(|p| p.with("width", width))
        .and_then(|p| p.with("height", width / 2))
        .unwrap()
}

fn inline_keyboard() -> WireObject {
    let button = WireObject::new(&INLINE_KEYBOARD_BUTTON)
        .with("text", "Open")
        .and_then(|b| b.with("callback_data", "open"))
        .unwrap();
    WireObject::new(&INLINE_KEYBOARD_MARKUP)
        .with("inline_keyboard", vec![vec![button]])
        .unwrap()
}

fn rich_message() -> WireObject {
    let original = WireObject::new(&MESSAGE)
        .with("message_id", 1)
        .and_then(|m| m.with("date", 1_600_000_000_i64))
        .and_then(|m| m.with("chat", chat()))
        .and_then(|m| m.with("text", "first"))
        .unwrap();

    let location = WireObject::new(&LOCATION)
        .with("latitude", 52.52)
        .and_then(|l| l.with("longitude", 13)) // integer widened to float
        .unwrap();

    WireObject::new(&MESSAGE)
        .with("message_id", 2)
        .and_then(|m| m.with("sender", user()))
        .and_then(|m| m.with("date", 1_600_000_100_i64))
        .and_then(|m| m.with("chat", chat()))
        .and_then(|m| m.with("reply_to_message", original))
        .and_then(|m| m.with("caption", "look"))
        .and_then(|m| m.with("photo", vec![photo(90), photo(320)]))
        .and_then(|m| m.with("location", location))
        .and_then(|m| m.with("reply_markup", inline_keyboard()))
        .unwrap()
}

#[test]
fn message_round_trips_through_the_wire() {
    let message = rich_message();
    let wire = message.to_wire().unwrap();
    assert_eq!(WireObject::from_wire(&MESSAGE, &wire).unwrap(), message);
}

#[test]
fn sender_is_sent_under_from() {
    let wire = rich_message().to_wire().unwrap();
    assert_eq!(wire["from"]["first_name"], json!("Ada"));
    assert!(!wire.contains_key("sender"));
    assert_eq!(wire["chat"]["type"], json!("supergroup"));
    assert_eq!(wire["location"]["longitude"], json!(13.0));
}

#[test]
fn wire_keys_follow_declaration_order() {
    let wire = rich_message().to_wire().unwrap();
    let keys: Vec<&str> = wire.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "message_id",
            "from",
            "date",
            "chat",
            "reply_to_message",
            "caption",
            "photo",
            "location",
            "reply_markup",
        ]
    );
}

#[test]
fn absent_optional_fields_are_omitted_not_null() {
    let wire = user().to_wire().unwrap();
    assert_eq!(
        serde_json::Value::Object(wire.clone()),
        json!({"id": 7, "is_bot": false, "first_name": "Ada"})
    );
    let present: Vec<&str> = user().iter().map(|(name, _)| name).collect();
    assert_eq!(present, vec!["id", "is_bot", "first_name"]);
    for key in ["last_name", "username", "language_code"] {
        assert!(!wire.contains_key(key), "{} should be omitted", key);
    }
}

#[test]
fn explicit_null_reads_like_a_missing_key() {
    let base = json!({"id": 7, "is_bot": false, "first_name": "Ada"});
    let mut with_nulls = base.clone();
    with_nulls["username"] = serde_json::Value::Null;
    with_nulls["last_name"] = serde_json::Value::Null;

    let plain = WireObject::from_wire(&USER, &map(base)).unwrap();
    let nulled = WireObject::from_wire(&USER, &map(with_nulls)).unwrap();
    assert_eq!(plain, nulled);
    assert!(nulled.get("username").is_none());
}

#[test]
fn every_missing_required_key_is_rejected() {
    let full = json!({"id": 7, "is_bot": false, "first_name": "Ada", "username": "ada"});
    for schema_field in USER.fields.iter().filter(|f| f.required) {
        let mut partial = map(full.clone());
        partial.remove(schema_field.wire_key);
        assert_eq!(
            WireObject::from_wire(&USER, &partial).unwrap_err(),
            ValidationError::MissingRequiredField {
                object: "User",
                field: schema_field.name,
            }
        );
    }
}

#[test]
fn null_in_a_required_field_is_missing_not_mismatched() {
    let err = WireObject::from_wire(
        &USER,
        &map(json!({"id": null, "is_bot": false, "first_name": "Ada"})),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingRequiredField {
            object: "User",
            field: "id",
        }
    );
}

#[test]
fn serializing_without_a_required_field_fails() {
    let mut incomplete = user();
    incomplete.unset("first_name").unwrap();
    assert_eq!(
        incomplete.to_wire().unwrap_err(),
        ValidationError::MissingRequiredField {
            object: "User",
            field: "first_name",
        }
    );
    assert!(incomplete.validate().is_err());
}

#[test]
fn nested_required_fields_are_checked_on_the_way_out() {
    let chat_without_type = WireObject::new(&CHAT).with("id", 1).unwrap();
    let message = WireObject::new(&MESSAGE)
        .with("message_id", 1)
        .and_then(|m| m.with("date", 0))
        .and_then(|m| m.with("chat", chat_without_type))
        .unwrap();
    assert_eq!(
        message.to_wire().unwrap_err(),
        ValidationError::MissingRequiredField {
            object: "Chat",
            field: "kind",
        }
    );
}

#[test]
fn wrong_types_are_rejected_both_ways() {
    let err = WireObject::new(&USER).with("id", "seven").unwrap_err();
    assert!(matches!(
        err,
        ValidationError::TypeMismatch { object: "User", field: "id", .. }
    ));

    let err = WireObject::from_wire(
        &USER,
        &map(json!({"id": 7, "is_bot": "no", "first_name": "Ada"})),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ValidationError::TypeMismatch { field: "is_bot", found: "string", .. }
    ));
}

#[test]
fn unknown_fields_cannot_be_set() {
    let err = WireObject::new(&USER).with("nickname", "x").unwrap_err();
    assert_eq!(
        err,
        ValidationError::UnknownField {
            object: "User",
            field: "nickname".to_string(),
        }
    );
}

#[test]
fn unknown_wire_keys_are_ignored() {
    let parsed = WireObject::from_wire(
        &USER,
        &map(json!({"id": 7, "is_bot": false, "first_name": "Ada", "is_premium": true})),
    )
    .unwrap();
    assert_eq!(parsed, user());
}

#[test]
fn reply_markup_variant_is_chosen_by_shape() {
    let raw = json!({
        "chat_id": 1,
        "text": "pick",
        "reply_markup": {"force_reply": true, "selective": true}
    });
    let command = ResolvedCommand::from_wire(&SEND_MESSAGE, &map(raw)).unwrap();
    let markup = command.params().get_object("reply_markup").unwrap();
    assert!(markup.schema().is(&FORCE_REPLY));
}

#[test]
fn ambiguous_reply_markup_always_picks_the_first_declared_variant() {
    let raw = map(json!({
        "chat_id": 1,
        "text": "pick",
        "reply_markup": {
            "keyboard": [[{"text": "a"}]],
            "inline_keyboard": [[{"text": "b", "callback_data": "b"}]]
        }
    }));
    let picks: Vec<&'static str> = (0..5)
        .map(|_| {
            ResolvedCommand::from_wire(&SEND_MESSAGE, &raw)
                .unwrap()
                .params()
                .get_object("reply_markup")
                .unwrap()
                .schema()
                .name
        })
        .collect();
    assert!(picks.iter().all(|name| *name == "InlineKeyboardMarkup"));
}

#[test]
fn unmatched_reply_markup_is_reported() {
    let raw = map(json!({"chat_id": 1, "text": "pick", "reply_markup": {"buttons": []}}));
    assert_eq!(
        ResolvedCommand::from_wire(&SEND_MESSAGE, &raw).unwrap_err(),
        ValidationError::NoVariantMatched {
            object: "sendMessage",
            field: "reply_markup",
        }
    );
}

#[test]
fn reply_markup_only_accepts_declared_variants() {
    let err = methods::send_message("hi")
        .unwrap()
        .with("reply_markup", chat())
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::UnknownVariant {
            object: "sendMessage",
            field: "reply_markup",
            found: "Chat",
        }
    );
}

#[test]
fn resolved_commands_round_trip() {
    let keyboard = WireObject::new(&REPLY_KEYBOARD_MARKUP)
        .with(
            "keyboard",
            vec![vec![WireObject::new(&telegrama_wire::types::KEYBOARD_BUTTON)
                .with("text", "Yes")
                .unwrap()]],
        )
        .and_then(|k| k.with("one_time_keyboard", true))
        .unwrap();

    let poll = methods::send_poll("Lunch?", vec!["Pizza", "Soup"])
        .and_then(|c| c.with("kind", "regular"))
        .and_then(|c| c.with("reply_markup", keyboard))
        .unwrap()
        .reply_to(12)
        .apply_context(&Context::new("@team"))
        .unwrap();

    let wire = poll.to_wire().unwrap();
    assert_eq!(wire["chat_id"], json!("@team"));
    assert_eq!(wire["type"], json!("regular"));
    assert_eq!(wire["options"], json!(["Pizza", "Soup"]));
    assert_eq!(wire["reply_to_message_id"], json!(12));
    assert_eq!(ResolvedCommand::from_wire(&SEND_POLL, &wire).unwrap(), poll);

    let location = methods::send_location(48.85, 2.35)
        .unwrap()
        .apply_context(&Context::new(5))
        .unwrap();
    let wire = location.to_wire().unwrap();
    assert!(!wire.contains_key("reply_to_message_id"));
    assert_eq!(
        ResolvedCommand::from_wire(location.schema(), &wire).unwrap(),
        location
    );
}

#[test]
fn command_lookup_by_method_name() {
    assert!(methods::by_name("sendPoll").unwrap().is(&SEND_POLL));
    assert!(methods::by_name("sendCarrierPigeon").is_none());
    for schema in methods::ALL.iter() {
        assert!(methods::by_name(schema.method).unwrap().is(schema));
    }
}

#[test]
fn updates_decode_into_typed_values() {
    let raw = map(json!({
        "update_id": 900,
        "message": {
            "message_id": 3,
            "from": {"id": 7, "is_bot": false, "first_name": "Ada"},
            "date": 1,
            "chat": {"id": 7, "type": "private", "first_name": "Ada"},
            "text": "/start",
            "entities": [{"type": "bot_command", "offset": 0, "length": 6}]
        }
    }));
    let update = WireObject::from_wire(&UPDATE, &raw).unwrap();
    let message = update.get_object("message").unwrap();
    assert_eq!(message.get_str("text"), Some("/start"));
    assert_eq!(
        message.get_object("sender").and_then(|u| u.get_str("first_name")),
        Some("Ada")
    );
    let entities = message.get_list("entities").unwrap();
    assert_eq!(
        entities[0].as_object().and_then(|e| e.get_str("kind")),
        Some("bot_command")
    );
    assert_eq!(
        serde_json::to_value(&update).unwrap(),
        serde_json::Value::Object(raw)
    );
}

#[test]
fn every_table_entry_has_unique_field_names_and_keys() {
    let objects: [&ObjectSchema; 6] = [&USER, &CHAT, &MESSAGE, &UPDATE, &PHOTO_SIZE, &LOCATION];
    let params = methods::ALL.iter().map(|schema| schema.params);
    for schema in objects.iter().copied().chain(params) {
        for (i, field) in schema.fields.iter().enumerate() {
            for other in &schema.fields[i + 1..] {
                assert_ne!(field.name, other.name, "{}", schema.name);
                assert_ne!(field.wire_key, other.wire_key, "{}", schema.name);
            }
        }
    }
}

#[test]
fn building_a_command_keeps_values_typed() {
    let command: Command = methods::send_message("hello").unwrap();
    assert_eq!(
        command.params().get("text"),
        Some(&Value::Str("hello".to_string()))
    );
}

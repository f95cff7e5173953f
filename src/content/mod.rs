// Content entity registry: every CRUD surface is the same generic handler
// parameterized by one of these definitions, so per-entity variation lives
// here as data plus a sanitize strategy instead of ten copied endpoints.
pub mod defaults;
pub mod sanitize;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::ApiError;
use sanitize::{bool_or, int_clamped, is_valid_email, optional_string, required_string, string_list};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// JSON array of items, each carrying a unique `id`.
    Collection,
    /// Single JSON object; reads merge seed defaults under stored fields.
    Singleton,
}

pub struct EntityDef {
    pub name: &'static str,
    /// Human label used in success messages.
    pub label: &'static str,
    /// Storage key in the key-value store.
    pub key: &'static str,
    pub shape: Shape,
    /// Whether the unauthenticated site may read this entity.
    pub public: bool,
    pub default: fn() -> Value,
    /// Validate and sanitize a full replacement payload.
    pub sanitize: fn(Value) -> Result<Value, ApiError>,
}

pub static ENTITIES: &[EntityDef] = &[
    EntityDef {
        name: "profile",
        label: "Profile",
        key: "profile_data",
        shape: Shape::Singleton,
        public: true,
        default: defaults::profile,
        sanitize: sanitize_profile,
    },
    EntityDef {
        name: "skills",
        label: "Skills",
        key: "skills_data",
        shape: Shape::Collection,
        public: true,
        default: defaults::skills,
        sanitize: sanitize_skills,
    },
    EntityDef {
        name: "experience",
        label: "Experience",
        key: "experience_data",
        shape: Shape::Collection,
        public: true,
        default: defaults::experience,
        sanitize: sanitize_experience,
    },
    EntityDef {
        name: "partners",
        label: "Partners",
        key: "partners_data",
        shape: Shape::Collection,
        public: true,
        default: defaults::partners,
        sanitize: sanitize_partners,
    },
    EntityDef {
        name: "products",
        label: "Products",
        key: "products_data",
        shape: Shape::Collection,
        public: true,
        default: defaults::products,
        sanitize: sanitize_products,
    },
    EntityDef {
        name: "achievements",
        label: "Achievements",
        key: "achievements_data",
        shape: Shape::Collection,
        public: true,
        default: defaults::achievements,
        sanitize: sanitize_achievements,
    },
    EntityDef {
        name: "settings",
        label: "Settings",
        key: "settings_data",
        shape: Shape::Singleton,
        public: true,
        default: defaults::settings,
        sanitize: sanitize_settings,
    },
    EntityDef {
        name: "contact",
        label: "Contact",
        key: "contact_data",
        shape: Shape::Singleton,
        public: true,
        default: defaults::contact,
        sanitize: sanitize_contact,
    },
    EntityDef {
        name: "messages",
        label: "Messages",
        key: "messages_data",
        shape: Shape::Collection,
        public: false,
        default: defaults::messages,
        sanitize: sanitize_messages,
    },
];

pub fn lookup(name: &str) -> Option<&'static EntityDef> {
    ENTITIES.iter().find(|def| def.name == name)
}

/// Fill in any default fields the stored singleton lacks, stored values
/// winning, so new optional fields degrade gracefully across schema changes.
pub fn merge_defaults(default: Value, stored: Value) -> Value {
    match (default, stored) {
        (Value::Object(default_map), Value::Object(mut stored_map)) => {
            for (key, value) in default_map {
                stored_map.entry(key).or_insert(value);
            }
            Value::Object(stored_map)
        }
        (_, stored) => stored,
    }
}

// --- collection plumbing ---

type ItemSanitizer = fn(&Map<String, Value>) -> Result<Map<String, Value>, ApiError>;

/// Shared shape handling for collection entities: require an array of
/// objects, sanitize each item, preserve a supplied string/number id and
/// generate a UUID for items without one.
fn sanitize_collection(
    value: Value,
    entity: &str,
    item_sanitizer: ItemSanitizer,
) -> Result<Value, ApiError> {
    let items = value
        .as_array()
        .ok_or_else(|| ApiError::bad_request(format!("Expected an array of {}", entity)))?;

    let mut out = Vec::with_capacity(items.len());
    for raw in items {
        let obj = raw
            .as_object()
            .ok_or_else(|| ApiError::bad_request(format!("Each {} item must be an object", entity)))?;

        let mut item = item_sanitizer(obj)?;
        item.insert("id".to_string(), item_id(obj));
        out.push(Value::Object(item));
    }
    Ok(Value::Array(out))
}

/// Uniqueness of supplied ids is the caller's responsibility; we only
/// guarantee generated ones are fresh.
fn item_id(obj: &Map<String, Value>) -> Value {
    match obj.get("id") {
        Some(Value::String(s)) if !s.trim().is_empty() => Value::String(s.trim().to_string()),
        Some(Value::Number(n)) => Value::Number(n.clone()),
        _ => Value::String(Uuid::new_v4().to_string()),
    }
}

fn insert_opt(map: &mut Map<String, Value>, field: &str, value: Option<String>) {
    if let Some(v) = value {
        map.insert(field.to_string(), Value::String(v));
    }
}

// --- per-entity strategies ---

fn sanitize_skills(value: Value) -> Result<Value, ApiError> {
    sanitize_collection(value, "skills", |obj| {
        let mut item = Map::new();
        item.insert("name".into(), required_string(obj, "name", 120)?.into());
        item.insert("level".into(), int_clamped(obj, "level", 0, 100, 0).into());
        insert_opt(&mut item, "category", optional_string(obj, "category", 60));
        Ok(item)
    })
}

fn sanitize_experience(value: Value) -> Result<Value, ApiError> {
    sanitize_collection(value, "experience", |obj| {
        let mut item = Map::new();
        item.insert("company".into(), required_string(obj, "company", 160)?.into());
        insert_opt(&mut item, "role", optional_string(obj, "role", 160));
        insert_opt(&mut item, "start", optional_string(obj, "start", 40));
        insert_opt(&mut item, "end", optional_string(obj, "end", 40));
        insert_opt(&mut item, "summary", optional_string(obj, "summary", 2000));
        if let Some(highlights) = string_list(obj, "highlights", 20, 300) {
            item.insert(
                "highlights".into(),
                Value::Array(highlights.into_iter().map(Value::String).collect()),
            );
        }
        Ok(item)
    })
}

fn sanitize_partners(value: Value) -> Result<Value, ApiError> {
    sanitize_collection(value, "partners", |obj| {
        let mut item = Map::new();
        item.insert("name".into(), required_string(obj, "name", 160)?.into());
        insert_opt(&mut item, "url", optional_string(obj, "url", 300));
        insert_opt(&mut item, "logo_url", optional_string(obj, "logo_url", 300));
        insert_opt(&mut item, "blurb", optional_string(obj, "blurb", 500));
        Ok(item)
    })
}

fn sanitize_products(value: Value) -> Result<Value, ApiError> {
    sanitize_collection(value, "products", |obj| {
        let mut item = Map::new();
        item.insert("name".into(), required_string(obj, "name", 160)?.into());
        insert_opt(&mut item, "description", optional_string(obj, "description", 2000));
        insert_opt(&mut item, "url", optional_string(obj, "url", 300));
        insert_opt(&mut item, "image_url", optional_string(obj, "image_url", 300));
        if let Some(tags) = string_list(obj, "tags", 20, 60) {
            item.insert(
                "tags".into(),
                Value::Array(tags.into_iter().map(Value::String).collect()),
            );
        }
        item.insert("featured".into(), bool_or(obj, "featured", false).into());
        Ok(item)
    })
}

fn sanitize_achievements(value: Value) -> Result<Value, ApiError> {
    sanitize_collection(value, "achievements", |obj| {
        let mut item = Map::new();
        item.insert("title".into(), required_string(obj, "title", 200)?.into());
        if obj.get("year").and_then(Value::as_i64).is_some() {
            item.insert("year".into(), int_clamped(obj, "year", 1900, 2100, 0).into());
        }
        insert_opt(&mut item, "description", optional_string(obj, "description", 1000));
        Ok(item)
    })
}

/// Message item shape shared by the public submission endpoint and whole-
/// collection admin writes.
pub fn sanitize_message_item(obj: &Map<String, Value>) -> Result<Map<String, Value>, ApiError> {
    let email = required_string(obj, "email", 200)?;
    if !is_valid_email(&email) {
        return Err(ApiError::bad_request("Invalid email format"));
    }

    let mut item = Map::new();
    item.insert("name".into(), required_string(obj, "name", 120)?.into());
    item.insert("email".into(), email.into());
    insert_opt(&mut item, "subject", optional_string(obj, "subject", 200));
    item.insert("message".into(), required_string(obj, "message", 5000)?.into());
    item.insert("read".into(), bool_or(obj, "read", false).into());
    if let Some(created_at) = optional_string(obj, "created_at", 64) {
        item.insert("created_at".into(), created_at.into());
    }
    Ok(item)
}

fn sanitize_messages(value: Value) -> Result<Value, ApiError> {
    sanitize_collection(value, "messages", sanitize_message_item)
}

fn sanitize_profile(value: Value) -> Result<Value, ApiError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ApiError::bad_request("Expected a profile object"))?;

    let mut out = Map::new();
    out.insert("name".into(), required_string(obj, "name", 120)?.into());
    insert_opt(&mut out, "title", optional_string(obj, "title", 160));
    insert_opt(&mut out, "bio", optional_string(obj, "bio", 2000));
    insert_opt(&mut out, "location", optional_string(obj, "location", 120));
    if let Some(email) = optional_string(obj, "email", 200) {
        if !is_valid_email(&email) {
            return Err(ApiError::bad_request("Invalid email format"));
        }
        out.insert("email".into(), email.into());
    }
    insert_opt(&mut out, "avatar_url", optional_string(obj, "avatar_url", 300));
    insert_opt(&mut out, "github_url", optional_string(obj, "github_url", 300));
    insert_opt(&mut out, "linkedin_url", optional_string(obj, "linkedin_url", 300));
    insert_opt(&mut out, "website_url", optional_string(obj, "website_url", 300));
    Ok(Value::Object(out))
}

fn sanitize_settings(value: Value) -> Result<Value, ApiError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ApiError::bad_request("Expected a settings object"))?;

    let mut out = Map::new();
    out.insert("site_title".into(), required_string(obj, "site_title", 160)?.into());
    insert_opt(&mut out, "tagline", optional_string(obj, "tagline", 300));

    let theme = match optional_string(obj, "theme", 20).as_deref() {
        Some("light") => "light",
        Some("dark") => "dark",
        _ => "system",
    };
    out.insert("theme".into(), theme.into());
    out.insert("show_partners".into(), bool_or(obj, "show_partners", true).into());
    out.insert("show_products".into(), bool_or(obj, "show_products", true).into());
    insert_opt(&mut out, "analytics_id", optional_string(obj, "analytics_id", 60));
    Ok(Value::Object(out))
}

fn sanitize_contact(value: Value) -> Result<Value, ApiError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ApiError::bad_request("Expected a contact object"))?;

    let email = required_string(obj, "email", 200)?;
    if !is_valid_email(&email) {
        return Err(ApiError::bad_request("Invalid email format"));
    }

    let mut out = Map::new();
    out.insert("email".into(), email.into());
    insert_opt(&mut out, "phone", optional_string(obj, "phone", 40));
    insert_opt(&mut out, "address", optional_string(obj, "address", 300));
    Ok(Value::Object(out))
}

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_CATEGORY: &str = "monuments";
pub const DEFAULT_CARD_IMAGE: &str = "resources/hero-sculpture.jpg";
pub const DEFAULT_CARD_YEAR: &str = "2000";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

// Hand-edited content files carry numbers and nulls in text fields.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string, found {}",
            other
        ))),
    }
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose_string(deserializer)?.unwrap_or_default())
}

fn category_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose_string(deserializer)?.unwrap_or_else(default_category))
}

/// One portfolio item as stored in `projects.json`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "default_category", deserialize_with = "category_or_default")]
    pub category: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub year: String,
}

impl Project {
    /// Richer markdown text when present, the plain description otherwise.
    pub fn body_text(&self) -> &str {
        match self.markdown.as_deref() {
            Some(markdown) if !markdown.is_empty() => markdown,
            _ => &self.description,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct About {
    pub title: String,
    pub markdown: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TimelineEntry {
    pub year: String,
    pub event: String,
}

/// Display-ready summary of a project for the gallery grid.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProjectCard {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub year: String,
    pub category: String,
    pub category_label: String,
    pub image: String,
    pub preview: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LightboxEntry {
    pub src: String,
    pub title: String,
    pub description: String,
}

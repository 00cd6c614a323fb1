use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::types::{About, TimelineEntry};

static LINE_ENDINGS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n?").expect("valid line ending regex"));
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(#+)([^ #])").expect("valid heading regex"));
static RULE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"---+").expect("valid rule regex"));

const TIMELINE: &[(&str, &str)] = &[
    ("1946", "Рождение в Москве"),
    ("1960-е", "Обучение в изостудии Дворца культуры ЗИЛ"),
    (
        "1970-е",
        "Работа во Всесоюзном производственном художественном комбинате",
    ),
    ("2004", "Открытие памятника барону Мюнхгаузену"),
    ("2007", "Памятник Шерлоку Холмсу и доктору Ватсону"),
    ("2010-е", "Создание серии памятников в разных городах России"),
];

/// About record as served to the page, ready for a markdown renderer.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct AboutView {
    pub title: String,
    pub markdown: String,
    pub timeline: Vec<TimelineEntry>,
}

impl AboutView {
    pub fn from_about(about: &About) -> Self {
        AboutView {
            title: about.title.clone(),
            markdown: normalize_markdown(&about.markdown),
            timeline: timeline(),
        }
    }
}

/// Unix line endings, a space after heading hashes, rules on their own line.
pub fn normalize_markdown(markdown: &str) -> String {
    let text = LINE_ENDINGS_RE.replace_all(markdown, "\n");
    let text = HEADING_RE.replace_all(&text, "$1 $2");
    let text = RULE_RE.replace_all(&text, "\n---\n");
    text.into_owned()
}

pub fn timeline() -> Vec<TimelineEntry> {
    TIMELINE
        .iter()
        .map(|(year, event)| TimelineEntry {
            year: year.to_string(),
            event: event.to_string(),
        })
        .collect()
}

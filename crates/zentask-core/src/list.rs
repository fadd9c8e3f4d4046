use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ListId = Uuid;

pub const DEFAULT_LIST_COLOR: &str = "#3b82f6";
pub const DEFAULT_LIST_ICON: &str = "list";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct List {
    pub id: ListId,
    pub title: String,
    pub color: String,
    pub icon: String,
}

impl List {
    /// Builds a list with a fresh id. Returns `None` for a blank title.
    pub fn new(title: &str, color: impl Into<String>, icon: impl Into<String>) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            color: color.into(),
            icon: icon.into(),
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

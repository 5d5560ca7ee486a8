use serde::{Deserialize, Serialize};

use crate::presentation::{escape_html, format_date, truncate};

/// Maximum title length in list views
const LIST_TITLE_LENGTH: usize = 40;

/// Shown in place of a timestamp the server did not send
const MISSING_DATE: &str = "-";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: String,
    pub title: String,
    pub content: String,
    /// ISO-8601 timestamps; the SQL backend sends neither
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "super::optional_string_or_number")]
    pub owner_id: Option<String>,
}

impl Note {
    /// Title shortened for list display
    pub fn short_title(&self) -> String {
        truncate(&self.title, LIST_TITLE_LENGTH)
    }

    pub fn created_display(&self) -> String {
        Self::date_display(self.created_at.as_deref())
    }

    pub fn updated_display(&self) -> String {
        Self::date_display(self.updated_at.as_deref())
    }

    fn date_display(timestamp: Option<&str>) -> String {
        timestamp.map_or_else(|| MISSING_DATE.to_string(), format_date)
    }

    /// Render the note as an HTML fragment with user text escaped
    pub fn to_html(&self) -> String {
        format!(
            "<article class=\"note\" data-id=\"{}\">\n  <h2>{}</h2>\n  <p>{}</p>\n  <time>{}</time>\n</article>",
            escape_html(&self.id),
            escape_html(&self.title),
            escape_html(&self.content),
            escape_html(&self.updated_display()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

/// Partial update; unset fields are left unchanged by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NoteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl NoteUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

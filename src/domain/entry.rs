//! Journal entry

use crate::domain::timestamp;
use crate::domain::{Photo, Place, Weather};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One journal record
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: Uuid,
    pub title: Option<String>,
    body: Option<String>,
    pub tags: Vec<String>,
    pub place: Option<Place>,
    pub weather: Option<Weather>,
    pub photos: Vec<Photo>,
    pub timestamp: DateTime<Utc>,
    pub timezone: Option<String>,
}

impl Entry {
    /// Create an empty entry with a fresh identifier, stamped now
    pub fn new() -> Self {
        Entry {
            id: Uuid::new_v4(),
            title: None,
            body: None,
            tags: Vec::new(),
            place: None,
            weather: None,
            photos: Vec::new(),
            timestamp: timestamp::now(),
            timezone: None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Accumulate text on a fresh line; existing body is never replaced
    pub fn append(&mut self, text: &str) {
        match &mut self.body {
            Some(body) => {
                body.push('\n');
                body.push_str(text);
            }
            None => self.body = Some(text.to_string()),
        }
    }

    /// `# title` line (when set) followed by the body
    pub fn markdown(&self) -> String {
        let mut text = String::new();

        if let Some(title) = &self.title {
            text.push_str(&format!("# {}\n", title));
        }

        if let Some(body) = &self.body {
            text.push_str(body);
        }

        text
    }

    /// Inverse of [`Entry::markdown`], used when reading documents back
    pub(crate) fn set_text(&mut self, text: &str) {
        let (title, body) = match text.strip_prefix("# ") {
            Some(rest) => {
                let (title, body) = rest.split_once('\n').unwrap_or((rest, ""));
                (Some(title.to_string()), body)
            }
            None => (None, text),
        };
        self.title = title;
        self.body = (!body.is_empty()).then(|| body.to_string());
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_accumulates_lines() {
        let mut entry = Entry::new();
        assert_eq!(entry.body(), None);

        entry.append("first");
        entry.append("second");
        entry.append("");
        assert_eq!(entry.body(), Some("first\nsecond\n"));
    }

    #[test]
    fn test_markdown_with_title() {
        let mut entry = Entry::new();
        entry.title = Some("Trip".to_string());
        entry.append("We left early.");
        assert_eq!(entry.markdown(), "# Trip\nWe left early.");
    }

    #[test]
    fn test_markdown_without_body() {
        let mut entry = Entry::new();
        assert_eq!(entry.markdown(), "");

        entry.title = Some("Only a title".to_string());
        assert_eq!(entry.markdown(), "# Only a title\n");
    }

    #[test]
    fn test_set_text_recovers_title_and_body() {
        let mut source = Entry::new();
        source.title = Some("Trip".to_string());
        source.append("line one");
        source.append("line two");

        let mut restored = Entry::new();
        restored.set_text(&source.markdown());
        assert_eq!(restored.title, source.title);
        assert_eq!(restored.body(), source.body());
    }

    #[test]
    fn test_set_text_without_title() {
        let mut entry = Entry::new();
        entry.set_text("just words");
        assert_eq!(entry.title, None);
        assert_eq!(entry.body(), Some("just words"));

        entry.set_text("");
        assert_eq!(entry.body(), None);
    }

    #[test]
    fn test_set_text_single_field_limits() {
        let mut source = Entry::new();
        source.append("# not a title\nrest");

        let mut restored = Entry::new();
        restored.set_text(&source.markdown());
        assert_eq!(restored.title.as_deref(), Some("not a title"));
        assert_eq!(restored.body(), Some("rest"));

        let mut empty = Entry::new();
        empty.append("");
        assert_eq!(empty.body(), Some(""));
        restored.set_text(&empty.markdown());
        assert_eq!(restored.title, None);
        assert_eq!(restored.body(), None);
    }

    #[test]
    fn test_new_entries_have_distinct_ids() {
        assert_ne!(Entry::new().id, Entry::new().id);
    }
}

//! Frontend Models
//!
//! Data structures exchanged with the catalog server.

use serde::{Deserialize, Deserializer, Serialize};

/// One option of a remote select (`{"id": .., "text": ..}`).
///
/// The server sends ids both as numbers and as strings; they are kept as
/// strings and sent back the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    pub text: String,
    /// Created locally from typed text, not yet known to the server
    #[serde(default, rename = "newTag", skip_serializing)]
    pub new_tag: bool,
}

impl SelectOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            new_tag: false,
        }
    }
}

fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Num(i64),
        Text(String),
    }
    Ok(match Id::deserialize(deserializer)? {
        Id::Num(n) => n.to_string(),
        Id::Text(s) => s,
    })
}

/// Search endpoint reply: `{"results": [...]}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub results: Vec<SelectOption>,
}

/// Reply of save and form endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Feedback {
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub category: String,
}

/// Bootstrap colour of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastCategory {
    Success,
    Danger,
    Warning,
    Info,
}

impl ToastCategory {
    /// Unknown categories fall back to `Info`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "danger" | "error" => Self::Danger,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    pub fn css_class(self) -> String {
        format!("toast bg-{} text-white", self.as_str())
    }
}

/// A toast shown in the corner of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub message: String,
    pub category: ToastCategory,
}

/// Publication series row from `/list_pubseries/<publisher>/`: `[id, name]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PubseriesRow(pub String, pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_option_accepts_numeric_and_string_ids() {
        let parsed: Vec<SelectOption> =
            serde_json::from_str(r#"[{"id": 12, "text": "Tolkien"}, {"id": "7", "text": "Asimov"}]"#)
                .unwrap();
        assert_eq!(parsed[0], SelectOption::new("12", "Tolkien"));
        assert_eq!(parsed[1], SelectOption::new("7", "Asimov"));
    }

    #[test]
    fn test_new_tag_is_not_serialized() {
        let opt = SelectOption {
            id: "0".into(),
            text: "scifi".into(),
            new_tag: true,
        };
        assert_eq!(
            serde_json::to_string(&opt).unwrap(),
            r#"{"id":"0","text":"scifi"}"#
        );
    }

    #[test]
    fn test_feedback_defaults() {
        let fb: Feedback = serde_json::from_str("{}").unwrap();
        assert_eq!(fb, Feedback::default());
        let fb: Feedback =
            serde_json::from_str(r#"{"feedback": "Tallennus onnistui", "category": "success"}"#).unwrap();
        assert_eq!(fb.feedback, "Tallennus onnistui");
    }

    #[test]
    fn test_toast_category() {
        assert_eq!(ToastCategory::parse("Danger"), ToastCategory::Danger);
        assert_eq!(ToastCategory::parse("whatever"), ToastCategory::Info);
        assert_eq!(ToastCategory::Success.css_class(), "toast bg-success text-white");
    }

    #[test]
    fn test_pubseries_rows() {
        let rows: Vec<PubseriesRow> = serde_json::from_str(r#"[["3", "Aikamme romaaneja"]]"#).unwrap();
        assert_eq!(rows, vec![PubseriesRow("3".into(), "Aikamme romaaneja".into())]);
    }
}

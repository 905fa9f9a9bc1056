//! Display locale for catalog text.

use serde::{Deserialize, Serialize};

/// Language a public response is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Bn,
}

impl Locale {
    /// Parse a `lang` query value. Unknown values fall back to English.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "bn" | "bn-bd" | "bangla" | "bengali" => Self::Bn,
            _ => Self::En,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Bn => "bn",
        }
    }

    /// Choose between the English text and its optional Bangla variant.
    pub fn pick<'a>(&self, en: &'a str, bn: Option<&'a str>) -> &'a str {
        match (self, bn) {
            (Self::Bn, Some(text)) if !text.trim().is_empty() => text,
            _ => en,
        }
    }

    /// Owned variant of [`Locale::pick`].
    pub fn pick_owned(&self, en: &str, bn: Option<&str>) -> String {
        self.pick(en, bn).to_string()
    }
}

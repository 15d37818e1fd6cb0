//! Bilingual text: a language key and a fixed two-slot record.

use serde::{Deserialize, Serialize};

/// Display language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Zh,
    En,
}

impl Lang {
    pub fn all() -> &'static [Lang] {
        &[Lang::Zh, Lang::En]
    }

    /// Label for the language switch button, always in its own language.
    pub fn native_label(self) -> &'static str {
        match self {
            Lang::Zh => "中文",
            Lang::En => "English",
        }
    }

    /// Pick one of two static strings.
    #[inline]
    pub fn pick(self, zh: &'static str, en: &'static str) -> &'static str {
        match self {
            Lang::Zh => zh,
            Lang::En => en,
        }
    }
}

/// A text field carried in both supported languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub zh: String,
    pub en: String,
}

impl Localized {
    pub fn new(zh: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            zh: zh.into(),
            en: en.into(),
        }
    }

    #[inline]
    pub fn get(&self, lang: Lang) -> &str {
        match lang {
            Lang::Zh => &self.zh,
            Lang::En => &self.en,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.zh.is_empty() && self.en.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_selects_slot_by_language() {
        let t = Localized::new("肺", "Lung");
        assert_eq!(t.get(Lang::Zh), "肺");
        assert_eq!(t.get(Lang::En), "Lung");
    }

    #[test]
    fn lang_deserializes_lowercase() {
        let l: Lang = serde_yaml::from_str("en").unwrap();
        assert_eq!(l, Lang::En);
        assert_eq!(Lang::default(), Lang::Zh);
    }
}

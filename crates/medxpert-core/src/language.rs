#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
}

impl Language {
    /// Identifier sent as `lang` on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Tamil => "ta",
            Language::Telugu => "te",
            Language::Kannada => "kn",
            Language::Malayalam => "ml",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" => Some(Language::English),
            "hi" => Some(Language::Hindi),
            "ta" => Some(Language::Tamil),
            "te" => Some(Language::Telugu),
            "kn" => Some(Language::Kannada),
            "ml" => Some(Language::Malayalam),
            _ => None,
        }
    }

    pub fn all() -> Vec<Language> {
        vec![
            Language::English,
            Language::Hindi,
            Language::Tamil,
            Language::Telugu,
            Language::Kannada,
            Language::Malayalam,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "हिन्दी (Hindi)",
            Language::Tamil => "தமிழ் (Tamil)",
            Language::Telugu => "తెలుగు (Telugu)",
            Language::Kannada => "ಕನ್ನಡ (Kannada)",
            Language::Malayalam => "മലയാളം (Malayalam)",
        }
    }

    /// The language after this one, wrapping around
    pub fn next(&self) -> Language {
        let all = Language::all();
        let i = all.iter().position(|l| l == self).unwrap_or(0);
        all[(i + 1) % all.len()]
    }
}

use serde::{Deserialize, Serialize};

/// A preset prompt. Activating it fills the prompt input with `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chip {
    pub label: String,
    pub text: String,
}

impl Chip {
    pub fn new(label: &str, text: &str) -> Self {
        Self {
            label: label.to_string(),
            text: text.to_string(),
        }
    }
}

/// Built-in chips, covering the topics the server answers offline
pub fn default_chips() -> Vec<Chip> {
    vec![
        Chip::new("Dengue", "What is dengue?"),
        Chip::new("Malaria", "Symptoms of malaria"),
        Chip::new("Typhoid", "How to prevent typhoid?"),
        Chip::new("Vaccines", "Vaccination schedule for infant"),
        Chip::new("Hygiene", "Tips for hygiene"),
        Chip::new("COVID-19", "What is covid?"),
    ]
}

use serde::{Deserialize, Serialize};

/// User preferences persisted in the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub ai_enabled: bool,
    #[serde(default)]
    pub ai_provider: AssistantProvider,
    #[serde(default)]
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            ai_enabled: false,
            ai_provider: AssistantProvider::default(),
            language: Language::default(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistantProvider {
    #[default]
    Claude,
    Gemini,
    Codex,
}

impl AssistantProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            AssistantProvider::Claude => "claude",
            AssistantProvider::Gemini => "gemini",
            AssistantProvider::Codex => "codex",
        }
    }

    /// Default executable name looked up on PATH.
    pub fn binary(self) -> &'static str {
        self.as_str()
    }

    /// Arguments for a one-shot, non-interactive run.
    pub fn args(self, prompt: &str) -> Vec<String> {
        match self {
            AssistantProvider::Claude | AssistantProvider::Gemini => {
                vec!["-p".to_string(), prompt.to_string()]
            }
            AssistantProvider::Codex => vec!["exec".to_string(), prompt.to_string()],
        }
    }

    /// Environment variable the CLI reads its API key from.
    pub fn api_key_env(self) -> &'static str {
        match self {
            AssistantProvider::Claude => "ANTHROPIC_API_KEY",
            AssistantProvider::Gemini => "GEMINI_API_KEY",
            AssistantProvider::Codex => "OPENAI_API_KEY",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Pl,
    De,
    Es,
    Fr,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pl => "pl",
            Language::De => "de",
            Language::Es => "es",
            Language::Fr => "fr",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Pl => "Polish",
            Language::De => "German",
            Language::Es => "Spanish",
            Language::Fr => "French",
        }
    }
}

/// PUT /api/settings. An empty `apiKey` clears the stored key.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub ai_enabled: Option<bool>,
    pub ai_provider: Option<AssistantProvider>,
    pub language: Option<Language>,
    pub api_key: Option<String>,
}

impl UpdateSettingsRequest {
    pub fn apply_to(self, settings: &mut AppSettings) {
        if let Some(enabled) = self.ai_enabled {
            settings.ai_enabled = enabled;
        }
        if let Some(provider) = self.ai_provider {
            settings.ai_provider = provider;
        }
        if let Some(language) = self.language {
            settings.language = language;
        }
        if let Some(key) = self.api_key {
            let key = key.trim().to_string();
            settings.api_key = if key.is_empty() { None } else { Some(key) };
        }
    }
}

/// Settings as returned to the UI; the key itself never leaves the service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub ai_enabled: bool,
    pub ai_provider: AssistantProvider,
    pub language: Language,
    pub has_api_key: bool,
}

impl From<&AppSettings> for SettingsResponse {
    fn from(settings: &AppSettings) -> Self {
        Self {
            ai_enabled: settings.ai_enabled,
            ai_provider: settings.ai_provider,
            language: settings.language,
            has_api_key: settings.api_key.is_some(),
        }
    }
}

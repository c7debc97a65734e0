//! Wire types shared by the auth and inference endpoints

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Task flavor sent with every inference request
///
/// Selects the system prompt on the backend: step-by-step solving, essay
/// writing, or test generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    #[default]
    Solve,
    Essay,
    Test,
}

impl TaskType {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskType::Solve => "solve",
            TaskType::Essay => "essay",
            TaskType::Test => "test",
        }
    }
}

/// School subject attached to solve/test requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    #[default]
    Math,
    Russian,
    Physics,
    Chemistry,
    Biology,
    History,
}

impl Subject {
    pub const ALL: [Subject; 6] = [
        Subject::Math,
        Subject::Russian,
        Subject::Physics,
        Subject::Chemistry,
        Subject::Biology,
        Subject::History,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::Russian => "russian",
            Subject::Physics => "physics",
            Subject::Chemistry => "chemistry",
            Subject::Biology => "biology",
            Subject::History => "history",
        }
    }

    /// Display name for the UI
    pub fn label(self) -> &'static str {
        match self {
            Subject::Math => "Математика",
            Subject::Russian => "Русский язык",
            Subject::Physics => "Физика",
            Subject::Chemistry => "Химия",
            Subject::Biology => "Биология",
            Subject::History => "История",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Request body for the inference endpoint
#[derive(Debug, Clone, Serialize)]
pub struct AssistRequest<'a> {
    pub message: &'a str,
    #[serde(rename = "taskType")]
    pub task_type: TaskType,
    pub subject: Subject,
}

/// Success body of the inference endpoint
///
/// `response` is nominally required, but the field is modeled as optional so
/// a 200 with a missing field becomes a typed failure instead of a decode
/// panic.
#[derive(Debug, Deserialize)]
pub struct AssistResponse {
    #[serde(default)]
    pub response: Option<String>,
}

/// Sign-in provider offered by the auth modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthProvider {
    Google,
    Yandex,
}

impl AuthProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthProvider::Google => "google",
            AuthProvider::Yandex => "yandex",
        }
    }

    /// Display name for the UI
    pub fn label(self) -> &'static str {
        match self {
            AuthProvider::Google => "Войти через Google",
            AuthProvider::Yandex => "Войти через Яндекс",
        }
    }

    /// Fabricate the demo user payload sent to the auth endpoint
    ///
    /// There is no real OAuth dance: the id is provider-prefixed with the
    /// current timestamp and the email/name are fixed demo values.
    pub fn mock_user(self) -> UserData {
        let ts = chrono::Utc::now().timestamp_millis();
        match self {
            AuthProvider::Google => UserData {
                id: format!("google_{}", ts),
                email: "student@example.com".to_string(),
                name: "Школьник".to_string(),
                provider: "google".to_string(),
            },
            AuthProvider::Yandex => UserData {
                id: format!("yandex_{}", ts),
                email: "student@yandex.ru".to_string(),
                name: "Ученик".to_string(),
                provider: "yandex".to_string(),
            },
        }
    }
}

impl std::str::FromStr for AuthProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(AuthProvider::Google),
            "yandex" => Ok(AuthProvider::Yandex),
            other => bail!("unknown provider '{}' (expected google or yandex)", other),
        }
    }
}

/// The authenticated-user record
///
/// Received from the auth endpoint and persisted to the session store.
/// Validated at the storage boundary: a stored record that fails
/// [`UserData::is_valid`] is rejected rather than trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub name: String,
    pub provider: String,
}

impl UserData {
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && !self.provider.is_empty()
    }

    /// Two-letter avatar initials for the profile panel
    pub fn initials(&self) -> String {
        self.name.chars().take(2).collect::<String>().to_uppercase()
    }
}

/// Request body for the auth endpoint
#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    pub provider: &'a str,
    #[serde(rename = "userData")]
    pub user_data: &'a UserData,
}

/// Success body of the auth endpoint; also the on-disk session shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: UserData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assist_request_uses_camel_case_task_type() {
        let request = AssistRequest {
            message: "2+2?",
            task_type: TaskType::Solve,
            subject: Subject::Math,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["taskType"], "solve");
        assert_eq!(json["subject"], "math");
        assert_eq!(json["message"], "2+2?");
    }

    #[test]
    fn auth_request_nests_user_data() {
        let user = AuthProvider::Google.mock_user();
        let request = AuthRequest {
            provider: "google",
            user_data: &user,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["provider"], "google");
        assert_eq!(json["userData"]["email"], "student@example.com");
        assert!(json["userData"]["id"]
            .as_str()
            .unwrap()
            .starts_with("google_"));
    }

    #[test]
    fn mock_users_are_provider_prefixed() {
        let yandex = AuthProvider::Yandex.mock_user();
        assert!(yandex.id.starts_with("yandex_"));
        assert_eq!(yandex.name, "Ученик");
        assert!(yandex.is_valid());
    }

    #[test]
    fn provider_parses_case_insensitive() {
        assert_eq!(
            "Google".parse::<AuthProvider>().unwrap(),
            AuthProvider::Google
        );
        assert!("vk".parse::<AuthProvider>().is_err());
    }

    #[test]
    fn subject_cycling_wraps() {
        assert_eq!(Subject::History.next(), Subject::Math);
        assert_eq!(Subject::Math.prev(), Subject::History);
    }
}

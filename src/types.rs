use serde::{Deserialize, Serialize};

/// How a breached value was matched.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Dictionary,
    ReversedEmail,
}

/// Terminal result of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found { value: String, kind: MatchKind },
    NotFound,
}

impl Outcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found { .. })
    }

    pub fn status_text(&self) -> &'static str {
        match self {
            Outcome::Found {
                kind: MatchKind::Dictionary,
                ..
            } => status::FOUND_DICTIONARY,
            Outcome::Found {
                kind: MatchKind::ReversedEmail,
                ..
            } => status::FOUND_REVERSED_EMAIL,
            Outcome::NotFound => status::NOT_FOUND,
        }
    }
}

pub mod status {
    pub const IDLE: &str = "idle";
    pub const INITIALIZING: &str = "initializing";
    pub const CHECKING: &str = "checking";
    pub const FOUND_DICTIONARY: &str = "found in dictionary";
    pub const FOUND_REVERSED_EMAIL: &str = "found (reversed email)";
    pub const NOT_FOUND: &str = "not found in breach database";
    pub const STOPPED: &str = "stopped by user";
}

/// Point-in-time view of the single in-flight (or last completed) check.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScanSnapshot {
    pub running: bool,
    pub progress: u8,
    pub status: String,
    pub email: Option<String>,
    pub found_password: Option<String>,
    pub match_kind: Option<MatchKind>,
    /// Never populated; the polling client still reads the key.
    pub current_password: Option<String>,
    pub generated_passwords: Vec<String>,
    pub checked_count: u64,
    pub total_passwords: u64,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
}

impl ScanSnapshot {
    /// State before any check has run.
    pub fn idle(total_passwords: u64) -> Self {
        Self {
            running: false,
            progress: 0,
            status: status::IDLE.into(),
            email: None,
            found_password: None,
            match_kind: None,
            current_password: None,
            generated_passwords: Vec::new(),
            checked_count: 0,
            total_passwords,
            started_at: None,
            finished_at: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// `null` and a missing key both mean `false`.
    #[serde(default)]
    pub check_without_password: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub length: Option<usize>,
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub passwords: Vec<String>,
}

/// `{"status": "..."}` body used by the start/stop endpoints and errors.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusMessage {
    pub status: String,
}

impl StatusMessage {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

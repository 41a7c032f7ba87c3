use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Role of a resolved code: the one that opens the gate today, or the one
/// shown to authenticated visitors as the upcoming code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeRole {
    Current,
    Next,
}

impl CodeRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Next => "next",
        }
    }

    /// Seed for deriving this role's code from a deployment identifier.
    /// The next code uses a suffixed seed so both roles stay independent
    /// while rotating together on redeploy.
    pub fn seed_for(self, deploy_id: &str) -> String {
        match self {
            Self::Current => deploy_id.to_owned(),
            Self::Next => format!("{deploy_id}next"),
        }
    }
}

/// Per-browser visitor aggregate, persisted when a database is configured.
#[derive(Debug, Clone)]
pub struct Visitor {
    pub visitor_id: String,
    pub first_visit_at: DateTime<Utc>,
    pub last_visit_at: DateTime<Utc>,
    pub last_access_code: Option<String>,
    pub total_visits: i32,
    pub has_used_code: bool,
}

impl Visitor {
    pub fn is_new(&self) -> bool {
        self.total_visits <= 1
    }
}

/// One gate submission, appended to the usage log.
#[derive(Debug, Clone)]
pub struct AccessEvent {
    pub id: Uuid,
    pub visitor_id: String,
    pub code: String,
    pub success: bool,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Authentication state carried by the session cookie. There is no
/// explicit logout; the state reverts to anonymous only when the cookie
/// expires.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub authenticated: bool,
    pub last_code: Option<String>,
}

/// Session subject used when the browser never supplied a visitor id.
pub const ANONYMOUS_VISITOR: &str = "anonymous";

/// How many access events recovery scans and the stream endpoint returns.
pub const HISTORY_SCAN_LIMIT: u64 = 50;

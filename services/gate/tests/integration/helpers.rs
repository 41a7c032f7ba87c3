use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use gatehouse_core::log_once::OnceLog;
use gatehouse_gate::domain::generator::CodeCache;
use gatehouse_gate::domain::repository::{CodeSource, CodeStore, UsageLedger};
use gatehouse_gate::domain::types::{AccessEvent, CodeRole, Visitor};
use gatehouse_gate::error::GateServiceError;
use gatehouse_gate::usecase::resolve::ResolveCodeUseCase;

// ── MockCodeSource ───────────────────────────────────────────────────────────

pub struct MockCodeSource {
    pub code: Option<String>,
    pub fail: bool,
    pub fetches: Arc<AtomicU32>,
}

impl MockCodeSource {
    pub fn with_code(code: &str) -> Self {
        Self {
            code: Some(code.to_owned()),
            fail: false,
            fetches: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn miss() -> Self {
        Self {
            code: None,
            fail: false,
            fetches: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            code: None,
            fail: true,
            fetches: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Shared handle to the fetch counter for post-execution inspection.
    pub fn fetch_counter(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.fetches)
    }
}

impl CodeSource for MockCodeSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch(&self, _role: CodeRole) -> Result<Option<String>, GateServiceError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        if self.fail {
            return Err(GateServiceError::Internal(anyhow::anyhow!(
                "mock store down"
            )));
        }
        Ok(self.code.clone())
    }
}

// ── MockCodeStore ────────────────────────────────────────────────────────────

pub struct MockCodeStore {
    pub rotations: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockCodeStore {
    pub fn empty() -> Self {
        Self {
            rotations: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn rotations_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.rotations)
    }
}

impl CodeSource for MockCodeStore {
    fn name(&self) -> &'static str {
        "mock-store"
    }

    async fn fetch(&self, _role: CodeRole) -> Result<Option<String>, GateServiceError> {
        Ok(None)
    }
}

impl CodeStore for MockCodeStore {
    async fn rotate(&self, current: &str, next: &str) -> Result<(), GateServiceError> {
        self.rotations
            .lock()
            .unwrap()
            .push((current.to_owned(), next.to_owned()));
        Ok(())
    }
}

// ── MockLedger ───────────────────────────────────────────────────────────────

pub struct MockLedger {
    pub visitors: Arc<Mutex<HashMap<String, Visitor>>>,
    pub events: Arc<Mutex<Vec<AccessEvent>>>,
    pub fail: bool,
}

impl MockLedger {
    pub fn empty() -> Self {
        Self {
            visitors: Arc::new(Mutex::new(HashMap::new())),
            events: Arc::new(Mutex::new(vec![])),
            fail: false,
        }
    }

    pub fn with_events(events: Vec<AccessEvent>) -> Self {
        Self {
            visitors: Arc::new(Mutex::new(HashMap::new())),
            events: Arc::new(Mutex::new(events)),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            visitors: Arc::new(Mutex::new(HashMap::new())),
            events: Arc::new(Mutex::new(vec![])),
            fail: true,
        }
    }

    pub fn events_handle(&self) -> Arc<Mutex<Vec<AccessEvent>>> {
        Arc::clone(&self.events)
    }

    pub fn visitors_handle(&self) -> Arc<Mutex<HashMap<String, Visitor>>> {
        Arc::clone(&self.visitors)
    }
}

impl UsageLedger for MockLedger {
    async fn get_or_create_visitor(&self, visitor_id: &str) -> Result<Visitor, GateServiceError> {
        if self.fail {
            return Err(GateServiceError::Internal(anyhow::anyhow!(
                "mock ledger down"
            )));
        }
        let now = Utc::now();
        let mut visitors = self.visitors.lock().unwrap();
        let visitor = visitors
            .entry(visitor_id.to_owned())
            .and_modify(|v| {
                v.total_visits += 1;
                v.last_visit_at = now;
            })
            .or_insert_with(|| Visitor {
                visitor_id: visitor_id.to_owned(),
                first_visit_at: now,
                last_visit_at: now,
                last_access_code: None,
                total_visits: 1,
                has_used_code: false,
            });
        Ok(visitor.clone())
    }

    async fn record_use(&self, event: &AccessEvent) -> Result<(), GateServiceError> {
        if self.fail {
            return Err(GateServiceError::Internal(anyhow::anyhow!(
                "mock ledger down"
            )));
        }
        self.events.lock().unwrap().push(event.clone());
        if event.success {
            if let Some(v) = self.visitors.lock().unwrap().get_mut(&event.visitor_id) {
                v.last_access_code = Some(event.code.clone());
                v.has_used_code = true;
            }
        }
        Ok(())
    }

    async fn history_for(
        &self,
        visitor_id: &str,
        limit: u64,
    ) -> Result<Vec<AccessEvent>, GateServiceError> {
        if self.fail {
            return Err(GateServiceError::Internal(anyhow::anyhow!(
                "mock ledger down"
            )));
        }
        let mut events: Vec<_> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.visitor_id == visitor_id)
            .cloned()
            .collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        events.truncate(limit as usize);
        Ok(events)
    }

    async fn recent_events(&self, limit: u64) -> Result<Vec<AccessEvent>, GateServiceError> {
        let mut events: Vec<_> = self.events.lock().unwrap().clone();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        events.truncate(limit as usize);
        Ok(events)
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub const TEST_SESSION_SECRET: &str = "test-session-secret-for-unit-tests-only";

/// Valid hex, so the generator seeds from the literal value.
pub const TEST_DEPLOY_ID: &str = "abcdef12";

pub fn resolver(
    primary: Option<MockCodeSource>,
    secondary: Option<MockCodeSource>,
) -> ResolveCodeUseCase<MockCodeSource, MockCodeSource> {
    ResolveCodeUseCase {
        primary,
        secondary,
        override_code: None,
        deploy_id: TEST_DEPLOY_ID.to_owned(),
        cache: Arc::new(CodeCache::default()),
        once: Arc::new(OnceLog::default()),
    }
}

pub fn access_event(visitor_id: &str, code: &str, success: bool, age_secs: i64) -> AccessEvent {
    AccessEvent {
        id: Uuid::new_v4(),
        visitor_id: visitor_id.to_owned(),
        code: code.to_owned(),
        success,
        user_agent: None,
        created_at: Utc::now() - Duration::seconds(age_secs),
    }
}

/// Assert the closed-set format `WORD + number in [10, 999] + symbol`.
pub fn assert_code_format(code: &str) {
    let symbol = code.chars().last().expect("empty code");
    assert!(
        "!@#$%&*+=?~^".contains(symbol),
        "unexpected symbol in {code}"
    );
    let body = &code[..code.len() - 1];
    let word: String = body.chars().take_while(|c| c.is_ascii_uppercase()).collect();
    assert!(!word.is_empty(), "no word prefix in {code}");
    let number: u16 = body[word.len()..]
        .parse()
        .unwrap_or_else(|_| panic!("non-numeric middle in {code}"));
    assert!((10..=999).contains(&number), "number out of range in {code}");
}

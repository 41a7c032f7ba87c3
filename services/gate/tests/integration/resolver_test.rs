use std::sync::atomic::Ordering;

use gatehouse_gate::domain::types::CodeRole;

use crate::helpers::{MockCodeSource, assert_code_format, resolver};

#[tokio::test]
async fn should_prefer_primary_store() {
    let uc = resolver(
        Some(MockCodeSource::with_code("STORED100!")),
        Some(MockCodeSource::with_code("REDIS200@")),
    );
    assert_eq!(uc.resolve(CodeRole::Current).await, "STORED100!");
}

#[tokio::test]
async fn should_fall_back_to_secondary_when_primary_fails() {
    let uc = resolver(
        Some(MockCodeSource::failing()),
        Some(MockCodeSource::with_code("REDIS200@")),
    );
    assert_eq!(uc.resolve(CodeRole::Current).await, "REDIS200@");
}

#[tokio::test]
async fn should_fall_back_to_secondary_when_primary_misses() {
    let uc = resolver(
        Some(MockCodeSource::miss()),
        Some(MockCodeSource::with_code("REDIS200@")),
    );
    assert_eq!(uc.resolve(CodeRole::Current).await, "REDIS200@");
}

#[tokio::test]
async fn should_resolve_generated_when_all_stores_fail() {
    let uc = resolver(
        Some(MockCodeSource::failing()),
        Some(MockCodeSource::failing()),
    );
    let code = uc.resolve(CodeRole::Current).await;
    assert!(!code.is_empty());
    assert_code_format(&code);
}

#[tokio::test]
async fn should_resolve_without_any_store_configured() {
    let uc = resolver(None, None);
    assert_code_format(&uc.resolve(CodeRole::Current).await);
    assert_code_format(&uc.resolve(CodeRole::Next).await);
}

#[tokio::test]
async fn should_apply_override_to_current_role_only() {
    let mut uc = resolver(None, None);
    uc.override_code = Some("PINNED42!".to_owned());

    assert_eq!(uc.resolve(CodeRole::Current).await, "PINNED42!");

    let next = uc.resolve(CodeRole::Next).await;
    assert_ne!(next, "PINNED42!");
    assert_code_format(&next);
}

#[tokio::test]
async fn should_resolve_deterministically_across_fresh_caches() {
    // Two resolvers with independent caches but the same deploy id must
    // agree: the code is a pure function of the seed.
    let a = resolver(None, None).resolve(CodeRole::Current).await;
    let b = resolver(None, None).resolve(CodeRole::Current).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn should_generate_once_per_seed() {
    let uc = resolver(None, None);

    let first = uc.resolve(CodeRole::Current).await;
    assert_eq!(uc.cache.generated(), 1);

    assert_eq!(uc.resolve(CodeRole::Current).await, first);
    assert_eq!(uc.cache.generated(), 1, "cache hit must not re-generate");

    uc.resolve(CodeRole::Next).await;
    assert_eq!(uc.cache.generated(), 2);
}

#[tokio::test]
async fn should_consult_primary_on_every_resolve() {
    // Only generated codes are cached; stored codes stay live so an
    // operator rotation takes effect immediately.
    let primary = MockCodeSource::with_code("STORED100!");
    let fetches = primary.fetch_counter();
    let uc = resolver(Some(primary), None);

    uc.resolve(CodeRole::Current).await;
    uc.resolve(CodeRole::Current).await;
    assert_eq!(fetches.load(Ordering::Relaxed), 2);
}

#[tokio::test]
async fn should_keep_current_and_next_codes_independent() {
    let uc = resolver(None, None);
    let current = uc.resolve(CodeRole::Current).await;
    let next = uc.resolve(CodeRole::Next).await;
    assert_ne!(current, next);
}

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::{RngExt, SeedableRng, rngs::StdRng};

/// Closed word list for generated codes (marketing-friendly, ASCII only).
const MARKETING_WORDS: &[&str] = &[
    "CLOUD", "FUTURE", "INNOVATE", "DREAM", "BUILD", "CREATE", "LAUNCH", "FLY",
    "SPARK", "SHINE", "GLOW", "RISE", "LEAP", "JUMP", "DASH", "ZOOM",
    "POWER", "MAGIC", "WONDER", "AMAZE", "THRILL", "EXCITE", "INSPIRE", "IGNITE",
    "ROCKET", "STAR", "MOON", "SUN", "OCEAN", "MOUNTAIN", "FOREST", "RIVER",
    "TECH", "AI", "CODE", "DATA", "SMART", "FAST", "SECURE", "TRUST",
    "FRIEND", "FAMILY", "TEAM", "SQUAD", "CREW", "GANG", "TRIBE", "CLAN",
];

/// Closed symbol set for generated codes.
const ASCII_SYMBOLS: &[char] = &['!', '@', '#', '$', '%', '&', '*', '+', '=', '?', '~', '^'];

/// Derive the numeric seed from a raw seed string.
///
/// Hex input (a commit SHA, a build id) is taken at face value, truncated to
/// the first 16 hex digits so a full 40-char SHA still fits a u64. Anything
/// else falls back to a content hash, so every string yields a seed.
pub fn derive_seed(raw: &str) -> u64 {
    if !raw.is_empty() && raw.is_ascii() {
        let hex = &raw[..raw.len().min(16)];
        if let Ok(n) = u64::from_str_radix(hex, 16) {
            return n;
        }
    }
    let mut hasher = DefaultHasher::new();
    raw.hash(&mut hasher);
    hasher.finish()
}

/// Generate the code for a raw seed: `WORD + number in [10, 999] + symbol`.
///
/// Total and deterministic: the same seed yields the same code for the
/// lifetime of a build. The draw order is part of the contract; reordering
/// it changes every code.
pub fn generate(raw_seed: &str) -> String {
    let mut rng = StdRng::seed_from_u64(derive_seed(raw_seed));
    let word = MARKETING_WORDS[rng.random_range(0..MARKETING_WORDS.len())];
    let symbol = ASCII_SYMBOLS[rng.random_range(0..ASCII_SYMBOLS.len())];
    let number: u16 = rng.random_range(10..=999);
    format!("{word}{number}{symbol}")
}

/// Process-wide memoization of generated codes, keyed by raw seed.
///
/// No eviction and no TTL: the seed set is bounded by the deployment
/// identifier (current and next), so the map never grows past a handful of
/// entries. Writes are idempotent (same seed, same value), so a racing
/// duplicate computation is harmless.
#[derive(Debug, Default)]
pub struct CodeCache {
    codes: Mutex<HashMap<String, String>>,
    generated: AtomicU64,
}

impl CodeCache {
    /// Return the cached code for a seed, generating it on first use.
    pub fn get_or_generate(&self, raw_seed: &str) -> String {
        let mut codes = self.codes.lock().expect("code cache lock poisoned");
        if let Some(code) = codes.get(raw_seed) {
            return code.clone();
        }
        let code = generate(raw_seed);
        self.generated.fetch_add(1, Ordering::Relaxed);
        codes.insert(raw_seed.to_owned(), code.clone());
        code
    }

    /// Number of generator invocations since process start. Stays flat once
    /// the current and next seeds are cached.
    pub fn generated(&self) -> u64 {
        self.generated.load(Ordering::Relaxed)
    }
}

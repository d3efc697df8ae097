//! Message identifiers.
//!
//! Ids only serve list identity in the transcript, so uniqueness is
//! probabilistic and never checked against previously issued values.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use uuid::Builder;

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Returns a new identifier, a random UUID when the OS entropy source is available.
pub fn make_id() -> String {
    let mut bytes = [0_u8; 16];
    match getrandom::fill(&mut bytes) {
        Ok(()) => Builder::from_random_bytes(bytes).into_uuid().to_string(),
        Err(err) => {
            tracing::debug!("OS randomness unavailable ({err}), using time-based id");
            fallback_id()
        }
    }
}

/// `{unix millis}-{64 random bits as hex}`.
fn fallback_id() -> String {
    // RandomState is seeded per process; mixing in a counter keeps consecutive
    // calls within the same millisecond apart.
    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u64(FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed));
    format!("{}-{:016x}", Utc::now().timestamp_millis(), hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn make_id_produces_uuid_v4_strings() {
        let id = make_id();
        let parsed = uuid::Uuid::parse_str(&id).expect("id should be a uuid");
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn ids_do_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| make_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn fallback_ids_are_time_prefixed_and_distinct() {
        let first = fallback_id();
        let second = fallback_id();
        assert_ne!(first, second);

        let (millis, bits) = first.split_once('-').expect("composite id");
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(bits.len(), 16);
        assert!(bits.chars().all(|c| c.is_ascii_hexdigit()));
    }
}

//! Property tests for cache slot identity

use proptest::prelude::*;
use vidgate::services::normalize_query;
use vidgate::CacheKey;

proptest! {
    #[test]
    fn case_and_outer_whitespace_share_a_slot(
        query in "[a-zA-Z0-9 ]{1,40}",
        lead in " {0,4}",
        trail in " {0,4}",
        bound in 1u32..=50,
    ) {
        let padded = format!("{lead}{}{trail}", query.to_uppercase());
        prop_assert_eq!(CacheKey::search(&padded, bound), CacheKey::search(&query, bound));
    }

    #[test]
    fn distinct_bounds_get_distinct_slots(
        query in "[a-z ]{3,30}",
        a in 1u32..=50,
        b in 1u32..=50,
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(CacheKey::search(&query, a), CacheKey::search(&query, b));
    }

    #[test]
    fn search_and_trending_never_collide(query in "[a-z ]{3,30}", bound in 1u32..=50) {
        prop_assert_ne!(
            CacheKey::search(&query, bound).storage_key(),
            CacheKey::trending(&query, bound).storage_key()
        );
    }

    #[test]
    fn normalization_is_idempotent(query in "[a-zA-Z0-9 \\t]{0,40}") {
        let once = normalize_query(&query);
        prop_assert_eq!(normalize_query(&once), once.clone());
    }
}

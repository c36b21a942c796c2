//! Deterministic, content-derived cluster identifiers.

use dupliq_core::constants::CLUSTER_ID_PREFIX;
use xxhash_rust::xxh3::xxh3_64;

/// Derive the deterministic id for a member set.
///
/// Ids are a function of membership alone: member ids are sorted
/// lexicographically and deduplicated, length-prefixed so member
/// boundaries and member count always reach the digest, hashed with
/// xxh3_64, and rendered as `cluster_` + base36. Identical membership
/// yields the identical id regardless of discovery order; adding or
/// removing any member changes it.
///
/// Output matches `^cluster_[0-9a-z]+$`.
pub fn cluster_id<S: AsRef<str>>(members: &[S]) -> String {
    let mut sorted: Vec<&str> = members.iter().map(|s| s.as_ref()).collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut buf = Vec::with_capacity(sorted.iter().map(|id| id.len() + 8).sum());
    for id in &sorted {
        buf.extend_from_slice(&(id.len() as u64).to_le_bytes());
        buf.extend_from_slice(id.as_bytes());
    }

    format!("{}{}", CLUSTER_ID_PREFIX, to_base36(xxh3_64(&buf)))
}

/// Lowercase base36 rendering of a u64.
fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    // A u64 needs at most 13 base36 digits.
    let mut buf = [b'0'; 13];
    let mut pos = buf.len();
    if value == 0 {
        pos -= 1;
    }
    while value > 0 {
        pos -= 1;
        buf[pos] = DIGITS[(value % 36) as usize];
        value /= 36;
    }
    buf[pos..].iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_order_independent() {
        let forward = cluster_id(&["q1", "q2", "q3"]);
        let shuffled = cluster_id(&["q3", "q1", "q2"]);
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn test_membership_change_changes_id() {
        let base = cluster_id(&["q1", "q2", "q3"]);
        assert_ne!(base, cluster_id(&["q1", "q2"]));
        assert_ne!(base, cluster_id(&["q1", "q2", "q3", "q4"]));
        assert_ne!(base, cluster_id(&["q1", "q2", "q4"]));
    }

    #[test]
    fn test_member_boundaries_reach_the_digest() {
        // Same concatenated bytes, different member splits.
        assert_ne!(cluster_id(&["ab", "c"]), cluster_id(&["a", "bc"]));
    }

    #[test]
    fn test_duplicate_members_collapse() {
        assert_eq!(cluster_id(&["q1", "q2", "q1"]), cluster_id(&["q1", "q2"]));
    }

    #[test]
    fn test_id_format() {
        for id in [
            cluster_id(&["q1", "q2"]),
            cluster_id::<&str>(&[]),
            cluster_id(&["только", "вопросы"]),
        ] {
            let digest = id.strip_prefix("cluster_").expect("prefix");
            assert!(!digest.is_empty());
            assert!(digest
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_base36_zero() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}

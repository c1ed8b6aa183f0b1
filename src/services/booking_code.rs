//! Customer-facing booking codes.
//!
//! `BK` + base36 Unix milliseconds + a random base36 suffix, all uppercase.
//! Codes sort roughly by creation time. There is no uniqueness lookup: the
//! suffix makes a same-millisecond collision negligible, and the UNIQUE
//! constraint on `orders.booking_code` turns the residual case into a failed,
//! retryable insert instead of a duplicate.

use chrono::Utc;
use rand::Rng;

pub const PREFIX: &str = "BK";
pub const SUFFIX_LEN: usize = 8;

const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub fn generate() -> String {
    generate_at(Utc::now().timestamp_millis(), &mut rand::thread_rng())
}

pub fn generate_at<R: Rng>(unix_millis: i64, rng: &mut R) -> String {
    let mut code = String::with_capacity(PREFIX.len() + 9 + SUFFIX_LEN);
    code.push_str(PREFIX);
    code.push_str(&to_base36(unix_millis.max(0) as u64));
    for _ in 0..SUFFIX_LEN {
        code.push(ALPHABET[rng.gen_range(0..ALPHABET.len())] as char);
    }
    code
}

/// Shape check used when a code arrives from outside.
pub fn is_well_formed(code: &str) -> bool {
    code.strip_prefix(PREFIX).is_some_and(|rest| {
        rest.len() > SUFFIX_LEN
            && rest.len() <= 24
            && rest.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
    })
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".into();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(ALPHABET[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn base36_matches_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
        // 2025-06-01T00:00:00Z
        assert_eq!(to_base36(1_748_736_000_000), "MBCW9HC0");
    }

    #[test]
    fn codes_have_prefix_and_uppercase_alphanumerics() {
        for _ in 0..1_000 {
            let code = generate();
            assert!(code.starts_with("BK"), "{code}");
            assert!(code.len() >= 2 + 8 + SUFFIX_LEN, "{code}");
            assert!(
                code[2..].bytes().all(|b| b.is_ascii_digit() || b.is_ascii_uppercase()),
                "{code}"
            );
            assert!(is_well_formed(&code), "{code}");
        }
    }

    #[test]
    fn code_layout_is_prefix_timestamp_then_suffix() {
        let mut rng = StdRng::seed_from_u64(7);
        let code = generate_at(1_748_736_000_000, &mut rng);

        assert_eq!(code.len(), 18);
        assert_eq!(&code[..10], "BKMBCW9HC0");
        assert_eq!(code[10..].len(), SUFFIX_LEN);
    }

    #[test]
    fn later_timestamps_sort_after_earlier_ones() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = generate_at(1_748_736_000_000, &mut rng);
        let b = generate_at(1_748_736_000_001, &mut rng);
        assert!(a[..10] < b[..10]);
    }

    #[test]
    fn same_millisecond_codes_stay_distinct() {
        let mut rng = StdRng::seed_from_u64(42);
        let codes: HashSet<String> = (0..10_000)
            .map(|_| generate_at(1_748_736_000_000, &mut rng))
            .collect();
        assert_eq!(codes.len(), 10_000);
    }

    #[test]
    fn live_codes_stay_distinct() {
        let codes: HashSet<String> = (0..10_000).map(|_| generate()).collect();
        assert_eq!(codes.len(), 10_000);
    }

    #[test]
    fn rejects_malformed_codes() {
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("BK"));
        assert!(!is_well_formed("XXMBD8IEO0ABCDEFGH"));
        assert!(!is_well_formed("BKmbd8ieo0abcdefgh"));
        assert!(!is_well_formed("BK' OR 1=1 --"));
    }
}

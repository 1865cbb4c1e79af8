/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current UTC timestamp as an RFC 3339 string (order `created_at`)
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Generate a human-friendly 6-digit order code ("100000".."999999").
///
/// Short enough to read back to a customer and to print on a receipt.
/// Collisions are possible over a long history; the store layer reports
/// an insert conflict and the caller regenerates.
pub fn order_code() -> String {
    use rand::Rng;
    rand::thread_rng().gen_range(100_000..1_000_000).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_code_is_six_digits() {
        for _ in 0..100 {
            let code = order_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(code.chars().next(), Some('0'));
        }
    }
}

/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at center scale)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Generate a student reference code ("STU-XXXXXXXX").
///
/// Printed on receipts and used by parents to identify the student in SMS,
/// so it stays short and uppercase.
pub fn student_ref_code() -> String {
    let raw = uuid::Uuid::new_v4().simple().to_string();
    format!("STU-{}", raw[..8].to_uppercase())
}

/// Canonical billing month key, e.g. `2024-03`.
pub fn month_key(year: i32, month: u32) -> String {
    format!("{year:04}-{month:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ref_code_shape() {
        let code = student_ref_code();
        assert!(code.starts_with("STU-"));
        assert_eq!(code.len(), 12);
        assert!(code[4..].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn month_key_is_zero_padded() {
        assert_eq!(month_key(2024, 3), "2024-03");
        assert_eq!(month_key(2024, 11), "2024-11");
    }
}

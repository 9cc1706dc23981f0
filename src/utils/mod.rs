pub mod ip;
pub mod url_validator;

use chrono::Utc;

const SUFFIX_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// 生成 base36 随机后缀
pub fn generate_random_suffix(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| SUFFIX_CHARS[rand::random_range(0..SUFFIX_CHARS.len())] as char)
        .take(length)
        .collect()
}

/// Generate an opaque code token: millisecond timestamp plus random suffix.
///
/// Uniqueness is probabilistic only. The unique index on the code column
/// turns a collision into an ordinary insert error, there is no retry.
pub fn generate_code(suffix_length: usize) -> String {
    format!(
        "qr_{}_{}",
        Utc::now().timestamp_millis(),
        generate_random_suffix(suffix_length)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_suffix_length_and_charset() {
        let suffix = generate_random_suffix(7);
        assert_eq!(suffix.len(), 7);
        assert!(
            suffix
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        );
    }

    #[test]
    fn test_generate_code_shape() {
        let code = generate_code(7);
        let parts: Vec<&str> = code.splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "qr");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 7);
    }

    #[test]
    fn test_generated_codes_differ() {
        let a = generate_code(7);
        let b = generate_code(7);
        assert_ne!(a, b);
    }
}

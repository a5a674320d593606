//! String and text generators.

use fake::faker::lorem::en::{Sentence, Words};
use fake::Fake;
use faker_core::FieldValue;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length cap used for string columns declared without a length.
pub const UNBOUNDED_MAX_LENGTH: usize = 255;

/// Below this length, strings are random alphanumerics rather than words.
const WORDS_MIN_LENGTH: usize = 5;

/// Generate a non-empty string of at most `max_length` characters.
pub fn generate_string<R: Rng>(rng: &mut R, max_length: usize) -> FieldValue {
    let max_length = max_length.max(1);

    if max_length < WORDS_MIN_LENGTH {
        let len = rng.gen_range(1..=max_length);
        let s: String = (0..len)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect();
        return FieldValue::String(s);
    }

    let words: Vec<String> = Words(1..4).fake_with_rng(rng);
    FieldValue::String(truncate(&words.join(" "), max_length))
}

/// Generate free text of a few sentences.
pub fn generate_text<R: Rng>(rng: &mut R) -> FieldValue {
    let count = rng.gen_range(1..=3);
    let sentences: Vec<String> = (0..count)
        .map(|_| Sentence(3..10).fake_with_rng(rng))
        .collect();
    FieldValue::String(sentences.join(" "))
}

/// Cut `s` to at most `max_chars` characters, dropping trailing whitespace.
fn truncate(s: &str, max_chars: usize) -> String {
    let cut: String = s.chars().take(max_chars).collect();
    let trimmed = cut.trim_end();
    if trimmed.is_empty() {
        cut
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_string_respects_length() {
        let mut rng = StdRng::seed_from_u64(42);

        for max_length in [1, 2, 4, 5, 10, 80, 255] {
            for _ in 0..50 {
                let value = generate_string(&mut rng, max_length);
                let s = value.as_str().unwrap();
                assert!(!s.is_empty());
                assert!(s.chars().count() <= max_length, "{s:?} longer than {max_length}");
            }
        }
    }

    #[test]
    fn test_generate_text_not_empty() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = generate_text(&mut rng);
        assert!(!value.as_str().unwrap().trim().is_empty());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello world", 6), "hello");
        assert_eq!(truncate("abc", 10), "abc");
        assert_eq!(truncate("héllo", 2), "hé");
    }
}

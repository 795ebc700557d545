use crate::app::config::{Settings, SuffixStrategy};
use crate::app::models::DOCUMENT_EXTENSION;
use chrono::format::StrftimeItems;
use chrono::{DateTime, Local, TimeZone};
use rand::seq::SliceRandom;
use std::fmt::{self, Write};

/// Used whenever the configured timestamp pattern cannot be applied.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H%M%S";
const RANDOM_FALLBACK: &str = "fallback";
const ILLEGAL_FILE_NAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Suffix for an output file name according to the configured strategy.
pub fn suffix(settings: &Settings) -> String {
    match settings.filename_suffix {
        SuffixStrategy::Timestamp => timestamp_suffix(&Local::now(), &settings.timestamp_format),
        SuffixStrategy::Random => random_suffix(settings.random_length, &settings.random_chars),
    }
}

/// `<base>_<suffix>.md`
pub fn output_name(base: &str, settings: &Settings) -> String {
    format!("{}_{}.{}", base, suffix(settings), DOCUMENT_EXTENSION)
}

pub fn timestamp_suffix<Tz>(now: &DateTime<Tz>, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match format_timestamp(now, pattern) {
        Some(formatted) => formatted,
        None => {
            log::warn!(
                "Timestamp format '{}' is unusable, falling back to '{}'",
                pattern,
                DEFAULT_TIMESTAMP_FORMAT
            );
            format_timestamp(now, DEFAULT_TIMESTAMP_FORMAT).unwrap_or_default()
        }
    }
}

/// Formats `now` and makes the result safe for a file name.
/// `None` when the pattern is malformed or yields nothing.
fn format_timestamp<Tz>(now: &DateTime<Tz>, pattern: &str) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut formatted = String::new();
    write!(
        formatted,
        "{}",
        now.format_with_items(StrftimeItems::new(pattern))
    )
    .ok()?;

    let sanitized = sanitize_file_name(&formatted);
    if sanitized.trim().is_empty() {
        None
    } else {
        Some(sanitized)
    }
}

pub fn random_suffix(length: usize, alphabet: &str) -> String {
    let chars: Vec<char> = alphabet.chars().collect();
    let mut rng = rand::thread_rng();
    let generated: String = (0..length)
        .filter_map(|_| chars.choose(&mut rng).copied())
        .collect();

    if generated.is_empty() {
        RANDOM_FALLBACK.to_string()
    } else {
        generated
    }
}

/// Replaces characters that are not allowed in file names with `-`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if ILLEGAL_FILE_NAME_CHARS.contains(&c) { '-' } else { c })
        .collect()
}

/// Output base name for a folder: lowercase, whitespace runs become `_`.
pub fn snake_case(name: &str) -> String {
    let lowered = sanitize_file_name(&name.to_lowercase());
    let snake = lowered.split_whitespace().collect::<Vec<_>>().join("_");
    if snake.is_empty() {
        "combined".to_string()
    } else {
        snake
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn moment() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
    }

    #[test]
    fn timestamp_uses_configured_pattern() {
        assert_eq!(timestamp_suffix(&moment(), "%Y%m%d"), "20240305");
    }

    #[test]
    fn timestamp_replaces_illegal_characters() {
        assert_eq!(timestamp_suffix(&moment(), "%H:%M/%S"), "14-07-09");
    }

    #[test]
    fn malformed_or_empty_pattern_falls_back() {
        assert_eq!(timestamp_suffix(&moment(), "%Y%"), "2024-Mar-05-140709");
        assert_eq!(timestamp_suffix(&moment(), ""), "2024-Mar-05-140709");
        assert_eq!(timestamp_suffix(&moment(), "   "), "2024-Mar-05-140709");
    }

    #[test]
    fn random_suffix_draws_from_alphabet() {
        let generated = random_suffix(6, "xyz");
        assert_eq!(generated.chars().count(), 6);
        assert!(generated.chars().all(|c| "xyz".contains(c)));
    }

    #[test]
    fn random_suffix_handles_multibyte_alphabet() {
        let generated = random_suffix(4, "äö");
        assert_eq!(generated.chars().count(), 4);
        assert!(generated.chars().all(|c| c == 'ä' || c == 'ö'));
    }

    #[test]
    fn degenerate_alphabet_yields_fallback() {
        assert_eq!(random_suffix(6, ""), "fallback");
        assert_eq!(random_suffix(0, "abc"), "fallback");
    }

    #[test]
    fn output_name_with_random_suffix() {
        let settings = Settings {
            filename_suffix: SuffixStrategy::Random,
            random_length: 6,
            random_chars: "ab".into(),
            ..Settings::default()
        };
        let name = output_name("notes", &settings);

        let suffix = name
            .strip_prefix("notes_")
            .and_then(|rest| rest.strip_suffix(".md"))
            .expect("name shape");
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c == 'a' || c == 'b'));
    }

    #[test]
    fn output_name_with_timestamp_suffix() {
        let settings = Settings {
            filename_suffix: SuffixStrategy::Timestamp,
            timestamp_format: "fixed".into(),
            ..Settings::default()
        };
        assert_eq!(output_name("vault_combined", &settings), "vault_combined_fixed.md");
    }

    #[test]
    fn snake_case_folder_names() {
        assert_eq!(snake_case("Notes"), "notes");
        assert_eq!(snake_case("My Daily  Notes"), "my_daily_notes");
        assert_eq!(snake_case("Q&A: 2024"), "q&a-_2024");
        assert_eq!(snake_case("  "), "combined");
    }
}

use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// Translation pairs, pack statuses and cache keys are all keyed by
/// language codes coming from configuration, detection and callers.
/// These helpers validate and normalize ISO 639-1 (2-letter) and
/// ISO 639-2 (3-letter) codes so that the pack registry can reject
/// codes that do not name a real language.

/// Map an ISO 639-2/B code to its ISO 639-2/T form when they differ
fn bibliographic_to_terminology(code: &str) -> Option<&'static str> {
    let mapped = match code {
        "fre" => "fra",
        "ger" => "deu",
        "dut" => "nld",
        "gre" => "ell",
        "chi" => "zho",
        "cze" => "ces",
        "ice" => "isl",
        "alb" => "sqi",
        "arm" => "hye",
        "baq" => "eus",
        "bur" => "mya",
        "per" => "fas",
        "geo" => "kat",
        "may" => "msa",
        "mac" => "mkd",
        "rum" => "ron",
        "slo" => "slk",
        "wel" => "cym",
        _ => return None,
    };
    Some(mapped)
}

/// Resolve a code to an isolang language, accepting 639-1, 639-2/T and 639-2/B
fn lookup(code: &str) -> Option<Language> {
    let normalized = code.trim().to_lowercase();

    match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => {
            let part2t = bibliographic_to_terminology(&normalized).unwrap_or(&normalized);
            Language::from_639_3(part2t)
        }
        _ => None,
    }
}

/// Check whether a code names a real language
pub fn is_valid_language_code(code: &str) -> bool {
    lookup(code).is_some()
}

/// Normalize a language code to ISO 639-1 (2-letter) format if possible
/// Falls back to ISO 639-3 if no ISO 639-1 code exists
pub fn normalize_to_part1(code: &str) -> Result<String> {
    let lang = lookup(code).ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))?;

    match lang.to_639_1() {
        Some(part1) => Ok(part1.to_string()),
        None => Ok(lang.to_639_3().to_string()),
    }
}

/// Check if two language codes match (represent the same language)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (lookup(code1), lookup(code2)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let lang = lookup(code).ok_or_else(|| anyhow!("Invalid language code: {}", code))?;
    Ok(lang.to_name().to_string())
}

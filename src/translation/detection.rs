/*!
 * Best-effort source language detection.
 *
 * Detection is used when the caller does not know the language of the
 * recognized text. It answers `None` when it is not confident, and callers
 * must treat that as "unknown" rather than assuming a default.
 */

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::LazyLock;

/// Source language detection capability
pub trait LanguageDetector: Send + Sync + Debug {
    /// Detect the language of `text`, returning an ISO 639-1 code
    fn detect(&self, text: &str) -> Option<String>;
}

/// Minimum share of letters a non-Latin script needs to decide the language
const SCRIPT_THRESHOLD: f32 = 0.3;

/// Kana is decisive at a lower share since Japanese mixes it with Han
const KANA_THRESHOLD: f32 = 0.1;

/// Minimum share of Latin letters before the lexicon is consulted
const LATIN_THRESHOLD: f32 = 0.5;

/// Common words per Latin-script language
static LEXICON: LazyLock<HashMap<&'static str, &'static [&'static str]>> = LazyLock::new(|| {
    let mut lexicon: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
    lexicon.insert("en", &[
        "hello", "world", "the", "and", "you", "are", "how", "thank", "thanks", "good",
        "morning", "welcome", "to", "is", "of", "this", "that", "for", "with", "text",
        "first", "second", "third", "frame", "exit", "open", "closed", "please", "what",
        "where", "menu", "today",
    ]);
    lexicon.insert("es", &[
        "hola", "gracias", "buenos", "buenas", "días", "el", "los", "las", "que", "y",
        "por", "favor", "bienvenido", "bienvenidos", "cómo", "estás", "salida", "hoy",
    ]);
    lexicon.insert("fr", &[
        "bonjour", "merci", "le", "les", "et", "est", "vous", "je", "bienvenue", "monde",
        "au", "revoir", "oui", "sortie", "aujourd'hui", "salut",
    ]);
    lexicon.insert("de", &[
        "hallo", "danke", "und", "der", "die", "das", "ist", "nicht", "ich", "willkommen",
        "welt", "guten", "morgen", "ausgang", "heute",
    ]);
    lexicon.insert("it", &[
        "ciao", "grazie", "buongiorno", "il", "che", "benvenuto", "mondo", "sono", "uscita",
        "oggi",
    ]);
    lexicon.insert("pt", &[
        "olá", "obrigado", "obrigada", "bom", "dia", "não", "você", "bem", "vindo", "saída",
        "hoje",
    ]);
    lexicon
});

/// Letters that only appear in one of the lexicon languages
const DIACRITIC_HINTS: &[(char, &str)] = &[
    ('ñ', "es"),
    ('¿', "es"),
    ('¡', "es"),
    ('ç', "fr"),
    ('œ', "fr"),
    ('ê', "fr"),
    ('ß', "de"),
    ('ä', "de"),
    ('ö', "de"),
    ('ü', "de"),
    ('ã', "pt"),
    ('õ', "pt"),
];

#[derive(Debug, Default)]
struct ScriptCounts {
    letters: usize,
    hangul: usize,
    kana: usize,
    han: usize,
    cyrillic: usize,
    arabic: usize,
    thai: usize,
    latin: usize,
}

impl ScriptCounts {
    fn of(text: &str) -> Self {
        let mut counts = Self::default();
        for c in text.chars().filter(|c| c.is_alphabetic()) {
            counts.letters += 1;
            match c {
                '\u{ac00}'..='\u{d7af}' | '\u{1100}'..='\u{11ff}' | '\u{3130}'..='\u{318f}' => counts.hangul += 1,
                '\u{3040}'..='\u{309f}' | '\u{30a0}'..='\u{30ff}' => counts.kana += 1,
                '\u{4e00}'..='\u{9fff}' | '\u{3400}'..='\u{4dbf}' => counts.han += 1,
                '\u{0400}'..='\u{04ff}' => counts.cyrillic += 1,
                '\u{0600}'..='\u{06ff}' => counts.arabic += 1,
                '\u{0e00}'..='\u{0e7f}' => counts.thai += 1,
                'a'..='z' | 'A'..='Z' | '\u{00c0}'..='\u{024f}' => counts.latin += 1,
                _ => {}
            }
        }
        counts
    }

    fn share(&self, count: usize) -> f32 {
        count as f32 / self.letters as f32
    }
}

/// Detector based on Unicode script shares and a small Latin lexicon
#[derive(Debug, Default, Clone)]
pub struct ScriptDetector;

impl ScriptDetector {
    pub fn new() -> Self {
        Self
    }

    fn detect_latin(text: &str) -> Option<String> {
        let lowered = text.to_lowercase();
        let mut scores: HashMap<&str, usize> = HashMap::new();

        for word in lowered.split(|c: char| !(c.is_alphabetic() || c == '\'')) {
            if word.is_empty() {
                continue;
            }
            for (language, words) in LEXICON.iter() {
                if words.contains(&word) {
                    *scores.entry(*language).or_default() += 1;
                }
            }
        }

        for (hint, language) in DIACRITIC_HINTS {
            if lowered.contains(*hint) {
                *scores.entry(*language).or_default() += 1;
            }
        }

        let best = scores.values().copied().max()?;
        let mut leaders = scores.iter().filter(|(_, score)| **score == best);
        let (language, _) = leaders.next()?;

        // A tie between languages is not a confident answer
        if leaders.next().is_some() {
            return None;
        }
        Some(language.to_string())
    }
}

impl LanguageDetector for ScriptDetector {
    fn detect(&self, text: &str) -> Option<String> {
        let counts = ScriptCounts::of(text);
        if counts.letters == 0 {
            return None;
        }

        let decided = if counts.share(counts.kana) > KANA_THRESHOLD {
            Some("ja")
        } else if counts.share(counts.hangul) > SCRIPT_THRESHOLD {
            Some("ko")
        } else if counts.share(counts.han) > SCRIPT_THRESHOLD {
            Some("zh")
        } else if counts.share(counts.cyrillic) > LATIN_THRESHOLD {
            Some("ru")
        } else if counts.share(counts.arabic) > LATIN_THRESHOLD {
            Some("ar")
        } else if counts.share(counts.thai) > LATIN_THRESHOLD {
            Some("th")
        } else {
            None
        };

        if let Some(language) = decided {
            return Some(language.to_string());
        }

        if counts.share(counts.latin) > LATIN_THRESHOLD {
            return Self::detect_latin(text);
        }

        None
    }
}

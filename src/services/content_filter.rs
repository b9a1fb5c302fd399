use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, RwLock};

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").expect("valid regex"));

const CENSOR_MASK: &str = "****";

const ENGLISH_WORDS: &[&str] = &[
    "arse", "arsehole", "asshole", "bastard", "bitch", "bollocks", "bullshit", "cock", "crap",
    "cunt", "damn", "dick", "dickhead", "douche", "douchebag", "dumbass", "fag", "faggot",
    "fuck", "fucker", "fucking", "jackass", "motherfucker", "nigga", "nigger", "piss", "prick",
    "pussy", "retard", "shit", "shithead", "slut", "twat", "wanker", "whore",
];

const TAGALOG_WORDS: &[&str] = &[
    // Basic profanity
    "puta", "putang", "putangina", "putanginamo", "putragis", "pota", "potangina", "gago",
    "gaga", "gagawin", "pakyu", "pak yu", "pakyo", "ulol", "ulul", "tanga", "tae", "taena",
    "tainga", "hinayupak", "hayop", "hayupak", "leche", "lecheng",
    // Sexual terms
    "burat", "buratmo", "burnik", "kantot", "kantutan", "iyot", "iyutan", "jakol", "titi",
    "titimo", "pepe", "pepemo", "maliit", "bayag", "bayagmo", "bayagmong", "burat mo",
    "kantot mo", "kantotmo", "iyot mo", "iyotmo", "titi mo", "pepe mo", "bayag mo",
    // Combined phrases
    "burat mo maliit", "maliit ang burat mo", "burat mong maliit", "titi mo maliit",
    "maliit ang titi mo", "titi mong maliit",
    // Insults
    "bobo", "boboka", "bobomo", "bobong", "tangamo", "tangaka", "tangina", "tanginamo", "inamo",
    "hindot", "hindutan", "ogag", "gagi", "pucha", "kupal", "kupalmo", "kupalka", "tarantado",
    "tarantadoka", "siraulo", "anak ng puta", "anakniputa", "anakngputangina",
    // Spaced variations
    "puta mo", "putang ina", "putang ina mo", "tang ina", "tang ina mo", "gago ka", "tanga ka",
    "tae mo", "taena mo", "hayop ka", "leche ka", "bobo ka", "tangina mo", "ina mo",
    "putangina mo",
    // Masked spellings
    "p*ta", "p*tangina", "g*go", "t*ngina", "f*ck", "p*kyu", "puñeta",
];

/// A word of the input with the byte range of its core (edge punctuation removed).
struct Token {
    start: usize,
    end: usize,
    raw: String,
    plain: String,
}

fn is_edge_punctuation(c: char) -> bool {
    !(c.is_alphanumeric() || matches!(c, '*' | '@' | '$'))
}

/// Undo the usual character substitutions (`@` for `a`, `0` for `o`, ...).
fn undo_substitutions(word: &str) -> String {
    word.chars()
        .map(|c| match c {
            '@' | '4' => 'a',
            '0' => 'o',
            '1' | '!' => 'i',
            '3' => 'e',
            '$' | '5' => 's',
            '7' => 't',
            other => other,
        })
        .collect()
}

fn normalize_entry(word: &str) -> Option<String> {
    let normalized = word
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    (!normalized.is_empty()).then_some(normalized)
}

fn tokenize(text: &str) -> Vec<Token> {
    TOKEN_RE
        .find_iter(text)
        .filter_map(|m| {
            let word = m.as_str();
            let without_leading = word.trim_start_matches(is_edge_punctuation);
            let core = without_leading.trim_end_matches(is_edge_punctuation);
            if core.is_empty() {
                return None;
            }
            let start = m.start() + (word.len() - without_leading.len());
            let raw = core.to_lowercase();
            Some(Token {
                start,
                end: start + core.len(),
                plain: undo_substitutions(&raw),
                raw,
            })
        })
        .collect()
}

/// Word and phrase blocklist shared by every request.
pub struct ProfanityFilter {
    words: RwLock<HashSet<String>>,
    word_file: Option<PathBuf>,
}

impl ProfanityFilter {
    /// Built-in English and Tagalog lists, plus the JSON word file when given.
    pub fn new(word_file: Option<PathBuf>) -> Self {
        let filter = Self {
            words: RwLock::new(HashSet::new()),
            word_file,
        };

        filter.add_words(ENGLISH_WORDS.iter().copied());
        filter.add_words(TAGALOG_WORDS.iter().copied());

        if let Some(path) = filter.word_file.as_deref() {
            if path.exists() {
                match load_word_file(path) {
                    Ok(words) => {
                        log::info!("Loaded {} profanity words from {}", words.len(), path.display());
                        filter.add_words(words.iter().map(String::as_str));
                    }
                    Err(e) => log::warn!("Could not load profanity list: {:#}", e),
                }
            }
        }

        filter
    }

    pub fn len(&self) -> usize {
        self.read_words().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_words(&self) -> std::sync::RwLockReadGuard<'_, HashSet<String>> {
        self.words.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add_words<'a>(&self, words: impl IntoIterator<Item = &'a str>) {
        let mut set = self.words.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        set.extend(words.into_iter().filter_map(normalize_entry));
    }

    /// Adds words and appends the new ones to the word file.
    pub fn add_and_save_words(&self, words: &[String]) -> Result<usize> {
        self.add_words(words.iter().map(String::as_str));

        let Some(path) = self.word_file.as_deref() else {
            return Ok(0);
        };

        let mut stored = if path.exists() {
            load_word_file(path)?
        } else {
            Vec::new()
        };

        let mut added = 0;
        for word in words.iter().filter_map(|w| normalize_entry(w)) {
            if !stored.contains(&word) {
                stored.push(word);
                added += 1;
            }
        }

        let json = serde_json::to_string(&stored)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing profanity list {}", path.display()))?;

        Ok(added)
    }

    /// Byte ranges of every blocked word or phrase in `text`.
    fn matches(&self, text: &str) -> Vec<(usize, usize)> {
        let tokens = tokenize(text);
        let words = self.read_words();
        let longest_phrase = words
            .iter()
            .map(|w| w.split(' ').count())
            .max()
            .unwrap_or(1);

        let mut spans = Vec::new();
        for i in 0..tokens.len() {
            for len in 1..=longest_phrase.min(tokens.len() - i) {
                let window = &tokens[i..i + len];
                let raw = window.iter().map(|t| t.raw.as_str()).collect::<Vec<_>>().join(" ");
                let plain = window
                    .iter()
                    .map(|t| t.plain.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");

                if words.contains(&raw) || words.contains(&plain) {
                    spans.extend(window.iter().map(|t| (t.start, t.end)));
                }
            }
        }

        spans.sort_unstable();
        spans.dedup();
        spans
    }

    pub fn contains_profanity(&self, text: &str) -> bool {
        !self.matches(text).is_empty()
    }

    /// Replaces each offending word with `****`, keeping surrounding punctuation.
    pub fn censor(&self, text: &str) -> String {
        let mut censored = String::with_capacity(text.len());
        let mut cursor = 0;
        for (start, end) in self.matches(text) {
            censored.push_str(&text[cursor..start]);
            censored.push_str(CENSOR_MASK);
            cursor = end;
        }
        censored.push_str(&text[cursor..]);
        censored
    }
}

fn load_word_file(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading profanity list {}", path.display()))?;
    let words: Vec<String> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing profanity list {}", path.display()))?;
    Ok(words)
}

/// Thresholds for [`MeaningfulTextRules::check`].
#[derive(Debug, Clone, Copy)]
pub struct MeaningfulTextRules {
    pub min_chars: usize,
    pub min_words: usize,
    pub max_non_alpha_ratio: f64,
}

impl Default for MeaningfulTextRules {
    fn default() -> Self {
        Self {
            min_chars: 5,
            min_words: 3,
            max_non_alpha_ratio: 0.5,
        }
    }
}

impl MeaningfulTextRules {
    pub fn check(&self, text: &str, filter: &ProfanityFilter) -> bool {
        let trimmed = text.trim();
        if trimmed.chars().count() < self.min_chars {
            return false;
        }

        let normalized = trimmed.to_lowercase();
        let words: Vec<&str> = normalized.split_whitespace().collect();
        if words.len() < self.min_words {
            return false;
        }

        if !normalized.chars().any(char::is_alphabetic) {
            return false;
        }

        let total = normalized.chars().count();
        let non_alpha = normalized
            .chars()
            .filter(|c| !c.is_alphabetic() && !c.is_whitespace())
            .count();
        if non_alpha as f64 / total as f64 > self.max_non_alpha_ratio {
            return false;
        }

        if filter.contains_profanity(&normalized) {
            return false;
        }

        // Single words, pairs and triples
        for size in 1..=3 {
            if words
                .windows(size)
                .any(|window| filter.contains_profanity(&window.join(" ")))
            {
                return false;
            }
        }

        true
    }
}

pub fn is_meaningful_text(text: &str, filter: &ProfanityFilter) -> bool {
    MeaningfulTextRules::default().check(text, filter)
}

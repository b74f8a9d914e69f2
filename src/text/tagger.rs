use regex::Regex;
use std::fmt;

/// Part-of-speech tags the ingredient reducer cares about, using the Penn
/// Treebank vocabulary. Anything else is carried through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosTag {
    /// NN
    Noun,
    /// NNS
    PluralNoun,
    /// NNP
    ProperNoun,
    /// JJ
    Adjective,
    /// CD
    Cardinal,
    Other(String),
}

impl PosTag {
    pub fn from_penn(tag: &str) -> Self {
        match tag {
            "NN" => PosTag::Noun,
            "NNS" => PosTag::PluralNoun,
            "NNP" => PosTag::ProperNoun,
            "JJ" => PosTag::Adjective,
            "CD" => PosTag::Cardinal,
            other => PosTag::Other(other.to_string()),
        }
    }

    pub fn as_penn(&self) -> &str {
        match self {
            PosTag::Noun => "NN",
            PosTag::PluralNoun => "NNS",
            PosTag::ProperNoun => "NNP",
            PosTag::Adjective => "JJ",
            PosTag::Cardinal => "CD",
            PosTag::Other(tag) => tag,
        }
    }

    pub fn is_noun(&self) -> bool {
        matches!(self, PosTag::Noun | PosTag::PluralNoun | PosTag::ProperNoun)
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_penn())
    }
}

/// Splits text into words and tags each one.
pub trait Tagger: Send + Sync {
    /// Tag `text` into `(word, tag)` pairs in reading order. Punctuation is
    /// not returned.
    fn tag(&self, text: &str) -> Vec<(String, PosTag)>;
}

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "each", "some", "any", "all", "every", "this", "that", "these", "those",
];

const PREPOSITIONS: &[&str] = &[
    "of", "for", "in", "into", "with", "without", "at", "on", "from", "about", "by", "as", "per",
    "plus", "like", "until", "over", "under",
];

const CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor", "if"];

const NUMBER_WORDS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "dozen",
];

const ADJECTIVES: &[&str] = &[
    "light", "dark", "large", "small", "medium", "fresh", "hot", "cold", "sweet", "sour",
    "whole", "extra", "lean", "thick", "thin", "fine", "coarse", "heavy", "raw", "white",
    "red", "green", "yellow", "black", "ripe", "soft", "firm", "dry", "new", "old", "low",
    "little", "big", "few", "more", "less", "other", "favorite", "plain", "instant", "crisp",
    "crunchy", "creamy", "boneless", "skinless", "seedless", "kosher", "unsweetened",
];

const ADVERBS: &[&str] = &["very", "well", "too", "not", "about", "just", "then", "also", "only"];

/// Words that match a verb or adverb suffix rule but are foods.
const NOUN_EXCEPTIONS: &[&str] = &[
    "pudding", "icing", "stuffing", "dressing", "frosting", "seasoning", "shortening", "filling",
    "topping", "dumpling", "jelly", "seed", "flaxseed", "aniseed", "molasses",
];

/// Irregular past participles common in preparation notes.
const PARTICIPLES: &[&str] = &[
    "beaten", "broken", "cut", "torn", "split", "frozen", "shaken", "drawn", "thawed", "halved",
];

/// A deterministic part-of-speech tagger built from closed-class word lists
/// and suffix rules. Unknown words default to nouns, which suits ingredient
/// lines where most content words name foods or units.
pub struct LexiconTagger {
    token: Regex,
}

impl LexiconTagger {
    pub fn new() -> Self {
        let token = Regex::new(r"\d+(?:[./]\d+)*|[\p{L}]+(?:['\-][\p{L}]+)*")
            .expect("token pattern is valid");
        Self { token }
    }

    fn tag_word(&self, word: &str, position: usize) -> PosTag {
        let lower = word.to_lowercase();
        let lower = lower.as_str();

        if lower.starts_with(|c: char| c.is_ascii_digit()) || NUMBER_WORDS.contains(&lower) {
            return PosTag::Cardinal;
        }
        if lower == "to" {
            return PosTag::Other("TO".to_string());
        }
        if DETERMINERS.contains(&lower) {
            return PosTag::Other("DT".to_string());
        }
        if PREPOSITIONS.contains(&lower) {
            return PosTag::Other("IN".to_string());
        }
        if CONJUNCTIONS.contains(&lower) {
            return PosTag::Other("CC".to_string());
        }
        if ADVERBS.contains(&lower) {
            return PosTag::Other("RB".to_string());
        }
        if PARTICIPLES.contains(&lower) {
            return PosTag::Other("VBN".to_string());
        }
        if ADJECTIVES.contains(&lower) {
            return PosTag::Adjective;
        }
        if !NOUN_EXCEPTIONS.contains(&lower) {
            if lower.len() > 4 && lower.ends_with("ly") {
                return PosTag::Other("RB".to_string());
            }
            if lower.len() > 3 && lower.ends_with("ed") {
                return PosTag::Other("VBN".to_string());
            }
            if lower.len() > 4 && lower.ends_with("ing") {
                return PosTag::Other("VBG".to_string());
            }
        }
        if position > 0 && word.starts_with(char::is_uppercase) {
            return PosTag::ProperNoun;
        }
        if lower.len() > 2
            && lower.ends_with('s')
            && !lower.ends_with("ss")
            && !lower.ends_with("us")
            && !NOUN_EXCEPTIONS.contains(&lower)
        {
            return PosTag::PluralNoun;
        }
        PosTag::Noun
    }
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, text: &str) -> Vec<(String, PosTag)> {
        self.token
            .find_iter(text)
            .enumerate()
            .map(|(i, m)| {
                let word = m.as_str();
                (word.to_string(), self.tag_word(word, i))
            })
            .collect()
    }
}

use crate::error::{Result, ScrapeError};
use crate::text::tagger::{PosTag, Tagger};
use log::debug;
use regex::Regex;
use std::sync::Arc;

/// A sub-phrase that never names the ingredient itself.
struct NoiseRule {
    pattern: Regex,
    /// Replace the match with "of" instead of deleting it outright, so the
    /// words on either side stay separated by a non-noun.
    splice_of: bool,
}

/// Applied in this order, each at most once per line.
const NOISE_PATTERNS: &[(&str, bool)] = &[
    (r"\([^)]*\)", false),
    (r"(?i)\boptional\b", true),
    (r"(?i)\bwarm\b", true),
    (r"(?i)\broom temperature\b", true),
    (r"(?i)\bpackages?\b", true),
    (r"(?i)\bstiffly beaten\b", true),
    (r"(?i)\bfrying\b", true),
    (r"(?i)\btablespoons?\b", true),
    (r"(?i)\bteaspoons?\b", true),
    (r"(?i)\bsuch\b", true),
];

/// What the right-to-left scan saw one step earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prev {
    Start,
    Noun,
    /// A noun directly following (in scan order) another noun.
    SecondNoun,
    Adjective,
    Other,
}

/// Reduces a free-text ingredient line to its base ingredient noun phrase,
/// e.g. `"2 tablespoons light brown sugar, packed"` becomes `"brown sugar "`.
///
/// Every word of the result is followed by a single space.
pub struct IngredientReducer {
    tagger: Arc<dyn Tagger>,
    rules: Vec<NoiseRule>,
}

impl IngredientReducer {
    pub fn new(tagger: Arc<dyn Tagger>) -> Self {
        let rules = NOISE_PATTERNS
            .iter()
            .map(|(pattern, splice_of)| NoiseRule {
                pattern: Regex::new(pattern).expect("noise pattern is valid"),
                splice_of: *splice_of,
            })
            .collect();
        Self { tagger, rules }
    }

    /// Remove parentheticals and preparation phrases.
    pub fn strip_noise(&self, line: &str) -> String {
        let mut text = line.to_string();
        for rule in &self.rules {
            let replacement = if rule.splice_of { "of" } else { "" };
            text = rule.pattern.replacen(&text, 1, replacement).into_owned();
        }
        text.trim().to_string()
    }

    pub fn reduce(&self, raw_line: &str) -> Result<String> {
        let text = self.strip_noise(raw_line);
        let mut tagged = self.tagger.tag(&text);
        tagged.reverse();

        let mut nouns = tagged.iter().filter(|(_, tag)| tag.is_noun());
        if let (Some((noun, _)), None) = (nouns.next(), nouns.next()) {
            return Ok(format!("{noun} "));
        }

        let mut phrase: Vec<&str> = Vec::new();
        let mut noun_count = 0;
        let mut prev = Prev::Start;

        for (word, tag) in &tagged {
            match tag {
                PosTag::Cardinal => {
                    // The last word picked up was a unit sitting between the
                    // quantity and the ingredient.
                    let unit_captured = matches!(prev, Prev::Adjective | Prev::SecondNoun)
                        || (prev == Prev::Noun && noun_count > 1);
                    if unit_captured {
                        phrase.pop();
                    }
                    return finish(phrase, raw_line);
                }
                PosTag::Adjective if noun_count > 0 => return finish(phrase, raw_line),
                PosTag::Adjective => {
                    phrase.push(word);
                    prev = Prev::Adjective;
                }
                tag if tag.is_noun() => {
                    phrase.push(word);
                    noun_count += 1;
                    prev = match prev {
                        Prev::Noun | Prev::SecondNoun => Prev::SecondNoun,
                        _ => Prev::Noun,
                    };
                }
                _ => prev = Prev::Other,
            }
        }

        debug!("No quantity or descriptor terminated '{}'", raw_line);
        finish(phrase, raw_line)
    }
}

/// Restore reading order and join.
fn finish(mut phrase: Vec<&str>, raw_line: &str) -> Result<String> {
    if phrase.is_empty() {
        return Err(ScrapeError::Ingredient(raw_line.to_string()));
    }
    phrase.reverse();
    Ok(phrase.iter().map(|word| format!("{word} ")).collect())
}

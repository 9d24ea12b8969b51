//! Content extractor: outline, word statistics, readability and keywords

use crate::document::Document;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Letters treated as vowels by the syllable heuristic
const VOWELS: &str = "aeiouy";

/// Title, meta description and heading texts of a page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageOutline {
    pub title: String,
    pub meta_description: String,
    pub h1_tags: Vec<String>,
    pub h2_tags: Vec<String>,
    pub h3_tags: Vec<String>,
}

/// Word, sentence and readability statistics of the page text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFeatures {
    pub word_count: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    /// Rounded to one decimal
    pub avg_words_per_sentence: f64,
    /// Rounded to two decimals
    pub avg_syllables_per_word: f64,
    /// Flesch Reading Ease, 0..=100
    pub readability_score: u32,
    /// Top keywords mapped to their percentage of all words, one decimal
    pub keyword_density: BTreeMap<String, f64>,
}

/// Extracts the title, meta description and h1-h3 texts
pub fn extract_outline(doc: &Document) -> PageOutline {
    let title = doc
        .select_first("title")
        .map(|el| doc.text(el).trim().to_string())
        .unwrap_or_default();

    let meta_description = doc
        .first_where("meta", |el| el.attr_is("name", "description"))
        .and_then(|el| el.attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default();

    PageOutline {
        title,
        meta_description,
        h1_tags: headings(doc, "h1"),
        h2_tags: headings(doc, "h2"),
        h3_tags: headings(doc, "h3"),
    }
}

fn headings(doc: &Document, tag: &str) -> Vec<String> {
    doc.select_all(tag)
        .map(|el| doc.text(el).trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Computes word statistics over the noise-free page text
///
/// Words are whitespace tokens longer than two characters. With no words,
/// every derived metric is zero.
pub fn extract_content(doc: &Document, keyword_limit: usize) -> ContentFeatures {
    let text = doc.content_text();
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|word| word.chars().count() > 2)
        .collect();

    let paragraphs = doc.count("p");
    let sentences = text
        .split(['.', '!', '?'])
        .filter(|fragment| !fragment.trim().is_empty())
        .count();

    if words.is_empty() {
        return ContentFeatures {
            sentences,
            paragraphs,
            ..Default::default()
        };
    }

    let word_count = words.len();
    let avg_words_per_sentence = if sentences > 0 {
        word_count as f64 / sentences as f64
    } else {
        0.0
    };
    let avg_syllables_per_word = words
        .iter()
        .map(|word| f64::from(count_syllables(word)))
        .sum::<f64>()
        / word_count as f64;

    let readability = flesch_reading_ease(avg_words_per_sentence, avg_syllables_per_word);

    ContentFeatures {
        word_count,
        sentences,
        paragraphs,
        avg_words_per_sentence: round_to(avg_words_per_sentence, 1),
        avg_syllables_per_word: round_to(avg_syllables_per_word, 2),
        readability_score: readability.round() as u32,
        keyword_density: keyword_density(&words, keyword_limit),
    }
}

/// Estimates syllables by counting transitions into a vowel group
///
/// A trailing `e` is treated as silent. Every word has at least one syllable.
///
/// ```
/// use sumi_lens::extract::content::count_syllables;
///
/// assert_eq!(count_syllables("reading"), 2);
/// assert_eq!(count_syllables("make"), 1);
/// assert_eq!(count_syllables("the"), 1);
/// ```
pub fn count_syllables(word: &str) -> u32 {
    let word = word.to_lowercase();
    let mut syllables: i32 = 0;
    let mut previous_was_vowel = false;

    for c in word.chars() {
        let is_vowel = VOWELS.contains(c);
        if is_vowel && !previous_was_vowel {
            syllables += 1;
        }
        previous_was_vowel = is_vowel;
    }

    if word.ends_with('e') {
        syllables -= 1;
    }

    syllables.max(1) as u32
}

/// Flesch Reading Ease, clamped to 0..=100
pub fn flesch_reading_ease(avg_words_per_sentence: f64, avg_syllables_per_word: f64) -> f64 {
    (206.835 - 1.015 * avg_words_per_sentence - 84.6 * avg_syllables_per_word).clamp(0.0, 100.0)
}

/// Picks the most frequent keywords longer than three characters
///
/// Tokens are lowercased and stripped of non-word characters. When counts tie
/// at the cut-off, earlier words win. Density is relative to all `words`.
pub fn keyword_density(words: &[&str], limit: usize) -> BTreeMap<String, f64> {
    if words.is_empty() {
        return BTreeMap::new();
    }

    // word -> (count, first position)
    let mut frequency: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, word) in words.iter().enumerate() {
        let clean: String = word
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_')
            .collect();

        if clean.chars().count() > 3 {
            frequency.entry(clean).or_insert((0, position)).0 += 1;
        }
    }

    let mut ranked: Vec<(String, usize, usize)> = frequency
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    let total = words.len() as f64;
    ranked
        .into_iter()
        .take(limit)
        .map(|(word, count, _)| (word, round_to(count as f64 / total * 100.0, 1)))
        .collect()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

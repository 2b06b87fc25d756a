//! Sentence segmentation and Flesch reading ease.
//!
//! Deliberately crude heuristics: the grammar check needs sentence
//! boundaries and the readability sub-score needs a Flesch estimate,
//! and both must be deterministic. This is not a language model.

/// Returns a prefix of at most `max_chars` characters, never splitting
/// a UTF-8 code point.
pub fn prefix_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Splits text into trimmed sentences on runs of `.`, `!`, `?`.
/// A trailing fragment without terminal punctuation counts as a sentence.
pub fn segment_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut prev_was_terminal = false;

    for (idx, ch) in text.char_indices() {
        let terminal = matches!(ch, '.' | '!' | '?');
        if prev_was_terminal && !terminal {
            let sentence = text[start..idx].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = idx;
        }
        prev_was_terminal = terminal;
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

/// Flesch reading ease: `206.835 - 1.015*(words/sentences) - 84.6*(syllables/words)`.
/// Returns 0.0 for text with no words.
pub fn flesch_reading_ease(text: &str) -> f64 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }
    let sentence_count = segment_sentences(text).len().max(1);
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
    let word_count = words.len() as f64;

    206.835 - 1.015 * (word_count / sentence_count as f64) - 84.6 * (syllables as f64 / word_count)
}

/// Counts syllables as vowel groups (a, e, i, o, u, y) with a silent
/// trailing `e` dropped, minimum one per word containing letters.
fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if letters.is_empty() {
        return 0;
    }

    let mut groups = 0usize;
    let mut prev_was_vowel = false;
    for &c in &letters {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !prev_was_vowel {
            groups += 1;
        }
        prev_was_vowel = vowel;
    }

    if groups > 1 && letters.ends_with(&['e']) {
        groups -= 1;
    }
    groups.max(1)
}

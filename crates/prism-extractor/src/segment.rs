//! Paragraph and sentence segmentation

use lazy_static::lazy_static;
use regex::Regex;

/// Abbreviations whose trailing period is not a sentence boundary.
const ABBREVIATIONS: &[&str] = &[
    "e.g", "i.e", "etc", "vs", "cf", "approx", "dr", "mr", "mrs", "ms", "no", "vol", "fig",
];

lazy_static! {
    static ref MARKDOWN_STRUCTURAL: Regex =
        Regex::new(r"^\s*(?:#{1,6}\s|```|\||[-*+]\s|\d+\.\s|>)").unwrap();
    static ref META_OPENER: Regex = Regex::new(
        r"(?i)^(?:sure[,!]|certainly[,!]|great question|here(?:'s| is) (?:a|an|the|how|what)|as an ai|i hope this helps|let me know if)"
    )
    .unwrap();
}

/// Split a response into paragraphs at blank-line boundaries.
///
/// Returns (paragraph index, paragraph text) pairs; indices count all
/// paragraphs in the raw response, including ones later filtered away, so
/// they remain stable references into the original.
pub fn split_paragraphs(text: &str) -> Vec<(usize, String)> {
    text.split("\n\n")
        .enumerate()
        .map(|(i, p)| (i, p.trim().to_string()))
        .filter(|(_, p)| !p.is_empty())
        .collect()
}

/// Split a paragraph into sentences at punctuation boundaries, protecting
/// abbreviations and decimal numbers.
pub fn split_sentences(paragraph: &str) -> Vec<String> {
    let chars: Vec<char> = paragraph.chars().collect();
    let mut sentences = Vec::new();
    let mut current = String::new();

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        current.push(c);

        let is_terminal = matches!(c, '.' | '!' | '?');
        if is_terminal && !protected_period(&chars, i, &current) {
            // Consume any run of closing punctuation ('.', ')"', ellipses)
            while i + 1 < chars.len() && matches!(chars[i + 1], '.' | '!' | '?' | ')' | '"' | '”')
            {
                i += 1;
                current.push(chars[i]);
            }
            push_sentence(&mut sentences, &mut current);
        } else if c == '\n' {
            push_sentence(&mut sentences, &mut current);
        }
        i += 1;
    }
    push_sentence(&mut sentences, &mut current);

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    current.clear();
}

/// A period inside a decimal number or after a known abbreviation does not
/// end the sentence.
fn protected_period(chars: &[char], i: usize, current: &str) -> bool {
    if chars[i] != '.' {
        return false;
    }

    // Decimal: digit on both sides
    let prev_digit = i > 0 && chars[i - 1].is_ascii_digit();
    let next_digit = i + 1 < chars.len() && chars[i + 1].is_ascii_digit();
    if prev_digit && next_digit {
        return true;
    }

    // Abbreviation: the word ending here (periods included, trailing period
    // stripped) is in the known set
    let tail: String = current
        .chars()
        .rev()
        .skip(1)
        .take_while(|c| c.is_alphanumeric() || *c == '.')
        .collect::<String>()
        .chars()
        .rev()
        .collect();
    let tail = tail.trim_end_matches('.').to_lowercase();

    // Single-letter tails are initials or the inside of "e.g." / "i.e."
    if tail.chars().count() == 1 && tail.chars().all(|c| c.is_alphabetic()) {
        return true;
    }
    ABBREVIATIONS.contains(&tail.as_str())
}

/// Whether a line is markdown structure rather than prose (headers, fences,
/// tables, list markers, blockquotes).
pub fn is_markdown_structural(line: &str) -> bool {
    MARKDOWN_STRUCTURAL.is_match(line)
}

/// Whether a sentence opens with canned meta-commentary.
pub fn is_meta_opener(sentence: &str) -> bool {
    META_OPENER.is_match(sentence)
}

/// Word count on whitespace boundaries.
pub fn word_count(sentence: &str) -> usize {
    sentence.split_whitespace().count()
}

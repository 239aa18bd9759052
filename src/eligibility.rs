//! Title-based trade eligibility.
//!
//! Data-driven, ordered pattern tables over a tokenized lowercase title:
//! the exclude list short-circuits the allow list. Matching is pure and has
//! no side effects, so the tables stay independently testable.

/// Patterns that make a shift non-tradable regardless of the allow list.
#[derive(Debug, Clone, Copy)]
enum Exclude {
    /// Substring anywhere in the lowercased title.
    Substr(&'static str),
    /// Standalone token.
    Word(&'static str),
    /// Consecutive tokens, also matched fused into one token.
    Seq(&'static [&'static str]),
}

/// Shift-slot vocabulary that makes a shift tradable.
#[derive(Debug, Clone, Copy)]
enum Allow {
    /// Standalone token.
    Word(&'static str),
    /// One of the keywords directly followed by one of the digit tokens
    /// ("day 1", "day-1", "day1", "n2", "a1", ...).
    Numbered(&'static [&'static str], &'static [&'static str]),
    /// Exact consecutive token sequence followed by a digit token
    /// ("pod a 1", "pod-b-2").
    SeqNumbered(&'static [&'static str], &'static [&'static str]),
}

const ONE_TO_THREE: &[&str] = &["1", "2", "3"];
const ONE_TO_TWO: &[&str] = &["1", "2"];

const EXCLUDE_PATTERNS: &[Exclude] = &[
    Exclude::Substr("trauma"),
    Exclude::Substr("ultrasound"),
    Exclude::Word("us"),
    Exclude::Seq(&["sick", "call"]),
];

const ALLOW_PATTERNS: &[Allow] = &[
    Allow::Numbered(&["day", "d"], ONE_TO_THREE),
    Allow::Numbered(&["evening", "eve", "ev", "e"], ONE_TO_THREE),
    Allow::Numbered(&["night", "n"], ONE_TO_THREE),
    Allow::SeqNumbered(&["pod", "a"], ONE_TO_TWO),
    Allow::SeqNumbered(&["pod", "b"], ONE_TO_TWO),
    Allow::Numbered(&["poda", "podb"], ONE_TO_TWO),
    Allow::Word("side"),
    Allow::Numbered(&["a", "b", "c"], ONE_TO_TWO),
];

/// Returns whether a shift with this title may be traded at all.
///
/// Empty or whitespace-only titles are never eligible. Exclude patterns win
/// over allow patterns; table order is significant.
pub fn classify(title: &str) -> bool {
    if title.trim().is_empty() {
        return false;
    }
    let lower = title.to_lowercase();
    let tokens = tokenize(&lower);

    if EXCLUDE_PATTERNS.iter().any(|p| p.matches(&lower, &tokens)) {
        return false;
    }
    ALLOW_PATTERNS.iter().any(|p| p.matches(&tokens))
}

/// Splits on non-alphanumeric characters, then at letter/digit boundaries,
/// so "PodA1" and "pod a 1" tokenize identically.
fn tokenize(lower: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let bytes = lower.as_bytes();
    let mut start = None::<usize>;
    for (i, &b) in bytes.iter().enumerate() {
        let alnum = b.is_ascii_alphanumeric();
        let boundary = match start {
            Some(s) => !alnum || bytes[s].is_ascii_digit() != b.is_ascii_digit(),
            None => false,
        };
        if boundary {
            if let Some(s) = start.take() {
                tokens.push(&lower[s..i]);
            }
        }
        if alnum && start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(&lower[s..]);
    }
    tokens
}

impl Exclude {
    fn matches(&self, lower: &str, tokens: &[&str]) -> bool {
        match self {
            Exclude::Substr(s) => lower.contains(s),
            Exclude::Word(w) => tokens.contains(w),
            Exclude::Seq(seq) => {
                let fused: String = seq.concat();
                tokens.windows(seq.len()).any(|w| w == *seq)
                    || tokens.iter().any(|t| *t == fused)
            }
        }
    }
}

impl Allow {
    fn matches(&self, tokens: &[&str]) -> bool {
        match self {
            Allow::Word(w) => tokens.contains(w),
            Allow::Numbered(words, digits) => tokens.windows(2).any(|pair| {
                words.contains(&pair[0]) && digits.contains(&pair[1])
            }),
            Allow::SeqNumbered(seq, digits) => {
                tokens.windows(seq.len() + 1).any(|w| {
                    w[..seq.len()] == **seq && digits.contains(&w[seq.len()])
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_title_is_not_eligible() {
        assert!(!classify(""));
        assert!(!classify("   "));
    }

    #[test]
    fn slot_vocabulary_is_eligible() {
        assert!(classify("Day 1"));
        assert!(classify("day-2"));
        assert!(classify("D3"));
        assert!(classify("Evening 1"));
        assert!(classify("Eve-3"));
        assert!(classify("E2"));
        assert!(classify("Night 2"));
        assert!(classify("N1"));
        assert!(classify("Pod A 1"));
        assert!(classify("pod-b-2"));
        assert!(classify("PodA1"));
        assert!(classify("PodB 2"));
        assert!(classify("North Side"));
        assert!(classify("A1"));
        assert!(classify("c 2"));
    }

    #[test]
    fn unrecognized_titles_are_not_eligible() {
        assert!(!classify("Staff Meeting"));
        assert!(!classify("Admin"));
        assert!(!classify("Day 4"));
        assert!(!classify("Pod C 1"));
    }

    #[test]
    fn exclude_wins_over_allow() {
        // would match the day-numbering allow pattern
        assert!(!classify("Trauma Day 1"));
        assert!(!classify("Ultrasound D2"));
        assert!(!classify("Sick Call N1"));
    }

    #[test]
    fn excluded_specialties() {
        assert!(!classify("Sick call"));
        assert!(!classify("SickCall"));
        assert!(!classify("US shift A1"));
        assert!(!classify("trauma night 3"));
    }

    #[test]
    fn us_token_requires_word_boundary() {
        // "us" must be a standalone token, not part of a word
        assert!(classify("Sunset side"));
    }
}

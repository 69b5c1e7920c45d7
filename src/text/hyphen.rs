//! Heuristic intra-word break positions for English text.
//!
//! This is not a dictionary hyphenator. Words may break at an existing hyphen
//! (hard or soft), or between a pair of consonants that do not form a common
//! digraph, provided the trailing fragment starts acceptably. Short words and
//! capitalized words never break. Callers who want layout-visible optional
//! breaks usually insert soft hyphens (`\u{00AD}`) at the returned positions
//! before tokenizing.

/// Consonant pairs that are pronounced as a unit and must not be split
const DIGRAPHS: &[[char; 2]] = &[
    ['t', 'h'],
    ['c', 'h'],
    ['s', 'h'],
    ['p', 'h'],
    ['d', 'g'],
    ['w', 'n'],
    ['w', 'h'],
    ['w', 'd'],
    ['w', 'l'],
    ['g', 'h'],
    ['n', 'g'],
    ['s', 'c'],
    ['n', 'x'],
    ['c', 'k'],
    ['k', 'n'],
    ['w', 'r'],
    ['n', 'd'],
    ['t', 'r'],
    ['d', 'r'],
    ['c', 'r'],
    ['l', 'l'],
];

/// Consonant pairs no English word fragment starts with
const BAD_STARTS: &[[char; 2]] = &[
    ['n', 'c'],
    ['b', 'c'],
    ['b', 'z'],
    ['d', 'c'],
    ['d', 'd'],
];

pub fn is_vowel(ch: char) -> bool {
    matches!(ch.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

pub fn is_consonant(ch: char) -> bool {
    ch.is_ascii_alphabetic() && !is_vowel(ch)
}

pub fn is_digraph(a: char, b: char) -> bool {
    let pair = [a.to_ascii_lowercase(), b.to_ascii_lowercase()];
    DIGRAPHS.contains(&pair)
}

/// Whether a word fragment may begin with the pair `a`, `b`
pub fn acceptable_word_start(a: char, b: char) -> bool {
    let pair = [a.to_ascii_lowercase(), b.to_ascii_lowercase()];
    !BAD_STARTS.contains(&pair)
}

/// Returns the index of the character after which `word` may be hyphenated,
/// and whether the break reuses a hyphen already present in the word. Returns
/// None if the word should not be broken.
pub fn intra_word_breakpoint(word: &[char]) -> Option<(usize, bool)> {
    // never break short words
    if word.len() < 5 {
        return None;
    }
    // a word that already contains a hyphen breaks there; hard and soft
    // hyphens are treated alike
    if let Some(i) = word
        .iter()
        .position(|&ch| ch == '\u{002D}' || ch == '\u{00AD}')
    {
        return Some((i, true));
    }
    // never break proper nouns
    if word[0].is_ascii_uppercase() {
        return None;
    }
    // break between consonants that do not form a digraph and do not leave
    // an unacceptable fragment start, keeping at least two characters before
    // the break and four after
    for i in 2..word.len().saturating_sub(4) {
        if !is_consonant(word[i]) || !is_consonant(word[i + 1]) {
            continue;
        }
        if is_digraph(word[i], word[i + 1]) {
            continue;
        }
        if !acceptable_word_start(word[i + 1], word[i + 2]) {
            continue;
        }
        if !word[i + 3].is_ascii_alphabetic() {
            continue;
        }
        return Some((i, false));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bp(word: &str) -> Option<(usize, bool)> {
        let chars: Vec<char> = word.chars().collect();
        intra_word_breakpoint(&chars)
    }

    #[test]
    fn short_words_never_break() {
        assert_eq!(bp("go"), None);
        assert_eq!(bp("word"), None);
    }

    #[test]
    fn existing_hyphen_wins() {
        assert_eq!(bp("well-known"), Some((4, true)));
        assert_eq!(bp("com\u{00AD}pound"), Some((3, true)));
    }

    #[test]
    fn proper_nouns_never_break() {
        assert_eq!(bp("Consonant"), None);
    }

    #[test]
    fn breaks_between_non_digraph_consonants() {
        // "combatant": 'm'+'b' are consonants, "mb" is no digraph, and the
        // fragment "batant" starts acceptably
        assert_eq!(bp("combatant"), Some((2, false)));
    }

    #[test]
    fn digraphs_are_not_split() {
        // the only consonant pair in range is "ch", a digraph
        assert_eq!(bp("beaches"), None);
    }

    #[test]
    fn vowel_classes() {
        assert!(is_vowel('A'));
        assert!(is_vowel('o'));
        assert!(!is_vowel('y'));
        assert!(is_consonant('T'));
        assert!(!is_consonant('e'));
        assert!(!is_consonant('3'));
    }
}

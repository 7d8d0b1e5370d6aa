//! Porter suffix-stripping stemmer
//!
//! Implements the 1980 Porter algorithm with the NLTK extensions the
//! classical models were trained with: an irregular-form table consulted
//! first, words of two letters or fewer left alone, and the extended
//! `ied`/`alli`/`fulli`/`logi` rules.

/// Irregular forms mapped straight to their stems
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("skies", "sky"),
    ("sky", "sky"),
    ("dying", "die"),
    ("lying", "lie"),
    ("tying", "tie"),
    ("news", "news"),
    ("innings", "inning"),
    ("inning", "inning"),
    ("outings", "outing"),
    ("outing", "outing"),
    ("cannings", "canning"),
    ("canning", "canning"),
    ("howe", "howe"),
    ("proceed", "proceed"),
    ("exceed", "exceed"),
    ("succeed", "succeed"),
];

type Condition<'a> = &'a dyn Fn(&str) -> bool;

struct Rule<'a> {
    suffix: &'a str,
    replacement: &'a str,
    condition: Option<Condition<'a>>,
}

fn rule<'a>(suffix: &'a str, replacement: &'a str, condition: Condition<'a>) -> Rule<'a> {
    Rule {
        suffix,
        replacement,
        condition: Some(condition),
    }
}

fn plain<'a>(suffix: &'a str, replacement: &'a str) -> Rule<'a> {
    Rule {
        suffix,
        replacement,
        condition: None,
    }
}

/// Deterministic Porter stemmer
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    pub fn new() -> Self {
        Self
    }

    /// Reduce a word to its stem. Non-ASCII input is only lower-cased.
    pub fn stem(&self, word: &str) -> String {
        let word = word.to_lowercase();

        if let Some((_, stem)) = IRREGULAR_FORMS.iter().find(|(form, _)| *form == word) {
            return (*stem).to_string();
        }
        if word.len() <= 2 || !word.is_ascii() {
            return word;
        }

        let word = step1a(&word);
        let word = step1b(&word);
        let word = step1c(&word);
        let word = step2(&word);
        let word = step3(&word);
        let word = step4(&word);
        let word = step5a(&word);
        step5b(&word)
    }
}

fn is_consonant(word: &[u8], i: usize) -> bool {
    match word[i] {
        b'a' | b'e' | b'i' | b'o' | b'u' => false,
        b'y' => i == 0 || !is_consonant(word, i - 1),
        _ => true,
    }
}

/// Number of vowel-consonant sequences (`m` in Porter's notation)
fn measure(stem: &str) -> usize {
    let bytes = stem.as_bytes();
    let mut count = 0;
    let mut previous_vowel = false;
    for i in 0..bytes.len() {
        let consonant = is_consonant(bytes, i);
        if consonant && previous_vowel {
            count += 1;
        }
        previous_vowel = !consonant;
    }
    count
}

fn has_positive_measure(stem: &str) -> bool {
    measure(stem) > 0
}

fn contains_vowel(stem: &str) -> bool {
    let bytes = stem.as_bytes();
    (0..bytes.len()).any(|i| !is_consonant(bytes, i))
}

fn ends_double_consonant(word: &str) -> bool {
    let bytes = word.as_bytes();
    let n = bytes.len();
    n >= 2 && bytes[n - 1] == bytes[n - 2] && is_consonant(bytes, n - 1)
}

fn ends_cvc(word: &str) -> bool {
    let bytes = word.as_bytes();
    let n = bytes.len();
    (n >= 3
        && is_consonant(bytes, n - 3)
        && !is_consonant(bytes, n - 2)
        && is_consonant(bytes, n - 1)
        && !matches!(bytes[n - 1], b'w' | b'x' | b'y'))
        || (n == 2 && !is_consonant(bytes, 0) && is_consonant(bytes, 1))
}

fn replace_suffix(word: &str, suffix: &str, replacement: &str) -> String {
    let mut stem = word[..word.len() - suffix.len()].to_string();
    stem.push_str(replacement);
    stem
}

/// Apply the first rule whose suffix matches; a failed condition stops the scan.
fn apply_rules(word: &str, rules: &[Rule<'_>]) -> String {
    for rule in rules {
        if rule.suffix == "*d" {
            if ends_double_consonant(word) {
                let stem = &word[..word.len() - 2];
                return match rule.condition {
                    Some(condition) if !condition(stem) => word.to_string(),
                    _ => format!("{}{}", stem, rule.replacement),
                };
            }
            continue;
        }

        if word.ends_with(rule.suffix) {
            let stem = &word[..word.len() - rule.suffix.len()];
            return match rule.condition {
                Some(condition) if !condition(stem) => word.to_string(),
                _ => format!("{}{}", stem, rule.replacement),
            };
        }
    }
    word.to_string()
}

fn step1a(word: &str) -> String {
    if word.ends_with("ies") && word.len() == 4 {
        return replace_suffix(word, "ies", "ie");
    }

    apply_rules(
        word,
        &[
            plain("sses", "ss"),
            plain("ies", "i"),
            plain("ss", "ss"),
            plain("s", ""),
        ],
    )
}

fn step1b(word: &str) -> String {
    if word.ends_with("ied") {
        return if word.len() == 4 {
            replace_suffix(word, "ied", "ie")
        } else {
            replace_suffix(word, "ied", "i")
        };
    }

    if word.ends_with("eed") {
        let stem = &word[..word.len() - 3];
        return if measure(stem) > 0 {
            format!("{}ee", stem)
        } else {
            word.to_string()
        };
    }

    let intermediate = ["ed", "ing"].iter().find_map(|suffix| {
        word.strip_suffix(suffix)
            .filter(|stem| contains_vowel(stem))
    });
    let Some(intermediate) = intermediate else {
        return word.to_string();
    };

    let last = &intermediate[intermediate.len() - 1..];
    let undouble = |_: &str| !matches!(last, "l" | "s" | "z");
    let restore_e = |stem: &str| measure(stem) == 1 && ends_cvc(stem);

    apply_rules(
        intermediate,
        &[
            plain("at", "ate"),
            plain("bl", "ble"),
            plain("iz", "ize"),
            rule("*d", last, &undouble),
            rule("", "e", &restore_e),
        ],
    )
}

fn step1c(word: &str) -> String {
    let preceded_by_consonant =
        |stem: &str| stem.len() > 1 && is_consonant(stem.as_bytes(), stem.len() - 1);

    apply_rules(word, &[rule("y", "i", &preceded_by_consonant)])
}

fn step2(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("alli") {
        if has_positive_measure(stem) {
            return step2(&format!("{}al", stem));
        }
    }

    let positive = |stem: &str| has_positive_measure(stem);
    // the stem keeps the 'l' of "logi" so short stems like "geo" qualify
    let logi = |_: &str| has_positive_measure(&word[..word.len() - 3]);

    apply_rules(
        word,
        &[
            rule("ational", "ate", &positive),
            rule("tional", "tion", &positive),
            rule("enci", "ence", &positive),
            rule("anci", "ance", &positive),
            rule("izer", "ize", &positive),
            rule("bli", "ble", &positive),
            rule("alli", "al", &positive),
            rule("entli", "ent", &positive),
            rule("eli", "e", &positive),
            rule("ousli", "ous", &positive),
            rule("ization", "ize", &positive),
            rule("ation", "ate", &positive),
            rule("ator", "ate", &positive),
            rule("alism", "al", &positive),
            rule("iveness", "ive", &positive),
            rule("fulness", "ful", &positive),
            rule("ousness", "ous", &positive),
            rule("aliti", "al", &positive),
            rule("iviti", "ive", &positive),
            rule("biliti", "ble", &positive),
            rule("fulli", "ful", &positive),
            rule("logi", "log", &logi),
        ],
    )
}

fn step3(word: &str) -> String {
    let positive = |stem: &str| has_positive_measure(stem);

    apply_rules(
        word,
        &[
            rule("icate", "ic", &positive),
            rule("ative", "", &positive),
            rule("alize", "al", &positive),
            rule("iciti", "ic", &positive),
            rule("ical", "ic", &positive),
            rule("ful", "", &positive),
            rule("ness", "", &positive),
        ],
    )
}

fn step4(word: &str) -> String {
    let above_one = |stem: &str| measure(stem) > 1;
    let ion = |stem: &str| measure(stem) > 1 && (stem.ends_with('s') || stem.ends_with('t'));

    apply_rules(
        word,
        &[
            rule("al", "", &above_one),
            rule("ance", "", &above_one),
            rule("ence", "", &above_one),
            rule("er", "", &above_one),
            rule("ic", "", &above_one),
            rule("able", "", &above_one),
            rule("ible", "", &above_one),
            rule("ant", "", &above_one),
            rule("ement", "", &above_one),
            rule("ment", "", &above_one),
            rule("ent", "", &above_one),
            rule("ion", "", &ion),
            rule("ou", "", &above_one),
            rule("ism", "", &above_one),
            rule("ate", "", &above_one),
            rule("iti", "", &above_one),
            rule("ous", "", &above_one),
            rule("ive", "", &above_one),
            rule("ize", "", &above_one),
        ],
    )
}

fn step5a(word: &str) -> String {
    if let Some(stem) = word.strip_suffix('e') {
        let m = measure(stem);
        if m > 1 || (m == 1 && !ends_cvc(stem)) {
            return stem.to_string();
        }
    }
    word.to_string()
}

fn step5b(word: &str) -> String {
    let drop_l = |_: &str| measure(&word[..word.len() - 1]) > 1;

    apply_rules(word, &[rule("ll", "l", &drop_l)])
}

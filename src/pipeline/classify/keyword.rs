//! Function-word frequency matcher.
//!
//! Scores each language by how many of its common short words appear in the
//! segment, plus a bonus for language-specific diacritics. Declines when no
//! language scores, or when the top score is shared.

use super::types::{check_input, has_alphabetic, ClassifierError, LanguageClassifier, LanguageTag, Vote};

pub const KEYWORD_CLASSIFIER_ID: &str = "keyword";

const LATIN_INDICATORS: &[&str] = &[
    "et", "est", "non", "cum", "ut", "sed", "quod", "qui", "quae", "atque", "ab", "ex", "sunt",
    "erat", "erant", "enim", "autem", "nec", "neque", "esse", "etiam", "hic", "ille", "inter",
    "quam", "nihil", "ac", "eius", "deus", "omnis", "omnes", "apud", "super",
];

const ENGLISH_INDICATORS: &[&str] = &[
    "the", "and", "of", "to", "is", "was", "for", "that", "with", "this", "are", "but", "not",
    "you", "they", "have", "from", "which", "were", "by", "it", "he", "she", "there", "their",
    "would", "will", "been", "who", "upon",
];

const GERMAN_INDICATORS: &[&str] = &[
    "der", "die", "das", "und", "ist", "nicht", "ein", "eine", "einer", "mit", "auf", "den",
    "dem", "sich", "auch", "von", "zu", "war", "ich", "wir", "sie", "es", "nach", "wie", "aber",
    "oder", "noch", "wurde", "werden", "für", "über", "dass",
];

const FRENCH_INDICATORS: &[&str] = &[
    "le", "la", "les", "et", "est", "un", "une", "des", "du", "pour", "dans", "avec", "qui",
    "que", "pas", "sur", "au", "aux", "ce", "cette", "mais", "ou", "il", "elle", "nous", "vous",
    "sont", "été", "être", "était", "l", "d", "qu",
];

const DUTCH_INDICATORS: &[&str] = &[
    "het", "een", "en", "van", "de", "is", "niet", "dat", "die", "met", "voor", "op", "zijn",
    "er", "wij", "ik", "je", "maar", "ook", "als", "naar", "werd", "heeft", "hebben", "bij",
    "om", "dit", "zo", "deze", "geen",
];

const ITALIAN_INDICATORS: &[&str] = &[
    "il", "lo", "gli", "della", "delle", "del", "che", "non", "per", "una", "uno", "sono", "con",
    "come", "più", "anche", "questo", "questa", "nel", "nella", "alla", "degli", "ma", "ed", "è",
    "era", "sulla", "dei", "perché", "così",
];

const GREEK_INDICATORS: &[&str] = &[
    "καὶ", "καί", "και", "ὁ", "ἡ", "τὸ", "τό", "το", "τὸν", "τόν", "τον", "τῶν", "των", "τῆς",
    "της", "ἐν", "εν", "δὲ", "δέ", "δε", "ἦν", "οὐ", "ὅτι", "να", "στο", "στη", "είναι", "που",
    "μια", "ένα", "θα", "πρὸς", "αὐτοῦ", "για",
];

fn indicators(tag: LanguageTag) -> &'static [&'static str] {
    match tag {
        LanguageTag::Latin => LATIN_INDICATORS,
        LanguageTag::English => ENGLISH_INDICATORS,
        LanguageTag::German => GERMAN_INDICATORS,
        LanguageTag::French => FRENCH_INDICATORS,
        LanguageTag::Dutch => DUTCH_INDICATORS,
        LanguageTag::Italian => ITALIAN_INDICATORS,
        LanguageTag::Greek => GREEK_INDICATORS,
    }
}

fn is_marked_diacritic(tag: LanguageTag, ch: char) -> bool {
    match tag {
        LanguageTag::French => matches!(
            ch,
            'é' | 'è' | 'ê' | 'ë' | 'ç' | 'ù' | 'û' | 'î' | 'ï' | 'ô' | 'â' | 'œ'
        ),
        LanguageTag::German => matches!(ch, 'ä' | 'ö' | 'ü' | 'ß'),
        LanguageTag::Italian => matches!(ch, 'ò' | 'ì'),
        _ => false,
    }
}

#[derive(Debug, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    /// Per-language score in `LanguageTag::ALL` order.
    pub fn scores(&self, text: &str) -> Vec<(LanguageTag, u32)> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphabetic())
            .filter(|w| !w.is_empty())
            .collect();

        LanguageTag::ALL
            .iter()
            .map(|&tag| {
                let list = indicators(tag);
                let hits = words.iter().filter(|w| list.contains(w)).count() as u32;
                (tag, hits + count_diacritics(tag, &lower))
            })
            .collect()
    }
}

/// Each 2 diacritics = 1 point.
fn count_diacritics(tag: LanguageTag, lower_text: &str) -> u32 {
    let count = lower_text
        .chars()
        .filter(|&ch| is_marked_diacritic(tag, ch))
        .count() as u32;
    count / 2
}

impl LanguageClassifier for KeywordClassifier {
    fn id(&self) -> &str {
        KEYWORD_CLASSIFIER_ID
    }

    fn classify(&self, text: &str) -> Result<Vote, ClassifierError> {
        check_input(text)?;
        if !has_alphabetic(text) {
            return Ok(Vote::NoOpinion);
        }

        let mut scores = self.scores(text);
        scores.sort_by(|a, b| b.1.cmp(&a.1));

        Ok(match scores.as_slice() {
            [(tag, top), (_, second), ..] if *top > 0 && top > second => Vote::Label(*tag),
            _ => Vote::NoOpinion,
        })
    }
}

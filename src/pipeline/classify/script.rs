//! Unicode script and orthography heuristic.
//!
//! Greek is decided by script alone. Latin-script languages are only voted
//! for when the segment carries letters or digraphs specific to one of them;
//! plain ASCII text gets no opinion.

use super::types::{check_input, has_alphabetic, ClassifierError, LanguageClassifier, LanguageTag, Vote};

pub const SCRIPT_CLASSIFIER_ID: &str = "script";

/// Minimum marker score before a Latin-script language is voted for.
const MIN_MARKER_SCORE: u32 = 2;

const MARKERS: &[(LanguageTag, &[(&str, u32)])] = &[
    (LanguageTag::Latin, &[("æ", 3), ("ae ", 1)]),
    (LanguageTag::German, &[("ß", 3), ("ä", 2), ("ö", 2), ("ü", 2)]),
    (
        LanguageTag::French,
        &[
            ("ç", 2),
            ("œ", 3),
            ("ê", 2),
            ("â", 2),
            ("î", 2),
            ("û", 2),
            ("è", 1),
            ("é", 1),
        ],
    ),
    (LanguageTag::Dutch, &[("ij", 2), ("aa", 1), ("uu", 1)]),
    (LanguageTag::Italian, &[("ò", 2), ("ì", 2), ("gli ", 1), ("zione", 2)]),
];

fn is_greek(ch: char) -> bool {
    matches!(ch, '\u{0370}'..='\u{03FF}' | '\u{1F00}'..='\u{1FFF}')
}

#[derive(Debug, Default)]
pub struct ScriptClassifier;

impl ScriptClassifier {
    fn marker_vote(lower_text: &str) -> Vote {
        let mut scores: Vec<(LanguageTag, u32)> = MARKERS
            .iter()
            .map(|(tag, markers)| {
                let score = markers
                    .iter()
                    .map(|(marker, weight)| lower_text.matches(marker).count() as u32 * weight)
                    .sum::<u32>();
                (*tag, score)
            })
            .collect();
        scores.sort_by(|a, b| b.1.cmp(&a.1));

        match scores.as_slice() {
            [(tag, top), (_, second), ..] if *top >= MIN_MARKER_SCORE && top > second => {
                Vote::Label(*tag)
            }
            _ => Vote::NoOpinion,
        }
    }
}

impl LanguageClassifier for ScriptClassifier {
    fn id(&self) -> &str {
        SCRIPT_CLASSIFIER_ID
    }

    fn classify(&self, text: &str) -> Result<Vote, ClassifierError> {
        check_input(text)?;
        if !has_alphabetic(text) {
            return Ok(Vote::NoOpinion);
        }

        let (letters, greek) = text
            .chars()
            .filter(|c| c.is_alphabetic())
            .fold((0usize, 0usize), |(letters, greek), c| {
                (letters + 1, greek + usize::from(is_greek(c)))
            });

        if greek * 2 >= letters {
            return Ok(Vote::Label(LanguageTag::Greek));
        }

        // Trailing space lets word-final markers match at the end of the segment.
        let mut lower = text.to_lowercase();
        lower.push(' ');
        Ok(Self::marker_vote(&lower))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(text: &str) -> Vote {
        ScriptClassifier.classify(text).unwrap()
    }

    #[test]
    fn greek_script_wins_outright() {
        assert_eq!(vote("Ἄνδρα μοι ἔννεπε, μοῦσα"), Vote::Label(LanguageTag::Greek));
        assert_eq!(vote("Αυτό το βιβλίο"), Vote::Label(LanguageTag::Greek));
    }

    #[test]
    fn german_sharp_s_and_umlauts() {
        assert_eq!(vote("ein großer dunkler Wald"), Vote::Label(LanguageTag::German));
    }

    #[test]
    fn french_cedilla_and_circumflex() {
        assert_eq!(vote("la forêt française"), Vote::Label(LanguageTag::French));
    }

    #[test]
    fn dutch_ij_digraph() {
        assert_eq!(vote("Mijn vader zei dat wij zwemmen"), Vote::Label(LanguageTag::Dutch));
    }

    #[test]
    fn italian_grave_accents() {
        assert_eq!(vote("Dio creò i cieli"), Vote::Label(LanguageTag::Italian));
    }

    #[test]
    fn latin_word_final_ae() {
        assert_eq!(vote("incolunt Belgae aliam Aquitani Galliae"), Vote::Label(LanguageTag::Latin));
    }

    #[test]
    fn plain_ascii_is_no_opinion() {
        assert_eq!(vote("In the beginning God created"), Vote::NoOpinion);
        assert_eq!(vote("99 / 100"), Vote::NoOpinion);
    }
}

//! Character-trigram profile ranking (out-of-place distance).
//!
//! Each language profile is the frequency-ranked list of padded word
//! trigrams in its reference text. A segment is ranked the same way and
//! assigned to the profile with the smallest sum of rank displacements;
//! trigrams unknown to a profile cost the maximum displacement.

use std::collections::HashMap;

use super::samples;
use super::types::{check_input, has_alphabetic, ClassifierError, LanguageClassifier, LanguageTag, Vote};

pub const TRIGRAM_CLASSIFIER_ID: &str = "trigram";

/// Maximum number of ranked trigrams kept per profile.
pub const PROFILE_SIZE: usize = 1000;

#[derive(Debug, Clone)]
pub struct TrigramProfile {
    ranks: HashMap<String, usize>,
}

impl TrigramProfile {
    pub fn from_text(text: &str) -> Self {
        let ranks = ranked_trigrams(text)
            .into_iter()
            .enumerate()
            .map(|(rank, trigram)| (trigram, rank))
            .collect();
        Self { ranks }
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    fn rank(&self, trigram: &str) -> Option<usize> {
        self.ranks.get(trigram).copied()
    }

    fn distance(&self, document: &[String]) -> usize {
        document
            .iter()
            .enumerate()
            .map(|(position, trigram)| match self.rank(trigram) {
                Some(rank) => rank.abs_diff(position),
                None => PROFILE_SIZE,
            })
            .sum()
    }
}

pub struct TrigramClassifier {
    profiles: Vec<(LanguageTag, TrigramProfile)>,
}

impl TrigramClassifier {
    pub fn train(references: &[(LanguageTag, &str)]) -> Self {
        let profiles = references
            .iter()
            .map(|(tag, text)| (*tag, TrigramProfile::from_text(text)))
            .filter(|(_, profile)| !profile.is_empty())
            .collect();
        Self { profiles }
    }

    /// Profiles trained on the embedded reference texts.
    pub fn with_builtin_profiles() -> Self {
        Self::train(&samples::reference_texts())
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }
}

impl LanguageClassifier for TrigramClassifier {
    fn id(&self) -> &str {
        TRIGRAM_CLASSIFIER_ID
    }

    fn classify(&self, text: &str) -> Result<Vote, ClassifierError> {
        check_input(text)?;
        if self.profiles.is_empty() {
            return Err(ClassifierError::ClassifierUnavailable(
                "no trigram profiles loaded".to_string(),
            ));
        }
        if !has_alphabetic(text) {
            return Ok(Vote::NoOpinion);
        }

        let document = ranked_trigrams(text);
        if document.is_empty() {
            return Ok(Vote::NoOpinion);
        }
        let worst = document.len() * PROFILE_SIZE;

        let best = self
            .profiles
            .iter()
            .map(|(tag, profile)| (*tag, profile.distance(&document)))
            .min_by_key(|(_, distance)| *distance);

        Ok(match best {
            // Every trigram unknown to every profile: no signal.
            Some((_, distance)) if distance >= worst => Vote::NoOpinion,
            Some((tag, _)) => Vote::Label(tag),
            None => Vote::NoOpinion,
        })
    }
}

fn ranked_trigrams(text: &str) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let lower = text.to_lowercase();

    for word in lower.split(|c: char| !c.is_alphabetic()).filter(|w| !w.is_empty()) {
        let padded: Vec<char> = std::iter::once(' ')
            .chain(word.chars())
            .chain(std::iter::once(' '))
            .collect();
        for window in padded.windows(3) {
            *counts.entry(window.iter().collect()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(PROFILE_SIZE);
    ranked.into_iter().map(|(trigram, _)| trigram).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> TrigramClassifier {
        TrigramClassifier::with_builtin_profiles()
    }

    #[test]
    fn builtin_profiles_cover_every_language() {
        assert_eq!(classifier().profile_count(), LanguageTag::ALL.len());
    }

    #[test]
    fn trigrams_are_padded_and_ranked_by_frequency() {
        let ranked = ranked_trigrams("est est es");
        assert_eq!(ranked[0], " es");
        assert!(ranked.contains(&"st ".to_string()));
        assert!(ranked.contains(&"es ".to_string()));
    }

    #[test]
    fn recognizes_latin() {
        let vote = classifier()
            .classify("Milites autem erant fessi, sed dux non quievit et omnes ad castra duxit.")
            .unwrap();
        assert_eq!(vote, Vote::Label(LanguageTag::Latin));
    }

    #[test]
    fn recognizes_english() {
        let vote = classifier()
            .classify("The children walked home along the old road because their mother wanted them back before it was dark.")
            .unwrap();
        assert_eq!(vote, Vote::Label(LanguageTag::English));
    }

    #[test]
    fn recognizes_german() {
        let vote = classifier()
            .classify("Der alte Mann ging jeden Morgen mit seinem Hund durch den Wald, weil er die frische Luft liebte.")
            .unwrap();
        assert_eq!(vote, Vote::Label(LanguageTag::German));
    }

    #[test]
    fn recognizes_french() {
        let vote = classifier()
            .classify("Les enfants sont allés à l'école avec leurs amis, et ils ont appris beaucoup de choses.")
            .unwrap();
        assert_eq!(vote, Vote::Label(LanguageTag::French));
    }

    #[test]
    fn recognizes_greek() {
        let vote = classifier()
            .classify("ὁ δὲ θεὸς εἶπεν πρὸς τοὺς ἀνθρώπους τῆς πόλεως")
            .unwrap();
        assert_eq!(vote, Vote::Label(LanguageTag::Greek));
    }

    #[test]
    fn no_letters_no_opinion() {
        assert_eq!(classifier().classify("12,5 / 40 -- 7").unwrap(), Vote::NoOpinion);
    }

    #[test]
    fn unknown_script_no_opinion() {
        assert_eq!(classifier().classify("съешь же ещё").unwrap(), Vote::NoOpinion);
    }

    #[test]
    fn empty_model_is_unavailable() {
        let empty = TrigramClassifier::train(&[]);
        assert!(matches!(
            empty.classify("Hic liber est"),
            Err(ClassifierError::ClassifierUnavailable(_))
        ));
    }
}

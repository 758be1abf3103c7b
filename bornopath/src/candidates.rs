//! Heuristic base-form candidates for scraped words
//!
//! Scraped pages contain inflected surface forms ("studies", "worked",
//! "making") while a dictionary wants headwords. The generator proposes a short,
//! ordered list of plausible base forms; the enrichment stage then checks each one
//! against real dictionary sources. Nothing here is a real lemmatizer: the rules
//! are cheap suffix edits and false candidates are expected to be filtered out
//! downstream by the existence gate.

use crate::stoplist::StopList;
use std::sync::Arc;

/// Endings after which a stripped `es` is left alone ("boxes", "caches", "horses")
const ES_PROTECTED_ENDINGS: &[char] = &['i', 'u', 'v', 's', 'x', 'z', 'h'];

/// Plural `s` is not stripped from these endings ("glass", "bonus", "basis", "atlas")
const S_PROTECTED_SUFFIXES: &[&str] = &["ss", "us", "is", "as"];

/// Endings after which `ing` most often dropped a silent `e` ("making", "hoping")
const SILENT_E_ENDINGS: &[char] = &['k', 'm', 't', 'p', 'v'];

/// Doubled consonants that are usually part of the stem ("falling", "passed")
const STEM_DOUBLES: &[char] = &['l', 's', 'z', 'f'];

/// Minimum length of any derived base form
const MIN_BASE_LEN: usize = 3;

/// Produces ordered normalization candidates for a single word
#[derive(Debug, Clone, Default)]
pub struct CandidateGenerator {
    stop: Arc<StopList>,
}

impl CandidateGenerator {
    pub fn new(stop: Arc<StopList>) -> Self {
        Self { stop }
    }

    /// Generate the candidate list for `word`
    ///
    /// The first entry is always the lowercased word itself. Base forms follow in
    /// rule order: the plural family (`ies`, `es`, `s`, at most one of them), then
    /// `ed`, then `ing`. A base form is appended only once and never when it is a
    /// stop-listed word.
    ///
    /// # Example
    ///
    /// ```
    /// use bornopath::CandidateGenerator;
    ///
    /// let generator = CandidateGenerator::default();
    /// assert_eq!(generator.generate("Studies"), vec!["studies", "study"]);
    /// assert_eq!(generator.generate("making"), vec!["making", "make"]);
    /// ```
    pub fn generate(&self, word: &str) -> Vec<String> {
        let w = word.trim().to_lowercase();
        let mut base_forms = Vec::new();

        if let Some(base) = self.plural_base(&w) {
            base_forms.push(base);
        }
        base_forms.extend(past_tense_bases(&w));
        base_forms.extend(progressive_bases(&w));

        let mut candidates = vec![w];
        for base in base_forms {
            if !candidates.contains(&base) && !self.stop.contains(&base) {
                candidates.push(base);
            }
        }
        candidates
    }

    /// The plural/possessive family: only the first matching suffix class is tried
    fn plural_base(&self, w: &str) -> Option<String> {
        let len = char_len(w);

        if w.ends_with("ies") && len > 4 {
            let base = format!("{}y", &w[..w.len() - 3]);
            return is_valid_base(&base).then_some(base);
        }

        if w.ends_with("es") && len > 3 {
            let base = &w[..w.len() - 2];
            // "changes" would otherwise compete with a filler of the form "<base>e"
            let keeps = is_valid_base(base)
                && !base.ends_with(ES_PROTECTED_ENDINGS)
                && !self.stop.contains(&format!("{base}e"));
            return keeps.then(|| base.to_string());
        }

        if w.ends_with('s') && len > 3 && !S_PROTECTED_SUFFIXES.iter().any(|s| w.ends_with(s)) {
            let base = &w[..w.len() - 1];
            let keeps = is_valid_base(base) && !base.ends_with(['u', 'i']);
            return keeps.then(|| base.to_string());
        }

        None
    }
}

/// `worked` -> `work`, `stopped` -> `stopp`, `stop`
fn past_tense_bases(w: &str) -> Vec<String> {
    let mut bases = Vec::new();
    if w.ends_with("ed") && char_len(w) > 4 {
        let base = &w[..w.len() - 2];
        if is_valid_base(base) {
            bases.push(base.to_string());
            bases.extend(undoubled(base));
        }
    }
    bases
}

/// `making` -> `make`, `reading` -> `read`, `running` -> `runn`, `run`
fn progressive_bases(w: &str) -> Vec<String> {
    let mut bases = Vec::new();
    if w.ends_with("ing") && char_len(w) > 5 {
        let base = &w[..w.len() - 3];
        if is_valid_base(base) {
            if base.ends_with(SILENT_E_ENDINGS) {
                bases.push(format!("{base}e"));
            } else {
                bases.push(base.to_string());
            }
            bases.extend(undoubled(base));
        }
    }
    bases
}

/// Drop one letter of a trailing doubled consonant, if the stem ends in one
fn undoubled(base: &str) -> Option<String> {
    let mut rev = base.chars().rev();
    let (last, before) = (rev.next()?, rev.next()?);
    if last != before || is_vowel(last) || STEM_DOUBLES.contains(&last) {
        return None;
    }
    let shorter = &base[..base.len() - last.len_utf8()];
    is_valid_base(shorter).then(|| shorter.to_string())
}

fn is_valid_base(base: &str) -> bool {
    char_len(base) >= MIN_BASE_LEN && base.chars().all(char::is_alphabetic)
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

//! Verdict labels and the raw-index mapping fixed at training time.
//!
//! The artifact emits a raw class index; which index means "fake" is an
//! external convention, not something to infer from the model. The default
//! mapping (0 = fake, 1 = real) matches the observed training setup and can
//! be overridden per-artifact by a `labels.json` beside the model.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The discrete class predicted for a submitted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Fake,
    Real,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fake => "fake",
            Self::Real => "real",
        }
    }

    /// Headline form for the result card.
    pub fn banner(&self) -> &'static str {
        match self {
            Self::Fake => "FAKE NEWS",
            Self::Real => "REAL NEWS",
        }
    }

    /// Short explanatory caption shown under the confidence figure.
    pub fn caption(&self) -> &'static str {
        match self {
            Self::Fake => {
                "Warning: this article's style and vocabulary are sensational and \
                 inconsistent with standard journalistic structure."
            }
            Self::Real => {
                "This article's structure and vocabulary are consistent with \
                 mainstream news reporting."
            }
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from parsing a `labels.json` override.
#[derive(Debug, Error)]
pub enum LabelMapError {
    #[error("invalid label map JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("label map missing class index {0}")]
    MissingIndex(usize),

    #[error("label map has no entry for the '{0}' class")]
    MissingVerdict(&'static str),
}

/// Mapping from the artifact's raw class indices to verdicts.
///
/// Treated as configuration: structural inference from the model would
/// silently break if the artifact were retrained with swapped labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelMap {
    classes: [Verdict; 2],
}

impl Default for LabelMap {
    /// The observed training convention: 0 = fake, 1 = real.
    fn default() -> Self {
        Self {
            classes: [Verdict::Fake, Verdict::Real],
        }
    }
}

impl LabelMap {
    /// Parse an override of the form `{"0": "fake", "1": "real"}`.
    ///
    /// Both class indices must be present and must map to distinct verdicts.
    pub fn from_json_str(raw: &str) -> Result<Self, LabelMapError> {
        let entries: HashMap<String, Verdict> = serde_json::from_str(raw)?;

        let mut classes = [None, None];
        for (key, verdict) in &entries {
            if let Ok(index) = key.parse::<usize>()
                && index < 2
            {
                classes[index] = Some(*verdict);
            }
        }

        let first = classes[0].ok_or(LabelMapError::MissingIndex(0))?;
        let second = classes[1].ok_or(LabelMapError::MissingIndex(1))?;
        if first == second {
            let missing = match first {
                Verdict::Fake => "real",
                Verdict::Real => "fake",
            };
            return Err(LabelMapError::MissingVerdict(missing));
        }

        Ok(Self {
            classes: [first, second],
        })
    }

    /// Verdict for a raw class index, if the index is in range.
    pub fn verdict(&self, index: usize) -> Option<Verdict> {
        self.classes.get(index).copied()
    }

    /// Raw class index carrying a given verdict.
    pub fn index_of(&self, verdict: Verdict) -> usize {
        if self.classes[0] == verdict { 0 } else { 1 }
    }
}

/// The label/probability pair produced for one submitted document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub verdict: Verdict,
    /// Probability mass assigned to the fake class.
    pub p_fake: f32,
    /// Probability mass assigned to the real class.
    pub p_real: f32,
}

impl Prediction {
    /// Probability of the predicted class, the figure shown to the user.
    pub fn confidence(&self) -> f32 {
        match self.verdict {
            Verdict::Fake => self.p_fake,
            Verdict::Real => self.p_real,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_is_fake_then_real() {
        let map = LabelMap::default();
        assert_eq!(map.verdict(0), Some(Verdict::Fake));
        assert_eq!(map.verdict(1), Some(Verdict::Real));
        assert_eq!(map.verdict(2), None);
        assert_eq!(map.index_of(Verdict::Fake), 0);
        assert_eq!(map.index_of(Verdict::Real), 1);
    }

    #[test]
    fn json_override_swaps_convention() {
        let map = LabelMap::from_json_str(r#"{"0": "real", "1": "fake"}"#).unwrap();
        assert_eq!(map.verdict(0), Some(Verdict::Real));
        assert_eq!(map.verdict(1), Some(Verdict::Fake));
        assert_eq!(map.index_of(Verdict::Fake), 1);
    }

    #[test]
    fn json_matching_default() {
        let map = LabelMap::from_json_str(r#"{"0": "fake", "1": "real"}"#).unwrap();
        assert_eq!(map, LabelMap::default());
    }

    #[test]
    fn missing_index_is_rejected() {
        let err = LabelMap::from_json_str(r#"{"0": "fake"}"#).unwrap_err();
        assert!(matches!(err, LabelMapError::MissingIndex(1)));
    }

    #[test]
    fn duplicate_verdict_is_rejected() {
        let err = LabelMap::from_json_str(r#"{"0": "fake", "1": "fake"}"#).unwrap_err();
        assert!(matches!(err, LabelMapError::MissingVerdict("real")));
    }

    #[test]
    fn unknown_label_string_is_rejected() {
        assert!(LabelMap::from_json_str(r#"{"0": "fake", "1": "satire"}"#).is_err());
    }

    #[test]
    fn confidence_follows_the_predicted_class() {
        let fake = Prediction {
            verdict: Verdict::Fake,
            p_fake: 0.98,
            p_real: 0.02,
        };
        assert!((fake.confidence() - 0.98).abs() < f32::EPSILON);

        let real = Prediction {
            verdict: Verdict::Real,
            p_fake: 0.25,
            p_real: 0.75,
        };
        assert!((real.confidence() - 0.75).abs() < f32::EPSILON);
    }

    #[test]
    fn display_uses_lowercase_labels() {
        assert_eq!(Verdict::Fake.to_string(), "fake");
        assert_eq!(Verdict::Real.to_string(), "real");
    }
}

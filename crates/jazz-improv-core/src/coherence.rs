use crate::profile::IntensityDimensions;
use serde::Serialize;

pub const COHERENT_NOTE: &str = "Intensity profile is coherent";

/// Threshold rules a profile is checked against. Checking only annotates a
/// profile; it never changes the dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoherenceRule {
    /// Dense playing needs silence around it to stay legible.
    IntensityRequiresClarity,
    /// Dense harmony needs a single clear melodic line.
    HarmonicComplexityDrivesPhrasing,
    /// Playing far behind the beat needs harmony to anchor the time.
    DisplacementNeedsHarmonicAnchor,
}

impl CoherenceRule {
    /// Evaluation order; the first violated rule is reported.
    pub const ALL: [CoherenceRule; 3] = [
        Self::IntensityRequiresClarity,
        Self::HarmonicComplexityDrivesPhrasing,
        Self::DisplacementNeedsHarmonicAnchor,
    ];

    pub fn is_violated_by(self, d: &IntensityDimensions) -> bool {
        match self {
            Self::IntensityRequiresClarity => d.note_density > 6 && d.rest_space < 6,
            Self::HarmonicComplexityDrivesPhrasing => {
                d.harmonic_complexity > 7 && d.melodic_singularity < 6
            }
            Self::DisplacementNeedsHarmonicAnchor => {
                d.beat_relationship > 7.0 && d.harmonic_complexity < 4
            }
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::IntensityRequiresClarity => {
                "High note density requires high rest space for legibility"
            }
            Self::HarmonicComplexityDrivesPhrasing => {
                "High harmonic complexity requires high melodic singularity"
            }
            Self::DisplacementNeedsHarmonicAnchor => {
                "Behind-the-beat playing needs harmonic complexity for anchor"
            }
        }
    }
}

/// First rule the dimensions violate, if any.
pub fn first_violation(dimensions: &IntensityDimensions) -> Option<CoherenceRule> {
    CoherenceRule::ALL
        .into_iter()
        .find(|rule| rule.is_violated_by(dimensions))
}

/// `(valid, note)` for a set of dimensions.
pub fn validate(dimensions: &IntensityDimensions) -> (bool, &'static str) {
    match first_violation(dimensions) {
        Some(rule) => (false, rule.message()),
        None => (true, COHERENT_NOTE),
    }
}

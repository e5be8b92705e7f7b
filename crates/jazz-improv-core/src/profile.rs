use crate::coherence;
use crate::types::{IntensityLevel, SoloPhase};
use serde::{Deserialize, Serialize};

/// The six numeric dimensions of a solo's character.
///
/// The first five are integers on the 1-10 scale. `beat_relationship` keeps the
/// exact value of its formula and is not rounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntensityDimensions {
    pub note_density: u8,
    pub rhythmic_subdivision: u8,
    pub harmonic_complexity: u8,
    pub melodic_singularity: u8,
    pub rest_space: u8,
    pub beat_relationship: f64,
}

/// Dimensions annotated with the outcome of the coherence check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntensityProfile {
    #[serde(flatten)]
    pub dimensions: IntensityDimensions,
    pub coherence_valid: bool,
    pub coherence_note: String,
}

impl IntensityProfile {
    pub fn from_dimensions(dimensions: IntensityDimensions) -> Self {
        let (coherence_valid, note) = coherence::validate(&dimensions);
        Self {
            dimensions,
            coherence_valid,
            coherence_note: note.to_string(),
        }
    }
}

/// Phase-driven values before emphasis and rounding.
#[derive(Debug, Clone, Copy)]
struct PhaseBase {
    note_density: f64,
    rhythmic_subdivision: f64,
    harmonic_complexity: f64,
    rest_space: f64,
}

fn phase_base(phase: Option<SoloPhase>, level: f64) -> PhaseBase {
    match phase {
        Some(SoloPhase::Statement) => PhaseBase {
            note_density: 2.0 + level * 0.1,
            rhythmic_subdivision: 2.0 + level * 0.1,
            harmonic_complexity: 1.0 + level * 0.1,
            rest_space: 7.0 - level * 0.2,
        },
        Some(SoloPhase::Development) => PhaseBase {
            note_density: 5.0 + level * 0.3,
            rhythmic_subdivision: 5.0 + level * 0.3,
            harmonic_complexity: 6.0 + level * 0.3,
            rest_space: 4.0 + level * 0.4,
        },
        Some(SoloPhase::Resolution) => PhaseBase {
            note_density: 3.0 + level * 0.2,
            rhythmic_subdivision: 3.0 + level * 0.2,
            harmonic_complexity: 3.0 + level * 0.2,
            rest_space: 6.0 - level * 0.1,
        },
        // unrecognized phase: fixed values, independent of intensity
        None => PhaseBase {
            note_density: 5.0,
            rhythmic_subdivision: 5.0,
            harmonic_complexity: 6.0,
            rest_space: 5.0,
        },
    }
}

/// Round half away from zero onto the 1-10 scale.
fn to_scale(value: f64) -> u8 {
    value.round().clamp(1.0, 10.0) as u8
}

/// Compute the raw dimensions for a phase (`None` when the caller's phase was
/// not recognized), intensity, foundation severity and emphasis flag.
pub fn compute_dimensions(
    phase: Option<SoloPhase>,
    level: IntensityLevel,
    complexity_severity: u8,
    monk_emphasis: bool,
) -> IntensityDimensions {
    let l = level.as_f64();
    let mut base = phase_base(phase, l);

    if monk_emphasis {
        // silence as structure
        base.rest_space = (base.rest_space + 1.5).min(10.0);
        // track the foundation's own severity when the phase runs below it
        let severity = f64::from(complexity_severity);
        if base.harmonic_complexity < severity {
            base.harmonic_complexity = severity * 0.8;
        }
    }

    let melodic_singularity = if level.get() < 5 { 8 } else { 6 };
    let beat_relationship = if monk_emphasis {
        7.0 + l * 0.2
    } else {
        5.0 + l * 0.3
    };

    IntensityDimensions {
        note_density: to_scale(base.note_density),
        rhythmic_subdivision: to_scale(base.rhythmic_subdivision),
        harmonic_complexity: to_scale(base.harmonic_complexity),
        melodic_singularity,
        rest_space: to_scale(base.rest_space),
        beat_relationship,
    }
}

/// [`compute_dimensions`] followed by the coherence check.
pub fn build_intensity_profile(
    phase: Option<SoloPhase>,
    level: IntensityLevel,
    complexity_severity: u8,
    monk_emphasis: bool,
) -> IntensityProfile {
    IntensityProfile::from_dimensions(compute_dimensions(
        phase,
        level,
        complexity_severity,
        monk_emphasis,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ROUND_MIDNIGHT: u8 = 9;

    #[test]
    fn test_development_with_emphasis_at_five() {
        let d = compute_dimensions(
            Some(SoloPhase::Development),
            IntensityLevel::new(5),
            ROUND_MIDNIGHT,
            true,
        );
        assert_eq!(d.note_density, 7);
        assert_eq!(d.rhythmic_subdivision, 7);
        assert_eq!(d.rest_space, 8);
        assert_eq!(d.melodic_singularity, 6);
        assert_relative_eq!(d.beat_relationship, 8.0);
    }

    #[test]
    fn test_statement_without_emphasis_at_five() {
        let d = compute_dimensions(
            Some(SoloPhase::Statement),
            IntensityLevel::new(5),
            ROUND_MIDNIGHT,
            false,
        );
        assert_eq!(d.note_density, 3);
        assert_eq!(d.harmonic_complexity, 2);
        assert_eq!(d.rest_space, 6);
        assert_relative_eq!(d.beat_relationship, 6.5);
    }

    #[test]
    fn test_resolution_at_ten() {
        let d = compute_dimensions(
            Some(SoloPhase::Resolution),
            IntensityLevel::new(10),
            ROUND_MIDNIGHT,
            false,
        );
        assert_eq!(d.note_density, 5);
        assert_eq!(d.harmonic_complexity, 5);
        assert_eq!(d.rest_space, 5);
        assert_eq!(d.melodic_singularity, 6);
    }

    #[test]
    fn test_unrecognized_phase_uses_fixed_values() {
        for level in [1, 5, 10] {
            let d = compute_dimensions(None, IntensityLevel::new(level), 5, false);
            assert_eq!(d.note_density, 5);
            assert_eq!(d.rhythmic_subdivision, 5);
            assert_eq!(d.harmonic_complexity, 6);
            assert_eq!(d.rest_space, 5);
        }

        let d = compute_dimensions(None, IntensityLevel::new(5), ROUND_MIDNIGHT, true);
        assert_eq!(d.rest_space, 7);
        assert_eq!(d.harmonic_complexity, 7);
    }

    #[test]
    fn test_melodic_singularity_switches_at_five() {
        let quiet = compute_dimensions(Some(SoloPhase::Statement), IntensityLevel::new(4), 5, false);
        let loud = compute_dimensions(Some(SoloPhase::Statement), IntensityLevel::new(5), 5, false);
        assert_eq!(quiet.melodic_singularity, 8);
        assert_eq!(loud.melodic_singularity, 6);
    }

    #[test]
    fn test_beat_relationship_is_not_rounded() {
        let plain = compute_dimensions(Some(SoloPhase::Development), IntensityLevel::new(1), 5, false);
        assert_relative_eq!(plain.beat_relationship, 5.3);

        let emphasized = compute_dimensions(Some(SoloPhase::Development), IntensityLevel::new(1), 5, true);
        assert_relative_eq!(emphasized.beat_relationship, 7.2);
    }

    // Emphasis replaces the phase value with 0.8 x severity whenever the phase
    // value is below the severity, even when that lowers it (7.5 -> 7.2).
    #[test]
    fn test_emphasis_can_lower_harmonic_complexity() {
        let plain = compute_dimensions(
            Some(SoloPhase::Development),
            IntensityLevel::new(5),
            ROUND_MIDNIGHT,
            false,
        );
        let emphasized = compute_dimensions(
            Some(SoloPhase::Development),
            IntensityLevel::new(5),
            ROUND_MIDNIGHT,
            true,
        );
        assert_eq!(plain.harmonic_complexity, 8);
        assert_eq!(emphasized.harmonic_complexity, 7);
    }

    #[test]
    fn test_emphasis_leaves_complexity_at_or_above_severity() {
        let d = compute_dimensions(
            Some(SoloPhase::Development),
            IntensityLevel::new(10),
            ROUND_MIDNIGHT,
            true,
        );
        assert_eq!(d.harmonic_complexity, 9);
    }

    #[test]
    fn test_profile_carries_coherence_verdict() {
        let profile = build_intensity_profile(Some(SoloPhase::Statement), IntensityLevel::new(10), 3, true);
        assert_eq!(profile.dimensions.harmonic_complexity, 2);
        assert!(!profile.coherence_valid);
        assert_eq!(
            profile.coherence_note,
            "Behind-the-beat playing needs harmonic complexity for anchor"
        );
    }

    #[test]
    fn test_profile_serializes_flat() {
        let profile = build_intensity_profile(Some(SoloPhase::Development), IntensityLevel::new(5), ROUND_MIDNIGHT, true);
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["note_density"], 7);
        assert_eq!(json["rest_space"], 8);
        assert_eq!(json["beat_relationship"], 8.0);
        assert_eq!(json["coherence_valid"], true);
        assert_eq!(json["coherence_note"], "Intensity profile is coherent");
        assert!(json.get("dimensions").is_none());
    }
}

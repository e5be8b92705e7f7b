use jazz_improv_core::{
    build_intensity_profile, compute_dimensions, EnhancementRequest, IntensityLevel,
    KnowledgeStore, ProfileSynthesizer, SoloPhase,
};
use std::sync::Arc;

const SEVERITIES: [u8; 5] = [9, 8, 4, 3, 5];

fn synthesizer() -> ProfileSynthesizer {
    ProfileSynthesizer::new(Arc::new(KnowledgeStore::builtin().unwrap()))
}

fn levels() -> impl Iterator<Item = IntensityLevel> {
    (1..=10).map(IntensityLevel::new)
}

#[test]
fn test_all_dimensions_stay_on_scale() {
    let phases = [
        None,
        Some(SoloPhase::Statement),
        Some(SoloPhase::Development),
        Some(SoloPhase::Resolution),
    ];
    for phase in phases {
        for level in levels() {
            for severity in SEVERITIES {
                for emphasis in [false, true] {
                    let d = compute_dimensions(phase, level, severity, emphasis);
                    for value in [
                        d.note_density,
                        d.rhythmic_subdivision,
                        d.harmonic_complexity,
                        d.melodic_singularity,
                        d.rest_space,
                    ] {
                        assert!((1..=10).contains(&value), "{phase:?} {level:?}: {value}");
                    }
                    assert!((1.0..=10.0).contains(&d.beat_relationship));
                }
            }
        }
    }
}

#[test]
fn test_development_density_is_monotonic() {
    for severity in SEVERITIES {
        for emphasis in [false, true] {
            let densities: Vec<u8> = levels()
                .map(|l| compute_dimensions(Some(SoloPhase::Development), l, severity, emphasis).note_density)
                .collect();
            assert!(densities.windows(2).all(|w| w[0] <= w[1]), "{densities:?}");
        }
    }
}

#[test]
fn test_resolution_complexity_never_exceeds_development() {
    for level in levels() {
        for severity in SEVERITIES {
            for emphasis in [false, true] {
                let dev = compute_dimensions(Some(SoloPhase::Development), level, severity, emphasis);
                let res = compute_dimensions(Some(SoloPhase::Resolution), level, severity, emphasis);
                assert!(res.harmonic_complexity <= dev.harmonic_complexity);
            }
        }
    }
}

#[test]
fn test_emphasis_never_reduces_rest_space() {
    for phase in SoloPhase::ALL {
        for level in levels() {
            for severity in SEVERITIES {
                let plain = compute_dimensions(Some(phase), level, severity, false);
                let emphasized = compute_dimensions(Some(phase), level, severity, true);
                assert!(emphasized.rest_space >= plain.rest_space);
            }
        }
    }
}

#[test]
fn test_statement_is_sparser_than_development() {
    for level in levels() {
        let statement = build_intensity_profile(Some(SoloPhase::Statement), level, 9, false);
        let development = build_intensity_profile(Some(SoloPhase::Development), level, 9, false);
        assert!(statement.dimensions.note_density < development.dimensions.note_density);
    }
}

#[test]
fn test_hot_sauce_scenario() {
    let result = synthesizer().enhance(
        &EnhancementRequest::new("a bottle of hot sauce")
            .with_foundation("Round Midnight")
            .with_phase("development")
            .with_intensity(5)
            .with_monk_emphasis(true),
    );

    assert_eq!(result.original_prompt, "a bottle of hot sauce");
    assert_eq!(result.solo_phase, "development");
    assert_eq!(result.harmonic_foundation, "Round Midnight");
    assert_eq!(result.intensity_profile.dimensions.note_density, 7);
    assert_eq!(result.intensity_profile.dimensions.rest_space, 8);
    assert!(result.intensity_profile.coherence_valid);
    assert!(result.enhanced_prompt.starts_with("a bottle of hot sauce, "));
    assert!(result.enhanced_prompt.contains("development phase"));
    assert!(result.monk_principles.is_some());
}

#[test]
fn test_statement_scenario_without_emphasis() {
    let result = synthesizer().enhance(
        &EnhancementRequest::new("test")
            .with_phase("statement")
            .with_monk_emphasis(false),
    );
    assert_eq!(result.intensity_profile.dimensions.note_density, 3);
    assert_eq!(result.intensity_profile.dimensions.rest_space, 6);
    assert!(result.monk_principles.is_none());
}

#[test]
fn test_unknown_foundation_falls_back() {
    let result = synthesizer().enhance(&EnhancementRequest::new("test").with_foundation("Blue Monk"));
    assert_eq!(result.harmonic_foundation, "Round Midnight");
}

#[test]
fn test_every_foundation_enhances_under_its_own_name() {
    let synth = synthesizer();
    let names: Vec<String> = synth.store().foundations().iter().map(|f| f.name.clone()).collect();
    for name in names {
        let result = synth.enhance(&EnhancementRequest::new("test image").with_foundation(name.clone()));
        assert_eq!(result.harmonic_foundation, name);
        assert!(result.intensity_profile.coherence_valid);
    }
}

#[test]
fn test_intensity_raises_development_profile() {
    let synth = synthesizer();
    let low = synth.enhance(&EnhancementRequest::new("test").with_intensity(1));
    let high = synth.enhance(&EnhancementRequest::new("test").with_intensity(10));
    let (low, high) = (low.intensity_profile.dimensions, high.intensity_profile.dimensions);
    assert!(high.note_density > low.note_density);
    assert!(high.harmonic_complexity > low.harmonic_complexity);
}

#[test]
fn test_compare_phases_for_round_midnight() {
    let comparison = synthesizer().compare_phases("Round Midnight");
    let statement = comparison.phase_comparison[&SoloPhase::Statement];
    let development = comparison.phase_comparison[&SoloPhase::Development];
    assert!(development.harmonic_complexity >= statement.harmonic_complexity);
    assert_eq!(development.note_density, 7);
}

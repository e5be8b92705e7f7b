use crate::formatter::{compose_prompt, PromptContext};
use crate::knowledge::{KnowledgeStore, DEFAULT_FOUNDATION};
use crate::profile::{build_intensity_profile, IntensityProfile};
use crate::types::{IntensityLevel, SoloPhase};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

pub const TEMPORAL_NOTE: &str = "This visual should feel like it unfolds through time\u{2014}constraint establishing, complexity emerging, then clarity resolving";

/// Intensity used when comparing phases side by side.
pub const COMPARISON_INTENSITY: i64 = 5;

/// Parameters of one prompt enhancement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancementRequest {
    pub base_prompt: String,
    pub harmonic_foundation: String,
    pub solo_phase: String,
    pub intensity_level: i64,
    pub monk_emphasis: bool,
}

impl EnhancementRequest {
    pub fn new(base_prompt: impl Into<String>) -> Self {
        Self {
            base_prompt: base_prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_foundation(mut self, name: impl Into<String>) -> Self {
        self.harmonic_foundation = name.into();
        self
    }

    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.solo_phase = phase.into();
        self
    }

    pub fn with_intensity(mut self, level: i64) -> Self {
        self.intensity_level = level;
        self
    }

    pub fn with_monk_emphasis(mut self, enabled: bool) -> Self {
        self.monk_emphasis = enabled;
        self
    }
}

impl Default for EnhancementRequest {
    fn default() -> Self {
        Self {
            base_prompt: String::new(),
            harmonic_foundation: DEFAULT_FOUNDATION.to_string(),
            solo_phase: SoloPhase::DEFAULT.as_str().to_string(),
            intensity_level: 5,
            monk_emphasis: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhancementResult {
    pub original_prompt: String,
    pub enhanced_prompt: String,
    pub harmonic_foundation: String,
    pub harmonic_characteristic: String,
    pub solo_phase: String,
    pub phase_intention: String,
    pub intensity_profile: IntensityProfile,
    pub sensory_intention: String,
    pub visual_analog: String,
    pub how_it_feels: String,
    /// Visual principle, present when emphasis is on and the phase was recognized.
    pub monk_principles: Option<String>,
    pub monk_sonic_principle: Option<String>,
    pub coherence_note: String,
    pub temporal_note: String,
}

/// The five rounded dimensions reported by a phase comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseIntensitySummary {
    pub note_density: u8,
    pub rhythmic_subdivision: u8,
    pub harmonic_complexity: u8,
    pub melodic_singularity: u8,
    pub rest_space: u8,
}

impl From<&IntensityProfile> for PhaseIntensitySummary {
    fn from(profile: &IntensityProfile) -> Self {
        let d = &profile.dimensions;
        Self {
            note_density: d.note_density,
            rhythmic_subdivision: d.rhythmic_subdivision,
            harmonic_complexity: d.harmonic_complexity,
            melodic_singularity: d.melodic_singularity,
            rest_space: d.rest_space,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseComparison {
    pub harmonic_foundation: String,
    pub phase_comparison: BTreeMap<SoloPhase, PhaseIntensitySummary>,
}

/// Turns caller parameters into intensity profiles and enhanced prompts.
#[derive(Debug, Clone)]
pub struct ProfileSynthesizer {
    store: Arc<KnowledgeStore>,
}

impl ProfileSynthesizer {
    pub fn new(store: Arc<KnowledgeStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    pub fn enhance(&self, request: &EnhancementRequest) -> EnhancementResult {
        let intensity = IntensityLevel::new(request.intensity_level);
        if i64::from(intensity.get()) != request.intensity_level {
            debug!(
                "Intensity {} clamped to {}",
                request.intensity_level,
                intensity.get()
            );
        }

        let foundation = self.store.resolve_foundation(&request.harmonic_foundation);
        if foundation.name != request.harmonic_foundation {
            warn!(
                "Unknown harmonic foundation '{}', falling back to {}",
                request.harmonic_foundation, foundation.name
            );
        }

        let phase = SoloPhase::from_enhancement_input(&request.solo_phase);
        if phase.is_none() {
            warn!(
                "Unknown solo phase '{}', describing it as {}",
                request.solo_phase,
                SoloPhase::DEFAULT
            );
        }
        let phase_spec = self.store.phase(phase.unwrap_or(SoloPhase::DEFAULT));

        let intensity_profile = build_intensity_profile(
            phase,
            intensity,
            foundation.complexity_class.severity(),
            request.monk_emphasis,
        );

        let monk_intent = match phase {
            Some(phase) if request.monk_emphasis => self.store.monk_phase_intent(phase),
            _ => None,
        };

        let enhanced_prompt = compose_prompt(&PromptContext {
            base_prompt: &request.base_prompt,
            solo_phase: &request.solo_phase,
            phase,
            foundation,
            phase_spec,
            intensity,
            monk_principle: monk_intent.map(|intent| intent.visual_equivalent.as_str()),
        });

        EnhancementResult {
            original_prompt: request.base_prompt.clone(),
            enhanced_prompt,
            harmonic_foundation: foundation.name.clone(),
            harmonic_characteristic: foundation.characteristic.clone(),
            solo_phase: request.solo_phase.clone(),
            phase_intention: phase_spec.narrative_role.clone(),
            intensity_profile,
            sensory_intention: phase_spec.sensory_intention.clone(),
            visual_analog: phase_spec.visual_analog.clone(),
            how_it_feels: phase_spec.how_it_feels.clone(),
            monk_principles: monk_intent.map(|intent| intent.visual_equivalent.clone()),
            monk_sonic_principle: monk_intent.map(|intent| intent.sonic.clone()),
            coherence_note: format!(
                "This enhancement maintains the {} phase character: {}",
                request.solo_phase, phase_spec.narrative_role
            ),
            temporal_note: TEMPORAL_NOTE.to_string(),
        }
    }

    /// Profile for one phase of `foundation` with emphasis on, as used by comparisons.
    pub fn phase_profile(&self, phase: SoloPhase, foundation: &str) -> IntensityProfile {
        let foundation = self.store.resolve_foundation(foundation);
        build_intensity_profile(
            Some(phase),
            IntensityLevel::new(COMPARISON_INTENSITY),
            foundation.complexity_class.severity(),
            true,
        )
    }

    pub fn compare_phases(&self, foundation: &str) -> PhaseComparison {
        let resolved = self.store.resolve_foundation(foundation);
        let phase_comparison = SoloPhase::ALL
            .into_iter()
            .map(|phase| {
                let profile = self.phase_profile(phase, &resolved.name);
                (phase, PhaseIntensitySummary::from(&profile))
            })
            .collect();

        PhaseComparison {
            harmonic_foundation: resolved.name.clone(),
            phase_comparison,
        }
    }
}

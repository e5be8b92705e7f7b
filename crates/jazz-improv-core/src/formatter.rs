use crate::types::{HarmonicFoundation, IntensityLevel, PhaseSpecification, SoloPhase};

/// Everything the enhanced prompt is built from.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub base_prompt: &'a str,
    /// The phase as the caller wrote it; echoed in the framing sentence.
    pub solo_phase: &'a str,
    /// `None` when `solo_phase` was not recognized.
    pub phase: Option<SoloPhase>,
    pub foundation: &'a HarmonicFoundation,
    pub phase_spec: &'a PhaseSpecification,
    pub intensity: IntensityLevel,
    pub monk_principle: Option<&'a str>,
}

/// Visual treatment phrases for a phase. Unrecognized phases get the
/// development list.
pub fn phase_descriptors(phase: Option<SoloPhase>, foundation: &HarmonicFoundation) -> Vec<String> {
    match phase.unwrap_or(SoloPhase::DEFAULT) {
        SoloPhase::Statement => vec![
            "sharp focus, established baseline".to_string(),
            "clarity entering, defined edges".to_string(),
            "foundational structure, reference point".to_string(),
            format!("harmonic foundation of {} clarity", foundation.name),
        ],
        SoloPhase::Development => vec![
            "layering, complexity emerging from pattern".to_string(),
            "density increasing yet coherent".to_string(),
            "revealed structure within apparent chaos".to_string(),
            "intense exploration within constraint".to_string(),
            "patterns visible through texture".to_string(),
            format!("exploring {}", foundation.characteristic),
            "mastery accumulating through variation".to_string(),
        ],
        SoloPhase::Resolution => vec![
            "clarity restored, pattern now visible".to_string(),
            "complexity synthesized into unified whole".to_string(),
            "earned knowledge integrated".to_string(),
            "precision and confidence".to_string(),
            format!("returning to {} with understanding", foundation.name),
        ],
    }
}

pub fn intensity_descriptor(level: IntensityLevel) -> &'static str {
    match level.get() {
        1 => "minimal, sparse",
        2 => "restrained, foundational",
        3 => "subtle, emergent",
        4 => "modest, controlled",
        5 => "balanced, moderate",
        6 => "building, intensifying",
        7 => "complex, layered",
        8 => "dense, intricate",
        9 => "extreme, maximum variation",
        10 => "total saturation, complete exploration",
        _ => "moderate",
    }
}

/// Compose the enhanced prompt. The base prompt is inserted verbatim.
pub fn compose_prompt(ctx: &PromptContext<'_>) -> String {
    let descriptors = phase_descriptors(ctx.phase, ctx.foundation);
    let treatment = descriptors
        .iter()
        .take(2)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    let mut enhanced = format!(
        "{}, with the sensory character of a jazz solo in the {} phase: {}. \
         Visual treatment: {}. \
         Intensity profile: {}. \
         The image should feel like it's {}. \
         Visual analog: {}. ",
        ctx.base_prompt,
        ctx.solo_phase,
        ctx.phase_spec.how_it_feels,
        treatment,
        intensity_descriptor(ctx.intensity),
        ctx.phase_spec.sensory_intention,
        ctx.phase_spec.visual_analog,
    );

    if let Some(principle) = ctx.monk_principle {
        enhanced.push_str(&format!("Monk principle: {} ", principle));
    }

    enhanced
}

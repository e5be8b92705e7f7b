// ABOUTME: Tool request types and the JSON each tool returns
// ABOUTME: Kept free of rmcp so tool output can be tested without a transport

use crate::error::Result;
use jazz_improv_core::{
    EnhancementRequest, KnowledgeStore, ProfileSynthesizer, SoloPhase, DEFAULT_FOUNDATION,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EnhancePromptRequest {
    /// The original image description to enhance
    pub base_prompt: String,
    /// Which Monk composition anchors the aesthetic (determines harmonic complexity and characteristic feel)
    #[serde(default = "default_foundation")]
    pub harmonic_foundation: String,
    /// Which phase of the solo: statement (clarity establishing), development (complexity exploring), resolution (mastery integrating)
    #[serde(default = "default_phase")]
    pub solo_phase: String,
    /// Intensity scale 1-10. Higher means more note density, complexity and dissonance
    #[serde(default = "default_intensity")]
    pub intensity_level: i64,
    /// Emphasize Monk principles: dissonance as truth, silence as structure, behind-the-beat mastery
    #[serde(default = "default_monk_emphasis")]
    pub monk_emphasis: bool,
}

fn default_foundation() -> String {
    DEFAULT_FOUNDATION.to_string()
}

fn default_phase() -> String {
    SoloPhase::DEFAULT.as_str().to_string()
}

fn default_intensity() -> i64 {
    5
}

fn default_monk_emphasis() -> bool {
    true
}

impl From<EnhancePromptRequest> for EnhancementRequest {
    fn from(req: EnhancePromptRequest) -> Self {
        EnhancementRequest {
            base_prompt: req.base_prompt,
            harmonic_foundation: req.harmonic_foundation,
            solo_phase: req.solo_phase,
            intensity_level: req.intensity_level,
            monk_emphasis: req.monk_emphasis,
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct FoundationDetailsRequest {
    /// Name of the harmonic foundation (e.g. 'Round Midnight', 'Evidence')
    pub foundation_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PhaseSpecificationRequest {
    /// Which solo phase: statement, development or resolution
    pub phase_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ComparePhasesRequest {
    /// Which harmonic foundation to compare phases for
    #[serde(default = "default_foundation")]
    pub harmonic_foundation: String,
}

pub fn enhance_prompt_with_jazz(
    synthesizer: &ProfileSynthesizer,
    request: EnhancePromptRequest,
) -> Result<Value> {
    let result = synthesizer.enhance(&request.into());
    Ok(serde_json::to_value(result)?)
}

pub fn list_harmonic_foundations(store: &KnowledgeStore) -> Result<Value> {
    Ok(json!({ "foundations": serde_json::to_value(store.foundations())? }))
}

pub fn get_harmonic_foundation_details(store: &KnowledgeStore, name: &str) -> Result<Value> {
    match store.foundation_details(name) {
        Ok(foundation) => Ok(serde_json::to_value(foundation)?),
        Err(err) => Ok(error_value(err)),
    }
}

pub fn get_phase_specification(store: &KnowledgeStore, phase_name: &str) -> Result<Value> {
    let spec = match store.phase_details(phase_name) {
        Ok(spec) => spec,
        Err(err) => return Ok(error_value(err)),
    };

    Ok(json!({
        "phase": phase_name,
        "narrative_role": spec.narrative_role,
        "sensory_intention": spec.sensory_intention,
        "visual_analog": spec.visual_analog,
        "how_it_feels": spec.how_it_feels,
        "what_happens_musically": spec.what_happens_musically,
    }))
}

pub fn compare_phases_intensity(
    synthesizer: &ProfileSynthesizer,
    foundation: &str,
) -> Result<Value> {
    Ok(serde_json::to_value(synthesizer.compare_phases(foundation))?)
}

/// Principles keyed by name, in catalog order.
pub fn get_monk_principles(store: &KnowledgeStore) -> Result<Value> {
    let principles: Map<String, Value> = store
        .monk_principles()
        .iter()
        .map(|p| {
            (
                p.name.clone(),
                json!({ "statement": p.statement, "manifests_as": p.manifests_as }),
            )
        })
        .collect();

    Ok(json!({ "principles": principles }))
}

pub fn get_natural_transformations(store: &KnowledgeStore) -> Result<Value> {
    Ok(json!({
        "natural_transformations": serde_json::to_value(store.natural_transformations())?,
        "intensity_dimensions": serde_json::to_value(store.intensity_dimensions())?,
        "sensory_bridge": serde_json::to_value(store.sensory_bridge())?,
    }))
}

fn error_value(err: impl std::fmt::Display) -> Value {
    json!({ "error": err.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhance_request_defaults() {
        let req: EnhancePromptRequest =
            serde_json::from_value(json!({ "base_prompt": "a red door" })).unwrap();
        assert_eq!(req.harmonic_foundation, "Round Midnight");
        assert_eq!(req.solo_phase, "development");
        assert_eq!(req.intensity_level, 5);
        assert!(req.monk_emphasis);

        let core: EnhancementRequest = req.into();
        assert_eq!(core, EnhancementRequest::new("a red door"));
    }

    #[test]
    fn test_enhance_request_requires_prompt() {
        let result: std::result::Result<EnhancePromptRequest, _> =
            serde_json::from_value(json!({ "solo_phase": "statement" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_compare_request_defaults_foundation() {
        let req: ComparePhasesRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.harmonic_foundation, "Round Midnight");
    }

    #[test]
    fn test_schema_lists_required_fields() {
        let schema = serde_json::to_value(schemars::schema_for!(FoundationDetailsRequest)).unwrap();
        assert_eq!(schema["required"], json!(["foundation_name"]));
    }
}

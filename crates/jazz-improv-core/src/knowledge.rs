use crate::error::{JazzError, Result};
use crate::types::*;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Foundation substituted whenever a caller names one the catalog does not hold.
pub const DEFAULT_FOUNDATION: &str = "Round Midnight";

pub const CATEGORICAL_FILE: &str = "categorical_structure.yaml";
pub const INTENTIONALITY_FILE: &str = "intentionality_reasoning.yaml";

const BUILTIN_CATEGORICAL: &str = include_str!("../data/categorical_structure.yaml");
const BUILTIN_INTENTIONALITY: &str = include_str!("../data/intentionality_reasoning.yaml");

#[derive(Deserialize)]
struct CategoricalDocument {
    types: CategoricalTypes,
    #[serde(default)]
    natural_transformations: Vec<NaturalTransformation>,
    #[serde(default)]
    monk_anchor_principles: Vec<MonkPrinciple>,
}

#[derive(Deserialize)]
struct CategoricalTypes {
    harmonic_foundation: FoundationCatalog,
    #[serde(default)]
    intensity_arc: DimensionFamily,
    #[serde(default)]
    phrasing_clarity: DimensionFamily,
    #[serde(default)]
    temporal_pacing: DimensionFamily,
}

#[derive(Deserialize)]
struct FoundationCatalog {
    instances: Vec<HarmonicFoundation>,
}

#[derive(Deserialize, Default)]
struct DimensionFamily {
    #[serde(default)]
    dimensions: Vec<DimensionSpec>,
}

#[derive(Deserialize)]
struct IntentionalityDocument {
    phase_1_statement: PhaseRecord,
    phase_2_development: PhaseRecord,
    phase_3_resolution: PhaseRecord,
    #[serde(default)]
    sensory_bridge: Vec<SensoryBridgeEntry>,
    #[serde(default)]
    monk_visual_sensory_intention: MonkIntentions,
}

#[derive(Deserialize)]
struct PhaseRecord {
    narrative_role: String,
    sensory_intention: String,
    #[serde(default = "default_visual_analog")]
    visual_analog: String,
    #[serde(default = "default_how_it_feels")]
    how_it_feels: String,
    what_happens_musically: String,
    #[serde(default)]
    why_it_works: Option<String>,
}

fn default_visual_analog() -> String {
    "layering and coherence".to_string()
}

fn default_how_it_feels() -> String {
    "knowledge unfolding".to_string()
}

impl PhaseRecord {
    fn into_specification(self, phase_id: SoloPhase) -> PhaseSpecification {
        PhaseSpecification {
            phase_id,
            narrative_role: self.narrative_role,
            sensory_intention: self.sensory_intention,
            visual_analog: self.visual_analog,
            how_it_feels: self.how_it_feels,
            what_happens_musically: self.what_happens_musically,
            why_it_works: self.why_it_works,
        }
    }
}

#[derive(Deserialize, Default)]
struct MonkIntentions {
    statement_phase_intent: Option<MonkPhaseIntent>,
    development_phase_intent: Option<MonkPhaseIntent>,
    resolution_phase_intent: Option<MonkPhaseIntent>,
}

/// Read-only catalogs of harmonic foundations and phase specifications.
///
/// Built once from the two catalog documents and never mutated afterwards, so a
/// single instance can be shared behind an `Arc` by any number of readers.
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    foundations: Vec<HarmonicFoundation>,
    phases: [PhaseSpecification; 3],
    monk_intents: [Option<MonkPhaseIntent>; 3],
    monk_principles: Vec<MonkPrinciple>,
    natural_transformations: Vec<NaturalTransformation>,
    intensity_dimensions: Vec<DimensionSpec>,
    sensory_bridge: Vec<SensoryBridgeEntry>,
}

impl KnowledgeStore {
    /// Catalogs bundled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_CATEGORICAL, BUILTIN_INTENTIONALITY)
    }

    /// Load `categorical_structure.yaml` and `intentionality_reasoning.yaml` from `dir`.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let categorical = read_document(&dir.join(CATEGORICAL_FILE))?;
        let intentionality = read_document(&dir.join(INTENTIONALITY_FILE))?;
        info!("Loading catalogs from {}", dir.display());
        Self::from_yaml_str(&categorical, &intentionality)
    }

    pub fn from_yaml_str(categorical: &str, intentionality: &str) -> Result<Self> {
        let categorical: CategoricalDocument = serde_yaml::from_str(categorical)?;
        let intentionality: IntentionalityDocument = serde_yaml::from_str(intentionality)?;

        let CategoricalDocument {
            types,
            natural_transformations,
            monk_anchor_principles,
        } = categorical;
        let CategoricalTypes {
            harmonic_foundation,
            intensity_arc,
            phrasing_clarity,
            temporal_pacing,
        } = types;

        let foundations = harmonic_foundation.instances;
        validate_foundations(&foundations)?;

        let intensity_dimensions = intensity_arc
            .dimensions
            .into_iter()
            .chain(phrasing_clarity.dimensions)
            .chain(temporal_pacing.dimensions)
            .collect();

        let phases = [
            intentionality
                .phase_1_statement
                .into_specification(SoloPhase::Statement),
            intentionality
                .phase_2_development
                .into_specification(SoloPhase::Development),
            intentionality
                .phase_3_resolution
                .into_specification(SoloPhase::Resolution),
        ];

        let intents = intentionality.monk_visual_sensory_intention;
        let store = Self {
            foundations,
            phases,
            monk_intents: [
                intents.statement_phase_intent,
                intents.development_phase_intent,
                intents.resolution_phase_intent,
            ],
            monk_principles: monk_anchor_principles,
            natural_transformations,
            intensity_dimensions,
            sensory_bridge: intentionality.sensory_bridge,
        };

        info!(
            "Catalogs loaded: {} harmonic foundations, {} phases, {} anchor principles",
            store.foundations.len(),
            store.phases.len(),
            store.monk_principles.len()
        );
        Ok(store)
    }

    /// All foundations in catalog order.
    pub fn foundations(&self) -> &[HarmonicFoundation] {
        &self.foundations
    }

    /// Exact (case-sensitive) lookup by name.
    pub fn lookup_foundation(&self, name: &str) -> Option<&HarmonicFoundation> {
        self.foundations.iter().find(|f| f.name == name)
    }

    /// Lookup that falls back to [`DEFAULT_FOUNDATION`] on a miss.
    pub fn resolve_foundation(&self, name: &str) -> &HarmonicFoundation {
        self.lookup_foundation(name).unwrap_or_else(|| {
            debug!("Unknown foundation '{}', using {}", name, DEFAULT_FOUNDATION);
            self.default_foundation()
        })
    }

    pub fn default_foundation(&self) -> &HarmonicFoundation {
        // presence is checked by validate_foundations at load time
        self.lookup_foundation(DEFAULT_FOUNDATION)
            .unwrap_or(&self.foundations[0])
    }

    pub fn foundation_details(&self, name: &str) -> Result<&HarmonicFoundation> {
        self.lookup_foundation(name)
            .ok_or_else(|| JazzError::FoundationNotFound(name.to_string()))
    }

    pub fn phase(&self, phase: SoloPhase) -> &PhaseSpecification {
        &self.phases[phase as usize]
    }

    /// Lookup by any accepted phase name form; `None` when the name is not a phase.
    pub fn lookup_phase(&self, name: &str) -> Option<&PhaseSpecification> {
        SoloPhase::from_name(name).map(|phase| self.phase(phase))
    }

    pub fn phase_details(&self, name: &str) -> Result<&PhaseSpecification> {
        let phase: SoloPhase = name.parse()?;
        Ok(self.phase(phase))
    }

    /// The three phase specifications in narrative order.
    pub fn phases(&self) -> &[PhaseSpecification] {
        &self.phases
    }

    pub fn monk_phase_intent(&self, phase: SoloPhase) -> Option<&MonkPhaseIntent> {
        self.monk_intents[phase as usize].as_ref()
    }

    pub fn monk_principles(&self) -> &[MonkPrinciple] {
        &self.monk_principles
    }

    pub fn natural_transformations(&self) -> &[NaturalTransformation] {
        &self.natural_transformations
    }

    pub fn intensity_dimensions(&self) -> &[DimensionSpec] {
        &self.intensity_dimensions
    }

    pub fn sensory_bridge(&self) -> &[SensoryBridgeEntry] {
        &self.sensory_bridge
    }
}

fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| JazzError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn validate_foundations(foundations: &[HarmonicFoundation]) -> Result<()> {
    if foundations.is_empty() {
        return Err(JazzError::invalid_catalog(
            "harmonic_foundation has no instances",
        ));
    }

    let mut seen = HashSet::new();
    for foundation in foundations {
        if !seen.insert(foundation.name.as_str()) {
            return Err(JazzError::invalid_catalog(format!(
                "duplicate harmonic foundation '{}'",
                foundation.name
            )));
        }
    }

    if !seen.contains(DEFAULT_FOUNDATION) {
        return Err(JazzError::invalid_catalog(format!(
            "default harmonic foundation '{}' is missing",
            DEFAULT_FOUNDATION
        )));
    }

    Ok(())
}

use crate::error::JazzError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Harmonic character of a foundation, as classified in the categorical catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityClass {
    AngularChromatic,
    BebopDense,
    ModalRepetition,
    LyricalSimple,
    /// Any class string the catalog uses that is not one of the above.
    #[serde(other)]
    Unclassified,
}

impl ComplexityClass {
    /// Severity on the 1-10 scale used by the emphasis adjustment.
    pub fn severity(self) -> u8 {
        match self {
            Self::AngularChromatic => 9,
            Self::BebopDense => 8,
            Self::ModalRepetition => 4,
            Self::LyricalSimple => 3,
            Self::Unclassified => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AngularChromatic => "angular_chromatic",
            Self::BebopDense => "bebop_dense",
            Self::ModalRepetition => "modal_repetition",
            Self::LyricalSimple => "lyrical_simple",
            Self::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for ComplexityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three narrative stages of a solo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoloPhase {
    Statement,
    Development,
    Resolution,
}

impl SoloPhase {
    pub const ALL: [SoloPhase; 3] = [Self::Statement, Self::Development, Self::Resolution];

    /// Phase used whenever a caller names a phase we do not know.
    pub const DEFAULT: SoloPhase = Self::Development;

    /// Resolve free-text input. Accepts the plain names, the catalog keys
    /// (`phase_1_statement`) and their short forms (`1_statement`), ignoring
    /// case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        let key = lowered.strip_prefix("phase_").unwrap_or(&lowered);
        match key {
            "statement" | "1_statement" => Some(Self::Statement),
            "development" | "2_development" => Some(Self::Development),
            "resolution" | "3_resolution" => Some(Self::Resolution),
            _ => None,
        }
    }

    /// Strict resolution used for enhancement: case-folded plain names only.
    /// Catalog keys, short forms and padded input are not phases here.
    pub fn from_enhancement_input(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "statement" => Some(Self::Statement),
            "development" => Some(Self::Development),
            "resolution" => Some(Self::Resolution),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Statement => "statement",
            Self::Development => "development",
            Self::Resolution => "resolution",
        }
    }

    /// Key of this phase in the intentionality catalog.
    pub fn catalog_key(self) -> &'static str {
        match self {
            Self::Statement => "phase_1_statement",
            Self::Development => "phase_2_development",
            Self::Resolution => "phase_3_resolution",
        }
    }
}

impl fmt::Display for SoloPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoloPhase {
    type Err = JazzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| JazzError::PhaseNotFound(s.to_string()))
    }
}

/// Intensity on the 1-10 scale. Out-of-range input is clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct IntensityLevel(u8);

impl IntensityLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(level: i64) -> Self {
        Self(level.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl Default for IntensityLevel {
    fn default() -> Self {
        Self(5)
    }
}

impl From<i64> for IntensityLevel {
    fn from(level: i64) -> Self {
        Self::new(level)
    }
}

/// A composition used as the harmonic anchor of a solo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonicFoundation {
    pub name: String,
    #[serde(rename = "complexity")]
    pub complexity_class: ComplexityClass,
    pub key_center: String,
    pub characteristic: String,
    /// Whether the composition is one of Monk's canonical pieces.
    #[serde(rename = "monk_essence", default)]
    pub is_canonical: bool,
}

/// Narrative and sensory description of one solo phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseSpecification {
    pub phase_id: SoloPhase,
    pub narrative_role: String,
    pub sensory_intention: String,
    pub visual_analog: String,
    pub how_it_feels: String,
    pub what_happens_musically: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub why_it_works: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonkPrinciple {
    pub name: String,
    pub statement: String,
    pub manifests_as: String,
}

/// Sonic gesture and its visual counterpart for one phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonkPhaseIntent {
    pub sonic: String,
    pub visual_equivalent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaturalTransformation {
    pub name: String,
    pub description: String,
    pub rule: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionSpec {
    pub name: String,
    pub description: String,
    pub low: String,
    pub high: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensoryBridgeEntry {
    pub musical: String,
    pub visual: String,
}

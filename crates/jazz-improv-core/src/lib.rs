pub mod coherence;
pub mod error;
pub mod formatter;
pub mod knowledge;
pub mod profile;
pub mod synthesizer;
pub mod types;

pub use coherence::{first_violation, CoherenceRule};
pub use error::*;
pub use formatter::{compose_prompt, intensity_descriptor, phase_descriptors, PromptContext};
pub use knowledge::{KnowledgeStore, DEFAULT_FOUNDATION};
pub use profile::*;
pub use synthesizer::*;
pub use types::*;

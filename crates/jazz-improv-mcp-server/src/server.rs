// ABOUTME: rmcp server exposing the jazz prompt enhancement tools
// ABOUTME: Shares one read-only catalog across sessions behind an Arc

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::handlers::{
    self, ComparePhasesRequest, EnhancePromptRequest, FoundationDetailsRequest,
    PhaseSpecificationRequest,
};
use jazz_improv_core::{KnowledgeStore, ProfileSynthesizer};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

pub const SERVER_INSTRUCTIONS: &str = "Jazz improvisation prompt enhancement. \
Call enhance_prompt_with_jazz with a base image prompt, a harmonic foundation \
(list_harmonic_foundations), a solo phase (statement, development or resolution) \
and an intensity from 1 to 10. The lookup tools describe the catalog behind it.";

#[derive(Clone)]
pub struct JazzImprovMcpServer {
    synthesizer: Arc<ProfileSynthesizer>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl JazzImprovMcpServer {
    pub fn new(store: Arc<KnowledgeStore>) -> Self {
        Self {
            synthesizer: Arc::new(ProfileSynthesizer::new(store)),
            tool_router: Self::tool_router(),
        }
    }

    /// Build a server over the catalog the configuration points at.
    pub fn from_config(config: &ServerConfig) -> crate::error::Result<Self> {
        let store = config.knowledge.load_store()?;
        info!(
            "Catalog ready: {} harmonic foundations",
            store.foundations().len()
        );
        Ok(Self::new(Arc::new(store)))
    }

    pub fn store(&self) -> &KnowledgeStore {
        self.synthesizer.store()
    }

    /// Names of the registered tools.
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect()
    }

    #[tool(
        description = "Enhance an image generation prompt with a jazz improvisation aesthetic. Encodes temporal revelation through established harmonic grammar (Monk-centered). Required: base_prompt."
    )]
    async fn enhance_prompt_with_jazz(
        &self,
        params: Parameters<EnhancePromptRequest>,
    ) -> Result<CallToolResult, McpError> {
        let request = params.0;
        debug!(
            "enhance_prompt_with_jazz: foundation={} phase={} intensity={}",
            request.harmonic_foundation, request.solo_phase, request.intensity_level
        );
        json_result(handlers::enhance_prompt_with_jazz(&self.synthesizer, request)?)
    }

    #[tool(
        description = "List all available harmonic foundations (Monk compositions). Each has a specific harmonic complexity and characteristic feel."
    )]
    async fn list_harmonic_foundations(&self) -> Result<CallToolResult, McpError> {
        debug!("list_harmonic_foundations");
        json_result(handlers::list_harmonic_foundations(self.store())?)
    }

    #[tool(
        description = "Get detailed information about a harmonic foundation: complexity, key center and characteristic approach. Required: foundation_name."
    )]
    async fn get_harmonic_foundation_details(
        &self,
        params: Parameters<FoundationDetailsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let request = params.0;
        debug!("get_harmonic_foundation_details: {}", request.foundation_name);
        json_result(handlers::get_harmonic_foundation_details(
            self.store(),
            &request.foundation_name,
        )?)
    }

    #[tool(
        description = "Get the specification for a solo phase: narrative role, what happens musically and how it should feel. Required: phase_name."
    )]
    async fn get_phase_specification(
        &self,
        params: Parameters<PhaseSpecificationRequest>,
    ) -> Result<CallToolResult, McpError> {
        let request = params.0;
        debug!("get_phase_specification: {}", request.phase_name);
        json_result(handlers::get_phase_specification(
            self.store(),
            &request.phase_name,
        )?)
    }

    #[tool(
        description = "Compare intensity profiles (note density, harmonic complexity, rest space...) across all three solo phases for a harmonic foundation."
    )]
    async fn compare_phases_intensity(
        &self,
        params: Parameters<ComparePhasesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let request = params.0;
        debug!("compare_phases_intensity: {}", request.harmonic_foundation);
        json_result(handlers::compare_phases_intensity(
            &self.synthesizer,
            &request.harmonic_foundation,
        )?)
    }

    #[tool(
        description = "Get the Monk anchor principles: constraint as liberation, silence as structure, rhythmic displacement, dissonance as truth."
    )]
    async fn get_monk_principles(&self) -> Result<CallToolResult, McpError> {
        debug!("get_monk_principles");
        json_result(handlers::get_monk_principles(self.store())?)
    }

    #[tool(
        description = "Get the transformation rules that relate phases and intensity, with the meaning of each intensity dimension."
    )]
    async fn get_natural_transformations(&self) -> Result<CallToolResult, McpError> {
        debug!("get_natural_transformations");
        json_result(handlers::get_natural_transformations(self.store())?)
    }
}

fn json_result(value: Value) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(&value).map_err(ServerError::from)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_handler]
impl ServerHandler for JazzImprovMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

//! Pipeline step trait and supporting types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::state::{PipelineState, StateUpdate};
use super::PipelineError;

/// Metadata about a pipeline step.
#[derive(Debug, Clone)]
pub struct StepMetadata {
    /// Unique identifier for this step (e.g., "fetch_recipes")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
}

/// What a step produced: the fields to merge and the step to run next.
#[derive(Debug)]
pub struct StepOutput {
    pub update: StateUpdate,
    pub next_step: Option<&'static str>,
}

/// Record of one executed step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub step_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_step: Option<String>,
}

/// The main trait for pipeline steps.
///
/// Steps read the state produced by earlier steps and return only the fields
/// they own; the executor merges them.
#[async_trait]
pub trait PipelineStep: Send + Sync {
    fn metadata(&self) -> StepMetadata;

    async fn execute(&self, state: &PipelineState) -> Result<StepOutput, PipelineError>;
}

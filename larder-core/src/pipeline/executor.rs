//! Pipeline executor and step registry.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use thiserror::Error;
use tracing::{info_span, Instrument};

use super::state::PipelineState;
use super::step::{PipelineStep, StepResult};
use super::PipelineError;

/// Registry that maps step names to their implementations.
pub struct StepRegistry {
    steps: HashMap<String, Box<dyn PipelineStep>>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self {
            steps: HashMap::new(),
        }
    }

    pub fn register(&mut self, step: Box<dyn PipelineStep>) {
        self.steps.insert(step.metadata().name.to_string(), step);
    }

    pub fn get(&self, name: &str) -> Option<&dyn PipelineStep> {
        self.steps.get(name).map(|s| s.as_ref())
    }
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Final state and per-step records of a successful run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub state: PipelineState,
    pub steps: Vec<StepResult>,
}

/// A run that stopped early.
///
/// `steps` holds every step that ran; when a step itself failed, its record
/// is last and has `success == false`.
#[derive(Error, Debug)]
#[error("Pipeline stopped after {} step(s)", .steps.len())]
pub struct PipelineFailure {
    #[source]
    pub error: PipelineError,
    pub steps: Vec<StepResult>,
}

impl PipelineFailure {
    /// The step whose failure stopped the run, if one was recorded.
    pub fn failed_step(&self) -> Option<&str> {
        self.steps
            .last()
            .filter(|s| !s.success)
            .map(|s| s.step_name.as_str())
    }
}

/// Run a pipeline starting from the given step.
///
/// Each step names the step that runs after it; the run ends when a step
/// returns no successor. The first failing step aborts the run; its error is
/// returned together with the step records so far.
pub async fn run_pipeline(
    first_step_name: &str,
    mut state: PipelineState,
    registry: &StepRegistry,
) -> Result<PipelineOutcome, PipelineFailure> {
    let mut results = Vec::new();
    let mut visited = HashSet::new();
    let mut current_step_name = Some(first_step_name.to_string());

    while let Some(step_name) = current_step_name {
        let Some(step) = registry.get(&step_name) else {
            return Err(PipelineFailure {
                error: PipelineError::UnknownStep(step_name),
                steps: results,
            });
        };
        if !visited.insert(step_name.clone()) {
            return Err(PipelineFailure {
                error: PipelineError::Cycle(step_name),
                steps: results,
            });
        }

        let start = Instant::now();
        let output = step
            .execute(&state)
            .instrument(info_span!("pipeline_step", step = %step_name))
            .await;
        let executed = output.and_then(|output| {
            state.apply(&step_name, output.update)?;
            Ok(output.next_step)
        });
        let duration_ms = start.elapsed().as_millis() as u64;

        match executed {
            Ok(next) => {
                results.push(StepResult {
                    step_name,
                    success: true,
                    error: None,
                    duration_ms,
                    next_step: next.map(str::to_string),
                });
                current_step_name = next.map(str::to_string);
            }
            Err(e) => {
                tracing::warn!(
                    step = %step_name,
                    duration_ms,
                    completed_steps = results.len(),
                    error = %e,
                    "Pipeline step failed"
                );
                results.push(StepResult {
                    step_name,
                    success: false,
                    error: Some(e.to_string()),
                    duration_ms,
                    next_step: None,
                });
                return Err(PipelineFailure {
                    error: e,
                    steps: results,
                });
            }
        }
    }

    Ok(PipelineOutcome {
        state,
        steps: results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::state::StateUpdate;
    use crate::pipeline::step::{StepMetadata, StepOutput};
    use async_trait::async_trait;

    struct Stub {
        name: &'static str,
        next: Option<&'static str>,
        update: fn() -> StateUpdate,
    }

    #[async_trait]
    impl PipelineStep for Stub {
        fn metadata(&self) -> StepMetadata {
            StepMetadata {
                name: self.name,
                description: "stub",
            }
        }

        async fn execute(&self, _state: &PipelineState) -> Result<StepOutput, PipelineError> {
            Ok(StepOutput {
                update: (self.update)(),
                next_step: self.next,
            })
        }
    }

    fn output_update() -> StateUpdate {
        StateUpdate {
            final_output: Some("done".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_follows_next_step_chain() {
        let mut registry = StepRegistry::new();
        registry.register(Box::new(Stub {
            name: "a",
            next: Some("b"),
            update: StateUpdate::default,
        }));
        registry.register(Box::new(Stub {
            name: "b",
            next: None,
            update: output_update,
        }));

        let outcome = run_pipeline("a", PipelineState::new("x", 1), &registry)
            .await
            .unwrap();

        let names: Vec<_> = outcome.steps.iter().map(|s| s.step_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(outcome.steps[0].next_step.as_deref(), Some("b"));
        assert_eq!(outcome.state.final_output(), "done");
    }

    #[tokio::test]
    async fn test_unknown_step_is_an_error() {
        let registry = StepRegistry::new();
        let failure = run_pipeline("missing", PipelineState::new("x", 1), &registry)
            .await
            .unwrap_err();
        assert!(matches!(failure.error, PipelineError::UnknownStep(ref name) if name == "missing"));
        assert!(failure.steps.is_empty());
        assert_eq!(failure.failed_step(), None);
    }

    #[tokio::test]
    async fn test_cycle_is_detected() {
        let mut registry = StepRegistry::new();
        registry.register(Box::new(Stub {
            name: "loop",
            next: Some("loop"),
            update: StateUpdate::default,
        }));
        let failure = run_pipeline("loop", PipelineState::new("x", 1), &registry)
            .await
            .unwrap_err();
        assert!(matches!(failure.error, PipelineError::Cycle(_)));
        // The first pass succeeded before the loop was noticed
        assert_eq!(failure.steps.len(), 1);
        assert!(failure.steps[0].success);
    }

    #[tokio::test]
    async fn test_overwrite_fails_the_step() {
        let mut registry = StepRegistry::new();
        registry.register(Box::new(Stub {
            name: "first",
            next: Some("second"),
            update: output_update,
        }));
        registry.register(Box::new(Stub {
            name: "second",
            next: None,
            update: output_update,
        }));
        let failure = run_pipeline("first", PipelineState::new("x", 1), &registry)
            .await
            .unwrap_err();
        assert!(
            matches!(failure.error, PipelineError::Overwrite { ref step, .. } if step == "second")
        );

        assert_eq!(failure.steps.len(), 2);
        assert!(failure.steps[0].success);
        let failed = &failure.steps[1];
        assert_eq!(failed.step_name, "second");
        assert!(!failed.success);
        assert_eq!(failed.next_step, None);
        assert!(failed
            .error
            .as_deref()
            .unwrap()
            .contains("tried to overwrite final_output"));
        assert_eq!(failure.failed_step(), Some("second"));
    }
}

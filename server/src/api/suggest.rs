use crate::api::ErrorResponse;
use crate::AppState;
use axum::routing::post;
use axum::Router;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use larder_core::validation::DEFAULT_NUM_RECIPES;
use larder_core::{validate_request, PipelineOutcome, StepResult};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

pub const PATH: &str = "/api/suggest";

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SuggestRequest {
    /// Comma-separated ingredients, e.g. "chicken, rice, garlic"
    pub ingredients: String,
    /// How many recipes to generate (1-10)
    #[serde(default = "default_num_recipes")]
    #[schema(minimum = 1, maximum = 10, default = 3)]
    pub num_recipes: u32,
}

fn default_num_recipes() -> u32 {
    DEFAULT_NUM_RECIPES
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InspirationRecipe {
    pub title: String,
    pub instructions: String,
    /// Cosine similarity to the ingredient query
    pub score: f32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StepTrace {
    pub step_name: String,
    pub success: bool,
    pub duration_ms: u64,
}

impl From<StepResult> for StepTrace {
    fn from(step: StepResult) -> Self {
        Self {
            step_name: step.step_name,
            success: step.success,
            duration_ms: step.duration_ms,
        }
    }
}

/// Body of a 503. Steps that ran are listed, the failing one last; internal
/// error details stay in the server log.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SuggestFailure {
    pub error: String,
    pub steps: Vec<StepTrace>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SuggestResponse {
    /// Raw model output, numbered recipes with video links
    pub output: String,
    /// Recipes from the index that were offered as inspiration
    pub retrieved_recipes: Vec<InspirationRecipe>,
    pub steps: Vec<StepTrace>,
}

impl From<PipelineOutcome> for SuggestResponse {
    fn from(outcome: PipelineOutcome) -> Self {
        let retrieved_recipes = outcome
            .state
            .retrieved_recipes()
            .unwrap_or_default()
            .iter()
            .map(|r| InspirationRecipe {
                title: r.title.clone(),
                instructions: r.instructions.clone(),
                score: r.score,
            })
            .collect();

        Self {
            output: outcome.state.final_output().to_string(),
            retrieved_recipes,
            steps: outcome.steps.into_iter().map(StepTrace::from).collect(),
        }
    }
}

/// Suggest recipes for a list of ingredients
///
/// Runs the full pipeline: retrieve similar recipes from the index, then ask
/// the language model for new ideas. Input must be a plain comma-separated
/// list; "and", "or" and "&" are rejected.
#[utoipa::path(
    post,
    path = "/api/suggest",
    tag = "recipes",
    request_body = SuggestRequest,
    responses(
        (status = 200, description = "Generated recipes", body = SuggestResponse),
        (status = 400, description = "Invalid ingredient list or recipe count", body = ErrorResponse),
        (status = 503, description = "Recipe generation unavailable", body = SuggestFailure)
    )
)]
pub async fn suggest(
    State(larder): State<AppState>,
    Json(request): Json<SuggestRequest>,
) -> impl IntoResponse {
    let (ingredients, num_recipes) =
        match validate_request(&request.ingredients, request.num_recipes) {
            Ok(v) => v,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: e.to_string(),
                    }),
                )
                    .into_response();
            }
        };

    match larder.pipeline.run(ingredients, num_recipes).await {
        Ok(outcome) => (StatusCode::OK, Json(SuggestResponse::from(outcome))).into_response(),
        Err(failure) => {
            tracing::error!(
                error = %failure.error,
                failed_step = failure.failed_step().unwrap_or("-"),
                steps = failure.steps.len(),
                "Recipe pipeline failed"
            );
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(SuggestFailure {
                    error: "Recipe generation failed, please try again later".to_string(),
                    steps: failure.steps.into_iter().map(StepTrace::from).collect(),
                }),
            )
                .into_response()
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route(PATH, post(suggest))
}

#[derive(OpenApi)]
#[openapi(
    paths(suggest),
    components(schemas(
        SuggestRequest,
        SuggestResponse,
        SuggestFailure,
        InspirationRecipe,
        StepTrace
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{read_json, test_app, test_app_with};
    use axum::body::Body;
    use axum::http::Request;
    use larder_core::llm::FakeProvider;
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn post_json(body: serde_json::Value) -> Request<Body> {
        Request::post(PATH)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_suggest_returns_generated_recipes() {
        let response = test_app()
            .oneshot(post_json(json!({"ingredients": "chicken, rice, garlic", "num_recipes": 2})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert!(body["output"]
            .as_str()
            .unwrap()
            .contains("YouTube Video Link: https://www.youtube.com/results?search_query="));
        let retrieved = body["retrieved_recipes"].as_array().unwrap();
        assert!(!retrieved.is_empty() && retrieved.len() <= 3);
        assert_eq!(body["steps"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_suggest_defaults_recipe_count() {
        let fake = Arc::new(FakeProvider::with_recipe_responses());
        let response = test_app_with(fake.clone())
            .oneshot(post_json(json!({"ingredients": "eggs, milk"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let prompts = fake.recorded_prompts().await;
        assert!(prompts[0].contains("suggest **3 new"));
    }

    #[tokio::test]
    async fn test_suggest_rejects_conjunctions() {
        let fake = Arc::new(FakeProvider::with_recipe_responses());
        let response = test_app_with(fake.clone())
            .oneshot(post_json(json!({"ingredients": "chicken and rice"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(
            body["error"],
            "Only comma-separated ingredient values are accepted."
        );
        assert!(fake.recorded_prompts().await.is_empty());
    }

    #[tokio::test]
    async fn test_suggest_rejects_bad_count() {
        let response = test_app()
            .oneshot(post_json(json!({"ingredients": "eggs", "num_recipes": 11})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_model_failure_is_503() {
        let response = test_app_with(Arc::new(FakeProvider::new()))
            .oneshot(post_json(json!({"ingredients": "eggs, flour"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = read_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("try again"));

        let steps = body["steps"].as_array().unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0]["success"], true);
        assert_eq!(steps[1]["success"], true);
        assert_eq!(steps[2]["step_name"], "generate_response");
        assert_eq!(steps[2]["success"], false);
    }
}

//! The browser-facing recipe form.
//!
//! `GET /` shows an empty form, `POST /generate` validates and runs the
//! pipeline, `POST /clear` resets the page. Page state travels in the form
//! itself, so the server keeps nothing between requests.

pub mod page;

use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Router};
use larder_core::validate_request;
use larder_core::validation::DEFAULT_NUM_RECIPES;
use serde::Deserialize;

use crate::AppState;
use page::{render_page, Notice, PageState};

const NOTHING_TO_CLEAR: &str = "Nothing to clear yet — please enter ingredients first.";

/// Fields posted by the form.
#[derive(Debug, Deserialize)]
pub struct FormSubmission {
    #[serde(default)]
    pub ingredients: String,
    #[serde(default = "default_num_recipes")]
    pub num_recipes: u32,
    #[serde(default)]
    pub recipe: String,
    #[serde(default)]
    pub generated: bool,
}

fn default_num_recipes() -> u32 {
    DEFAULT_NUM_RECIPES
}

impl From<FormSubmission> for PageState {
    fn from(form: FormSubmission) -> Self {
        Self {
            ingredients: form.ingredients,
            num_recipes: form.num_recipes,
            recipe: form.recipe,
            generated: form.generated,
            notice: None,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
        .route("/clear", post(clear))
}

pub async fn index() -> Html<String> {
    Html(render_page(&PageState::default()))
}

/// Validate the submission and run the pipeline.
///
/// Validation problems and pipeline failures become notices on the page;
/// the previous recipe (if any) stays visible.
pub async fn generate(
    State(larder): State<AppState>,
    Form(form): Form<FormSubmission>,
) -> Html<String> {
    let mut page = PageState::from(form);

    match validate_request(&page.ingredients, page.num_recipes) {
        Err(e) if e.is_warning() => page.notice = Some(Notice::warning(e.to_string())),
        Err(e) => page.notice = Some(Notice::error(e.to_string())),
        Ok((ingredients, num_recipes)) => {
            match larder.pipeline.run(ingredients, num_recipes).await {
                Ok(outcome) => {
                    page.recipe = outcome.state.final_output().to_string();
                    page.generated = true;
                }
                Err(failure) => {
                    tracing::error!(
                        error = %failure.error,
                        failed_step = failure.failed_step().unwrap_or("-"),
                        "Recipe pipeline failed"
                    );
                    page.notice = Some(Notice::error(format!(
                        "An unexpected error occurred: {}",
                        failure.error
                    )));
                }
            }
        }
    }

    Html(render_page(&page))
}

pub async fn clear(Form(form): Form<FormSubmission>) -> Html<String> {
    let mut page = PageState::from(form);

    if page.ingredients.is_empty() && page.recipe.is_empty() {
        page.notice = Some(Notice::info(NOTHING_TO_CLEAR));
    } else {
        page = PageState {
            num_recipes: page.num_recipes,
            ..PageState::default()
        };
    }

    Html(render_page(&page))
}

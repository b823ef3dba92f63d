use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::error::InputError;
use crate::models::{AccountId, Comparison};
use crate::web::render::{self, FormValues};
use crate::web::{AppError, AppState};

/// Submitted comparison form
#[derive(Debug, Clone, Deserialize)]
pub struct CompareForm {
    pub player1_id: String,
    pub player2_id: String,
    pub count_matches: String,
}

impl CompareForm {
    pub fn parse(&self) -> Result<([AccountId; 2], u32), InputError> {
        let first: AccountId = self.player1_id.parse()?;
        let second: AccountId = self.player2_id.parse()?;

        let count = self.count_matches.trim();
        let limit = count
            .parse::<u32>()
            .map_err(|_| InputError::InvalidMatchCount(count.to_string()))?;

        Ok(([first, second], limit))
    }
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render::render_page(&FormValues::empty(state.default_limit), None))
}

/// Run a comparison and redirect to its page
pub async fn submit(
    State(state): State<AppState>,
    form: Result<Form<CompareForm>, FormRejection>,
) -> Result<Redirect, AppError> {
    let Form(form) = form.map_err(|e| InputError::MalformedForm(e.body_text()))?;
    let (ids, limit) = form.parse()?;

    let comparison = state.orchestrator.compare(ids, limit).await?;
    info!("Comparison {} ready", comparison.id);

    Ok(Redirect::to(&format!("/comparisons/{}", comparison.id)))
}

pub async fn show_comparison(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let comparison = state.orchestrator.get(&id).await.ok_or(AppError::NotFound)?;
    let form = FormValues::from_comparison(&comparison);

    Ok(Html(render::render_page(&form, Some(&comparison))))
}

pub async fn comparison_json(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Comparison>, AppError> {
    state
        .orchestrator
        .get(&id)
        .await
        .map(Json)
        .ok_or(AppError::NotFound)
}

pub async fn health() -> &'static str {
    "ok"
}

//! Song resolution handler.

use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;

use cise_models::{Song, SongQuery};

use super::request_logger;
use crate::error::ApiResult;
use crate::middleware::RequestId;
use crate::state::AppState;

/// Request to resolve a song.
#[derive(Debug, Deserialize)]
pub struct ResolveSongRequest {
    /// Free-text search, e.g. "Shape of You"
    #[serde(default)]
    pub query: String,
}

/// Resolve a free-text query into a downloadable song.
pub async fn resolve_song(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    Json(request): Json<ResolveSongRequest>,
) -> ApiResult<Json<Song>> {
    let logger = request_logger(request_id, "resolve_song");
    let song = state
        .songs
        .resolve_logged(&SongQuery::new(request.query), &logger)
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(song))
}

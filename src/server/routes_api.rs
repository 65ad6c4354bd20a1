use crate::server::AppContext;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use nas_cinema_common::{ApiInfo, ConnectionStatus, FoldersResponse, MoviesResponse};

pub fn api_routes() -> Router<AppContext> {
    Router::new()
        .route("/api", get(root))
        .route("/api/", get(root))
        .route("/api/connection/test", get(test_connection))
        .route("/api/movies", get(list_movies))
        .route("/api/folders", get(list_folders))
}

async fn root() -> impl IntoResponse {
    Json(ApiInfo {
        message: "NAS Movie Streamer API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn test_connection(State(ctx): State<AppContext>) -> Json<ConnectionStatus> {
    let connected = ctx.nas.ensure_session().await;
    Json(ConnectionStatus::from_probe(connected))
}

/// Always answers 200; an unreachable NAS yields the placeholder catalog.
///
/// The query is read as raw pairs so a repeated `folder` never rejects the
/// request. The last occurrence wins.
async fn list_movies(
    State(ctx): State<AppContext>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<MoviesResponse> {
    let folder = params
        .into_iter()
        .rev()
        .find_map(|(key, value)| (key == "folder").then_some(value))
        .unwrap_or_else(|| ctx.config.library.default_folder.clone());

    let resolution = ctx.resolver.list_folder(&folder).await;
    tracing::info!(
        folder = %folder,
        source = %resolution.source,
        count = resolution.movies.len(),
        "Listed movies"
    );

    Json(MoviesResponse {
        total: resolution.movies.len(),
        movies: resolution.movies,
        source: resolution.source,
    })
}

async fn list_folders(State(ctx): State<AppContext>) -> Json<FoldersResponse> {
    Json(FoldersResponse {
        folders: ctx.config.library.folders.clone(),
    })
}

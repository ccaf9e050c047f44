use std::sync::Arc;

use serde::Deserialize;
use warp::http::StatusCode;
use warp::Filter;

use crate::admin::AdminAuth;
use crate::engine::{EngineError, GameEngine};
use wordly_types::{ClientState, GameError};

pub mod admin;
pub mod config;
pub mod dictionary;
pub mod engine;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GuessRequest {
    #[serde(default)]
    game_uid: Option<String>,
    #[serde(default)]
    uid: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    guess: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitRequest {
    #[serde(default)]
    game_uid: Option<String>,
    #[serde(default)]
    uid: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    tries: Option<i64>,
    #[serde(default)]
    duration: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateRequest {
    #[serde(default)]
    game_uid: Option<String>,
    #[serde(default)]
    uid: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    state: Option<ClientState>,
}

#[derive(Deserialize)]
struct StateQuery {
    uid: Option<String>,
}

#[derive(Deserialize)]
struct AdminRequest {
    #[serde(default)]
    code: Option<String>,
}

pub fn create_routes(
    engine: Arc<GameEngine>,
    admin: Arc<AdminAuth>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let engine_filter = warp::any().map({
        let engine = engine.clone();
        move || engine.clone()
    });

    let admin_filter = warp::any().map({
        let admin = admin.clone();
        move || admin.clone()
    });

    let get_config = warp::path!("api" / "config")
        .and(warp::get())
        .and(engine_filter.clone())
        .and_then(handle_config);

    let post_guess = warp::path!("api" / "guess")
        .and(warp::post())
        .and(warp::body::json())
        .and(engine_filter.clone())
        .and_then(handle_guess);

    let get_scores = warp::path!("api" / "scores")
        .and(warp::get())
        .and(engine_filter.clone())
        .and_then(handle_scores);

    let post_submit = warp::path!("api" / "submit")
        .and(warp::post())
        .and(warp::body::json())
        .and(engine_filter.clone())
        .and_then(handle_submit);

    let get_state = warp::path!("api" / "state")
        .and(warp::get())
        .and(warp::query::<StateQuery>())
        .and(engine_filter.clone())
        .and_then(handle_get_state);

    let post_state = warp::path!("api" / "state")
        .and(warp::post())
        .and(warp::body::json())
        .and(engine_filter.clone())
        .and_then(handle_post_state);

    let admin_verify = warp::path!("api" / "admin" / "verify")
        .and(warp::post())
        .and(warp::body::json())
        .and(admin_filter.clone())
        .and_then(handle_admin_verify);

    let admin_reset = warp::path!("api" / "admin" / "reset")
        .and(warp::post())
        .and(warp::body::json())
        .and(admin_filter)
        .and(engine_filter)
        .and_then(handle_admin_reset);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST"]);

    get_config
        .or(post_guess)
        .or(get_scores)
        .or(post_submit)
        .or(get_state)
        .or(post_state)
        .or(admin_verify)
        .or(admin_reset)
        .with(cors)
        .with(warp::log("wordly"))
}

async fn handle_config(engine: Arc<GameEngine>) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(reply_of(engine.config().await))
}

async fn handle_guess(
    request: GuessRequest,
    engine: Arc<GameEngine>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = engine
        .submit_guess(
            request.game_uid.as_deref().unwrap_or(""),
            request.uid.as_deref().unwrap_or(""),
            request.name.as_deref().unwrap_or(""),
            request.guess.as_deref().unwrap_or(""),
        )
        .await;
    Ok(reply_of(result))
}

async fn handle_scores(engine: Arc<GameEngine>) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(reply_of(engine.leaderboard().await))
}

async fn handle_submit(
    request: SubmitRequest,
    engine: Arc<GameEngine>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = engine
        .submit_score(
            request.game_uid.as_deref().unwrap_or(""),
            request.uid.as_deref().unwrap_or(""),
            request.name.as_deref().unwrap_or(""),
            request.tries.unwrap_or(0),
            request.duration.unwrap_or(0.0),
        )
        .await;
    Ok(reply_of(result))
}

async fn handle_get_state(
    query: StateQuery,
    engine: Arc<GameEngine>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = engine
        .player_state(query.uid.as_deref().unwrap_or(""))
        .await
        .map(|state| serde_json::json!({ "state": state }));
    Ok(reply_of(result))
}

async fn handle_post_state(
    request: StateRequest,
    engine: Arc<GameEngine>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = engine
        .upsert_state(
            request.game_uid.as_deref().unwrap_or(""),
            request.uid.as_deref().unwrap_or(""),
            request.name.as_deref().unwrap_or(""),
            request.state.unwrap_or_default(),
        )
        .await
        .map(|state| serde_json::json!({ "state": state }));
    Ok(reply_of(result))
}

async fn handle_admin_verify(
    request: AdminRequest,
    admin: Arc<AdminAuth>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let code = request.code.unwrap_or_default();
    let code = code.trim();
    if code.is_empty() {
        return Ok(error_reply(
            GameError::validation("code", "code is required").into(),
        ));
    }
    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "valid": admin.verify(code) })),
        StatusCode::OK,
    ))
}

async fn handle_admin_reset(
    request: AdminRequest,
    admin: Arc<AdminAuth>,
    engine: Arc<GameEngine>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let code = request.code.unwrap_or_default();
    let code = code.trim();
    if code.is_empty() {
        return Ok(error_reply(
            GameError::validation("code", "code is required").into(),
        ));
    }
    if !admin.verify(code) {
        return Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({ "error": "Invalid admin code." })),
            StatusCode::FORBIDDEN,
        ));
    }
    Ok(reply_of(engine.reset().await))
}

fn reply_of<T: serde::Serialize>(
    result: Result<T, EngineError>,
) -> warp::reply::WithStatus<warp::reply::Json> {
    match result {
        Ok(value) => warp::reply::with_status(warp::reply::json(&value), StatusCode::OK),
        Err(err) => error_reply(err),
    }
}

fn error_reply(err: EngineError) -> warp::reply::WithStatus<warp::reply::Json> {
    match err {
        EngineError::Game(game_err) => {
            let status = match &game_err {
                GameError::Validation { .. } => StatusCode::BAD_REQUEST,
                GameError::GameMismatch { .. }
                | GameError::Sequence { .. }
                | GameError::NameConflict { .. }
                | GameError::ScoreConflict => StatusCode::CONFLICT,
            };
            warp::reply::with_status(warp::reply::json(&error_body(&game_err)), status)
        }
        EngineError::Internal(err) => {
            tracing::error!("internal error: {:#}", err);
            warp::reply::with_status(
                warp::reply::json(&serde_json::json!({ "error": "Internal server error" })),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}

// Mismatch responses carry the fresh game descriptor so clients can
// resynchronize automatically.
fn error_body(err: &GameError) -> serde_json::Value {
    match err {
        GameError::GameMismatch { game } => serde_json::json!({
            "error": err.to_string(),
            "nextGameUid": game.game_uid,
            "wordLength": game.word_length,
            "maxGuesses": game.max_guesses,
        }),
        _ => serde_json::json!({ "error": err.to_string() }),
    }
}

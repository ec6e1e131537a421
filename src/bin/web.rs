//! Single binary web server: REST API over the leaderboard and the single game session.
//! Binds every interface on port 8080 unless HOST / PORT say otherwise; the save file and its
//! backup come from RPS_DATA_FILE / RPS_BACKUP_FILE (see `Config`).

use actix_web::{
    get, post,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use rps_leaderboard_web::{Config, ErrorKind, GameError, GameService, Move, PlayerId};
use serde::Deserialize;
use std::sync::RwLock;

/// One service for the whole process: players, session, save file.
type AppState = Data<RwLock<GameService>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct RegisterBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    is_cpu: bool,
}

#[derive(Deserialize)]
struct StartGameBody {
    player1: PlayerId,
    player2: PlayerId,
}

/// Choices arrive as raw strings so a bad token gets our own error message.
#[derive(Deserialize)]
struct PlayRoundBody {
    #[serde(default)]
    player1_choice: String,
    #[serde(default)]
    player2_choice: String,
}

#[derive(Deserialize)]
struct PlayCpuRoundBody {
    #[serde(default)]
    choice: String,
}

#[derive(Deserialize)]
struct CpuChoiceBody {
    opponent_id: PlayerId,
}

/// Path segment: player id (e.g. /api/player/{id}/stats)
#[derive(Deserialize)]
struct PlayerPath {
    id: PlayerId,
}

fn error_response(e: &GameError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::Validation => HttpResponse::BadRequest().json(body),
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::State => HttpResponse::Conflict().json(body),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "rps-leaderboard-web",
    })
}

/// Register a player. Duplicate display names are allowed; the CPU is a singleton.
#[post("/api/player/register")]
async fn api_register(state: AppState, body: Json<RegisterBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.register(&body.name, body.is_cpu) {
        Ok(reg) if reg.created => HttpResponse::Created().json(reg),
        Ok(reg) => HttpResponse::Ok().json(reg),
        Err(e) => error_response(&e),
    }
}

#[get("/api/player/{id}/stats")]
async fn api_player_stats(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.stats(path.id) {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => error_response(&e),
    }
}

/// Both leaderboard views: by name and by score.
#[get("/api/leaderboard")]
async fn api_leaderboard(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(g.leaderboard())
}

/// Start a game between two registered players (no game may be in progress).
#[post("/api/game/start")]
async fn api_start_game(state: AppState, body: Json<StartGameBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.start_game(body.player1, body.player2) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Game started",
            "game_state": g.game_state(),
        })),
        Err(e) => error_response(&e),
    }
}

/// Play one round with both choices supplied by the client.
#[post("/api/game/play_round")]
async fn api_play_round(state: AppState, body: Json<PlayRoundBody>) -> HttpResponse {
    let choices = body
        .player1_choice
        .parse::<Move>()
        .and_then(|c1| body.player2_choice.parse::<Move>().map(|c2| (c1, c2)));
    let (choice1, choice2) = match choices {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.play_round(choice1, choice2) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => error_response(&e),
    }
}

/// Play one round against the CPU; its move is predicted before the human's is recorded.
#[post("/api/game/play_cpu_round")]
async fn api_play_cpu_round(state: AppState, body: Json<PlayCpuRoundBody>) -> HttpResponse {
    let choice = match body.choice.parse::<Move>() {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.play_cpu_round(choice, &mut rand::thread_rng()) {
        Ok(round) => HttpResponse::Ok().json(round),
        Err(e) => error_response(&e),
    }
}

#[get("/api/game/state")]
async fn api_game_state(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(g.game_state())
}

/// CPU's strategic move against an opponent. Call before submitting that round.
#[post("/api/cpu/strategic_choice")]
async fn api_cpu_choice(state: AppState, body: Json<CpuChoiceBody>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.cpu_choice(body.opponent_id, &mut rand::thread_rng()) {
        Ok(prediction) => HttpResponse::Ok().json(prediction),
        Err(e) => error_response(&e),
    }
}

/// Remove every player and end any game.
#[post("/api/reset")]
async fn api_reset(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.reset();
    HttpResponse::Ok().json(serde_json::json!({ "message": "Leaderboard reset successfully" }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let service = GameService::with_storage(config.storage());
    log::info!(
        "Using save file {} (backup {})",
        config.data_file,
        config.backup_file
    );

    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(service));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_register)
            .service(api_player_stats)
            .service(api_leaderboard)
            .service(api_start_game)
            .service(api_play_round)
            .service(api_play_cpu_round)
            .service(api_game_state)
            .service(api_cpu_choice)
            .service(api_reset)
    })
    .bind(bind)?
    .run()
    .await
}

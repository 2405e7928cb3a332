//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use badminton_court_web::{
    auto_fill_all_courts, auto_fill_court, balance_teams, end_game, locate_player, move_player,
    pause_warmup, replace_player_in_slot, reset_warmup, set_warmup_time, start_game, start_warmup,
    swap_players, tick_timers, validate_session, FillPolicy, Location, Player, PlayerId, Session,
    SessionId, SessionSnapshot, Team, DEFAULT_SKILL_LEVEL,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Per-session entry: session data + last activity time (for auto-cleanup).
struct SessionEntry {
    session: Session,
    last_activity: Instant,
}

/// In-memory state: many sessions by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<SessionId, SessionEntry>>>;

/// Inactivity threshold: sessions not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

fn default_skill_level() -> u8 {
    DEFAULT_SKILL_LEVEL
}

fn default_auto_queue() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionBody {
    #[serde(default = "default_auto_queue")]
    auto_queue: bool,
    #[serde(default)]
    fill_policy: FillPolicy,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddPlayerBody {
    name: String,
    #[serde(default = "default_skill_level")]
    skill_level: u8,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchPlayersBody {
    count: usize,
    #[serde(default = "default_skill_level")]
    skill_level: u8,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePlayerBody {
    name: String,
    skill_level: u8,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveBody {
    player_id: PlayerId,
    target: Location,
    #[serde(default)]
    target_player_id: Option<PlayerId>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwapBody {
    player_id_1: PlayerId,
    player_id_2: PlayerId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplaceBody {
    incoming_id: PlayerId,
    outgoing_id: PlayerId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceBody {
    player_ids: Vec<PlayerId>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EndGameBody {
    winner: Team,
}

#[derive(Deserialize)]
struct WarmupBody {
    minutes: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsBody {
    auto_queue: Option<bool>,
    fill_policy: Option<FillPolicy>,
}

/// Path segment: session id (e.g. /api/sessions/{id})
#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

/// Path segments: session id and player id (e.g. /api/sessions/{id}/players/{player_id})
#[derive(Deserialize)]
struct SessionPlayerPath {
    id: SessionId,
    player_id: Uuid,
}

/// Path segments: session id and court id (e.g. /api/sessions/{id}/courts/{court_id})
#[derive(Deserialize)]
struct SessionCourtPath {
    id: SessionId,
    court_id: Uuid,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "badminton-court-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new session (returns it with id; client stores id for subsequent requests).
#[post("/api/sessions")]
async fn api_create_session(state: AppState, body: Option<Json<CreateSessionBody>>) -> HttpResponse {
    let mut session = Session::new();
    if let Some(body) = body {
        session.auto_queue = body.auto_queue;
        session.fill_policy = body.fill_policy;
    }
    let id = session.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        SessionEntry {
            session,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(&g.get(&id).unwrap().session)
}

/// Get a session by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/sessions/{id}")]
async fn api_get_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.session)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    }
}

/// Register a player; new players join the waiting queue tail.
#[post("/api/sessions/{id}/players")]
async fn api_add_player(state: AppState, path: Path<SessionPath>, body: Json<AddPlayerBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    match t.add_player(body.name.trim(), body.skill_level) {
        Ok(_) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Register a batch of Player-N players, all queued.
#[post("/api/sessions/{id}/players/batch")]
async fn api_add_batch_players(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<BatchPlayersBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    t.add_batch_players(body.count, body.skill_level);
    HttpResponse::Ok().json(t)
}

/// Bulk roster import: CSV body with one `name,skill_level` row per player.
/// Skill level is optional per row; blank lines are skipped.
#[post("/api/sessions/{id}/players/import")]
async fn api_import_roster(state: AppState, path: Path<SessionPath>, body: String) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());
    let mut added = 0usize;
    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                return HttpResponse::BadRequest()
                    .json(serde_json::json!({ "error": format!("CSV parse error: {}", e) }))
            }
        };
        let name = record.get(0).unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }
        let skill_level = record
            .get(1)
            .and_then(|s| s.parse::<u8>().ok())
            .unwrap_or(DEFAULT_SKILL_LEVEL);
        match t.add_player(name, skill_level) {
            Ok(_) => added += 1,
            Err(e) => {
                return HttpResponse::BadRequest()
                    .json(serde_json::json!({ "error": e.to_string() }))
            }
        }
    }
    log::info!("Imported {} player(s) into session {}", added, t.id);
    HttpResponse::Ok().json(t)
}

/// Edit a player's name and skill level.
#[put("/api/sessions/{id}/players/{player_id}")]
async fn api_update_player(
    state: AppState,
    path: Path<SessionPlayerPath>,
    body: Json<UpdatePlayerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    match t.update_player(path.player_id, body.name.trim(), body.skill_level) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Remove a player; their id is purged from every location collection.
#[delete("/api/sessions/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<SessionPlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    match t.remove_player(path.player_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Add an empty court.
#[post("/api/sessions/{id}/courts")]
async fn api_add_court(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    t.add_court();
    HttpResponse::Ok().json(t)
}

/// Remove a court; occupants are evicted to the waiting queue tail.
#[delete("/api/sessions/{id}/courts/{court_id}")]
async fn api_remove_court(state: AppState, path: Path<SessionCourtPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    match t.remove_court(path.court_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Move a player to a target location, optionally swapping with another player.
#[post("/api/sessions/{id}/move")]
async fn api_move_player(state: AppState, path: Path<SessionPath>, body: Json<MoveBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    match move_player(t, body.player_id, body.target, body.target_player_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Swap two placed players, wherever they are.
#[post("/api/sessions/{id}/swap")]
async fn api_swap_players(state: AppState, path: Path<SessionPath>, body: Json<SwapBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    match swap_players(t, body.player_id_1, body.player_id_2) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Put an unplaced player into an occupied cell; the displaced player requeues.
#[post("/api/sessions/{id}/replace")]
async fn api_replace_player(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<ReplaceBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    match replace_player_in_slot(t, body.incoming_id, body.outgoing_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Players registered but currently in no location (candidates for replace).
#[get("/api/sessions/{id}/players/available")]
async fn api_available_players(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    HttpResponse::Ok().json(entry.session.available_players())
}

/// Locate a player (null when registered but unplaced; includes duplicate info).
#[get("/api/sessions/{id}/players/{player_id}/location")]
async fn api_locate_player(state: AppState, path: Path<SessionPlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &entry.session;
    if t.get_player(path.player_id).is_none() {
        return HttpResponse::NotFound().json(serde_json::json!({ "error": "Player not found" }));
    }
    HttpResponse::Ok().json(locate_player(t, path.player_id))
}

/// Split four chosen players into balanced teams (does not assign them).
#[post("/api/sessions/{id}/balance")]
async fn api_balance_teams(state: AppState, path: Path<SessionPath>, body: Json<BalanceBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &entry.session;
    let mut selected: Vec<Player> = Vec::with_capacity(body.player_ids.len());
    for id in &body.player_ids {
        match t.get_player(*id) {
            Some(p) => selected.push(p.clone()),
            None => {
                return HttpResponse::BadRequest()
                    .json(serde_json::json!({ "error": "Player not found" }))
            }
        }
    }
    match balance_teams(&selected) {
        Ok(teams) => HttpResponse::Ok().json(teams),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Fill one empty court with the next four queued players.
#[post("/api/sessions/{id}/courts/{court_id}/fill")]
async fn api_fill_court(state: AppState, path: Path<SessionCourtPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    match auto_fill_court(t, path.court_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Fill every empty court, or nothing if the queue can't cover them all.
#[post("/api/sessions/{id}/fill-all")]
async fn api_fill_all_courts(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    match auto_fill_all_courts(t) {
        Ok(_) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Scan for duplicate placements (read-only).
#[get("/api/sessions/{id}/validate")]
async fn api_validate(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    HttpResponse::Ok().json(validate_session(&entry.session))
}

/// Repair duplicate placements: purge every occurrence and requeue the player.
#[post("/api/sessions/{id}/repair")]
async fn api_repair(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    let report = validate_session(t);
    for dup in &report.duplicates {
        t.purge_placements(dup.player_id);
        t.waiting_queue.push(dup.player_id);
    }
    if !report.duplicates.is_empty() {
        log::warn!(
            "Repaired {} duplicate placement(s) in session {}",
            report.duplicates.len(),
            t.id
        );
    }
    HttpResponse::Ok().json(t)
}

/// Start a game on a full court.
#[post("/api/sessions/{id}/courts/{court_id}/start")]
async fn api_start_game(state: AppState, path: Path<SessionCourtPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    match start_game(t, path.court_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// End a game: record it, update stats, requeue the four players, maybe refill.
#[post("/api/sessions/{id}/courts/{court_id}/end")]
async fn api_end_game(
    state: AppState,
    path: Path<SessionCourtPath>,
    body: Json<EndGameBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    match end_game(t, path.court_id, body.winner) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Set a court's warmup length (minutes).
#[put("/api/sessions/{id}/courts/{court_id}/warmup")]
async fn api_set_warmup(
    state: AppState,
    path: Path<SessionCourtPath>,
    body: Json<WarmupBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    match set_warmup_time(t, path.court_id, body.minutes) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Start the warmup countdown.
#[post("/api/sessions/{id}/courts/{court_id}/warmup/start")]
async fn api_start_warmup(state: AppState, path: Path<SessionCourtPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    match start_warmup(t, path.court_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Pause the warmup countdown.
#[post("/api/sessions/{id}/courts/{court_id}/warmup/pause")]
async fn api_pause_warmup(state: AppState, path: Path<SessionCourtPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    match pause_warmup(t, path.court_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Reset the warmup countdown to its original length.
#[post("/api/sessions/{id}/courts/{court_id}/warmup/reset")]
async fn api_reset_warmup(state: AppState, path: Path<SessionCourtPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    match reset_warmup(t, path.court_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Requeue the whole roster and clear every court.
#[post("/api/sessions/{id}/reset-positions")]
async fn api_reset_positions(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    t.reset_positions();
    HttpResponse::Ok().json(t)
}

/// Update session settings (auto-queue, fill policy).
#[put("/api/sessions/{id}/settings")]
async fn api_update_settings(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<SettingsBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    if let Some(auto_queue) = body.auto_queue {
        t.auto_queue = auto_queue;
    }
    if let Some(fill_policy) = body.fill_policy {
        t.fill_policy = fill_policy;
    }
    HttpResponse::Ok().json(t)
}

/// Export the persisted-state snapshot as JSON.
#[get("/api/sessions/{id}/export")]
async fn api_export(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    HttpResponse::Ok().json(entry.session.export())
}

/// Import a snapshot, replacing the session's data.
#[post("/api/sessions/{id}/import")]
async fn api_import(state: AppState, path: Path<SessionPath>, body: Json<SessionSnapshot>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.session;
    t.import(body.into_inner());
    HttpResponse::Ok().json(t)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<SessionId, SessionEntry>::new()));

    // Background task: every second, advance warmup and game clocks on all courts
    let state_timers = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(1));
        loop {
            interval.tick().await;
            let mut g = match state_timers.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            for entry in g.values_mut() {
                tick_timers(&mut entry.session);
            }
        }
    });

    // Background task: every 30 minutes, remove sessions inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive session(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_create_session)
            .service(api_get_session)
            .service(api_add_player)
            .service(api_add_batch_players)
            .service(api_import_roster)
            .service(api_update_player)
            .service(api_remove_player)
            .service(api_add_court)
            .service(api_remove_court)
            .service(api_move_player)
            .service(api_swap_players)
            .service(api_replace_player)
            .service(api_available_players)
            .service(api_locate_player)
            .service(api_balance_teams)
            .service(api_fill_court)
            .service(api_fill_all_courts)
            .service(api_validate)
            .service(api_repair)
            .service(api_start_game)
            .service(api_end_game)
            .service(api_set_warmup)
            .service(api_start_warmup)
            .service(api_pause_warmup)
            .service(api_reset_warmup)
            .service(api_reset_positions)
            .service(api_update_settings)
            .service(api_export)
            .service(api_import)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

// src/handlers.rs
// Request routing and handlers for the bingo server.
//
// Games and boards travel as identifiers in query strings and form bodies, so the only
// server-side state is the list of recently drawn games.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use hyper::body::Bytes;
use hyper::header::{self, HeaderValue};
use hyper::{Method, Response, StatusCode};
use http_body_util::Full;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::config::ServerConfig;
use crate::game::{Game, ZERO_GAME_ID};
use crate::history::{GameHistory, GameInfo};
use crate::logging::{log_error, log_info, log_warning};
use crate::number::{COLUMNLETTERS, Number};
use crate::svg::render_board;

pub type HttpResponse = Response<Full<Bytes>>;

pub const MAX_BOARDS: usize = 1000;

pub struct AppState {
    pub history: Mutex<GameHistory>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            history: Mutex::new(GameHistory::new(config.game_count)),
            config,
        }
    }
}

// Response structures for JSON serialization
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GamesResponse {
    pub games: Vec<GameInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BoardsResponse {
    pub boards: Vec<String>,
}

/// State of a game as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub game_id: String,
    pub numbers_left: usize,
    pub drawn_numbers: Vec<u8>,
    pub previous_number: Option<String>,
    /// Drawn numbers by column letter, in draw order.
    pub columns: BTreeMap<String, Vec<u8>>,
    pub board_id: Option<String>,
    pub bingo: bool,
}

impl GameView {
    pub fn new(game: &Game, game_id: &str, board_id: Option<&str>, bingo: bool) -> Self {
        let previous = game.previous_number_drawn();
        let columns = game
            .drawn_number_columns()
            .into_iter()
            .map(|(c, numbers)| {
                let values = numbers.iter().map(|n| n.value()).collect();
                (COLUMNLETTERS[c].to_string(), values)
            })
            .collect();
        Self {
            game_id: game_id.to_string(),
            numbers_left: game.numbers_left(),
            drawn_numbers: game.drawn_numbers().iter().map(|n| n.value()).collect(),
            previous_number: (previous != Number::FREE).then(|| previous.to_string()),
            columns,
            board_id: board_id.map(str::to_string),
            bingo,
        }
    }
}

/// Dispatch a request by method, then path.
pub fn route(
    method: &Method,
    path: &str,
    query: Option<&str>,
    body: &[u8],
    state: &AppState,
) -> HttpResponse {
    let query = parse_params(query.unwrap_or(""));
    let form = parse_params(&String::from_utf8_lossy(body));
    match (method, path) {
        (&Method::GET, "/") => handle_games(state),
        (&Method::GET, "/game") => handle_game(&query),
        (&Method::GET, "/game/board") => handle_board(&query),
        (&Method::GET, "/game/board/check") => handle_check_board(&query),
        (&Method::POST, "/game") => redirect(&format!("/game?gameID={ZERO_GAME_ID}")),
        (&Method::POST, "/game/draw_number") => handle_draw_number(&form, state),
        (&Method::POST, "/game/board") => handle_new_board(),
        (&Method::POST, "/game/boards") => handle_new_boards(&form),
        (&Method::GET | &Method::POST, _) => error_response(StatusCode::NOT_FOUND, "Not Found"),
        _ => error_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed"),
    }
}

fn handle_games(state: &AppState) -> HttpResponse {
    match state.history.lock() {
        Ok(history) => json_response(
            StatusCode::OK,
            &GamesResponse {
                games: history.entries(),
            },
        ),
        Err(_) => {
            log_error("Failed to acquire game history lock");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to access game history")
        }
    }
}

fn handle_game(query: &HashMap<String, String>) -> HttpResponse {
    let game_id = param(query, "gameID");
    let game = match parse_game(game_id) {
        Ok(game) => game,
        Err(response) => return response,
    };
    let board_id = query.get("boardID").map(String::as_str).filter(|id| !id.is_empty());
    let bingo = query.contains_key("bingo");
    json_response(StatusCode::OK, &GameView::new(&game, game_id, board_id, bingo))
}

fn handle_board(query: &HashMap<String, String>) -> HttpResponse {
    let board_id = param(query, "boardID");
    let board = match parse_board(board_id) {
        Ok(board) => board,
        Err(response) => return response,
    };
    let mut response = Response::new(Full::new(Bytes::from(render_board(&board, board_id))));
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("image/svg+xml"));
    response
}

fn handle_check_board(query: &HashMap<String, String>) -> HttpResponse {
    let game_id = param(query, "gameID");
    let game = match parse_game(game_id) {
        Ok(game) => game,
        Err(response) => return response,
    };
    let board_id = param(query, "boardID");
    let board = match parse_board(board_id) {
        Ok(board) => board,
        Err(response) => return response,
    };
    let result = match param(query, "type") {
        "HasLine" => board.has_line(&game),
        "IsFilled" => board.is_filled(&game),
        other => {
            return error_response(
                StatusCode::BAD_REQUEST,
                &format!("unknown check type {other:?}, wanted HasLine or IsFilled"),
            );
        }
    };
    let mut location = format!("/game?gameID={game_id}&boardID={board_id}");
    if result {
        location.push_str("&bingo");
    }
    redirect(&location)
}

fn handle_draw_number(form: &HashMap<String, String>, state: &AppState) -> HttpResponse {
    let game_id = param(form, "gameID");
    let mut game = match parse_game(game_id) {
        Ok(game) => game,
        Err(response) => return response,
    };
    let before = game.numbers_left();
    game.draw_number();
    let after = game.numbers_left();
    if before == after {
        let mut response = Response::new(Full::new(Bytes::new()));
        *response.status_mut() = StatusCode::NOT_MODIFIED;
        return response;
    }
    let new_id = match game.id() {
        Ok(id) => id,
        Err(e) => {
            log_error(&format!("Failed to encode game drawn from valid id {game_id:?}: {e}"));
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, &format!("unexpected problem: {e}"));
        }
    };
    log_info(&format!("Drew {} ({after} numbers left)", game.previous_number_drawn()));
    match state.history.lock() {
        Ok(mut history) => history.add(&new_id, after),
        Err(_) => log_error("Failed to acquire game history lock"),
    }
    redirect(&format!("/game?gameID={new_id}"))
}

fn handle_new_board() -> HttpResponse {
    match Board::new().id() {
        Ok(board_id) => redirect(&format!("/game/board?boardID={board_id}")),
        Err(e) => {
            log_error(&format!("Failed to encode new board: {e}"));
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &format!("unexpected problem: {e}"))
        }
    }
}

fn handle_new_boards(form: &HashMap<String, String>) -> HttpResponse {
    let n = match param(form, "n").parse::<usize>() {
        Ok(n) => n,
        Err(e) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                &format!("{e}: example: n=5 creates 5 boards"),
            );
        }
    };
    if !(1..=MAX_BOARDS).contains(&n) {
        return error_response(
            StatusCode::BAD_REQUEST,
            &format!("n must be between 1 and {MAX_BOARDS}"),
        );
    }
    let boards: Result<Vec<String>, _> = (0..n).map(|_| Board::new().id()).collect();
    match boards {
        Ok(boards) => json_response(StatusCode::OK, &BoardsResponse { boards }),
        Err(e) => {
            log_error(&format!("Failed to encode new boards: {e}"));
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &format!("unexpected problem: {e}"))
        }
    }
}

fn parse_game(game_id: &str) -> Result<Game, HttpResponse> {
    Game::from_id(game_id).map_err(|e| {
        log_warning(&format!("Rejected game id {game_id:?}: {e}"));
        error_response(StatusCode::BAD_REQUEST, &format!("getting game: {e}"))
    })
}

fn parse_board(board_id: &str) -> Result<Board, HttpResponse> {
    Board::from_id(board_id).map_err(|e| {
        log_warning(&format!("Rejected board id {board_id:?}: {e}"));
        error_response(StatusCode::BAD_REQUEST, &format!("getting board: {e}"))
    })
}

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> &'a str {
    params.get(key).map(String::as_str).unwrap_or("")
}

/// Parse `a=1&b=2` pairs from a query string or urlencoded form body.
/// A key without `=` maps to an empty value.
pub fn parse_params(input: &str) -> HashMap<String, String> {
    input
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                (Some(high), Some(low)) => {
                    out.push(high << 4 | low);
                    i += 2;
                }
                _ => out.push(b'%'),
            },
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> HttpResponse {
    match serde_json::to_vec(value) {
        Ok(body) => {
            let mut response = Response::new(Full::new(Bytes::from(body)));
            *response.status_mut() = status;
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
            response
        }
        Err(e) => {
            log_error(&format!("Failed to serialize response: {e}"));
            let mut response = Response::new(Full::new(Bytes::from_static(b"{}")));
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        }
    }
}

pub fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    json_response(
        status,
        &ErrorResponse {
            error: message.to_string(),
        },
    )
}

fn redirect(location: &str) -> HttpResponse {
    match HeaderValue::from_str(location) {
        Ok(value) => {
            let mut response = Response::new(Full::new(Bytes::new()));
            *response.status_mut() = StatusCode::SEE_OTHER;
            response.headers_mut().insert(header::LOCATION, value);
            response
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &format!("bad redirect: {e}")),
    }
}

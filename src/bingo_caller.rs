// src/bingo_caller.rs
// Terminal client that calls numbers on a bingo server.
//
// Interactive Controls:
// - any key: draw the next number through the /game/draw_number endpoint
// - ESC: exit the caller
//
// CLI Options:
// - --game: resume an existing game id instead of starting a new one
// - --board: check a board id for a line / full card after every draw

use std::error::Error;
use std::time::Duration;

use clap::Parser;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;

use bingo::board::Board;
use bingo::config::{CLIENT_CONFIG_PATH, ClientConfig};
use bingo::game::{Game, ZERO_GAME_ID};
use bingo::handlers::{ErrorResponse, GameView};
use bingo::terminal::{self, BoardStatus};

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "Bingo Caller - Draw numbers on a bingo server and check a board")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Configuration file (key = value lines)
    #[arg(long, default_value = CLIENT_CONFIG_PATH)]
    config: String,

    /// Game id to resume
    #[arg(long, default_value = ZERO_GAME_ID)]
    game: String,

    /// Board id to check after every draw
    #[arg(long)]
    board: Option<String>,
}

// Draw a number; None when the server reports every number drawn
async fn draw_number(
    client: &reqwest::Client,
    server_base_url: &str,
    game_id: &str,
) -> Result<Option<GameView>, Box<dyn Error>> {
    let url = format!("{server_base_url}/game/draw_number");
    // The server answers with a redirect to the new game, which reqwest follows as a GET
    let response = client
        .post(&url)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(format!("gameID={game_id}"))
        .send()
        .await?;

    match response.status() {
        StatusCode::NOT_MODIFIED => Ok(None),
        status if status.is_success() => Ok(Some(response.json().await?)),
        status => {
            let message = match response.json::<ErrorResponse>().await {
                Ok(error) => error.error,
                Err(_) => String::new(),
            };
            Err(format!("HTTP request failed with status {status}: {message}").into())
        }
    }
}

async fn get_game(
    client: &reqwest::Client,
    server_base_url: &str,
    game_id: &str,
) -> Result<GameView, Box<dyn Error>> {
    let url = format!("{server_base_url}/game?gameID={game_id}");
    let response = client.get(&url).send().await?;
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        Err(format!("HTTP request failed with status: {}", response.status()).into())
    }
}

fn board_status(board: &Board, game_id: &str) -> Result<BoardStatus, Box<dyn Error>> {
    let game = Game::from_id(game_id)?;
    Ok(if board.is_filled(&game) {
        BoardStatus::Filled
    } else if board.has_line(&game) {
        BoardStatus::Line
    } else {
        BoardStatus::Open
    })
}

fn show(view: &GameView, board: Option<&Board>) -> Result<(), Box<dyn Error>> {
    let checked = match board {
        Some(board) => Some((board, board_status(board, &view.game_id)?)),
        None => None,
    };
    terminal::show_on_terminal(view, checked);
    Ok(())
}

async fn run_caller(args: Args) -> Result<(), Box<dyn Error>> {
    let config = ClientConfig::load_or_default(&args.config);
    let server_base_url = config.server_url();
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()?;

    // Reject bad ids before talking to the server
    Game::from_id(&args.game)?;
    let board = args.board.as_deref().map(Board::from_id).transpose()?;

    let mut view = get_game(&client, &server_base_url, &args.game).await?;
    show(&view, board.as_ref())?;

    loop {
        if terminal::hitkey()? {
            println!("Exiting the caller.");
            break;
        }
        match draw_number(&client, &server_base_url, &view.game_id).await? {
            Some(next) => view = next,
            None => {
                println!("All numbers have been drawn. Game over.");
                break;
            }
        }
        show(&view, board.as_ref())?;
    }

    println!("Final game id: {}", view.game_id);
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(e) = run_caller(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

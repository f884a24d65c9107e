use anyhow::Context;
use chess_duel::client::identity::DEFAULT_IDENTITY_FILE;
use chess_duel::client::{play_move, spawn_poll_loop, ClientIdentity, GameClient, LocalGame};
use clap::{Parser, Subcommand};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play a chess session against a friend", long_about = None)]
struct Args {
    /// Base URL of the session server
    #[arg(long, env = "CHESS_DUEL_SERVER", default_value = "http://127.0.0.1:3000")]
    server: String,

    /// Where the participant id and last session are kept
    #[arg(long, default_value = DEFAULT_IDENTITY_FILE)]
    identity: PathBuf,

    /// Milliseconds between state polls
    #[arg(long, default_value = "2000")]
    poll_interval_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a new session and take white
    Create {
        /// Starting position as FEN
        #[arg(long)]
        board: Option<String>,
    },
    /// Join a session shared by a friend
    Join { session_id: String },
    /// Rejoin the last session stored in the identity file
    Resume,
}

fn print_game(game: &LocalGame) {
    println!("\n{}", game.board().render(game.color()));
    println!("{}", game.status_line());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let client = GameClient::new(&args.server);
    let mut identity = ClientIdentity::load_or_new(&args.identity)?;

    let session_id = match args.command {
        Command::Create { board } => client.create_session(board).await?,
        Command::Join { session_id } => session_id.trim().to_ascii_lowercase(),
        Command::Resume => identity
            .session_id
            .clone()
            .context("no saved session to resume")?,
    };

    let joined = client
        .join_session(&session_id, Some(identity.player_id.as_str()))
        .await
        .with_context(|| format!("joining session {}", session_id))?;
    identity.remember(&session_id, joined.color, &joined.player_id);
    identity.save(&args.identity)?;

    let game = Arc::new(Mutex::new(LocalGame::new(
        session_id.clone(),
        joined.player_id,
        joined.color,
        &joined.position,
    )?));

    println!("Session: {}", session_id);
    println!("You are playing as {}", joined.color.name());
    println!("Share the session id with your friend. Enter moves like e2e4, 'board' to redraw, 'quit' to leave.");
    print_game(&game.lock());

    let every = Duration::from_millis(args.poll_interval_ms.max(1));
    let poll = spawn_poll_loop(client.clone(), game.clone(), every, print_game);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => continue,
            "quit" => break,
            "board" => print_game(&game.lock()),
            input => match play_move(&client, &game, input).await {
                Ok(_) => print_game(&game.lock()),
                Err(e) => println!("Move refused: {}", e),
            },
        }
    }

    poll.stop();
    Ok(())
}

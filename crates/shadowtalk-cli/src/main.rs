mod config;
mod render;
mod shell;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use shadowtalk_board::{AuthorId, Board, BoardEvent, MAX_REPLY_LENGTH};
use shadowtalk_db::Database;

use crate::config::Config;
use crate::shell::Shell;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays the shell's own output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shadowtalk=info,shadowtalk_db=info,shadowtalk_board=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    let db = if config.is_in_memory() {
        Database::open_in_memory()?
    } else {
        Database::open(&config.db_path)?
    };
    let db = Arc::new(db);

    let mut rng = rand::rng();
    let anon_id = match config.anon_id {
        Some(id) => {
            db.set_anon_id(&id)?;
            id
        }
        None => db.load_or_create_anon_id(&mut rng)?,
    };
    let room = db.get_room()?;
    info!("Starting board for {} (room: {})", anon_id, room.as_deref().unwrap_or("lobby"));

    let board = Board::new(AuthorId::new(anon_id), room.as_deref());
    let mut shell = Shell::new(board, rng);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout.write_all(shell.banner().as_bytes()).await?;
    stdout.write_all(b"> ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let step = shell.execute(&line);
        persist(&db, step.events).await?;

        if step.quit {
            break;
        }
        stdout.write_all(step.output.as_bytes()).await?;
        stdout.write_all(prompt_marker(&shell).as_bytes()).await?;
        stdout.flush().await?;
    }

    info!("Session ended with {} dilemmas on the board", shell.board().len());
    Ok(())
}

fn prompt_marker<R: rand::Rng>(shell: &Shell<R>) -> String {
    match shell.draft_len() {
        Some(len) => format!("draft {}/{}> ", len, MAX_REPLY_LENGTH),
        None => "> ".to_string(),
    }
}

/// Store membership changes after the transition that produced them has committed.
async fn persist(db: &Arc<Database>, events: Vec<BoardEvent>) -> anyhow::Result<()> {
    if !events.iter().any(|e| e.membership_change().is_some()) {
        return Ok(());
    }

    // Run blocking DB writes off the async runtime
    let db = db.clone();
    tokio::task::spawn_blocking(move || {
        for event in &events {
            db.apply_event(event)?;
        }
        Ok::<_, anyhow::Error>(())
    })
    .await??;

    Ok(())
}

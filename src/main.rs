mod error;
mod item;
mod config;
mod circular_buffer;
mod render;
mod menu;
mod session;

use std::error::Error;
use clap::Parser;
use log::{debug, info};
use tokio::io::BufReader;
use circular_buffer::CircularQueue;
use config::{load_config_or_default, validate_capacity, validate_first_id, validate_id_range, ResolvedConfig};
use item::SequentialIds;
use session::Session;

fn get_config_path() -> String {
    if let Ok(home) = std::env::var("HOME") {
        format!("{}/.config/piece-queue/config.toml", home)
    } else {
        "/etc/piece-queue/config.toml".to_string()
    }
}

/// Interactive fixed-capacity circular queue of game pieces.
#[derive(Parser, Debug)]
#[command(name = "piecequeue", version)]
struct Cli {
    /// Config file to load. Must exist when given.
    #[arg(short, long)]
    config: Option<String>,

    /// Number of slots in the queue.
    #[arg(long)]
    capacity: Option<usize>,

    /// Id of the first generated piece.
    #[arg(long)]
    first_id: Option<u64>,

    /// Leave the head/tail line out of the queue view.
    #[arg(long)]
    hide_indices: bool,
}

impl Cli {
    fn apply(&self, cfg: &mut ResolvedConfig) -> Result<(), Box<dyn Error>> {
        if let Some(capacity) = self.capacity {
            cfg.capacity = validate_capacity(capacity)?;
        }
        if let Some(first_id) = self.first_id {
            cfg.first_id = validate_first_id(first_id)?;
        }
        if self.hide_indices {
            cfg.show_indices = false;
        }
        validate_id_range(cfg.capacity, cfg.first_id)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(get_config_path);
    let mut cfg = load_config_or_default(&config_path, cli.config.is_some())?;
    cli.apply(&mut cfg)?;

    let ids = SequentialIds::starting_at(cfg.first_id);
    debug!("First piece id: {:?}", ids.peek());
    let queue = CircularQueue::initialize(cfg.capacity, ids)?;
    let mut session = Session::new(queue, cfg.show_indices);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    session.run(stdin, &mut stdout).await?;

    info!("Piece queue simulator exited with {} pieces queued.", session.queue().len());
    Ok(())
}

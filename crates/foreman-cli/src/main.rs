//! Foreman CLI application
//!
//! Command-line interface for the Foreman job tracking board.

mod cli;
mod renderer;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, CommandHandler, Commands};
use foreman_core::{Board, JsonStore, Session};
use log::info;
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Cli {
        data_file,
        session_file,
        no_color,
        command,
    } = Cli::parse();

    let store = match data_file {
        Some(path) => JsonStore::new(path),
        None => JsonStore::at_default_path().context("Failed to locate the board document")?,
    };
    let session = match session_file {
        Some(path) => Session::new(path),
        None => Session::at_default_path().context("Failed to locate the session file")?,
    };
    let board = Board::open(store).context("Failed to load the board")?;
    let renderer = TerminalRenderer::new(!no_color);

    info!("Foreman started");

    let mut handler = CommandHandler::new(board, session, renderer);

    match command {
        Commands::Login(args) => handler.login(args),
        Commands::Logout => handler.logout(),
        Commands::Job { command } => {
            handler.require_session()?;
            handler.handle_job_command(command).await
        }
        Commands::Template { command } => {
            handler.require_session()?;
            handler.handle_template_command(command)
        }
        Commands::Calendar(args) => {
            handler.require_session()?;
            handler.handle_calendar(args)
        }
        Commands::Archive { command } => {
            handler.require_session()?;
            handler.handle_archive_command(command)
        }
        Commands::Stats => {
            handler.require_session()?;
            handler.handle_stats()
        }
    }
}

//! Line-oriented driver for the football search client.
//!
//! Reads commands from stdin and prints a text frame after every state
//! change. Any line that is not a command becomes the new search text.
//!
//! ```text
//! :more players   next page of players
//! :more teams     next page of teams
//! :fav <n>        toggle favourite on row n
//! :favs           open/close the favourites list
//! :refresh        search the current text again
//! :dismiss        clear the error alert
//! :quit           exit
//! ```
//!
//! The optional first argument is a TOML config file.

use football_search::observability::init_tracing;
use football_search::{initialize, Config, CoordinatorHandle, Result, SearchState};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, PartialEq, Eq)]
enum Command {
    MorePlayers,
    MoreTeams,
    Favorite(usize),
    Favorites,
    Refresh,
    Dismiss,
    Quit,
    Search(String),
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let Some(rest) = line.trim().strip_prefix(':') else {
        return Command::Search(line.to_string());
    };
    let mut words = rest.split_whitespace();
    match (words.next(), words.next()) {
        (Some("more"), Some("players")) => Command::MorePlayers,
        (Some("more"), Some("teams")) => Command::MoreTeams,
        (Some("fav"), Some(n)) => n
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map_or_else(|| Command::Unknown(line.to_string()), Command::Favorite),
        (Some("favs"), None) => Command::Favorites,
        (Some("refresh"), None) => Command::Refresh,
        (Some("dismiss"), None) => Command::Dismiss,
        (Some("quit" | "q"), None) => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Runs one command. Returns `false` when the driver should exit.
fn apply(coordinator: &CoordinatorHandle, command: Command) -> Result<bool> {
    match command {
        Command::MorePlayers => coordinator.load_more_players()?,
        Command::MoreTeams => coordinator.load_more_teams()?,
        Command::Favorite(row) => {
            let state = coordinator.snapshot();
            let player = if state.favorites_shown {
                state.favorites.get(row - 1).map(|record| record.to_player())
            } else {
                state.players.get(row - 1).cloned()
            };
            match player {
                Some(player) => coordinator.toggle_favorite(player)?,
                None => eprintln!("no player on row {row}"),
            }
        }
        Command::Favorites => {
            if coordinator.snapshot().favorites_shown {
                coordinator.hide_favorites()?;
            } else {
                coordinator.show_favorites()?;
            }
        }
        Command::Refresh => coordinator.refresh()?,
        Command::Dismiss => coordinator.dismiss_error()?,
        Command::Quit => return Ok(false),
        Command::Search(text) => coordinator.text_changed(text)?,
        Command::Unknown(line) => eprintln!("unknown command: {line}"),
    }
    Ok(true)
}

fn print_frame(state: &SearchState) {
    println!("{}", football_search::ui::render(&state.view_model()));
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };
    init_tracing(&config);
    tracing::info!(base_url = %config.base_url, "starting football search");

    let coordinator = initialize(&config)?;
    let mut snapshots = coordinator.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_frame(&snapshots.borrow_and_update());
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !apply(&coordinator, parse_command(&line))? {
                    break;
                }
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = snapshots.borrow_and_update().clone();
                print_frame(&state);
            }
        }
    }

    tracing::info!("football search stopped");
    Ok(())
}

//! Plain-text rendering of a [`SearchViewModel`].
//!
//! Produces the frame the line driver prints after every snapshot. Rows are
//! numbered so `:fav <n>` can refer to them.

use crate::ui::viewmodel::{ListOverlay, MoreButton, PlayerCell, SearchViewModel, TeamCell};
use std::fmt::Write;

/// Renders one frame as text.
#[must_use]
pub fn render(vm: &SearchViewModel) -> String {
    let mut out = String::new();

    if let Some(favorites) = &vm.favorites {
        let _ = writeln!(out, "== Favourite players ({}) ==", favorites.len());
        if favorites.is_empty() {
            out.push_str("  (none yet)\n");
        }
        for (i, cell) in favorites.iter().enumerate() {
            write_player(&mut out, i + 1, cell);
        }
        return out;
    }

    let _ = writeln!(out, "search: {:?}", vm.search_text);
    if vm.error_visible {
        out.push_str("! The search failed. Check your connection and try again.\n");
    }

    match vm.overlay {
        Some(ListOverlay::Spinner) => out.push_str("  searching...\n"),
        Some(ListOverlay::StartSearching) => out.push_str("  Start typing to search players and teams\n"),
        Some(ListOverlay::NoResults) => out.push_str("  No results found\n"),
        None => {}
    }
    if vm.overlay.is_some_and(|o| o != ListOverlay::Spinner) {
        return out;
    }

    if !vm.players.is_empty() {
        out.push_str("-- Players --\n");
        for (i, cell) in vm.players.iter().enumerate() {
            write_player(&mut out, i + 1, cell);
        }
        write_more(&mut out, "players", vm.more_players);
    }
    if !vm.teams.is_empty() {
        out.push_str("-- Teams --\n");
        for cell in &vm.teams {
            write_team(&mut out, cell);
        }
        write_more(&mut out, "teams", vm.more_teams);
    }
    out
}

fn write_player(out: &mut String, index: usize, cell: &PlayerCell) {
    let star = if cell.is_favourite { '*' } else { ' ' };
    let _ = writeln!(
        out,
        "{index:>3}. {star} {:<28} Age: {:<4} Club: {}",
        cell.name, cell.age, cell.club
    );
}

fn write_team(out: &mut String, cell: &TeamCell) {
    let _ = writeln!(
        out,
        "     {} {:<28} City: {:<16} Stadium: {}",
        if cell.flag.is_empty() { " " } else { cell.flag.as_str() },
        cell.name,
        cell.city,
        cell.stadium
    );
}

fn write_more(out: &mut String, kind: &str, button: MoreButton) {
    match button {
        MoreButton::Hidden => {}
        MoreButton::Shown => {
            let _ = writeln!(out, "     [:more {kind}]");
        }
        MoreButton::Loading => {
            let _ = writeln!(out, "     loading more {kind}...");
        }
    }
}

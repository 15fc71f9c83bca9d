//! Collection statistics shown on the dashboard

use pagenav_core::Record;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

pub const STATUS_COMPLETED: &str = "Completed";
pub const STATUS_PLAYING: &str = "Playing";
pub const STATUS_NOT_STARTED: &str = "Not started";

/// Summary of a game collection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LibraryStats {
    pub total: usize,
    pub completed: usize,
    pub playing: usize,
    pub backlog: usize,
    pub total_spent: f64,
    pub platforms: usize,
}

/// Price of a game as a number. Missing or unparsable prices count as zero.
pub fn price_of(game: &Record) -> f64 {
    match game.get("price") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// A game's field rendered as text
pub fn text_field(game: &Record, field: &str) -> String {
    match game.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Format an amount with a currency symbol and two decimals
pub fn format_money(currency: &str, amount: f64) -> String {
    format!("{}{:.2}", currency, amount)
}

impl LibraryStats {
    pub fn from_games(games: &[Record]) -> Self {
        let count = |status: &str| {
            games
                .iter()
                .filter(|game| text_field(game, "status") == status)
                .count()
        };

        let platforms: HashSet<String> = games
            .iter()
            .map(|game| text_field(game, "platform"))
            .collect();

        Self {
            total: games.len(),
            completed: count(STATUS_COMPLETED),
            playing: count(STATUS_PLAYING),
            backlog: count(STATUS_NOT_STARTED),
            total_spent: games.iter().map(price_of).sum(),
            platforms: platforms.len(),
        }
    }
}

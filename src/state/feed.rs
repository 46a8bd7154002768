// Retained view of the stats and transaction feeds.
use crate::config::TRANSACTION_RETENTION;
use crate::feeds::{LeaderboardEntry, StatsPayload, TransactionEvent};
use crate::util::truncate_middle;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedState {
    pub stats: StatsPayload,
    /// Newest first, at most `TRANSACTION_RETENTION` entries.
    pub transactions: Vec<TransactionEvent>,
    /// Frames or records dropped because they could not be read.
    pub skipped: u32,
}

impl FeedState {
    pub fn apply_stats(&mut self, stats: StatsPayload) {
        self.stats = stats;
    }

    /// New batch goes in front, in its own order; the tail is cut.
    pub fn push_transactions(&mut self, batch: Vec<TransactionEvent>) {
        let mut merged = batch;
        merged.append(&mut self.transactions);
        merged.truncate(TRANSACTION_RETENTION);
        self.transactions = merged;
    }

    pub fn note_skipped(&mut self) {
        self.skipped = self.skipped.saturating_add(1);
    }

    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.stats.leaderboard
    }

    /// Stat cards in display order, keyed like the feed's field names.
    pub fn stat_cards(&self) -> [(&'static str, u64); 6] {
        let s = &self.stats;
        [
            ("totalPlayers", s.total_players),
            ("deployedBots", s.total_bots),
            ("botsAlive", s.bots_alive),
            ("diamondsMined", s.diamonds_mined),
            ("botsDead", s.bots_dead),
            ("totalTilesMined", s.total_tiles_mined),
        ]
    }
}

pub fn stat_icon(key: &str) -> &'static str {
    match key {
        "totalPlayers" => "/mario.gif",
        "deployedBots" => "/hammer.gif",
        "botsAlive" => "/heart.gif",
        "botsDead" => "/skull.gif",
        "diamondsMined" => "/diamond.gif",
        "totalTilesMined" => "/mining.gif",
        _ => "",
    }
}

pub fn event_color(event_name: &str) -> &'static str {
    match event_name {
        "BombFound" => "#FF4C4C",
        "TileAlreadyMined" => "#E6B800",
        "DiamondFound" => "#4CAF50",
        "TileMined" => "#2196F3",
        _ => "#FFFFFF",
    }
}

pub fn event_points(event_name: &str) -> Option<&'static str> {
    match event_name {
        "TileMined" => Some("+10 points"),
        "DiamondFound" => Some("+5000 points"),
        _ => None,
    }
}

pub fn transaction_line(tx: &TransactionEvent) -> String {
    let who = tx
        .address()
        .map(|a| truncate_middle(a, 6, 4))
        .unwrap_or_else(|| "Unknown".to_string());
    let mut line = format!("{} - {}", tx.event_name, who);
    if let Some(points) = event_points(&tx.event_name) {
        line.push_str(" - ");
        line.push_str(points);
    }
    line
}

pub fn leaderboard_line(rank: usize, entry: &LeaderboardEntry) -> String {
    format!(
        "{}. {} points - {}",
        rank,
        entry.total_score,
        truncate_middle(&entry.id, 14, 14)
    )
}

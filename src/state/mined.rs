// Mined-state mapping fed by the tile feed, keyed by canonical decimal location.
use std::collections::HashMap;

use crate::error::FeedError;
use crate::model::TileId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MineResult {
    Diamond,
    Bomb,
    Empty,
    /// Explicit "nothing revealed yet" marker.
    Unmined,
}

impl MineResult {
    /// Parses a feed `mine_type`, case-insensitively.
    pub fn parse(raw: &str) -> Result<Self, FeedError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "diamond" => Ok(MineResult::Diamond),
            "bomb" => Ok(MineResult::Bomb),
            "empty" => Ok(MineResult::Empty),
            "unmined" | "none" => Ok(MineResult::Unmined),
            _ => Err(FeedError::UnknownMineType(raw.to_string())),
        }
    }

    /// Any revealed outcome, `Empty` included, means the tile cannot be mined again.
    pub fn is_mined(self) -> bool {
        self != MineResult::Unmined
    }
}

/// Decimal string for a hex (`0x...`) or decimal location.
pub fn canonical_location(raw: &str) -> Result<String, FeedError> {
    let s = raw.trim();
    let bad = || FeedError::BadLocation(raw.to_string());
    let value = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if hex.is_empty() {
            return Err(bad());
        }
        u128::from_str_radix(hex, 16).map_err(|_| bad())?
    } else {
        s.parse::<u128>().map_err(|_| bad())?
    };
    Ok(value.to_string())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MinedState {
    results: HashMap<String, MineResult>,
}

impl MinedState {
    /// Stores one feed record; later records for the same tile overwrite earlier ones.
    pub fn record(&mut self, location: &str, mine_type: &str) -> Result<(), FeedError> {
        let key = canonical_location(location)?;
        let result = MineResult::parse(mine_type)?;
        self.results.insert(key, result);
        Ok(())
    }

    pub fn result(&self, tile: TileId) -> Option<MineResult> {
        self.results.get(&tile.to_string()).copied()
    }

    pub fn is_already_mined(&self, tile: TileId) -> bool {
        self.result(tile).is_some_and(MineResult::is_mined)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.results.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_and_decimal_share_a_key() {
        assert_eq!(canonical_location("0x1a").unwrap(), "26");
        assert_eq!(canonical_location("0X1A").unwrap(), "26");
        assert_eq!(canonical_location("26").unwrap(), "26");
        assert_eq!(canonical_location(" 0x0001a ").unwrap(), "26");
    }

    #[test]
    fn garbage_locations_are_rejected() {
        assert!(canonical_location("0x").is_err());
        assert!(canonical_location("0xzz").is_err());
        assert!(canonical_location("tile-9").is_err());
        assert!(canonical_location("").is_err());
    }

    #[test]
    fn absent_tiles_are_not_mined() {
        let state = MinedState::default();
        assert!(!state.is_already_mined(TileId(26)));
    }

    #[test]
    fn any_revealed_result_counts_as_mined() {
        let mut state = MinedState::default();
        state.record("0x1a", "Diamond").unwrap();
        state.record("27", "BOMB").unwrap();
        state.record("28", "Empty").unwrap();
        state.record("29", "unmined").unwrap();
        assert!(state.is_already_mined(TileId(26)));
        assert!(state.is_already_mined(TileId(27)));
        assert!(state.is_already_mined(TileId(28)));
        assert!(!state.is_already_mined(TileId(29)));
        assert_eq!(state.result(TileId(26)), Some(MineResult::Diamond));
    }

    #[test]
    fn duplicate_records_are_idempotent() {
        let mut state = MinedState::default();
        state.record("0x1a", "Bomb").unwrap();
        state.record("26", "Bomb").unwrap();
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn unknown_mine_type_is_an_error() {
        let mut state = MinedState::default();
        assert_eq!(
            state.record("26", "Gold"),
            Err(FeedError::UnknownMineType("Gold".into()))
        );
        assert!(state.is_empty());
    }
}

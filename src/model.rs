//! Core data model for Gridy.
//! Tile addressing across the four drill-down layers, plus the session reducer
//! that every input (pointer, feeds, wallet) is funnelled through.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use yew::Reducible;

use crate::error::GameError;
use crate::feeds::{FeedEvent, FeedMessage};
use crate::state::{FeedState, MinedState, Navigator};
use crate::util::cwarn;
use crate::wallet::WalletSession;

/// Real board positions covered by one cell at layers 1..=4.
pub const FAN_OUT: [u64; 4] = [200_000, 2_000, 20, 1];

/// Cells in the layer-4 strip. Fixed by the addressing scheme, not by `FAN_OUT`.
pub const LEAF_STRIP_LEN: u64 = 20;

/// Number of selections needed before the leaf strip is addressable.
pub const MAX_PATH_LEN: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    One,
    Two,
    Three,
    Four,
}

impl Layer {
    pub const ALL: [Layer; 4] = [Layer::One, Layer::Two, Layer::Three, Layer::Four];

    /// Layer shown after `depth` selections.
    pub fn from_depth(depth: usize) -> Option<Layer> {
        Self::ALL.get(depth).copied()
    }

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn index(self) -> usize {
        match self {
            Layer::One => 0,
            Layer::Two => 1,
            Layer::Three => 2,
            Layer::Four => 3,
        }
    }

    pub fn fan_out(self) -> u64 {
        FAN_OUT[self.index()]
    }

    pub fn is_leaf(self) -> bool {
        self == Layer::Four
    }

    /// Cells displayed for this layer: 10x10 above the leaves, a 20-cell strip at the bottom.
    pub fn grid_cells(self) -> usize {
        if self.is_leaf() { LEAF_STRIP_LEN as usize } else { 100 }
    }

    pub fn grid_columns(self) -> usize {
        if self.is_leaf() { 4 } else { 10 }
    }

    pub fn prev(self) -> Option<Layer> {
        self.index().checked_sub(1).and_then(Self::from_depth)
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Absolute 1-based board position of a leaf tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u64);

impl TileId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive, 1-based span of real board positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRange {
    pub start: u64,
    pub end: u64,
}

impl TileRange {
    #[cfg(test)]
    fn width(&self) -> u64 {
        self.end - self.start + 1
    }
}

impl fmt::Display for TileRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Offset contributed by the selections made so far.
pub fn path_offset(path: &[usize]) -> u64 {
    path.iter()
        .zip(FAN_OUT.iter())
        .map(|(&sel, &mult)| sel as u64 * mult)
        .sum()
}

/// Range represented by the hovered cell at `layer`. Indices are trusted to be in-grid.
pub fn compute_display_range(
    path: &[usize],
    layer: Layer,
    hovered: Option<usize>,
) -> Option<TileRange> {
    let hovered = hovered? as u64;
    let base = layer.fan_out();
    let start = path_offset(path) + hovered * base + 1;
    Some(TileRange {
        start,
        end: start + base - 1,
    })
}

/// Range of the 20 leaves under a complete three-step path.
pub fn compute_leaf_range_for_path(path: &[usize]) -> Option<TileRange> {
    if path.len() < MAX_PATH_LEN {
        return None;
    }
    let offset = path_offset(&path[..MAX_PATH_LEN]);
    Some(TileRange {
        start: offset + 1,
        end: offset + LEAF_STRIP_LEN,
    })
}

/// Absolute id of leaf `leaf_index` under `path`; this is what gets submitted on chain.
pub fn resolve_leaf_tile_id(path: &[usize], leaf_index: usize) -> Option<TileId> {
    compute_leaf_range_for_path(path).map(|r| TileId(r.start + leaf_index as u64))
}

/// Status line under the grid while hovering.
pub fn hover_caption(path: &[usize], layer: Layer, hovered: usize) -> Option<String> {
    let range = compute_display_range(path, layer, Some(hovered))?;
    Some(format!(
        "Layer {} . {} tiles visible . Tile {} represents tiles from ({})",
        layer,
        layer.grid_cells(),
        hovered + 1,
        range
    ))
}

// ---------------- Notices -----------------
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    /// Blocking: deployment needs a wallet.
    ConnectWallet,
    AlreadyMined(TileId),
    Deploying(TileId),
    Deployed { tile: TileId, tx_hash: String },
    DeployFailed { tile: TileId, reason: String },
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::ConnectWallet => "Wallet required",
            Notice::AlreadyMined(_) => "Tile already mined",
            Notice::Deploying(_) => "Deploying bot",
            Notice::Deployed { .. } => "Bot deployed",
            Notice::DeployFailed { .. } => "Deployment failed",
        }
    }

    pub fn body(&self) -> String {
        match self {
            Notice::ConnectWallet => {
                "Please connect your wallet before deploying a bot.".to_string()
            }
            Notice::AlreadyMined(tile) => {
                format!("Tile {} has already been mined. Pick another tile.", tile)
            }
            Notice::Deploying(tile) => {
                format!("Confirm the transaction in your wallet to deploy on tile {}.", tile)
            }
            Notice::Deployed { tile, tx_hash } => {
                format!("Bot deployed on tile {}. Transaction: {}", tile, tx_hash)
            }
            Notice::DeployFailed { tile, reason } => {
                format!("Could not deploy on tile {}: {}", tile, reason)
            }
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Notice::ConnectWallet | Notice::AlreadyMined(_) | Notice::DeployFailed { .. }
        )
    }
}

// ---------------- Session state & reducer -----------------
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameState {
    pub nav: Navigator,
    pub hovered: Option<usize>,
    pub feed: FeedState,
    pub mined: MinedState,
    pub wallet: Option<WalletSession>,
    pub notice: Option<Notice>,
}

impl GameState {
    pub fn layer(&self) -> Layer {
        self.nav.layer()
    }

    pub fn display_range(&self) -> Option<TileRange> {
        compute_display_range(self.nav.path(), self.nav.layer(), self.hovered)
    }

    pub fn leaf_range(&self) -> Option<TileRange> {
        compute_leaf_range_for_path(self.nav.path())
    }

    /// Checks a layer-4 click before anything is sent to the bridge.
    pub fn deploy_target(&self, leaf_index: usize) -> Result<(TileId, WalletSession), GameError> {
        if !self.nav.layer().is_leaf() {
            return Err(GameError::NotAtLeafLayer);
        }
        let tile = resolve_leaf_tile_id(self.nav.path(), leaf_index)
            .ok_or(GameError::NotAtLeafLayer)?;
        let wallet = self.wallet.clone().ok_or(GameError::NoWallet)?;
        if self.mined.is_already_mined(tile) {
            return Err(GameError::AlreadyMined(tile));
        }
        Ok((tile, wallet))
    }
}

#[derive(Clone, Debug)]
pub enum GameAction {
    Hover(Option<usize>),
    BeginAdvance(usize),
    BeginRetreat,
    CompleteTransition,
    Feed(FeedEvent),
    WalletConnected(WalletSession),
    WalletDisconnected,
    ShowNotice(Notice),
    DismissNotice,
}

impl Reducible for GameState {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use GameAction::*;
        let mut new = (*self).clone();
        match action {
            Hover(idx) => {
                if new.hovered == idx {
                    return self;
                }
                new.hovered = idx;
            }
            BeginAdvance(idx) => {
                if !new.nav.begin_advance(idx) {
                    return self;
                }
            }
            BeginRetreat => {
                if !new.nav.begin_retreat() {
                    return self;
                }
            }
            CompleteTransition => {
                if !new.nav.complete_transition() {
                    return self;
                }
                new.hovered = None;
            }
            Feed(FeedEvent::Message(msg)) => match msg {
                FeedMessage::Stats(stats) => new.feed.apply_stats(stats),
                FeedMessage::Transactions(batch) => new.feed.push_transactions(batch),
                FeedMessage::TileData(records) => {
                    for rec in records {
                        if let Err(e) = new.mined.record(&rec.location, &rec.mine_type) {
                            cwarn(&format!("tile feed: skipping record: {}", e));
                            new.feed.note_skipped();
                        }
                    }
                }
            },
            Feed(FeedEvent::Rejected { feed, error }) => {
                cwarn(&format!("{} feed: {}", feed, error));
                new.feed.note_skipped();
            }
            WalletConnected(session) => {
                new.wallet = Some(session);
                if new.notice == Some(Notice::ConnectWallet) {
                    new.notice = None;
                }
            }
            WalletDisconnected => {
                new.wallet = None;
            }
            ShowNotice(n) => {
                new.notice = Some(n);
            }
            DismissNotice => {
                new.notice = None;
            }
        }
        Rc::new(new)
    }
}

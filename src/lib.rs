//! Gridy: browser client for the tile-mining game.

pub mod bridge;
pub mod components;
pub mod config;
pub mod error;
pub mod feeds;
pub mod model;
pub mod session;
pub mod state;
pub mod util;
pub mod wallet;

pub use error::{FeedError, GameError};
pub use model::{
    FAN_OUT, Layer, TileId, TileRange, compute_display_range, compute_leaf_range_for_path,
    resolve_leaf_tile_id,
};

/// Mounts the app on the document body.
pub fn run() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    yew::Renderer::<components::App>::new().render();
}

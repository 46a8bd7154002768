pub mod app;
pub mod game_view;
pub mod landing_page;
pub mod leaderboard;
pub mod notice_modal;
pub mod rules_modal;
pub mod stats_panel;
pub mod tile_grid;
pub mod transaction_list;
pub mod wallet_connector;

pub use app::App;

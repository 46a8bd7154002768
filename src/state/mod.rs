pub mod feed;
pub mod landing;
pub mod mined;
pub mod navigation;

pub use feed::FeedState;
pub use landing::LandingBoard;
pub use mined::{MineResult, MinedState, canonical_location};
pub use navigation::{Move, Navigator};

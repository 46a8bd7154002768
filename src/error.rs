use std::fmt;

use crate::model::TileId;
use crate::wallet::ProviderKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    /// Deployment attempted without a connected account.
    NoWallet,
    /// The provider's injected object was not found and no fallback is allowed.
    ProviderNotDetected(ProviderKind),
    /// The provider threw during enable or address retrieval.
    ProviderConnect { provider: ProviderKind, reason: String },
    /// The leaf tile already has a recorded mine result.
    AlreadyMined(TileId),
    /// The approve + deposit chain was rejected or reverted.
    Submission(String),
    /// A deployment was requested while not on the leaf layer.
    NotAtLeafLayer,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NoWallet => {
                write!(f, "No wallet connected. Connect a wallet to deploy a bot.")
            }
            GameError::ProviderNotDetected(p) => write!(
                f,
                "{} wallet not detected or connection failed. Please ensure the extension is installed correctly.",
                p.name()
            ),
            GameError::ProviderConnect { provider, reason } => {
                write!(f, "{} connection failed: {}", provider.name(), reason)
            }
            GameError::AlreadyMined(tile) => write!(f, "Tile {} has already been mined.", tile),
            GameError::Submission(reason) => write!(f, "Bot deployment failed: {}", reason),
            GameError::NotAtLeafLayer => write!(f, "Bots can only be deployed on layer 4."),
        }
    }
}

impl std::error::Error for GameError {}

/// Why a single feed message was skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedError {
    Json(String),
    BadLocation(String),
    UnknownMineType(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Json(e) => write!(f, "malformed message: {}", e),
            FeedError::BadLocation(l) => write!(f, "unreadable tile location {:?}", l),
            FeedError::UnknownMineType(t) => write!(f, "unknown mine type {:?}", t),
        }
    }
}

impl std::error::Error for FeedError {}

impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> Self {
        FeedError::Json(e.to_string())
    }
}

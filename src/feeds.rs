//! Live feeds: wire envelopes, per-message parsing and the WebSocket subscriptions.
//!
//! Every socket parses its own frames and forwards the result to one sink
//! callback, so a malformed frame is reported and skipped instead of tearing
//! the subscription down.

use serde::{Deserialize, Serialize};
use std::fmt;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{CloseEvent, MessageEvent, WebSocket};
use yew::Callback;

use crate::error::FeedError;
use crate::model::{Layer, TileRange};
use crate::util::{clog, cwarn, js_error_message};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsPayload {
    pub total_players: u64,
    pub total_bots: u64,
    pub bots_alive: u64,
    pub bots_dead: u64,
    pub diamonds_mined: u64,
    #[serde(default)]
    pub total_tiles_mined: u64,
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub total_score: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TransactionEvent {
    pub event_name: String,
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

impl TransactionEvent {
    /// First event argument, the bot address.
    pub fn address(&self) -> Option<&str> {
        self.data.first().and_then(|v| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TileRecord {
    pub location: String,
    pub mine_type: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum FeedMessage {
    #[serde(rename = "stats")]
    Stats(StatsPayload),
    #[serde(rename = "transactions")]
    Transactions(Vec<TransactionEvent>),
    #[serde(rename = "tileData")]
    TileData(Vec<TileRecord>),
}

impl FeedMessage {
    pub fn parse(raw: &str) -> Result<Self, FeedError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedKind {
    Transactions,
    Stats,
    Tiles,
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FeedKind::Transactions => "transaction",
            FeedKind::Stats => "stats",
            FeedKind::Tiles => "tile",
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FeedEvent {
    Message(FeedMessage),
    Rejected { feed: FeedKind, error: FeedError },
}

impl FeedEvent {
    pub fn from_frame(feed: FeedKind, raw: &str) -> Self {
        match FeedMessage::parse(raw) {
            Ok(msg) => FeedEvent::Message(msg),
            Err(error) => FeedEvent::Rejected { feed, error },
        }
    }
}

/// Outbound request for the mined state of the addressed leaf strip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewTilesRequest {
    pub action: &'static str,
    pub layer: u8,
    pub tile_range: String,
}

impl ViewTilesRequest {
    pub fn for_leaf_range(range: TileRange) -> Self {
        Self {
            action: "viewTiles",
            layer: Layer::Four.number(),
            tile_range: range.to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        // Only string and integer fields; serialisation cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

// ---------------- Sockets -----------------

/// Connection state of a feed socket, folded from `WebSocket.readyState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SocketPhase {
    Connecting,
    Open,
    /// Closing or closed; nothing reopens it.
    Closed,
}

/// One open feed socket. Dropping it closes the socket and releases its handlers.
pub struct FeedSocket {
    ws: WebSocket,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_open: Closure<dyn FnMut()>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
}

impl FeedSocket {
    /// Opens `url` and forwards each text frame, parsed, to `sink`.
    /// `on_open` runs once the connection is established.
    pub fn connect(
        kind: FeedKind,
        url: &str,
        sink: Callback<FeedEvent>,
        on_open: Option<Box<dyn Fn(&WebSocket)>>,
    ) -> Result<Self, JsValue> {
        let ws = WebSocket::new(url)?;

        let on_message = Closure::wrap(Box::new(move |e: MessageEvent| {
            let Some(text) = e.data().as_string() else {
                cwarn(&format!("{} feed: ignoring non-text frame", kind));
                return;
            };
            sink.emit(FeedEvent::from_frame(kind, &text));
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        let on_open_cb = {
            let ws_handle = ws.clone();
            Closure::wrap(Box::new(move || {
                clog(&format!("{} feed connected", kind));
                if let Some(f) = &on_open {
                    f(&ws_handle);
                }
            }) as Box<dyn FnMut()>)
        };
        ws.set_onopen(Some(on_open_cb.as_ref().unchecked_ref()));

        let on_close = Closure::wrap(Box::new(move |e: CloseEvent| {
            cwarn(&format!("{} feed closed (code {})", kind, e.code()));
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        Ok(Self {
            ws,
            _on_message: on_message,
            _on_open: on_open_cb,
            _on_close: on_close,
        })
    }

    pub fn phase(&self) -> SocketPhase {
        match self.ws.ready_state() {
            WebSocket::CONNECTING => SocketPhase::Connecting,
            WebSocket::OPEN => SocketPhase::Open,
            _ => SocketPhase::Closed,
        }
    }

    pub fn send(&self, text: &str) -> Result<(), String> {
        self.ws.send_with_str(text).map_err(|e| js_error_message(&e))
    }

    pub fn close(&self) {
        self.ws.set_onmessage(None);
        self.ws.set_onopen(None);
        self.ws.set_onclose(None);
        let _ = self.ws.close();
    }
}

impl Drop for FeedSocket {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stats_without_tiles_mined() {
        let raw = r#"{"type":"stats","data":{"totalPlayers":4,"totalBots":9,"botsAlive":6,
            "botsDead":3,"diamondsMined":2,
            "leaderboard":[{"_id":"0x0123456789abcdef0123456789abcdef","total_score":5010}]}}"#;
        let FeedMessage::Stats(stats) = FeedMessage::parse(raw).unwrap() else {
            panic!("expected stats");
        };
        assert_eq!(stats.total_tiles_mined, 0);
        assert_eq!(stats.total_bots, 9);
        assert_eq!(stats.leaderboard.len(), 1);
        assert_eq!(stats.leaderboard[0].total_score, 5010);
    }

    #[test]
    fn parses_transactions() {
        let raw = r#"{"type":"transactions","data":[
            {"event_name":"DiamondFound","data":["0x0499aa","0x1a"]},
            {"event_name":"TileMined","data":[]}]}"#;
        let FeedMessage::Transactions(txs) = FeedMessage::parse(raw).unwrap() else {
            panic!("expected transactions");
        };
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].address(), Some("0x0499aa"));
        assert_eq!(txs[1].address(), None);
    }

    #[test]
    fn parses_tile_data() {
        let raw = r#"{"type":"tileData","data":[{"location":"0x1a","mine_type":"Diamond"}]}"#;
        assert_eq!(
            FeedMessage::parse(raw).unwrap(),
            FeedMessage::TileData(vec![TileRecord {
                location: "0x1a".into(),
                mine_type: "Diamond".into(),
            }])
        );
    }

    #[test]
    fn malformed_frames_become_rejections() {
        for raw in [
            "not json",
            r#"{"type":"weather","data":{}}"#,
            r#"{"type":"stats","data":{"totalPlayers":"many"}}"#,
        ] {
            match FeedEvent::from_frame(FeedKind::Stats, raw) {
                FeedEvent::Rejected { feed, error: FeedError::Json(_) } => {
                    assert_eq!(feed, FeedKind::Stats)
                }
                other => panic!("expected rejection, got {:?}", other),
            }
        }
    }

    #[test]
    fn view_request_shape() {
        let req = ViewTilesRequest::for_leaf_range(TileRange { start: 406_021, end: 406_040 });
        let v: serde_json::Value = serde_json::from_str(&req.to_json()).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"action":"viewTiles","layer":4,"tileRange":"406021-406040"})
        );
    }
}

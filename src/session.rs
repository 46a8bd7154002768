//! Per-visit session context.
//!
//! Built when the game view mounts and dropped when it unmounts. Owns the
//! three feed sockets and the connected wallet's account handle; dropping it
//! closes every socket.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys::WebSocket;
use yew::Callback;

use crate::bridge::JsAccount;
use crate::config::Endpoints;
use crate::error::GameError;
use crate::feeds::{FeedEvent, FeedKind, FeedSocket, SocketPhase, ViewTilesRequest};
use crate::model::TileRange;
use crate::util::{clog, cwarn, js_error_message};
use crate::wallet::Connected;

/// The `viewTiles` frame waiting for the tile socket to open. Latest wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingView {
    frame: Option<String>,
}

impl PendingView {
    pub fn queue(&mut self, frame: String) {
        self.frame = Some(frame);
    }

    pub fn take(&mut self) -> Option<String> {
        self.frame.take()
    }
}

/// What to do with a view request given the tile socket's state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewRoute {
    Send(String),
    Queued,
    Dropped(&'static str),
}

pub fn route_view_request(
    phase: Option<SocketPhase>,
    frame: String,
    pending: &mut PendingView,
) -> ViewRoute {
    match phase {
        Some(SocketPhase::Open) => ViewRoute::Send(frame),
        Some(SocketPhase::Connecting) => {
            pending.queue(frame);
            ViewRoute::Queued
        }
        Some(SocketPhase::Closed) => ViewRoute::Dropped("tile feed closed"),
        None => ViewRoute::Dropped("tile feed unavailable"),
    }
}

pub struct Session {
    transactions: Option<FeedSocket>,
    stats: Option<FeedSocket>,
    tiles: Option<FeedSocket>,
    pending_view: Rc<RefCell<PendingView>>,
    wallet: RefCell<Option<Connected<JsValue>>>,
}

impl Session {
    /// Opens all three feeds; every parsed frame goes to `sink`.
    /// A feed that fails to open is logged and left out.
    pub fn open(endpoints: &Endpoints, sink: Callback<FeedEvent>) -> Self {
        let pending_view = Rc::new(RefCell::new(PendingView::default()));

        let flush_pending = {
            let pending_view = pending_view.clone();
            Box::new(move |ws: &WebSocket| {
                if let Some(frame) = pending_view.borrow_mut().take() {
                    if let Err(e) = ws.send_with_str(&frame) {
                        let msg = js_error_message(&e);
                        cwarn(&format!("tile feed: queued view request failed: {}", msg));
                    }
                }
            }) as Box<dyn Fn(&WebSocket)>
        };

        let open = |kind: FeedKind, url: &str, on_open: Option<Box<dyn Fn(&WebSocket)>>| {
            match FeedSocket::connect(kind, url, sink.clone(), on_open) {
                Ok(s) => Some(s),
                Err(e) => {
                    cwarn(&format!("{} feed: cannot open {}: {}", kind, url, js_error_message(&e)));
                    None
                }
            }
        };

        Self {
            transactions: open(FeedKind::Transactions, &endpoints.transactions, None),
            stats: open(FeedKind::Stats, &endpoints.stats, None),
            tiles: open(FeedKind::Tiles, &endpoints.tiles, Some(flush_pending)),
            pending_view,
            wallet: RefCell::new(None),
        }
    }

    /// Asks the tile feed for the mined state of `range`, now or once the socket opens.
    pub fn request_leaf_range(&self, range: TileRange) {
        let frame = ViewTilesRequest::for_leaf_range(range).to_json();
        let phase = self.tiles.as_ref().map(FeedSocket::phase);
        match route_view_request(phase, frame, &mut self.pending_view.borrow_mut()) {
            ViewRoute::Send(frame) => {
                if let Some(sock) = &self.tiles {
                    if let Err(e) = sock.send(&frame) {
                        cwarn(&format!("tile feed: view request failed: {}", e));
                    }
                }
            }
            ViewRoute::Queued => {}
            ViewRoute::Dropped(why) => {
                cwarn(&format!("{}; leaf tiles will show no mined state", why));
            }
        }
    }

    pub fn attach_wallet(&self, wallet: Connected<JsValue>) {
        *self.wallet.borrow_mut() = Some(wallet);
    }

    pub fn detach_wallet(&self) {
        self.wallet.borrow_mut().take();
    }

    /// Signing account for the connected wallet.
    pub fn account(&self) -> Result<JsAccount, GameError> {
        let wallet = self.wallet.borrow();
        let connected = wallet.as_ref().ok_or(GameError::NoWallet)?;
        JsAccount::from_provider(&connected.account)
    }

    pub fn close(&mut self) {
        let socks = [self.transactions.take(), self.stats.take(), self.tiles.take()];
        for sock in socks.into_iter().flatten() {
            sock.close();
        }
        self.pending_view.borrow_mut().take();
        clog("session closed");
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_view_request_wins() {
        let mut pending = PendingView::default();
        pending.queue("first".into());
        pending.queue("second".into());
        assert_eq!(pending.take().as_deref(), Some("second"));
    }

    #[test]
    fn queued_view_is_flushed_once() {
        let mut pending = PendingView::default();
        pending.queue("frame".into());
        assert_eq!(pending.take().as_deref(), Some("frame"));
        assert_eq!(pending.take(), None);
    }

    #[test]
    fn connecting_socket_queues_the_request() {
        let mut pending = PendingView::default();
        let route = route_view_request(Some(SocketPhase::Connecting), "a".into(), &mut pending);
        assert_eq!(route, ViewRoute::Queued);
        let route = route_view_request(Some(SocketPhase::Connecting), "b".into(), &mut pending);
        assert_eq!(route, ViewRoute::Queued);
        assert_eq!(pending.take().as_deref(), Some("b"));
    }

    #[test]
    fn open_socket_sends_immediately() {
        let mut pending = PendingView::default();
        let route = route_view_request(Some(SocketPhase::Open), "a".into(), &mut pending);
        assert_eq!(route, ViewRoute::Send("a".into()));
        assert_eq!(pending.take(), None);
    }

    #[test]
    fn closed_or_missing_socket_drops_the_request() {
        let mut pending = PendingView::default();
        let route = route_view_request(Some(SocketPhase::Closed), "a".into(), &mut pending);
        assert!(matches!(route, ViewRoute::Dropped(_)));
        let route = route_view_request(None, "b".into(), &mut pending);
        assert!(matches!(route, ViewRoute::Dropped(_)));
        assert_eq!(pending, PendingView::default());
    }
}

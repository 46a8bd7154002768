use gloo::timers::callback::Timeout;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{
    leaderboard::Leaderboard, notice_modal::NoticeModal, rules_modal::RulesModal,
    stats_panel::StatsPanel, tile_grid::TileGrid, transaction_list::TransactionList,
    wallet_connector::WalletConnector,
};
use crate::bridge::deposit_with_message;
use crate::config::{Endpoints, TRANSITION_DELAY_MS};
use crate::error::GameError;
use crate::feeds::FeedEvent;
use crate::model::{GameAction, GameState, Notice, TileId, hover_caption, resolve_leaf_tile_id};
use crate::session::Session;
use crate::state::MineResult;
use crate::wallet::{Connected, disconnect_wallet, reconnect_remembered_wallet};

/// Releases the transition lock once the fade has run.
fn schedule_transition_end(dispatcher: UseReducerDispatcher<GameState>) {
    Timeout::new(TRANSITION_DELAY_MS, move || {
        dispatcher.dispatch(GameAction::CompleteTransition)
    })
    .forget();
}

fn deploy_notice(tile: TileId, err: GameError) -> Notice {
    match err {
        GameError::NoWallet => Notice::ConnectWallet,
        GameError::AlreadyMined(t) => Notice::AlreadyMined(t),
        GameError::Submission(reason) => Notice::DeployFailed { tile, reason },
        other => Notice::DeployFailed {
            tile,
            reason: other.to_string(),
        },
    }
}

#[function_component]
pub fn GameView() -> Html {
    let state = use_reducer(GameState::default);
    let session = use_mut_ref(|| None::<Session>);
    let show_rules = use_state(|| false);

    // Session: open the feeds on mount, close them on unmount.
    {
        let session = session.clone();
        let dispatcher = state.dispatcher();
        use_effect_with((), move |_| {
            let sink =
                Callback::from(move |ev: FeedEvent| dispatcher.dispatch(GameAction::Feed(ev)));
            *session.borrow_mut() = Some(Session::open(&Endpoints::from_build_env(), sink));
            move || {
                session.borrow_mut().take();
            }
        });
    }
    // Silently reconnect the wallet used last time, if its extension is still there.
    {
        let session = session.clone();
        let dispatcher = state.dispatcher();
        use_effect_with((), move |_| {
            spawn_local(async move {
                if let Some(c) = reconnect_remembered_wallet().await {
                    dispatcher.dispatch(GameAction::WalletConnected(c.session.clone()));
                    if let Some(s) = session.borrow().as_ref() {
                        s.attach_wallet(c);
                    }
                }
            });
            || ()
        });
    }
    // Ask for the mined state whenever a new leaf strip comes into view.
    {
        let session = session.clone();
        use_effect_with(state.leaf_range(), move |leaf| {
            if let Some(range) = *leaf {
                if let Some(s) = session.borrow().as_ref() {
                    s.request_leaf_range(range);
                }
            }
            || ()
        });
    }

    let on_hover = {
        let dispatcher = state.dispatcher();
        Callback::from(move |idx: Option<usize>| dispatcher.dispatch(GameAction::Hover(idx)))
    };
    let on_tile_click = {
        let state = state.clone();
        let session = session.clone();
        Callback::from(move |idx: usize| {
            if state.nav.is_transitioning() {
                return;
            }
            if !state.layer().is_leaf() {
                state.dispatch(GameAction::BeginAdvance(idx));
                schedule_transition_end(state.dispatcher());
                return;
            }
            let (tile, wallet) = match state.deploy_target(idx) {
                Ok(t) => t,
                Err(GameError::NotAtLeafLayer) => return,
                Err(e) => {
                    let tile =
                        resolve_leaf_tile_id(state.nav.path(), idx).unwrap_or(TileId(0));
                    state.dispatch(GameAction::ShowNotice(deploy_notice(tile, e)));
                    return;
                }
            };
            let account = match session.borrow().as_ref().map(Session::account) {
                Some(Ok(a)) => a,
                _ => {
                    state.dispatch(GameAction::ShowNotice(Notice::ConnectWallet));
                    return;
                }
            };
            state.dispatch(GameAction::ShowNotice(Notice::Deploying(tile)));
            let dispatcher = state.dispatcher();
            spawn_local(async move {
                let notice = match deposit_with_message(&account, &wallet.address, tile).await {
                    Ok(tx_hash) => Notice::Deployed { tile, tx_hash },
                    Err(e) => deploy_notice(tile, e),
                };
                dispatcher.dispatch(GameAction::ShowNotice(notice));
            });
        })
    };
    let on_back = {
        let state = state.clone();
        Callback::from(move |_| {
            if state.nav.is_transitioning() || state.nav.path().is_empty() {
                return;
            }
            state.dispatch(GameAction::BeginRetreat);
            schedule_transition_end(state.dispatcher());
        })
    };
    let on_connect = {
        let session = session.clone();
        let dispatcher = state.dispatcher();
        Callback::from(move |c: Connected<JsValue>| {
            dispatcher.dispatch(GameAction::WalletConnected(c.session.clone()));
            if let Some(s) = session.borrow().as_ref() {
                s.attach_wallet(c);
            }
        })
    };
    let on_disconnect = {
        let session = session.clone();
        let dispatcher = state.dispatcher();
        Callback::from(move |_| {
            disconnect_wallet();
            if let Some(s) = session.borrow().as_ref() {
                s.detach_wallet();
            }
            dispatcher.dispatch(GameAction::WalletDisconnected);
        })
    };
    let dismiss_notice = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(GameAction::DismissNotice))
    };
    let open_rules = {
        let show_rules = show_rules.clone();
        Callback::from(move |_| show_rules.set(true))
    };
    let close_rules = {
        let show_rules = show_rules.clone();
        Callback::from(move |_| show_rules.set(false))
    };

    let layer = state.layer();
    let leaf_results: Vec<Option<MineResult>> = match state.leaf_range() {
        Some(r) if layer.is_leaf() => {
            (r.start..=r.end).map(|p| state.mined.result(TileId(p))).collect()
        }
        _ => Vec::new(),
    };
    let caption = state
        .hovered
        .and_then(|h| hover_caption(state.nav.path(), layer, h))
        .unwrap_or_default();
    let fade = if state.nav.is_transitioning() { "fade-out" } else { "fade-in" };

    html! {
        <div class="app-container">
            <div class="header" style="display:flex; justify-content:space-between; align-items:center;">
                <h1>{"Gridy"}</h1>
                <div style="display:flex; gap:8px;">
                    <button onclick={open_rules}>{"RULES"}</button>
                    <WalletConnector session={state.wallet.clone()} {on_connect} {on_disconnect} />
                </div>
            </div>

            <StatsPanel cards={state.feed.stat_cards().to_vec()} skipped={state.feed.skipped} />

            <div class="main-content" style="display:flex; gap:16px; align-items:flex-start;">
                <TransactionList transactions={state.feed.transactions.clone()} />

                <div class={classes!("grid-section", fade)}>
                    { if let Some(prev) = layer.prev() {
                        let onclick = on_back.clone();
                        html! { <button {onclick}>{ format!("← Back to Layer {}", prev) }</button> }
                    } else { html! {} } }
                    <TileGrid {layer} {leaf_results} {on_hover} on_click={on_tile_click} />
                    <div class="hover-info">{ caption }</div>
                </div>

                <Leaderboard entries={state.feed.leaderboard().to_vec()} />
            </div>

            <NoticeModal notice={state.notice.clone()} on_close={dismiss_notice} />
            <RulesModal show={*show_rules} on_close={close_rules} />
        </div>
    }
}

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::util::cerror;
use crate::wallet::{
    Connected, ProviderKind, WalletSession, available_wallets, connect_browser_wallet,
};

#[derive(Properties, PartialEq, Clone)]
pub struct WalletConnectorProps {
    pub session: Option<WalletSession>,
    pub on_connect: Callback<Connected<JsValue>>,
    pub on_disconnect: Callback<()>,
}

#[function_component]
pub fn WalletConnector(props: &WalletConnectorProps) -> Html {
    let show_modal = use_state(|| false);
    let connecting = use_state(|| None::<ProviderKind>);
    let error = use_state(|| None::<String>);
    let wallets = use_state(available_wallets);

    let open_cb = {
        let show_modal = show_modal.clone();
        let error = error.clone();
        Callback::from(move |_| {
            error.set(None);
            show_modal.set(true);
        })
    };
    let close_cb = {
        let show_modal = show_modal.clone();
        Callback::from(move |_| show_modal.set(false))
    };
    let connect = {
        let show_modal = show_modal.clone();
        let connecting = connecting.clone();
        let error = error.clone();
        let on_connect = props.on_connect.clone();
        Callback::from(move |kind: ProviderKind| {
            connecting.set(Some(kind));
            error.set(None);
            let show_modal = show_modal.clone();
            let connecting = connecting.clone();
            let error = error.clone();
            let on_connect = on_connect.clone();
            spawn_local(async move {
                match connect_browser_wallet(kind).await {
                    Ok(c) => {
                        on_connect.emit(c);
                        show_modal.set(false);
                    }
                    Err(e) => {
                        cerror(&format!("wallet connection error: {}", e));
                        error.set(Some(format!("Failed to connect: {}", e)));
                    }
                }
                connecting.set(None);
            });
        })
    };
    let disconnect_cb = {
        let show_modal = show_modal.clone();
        let cb = props.on_disconnect.clone();
        Callback::from(move |_| {
            cb.emit(());
            show_modal.set(false);
        })
    };

    let label = props
        .session
        .as_ref()
        .map(|s| s.button_label())
        .unwrap_or_else(|| "Connect Wallet".to_string());
    let busy = connecting.is_some();

    let body = if let Some(s) = &props.session {
        html! {
            <div class="connected-wallet">
                <h4>{"Connected Wallet"}</h4>
                <div style="margin:10px 0; padding:15px; border:2px solid #000000;">
                    <div><strong>{"Provider: "}</strong>{ s.provider.name() }</div>
                    <div style="word-break:break-all;"><strong>{"Address: "}</strong>{ s.address.clone() }</div>
                    <div style="margin-top:15px;">
                        <button onclick={disconnect_cb} style="background:#ff5555; color:#ffffff;">{"Disconnect Wallet"}</button>
                    </div>
                </div>
            </div>
        }
    } else {
        html! {
            <div class="connect-wallet-section">
                <h4>{"Connect a Wallet"}</h4>
                <p>{"Select a wallet provider to connect:"}</p>
                <div style="display:flex; flex-direction:column; gap:10px; margin:15px 0;">
                    { for wallets.iter().map(|kind| {
                        let kind = *kind;
                        let pending = *connecting == Some(kind);
                        let onclick = {
                            let connect = connect.clone();
                            Callback::from(move |_| connect.emit(kind))
                        };
                        html! {
                            <button {onclick} disabled={pending} class="wallet-option-button"
                                style="display:flex; align-items:center; justify-content:center; gap:10px;">
                                <img src={kind.icon()} alt={kind.name()} style="width:20px; height:20px;" />
                                { format!("Connect {}{}", kind.name(), if pending { " ..." } else { "" }) }
                            </button>
                        }
                    }) }
                </div>
            </div>
        }
    };

    html! {
        <>
            <button onclick={open_cb}>{ label }</button>
            { if *show_modal {
                html! {<div style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:60;">
                    <div class="wallet-management" style="background:#ffffff; color:#000000; border:3px solid #000000; padding:16px 20px; min-width:340px; max-width:480px;">
                        <h3 style="margin:0 0 8px 0;">{"Wallet Management"}</h3>
                        { if let Some(msg) = &*error {
                            html! { <div class="error-message" style="color:red; margin:10px 0; padding:10px; background-color:#ffeeee; border-radius:4px;">{ msg.clone() }</div> }
                        } else { html! {} } }
                        { body }
                        <div style="margin-top:20px; text-align:right;">
                            <button onclick={close_cb} disabled={busy}>{"Close"}</button>
                        </div>
                    </div>
                </div>}
            } else { html! {} } }
        </>
    }
}

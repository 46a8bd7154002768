// Browser tests for the remembered wallet. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use gridy::config::STORAGE_LAST_WALLET;
use gridy::wallet::{
    ProviderKind, connect_browser_wallet, disconnect_wallet, reconnect_remembered_wallet,
    remembered_wallet,
};
use js_sys::{Function, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

/// Injects a fake Argent X that records the `showModal` flag it was enabled with.
fn install_fake_argent() {
    Function::new_no_args(
        r#"
        window.__gridyShowModal = null;
        window.starknet_argentX = {
            selectedAddress: "0xabc",
            enable: function (opts) {
                window.__gridyShowModal = opts ? opts.showModal : null;
                return Promise.resolve(["0xabc"]);
            },
            request: function () { return Promise.resolve(["0xabc"]); },
        };
        "#,
    )
    .call0(&JsValue::NULL)
    .expect("install fake wallet");
}

fn shown_modal() -> Option<bool> {
    let win = web_sys::window().expect("window");
    Reflect::get(&win, &"__gridyShowModal".into()).ok()?.as_bool()
}

fn clear_storage() {
    let store = web_sys::window().unwrap().local_storage().unwrap().unwrap();
    store.remove_item(STORAGE_LAST_WALLET).unwrap();
}

#[wasm_bindgen_test(async)]
async fn connect_remembers_and_disconnect_forgets() {
    clear_storage();
    install_fake_argent();
    assert_eq!(remembered_wallet(), None);

    let c = connect_browser_wallet(ProviderKind::ArgentX).await.expect("connect");
    assert_eq!(c.session.address, "0xabc");
    assert_eq!(remembered_wallet(), Some(ProviderKind::ArgentX));
    assert_eq!(shown_modal(), Some(true));

    disconnect_wallet();
    assert_eq!(remembered_wallet(), None);
}

#[wasm_bindgen_test(async)]
async fn remembered_wallet_reconnects_without_a_popup() {
    clear_storage();
    install_fake_argent();
    assert!(reconnect_remembered_wallet().await.is_none());

    connect_browser_wallet(ProviderKind::ArgentX).await.expect("connect");
    let c = reconnect_remembered_wallet().await.expect("silent reconnect");
    assert_eq!(c.session.provider, ProviderKind::ArgentX);
    assert_eq!(shown_modal(), Some(false));
    clear_storage();
}

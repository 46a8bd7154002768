//! Wallet providers.
//!
//! Each known browser extension is a [`ProviderKind`]; talking to it goes
//! through the [`WalletProvider`] capability so the connect policy can be
//! exercised without a browser.

use js_sys::{Array, Function, Object, Promise, Reflect};
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::config::STORAGE_LAST_WALLET;
use crate::error::GameError;
use crate::util::{clog, cwarn, js_error_message, truncate_middle};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    #[serde(rename = "argentX")]
    ArgentX,
    #[serde(rename = "braavos")]
    Braavos,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::ArgentX, ProviderKind::Braavos];

    pub fn id(self) -> &'static str {
        match self {
            ProviderKind::ArgentX => "argentX",
            ProviderKind::Braavos => "braavos",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ProviderKind::ArgentX => "Argent X",
            ProviderKind::Braavos => "Braavos",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ProviderKind::ArgentX => "/argent.png",
            ProviderKind::Braavos => "/braavos.jpeg",
        }
    }

    /// Property on `window` where the extension injects itself.
    pub fn window_key(self) -> &'static str {
        match self {
            ProviderKind::ArgentX => "starknet_argentX",
            ProviderKind::Braavos => "starknet_braavos",
        }
    }

    /// Braavos must fail loudly rather than silently connect through another extension.
    pub fn allows_fallback(self) -> bool {
        !matches!(self, ProviderKind::Braavos)
    }
}

/// What the rest of the app knows about the connected wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletSession {
    pub address: String,
    pub provider: ProviderKind,
}

impl WalletSession {
    pub fn button_label(&self) -> String {
        format!("{} ({})", self.provider.name(), truncate_middle(&self.address, 6, 4))
    }
}

/// A successful enable: the selected address plus whatever handle signs transactions.
#[derive(Clone, Debug, PartialEq)]
pub struct Enabled<A> {
    pub address: String,
    pub account: A,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Connected<A> {
    pub session: WalletSession,
    pub account: A,
}

#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    type Account;

    fn is_available(&self) -> bool;

    /// Asks the extension for access and returns the selected account.
    async fn enable(&self) -> Result<Enabled<Self::Account>, String>;
}

/// Connects `kind`, trying its injected object first and the generic connector second.
pub async fn connect_wallet<D, F>(
    kind: ProviderKind,
    direct: &D,
    fallback: &F,
) -> Result<Connected<D::Account>, GameError>
where
    D: WalletProvider,
    F: WalletProvider<Account = D::Account>,
{
    let connected = |e: Enabled<D::Account>| Connected {
        session: WalletSession {
            address: e.address,
            provider: kind,
        },
        account: e.account,
    };

    if direct.is_available() {
        match direct.enable().await {
            Ok(e) => {
                clog(&format!("connected to {} directly", kind.name()));
                return Ok(connected(e));
            }
            Err(reason) => {
                cwarn(&format!("direct connection to {} failed: {}", kind.name(), reason));
                if !kind.allows_fallback() {
                    return Err(GameError::ProviderConnect { provider: kind, reason });
                }
            }
        }
    }
    if !kind.allows_fallback() {
        return Err(GameError::ProviderNotDetected(kind));
    }

    clog(&format!("using fallback connection for {}", kind.name()));
    if !fallback.is_available() {
        return Err(GameError::ProviderConnect {
            provider: kind,
            reason: format!("Failed to connect to {}", kind.name()),
        });
    }
    fallback
        .enable()
        .await
        .map(connected)
        .map_err(|reason| GameError::ProviderConnect { provider: kind, reason })
}

// ---------------- Browser providers -----------------

/// An extension's own injected object (`window.starknet_argentX`, ...).
pub struct InjectedWallet {
    kind: ProviderKind,
    /// Whether `enable` may open the extension's approval popup.
    show_modal: bool,
}

impl InjectedWallet {
    pub fn new(kind: ProviderKind) -> Self {
        Self { kind, show_modal: true }
    }

    /// Reuses an existing approval without prompting the user.
    pub fn silent(kind: ProviderKind) -> Self {
        Self { kind, show_modal: false }
    }

    fn handle(&self) -> Option<JsValue> {
        window_property(self.kind.window_key())
    }
}

impl WalletProvider for InjectedWallet {
    type Account = JsValue;

    fn is_available(&self) -> bool {
        self.handle().is_some()
    }

    async fn enable(&self) -> Result<Enabled<JsValue>, String> {
        let provider = self
            .handle()
            .ok_or_else(|| format!("{} is not installed", self.kind.name()))?;
        let opts = Object::new();
        Reflect::set(&opts, &"showModal".into(), &JsValue::from_bool(self.show_modal))
            .map_err(|e| js_error_message(&e))?;
        call_method(&provider, "enable", &[opts.into()]).await?;

        let address = match request_accounts(&provider).await {
            Ok(Some(a)) => a,
            Ok(None) | Err(_) => address_from_properties(&provider)
                .ok_or_else(|| format!("Could not get address from {}", self.kind.name()))?,
        };
        Ok(Enabled {
            address,
            account: provider,
        })
    }
}

/// The generic `window.starknet` object any compliant extension exposes.
pub struct GenericConnector;

impl WalletProvider for GenericConnector {
    type Account = JsValue;

    fn is_available(&self) -> bool {
        window_property("starknet").is_some()
    }

    async fn enable(&self) -> Result<Enabled<JsValue>, String> {
        let starknet =
            window_property("starknet").ok_or_else(|| "No wallet extension found".to_string())?;
        call_method(&starknet, "enable", &[]).await?;
        let address = Reflect::get(&starknet, &"selectedAddress".into())
            .ok()
            .and_then(|v| v.as_string())
            .filter(|a| !a.is_empty())
            .ok_or_else(|| "No wallet address available".to_string())?;
        Ok(Enabled {
            address,
            account: starknet,
        })
    }
}

/// Wallets whose extension is injected; every known wallet when none is.
pub fn available_wallets() -> Vec<ProviderKind> {
    let detected: Vec<ProviderKind> = ProviderKind::ALL
        .into_iter()
        .filter(|k| InjectedWallet::new(*k).is_available())
        .collect();
    if detected.is_empty() { ProviderKind::ALL.to_vec() } else { detected }
}

pub async fn connect_browser_wallet(kind: ProviderKind) -> Result<Connected<JsValue>, GameError> {
    let res = connect_wallet(kind, &InjectedWallet::new(kind), &GenericConnector).await;
    if res.is_ok() {
        remember_wallet(kind);
    }
    res
}

/// Reconnects the remembered wallet without any popup. Only the injected
/// extension is tried; a failure leaves the user disconnected.
pub async fn reconnect_remembered_wallet() -> Option<Connected<JsValue>> {
    let kind = remembered_wallet()?;
    let direct = InjectedWallet::silent(kind);
    if !direct.is_available() {
        return None;
    }
    match direct.enable().await {
        Ok(e) => {
            clog(&format!("reconnected to {}", kind.name()));
            Some(Connected {
                session: WalletSession {
                    address: e.address,
                    provider: kind,
                },
                account: e.account,
            })
        }
        Err(reason) => {
            cwarn(&format!("auto-connect to {} failed: {}", kind.name(), reason));
            None
        }
    }
}

pub fn disconnect_wallet() {
    forget_wallet();
    clog("wallet disconnected");
}

// ---------------- Remembered wallet -----------------

pub fn remembered_wallet() -> Option<ProviderKind> {
    let store = web_sys::window()?.local_storage().ok()??;
    let raw = store.get_item(STORAGE_LAST_WALLET).ok()??;
    serde_json::from_str(&raw).ok()
}

fn remember_wallet(kind: ProviderKind) {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            if let Ok(s) = serde_json::to_string(&kind) {
                let _ = store.set_item(STORAGE_LAST_WALLET, &s);
            }
        }
    }
}

fn forget_wallet() {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            let _ = store.remove_item(STORAGE_LAST_WALLET);
        }
    }
}

// ---------------- JS plumbing -----------------

fn window_property(key: &str) -> Option<JsValue> {
    let win = web_sys::window()?;
    let v = Reflect::get(&win, &JsValue::from_str(key)).ok()?;
    if v.is_undefined() || v.is_null() { None } else { Some(v) }
}

/// Calls `target[name](...args)` and awaits the result when it is a promise.
pub(crate) async fn call_method(
    target: &JsValue,
    name: &str,
    args: &[JsValue],
) -> Result<JsValue, String> {
    let f: Function = Reflect::get(target, &JsValue::from_str(name))
        .map_err(|e| js_error_message(&e))?
        .dyn_into()
        .map_err(|_| format!("{} is not a function", name))?;
    let arr: Array = args.iter().collect();
    let out = f.apply(target, &arr).map_err(|e| js_error_message(&e))?;
    match out.dyn_into::<Promise>() {
        Ok(p) => JsFuture::from(p).await.map_err(|e| js_error_message(&e)),
        Err(v) => Ok(v),
    }
}

async fn request_accounts(provider: &JsValue) -> Result<Option<String>, String> {
    let req = Object::new();
    Reflect::set(&req, &"method".into(), &"starknet_accounts".into())
        .map_err(|e| js_error_message(&e))?;
    let accounts = call_method(provider, "request", &[req.into()]).await?;
    if !Array::is_array(&accounts) {
        return Ok(None);
    }
    Ok(Array::from(&accounts).get(0).as_string())
}

fn address_from_properties(provider: &JsValue) -> Option<String> {
    let selected = Reflect::get(provider, &"selectedAddress".into()).ok()?.as_string();
    selected.or_else(|| {
        let account = Reflect::get(provider, &"account".into()).ok()?;
        Reflect::get(&account, &"address".into()).ok()?.as_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::future::Future;
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    fn block_on<F: Future>(f: F) -> F::Output {
        let mut f = pin!(f);
        let mut cx = Context::from_waker(Waker::noop());
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(v) => v,
            Poll::Pending => panic!("mock providers resolve immediately"),
        }
    }

    struct Mock {
        available: bool,
        result: Result<&'static str, &'static str>,
        calls: Cell<u32>,
    }

    impl Mock {
        fn new(available: bool, result: Result<&'static str, &'static str>) -> Self {
            Self { available, result, calls: Cell::new(0) }
        }
    }

    impl WalletProvider for Mock {
        type Account = ();

        fn is_available(&self) -> bool {
            self.available
        }

        async fn enable(&self) -> Result<Enabled<()>, String> {
            self.calls.set(self.calls.get() + 1);
            self.result
                .map(|a| Enabled { address: a.to_string(), account: () })
                .map_err(str::to_string)
        }
    }

    #[test]
    fn direct_connection_wins() {
        let direct = Mock::new(true, Ok("0xaaa"));
        let fallback = Mock::new(true, Ok("0xfff"));
        let c = block_on(connect_wallet(ProviderKind::ArgentX, &direct, &fallback)).unwrap();
        let expected = WalletSession { address: "0xaaa".into(), provider: ProviderKind::ArgentX };
        assert_eq!(c.session, expected);
        assert_eq!(fallback.calls.get(), 0);
    }

    #[test]
    fn argent_falls_back_after_failure() {
        let direct = Mock::new(true, Err("user rejected"));
        let fallback = Mock::new(true, Ok("0xfff"));
        let c = block_on(connect_wallet(ProviderKind::ArgentX, &direct, &fallback)).unwrap();
        assert_eq!(c.session.address, "0xfff");
        assert_eq!(c.session.provider, ProviderKind::ArgentX);
        assert_eq!(fallback.calls.get(), 1);
    }

    #[test]
    fn argent_falls_back_when_not_injected() {
        let direct = Mock::new(false, Ok("0xaaa"));
        let fallback = Mock::new(true, Ok("0xfff"));
        let c = block_on(connect_wallet(ProviderKind::ArgentX, &direct, &fallback)).unwrap();
        assert_eq!(c.session.address, "0xfff");
        assert_eq!(direct.calls.get(), 0);
    }

    #[test]
    fn braavos_never_falls_back() {
        let direct = Mock::new(true, Err("locked"));
        let fallback = Mock::new(true, Ok("0xfff"));
        let err = block_on(connect_wallet(ProviderKind::Braavos, &direct, &fallback)).unwrap_err();
        assert_eq!(
            err,
            GameError::ProviderConnect { provider: ProviderKind::Braavos, reason: "locked".into() }
        );
        assert_eq!(fallback.calls.get(), 0);

        let missing = Mock::new(false, Ok("0xaaa"));
        let err = block_on(connect_wallet(ProviderKind::Braavos, &missing, &fallback)).unwrap_err();
        assert_eq!(err, GameError::ProviderNotDetected(ProviderKind::Braavos));
        assert_eq!(fallback.calls.get(), 0);
    }

    #[test]
    fn fallback_failure_is_reported() {
        let direct = Mock::new(false, Ok("0xaaa"));
        let fallback = Mock::new(true, Err("No wallet address available"));
        let err = block_on(connect_wallet(ProviderKind::ArgentX, &direct, &fallback)).unwrap_err();
        assert!(err.to_string().contains("No wallet address available"));
    }

    #[test]
    fn provider_ids_round_trip_through_storage_format() {
        for k in ProviderKind::ALL {
            let s = serde_json::to_string(&k).unwrap();
            assert_eq!(s, format!("\"{}\"", k.id()));
            assert_eq!(serde_json::from_str::<ProviderKind>(&s).unwrap(), k);
        }
        assert!(serde_json::from_str::<ProviderKind>("\"metamask\"").is_err());
    }

    #[test]
    fn connected_button_label() {
        let s = WalletSession {
            address: "0x049d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7".into(),
            provider: ProviderKind::Braavos,
        };
        assert_eq!(s.button_label(), "Braavos (0x049d...4dc7)");
    }
}

//! Bot deployment through the token bridge.
//!
//! A deployment is two calls executed together by the player's account:
//! approve the bridge to pull grid tokens, then deposit them with a message
//! telling the game contract which player mines which tile.

use js_sys::{JSON, Reflect};
use serde::Serialize;
use wasm_bindgen::JsValue;

use crate::error::GameError;
use crate::model::TileId;
use crate::util::{clog, cerror, js_error_message};
use crate::wallet::call_method;

pub const BRIDGE_ADDRESS: &str = "0x680c4cd19f9bfece1df9e870fab1cb6d92bd7b68f2f3084d17bf44ac6cea0ad";
pub const L3_REGISTRY_ADDRESS: &str = "0x9cdefae7d251d2c5577c4ed6833c7670b1260b13f4c9f78855b77761a175b8";
pub const GRID_TOKEN_ADDRESS: &str = "0x37c6b379f0ad38853f6a484ac4c024cbb6ffb4de8197f408e8da8ce4415dfc0";

const TOKEN_UNIT: u128 = 1_000_000_000_000_000_000;
/// Allowance granted to the bridge; slightly above the deposit.
pub const APPROVE_AMOUNT: u128 = 12 * TOKEN_UNIT;
pub const DEPOSIT_AMOUNT: u128 = 11 * TOKEN_UNIT;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCall {
    pub contract_address: String,
    pub entrypoint: &'static str,
    pub calldata: Vec<String>,
}

fn felt(v: u128) -> String {
    format!("{:#x}", v)
}

/// u256 as (low, high) felts. Everything here fits in the low half.
fn u256(v: u128) -> [String; 2] {
    [felt(v), felt(0)]
}

/// Builds `[approve, deposit_with_message]` for `player` mining `tile`.
pub fn deploy_bot_calls(player_address: &str, tile: TileId) -> [ContractCall; 2] {
    let mut approve = vec![BRIDGE_ADDRESS.to_string()];
    approve.extend(u256(APPROVE_AMOUNT));

    let message = [player_address.to_string(), felt(tile.get() as u128)];
    let mut deposit = vec![GRID_TOKEN_ADDRESS.to_string()];
    deposit.extend(u256(DEPOSIT_AMOUNT));
    deposit.push(L3_REGISTRY_ADDRESS.to_string());
    deposit.push(felt(message.len() as u128));
    deposit.extend(message);

    [
        ContractCall {
            contract_address: GRID_TOKEN_ADDRESS.to_string(),
            entrypoint: "approve",
            calldata: approve,
        },
        ContractCall {
            contract_address: BRIDGE_ADDRESS.to_string(),
            entrypoint: "deposit_with_message",
            calldata: deposit,
        },
    ]
}

#[allow(async_fn_in_trait)]
pub trait ContractExecutor {
    /// Submits all calls in one transaction and returns its hash.
    async fn execute(&self, calls: &[ContractCall]) -> Result<String, String>;
}

pub async fn deposit_with_message<E: ContractExecutor>(
    executor: &E,
    player_address: &str,
    tile: TileId,
) -> Result<String, GameError> {
    if player_address.is_empty() {
        return Err(GameError::NoWallet);
    }
    clog(&format!("deploying bot for {} on tile {}", player_address, tile));
    let calls = deploy_bot_calls(player_address, tile);
    match executor.execute(&calls).await {
        Ok(hash) => {
            clog(&format!("transaction sent: {}", hash));
            Ok(hash)
        }
        Err(reason) => {
            cerror(&format!("error deploying bot: {}", reason));
            Err(GameError::Submission(reason))
        }
    }
}

/// The account object of a connected browser wallet.
pub struct JsAccount {
    account: JsValue,
}

impl JsAccount {
    /// Wraps the `account` of an enabled wallet provider object.
    pub fn from_provider(provider: &JsValue) -> Result<Self, GameError> {
        let account = Reflect::get(provider, &"account".into()).map_err(|_| GameError::NoWallet)?;
        if account.is_undefined() || account.is_null() {
            return Err(GameError::NoWallet);
        }
        Ok(Self { account })
    }
}

impl ContractExecutor for JsAccount {
    async fn execute(&self, calls: &[ContractCall]) -> Result<String, String> {
        let json = serde_json::to_string(calls).map_err(|e| e.to_string())?;
        let js_calls = JSON::parse(&json).map_err(|e| js_error_message(&e))?;
        let result = call_method(&self.account, "execute", &[js_calls]).await?;
        Reflect::get(&result, &"transaction_hash".into())
            .ok()
            .and_then(|h| h.as_string())
            .ok_or_else(|| "wallet returned no transaction hash".to_string())
    }
}

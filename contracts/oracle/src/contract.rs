use beacon_rand_common::pub_key_hash;
use cosmwasm_std::{
    entry_point, Binary, Deps, DepsMut, Env, HexBinary, MessageInfo, Reply, Response, StdResult,
    Uint128,
};
use cw2::{get_contract_version, set_contract_version};

use crate::dispatch;
use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, FulfillRandomnessParams, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{BeaconConfig, Config, ProtocolState, CONFIG, PROTOCOL_STATE};
use crate::verify::{validate_public_key, HostPairingVerifier};

const CONTRACT_NAME: &str = "crates.io:beacon-rand-oracle";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    // Decode and validate pubkey
    let public_key = hex::decode(&msg.public_key_hex).map_err(|_| ContractError::InvalidHex {
        field: "public_key_hex".to_string(),
    })?;
    validate_public_key(deps.api, &public_key)?;

    if msg.period_seconds == 0 {
        return Err(invalid_config("period_seconds must be positive"));
    }
    if msg.max_callback_gas == 0 {
        return Err(invalid_config("max_callback_gas must be positive"));
    }
    if msg.max_deadline_delta == 0 {
        return Err(invalid_config("max_deadline_delta must be positive"));
    }
    if msg.fee_denom.is_empty() {
        return Err(invalid_config("fee_denom must not be empty"));
    }

    let config = Config {
        admin: info.sender.clone(),
        pub_key_hash: HexBinary::from(pub_key_hash(&public_key).as_slice()),
        beacon: BeaconConfig {
            public_key: HexBinary::from(public_key),
            genesis_time: msg.genesis_time,
            period_seconds: msg.period_seconds,
        },
        fee_denom: msg.fee_denom,
        base_request_fee: msg.base_request_fee,
        gas_price: msg.gas_price,
        max_callback_gas: msg.max_callback_gas,
        max_deadline_delta: msg.max_deadline_delta,
    };
    CONFIG.save(deps.storage, &config)?;
    PROTOCOL_STATE.save(
        deps.storage,
        &ProtocolState {
            next_request_id: 0,
            fee_balance: Uint128::zero(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "beacon-rand-oracle")
        .add_attribute("admin", info.sender.to_string())
        .add_attribute("pub_key_hash", config.pub_key_hash.to_hex()))
}

fn invalid_config(reason: &str) -> ContractError {
    ContractError::InvalidConfig {
        reason: reason.to_string(),
    }
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RequestRandomness {
            deadline,
            callback_gas_limit,
        } => execute::request_randomness(deps, env, info, deadline, callback_gas_limit),
        ExecuteMsg::FulfillRandomness {
            request_id,
            requester,
            round,
            callback_gas_limit,
            signature_hex,
        } => {
            let verifier = HostPairingVerifier::new(deps.api);
            execute::fulfill_randomness(
                deps,
                env,
                info,
                FulfillRandomnessParams {
                    request_id,
                    requester,
                    round,
                    callback_gas_limit,
                    signature_hex,
                },
                &verifier,
            )
        }
        ExecuteMsg::UpdateGasPrice { gas_price } => {
            execute::update_gas_price(deps, env, info, gas_price)
        }
        ExecuteMsg::Withdraw { amount, recipient } => {
            execute::withdraw(deps, env, info, amount, recipient)
        }
    }
}

#[entry_point]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    dispatch::handle_callback_reply(deps, env, msg)
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::State {} => query::query_state(deps),
        QueryMsg::RequestPrice {
            callback_gas_limit,
            gas_price,
        } => query::query_request_price(deps, callback_gas_limit, gas_price),
        QueryMsg::Randomness { request_id } => query::query_randomness(deps, request_id),
        QueryMsg::Request { request_id } => query::query_request(deps, request_id),
        QueryMsg::Requests { start_after, limit } => {
            query::query_requests(deps, start_after, limit)
        }
        QueryMsg::Beacon { round } => query::query_beacon(deps, round),
    }
}

#[entry_point]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::Unauthorized {
            reason: "Cannot migrate from different contract type".to_string(),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}

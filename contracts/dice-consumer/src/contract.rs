use beacon_rand_common::RandomnessCallback;
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, HexBinary, MessageInfo,
    QueryRequest, Response, StdResult, WasmMsg, WasmQuery,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::msg::{
    ExecuteMsg, InstantiateMsg, MigrateMsg, OracleExecuteMsg, OracleQueryMsg, OracleStateResponse,
    QueryMsg,
};
use crate::state::{ConsumerConfig, CONFIG, PLAYERS, RANDOMNESS};

const CONTRACT_NAME: &str = "crates.io:beacon-rand-dice-consumer";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let oracle = deps.api.addr_validate(&msg.oracle)?;
    CONFIG.save(
        deps.storage,
        &ConsumerConfig {
            oracle: oracle.clone(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "beacon-rand-dice-consumer")
        .add_attribute("oracle", oracle.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::GetRandom {
            deadline_delta,
            callback_gas_limit,
        } => get_random(deps, env, info, deadline_delta, callback_gas_limit),
        ExecuteMsg::ReceiveRandomness(callback) => receive_randomness(deps, info, callback),
    }
}

fn get_random(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    deadline_delta: u64,
    callback_gas_limit: u64,
) -> Result<Response, ContractError> {
    if deadline_delta == 0 {
        return Err(ContractError::ZeroDeadlineDelta);
    }
    let config = CONFIG.load(deps.storage)?;

    // The oracle assigns ids sequentially and our message executes next,
    // so its current counter is the id this request will get.
    let state: OracleStateResponse = deps.querier.query(&QueryRequest::Wasm(WasmQuery::Smart {
        contract_addr: config.oracle.to_string(),
        msg: to_json_binary(&OracleQueryMsg::State {})?,
    }))?;
    let request_id = state.next_request_id;
    PLAYERS.save(deps.storage, request_id, &info.sender)?;

    let deadline = env.block.time.seconds().saturating_add(deadline_delta);
    let request = WasmMsg::Execute {
        contract_addr: config.oracle.to_string(),
        msg: to_json_binary(&OracleExecuteMsg::RequestRandomness {
            deadline,
            callback_gas_limit,
        })?,
        funds: info.funds,
    };

    Ok(Response::new()
        .add_message(request)
        .add_attribute("action", "get_random")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("player", info.sender.to_string())
        .add_attribute("deadline", deadline.to_string()))
}

fn receive_randomness(
    deps: DepsMut,
    info: MessageInfo,
    callback: RandomnessCallback,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.oracle {
        return Err(ContractError::Unauthorized {
            reason: "only the oracle can deliver randomness".to_string(),
        });
    }

    let RandomnessCallback {
        request_id,
        randomness,
    } = callback;
    if randomness.len() != 32 {
        return Err(ContractError::InvalidRandomness {
            got: randomness.len(),
        });
    }
    if RANDOMNESS.has(deps.storage, request_id) {
        return Err(ContractError::AlreadyReceived { request_id });
    }
    RANDOMNESS.save(deps.storage, request_id, &randomness)?;

    let player = PLAYERS
        .may_load(deps.storage, request_id)?
        .map(|p| p.to_string())
        .unwrap_or_default();
    Ok(Response::new()
        .add_attribute("action", "receive_randomness")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("player", player)
        .add_attribute("dice_roll", dice_face(&randomness).to_string()))
}

/// `1 + (first 8 bytes as u64 BE) % 6`.
pub fn dice_face(randomness: &HexBinary) -> u8 {
    let mut head = [0u8; 8];
    let n = randomness.len().min(8);
    head[..n].copy_from_slice(&randomness[..n]);
    (u64::from_be_bytes(head) % 6) as u8 + 1
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Randomness { request_id } => {
            to_json_binary(&RANDOMNESS.may_load(deps.storage, request_id)?)
        }
        QueryMsg::DiceRoll { request_id } => {
            let face = RANDOMNESS
                .may_load(deps.storage, request_id)?
                .map(|r| dice_face(&r));
            to_json_binary(&face)
        }
        QueryMsg::Player { request_id } => {
            to_json_binary(&PLAYERS.may_load(deps.storage, request_id)?)
        }
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
    Ok(Response::new().add_attribute("action", "migrate"))
}

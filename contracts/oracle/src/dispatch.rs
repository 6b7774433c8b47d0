use beacon_rand_common::{RandomnessCallback, ReceiverExecuteMsg};
use cosmwasm_std::{
    Addr, DepsMut, Env, HexBinary, QuerierWrapper, Reply, Response, StdResult, SubMsg,
    SubMsgResult, WasmMsg,
};

use crate::error::ContractError;
use crate::events::RandomnessFulfilled;
use crate::state::{RandomnessRequest, RANDOMNESS, REQUESTS};

/// Whether `requester` is a contract that can receive a callback at all.
pub fn requester_accepts_callbacks(querier: &QuerierWrapper, requester: &Addr) -> bool {
    querier.query_wasm_contract_info(requester.as_str()).is_ok()
}

/// Callback to the requester carrying its randomness.
///
/// Runs as a sub-message capped at exactly `callback_gas_limit` gas. The host rolls
/// back only the sub-message on failure (out of gas included) and always replies
/// with the request id as reply id, so a failing consumer cannot revert fulfillment.
pub fn callback_submsg(request: &RandomnessRequest, randomness: &HexBinary) -> StdResult<SubMsg> {
    let msg = ReceiverExecuteMsg::ReceiveRandomness(RandomnessCallback {
        request_id: request.id,
        randomness: randomness.clone(),
    });
    let execute = WasmMsg::Execute {
        contract_addr: request.requester.to_string(),
        msg: msg.to_binary()?,
        funds: vec![],
    };
    Ok(SubMsg::reply_always(execute, request.id).with_gas_limit(request.callback_gas_limit))
}

/// Record the callback outcome and emit the fulfillment event.
///
/// A failed callback is an outcome, not an error: this never returns `Err` for it.
pub fn handle_callback_reply(
    deps: DepsMut,
    _env: Env,
    reply: Reply,
) -> Result<Response, ContractError> {
    let request_id = reply.id;
    let mut request = REQUESTS
        .may_load(deps.storage, request_id)?
        .ok_or(ContractError::RequestNotFoundOrMismatched { request_id })?;
    let randomness = RANDOMNESS.load(deps.storage, request_id)?;

    let callback_success = reply.result.is_ok();
    request.callback_success = Some(callback_success);
    request.callback_gas_used = Some(reply.gas_used);
    REQUESTS.save(deps.storage, request_id, &request)?;

    let mut response = Response::new()
        .add_attribute("action", "callback_reply")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("callback_success", callback_success.to_string());
    if let SubMsgResult::Err(err) = &reply.result {
        response = response.add_attribute("callback_error", err);
    }

    Ok(response.add_event(RandomnessFulfilled {
        request_id,
        round: request.round,
        callback_success,
        randomness: &randomness,
        callback_gas_used: Some(reply.gas_used),
    }))
}

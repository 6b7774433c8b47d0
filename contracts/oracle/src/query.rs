use cosmwasm_std::{coin, to_json_binary, Binary, Decimal, Deps, Order, StdError, StdResult, Uint256};
use cw_storage_plus::Bound;

use crate::msg::RequestsResponse;
use crate::pricing::get_request_price;
use crate::state::{BEACONS, CONFIG, PROTOCOL_STATE, RANDOMNESS, REQUESTS};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_state(deps: Deps) -> StdResult<Binary> {
    let state = PROTOCOL_STATE.load(deps.storage)?;
    to_json_binary(&state)
}

pub fn query_request_price(
    deps: Deps,
    callback_gas_limit: u64,
    gas_price: Option<Decimal>,
) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let gas_price = gas_price.unwrap_or(config.gas_price);
    let price = get_request_price(&config, callback_gas_limit, gas_price)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    to_json_binary(&coin(price.u128(), config.fee_denom))
}

pub fn query_randomness(deps: Deps, request_id: u64) -> StdResult<Binary> {
    let value = match RANDOMNESS.may_load(deps.storage, request_id)? {
        Some(randomness) => Uint256::from_be_bytes(randomness.to_array::<32>()?),
        None => Uint256::zero(),
    };
    to_json_binary(&value)
}

pub fn query_request(deps: Deps, request_id: u64) -> StdResult<Binary> {
    let request = REQUESTS.may_load(deps.storage, request_id)?;
    to_json_binary(&request)
}

pub fn query_requests(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(20).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let requests: Vec<_> = REQUESTS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(_, request)| request)
        .collect();

    to_json_binary(&RequestsResponse { requests })
}

pub fn query_beacon(deps: Deps, round: u64) -> StdResult<Binary> {
    let beacon = BEACONS.may_load(deps.storage, round)?;
    to_json_binary(&beacon)
}

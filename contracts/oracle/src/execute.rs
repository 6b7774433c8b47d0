use beacon_rand_common::{
    beacon_message, derive_randomness, round_for_deadline, signable_time, RequestCommitment,
    RequestRandomnessResponse, RequestStatus,
};
use cosmwasm_std::{
    coins, to_json_binary, BankMsg, Decimal, DepsMut, Env, HexBinary, MessageInfo, Response,
    StdError, Storage, Timestamp, Uint128,
};

use crate::dispatch::{callback_submsg, requester_accepts_callbacks};
use crate::error::ContractError;
use crate::events::{RandomnessFulfilled, RandomnessRequested};
use crate::msg::FulfillRandomnessParams;
use crate::pricing::{get_request_price, paid_amount};
use crate::state::{
    Config, RandomnessRequest, StoredBeacon, BEACONS, CONFIG, PROTOCOL_STATE, RANDOMNESS,
    REQUESTS,
};
use crate::verify::PairingVerifier;

/// Request randomness from the beacon round that follows `deadline`.
///
/// The attached fee must cover `get_request_price` and be in the fee denom only.
/// Overpayment is kept, not refunded.
pub fn request_randomness(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    deadline: u64,
    callback_gas_limit: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let round = validate_deadline(&config, env.block.time.seconds(), deadline)?;

    let price = get_request_price(&config, callback_gas_limit, config.gas_price)?;
    let paid = paid_amount(&info, &config.fee_denom)?;
    if paid < price {
        return Err(ContractError::InsufficientPayment {
            required: price,
            sent: paid,
        });
    }

    let mut state = PROTOCOL_STATE.load(deps.storage)?;
    let request_id = state.next_request_id;
    state.next_request_id += 1;
    state.fee_balance += paid;
    PROTOCOL_STATE.save(deps.storage, &state)?;

    let commitment = RequestCommitment {
        requester: info.sender.as_str(),
        pub_key_hash: config.pub_key_hash.as_slice(),
        round,
        callback_gas_limit,
    }
    .hash();

    let request = RandomnessRequest {
        id: request_id,
        requester: info.sender.clone(),
        pub_key_hash: config.pub_key_hash.clone(),
        round,
        callback_gas_limit,
        status: RequestStatus::Pending,
        commitment: HexBinary::from(commitment.as_slice()),
        created_at: env.block.time,
        fulfilled_at: None,
        callback_success: None,
        callback_gas_used: None,
    };
    REQUESTS.save(deps.storage, request_id, &request)?;

    Ok(Response::new()
        .set_data(to_json_binary(&RequestRandomnessResponse { request_id, round })?)
        .add_attribute("action", "request_randomness")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("round", round.to_string())
        .add_attribute("paid", paid.to_string())
        .add_event(RandomnessRequested {
            request_id,
            pub_key_hash: &config.pub_key_hash,
            requester: &info.sender,
            round,
            callback_gas_limit,
            deadline,
        }))
}

/// Deadline must lie in `(now, now + max_deadline_delta]` and map to round 1 or later.
///
/// A deadline at exactly `genesis_time` maps to round 0, which the beacon never signs,
/// so it is rejected even though it is not before genesis.
fn validate_deadline(config: &Config, now: u64, deadline: u64) -> Result<u64, ContractError> {
    let invalid = |reason: String| ContractError::InvalidDeadline { deadline, reason };

    if deadline <= now {
        return Err(invalid(format!("not after current time {now}")));
    }
    let horizon = now.saturating_add(config.max_deadline_delta);
    if deadline > horizon {
        return Err(invalid(format!("beyond maximum horizon {horizon}")));
    }

    let beacon = &config.beacon;
    match round_for_deadline(deadline, beacon.genesis_time, beacon.period_seconds) {
        None => Err(invalid(format!(
            "before beacon genesis {}",
            beacon.genesis_time
        ))),
        // drand numbers its first round 1; nothing is ever signed for round 0
        Some(0) => Err(invalid("no beacon round at genesis".to_string())),
        Some(round) => Ok(round),
    }
}

/// Deliver the beacon signature for a pending request. Callable by anyone.
///
/// Every parameter is untrusted and checked against the commitment stored at request
/// time before the signature is looked at.
pub fn fulfill_randomness<V: PairingVerifier>(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    params: FulfillRandomnessParams,
    verifier: &V,
) -> Result<Response, ContractError> {
    let FulfillRandomnessParams {
        request_id,
        requester,
        round,
        callback_gas_limit,
        signature_hex,
    } = params;

    let config = CONFIG.load(deps.storage)?;

    let mut request = REQUESTS
        .may_load(deps.storage, request_id)?
        .ok_or(ContractError::RequestNotFoundOrMismatched { request_id })?;
    let commitment = RequestCommitment {
        requester: &requester,
        pub_key_hash: config.pub_key_hash.as_slice(),
        round,
        callback_gas_limit,
    }
    .hash();
    if commitment.as_slice() != request.commitment.as_slice() {
        return Err(ContractError::RequestNotFoundOrMismatched { request_id });
    }

    if request.status != RequestStatus::Pending {
        return Err(ContractError::AlreadyFulfilled { request_id });
    }

    let beacon = &config.beacon;
    let signable_at = signable_time(round, beacon.genesis_time, beacon.period_seconds)
        .ok_or(ContractError::BeaconNotReady {
            round,
            signable_at: u64::MAX,
        })?;
    if env.block.time.seconds() < signable_at {
        return Err(ContractError::BeaconNotReady { round, signable_at });
    }

    let signature = hex::decode(&signature_hex).map_err(|_| ContractError::InvalidHex {
        field: "signature_hex".to_string(),
    })?;
    let randomness = verify_beacon(
        deps.storage,
        verifier,
        &config,
        round,
        &signature,
        env.block.time,
    )?;

    RANDOMNESS.save(deps.storage, request_id, &randomness)?;
    request.fulfilled_at = Some(env.block.time);

    let response = Response::new()
        .add_attribute("action", "fulfill_randomness")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("round", round.to_string())
        .add_attribute("fulfilled_by", info.sender.to_string());

    // Status leaves Pending before the callback runs, so re-entry hits AlreadyFulfilled.
    if requester_accepts_callbacks(&deps.querier, &request.requester) {
        request.status = RequestStatus::Fulfilled;
        REQUESTS.save(deps.storage, request_id, &request)?;

        Ok(response
            .add_attribute("status", "fulfilled")
            .add_submessage(callback_submsg(&request, &randomness)?))
    } else {
        request.status = RequestStatus::Failed;
        request.callback_success = Some(false);
        REQUESTS.save(deps.storage, request_id, &request)?;

        Ok(response
            .add_attribute("status", "failed")
            .add_event(RandomnessFulfilled {
                request_id,
                round,
                callback_success: false,
                randomness: &randomness,
                callback_gas_used: None,
            }))
    }
}

/// Check `signature` against the beacon for `round` and return its randomness.
///
/// A signature byte-identical to one already verified for this round is accepted
/// from the cache: BLS signatures are unique per key and message.
fn verify_beacon<V: PairingVerifier>(
    storage: &mut dyn Storage,
    verifier: &V,
    config: &Config,
    round: u64,
    signature: &[u8],
    now: Timestamp,
) -> Result<HexBinary, ContractError> {
    let cached = BEACONS.may_load(storage, round)?;
    if let Some(beacon) = &cached {
        if beacon.signature.as_slice() == signature {
            return Ok(beacon.randomness.clone());
        }
    }

    let message = beacon_message(round);
    if !verifier.verify(&message, signature, config.beacon.public_key.as_slice())? {
        return Err(ContractError::InvalidSignature { round });
    }

    let randomness = HexBinary::from(derive_randomness(signature).as_slice());
    if cached.is_none() {
        BEACONS.save(
            storage,
            round,
            &StoredBeacon {
                round,
                signature: HexBinary::from(signature),
                randomness: randomness.clone(),
                verified_at: now,
            },
        )?;
    }
    Ok(randomness)
}

/// Update the reference gas price used for pricing. Admin only.
pub fn update_gas_price(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    gas_price: Decimal,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update the gas price".to_string(),
        });
    }

    config.gas_price = gas_price;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_gas_price")
        .add_attribute("gas_price", gas_price.to_string()))
}

/// Withdraw retained request fees. Admin only.
pub fn withdraw(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    amount: Uint128,
    recipient: Option<String>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can withdraw fees".to_string(),
        });
    }
    if amount.is_zero() {
        return Err(StdError::generic_err("withdraw amount must be non-zero").into());
    }

    let mut state = PROTOCOL_STATE.load(deps.storage)?;
    if amount > state.fee_balance {
        return Err(ContractError::InsufficientFeeBalance {
            requested: amount,
            available: state.fee_balance,
        });
    }
    state.fee_balance -= amount;
    PROTOCOL_STATE.save(deps.storage, &state)?;

    let recipient = match recipient {
        Some(addr) => deps.api.addr_validate(&addr)?,
        None => config.admin,
    };

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: recipient.to_string(),
            amount: coins(amount.u128(), &config.fee_denom),
        })
        .add_attribute("action", "withdraw")
        .add_attribute("amount", amount.to_string())
        .add_attribute("recipient", recipient.to_string()))
}

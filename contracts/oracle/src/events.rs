//! Events are the oracle's append-only audit log. Every request and fulfillment
//! is reconstructable from them, keyed by `request_id`.

use cosmwasm_std::{Addr, Event, HexBinary};

pub const REQUESTED_EVENT: &str = "randomness_requested";
pub const FULFILLED_EVENT: &str = "randomness_fulfilled";

pub struct RandomnessRequested<'a> {
    pub request_id: u64,
    pub pub_key_hash: &'a HexBinary,
    pub requester: &'a Addr,
    pub round: u64,
    pub callback_gas_limit: u64,
    pub deadline: u64,
}

impl From<RandomnessRequested<'_>> for Event {
    fn from(e: RandomnessRequested<'_>) -> Self {
        Event::new(REQUESTED_EVENT)
            .add_attribute("request_id", e.request_id.to_string())
            .add_attribute("pub_key_hash", e.pub_key_hash.to_hex())
            .add_attribute("requester", e.requester.to_string())
            .add_attribute("round", e.round.to_string())
            .add_attribute("callback_gas_limit", e.callback_gas_limit.to_string())
            .add_attribute("deadline", e.deadline.to_string())
    }
}

pub struct RandomnessFulfilled<'a> {
    pub request_id: u64,
    pub round: u64,
    pub callback_success: bool,
    pub randomness: &'a HexBinary,
    /// `None` when no callback was dispatched
    pub callback_gas_used: Option<u64>,
}

impl From<RandomnessFulfilled<'_>> for Event {
    fn from(e: RandomnessFulfilled<'_>) -> Self {
        let event = Event::new(FULFILLED_EVENT)
            .add_attribute("request_id", e.request_id.to_string())
            .add_attribute("round", e.round.to_string())
            .add_attribute("callback_success", e.callback_success.to_string())
            .add_attribute("randomness", e.randomness.to_hex());
        match e.callback_gas_used {
            Some(gas) => event.add_attribute("callback_gas_used", gas.to_string()),
            None => event,
        }
    }
}

use beacon_rand_common::RequestStatus;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Decimal, HexBinary, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<Config> = Item::new("config");
pub const PROTOCOL_STATE: Item<ProtocolState> = Item::new("protocol_state");
pub const REQUESTS: Map<u64, RandomnessRequest> = Map::new("requests");
/// Randomness by request id, written once at fulfillment.
pub const RANDOMNESS: Map<u64, HexBinary> = Map::new("randomness");
/// Signatures that already passed the pairing check, by round.
pub const BEACONS: Map<u64, StoredBeacon> = Map::new("beacons");

/// Beacon network parameters. Fixed at instantiation.
#[cw_serde]
pub struct BeaconConfig {
    /// Beacon public key, 96 bytes (G2 point)
    pub public_key: HexBinary,
    /// Genesis time of the beacon network (unix seconds)
    pub genesis_time: u64,
    /// Period between rounds in seconds
    pub period_seconds: u64,
}

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    pub beacon: BeaconConfig,
    /// sha256(beacon.public_key)
    pub pub_key_hash: HexBinary,
    /// Denom request fees are paid in
    pub fee_denom: String,
    /// Flat fee on top of the gas cost of fulfillment
    pub base_request_fee: Uint128,
    /// Reference gas price, fee denom units per gas unit
    pub gas_price: Decimal,
    pub max_callback_gas: u64,
    /// Furthest a deadline may lie in the future (seconds)
    pub max_deadline_delta: u64,
}

#[cw_serde]
pub struct ProtocolState {
    pub next_request_id: u64,
    /// Fees retained by the protocol and not yet withdrawn
    pub fee_balance: Uint128,
}

#[cw_serde]
pub struct RandomnessRequest {
    pub id: u64,
    pub requester: Addr,
    pub pub_key_hash: HexBinary,
    pub round: u64,
    pub callback_gas_limit: u64,
    pub status: RequestStatus,
    /// See `beacon_rand_common::RequestCommitment`
    pub commitment: HexBinary,
    pub created_at: Timestamp,
    pub fulfilled_at: Option<Timestamp>,
    /// Set once the callback sub-message has replied
    pub callback_success: Option<bool>,
    pub callback_gas_used: Option<u64>,
}

#[cw_serde]
pub struct StoredBeacon {
    pub round: u64,
    /// BLS signature on G1, 48 bytes
    pub signature: HexBinary,
    /// sha256(signature), 32 bytes
    pub randomness: HexBinary,
    pub verified_at: Timestamp,
}

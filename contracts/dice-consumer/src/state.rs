use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<ConsumerConfig> = Item::new("config");
/// Who asked for each roll, keyed by the oracle's request id.
pub const PLAYERS: Map<u64, Addr> = Map::new("players");
pub const RANDOMNESS: Map<u64, HexBinary> = Map::new("randomness");

#[cw_serde]
pub struct ConsumerConfig {
    pub oracle: Addr,
}

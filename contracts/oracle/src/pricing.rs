use cosmwasm_std::{Decimal, MessageInfo, Uint128};

use crate::error::ContractError;
use crate::state::Config;

/// Gas the fulfillment transaction burns besides the callback: hash-to-curve,
/// pairing check, storage writes and the reply.
pub const FULFILLMENT_OVERHEAD_GAS: u64 = 500_000;

/// Fee a requester must attach for a callback bounded by `callback_gas_limit`.
///
/// `base_request_fee + ceil((callback_gas_limit + FULFILLMENT_OVERHEAD_GAS) * gas_price)`
///
/// Non-decreasing in both `callback_gas_limit` and `gas_price`.
pub fn get_request_price(
    config: &Config,
    callback_gas_limit: u64,
    gas_price: Decimal,
) -> Result<Uint128, ContractError> {
    if callback_gas_limit > config.max_callback_gas {
        return Err(ContractError::ExcessiveGasLimit {
            requested: callback_gas_limit,
            max: config.max_callback_gas,
        });
    }

    let total_gas = Uint128::from(callback_gas_limit) + Uint128::from(FULFILLMENT_OVERHEAD_GAS);
    let gas_cost = total_gas
        .checked_mul_ceil(gas_price)
        .map_err(|_| ContractError::PriceOverflow)?;

    config
        .base_request_fee
        .checked_add(gas_cost)
        .map_err(|_| ContractError::PriceOverflow)
}

/// Amount of `denom` attached to the call. Any other denom is rejected, since only
/// the fee denom is tracked in the fee balance.
pub fn paid_amount(info: &MessageInfo, denom: &str) -> Result<Uint128, ContractError> {
    let mut paid = Uint128::zero();
    for c in &info.funds {
        if c.denom != denom {
            return Err(ContractError::UnexpectedDenom {
                denom: c.denom.clone(),
            });
        }
        paid += c.amount;
    }
    Ok(paid)
}

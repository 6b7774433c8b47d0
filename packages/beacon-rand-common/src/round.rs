/// Beacon round whose signature cannot exist before `deadline`.
///
/// `round = ceil((deadline - genesis_time) / period_seconds)`. Rounding up means the
/// round's signable time is never earlier than the deadline.
///
/// Returns `None` if the deadline precedes genesis or the period is zero.
pub fn round_for_deadline(deadline: u64, genesis_time: u64, period_seconds: u64) -> Option<u64> {
    if period_seconds == 0 {
        return None;
    }
    let elapsed = deadline.checked_sub(genesis_time)?;
    Some(elapsed.div_ceil(period_seconds))
}

/// Unix time at which `round` may be fulfilled: `genesis_time + round * period_seconds`.
pub fn signable_time(round: u64, genesis_time: u64, period_seconds: u64) -> Option<u64> {
    round
        .checked_mul(period_seconds)
        .and_then(|offset| genesis_time.checked_add(offset))
}

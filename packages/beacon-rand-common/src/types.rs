use cosmwasm_schema::cw_serde;

/// Lifecycle status of a randomness request.
///
/// `Pending` is the only status a request is created with; fulfillment moves it
/// to `Fulfilled` (callback dispatched) or `Failed` (nothing to call back) exactly once.
#[cw_serde]
#[derive(Copy)]
pub enum RequestStatus {
    Pending,
    Fulfilled,
    Failed,
}

/// Data attached to the response of a successful randomness request.
#[cw_serde]
pub struct RequestRandomnessResponse {
    pub request_id: u64,
    pub round: u64,
}

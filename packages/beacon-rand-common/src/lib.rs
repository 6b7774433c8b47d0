pub mod beacon;
pub mod commitment;
pub mod receiver;
pub mod round;
pub mod types;

pub use beacon::{beacon_message, derive_randomness, BEACON_DST};
pub use commitment::{pub_key_hash, RequestCommitment};
pub use receiver::{RandomnessCallback, ReceiverExecuteMsg};
pub use round::{round_for_deadline, signable_time};
pub use types::{RequestRandomnessResponse, RequestStatus};

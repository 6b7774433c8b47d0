pub mod contract;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod execute;
pub mod msg;
pub mod pricing;
pub mod query;
pub mod state;
pub mod verify;

pub use crate::error::ContractError;

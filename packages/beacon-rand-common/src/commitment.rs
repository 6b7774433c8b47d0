use sha2::{Digest, Sha256};

/// Every parameter `fulfill_randomness` has to trust, bound into one hash at request time.
///
/// Field order is part of the format:
/// `sha256( len(requester)_u32_be || requester || pub_key_hash || round_u64_be || callback_gas_limit_u64_be )`
///
/// The requester is the raw bech32 string bytes (not decoded), so a keeper can
/// recompute the commitment from event attributes alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestCommitment<'a> {
    pub requester: &'a str,
    pub pub_key_hash: &'a [u8],
    pub round: u64,
    pub callback_gas_limit: u64,
}

impl RequestCommitment<'_> {
    pub fn hash(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update((self.requester.len() as u32).to_be_bytes());
        hasher.update(self.requester.as_bytes());
        hasher.update(self.pub_key_hash);
        hasher.update(self.round.to_be_bytes());
        hasher.update(self.callback_gas_limit.to_be_bytes());
        hasher.finalize().into()
    }
}

/// `sha256(public_key)`, identifying the beacon a request was made against.
pub fn pub_key_hash(public_key: &[u8]) -> [u8; 32] {
    Sha256::digest(public_key).into()
}

use sha2::{Digest, Sha256};

/// Hash-to-curve domain separation tag of the drand quicknet scheme
/// (`bls-unchained-g1-rfc9380`). Signatures made under any other tag never verify.
pub const BEACON_DST: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";

/// Compressed G1 point length (signatures).
pub const G1_POINT_LEN: usize = 48;

/// Compressed G2 point length (public keys).
pub const G2_POINT_LEN: usize = 96;

/// Message signed by the beacon for `round`: `sha256(round_u64_be)`.
///
/// Unchained scheme, so no previous signature is mixed in.
pub fn beacon_message(round: u64) -> [u8; 32] {
    Sha256::digest(round.to_be_bytes()).into()
}

/// Randomness for a verified beacon signature: `sha256(signature)`.
pub fn derive_randomness(signature: &[u8]) -> [u8; 32] {
    Sha256::digest(signature).into()
}

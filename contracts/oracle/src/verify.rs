use beacon_rand_common::beacon::{BEACON_DST, G1_POINT_LEN, G2_POINT_LEN};
use cosmwasm_std::{Api, HashFunction, BLS12_381_G2_GENERATOR};

use crate::error::ContractError;

/// drand quicknet public key (G2, 96 bytes), hex encoded.
/// Network: drand quicknet (bls-unchained-g1-rfc9380)
pub const QUICKNET_PK_HEX: &str = "83cf0f2896adee7eb8b5f01fcad3912212c437e0073e911fb90022d3e760183c8c4b450b6a0a6c3ac6a5776a2d1064510d1fec758c921cc22b0e17e63aaf4bcb5ed66304de9cf809bd274ca73bab4af5a6e9c76a4bc09e76eae8991ef5ece45a";

/// BLS signature check over a pairing-friendly curve.
///
/// `verify` hashes `message` to a curve point under the beacon DST and checks
/// `e(signature, g2) == e(H(message), public_key)`.
///
/// `Ok(false)` means well-formed points that do not satisfy the equation.
/// Points that cannot be decoded yield `ContractError::MalformedPoint`.
pub trait PairingVerifier {
    fn verify(
        &self,
        message: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<bool, ContractError>;
}

/// Verifier backed by the chain's BLS12-381 host functions.
pub struct HostPairingVerifier<'a> {
    api: &'a dyn Api,
}

impl<'a> HostPairingVerifier<'a> {
    pub fn new(api: &'a dyn Api) -> Self {
        Self { api }
    }
}

impl PairingVerifier for HostPairingVerifier<'_> {
    fn verify(
        &self,
        message: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<bool, ContractError> {
        if signature.len() != G1_POINT_LEN {
            return Err(malformed(format!(
                "signature must be {G1_POINT_LEN} bytes, got {}",
                signature.len()
            )));
        }
        if public_key.len() != G2_POINT_LEN {
            return Err(malformed(format!(
                "public key must be {G2_POINT_LEN} bytes, got {}",
                public_key.len()
            )));
        }

        let hashed = self
            .api
            .bls12_381_hash_to_g1(HashFunction::Sha256, message, BEACON_DST)
            .map_err(|e| malformed(e.to_string()))?;

        self.api
            .bls12_381_pairing_equality(signature, &BLS12_381_G2_GENERATOR, &hashed, public_key)
            .map_err(|e| malformed(e.to_string()))
    }
}

/// Compressed encoding of the G2 identity: infinity and compression flags, zero x.
const G2_IDENTITY: [u8; G2_POINT_LEN] = {
    let mut bytes = [0u8; G2_POINT_LEN];
    bytes[0] = 0xc0;
    bytes
};

/// Check that `public_key` decodes as a compressed G2 point other than the identity.
///
/// With the identity as key, the identity signature passes the pairing check for
/// every round.
pub fn validate_public_key(api: &dyn Api, public_key: &[u8]) -> Result<(), ContractError> {
    if public_key.len() != G2_POINT_LEN {
        return Err(ContractError::InvalidPubkeyLength {
            got: public_key.len(),
        });
    }
    // Aggregating a single point yields its canonical encoding
    let point = api
        .bls12_381_aggregate_g2(public_key)
        .map_err(|e| malformed(e.to_string()))?;
    if point == G2_IDENTITY {
        return Err(malformed("public key is the point at infinity".to_string()));
    }
    Ok(())
}

fn malformed(reason: String) -> ContractError {
    ContractError::MalformedPoint { reason }
}

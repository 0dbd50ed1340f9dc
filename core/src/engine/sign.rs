// Copyright (c) 2022-2023 The MobileCoin Foundation

use ed25519_dalek::{Signer, SigningKey};
use zeroize::Zeroize;

use super::{Driver, Error};

/// Hardened derivation flag
const HARDENED: u32 = 1 << 31;

/// SLIP-0044 coin type for Sia
pub const SIA_COIN_TYPE: u32 = 93;

/// Compute SLIP-0010 derivation path `44'/93'/key_index'/0'/0'`
pub fn path(key_index: u32) -> Result<[u32; 5], Error> {
    // Indices with the hardened bit set can not be hardened again
    if key_index & HARDENED != 0 {
        return Err(Error::InvalidKeyIndex);
    }

    Ok([
        44 | HARDENED,
        SIA_COIN_TYPE | HARDENED,
        key_index | HARDENED,
        HARDENED,
        HARDENED,
    ])
}

/// Derive the ed25519 key for `key_index` and sign the provided SigHash
pub fn sign_hash<DRV: Driver>(
    drv: &DRV,
    key_index: u32,
    hash: &[u8; 32],
) -> Result<[u8; 64], Error> {
    #[cfg(feature = "log")]
    log::debug!("signing hash with key {}", key_index);

    let path = path(key_index)?;

    let mut seed = drv.slip10_derive_ed25519(&path);
    let key = SigningKey::from_bytes(&seed);
    seed.zeroize();

    let signature = key.sign(hash);

    Ok(signature.to_bytes())
}

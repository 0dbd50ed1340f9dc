// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Host-side Sia transaction encoding
//!
//! Covers the subset of the Sia transaction format accepted by the wallet:
//! siacoin / siafund inputs and outputs, miner fees and transaction signatures.
//! File contracts, revisions and storage proofs are always encoded empty.
//!
//! All integers are little-endian `u64`s, slices are prefixed with their
//! element count and currency values are length-prefixed big-endian integers.

use alloc::vec::Vec;

use blake2b_simd::Params;

/// Length of hashes / IDs / unlock hashes
pub const HASH_LEN: usize = 32;

/// Length of an unlock hash checksum
pub const CHECKSUM_LEN: usize = 6;

/// Length of public key algorithm specifiers
pub const SPECIFIER_LEN: usize = 16;

/// Length of the portion of a [`TransactionSignature`] covered by the SigHash
/// (`ParentID`, `PublicKeyIndex`, `Timelock`)
pub const SIGNATURE_COVERED_LEN: usize = HASH_LEN + 8 + 8;

/// Number of index slices in an encoded `CoveredFields` object
pub const COVERED_FIELDS_SLICES: usize = 10;

/// ed25519 public key specifier
pub const SPECIFIER_ED25519: [u8; SPECIFIER_LEN] = specifier(b"ed25519");

/// Entropy public key specifier
pub const SPECIFIER_ENTROPY: [u8; SPECIFIER_LEN] = specifier(b"entropy");

/// Build a NUL-padded specifier from a short name
pub const fn specifier(name: &[u8]) -> [u8; SPECIFIER_LEN] {
    let mut s = [0u8; SPECIFIER_LEN];
    let mut i = 0;
    while i < name.len() && i < SPECIFIER_LEN {
        s[i] = name[i];
        i += 1;
    }
    s
}

/// Public key entry within [`UnlockConditions`]
#[derive(Clone, PartialEq, Debug)]
pub struct PublicKey {
    pub algorithm: [u8; SPECIFIER_LEN],
    pub key: Vec<u8>,
}

impl PublicKey {
    /// Create an ed25519 public key entry
    pub fn ed25519(key: [u8; 32]) -> Self {
        Self {
            algorithm: SPECIFIER_ED25519,
            key: key.to_vec(),
        }
    }
}

/// Conditions required to spend an output
#[derive(Clone, PartialEq, Debug, Default)]
pub struct UnlockConditions {
    pub timelock: u64,
    pub public_keys: Vec<PublicKey>,
    pub signatures_required: u64,
}

impl UnlockConditions {
    /// Standard single-key unlock conditions
    pub fn standard(key: [u8; 32]) -> Self {
        Self {
            timelock: 0,
            public_keys: alloc::vec![PublicKey::ed25519(key)],
            signatures_required: 1,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct SiacoinInput {
    pub parent_id: [u8; HASH_LEN],
    pub unlock_conditions: UnlockConditions,
}

#[derive(Clone, PartialEq, Debug)]
pub struct SiacoinOutput {
    /// Value in hastings
    pub value: u128,
    pub unlock_hash: [u8; HASH_LEN],
}

#[derive(Clone, PartialEq, Debug)]
pub struct SiafundInput {
    pub parent_id: [u8; HASH_LEN],
    pub unlock_conditions: UnlockConditions,
    pub claim_unlock_hash: [u8; HASH_LEN],
}

#[derive(Clone, PartialEq, Debug)]
pub struct SiafundOutput {
    pub value: u128,
    pub unlock_hash: [u8; HASH_LEN],
    pub claim_start: u128,
}

/// Signature over a transaction, always covering the whole transaction
#[derive(Clone, PartialEq, Debug)]
pub struct TransactionSignature {
    pub parent_id: [u8; HASH_LEN],
    pub public_key_index: u64,
    pub timelock: u64,
    pub signature: Vec<u8>,
}

impl TransactionSignature {
    /// Create an (unsigned) whole-transaction signature entry
    pub fn new(parent_id: [u8; HASH_LEN], public_key_index: u64) -> Self {
        Self {
            parent_id,
            public_key_index,
            timelock: 0,
            signature: Vec::new(),
        }
    }
}

/// Sia transaction (supported subset)
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Transaction {
    pub siacoin_inputs: Vec<SiacoinInput>,
    pub siacoin_outputs: Vec<SiacoinOutput>,
    pub siafund_inputs: Vec<SiafundInput>,
    pub siafund_outputs: Vec<SiafundOutput>,
    pub miner_fees: Vec<u128>,
    /// Arbitrary data entries, these are not accepted by the wallet and
    /// exist to exercise rejection paths
    pub arbitrary_data: Vec<Vec<u8>>,
    pub signatures: Vec<TransactionSignature>,
}

impl Transaction {
    /// Encode the full transaction
    pub fn encode(&self) -> Vec<u8> {
        let mut b = self.encode_unsigned();

        put_u64(&mut b, self.signatures.len() as u64);
        for s in &self.signatures {
            b.extend_from_slice(&s.parent_id);
            put_u64(&mut b, s.public_key_index);
            put_u64(&mut b, s.timelock);

            // CoveredFields, WholeTransaction with no explicit indices
            b.push(1);
            for _ in 0..COVERED_FIELDS_SLICES {
                put_u64(&mut b, 0);
            }

            put_u64(&mut b, s.signature.len() as u64);
            b.extend_from_slice(&s.signature);
        }

        b
    }

    /// Encode the bytes covered by the SigHash for the signature at `sig_index`,
    /// returns `None` if no such signature exists
    pub fn signed_bytes(&self, sig_index: usize) -> Option<Vec<u8>> {
        let s = self.signatures.get(sig_index)?;

        let mut b = self.encode_unsigned();
        b.extend_from_slice(&s.parent_id);
        put_u64(&mut b, s.public_key_index);
        put_u64(&mut b, s.timelock);

        Some(b)
    }

    /// Compute the SigHash for the signature at `sig_index`
    pub fn sig_hash(&self, sig_index: usize) -> Option<[u8; 32]> {
        let b = self.signed_bytes(sig_index)?;

        let h = Params::new().hash_length(HASH_LEN).hash(&b);

        let mut d = [0u8; 32];
        d.copy_from_slice(h.as_bytes());
        Some(d)
    }

    /// Encode all sections preceding `TransactionSignatures`
    fn encode_unsigned(&self) -> Vec<u8> {
        let mut b = Vec::new();

        put_u64(&mut b, self.siacoin_inputs.len() as u64);
        for i in &self.siacoin_inputs {
            b.extend_from_slice(&i.parent_id);
            put_unlock_conditions(&mut b, &i.unlock_conditions);
        }

        put_u64(&mut b, self.siacoin_outputs.len() as u64);
        for o in &self.siacoin_outputs {
            put_currency(&mut b, o.value);
            b.extend_from_slice(&o.unlock_hash);
        }

        // FileContracts, FileContractRevisions, StorageProofs
        for _ in 0..3 {
            put_u64(&mut b, 0);
        }

        put_u64(&mut b, self.siafund_inputs.len() as u64);
        for i in &self.siafund_inputs {
            b.extend_from_slice(&i.parent_id);
            put_unlock_conditions(&mut b, &i.unlock_conditions);
            b.extend_from_slice(&i.claim_unlock_hash);
        }

        put_u64(&mut b, self.siafund_outputs.len() as u64);
        for o in &self.siafund_outputs {
            put_currency(&mut b, o.value);
            b.extend_from_slice(&o.unlock_hash);
            put_currency(&mut b, o.claim_start);
        }

        put_u64(&mut b, self.miner_fees.len() as u64);
        for f in &self.miner_fees {
            put_currency(&mut b, *f);
        }

        put_u64(&mut b, self.arbitrary_data.len() as u64);
        for d in &self.arbitrary_data {
            put_u64(&mut b, d.len() as u64);
            b.extend_from_slice(d);
        }

        b
    }
}

/// Compute the checksum for an unlock hash (first bytes of its BLAKE2b-256 digest)
pub fn unlock_hash_checksum(unlock_hash: &[u8; HASH_LEN]) -> [u8; CHECKSUM_LEN] {
    let h = Params::new().hash_length(HASH_LEN).hash(unlock_hash);

    let mut c = [0u8; CHECKSUM_LEN];
    c.copy_from_slice(&h.as_bytes()[..CHECKSUM_LEN]);
    c
}

fn put_u64(b: &mut Vec<u8>, v: u64) {
    b.extend_from_slice(&v.to_le_bytes());
}

/// Currency values use the minimal big-endian encoding (zero is empty)
fn put_currency(b: &mut Vec<u8>, v: u128) {
    let bytes = v.to_be_bytes();
    let skip = bytes.iter().take_while(|b| **b == 0).count();

    put_u64(b, (bytes.len() - skip) as u64);
    b.extend_from_slice(&bytes[skip..]);
}

fn put_unlock_conditions(b: &mut Vec<u8>, uc: &UnlockConditions) {
    put_u64(b, uc.timelock);

    put_u64(b, uc.public_keys.len() as u64);
    for k in &uc.public_keys {
        b.extend_from_slice(&k.algorithm);
        put_u64(b, k.key.len() as u64);
        b.extend_from_slice(&k.key);
    }

    put_u64(b, uc.signatures_required);
}

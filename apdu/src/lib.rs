// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Protocol / APDU definitions for Sia app communication
//!
//! This crate provides protocol definitions and a reference implementation for
//! streaming Sia transactions to a hardware wallet for hashing and signing.
//!
//! Transactions are sent using the [`TxnHashReq`][txn_hash::TxnHashReq] APDU, split
//! into one `FIRST` packet (carrying the key and signature indices) followed by any
//! number of `MORE` packets, each with at most [`MAX_CHUNK_LEN`] bytes of payload.
//! The device replies with an empty status while it needs more data, a
//! [`TxnHashResp`][txn_hash::TxnHashResp] once the hash is computed, or a
//! [`TxnSigResp`][txn_hash::TxnSigResp] once a signature has been approved.
//!
//! Integer fields in request headers are little-endian, transaction bodies use
//! the Sia binary encoding (see [`txn`] when the `alloc` feature is enabled).

#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

pub use ledger_proto::{ApduError, ApduStatic};

pub mod app_info;
pub mod header;
pub mod prelude;
pub mod status;
pub mod txn_hash;

#[cfg(feature = "alloc")]
pub mod txn;

mod helpers;

/// Sia APDU Class
pub const SIA_APDU_CLA: u8 = 0xe0;

/// Maximum APDU payload length
pub const MAX_CHUNK_LEN: usize = 255;

/// Sia APDU instruction codes
#[derive(Copy, Clone, Debug, PartialEq, num_enum::TryFromPrimitive)]
#[repr(u8)]
pub enum Instruction {
    /// Fetch application version
    GetVersion = 0x01,

    /// Stream a transaction, computing (and optionally signing) its SigHash
    GetTxnHash = 0x08,
}

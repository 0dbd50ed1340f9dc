// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Sia hardware wallet core
//!
//! This provides a common [Engine][engine] supporting streaming transaction
//! hashing and signing for execution on hardware wallets.
//!
//! Interactions with the [Engine][engine] are performed via [Event][engine::Event]s and [Output][engine::Output]s,
//! see [ledger_sia_apdu] for APDU objects and wire encodings.
//!
//! ## Operations
//!
//! Prior to interacting with a hardware wallet the client may issue an
//! [`AppVersionReq`][ledger_sia_apdu::app_info::AppVersionReq] to fetch an
//! [`AppVersionResp`][ledger_sia_apdu::app_info::AppVersionResp] containing the
//! application version.
//!
//! ### Hashing / signing a transaction
//!
//! 1. Split the encoded transaction into [`TxnHashReq`][ledger_sia_apdu::txn_hash::TxnHashReq]
//!    APDUs, one `FIRST` request carrying the key and signature indices
//!    followed by `MORE` requests with the remaining data
//! 2. Issue each request in turn, an empty response requests the next chunk.
//!    Responses are deferred while the user reviews each output and fee
//! 3. The final response contains either a
//!    [`TxnHashResp`][ledger_sia_apdu::txn_hash::TxnHashResp] with the
//!    transaction SigHash, or a [`TxnSigResp`][ledger_sia_apdu::txn_hash::TxnSigResp]
//!    with an ed25519 signature once the user has approved signing
//!
//! See [dispatch] for APDU handling.
//!

#![cfg_attr(not(feature = "std"), no_std)]

pub use ledger_sia_apdu::{self as apdu};

pub mod dispatch;

pub mod engine;

pub mod helpers;

// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Response status words

use num_enum::TryFromPrimitive;
use strum::{Display, EnumIter, EnumString, EnumVariantNames};

/// Status word appended to each response APDU
#[derive(
    Copy, Clone, PartialEq, Debug, EnumString, Display, EnumVariantNames, EnumIter, TryFromPrimitive,
)]
#[repr(u16)]
pub enum StatusCode {
    /// Request succeeded
    Ok = 0x9000,

    /// Internal consistency failure, states the protocol asserts can not occur
    DeveloperError = 0x6b00,

    /// Invalid request parameters or malformed transaction
    InvalidParameter = 0x6b01,

    /// Request issued out of sequence (ie. `MORE` before `FIRST`)
    ImproperInitialization = 0x6b02,

    /// Operation rejected by the user
    UserRejected = 0x6985,
}

impl StatusCode {
    /// Encode status word to big-endian bytes as sent on the wire
    pub fn to_bytes(&self) -> [u8; 2] {
        (*self as u16).to_be_bytes()
    }

    /// Check whether this status indicates success
    pub fn is_ok(&self) -> bool {
        *self == StatusCode::Ok
    }
}

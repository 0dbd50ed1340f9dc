// Copyright (c) 2022-2023 The MobileCoin Foundation

use ledger_sia_apdu::status::StatusCode;

/// [Engine][super::Engine] errors
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[repr(u8)]
pub enum Error {
    /// Invalid argument length
    #[cfg_attr(feature = "thiserror", error("Invalid argument length"))]
    InvalidLength = 0x00,

    /// Unexpected event (ie. `MORE` without `FIRST`, `FIRST` mid-transaction)
    #[cfg_attr(feature = "thiserror", error("Unexpected event"))]
    UnexpectedEvent = 0x01,

    /// Staging buffer overflow
    #[cfg_attr(feature = "thiserror", error("staging buffer overflow"))]
    BufferOverflow = 0x02,

    /// Single transaction element exceeds the maximum element size
    #[cfg_attr(feature = "thiserror", error("transaction element too large"))]
    ElementTooLarge = 0x03,

    /// Currency value exceeds 128 bits
    #[cfg_attr(feature = "thiserror", error("currency value overflow"))]
    CurrencyOverflow = 0x04,

    /// Unrecognised public key algorithm specifier
    #[cfg_attr(feature = "thiserror", error("unknown public key specifier"))]
    UnknownSpecifier = 0x05,

    /// Transaction contains an unsupported (non-empty) section
    #[cfg_attr(feature = "thiserror", error("unsupported transaction section"))]
    UnsupportedSection = 0x06,

    /// Transaction signature does not cover the whole transaction
    #[cfg_attr(feature = "thiserror", error("invalid covered fields"))]
    InvalidCoveredFields = 0x07,

    /// Signature index out of range for the provided transaction
    #[cfg_attr(feature = "thiserror", error("signature index out of range"))]
    InvalidSignatureIndex = 0x08,

    /// Decoder is finished or failed and must be re-initialised
    #[cfg_attr(feature = "thiserror", error("decoder not initialised"))]
    DecoderInactive = 0x09,

    /// Invalid engine state
    #[cfg_attr(feature = "thiserror", error("invalid engine state"))]
    InvalidState = 0x0a,

    /// Message encoding failed
    #[cfg_attr(feature = "thiserror", error("message encoding failed"))]
    EncodingFailed = 0x0b,

    /// Key index can not be used for hardened derivation
    #[cfg_attr(feature = "thiserror", error("invalid key index"))]
    InvalidKeyIndex = 0x0c,

    /// Signing error
    #[cfg_attr(feature = "thiserror", error("Signing error"))]
    SignError = 0x0d,
}

impl Error {
    /// Map engine errors to response status words
    pub fn status(&self) -> StatusCode {
        use Error::*;

        match self {
            UnexpectedEvent => StatusCode::ImproperInitialization,

            InvalidLength | ElementTooLarge | CurrencyOverflow | UnknownSpecifier
            | UnsupportedSection | InvalidCoveredFields | InvalidSignatureIndex => {
                StatusCode::InvalidParameter
            }

            BufferOverflow | DecoderInactive | InvalidState | EncodingFailed | InvalidKeyIndex
            | SignError => StatusCode::DeveloperError,
        }
    }
}

// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Transaction hashing / signing APDUs
//!
//! A transaction is streamed to the device as one [`Phase::First`] request
//! followed by zero or more [`Phase::More`] requests. Each `MORE` request must
//! only be sent once the previous request has been acknowledged with an empty
//! [`StatusCode::Ok`][crate::status::StatusCode::Ok] response, a response
//! containing data completes the exchange.
//!
//! See [ledger_sia_core::engine] for interaction and state machines

use encdec::{Decode, Encode};
use ledger_proto::ApduStatic;
use num_enum::TryFromPrimitive;
use strum::{Display, EnumIter, EnumString};

use crate::{helpers::arr, ApduError, Instruction, MAX_CHUNK_LEN, SIA_APDU_CLA};

/// Length of the key and signature index header in `FIRST` requests
pub const FIRST_HEADER_LEN: usize = 6;

/// Transfer phase, sent as `P1`
#[derive(Copy, Clone, PartialEq, Debug, EnumString, Display, EnumIter, TryFromPrimitive)]
#[repr(u8)]
pub enum Phase {
    /// First packet of a transaction, carries key and signature indices
    First = 0x00,
    /// Subsequent packets, transaction data only
    More = 0x80,
}

/// Hashing mode, sent as `P2`
#[derive(Copy, Clone, PartialEq, Debug, EnumString, Display, EnumIter, TryFromPrimitive)]
#[repr(u8)]
pub enum Mode {
    /// Compute and display the transaction hash
    DisplayHash = 0x00,
    /// Compute the transaction hash and sign it following user approval
    SignHash = 0x01,
}

/// Transaction hash request APDU
///
/// ## `FIRST` Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           KEY_INDEX                           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |           SIG_INDEX           |                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+                               +
/// /                        TRANSACTION_DATA                       /
/// /                   (up to 249 bytes, variable)                 /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// ## `MORE` Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// /                        TRANSACTION_DATA                       /
/// /                   (up to 255 bytes, variable)                 /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum TxnHashReq<'a> {
    First {
        mode: Mode,
        /// Key index for signing (ignored for [`Mode::DisplayHash`])
        key_index: u32,
        /// Index of the transaction signature to compute the hash for
        sig_index: u16,
        data: &'a [u8],
    },
    More {
        mode: Mode,
        data: &'a [u8],
    },
}

impl<'a> ApduStatic for TxnHashReq<'a> {
    const CLA: u8 = SIA_APDU_CLA;
    const INS: u8 = Instruction::GetTxnHash as u8;
}

impl<'a> TxnHashReq<'a> {
    /// Create a new `FIRST` request
    pub fn first(mode: Mode, key_index: u32, sig_index: u16, data: &'a [u8]) -> Self {
        Self::First {
            mode,
            key_index,
            sig_index,
            data,
        }
    }

    /// Create a new `MORE` request
    pub fn more(mode: Mode, data: &'a [u8]) -> Self {
        Self::More { mode, data }
    }

    /// Transfer phase for this request
    pub fn phase(&self) -> Phase {
        match self {
            Self::First { .. } => Phase::First,
            Self::More { .. } => Phase::More,
        }
    }

    /// Hash mode for this request
    pub fn mode(&self) -> Mode {
        match self {
            Self::First { mode, .. } | Self::More { mode, .. } => *mode,
        }
    }

    /// Transaction data carried by this request
    pub fn data(&self) -> &'a [u8] {
        match self {
            Self::First { data, .. } | Self::More { data, .. } => data,
        }
    }

    /// `P1` header value
    pub fn p1(&self) -> u8 {
        self.phase() as u8
    }

    /// `P2` header value
    pub fn p2(&self) -> u8 {
        self.mode() as u8
    }

    /// Parse a request from header parameters and payload
    pub fn parse(p1: u8, p2: u8, buff: &'a [u8]) -> Result<Self, ApduError> {
        let phase = Phase::try_from(p1).map_err(|_| ApduError::InvalidEncoding)?;
        let mode = Mode::try_from(p2).map_err(|_| ApduError::InvalidEncoding)?;

        if buff.len() > MAX_CHUNK_LEN {
            return Err(ApduError::InvalidLength);
        }

        match phase {
            Phase::First => {
                if buff.len() < FIRST_HEADER_LEN {
                    return Err(ApduError::InvalidLength);
                }

                let key_index = u32::from_le_bytes([buff[0], buff[1], buff[2], buff[3]]);
                let sig_index = u16::from_le_bytes([buff[4], buff[5]]);

                Ok(Self::First {
                    mode,
                    key_index,
                    sig_index,
                    data: &buff[FIRST_HEADER_LEN..],
                })
            }
            Phase::More => Ok(Self::More { mode, data: buff }),
        }
    }
}

impl<'a> Encode for TxnHashReq<'a> {
    type Error = ApduError;

    /// Encode a [`TxnHashReq`] payload into the provided buffer
    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        let n = self.encode_len()?;

        if n > MAX_CHUNK_LEN || buff.len() < n {
            return Err(ApduError::InvalidLength);
        }

        let mut index = 0;

        if let Self::First {
            key_index,
            sig_index,
            ..
        } = self
        {
            buff[0..4].copy_from_slice(&key_index.to_le_bytes());
            buff[4..6].copy_from_slice(&sig_index.to_le_bytes());
            index += FIRST_HEADER_LEN;
        }

        let d = self.data();
        buff[index..][..d.len()].copy_from_slice(d);
        index += d.len();

        Ok(index)
    }

    fn encode_len(&self) -> Result<usize, ApduError> {
        match self {
            Self::First { data, .. } => Ok(FIRST_HEADER_LEN + data.len()),
            Self::More { data, .. } => Ok(data.len()),
        }
    }
}

/// Split an encoded transaction into a `FIRST` request followed by
/// as many `MORE` requests as required
pub fn requests(mode: Mode, key_index: u32, sig_index: u16, txn: &[u8]) -> TxnHashRequests<'_> {
    TxnHashRequests {
        mode,
        key_index,
        sig_index,
        txn,
        offset: 0,
        started: false,
    }
}

/// Iterator over chunked [`TxnHashReq`]s, see [`requests`]
pub struct TxnHashRequests<'a> {
    mode: Mode,
    key_index: u32,
    sig_index: u16,
    txn: &'a [u8],
    offset: usize,
    started: bool,
}

impl<'a> Iterator for TxnHashRequests<'a> {
    type Item = TxnHashReq<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = &self.txn[self.offset..];

        if !self.started {
            self.started = true;

            let n = remaining.len().min(MAX_CHUNK_LEN - FIRST_HEADER_LEN);
            self.offset += n;

            return Some(TxnHashReq::first(
                self.mode,
                self.key_index,
                self.sig_index,
                &remaining[..n],
            ));
        }

        if remaining.is_empty() {
            return None;
        }

        let n = remaining.len().min(MAX_CHUNK_LEN);
        self.offset += n;

        Some(TxnHashReq::more(self.mode, &remaining[..n]))
    }
}

/// Transaction hash response APDU
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// /                           SIG_HASH                            /
/// /                   (32-byte BLAKE2b-256 digest)                /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug, Encode, Decode)]
#[encdec(error = "ApduError")]
pub struct TxnHashResp {
    /// Transaction SigHash
    #[encdec(with = "arr")]
    pub hash: [u8; 32],
}

impl TxnHashResp {
    pub fn new(hash: [u8; 32]) -> Self {
        Self { hash }
    }
}

/// Transaction signature response APDU
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// /                           SIGNATURE                           /
/// /               (64-byte ed25519 signature over SIG_HASH)       /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug, Encode, Decode)]
#[encdec(error = "ApduError")]
pub struct TxnSigResp {
    /// ed25519 signature
    #[encdec(with = "arr")]
    pub signature: [u8; 64],
}

impl TxnSigResp {
    pub fn new(signature: [u8; 64]) -> Self {
        Self { signature }
    }
}

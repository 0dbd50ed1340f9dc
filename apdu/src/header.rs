// Copyright (c) 2022-2023 The MobileCoin Foundation

//! APDU command header

use encdec::{Decode, Encode};

use crate::ApduError;

/// APDU command header length (including the payload length byte)
pub const APDU_HEADER_LEN: usize = 5;

/// Command APDU header, preceding each request payload
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |      CLA      |      INS      |      P1       |      P2       |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |      LEN      |
/// +-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug, Encode, Decode)]
#[encdec(error = "ApduError")]
pub struct ApduHeader {
    /// Application class
    pub cla: u8,
    /// Instruction code
    pub ins: u8,
    /// First parameter
    pub p1: u8,
    /// Second parameter
    pub p2: u8,
    /// Payload length
    pub len: u8,
}

impl ApduHeader {
    /// Create a new header
    pub fn new(cla: u8, ins: u8, p1: u8, p2: u8, len: u8) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            len,
        }
    }
}

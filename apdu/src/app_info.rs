// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Application Version APDUs

use encdec::{DecodeOwned, Encode};

use super::{ApduError, ApduStatic, Instruction, SIA_APDU_CLA};

/// Fetch application version APDU (0 length)
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct AppVersionReq {}

impl ApduStatic for AppVersionReq {
    /// Application version command APDU is class `0xe0`
    const CLA: u8 = SIA_APDU_CLA;

    /// Application version GET APDU is instruction `0x01`
    const INS: u8 = Instruction::GetVersion as u8;
}

impl Encode for AppVersionReq {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(0)
    }

    fn encode(&self, _buff: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(0)
    }
}

impl DecodeOwned for AppVersionReq {
    type Output = Self;

    type Error = ApduError;

    fn decode_owned(_buff: &[u8]) -> Result<(Self::Output, usize), Self::Error> {
        Ok((Self {}, 0))
    }
}

/// Application version response APDU
///
/// ## Encoding
///
/// ```text
///  0                   1                   2
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     MAJOR     |     MINOR     |     PATCH     |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct AppVersionResp {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl AppVersionResp {
    /// Create a new application version APDU
    pub fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a `major.minor.patch` version string (ie. `CARGO_PKG_VERSION`)
    pub fn parse(version: &str) -> Result<Self, ApduError> {
        let mut parts = version.split('.').map(|p| p.parse::<u8>());

        let mut next = || match parts.next() {
            Some(Ok(v)) => Ok(v),
            _ => Err(ApduError::InvalidEncoding),
        };

        Ok(Self {
            major: next()?,
            minor: next()?,
            patch: next()?,
        })
    }
}

impl Encode for AppVersionResp {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(3)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, Self::Error> {
        if buff.len() < 3 {
            return Err(ApduError::InvalidLength);
        }

        buff[0] = self.major;
        buff[1] = self.minor;
        buff[2] = self.patch;

        Ok(3)
    }
}

impl DecodeOwned for AppVersionResp {
    type Output = Self;

    type Error = ApduError;

    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), Self::Error> {
        if buff.len() < 3 {
            return Err(ApduError::InvalidLength);
        }

        Ok((Self::new(buff[0], buff[1], buff[2]), 3))
    }
}

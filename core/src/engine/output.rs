// Copyright (c) 2022-2023 The MobileCoin Foundation

use encdec::Encode;

use ledger_proto::ApduError;
use ledger_sia_apdu::{
    status::StatusCode,
    txn_hash::{TxnHashResp, TxnSigResp},
};

/// [`Engine`][super::Engine] outputs (in response to events), typically encoded to response [APDUs][crate::apdu]
#[derive(Clone, PartialEq, Debug)]
pub enum Output {
    /// No response required
    None,

    /// Response deferred pending user interaction
    Pending,

    /// Empty acknowledgement, more transaction data required
    Ack,

    /// Computed transaction SigHash
    TxnHash { hash: [u8; 32] },

    /// Signature over the transaction SigHash
    TxnSignature { signature: [u8; 64] },

    /// Transaction rejected by the user
    Rejected,
}

impl Output {
    /// Encode an [`Output`] object to response APDU
    pub fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        match self {
            Output::None | Output::Pending | Output::Ack | Output::Rejected => Ok(0),
            Output::TxnHash { hash } => TxnHashResp::new(*hash).encode(buff),
            Output::TxnSignature { signature } => TxnSigResp::new(*signature).encode(buff),
        }
    }

    /// Status word for the response APDU
    pub fn status(&self) -> StatusCode {
        match self {
            Output::Rejected => StatusCode::UserRejected,
            _ => StatusCode::Ok,
        }
    }

    /// Check whether a response APDU should be sent for this output
    pub fn is_reply(&self) -> bool {
        !matches!(self, Output::None | Output::Pending)
    }
}

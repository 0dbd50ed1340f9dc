// Copyright (c) 2022-2023 The MobileCoin Foundation

use ledger_proto::{ApduError, ApduStatic};
use ledger_sia_apdu::txn_hash::{Mode, TxnHashReq};

/// [`Engine`][super::Engine] input events, decoded from request [APDUs][crate::apdu]
/// or raised by the user interface
#[derive(Clone, Debug, PartialEq)]
pub enum Event<'a> {
    None,

    /// Start a transaction, carrying the first chunk of transaction data
    TxnHashFirst {
        mode: Mode,
        key_index: u32,
        sig_index: u16,
        data: &'a [u8],
    },

    /// Continue a transaction with the next chunk of transaction data
    TxnHashMore { mode: Mode, data: &'a [u8] },

    /// User confirmed the current screen
    UserConfirmed,

    /// User rejected the current screen
    UserRejected,
}

impl<'a> Event<'a> {
    /// Parse an incoming APDU to engine event
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn parse(ins: u8, p1: u8, p2: u8, buff: &'a [u8]) -> Result<Self, ApduError> {
        match ins {
            TxnHashReq::INS => TxnHashReq::parse(p1, p2, buff).map(Event::from),
            _ => Err(ApduError::InvalidEncoding),
        }
    }

    /// Check whether an event is a user interface event
    pub fn is_user(&self) -> bool {
        matches!(self, Event::UserConfirmed | Event::UserRejected)
    }
}

impl<'a> From<TxnHashReq<'a>> for Event<'a> {
    fn from(a: TxnHashReq<'a>) -> Self {
        match a {
            TxnHashReq::First {
                mode,
                key_index,
                sig_index,
                data,
            } => Event::TxnHashFirst {
                mode,
                key_index,
                sig_index,
                data,
            },
            TxnHashReq::More { mode, data } => Event::TxnHashMore { mode, data },
        }
    }
}

// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Prelude to simplify downstream use of APDU objects
//!

pub use crate::{
    app_info::{AppVersionReq, AppVersionResp},
    header::ApduHeader,
    status::StatusCode,
    txn_hash::{Mode, Phase, TxnHashReq, TxnHashResp, TxnSigResp},
    Instruction,
};

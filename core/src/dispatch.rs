// Copyright (c) 2022-2023 The MobileCoin Foundation

//! APDU dispatch for [Engine] instances
//!
//! Decodes request APDUs to [Event]s, updates the engine, and encodes the
//! resulting [Output][crate::engine::Output] to a response APDU.

use encdec::{Decode, Encode};

use ledger_proto::ApduStatic;
use ledger_sia_apdu::{
    app_info::{AppVersionReq, AppVersionResp},
    header::{ApduHeader, APDU_HEADER_LEN},
    status::StatusCode,
    SIA_APDU_CLA,
};

use crate::engine::{Driver, Engine, Event};

/// Application version reported via [`AppVersionReq`]
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Response to a dispatched APDU
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Reply {
    /// Send `len` bytes of response data with the provided status
    Data { status: StatusCode, len: usize },
    /// Response deferred until the user interacts with the device
    Deferred,
}

impl Reply {
    /// Create an error reply (no data)
    pub fn status(status: StatusCode) -> Self {
        Reply::Data { status, len: 0 }
    }
}

/// Handle a raw APDU (header and payload), writing any response data to `buff`
pub fn handle_apdu<DRV: Driver>(engine: &mut Engine<DRV>, apdu: &[u8], buff: &mut [u8]) -> Reply {
    // Reject short APDUs
    if apdu.len() < APDU_HEADER_LEN {
        return malformed(engine);
    }

    let (header, _) = match ApduHeader::decode(apdu) {
        Ok(v) => v,
        Err(_e) => return malformed(engine),
    };

    let data = &apdu[APDU_HEADER_LEN..];
    if data.len() != header.len as usize {
        return malformed(engine);
    }

    handle_req(engine, &header, data, buff)
}

/// Handle a decoded request, writing any response data to `buff`
pub fn handle_req<DRV: Driver>(
    engine: &mut Engine<DRV>,
    header: &ApduHeader,
    data: &[u8],
    buff: &mut [u8],
) -> Reply {
    if header.cla != SIA_APDU_CLA {
        return malformed(engine);
    }

    // Application version
    if header.ins == AppVersionReq::INS {
        let r = match AppVersionResp::parse(APP_VERSION) {
            Ok(v) => v,
            Err(_e) => return Reply::status(StatusCode::DeveloperError),
        };

        return match r.encode(buff) {
            Ok(len) => Reply::Data {
                status: StatusCode::Ok,
                len,
            },
            Err(_e) => Reply::status(StatusCode::DeveloperError),
        };
    }

    // Decode APDUs to engine events
    let evt = match Event::parse(header.ins, header.p1, header.p2, data) {
        Ok(v) => v,
        Err(_e) => {
            #[cfg(feature = "log")]
            log::warn!("failed to parse apdu {:?}: {:?}", header, _e);

            return malformed(engine);
        }
    };

    // Update engine
    let output = match engine.update(&evt) {
        Ok(v) => v,
        Err(e) => return Reply::status(e.status()),
    };

    if !output.is_reply() {
        return Reply::Deferred;
    }

    match output.encode(buff) {
        Ok(len) => Reply::Data {
            status: output.status(),
            len,
        },
        Err(_e) => {
            engine.reset();
            Reply::status(StatusCode::DeveloperError)
        }
    }
}

/// Malformed requests abort any transaction in progress
fn malformed<DRV: Driver>(engine: &mut Engine<DRV>) -> Reply {
    engine.reset();

    Reply::status(StatusCode::InvalidParameter)
}

/// Handle a user interface event, returning the response to any deferred APDU
pub fn handle_user<DRV: Driver>(
    engine: &mut Engine<DRV>,
    evt: &Event,
    buff: &mut [u8],
) -> Option<Reply> {
    let output = match engine.update(evt) {
        Ok(v) => v,
        Err(e) => return Some(Reply::status(e.status())),
    };

    if !output.is_reply() {
        return None;
    }

    let r = match output.encode(buff) {
        Ok(len) => Reply::Data {
            status: output.status(),
            len,
        },
        Err(_e) => {
            engine.reset();
            Reply::status(StatusCode::DeveloperError)
        }
    };

    Some(r)
}

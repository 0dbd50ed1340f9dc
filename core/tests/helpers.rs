#![allow(unused)]

use std::cell::Cell;

use bip39::{Language, Mnemonic, Seed};
use ed25519_dalek::{SigningKey, VerifyingKey};
use encdec::Encode;
use log::{debug, trace};

use ledger_sia_core::{
    apdu::{
        header::{ApduHeader, APDU_HEADER_LEN},
        status::StatusCode,
        txn::{SiacoinInput, SiacoinOutput, Transaction, TransactionSignature, UnlockConditions},
        txn_hash::{Mode, TxnHashReq},
        ApduStatic, SIA_APDU_CLA,
    },
    dispatch::{handle_apdu, handle_user, Reply},
    engine::{path, Driver, Engine, Event, Screen, State},
};

pub const MNEMONIC: &str = "duck deal pretty pen thunder economy wide common goose fit engine main aisle curtain choose cube claim snake enroll detect brief history float unit";

/// Driver implementation for test use
pub struct TestDriver {
    /// BIP39 Mnemonic derived seed
    pub seed: [u8; 64],
    /// Number of key derivations requested
    pub calls: Cell<usize>,
}

impl TestDriver {
    pub fn new(seed: Seed) -> Self {
        let mut b = [0u8; 64];
        b.copy_from_slice(seed.as_bytes());
        Self {
            seed: b,
            calls: Cell::new(0),
        }
    }

    /// Create a driver from the test mnemonic
    pub fn from_mnemonic() -> anyhow::Result<Self> {
        let mnemonic = Mnemonic::from_phrase(MNEMONIC, Language::English)?;
        let seed = Seed::new(&mnemonic, "");

        Ok(Self::new(seed))
    }

    /// Compute the public key for a given key index
    pub fn public_key(&self, key_index: u32) -> VerifyingKey {
        let p = path(key_index).unwrap();
        let k = slip10_ed25519::derive_ed25519_private_key(&self.seed, &p);
        SigningKey::from_bytes(&k).verifying_key()
    }
}

impl Driver for TestDriver {
    fn slip10_derive_ed25519(&self, path: &[u32]) -> [u8; 32] {
        self.calls.set(self.calls.get() + 1);
        slip10_ed25519::derive_ed25519_private_key(&self.seed, path)
    }
}

/// Setup logging and create an engine with the test driver
pub fn setup() -> anyhow::Result<Engine<TestDriver>> {
    let _ = simplelog::SimpleLogger::init(log::LevelFilter::Debug, Default::default());

    Ok(Engine::new(TestDriver::from_mnemonic()?))
}

/// Response to an exchanged APDU
#[derive(Clone, PartialEq, Debug)]
pub enum Resp {
    Data(StatusCode, Vec<u8>),
    Deferred,
}

impl Resp {
    fn from_reply(r: Reply, buff: &[u8]) -> Self {
        match r {
            Reply::Data { status, len } => Resp::Data(status, buff[..len].to_vec()),
            Reply::Deferred => Resp::Deferred,
        }
    }

    /// Empty OK response (more data requested)
    pub fn is_ack(&self) -> bool {
        matches!(self, Resp::Data(StatusCode::Ok, d) if d.is_empty())
    }
}

/// Encode a request APDU including header
pub fn encode_req(req: &TxnHashReq) -> Vec<u8> {
    let mut buff = [0u8; 512];

    let n = req.encode(&mut buff[APDU_HEADER_LEN..]).unwrap();
    let h = ApduHeader::new(SIA_APDU_CLA, TxnHashReq::INS, req.p1(), req.p2(), n as u8);
    h.encode(&mut buff[..APDU_HEADER_LEN]).unwrap();

    buff[..APDU_HEADER_LEN + n].to_vec()
}

/// Exchange a raw APDU with the engine
pub fn exchange_raw<D: Driver>(e: &mut Engine<D>, apdu: &[u8]) -> Resp {
    let mut buff = [0u8; 256];

    trace!("command: {:02x?}", apdu);

    let r = handle_apdu(e, apdu, &mut buff);
    let r = Resp::from_reply(r, &buff);

    debug!("response: {:02x?} (state: {})", r, e.state());

    r
}

/// Exchange a request with the engine
pub fn exchange<D: Driver>(e: &mut Engine<D>, req: &TxnHashReq) -> Resp {
    exchange_raw(e, &encode_req(req))
}

/// Send a user interface event to the engine
pub fn user<D: Driver>(e: &mut Engine<D>, evt: Event) -> Option<Resp> {
    let mut buff = [0u8; 256];

    handle_user(e, &evt, &mut buff).map(|r| Resp::from_reply(r, &buff))
}

/// Fetch the current screen as owned (label, content)
pub fn screen<D: Driver>(e: &Engine<D>) -> Option<(String, String)> {
    e.screen()
        .map(|s| (s.label().to_string(), s.content().to_string()))
}

/// Result of a transaction executed via [`run`]
#[derive(Clone, Debug)]
pub struct Outcome {
    /// Screens shown while reviewing the transaction (label, content)
    pub screens: Vec<(String, String)>,
    /// Final response
    pub resp: Resp,
}

/// Split a transaction into payloads of at most `chunk` bytes
pub fn split(txn: &[u8], chunk: usize) -> Vec<&[u8]> {
    let first = txn.len().min(chunk);

    let mut c = vec![&txn[..first]];
    c.extend(txn[first..].chunks(chunk));
    c
}

/// Stream a transaction to the engine using chunks of at most `chunk` bytes
pub fn run<D: Driver>(
    e: &mut Engine<D>,
    mode: Mode,
    key_index: u32,
    sig_index: u16,
    txn: &[u8],
    chunk: usize,
    approve: bool,
) -> Outcome {
    run_chunks(e, mode, key_index, sig_index, &split(txn, chunk), approve)
}

/// Stream pre-split transaction payloads to the engine, confirming each
/// displayed element and approving or rejecting signing
pub fn run_chunks<D: Driver>(
    e: &mut Engine<D>,
    mode: Mode,
    key_index: u32,
    sig_index: u16,
    chunks: &[&[u8]],
    approve: bool,
) -> Outcome {
    let mut screens = Vec::new();

    for (i, c) in chunks.iter().enumerate() {
        let req = match i {
            0 => TxnHashReq::first(mode, key_index, sig_index, c),
            _ => TxnHashReq::more(mode, c),
        };

        let mut resp = exchange(e, &req);

        // Review deferred screens until a response is available
        while resp == Resp::Deferred {
            screens.push(screen(e).expect("deferred response without screen"));

            let evt = match e.state() {
                State::AwaitingApproval if !approve => Event::UserRejected,
                _ => Event::UserConfirmed,
            };

            if let Some(r) = user(e, evt) {
                resp = r;
            }
        }

        if !resp.is_ack() {
            // Record hash comparison screen
            if let Some(s) = screen(e) {
                screens.push(s);
            }

            return Outcome { screens, resp };
        }
    }

    Outcome {
        screens,
        resp: Resp::Data(StatusCode::Ok, vec![]),
    }
}

/// Build a transaction with the provided siacoin outputs and miner fees,
/// spending a single input with one signature
pub fn build_txn(outputs: &[(u128, [u8; 32])], fees: &[u128]) -> Transaction {
    Transaction {
        siacoin_inputs: vec![SiacoinInput {
            parent_id: [0xa1; 32],
            unlock_conditions: UnlockConditions::standard([0xb2; 32]),
        }],
        siacoin_outputs: outputs
            .iter()
            .map(|(value, unlock_hash)| SiacoinOutput {
                value: *value,
                unlock_hash: *unlock_hash,
            })
            .collect(),
        miner_fees: fees.to_vec(),
        signatures: vec![TransactionSignature::new([0xa1; 32], 0)],
        ..Default::default()
    }
}

// Copyright (c) 2022-2023 The MobileCoin Foundation

//! The [Engine] provides transaction hashing and signing for hardware wallets.
//!
//! This handles [Event] inputs and returns [Output] responses to the caller,
//! see [apdu][crate::apdu] for APDU protocol and encoding definitions.
//!
//! ## Transaction flow
//!
//! 1. A [`Event::TxnHashFirst`] starts a transaction, resetting any previous
//!    session and moving to [`State::AwaitingData`]
//! 2. Transaction data is decoded element by element. Incomplete elements
//!    return [`Output::Ack`] to request a [`Event::TxnHashMore`], displayable
//!    elements return [`Output::Pending`] and wait in
//!    [`State::AwaitingElementAck`] until each part has been confirmed
//! 3. Once decoding completes the SigHash is either returned immediately
//!    ([`State::ShowingHash`]) or signed following user approval
//!    ([`State::AwaitingApproval`])
//!
//! Any error aborts the transaction and returns the engine to [`State::Idle`].

use strum::{Display, EnumIter, EnumString, EnumVariantNames};

use ledger_sia_apdu::txn_hash::Mode;

mod decoder;
pub use decoder::{
    Decoder, Element, Progress, Section, HASH_LEN, MAX_ELEMENT_LEN, STAGING_CAPACITY,
};

mod display;
pub use display::{parts, project, Screen};

mod event;
pub use event::Event;

mod output;
pub use output::Output;

mod error;
pub use error::Error;

mod sign;
pub use sign::{path, SIA_COIN_TYPE};

/// Engine internal state enumeration
#[derive(Copy, Clone, PartialEq, Debug, EnumString, Display, EnumVariantNames, EnumIter)]
pub enum State {
    /// Idle state, no transaction running
    Idle,
    /// Waiting for further transaction data
    AwaitingData,
    /// Element displayed, waiting for user confirmation
    AwaitingElementAck,
    /// Transaction decoded, waiting for signing approval
    AwaitingApproval,
    /// Transaction hash displayed for comparison
    ShowingHash,
}

/// [Engine] provides hardware-independent support for Sia transaction hashing and signing
pub struct Engine<DRV: Driver> {
    state: State,

    /// Sign the computed hash following approval
    sign: bool,
    key_index: u32,

    decoder: Decoder,

    /// Currently displayed element and part
    element: Option<Element>,
    part: usize,

    screen: Option<Screen>,
    hash: [u8; HASH_LEN],

    drv: DRV,
}

/// [`Driver`] trait provides platform support for [`Engine`] instances
pub trait Driver {
    /// SLIP-0010 derivation for ed25519 keys
    fn slip10_derive_ed25519(&self, path: &[u32]) -> [u8; 32];
}

impl<T: Driver> Driver for &mut T {
    fn slip10_derive_ed25519(&self, path: &[u32]) -> [u8; 32] {
        T::slip10_derive_ed25519(self, path)
    }
}

impl<DRV: Driver> Engine<DRV> {
    /// Create a new engine instance with the provided driver
    pub fn new(drv: DRV) -> Self {
        Self {
            state: State::Idle,
            sign: false,
            key_index: 0,
            decoder: Decoder::new(),
            element: None,
            part: 0,
            screen: None,
            hash: [0u8; HASH_LEN],
            drv,
        }
    }

    /// Handle incoming events
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn update(&mut self, evt: &Event) -> Result<Output, Error> {
        #[cfg(feature = "log")]
        log::debug!("event: {:02x?} (state: {})", evt, self.state);

        let r = self.handle(evt);

        // Errors abort any transaction in progress
        if let Err(_e) = &r {
            #[cfg(feature = "log")]
            log::warn!("transaction aborted in state {}: {:?}", self.state, _e);

            self.reset();
        }

        r
    }

    fn handle(&mut self, evt: &Event) -> Result<Output, Error> {
        match (self.state, evt) {
            // Empty event, do nothing
            (_, Event::None) => Ok(Output::None),

            // Start a new transaction
            (
                State::Idle | State::ShowingHash,
                Event::TxnHashFirst {
                    mode,
                    key_index,
                    sig_index,
                    data,
                },
            ) => {
                self.reset();

                self.sign = *mode == Mode::SignHash;
                self.key_index = *key_index;
                self.decoder.init(*sig_index);
                self.state = State::AwaitingData;

                self.decoder.feed(data)?;
                self.advance()
            }
            (_, Event::TxnHashFirst { .. }) => Err(Error::UnexpectedEvent),

            // Continue transaction
            (State::AwaitingData, Event::TxnHashMore { data, .. }) => {
                self.decoder.feed(data)?;
                self.advance()
            }
            (_, Event::TxnHashMore { .. }) => Err(Error::UnexpectedEvent),

            // Step through element parts
            (State::AwaitingElementAck, Event::UserConfirmed) => {
                let element = self.element.ok_or(Error::InvalidState)?;
                self.part += 1;

                match display::project(&element, self.part)? {
                    Some(s) => {
                        self.screen = Some(s);
                        Ok(Output::Pending)
                    }
                    None => self.advance(),
                }
            }
            // Only the approval screen may cancel a transaction
            (State::AwaitingElementAck, Event::UserRejected) => Ok(Output::Pending),

            // Sign on approval
            (State::AwaitingApproval, Event::UserConfirmed) => {
                let signature = sign::sign_hash(&self.drv, self.key_index, &self.hash)?;

                self.reset();

                Ok(Output::TxnSignature { signature })
            }
            (State::AwaitingApproval, Event::UserRejected) => {
                #[cfg(feature = "log")]
                log::debug!("signing rejected");

                self.reset();

                Ok(Output::Rejected)
            }

            // Dismiss hash comparison
            (State::ShowingHash, Event::UserConfirmed | Event::UserRejected) => {
                self.reset();
                Ok(Output::None)
            }

            // Ignore user input with nothing displayed
            (State::Idle | State::AwaitingData, Event::UserConfirmed | Event::UserRejected) => {
                Ok(Output::None)
            }
        }
    }

    /// Decode buffered data until an element is ready for display,
    /// more data is required, or the transaction is complete
    fn advance(&mut self) -> Result<Output, Error> {
        loop {
            match self.decoder.decode_next()? {
                Progress::Partial => {
                    self.element = None;
                    self.screen = None;
                    self.state = State::AwaitingData;

                    return Ok(Output::Ack);
                }
                Progress::Ready(Element::Skipped(_s)) => {
                    #[cfg(feature = "log")]
                    log::trace!("skipped element in {}", _s);
                }
                Progress::Ready(e) => {
                    let s = display::project(&e, 0)?.ok_or(Error::InvalidState)?;

                    self.element = Some(e);
                    self.part = 0;
                    self.screen = Some(s);
                    self.state = State::AwaitingElementAck;

                    return Ok(Output::Pending);
                }
                Progress::Finished(hash) => return self.finish(hash),
            }
        }
    }

    /// Handle completed transactions, showing the hash or requesting approval
    fn finish(&mut self, hash: [u8; HASH_LEN]) -> Result<Output, Error> {
        #[cfg(feature = "log")]
        log::debug!("transaction hash: {:02x?}", hash);

        self.element = None;
        self.hash = hash;

        if self.sign {
            self.screen = Some(Screen::approval(self.key_index)?);
            self.state = State::AwaitingApproval;

            Ok(Output::Pending)
        } else {
            self.screen = Some(Screen::hash(&hash)?);
            self.state = State::ShowingHash;

            Ok(Output::TxnHash { hash })
        }
    }

    /// Fetch engine state
    pub fn state(&self) -> State {
        self.state
    }

    /// Fetch the screen to be displayed, if any
    pub fn screen(&self) -> Option<&Screen> {
        self.screen.as_ref()
    }

    /// Fetch the element currently displayed
    pub fn element(&self) -> Option<&Element> {
        self.element.as_ref()
    }

    /// Number of transaction bytes buffered awaiting decode
    pub fn buffered(&self) -> usize {
        self.decoder.buffered()
    }

    /// Check whether the current transaction will be signed
    pub fn is_signing(&self) -> bool {
        self.sign
    }

    /// Reset engine state
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.sign = false;
        self.key_index = 0;
        self.decoder = Decoder::new();
        self.element = None;
        self.part = 0;
        self.screen = None;
        self.hash = [0u8; HASH_LEN];
    }
}

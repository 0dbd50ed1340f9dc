// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Streaming Sia transaction decoder
//!
//! Transactions are fed in arbitrarily sized chunks and decoded one element
//! at a time, with every consumed byte folded into a running BLAKE2b-256
//! SigHash. Only the undecoded tail of the transaction is buffered so memory
//! use is bounded by the size of a single element.
//!
//! Each decode step parses from the staging buffer without mutation, state
//! (hash, cursor, buffer) is only committed once a complete element has been
//! parsed, so partial or malformed elements never reach the hash.

use blake2b_simd::{Params, State as Hasher};
use byteorder::{ByteOrder, LittleEndian};
use heapless::Vec;
use num_enum::TryFromPrimitive;
use static_assertions::const_assert;
use strum::{Display, EnumIter, EnumString};

use ledger_sia_apdu::MAX_CHUNK_LEN;

use super::Error;

/// Maximum encoded size of a single transaction element
pub const MAX_ELEMENT_LEN: usize = MAX_CHUNK_LEN;

/// Staging buffer capacity, one partial element plus one chunk
pub const STAGING_CAPACITY: usize = MAX_ELEMENT_LEN + MAX_CHUNK_LEN;

/// SigHash length
pub const HASH_LEN: usize = 32;

/// Length of public key algorithm specifiers
const SPECIFIER_LEN: usize = 16;

/// Known public key algorithm specifiers
const SPECIFIERS: &[[u8; SPECIFIER_LEN]] = &[
    *b"ed25519\0\0\0\0\0\0\0\0\0",
    *b"entropy\0\0\0\0\0\0\0\0\0",
];

/// Bytes of the selected transaction signature covered by the SigHash
/// (`ParentID`, `PublicKeyIndex`, `Timelock`)
const SIGNATURE_COVERED_LEN: usize = HASH_LEN + 8 + 8;

/// Number of explicit index lists in `CoveredFields`
const COVERED_FIELDS_LISTS: usize = 10;

/// Maximum currency length (u128)
const MAX_CURRENCY_LEN: usize = 16;

/// Encoded single-key (ed25519) unlock conditions
const STANDARD_UNLOCK_CONDITIONS_LEN: usize = 8 + 8 + SPECIFIER_LEN + 8 + 32 + 8;

/// Encoded single-key siafund input
const SIAFUND_INPUT_LEN: usize = HASH_LEN + STANDARD_UNLOCK_CONDITIONS_LEN + HASH_LEN;

/// Encoded transaction signature carrying an ed25519 signature
const SIGNATURE_ELEMENT_LEN: usize =
    SIGNATURE_COVERED_LEN + 1 + COVERED_FIELDS_LISTS * 8 + 8 + 64;

// Standard elements must always fit the element bound
const_assert!(SIAFUND_INPUT_LEN <= MAX_ELEMENT_LEN);
const_assert!(SIGNATURE_ELEMENT_LEN <= MAX_ELEMENT_LEN);

/// Transaction sections, in wire order
#[derive(Copy, Clone, PartialEq, Debug, EnumString, Display, EnumIter, TryFromPrimitive)]
#[repr(u8)]
pub enum Section {
    SiacoinInputs = 0,
    SiacoinOutputs = 1,
    FileContracts = 2,
    FileContractRevisions = 3,
    StorageProofs = 4,
    SiafundInputs = 5,
    SiafundOutputs = 6,
    MinerFees = 7,
    ArbitraryData = 8,
    TransactionSignatures = 9,
}

impl Section {
    /// Fetch the following section, `None` for the final section
    pub fn next(&self) -> Option<Section> {
        Section::try_from(*self as u8 + 1).ok()
    }

    /// Sections that must be empty for a transaction to be accepted
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Section::FileContracts
                | Section::FileContractRevisions
                | Section::StorageProofs
                | Section::ArbitraryData
        )
    }
}

/// Decoded transaction element
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Element {
    /// Siacoin output, `index` within the SiacoinOutputs section
    SiacoinOutput {
        address: [u8; HASH_LEN],
        value: u128,
        index: u64,
    },
    /// Siafund output, `index` within the SiafundOutputs section
    SiafundOutput {
        address: [u8; HASH_LEN],
        value: u128,
        index: u64,
    },
    /// Miner fee, `index` within the MinerFees section
    MinerFee { value: u128, index: u64 },
    /// Hashed but not displayed element
    Skipped(Section),
}

/// Outcome of a successful decode attempt
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Progress {
    /// More data is required to decode the next element
    Partial,
    /// A single element was consumed
    Ready(Element),
    /// All elements consumed, contains the SigHash
    Finished([u8; HASH_LEN]),
}

#[derive(Copy, Clone, PartialEq, Debug)]
enum Status {
    Active,
    Finished,
    Failed,
}

/// Decode position within the transaction
#[derive(Copy, Clone, PartialEq, Debug)]
struct Cursor {
    section: Section,
    /// Section element count, `None` until the length prefix is consumed
    len: Option<u64>,
    /// Elements consumed from the current section
    index: u64,
}

impl Cursor {
    const fn start(section: Section) -> Self {
        Self {
            section,
            len: None,
            index: 0,
        }
    }

    fn is_complete(&self) -> bool {
        self.len == Some(self.index)
    }
}

/// Result of a single parse step, applied via [`Decoder::commit`]
struct Parsed {
    /// Bytes consumed from the staging buffer
    consumed: usize,
    /// Leading bytes of the consumed region to be hashed
    hashed: usize,
    cursor: Cursor,
    element: Option<Element>,
}

/// Streaming transaction decoder
pub struct Decoder {
    buff: Vec<u8, STAGING_CAPACITY>,
    hasher: Hasher,
    cursor: Cursor,
    sig_index: u64,
    decoded: usize,
    status: Status,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Create a new (finished) decoder, [`Decoder::init`] must be called
    /// prior to decoding
    pub fn new() -> Self {
        Self {
            buff: Vec::new(),
            hasher: new_hasher(),
            cursor: Cursor::start(Section::SiacoinInputs),
            sig_index: 0,
            decoded: 0,
            status: Status::Finished,
        }
    }

    /// Reset decoder for a new transaction, computing the SigHash
    /// for the signature at `sig_index`
    pub fn init(&mut self, sig_index: u16) {
        self.buff.clear();
        self.hasher = new_hasher();
        self.cursor = Cursor::start(Section::SiacoinInputs);
        self.sig_index = sig_index as u64;
        self.decoded = 0;
        self.status = Status::Active;
    }

    /// Append transaction data to the staging buffer
    pub fn feed(&mut self, data: &[u8]) -> Result<(), Error> {
        self.buff
            .extend_from_slice(data)
            .map_err(|_| Error::BufferOverflow)
    }

    /// Number of bytes currently buffered
    pub fn buffered(&self) -> usize {
        self.buff.len()
    }

    /// Number of (displayed or skipped) elements decoded
    pub fn decoded(&self) -> usize {
        self.decoded
    }

    /// Digest over the data hashed so far, without finalising the decoder
    #[cfg(test)]
    fn digest(&self) -> [u8; HASH_LEN] {
        finalize(&self.hasher)
    }

    /// Decode the next element from buffered data
    pub fn decode_next(&mut self) -> Result<Progress, Error> {
        if self.status != Status::Active {
            return Err(Error::DecoderInactive);
        }

        loop {
            let p = match self.parse() {
                Ok(v) => v,
                Err(Fault::Incomplete) => return Ok(Progress::Partial),
                Err(Fault::Invalid(e)) => {
                    #[cfg(feature = "log")]
                    log::warn!("decode failed in {}: {:?}", self.cursor.section, e);

                    self.status = Status::Failed;
                    self.buff.clear();
                    return Err(e);
                }
            };

            let element = p.element;
            self.commit(p);

            if self.cursor.is_complete() {
                match self.cursor.section.next() {
                    Some(s) => self.cursor = Cursor::start(s),
                    None => {
                        let h = finalize(&self.hasher);

                        // Trailing data is ignored
                        self.buff.clear();
                        self.status = Status::Finished;

                        return Ok(Progress::Finished(h));
                    }
                }
            }

            if let Some(e) = element {
                self.decoded += 1;
                return Ok(Progress::Ready(e));
            }
        }
    }

    /// Apply a parse step, hashing and dropping consumed data
    fn commit(&mut self, p: Parsed) {
        self.hasher.update(&self.buff[..p.hashed]);

        let n = self.buff.len();
        self.buff.copy_within(p.consumed..n, 0);
        self.buff.truncate(n - p.consumed);

        self.cursor = p.cursor;
    }

    /// Parse a section length prefix or a single element from the staging buffer
    fn parse(&self) -> Result<Parsed, Fault> {
        let mut r = Reader::new(&self.buff);
        let c = self.cursor;

        // Section length prefix
        if c.len.is_none() {
            let len = r.u64()?;

            let hashed = match c.section {
                Section::TransactionSignatures if len <= self.sig_index => {
                    return Err(Error::InvalidSignatureIndex.into())
                }
                Section::TransactionSignatures => 0,
                s if s.is_unsupported() && len > 0 => {
                    return Err(Error::UnsupportedSection.into())
                }
                _ => r.pos,
            };

            return Ok(Parsed {
                consumed: r.pos,
                hashed,
                cursor: Cursor {
                    len: Some(len),
                    ..c
                },
                element: None,
            });
        }

        let index = c.index;

        let element = match c.section {
            Section::SiacoinInputs => {
                r.hash()?;
                r.unlock_conditions()?;
                Element::Skipped(c.section)
            }
            Section::SiacoinOutputs => {
                let value = r.currency()?;
                let address = r.hash()?;
                Element::SiacoinOutput {
                    address,
                    value,
                    index,
                }
            }
            Section::SiafundInputs => {
                r.hash()?;
                r.unlock_conditions()?;
                r.hash()?;
                Element::Skipped(c.section)
            }
            Section::SiafundOutputs => {
                let value = r.currency()?;
                let address = r.hash()?;
                let _claim_start = r.currency()?;
                Element::SiafundOutput {
                    address,
                    value,
                    index,
                }
            }
            Section::MinerFees => {
                let value = r.currency()?;
                Element::MinerFee { value, index }
            }
            Section::TransactionSignatures => {
                r.hash()?;
                let _public_key_index = r.u64()?;
                let _timelock = r.u64()?;
                r.covered_fields()?;
                r.bytes()?;
                Element::Skipped(c.section)
            }
            // Rejected at the length prefix
            Section::FileContracts
            | Section::FileContractRevisions
            | Section::StorageProofs
            | Section::ArbitraryData => return Err(Error::InvalidState.into()),
        };

        let hashed = match c.section {
            Section::TransactionSignatures if index == self.sig_index => SIGNATURE_COVERED_LEN,
            Section::TransactionSignatures => 0,
            _ => r.pos,
        };

        Ok(Parsed {
            consumed: r.pos,
            hashed,
            cursor: Cursor {
                index: index + 1,
                ..c
            },
            element: Some(element),
        })
    }
}

fn new_hasher() -> Hasher {
    Params::new().hash_length(HASH_LEN).to_state()
}

fn finalize(h: &Hasher) -> [u8; HASH_LEN] {
    let mut d = [0u8; HASH_LEN];
    d.copy_from_slice(h.finalize().as_bytes());
    d
}

/// Internal parse failure
#[derive(Copy, Clone, PartialEq, Debug)]
enum Fault {
    /// More data required
    Incomplete,
    /// Malformed element
    Invalid(Error),
}

impl From<Error> for Fault {
    fn from(e: Error) -> Self {
        Fault::Invalid(e)
    }
}

/// Bounded reader over the staging buffer
struct Reader<'a> {
    buff: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buff: &'a [u8]) -> Self {
        Self { buff, pos: 0 }
    }

    /// Take `n` bytes, elements may not exceed [`MAX_ELEMENT_LEN`]
    fn take(&mut self, n: usize) -> Result<&'a [u8], Fault> {
        if self.pos + n > MAX_ELEMENT_LEN {
            return Err(Error::ElementTooLarge.into());
        }
        if self.pos + n > self.buff.len() {
            return Err(Fault::Incomplete);
        }

        let d = &self.buff[self.pos..][..n];
        self.pos += n;

        Ok(d)
    }

    fn u8(&mut self) -> Result<u8, Fault> {
        self.take(1).map(|d| d[0])
    }

    fn u64(&mut self) -> Result<u64, Fault> {
        self.take(8).map(LittleEndian::read_u64)
    }

    /// Read a length, rejecting values that can not fit in one element
    fn length(&mut self) -> Result<usize, Fault> {
        match self.u64()? {
            n if n > MAX_ELEMENT_LEN as u64 => Err(Error::ElementTooLarge.into()),
            n => Ok(n as usize),
        }
    }

    fn hash(&mut self) -> Result<[u8; HASH_LEN], Fault> {
        let mut h = [0u8; HASH_LEN];
        h.copy_from_slice(self.take(HASH_LEN)?);
        Ok(h)
    }

    /// Length-prefixed byte slice
    fn bytes(&mut self) -> Result<&'a [u8], Fault> {
        let n = self.length()?;
        self.take(n)
    }

    /// Length-prefixed big-endian currency value
    fn currency(&mut self) -> Result<u128, Fault> {
        let n = self.length()?;
        if n > MAX_CURRENCY_LEN {
            return Err(Error::CurrencyOverflow.into());
        }

        let v = self
            .take(n)?
            .iter()
            .fold(0u128, |v, b| (v << 8) | *b as u128);

        Ok(v)
    }

    fn unlock_conditions(&mut self) -> Result<(), Fault> {
        let _timelock = self.u64()?;

        let keys = self.length()?;
        for _ in 0..keys {
            let s = self.take(SPECIFIER_LEN)?;
            if !SPECIFIERS.iter().any(|k| &k[..] == s) {
                return Err(Error::UnknownSpecifier.into());
            }

            self.bytes()?;
        }

        let _signatures_required = self.u64()?;

        Ok(())
    }

    /// Only whole-transaction signatures are supported
    fn covered_fields(&mut self) -> Result<(), Fault> {
        if self.u8()? != 1 {
            return Err(Error::InvalidCoveredFields.into());
        }

        for _ in 0..COVERED_FIELDS_LISTS {
            if self.u64()? != 0 {
                return Err(Error::InvalidCoveredFields.into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::vec::Vec;

    use ledger_sia_apdu::txn::{
        specifier, PublicKey, SiacoinInput, SiacoinOutput, SiafundInput, SiafundOutput,
        Transaction, TransactionSignature, UnlockConditions,
    };

    use super::*;

    fn txn() -> Transaction {
        Transaction {
            siacoin_inputs: vec![SiacoinInput {
                parent_id: [0x11; 32],
                unlock_conditions: UnlockConditions::standard([0x22; 32]),
            }],
            siacoin_outputs: vec![
                SiacoinOutput {
                    value: 1_000_000_000_000_000_000_000_000,
                    unlock_hash: [0x33; 32],
                },
                SiacoinOutput {
                    value: 25,
                    unlock_hash: [0x44; 32],
                },
            ],
            siafund_outputs: vec![SiafundOutput {
                value: 7,
                unlock_hash: [0x55; 32],
                claim_start: 0,
            }],
            miner_fees: vec![10_000],
            signatures: vec![
                TransactionSignature::new([0x11; 32], 0),
                TransactionSignature::new([0x66; 32], 0),
            ],
            ..Default::default()
        }
    }

    /// Transaction with one siacoin input, a 1.5 SC output, a 40000 H fee
    /// and a single signature
    const KNOWN_TXN: &str = concat!(
        "0100000000000000111111111111111111111111111111111111111111111111",
        "1111111111111111000000000000000001000000000000006564323535313900",
        "0000000000000000200000000000000022222222222222222222222222222222",
        "2222222222222222222222222222222201000000000000000100000000000000",
        "0b00000000000000013da329b633647180000033333333333333333333333333",
        "3333333333333333333333333333333333333300000000000000000000000000",
        "0000000000000000000000000000000000000000000000000000000100000000",
        "00000002000000000000009c4000000000000000000100000000000000111111",
        "1111111111111111111111111111111111111111111111111111111111000000",
        "0000000000000000000000000001000000000000000000000000000000000000",
        "0000000000000000000000000000000000000000000000000000000000000000",
        "0000000000000000000000000000000000000000000000000000000000000000",
        "000000000000",
    );

    /// SigHash of [`KNOWN_TXN`] for signature 0
    const KNOWN_SIG_HASH: &str = "4d321d0b9ad0344cdb9baa2adb345e7d4ddb73938de8204688fd83aa48385655";

    /// Decode a whole transaction, feeding chunks as required
    fn decode_all(d: &mut Decoder, data: &[u8]) -> Result<(Vec<Element>, [u8; 32]), Error> {
        decode_chunked(d, data, MAX_CHUNK_LEN)
    }

    /// Decode a whole transaction, feeding chunks of `n` bytes as required
    fn decode_chunked(
        d: &mut Decoder,
        data: &[u8],
        n: usize,
    ) -> Result<(Vec<Element>, [u8; 32]), Error> {
        let mut elements = Vec::new();
        let mut chunks = data.chunks(n);

        loop {
            match d.decode_next()? {
                Progress::Partial => match chunks.next() {
                    Some(c) => d.feed(c)?,
                    None => return Err(Error::InvalidLength),
                },
                Progress::Ready(e) => elements.push(e),
                Progress::Finished(h) => return Ok((elements, h)),
            }
        }
    }

    #[test]
    fn decode_transaction() {
        let t = txn();
        let b = t.encode();

        let mut d = Decoder::new();
        d.init(1);

        let (elements, hash) = decode_all(&mut d, &b).unwrap();

        assert_eq!(
            &elements[..],
            &[
                Element::Skipped(Section::SiacoinInputs),
                Element::SiacoinOutput {
                    address: [0x33; 32],
                    value: 1_000_000_000_000_000_000_000_000,
                    index: 0
                },
                Element::SiacoinOutput {
                    address: [0x44; 32],
                    value: 25,
                    index: 1
                },
                Element::SiafundOutput {
                    address: [0x55; 32],
                    value: 7,
                    index: 0
                },
                Element::MinerFee {
                    value: 10_000,
                    index: 0
                },
                // Final signature completes the transaction
                Element::Skipped(Section::TransactionSignatures),
            ]
        );

        assert_eq!(Some(hash), t.sig_hash(1));
        assert_eq!(d.buffered(), 0);

        // Finished decoders must be re-initialised
        assert_eq!(d.decode_next(), Err(Error::DecoderInactive));
    }

    #[test]
    fn known_answer() {
        let b = hex::decode(KNOWN_TXN).unwrap();

        let mut d = Decoder::new();
        d.init(0);

        let (elements, hash) = decode_all(&mut d, &b).unwrap();

        assert_eq!(hex::encode(hash), KNOWN_SIG_HASH);
        assert_eq!(
            &elements[..],
            &[
                Element::Skipped(Section::SiacoinInputs),
                Element::SiacoinOutput {
                    address: [0x33; 32],
                    value: 1_500_000_000_000_000_000_000_000,
                    index: 0
                },
                Element::MinerFee {
                    value: 40_000,
                    index: 0
                },
            ]
        );

        // Host encoding matches the fixed vector
        let t = Transaction {
            siacoin_inputs: vec![SiacoinInput {
                parent_id: [0x11; 32],
                unlock_conditions: UnlockConditions::standard([0x22; 32]),
            }],
            siacoin_outputs: vec![SiacoinOutput {
                value: 1_500_000_000_000_000_000_000_000,
                unlock_hash: [0x33; 32],
            }],
            miner_fees: vec![40_000],
            signatures: vec![TransactionSignature::new([0x11; 32], 0)],
            ..Default::default()
        };

        assert_eq!(t.encode(), b);
        assert_eq!(t.sig_hash(0), Some(hash));
    }

    #[test]
    fn siafund_inputs() {
        let mut t = txn();
        t.siafund_inputs.push(SiafundInput {
            parent_id: [0x77; 32],
            unlock_conditions: UnlockConditions::standard([0x88; 32]),
            claim_unlock_hash: [0x99; 32],
        });
        let b = t.encode();

        for sig_index in 0..2u16 {
            let expected = t.sig_hash(sig_index as usize);

            for n in [1, 7, 64, 143, MAX_CHUNK_LEN] {
                let mut d = Decoder::new();
                d.init(sig_index);

                let (elements, hash) = decode_chunked(&mut d, &b, n).unwrap();

                // Follows the siacoin outputs, prior to siafund outputs
                assert_eq!(elements[3], Element::Skipped(Section::SiafundInputs));
                assert!(matches!(elements[4], Element::SiafundOutput { .. }));

                assert_eq!(Some(hash), expected, "hash mismatch for chunk size {n}");
            }
        }

        // Claim unlock hash is covered by the SigHash
        let mut c = t.clone();
        c.siafund_inputs[0].claim_unlock_hash = [0x9a; 32];

        let mut d = Decoder::new();
        d.init(0);

        let (_, h) = decode_all(&mut d, &c.encode()).unwrap();
        assert_eq!(Some(h), c.sig_hash(0));
        assert_ne!(Some(h), t.sig_hash(0));
    }

    #[test]
    fn partial_covered_fields() {
        let b = txn().encode();

        // WholeTransaction flag of the final (unsigned) signature
        let whole = b.len() - 8 - COVERED_FIELDS_LISTS * 8 - 1;

        let mut not_whole = b.clone();
        not_whole[whole] = 0;

        let mut with_indices = b.clone();
        with_indices[whole + 1] = 1;

        for v in [not_whole, with_indices] {
            let mut d = Decoder::new();
            d.init(0);

            assert_eq!(
                decode_all(&mut d, &v).map(|_| ()),
                Err(Error::InvalidCoveredFields)
            );
            assert_eq!(d.decode_next(), Err(Error::DecoderInactive));
        }
    }

    #[test]
    fn sig_index_selects_hash() {
        let t = txn();
        let b = t.encode();

        let mut d = Decoder::new();

        d.init(0);
        let (_, h0) = decode_all(&mut d, &b).unwrap();

        d.init(1);
        let (_, h1) = decode_all(&mut d, &b).unwrap();

        assert_ne!(h0, h1);
        assert_eq!(Some(h0), t.sig_hash(0));
    }

    #[test]
    fn sig_index_out_of_range() {
        let b = txn().encode();

        let mut d = Decoder::new();
        d.init(2);

        assert_eq!(
            decode_all(&mut d, &b).map(|_| ()),
            Err(Error::InvalidSignatureIndex)
        );
        assert_eq!(d.decode_next(), Err(Error::DecoderInactive));
    }

    #[test]
    fn partial_leaves_hash_unchanged() {
        let b = txn().encode();

        // Siacoin input section prefix plus one byte short of the first input
        let input_len = 32 + 8 + 8 + (16 + 8 + 32) + 8;

        let mut d = Decoder::new();
        d.init(0);
        d.feed(&b[..8 + input_len - 1]).unwrap();

        assert_eq!(d.decode_next(), Ok(Progress::Partial));
        let h = d.digest();
        assert_eq!(d.buffered(), input_len - 1);

        // Retrying without data changes nothing
        assert_eq!(d.decode_next(), Ok(Progress::Partial));
        assert_eq!(d.digest(), h);

        d.feed(&b[8 + input_len - 1..][..1]).unwrap();
        assert_eq!(
            d.decode_next(),
            Ok(Progress::Ready(Element::Skipped(Section::SiacoinInputs)))
        );
        assert_ne!(d.digest(), h);
        assert_eq!(d.decoded(), 1);
    }

    #[test]
    fn unknown_specifier() {
        let mut t = txn();
        t.siacoin_inputs[0].unlock_conditions.public_keys[0] = PublicKey {
            algorithm: specifier(b"secp256k1"),
            key: vec![0xab; 33],
        };

        let mut d = Decoder::new();
        d.init(0);

        assert_eq!(
            decode_all(&mut d, &t.encode()).map(|_| ()),
            Err(Error::UnknownSpecifier)
        );
        assert_eq!(d.decode_next(), Err(Error::DecoderInactive));
    }

    #[test]
    fn entropy_specifier() {
        let mut t = txn();
        t.siacoin_inputs[0].unlock_conditions.public_keys[0] = PublicKey {
            algorithm: specifier(b"entropy"),
            key: vec![0xab; 32],
        };

        let mut d = Decoder::new();
        d.init(0);

        assert!(decode_all(&mut d, &t.encode()).is_ok());
    }

    #[test]
    fn unsupported_sections() {
        let mut t = txn();
        t.arbitrary_data = vec![vec![0xaa; 4]];

        let mut d = Decoder::new();
        d.init(0);

        assert_eq!(
            decode_all(&mut d, &t.encode()).map(|_| ()),
            Err(Error::UnsupportedSection)
        );
    }

    #[test]
    fn currency_overflow() {
        // SiacoinInputs: 0, SiacoinOutputs: 1, value length 17
        let mut b = [0u8; 24];
        b[8] = 1;
        b[16] = 17;

        let mut d = Decoder::new();
        d.init(0);
        d.feed(&b).unwrap();

        assert_eq!(d.decode_next(), Err(Error::CurrencyOverflow));
    }

    #[test]
    fn oversize_element() {
        // SiacoinInputs: 1, with an unlock condition key length of 1024
        let mut b = [0u8; 8 + 32 + 8 + 8 + 16 + 8];
        b[0] = 1;
        b[8 + 32 + 8] = 1;
        b[8 + 32 + 8 + 8..][..7].copy_from_slice(b"ed25519");
        b[8 + 32 + 8 + 8 + 16..].copy_from_slice(&1024u64.to_le_bytes());

        let mut d = Decoder::new();
        d.init(0);
        d.feed(&b).unwrap();

        assert_eq!(d.decode_next(), Err(Error::ElementTooLarge));
    }

    #[test]
    fn feed_overflow() {
        let mut d = Decoder::new();
        d.init(0);

        d.feed(&[0u8; STAGING_CAPACITY]).unwrap();
        assert_eq!(d.feed(&[0u8; 1]), Err(Error::BufferOverflow));
    }

    #[test]
    fn trailing_data_ignored() {
        let t = txn();
        let mut b = t.encode();
        b.extend_from_slice(&[0xff; 16]);

        let mut d = Decoder::new();
        d.init(0);

        let (_, h) = decode_all(&mut d, &b).unwrap();
        assert_eq!(Some(h), t.sig_hash(0));
    }

    #[test]
    fn section_order() {
        use strum::IntoEnumIterator;

        let sections: Vec<_> = Section::iter().collect();
        for w in sections.windows(2) {
            assert_eq!(w[0].next(), Some(w[1]));
        }
        assert_eq!(Section::TransactionSignatures.next(), None);
    }
}

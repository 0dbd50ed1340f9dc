// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Projection of decoded elements to display screens

use core::{fmt, str::from_utf8};

use emstr::EncodeStr;
use heapless::String;

use super::{Element, Error};
use crate::helpers::{fmt_address, fmt_hash, fmt_siacoin, fmt_siafund, ADDRESS_STR_LEN};

/// Longest indexed label prefix (`Miner Fee #`, `SC Output #`)
const LABEL_PREFIX_LEN: usize = 11;

/// Maximum label length, an indexed prefix followed by a `u64`
pub const LABEL_LEN: usize = LABEL_PREFIX_LEN + 20;

/// Maximum content length (fits an address with checksum)
pub const CONTENT_LEN: usize = ADDRESS_STR_LEN;

/// Single screen of (label, content) text for the display driver
#[derive(Clone, PartialEq, Debug)]
pub struct Screen {
    pub label: String<LABEL_LEN>,
    pub content: String<CONTENT_LEN>,
}

impl Screen {
    /// Transaction signing approval screen
    pub fn approval(key_index: u32) -> Result<Self, Error> {
        Self::encode(
            |b| emstr::write!(&mut b[..], "Sign this txn").map_err(|_| fmt::Error),
            |b| emstr::write!(&mut b[..], "with key #", key_index, '?').map_err(|_| fmt::Error),
        )
    }

    /// Hash comparison screen
    pub fn hash(hash: &[u8; 32]) -> Result<Self, Error> {
        Self::encode(
            |b| emstr::write!(&mut b[..], "Compare Hash:").map_err(|_| fmt::Error),
            |b| fmt_hash(b, hash),
        )
    }

    /// Build a screen from label and content encoders
    fn encode(
        label: impl FnOnce(&mut [u8]) -> Result<usize, fmt::Error>,
        content: impl FnOnce(&mut [u8]) -> Result<usize, fmt::Error>,
    ) -> Result<Self, Error> {
        Ok(Self {
            label: encode_str(label)?,
            content: encode_str(content)?,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Encode text to a fixed capacity string
fn encode_str<const N: usize>(
    f: impl FnOnce(&mut [u8]) -> Result<usize, fmt::Error>,
) -> Result<String<N>, Error> {
    let mut buff = [0u8; N];
    let n = f(&mut buff).map_err(|_| Error::EncodingFailed)?;

    let mut s = String::new();
    from_utf8(&buff[..n])
        .ok()
        .and_then(|v| s.push_str(v).ok())
        .ok_or(Error::EncodingFailed)?;

    Ok(s)
}

/// Number of displayed parts for an element
pub fn parts(element: &Element) -> usize {
    match element {
        Element::SiacoinOutput { .. } | Element::SiafundOutput { .. } => 2,
        Element::MinerFee { .. } => 1,
        Element::Skipped(_) => 0,
    }
}

/// Indexed label encoder, ie. `SC Output #1`
fn indexed(
    name: &'static str,
    index: u64,
) -> impl FnOnce(&mut [u8]) -> Result<usize, fmt::Error> {
    move |b| emstr::write!(&mut b[..], name, index + 1).map_err(|_| fmt::Error)
}

/// Project part `part` of a decoded element to a [`Screen`],
/// returns `None` once all parts have been shown
pub fn project(element: &Element, part: usize) -> Result<Option<Screen>, Error> {
    if part >= parts(element) {
        return Ok(None);
    }

    let s = match *element {
        Element::SiacoinOutput {
            address,
            value,
            index,
        } => Screen::encode(indexed("SC Output #", index), |b| match part {
            0 => fmt_address(b, &address),
            _ => fmt_siacoin(b, value),
        }),
        Element::SiafundOutput {
            address,
            value,
            index,
        } => Screen::encode(indexed("SF Output #", index), |b| match part {
            0 => fmt_address(b, &address),
            _ => fmt_siafund(b, value),
        }),
        Element::MinerFee { value, index } => {
            Screen::encode(indexed("Miner Fee #", index), |b| fmt_siacoin(b, value))
        }
        Element::Skipped(_) => return Ok(None),
    }?;

    Ok(Some(s))
}

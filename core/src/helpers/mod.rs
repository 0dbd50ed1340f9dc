// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Display formatting helpers
//!
//! Values are encoded to byte buffers via [`emstr`], returning the number of
//! bytes written or [`fmt::Error`] if the buffer is too small.

use core::{fmt, str::from_utf8};

use blake2b_simd::Params;
use emstr::EncodeStr;

/// Hastings per siacoin (10^24)
pub const HASTINGS_PER_SC: u128 = 1_000_000_000_000_000_000_000_000;

/// Number of fractional digits in a siacoin value
const SC_DECIMALS: usize = 24;

/// Decimal digits per group when writing values wider than a `u64`
const GROUP_DIGITS: usize = 12;
const GROUP_SCALAR: u128 = 1_000_000_000_000;

/// Length of the checksum appended to displayed addresses
const ADDRESS_CHECKSUM_LEN: usize = 6;

/// Length of a formatted address (hex unlock hash and checksum)
pub const ADDRESS_STR_LEN: usize = (32 + ADDRESS_CHECKSUM_LEN) * 2;

/// Length of a formatted hash
pub const HASH_STR_LEN: usize = 64;

/// Format a hastings value as siacoin, ie. `1.5 SC`
pub fn fmt_siacoin(buff: &mut [u8], hastings: u128) -> Result<usize, fmt::Error> {
    let whole = hastings / HASTINGS_PER_SC;
    let frac = hastings % HASTINGS_PER_SC;

    let mut n = write_u128(buff, whole)?;

    if frac != 0 {
        let mut digits = [0u8; SC_DECIMALS];
        write_group(&mut digits[..GROUP_DIGITS], (frac / GROUP_SCALAR) as u64)?;
        write_group(&mut digits[GROUP_DIGITS..], (frac % GROUP_SCALAR) as u64)?;

        let len = digits
            .iter()
            .rposition(|c| *c != b'0')
            .map_or(0, |i| i + 1);
        let digits = from_utf8(&digits[..len]).map_err(|_| fmt::Error)?;

        n += emstr::write!(&mut buff[n..], '.', digits).map_err(|_| fmt::Error)?;
    }

    n += emstr::write!(&mut buff[n..], " SC").map_err(|_| fmt::Error)?;

    Ok(n)
}

/// Format a siafund value, ie. `10 SF`
pub fn fmt_siafund(buff: &mut [u8], value: u128) -> Result<usize, fmt::Error> {
    let mut n = write_u128(buff, value)?;

    n += emstr::write!(&mut buff[n..], " SF").map_err(|_| fmt::Error)?;

    Ok(n)
}

/// Format an unlock hash as a hex address with checksum
pub fn fmt_address(buff: &mut [u8], unlock_hash: &[u8; 32]) -> Result<usize, fmt::Error> {
    let h = Params::new().hash_length(32).hash(unlock_hash);

    let out = buff.get_mut(..ADDRESS_STR_LEN).ok_or(fmt::Error)?;
    let (a, b) = out.split_at_mut(HASH_STR_LEN);

    hex::encode_to_slice(unlock_hash, a).map_err(|_| fmt::Error)?;
    hex::encode_to_slice(&h.as_bytes()[..ADDRESS_CHECKSUM_LEN], b).map_err(|_| fmt::Error)?;

    Ok(ADDRESS_STR_LEN)
}

/// Format a 32-byte hash as lowercase hex
pub fn fmt_hash(buff: &mut [u8], hash: &[u8; 32]) -> Result<usize, fmt::Error> {
    let out = buff.get_mut(..HASH_STR_LEN).ok_or(fmt::Error)?;
    hex::encode_to_slice(hash, out).map_err(|_| fmt::Error)?;

    Ok(HASH_STR_LEN)
}

/// Write an unsigned integer in decimal
fn write_u128(buff: &mut [u8], v: u128) -> Result<usize, fmt::Error> {
    if let Ok(v) = u64::try_from(v) {
        return emstr::write!(&mut buff[..], v).map_err(|_| fmt::Error);
    }

    // Leading digits followed by a zero-padded group
    let n = write_u128(buff, v / GROUP_SCALAR)?;
    let out = buff.get_mut(n..).ok_or(fmt::Error)?;

    Ok(n + write_group(out, (v % GROUP_SCALAR) as u64)?)
}

/// Write a value below 10^12 as exactly [`GROUP_DIGITS`] zero-padded digits
fn write_group(buff: &mut [u8], v: u64) -> Result<usize, fmt::Error> {
    // Offset by 10^12 so leading zeros are written, then drop the leading one
    let mut d = [0u8; GROUP_DIGITS + 1];
    emstr::write!(&mut d[..], GROUP_SCALAR as u64 + v).map_err(|_| fmt::Error)?;

    buff.get_mut(..GROUP_DIGITS)
        .ok_or(fmt::Error)?
        .copy_from_slice(&d[1..]);

    Ok(GROUP_DIGITS)
}

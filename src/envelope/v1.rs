//! Envelope format v1.
//!
//! ```text
//! MAGIC (4) | VERSION (1) | MEM_COST (4) | TIME_COST (4) | PARALLELISM (4) | SALT (32) | SEALED
//! ```
//!
//! Integers are little-endian. Everything before `SEALED` is the header.

use super::{Envelope, MAGIC, MAGIC_LEN, VER_LEN};
use crate::crypto::{KdfParams, SALT_LEN, SEALED_OVERHEAD};
use crate::error::{CryptoError, Result};

pub const VERSION_V1: u8 = 1;

const MEM_LEN: usize = 4;
const TIME_LEN: usize = 4;
const PAR_LEN: usize = 4;

pub const HEADER_LEN: usize = MAGIC_LEN + VER_LEN + MEM_LEN + TIME_LEN + PAR_LEN + SALT_LEN;

fn read_u32(data: &[u8], offset: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(buf)
}

/// Encodes the v1 header for `kdf` and `salt`.
pub fn header(kdf: &KdfParams, salt: &[u8; SALT_LEN]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN);

    buf.extend_from_slice(MAGIC);
    buf.push(VERSION_V1);

    buf.extend_from_slice(&kdf.mem_cost_kib().to_le_bytes());
    buf.extend_from_slice(&kdf.time_cost().to_le_bytes());
    buf.extend_from_slice(&kdf.parallelism().to_le_bytes());

    buf.extend_from_slice(salt);

    buf
}

/// Parses a v1 envelope whose magic and version were already checked.
pub fn parse(data: &[u8]) -> Result<Envelope<'_>> {
    if data.len() < HEADER_LEN + SEALED_OVERHEAD {
        return Err(CryptoError::InvalidInput("envelope too short for v1"));
    }

    let mut offset = MAGIC_LEN + VER_LEN;

    let mem_cost = read_u32(data, offset);
    offset += MEM_LEN;

    let time_cost = read_u32(data, offset);
    offset += TIME_LEN;

    let parallelism = read_u32(data, offset);
    offset += PAR_LEN;

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&data[offset..offset + SALT_LEN]);
    offset += SALT_LEN;

    let kdf = KdfParams::new(mem_cost, time_cost, parallelism)?;

    Ok(Envelope {
        version: VERSION_V1,
        kdf,
        salt,
        header: &data[..offset],
        sealed: &data[offset..],
    })
}

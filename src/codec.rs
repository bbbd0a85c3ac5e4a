//! Little-endian decoding over a read-only byte slice.
//!
//! Every accessor bounds-checks before touching the slice and returns
//! [`XdbError::ShortBuffer`] instead of panicking, since a truncated or
//! corrupt XDB file must surface as an error, not a crash.

use byteorder::{ByteOrder, LE};

use crate::error::XdbError;

pub fn u16_le(buf: &[u8], off: usize) -> Result<u16, XdbError> {
    let end = off.checked_add(2).ok_or(XdbError::ShortBuffer)?;
    let slice = buf.get(off..end).ok_or(XdbError::ShortBuffer)?;
    Ok(LE::read_u16(slice))
}

pub fn u32_le(buf: &[u8], off: usize) -> Result<u32, XdbError> {
    let end = off.checked_add(4).ok_or(XdbError::ShortBuffer)?;
    let slice = buf.get(off..end).ok_or(XdbError::ShortBuffer)?;
    Ok(LE::read_u32(slice))
}

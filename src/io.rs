//! Tiny big-endian field readers shared by the typed section constructors.
use byteorder::{BigEndian, ByteOrder};

pub(crate) fn be_u16(buf: &[u8]) -> u16 {
    BigEndian::read_u16(buf)
}

pub(crate) fn be_u32(buf: &[u8]) -> u32 {
    BigEndian::read_u32(buf)
}

pub(crate) fn be_u64(buf: &[u8]) -> u64 {
    BigEndian::read_u64(buf)
}

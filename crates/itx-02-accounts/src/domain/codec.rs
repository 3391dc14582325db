//! # Binary Codec
//!
//! Little-endian fixed-width integers, big-endian `U256`, `u32` length
//! prefixes for byte strings and sequences, and a single presence byte
//! (`0` absent, `1` present) ahead of every optional field.

use super::errors::CodecError;
use shared_types::{EthAddress, Hash, ShardAddress, U256};

/// Append-only byte sink.
#[derive(Debug, Default)]
pub struct BinaryWriter {
    buf: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    pub fn write_u256(&mut self, value: &U256) {
        let mut bytes = [0u8; 32];
        value.to_big_endian(&mut bytes);
        self.buf.extend_from_slice(&bytes);
    }

    pub fn write_hash(&mut self, value: &Hash) {
        self.buf.extend_from_slice(value);
    }

    pub fn write_eth_address(&mut self, value: &EthAddress) {
        self.buf.extend_from_slice(value.as_bytes());
    }

    pub fn write_shard_address(&mut self, value: &ShardAddress) {
        self.buf.extend_from_slice(value.as_bytes());
    }

    pub fn write_bytes(&mut self, value: &[u8]) {
        self.write_u32(value.len() as u32);
        self.buf.extend_from_slice(value);
    }

    pub fn write_string(&mut self, value: &str) {
        self.write_bytes(value.as_bytes());
    }

    /// Presence byte, then the value if present.
    pub fn write_optional<T>(&mut self, value: Option<&T>, write: impl FnOnce(&mut Self, &T)) {
        match value {
            Some(inner) => {
                self.write_u8(1);
                write(self, inner);
            }
            None => self.write_u8(0),
        }
    }

    /// `u32` count, then each item.
    pub fn write_seq<T>(&mut self, items: &[T], mut write: impl FnMut(&mut Self, &T)) {
        self.write_u32(items.len() as u32);
        for item in items {
            write(self, item);
        }
    }
}

/// Cursor over an encoded buffer.
#[derive(Debug)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Fail if anything is left unread.
    pub fn finish(&self) -> Result<(), CodecError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(CodecError::TrailingBytes(n)),
        }
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < needed {
            return Err(CodecError::ReadPastEnd {
                needed,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + needed];
        self.pos += needed;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        self.take_array::<2>().map(u16::from_le_bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        self.take_array::<4>().map(u32::from_le_bytes)
    }

    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        self.take_array::<8>().map(u64::from_le_bytes)
    }

    pub fn read_bool(&mut self) -> Result<bool, CodecError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidBool(other)),
        }
    }

    pub fn read_u256(&mut self) -> Result<U256, CodecError> {
        let bytes = self.take_array::<32>()?;
        Ok(U256::from_big_endian(&bytes))
    }

    pub fn read_hash(&mut self) -> Result<Hash, CodecError> {
        self.take_array::<32>()
    }

    pub fn read_eth_address(&mut self) -> Result<EthAddress, CodecError> {
        self.take_array::<20>().map(EthAddress)
    }

    pub fn read_shard_address(&mut self) -> Result<ShardAddress, CodecError> {
        self.take_array::<32>().map(ShardAddress)
    }

    pub fn read_bytes(&mut self) -> Result<Vec<u8>, CodecError> {
        let len = self.read_u32()? as usize;
        Ok(self.take(len)?.to_vec())
    }

    pub fn read_string(&mut self) -> Result<String, CodecError> {
        String::from_utf8(self.read_bytes()?).map_err(|_| CodecError::InvalidUtf8)
    }

    pub fn read_optional<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> Result<T, CodecError>,
    ) -> Result<Option<T>, CodecError> {
        match self.read_u8()? {
            0 => Ok(None),
            1 => read(self).map(Some),
            other => Err(CodecError::InvalidPresenceFlag(other)),
        }
    }

    pub fn read_seq<T>(
        &mut self,
        mut read: impl FnMut(&mut Self) -> Result<T, CodecError>,
    ) -> Result<Vec<T>, CodecError> {
        let count = self.read_u32()? as usize;
        // Every item is at least one byte; refuse counts the input cannot hold
        if count > self.remaining() {
            return Err(CodecError::ReadPastEnd {
                needed: count,
                remaining: self.remaining(),
            });
        }
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(read(self)?);
        }
        Ok(items)
    }
}

/// A versioned record.
///
/// `encode_record` writes the version byte followed by the fields; nested
/// records carry their own version byte. Decoding accepts any version from
/// 1 up to `VERSION`, so older encodings stay readable.
pub trait BinaryCodec: Sized {
    /// Newest version this build writes.
    const VERSION: u8;

    fn encode_fields(&self, w: &mut BinaryWriter);

    fn decode_fields(r: &mut BinaryReader<'_>, version: u8) -> Result<Self, CodecError>;

    fn encode_record(&self, w: &mut BinaryWriter) {
        w.write_u8(Self::VERSION);
        self.encode_fields(w);
    }

    fn decode_record(r: &mut BinaryReader<'_>) -> Result<Self, CodecError> {
        let version = r.read_u8()?;
        if version == 0 || version > Self::VERSION {
            return Err(CodecError::VersionMismatch {
                supported: Self::VERSION,
                found: version,
            });
        }
        Self::decode_fields(r, version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_presence_flag() {
        let mut w = BinaryWriter::new();
        w.write_optional(Some(&7u64), |w, v| w.write_u64(*v));
        w.write_optional(None::<&u64>, |w, v| w.write_u64(*v));
        let bytes = w.into_bytes();
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[9], 0);

        let mut r = BinaryReader::new(&bytes);
        assert_eq!(r.read_optional(|r| r.read_u64()).unwrap(), Some(7));
        assert_eq!(r.read_optional(|r| r.read_u64()).unwrap(), None);
        r.finish().unwrap();
    }

    #[test]
    fn test_truncated_input_is_read_past_end() {
        let mut r = BinaryReader::new(&[1, 2, 3]);
        assert_eq!(
            r.read_u64(),
            Err(CodecError::ReadPastEnd {
                needed: 8,
                remaining: 3
            })
        );
    }

    #[test]
    fn test_bad_presence_flag() {
        let mut r = BinaryReader::new(&[2]);
        assert_eq!(
            r.read_optional(|r| r.read_u8()),
            Err(CodecError::InvalidPresenceFlag(2))
        );
    }

    #[test]
    fn test_huge_sequence_count_rejected_without_allocating() {
        let mut w = BinaryWriter::new();
        w.write_u32(u32::MAX);
        let bytes = w.into_bytes();
        let mut r = BinaryReader::new(&bytes);
        assert!(matches!(
            r.read_seq(|r| r.read_u8()),
            Err(CodecError::ReadPastEnd { .. })
        ));
    }

    #[test]
    fn test_u256_is_big_endian() {
        let mut w = BinaryWriter::new();
        w.write_u256(&U256::from(1));
        let bytes = w.into_bytes();
        assert_eq!(bytes[31], 1);
        assert!(bytes[..31].iter().all(|b| *b == 0));
    }
}

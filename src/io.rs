//! `InputSource` and `BitSink` — the byte-oriented reader and bit-oriented
//! writer the encoder treats as external collaborators, named by contract
//! only (spec. §4.1, §6). The core never inspects byte boundaries; the
//! sink is solely responsible for packing and final flush.

use bit_vec::BitVec;
use std::io::{Read, Write, Bytes};

/// Sentinel returned by [`InputSource::read_byte`] once the source is
/// exhausted. Distinguishable from any real byte because the return type
/// is wider than a byte — the same `getc`/`EOF` idiom the rest of this
/// crate's C ancestry already relies on.
pub const END_OF_INPUT: i32 = -1;

/// Supplies bytes one at a time. Calling `read_byte` again after
/// `END_OF_INPUT` must keep returning `END_OF_INPUT`.
pub trait InputSource {
    fn read_byte(&mut self) -> std::io::Result<i32>;
}

/// Adapts any `Read` into an [`InputSource`].
pub struct ByteInput<R: Read> {
    bytes: Bytes<R>,
    ended: bool,
}

impl<R: Read> ByteInput<R> {
    pub fn new(reader: R) -> Self {
        Self { bytes: reader.bytes(), ended: false }
    }
}

impl<R: Read> InputSource for ByteInput<R> {
    fn read_byte(&mut self) -> std::io::Result<i32> {
        if self.ended {
            return Ok(END_OF_INPUT);
        }
        match self.bytes.next() {
            Some(Ok(b)) => Ok(b as i32),
            Some(Err(e)) => Err(e),
            None => {
                self.ended = true;
                Ok(END_OF_INPUT)
            }
        }
    }
}

/// Accepts single-bit and multi-bit writes, packing most-significant-bit
/// first, and owns byte alignment and final flush.
pub trait BitSink {
    fn write_bit(&mut self, bit: u8) -> std::io::Result<()>;
    /// Write the low `bits` bits of `value`, MSB-first. `bits` must be in
    /// `1..=32`.
    fn write_bits(&mut self, value: u32, bits: u32) -> std::io::Result<()>;
    /// Pad the current byte with zero bits (if any are pending) and flush
    /// the underlying writer.
    fn flush(&mut self) -> std::io::Result<()>;
}

/// Adapts any `Write` into a [`BitSink`], buffering bits in a `BitVec` and
/// draining whole bytes as they accumulate — the same
/// accumulate-then-drain idiom `tools::adaptive_huff::AdaptiveHuffman`
/// uses for its Huffman code output, minus the mid-stream rewind that
/// adaptive coding needs and this format does not.
pub struct BitWriter<W: Write> {
    inner: W,
    bits: BitVec,
}

impl<W: Write> BitWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, bits: BitVec::new() }
    }

    /// Unwrap the underlying writer. Any unflushed bits are dropped; call
    /// [`BitSink::flush`] first if they matter.
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn drain_full_bytes(&mut self) -> std::io::Result<()> {
        while self.bits.len() >= 8 {
            let mut byte = 0u8;
            for i in 0..8 {
                byte = (byte << 1) | (self.bits.get(i).unwrap() as u8);
            }
            self.inner.write_all(&[byte])?;
            // keep the bit vector small: rebuild it without the bits just
            // written, mirroring AdaptiveHuffman::drop_leading_bits.
            let rest = self.bits.clone();
            self.bits = BitVec::new();
            for i in 8..rest.len() {
                self.bits.push(rest.get(i).unwrap());
            }
        }
        Ok(())
    }
}

impl<W: Write> BitSink for BitWriter<W> {
    fn write_bit(&mut self, bit: u8) -> std::io::Result<()> {
        self.bits.push(bit != 0);
        self.drain_full_bytes()
    }

    fn write_bits(&mut self, value: u32, bits: u32) -> std::io::Result<()> {
        debug_assert!((1..=32).contains(&bits));
        for i in (0..bits).rev() {
            self.bits.push((value >> i) & 1 != 0);
        }
        self.drain_full_bytes()
    }

    fn flush(&mut self) -> std::io::Result<()> {
        while !self.bits.is_empty() && self.bits.len() % 8 != 0 {
            self.bits.push(false);
        }
        self.drain_full_bytes()?;
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn end_of_input_is_idempotent() {
        let mut src = ByteInput::new(Cursor::new(vec![0x41u8]));
        assert_eq!(src.read_byte().unwrap(), 0x41);
        assert_eq!(src.read_byte().unwrap(), END_OF_INPUT);
        assert_eq!(src.read_byte().unwrap(), END_OF_INPUT);
    }

    #[test]
    fn write_bits_packs_msb_first() {
        let mut buf = Vec::new();
        {
            let mut sink = BitWriter::new(&mut buf);
            sink.write_bit(1).unwrap();
            sink.write_bits(0x41, 8).unwrap();
            sink.flush().unwrap();
        }
        // 1 01000001 + 7 zero pad bits = 10100000 1000000
        assert_eq!(buf, vec![0b10100000, 0b10000000]);
    }

    #[test]
    fn flush_on_empty_buffer_writes_nothing_extra() {
        let mut buf = Vec::new();
        {
            let mut sink = BitWriter::new(&mut buf);
            sink.write_bits(0xFF, 8).unwrap();
            sink.flush().unwrap();
        }
        assert_eq!(buf, vec![0xFF]);
    }
}

//! The compression driver: fills the look-ahead, runs the main
//! fill/encode/advance loop, and writes the end-of-stream terminator.
//! Structured the same way as `lzss_huff::compress` (prefill, then a main
//! loop that clamps the match length, chooses literal vs. match emission,
//! and advances the dictionary cursor), generalized from Huffman-coded
//! output to the raw bit-packed wire format, and from the teacher's fixed
//! `THRESHOLD`/`LOOKAHEAD` to the derived `BREAK_EVEN`/`LOOK_AHEAD`.

use crate::io::{BitSink, ByteInput, InputSource, END_OF_INPUT};
use crate::ring_buffer::RingBuffer;
use crate::tree::Tree;
use crate::{Error, Params};
use std::io::{Cursor, Read, Write};

/// Owns the sliding-window dictionary and its index tree for one
/// compression run. Re-architected from the source's file-scope
/// `Window`/`Tree` globals into an owned object so multiple compressions
/// can run without aliasing state.
pub struct Encoder {
    params: Params,
}

impl Encoder {
    /// Validates `params` and returns an encoder ready to compress.
    /// Returns [`Error::InvalidParams`] if `break_even() == 0`, which
    /// would make the driver's first emission ambiguous with the
    /// end-of-stream terminator (spec. 9, "Potential source bug").
    pub fn new(params: Params) -> Result<Self, Error> {
        if params.break_even() == 0 {
            return Err(Error::InvalidParams);
        }
        Ok(Self { params })
    }

    /// Compress everything `input` yields into `output`, then write the
    /// end-of-stream terminator and flush.
    pub fn compress<I: InputSource, O: BitSink>(&self, input: &mut I, output: &mut O) -> Result<(), Error> {
        let look_ahead = self.params.look_ahead();
        let break_even = self.params.break_even();
        let window_size = self.params.window_size();
        let index_bits = self.params.index_bits;
        let length_bits = self.params.length_bits;

        let mut dictionary: RingBuffer<u8> = RingBuffer::create(0, window_size);
        let mut tree = Tree::create(window_size);

        dictionary.set_pos(1);
        let mut ahead_bytes: usize = 0;
        let mut eos = false;

        log::debug!("prefilling look-ahead buffer ({look_ahead} bytes)");
        while ahead_bytes < look_ahead && !eos {
            let b = input.read_byte()?;
            if b == END_OF_INPUT {
                eos = true;
            } else {
                dictionary.set(ahead_bytes as i64, b as u8);
                ahead_bytes += 1;
            }
        }
        tree.init_tree(dictionary.get_pos(0));

        let mut match_len: usize = 0;
        let mut match_pos: usize = 0;

        log::debug!("entering main compression loop");
        while ahead_bytes > 0 {
            if match_len > ahead_bytes {
                match_len = ahead_bytes;
            }
            // match_len starts at 0, and Encoder::new rejects break_even() == 0,
            // so the first iteration always takes the literal branch here.
            let repl_cnt;
            if match_len <= break_even {
                repl_cnt = 1;
                output.write_bit(1)?;
                output.write_bits(dictionary.get(0) as u32, 8)?;
            } else {
                debug_assert!(match_len <= look_ahead);
                debug_assert!(match_pos != 0);
                output.write_bit(0)?;
                output.write_bits(match_pos as u32, index_bits)?;
                output.write_bits((match_len - (break_even + 1)) as u32, length_bits)?;
                repl_cnt = match_len;
            }

            for _ in 0..repl_cnt {
                tree.delete_node(dictionary.get_pos(look_ahead as i64));
                let b = input.read_byte()?;
                if b == END_OF_INPUT {
                    ahead_bytes -= 1;
                } else {
                    dictionary.set(look_ahead as i64, b as u8);
                }
                dictionary.advance();
                if ahead_bytes != 0 {
                    let (ml, mp) = tree.add_node(dictionary.get_pos(0), &dictionary, look_ahead);
                    match_len = ml;
                    match_pos = mp;
                }
            }
        }

        log::debug!("writing end-of-stream terminator");
        output.write_bit(0)?;
        output.write_bits(0, index_bits)?;
        output.flush()?;
        Ok(())
    }

    /// Convenience wrapper: compress an in-memory buffer into a `Vec<u8>`.
    pub fn compress_slice(&self, data: &[u8]) -> Result<Vec<u8>, Error> {
        let mut src = ByteInput::new(Cursor::new(data));
        let mut out = crate::BitWriter::new(Cursor::new(Vec::new()));
        self.compress(&mut src, &mut out)?;
        Ok(out.into_inner().into_inner())
    }
}

/// Compress `reader` into `writer` using `params`, a convenience entry
/// point for callers that already hold `Read`/`Write` handles (e.g. the
/// CLI, working with open files).
pub fn compress<R: Read, W: Write>(reader: &mut R, writer: &mut W, params: Params) -> Result<(), Error> {
    let encoder = Encoder::new(params)?;
    let mut src = ByteInput::new(reader);
    let mut sink = crate::BitWriter::new(writer);
    encoder.compress(&mut src, &mut sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::STD_PARAMS;

    fn compress_default(data: &[u8]) -> Vec<u8> {
        Encoder::new(STD_PARAMS).unwrap().compress_slice(data).unwrap()
    }

    #[test]
    fn empty_input_is_just_the_terminator() {
        // spec. 8 scenario 1: bit `0` + ten zero bits = 11 bits, zero padded.
        assert_eq!(compress_default(b""), vec![0x00, 0x00]);
    }

    #[test]
    fn single_byte_is_one_literal_then_terminator() {
        // spec. 8 scenario 2: 1 01000001 0 0000000000, zero padded to 24 bits.
        assert_eq!(compress_default(b"A"), vec![0xA0, 0x80, 0x00]);
    }

    #[test]
    fn two_distinct_bytes_are_two_literals_then_terminator() {
        // spec. 8 scenario 3: 1 01000001 1 01000010 0 0000000000, padded to 32 bits.
        assert_eq!(compress_default(b"AB"), vec![0xA0, 0xD0, 0x80, 0x00]);
    }

    #[test]
    fn rejects_degenerate_break_even() {
        // index_bits=0, length_bits=0 => break_even = 1/9 = 0, which would
        // make the first match record ambiguous with the terminator.
        let bad = Params { index_bits: 0, length_bits: 0 };
        assert!(Encoder::new(bad).is_err());
    }
}

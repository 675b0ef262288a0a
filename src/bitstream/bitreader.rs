//! BitReader: reads a packed huffpack message one bit (or field) at a time.
//!
//! Bits are read most significant bit first, the same order BitPacker writes them. A reader can
//! be fenced off at an exact bit position with limit(), which is how the decoder keeps the zero
//! padding at the end of the payload from ever being read as data.
//!

/// Reads a binary huffpack message held in memory.
#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    bit_index: usize,
    end: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new BitReader over the whole buffer.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            bit_index: 0,
            end: buffer.len() * 8,
        }
    }

    /// Absolute bit position of the next bit to be read.
    pub fn position(&self) -> usize {
        self.cursor * 8 + self.bit_index
    }

    /// Bits left before the reader reports end of stream.
    pub fn remaining(&self) -> usize {
        self.end.saturating_sub(self.position())
    }

    /// Stop reading after `bits` more bits. Returns false (and changes nothing) if the buffer
    /// does not hold that many bits.
    pub fn limit(&mut self, bits: usize) -> bool {
        match self.position().checked_add(bits) {
            Some(end) if end <= self.buffer.len() * 8 => {
                self.end = end;
                true
            }
            _ => false,
        }
    }

    /// Return bit as Option<usize> (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> Option<usize> {
        if self.position() >= self.end {
            return None;
        }
        let bit = (self.buffer[self.cursor] >> (7 - self.bit_index)) & 1;
        self.bit_index += 1;
        if self.bit_index == 8 {
            self.bit_index = 0;
            self.cursor += 1;
        }
        Some(bit as usize)
    }

    /// Return Option<Bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bool_bit(&mut self) -> Option<bool> {
        self.bit().map(|bit| bit == 1)
    }

    /// Return Option<u64> of the next n (0-64) bits, or None if fewer than n bits are left.
    /// Nothing is consumed when None is returned.
    pub fn bint(&mut self, mut n: usize) -> Option<u64> {
        /*
        This is used to return the header fields. A u64 stored on the stream is read with bint(64).

        Read the rest of a partial byte first, then whole bytes, then the leading bits of one
        last byte.
        */
        if n > 64 || self.remaining() < n {
            return None;
        }
        let mut result = 0_u64;

        // Finish off a partial byte
        if self.bit_index > 0 && n > 0 {
            let needed = n.min(8 - self.bit_index);
            let byte = self.buffer[self.cursor] & (0xff >> self.bit_index);
            result = (byte >> (8 - self.bit_index - needed)) as u64;
            self.bit_index += needed;
            if self.bit_index == 8 {
                self.bit_index = 0;
                self.cursor += 1;
            }
            n -= needed;
        }
        // Whole bytes
        while n >= 8 {
            result = result << 8 | self.buffer[self.cursor] as u64;
            self.cursor += 1;
            n -= 8;
        }
        // Leading bits of the last byte. bit_index is 0 here.
        if n > 0 {
            result = result << n | (self.buffer[self.cursor] >> (8 - n)) as u64;
            self.bit_index = n;
        }
        Some(result)
    }

    /// Returns a byte as an Option<u8>, or None if there is no more data to read. This is
    /// a convenience function, and calls bint(8).
    pub fn byte(&mut self) -> Option<u8> {
        self.bint(8).map(|byte| byte as u8)
    }

    /// Returns an Option<Vec<u8>> of n bytes, or None if there are not n bytes left to read.
    pub fn bytes(&mut self, n: usize) -> Option<Vec<u8>> {
        if self.remaining() / 8 < n {
            return None;
        }
        let mut result: Vec<u8> = Vec::with_capacity(n);
        for _ in 0..n {
            result.push(self.byte()?);
        }
        Some(result)
    }

    /// Everything from the current (byte aligned) position to the end of the buffer, ignoring
    /// any limit. Returns None when not on a byte boundary.
    pub fn rest(&self) -> Option<&'a [u8]> {
        if self.bit_index != 0 {
            return None;
        }
        Some(&self.buffer[self.cursor..])
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

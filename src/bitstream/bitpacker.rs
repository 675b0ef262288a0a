use log::error;

/// Creates a bitstream for output. Bits are packed most significant bit first, and codes are
/// packed back to back with no padding until flush() is called.
pub struct BitPacker {
    pub output: Vec<u8>,
    /// Number of valid bits in the final byte after flush(). 0 means the last byte is full.
    pub last_bits: u8,
    queue: u64,
    q_bits: u8,
    bits: u64,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of the size specified. Call flush() to push
    /// the last partial byte into the buffer before using the output.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            last_bits: 0,
            queue: 0,
            q_bits: 0,
            bits: 0,
        }
    }

    /// Internal bitstream write function common to all out.XX functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /*
    NOTE: out_bits takes the value right aligned. Only the `len` least significant bits are
    written, starting with the most significant of those. Eg len 4, value 0b0010 writes out 0010.

    The queue never holds more than 7 bits between calls, so feeding it at most 32 bits at a
    time can never overflow the u64.
    */
    /// Writes the `len` (0-64) least significant bits of `value`.
    pub fn out_bits(&mut self, len: u8, value: u64) {
        debug_assert!(len <= 64);
        let mut remaining = len;
        while remaining > 0 {
            let take = remaining.min(32);
            remaining -= take;
            let chunk = (value >> remaining) & (u64::MAX >> (64 - take));
            self.queue <<= take; //shift queue by bit length
            self.queue |= chunk; //add data portion to queue
            self.q_bits += take; //update depth of queue bits
            self.write_stream();
        }
        self.bits += len as u64;
    }

    /// Puts a byte on the stream.
    pub fn out8(&mut self, data: u8) {
        self.out_bits(8, data as u64);
    }

    /// Puts a 16 bit word on the stream, big endian.
    pub fn out16(&mut self, data: u16) {
        self.out_bits(16, data as u64);
    }

    /// Puts a 32 bit word on the stream, big endian.
    pub fn out32(&mut self, data: u32) {
        self.out_bits(32, data as u64);
    }

    /// Puts a 64 bit word on the stream, big endian.
    pub fn out64(&mut self, data: u64) {
        self.out_bits(64, data);
    }

    /// Exact number of bits written so far, not counting any flush padding.
    pub fn bit_count(&self) -> u64 {
        self.bits
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// signficant bits
    pub fn flush(&mut self) {
        self.last_bits = self.q_bits % 8;
        if self.q_bits > 0 {
            self.queue <<= 8 - self.q_bits; //pad the queue with zeros
            self.q_bits += 8 - self.q_bits;
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format!(
            "[{}.{}]",
            ((self.output.len() * 8) + self.q_bits as usize) / 8,
            ((self.output.len() * 8) + self.q_bits as usize) % 8
        )
    }
}

//! Streaming BLAKE2s interface.
//!
//! Provides [`Blake2sContext`] for incremental hashing and [`blake2s`] as a
//! one-shot convenience wrapper. Only the unkeyed, 32-byte-output variant is
//! needed anywhere in this crate, but the context keeps the key/output-length
//! parameters general in case a future caller needs MACs.

use crate::hash::blake2s::computations::compress;
use crate::hash::blake2s::constants::IV;

/// Incremental BLAKE2s hashing state.
pub struct Blake2sContext {
    buf: [u8; 64],
    buflen: usize,
    h: [u32; 8],
    t: u64,
    out_len: usize,
}

impl Blake2sContext {
    /// Starts an unkeyed hash producing `out_len` bytes of output
    /// (`1..=32`).
    pub fn new(out_len: usize) -> Blake2sContext {
        Blake2sContext::new_keyed(out_len, &[])
    }

    /// Starts a (possibly) keyed hash producing `out_len` bytes of output.
    ///
    /// `key` must be at most 32 bytes; an empty key gives unkeyed hashing.
    pub fn new_keyed(out_len: usize, key: &[u8]) -> Blake2sContext {
        assert!((1..=32).contains(&out_len));
        assert!(key.len() <= 32);

        let mut h = IV;
        h[0] ^= 0x0101_0000 ^ ((key.len() as u32) << 8) ^ (out_len as u32);

        let mut ctx = Blake2sContext {
            buf: [0u8; 64],
            buflen: 0,
            h,
            t: 0,
            out_len,
        };

        if !key.is_empty() {
            let mut block = [0u8; 64];
            block[..key.len()].copy_from_slice(key);
            ctx.update(&block);
        }

        ctx
    }

    /// Absorbs more input bytes.
    pub fn update(&mut self, mut data: &[u8]) {
        while !data.is_empty() {
            let space = 64 - self.buflen;
            let take = space.min(data.len());
            self.buf[self.buflen..self.buflen + take].copy_from_slice(&data[..take]);
            self.buflen += take;
            data = &data[take..];

            // Only flush a full buffer if more input is still arriving;
            // the final full-or-partial block is always left for finalize().
            if self.buflen == 64 && !data.is_empty() {
                self.t = self.t.wrapping_add(64);
                let m = block_to_words(&self.buf);
                compress(&mut self.h, &m, self.t, false);
                self.buflen = 0;
            }
        }
    }

    /// Finishes hashing and writes `out_len` bytes into `out[..out_len]`.
    pub fn finalize(mut self, out: &mut [u8]) {
        assert!(out.len() >= self.out_len);

        for b in &mut self.buf[self.buflen..] {
            *b = 0;
        }
        self.t = self.t.wrapping_add(self.buflen as u64);

        let m = block_to_words(&self.buf);
        compress(&mut self.h, &m, self.t, true);

        let mut digest = [0u8; 32];
        for (i, word) in self.h.iter().enumerate() {
            digest[i * 4..i * 4 + 4].copy_from_slice(&word.to_le_bytes());
        }
        out[..self.out_len].copy_from_slice(&digest[..self.out_len]);
    }
}

fn block_to_words(block: &[u8; 64]) -> [u32; 16] {
    let mut m = [0u32; 16];
    for (slot, chunk) in m.iter_mut().zip(block.chunks_exact(4)) {
        *slot = u32::from_le_bytes(chunk.try_into().unwrap());
    }
    m
}

/// Computes the BLAKE2s-256 digest of `input` in one call.
pub fn blake2s(input: &[u8]) -> [u8; 32] {
    let mut ctx = Blake2sContext::new(32);
    ctx.update(input);
    let mut out = [0u8; 32];
    ctx.finalize(&mut out);
    out
}

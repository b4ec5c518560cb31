//! Seeded pseudo-random generator.
//!
//! A 32-bit xorshift generator seeded from a string, so the same seed
//! always yields the same avatar variant. Each [`Prng`] owns its state;
//! create one per generation instead of sharing an instance.

use rand::RngCore;

fn xorshift(mut value: i32) -> i32 {
    value ^= value.wrapping_shl(13);
    value ^= value >> 17;
    value ^= value.wrapping_shl(5);
    value
}

fn hash_seed(seed: &str) -> i32 {
    seed.encode_utf16().fold(0i32, |hash, unit| {
        xorshift(
            hash.wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(i32::from(unit)),
        )
    })
}

/// Deterministic PRNG seeded from a string.
#[derive(Debug, Clone)]
pub struct Prng {
    seed: String,
    state: i32,
}

impl Prng {
    pub fn new(seed: &str) -> Self {
        let hash = hash_seed(seed);
        Self {
            seed: seed.to_string(),
            // Zero is a fixed point of xorshift.
            state: if hash == 0 { 1 } else { hash },
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Advance and return the raw 32-bit state.
    pub fn next(&mut self) -> i32 {
        self.state = xorshift(self.state);
        self.state
    }

    /// Uniform integer in `min..=max`.
    pub fn integer(&mut self, min: i64, max: i64) -> i64 {
        let unit = (f64::from(self.next()) - f64::from(i32::MIN))
            / (f64::from(i32::MAX) - f64::from(i32::MIN));
        // Span in f64 so full-width ranges cannot overflow.
        let span = max as f64 - min as f64 + 1.0;
        let value = (unit * span + min as f64).floor() as i64;
        // `unit` reaches 1.0 only when the state is i32::MAX; wide spans also
        // lose precision at the edges.
        value.max(min).min(max)
    }

    /// `true` with the given likelihood in percent.
    pub fn bool(&mut self, likelihood: u8) -> bool {
        self.integer(1, 100) <= i64::from(likelihood)
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.integer(0, items.len() as i64 - 1);
        items.get(index as usize)
    }

    /// Fisher–Yates shuffle driven by this generator.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.integer(0, i as i64) as usize;
            items.swap(i, j);
        }
    }
}

impl RngCore for Prng {
    fn next_u32(&mut self) -> u32 {
        self.next() as u32
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.next_u32());
        let low = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

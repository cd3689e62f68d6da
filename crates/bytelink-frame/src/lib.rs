/*! Length-prefixed frame extraction on top of a [`bytelink_fifo`]
byte FIFO. A byte source (UART interrupt, DMA) pushes raw bytes into
the FIFO; a task-context consumer calls one of the extraction routines
here to pull complete frames out of the stream.

## Frame format

```text
  8 bits     8 bits     8 bits
+---------+----------+----------+------------------------+
|  Sync   |  Len lo  |  Len hi  |  Payload + tail (L+3)  |
+---------+----------+----------+------------------------+
```

Where:
  - `Sync`: fixed marker `0x7E` identifying the start of a frame in
    the byte stream.

  - `Len`: little-endian 16-bit payload length `L`. By the protocol's
    contract the frame body is `L + 3` bytes long: the payload plus a
    three-byte check/tail region already accounted for in `L`. A
    complete frame therefore occupies `L + 6` bytes on the wire.

Two extraction flavors are provided. [`extract_frame`] mirrors the
classic firmware routine: resynchronization is destructive (every byte
up to the sync marker is consumed and discarded) and a frame that
turns out to be truncated has already lost its sync and length bytes,
so a failed call is not retryable as-is. [`extract_frame_atomic`]
peeks instead, committing cursor movement only once the whole frame is
known to be present; on failure the FIFO is left untouched.
*/

#![no_std]

use bytelink_fifo::fifo::FifoRead;
use bytelink_fifo::{dev_debug, dev_warn};
use heapless::Vec;

/// Marker byte that starts every frame.
pub const SYNC_BYTE: u8 = 0x7E;

/// Sync byte plus the two length bytes.
pub const FRAME_HEADER_LEN: usize = 3;

/// Wire bytes a frame occupies beyond its length field `L`: the
/// three-byte header plus the three body bytes `L` does not count.
pub const FRAME_OVERHEAD: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// The FIFO ran out of bytes before a sync byte appeared.
    SyncNotFound,
    /// A sync byte was found but the FIFO does not (yet) hold the
    /// complete frame. Retry once more bytes have arrived; note that
    /// [`extract_frame`] has already consumed the frame header by this
    /// point, while [`extract_frame_atomic`] has consumed nothing.
    InsufficientData,
    /// `dest` cannot hold the complete frame.
    DestinationTooSmall,
}

/// Pulls the next frame out of `fifo` into `dest`, returning the total
/// frame length (`L + 6`).
///
/// Bytes preceding the sync marker are consumed and discarded; the
/// stream is self-synchronizing, so losing them is how the protocol
/// recovers from garbage on the line. The sync and length bytes are
/// consumed before the body is known to be available, which makes an
/// [`FrameError::InsufficientData`] failure non-retryable: the partial
/// header is gone from the FIFO. Callers that cannot tolerate that
/// should use [`extract_frame_atomic`].
pub fn extract_frame<R: FifoRead>(fifo: &mut R, dest: &mut [u8]) -> Result<usize, FrameError> {
    // A destination without room for even the header is rejected
    // before any byte is consumed.
    if dest.len() < FRAME_HEADER_LEN {
        return Err(FrameError::DestinationTooSmall);
    }

    let mut skipped = 0usize;
    loop {
        match fifo.pop() {
            Some(SYNC_BYTE) => break,
            Some(_) => skipped += 1,
            None => {
                if skipped > 0 {
                    dev_debug!("No sync byte found in {} discarded bytes", skipped);
                }
                return Err(FrameError::SyncNotFound);
            }
        }
    }
    if skipped > 0 {
        dev_debug!("Resynchronized after discarding {} bytes", skipped);
    }

    dest[0] = SYNC_BYTE;

    // From here on the header bytes are already gone from the FIFO.
    let lo = fifo.pop().ok_or(FrameError::InsufficientData)?;
    dest[1] = lo;
    let hi = fifo.pop().ok_or(FrameError::InsufficientData)?;
    dest[2] = hi;

    let total = u16::from_le_bytes([lo, hi]) as usize + FRAME_OVERHEAD;
    if dest.len() < total {
        dev_warn!(
            "Frame of {} bytes does not fit destination of {}",
            total,
            dest.len()
        );
        return Err(FrameError::DestinationTooSmall);
    }

    fifo.read(&mut dest[FRAME_HEADER_LEN..total])
        .map_err(|_| FrameError::InsufficientData)?;

    Ok(total)
}

/// Like [`extract_frame`], but commits nothing until the whole frame
/// has been validated: on any failure the FIFO cursors are untouched,
/// so the call can simply be repeated once more bytes have arrived.
///
/// Junk bytes ahead of the sync marker are only discarded together
/// with a successfully extracted frame. A stream of garbage with no
/// sync byte keeps returning [`FrameError::SyncNotFound`] without
/// draining; callers that want to shed it can
/// [`skip`](FifoRead::skip) explicitly.
pub fn extract_frame_atomic<R: FifoRead>(
    fifo: &mut R,
    dest: &mut [u8],
) -> Result<usize, FrameError> {
    let mut sync_off = 0usize;
    loop {
        match fifo.peek_at(sync_off) {
            Some(SYNC_BYTE) => break,
            Some(_) => sync_off += 1,
            None => return Err(FrameError::SyncNotFound),
        }
    }

    let lo = fifo.peek_at(sync_off + 1).ok_or(FrameError::InsufficientData)?;
    let hi = fifo.peek_at(sync_off + 2).ok_or(FrameError::InsufficientData)?;
    let total = u16::from_le_bytes([lo, hi]) as usize + FRAME_OVERHEAD;

    if dest.len() < total {
        dev_warn!(
            "Frame of {} bytes does not fit destination of {}",
            total,
            dest.len()
        );
        return Err(FrameError::DestinationTooSmall);
    }
    if fifo.len() < sync_off + total {
        return Err(FrameError::InsufficientData);
    }

    // Whole frame present; commit.
    if sync_off > 0 {
        dev_debug!("Resynchronized after discarding {} bytes", sync_off);
        fifo.skip(sync_off);
    }
    fifo.read(&mut dest[..total])
        .map_err(|_| FrameError::InsufficientData)?;

    Ok(total)
}

/// [`extract_frame_atomic`] into a `heapless::Vec`, sized to the
/// extracted frame on success and cleared on failure.
pub fn extract_frame_into_vec<R: FifoRead, const N: usize>(
    fifo: &mut R,
    buf: &mut Vec<u8, N>,
) -> Result<usize, FrameError> {
    buf.clear();
    buf.resize_default(N).unwrap();

    match extract_frame_atomic(fifo, buf) {
        Ok(total) => {
            buf.truncate(total);
            Ok(total)
        }
        Err(e) => {
            buf.clear();
            Err(e)
        }
    }
}

//! TFRecord framing:
//!
//! ```text
//! u64 length | u32 masked_crc(length) | payload[length] | u32 masked_crc(payload)
//! ```
//!
//! All integers little endian, checksums are CRC-32C.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Error, Result};

const MASK_DELTA: u32 = 0xa282_ead8;

pub fn masked_crc(bytes: &[u8]) -> u32 {
    let crc = crc32c::crc32c(bytes);
    crc.rotate_right(15).wrapping_add(MASK_DELTA)
}

pub struct RecordReader<R> {
    inner: R,
    path: PathBuf,
    index: usize,
    done: bool,
}

impl<R: Read> RecordReader<R> {
    pub fn new(inner: R, path: &Path) -> Self {
        Self {
            inner,
            path: path.to_path_buf(),
            index: 0,
            done: false,
        }
    }

    fn next_record(&mut self) -> Result<Option<Vec<u8>>> {
        let mut header = [0u8; 12];
        let read = read_full(&mut self.inner, &mut header).map_err(|e| Error::io(&self.path, e))?;
        if read == 0 {
            return Ok(None);
        }
        if read < header.len() {
            self.warn_truncated();
            return Ok(None);
        }

        let (len_bytes, len_crc) = header.split_at(8);
        if masked_crc(len_bytes) != u32::from_le_bytes([len_crc[0], len_crc[1], len_crc[2], len_crc[3]]) {
            return Err(self.checksum_error("length"));
        }
        let len = u64::from_le_bytes([
            len_bytes[0],
            len_bytes[1],
            len_bytes[2],
            len_bytes[3],
            len_bytes[4],
            len_bytes[5],
            len_bytes[6],
            len_bytes[7],
        ]);

        // payload plus its crc; the buffer only grows with bytes actually in the file
        let wanted = len.saturating_add(4);
        let mut payload = Vec::new();
        (&mut self.inner)
            .take(wanted)
            .read_to_end(&mut payload)
            .map_err(|e| Error::io(&self.path, e))?;
        if (payload.len() as u64) < wanted {
            self.warn_truncated();
            return Ok(None);
        }

        let len = payload.len() - 4;
        let crc_bytes = payload.split_off(len);
        if masked_crc(&payload) != u32::from_le_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]) {
            return Err(self.checksum_error("payload"));
        }

        self.index += 1;
        Ok(Some(payload))
    }

    pub fn index(&self) -> usize {
        self.index
    }

    fn warn_truncated(&self) {
        warn!(
            path = %self.path.display(),
            record = self.index,
            "event file ends in a partial record, ignoring it"
        );
    }

    fn checksum_error(&self, part: &'static str) -> Error {
        Error::Checksum {
            path: self.path.clone(),
            index: self.index,
            part,
        }
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Like `read_exact`, but reports how much was read instead of failing at EOF.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
pub(crate) fn encode(payload: &[u8]) -> Vec<u8> {
    let len = (payload.len() as u64).to_le_bytes();
    let mut out = Vec::with_capacity(payload.len() + 16);
    out.extend_from_slice(&len);
    out.extend_from_slice(&masked_crc(&len).to_le_bytes());
    out.extend_from_slice(payload);
    out.extend_from_slice(&masked_crc(payload).to_le_bytes());
    out
}

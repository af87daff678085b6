use std::io::{ErrorKind, Read, Write};

use crate::{
    codec::{DecodeResult, EncodeResult},
    error::{DecodeError, EncodeError},
};

/// Little-endian primitive writer shared by both binary formats.
pub(crate) struct ByteWriter<W> {
    out: W,
}

impl<W: Write> ByteWriter<W> {
    pub(crate) const fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }

    pub(crate) fn write_u8(&mut self, value: u8) -> EncodeResult<()> {
        Ok(self.out.write_all(&[value])?)
    }

    pub(crate) fn write_u16(&mut self, value: u16) -> EncodeResult<()> {
        Ok(self.out.write_all(&value.to_le_bytes())?)
    }

    pub(crate) fn write_u32(&mut self, value: u32) -> EncodeResult<()> {
        Ok(self.out.write_all(&value.to_le_bytes())?)
    }

    pub(crate) fn write_f64(&mut self, value: f64) -> EncodeResult<()> {
        Ok(self.out.write_all(&value.to_le_bytes())?)
    }

    /// Writes a list length as a `u32` count.
    pub(crate) fn write_count(&mut self, len: usize) -> EncodeResult<()> {
        let count = u32::try_from(len).map_err(|_| EncodeError::TooManyItems { len })?;
        self.write_u32(count)
    }

    /// Writes `u16` length-prefixed bytes, without a terminator.
    pub(crate) fn write_str(&mut self, text: &str) -> EncodeResult<()> {
        let bytes = text.as_bytes();
        let len = u16::try_from(bytes.len()).map_err(|_| EncodeError::StringTooLong { len:
                                                                                        bytes.len() })?;
        self.write_u16(len)?;
        Ok(self.out.write_all(bytes)?)
    }
}

/// A source of encoded bytes.
///
/// Implemented for any [`Read`] through [`StreamSource`] and for in-memory
/// buffers through [`SliceSource`]. Every read names the item it is reading so
/// that truncated input reports where it stopped.
pub(crate) trait ByteSource {
    /// Fills `buf` completely or fails with [`DecodeError::UnexpectedEof`].
    fn read_into(&mut self, buf: &mut [u8], what: &'static str) -> DecodeResult<()>;

    /// Reads one byte, returning `None` at a clean end of input.
    fn try_read_u8(&mut self) -> DecodeResult<Option<u8>>;

    fn read_u8(&mut self, what: &'static str) -> DecodeResult<u8> {
        let mut buf = [0; 1];
        self.read_into(&mut buf, what)?;
        Ok(buf[0])
    }

    fn read_u16(&mut self, what: &'static str) -> DecodeResult<u16> {
        let mut buf = [0; 2];
        self.read_into(&mut buf, what)?;
        Ok(u16::from_le_bytes(buf))
    }

    fn read_u32(&mut self, what: &'static str) -> DecodeResult<u32> {
        let mut buf = [0; 4];
        self.read_into(&mut buf, what)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn read_f64(&mut self, what: &'static str) -> DecodeResult<f64> {
        let mut buf = [0; 8];
        self.read_into(&mut buf, what)?;
        Ok(f64::from_le_bytes(buf))
    }

    fn read_str(&mut self, what: &'static str) -> DecodeResult<String> {
        let len = self.read_u16(what)?;
        let mut buf = vec![0; usize::from(len)];
        self.read_into(&mut buf, what)?;
        String::from_utf8(buf).map_err(|_| DecodeError::InvalidUtf8)
    }
}

/// Reads from any [`Read`] implementation.
pub(crate) struct StreamSource<R> {
    input: R,
}

impl<R: Read> StreamSource<R> {
    pub(crate) const fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: Read> ByteSource for StreamSource<R> {
    fn read_into(&mut self, buf: &mut [u8], what: &'static str) -> DecodeResult<()> {
        self.input.read_exact(buf).map_err(|e| match e.kind() {
                                      ErrorKind::UnexpectedEof => {
                                          DecodeError::UnexpectedEof { what }
                                      },
                                      _ => DecodeError::Io(e),
                                  })
    }

    fn try_read_u8(&mut self) -> DecodeResult<Option<u8>> {
        let mut buf = [0; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => {},
                Err(e) => return Err(DecodeError::Io(e)),
            }
        }
    }
}

/// Reads from a borrowed buffer without copying it first.
pub(crate) struct SliceSource<'a> {
    data: &'a [u8],
    pos:  usize,
}

impl<'a> SliceSource<'a> {
    pub(crate) const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl ByteSource for SliceSource<'_> {
    fn read_into(&mut self, buf: &mut [u8], what: &'static str) -> DecodeResult<()> {
        let end = self.pos + buf.len();
        let bytes = self.data
                        .get(self.pos..end)
                        .ok_or(DecodeError::UnexpectedEof { what })?;
        buf.copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    fn try_read_u8(&mut self) -> DecodeResult<Option<u8>> {
        let byte = self.data.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        Ok(byte)
    }
}

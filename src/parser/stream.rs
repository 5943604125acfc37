use crate::error::{MissionError, Result};

pub const MARKER_PREFIX: u8 = 0xFF;
pub const MARKER_SOI: u8 = 0xD8;
pub const MARKER_EOI: u8 = 0xD9;
pub const MARKER_SOS: u8 = 0xDA;
pub const MARKER_APP1: u8 = 0xE1;
pub const MARKER_TEM: u8 = 0x01;
pub const MARKER_RST0: u8 = 0xD0;
pub const MARKER_RST7: u8 = 0xD7;

/// One marker segment of a JPEG file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub marker: u8,
    pub payload: &'a [u8],
}

/// JPEG marker stream over an in-memory file
///
/// Only the header segments before the first SOS are walked; entropy-coded
/// image data is never touched.
pub struct JpegSegmentStream<'a> {
    data: &'a [u8],
    pub pos: usize,
    end: usize,
    pub eof: bool,
}

impl<'a> JpegSegmentStream<'a> {
    /// Create a stream, checking the SOI marker
    pub fn new(data: &'a [u8]) -> Result<Self> {
        if data.len() < 2 || data[0] != MARKER_PREFIX || data[1] != MARKER_SOI {
            return Err(MissionError::InvalidFormat("missing JPEG SOI marker".into()));
        }
        Ok(Self {
            data,
            pos: 2,
            end: data.len(),
            eof: false,
        })
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        if self.pos < self.end {
            let byte = self.data[self.pos];
            self.pos += 1;
            Ok(byte)
        } else {
            self.eof = true;
            Err(MissionError::UnexpectedEof)
        }
    }

    /// Read a big-endian 16-bit value
    pub fn read_u16_be(&mut self) -> Result<u16> {
        let high = self.read_byte()?;
        let low = self.read_byte()?;
        Ok(((high as u16) << 8) | low as u16)
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        let stop = self.pos.checked_add(len).ok_or(MissionError::UnexpectedEof)?;
        if stop > self.end {
            self.eof = true;
            return Err(MissionError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..stop];
        self.pos = stop;
        Ok(slice)
    }

    /// Read the next marker code, skipping garbage and 0xFF fill bytes
    fn read_marker(&mut self) -> Result<u8> {
        // Discard anything up to the next marker prefix
        while self.read_byte()? != MARKER_PREFIX {}

        let mut code = self.read_byte()?;
        while code == MARKER_PREFIX {
            code = self.read_byte()?;
        }
        Ok(code)
    }

    /// Read the next header segment, or `None` at SOS/EOI
    pub fn next_segment(&mut self) -> Result<Option<Segment<'a>>> {
        loop {
            let marker = self.read_marker()?;

            match marker {
                // Stuffed zero byte, not a marker
                0x00 => continue,
                MARKER_SOI => {
                    return Err(MissionError::InvalidFormat("unexpected SOI marker".into()))
                }
                MARKER_EOI | MARKER_SOS => return Ok(None),
                MARKER_TEM | MARKER_RST0..=MARKER_RST7 => continue,
                _ => {}
            }

            let len = self.read_u16_be()? as usize;
            if len < 2 {
                return Err(MissionError::InvalidFormat(format!(
                    "segment 0x{:02X} has invalid length {}",
                    marker, len
                )));
            }
            let payload = self.read_slice(len - 2)?;
            return Ok(Some(Segment { marker, payload }));
        }
    }

    /// Collect the payloads of every APP1 segment before the image data
    pub fn app1_segments(mut self) -> Result<Vec<&'a [u8]>> {
        let mut segments = Vec::new();
        while let Some(segment) = self.next_segment()? {
            if segment.marker == MARKER_APP1 {
                segments.push(segment.payload);
            }
        }
        Ok(segments)
    }
}

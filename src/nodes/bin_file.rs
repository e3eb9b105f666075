//! Agilent/Keysight/Rigol BIN capture layout
//!
//! All fields are little-endian and decoded one at a time; nothing relies on
//! in-memory struct layout. A file is a [`FileHeader`] followed by `count`
//! waveforms, each a [`WaveHeader`] followed by `buffers` × ([`DataHeader`] + payload).

use crate::{Result, ScopeError};
use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use std::io::Cursor;

/// Data header type code for unsigned 8-bit samples
pub const DATA_TYPE_U8: i16 = 6;

/// Byte cursor over an in-memory capture
///
/// Every read is bounds-checked up front and reports [`ScopeError::Truncated`]
/// instead of reading past the blob.
pub struct BinReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> BinReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
        }
    }

    /// Current byte offset
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    /// Bytes left after the cursor
    #[inline]
    pub fn remaining(&self) -> usize {
        self.cursor.get_ref().len().saturating_sub(self.position())
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let available = self.remaining();
        if needed > available {
            return Err(ScopeError::Truncated {
                offset: self.position(),
                needed,
                available,
            });
        }
        Ok(())
    }

    /// Move the cursor forward without reading
    pub fn skip(&mut self, n: usize) {
        let pos = self.cursor.position() + n as u64;
        self.cursor.set_position(pos);
    }

    /// Borrow `n` bytes at the cursor without advancing
    pub fn peek_slice(&self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let start = self.position();
        let data: &'a [u8] = *self.cursor.get_ref();
        Ok(&data[start..start + n])
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.cursor.read_u32::<LittleEndian>()?)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.ensure(2)?;
        Ok(self.cursor.read_i16::<LittleEndian>()?)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        self.ensure(4)?;
        Ok(self.cursor.read_f32::<LittleEndian>()?)
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        self.ensure(8)?;
        Ok(self.cursor.read_f64::<LittleEndian>()?)
    }

    pub fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.peek_slice(N)?);
        self.skip(N);
        Ok(buf)
    }
}

/// Whole-file header
#[derive(Debug, Clone, PartialEq)]
pub struct FileHeader {
    /// Vendor cookie, "AG" or "RG"
    pub magic: [u8; 2],
    pub version: [u8; 2],
    /// File length in bytes as recorded by the instrument
    pub length: u32,
    /// Number of waveforms
    pub count: u32,
}

impl FileHeader {
    pub const SIZE: usize = 12;

    pub fn read(reader: &mut BinReader<'_>) -> Result<Self> {
        Ok(Self {
            magic: reader.read_bytes()?,
            version: reader.read_bytes()?,
            length: reader.read_u32()?,
            count: reader.read_u32()?,
        })
    }

    /// Vendor name from the first signature byte
    pub fn vendor(&self) -> Option<&'static str> {
        match self.magic[0] {
            b'A' => Some("Agilent/Keysight"),
            b'R' => Some("Rigol"),
            _ => None,
        }
    }
}

/// Per-waveform header
#[derive(Debug, Clone, PartialEq)]
pub struct WaveHeader {
    pub size: u32,
    pub wave_type: u32,
    pub buffers: u32,
    pub samples: u32,
    pub averaging: u32,
    /// Capture duration (x display range), seconds
    pub duration: f32,
    /// Display start time, seconds
    pub start: f64,
    /// Sample interval, seconds
    pub interval: f64,
    /// Capture time origin, seconds
    pub origin: f64,
    pub x_unit: u32,
    pub y_unit: u32,
    pub date: [u8; 16],
    pub time: [u8; 16],
    /// "MODEL:SERIAL", NUL padded
    pub hardware: [u8; 24],
    pub label: [u8; 16],
    /// Trigger holdoff, seconds
    pub holdoff: f64,
    pub segment: u32,
}

impl WaveHeader {
    pub const SIZE: usize = 140;

    pub fn read(reader: &mut BinReader<'_>) -> Result<Self> {
        Ok(Self {
            size: reader.read_u32()?,
            wave_type: reader.read_u32()?,
            buffers: reader.read_u32()?,
            samples: reader.read_u32()?,
            averaging: reader.read_u32()?,
            duration: reader.read_f32()?,
            start: reader.read_f64()?,
            interval: reader.read_f64()?,
            origin: reader.read_f64()?,
            x_unit: reader.read_u32()?,
            y_unit: reader.read_u32()?,
            date: reader.read_bytes()?,
            time: reader.read_bytes()?,
            hardware: reader.read_bytes()?,
            label: reader.read_bytes()?,
            holdoff: reader.read_f64()?,
            segment: reader.read_u32()?,
        })
    }

    /// Split the hardware id at the first ':' into (name, serial)
    ///
    /// Without a ':' the split index is 0: the name is empty and the serial
    /// is everything after the first byte.
    pub fn split_hardware(&self) -> (String, String) {
        let idx = self.hardware.iter().position(|&c| c == b':').unwrap_or(0);
        (
            trim_nul(&self.hardware[..idx]),
            trim_nul(&self.hardware[idx + 1..]),
        )
    }

    /// Waveform label with NUL padding removed
    pub fn label(&self) -> String {
        trim_nul(&self.label)
    }

    /// Timescale of one sample in femtoseconds, rounded to the nearest fs
    pub fn timescale_fs(&self) -> i64 {
        (self.interval * 1e15).round() as i64
    }
}

/// Per-buffer header
#[derive(Debug, Clone, PartialEq)]
pub struct DataHeader {
    pub size: u32,
    pub data_type: i16,
    /// Bytes per sample
    pub depth: i16,
    /// Buffer length in bytes
    pub length: u32,
}

impl DataHeader {
    pub const SIZE: usize = 12;

    pub fn read(reader: &mut BinReader<'_>) -> Result<Self> {
        Ok(Self {
            size: reader.read_u32()?,
            data_type: reader.read_i16()?,
            depth: reader.read_i16()?,
            length: reader.read_u32()?,
        })
    }

    /// Width in bytes of one element on the selected decode path
    pub fn element_width(&self) -> usize {
        if self.data_type == DATA_TYPE_U8 { 1 } else { 4 }
    }
}

/// Decode `samples` elements starting at the cursor, stepping `depth` bytes each
///
/// Type 6 buffers hold unsigned bytes; every other type holds f32. The stride is
/// always `depth`, independent of the element width. The whole span is checked
/// before decoding starts.
pub fn read_samples(
    reader: &mut BinReader<'_>,
    header: &DataHeader,
    samples: usize,
    mut sink: impl FnMut(usize, f32),
) -> Result<()> {
    if samples == 0 {
        return Ok(());
    }

    let depth = usize::try_from(header.depth)
        .ok()
        .filter(|&d| d > 0)
        .ok_or_else(|| ScopeError::Format(format!("invalid sample depth {}", header.depth)))?;
    let width = header.element_width();

    // Last element starts at (samples - 1) * depth and needs `width` bytes
    let span = (samples - 1)
        .checked_mul(depth)
        .and_then(|n| n.checked_add(width))
        .ok_or_else(|| ScopeError::Format(format!("sample span overflows ({} samples)", samples)))?;
    let data = reader.peek_slice(span)?;

    if header.data_type == DATA_TYPE_U8 {
        for k in 0..samples {
            sink(k, data[k * depth] as f32);
        }
    } else {
        for k in 0..samples {
            let p = k * depth;
            sink(k, LittleEndian::read_f32(&data[p..p + 4]));
        }
    }

    reader.skip(samples * depth);
    Ok(())
}

fn trim_nul(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&c| c == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;

    fn data_header(data_type: i16, depth: i16) -> DataHeader {
        DataHeader {
            size: DataHeader::SIZE as u32,
            data_type,
            depth,
            length: 0,
        }
    }

    #[test]
    fn test_reader_bounds() {
        let bytes = [1u8, 0, 0, 0, 2];
        let mut reader = BinReader::new(&bytes);
        assert_eq!(reader.read_u32().unwrap(), 1);
        assert_eq!(reader.remaining(), 1);

        match reader.read_u32() {
            Err(ScopeError::Truncated {
                offset,
                needed,
                available,
            }) => {
                assert_eq!(offset, 4);
                assert_eq!(needed, 4);
                assert_eq!(available, 1);
            }
            other => panic!("Expected Truncated error, got {:?}", other),
        }
        // Failed reads do not move the cursor
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn test_file_header_vendor() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RG10");
        bytes.write_u32::<LittleEndian>(100).unwrap();
        bytes.write_u32::<LittleEndian>(3).unwrap();

        let mut reader = BinReader::new(&bytes);
        let fh = FileHeader::read(&mut reader).unwrap();
        assert_eq!(reader.position(), FileHeader::SIZE);
        assert_eq!(fh.count, 3);
        assert_eq!(fh.length, 100);
        assert_eq!(fh.vendor(), Some("Rigol"));

        let unknown = FileHeader {
            magic: *b"ZZ",
            ..fh
        };
        assert_eq!(unknown.vendor(), None);
    }

    #[test]
    fn test_split_hardware() {
        let mut hardware = [0u8; 24];
        hardware[..15].copy_from_slice(b"Keysight:SN1234");
        let wh = WaveHeader {
            size: WaveHeader::SIZE as u32,
            wave_type: 1,
            buffers: 1,
            samples: 0,
            averaging: 0,
            duration: 0.0,
            start: 0.0,
            interval: 1e-9,
            origin: 0.0,
            x_unit: 2,
            y_unit: 1,
            date: [0; 16],
            time: [0; 16],
            hardware,
            label: *b"CH1\0\0\0\0\0\0\0\0\0\0\0\0\0",
            holdoff: 0.0,
            segment: 0,
        };
        assert_eq!(
            wh.split_hardware(),
            ("Keysight".to_string(), "SN1234".to_string())
        );
        assert_eq!(wh.label(), "CH1");
        assert_eq!(wh.timescale_fs(), 1_000_000);

        // 1.3e-10 * 1e15 is 129999.99999999999 in f64
        let mut fast = wh.clone();
        fast.interval = 1.3e-10;
        assert_eq!(fast.timescale_fs(), 130_000);

        let mut no_colon = wh.clone();
        no_colon.hardware = [0; 24];
        no_colon.hardware[..6].copy_from_slice(b"ABCDEF");
        assert_eq!(
            no_colon.split_hardware(),
            (String::new(), "BCDEF".to_string())
        );
    }

    #[test]
    fn test_read_samples_u8_with_stride() {
        // depth 2: every other byte is padding
        let bytes = [0u8, 0xAA, 1, 0xAA, 1, 0xAA, 0];
        let mut reader = BinReader::new(&bytes);
        let mut out = Vec::new();
        read_samples(&mut reader, &data_header(6, 2), 4, |_, v| out.push(v)).unwrap();
        assert_eq!(out, vec![0.0, 1.0, 1.0, 0.0]);
        assert_eq!(reader.position(), 8);
    }

    #[test]
    fn test_read_samples_f32() {
        let mut bytes = Vec::new();
        for v in [0.25f32, -3.5] {
            bytes.write_f32::<LittleEndian>(v).unwrap();
        }
        let mut reader = BinReader::new(&bytes);
        let mut out = Vec::new();
        read_samples(&mut reader, &data_header(1, 4), 2, |k, v| out.push((k, v))).unwrap();
        assert_eq!(out, vec![(0, 0.25), (1, -3.5)]);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_read_samples_truncated() {
        let bytes = [0u8; 7];
        let mut reader = BinReader::new(&bytes);
        let result = read_samples(&mut reader, &data_header(1, 4), 2, |_, _| {});
        assert!(matches!(result, Err(ScopeError::Truncated { .. })));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_read_samples_bad_depth() {
        let bytes = [0u8; 8];
        let mut reader = BinReader::new(&bytes);
        let result = read_samples(&mut reader, &data_header(6, 0), 2, |_, _| {});
        assert!(matches!(result, Err(ScopeError::Format(_))));
    }
}

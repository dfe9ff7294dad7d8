//! TIFF IFD/tag scan (§4.5), including the RAW-family subtypes that share
//! the TIFF container (CR2, NEF, ARW, DNG).

use crate::catalogue::DetectionResult;
use crate::error::Result;
use crate::tokenizer::Tokenizer;

#[derive(Clone, Copy)]
pub enum Endian {
    Little,
    Big,
}

fn u16_at(sample: &[u8], offset: usize, endian: Endian) -> Option<u16> {
    let bytes = sample.get(offset..offset + 2)?;
    Some(match endian {
        Endian::Little => u16::from_le_bytes([bytes[0], bytes[1]]),
        Endian::Big => u16::from_be_bytes([bytes[0], bytes[1]]),
    })
}

fn u32_at(sample: &[u8], offset: usize, endian: Endian) -> Option<u32> {
    let bytes = sample.get(offset..offset + 4)?;
    Some(match endian {
        Endian::Little => u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        Endian::Big => u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
    })
}

/// `sample` starts at the TIFF byte-order mark. Reads the 16-bit version at
/// offset 2 and the 32-bit IFD offset at offset 4; version 42 is classic
/// TIFF, 43 is BigTIFF (treated identically for the purposes of this
/// detector: bare `tif`, pending a distinguishing feature).
pub fn detect(tokenizer: &mut Tokenizer, sample: &[u8], endian: Endian) -> Result<Option<DetectionResult>> {
    let version = match u16_at(sample, 2, endian) {
        Some(v) => v,
        None => return Ok(None),
    };
    let ifd_offset = match u32_at(sample, 4, endian) {
        Some(v) => v,
        None => return Ok(None),
    };

    if version != 42 && version != 43 {
        return Ok(None);
    }

    if ifd_offset >= 6 && sample.get(8..10) == Some(b"CR".as_slice()) {
        return Ok(Some(DetectionResult::new("cr2", "image/x-canon-cr2")));
    }
    if ifd_offset >= 8 {
        let a = u16_at(sample, 8, Endian::Little);
        let b = u16_at(sample, 10, Endian::Little);
        if (a == Some(0x001C) && b == Some(0x00FE)) || (a == Some(0x001F) && b == Some(0x000B)) {
            return Ok(Some(DetectionResult::new("nef", "image/x-nikon-nef")));
        }
    }

    let ifd_offset = ifd_offset as u64;
    let current = tokenizer.position() as u64;
    if ifd_offset < current {
        return Ok(Some(DetectionResult::new("tif", "image/tiff")));
    }
    tokenizer.skip(ifd_offset - current)?;

    let entry_count = tokenizer.read_exact(2)?;
    let entry_count = match endian {
        Endian::Little => u16::from_le_bytes([entry_count[0], entry_count[1]]),
        Endian::Big => u16::from_be_bytes([entry_count[0], entry_count[1]]),
    };

    for _ in 0..entry_count {
        let tag_bytes = tokenizer.read_exact(2)?;
        let tag = match endian {
            Endian::Little => u16::from_le_bytes([tag_bytes[0], tag_bytes[1]]),
            Endian::Big => u16::from_be_bytes([tag_bytes[0], tag_bytes[1]]),
        };
        tokenizer.skip(10)?;

        match tag {
            50_341 => return Ok(Some(DetectionResult::new("arw", "image/x-sony-arw"))),
            50_706 => return Ok(Some(DetectionResult::new("dng", "image/x-adobe-dng"))),
            _ => {}
        }
    }

    Ok(Some(DetectionResult::new("tif", "image/tiff")))
}

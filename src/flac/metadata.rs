// FLAC metadata block headers

use std::io::{self, Read};

use crate::utils::io::read_be_u24;

/// FLAC file signature
pub const FLAC_SIGNATURE: &[u8; 4] = b"fLaC";

/// FLAC metadata block types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    StreamInfo = 0,
    Padding = 1,
    Application = 2,
    SeekTable = 3,
    VorbisComment = 4,
    CueSheet = 5,
    Picture = 6,
    Invalid = 127,
}

impl BlockType {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => BlockType::StreamInfo,
            1 => BlockType::Padding,
            2 => BlockType::Application,
            3 => BlockType::SeekTable,
            4 => BlockType::VorbisComment,
            5 => BlockType::CueSheet,
            6 => BlockType::Picture,
            _ => BlockType::Invalid,
        }
    }
}

/// FLAC metadata block header: 1-bit last-block flag, 7-bit type code,
/// 24-bit big-endian payload length.
#[derive(Debug)]
pub struct BlockHeader {
    pub is_last: bool,
    pub block_type: BlockType,
    pub length: u32,
}

impl BlockHeader {
    /// Read a metadata block header from the reader
    pub fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut first = [0u8; 1];
        reader.read_exact(&mut first)?;

        let is_last = (first[0] & 0x80) != 0;
        let block_type = BlockType::from_byte(first[0] & 0x7F);
        let length = read_be_u24(reader)?;

        Ok(BlockHeader {
            is_last,
            block_type,
            length,
        })
    }

    /// Discard this block's payload, leaving the reader at the next header.
    pub fn skip_payload<R: Read>(&self, reader: &mut R) -> io::Result<()> {
        io::copy(&mut reader.take(u64::from(self.length)), &mut io::sink())?;
        Ok(())
    }
}

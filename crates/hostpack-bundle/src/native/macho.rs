//! Mach-O image sniffing.

use std::io::{self, Read, Seek, SeekFrom};

use super::read_header;

pub const MH_MAGIC: u32 = 0xFEED_FACE;
pub const MH_CIGAM: u32 = 0xCEFA_EDFE;
pub const MH_MAGIC_64: u32 = 0xFEED_FACF;
pub const MH_CIGAM_64: u32 = 0xCFFA_EDFE;
pub const FAT_MAGIC: u32 = 0xCAFE_BABE;
pub const FAT_CIGAM: u32 = 0xBEBA_FECA;

/// Thin and fat magics, native and byte-swapped.
pub const MACHO_MAGICS: [u32; 6] = [
    MH_MAGIC,
    MH_CIGAM,
    MH_MAGIC_64,
    MH_CIGAM_64,
    FAT_MAGIC,
    FAT_CIGAM,
];

/// Check the first word against every Mach-O magic.
///
/// The set is closed under byte swapping, so the word's read order does not
/// matter.
pub fn sniff<R: Read + Seek>(reader: &mut R) -> io::Result<bool> {
    let mut magic = [0u8; 4];
    reader.seek(SeekFrom::Start(0))?;
    if !read_header(reader, &mut magic)? {
        return Ok(false);
    }
    Ok(MACHO_MAGICS.contains(&u32::from_be_bytes(magic)))
}

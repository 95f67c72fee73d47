//! PE (Windows) image sniffing.

use std::io::{self, Read, Seek, SeekFrom};

use super::read_header;

/// `MZ`, read as a little-endian u16.
pub const DOS_MAGIC: u16 = 0x5A4D;

/// Offset of `e_lfanew`, the PE header pointer in the DOS header.
pub const PE_POINTER_OFFSET: u64 = 0x3C;

pub const PE_SIGNATURE: [u8; 4] = *b"PE\0\0";

/// Check for a DOS stub whose `e_lfanew` points at a `PE\0\0` signature.
pub fn sniff<R: Read + Seek>(reader: &mut R) -> io::Result<bool> {
    let mut magic = [0u8; 2];
    reader.seek(SeekFrom::Start(0))?;
    if !read_header(reader, &mut magic)? || u16::from_le_bytes(magic) != DOS_MAGIC {
        return Ok(false);
    }

    let mut pointer = [0u8; 4];
    reader.seek(SeekFrom::Start(PE_POINTER_OFFSET))?;
    if !read_header(reader, &mut pointer)? {
        return Ok(false);
    }

    let mut signature = [0u8; 4];
    reader.seek(SeekFrom::Start(u64::from(u32::from_le_bytes(pointer))))?;
    if !read_header(reader, &mut signature)? {
        return Ok(false);
    }

    Ok(signature == PE_SIGNATURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn stub(pe_offset: u32) -> Vec<u8> {
        let mut image = vec![0u8; pe_offset as usize + 4];
        image[0..2].copy_from_slice(b"MZ");
        image[0x3C..0x40].copy_from_slice(&pe_offset.to_le_bytes());
        image[pe_offset as usize..].copy_from_slice(&PE_SIGNATURE);
        image
    }

    #[test]
    fn test_minimal_stub() {
        assert!(sniff(&mut Cursor::new(stub(0x80))).unwrap());
    }

    #[test]
    fn test_pe_header_inside_dos_header() {
        // e_lfanew may point anywhere past the pointer itself
        assert!(sniff(&mut Cursor::new(stub(0x40))).unwrap());
    }

    #[test]
    fn test_wrong_dos_magic() {
        let mut image = stub(0x80);
        image[0] = b'Z';
        image[1] = b'M';
        assert!(!sniff(&mut Cursor::new(image)).unwrap());
    }

    #[test]
    fn test_wrong_signature() {
        let mut image = stub(0x80);
        image[0x82] = b'X';
        assert!(!sniff(&mut Cursor::new(image)).unwrap());
    }

    #[test]
    fn test_pointer_past_end() {
        let mut image = stub(0x80);
        image[0x3C..0x40].copy_from_slice(&0xFFFF_0000u32.to_le_bytes());
        assert!(!sniff(&mut Cursor::new(image)).unwrap());
    }

    #[test]
    fn test_truncated_before_pointer() {
        let image = b"MZ\x90\x00".to_vec();
        assert!(!sniff(&mut Cursor::new(image)).unwrap());
    }
}

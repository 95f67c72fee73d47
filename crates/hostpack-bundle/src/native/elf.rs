//! ELF image sniffing.

use std::io::{self, Read, Seek, SeekFrom};

use super::read_header;

pub const ELF_MAGIC: [u8; 4] = [0x7F, b'E', b'L', b'F'];

/// Check the four ELF identification bytes.
pub fn sniff<R: Read + Seek>(reader: &mut R) -> io::Result<bool> {
    let mut magic = [0u8; 4];
    reader.seek(SeekFrom::Start(0))?;
    if !read_header(reader, &mut magic)? {
        return Ok(false);
    }
    Ok(magic == ELF_MAGIC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_elf_header() {
        let mut image = ELF_MAGIC.to_vec();
        image.extend_from_slice(&[2, 1, 1, 0]);
        assert!(sniff(&mut Cursor::new(image)).unwrap());
    }

    #[test]
    fn test_exact_magic_only() {
        assert!(sniff(&mut Cursor::new(ELF_MAGIC.to_vec())).unwrap());
        assert!(!sniff(&mut Cursor::new(b"\x7felf".to_vec())).unwrap());
        assert!(!sniff(&mut Cursor::new(b"FLE\x7f".to_vec())).unwrap());
        assert!(!sniff(&mut Cursor::new(Vec::new())).unwrap());
    }
}

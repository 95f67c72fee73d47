//! Native image classification
//!
//! Decides whether a file is a native executable image for a target OS by
//! sniffing the smallest header window that identifies the format:
//! - **pe**: Windows `MZ` stub plus the `PE\0\0` signature it points to
//! - **macho**: 32-bit, 64-bit and fat Mach-O magics in either byte order
//! - **elf**: the `\x7fELF` identification bytes
//!
//! A bundle targets exactly one OS, so only that OS's format is checked.
//! Unreadable or truncated files are "not native"; classification never
//! fails the caller.

pub mod elf;
pub mod macho;
pub mod pe;

use std::fmt;
use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::Path;

use crate::platform::Os;

/// Executable image format used by a target OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Pe,
    MachO,
    Elf,
}

impl ImageFormat {
    pub fn for_os(os: Os) -> Self {
        match os {
            Os::Windows => ImageFormat::Pe,
            Os::Osx => ImageFormat::MachO,
            Os::Linux | Os::FreeBsd | Os::Illumos => ImageFormat::Elf,
        }
    }

    /// Check the header at the start of `reader`.
    ///
    /// A stream too short to hold the header is `Ok(false)`; other I/O
    /// errors are returned.
    pub fn sniff<R: Read + Seek>(self, reader: &mut R) -> io::Result<bool> {
        match self {
            ImageFormat::Pe => pe::sniff(reader),
            ImageFormat::MachO => macho::sniff(reader),
            ImageFormat::Elf => elf::sniff(reader),
        }
    }

    /// Check the file at `path`, treating any failure as "not an image".
    pub fn matches_file(self, path: &Path) -> bool {
        let result = File::open(path).and_then(|mut file| self.sniff(&mut file));
        match result {
            Ok(matched) => matched,
            Err(err) => {
                tracing::debug!(
                    path = %path.display(),
                    format = %self,
                    error = %err,
                    "could not sniff file, treating as non-native"
                );
                false
            }
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImageFormat::Pe => "PE",
            ImageFormat::MachO => "Mach-O",
            ImageFormat::Elf => "ELF",
        })
    }
}

/// Whether `path` is a native executable image for `os`.
pub fn is_native_binary(os: Os, path: &Path) -> bool {
    ImageFormat::for_os(os).matches_file(path)
}

/// Fill `buf` from `reader`, returning `Ok(false)` if the stream ends first.
fn read_header<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<bool> {
    match reader.read_exact(buf) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(err) => Err(err),
    }
}

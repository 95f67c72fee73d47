//! Integration tests for native image classification against real files

use std::fs;
use std::path::PathBuf;

use hostpack_bundle::{
    is_native_binary, Architecture, FrameworkVersion, ImageFormat, Os, TargetInfo,
};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

fn pe_stub() -> Vec<u8> {
    let mut image = vec![0u8; 0x84];
    image[0..2].copy_from_slice(b"MZ");
    image[0x3C..0x40].copy_from_slice(&0x80u32.to_le_bytes());
    image[0x80..0x84].copy_from_slice(b"PE\0\0");
    image
}

fn elf_stub() -> Vec<u8> {
    let mut image = vec![0x7F, b'E', b'L', b'F', 2, 1, 1, 0];
    image.resize(64, 0);
    image
}

fn macho_stub() -> Vec<u8> {
    // MH_MAGIC_64 as stored by a little-endian producer
    let mut image = 0xFEED_FACFu32.to_le_bytes().to_vec();
    image.resize(32, 0);
    image
}

#[test]
fn test_pe_stub_native_on_windows_only() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "app.exe", &pe_stub());

    assert!(is_native_binary(Os::Windows, &path));
    assert!(!is_native_binary(Os::Linux, &path));
    assert!(!is_native_binary(Os::Osx, &path));
}

#[test]
fn test_elf_native_on_unix_like_targets() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "libnative.so", &elf_stub());

    assert!(is_native_binary(Os::Linux, &path));
    assert!(is_native_binary(Os::FreeBsd, &path));
    assert!(is_native_binary(Os::Illumos, &path));
    assert!(!is_native_binary(Os::Windows, &path));
    assert!(!is_native_binary(Os::Osx, &path));
}

#[test]
fn test_macho_native_on_osx_only() {
    let dir = TempDir::new().unwrap();
    let thin = write(&dir, "libnative.dylib", &macho_stub());
    let fat = write(&dir, "universal", &[0xCA, 0xFE, 0xBA, 0xBE, 0, 0, 0, 2]);

    assert!(is_native_binary(Os::Osx, &thin));
    assert!(is_native_binary(Os::Osx, &fat));
    assert!(!is_native_binary(Os::Linux, &thin));
}

#[test]
fn test_three_byte_file_is_never_native() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "tiny", b"\x7fEL");

    for os in Os::ALL {
        assert!(!is_native_binary(os, &path));
    }
    for format in [ImageFormat::Pe, ImageFormat::MachO, ImageFormat::Elf] {
        assert!(!format.matches_file(&path));
    }
}

#[test]
fn test_empty_and_text_files() {
    let dir = TempDir::new().unwrap();
    let empty = write(&dir, "empty", b"");
    let json = write(&dir, "app.deps.json", b"{\"runtimeTarget\": {}}");

    for os in Os::ALL {
        assert!(!is_native_binary(os, &empty));
        assert!(!is_native_binary(os, &json));
    }
}

#[test]
fn test_directory_is_not_native() {
    let dir = TempDir::new().unwrap();
    for os in Os::ALL {
        assert!(!is_native_binary(os, dir.path()));
    }
}

#[test]
fn test_missing_file_is_not_native() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gone.dll");
    assert!(!is_native_binary(Os::Windows, &path));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_not_native() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = write(&dir, "locked.so", &elf_stub());
    fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

    // Root can still open the file, in which case it is readable and native.
    let readable = fs::File::open(&path).is_ok();
    assert_eq!(is_native_binary(Os::Linux, &path), readable);
}

#[test]
fn test_target_info_delegates_on_its_os() {
    let dir = TempDir::new().unwrap();
    let pe = write(&dir, "host.exe", &pe_stub());
    let elf = write(&dir, "host", &elf_stub());

    let win = TargetInfo::new(Os::Windows, Architecture::X64, FrameworkVersion::new(6, 0))
        .unwrap();
    let linux = TargetInfo::new(Os::Linux, Architecture::Arm64, FrameworkVersion::new(6, 0))
        .unwrap();

    assert!(win.is_native_binary(&pe));
    assert!(!win.is_native_binary(&elf));
    assert!(linux.is_native_binary(&elf));
    assert!(!linux.is_native_binary(&pe));
}

#[test]
fn test_parallel_classification() {
    let dir = TempDir::new().unwrap();
    let paths: Vec<PathBuf> = (0..32)
        .map(|i| {
            let bytes = if i % 2 == 0 { elf_stub() } else { pe_stub() };
            write(&dir, &format!("file{}", i), &bytes)
        })
        .collect();

    let results: Vec<bool> = std::thread::scope(|scope| {
        let handles: Vec<_> = paths
            .iter()
            .map(|p| scope.spawn(move || is_native_binary(Os::Linux, p)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, native) in results.into_iter().enumerate() {
        assert_eq!(native, i % 2 == 0, "file{}", i);
    }
}

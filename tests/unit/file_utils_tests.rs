/*!
 * Tests for file utility functionality
 */

use std::path::PathBuf;

use srtran::file_utils::FileManager;

#[test]
fn test_generate_output_path_shouldInsertLanguageBeforeExtension() {
    let path = FileManager::generate_output_path(PathBuf::from("/movies/show.srt"), "vi", "srt");
    assert_eq!(path, PathBuf::from("/movies/show.vi.srt"));
}

#[test]
fn test_generate_output_path_withoutParent_shouldUseCurrentDir() {
    let path = FileManager::generate_output_path(PathBuf::from("show.srt"), "fr", "srt");
    assert_eq!(path, PathBuf::from("show.fr.srt"));
}

#[test]
fn test_read_to_string_withUtf8Content_shouldReadAsIs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("utf8.srt");
    std::fs::write(&path, "xin chào thế giới").unwrap();

    let content = FileManager::read_to_string(&path).unwrap();
    assert_eq!(content, "xin chào thế giới");
}

#[test]
fn test_read_to_string_withLatin1Content_shouldFallBack() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.srt");
    // "café" encoded as Latin-1: 0xE9 is not valid UTF-8 on its own
    std::fs::write(&path, [0x63, 0x61, 0x66, 0xE9]).unwrap();

    let content = FileManager::read_to_string(&path).unwrap();
    assert_eq!(content, "café");
}

#[test]
fn test_write_to_file_shouldCreateParentDirectories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deep").join("out.srt");

    FileManager::write_to_file(&path, "content").unwrap();

    assert!(FileManager::file_exists(&path));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "content");
}

//! Test helpers for writing itinerary fixtures.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Write `contents` to `path`, panicking on failure.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents)
        .unwrap_or_else(|err| panic!("failed to write {path}: {err}"));
}

/// A temporary directory with a UTF-8 root path.
pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Three stops in Jongno, the second one without coordinates, listed out
/// of visiting order.
pub(super) const JONGNO_ITINERARY: &str = r#"{
    "title": "Palaces and tea houses",
    "date": "2025-05-03",
    "stops": [
        {"id": 30, "name": "Insadong", "location": {"latitude": 37.574, "longitude": 126.985}, "visitOrder": 3},
        {"id": 10, "name": "Gyeongbokgung", "location": {"latitude": 37.5796, "longitude": 126.977}, "visitOrder": 1},
        {"id": 20, "name": "Hand-written tea house", "visitOrder": 2, "visitTime": "13:00"}
    ]
}"#;

/// Two stops a short walk apart and a third across the river.
pub(super) const SEOUL_ITINERARY: &str = r#"{
    "title": "Museums",
    "stops": [
        {"id": 1, "name": "Seoul City Hall", "location": {"latitude": 37.5665, "longitude": 126.978}, "visitOrder": 1},
        {"id": 2, "name": "Deoksugung", "location": {"latitude": 37.5658, "longitude": 126.9751}, "visitOrder": 2},
        {"id": 3, "name": "Gangnam Station", "location": {"latitude": 37.4979, "longitude": 127.0276}, "visitOrder": 3}
    ]
}"#;

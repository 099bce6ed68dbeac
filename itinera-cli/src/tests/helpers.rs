//! Test helpers for writing CLI inputs into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use itinera_core::TripRequest;
use itinera_core::test_support::{place, request, stop};
use tempfile::TempDir;

/// Temporary directory addressed through UTF-8 paths.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture");
}

/// A Tokyo departure with one London stay; the leg is long enough to fly.
pub(super) fn long_haul_request() -> TripRequest {
    request(
        place("Tokyo", 139.69, 35.69),
        &["ana"],
        vec![stop("london", place("London", -0.13, 51.51), &["ana"], 5, 48.0)],
    )
}

pub(super) fn write_request(path: &Utf8Path, trip: &TripRequest) {
    let payload = serde_json::to_string_pretty(trip).expect("serialise request");
    write_utf8(path, payload.as_bytes());
}

pub(super) const AIRPORTS_JSON: &str = r#"[
    {"name": "Haneda Airport", "location": {"x": 139.78, "y": 35.55}},
    {"name": "Heathrow Airport", "location": {"x": -0.45, "y": 51.47}}
]"#;

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

pub const MOVIES_CSV: &str = "\
id,title,genres
1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy
2,Jumanji (1995),Adventure|Children|Fantasy
3,\"American President, The (1995)\",Comedy|Drama|Romance
4,\"Je, tu, il, elle (1974)\",Drama
";

pub const RATINGS_CSV: &str = "\
id,user_id,movie_id,rating,timestamp
1,1,1,4.0,964982703
2,1,3,4,964981247
3,2,2,3.5,964982224
";

pub const TAGS_CSV: &str = "\
id,user_id,movie_id,tag,timestamp
1,2,1,pixar,1445714994
2,2,3,Rock'n'roll,1445714996
";

pub const USERS_TXT: &str = "\
1|Ann O'Hara|ann@example.com|female|2019-03-12|engineer
2|Bob Stone|bob@example.com||2020-07-01|
3|Cleo|cleo@example.com|female|2021-01-15|artist
";

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Creates a workspace pre-populated with all four dataset files.
    pub fn with_datasets() -> Self {
        let workspace = Self::new();
        workspace.write("movies.csv", MOVIES_CSV);
        workspace.write("ratings.csv", RATINGS_CSV);
        workspace.write("tags.csv", TAGS_CSV);
        workspace.write("users.txt", USERS_TXT);
        workspace
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        self.write_bytes(name, contents.as_bytes())
    }

    pub fn write_bytes(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents).expect("write temp file contents");
        path
    }
}

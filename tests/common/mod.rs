use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// A throwaway project root holding a lessons folder and a README.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new(readme: &str) -> Project {
        let dir = TempDir::new().expect("failed to create temp dir");
        fs::create_dir(dir.path().join("lessions")).expect("failed to create lessons root");
        fs::write(dir.path().join("README.md"), readme).expect("failed to write README");

        Project { dir }
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    #[allow(dead_code)] // Not every test binary adds lessons.
    pub fn with_lessons(self, names: &[&str]) -> Project {
        for name in names {
            fs::create_dir(self.dir.path().join("lessions").join(name))
                .expect("failed to create lesson");
        }

        self
    }

    #[allow(dead_code)] // Not every test binary adds files.
    pub fn with_file(self, relative: &str, contents: &str) -> Project {
        fs::write(self.dir.path().join(relative), contents).expect("failed to write file");

        self
    }

    pub fn readme(&self) -> String {
        fs::read_to_string(self.dir.path().join("README.md")).expect("failed to read README")
    }
}

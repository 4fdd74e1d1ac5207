use std::path::PathBuf;

/// Where the lessons and the README live, and how the contents section is written.
///
/// Paths are relative to the project root handed to the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one folder per lesson.
    pub lessons: PathBuf,
    /// The document whose contents section is rewritten.
    pub readme: PathBuf,
    /// Heading line that introduces the contents section.
    pub heading: String,
    /// Prefix placed in front of every percent-encoded folder name in a link target.
    pub link_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lessons: PathBuf::from("lessions"),
            readme: PathBuf::from("README.md"),
            heading: String::from("## Contents"),
            link_prefix: String::from("lessions/"),
        }
    }
}

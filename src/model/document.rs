use std::{
    fs,
    io::{self, Write as _},
    ops::Range,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::{debug, trace};

use crate::error::ContentsError;

/// A text document containing a section that is rewritten in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Where the document was loaded from.
    pub path: PathBuf,
    /// The full, unmodified text of the document.
    pub source: String,
}

impl Document {
    pub fn load(path: impl Into<PathBuf>) -> Result<Document, ContentsError> {
        let path = path.into();
        let source = fs::read_to_string(&path).map_err(|source| ContentsError::Read {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), bytes = source.len(), "loaded document");

        Ok(Document { path, source })
    }

    /// The span of the section introduced by `marker`, if the document has one.
    pub fn section(&self, marker: &str) -> Option<SectionSpan> {
        find_section(&self.source, marker)
    }

    /// The document text with the section introduced by `marker` replaced by `body`.
    pub fn replace_section(&self, marker: &str, body: &str) -> Result<String, ContentsError> {
        replace_section(&self.source, marker, body)
    }

    /// Overwrite the document on disk with `contents`.
    ///
    /// The text is written to a temporary file next to the document and renamed over it, so
    /// readers see either the old or the new document. Concurrent runs are last-writer-wins.
    pub fn save(&self, contents: &str) -> Result<(), ContentsError> {
        let path = self.path.as_path();
        let write_error = |source: io::Error| ContentsError::Write {
            path: path.to_path_buf(),
            source,
        };

        let permissions = fs::metadata(path).map_err(write_error)?.permissions();
        if permissions.readonly() {
            return Err(ContentsError::ReadOnly(path.to_path_buf()));
        }

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(directory).map_err(write_error)?;
        file.write_all(contents.as_bytes()).map_err(write_error)?;
        file.as_file().sync_all().map_err(write_error)?;
        fs::set_permissions(file.path(), permissions).map_err(write_error)?;
        file.persist(path).map_err(|err| write_error(err.error))?;

        debug!(path = %path.display(), bytes = contents.len(), "saved document");

        Ok(())
    }
}

/// Byte range of a section, from the start of its heading line up to the next heading line or
/// the end of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan {
    pub range: Range<usize>,
    /// Offset of the first byte after the heading line.
    pub body_start: usize,
    /// The line ending used by the heading line, `"\n"` when it has none.
    pub line_ending: &'static str,
}

impl SectionSpan {
    /// The text between the heading line and the end of the section.
    pub fn body<'a>(&self, source: &'a str) -> &'a str {
        &source[self.body_start..self.range.end]
    }
}

/// Locate the first line equal to `marker` (ignoring trailing whitespace) and the following
/// heading line that ends its section. Fenced code blocks are skipped while looking for the
/// marker; once inside the section every heading line ends it.
pub fn find_section(source: &str, marker: &str) -> Option<SectionSpan> {
    let marker = marker.trim_end();
    let mut fence: Option<Fence> = None;
    let mut section: Option<SectionSpan> = None;

    for line in Lines::new(source) {
        if let Some(span) = section.as_mut() {
            if is_heading(line.text) {
                span.range.end = line.start;
                break;
            }
            continue;
        }

        if let Some(open) = fence {
            if open.closed_by(line.text) {
                fence = None;
            }
            continue;
        }

        if let Some(open) = Fence::open(line.text) {
            fence = Some(open);
            continue;
        }

        if line.text.trim_end() == marker {
            section = Some(SectionSpan {
                range: line.start..source.len(),
                body_start: line.start + line.raw_len,
                line_ending: line.ending(),
            });
        }
    }

    if let Some(ref span) = section {
        trace!(start = span.range.start, end = span.range.end, "found section");
    }

    section
}

/// Replace the section introduced by `marker` with the marker line, a blank line, and `body`.
/// All text outside the section is kept byte for byte.
pub fn replace_section(source: &str, marker: &str, body: &str) -> Result<String, ContentsError> {
    let Some(span) = find_section(source, marker) else {
        return Err(ContentsError::MarkerNotFound {
            marker: marker.to_owned(),
        });
    };

    let newline = span.line_ending;
    let body = if newline == "\n" {
        body.to_owned()
    } else {
        body.replace('\n', newline)
    };

    let section = format!("{}{newline}{newline}{body}", marker.trim_end());

    Ok([
        &source[..span.range.start],
        &section,
        &source[span.range.end..],
    ]
    .concat())
}

/// Whether a line ends a section: after leading whitespace it starts with `##`, or it is a
/// level-one heading (`#` followed by whitespace or nothing).
fn is_heading(line: &str) -> bool {
    let line = line.trim_start();

    match line.strip_prefix('#') {
        Some(rest) => {
            rest.is_empty() || rest.starts_with('#') || rest.starts_with(char::is_whitespace)
        }
        None => false,
    }
}

#[derive(Debug, Clone, Copy)]
struct Fence {
    token: u8,
    width: usize,
}

impl Fence {
    fn open(line: &str) -> Option<Fence> {
        let trimmed = line.trim_start_matches(' ');
        if line.len() - trimmed.len() > 3 {
            return None;
        }

        let token = *trimmed.as_bytes().first()?;
        if token != b'`' && token != b'~' {
            return None;
        }

        let width = trimmed.bytes().take_while(|byte| *byte == token).count();
        // Backtick fences may not carry backticks in their info string.
        if width < 3 || (token == b'`' && trimmed[width..].contains('`')) {
            return None;
        }

        Some(Fence { token, width })
    }

    fn closed_by(&self, line: &str) -> bool {
        let trimmed = line.trim_start_matches(' ');
        if line.len() - trimmed.len() > 3 {
            return false;
        }

        let width = trimmed.bytes().take_while(|byte| *byte == self.token).count();
        width >= self.width && trimmed[width..].trim().is_empty()
    }
}

struct Line<'a> {
    start: usize,
    raw_len: usize,
    text: &'a str,
}

impl Line<'_> {
    fn ending(&self) -> &'static str {
        if self.raw_len > self.text.len() + 1 {
            "\r\n"
        } else {
            "\n"
        }
    }
}

/// Iterates the lines of a text, keeping the byte offset of each line.
struct Lines<'a> {
    source: &'a str,
    offset: usize,
}

impl<'a> Lines<'a> {
    fn new(source: &'a str) -> Self {
        Self { source, offset: 0 }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.source.len() {
            return None;
        }

        let rest = &self.source[self.offset..];
        let raw_len = memchr::memchr(b'\n', rest.as_bytes()).map_or(rest.len(), |index| index + 1);
        let raw = &rest[..raw_len];
        let text = match raw.strip_suffix('\n') {
            Some(text) => text.strip_suffix('\r').unwrap_or(text),
            None => raw,
        };

        let line = Line {
            start: self.offset,
            raw_len,
            text,
        };
        self.offset += raw_len;

        Some(line)
    }
}

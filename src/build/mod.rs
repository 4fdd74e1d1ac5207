use anyhow::Context;
use std::{collections::HashSet, path::PathBuf};
use tracing::{debug, info};

use crate::{
    config::Config,
    error::Result,
    model::{
        contents::ContentsSection, document::Document, lesson::Lessons, link::render_links,
    },
};

// - List the lesson folders below the lessons root
// - Render them as a block of links
// - Read the README and splice the block into its contents section
// - Write the README back, unless nothing changed
//
// Any failure aborts the run before the README is touched.

pub struct ContentsBuilder {
    /// The project root that the configured paths are relative to.
    root: PathBuf,
    config: Config,
}

impl ContentsBuilder {
    /// Create a builder for the project at `root` using the default lessons folder, README and
    /// heading.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ContentsBuilder::load_with_config(root, Config::default())
    }

    pub fn load_with_config(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn lessons_path(&self) -> PathBuf {
        self.root.join(&self.config.lessons)
    }

    pub fn readme_path(&self) -> PathBuf {
        self.root.join(&self.config.readme)
    }

    pub fn build(&self) -> Result<ContentsReport> {
        let config = &self.config;
        let lessons_path = self.lessons_path();
        let readme_path = self.readme_path();

        let lessons = Lessons::load(&lessons_path)
            .with_context(|| format!("Failed to list lessons in {}", lessons_path.display()))?;
        let block = render_links(&config.link_prefix, &lessons.folders);

        let document = Document::load(&readme_path)
            .with_context(|| format!("Failed to read {}", readme_path.display()))?;
        let updated = document
            .replace_section(&config.heading, &block)
            .with_context(|| format!("Failed to match a section in {}", readme_path.display()))?;

        let previous = document
            .section(&config.heading)
            .map(|span| ContentsSection::parse(span.body(&document.source), &config.link_prefix))
            .unwrap_or_default();
        let (added, removed) = diff_folders(previous.folders(), &lessons.folders);

        let changed = updated != document.source;
        if changed {
            document
                .save(&updated)
                .with_context(|| format!("Failed to write {}", readme_path.display()))?;
            info!(
                path = %readme_path.display(),
                lessons = lessons.folders.len(),
                added = added.len(),
                removed = removed.len(),
                "updated contents section"
            );
        } else {
            debug!(path = %readme_path.display(), "contents section already up to date");
        }

        Ok(ContentsReport {
            readme: readme_path,
            lessons: lessons.folders,
            added,
            removed,
            changed,
        })
    }
}

/// The outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentsReport {
    /// The document that was updated.
    pub readme: PathBuf,
    /// Every lesson now listed, in rendered order.
    pub lessons: Vec<String>,
    /// Lessons listed now that the previous section did not link to.
    pub added: Vec<String>,
    /// Lessons the previous section linked to that are no longer listed.
    pub removed: Vec<String>,
    /// Whether the document text differs from what was on disk.
    pub changed: bool,
}

fn diff_folders<'a>(
    previous: impl Iterator<Item = &'a str>,
    current: &[String],
) -> (Vec<String>, Vec<String>) {
    let previous: Vec<&str> = previous.collect();
    let previous_set: HashSet<&str> = previous.iter().copied().collect();
    let current_set: HashSet<&str> = current.iter().map(String::as_str).collect();

    let added = current
        .iter()
        .filter(|name| !previous_set.contains(name.as_str()))
        .cloned()
        .collect();
    let removed = previous
        .into_iter()
        .filter(|name| !current_set.contains(name))
        .map(String::from)
        .collect();

    (added, removed)
}

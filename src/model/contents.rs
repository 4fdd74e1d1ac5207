use pulldown_cmark::{Event, Tag};
use tracing::{trace, warn};

use crate::cmark::{CMarkParser, EventIteratorExt as _};

/// A link found in an existing contents section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentsLink {
    /// The visible text of the link.
    pub label: String,
    /// The link destination exactly as written.
    pub target: String,
    /// The folder name the target points at, when it lives under the link prefix.
    pub folder: Option<String>,
}

/// The links already present in a contents section, used to report what a rewrite changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentsSection {
    pub links: Vec<ContentsLink>,
}

impl ContentsSection {
    /// Read every link in `body`. Targets starting with `prefix` are percent-decoded back into
    /// folder names.
    pub fn parse(body: &str, prefix: &str) -> ContentsSection {
        let mut parser = CMarkParser::new(body);
        let mut links = Vec::new();

        while let Some(event) = parser.next_event() {
            let Event::Start(Tag::Link(_, target, _)) = event else {
                continue;
            };

            let target = target.into_string();
            let position = parser.position();
            let label = parser
                .iter_until_and_consume(|event| matches!(event, Event::End(Tag::Link(..))))
                .plain_text();
            let folder = folder_name(&target, prefix);

            trace!(%position, %label, %target, "found contents link");

            links.push(ContentsLink {
                label,
                target,
                folder,
            });
        }

        ContentsSection { links }
    }

    /// Folder names referenced by the section, in order of appearance.
    pub fn folders(&self) -> impl Iterator<Item = &str> + '_ {
        self.links.iter().filter_map(|link| link.folder.as_deref())
    }
}

fn folder_name(target: &str, prefix: &str) -> Option<String> {
    let encoded = target.strip_prefix(prefix)?.trim_end_matches('/');

    match urlencoding::decode(encoded) {
        Ok(name) => Some(name.into_owned()),
        Err(err) => {
            warn!(%target, %err, "contents link does not decode to a UTF-8 folder name");
            None
        }
    }
}

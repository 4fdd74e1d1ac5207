use std::fmt::Display;

/// One line of the generated contents list: the raw folder name as the label and the
/// percent-encoded name, behind a fixed prefix, as the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry<'a> {
    pub label: &'a str,
    pub target: String,
}

impl<'a> LinkEntry<'a> {
    pub fn new(prefix: &str, name: &'a str) -> Self {
        Self {
            label: name,
            target: format!("{prefix}{}", urlencoding::encode(name)),
        }
    }
}

impl Display for LinkEntry<'_> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "- [{}]({})", self.label, self.target)
    }
}

/// Render every folder name as a bullet link, one per line. The block always ends with exactly
/// one newline, so an empty input renders as `"\n"`.
pub fn render_links<S: AsRef<str>>(prefix: &str, names: &[S]) -> String {
    let lines: Vec<String> = names
        .iter()
        .map(|name| LinkEntry::new(prefix, name.as_ref()).to_string())
        .collect();

    let mut block = lines.join("\n");
    block.push('\n');

    block
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn renders_one_line_per_folder() {
        let names = ["Intro", "Advanced Topics", "C++ Basics"];

        let block = render_links("lessions/", &names);

        assert_eq!(
            "- [Intro](lessions/Intro)\n\
             - [Advanced Topics](lessions/Advanced%20Topics)\n\
             - [C++ Basics](lessions/C%2B%2B%20Basics)\n",
            block
        );
    }

    #[test]
    fn empty_input_renders_single_newline() {
        let names: [&str; 0] = [];

        assert_eq!("\n", render_links("lessions/", &names));
    }

    #[test]
    fn escapes_unsafe_characters_only() {
        let entry = LinkEntry::new("lessions/", "a-b_c.d~e #?%é");

        assert_eq!("lessions/a-b_c.d~e%20%23%3F%25%C3%A9", entry.target);
        assert_eq!("a-b_c.d~e #?%é", entry.label);
    }

    #[test]
    fn escapes_reserved_punctuation() {
        let entry = LinkEntry::new("lessions/", "Lesson (1)!");

        assert_eq!("lessions/Lesson%20%281%29%21", entry.target);
    }
}

use crate::common::Project;
use lesson_contents::{build::ContentsBuilder, config::Config};
use std::{fs, path::PathBuf};

mod common;

#[test]
fn it_uses_fixed_paths_by_default() {
    let project = Project::new("## Contents\n");

    let builder = ContentsBuilder::new(project.root());

    assert_eq!(&Config::default(), builder.config());
    assert_eq!(project.root().join("lessions"), builder.lessons_path());
    assert_eq!(project.root().join("README.md"), builder.readme_path());
}

#[test]
fn it_ignores_config_files_in_the_project_root() {
    let project = Project::new("## Contents\n")
        .with_lessons(&["Intro"])
        .with_file("contents.toml", "[contents");

    ContentsBuilder::new(project.root())
        .build()
        .expect("failed to build contents");

    assert_eq!("## Contents\n\n- [Intro](lessions/Intro)\n", project.readme());
}

#[test]
fn it_builds_with_explicit_configuration() {
    let project = Project::new("# Book\n\n## Chapters\n\nold\n");
    fs::create_dir_all(project.root().join("chapters").join("One")).unwrap();

    let config = Config {
        lessons: PathBuf::from("chapters"),
        heading: String::from("## Chapters"),
        link_prefix: String::from("chapters/"),
        ..Config::default()
    };

    let report = ContentsBuilder::load_with_config(project.root(), config)
        .build()
        .expect("failed to build contents");

    assert_eq!(vec![String::from("One")], report.lessons);
    assert_eq!("# Book\n\n## Chapters\n\n- [One](chapters/One)\n", project.readme());
}

pub mod contents;
pub mod document;
pub mod lesson;
pub mod link;

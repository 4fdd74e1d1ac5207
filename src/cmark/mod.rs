//! Useful utilities for reading CommonMark text.

mod parser;

pub use parser::*;

use pulldown_cmark::Event;
use std::borrow::Borrow;

pub trait EventIteratorExt {
    /// Consume an event collection and return its plain text, dropping all markup.
    fn plain_text(self) -> String;
}

impl<'a, I, E> EventIteratorExt for I
where
    I: Iterator<Item = E>,
    E: Borrow<Event<'a>>,
{
    fn plain_text(self) -> String {
        let mut buffer = String::new();

        for event in self {
            let event: &Event<'a> = event.borrow();
            match event {
                Event::Text(text) | Event::Code(text) => buffer.push_str(text),
                Event::SoftBreak | Event::HardBreak => buffer.push(' '),
                _ => (),
            }
        }

        buffer
    }
}

//! Markdown parsing: block tokenization and inline span resolution.
//!
//! The dialect is the constrained Markdown produced by the generation
//! side: headings to level 5, pipe tables, fenced code, `>` quotes, flat
//! bullet/numbered lists, and the inline markers resolved by
//! [`InlineFormatter`].

mod inline;
mod parser;

pub use inline::InlineFormatter;
pub use parser::MarkdownParser;

//! This crate provides the syntax tree and the parser of the front end. This phase is responsible
//! for parsing the tokens pulled from the lexer into a syntax tree.
//!
//! The grammar, from the lowest to the highest precedence:
//!
//! ``` ebnf
//! Statement:
//!     Expression ';'
//!     ;
//!
//! Expression:
//!     Term ('+' Term)*
//!     ;
//!
//! Term:
//!     Factor ('*' Factor)*
//!     ;
//!
//! Factor:
//!     NumericToken
//!     | '(' Expression ')'
//!     ;
//! ```

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod error;
pub mod parser;
pub mod syntax_tree;

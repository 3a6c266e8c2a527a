//! This crate implements the lexical analysis phase of the front end. This phase is responsible
//! for scanning the source code into tokens.
//!
//! The lexer is pull based: the [`lexer::Lexer`] produces one [`token::Token`] per request and
//! never scans ahead of what was asked for.

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
pub mod lexer;
pub mod token;

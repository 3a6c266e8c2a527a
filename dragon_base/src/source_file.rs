//! Contains the code related to the source code input.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    fs::File,
    iter::Peekable,
    ops::Range,
    path::PathBuf,
    str::CharIndices,
    sync::Arc,
};

use getset::{CopyGetters, Getters};
use memmap::MmapOptions;
use ouroboros::self_referencing;
use thiserror::Error;

/// Represents an error that occurs when loading/creating a source file.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Utf8Error(#[from] std::str::Utf8Error),
}

/// Is an unsigned integer that represents a byte index in the source code.
pub type ByteIndex = usize;

/// Represents a source text fed to the lexer.
///
/// The text either comes from a memory mapped file or from a string handed over by the caller.
/// Either way, the content never changes once the source file is created.
#[derive(Getters)]
pub struct SourceFile {
    content: Content,

    /// Gets the path the source file was loaded from. In-memory sources use their display name
    /// here.
    #[get = "pub"]
    full_path: PathBuf,

    /// The byte range of every line, terminators included. Never empty.
    lines: Vec<Range<ByteIndex>>,
}

impl Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("full_path", &self.full_path)
            .field("line_number", &self.line_number())
            .finish_non_exhaustive()
    }
}

enum Content {
    Mapped(MappedFile),
    InMemory(String),
}

#[self_referencing]
struct MappedFile {
    file: File,
    mmap: Option<memmap::Mmap>,

    #[borrows(mmap)]
    text: &'this str,
}

impl MappedFile {
    fn open(file: File) -> Result<Self, Error> {
        // an empty file can't be mapped
        let mmap = match file.metadata()?.len() {
            0 => None,
            _ => Some(unsafe { MmapOptions::new().map(&file)? }),
        };

        MappedFileTryBuilder {
            file,
            mmap,
            text_builder: |mmap| match mmap {
                Some(mmap) => Ok(std::str::from_utf8(mmap)?),
                None => Ok(""),
            },
        }
        .try_build()
    }
}

impl Content {
    fn as_str(&self) -> &str {
        match self {
            Self::Mapped(mapped) => mapped.borrow_text(),
            Self::InMemory(string) => string.as_str(),
        }
    }
}

impl SourceFile {
    fn new(full_path: PathBuf, content: Content) -> Arc<Self> {
        let lines = line_ranges(content.as_str());

        Arc::new(Self {
            content,
            full_path,
            lines,
        })
    }

    /// Loads the source file from an opened file, mapping it into memory.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when mapping the file to memory.
    /// - [`Error::Utf8Error`]: The file isn't valid UTF-8.
    pub fn load(file: File, path: PathBuf) -> Result<Arc<Self>, Error> {
        Ok(Self::new(path, Content::Mapped(MappedFile::open(file)?)))
    }

    /// Creates a source file that lives entirely in memory.
    ///
    /// The `name` is only used when the source location is printed.
    #[must_use]
    pub fn in_memory(name: impl Into<PathBuf>, content: impl Into<String>) -> Arc<Self> {
        Self::new(name.into(), Content::InMemory(content.into()))
    }

    /// Writes the given displayable object to a temporary file and loads it.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when creating the temporary file, writing to, and
    ///   mapping it to memory.
    /// - [`Error::Utf8Error`]: The written text couldn't be read back as UTF-8.
    pub fn temp(display: impl Display) -> Result<Arc<Self>, Error> {
        use std::io::Write;

        let mut tempfile = tempfile::Builder::new()
            .prefix("dragon")
            .suffix(".dragon")
            .tempfile()?;

        write!(tempfile.as_file_mut(), "{display}")?;
        let path = tempfile.path().to_owned();

        Self::load(tempfile.into_file(), path)
    }

    /// Gets the content of the source file.
    #[must_use]
    pub fn content(&self) -> &str { self.content.as_str() }

    /// Gets the number of lines in the source file. An empty source still has one line.
    #[must_use]
    pub fn line_number(&self) -> usize { self.lines.len() }

    /// Gets the line of the source file at the given line number, terminator included.
    ///
    /// The line number starts at 1.
    #[must_use]
    pub fn get_line(&self, line: usize) -> Option<&str> {
        let range = self.lines.get(line.checked_sub(1)?)?;
        Some(&self.content()[range.clone()])
    }

    /// Gets the byte index where the given line starts.
    ///
    /// The line number starts at 1.
    #[must_use]
    pub fn line_start(&self, line: usize) -> Option<ByteIndex> {
        self.lines.get(line.checked_sub(1)?).map(|range| range.start)
    }

    /// Gets the [`Iterator`] over the whole source file.
    #[must_use]
    pub fn iter<'a>(self: &'a Arc<Self>) -> Iterator<'a> { self.iter_from(0) }

    /// Gets the [`Iterator`] for the source file, starting at the given byte index.
    ///
    /// The byte indices yielded by the iterator are still relative to the start of the source
    /// file. A `start` at or past the end of the content yields an exhausted iterator.
    ///
    /// # Panics
    /// If `start` doesn't lie on a character boundary.
    #[must_use]
    pub fn iter_from<'a>(self: &'a Arc<Self>, start: ByteIndex) -> Iterator<'a> {
        let start = start.min(self.content().len());

        Iterator {
            source_file: self,
            chars: self.content()[start..].char_indices().peekable(),
            offset: start,
        }
    }

    /// Gets the [`Location`] of the given byte index.
    ///
    /// The byte index equal to the length of the content is valid as well and points right after
    /// the last character, which is where the end of input is reported.
    #[must_use]
    pub fn get_location(&self, byte_index: ByteIndex) -> Option<Location> {
        let content = self.content();

        if byte_index > content.len() || !content.is_char_boundary(byte_index) {
            return None;
        }

        // the first line starts at 0, so at least one line qualifies
        let line = self
            .lines
            .partition_point(|range| range.start <= byte_index)
            .checked_sub(1)?;
        let column = content[self.lines[line].start..byte_index].chars().count() + 1;

        Some(Location {
            line: line + 1,
            column,
        })
    }
}

/// Is a struct pointing to a particular location in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    /// The line number of the location (starts at 1).
    pub line: usize,

    /// The column number of the location, counted in characters (starts at 1).
    pub column: usize,
}

/// Represents a range of characters in a source file.
///
/// Two spans are only equal if they point into the very same [`SourceFile`] instance.
#[derive(Clone, Getters, CopyGetters)]
pub struct Span {
    /// Gets the start byte index of the span.
    #[get_copy = "pub"]
    start: ByteIndex,

    /// Gets the end byte index of the span (exclusive).
    #[get_copy = "pub"]
    end: ByteIndex,

    /// Gets the source file that the span is located in.
    #[get = "pub"]
    source_file: Arc<SourceFile>,
}

impl Span {
    /// Creates a span from the given start and end byte indices in the source file.
    ///
    /// Returns [`None`] if the range is reversed, runs past the content, or splits a character.
    #[must_use]
    pub fn new(source_file: Arc<SourceFile>, start: ByteIndex, end: ByteIndex) -> Option<Self> {
        let content = source_file.content();

        let valid = start <= end
            && end <= content.len()
            && content.is_char_boundary(start)
            && content.is_char_boundary(end);

        valid.then(|| Self {
            start,
            end,
            source_file,
        })
    }

    /// Creates a span from the given start byte index to the end of the source file.
    ///
    /// Starting right at the end of the content yields an empty span.
    #[must_use]
    pub fn to_end(source_file: Arc<SourceFile>, start: ByteIndex) -> Option<Self> {
        let end = source_file.content().len();
        Self::new(source_file, start, end)
    }

    /// Gets the string slice of the source code that the span represents.
    #[must_use]
    pub fn str(&self) -> &str { &self.source_file.content()[self.start..self.end] }

    /// Returns `true` if the span doesn't cover any character.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.start == self.end }

    /// Gets the starting [`Location`] of the span.
    #[must_use]
    pub fn start_location(&self) -> Location { self.source_file.get_location(self.start).unwrap() }

    /// Gets the ending [`Location`] of the span.
    #[must_use]
    pub fn end_location(&self) -> Location { self.source_file.get_location(self.end).unwrap() }

    /// Creates a span from the start of this span to the end of the given span.
    ///
    /// Returns [`None`] if the spans are in different source files or `end` ends before this span
    /// starts.
    #[must_use]
    pub fn join(&self, end: &Self) -> Option<Self> {
        if !Arc::ptr_eq(&self.source_file, &end.source_file) {
            return None;
        }

        Self::new(self.source_file.clone(), self.start, end.end)
    }

    fn source_file_address(&self) -> usize { Arc::as_ptr(&self.source_file) as usize }
}

impl Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Span({}..{}, {:?})", self.start, self.end, self.str())
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool { self.cmp(other) == Ordering::Equal }
}

impl Eq for Span {}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for Span {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.source_file_address(), self.start, self.end).cmp(&(
            other.source_file_address(),
            other.start,
            other.end,
        ))
    }
}

impl std::hash::Hash for Span {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (self.source_file_address(), self.start, self.end).hash(state);
    }
}

/// Represents an element that is located within a source file.
pub trait SourceElement {
    /// Gets the span location of the element.
    fn span(&self) -> Span;
}

impl<T: SourceElement> SourceElement for Box<T> {
    fn span(&self) -> Span { self.as_ref().span() }
}

/// Is a peekable iterator over the characters of a source file, paired with their byte indices.
#[derive(Debug, Clone, CopyGetters)]
pub struct Iterator<'a> {
    /// Gets the source file that the iterator is iterating over.
    #[get_copy = "pub"]
    source_file: &'a Arc<SourceFile>,
    chars: Peekable<CharIndices<'a>>,
    offset: ByteIndex,
}

impl<'a> Iterator<'a> {
    /// Peeks at the next character in the source file.
    pub fn peek(&mut self) -> Option<(ByteIndex, char)> {
        let offset = self.offset;
        self.chars
            .peek()
            .map(|&(index, character)| (index + offset, character))
    }

    /// Gets the byte index of the next character, or the length of the content if the iterator
    /// is exhausted.
    pub fn position(&mut self) -> ByteIndex {
        self.peek()
            .map_or_else(|| self.source_file.content().len(), |(index, _)| index)
    }
}

impl<'a> std::iter::Iterator for Iterator<'a> {
    type Item = (ByteIndex, char);

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.offset;
        self.chars
            .next()
            .map(|(index, character)| (index + offset, character))
    }
}

/// Splits the text into line ranges. `\n`, `\r\n` and a lone `\r` all end a line. The last
/// range runs to the end of the text and may be empty.
fn line_ranges(text: &str) -> Vec<Range<ByteIndex>> {
    let bytes = text.as_bytes();
    let mut ranges = Vec::new();
    let mut start = 0;
    let mut index = 0;

    // both terminators are ascii, so they never show up inside a multibyte character
    while index < bytes.len() {
        let terminator_len = match (bytes[index], bytes.get(index + 1)) {
            (b'\r', Some(b'\n')) => 2,
            (b'\r' | b'\n', _) => 1,
            _ => 0,
        };

        if terminator_len == 0 {
            index += 1;
        } else {
            index += terminator_len;
            ranges.push(start..index);
            start = index;
        }
    }

    ranges.push(start..text.len());
    ranges
}

#[cfg(test)]
mod tests;

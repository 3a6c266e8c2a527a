use super::{Location, SourceFile, Span};

#[test]
fn test_line_ranges() {
    let text = "Hello\nworld\r\n!\rtes";
    assert_eq!(super::line_ranges(text), vec![0..6, 6..13, 13..15, 15..18]);

    assert_eq!(super::line_ranges(""), vec![0..0]);
    assert_eq!(super::line_ranges("é\n"), vec![0..3, 3..3]);
}

#[test]
fn test_mapped_file() {
    const TEST_FILE: &str = "1 + 2 * (4 + 3);";
    let source_file = SourceFile::temp(TEST_FILE).unwrap();
    assert_eq!(source_file.content(), TEST_FILE);
}

#[test]
fn test_empty_mapped_file() {
    let source_file = SourceFile::temp("").unwrap();
    assert_eq!(source_file.content(), "");
    assert_eq!(source_file.line_number(), 1);
}

#[test]
fn test_in_memory_source() {
    let source_file = SourceFile::in_memory("<input>", "1+2;\n(3)");

    assert_eq!(source_file.content(), "1+2;\n(3)");
    assert_eq!(source_file.full_path().to_str(), Some("<input>"));
    assert_eq!(source_file.get_line(1), Some("1+2;\n"));
    assert_eq!(source_file.get_line(2), Some("(3)"));
    assert_eq!(source_file.get_line(3), None);
}

#[test]
fn test_get_location() {
    let source_file = SourceFile::in_memory("<input>", "12\n+ 3");

    assert_eq!(
        source_file.get_location(0),
        Some(Location { line: 1, column: 1 })
    );
    assert_eq!(
        source_file.get_location(3),
        Some(Location { line: 2, column: 1 })
    );
    assert_eq!(
        source_file.get_location(5),
        Some(Location { line: 2, column: 3 })
    );

    // end of input sits right after the last character
    assert_eq!(
        source_file.get_location(6),
        Some(Location { line: 2, column: 4 })
    );
    assert_eq!(source_file.get_location(7), None);
}

#[test]
fn test_get_location_of_empty_source() {
    let source_file = SourceFile::in_memory("<input>", "");
    assert_eq!(
        source_file.get_location(0),
        Some(Location { line: 1, column: 1 })
    );
}

#[test]
fn test_iter_from_reports_absolute_indices() {
    let source_file = SourceFile::in_memory("<input>", "1+(2)");
    let mut iter = source_file.iter_from(2);

    assert_eq!(iter.position(), 2);
    assert_eq!(iter.peek(), Some((2, '(')));
    assert_eq!(iter.collect::<Vec<_>>(), vec![(2, '('), (3, '2'), (4, ')')]);

    let mut exhausted = source_file.iter_from(5);
    assert_eq!(exhausted.next(), None);
    assert_eq!(exhausted.position(), 5);
}

#[test]
fn test_span() {
    let source_file = SourceFile::in_memory("<input>", "10 * 20");

    let left = Span::new(source_file.clone(), 0, 2).unwrap();
    let right = Span::new(source_file.clone(), 5, 7).unwrap();

    assert_eq!(left.str(), "10");
    assert_eq!(right.str(), "20");
    assert_eq!(left.join(&right).unwrap().str(), "10 * 20");
    assert!(right.join(&left).is_none());

    let end = Span::to_end(source_file.clone(), 7).unwrap();
    assert!(end.is_empty());
    assert_eq!(end.start_location(), Location { line: 1, column: 8 });

    assert!(Span::new(source_file, 3, 8).is_none());
}

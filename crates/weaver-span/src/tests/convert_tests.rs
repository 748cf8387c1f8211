//! Tests for [`SpanConverter`].

use rstest::rstest;

use crate::tests::support::{MAIN_GO, converter, file_with, main_file};
use crate::{
    AddressableFile, ConverterConfig, Endpoint, EofPolicy, ErrorKind, FileSet, LineDirective,
    PointSpec, Range, Span, SpanConverter, SpanError, TokenFile, TokenPos,
};

#[rstest]
#[case::first_byte(0, (1, 1))]
#[case::last_byte_of_first_line(12, (1, 13))]
#[case::second_line(13, (2, 1))]
#[case::trailing_newline(27, (2, 15))]
#[case::end_of_file(28, (3, 1))]
fn offset_to_line_column_counts_bytes(
    main_file: TokenFile,
    converter: SpanConverter,
    #[case] offset: usize,
    #[case] expected: (usize, usize),
) {
    assert_eq!(
        converter.offset_to_line_column(&main_file, offset),
        Ok(expected)
    );
}

#[rstest]
fn offset_past_end_of_file_is_out_of_range(main_file: TokenFile, converter: SpanConverter) {
    match converter.offset_to_line_column(&main_file, 29) {
        Err(SpanError::OutOfRange { message }) => {
            assert!(message.contains("beyond EOF (28)"), "message: {message}");
        }
        other => panic!("expected out of range, got {other:?}"),
    }
}

#[rstest]
#[case::origin(1, 1, 0)]
#[case::second_line(2, 1, 13)]
#[case::last_byte(2, 15, 27)]
#[case::column_at_end_of_file(2, 16, 28)]
#[case::sentinel_line(3, 1, 28)]
#[case::column_spills_into_next_line(1, 14, 13)]
fn line_column_to_offset_accepts_in_range_coordinates(
    main_file: TokenFile,
    converter: SpanConverter,
    #[case] line: usize,
    #[case] column: usize,
    #[case] expected: usize,
) {
    assert_eq!(
        converter.line_column_to_offset(&main_file, line, column),
        Ok(expected)
    );
}

#[rstest]
#[case::line_zero(0, 1, SpanError::InvalidLine { line: 0 })]
#[case::column_zero(1, 0, SpanError::InvalidColumn { column: 0 })]
fn line_column_to_offset_rejects_zero_coordinates(
    main_file: TokenFile,
    converter: SpanConverter,
    #[case] line: usize,
    #[case] column: usize,
    #[case] expected: SpanError,
) {
    assert_eq!(
        converter.line_column_to_offset(&main_file, line, column),
        Err(expected)
    );
}

#[rstest]
#[case::far_past_last_line(100, 1)]
#[case::line_after_sentinel(4, 1)]
#[case::sentinel_line_second_column(3, 2)]
#[case::column_past_end_of_file(2, 17)]
#[case::huge_column(1, usize::MAX)]
fn line_column_to_offset_rejects_coordinates_past_the_end(
    main_file: TokenFile,
    converter: SpanConverter,
    #[case] line: usize,
    #[case] column: usize,
) {
    let result = converter.line_column_to_offset(&main_file, line, column);
    assert!(
        matches!(result, Err(SpanError::OutOfRange { .. })),
        "({line}, {column}) gave {result:?}"
    );
}

#[rstest]
#[case::main_go(MAIN_GO)]
#[case::empty("")]
#[case::no_trailing_newline("abc")]
#[case::blank_lines("a\n\n\nb")]
#[case::only_newlines("\n\n")]
#[case::multibyte("héllo\nwörld ✓\n")]
fn offsets_round_trip_through_line_columns(
    #[case] content: &str,
    #[values(EofPolicy::SentinelLine, EofPolicy::LastLine)] policy: EofPolicy,
) {
    let file = file_with("round_trip.go", content);
    let converter = SpanConverter::new(ConverterConfig::new(policy));
    for offset in 0..=file.size() {
        let (line, column) = converter
            .offset_to_line_column(&file, offset)
            .unwrap_or_else(|error| panic!("offset {offset}: {error}"));
        assert_eq!(
            converter.line_column_to_offset(&file, line, column),
            Ok(offset),
            "offset {offset} rendered as {line}:{column} under {policy}"
        );
    }
}

#[rstest]
fn end_of_file_uses_the_sentinel_line(main_file: TokenFile, converter: SpanConverter) {
    let last_line = main_file.line_count();
    assert_eq!(
        converter.offset_to_line_column(&main_file, main_file.size()),
        Ok((last_line + 1, 1))
    );
    assert_eq!(
        converter.line_column_to_offset(&main_file, last_line + 1, 1),
        Ok(main_file.size())
    );
}

#[rstest]
fn last_line_policy_reports_the_real_last_line(main_file: TokenFile) {
    let converter = SpanConverter::new(ConverterConfig::new(EofPolicy::LastLine));
    assert_eq!(converter.offset_to_line_column(&main_file, 28), Ok((2, 16)));
}

#[rstest]
fn sentinel_line_of_an_empty_file_is_line_two(converter: SpanConverter) {
    let file = file_with("empty.go", "");
    assert_eq!(converter.offset_to_line_column(&file, 0), Ok((2, 1)));
    assert_eq!(converter.line_column_to_offset(&file, 1, 1), Ok(0));
    assert_eq!(converter.line_column_to_offset(&file, 2, 1), Ok(0));
}

#[rstest]
fn columns_count_utf8_bytes(converter: SpanConverter) {
    let file = file_with("unicode.go", "é = 1\nx");
    // `é` is two bytes, so `=` sits in byte column 4.
    assert_eq!(converter.offset_to_line_column(&file, 3), Ok((1, 4)));
    assert_eq!(converter.offset_to_line_column(&file, 7), Ok((2, 1)));
}

#[rstest]
fn token_positions_round_trip_through_offsets(main_file: TokenFile, converter: SpanConverter) {
    for offset in 0..=main_file.size() {
        let pos = main_file.pos(offset);
        assert_eq!(converter.offset(&main_file, pos), Ok(offset));
    }
}

#[rstest]
#[case::before_base(TokenPos::NONE)]
#[case::past_end(TokenPos::new(30))]
fn offset_rejects_positions_outside_the_file(
    main_file: TokenFile,
    converter: SpanConverter,
    #[case] pos: TokenPos,
) {
    assert_eq!(
        converter.offset(&main_file, pos),
        Err(SpanError::invalid_position(pos, 1, 29))
    );
}

#[rstest]
fn file_span_resolves_every_field(main_file: TokenFile, converter: SpanConverter) {
    let span = converter
        .file_span(&main_file, main_file.pos(18), main_file.pos(22))
        .unwrap_or_else(|error| panic!("span: {error}"));

    assert_eq!(span.uri().as_str(), "main.go");
    assert_eq!(
        (span.start().line(), span.start().column(), span.start().offset()),
        (2, 6, 18)
    );
    assert_eq!(
        (span.end().line(), span.end().column(), span.end().offset()),
        (2, 10, 22)
    );
}

#[rstest]
fn file_span_with_invalid_end_is_a_point(main_file: TokenFile, converter: SpanConverter) {
    let span = converter
        .file_span(&main_file, main_file.pos(5), TokenPos::NONE)
        .unwrap_or_else(|error| panic!("span: {error}"));
    assert!(span.is_point());
    assert_eq!(span.start().offset(), 5);
}

#[rstest]
fn file_span_rejects_invalid_start(main_file: TokenFile, converter: SpanConverter) {
    let result = converter.file_span(&main_file, TokenPos::NONE, main_file.pos(3));
    assert!(matches!(result, Err(SpanError::InvalidPosition { .. })));
}

#[rstest]
fn file_span_rejects_an_end_before_the_start(main_file: TokenFile, converter: SpanConverter) {
    let result = converter.file_span(&main_file, main_file.pos(10), main_file.pos(4));
    assert_eq!(result, Err(SpanError::InvertedSpan { start: 10, end: 4 }));
}

#[rstest]
fn file_span_rejects_ends_in_different_files(converter: SpanConverter) {
    let file = file_with("main.go", MAIN_GO)
        .with_line_directive(LineDirective::new(13, "generated.go", 40))
        .unwrap_or_else(|error| panic!("directive: {error}"));

    let result = converter.file_span(&file, file.pos(0), file.pos(20));
    assert_eq!(
        result,
        Err(SpanError::cross_file("main.go", "generated.go"))
    );
}

#[rstest]
fn file_span_inside_a_directive_uses_the_remapped_file(converter: SpanConverter) {
    let file = file_with("main.go", MAIN_GO)
        .with_line_directive(LineDirective::new(13, "generated.go", 40))
        .unwrap_or_else(|error| panic!("directive: {error}"));

    let span = converter
        .file_span(&file, file.pos(18), file.pos(22))
        .unwrap_or_else(|error| panic!("span: {error}"));
    assert_eq!(span.to_string(), "generated.go:40:6-40:10");
}

#[rstest]
fn file_span_rejects_positions_from_another_file(converter: SpanConverter) {
    let mut files = FileSet::new();
    let first = files
        .add_file("a.go", "package a\n")
        .unwrap_or_else(|error| panic!("a.go: {error}"));
    let second = files
        .add_file("b.go", "package b\n")
        .unwrap_or_else(|error| panic!("b.go: {error}"));

    let result = converter.file_span(first.as_ref(), second.pos(0), TokenPos::NONE);
    assert!(matches!(result, Err(SpanError::InvalidPosition { .. })));
}

#[rstest]
fn span_round_trips_through_range(main_file: TokenFile, converter: SpanConverter) {
    let range = Range::new(&main_file, main_file.pos(8), main_file.pos(12));
    let span = converter
        .range_span(&range)
        .unwrap_or_else(|error| panic!("span: {error}"));
    let back = converter
        .span_range(&span, &main_file)
        .unwrap_or_else(|error| panic!("range: {error}"));

    assert_eq!(back.start(), range.start());
    assert_eq!(back.end(), range.end());
}

#[rstest]
#[case::start_and_end_past_end(18, 22, Endpoint::Start, 18)]
#[case::only_end_past_end(5, 28, Endpoint::End, 28)]
fn span_range_reports_stale_spans(
    main_file: TokenFile,
    converter: SpanConverter,
    #[case] start: usize,
    #[case] end: usize,
    #[case] endpoint: Endpoint,
    #[case] offset: usize,
) {
    let span = converter
        .resolve_span(
            &main_file,
            PointSpec::offset(start),
            Some(PointSpec::offset(end)),
        )
        .unwrap_or_else(|error| panic!("span: {error}"));
    let shorter = file_with("main.go", "package m\n");

    let error = match converter.span_range(&span, &shorter) {
        Err(error) => error,
        Ok(range) => panic!("expected bounds error, got {range:?}"),
    };
    assert_eq!(error, SpanError::bounds(endpoint, offset, 10, "main.go"));
    assert_eq!(error.kind(), ErrorKind::Stale);
}

#[rstest]
fn span_range_accepts_a_span_ending_at_end_of_file(main_file: TokenFile, converter: SpanConverter) {
    let span = converter
        .resolve_span(&main_file, PointSpec::line_column(2, 1), Some(PointSpec::line_column(3, 1)))
        .unwrap_or_else(|error| panic!("span: {error}"));
    let range = converter
        .span_range(&span, &main_file)
        .unwrap_or_else(|error| panic!("range: {error}"));
    assert_eq!(range.end(), main_file.end());
}

fn wire_span(json: &str) -> Span {
    serde_json::from_str(json).unwrap_or_else(|error| panic!("span {json}: {error}"))
}

#[rstest]
#[case::start_names_another_byte(
    r#"{"fileURI":"main.go","start":{"line":1,"column":1,"offset":20}}"#,
    Endpoint::Start,
    (1, 1, 20)
)]
#[case::end_names_another_byte(
    r#"{"fileURI":"main.go","start":{"line":1,"column":1,"offset":0},"end":{"line":1,"column":3,"offset":13}}"#,
    Endpoint::End,
    (1, 3, 13)
)]
fn span_range_rejects_points_whose_coordinates_disagree(
    main_file: TokenFile,
    converter: SpanConverter,
    #[case] json: &str,
    #[case] endpoint: Endpoint,
    #[case] claimed: (usize, usize, usize),
) {
    let (line, column, offset) = claimed;
    let error = match converter.span_range(&wire_span(json), &main_file) {
        Err(error) => error,
        Ok(range) => panic!("expected a mismatch, got {range:?}"),
    };
    assert_eq!(
        error,
        SpanError::PointMismatch {
            endpoint,
            line,
            column,
            offset,
            file: String::from("main.go"),
        }
    );
    assert_eq!(error.kind(), ErrorKind::Input);
}

#[rstest]
#[case::sentinel_line(r#"{"line":3,"column":1,"offset":28}"#)]
#[case::last_line(r#"{"line":2,"column":16,"offset":28}"#)]
fn span_range_accepts_either_end_of_file_rendering(
    main_file: TokenFile,
    converter: SpanConverter,
    #[case] end: &str,
) {
    let json = format!(r#"{{"fileURI":"main.go","start":{{"line":2,"column":1,"offset":13}},"end":{end}}}"#);
    let range = converter
        .span_range(&wire_span(&json), &main_file)
        .unwrap_or_else(|error| panic!("range: {error}"));
    assert_eq!(range.end(), main_file.end());
}

#[rstest]
fn span_range_accepts_remapped_spans(converter: SpanConverter) {
    let file = file_with("main.go", MAIN_GO)
        .with_line_directive(LineDirective::new(13, "generated.go", 40))
        .unwrap_or_else(|error| panic!("directive: {error}"));
    let span = converter
        .file_span(&file, file.pos(18), file.pos(22))
        .unwrap_or_else(|error| panic!("span: {error}"));

    let range = converter
        .span_range(&span, &file)
        .unwrap_or_else(|error| panic!("range: {error}"));
    assert_eq!((range.start(), range.end()), (file.pos(18), file.pos(22)));
}

#[rstest]
fn resolve_point_normalises_spilled_columns(main_file: TokenFile, converter: SpanConverter) {
    let point = converter
        .resolve_point(&main_file, PointSpec::line_column(1, 14))
        .unwrap_or_else(|error| panic!("point: {error}"));
    assert_eq!((point.line(), point.column(), point.offset()), (2, 1, 13));
}

#[rstest]
fn resolve_span_defaults_the_end_to_the_start(main_file: TokenFile, converter: SpanConverter) {
    let span = converter
        .resolve_span(&main_file, PointSpec::line_column(2, 6), None)
        .unwrap_or_else(|error| panic!("span: {error}"));
    assert!(span.is_point());
    assert_eq!(span.end().offset(), 18);
}

#[rstest]
fn resolve_span_rejects_inverted_coordinates(main_file: TokenFile, converter: SpanConverter) {
    let result = converter.resolve_span(
        &main_file,
        PointSpec::line_column(2, 1),
        Some(PointSpec::line_column(1, 1)),
    );
    assert_eq!(result, Err(SpanError::InvertedSpan { start: 13, end: 0 }));
}

#[rstest]
#[case::invalid_line(SpanError::InvalidLine { line: 0 }, ErrorKind::Input)]
#[case::out_of_range(SpanError::out_of_range("past the end"), ErrorKind::Input)]
#[case::cross_file(SpanError::cross_file("a.go", "b.go"), ErrorKind::Input)]
#[case::bounds(SpanError::bounds(Endpoint::End, 30, 10, "a.go"), ErrorKind::Stale)]
#[case::defect(SpanError::collaborator_defect("lies"), ErrorKind::Collaborator)]
fn errors_are_classified(#[case] error: SpanError, #[case] expected: ErrorKind) {
    assert_eq!(error.kind(), expected);
}

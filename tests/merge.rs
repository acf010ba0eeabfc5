use std::io::Cursor;

use sheet_merge::ToolError;
use sheet_merge::header::locate_header_row;
use sheet_merge::io::{InputFile, SourceFormat};
use sheet_merge::merge::{self, concat, normalize_column_name, read_file_auto_header};
use sheet_merge::model::{CellValue, RawTable, Table};

fn csv_file(name: &str, content: &str) -> InputFile<Cursor<Vec<u8>>> {
    InputFile::from_bytes(name, content.as_bytes().to_vec())
}

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

fn raw(rows: &[&[&str]]) -> RawTable {
    RawTable::new(
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect(),
    )
}

#[test]
fn header_follows_leading_blank_rows() {
    for blank_rows in 0..4 {
        let mut rows: Vec<Vec<String>> = (0..blank_rows)
            .map(|_| vec![String::new(), "   ".to_string(), "\t".to_string()])
            .collect();
        rows.push(vec!["Name".to_string(), "Age".to_string()]);
        rows.push(vec!["Bob".to_string(), "30".to_string()]);

        let index = locate_header_row(&RawTable::new(rows)).expect("header located");
        assert_eq!(index, blank_rows);
    }
}

#[test]
fn single_non_blank_cell_is_enough_for_a_header() {
    let table = raw(&[&["", " "], &["", "Title", ""], &["a", "b", "c"]]);
    assert_eq!(locate_header_row(&table).expect("header located"), 1);
}

#[test]
fn all_blank_rows_fail_with_empty_file() {
    let table = raw(&[&["", "  "], &["\t"], &[]]);
    let error = locate_header_row(&table).expect_err("blank table rejected");
    assert!(matches!(error, ToolError::EmptyFile));

    let error = locate_header_row(&RawTable::default()).expect_err("no rows rejected");
    assert!(matches!(error, ToolError::EmptyFile));
}

#[test]
fn normalization_is_idempotent() {
    for name in ["  Name ", "AGE", "First Name", "unnamed: 0", "Ünïcode  "] {
        let once = normalize_column_name(name);
        assert_eq!(normalize_column_name(&once), once);
    }
    assert_eq!(normalize_column_name("  First Name\t"), "first name");
}

#[test]
fn format_is_detected_from_extension() {
    assert_eq!(SourceFormat::from_name("a.csv").unwrap(), SourceFormat::Csv);
    assert_eq!(SourceFormat::from_name("B.XLSX").unwrap(), SourceFormat::Xlsx);
    assert_eq!(SourceFormat::from_name("c.Xls").unwrap(), SourceFormat::Xls);

    let error = SourceFormat::from_name("notes.txt").expect_err("txt rejected");
    assert!(matches!(error, ToolError::UnsupportedFormat(name) if name == "notes.txt"));
    assert!(SourceFormat::from_name("no_extension").is_err());
}

#[test]
fn blank_rows_before_header_are_skipped() {
    let mut file = csv_file("a.csv", ",\n , \nName,Age\nBob,30\n");
    let table = read_file_auto_header(&mut file).expect("file read");

    assert_eq!(table.columns, vec!["name", "age"]);
    assert_eq!(table.rows, vec![vec![text("Bob"), text("30")]]);
}

#[test]
fn fully_empty_data_rows_are_dropped() {
    let mut file = csv_file("a.csv", "Name,Age\nBob,30\n,\nAmy,\n , \n");
    let table = read_file_auto_header(&mut file).expect("file read");

    assert_eq!(
        table.rows,
        vec![
            vec![text("Bob"), text("30")],
            vec![text("Amy"), CellValue::Empty],
            vec![text(" "), text(" ")],
        ]
    );
}

#[test]
fn blank_and_duplicate_headers_are_named_uniquely() {
    let mut file = csv_file("a.csv", ",Title,\nName, name ,x,extra\n");
    let table = read_file_auto_header(&mut file).expect("file read");
    assert_eq!(
        table.columns,
        vec!["unnamed: 0", "title", "unnamed: 2", "unnamed: 3"]
    );

    let mut file = csv_file("b.csv", "Name, name ,NAME\n1,2,3\n");
    let table = read_file_auto_header(&mut file).expect("file read");
    assert_eq!(table.columns, vec!["name", "name.1", "name.2"]);
    assert_eq!(table.cell(0, "name.1"), Some(&text("2")));
}

#[test]
fn short_rows_are_padded_to_table_width() {
    let mut file = csv_file("a.csv", "a,b,c\n1\n1,2\n");
    let table = read_file_auto_header(&mut file).expect("file read");

    assert_eq!(table.rows[0], vec![text("1"), CellValue::Empty, CellValue::Empty]);
    assert_eq!(table.rows[1], vec![text("1"), text("2"), CellValue::Empty]);
}

#[test]
fn reading_twice_rewinds_the_stream() {
    let mut file = csv_file("a.csv", "\n,\nName\nBob\n");
    let first = read_file_auto_header(&mut file).expect("first read");
    let second = read_file_auto_header(&mut file).expect("second read");
    assert_eq!(first, second);
}

#[test]
fn header_only_file_yields_no_rows() {
    let mut file = csv_file("a.csv", "Name,Age\n");
    let table = read_file_auto_header(&mut file).expect("file read");
    assert_eq!(table.columns, vec!["name", "age"]);
    assert_eq!(table.row_count(), 0);
}

#[test]
fn concat_takes_union_of_columns_in_first_seen_order() {
    let left = Table {
        columns: vec!["id".into(), "name".into()],
        rows: vec![vec![text("1"), text("Ann")]],
    };
    let right = Table {
        columns: vec!["city".into(), "id".into()],
        rows: vec![vec![text("Oslo"), text("2")], vec![text("Rome"), text("3")]],
    };

    let merged = concat(vec![left, right]);

    assert_eq!(merged.columns, vec!["id", "name", "city"]);
    assert_eq!(
        merged.rows,
        vec![
            vec![text("1"), text("Ann"), CellValue::Empty],
            vec![text("2"), CellValue::Empty, text("Oslo")],
            vec![text("3"), CellValue::Empty, text("Rome")],
        ]
    );
}

#[test]
fn disjoint_columns_are_filled_with_empty_cells() {
    let left = Table {
        columns: vec!["a".into(), "b".into()],
        rows: vec![vec![text("1"), text("2")], vec![text("3"), text("4")]],
    };
    let right = Table {
        columns: vec!["c".into()],
        rows: vec![vec![text("5")]],
    };

    let merged = concat(vec![left, right]);

    assert_eq!(merged.columns, vec!["a", "b", "c"]);
    assert_eq!(
        merged.rows,
        vec![
            vec![text("1"), text("2"), CellValue::Empty],
            vec![text("3"), text("4"), CellValue::Empty],
            vec![CellValue::Empty, CellValue::Empty, text("5")],
        ]
    );
}

#[test]
fn merged_row_count_is_sum_of_cleaned_rows() {
    let mut files = vec![
        csv_file("a.csv", "x\n1\n\n2\n"),
        csv_file("b.csv", ",\nx,y\n3,4\n,\n5,\n"),
        csv_file("c.csv", "y,z\n,\n"),
    ];

    let outcome = merge::merge_files(&mut files);
    let table = outcome.require_table().expect("table merged");

    let expected: usize = outcome.files.iter().map(|summary| summary.rows).sum();
    assert_eq!(expected, 4);
    assert_eq!(table.row_count(), expected);
    assert_eq!(table.columns, vec!["x", "y", "z"]);
    assert_eq!(table.cell(3, "x"), Some(&text("5")));
    assert_eq!(table.cell(3, "y"), Some(&CellValue::Empty));
}

#[test]
fn corrupt_file_does_not_abort_the_batch() {
    let mut files = vec![
        csv_file("first.csv", "Name,Age\nBob,30\n"),
        InputFile::from_bytes("broken.xlsx", b"definitely not a zip archive".to_vec()),
        csv_file("third.csv", "\nname,City\nAmy,Paris\n"),
    ];

    let mut progress = Vec::new();
    let outcome = merge::merge_files_with_progress(&mut files, |step| {
        progress.push((step.completed, step.total, step.file.to_string(), step.succeeded));
    });

    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].file, "broken.xlsx");
    assert!(!outcome.errors[0].message.is_empty());

    let table = outcome.require_table().expect("table merged");
    assert_eq!(table.columns, vec!["name", "age", "city"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.cell(1, "name"), Some(&text("Amy")));

    assert_eq!(
        progress,
        vec![
            (1, 3, "first.csv".to_string(), true),
            (2, 3, "broken.xlsx".to_string(), false),
            (3, 3, "third.csv".to_string(), true),
        ]
    );
}

#[test]
fn unsupported_extension_is_a_file_error() {
    let mut files = vec![
        csv_file("notes.txt", "Name\nBob\n"),
        csv_file("ok.csv", "Name\nBob\n"),
    ];
    let outcome = merge::merge_files(&mut files);

    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].file, "notes.txt");
    assert_eq!(outcome.errors[0].message, "unsupported file format: notes.txt");
    assert_eq!(outcome.files.len(), 1);
}

#[test]
fn all_empty_files_report_no_valid_data() {
    let mut files = vec![
        csv_file("a.csv", ""),
        csv_file("b.csv", ",,\n  , ,\n"),
    ];
    let outcome = merge::merge_files(&mut files);

    assert!(outcome.table.is_none());
    assert_eq!(outcome.errors.len(), 2);
    assert!(
        outcome
            .errors
            .iter()
            .all(|error| error.message == "file appears to be completely empty")
    );
    assert!(matches!(
        outcome.require_table(),
        Err(ToolError::NoValidData)
    ));
}

#[test]
fn empty_batch_reports_no_valid_data() {
    let mut files: Vec<InputFile<Cursor<Vec<u8>>>> = Vec::new();
    let outcome = merge::merge_files(&mut files);
    assert!(outcome.errors.is_empty());
    assert!(matches!(
        outcome.require_table(),
        Err(ToolError::NoValidData)
    ));
}

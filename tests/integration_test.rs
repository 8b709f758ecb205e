//! Integration tests for csvbind

use chrono::TimeZone;
use chrono_tz::Europe::Stockholm;
use csvbind::{bindable, BigDecimal, BindError, Binder, Options, Strategy, Timestamp};
use std::io::Write;
use tempfile::NamedTempFile;

#[derive(Debug, Default, PartialEq)]
struct Destination {
    name: String,
    date: Option<Timestamp>,
    counter: i64,
    rating: Option<BigDecimal>,
}

bindable! {
    Destination {
        "Name" => name: Text,
        "Date" => date: Timestamp,
        "Counter" => counter: Int64,
        "Rating" => rating: Decimal,
    }
}

fn encode(rows: &[&[&str]]) -> Vec<u8> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
    for row in rows {
        writer.write_record(*row).unwrap();
    }
    writer.into_inner().unwrap()
}

fn strategy() -> Strategy {
    Strategy::from([("n", "Name"), ("d", "Date"), ("c", "Counter")])
}

/// Bind the first data row of `rows` and stop
fn bind_first(rows: &[&[&str]], strategy: &Strategy, opts: Options) -> Destination {
    let input = encode(rows);
    let mut binder = Binder::new(input.as_slice(), opts).unwrap();

    let mut dest = Destination::default();
    binder
        .for_each(|row| {
            row.bind(&mut dest, strategy)?;
            Ok::<_, BindError>(false)
        })
        .unwrap();
    dest
}

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Timestamp {
    chrono_tz::UTC.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

#[test]
fn test_variable_length_fields() {
    let dest = bind_first(
        &[&["n", "d", "c", "x"], &["foo", "2014-04-06 10:02:21", "9834"]],
        &strategy(),
        Options::new().null_marker("NULL"),
    );

    assert_eq!(
        dest,
        Destination {
            name: "foo".to_string(),
            date: Some(utc(2014, 4, 6, 10, 2, 21)),
            counter: 9834,
            rating: None,
        }
    );
}

#[test]
fn test_custom_header() {
    let opts = Options::new().header([(0, "n"), (1, "d"), (2, "c")]);
    let dest = bind_first(&[&["foo", "2014-04-06 10:02:21", "4459813"]], &strategy(), opts);

    assert_eq!(dest.name, "foo");
    assert_eq!(dest.date, Some(utc(2014, 4, 6, 10, 2, 21)));
    assert_eq!(dest.counter, 4459813);
}

#[test]
fn test_timezone_handling() {
    let dest = bind_first(
        &[&["n", "d", "c"], &["foo", "2014-04-06 10:02:21", "4459813"]],
        &strategy(),
        Options::new().time_zone(Stockholm),
    );

    let expected = Stockholm.with_ymd_and_hms(2014, 4, 6, 10, 2, 21).unwrap();
    assert_eq!(dest.date, Some(expected));
    // Same wall clock, different instant than UTC
    assert_ne!(dest.date, Some(utc(2014, 4, 6, 10, 2, 21)));
    assert_eq!(dest.date.unwrap().naive_local(), utc(2014, 4, 6, 10, 2, 21).naive_local());
}

#[test]
fn test_row_binding() {
    let mut s = strategy();
    s.insert("r", "Rating");
    let dest = bind_first(
        &[&["n", "d", "c", "r"], &["foo", "2014-04-06 10:02:21", "4459813", "1.55"]],
        &s,
        Options::new().null_marker("NULL"),
    );

    assert_eq!(dest.counter, 4459813);
    assert_eq!(dest.rating, Some("1.55".parse().unwrap()));
}

#[test]
fn test_null_handling() {
    let dest = bind_first(
        &[&["n", "d", "c"], &["foo", "2014-04-06 10:02:21", "NULL"]],
        &strategy(),
        Options::new().null_marker("NULL"),
    );

    assert_eq!(dest.name, "foo");
    assert_eq!(dest.date, Some(utc(2014, 4, 6, 10, 2, 21)));
    assert_eq!(dest.counter, 0);
}

#[test]
fn test_empty_custom_header_fails() {
    let input = encode(&[&["foo", "bar"]]);
    let opts = Options::new().header(Vec::<(usize, &str)>::new());
    let result = Binder::new(input.as_slice(), opts);
    assert!(matches!(result, Err(BindError::NoCustomHeaderMetadata)));
}

#[test]
fn test_empty_input_fails() {
    let result = Binder::new("".as_bytes(), Options::default());
    assert!(matches!(result, Err(BindError::NoHeaderMetadata)));
}

#[test]
fn test_header_read_error_surfaces_unchanged() {
    let result = Binder::new(&b"\xff\xfe,x\n"[..], Options::default());
    assert!(matches!(result, Err(BindError::Csv(_))));
}

#[test]
fn test_bind_many_rows() {
    let input = encode(&[
        &["n", "d", "c", "r"],
        &["a", "2020-01-01 00:00:00", "1", "0.5"],
        &["b", "", "2", "NULL"],
        &["c", "2020-01-03 12:30:00", "", "2.25"],
    ]);
    let mut binder = Binder::new(input.as_slice(), Options::new().null_marker("NULL")).unwrap();
    let s = Strategy::from([("n", "Name"), ("d", "Date"), ("c", "Counter"), ("r", "Rating")]);

    let records: Vec<Destination> = binder.records(&s).collect::<Result<_, _>>().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[1].date, None);
    assert_eq!(records[1].rating, None);
    assert_eq!(records[2].counter, 0);
    assert_eq!(records[2].date, Some(utc(2020, 1, 3, 12, 30, 0)));
    assert_eq!(binder.row_count(), 3);
}

#[test]
fn test_quoted_cells() {
    let input = "n,c\n\"Smith, John\",\"12\"\n";
    let mut binder = Binder::new(input.as_bytes(), Options::default()).unwrap();
    let row = binder.read_row().unwrap().unwrap();
    let dest: Destination = row.to_record(&strategy()).unwrap();

    assert_eq!(dest.name, "Smith, John");
    assert_eq!(dest.counter, 12);
}

#[test]
fn test_open_file() -> csvbind::Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "n;c")?;
    writeln!(file, "foo;42")?;
    writeln!(file, "bar;43")?;

    let mut binder = Binder::open(file.path(), Options::new().separator(';'))?;
    let mut names = Vec::new();
    binder.for_each(|row| {
        let dest: Destination = row.to_record(&strategy())?;
        names.push((dest.name, dest.counter));
        Ok::<_, BindError>(true)
    })?;

    assert_eq!(names, vec![("foo".to_string(), 42), ("bar".to_string(), 43)]);
    Ok(())
}

//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use study_tab::{NaStatus, Sex, Subject};

/// Header of the delimited fixture, in the default column naming
pub const HEADER: &str = "Nr;Labor-Nr;Gruppe;Geschlecht;Alter;Krankheitsdauer;EDSS;IgG;OKB;MRZ;T2-Läsionen";

/// A small cohort: three controls and four cases across two groups
pub const ROWS: [&str; 8] = [
    "1;L-01;GK;w;30;;;negativ;negativ;n/a;",
    "2;L-02;GK;w;50;;;negativ;positiv;n/a;",
    "3;L-03;GK;m;44;;;n/a;negativ;n/a;",
    "4;L-04;RRMS;w;31;2;1,5;positiv;positiv;positiv;>9",
    "5;L-05;RRMS;w;49;10,5;3;positiv;positiv;negativ;<6",
    "6;L-06;CIS;m;40;0,5;;negativ;positiv;keine angabe;3",
    "7;L-07;;m;99;;;;;;",
    "8;L-08;PPMS;m;60;12;6,5;positiv;positiv;positiv;>=20",
];

/// Write the fixture as a semicolon separated file
pub fn write_cohort_csv(dir: &Path) -> PathBuf {
    let path = dir.join("cohort.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for row in ROWS {
        writeln!(file, "{row}").unwrap();
    }
    path
}

/// Write a Parquet file with typed columns
pub fn write_cohort_parquet(dir: &Path) -> PathBuf {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Nr", DataType::Utf8, false),
        Field::new("Gruppe", DataType::Utf8, true),
        Field::new("Geschlecht", DataType::Utf8, false),
        Field::new("Alter", DataType::Float64, false),
        Field::new("EDSS", DataType::Float64, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec!["1", "2", "3"])),
        Arc::new(StringArray::from(vec![Some("GK"), Some("SPMS"), None])),
        Arc::new(StringArray::from(vec!["m", "m", "w"])),
        Arc::new(Float64Array::from(vec![45.0, 47.5, 20.0])),
        Arc::new(Float64Array::from(vec![None, Some(5.5), None])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

    let path = dir.join("cohort.parquet");
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
    path
}

/// Write a Parquet file with the required columns and no rows
pub fn write_empty_parquet(dir: &Path) -> PathBuf {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Nr", DataType::Utf8, false),
        Field::new("Gruppe", DataType::Utf8, true),
        Field::new("Geschlecht", DataType::Utf8, false),
        Field::new("Alter", DataType::Float64, false),
    ]));

    let path = dir.join("empty.parquet");
    let file = std::fs::File::create(&path).unwrap();
    let writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.close().unwrap();
    path
}

/// Build a subject in code
pub fn subject(id: &str, group: &str, sex: Sex, age: f64) -> Subject {
    Subject::new(id, group, sex, age)
}

/// Build a subject with an IgG status
pub fn subject_with_igg(id: &str, group: &str, igg: NaStatus) -> Subject {
    let mut s = Subject::new(id, group, Sex::Female, 40.0);
    s.igg = igg;
    s
}

//! Readers for the demographic CSV files.
//!
//! Each file has a `parse_*` function over its text so the parsing can be
//! exercised without touching the filesystem; [`load_tables`] wires them to
//! the files in a data directory.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use super::{
    Decade, DecadeRates, DemographicTables, FirstNameTable, LastNameTable, RankedName,
    WeightedName,
};
use crate::error::{Result, TableError};
use crate::model::Gender;

pub const LIFE_EXPECTANCY_FILE: &str = "life_expectancy.csv";
pub const RATES_FILE: &str = "birth_and_marriage_rates.csv";
pub const FIRST_NAMES_FILE: &str = "first_names.csv";
pub const LAST_NAMES_FILE: &str = "last_names.csv";
pub const RANK_PROBABILITY_FILE: &str = "rank_to_probability.csv";

/// Header row plus data rows, each tagged with its 1-based line number.
struct CsvDoc<'a> {
    file: &'a str,
    headers: Vec<String>,
    rows: Vec<(usize, Vec<String>)>,
}

impl<'a> CsvDoc<'a> {
    fn parse(file: &'a str, text: &str) -> Self {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim_start_matches('\u{feff}')))
            .filter(|(_, line)| !line.trim().is_empty());
        let headers = lines
            .next()
            .map(|(_, line)| split_record(line))
            .unwrap_or_default();
        let rows = lines.map(|(n, line)| (n, split_record(line))).collect();
        Self {
            file,
            headers,
            rows,
        }
    }

    fn column(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TableError::MissingColumn {
                file: self.file.to_string(),
                column: name.to_string(),
            })
    }

    fn field<T: FromStr>(&self, line: usize, row: &[String], col: usize) -> Result<T> {
        let raw = row.get(col).map(String::as_str).unwrap_or("");
        raw.parse().map_err(|_| TableError::InvalidField {
            file: self.file.to_string(),
            line,
            column: self.headers[col].clone(),
            value: raw.to_string(),
        })
    }

    fn text<'r>(&self, row: &'r [String], col: usize) -> &'r str {
        row.get(col).map(String::as_str).unwrap_or("")
    }
}

/// Split one CSV record on commas, honouring double-quoted fields and `""`
/// escapes. Fields are trimmed.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

pub fn parse_life_expectancy(text: &str) -> Result<BTreeMap<i32, f64>> {
    let doc = CsvDoc::parse(LIFE_EXPECTANCY_FILE, text);
    let year_col = doc.column("Year")?;
    let value_col = doc.column("Period life expectancy at birth")?;

    let mut table = BTreeMap::new();
    for (line, row) in &doc.rows {
        let year: i32 = doc.field(*line, row, year_col)?;
        let expectancy: f64 = doc.field(*line, row, value_col)?;
        table.insert(year, expectancy);
    }
    Ok(table)
}

pub fn parse_rates(text: &str) -> Result<BTreeMap<Decade, DecadeRates>> {
    let doc = CsvDoc::parse(RATES_FILE, text);
    let decade_col = doc.column("decade")?;
    let birth_col = doc.column("birth_rate")?;
    let marriage_col = doc.column("marriage_rate")?;

    let mut table = BTreeMap::new();
    for (line, row) in &doc.rows {
        let decade: Decade = doc.field(*line, row, decade_col)?;
        let rates = DecadeRates {
            birth_rate: doc.field(*line, row, birth_col)?,
            marriage_rate: doc.field(*line, row, marriage_col)?,
        };
        table.insert(decade, rates);
    }
    Ok(table)
}

pub fn parse_first_names(text: &str) -> Result<FirstNameTable> {
    let doc = CsvDoc::parse(FIRST_NAMES_FILE, text);
    let decade_col = doc.column("decade")?;
    let gender_col = doc.column("gender")?;
    let name_col = doc.column("name")?;
    let frequency_col = doc.column("frequency")?;

    let mut table: FirstNameTable = BTreeMap::new();
    for (line, row) in &doc.rows {
        let decade: Decade = doc.field(*line, row, decade_col)?;
        let gender: Gender = doc.field(*line, row, gender_col)?;
        let frequency: f64 = doc.field(*line, row, frequency_col)?;
        let name = doc.text(row, name_col);

        table
            .entry(decade)
            .or_insert_with(|| HashMap::from([(Gender::Male, vec![]), (Gender::Female, vec![])]))
            .entry(gender)
            .or_default()
            .push(WeightedName::new(name, frequency));
    }
    Ok(table)
}

pub fn parse_last_names(text: &str) -> Result<LastNameTable> {
    let doc = CsvDoc::parse(LAST_NAMES_FILE, text);
    let decade_col = doc.column("Decade")?;
    let rank_col = doc.column("Rank")?;
    let name_col = doc.column("LastName")?;

    let mut table: LastNameTable = BTreeMap::new();
    for (line, row) in &doc.rows {
        let decade: Decade = doc.field(*line, row, decade_col)?;
        let rank: u32 = doc.field(*line, row, rank_col)?;
        let name = doc.text(row, name_col);
        table
            .entry(decade)
            .or_default()
            .push(RankedName::new(name, rank));
    }
    Ok(table)
}

/// The rank file is a single headerless list of probabilities; the value at
/// position `i` (1-based) is the weight for rank `i`.
pub fn parse_rank_probabilities(text: &str) -> Result<BTreeMap<u32, f64>> {
    let mut table = BTreeMap::new();
    let mut rank = 0u32;
    for (line_no, line) in text.lines().enumerate() {
        for raw in line.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let probability: f64 = raw.parse().map_err(|_| TableError::InvalidField {
                file: RANK_PROBABILITY_FILE.to_string(),
                line: line_no + 1,
                column: "probability".to_string(),
                value: raw.to_string(),
            })?;
            rank += 1;
            table.insert(rank, probability);
        }
    }
    Ok(table)
}

fn read(dir: &Path, file: &str) -> Result<String> {
    let path = dir.join(file);
    fs::read_to_string(&path).map_err(|source| TableError::Io { path, source })
}

/// Load all five demographic files from `dir`.
pub fn load_tables(dir: &Path) -> Result<DemographicTables> {
    let life_expectancy = parse_life_expectancy(&read(dir, LIFE_EXPECTANCY_FILE)?)?;
    let rates = parse_rates(&read(dir, RATES_FILE)?)?;
    let first_names = parse_first_names(&read(dir, FIRST_NAMES_FILE)?)?;
    let last_names = parse_last_names(&read(dir, LAST_NAMES_FILE)?)?;
    let rank_probabilities = parse_rank_probabilities(&read(dir, RANK_PROBABILITY_FILE)?)?;

    let tables = DemographicTables::new(life_expectancy, rates)?
        .with_first_names(first_names)
        .with_last_names(last_names, rank_probabilities);

    info!(
        dir = %dir.display(),
        life_expectancy_years = tables.life_expectancy_years(),
        rate_decades = tables.rate_decades(),
        first_name_decades = tables.first_name_decades(),
        last_name_decades = tables.last_name_decades(),
        "loaded demographic tables"
    );
    Ok(tables)
}

//! Text and JSON rendering of tree queries, plus the interactive menu.

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use serde::Serialize;

use crate::generator::FamilyTree;
use crate::model::Person;

const MENU: &str = "\nQuery Options:\n\
                    \x20 (T)otal number of people in the tree\n\
                    \x20 Total number of people in the tree for each (D)ecade\n\
                    \x20 (N)ames Repeated\n\
                    \x20 (Q)uit\n\
                    > ";

/// Serializable snapshot of every query result.
#[derive(Debug, Clone, Serialize)]
pub struct TreeSummary {
    pub founders: [FounderSummary; 2],
    pub total_people: usize,
    pub people_by_decade: BTreeMap<i32, usize>,
    pub duplicate_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FounderSummary {
    pub name: String,
    pub birth_year: i32,
    pub death_year: i32,
}

impl From<&Person> for FounderSummary {
    fn from(person: &Person) -> Self {
        Self {
            name: person.full_name(),
            birth_year: person.birth_year,
            death_year: person.death_year,
        }
    }
}

impl TreeSummary {
    pub fn from_tree(tree: &FamilyTree) -> Self {
        Self {
            founders: [tree.root1().into(), tree.root2().into()],
            total_people: tree.total_people(),
            people_by_decade: tree.people_by_decade(),
            duplicate_names: tree.duplicate_names(),
        }
    }
}

pub fn write_total(tree: &FamilyTree, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\nThe tree contains {} people total.", tree.total_people())
}

pub fn write_by_decade(tree: &FamilyTree, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    for (decade, count) in tree.people_by_decade() {
        writeln!(out, "  {decade}: {count} people")?;
    }
    Ok(())
}

pub fn write_duplicates(tree: &FamilyTree, out: &mut impl Write) -> io::Result<()> {
    let dupes = tree.duplicate_names();
    if dupes.is_empty() {
        return writeln!(out, "\nThere are no duplicate names in the tree.");
    }
    writeln!(out, "\nThere are {} duplicate name(s) in the tree:", dupes.len())?;
    for name in &dupes {
        writeln!(out, "  * {name}")?;
    }
    Ok(())
}

/// Write all three query results in menu order.
pub fn write_report(tree: &FamilyTree, out: &mut impl Write) -> io::Result<()> {
    write_total(tree, out)?;
    write_by_decade(tree, out)?;
    write_duplicates(tree, out)
}

/// Prompt for queries until the user quits or input ends.
pub fn run_menu(tree: &FamilyTree, input: &mut impl BufRead, out: &mut impl Write) -> io::Result<()> {
    let mut line = String::new();
    loop {
        write!(out, "{MENU}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        match line.trim().to_ascii_uppercase().as_str() {
            "T" => write_total(tree, out)?,
            "D" => write_by_decade(tree, out)?,
            "N" => write_duplicates(tree, out)?,
            "Q" => {
                writeln!(out, "Goodbye!")?;
                return Ok(());
            }
            _ => writeln!(out, "  Please enter T, D, N, or Q.")?,
        }
    }
}

use std::path::Path;

use crate::dataset::{PenguinTable, Sex};
use crate::error::PenguinError;

use super::statistics::mean;

/// Count matrix over two categorical attributes.
///
/// The species/island crosstab is kept in both orientations; neither
/// view supersedes the other (one feeds the report and CSV export, the
/// transposed one drives the stacked bar chart).
#[derive(Debug, Clone)]
pub struct CrossTab {
    /// Name of the row attribute (appears as the header's first cell)
    pub row_label: &'static str,
    pub row_names: Vec<String>,
    pub col_names: Vec<String>,
    pub counts: Vec<Vec<u64>>,
}

impl CrossTab {
    /// Count matrix with species rows and island columns.
    pub fn species_by_island(table: &PenguinTable) -> Result<Self, PenguinError> {
        Self::build(
            table,
            "species",
            table.species_present().iter().map(|s| s.to_string()).collect(),
            table.islands_present().iter().map(|i| i.to_string()).collect(),
            |p| (p.species.to_string(), p.island.to_string()),
        )
    }

    /// Count matrix with island rows and species columns.
    pub fn island_by_species(table: &PenguinTable) -> Result<Self, PenguinError> {
        Self::build(
            table,
            "island",
            table.islands_present().iter().map(|i| i.to_string()).collect(),
            table.species_present().iter().map(|s| s.to_string()).collect(),
            |p| (p.island.to_string(), p.species.to_string()),
        )
    }

    fn build(
        table: &PenguinTable,
        row_label: &'static str,
        row_names: Vec<String>,
        col_names: Vec<String>,
        key: impl Fn(&crate::dataset::Penguin) -> (String, String),
    ) -> Result<Self, PenguinError> {
        if table.is_empty() {
            return Err(PenguinError::InsufficientData(
                "Cannot cross-tabulate an empty table".to_string(),
            ));
        }

        let mut counts = vec![vec![0u64; col_names.len()]; row_names.len()];
        for p in table.records() {
            let (row, col) = key(p);
            let r = row_names.iter().position(|n| *n == row);
            let c = col_names.iter().position(|n| *n == col);
            if let (Some(r), Some(c)) = (r, c) {
                counts[r][c] += 1;
            }
        }

        Ok(Self {
            row_label,
            row_names,
            col_names,
            counts,
        })
    }

    pub fn cell(&self, row: usize, col: usize) -> u64 {
        self.counts[row][col]
    }

    /// Total count per row.
    pub fn row_sums(&self) -> Vec<u64> {
        self.counts.iter().map(|r| r.iter().sum()).collect()
    }

    /// Grand total over all cells.
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Render as a pipe-delimited markdown table.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("| {} |", self.row_label));
        for c in &self.col_names {
            out.push_str(&format!(" {c} |"));
        }
        out.push('\n');
        out.push_str("|:---|");
        for _ in &self.col_names {
            out.push_str("---:|");
        }
        out.push('\n');
        for (r, name) in self.row_names.iter().enumerate() {
            out.push_str(&format!("| {name} |"));
            for c in 0..self.col_names.len() {
                out.push_str(&format!(" {} |", self.counts[r][c]));
            }
            out.push('\n');
        }
        out
    }

    /// Export as a delimited text file.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), PenguinError> {
        let mut wtr = csv::Writer::from_path(path.as_ref())?;

        let mut header = vec![self.row_label.to_string()];
        header.extend(self.col_names.iter().cloned());
        wtr.write_record(&header)?;

        for (r, name) in self.row_names.iter().enumerate() {
            let mut record = vec![name.clone()];
            record.extend(self.counts[r].iter().map(|n| n.to_string()));
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

/// Mean body mass grouped by species and sex.
///
/// A (species, sex) pair absent from the data is `None`, which is
/// distinct from a mean of zero.
#[derive(Debug, Clone)]
pub struct PivotTable {
    pub row_label: &'static str,
    pub row_names: Vec<String>,
    pub col_names: Vec<String>,
    pub cells: Vec<Vec<Option<f64>>>,
}

impl PivotTable {
    /// Mean body mass with species rows and sex columns.
    pub fn mean_body_mass_by_species_sex(table: &PenguinTable) -> Result<Self, PenguinError> {
        if table.is_empty() {
            return Err(PenguinError::InsufficientData(
                "Cannot pivot an empty table".to_string(),
            ));
        }

        let species = table.species_present();
        let sexes = table.sexes_present();

        let cells: Vec<Vec<Option<f64>>> = species
            .iter()
            .map(|sp| {
                sexes
                    .iter()
                    .map(|sx| {
                        let masses: Vec<f64> = table
                            .records()
                            .iter()
                            .filter(|p| p.species == *sp && p.sex == *sx)
                            .map(|p| p.body_mass_g)
                            .collect();
                        if masses.is_empty() {
                            None
                        } else {
                            Some(mean(&masses))
                        }
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            row_label: "species",
            row_names: species.iter().map(|s| s.to_string()).collect(),
            col_names: sexes.iter().map(Sex::to_string).collect(),
            cells,
        })
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<f64> {
        self.cells[row][col]
    }

    /// Render as a pipe-delimited markdown table; absent cells stay blank.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("| {} |", self.row_label));
        for c in &self.col_names {
            out.push_str(&format!(" {c} |"));
        }
        out.push('\n');
        out.push_str("|:---|");
        for _ in &self.col_names {
            out.push_str("---:|");
        }
        out.push('\n');
        for (r, name) in self.row_names.iter().enumerate() {
            out.push_str(&format!("| {name} |"));
            for c in 0..self.col_names.len() {
                match self.cells[r][c] {
                    Some(v) => out.push_str(&format!(" {v:.2} |")),
                    None => out.push_str("  |"),
                }
            }
            out.push('\n');
        }
        out
    }

    /// Export as a delimited text file; absent cells are empty fields.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), PenguinError> {
        let mut wtr = csv::Writer::from_path(path.as_ref())?;

        let mut header = vec![self.row_label.to_string()];
        header.extend(self.col_names.iter().cloned());
        wtr.write_record(&header)?;

        for (r, name) in self.row_names.iter().enumerate() {
            let mut record = vec![name.clone()];
            record.extend(self.cells[r].iter().map(|cell| match cell {
                Some(v) => v.to_string(),
                None => String::new(),
            }));
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Island, Penguin, Species};

    fn penguin(species: Species, island: Island, sex: Sex, mass: f64) -> Penguin {
        Penguin {
            species,
            island,
            bill_length_mm: 40.0,
            bill_depth_mm: 18.0,
            flipper_length_mm: 190.0,
            body_mass_g: mass,
            sex,
            year: 2008,
        }
    }

    fn small_table() -> PenguinTable {
        PenguinTable::from_records(vec![
            penguin(Species::Adelie, Island::Torgersen, Sex::Male, 4000.0),
            penguin(Species::Adelie, Island::Torgersen, Sex::Male, 3800.0),
            penguin(Species::Adelie, Island::Dream, Sex::Female, 3400.0),
            penguin(Species::Gentoo, Island::Biscoe, Sex::Male, 5500.0),
        ])
    }

    #[test]
    fn test_species_by_island_counts() {
        let ct = CrossTab::species_by_island(&small_table()).unwrap();
        assert_eq!(ct.row_names, vec!["Adelie", "Gentoo"]);
        assert_eq!(ct.col_names, vec!["Biscoe", "Dream", "Torgersen"]);
        assert_eq!(ct.cell(0, 0), 0);
        assert_eq!(ct.cell(0, 1), 1);
        assert_eq!(ct.cell(0, 2), 2);
        assert_eq!(ct.cell(1, 0), 1);
    }

    #[test]
    fn test_row_sums_match_species_counts() {
        let table = small_table();
        let ct = CrossTab::species_by_island(&table).unwrap();
        let sums = ct.row_sums();
        assert_eq!(sums, vec![3, 1]);
        assert_eq!(ct.total() as usize, table.len());
    }

    #[test]
    fn test_island_by_species_is_transpose() {
        let table = small_table();
        let a = CrossTab::species_by_island(&table).unwrap();
        let b = CrossTab::island_by_species(&table).unwrap();
        for (r, _) in a.row_names.iter().enumerate() {
            for (c, _) in a.col_names.iter().enumerate() {
                assert_eq!(a.cell(r, c), b.cell(c, r));
            }
        }
    }

    #[test]
    fn test_crosstab_empty_table_fails() {
        let table = PenguinTable::from_records(vec![]);
        assert!(CrossTab::species_by_island(&table).is_err());
        assert!(CrossTab::island_by_species(&table).is_err());
    }

    #[test]
    fn test_crosstab_markdown_shape() {
        let md = CrossTab::species_by_island(&small_table()).unwrap().to_markdown();
        let lines: Vec<&str> = md.lines().collect();
        // header + separator + one line per species
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("| species |"));
        assert!(lines[1].starts_with("|:---|"));
        assert!(lines[2].contains("Adelie"));
    }

    #[test]
    fn test_crosstab_csv_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crosstab.csv");
        CrossTab::species_by_island(&small_table())
            .unwrap()
            .write_csv(&path)
            .unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), "species,Biscoe,Dream,Torgersen");
        assert_eq!(lines.next().unwrap(), "Adelie,0,1,2");
        assert_eq!(lines.next().unwrap(), "Gentoo,1,0,0");
    }

    #[test]
    fn test_pivot_mean_body_mass() {
        let pivot = PivotTable::mean_body_mass_by_species_sex(&small_table()).unwrap();
        assert_eq!(pivot.row_names, vec!["Adelie", "Gentoo"]);
        assert_eq!(pivot.col_names, vec!["Female", "Male"]);
        assert_eq!(pivot.cell(0, 0), Some(3400.0));
        assert_eq!(pivot.cell(0, 1), Some(3900.0));
        assert_eq!(pivot.cell(1, 1), Some(5500.0));
    }

    #[test]
    fn test_pivot_absent_pair_is_none_not_zero() {
        let pivot = PivotTable::mean_body_mass_by_species_sex(&small_table()).unwrap();
        // No female Gentoo in the sample
        assert_eq!(pivot.cell(1, 0), None);
    }

    #[test]
    fn test_pivot_csv_blank_for_absent_pair() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pivot.csv");
        PivotTable::mean_body_mass_by_species_sex(&small_table())
            .unwrap()
            .write_csv(&path)
            .unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let gentoo_line = content.lines().find(|l| l.starts_with("Gentoo")).unwrap();
        assert_eq!(gentoo_line, "Gentoo,,5500");
    }

    #[test]
    fn test_pivot_markdown_blank_for_absent_pair() {
        let md = PivotTable::mean_body_mass_by_species_sex(&small_table())
            .unwrap()
            .to_markdown();
        let gentoo_line = md.lines().find(|l| l.contains("Gentoo")).unwrap();
        assert!(gentoo_line.contains("|  |"));
        assert!(gentoo_line.contains("5500.00"));
    }

    #[test]
    fn test_pivot_empty_table_fails() {
        let table = PenguinTable::from_records(vec![]);
        assert!(PivotTable::mean_body_mass_by_species_sex(&table).is_err());
    }

    #[test]
    fn test_builtin_row_sums_equal_species_counts() {
        let table = PenguinTable::load_builtin().unwrap();
        let ct = CrossTab::species_by_island(&table).unwrap();
        let sums = ct.row_sums();
        for (i, sp) in table.species_present().into_iter().enumerate() {
            assert_eq!(sums[i] as usize, table.species_count(sp));
        }
    }
}

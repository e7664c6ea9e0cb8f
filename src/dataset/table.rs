use crate::error::PenguinError;

use super::penguin::{Island, NumericColumn, Penguin, Sex, Species};

/// The Palmer penguins sample dataset, embedded at build time.
const PENGUINS_CSV: &str = include_str!("../../data/penguins.csv");

/// CSV row as it appears in the raw dataset. Any field may be missing.
#[derive(Debug, serde::Deserialize)]
struct RawRow {
    species: Option<String>,
    island: Option<String>,
    bill_length_mm: Option<f64>,
    bill_depth_mm: Option<f64>,
    flipper_length_mm: Option<f64>,
    body_mass_g: Option<f64>,
    sex: Option<String>,
    year: Option<i32>,
}

impl RawRow {
    /// Convert to a complete record, or `None` if any field is missing.
    /// A present but unparseable categorical value is an error.
    fn into_penguin(self) -> Result<Option<Penguin>, PenguinError> {
        let (species, island, sex) = match (
            self.species.filter(|s| !s.is_empty()),
            self.island.filter(|s| !s.is_empty()),
            self.sex.filter(|s| !s.is_empty()),
        ) {
            (Some(sp), Some(isl), Some(sx)) => (sp, isl, sx),
            _ => return Ok(None),
        };

        let (bill_length_mm, bill_depth_mm, flipper_length_mm, body_mass_g, year) = match (
            self.bill_length_mm,
            self.bill_depth_mm,
            self.flipper_length_mm,
            self.body_mass_g,
            self.year,
        ) {
            (Some(bl), Some(bd), Some(fl), Some(bm), Some(y)) => (bl, bd, fl, bm, y),
            _ => return Ok(None),
        };

        Ok(Some(Penguin {
            species: species.parse()?,
            island: island.parse()?,
            bill_length_mm,
            bill_depth_mm,
            flipper_length_mm,
            body_mass_g,
            sex: sex.parse()?,
            year,
        }))
    }
}

/// Immutable table of complete penguin observations.
///
/// Rows with any missing attribute are dropped at construction; the
/// table is never mutated afterwards.
#[derive(Debug, Clone)]
pub struct PenguinTable {
    records: Vec<Penguin>,
    raw_count: usize,
}

impl PenguinTable {
    /// Load the embedded sample dataset, dropping incomplete rows.
    pub fn load_builtin() -> Result<Self, PenguinError> {
        Self::from_csv_bytes(PENGUINS_CSV.as_bytes())
    }

    /// Parse a table from CSV bytes with the dataset's column layout.
    pub fn from_csv_bytes(data: &[u8]) -> Result<Self, PenguinError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(data);

        let mut records = Vec::new();
        let mut raw_count = 0;
        for result in rdr.deserialize() {
            let row: RawRow = result?;
            raw_count += 1;
            if let Some(penguin) = row.into_penguin()? {
                records.push(penguin);
            }
        }

        Ok(Self { records, raw_count })
    }

    /// Build a table directly from complete records (used by tests and
    /// degenerate-case checks).
    pub fn from_records(records: Vec<Penguin>) -> Self {
        let raw_count = records.len();
        Self { records, raw_count }
    }

    pub fn records(&self) -> &[Penguin] {
        &self.records
    }

    /// Number of complete records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows in the raw dataset before filtering.
    pub fn raw_count(&self) -> usize {
        self.raw_count
    }

    /// Number of rows dropped for having a missing field.
    pub fn dropped_count(&self) -> usize {
        self.raw_count - self.records.len()
    }

    /// Distinct species present, in canonical order.
    pub fn species_present(&self) -> Vec<Species> {
        Species::ALL
            .into_iter()
            .filter(|sp| self.records.iter().any(|p| p.species == *sp))
            .collect()
    }

    /// Distinct islands present, in canonical order.
    pub fn islands_present(&self) -> Vec<Island> {
        [Island::Biscoe, Island::Dream, Island::Torgersen]
            .into_iter()
            .filter(|isl| self.records.iter().any(|p| p.island == *isl))
            .collect()
    }

    /// Distinct sexes present, in canonical order.
    pub fn sexes_present(&self) -> Vec<Sex> {
        [Sex::Female, Sex::Male]
            .into_iter()
            .filter(|sx| self.records.iter().any(|p| p.sex == *sx))
            .collect()
    }

    /// Extract a numeric column as a vector.
    pub fn numeric(&self, col: NumericColumn) -> Vec<f64> {
        self.records.iter().map(|p| col.value(p)).collect()
    }

    /// Extract a numeric column restricted to one species.
    pub fn numeric_for_species(&self, col: NumericColumn, species: Species) -> Vec<f64> {
        self.records
            .iter()
            .filter(|p| p.species == species)
            .map(|p| col.value(p))
            .collect()
    }

    /// Count records for one species.
    pub fn species_count(&self, species: Species) -> usize {
        self.records.iter().filter(|p| p.species == species).count()
    }
}

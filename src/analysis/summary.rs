use comfy_table::{presets::NOTHING, Cell, CellAlignment, ContentArrangement, Table};

use crate::dataset::{NumericColumn, PenguinTable};
use crate::error::PenguinError;

use super::statistics::{max, mean, min, quantile, std_dev};

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Descriptive statistics for one categorical column.
#[derive(Debug, Clone)]
pub struct CategoricalSummary {
    pub count: usize,
    pub unique: usize,
    /// Most frequent value (first in canonical order on ties)
    pub top: String,
    /// Frequency of the most frequent value
    pub freq: usize,
}

#[derive(Debug, Clone)]
pub enum ColumnStats {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

/// Summary of a single dataset column.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub name: &'static str,
    pub stats: ColumnStats,
}

fn summarize_numeric(values: &[f64]) -> NumericSummary {
    NumericSummary {
        count: values.len(),
        mean: mean(values),
        std: std_dev(values),
        min: min(values),
        q25: quantile(values, 0.25),
        median: quantile(values, 0.5),
        q75: quantile(values, 0.75),
        max: max(values),
    }
}

fn summarize_categorical(labeled: Vec<(String, usize)>, total: usize) -> CategoricalSummary {
    let (top, freq) = labeled
        .iter()
        .max_by_key(|(_, n)| *n)
        .map(|(name, n)| (name.clone(), *n))
        .unwrap_or_default();
    CategoricalSummary {
        count: total,
        unique: labeled.len(),
        top,
        freq,
    }
}

/// Compute a describe-style summary over every column of the table,
/// categorical and numeric alike.
pub fn describe(table: &PenguinTable) -> Result<Vec<ColumnSummary>, PenguinError> {
    if table.is_empty() {
        return Err(PenguinError::InsufficientData(
            "Cannot summarize an empty table".to_string(),
        ));
    }

    let n = table.len();
    let mut columns = Vec::with_capacity(8);

    let species_counts: Vec<(String, usize)> = table
        .species_present()
        .into_iter()
        .map(|sp| (sp.to_string(), table.species_count(sp)))
        .collect();
    columns.push(ColumnSummary {
        name: "species",
        stats: ColumnStats::Categorical(summarize_categorical(species_counts, n)),
    });

    let island_counts: Vec<(String, usize)> = table
        .islands_present()
        .into_iter()
        .map(|isl| {
            let count = table.records().iter().filter(|p| p.island == isl).count();
            (isl.to_string(), count)
        })
        .collect();
    columns.push(ColumnSummary {
        name: "island",
        stats: ColumnStats::Categorical(summarize_categorical(island_counts, n)),
    });

    for col in NumericColumn::MEASUREMENTS {
        columns.push(ColumnSummary {
            name: col.label(),
            stats: ColumnStats::Numeric(summarize_numeric(&table.numeric(col))),
        });
    }

    let sex_counts: Vec<(String, usize)> = table
        .sexes_present()
        .into_iter()
        .map(|sx| {
            let count = table.records().iter().filter(|p| p.sex == sx).count();
            (sx.to_string(), count)
        })
        .collect();
    columns.push(ColumnSummary {
        name: "sex",
        stats: ColumnStats::Categorical(summarize_categorical(sex_counts, n)),
    });

    columns.push(ColumnSummary {
        name: "year",
        stats: ColumnStats::Numeric(summarize_numeric(&table.numeric(NumericColumn::Year))),
    });

    Ok(columns)
}

const STAT_ROWS: [&str; 11] = [
    "count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%", "max",
];

fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{v:.4}")
    }
}

fn stat_cell(summary: &ColumnSummary, stat: &str) -> String {
    match (&summary.stats, stat) {
        (ColumnStats::Categorical(c), "count") => c.count.to_string(),
        (ColumnStats::Categorical(c), "unique") => c.unique.to_string(),
        (ColumnStats::Categorical(c), "top") => c.top.clone(),
        (ColumnStats::Categorical(c), "freq") => c.freq.to_string(),
        (ColumnStats::Categorical(_), _) => "NaN".to_string(),
        (ColumnStats::Numeric(n), "count") => format!("{}.0", n.count),
        (ColumnStats::Numeric(n), "mean") => format_value(n.mean),
        (ColumnStats::Numeric(n), "std") => format_value(n.std),
        (ColumnStats::Numeric(n), "min") => format_value(n.min),
        (ColumnStats::Numeric(n), "25%") => format_value(n.q25),
        (ColumnStats::Numeric(n), "50%") => format_value(n.median),
        (ColumnStats::Numeric(n), "75%") => format_value(n.q75),
        (ColumnStats::Numeric(n), "max") => format_value(n.max),
        (ColumnStats::Numeric(_), _) => "NaN".to_string(),
    }
}

/// Render the describe summary as fixed-width text: one column per
/// dataset attribute, one row per statistic.
pub fn format_describe(summaries: &[ColumnSummary]) -> String {
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Disabled);

    let mut header = vec![Cell::new("")];
    header.extend(summaries.iter().map(|s| Cell::new(s.name)));
    table.set_header(header);

    for stat in STAT_ROWS {
        let mut row = vec![Cell::new(stat)];
        row.extend(
            summaries
                .iter()
                .map(|s| Cell::new(stat_cell(s, stat)).set_alignment(CellAlignment::Right)),
        );
        table.add_row(row);
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn builtin() -> PenguinTable {
        PenguinTable::load_builtin().unwrap()
    }

    #[test]
    fn test_describe_has_all_columns() {
        let summaries = describe(&builtin()).unwrap();
        let names: Vec<&str> = summaries.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "species",
                "island",
                "bill_length_mm",
                "bill_depth_mm",
                "flipper_length_mm",
                "body_mass_g",
                "sex",
                "year"
            ]
        );
    }

    #[test]
    fn test_describe_numeric_counts_match_table() {
        let table = builtin();
        let summaries = describe(&table).unwrap();
        for s in &summaries {
            match &s.stats {
                ColumnStats::Numeric(n) => assert_eq!(n.count, table.len()),
                ColumnStats::Categorical(c) => assert_eq!(c.count, table.len()),
            }
        }
    }

    #[test]
    fn test_describe_numeric_ordering() {
        let summaries = describe(&builtin()).unwrap();
        for s in &summaries {
            if let ColumnStats::Numeric(n) = &s.stats {
                assert!(n.min <= n.q25);
                assert!(n.q25 <= n.median);
                assert!(n.median <= n.q75);
                assert!(n.q75 <= n.max);
                assert!(n.mean >= n.min && n.mean <= n.max);
            }
        }
    }

    #[test]
    fn test_describe_species_top_has_max_freq() {
        let table = builtin();
        let summaries = describe(&table).unwrap();
        if let ColumnStats::Categorical(c) = &summaries[0].stats {
            assert_eq!(c.unique, 3);
            let top_species: crate::dataset::Species = c.top.parse().unwrap();
            assert_eq!(table.species_count(top_species), c.freq);
            for sp in table.species_present() {
                assert!(table.species_count(sp) <= c.freq);
            }
        } else {
            panic!("species column should be categorical");
        }
    }

    #[test]
    fn test_describe_empty_table_fails() {
        let table = PenguinTable::from_records(vec![]);
        assert!(matches!(
            describe(&table),
            Err(PenguinError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_describe_year_mean_in_range() {
        let summaries = describe(&builtin()).unwrap();
        if let ColumnStats::Numeric(n) = &summaries[7].stats {
            assert!(n.mean >= 2007.0 && n.mean <= 2009.0);
            assert_approx_eq!(n.min, 2007.0);
            assert_approx_eq!(n.max, 2009.0);
        } else {
            panic!("year column should be numeric");
        }
    }

    #[test]
    fn test_format_describe_contains_stats_and_columns() {
        let summaries = describe(&builtin()).unwrap();
        let text = format_describe(&summaries);
        for stat in STAT_ROWS {
            assert!(text.contains(stat), "missing stat row {stat}");
        }
        assert!(text.contains("bill_length_mm"));
        assert!(text.contains("body_mass_g"));
        // Categorical columns carry NaN in numeric stat rows
        assert!(text.contains("NaN"));
    }
}

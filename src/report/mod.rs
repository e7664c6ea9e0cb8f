use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::analysis::{describe, format_describe, CrossTab, PivotTable};
use crate::charts::{render_all, CHART_SPECS};
use crate::dataset::PenguinTable;
use crate::error::PenguinError;

/// Fixed output directory, relative to the working directory.
pub const OUTPUT_DIR: &str = "analysis_output";
pub const IMAGES_SUBDIR: &str = "images";
pub const REPORT_FILE: &str = "penguins_analysis.md";
pub const CROSSTAB_FILE: &str = "crosstab_species_island.csv";
pub const PIVOT_FILE: &str = "pivot_bodymass_species_sex.csv";

/// Fixed on-disk layout of one report run.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    pub root: PathBuf,
    pub images_dir: PathBuf,
    pub report_path: PathBuf,
    pub crosstab_csv: PathBuf,
    pub pivot_csv: PathBuf,
}

impl OutputLayout {
    pub fn new(base: impl AsRef<Path>) -> Self {
        let root = base.as_ref().to_path_buf();
        Self {
            images_dir: root.join(IMAGES_SUBDIR),
            report_path: root.join(REPORT_FILE),
            crosstab_csv: root.join(CROSSTAB_FILE),
            pivot_csv: root.join(PIVOT_FILE),
            root,
        }
    }

    /// Create the output and images directories if absent.
    pub fn create_dirs(&self) -> Result<(), PenguinError> {
        fs::create_dir_all(&self.images_dir)?;
        Ok(())
    }
}

/// Paths produced by a successful run.
#[derive(Debug, Clone)]
pub struct ReportArtifacts {
    pub layout: OutputLayout,
    pub images: Vec<PathBuf>,
}

/// Run the whole pipeline against an already-filtered table: summary,
/// twelve charts, both aggregate tables, markdown report, CSV exports.
pub fn generate(
    table: &PenguinTable,
    base: impl AsRef<Path>,
) -> Result<ReportArtifacts, PenguinError> {
    let layout = OutputLayout::new(base);
    layout.create_dirs()?;

    info!(records = table.len(), "computing summary statistics");
    let summaries = describe(table)?;
    let summary_text = format_describe(&summaries);

    info!("rendering {} charts", CHART_SPECS.len());
    let images = render_all(table, &layout.images_dir)?;

    let crosstab = CrossTab::species_by_island(table)?;
    let pivot = PivotTable::mean_body_mass_by_species_sex(table)?;

    info!(path = %layout.report_path.display(), "writing report");
    write_markdown(&layout.report_path, &summary_text, &crosstab, &pivot)?;
    crosstab.write_csv(&layout.crosstab_csv)?;
    pivot.write_csv(&layout.pivot_csv)?;

    Ok(ReportArtifacts { layout, images })
}

/// Write the markdown document. Image references are relative to the
/// report's own directory, not the process working directory.
fn write_markdown(
    path: &Path,
    summary_text: &str,
    crosstab: &CrossTab,
    pivot: &PivotTable,
) -> Result<(), PenguinError> {
    let mut doc = String::new();

    doc.push_str("# Penguins 데이터셋 분석\n\n");
    doc.push_str("데이터셋 요약 (결측값 제거 후):\n\n");
    doc.push_str("```\n");
    doc.push_str(summary_text.trim_end());
    doc.push_str("\n```\n\n");

    doc.push_str("## 생성된 그래프\n");
    for spec in &CHART_SPECS {
        doc.push_str(&format!("### {}\n", spec.title));
        doc.push_str(&format!("![]({}/{})\n\n", IMAGES_SUBDIR, spec.file_name));
    }

    doc.push_str("## 막대그래프 관련 교차표 및 피봇테이블\n\n");
    doc.push_str("### 종(species) vs 섬(island) 교차표\n\n");
    doc.push_str(&crosstab.to_markdown());
    doc.push('\n');
    doc.push_str("### 종(species) x 성별(sex) 평균 body_mass_pivot\n\n");
    doc.push_str(&pivot.to_markdown());
    doc.push('\n');

    fs::write(path, doc)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Island, Penguin, Sex, Species};

    fn penguin(species: Species, sex: Sex, mass: f64, flipper: f64) -> Penguin {
        Penguin {
            species,
            island: Island::Dream,
            bill_length_mm: 40.0 + mass / 1000.0,
            bill_depth_mm: 18.0,
            flipper_length_mm: flipper,
            body_mass_g: mass,
            sex,
            year: 2008,
        }
    }

    #[test]
    fn test_output_layout_paths() {
        let layout = OutputLayout::new("analysis_output");
        assert_eq!(layout.root, PathBuf::from("analysis_output"));
        assert_eq!(layout.images_dir, PathBuf::from("analysis_output/images"));
        assert_eq!(
            layout.report_path,
            PathBuf::from("analysis_output/penguins_analysis.md")
        );
        assert_eq!(
            layout.crosstab_csv,
            PathBuf::from("analysis_output/crosstab_species_island.csv")
        );
        assert_eq!(
            layout.pivot_csv,
            PathBuf::from("analysis_output/pivot_bodymass_species_sex.csv")
        );
    }

    #[test]
    fn test_generate_empty_table_fails_before_writing_report() {
        let dir = tempfile::tempdir().unwrap();
        let table = PenguinTable::from_records(vec![]);
        assert!(generate(&table, dir.path()).is_err());
        assert!(!dir.path().join(REPORT_FILE).exists());
    }

    #[test]
    fn test_write_markdown_structure() {
        let dir = tempfile::tempdir().unwrap();
        let table = PenguinTable::from_records(vec![
            penguin(Species::Adelie, Sex::Male, 4000.0, 190.0),
            penguin(Species::Adelie, Sex::Female, 3500.0, 185.0),
            penguin(Species::Gentoo, Sex::Male, 5200.0, 218.0),
            penguin(Species::Gentoo, Sex::Female, 4700.0, 212.0),
        ]);
        let crosstab = CrossTab::species_by_island(&table).unwrap();
        let pivot = PivotTable::mean_body_mass_by_species_sex(&table).unwrap();
        let path = dir.path().join("report.md");

        write_markdown(&path, "summary text", &crosstab, &pivot).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        assert!(content.starts_with("# Penguins 데이터셋 분석"));
        assert!(content.contains("```\nsummary text\n```"));
        assert!(content.contains("## 생성된 그래프"));
        assert!(content.contains("## 막대그래프 관련 교차표 및 피봇테이블"));
        // Exactly twelve relative image references
        assert_eq!(content.matches("![](images/").count(), 12);
        for spec in &CHART_SPECS {
            assert!(content.contains(spec.file_name));
            assert!(content.contains(&format!("### {}", spec.title)));
        }
    }
}

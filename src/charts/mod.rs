mod bars;
mod distribution;
mod heatmap;
mod scatter;

use std::path::{Path, PathBuf};

use plotters::style::RGBColor;
use tracing::debug;

use crate::dataset::PenguinTable;
use crate::error::PenguinError;

/// Internal result type for drawing routines; plotters errors are
/// generic over the backend, so they are boxed here and folded into
/// `PenguinError::Render` at the dispatch boundary.
pub(crate) type DrawResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub(crate) const CHART_SIZE: (u32, u32) = (800, 600);

pub(crate) const TEAL: RGBColor = RGBColor(0, 128, 128);
pub(crate) const ORANGE: RGBColor = RGBColor(255, 165, 0);

/// Categorical series palette (matplotlib tab10 order).
pub(crate) const SERIES_PALETTE: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

pub(crate) fn series_color(i: usize) -> RGBColor {
    SERIES_PALETTE[i % SERIES_PALETTE.len()]
}

/// Label formatter for category axes where category `i` is centered at
/// coordinate `i` on an f64 axis.
pub(crate) fn category_label_formatter(names: Vec<String>) -> impl Fn(&f64) -> String {
    move |x: &f64| {
        let i = x.round();
        if (x - i).abs() > 1e-6 || i < 0.0 {
            return String::new();
        }
        names.get(i as usize).cloned().unwrap_or_default()
    }
}

/// The twelve chart kinds in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    HistFlipperLength,
    HistBodyMass,
    ScatterBill,
    PairGrid,
    BoxBodyMassBySpecies,
    ViolinFlipperBySpecies,
    CountSpecies,
    BarMeanBodyMassBySpecies,
    StackedIslandSpecies,
    HeatmapCorrelation,
    SwarmBillLengthSpeciesSex,
    KdeBodyMassBySpecies,
}

/// Declarative description of one chart: report section title,
/// on-chart caption, output file name, and the renderer to dispatch to.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec {
    /// Report section heading
    pub title: &'static str,
    /// Caption drawn on the image
    pub caption: &'static str,
    /// File name under the images directory
    pub file_name: &'static str,
    pub kind: ChartKind,
}

/// The fixed chart list, in report order.
pub const CHART_SPECS: [ChartSpec; 12] = [
    ChartSpec {
        title: "히스토그램: 지느러미 길이",
        caption: "지느러미 길이 (mm)",
        file_name: "hist_flipper_length.png",
        kind: ChartKind::HistFlipperLength,
    },
    ChartSpec {
        title: "히스토그램: 체중",
        caption: "체중 (g)",
        file_name: "hist_body_mass.png",
        kind: ChartKind::HistBodyMass,
    },
    ChartSpec {
        title: "산점도: 부리 길이 vs 부리 깊이",
        caption: "부리 길이 vs 부리 깊이",
        file_name: "scatter_bill.png",
        kind: ChartKind::ScatterBill,
    },
    ChartSpec {
        title: "변수들 간 관계 (Pairplot)",
        caption: "변수들 간 관계",
        file_name: "pairplot.png",
        kind: ChartKind::PairGrid,
    },
    ChartSpec {
        title: "상자그림: 종별 체중 분포",
        caption: "종별 체중 분포",
        file_name: "box_body_mass_by_species.png",
        kind: ChartKind::BoxBodyMassBySpecies,
    },
    ChartSpec {
        title: "바이올린플롯: 종별 지느러미 길이 분포",
        caption: "종별 지느러미 길이 분포",
        file_name: "violin_flipper_by_species.png",
        kind: ChartKind::ViolinFlipperBySpecies,
    },
    ChartSpec {
        title: "막대(갯수): 종별 개체수",
        caption: "종별 개체수",
        file_name: "count_species.png",
        kind: ChartKind::CountSpecies,
    },
    ChartSpec {
        title: "막대: 종별 평균 체중",
        caption: "종별 평균 체중",
        file_name: "bar_mean_body_mass_by_species.png",
        kind: ChartKind::BarMeanBodyMassBySpecies,
    },
    ChartSpec {
        title: "누적막대: 섬별 종 개수",
        caption: "섬별 종 개수",
        file_name: "stacked_island_species.png",
        kind: ChartKind::StackedIslandSpecies,
    },
    ChartSpec {
        title: "히트맵: 상관계수 행렬",
        caption: "상관계수 행렬",
        file_name: "heatmap_corr.png",
        kind: ChartKind::HeatmapCorrelation,
    },
    ChartSpec {
        title: "스웜플롯: 종별/성별 부리 길이",
        caption: "종별/성별 부리 길이",
        file_name: "swarm_bill_length_species_sex.png",
        kind: ChartKind::SwarmBillLengthSpeciesSex,
    },
    ChartSpec {
        title: "KDE: 종별 체중",
        caption: "종별 체중 KDE",
        file_name: "kde_body_mass_by_species.png",
        kind: ChartKind::KdeBodyMassBySpecies,
    },
];

/// Render one chart to `images_dir/<file_name>` and return the path.
///
/// Each render owns its drawing surface for the duration of the call;
/// nothing is shared between charts.
pub fn render_chart(
    spec: &ChartSpec,
    table: &PenguinTable,
    images_dir: &Path,
) -> Result<PathBuf, PenguinError> {
    if table.is_empty() {
        return Err(PenguinError::InsufficientData(format!(
            "Cannot render '{}' from an empty table",
            spec.file_name
        )));
    }

    let path = images_dir.join(spec.file_name);
    let result = match spec.kind {
        ChartKind::HistFlipperLength => distribution::histogram_chart(
            table,
            &path,
            spec.caption,
            crate::dataset::NumericColumn::FlipperLength,
            TEAL,
        ),
        ChartKind::HistBodyMass => distribution::histogram_chart(
            table,
            &path,
            spec.caption,
            crate::dataset::NumericColumn::BodyMass,
            ORANGE,
        ),
        ChartKind::ScatterBill => scatter::bill_scatter(table, &path, spec.caption),
        ChartKind::PairGrid => scatter::pair_grid(table, &path, spec.caption),
        ChartKind::BoxBodyMassBySpecies => distribution::box_by_species(table, &path, spec.caption),
        ChartKind::ViolinFlipperBySpecies => {
            distribution::violin_by_species(table, &path, spec.caption)
        }
        ChartKind::CountSpecies => bars::species_counts(table, &path, spec.caption),
        ChartKind::BarMeanBodyMassBySpecies => bars::mean_body_mass(table, &path, spec.caption),
        ChartKind::StackedIslandSpecies => bars::stacked_island_species(table, &path, spec.caption),
        ChartKind::HeatmapCorrelation => heatmap::correlation(table, &path, spec.caption),
        ChartKind::SwarmBillLengthSpeciesSex => scatter::swarm_bill(table, &path, spec.caption),
        ChartKind::KdeBodyMassBySpecies => distribution::kde_by_species(table, &path, spec.caption),
    };

    result.map_err(|e| PenguinError::Render(format!("{}: {e}", spec.file_name)))?;
    Ok(path)
}

/// Render all twelve charts in order. The first failure aborts the run.
pub fn render_all(
    table: &PenguinTable,
    images_dir: &Path,
) -> Result<Vec<PathBuf>, PenguinError> {
    let mut paths = Vec::with_capacity(CHART_SPECS.len());
    for spec in &CHART_SPECS {
        debug!(file = spec.file_name, "rendering chart");
        paths.push(render_chart(spec, table, images_dir)?);
    }
    Ok(paths)
}

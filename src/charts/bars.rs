use std::path::Path;

use plotters::prelude::*;

use crate::analysis::{mean, std_dev, CrossTab};
use crate::dataset::{NumericColumn, PenguinTable};

use super::{category_label_formatter, series_color, DrawResult, CHART_SIZE};

/// Count bar chart of species frequency.
pub(crate) fn species_counts(table: &PenguinTable, path: &Path, caption: &str) -> DrawResult {
    let species = table.species_present();
    let n = species.len();
    let names: Vec<String> = species.iter().map(|s| s.to_string()).collect();
    let counts: Vec<usize> = species.iter().map(|sp| table.species_count(*sp)).collect();
    let y_hi = counts.iter().copied().max().unwrap_or(1) as f64 * 1.1;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let fmt = category_label_formatter(names);
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&fmt)
        .x_desc("species")
        .y_desc("count")
        .draw()?;

    for (i, &count) in counts.iter().enumerate() {
        let x = i as f64;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - 0.3, 0.0), (x + 0.3, count as f64)],
            series_color(i).mix(0.6).filled(),
        )))?;
    }

    root.present()?;
    Ok(())
}

/// Bar chart of mean body mass per species with ±1 standard deviation
/// error bars.
pub(crate) fn mean_body_mass(table: &PenguinTable, path: &Path, caption: &str) -> DrawResult {
    let species = table.species_present();
    let n = species.len();
    let names: Vec<String> = species.iter().map(|s| s.to_string()).collect();

    let stats: Vec<(f64, f64)> = species
        .iter()
        .map(|sp| {
            let values = table.numeric_for_species(NumericColumn::BodyMass, *sp);
            (mean(&values), std_dev(&values))
        })
        .collect();

    let y_hi = stats
        .iter()
        .map(|(m, s)| if s.is_nan() { *m } else { m + s })
        .fold(0.0f64, f64::max)
        * 1.15;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let fmt = category_label_formatter(names);
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&fmt)
        .x_desc("species")
        .y_desc("body_mass_g")
        .draw()?;

    for (i, &(m, sd)) in stats.iter().enumerate() {
        let x = i as f64;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - 0.3, 0.0), (x + 0.3, m)],
            series_color(i).mix(0.7).filled(),
        )))?;
        // A single-record group has no sample deviation; skip its whisker
        if !sd.is_nan() {
            chart.draw_series(std::iter::once(ErrorBar::new_vertical(
                x,
                m - sd,
                m,
                m + sd,
                BLACK.filled(),
                12,
            )))?;
        }
    }

    root.present()?;
    Ok(())
}

/// Stacked bar chart of species counts per island.
pub(crate) fn stacked_island_species(
    table: &PenguinTable,
    path: &Path,
    caption: &str,
) -> DrawResult {
    let crosstab = CrossTab::island_by_species(table)?;
    let n = crosstab.row_names.len();

    let y_hi = crosstab
        .row_sums()
        .into_iter()
        .max()
        .unwrap_or(1)
        .max(1) as f64
        * 1.1;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let fmt = category_label_formatter(crosstab.row_names.clone());
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&fmt)
        .x_desc("island")
        .y_desc("count")
        .draw()?;

    for (c, species_name) in crosstab.col_names.iter().enumerate() {
        let color = series_color(c);
        let segments: Vec<(f64, f64, f64)> = (0..n)
            .filter_map(|r| {
                let below: u64 = (0..c).map(|k| crosstab.cell(r, k)).sum();
                let count = crosstab.cell(r, c);
                if count == 0 {
                    None
                } else {
                    Some((r as f64, below as f64, (below + count) as f64))
                }
            })
            .collect();

        chart
            .draw_series(segments.into_iter().map(|(x, lo, hi)| {
                Rectangle::new([(x - 0.3, lo), (x + 0.3, hi)], color.filled())
            }))?
            .label(species_name.clone())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 4), (x + 12, y + 4)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

use std::path::Path;

use plotters::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::analysis::histogram;
use crate::dataset::{NumericColumn, PenguinTable, Sex};

use super::{category_label_formatter, series_color, DrawResult, CHART_SIZE};

fn padded_range(values: &[f64]) -> (f64, f64) {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let pad = ((hi - lo) * 0.05).max(0.5);
    (lo - pad, hi + pad)
}

/// Scatter of bill length vs. bill depth, colored by species.
pub(crate) fn bill_scatter(table: &PenguinTable, path: &Path, caption: &str) -> DrawResult {
    let (x_lo, x_hi) = padded_range(&table.numeric(NumericColumn::BillLength));
    let (y_lo, y_hi) = padded_range(&table.numeric(NumericColumn::BillDepth));

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("bill_length_mm")
        .y_desc("bill_depth_mm")
        .draw()?;

    for (i, sp) in table.species_present().into_iter().enumerate() {
        let color = series_color(i);
        chart
            .draw_series(
                table
                    .records()
                    .iter()
                    .filter(|p| p.species == sp)
                    .map(|p| Circle::new((p.bill_length_mm, p.bill_depth_mm), 4, color.filled())),
            )?
            .label(sp.to_string())
            .legend(move |(x, y)| Circle::new((x + 6, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Pairwise grid over the four measurement columns: scatter panels off
/// the diagonal, per-species histograms on it, colored by species.
pub(crate) fn pair_grid(table: &PenguinTable, path: &Path, caption: &str) -> DrawResult {
    let columns = NumericColumn::MEASUREMENTS;
    let k = columns.len();
    let species = table.species_present();

    let root = BitMapBackend::new(path, (1200, 1200)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(caption, ("sans-serif", 30))?;
    let cells = root.split_evenly((k, k));

    for (idx, cell) in cells.iter().enumerate() {
        let row = idx / k;
        let col = idx % k;
        let x_col = columns[col];
        let y_col = columns[row];

        let (x_lo, x_hi) = padded_range(&table.numeric(x_col));

        if row == col {
            // Diagonal panel: overlaid per-species histograms of the column
            let mut species_bins = Vec::with_capacity(species.len());
            for sp in &species {
                let values = table.numeric_for_species(x_col, *sp);
                species_bins.push(histogram(&values, 10)?);
            }
            let y_hi = species_bins
                .iter()
                .map(|b| b.max_count())
                .max()
                .unwrap_or(1) as f64
                * 1.05;

            let mut chart = ChartBuilder::on(cell)
                .margin(8)
                .x_label_area_size(if row == k - 1 { 30 } else { 15 })
                .y_label_area_size(if col == 0 { 40 } else { 20 })
                .build_cartesian_2d(x_lo..x_hi, 0.0..y_hi)?;

            let mut mesh = chart.configure_mesh();
            mesh.disable_x_mesh()
                .disable_y_mesh()
                .x_labels(4)
                .y_labels(4)
                .label_style(("sans-serif", 10));
            if row == k - 1 {
                mesh.x_desc(x_col.label());
            }
            if col == 0 {
                mesh.y_desc(y_col.label());
            }
            mesh.draw()?;

            for (i, bins) in species_bins.iter().enumerate() {
                let color = series_color(i);
                chart.draw_series(bins.counts.iter().enumerate().map(|(b, &count)| {
                    Rectangle::new(
                        [(bins.edges[b], 0.0), (bins.edges[b + 1], count as f64)],
                        color.mix(0.5).filled(),
                    )
                }))?;
            }
        } else {
            let (y_lo, y_hi) = padded_range(&table.numeric(y_col));

            let mut chart = ChartBuilder::on(cell)
                .margin(8)
                .x_label_area_size(if row == k - 1 { 30 } else { 15 })
                .y_label_area_size(if col == 0 { 40 } else { 20 })
                .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

            let mut mesh = chart.configure_mesh();
            mesh.disable_x_mesh()
                .disable_y_mesh()
                .x_labels(4)
                .y_labels(4)
                .label_style(("sans-serif", 10));
            if row == k - 1 {
                mesh.x_desc(x_col.label());
            }
            if col == 0 {
                mesh.y_desc(y_col.label());
            }
            mesh.draw()?;

            for (i, sp) in species.iter().enumerate() {
                let color = series_color(i);
                chart.draw_series(
                    table
                        .records()
                        .iter()
                        .filter(|p| p.species == *sp)
                        .map(|p| Circle::new((x_col.value(p), y_col.value(p)), 2, color.filled())),
                )?;
            }
        }
    }

    root.present()?;
    Ok(())
}

/// Swarm-style jittered scatter of bill length by species, dodged by
/// sex. Jitter is seeded so repeated runs draw the same points.
pub(crate) fn swarm_bill(table: &PenguinTable, path: &Path, caption: &str) -> DrawResult {
    let species = table.species_present();
    let n = species.len();
    let names: Vec<String> = species.iter().map(|s| s.to_string()).collect();

    let (y_lo, y_hi) = padded_range(&table.numeric(NumericColumn::BillLength));

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let fmt = category_label_formatter(names);
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&fmt)
        .x_desc("species")
        .y_desc("bill_length_mm")
        .draw()?;

    let mut rng = StdRng::seed_from_u64(7);
    for (si, sex) in table.sexes_present().into_iter().enumerate() {
        let dodge = if sex == Sex::Female { -0.2 } else { 0.2 };
        let color = series_color(si);

        let mut points: Vec<(f64, f64)> = Vec::new();
        for (ci, sp) in species.iter().enumerate() {
            for p in table
                .records()
                .iter()
                .filter(|p| p.species == *sp && p.sex == sex)
            {
                let jitter: f64 = rng.gen_range(-0.08..0.08);
                points.push((ci as f64 + dodge + jitter, p.bill_length_mm));
            }
        }

        chart
            .draw_series(
                points
                    .into_iter()
                    .map(|pt| Circle::new(pt, 3, color.filled())),
            )?
            .label(sex.to_string())
            .legend(move |(x, y)| Circle::new((x + 6, y), 3, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

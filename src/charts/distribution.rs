use std::path::Path;

use plotters::prelude::*;

use crate::analysis::{histogram, kde_curve};
use crate::dataset::{NumericColumn, PenguinTable};

use super::{category_label_formatter, series_color, DrawResult, CHART_SIZE};

/// Fixed bin count for the two single-column histograms.
const HIST_BINS: usize = 20;

/// Histogram of one numeric column.
pub(crate) fn histogram_chart(
    table: &PenguinTable,
    path: &Path,
    caption: &str,
    column: NumericColumn,
    color: RGBColor,
) -> DrawResult {
    let values = table.numeric(column);
    let bins = histogram(&values, HIST_BINS)?;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let x_lo = bins.edges[0];
    let x_hi = bins.edges[bins.counts.len()];
    let y_hi = (bins.max_count() as f64 * 1.05).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_lo..x_hi, 0.0..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(column.label())
        .y_desc("count")
        .draw()?;

    chart.draw_series(bins.counts.iter().enumerate().map(|(i, &count)| {
        Rectangle::new(
            [(bins.edges[i], 0.0), (bins.edges[i + 1], count as f64)],
            color.filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// Overlaid filled density curves of body mass, one per species.
pub(crate) fn kde_by_species(table: &PenguinTable, path: &Path, caption: &str) -> DrawResult {
    let species = table.species_present();
    let mut curves = Vec::with_capacity(species.len());
    for sp in &species {
        let values = table.numeric_for_species(NumericColumn::BodyMass, *sp);
        curves.push((*sp, kde_curve(&values, 200)?));
    }

    let x_lo = curves
        .iter()
        .flat_map(|(_, c)| c.iter().map(|(x, _)| *x))
        .fold(f64::INFINITY, f64::min);
    let x_hi = curves
        .iter()
        .flat_map(|(_, c)| c.iter().map(|(x, _)| *x))
        .fold(f64::NEG_INFINITY, f64::max);
    let y_hi = curves
        .iter()
        .flat_map(|(_, c)| c.iter().map(|(_, d)| *d))
        .fold(0.0f64, f64::max)
        * 1.1;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, 0.0..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("body_mass_g")
        .y_desc("density")
        .draw()?;

    for (i, (sp, curve)) in curves.iter().enumerate() {
        let color = series_color(i);
        chart
            .draw_series(
                AreaSeries::new(curve.iter().copied(), 0.0, color.mix(0.35))
                    .border_style(color.stroke_width(2)),
            )?
            .label(sp.to_string())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 4), (x + 12, y + 4)], color.mix(0.6).filled())
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

/// Box plot of body mass grouped by species.
pub(crate) fn box_by_species(table: &PenguinTable, path: &Path, caption: &str) -> DrawResult {
    let species = table.species_present();
    let n = species.len();
    let names: Vec<String> = species.iter().map(|s| s.to_string()).collect();

    let masses = table.numeric(NumericColumn::BodyMass);
    let y_lo = masses.iter().copied().fold(f64::INFINITY, f64::min) * 0.95;
    let y_hi = masses.iter().copied().fold(f64::NEG_INFINITY, f64::max) * 1.05;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let fmt = category_label_formatter(names);
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), (y_lo as f32)..(y_hi as f32))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&fmt)
        .x_desc("species")
        .y_desc("body_mass_g")
        .draw()?;

    for (i, sp) in species.iter().enumerate() {
        let values = table.numeric_for_species(NumericColumn::BodyMass, *sp);
        let quartiles = Quartiles::new(&values);
        chart.draw_series(std::iter::once(
            Boxplot::new_vertical(i as f64, &quartiles)
                .width(40)
                .whisker_width(0.5)
                .style(series_color(i)),
        ))?;
    }

    root.present()?;
    Ok(())
}

/// Violin plot of flipper length grouped by species; each violin is the
/// species' density curve mirrored around the category center.
pub(crate) fn violin_by_species(table: &PenguinTable, path: &Path, caption: &str) -> DrawResult {
    let species = table.species_present();
    let n = species.len();
    let names: Vec<String> = species.iter().map(|s| s.to_string()).collect();

    let mut curves = Vec::with_capacity(n);
    for sp in &species {
        let values = table.numeric_for_species(NumericColumn::FlipperLength, *sp);
        curves.push(kde_curve(&values, 120)?);
    }

    let y_lo = curves
        .iter()
        .flat_map(|c| c.iter().map(|(v, _)| *v))
        .fold(f64::INFINITY, f64::min);
    let y_hi = curves
        .iter()
        .flat_map(|c| c.iter().map(|(v, _)| *v))
        .fold(f64::NEG_INFINITY, f64::max);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let fmt = category_label_formatter(names);
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&fmt)
        .x_desc("species")
        .y_desc("flipper_length_mm")
        .draw()?;

    for (i, curve) in curves.iter().enumerate() {
        let peak = curve.iter().map(|(_, d)| *d).fold(0.0f64, f64::max);
        if peak <= 0.0 {
            continue;
        }
        // Violins share a fixed half-width; densities are normalized per species
        let scale = 0.4 / peak;
        let center = i as f64;

        let mut points: Vec<(f64, f64)> = curve
            .iter()
            .map(|(v, d)| (center - d * scale, *v))
            .collect();
        points.extend(curve.iter().rev().map(|(v, d)| (center + d * scale, *v)));

        chart.draw_series(std::iter::once(Polygon::new(
            points,
            series_color(i).mix(0.5).filled(),
        )))?;
    }

    root.present()?;
    Ok(())
}

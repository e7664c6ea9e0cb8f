use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::analysis::correlation_matrix;
use crate::dataset::PenguinTable;

use super::{category_label_formatter, DrawResult};

/// Diverging fill for a correlation in [-1, 1]: blue through white to red.
fn correlation_color(v: f64) -> RGBColor {
    if v.is_nan() {
        return RGBColor(200, 200, 200);
    }
    let t = v.clamp(-1.0, 1.0);
    let lerp = |a: u8, b: u8, f: f64| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
    if t < 0.0 {
        let f = -t;
        RGBColor(
            lerp(255, 59, f),
            lerp(255, 76, f),
            lerp(255, 192, f),
        )
    } else {
        RGBColor(
            lerp(255, 180, t),
            lerp(255, 4, t),
            lerp(255, 38, t),
        )
    }
}

/// Heatmap of the pairwise correlation matrix over all numeric columns,
/// annotated to two decimal places.
pub(crate) fn correlation(table: &PenguinTable, path: &Path, caption: &str) -> DrawResult {
    let corr = correlation_matrix(table)?;
    let k = corr.labels.len();
    let labels: Vec<String> = corr.labels.iter().map(|l| l.to_string()).collect();

    let root = BitMapBackend::new(path, (760, 640)).into_drawing_area();
    root.fill(&WHITE)?;

    let fmt = category_label_formatter(labels);
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(120)
        .build_cartesian_2d(-0.5..(k as f64 - 0.5), -0.5..(k as f64 - 0.5))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(k)
        .y_labels(k)
        .x_label_formatter(&fmt)
        .y_label_formatter(&fmt)
        .label_style(("sans-serif", 12))
        .draw()?;

    for i in 0..k {
        for j in 0..k {
            let v = corr.values[i][j];
            let x = j as f64;
            let y = i as f64;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                correlation_color(v).filled(),
            )))?;

            let text = if v.is_nan() {
                "NaN".to_string()
            } else {
                format!("{v:.2}")
            };
            let text_color = if v.abs() > 0.6 { WHITE } else { BLACK };
            let style = ("sans-serif", 14)
                .into_font()
                .color(&text_color)
                .pos(Pos::new(HPos::Center, VPos::Center));
            chart.draw_series(std::iter::once(Text::new(text, (x, y), style)))?;
        }
    }

    root.present()?;
    Ok(())
}

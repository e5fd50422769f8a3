//! 2x2 comparison figure rendered with plotters.

use std::error::Error;
use std::path::Path;

use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use super::Panel;

pub const FIGURE_SIZE: (u32, u32) = (1200, 1000);

/// Draw every panel into one PNG at `path`, overwriting an existing file.
pub fn render_comparison(path: &Path, panels: &[Panel]) -> Result<()> {
    draw_figure(path, panels).map_err(|e| anyhow!("rendering {}: {}", path.display(), e))?;
    debug!(path = %path.display(), panels = panels.len(), "figure written");
    Ok(())
}

fn draw_figure(path: &Path, panels: &[Panel]) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let cells = root.split_evenly((2, 2));

    for (cell, panel) in cells.iter().zip(panels) {
        draw_panel(cell, panel)?;
    }

    root.present()?;
    Ok(())
}

fn draw_panel(area: &DrawingArea<BitMapBackend<'_>, Shift>, panel: &Panel) -> Result<(), Box<dyn Error>> {
    let label = panel.quantity.label();
    let x_range = panel.x_range.clone();
    let y_range = panel.y_range.clone();

    if panel.quantity.log_scale() {
        let mut chart = ChartBuilder::on(area)
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, y_range.log_scale())?;

        chart
            .configure_mesh()
            .x_desc("x")
            .y_desc(label)
            .y_label_formatter(&|v| format!("{:.0e}", v))
            .draw()?;

        overlay(&mut chart, panel)?;
    } else {
        let mut chart = ChartBuilder::on(area)
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .x_desc("x")
            .y_desc(label)
            .draw()?;

        overlay(&mut chart, panel)?;
    }
    Ok(())
}

/// Analytic solution as a line, extracted profile as red `+` markers.
fn overlay<X, Y>(
    chart: &mut ChartContext<'_, BitMapBackend<'_>, Cartesian2d<X, Y>>,
    panel: &Panel,
) -> Result<(), Box<dyn Error>>
where
    X: Ranged<ValueType = f64>,
    Y: Ranged<ValueType = f64>,
{
    chart.draw_series(LineSeries::new(panel.analytic.iter().copied(), &BLUE))?;

    chart.draw_series(PointSeries::of_element(
        panel.profile.iter().copied(),
        4,
        &RED,
        &|c: (f64, f64), s: i32, st: ShapeStyle| {
            EmptyElement::at(c)
                + PathElement::new(vec![(-s, 0), (s, 0)], st)
                + PathElement::new(vec![(0, -s), (0, s)], st)
        },
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::build_panels;
    use crate::table::Table;
    use std::fs;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn panels() -> Vec<Panel> {
        let analytic = Table::parse(
            "0 0.00 1.0 1.2 0.6 0.0\n1 0.10 1.4 1.3 0.8 0.35\n2 0.30 1.0 0.3 0.1 0.25\n",
            Path::new("analytic.dat"),
        )
        .unwrap();
        let profile = Table::parse(
            "0.05 1.2 0.2 0.7 1.25\n0.20 3.0 0.9 1.7 1.33\n",
            Path::new("profile.out"),
        )
        .unwrap();
        build_panels(&analytic, &profile, 0.0..0.4).unwrap()
    }

    // Text layout goes through the system font loader; hosts without any font cannot render labels.
    fn font_unavailable(err: &anyhow::Error, path: &Path) -> bool {
        let message = err.to_string().replace(&*path.to_string_lossy(), "");
        message.to_lowercase().contains("font")
    }

    #[test]
    fn test_render_writes_png_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sedov_2d_cyl_in_cart.png");
        fs::write(&path, b"stale").unwrap();

        for _ in 0..2 {
            match render_comparison(&path, &panels()) {
                Ok(()) => {
                    let bytes = fs::read(&path).unwrap();
                    assert!(bytes.len() > PNG_MAGIC.len());
                    assert_eq!(&bytes[..PNG_MAGIC.len()], PNG_MAGIC);
                }
                Err(e) if font_unavailable(&e, &path) => {
                    eprintln!("skipping figure check: {:#}", e);
                    return;
                }
                Err(e) => panic!("render failed: {:#}", e),
            }
        }
    }

    #[test]
    fn test_render_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/fig.png");
        assert!(render_comparison(&path, &panels()).is_err());
    }
}

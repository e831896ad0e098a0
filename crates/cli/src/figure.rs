//! SVG chart of a ranked result: one stroked path per polyline, in rank order.

use anyhow::{Context, Result};
use polycraft::ResultSet;
use std::path::Path;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Group, Path as SvgPath};
use svg::Document;

const PALETTE: [&str; 8] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#17becf",
];

/// Builds the chart. The y axis points up; lattice units map 1:1 to user units.
pub fn render(set: &ResultSet) -> Document {
    let pts = set.iter().flat_map(|p| p.points.iter());
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (0i64, 0i64, 1i64, 1i64);
    for (i, p) in pts.enumerate() {
        if i == 0 {
            (min_x, min_y, max_x, max_y) = (p.x, p.y, p.x, p.y);
        }
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let pad = 1.0;
    let width = max_x as f64 - min_x as f64 + 2.0 * pad;
    let height = max_y as f64 - min_y as f64 + 2.0 * pad;
    let stroke_width = width.max(height) / 256.0;

    // Flip y so the chart reads like a plot.
    let mut document = Document::new().set(
        "viewBox",
        (min_x as f64 - pad, -(max_y as f64) - pad, width, height),
    );

    for (rank, line) in set.iter().enumerate() {
        let color = PALETTE[rank % PALETTE.len()];
        let mut data = Data::new();
        for (i, p) in line.points.iter().enumerate() {
            let at = (p.x as f64, -(p.y as f64));
            data = if i == 0 { data.move_to(at) } else { data.line_to(at) };
        }
        if line.closed {
            data = data.close();
        }
        let path = SvgPath::new()
            .set("stroke", color)
            .set("stroke-width", stroke_width)
            .set("stroke-linecap", "round")
            .set("stroke-linejoin", "round")
            .set("fill", "none")
            .set("d", data);
        let mut group = Group::new()
            .set("id", format!("polyline-{rank}"))
            .set("data-length", line.length)
            .add(path);
        if let Some(start) = line.points.first() {
            group = group.add(
                Circle::new()
                    .set("cx", start.x as f64)
                    .set("cy", -(start.y as f64))
                    .set("r", stroke_width * 2.0)
                    .set("fill", color),
            );
        }
        document = document.add(group);
    }
    document
}

pub fn write_svg(set: &ResultSet, out: &Path) -> Result<()> {
    let document = render(set);
    svg::save(out, &document).with_context(|| format!("writing {}", out.display()))?;
    tracing::info!(path = %out.display(), series = set.len(), "figure");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polycraft::api::{craft, DecomposeCfg, Segment};
    use tempfile::tempdir;

    #[test]
    fn one_group_per_polyline() {
        let segs: Vec<Segment> = [(0, 0, 1, 0), (1, 0, 0, 1), (0, 1, 0, 0), (5, 5, 7, 5)]
            .into_iter()
            .map(Segment::from)
            .collect();
        let set = craft(&segs, DecomposeCfg::default()).unwrap();
        let text = render(&set).to_string();
        assert!(text.contains("polyline-0"));
        assert!(text.contains("polyline-1"));
        assert!(!text.contains("polyline-2"));
        assert!(text.contains("viewBox"));
    }

    #[test]
    fn extreme_coordinates_render() {
        let segs = vec![Segment::from((i64::MIN, 0, i64::MAX, 0))];
        let set = craft(&segs, DecomposeCfg::default()).unwrap();
        let text = render(&set).to_string();
        assert!(text.contains("polyline-0"));
        assert!(!text.contains("NaN") && !text.contains("inf"));
    }

    #[test]
    fn empty_result_still_renders() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("empty.svg");
        write_svg(&ResultSet::default(), &out).unwrap();
        assert!(std::fs::read_to_string(out).unwrap().starts_with("<svg"));
    }
}

//! Per-frame SVG emission. Rendering reads shared immutable state only and
//! produces a self-contained document string, so the same time key always
//! yields byte-identical output.

use crate::color::{color_for, UNKNOWN};
use crate::metrics::MetricTable;
use crate::model::{Bounds, CountyShape, Transform};
use std::collections::BTreeMap;
use tracing::warn;

/// Fixed margin around the map on all sides, in image units.
pub const MAP_MARGIN: i64 = 20;

/// Legend swatches at illustrative reference values. These are labels, not
/// the band thresholds.
const LEGEND: [(f64, &str); 6] = [
    (0.5, "< 1.0"),
    (10.0, "10"),
    (15.0, "15"),
    (100.0, "100"),
    (250.0, "250"),
    (500.0, "500"),
];

fn map_x(x: i32, t: Transform) -> f64 {
    MAP_MARGIN as f64 + (x as f64 + t.translate_x) * t.scale_x
}

// Y is flipped: the grid's Y grows upward, image Y grows downward.
fn map_y(y: i32, t: Transform, max_y: i32) -> f64 {
    MAP_MARGIN as f64 + (max_y as f64 - (y as f64 + t.translate_y)) * t.scale_y
}

/// Mean of the defined values at `date`. Counties with no value for the date
/// are excluded from both sum and count, never treated as zero.
fn overall_average(metrics: &MetricTable, date: &str) -> f64 {
    let mut total = 0.0;
    let mut defined = 0usize;
    for (_, series) in metrics.iter() {
        if let Some(v) = series.get(date) {
            total += v;
            defined += 1;
        }
    }
    if defined == 0 {
        return -1.0;
    }
    total / defined as f64
}

/// Render one time key as a complete SVG document: white background, a
/// translucent wash at the overall-average color, a title, the fixed legend,
/// and one closed path per county ring.
pub fn render_frame(
    date: &str,
    shapes: &BTreeMap<u32, CountyShape>,
    metrics: &MetricTable,
    transform: Transform,
    bounds: Bounds,
) -> String {
    let mut width = (bounds.max_x as f64 * transform.scale_x).ceil() as i64;
    let mut height = (bounds.max_y as f64 * transform.scale_y).ceil() as i64;
    if width % 2 != 0 {
        width += 1;
    }
    if height % 2 != 0 {
        height += 1;
    }

    let average = overall_average(metrics, date);

    let mut doc = String::new();
    doc.push_str(&format!(
        "<svg width=\"{}\" height=\"{}\" style=\"position: absolute; margin-top: 0px;\">\n",
        width + 2 * MAP_MARGIN,
        height + 2 * MAP_MARGIN
    ));
    doc.push_str("\t<rect width=\"100%\" height=\"100%\" style=\"fill: rgb(255,255,255);\"></rect>\n");
    doc.push_str(&format!(
        "\t<rect width=\"100%\" height=\"100%\" style=\"opacity:0.25; fill: {};\"></rect>\n",
        color_for(average).css()
    ));
    doc.push_str(&format!(
        "\t<text x=\"{}\" y=\"{}\" style=\"font: italic 40px serif; fill: black;\">{}</text>\n",
        (width as f64 * 0.85).round() as i64,
        height,
        date
    ));

    // Legend column on the right edge. Swatch size is an integer fraction of
    // the frame so it stays aligned across frame sizes.
    let rx = width as f64 * 0.925;
    let mut ry = height as f64 * 0.5;
    let sx = (width / 30) as f64;
    let sy = (height / 30) as f64;
    let text_y_delta = sy * 0.6;
    for (value, label) in LEGEND {
        doc.push_str(&format!(
            "\t<rect x=\"{:.6}\" y=\"{:.6}\" width=\"{:.6}\" height=\"{:.6}\" style=\"opacity:1.0; fill: {};\"></rect>\n",
            rx,
            ry,
            sx,
            sy,
            color_for(value).css()
        ));
        doc.push_str(&format!(
            "\t<text x=\"{:.6}\" y=\"{:.6}\" style=\"font: italic 20px serif; fill: black;\">{}</text>\n",
            rx + sx + 10.0,
            ry + text_y_delta,
            label
        ));
        ry += sy * 1.5;
    }

    doc.push_str("\t<g style=\"stroke-width:0.05; stroke: rgb(255, 255, 255); fill: rgb(180, 180, 180);\">\n");

    for (id, shape) in shapes {
        let value = metrics.value(*id, date);
        if value.is_none() {
            warn!(county = id, date, "no metric value, rendering sentinel fill");
        }
        let fill = match value {
            Some(v) => color_for(v),
            None => UNKNOWN,
        };
        // Opacity scales with the value; with no value there is nothing to
        // scale by, so it stays fully opaque.
        let opacity = match value {
            Some(v) => (0.5 + v / 100.0).min(1.0),
            None => 1.0,
        };
        for ring in &shape.rings {
            let mut points = ring.iter();
            let first = match points.next() {
                Some(p) => p,
                None => continue,
            };
            doc.push_str(&format!(
                "\t\t<path d=\"M{:.6},{:.6}",
                map_x(first.x, transform),
                map_y(first.y, transform, bounds.max_y)
            ));
            for p in points {
                doc.push_str(&format!(
                    "L{:.6},{:.6}",
                    map_x(p.x, transform),
                    map_y(p.y, transform, bounds.max_y)
                ));
            }
            doc.push_str(&format!(
                "Z\" opacity=\"{:.6}\" style=\"fill: {};\"></path>\n",
                opacity,
                fill.css()
            ));
        }
    }

    doc.push_str("\t</g>\n</svg>");
    doc
}

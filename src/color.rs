//! Metric value to display color. The bands are an ordered table, first
//! match wins; downstream legends depend on these being reproduced exactly.

use crate::model::Color;

/// Neutral gray rendered when no value is known.
pub const UNKNOWN: Color = Color {
    r: 180,
    g: 180,
    b: 180,
};

struct Band {
    matches: fn(f64) -> bool,
    color: fn(f64) -> Color,
}

fn channel(v: f64) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

const BANDS: &[Band] = &[
    // Negative means "no data", not a small value.
    Band {
        matches: |v| v < 0.0,
        color: |_| UNKNOWN,
    },
    Band {
        matches: |v| v < 1.0,
        color: |_| Color { r: 0, g: 255, b: 0 },
    },
    Band {
        matches: |v| v <= 10.0,
        color: |v| Color {
            r: channel(v * 25.5),
            g: 255,
            b: 0,
        },
    },
    Band {
        matches: |v| v < 25.0,
        color: |v| Color {
            r: 255,
            g: channel(255.0 - v * 10.0),
            b: 0,
        },
    },
    Band {
        matches: |v| v < 100.0,
        color: |v| {
            let g = channel(100.0 - v);
            Color { r: 255, g, b: g }
        },
    },
    Band {
        matches: |v| v < 250.0,
        color: |v| Color {
            r: 255,
            g: 0,
            b: channel(v),
        },
    },
    Band {
        matches: |_| true,
        color: |v| Color {
            r: channel(255.0 - (v - 250.0)),
            g: 0,
            b: 255,
        },
    },
];

/// Map a metric value to its band color. Channels are clamped to [0, 255]
/// and rounded to the nearest integer.
pub fn color_for(value: f64) -> Color {
    for band in BANDS {
        if (band.matches)(value) {
            return (band.color)(value);
        }
    }
    UNKNOWN
}

//! Arc decoding and the canonical arc catalog.

use crate::error::MapError;
use crate::json::TopologyDoc;
use crate::model::{Bounds, Delta, Point, Transform};

/// Render magnification applied to the topology header scale. The quantized
/// grid is far too small to draw at 1:1.
pub const MAG_X: f64 = 4.0 * 8.0;
pub const MAG_Y: f64 = 5.0 * 8.0;

/// An ordered sequence of absolute grid points. Immutable after decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arc {
    points: Vec<Point>,
}

impl Arc {
    /// Accumulate deltas from the start point. Every produced point feeds the
    /// bounds accumulator.
    pub fn decode(start: Point, deltas: &[Delta], bounds: &mut Bounds) -> Arc {
        let mut points = Vec::with_capacity(deltas.len() + 1);
        bounds.include(start);
        points.push(start);
        let mut cur = start;
        for &d in deltas {
            cur = cur.translated(d);
            bounds.include(cur);
            points.push(cur);
        }
        Arc { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// A signed catalog index decoded once: negative raw index `i` means arc
/// `|i|-1` traversed reversed (so that arc 0 stays addressable both ways),
/// non-negative means arc `i` forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArcRef {
    pub index: usize,
    pub reversed: bool,
}

impl ArcRef {
    pub fn from_signed(raw: i32) -> ArcRef {
        if raw < 0 {
            ArcRef {
                index: raw.unsigned_abs() as usize - 1,
                reversed: true,
            }
        } else {
            ArcRef {
                index: raw as usize,
                reversed: false,
            }
        }
    }
}

/// Index-addressable store of canonical arcs. Arcs are shared: multiple
/// geometries may reference the same arc in either orientation.
#[derive(Clone, Debug, Default)]
pub struct ArcCatalog {
    arcs: Vec<Arc>,
}

impl ArcCatalog {
    pub fn from_arcs(arcs: Vec<Arc>) -> ArcCatalog {
        ArcCatalog { arcs }
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// The referenced arc's points in traversal order.
    pub fn resolve(&self, r: ArcRef) -> Result<Vec<Point>, MapError> {
        let arc = self.arcs.get(r.index).ok_or(MapError::ArcIndexOutOfRange {
            index: r.index,
            len: self.arcs.len(),
        })?;
        let mut pts = arc.points().to_vec();
        if r.reversed {
            pts.reverse();
        }
        Ok(pts)
    }
}

/// The load-phase product: arc catalog, grid-to-image transform, and the
/// coordinate bounds accumulated over every decoded point. Read-only after
/// construction.
#[derive(Clone, Debug)]
pub struct Topology {
    pub catalog: ArcCatalog,
    pub transform: Transform,
    pub bounds: Bounds,
}

impl Topology {
    pub fn from_doc(doc: &TopologyDoc) -> Result<Topology, MapError> {
        let transform = Transform {
            scale_x: MAG_X * doc.transform.scale[0],
            scale_y: MAG_Y * doc.transform.scale[1],
            translate_x: doc.transform.translate[0],
            translate_y: doc.transform.translate[1],
        };
        let mut bounds = Bounds::default();
        let mut arcs = Vec::with_capacity(doc.arcs.len());
        for (i, raw) in doc.arcs.iter().enumerate() {
            let (first, rest) = raw.split_first().ok_or_else(|| {
                MapError::MalformedDocument(format!("arc {} has no points", i))
            })?;
            let start = Point {
                x: first[0],
                y: first[1],
            };
            let deltas: Vec<Delta> = rest
                .iter()
                .map(|d| Delta { dx: d[0], dy: d[1] })
                .collect();
            arcs.push(Arc::decode(start, &deltas, &mut bounds));
        }
        Ok(Topology {
            catalog: ArcCatalog::from_arcs(arcs),
            transform,
            bounds,
        })
    }
}

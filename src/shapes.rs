//! Building county outlines from signed arc-index ring groups.

use crate::arcs::{ArcCatalog, ArcRef};
use crate::error::MapError;
use crate::json::{CollectionDoc, GeometryDoc};
use crate::model::{CountyShape, Point};
use std::collections::BTreeMap;

fn parse_id(raw: &str) -> Result<u32, MapError> {
    raw.trim()
        .parse()
        .map_err(|_| MapError::BadCountyId(raw.to_string()))
}

/// Resolve one geometry into a `CountyShape`: one ring per ring group, arcs
/// stitched in group order with join points deduplicated (a resolved point
/// equal to the ring's current last point is elided).
pub fn build_shape(geom: &GeometryDoc, catalog: &ArcCatalog) -> Result<CountyShape, MapError> {
    let county_id = parse_id(&geom.properties.geoid)?;
    let state_id = parse_id(&geom.properties.statefp)?;
    let mut rings = Vec::with_capacity(geom.arcs.len());
    for group in &geom.arcs {
        let mut ring: Vec<Point> = Vec::new();
        for &raw in group {
            for p in catalog.resolve(ArcRef::from_signed(raw))? {
                if ring.last() != Some(&p) {
                    ring.push(p);
                }
            }
        }
        rings.push(ring);
    }
    Ok(CountyShape {
        county_id,
        state_id,
        rings,
    })
}

/// Build every geometry in a collection, keyed by county id. Any failure is
/// fatal: a partially built shape set would silently drop counties.
pub fn build_shapes(
    collection: &CollectionDoc,
    catalog: &ArcCatalog,
) -> Result<BTreeMap<u32, CountyShape>, MapError> {
    let mut shapes = BTreeMap::new();
    for geom in &collection.geometries {
        let shape = build_shape(geom, catalog)?;
        shapes.insert(shape.county_id, shape);
    }
    Ok(shapes)
}

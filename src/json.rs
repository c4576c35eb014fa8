//! Serde shapes for the two input documents. These are pure data-transfer
//! types; all interpretation happens in `arcs`, `shapes` and `metrics`.

use crate::error::MapError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// The arc-shared topology document: a global transform header, the raw
/// delta-encoded arcs, and named geometry collections.
#[derive(Debug, Deserialize)]
pub struct TopologyDoc {
    pub transform: TransformDoc,
    pub arcs: Vec<Vec<[i32; 2]>>,
    pub objects: BTreeMap<String, CollectionDoc>,
}

impl TopologyDoc {
    pub fn parse(text: &str) -> Result<TopologyDoc, MapError> {
        Ok(serde_json::from_str(text)?)
    }

    /// The named collection, or the first one when no name is given.
    pub fn collection(&self, name: Option<&str>) -> Option<&CollectionDoc> {
        match name {
            Some(n) => self.objects.get(n),
            None => self.objects.values().next(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TransformDoc {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

#[derive(Debug, Deserialize)]
pub struct CollectionDoc {
    pub geometries: Vec<GeometryDoc>,
}

/// One county geometry: its ids and the signed arc-index ring groups.
#[derive(Debug, Deserialize)]
pub struct GeometryDoc {
    pub properties: PropertiesDoc,
    pub arcs: Vec<Vec<i32>>,
}

#[derive(Debug, Deserialize)]
pub struct PropertiesDoc {
    #[serde(rename = "GEOID")]
    pub geoid: String,
    #[serde(rename = "STATEFP")]
    pub statefp: String,
}

/// The county roster document. The deep nesting mirrors the query-result
/// envelope the data arrives in; only `results[0]…DS[0].PH[0].DM0` matters.
#[derive(Debug, Deserialize)]
pub struct RosterDoc {
    pub results: Vec<ResultEntryDoc>,
}

impl RosterDoc {
    pub fn parse(text: &str) -> Result<RosterDoc, MapError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn rows(&self) -> Option<&[RowDoc]> {
        let ds = self.results.first()?.result.data.dsr.ds.first()?;
        Some(ds.ph.first()?.dm0.as_slice())
    }
}

#[derive(Debug, Deserialize)]
pub struct ResultEntryDoc {
    pub result: ResultDoc,
}

#[derive(Debug, Deserialize)]
pub struct ResultDoc {
    pub data: QueryDataDoc,
}

#[derive(Debug, Deserialize)]
pub struct QueryDataDoc {
    pub dsr: DsrDoc,
}

#[derive(Debug, Deserialize)]
pub struct DsrDoc {
    #[serde(rename = "DS")]
    pub ds: Vec<SectionDoc>,
}

#[derive(Debug, Deserialize)]
pub struct SectionDoc {
    #[serde(rename = "PH")]
    pub ph: Vec<PageDoc>,
}

#[derive(Debug, Deserialize)]
pub struct PageDoc {
    #[serde(rename = "DM0")]
    pub dm0: Vec<RowDoc>,
}

/// One roster row. `R` and `Ø` are layout discriminants: they select which
/// fields the value stack `C` carries and in what order.
#[derive(Debug, Deserialize)]
pub struct RowDoc {
    #[serde(rename = "C")]
    pub cells: Vec<Value>,
    #[serde(rename = "R", default = "neg_one")]
    pub repeat_mask: i64,
    #[serde(rename = "Ø", default = "neg_one")]
    pub null_mask: i64,
}

fn neg_one() -> i64 {
    -1
}

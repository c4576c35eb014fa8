//! County roster and the historical metric table.
//!
//! The roster gives the name→id lookup the metric file needs (its rows carry
//! display names, not ids) and decodes the legacy packed row layouts. The
//! metric table maps county id → time key → value.

use crate::error::MapError;
use crate::json::{RosterDoc, RowDoc};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Marker distinguishing the metric rows we keep from the other series the
/// historical file interleaves.
pub const ROW_MARKER: &str = "Daily new cases per 100k people";

/// One county's roster entry. Which metric fields are present depends on the
/// row's layout discriminants; absent fields stay `None`.
#[derive(Clone, Debug, Default)]
pub struct CountyRecord {
    pub county_id: u32,
    pub name: String,
    pub color: Option<String>,
    pub cases_per_100k: Option<f64>,
    pub daily_7day: Option<f64>,
    pub total_cases: Option<i64>,
    pub total_deaths: Option<i64>,
}

fn cell_str(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn cell_f64(v: Option<&Value>) -> Option<f64> {
    match v? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn cell_i64(v: Option<&Value>) -> Option<i64> {
    match v? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl CountyRecord {
    /// Decode one roster row. The `Ø` mask, when present, selects one fixed
    /// layout; otherwise the `R` mask picks among the known packed layouts.
    /// An unrecognized mask is a logged gap: id and name are kept, metric
    /// fields stay unset.
    pub fn from_row(row: &RowDoc) -> Result<CountyRecord, MapError> {
        let c = &row.cells;
        let id_raw = cell_str(c.first())
            .ok_or_else(|| MapError::MalformedDocument("roster row has no id cell".into()))?;
        let county_id = id_raw
            .trim()
            .parse()
            .map_err(|_| MapError::BadCountyId(id_raw.clone()))?;
        let name = cell_str(c.get(1)).unwrap_or_default();

        let mut rec = CountyRecord {
            county_id,
            name,
            ..CountyRecord::default()
        };

        if row.null_mask >= 0 {
            rec.color = cell_str(c.get(2));
            rec.total_cases = cell_i64(c.get(3));
            rec.total_deaths = cell_i64(c.get(4));
            rec.cases_per_100k = cell_f64(c.get(5));
            return Ok(rec);
        }

        match row.repeat_mask {
            -1 => {
                rec.color = cell_str(c.get(2));
                rec.cases_per_100k = cell_f64(c.get(3));
                rec.total_cases = cell_i64(c.get(4));
                rec.total_deaths = cell_i64(c.get(5));
                rec.daily_7day = cell_f64(c.get(6));
            }
            4 => {
                rec.cases_per_100k = cell_f64(c.get(2));
                rec.total_cases = cell_i64(c.get(3));
                rec.total_deaths = cell_i64(c.get(4));
                rec.daily_7day = cell_f64(c.get(5));
            }
            16 | 32 | 64 => {
                rec.color = cell_str(c.get(2));
                rec.cases_per_100k = cell_f64(c.get(3));
                rec.total_cases = cell_i64(c.get(4));
                rec.daily_7day = cell_f64(c.get(5));
            }
            20 | 36 => {
                rec.cases_per_100k = cell_f64(c.get(2));
                rec.total_cases = cell_i64(c.get(3));
                rec.daily_7day = cell_f64(c.get(4));
            }
            48 => {
                rec.color = cell_str(c.get(2));
                rec.cases_per_100k = cell_f64(c.get(3));
                rec.total_cases = cell_i64(c.get(4));
            }
            52 => {
                rec.cases_per_100k = cell_f64(c.get(2));
                rec.daily_7day = cell_f64(c.get(3));
            }
            68 => {
                rec.cases_per_100k = cell_f64(c.get(2));
                rec.total_cases = cell_i64(c.get(3));
                rec.total_deaths = cell_i64(c.get(4));
            }
            76 => {
                rec.total_cases = cell_i64(c.get(2));
                rec.total_deaths = cell_i64(c.get(3));
            }
            108 => {
                rec.total_cases = cell_i64(c.get(2));
            }
            other => {
                warn!(mask = other, county = %rec.name, "unrecognized roster row layout, leaving metrics unset");
            }
        }
        Ok(rec)
    }
}

/// All county records, addressable by id and by display name.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    by_id: BTreeMap<u32, CountyRecord>,
    id_by_name: BTreeMap<String, u32>,
}

impl Roster {
    pub fn from_doc(doc: &RosterDoc) -> Result<Roster, MapError> {
        let rows = doc
            .rows()
            .ok_or_else(|| MapError::MalformedDocument("county roster document has no rows".into()))?;
        let mut roster = Roster::default();
        for row in rows {
            let rec = CountyRecord::from_row(row)?;
            roster.id_by_name.insert(rec.name.clone(), rec.county_id);
            roster.by_id.insert(rec.county_id, rec);
        }
        Ok(roster)
    }

    pub fn id_for_name(&self, name: &str) -> Option<u32> {
        self.id_by_name.get(name).copied()
    }

    pub fn get(&self, id: u32) -> Option<&CountyRecord> {
        self.by_id.get(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// county id → time key → metric value, plus the ordered time keys from the
/// header row. Built once; read-only during rendering.
#[derive(Clone, Debug, Default)]
pub struct MetricTable {
    dates: Vec<String>,
    by_county: BTreeMap<u32, BTreeMap<String, f64>>,
}

impl MetricTable {
    /// Parse the tab-separated historical file. Header columns from index 2
    /// onward are time keys; only rows tagged with [`ROW_MARKER`] are kept;
    /// column 0 is a quoted display name resolved through the roster. Rows
    /// naming an unknown county and unparsable cells are logged and skipped,
    /// never fatal: they surface later as data gaps.
    pub fn from_tsv(text: &str, roster: &Roster) -> MetricTable {
        let mut lines = text.lines();
        let header: Vec<&str> = match lines.next() {
            Some(h) => h.split('\t').collect(),
            None => return MetricTable::default(),
        };
        let dates: Vec<String> = header.iter().skip(2).map(|s| s.to_string()).collect();

        let mut by_county: BTreeMap<u32, BTreeMap<String, f64>> = BTreeMap::new();
        for line in lines {
            if !line.contains(ROW_MARKER) {
                continue;
            }
            let cols: Vec<&str> = line.split('\t').collect();
            let name = cols[0].replace('"', "");
            let id = match roster.id_for_name(&name) {
                Some(id) => id,
                None => {
                    warn!(county = %name, "metric row names no known county");
                    continue;
                }
            };
            let series = by_county.entry(id).or_default();
            for (date, cell) in dates.iter().zip(cols.iter().skip(2)) {
                match cell.trim().parse::<f64>() {
                    Ok(v) => {
                        series.insert(date.clone(), v);
                    }
                    Err(_) => {
                        warn!(county = %name, date = %date, cell = %cell, "unparsable metric cell");
                    }
                }
            }
        }
        MetricTable { dates, by_county }
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn value(&self, id: u32, date: &str) -> Option<f64> {
        self.by_county.get(&id)?.get(date).copied()
    }

    /// Every county's series, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &BTreeMap<String, f64>)> {
        self.by_county.iter().map(|(id, series)| (*id, series))
    }

    pub fn county_count(&self) -> usize {
        self.by_county.len()
    }
}

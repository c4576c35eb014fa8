use choromap::{build_shape, build_shapes, MapError, MetricTable, Roster, RosterDoc, Topology, TopologyDoc};
use serde_json::json;

fn topology(doc: serde_json::Value) -> (TopologyDoc, Topology) {
    let doc: TopologyDoc = serde_json::from_value(doc).unwrap();
    let topo = Topology::from_doc(&doc).unwrap();
    (doc, topo)
}

#[test]
fn shared_arc_join_point_appears_once() {
    // arc 0 ends at (2,0); arc 1 starts there.
    let (doc, topo) = topology(json!({
        "transform": {"scale": [1.0, 1.0], "translate": [0.0, 0.0]},
        "arcs": [
            [[0, 0], [2, 0]],
            [[2, 0], [0, 2]]
        ],
        "objects": {"counties": {"geometries": [
            {"properties": {"GEOID": "01001", "STATEFP": "01"}, "arcs": [[0, 1]]}
        ]}}
    }));
    let geom = &doc.collection(None).unwrap().geometries[0];
    let shape = build_shape(geom, &topo.catalog).unwrap();
    assert_eq!(shape.county_id, 1001);
    assert_eq!(shape.state_id, 1);
    assert_eq!(shape.rings.len(), 1);
    let xs: Vec<(i32, i32)> = shape.rings[0].iter().map(|p| (p.x, p.y)).collect();
    assert_eq!(xs, vec![(0, 0), (2, 0), (2, 2)]);
}

#[test]
fn one_ring_per_group() {
    let (doc, topo) = topology(json!({
        "transform": {"scale": [1.0, 1.0], "translate": [0.0, 0.0]},
        "arcs": [
            [[0, 0], [1, 0], [0, 1], [-1, 0], [0, -1]],
            [[5, 5], [1, 0], [0, 1], [-1, 0], [0, -1]]
        ],
        "objects": {"counties": {"geometries": [
            {"properties": {"GEOID": "2", "STATEFP": "1"}, "arcs": [[0], [1]]}
        ]}}
    }));
    let geom = &doc.collection(None).unwrap().geometries[0];
    let shape = build_shape(geom, &topo.catalog).unwrap();
    assert_eq!(shape.rings.len(), 2);
    assert_eq!(shape.rings[0].len(), 5);
    assert_eq!(shape.rings[1][0].x, 5);
}

#[test]
fn arc_index_out_of_range_is_fatal() {
    let (doc, topo) = topology(json!({
        "transform": {"scale": [1.0, 1.0], "translate": [0.0, 0.0]},
        "arcs": [[[0, 0], [1, 1]]],
        "objects": {"counties": {"geometries": [
            {"properties": {"GEOID": "1", "STATEFP": "1"}, "arcs": [[5]]}
        ]}}
    }));
    let err = build_shapes(doc.collection(None).unwrap(), &topo.catalog).unwrap_err();
    assert!(matches!(err, MapError::ArcIndexOutOfRange { index: 5, len: 1 }));
}

#[test]
fn unparsable_county_id_is_fatal() {
    let (doc, topo) = topology(json!({
        "transform": {"scale": [1.0, 1.0], "translate": [0.0, 0.0]},
        "arcs": [[[0, 0], [1, 1]]],
        "objects": {"counties": {"geometries": [
            {"properties": {"GEOID": "not-a-number", "STATEFP": "01"}, "arcs": [[0]]}
        ]}}
    }));
    let geom = &doc.collection(None).unwrap().geometries[0];
    assert!(matches!(
        build_shape(geom, &topo.catalog),
        Err(MapError::BadCountyId(_))
    ));
}

#[test]
fn wrong_delta_arity_fails_at_parse() {
    let text = r#"{
        "transform": {"scale": [1.0, 1.0], "translate": [0.0, 0.0]},
        "arcs": [[[0, 0], [1, 1, 1]]],
        "objects": {}
    }"#;
    assert!(TopologyDoc::parse(text).is_err());
}

fn roster_doc(rows: serde_json::Value) -> RosterDoc {
    serde_json::from_value(json!({
        "results": [{"result": {"data": {"dsr": {"DS": [{"PH": [{"DM0": rows}]}]}}}}]
    }))
    .unwrap()
}

#[test]
fn roster_default_row_layout() {
    let doc = roster_doc(json!([
        {"C": ["1001", "Autauga County", "#abc", "5.5", "10", "2", "4.5"]}
    ]));
    let roster = Roster::from_doc(&doc).unwrap();
    let rec = roster.get(1001).unwrap();
    assert_eq!(rec.name, "Autauga County");
    assert_eq!(rec.color.as_deref(), Some("#abc"));
    assert_eq!(rec.cases_per_100k, Some(5.5));
    assert_eq!(rec.total_cases, Some(10));
    assert_eq!(rec.total_deaths, Some(2));
    assert_eq!(rec.daily_7day, Some(4.5));
    assert_eq!(roster.id_for_name("Autauga County"), Some(1001));
}

#[test]
fn roster_packed_row_layouts() {
    let doc = roster_doc(json!([
        {"C": ["1", "A", 7.5, 10, 3, 1.25], "R": 4},
        {"C": ["2", "B", 100, 5], "R": 76},
        {"C": ["3", "C", "#fff", 9, 4, "2.5"], "Ø": 0}
    ]));
    let roster = Roster::from_doc(&doc).unwrap();

    let a = roster.get(1).unwrap();
    assert_eq!(a.cases_per_100k, Some(7.5));
    assert_eq!(a.total_cases, Some(10));
    assert_eq!(a.total_deaths, Some(3));
    assert_eq!(a.daily_7day, Some(1.25));
    assert_eq!(a.color, None);

    let b = roster.get(2).unwrap();
    assert_eq!(b.total_cases, Some(100));
    assert_eq!(b.total_deaths, Some(5));
    assert_eq!(b.cases_per_100k, None);

    // The Ø mask takes precedence over R.
    let c = roster.get(3).unwrap();
    assert_eq!(c.color.as_deref(), Some("#fff"));
    assert_eq!(c.total_cases, Some(9));
    assert_eq!(c.total_deaths, Some(4));
    assert_eq!(c.cases_per_100k, Some(2.5));
}

#[test]
fn roster_unrecognized_layout_keeps_identity_only() {
    let doc = roster_doc(json!([
        {"C": ["42", "Mystery County", "1", "2", "3"], "R": 999}
    ]));
    let roster = Roster::from_doc(&doc).unwrap();
    let rec = roster.get(42).unwrap();
    assert_eq!(rec.name, "Mystery County");
    assert_eq!(rec.cases_per_100k, None);
    assert_eq!(rec.total_cases, None);
    assert_eq!(rec.total_deaths, None);
    assert_eq!(rec.daily_7day, None);
}

#[test]
fn metric_table_joins_by_roster_name() {
    let doc = roster_doc(json!([
        {"C": ["1001", "Autauga County", "#abc", "5.5", "10", "2", "4.5"]}
    ]));
    let roster = Roster::from_doc(&doc).unwrap();
    let tsv = "County\tSeries\t3/1/20\t3/2/20\n\
               \"Autauga County\"\tDaily new cases per 100k people\t1.5\t2.5\n\
               \"Autauga County\"\tSome other series\t9.0\t9.0\n\
               \"Nowhere County\"\tDaily new cases per 100k people\t3.0\t3.0\n";
    let table = MetricTable::from_tsv(tsv, &roster);
    assert_eq!(table.dates(), ["3/1/20", "3/2/20"]);
    assert_eq!(table.county_count(), 1);
    assert_eq!(table.value(1001, "3/1/20"), Some(1.5));
    assert_eq!(table.value(1001, "3/2/20"), Some(2.5));
    assert_eq!(table.value(1001, "3/3/20"), None);
}

#[test]
fn metric_table_leaves_gap_for_unparsable_cell() {
    let doc = roster_doc(json!([
        {"C": ["1", "A", "#abc", "5.5", "10", "2", "4.5"]}
    ]));
    let roster = Roster::from_doc(&doc).unwrap();
    let tsv = "County\tSeries\tT1\tT2\n\
               \"A\"\tDaily new cases per 100k people\tn/a\t2.0\n";
    let table = MetricTable::from_tsv(tsv, &roster);
    assert_eq!(table.value(1, "T1"), None);
    assert_eq!(table.value(1, "T2"), Some(2.0));
}

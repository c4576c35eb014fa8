//! Frame-rendering driver: loads the topology, county roster, and historical
//! metric file, then writes one choropleth SVG (plus an HTML wrapper) per
//! time key. All file I/O lives here; the library stays pure.

use choromap::{build_shapes, render_frame, MetricTable, Roster, RosterDoc, Topology, TopologyDoc};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        eprintln!(
            "usage: render_frames <topology.json> <county-data.json> <metrics.tsv> [out_dir]"
        );
        std::process::exit(2);
    }
    let out_dir = args
        .get(4)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("frames"));

    match run(&args[1], &args[2], &args[3], &out_dir) {
        Ok(n) => info!(frames = n, "done"),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(
    topology_path: &str,
    roster_path: &str,
    metrics_path: &str,
    out_dir: &Path,
) -> Result<usize, Box<dyn Error>> {
    let topo_doc = TopologyDoc::parse(&fs::read_to_string(topology_path)?)?;
    let topology = Topology::from_doc(&topo_doc)?;
    let collection = topo_doc
        .collection(None)
        .ok_or("topology document has no geometry collections")?;
    let shapes = build_shapes(collection, &topology.catalog)?;
    info!(
        counties = shapes.len(),
        arcs = topology.catalog.len(),
        "topology loaded"
    );

    let roster = Roster::from_doc(&RosterDoc::parse(&fs::read_to_string(roster_path)?)?)?;
    let table = MetricTable::from_tsv(&fs::read_to_string(metrics_path)?, &roster);
    info!(
        roster = roster.len(),
        series = table.county_count(),
        dates = table.dates().len(),
        "metric data loaded"
    );

    fs::create_dir_all(out_dir)?;
    for (i, date) in table.dates().iter().enumerate() {
        let doc = render_frame(date, &shapes, &table, topology.transform, topology.bounds);
        let svg_path = out_dir.join(format!("frame_{:03}.svg", i));
        fs::write(&svg_path, &doc)?;
        let html = format!("<html>\n<body>\n{}\n</body>\n</html>", doc);
        fs::write(out_dir.join(format!("frame_{}.html", date)), html)?;
        info!(frame = i, date = %date, "wrote {}", svg_path.display());
    }
    Ok(table.dates().len())
}

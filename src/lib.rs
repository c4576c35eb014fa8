pub mod arcs;
pub mod color;
pub mod error;
pub mod json;
pub mod metrics;
pub mod model;
pub mod shapes;
pub mod svg;

pub use arcs::{Arc, ArcCatalog, ArcRef, Topology};
pub use color::color_for;
pub use error::MapError;
pub use json::{RosterDoc, TopologyDoc};
pub use metrics::{CountyRecord, MetricTable, Roster};
pub use model::{Bounds, Color, CountyShape, Delta, Point, Transform};
pub use shapes::{build_shape, build_shapes};
pub use svg::render_frame;

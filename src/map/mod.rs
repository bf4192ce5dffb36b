mod adapter;
mod command;
mod reconcile;
mod surface;

pub use adapter::{DynSurface, MapAdapter};
pub use command::{
    Bounds, Layout, MapCommand, MarkerSpec, Padding, DEFAULT_ZOOM, DESTINATION_ZOOM, ROUTE_SOURCE,
};
pub use reconcile::reconcile;
pub use surface::{CommandQueue, MapSurface};

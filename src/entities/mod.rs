mod coordinates;
mod destination;
pub mod estimate;
mod opening_hours;
mod route;
mod view;

pub use coordinates::Coordinates;
pub use destination::{Category, Destination};
pub use opening_hours::{hm, OpeningHours, Period, ALL_DAYS};
pub use route::{Route, Step, Via};
pub use view::{Recompute, SelectionTicket, UiFlags, ViewState};

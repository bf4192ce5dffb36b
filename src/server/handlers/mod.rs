pub mod destinations;
pub mod locations;
pub mod map;
pub mod routes;
pub mod view;

pub mod districts;
pub mod geojson;
pub mod states;

//! Classify - keyword and bounding-box queries over redlining map data.
//!
//! Loads a static GeoJSON dataset of HOLC-graded neighbourhoods once at
//! start-up and serves two read-only queries to the map client: keyword
//! search over area descriptions and bounding-box intersection over the
//! neighbourhood polygons.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod models;
pub mod server;
pub mod services;

pub mod aoi;
pub mod config;
pub mod date_gen;
pub mod locator;
pub mod media;
pub mod normalize;
pub mod page;
pub mod readers;
pub mod selection;
pub mod server;

/*
 * Static rendering. A laid-out graph is composed into an SVG scene, which is then
 * either written as-is or rasterized to PNG.
 */

pub mod raster;
pub mod scene;
pub mod style;

pub use raster::{ImageFormat, write_image};
pub use scene::draw_graph;

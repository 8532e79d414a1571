/*
 * Node placement. Positions come out normalised to [-1, 1] on both axes;
 * the renderer maps them onto the canvas.
 */

pub mod spring;

pub use spring::{LayoutSettings, Point, Positions, spring_layout};

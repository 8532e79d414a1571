/*
 * This module defines the graph the renderer and the analysis commands work on:
 * labelled nodes joined by weighted undirected edges.
 */

pub mod edge;
pub mod node;
pub mod social_graph;

/*!
Read-only inspection of a loaded graph: who is connected to whom, weighted
shortest distances and the minimum spanning forest.
*/

pub mod paths;
pub mod report;

pub use paths::{minimum_spanning_tree, shortest_paths};
pub use report::{Summary, connections, search};

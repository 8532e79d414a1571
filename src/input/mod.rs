/*!
Input module

Reads graph files from disk and turns them into a `SocialGraph`.
*/

pub mod source;

pub use source::load_graph;

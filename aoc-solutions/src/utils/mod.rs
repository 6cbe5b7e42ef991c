//! Algorithms shared by puzzle solutions

pub mod step_graph;

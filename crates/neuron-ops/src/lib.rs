pub mod ops_hash;
pub mod ops_render;
pub mod ops_tree;
pub mod project;

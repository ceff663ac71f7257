pub mod entity;
pub mod grid;
pub mod rules;
pub mod tile;

pub mod games;
pub mod predict;
pub mod simulate;

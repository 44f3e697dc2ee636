pub mod apply;
pub mod audit;

pub mod audit;
pub mod generate;
pub mod recompute;
pub mod score;

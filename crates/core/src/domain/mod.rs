pub mod answers;
pub mod plan;
pub mod product;

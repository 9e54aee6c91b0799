pub mod matrix;
pub mod vector;

pub use matrix::WeightsMat;
pub use vector::WeightVector;

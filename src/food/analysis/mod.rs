pub mod nutrition;
pub mod schema;

pub use nutrition::{NutritionClient, NutritionError};

mod error;
mod markers;
mod meal_plan;
mod tokens;

pub use error::Error;
pub use tokens::parse_meal_plan;

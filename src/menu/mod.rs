mod allergens;
mod meal;
mod money;

pub use allergens::{classify, is_relevant, passes_filter, removal_mask, AllergenClass, DietFilter};
pub use meal::{Category, Meal, MealPlan, PriceRole, UNNAMED_CATEGORY_TITLE};
pub use money::{format_price, Cents};

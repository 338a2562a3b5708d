mod console;
mod markdown;
mod openmensa;

pub use console::render_plan;
pub use markdown::render_table;
pub use openmensa::save_plan;

use crate::lang::Language;
use crate::menu::{is_relevant, Meal, PriceRole};

/// How the console and Markdown renderers should present the plan.
#[derive(Debug, Clone, Copy)]
pub struct DisplayOptions {
    pub price_role: PriceRole,
    pub language: Language,
    pub show_all_allergens: bool,
    pub show_additives: bool,
}

/// The allergens a renderer shows for one meal: all of them on request,
/// otherwise only the ones relevant to vegetarians/vegans.
fn allergen_list(meal: &Meal, options: &DisplayOptions) -> String {
    if options.show_all_allergens {
        meal.allergens.join(", ")
    } else {
        meal.allergens
            .iter()
            .filter(|allergen| is_relevant(allergen, options.language))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

use colored::Colorize;

use super::{allergen_list, DisplayOptions};
use crate::menu::{format_price, passes_filter, AllergenClass, Category, Meal};

/// Renders the plan as colored terminal lines, one block per category with
/// the category title padded into its own column.
pub fn render_plan(
    categories: &[&Category],
    mask: AllergenClass,
    options: &DisplayOptions,
) -> String {
    let Some(title_width) = categories
        .iter()
        .map(|category| category.title.chars().count())
        .max()
    else {
        return String::new();
    };
    let title_width = title_width + 1;

    let mut out = String::new();
    for category in categories {
        let meals: Vec<&Meal> = category
            .meals
            .iter()
            .filter(|meal| passes_filter(meal, mask, options.language))
            .collect();
        if meals.is_empty() {
            continue;
        }

        let padded = format!("{:<title_width$}", category.title);
        out.push_str(&padded.green().to_string());
        for (idx, meal) in meals.iter().enumerate() {
            if idx > 0 {
                out.push_str(&" ".repeat(title_width));
            }
            out.push_str(&meal.title.blue().to_string());
            let price = format!("({})", format_price(meal.price(options.price_role)));
            out.push(' ');
            out.push_str(&price.cyan().to_string());

            let allergens = allergen_list(meal, options);
            if !allergens.is_empty() {
                out.push(' ');
                out.push_str(&format!("[{allergens}]").red().to_string());
            }
            if options.show_additives && !meal.additives.is_empty() {
                out.push(' ');
                out.push_str(&format!("[{}]", meal.additives.join(", ")).yellow().to_string());
            }
            out.push('\n');
        }
    }
    out
}

use std::fmt::Write;

use super::{allergen_list, DisplayOptions};
use crate::lang::Language;
use crate::menu::{format_price, passes_filter, AllergenClass, Category, Meal};

struct TableLabels {
    category: &'static str,
    meal: &'static str,
    price: &'static str,
    some_allergens: &'static str,
    all_allergens: &'static str,
    additives: &'static str,
}

static GERMAN: TableLabels = TableLabels {
    category: "Kategorie",
    meal: "Gericht",
    price: "Preis",
    some_allergens: "Allergene (Auswahl)",
    all_allergens: "Allergene",
    additives: "Zusatzstoffe",
};

static ENGLISH: TableLabels = TableLabels {
    category: "Category",
    meal: "Meal",
    price: "Price",
    some_allergens: "Allergens (Selection)",
    all_allergens: "Allergens",
    additives: "Additives",
};

const fn labels(language: Language) -> &'static TableLabels {
    match language {
        Language::De => &GERMAN,
        Language::En => &ENGLISH,
    }
}

/// Renders the plan as a Markdown table with localized column headers. The
/// category cell is only filled on the first row of each category.
pub fn render_table(
    categories: &[&Category],
    mask: AllergenClass,
    options: &DisplayOptions,
) -> String {
    let labels = labels(options.language);
    let mut out = String::new();

    let _ = write!(out, "| {}", labels.category);
    let _ = write!(out, "| {}", labels.meal);
    let _ = write!(out, "| {}", labels.price);
    if options.show_all_allergens {
        let _ = write!(out, "| {}", labels.all_allergens);
    } else {
        let _ = write!(out, "| {}", labels.some_allergens);
    }
    if options.show_additives {
        let _ = write!(out, "| {}", labels.additives);
    }
    out.push_str("|\n");
    out.push_str("| :-- | :-- | --: | :-- | ");
    if options.show_additives {
        out.push_str(":-- |");
    }
    out.push('\n');

    for category in categories {
        let meals: Vec<&Meal> = category
            .meals
            .iter()
            .filter(|meal| passes_filter(meal, mask, options.language))
            .collect();
        for (idx, meal) in meals.iter().enumerate() {
            if idx > 0 {
                out.push_str("| |");
            } else {
                let _ = write!(out, "| {} |", category.title);
            }
            let _ = write!(
                out,
                " {} | {} |",
                meal.title,
                format_price(meal.price(options.price_role))
            );
            let _ = write!(out, " {} |", allergen_list(meal, options));
            if options.show_additives {
                let _ = write!(out, " {} |", meal.additives.join(", "));
            }
            out.push('\n');
        }
    }
    out
}

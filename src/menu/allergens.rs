use bitflags::bitflags;

use super::meal::Meal;
use crate::lang::Language;

bitflags! {
    /// Dietary classes an allergen tag can fall into. The plan markup only
    /// carries free-text allergen tags; these masks are what the filters
    /// work on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AllergenClass: u8 {
        const MEAT = 0b001;
        const OVO_LACTO = 0b010;
        const GLUTEN = 0b100;
    }
}

/// The mutually exclusive dietary filter modes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DietFilter {
    Vegetarian,
    Vegan,
}

/// Classifies one allergen tag exactly as the plan prints it for the given
/// language. Unknown tags carry no class and never trigger a filter.
pub fn classify(allergen: &str, language: Language) -> AllergenClass {
    match language {
        Language::De => match allergen {
            "Krebstiere (41)" | "Fisch (43)" | "Weichtiere (53)" | "Kalbfleisch (K)"
            | "Schweinefleisch (S)" | "Rindfleisch (R)" | "Lammfleisch (L)" | "Geflügel (G)"
            | "Fisch (F)" => AllergenClass::MEAT,
            "Eier (42)" | "Milch (46)" => AllergenClass::OVO_LACTO,
            "Gluten (40)" | "Weizen (40a)" | "Roggen (40b)" | "Gerste (40c)" => {
                AllergenClass::GLUTEN
            }
            _ => AllergenClass::empty(),
        },
        Language::En => match allergen {
            "crustaceans (41)" | "fish (43)" | "mollusks (53)" | "veal (K)" | "pork (S)"
            | "beef (R)" | "lamb (L)" | "poultry (G)" | "fish (F)" => AllergenClass::MEAT,
            "eggs (42)" | "milk (46)" => AllergenClass::OVO_LACTO,
            "gluten (40)" | "wheat (40a)" | "rye (40b)" | "barley (40c)" => AllergenClass::GLUTEN,
            _ => AllergenClass::empty(),
        },
    }
}

/// Classes removed by the selected filter mode, gluten-free stacking on
/// top of either mode.
pub fn removal_mask(filter: Option<DietFilter>, gluten_free: bool) -> AllergenClass {
    let mut mask = match filter {
        None => AllergenClass::empty(),
        Some(DietFilter::Vegetarian) => AllergenClass::MEAT,
        Some(DietFilter::Vegan) => AllergenClass::MEAT.union(AllergenClass::OVO_LACTO),
    };
    if gluten_free {
        mask |= AllergenClass::GLUTEN;
    }
    mask
}

/// Whether an allergen is worth showing by default: only the meat and
/// ovo-lacto ones are, the rest stays hidden unless all allergens were
/// requested.
pub fn is_relevant(allergen: &str, language: Language) -> bool {
    classify(allergen, language).intersects(AllergenClass::MEAT.union(AllergenClass::OVO_LACTO))
}

/// A meal passes when none of its allergens fall into a removed class.
pub fn passes_filter(meal: &Meal, mask: AllergenClass, language: Language) -> bool {
    !meal
        .allergens
        .iter()
        .any(|allergen| classify(allergen, language).intersects(mask))
}

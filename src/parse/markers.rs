use crate::lang::Language;

/// The literal strings whose presence in the markup carries meaning. The
/// plan markup has no semantic classes or ids; the only way to tell an
/// allergen list from an additive list, or one price column from another,
/// is to match these exact texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub allergen_header: &'static str,
    pub additive_header: &'static str,
    pub price_student: &'static str,
    pub price_staff: &'static str,
    pub price_guest: &'static str,
}

static GERMAN: Markers = Markers {
    allergen_header: "Allergene",
    additive_header: "Zusatzstoffe",
    price_student: "Stud.",
    price_staff: "Bed.",
    price_guest: "Gast",
};

static ENGLISH: Markers = Markers {
    allergen_header: "Allergens",
    additive_header: "Additives",
    price_student: "Student",
    price_staff: "Staff",
    price_guest: "Guest",
};

impl Markers {
    pub const fn for_language(language: Language) -> &'static Self {
        match language {
            Language::De => &GERMAN,
            Language::En => &ENGLISH,
        }
    }
}

use std::fmt::{self, Display, Formatter};

use clap::ValueEnum;

use super::money::Cents;

/// Title given to a category that the markup never named, i.e. meals
/// showed up before any category heading.
pub static UNNAMED_CATEGORY_TITLE: &str = "DUMMY-Name";

/// The audiences the canteen prices meals for.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum PriceRole {
    #[value(name = "Student")]
    Student,
    #[value(name = "Staff")]
    Staff,
    #[value(name = "Guest")]
    Guest,
}

impl PriceRole {
    /// Role attribute used by the OpenMensa feed format.
    pub const fn feed_role(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Staff => "employee",
            Self::Guest => "other",
        }
    }
}

impl Display for PriceRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student => write!(f, "Student"),
            Self::Staff => write!(f, "Staff"),
            Self::Guest => write!(f, "Guest"),
        }
    }
}

/// One orderable dish. Allergens and additives keep their source order and
/// may repeat; prices stay absent when the markup does not state them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meal {
    pub title: String,
    pub allergens: Vec<String>,
    pub additives: Vec<String>,
    pub student_price: Option<Cents>,
    pub staff_price: Option<Cents>,
    pub guest_price: Option<Cents>,
}

impl Meal {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            allergens: Vec::new(),
            additives: Vec::new(),
            student_price: None,
            staff_price: None,
            guest_price: None,
        }
    }

    pub fn add_allergen(&mut self, allergen: impl Into<String>) {
        self.allergens.push(allergen.into());
    }

    pub fn add_additive(&mut self, additive: impl Into<String>) {
        self.additives.push(additive.into());
    }

    pub fn set_price(&mut self, role: PriceRole, price: Cents) {
        match role {
            PriceRole::Student => self.student_price = Some(price),
            PriceRole::Staff => self.staff_price = Some(price),
            PriceRole::Guest => self.guest_price = Some(price),
        }
    }

    pub fn price(&self, role: PriceRole) -> Option<Cents> {
        match role {
            PriceRole::Student => self.student_price,
            PriceRole::Staff => self.staff_price,
            PriceRole::Guest => self.guest_price,
        }
    }
}

/// A named group of meals as the daily plan presents them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub title: String,
    pub meals: Vec<Meal>,
}

impl Category {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            meals: Vec::new(),
        }
    }

    pub fn add_meal(&mut self, meal: Meal) {
        self.meals.push(meal);
    }
}

/// Everything extracted from one day's markup: the categories in source
/// order plus any free-text lines found outside of them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MealPlan {
    pub categories: Vec<Category>,
    pub meta_data: Vec<String>,
}

use log::debug;

use super::error::{Error, Result};
use super::markers::Markers;
use crate::menu::{Category, Cents, Meal, MealPlan, PriceRole, UNNAMED_CATEGORY_TITLE};

/// The tags that carry meaning in the plan markup. Everything else, and
/// any tag with attributes, is treated as decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PlainTag {
    H2,
    H5,
    Strong,
    P,
    Th,
    Td,
    Br,
}

impl PlainTag {
    pub(super) fn from_name(name: &str) -> Option<Self> {
        match name {
            "h2" => Some(Self::H2),
            "h5" => Some(Self::H5),
            "strong" => Some(Self::Strong),
            "p" => Some(Self::P),
            "th" => Some(Self::Th),
            "td" => Some(Self::Td),
            "br" => Some(Self::Br),
            _ => None,
        }
    }
}

/// What the next text run will be interpreted as. The markup marks nothing
/// explicitly, so the meaning of a text run is decided entirely by the tags
/// seen before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Nothing seen yet; stray text is plan-level metadata.
    Start,
    /// Inside a leading free-text paragraph; still metadata.
    Info,
    /// A category heading was opened; the text names the category.
    CategoryTitle,
    /// A meal heading was opened; the text names the meal.
    MealTitle,
    /// A `strong` marker was opened; the text must be the allergen or
    /// additive header.
    InfoHeader,
    Allergens,
    Additives,
    /// A table header cell was opened; the text must name a price column.
    PriceHeader,
    /// A price column header was recognized; the next cell text is that
    /// role's price.
    Price(PriceRole),
    /// A decorated or unknown tag was seen; drop text until a recognized
    /// tag installs a new mode.
    Ignore,
}

/// Rebuilds the day's categories and meals from a stream of markup events.
///
/// Feed it start tags and text runs in document order, then call
/// [`finish`](Self::finish). At most one category and one meal are open at
/// any time; a new category heading or the end of input closes them in
/// meal-then-category order, so the trailing pair is never lost.
pub struct MealPlanParser {
    markers: &'static Markers,
    mode: Mode,
    curr_category: Option<Category>,
    curr_meal: Option<Meal>,
    last_plain_tag: Option<PlainTag>,
    categories: Vec<Category>,
    meta_data: Vec<String>,
}

impl MealPlanParser {
    pub fn new(markers: &'static Markers) -> Self {
        Self {
            markers,
            mode: Mode::Start,
            curr_category: None,
            curr_meal: None,
            last_plain_tag: None,
            categories: Vec::new(),
            meta_data: Vec::new(),
        }
    }

    /// Closes the open meal and category, then expects a category title.
    fn start_new_category(&mut self) {
        if let Some(mut category) = self.curr_category.take() {
            if let Some(meal) = self.curr_meal.take() {
                category.add_meal(meal);
            }
            self.categories.push(category);
        }
        self.mode = Mode::CategoryTitle;
    }

    /// Closes the open meal into the current category (opening an unnamed
    /// one when meals show up before any heading), then expects a meal
    /// title.
    fn start_new_meal(&mut self) {
        if self.curr_category.is_none() {
            self.curr_category = Some(Category::new(UNNAMED_CATEGORY_TITLE));
        }
        if let Some(meal) = self.curr_meal.take() {
            if let Some(category) = self.curr_category.as_mut() {
                category.add_meal(meal);
            }
        }
        self.mode = Mode::MealTitle;
    }

    fn open_meal_mut(&mut self, wanted: &str) -> Result<&mut Meal> {
        self.curr_meal
            .as_mut()
            .ok_or_else(|| Error::structure(&format!("{wanted} arrived while no meal was open")))
    }

    /// A start tag. Tags with attributes, and tag names outside the plan's
    /// small vocabulary, switch to [`Mode::Ignore`] so that decorated
    /// wrappers are never mistaken for content markers.
    pub fn start_tag(&mut self, name: &str, has_attributes: bool) {
        let tag = if has_attributes {
            None
        } else {
            PlainTag::from_name(name)
        };
        let Some(tag) = tag else {
            self.mode = Mode::Ignore;
            return;
        };

        self.last_plain_tag = Some(tag);
        match tag {
            PlainTag::H2 => self.start_new_category(),
            PlainTag::H5 => self.start_new_meal(),
            PlainTag::Strong => self.mode = Mode::InfoHeader,
            PlainTag::P => {
                // paragraphs inside a category or meal are descriptions the
                // plan does not track; only leading ones hold metadata
                if self.curr_meal.is_none() && self.curr_category.is_none() {
                    self.mode = Mode::Info;
                }
            }
            PlainTag::Th => self.mode = Mode::PriceHeader,
            PlainTag::Td | PlainTag::Br => {}
        }
    }

    /// A run of text between tags. Whitespace-only runs never transition
    /// or append anything; metadata keeps the raw text, all other captures
    /// are trimmed.
    pub fn text(&mut self, raw: &str) -> Result<()> {
        if self.mode == Mode::Ignore || raw.trim().is_empty() {
            return Ok(());
        }
        if matches!(self.mode, Mode::Start | Mode::Info) {
            self.meta_data.push(raw.to_string());
            return Ok(());
        }

        let data = raw.trim();
        match self.mode {
            Mode::CategoryTitle => {
                debug!("creating new category {data}");
                self.curr_category = Some(Category::new(data));
            }
            Mode::MealTitle => {
                debug!("creating new meal {data}");
                self.curr_meal = Some(Meal::new(data));
            }
            Mode::InfoHeader => {
                if data == self.markers.allergen_header {
                    self.mode = Mode::Allergens;
                } else if data == self.markers.additive_header {
                    self.mode = Mode::Additives;
                } else {
                    return Err(Error::unknown_marker(&format!(
                        "expected {:?} or {:?}, found {data:?}",
                        self.markers.allergen_header, self.markers.additive_header
                    )));
                }
            }
            Mode::Allergens => {
                debug!("adding allergen {data}");
                self.open_meal_mut("an allergen")?.add_allergen(data);
            }
            Mode::Additives => {
                debug!("adding additive {data}");
                self.open_meal_mut("an additive")?.add_additive(data);
            }
            Mode::PriceHeader => {
                if data == self.markers.price_student {
                    self.mode = Mode::Price(PriceRole::Student);
                } else if data == self.markers.price_staff {
                    self.mode = Mode::Price(PriceRole::Staff);
                } else if data == self.markers.price_guest {
                    self.mode = Mode::Price(PriceRole::Guest);
                } else {
                    return Err(Error::unknown_marker(&format!(
                        "unknown price column {data:?}"
                    )));
                }
            }
            Mode::Price(role) => {
                if self.last_plain_tag != Some(PlainTag::Td) {
                    return Err(Error::structure(&format!(
                        "price text {data:?} outside a table cell"
                    )));
                }
                let meal = self.open_meal_mut("a price")?;
                let price = Cents::from_markup_text(data).ok_or_else(|| {
                    Error::price_parse(&format!("no digits in price text {data:?}"))
                })?;
                debug!("setting {role:?} price {price}");
                meal.set_price(role, price);
            }
            // handled by the early returns above
            Mode::Start | Mode::Info | Mode::Ignore => {}
        }
        Ok(())
    }

    /// The document is exhausted: closes the trailing meal and category
    /// the same way a new category heading would.
    pub fn finish(mut self) -> MealPlan {
        self.start_new_category();
        MealPlan {
            categories: self.categories,
            meta_data: self.meta_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Language;

    fn parser() -> MealPlanParser {
        MealPlanParser::new(Markers::for_language(Language::De))
    }

    fn plain(parser: &mut MealPlanParser, name: &str) {
        parser.start_tag(name, false);
    }

    fn feed_category(parser: &mut MealPlanParser, title: &str) {
        plain(parser, "h2");
        parser.text(title).expect("category title should be accepted");
    }

    fn feed_meal(parser: &mut MealPlanParser, title: &str) {
        plain(parser, "h5");
        parser.text(title).expect("meal title should be accepted");
    }

    #[test]
    fn test_category_count_and_order() {
        let mut p = parser();
        for title in ["Suppe", "Hauptgerichte", "Dessert"] {
            feed_category(&mut p, title);
            feed_meal(&mut p, "Etwas");
        }
        let plan = p.finish();
        let titles: Vec<&str> = plan.categories.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["Suppe", "Hauptgerichte", "Dessert"]);
    }

    #[test]
    fn test_meal_closed_once_on_category_transition_and_finalize() {
        let mut p = parser();
        feed_category(&mut p, "Suppe");
        feed_meal(&mut p, "Linsensuppe");
        feed_category(&mut p, "Dessert");
        feed_meal(&mut p, "Pudding");
        let plan = p.finish();

        assert_eq!(plan.categories.len(), 2);
        let meals: Vec<&str> = plan.categories[0]
            .meals
            .iter()
            .map(|m| m.title.as_str())
            .collect();
        assert_eq!(meals, ["Linsensuppe"]);
        let meals: Vec<&str> = plan.categories[1]
            .meals
            .iter()
            .map(|m| m.title.as_str())
            .collect();
        assert_eq!(meals, ["Pudding"]);
    }

    #[test]
    fn test_meal_before_any_heading_gets_unnamed_category() {
        let mut p = parser();
        feed_meal(&mut p, "Linsensuppe");
        let plan = p.finish();
        assert_eq!(plan.categories.len(), 1);
        assert_eq!(plan.categories[0].title, UNNAMED_CATEGORY_TITLE);
        assert_eq!(plan.categories[0].meals[0].title, "Linsensuppe");
    }

    #[test]
    fn test_allergen_and_additive_order() {
        let mut p = parser();
        feed_category(&mut p, "Suppe");
        feed_meal(&mut p, "Eintopf");
        plain(&mut p, "strong");
        p.text("Allergene").expect("allergen header should match");
        for allergen in ["A", "B", "C"] {
            p.text(allergen).expect("allergens should be accepted");
            plain(&mut p, "br");
        }
        plain(&mut p, "strong");
        p.text("Zusatzstoffe").expect("additive header should match");
        p.text("Konservierungsstoff (1)")
            .expect("additives should be accepted");
        let plan = p.finish();

        let meal = &plan.categories[0].meals[0];
        assert_eq!(meal.allergens, ["A", "B", "C"]);
        assert_eq!(meal.additives, ["Konservierungsstoff (1)"]);
    }

    #[test]
    fn test_prices_require_table_cell() {
        let mut p = parser();
        feed_category(&mut p, "Suppe");
        feed_meal(&mut p, "Linsensuppe");
        plain(&mut p, "th");
        p.text("Stud.").expect("price header should match");
        // the price text arrives right after the header instead of a cell
        let err = p.text("3,80 €").expect_err("price outside td should fail");
        assert!(matches!(err, Error::Structure(_)));
    }

    #[test]
    fn test_price_capture_per_role() {
        let mut p = parser();
        feed_category(&mut p, "Suppe");
        feed_meal(&mut p, "Linsensuppe");
        for (header, text) in [("Stud.", "3,80 €"), ("Bed.", "4,50 €"), ("Gast", "5,20 €")] {
            plain(&mut p, "th");
            p.text(header).expect("price header should match");
            plain(&mut p, "td");
            p.text(text).expect("price cell should be accepted");
        }
        let plan = p.finish();

        let meal = &plan.categories[0].meals[0];
        assert_eq!(meal.student_price, Some(Cents::new(380)));
        assert_eq!(meal.staff_price, Some(Cents::new(450)));
        assert_eq!(meal.guest_price, Some(Cents::new(520)));
    }

    #[test]
    fn test_price_without_digits_fails() {
        let mut p = parser();
        feed_category(&mut p, "Suppe");
        feed_meal(&mut p, "Linsensuppe");
        plain(&mut p, "th");
        p.text("Stud.").expect("price header should match");
        plain(&mut p, "td");
        let err = p.text("--").expect_err("digitless price should fail");
        assert!(matches!(err, Error::PriceParse(_)));
    }

    #[test]
    fn test_unknown_info_header_fails_without_mutation() {
        let mut p = parser();
        feed_category(&mut p, "Suppe");
        feed_meal(&mut p, "Linsensuppe");
        plain(&mut p, "strong");
        let err = p.text("Nährwerte").expect_err("unknown header should fail");
        assert!(matches!(err, Error::UnknownMarker(_)));
    }

    #[test]
    fn test_unknown_price_header_fails() {
        let mut p = parser();
        feed_category(&mut p, "Suppe");
        feed_meal(&mut p, "Linsensuppe");
        plain(&mut p, "th");
        let err = p.text("Alumni").expect_err("unknown column should fail");
        assert!(matches!(err, Error::UnknownMarker(_)));
    }

    #[test]
    fn test_allergen_without_meal_fails() {
        let mut p = parser();
        plain(&mut p, "strong");
        p.text("Allergene").expect("allergen header should match");
        let err = p.text("Gluten (40)").expect_err("no meal is open");
        assert!(matches!(err, Error::Structure(_)));
    }

    #[test]
    fn test_whitespace_only_text_is_inert() {
        let mut p = parser();
        p.text("   \n\t ").expect("whitespace should be skipped");
        feed_category(&mut p, "Suppe");
        p.text("  \n ").expect("whitespace should be skipped");
        feed_meal(&mut p, "Linsensuppe");
        let plan = p.finish();
        assert!(plan.meta_data.is_empty());
        assert_eq!(plan.categories.len(), 1);
        assert_eq!(plan.categories[0].title, "Suppe");
    }

    #[test]
    fn test_metadata_keeps_raw_text() {
        let mut p = parser();
        p.text("Achtung: geänderte Öffnungszeiten ")
            .expect("leading text should be captured");
        plain(&mut p, "p");
        p.text("Heute kein Buffet")
            .expect("paragraph text should be captured");
        feed_category(&mut p, "Suppe");
        let plan = p.finish();
        assert_eq!(
            plan.meta_data,
            ["Achtung: geänderte Öffnungszeiten ", "Heute kein Buffet"]
        );
    }

    #[test]
    fn test_paragraph_inside_meal_is_dropped() {
        let mut p = parser();
        feed_category(&mut p, "Suppe");
        feed_meal(&mut p, "Linsensuppe");
        plain(&mut p, "p");
        p.text("mit frischem Gemüse")
            .expect("description should be dropped silently");
        let plan = p.finish();
        assert!(plan.meta_data.is_empty());
        assert_eq!(plan.categories[0].meals[0].title, "Linsensuppe");
    }

    #[test]
    fn test_decorated_tag_swallows_text() {
        let mut p = parser();
        feed_category(&mut p, "Suppe");
        p.start_tag("h2", true);
        p.text("not a real category")
            .expect("decorated heading text should be dropped");
        feed_meal(&mut p, "Linsensuppe");
        let plan = p.finish();
        assert_eq!(plan.categories.len(), 1);
        assert_eq!(plan.categories[0].title, "Suppe");
        assert_eq!(plan.categories[0].meals[0].title, "Linsensuppe");
    }

    #[test]
    fn test_unknown_tag_swallows_text_until_recognized_tag() {
        let mut p = parser();
        p.start_tag("div", false);
        p.text("styling noise").expect("noise should be dropped");
        p.text("more noise").expect("noise should be dropped");
        feed_category(&mut p, "Suppe");
        let plan = p.finish();
        assert!(plan.meta_data.is_empty());
        assert_eq!(plan.categories[0].title, "Suppe");
    }

    #[test]
    fn test_empty_input_yields_empty_plan() {
        let plan = parser().finish();
        assert!(plan.categories.is_empty());
        assert!(plan.meta_data.is_empty());
    }

    #[test]
    fn test_english_markers() {
        let mut p = MealPlanParser::new(Markers::for_language(Language::En));
        plain(&mut p, "h2");
        p.text("Soups").expect("category title should be accepted");
        plain(&mut p, "h5");
        p.text("Lentil soup").expect("meal title should be accepted");
        plain(&mut p, "strong");
        p.text("Allergens").expect("english header should match");
        p.text("gluten (40)").expect("allergen should be accepted");
        plain(&mut p, "th");
        p.text("Student").expect("english price header should match");
        plain(&mut p, "td");
        p.text("3.80 €").expect("price cell should be accepted");
        let plan = p.finish();

        let meal = &plan.categories[0].meals[0];
        assert_eq!(meal.allergens, ["gluten (40)"]);
        assert_eq!(meal.student_price, Some(Cents::new(380)));
    }
}

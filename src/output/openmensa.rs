use std::io::Cursor;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use regex::Regex;

use crate::canteen::Canteen;
use crate::error::{Error, Result};
use crate::lang::Language;
use crate::menu::{MealPlan, PriceRole};

static FEED_NAMESPACE: &str = "http://openmensa.org/open-mensa-v2";
static FEED_SCHEMA: &str =
    "http://openmensa.org/open-mensa-v2 http://openmensa.org/open-mensa-v2.xsd";
static FEED_VERSION: &str = "5.04-4";

/// Serializes the full, unfiltered plan as an OpenMensa v2 feed document.
pub fn feed_document(plan: &MealPlan, date: NaiveDate, indent: bool) -> Result<String> {
    let mut writer = if indent {
        Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2)
    } else {
        Writer::new(Cursor::new(Vec::new()))
    };

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(|e| Error::Xml(e.to_string()))?;

    let mut root = BytesStart::new("openmensa");
    root.push_attribute(("version", "2.1"));
    root.push_attribute(("xmlns", FEED_NAMESPACE));
    root.push_attribute(("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"));
    root.push_attribute(("xsi:schemaLocation", FEED_SCHEMA));
    start(&mut writer, root)?;

    text_element(&mut writer, "version", FEED_VERSION)?;

    start(&mut writer, BytesStart::new("canteen"))?;
    let mut day = BytesStart::new("day");
    day.push_attribute(("date", date.format("%Y-%m-%d").to_string().as_str()));
    start(&mut writer, day)?;

    if !plan.meta_data.is_empty() {
        text_element(&mut writer, "meta_data", &plan.meta_data.join(";"))?;
    }

    for category in &plan.categories {
        let mut element = BytesStart::new("category");
        element.push_attribute(("name", category.title.as_str()));
        start(&mut writer, element)?;
        for meal in &category.meals {
            start(&mut writer, BytesStart::new("meal"))?;
            text_element(&mut writer, "name", &meal.title)?;

            let note: Vec<&str> = meal
                .allergens
                .iter()
                .chain(meal.additives.iter())
                .map(String::as_str)
                .collect();
            text_element(&mut writer, "note", &note.join(", "))?;

            for role in [PriceRole::Student, PriceRole::Staff, PriceRole::Guest] {
                let mut price = BytesStart::new("price");
                price.push_attribute(("role", role.feed_role()));
                match meal.price(role) {
                    Some(cents) => {
                        start(&mut writer, price)?;
                        text(&mut writer, &cents.to_string())?;
                        end(&mut writer, "price")?;
                    }
                    None => writer
                        .write_event(Event::Empty(price))
                        .map_err(|e| Error::Xml(e.to_string()))?,
                }
            }
            end(&mut writer, "meal")?;
        }
        end(&mut writer, "category")?;
    }

    end(&mut writer, "day")?;
    end(&mut writer, "canteen")?;
    end(&mut writer, "openmensa")?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| Error::Xml(e.to_string()))
}

/// Writes the feed next to the current directory and returns its file
/// name, derived from the query and the current time.
pub fn save_plan(
    plan: &MealPlan,
    canteen: Canteen,
    language: Language,
    date: NaiveDate,
    indent: bool,
) -> Result<String> {
    let document = feed_document(plan, date, indent)?;
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    let stem = slugify(&format!(
        "{canteen}_{language}_{}_{timestamp}",
        date.format("%Y-%m-%d")
    ));
    let filename = format!("{stem}.xml");
    std::fs::write(&filename, document)?;
    Ok(filename)
}

fn start<W: std::io::Write>(writer: &mut Writer<W>, element: BytesStart<'_>) -> Result<()> {
    writer
        .write_event(Event::Start(element))
        .map_err(|e| Error::Xml(e.to_string()))
}

fn end<W: std::io::Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(|e| Error::Xml(e.to_string()))
}

fn text<W: std::io::Write>(writer: &mut Writer<W>, content: &str) -> Result<()> {
    writer
        .write_event(Event::Text(BytesText::new(content)))
        .map_err(|e| Error::Xml(e.to_string()))
}

fn text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    content: &str,
) -> Result<()> {
    start(writer, BytesStart::new(name))?;
    text(writer, content)?;
    end(writer, name)
}

/// File-name-safe version of a string: lowercased, ASCII only, everything
/// that is not a word character collapsed away and whitespace runs turned
/// into single dashes.
fn slugify(value: &str) -> String {
    static DISALLOWED: OnceLock<Regex> = OnceLock::new();
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    let disallowed = DISALLOWED.get_or_init(|| Regex::new(r"[^\w\s-]").expect("regex should be valid"));
    let separators = SEPARATORS.get_or_init(|| Regex::new(r"[-\s]+").expect("regex should be valid"));

    let ascii: String = value.to_lowercase().chars().filter(char::is_ascii).collect();
    let cleaned = disallowed.replace_all(&ascii, "");
    let slug = separators.replace_all(&cleaned, "-");
    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{Category, Cents, Meal};

    fn sample_plan() -> MealPlan {
        let mut soup = Category::new("Suppe");
        let mut lentil = Meal::new("Linsensuppe");
        lentil.set_price(PriceRole::Student, Cents::new(380));
        lentil.add_allergen("Gluten (40)");
        lentil.add_additive("Konservierungsstoff (1)");
        soup.add_meal(lentil);
        MealPlan {
            categories: vec![soup],
            meta_data: vec!["Zeile 1".to_string(), "Zeile 2".to_string()],
        }
    }

    fn query_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).expect("test date should be valid")
    }

    #[test]
    fn test_feed_document_shape() {
        let document =
            feed_document(&sample_plan(), query_date(), false).expect("plan should serialize");
        assert!(document.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(document.contains("<openmensa version=\"2.1\""));
        assert!(document.contains("xmlns=\"http://openmensa.org/open-mensa-v2\""));
        assert!(document.contains("<version>5.04-4</version>"));
        assert!(document.contains("<day date=\"2026-08-06\">"));
        assert!(document.contains("<meta_data>Zeile 1;Zeile 2</meta_data>"));
        assert!(document.contains("<category name=\"Suppe\">"));
        assert!(document.contains("<name>Linsensuppe</name>"));
        assert!(document.contains("<note>Gluten (40), Konservierungsstoff (1)</note>"));
        assert!(document.contains("<price role=\"student\">3.80</price>"));
        assert!(document.contains("<price role=\"employee\"/>"));
        assert!(document.contains("<price role=\"other\"/>"));
    }

    #[test]
    fn test_absent_meta_data_is_omitted() {
        let mut plan = sample_plan();
        plan.meta_data.clear();
        let document = feed_document(&plan, query_date(), false).expect("plan should serialize");
        assert!(!document.contains("meta_data"));
    }

    #[test]
    fn test_indented_document_keeps_content() {
        let document =
            feed_document(&sample_plan(), query_date(), true).expect("plan should serialize");
        assert!(document.contains('\n'));
        assert!(document.contains("<name>Linsensuppe</name>"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(
            slugify("CAMPO_de_2026-08-06_1754000000"),
            "campo_de_2026-08-06_1754000000"
        );
        assert_eq!(slugify("CasinoZEF/ZEI_en"), "casinozefzei_en");
        assert_eq!(slugify("Rabinstraße"), "rabinstrae");
        assert_eq!(slugify("  spaced  out  "), "spaced-out");
    }
}

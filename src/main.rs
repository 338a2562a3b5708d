#![warn(clippy::all, clippy::pedantic)]

mod canteen;
mod date;
mod error;
mod fetch;
mod lang;
mod menu;
mod output;
mod parse;

use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::Parser;
use colored::Colorize;
use log::LevelFilter;

use crate::canteen::Canteen;
use crate::lang::Language;
use crate::menu::{removal_mask, Category, DietFilter, PriceRole};
use crate::output::DisplayOptions;

pub use error::Result;

/// Query meal plans for university canteens in Bonn.
#[derive(Parser, Debug)]
#[command(name = "mensa", version, about)]
struct Cli {
    /// Only show vegan options
    #[arg(long, conflicts_with = "vegetarian")]
    vegan: bool,

    /// Only show vegetarian options
    #[arg(long)]
    vegetarian: bool,

    /// Only show gluten free options
    #[arg(long)]
    glutenfree: bool,

    /// The canteen to query
    #[arg(long, value_enum, default_value_t = Canteen::Campo)]
    mensa: Canteen,

    /// Meal categories to hide
    #[arg(
        long,
        num_args = 0..,
        value_name = "CATEGORY",
        default_values_t = ["Buffet".to_string(), "Dessert".to_string()]
    )]
    filter_categories: Vec<String>,

    /// The date to query for in YYYY-MM-DD format. Defaults to the next
    /// day the canteens serve on
    #[arg(long)]
    date: Option<NaiveDate>,

    /// The price category to show
    #[arg(long, value_enum, default_value_t = PriceRole::Student)]
    price: PriceRole,

    /// The language of the meal plan to query
    #[arg(long, value_enum, default_value_t = Language::De)]
    lang: Language,

    /// Show all allergens. By default, only allergens relevant to vegans
    /// (e.g. milk or fish) are shown
    #[arg(long)]
    show_all_allergens: bool,

    /// Show additives
    #[arg(long)]
    show_additives: bool,

    /// Do not use any ANSI colors in the output
    #[arg(long)]
    no_colors: bool,

    /// Output in markdown table format
    #[arg(long)]
    markdown: bool,

    /// Save the meal plan with all allergens as an OpenMensa XML file
    #[arg(long)]
    xml: bool,

    /// Indent the generated XML file for better readability
    #[arg(long)]
    indent_xml: bool,

    /// Print debug output
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn diet_filter(&self) -> Option<DietFilter> {
        if self.vegan {
            Some(DietFilter::Vegan)
        } else if self.vegetarian {
            Some(DietFilter::Vegetarian)
        } else {
            None
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    pretty_env_logger::formatted_builder()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init();
    if cli.no_colors {
        colored::control::set_override(false);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let date = cli
        .date
        .unwrap_or_else(|| date::next_serving_day(Local::now().date_naive()));
    let diet_filter = cli.diet_filter();

    let filter_str = match diet_filter {
        Some(DietFilter::Vegan) => " [vegan]",
        Some(DietFilter::Vegetarian) => " [vegetarian]",
        None => "",
    };
    let header = format!("Mensa {} – {date}{filter_str} [{}]", cli.mensa, cli.lang);
    if cli.markdown {
        println!("### {header}\n");
    } else if !cli.xml {
        println!("{}", header.magenta());
    }

    let client = fetch::make_client()?;
    let page = fetch::meal_plan_page(&client, date, cli.mensa, cli.lang).await?;
    let plan = parse::parse_meal_plan(&page, cli.lang)?;

    if !cli.xml && !plan.meta_data.is_empty() {
        println!("\n{}\n", plan.meta_data.join("\n"));
    }

    if plan.categories.is_empty() {
        println!(
            "{}",
            format!(
                "Query failed. Please check https://www.studierendenwerk-bonn.de \
                 if the mensa '{}' is open at {date}.",
                cli.mensa
            )
            .red()
        );
        return Ok(());
    }

    let visible: Vec<&Category> = plan
        .categories
        .iter()
        .filter(|category| !cli.filter_categories.contains(&category.title))
        .collect();
    if visible.is_empty() {
        return Ok(());
    }

    if cli.xml {
        let filename = output::save_plan(&plan, cli.mensa, cli.lang, date, cli.indent_xml)?;
        println!("XML saved to {filename}");
    }

    let mask = removal_mask(diet_filter, cli.glutenfree);
    let options = DisplayOptions {
        price_role: cli.price,
        language: cli.lang,
        show_all_allergens: cli.show_all_allergens,
        show_additives: cli.show_additives,
    };
    if cli.markdown {
        print!("{}", output::render_table(&visible, mask, &options));
    } else if !cli.xml {
        print!("{}", output::render_plan(&visible, mask, &options));
    }
    Ok(())
}

use chrono::NaiveDate;
use log::debug;
use reqwest::Client;

use crate::canteen::Canteen;
use crate::lang::Language;

static MEALS_URL: &str = "https://www.studierendenwerk-bonn.de/index.php?ajax=meals";

pub fn make_client() -> reqwest::Result<Client> {
    Client::builder().gzip(true).build()
}

/// Requests one canteen's plan for one day and returns the raw markup the
/// endpoint answers with. The endpoint takes a form-encoded POST and emits
/// an HTML fragment, not a full page.
pub async fn meal_plan_page(
    client: &Client,
    date: NaiveDate,
    canteen: Canteen,
    language: Language,
) -> reqwest::Result<String> {
    let params = [
        ("date", date.format("%Y-%m-%d").to_string()),
        ("canteen", canteen.request_id().to_string()),
        ("L", language.request_id().to_string()),
    ];
    debug!("querying {MEALS_URL} with {params:?}");
    let response = client.post(MEALS_URL).form(&params).send().await?;
    response.text().await
}

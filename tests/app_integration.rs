use chrono::{Local, NaiveDate};
use pbrates::core::config::AppConfig;
use pbrates::core::{Currency, DateKey, FilteredResult, RateValue};
use tracing::{error, info};

const API_PATH: &str = "/p24api/exchange_rates";

mod test_utils {
    use super::API_PATH;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub fn day_json(date: &str, rates: &str) -> String {
        format!(
            r#"{{"date": "{date}", "bank": "PB", "baseCurrency": 980, "baseCurrencyLit": "UAH", "exchangeRate": [{rates}]}}"#
        )
    }

    pub async fn mount_day(mock_server: &MockServer, date: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(API_PATH))
            .and(query_param("date", date))
            .respond_with(response)
            .expect(1)
            .mount(mock_server)
            .await;
    }

    pub fn config_for(mock_server: &MockServer) -> pbrates::core::config::AppConfig {
        pbrates::core::config::AppConfig::with_base_url(&format!(
            "{}{}",
            mock_server.uri(),
            API_PATH
        ))
    }
}

fn last_days(n: i64) -> Vec<String> {
    DateKey::last_n_days(Local::now().date_naive(), n)
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test_log::test(tokio::test)]
async fn test_full_flow_skips_failed_and_empty_days() {
    use wiremock::{MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    let days = last_days(3);

    let eur_usd = r#"
        {"baseCurrency": "UAH", "currency": "EUR", "saleRateNB": 42.6, "purchaseRateNB": 42.6, "saleRate": 43.1, "purchaseRate": 42.4},
        {"baseCurrency": "UAH", "currency": "GBP", "saleRateNB": 49.5, "purchaseRateNB": 49.5},
        {"baseCurrency": "UAH", "currency": "USD", "saleRateNB": 39.5, "purchaseRateNB": 39.2}
    "#;
    let gbp_only = r#"{"baseCurrency": "UAH", "currency": "GBP", "saleRate": 50.0, "purchaseRate": 49.0}"#;

    test_utils::mount_day(
        &mock_server,
        &days[0],
        ResponseTemplate::new(200).set_body_string(test_utils::day_json(&days[0], eur_usd)),
    )
    .await;
    test_utils::mount_day(&mock_server, &days[1], ResponseTemplate::new(500)).await;
    test_utils::mount_day(
        &mock_server,
        &days[2],
        ResponseTemplate::new(200).set_body_string(test_utils::day_json(&days[2], gbp_only)),
    )
    .await;

    let result = pbrates::fetch_rates(3, &test_utils::config_for(&mock_server)).await;

    assert_eq!(result.len(), 1);
    let entry = &result[0];
    assert_eq!(entry.date, days[0]);
    assert_eq!(entry.rates.len(), 2);
    assert_eq!(entry.rates[&Currency::Eur].sale, RateValue::from(43.1));
    assert_eq!(entry.rates[&Currency::Eur].purchase, RateValue::from(42.4));
    assert_eq!(entry.rates[&Currency::Usd].sale, RateValue::from(39.5));
    assert_eq!(entry.rates[&Currency::Usd].purchase, RateValue::from(39.2));

    // Output survives a serialization round trip.
    let text = serde_json::to_string_pretty(&result).unwrap();
    let reparsed: FilteredResult = serde_json::from_str(&text).unwrap();
    assert_eq!(reparsed, result);
}

#[test_log::test(tokio::test)]
async fn test_command_output_is_indented_json_of_qualifying_days() {
    use wiremock::{MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();

    let eur_usd = r#"
        {"baseCurrency": "UAH", "saleRateNB": 27.1, "purchaseRateNB": 27.1},
        {"baseCurrency": "UAH", "currency": "USD", "saleRateNB": 39.5, "purchaseRateNB": 39.2, "saleRate": 43, "purchaseRate": 42.5},
        {"baseCurrency": "UAH", "currency": "EUR", "saleRateNB": 42.6, "purchaseRateNB": 42.6}
    "#;
    let gbp_only = r#"{"baseCurrency": "UAH", "currency": "GBP", "saleRate": 50.0, "purchaseRate": 49.0}"#;

    test_utils::mount_day(
        &mock_server,
        "10.05.2024",
        ResponseTemplate::new(200).set_body_string(test_utils::day_json("10.05.2024", eur_usd)),
    )
    .await;
    test_utils::mount_day(&mock_server, "09.05.2024", ResponseTemplate::new(503)).await;
    test_utils::mount_day(
        &mock_server,
        "08.05.2024",
        ResponseTemplate::new(200).set_body_string(test_utils::day_json("08.05.2024", gbp_only)),
    )
    .await;

    let output =
        pbrates::cli::rates::render_rates(3, &test_utils::config_for(&mock_server), today)
            .await
            .expect("Command output");

    let expected = r#"[
  {
    "10.05.2024": {
      "EUR": {
        "sale": 42.6,
        "purchase": 42.6
      },
      "USD": {
        "sale": 43,
        "purchase": 42.5
      }
    }
  }
]"#;
    assert_eq!(output, expected);
}

#[test_log::test(tokio::test)]
async fn test_requests_are_capped_at_ten_days() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    let body = test_utils::day_json(
        "01.01.2024",
        r#"{"currency": "USD", "saleRate": 39.0, "purchaseRate": 38.5}"#,
    );
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(10)
        .mount(&mock_server)
        .await;

    let result = pbrates::fetch_rates(25, &test_utils::config_for(&mock_server)).await;
    assert_eq!(result.len(), 10);

    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    let mut requested: Vec<String> = requests
        .iter()
        .filter_map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "date")
                .map(|(_, v)| v.into_owned())
        })
        .collect();
    let mut expected = last_days(10);
    requested.sort();
    expected.sort();
    assert_eq!(requested, expected);
}

#[test_log::test(tokio::test)]
async fn test_non_positive_days_issue_no_requests() {
    use wiremock::MockServer;

    let mock_server = MockServer::start().await;
    let config = test_utils::config_for(&mock_server);

    assert!(pbrates::fetch_rates(0, &config).await.is_empty());
    assert!(pbrates::fetch_rates(-5, &config).await.is_empty());

    let result = pbrates::run_command(0, &config).await;
    assert!(result.is_ok(), "Command failed with: {:?}", result.err());

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_unreachable_upstream_does_not_fail_the_command() {
    let config = AppConfig::with_base_url("http://127.0.0.1:9/p24api/exchange_rates");

    let result = pbrates::run_command(2, &config).await;
    assert!(result.is_ok(), "Command failed with: {:?}", result.err());

    assert!(pbrates::fetch_rates(2, &config).await.is_empty());
}

#[test_log::test(tokio::test)]
#[ignore = "hits the live PrivatBank API"]
async fn test_real_privatbank_api() {
    let config = AppConfig::default();
    info!(base_url = %config.provider.base_url, "Fetching rates from PrivatBank");

    let result = pbrates::fetch_rates(2, &config).await;
    info!(?result, "Received filtered rates");

    if result.is_empty() {
        error!("No EUR/USD rates returned for the last two days");
        panic!("No EUR/USD rates returned for the last two days");
    }
    for entry in &result {
        assert!(entry.date.parse::<DateKey>().is_ok());
        assert!(!entry.rates.is_empty());
    }
}

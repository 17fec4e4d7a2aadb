use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};
use ytswrap_lib::{Config, FanoutSettings, ListingRequest, MovieListing, PortalClient};

fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn page_body(page: u32, movies: Value) -> Value {
    json!({
        "status": "ok",
        "status_message": "Query was successful",
        "data": {
            "movie_count": 4321,
            "limit": 50,
            "page_number": page,
            "movies": movies
        }
    })
}

fn client_for(server: &MockServer) -> PortalClient {
    let config = Config {
        yts_api_url: server.uri(),
        imdb_api_url: server.uri(),
        subsource_api_url: server.uri(),
        ..Config::default()
    };
    PortalClient::new(&config).unwrap()
}

async fn mount_page(server: &MockServer, page: u32, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/list_movies.json"))
        .and(query_param("page", page.to_string()))
        .respond_with(template)
        .mount(server)
        .await;
}

async fn mount_empty_fallback(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/list_movies.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(0, json!([]))))
        .mount(server)
        .await;
}

async fn aggregated(client: &PortalClient, pairs: &[(&str, &str)]) -> Value {
    let request = ListingRequest::from_params(&params(pairs)).unwrap();
    let listing = client.list_movies(&request).await.unwrap();
    assert!(matches!(listing, MovieListing::Aggregated(_)));
    serde_json::to_value(&listing).unwrap()
}

fn ids(body: &Value) -> Vec<i64> {
    body["data"]["movies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn year_range_filters_and_dedupes() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_json(page_body(
            1,
            json!([
                {"id": 10, "year": 1999, "title": "first"},
                {"id": 11, "year": 2001, "title": "too new"},
                {"id": 12, "year": 2000, "title": "edge"},
                {"id": 10, "year": 1999, "title": "repeat"}
            ]),
        )),
    )
    .await;
    mount_empty_fallback(&server).await;

    let client = client_for(&server);
    let body = aggregated(
        &client,
        &[("year", "2000_and_less"), ("limit", "20"), ("page", "1")],
    )
    .await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["data"]["movie_count"], 2);
    assert_eq!(body["data"]["page_count"], 1);
    assert_eq!(body["data"]["page_number"], 1);
    assert_eq!(body["data"]["limit"], 20);
    assert_eq!(ids(&body), vec![10, 12]);
    assert_eq!(body["data"]["movies"][0]["title"], "first");
}

#[tokio::test]
async fn failed_page_only_loses_its_own_entries() {
    let server = MockServer::start().await;
    for page in 1..=20u32 {
        let template = if page == 3 {
            ResponseTemplate::new(500).set_body_string("boom")
        } else {
            ResponseTemplate::new(200)
                .set_body_json(page_body(page, json!([{"id": page, "year": 1990}])))
        };
        mount_page(&server, page, template).await;
    }

    let client = client_for(&server);
    let body = aggregated(
        &client,
        &[("year", "2000_and_less"), ("limit", "50"), ("page", "1")],
    )
    .await;

    assert_eq!(body["data"]["movie_count"], 19);
    let expected: Vec<i64> = (1..=20).filter(|p| *p != 3).collect();
    assert_eq!(ids(&body), expected);
}

#[tokio::test]
async fn malformed_and_missing_payloads_contribute_nothing() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"),
    )
    .await;
    mount_page(
        &server,
        2,
        ResponseTemplate::new(200).set_body_json(json!({"status": "error"})),
    )
    .await;
    mount_page(
        &server,
        3,
        ResponseTemplate::new(200).set_body_json(page_body(3, json!([{"id": 7, "year": 1985}]))),
    )
    .await;
    mount_empty_fallback(&server).await;

    let client = client_for(&server);
    let body = aggregated(&client, &[("year", "2000_and_less")]).await;

    assert_eq!(body["data"]["movie_count"], 1);
    assert_eq!(ids(&body), vec![7]);
}

#[tokio::test]
async fn lowest_page_wins_for_duplicates() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        2,
        ResponseTemplate::new(200)
            .set_body_json(page_body(2, json!([{"id": 5, "year": 1995, "title": "page two"}])))
            .set_delay(std::time::Duration::from_millis(200)),
    )
    .await;
    mount_page(
        &server,
        7,
        ResponseTemplate::new(200)
            .set_body_json(page_body(7, json!([{"id": 5, "year": 1995, "title": "page seven"}]))),
    )
    .await;
    mount_empty_fallback(&server).await;

    let client = client_for(&server);
    let body = aggregated(&client, &[("year", "2000_and_less")]).await;

    assert_eq!(body["data"]["movie_count"], 1);
    assert_eq!(body["data"]["movies"][0]["title"], "page two");
}

#[tokio::test]
async fn every_branch_uses_upstream_page_size_and_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list_movies.json"))
        .and(query_param("limit", "50"))
        .and(query_param("genre", "western"))
        .and(query_param_is_missing("year"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, json!([]))))
        .expect(20)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let body = aggregated(
        &client,
        &[("year", "2000_and_less"), ("genre", "western"), ("limit", "10")],
    )
    .await;

    assert_eq!(body["data"]["movie_count"], 0);
    assert_eq!(body["data"]["limit"], 10);
}

#[tokio::test]
async fn total_outage_yields_empty_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list_movies.json"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let body = aggregated(&client, &[("year", "2000_and_less"), ("page", "4")]).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["data"]["movie_count"], 0);
    assert_eq!(body["data"]["page_count"], 0);
    assert_eq!(body["data"]["page_number"], 4);
    assert_eq!(body["data"]["movies"], json!([]));
}

#[tokio::test]
async fn page_past_the_end_is_empty_with_counts() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_json(page_body(
            1,
            json!([{"id": 1, "year": 1990}, {"id": 2, "year": 1991}, {"id": 3}]),
        )),
    )
    .await;
    mount_empty_fallback(&server).await;

    let client = client_for(&server);
    let body = aggregated(
        &client,
        &[("year", "2000_and_less"), ("limit", "2"), ("page", "5")],
    )
    .await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["data"]["movie_count"], 3);
    assert_eq!(body["data"]["page_count"], 2);
    assert_eq!(body["data"]["movies"], json!([]));
}

#[tokio::test]
async fn slow_branch_times_out_without_failing_the_listing() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        ResponseTemplate::new(200)
            .set_body_json(page_body(1, json!([{"id": 1, "year": 1990}])))
            .set_delay(std::time::Duration::from_secs(2)),
    )
    .await;
    mount_page(
        &server,
        2,
        ResponseTemplate::new(200).set_body_json(page_body(2, json!([{"id": 2, "year": 1990}]))),
    )
    .await;
    mount_empty_fallback(&server).await;

    let config = Config {
        yts_api_url: server.uri(),
        request_timeout: std::time::Duration::from_millis(300),
        ..Config::default()
    };
    let client = PortalClient::new(&config).unwrap();
    let body = aggregated(&client, &[("year", "2000_and_less")]).await;

    assert_eq!(ids(&body), vec![2]);
}

#[tokio::test]
async fn other_years_pass_through_unchanged() {
    let server = MockServer::start().await;
    let upstream = json!({
        "status": "ok",
        "status_message": "Query was successful",
        "data": {"movie_count": 812, "limit": 20, "page_number": 2, "movies": [{"id": 1, "year": 2010}]},
        "@meta": {"api_version": 2}
    });
    Mock::given(method("GET"))
        .and(path("/list_movies.json"))
        .and(query_param("query_term", "inception 2010"))
        .and(query_param("year", "2010"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = ListingRequest::from_params(&params(&[
        ("query_term", "inception"),
        ("year", "2010"),
        ("page", "2"),
        ("limit", "20"),
    ]))
    .unwrap();
    let listing = client.list_movies(&request).await.unwrap();

    assert_eq!(listing.movie_count(), 812);
    assert_eq!(serde_json::to_value(&listing).unwrap(), upstream);
}

#[tokio::test]
async fn pass_through_failure_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list_movies.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = ListingRequest::from_params(&params(&[("genre", "drama")])).unwrap();
    assert!(client.list_movies(&request).await.is_err());
}

#[tokio::test]
async fn string_counts_do_not_discard_a_page() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "data": {
                "movie_count": "4321",
                "limit": "50",
                "page_number": null,
                "movies": [{"id": 1, "year": 1990}, {"id": 2, "year": 1995}]
            }
        })),
    )
    .await;
    mount_empty_fallback(&server).await;

    let client = client_for(&server);
    let body = aggregated(&client, &[("year", "2000_and_less")]).await;

    assert_eq!(body["data"]["movie_count"], 2);
    assert_eq!(ids(&body), vec![1, 2]);
}

/// Collects formatted log output so tests can count emitted lines.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

#[tokio::test]
async fn failed_pages_are_logged_once_each() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list_movies.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&server)
        .await;

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let config = Config {
        yts_api_url: server.uri(),
        fanout: FanoutSettings {
            max_pages: 3,
            ..FanoutSettings::default()
        },
        ..Config::default()
    };
    let client = PortalClient::new(&config).unwrap();
    let body = aggregated(&client, &[("year", "2000_and_less")]).await;
    assert_eq!(body["data"]["movie_count"], 0);

    let lines = logs.lines();
    assert_eq!(lines.len(), 3, "{:#?}", lines);
    for page in 1..=3 {
        assert!(
            lines
                .iter()
                .any(|line| line.contains(&format!("listing page {}:", page))),
            "{:#?}",
            lines
        );
    }
}

use prensa::config::{parse_config, Config};
use prensa::output::{parse_json, COLUMNS};
use prensa::{ConfigError, ExportFormat, Orchestrator, PrensaError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CUSTOM_SELECTORS: &str = r#"
[portal.selectors]
links = { items = "article", anchor = "a[href]" }
headline = [{ selector = "h1" }]
summary = [{ selector = "p.bajada" }]
body = [{ selector = "div.cuerpo p", mode = "joined-text" }]
date = [{ selector = "time", mode = "attr", attr = "datetime" }, { selector = "time" }]
author = [{ selector = ".autor" }]
"#;

/// Two custom portals served by the mock server: A with two seeds, B with one
fn create_test_config(base_url: &str) -> Config {
    let toml = format!(
        r#"
[scraper]
request-delay = 0.0
portal-delay = 0.0
timeout = 5

[user-agent]
crawler-name = "TestBot"
crawler-version = "1.0.0"
contact-url = "https://example.com/contact"
contact-email = "test@example.com"

[[portal]]
name = "Diario A"
seeds = ["{base}/a/list/1", "{base}/a/list/2"]
{selectors}
[[portal]]
name = "Diario B"
seeds = ["{base}/b/list"]
{selectors}"#,
        base = base_url,
        selectors = CUSTOM_SELECTORS
    );

    parse_config(&toml).expect("test config should be valid")
}

fn listing(links: &[&str]) -> String {
    let items: String = links
        .iter()
        .map(|href| format!(r#"<article><h2><a href="{}">Nota</a></h2></article>"#, href))
        .collect();
    format!("<html><body><main>{}</main></body></html>", items)
}

fn article(headline: &str) -> String {
    format!(
        r#"<html><body>
        <h1>{}</h1>
        <p class="bajada">Bajada de {}</p>
        <time datetime="2026-01-20T09:30:00-03:00">20 de enero</time>
        <div class="cuerpo"><p>Primer párrafo.</p><p>Segundo, con "comillas".</p></div>
        </body></html>"#,
        headline, headline
    )
}

async fn mount_page(server: &MockServer, page: &str, html: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_scrape_two_portals() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Portal A: /a/2 appears on both listing pages, /a/3 is broken
    mount_page(&mock_server, "/a/list/1", listing(&["/a/1", "/a/2"]), 1).await;
    mount_page(
        &mock_server,
        "/a/list/2",
        listing(&["/a/2?utm_source=portada", "/a/3", "/a/4"]),
        1,
    )
    .await;
    mount_page(&mock_server, "/a/1", article("A1"), 1).await;
    mount_page(&mock_server, "/a/2", article("A2"), 1).await;
    Mock::given(method("GET"))
        .and(path("/a/3"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/a/4", article("A4"), 1).await;

    // Portal B: one absolute link, one relative to the listing page
    let absolute = format!("{}/b/1", base_url);
    mount_page(&mock_server, "/b/list", listing(&[absolute.as_str(), "2"]), 1).await;
    mount_page(&mock_server, "/b/1", article("B1"), 1).await;
    mount_page(&mock_server, "/b/2", article("B2"), 1).await;

    let config = create_test_config(&base_url);
    let mut orchestrator = Orchestrator::from_config(&config).unwrap();
    let report = orchestrator.scrape_all().await;

    let collection = orchestrator.collection();
    assert_eq!(collection.len(), 5);
    assert_eq!(
        collection.count_by_newspaper(),
        vec![("Diario A".to_string(), 3), ("Diario B".to_string(), 2)]
    );

    let headlines: Vec<&str> = collection.iter().map(|r| r.headline()).collect();
    assert_eq!(headlines, vec!["A1", "A2", "A4", "B1", "B2"]);

    let first = collection.iter().next().unwrap();
    assert_eq!(first.url(), format!("{}/a/1", base_url));
    assert_eq!(first.date(), "2026-01-20T09:30:00-03:00");
    assert_eq!(
        first.fields().body,
        "Primer párrafo. Segundo, con \"comillas\"."
    );
    assert_eq!(first.fields().author, "");

    assert_eq!(report.portals.len(), 2);
    assert_eq!(report.portals[0].listings_fetched, 2);
    assert_eq!(report.portals[0].duplicates_skipped, 1);
    assert_eq!(report.portals[0].article_failures, 1);
    assert_eq!(report.portals[1].articles_scraped, 2);
    assert_eq!(report.collisions, 0);
}

#[tokio::test]
async fn test_export_files() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/a/list/1", listing(&["/a/1", "/a/2"]), 1).await;
    mount_page(&mock_server, "/a/list/2", listing(&["/a/3"]), 1).await;
    mount_page(&mock_server, "/a/1", article("A1"), 1).await;
    mount_page(&mock_server, "/a/2", article("A2"), 1).await;
    mount_page(&mock_server, "/b/list", listing(&["/b/1", "/b/2"]), 1).await;
    mount_page(&mock_server, "/b/1", article("B1"), 1).await;
    mount_page(&mock_server, "/b/2", article("B2"), 1).await;
    // /a/3 is not mounted and answers 404

    let config = create_test_config(&base_url);
    let mut orchestrator = Orchestrator::from_config(&config).unwrap();
    orchestrator.scrape_all().await;
    assert_eq!(orchestrator.collection().len(), 4);

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("news_data.csv");
    let json_path = dir.path().join("news_data.json");

    assert_eq!(orchestrator.export(ExportFormat::Csv, &csv_path).unwrap(), 4);
    assert_eq!(orchestrator.export(ExportFormat::Json, &json_path).unwrap(), 4);

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    assert_eq!(
        reader.headers().unwrap().iter().collect::<Vec<_>>(),
        COLUMNS.to_vec()
    );
    assert_eq!(reader.records().count(), 4);
    assert_eq!(csv.lines().count(), 5);

    let records = parse_json(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(records.len(), 4);
    for record in &records {
        assert_eq!(orchestrator.collection().get(record.url()), Some(record));
    }

    let view = orchestrator.to_tabular_view();
    assert_eq!(
        view.value_counts("newspaper").unwrap(),
        vec![("Diario A".to_string(), 2), ("Diario B".to_string(), 2)]
    );
}

#[tokio::test]
async fn test_user_agent_header_sent() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact; test@example.com)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_raw(listing(&[]), "text/html"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url);
    let mut orchestrator = Orchestrator::from_config(&config).unwrap();
    let report = orchestrator.scrape_all().await;

    assert!(orchestrator.collection().is_empty());
    assert_eq!(report.total_failures(), 0);
}

#[tokio::test]
async fn test_config_errors_before_any_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri());
    config.portals[1].selectors = None;
    config.portals[1].adapter = Some("desconocido".to_string());

    let result = Orchestrator::from_config(&config);
    assert!(matches!(
        result.err(),
        Some(PrensaError::Config(ConfigError::MissingAdapter { .. }))
    ));

    let mut config = create_test_config(&mock_server.uri());
    config.portals.clear();
    assert!(matches!(
        Orchestrator::from_config(&config).err(),
        Some(PrensaError::Config(ConfigError::NoPortals))
    ));
}

#[tokio::test]
async fn test_builtin_adapter_against_mock_portal() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/politica",
        r#"<html><body>
        <a class="news-article__link" href="/politica/nota-1">1</a>
        <a class="news-article__link" href="/politica/nota-1#comentarios">1 again</a>
        </body></html>"#
            .to_string(),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/politica/nota-1",
        r#"<html><body>
        <h1>Titular MDZ</h1>
        <div class="news-detail__lead"><p>Lead</p></div>
        <div class="news-detail__body"><p>Cuerpo.</p></div>
        <time>20/01/2026</time>
        <a href="/autor/pedro">Pedro</a>
        </body></html>"#
            .to_string(),
        1,
    )
    .await;

    let config = parse_config(&format!(
        r#"
[scraper]
request-delay = 0.0

[[portal]]
name = "MDZ"
seeds = ["{}/politica"]
"#,
        base_url
    ))
    .unwrap();

    let mut orchestrator = Orchestrator::from_config(&config).unwrap();
    let report = orchestrator.scrape_all().await;

    assert_eq!(report.portals[0].duplicates_skipped, 1);
    let record = orchestrator
        .collection()
        .get(&format!("{}/politica/nota-1", base_url))
        .unwrap();
    assert_eq!(record.newspaper(), "MDZ");
    assert_eq!(record.headline(), "Titular MDZ");
    assert_eq!(record.fields().summary, "Lead");
    assert_eq!(record.fields().author, "Pedro");
}

use std::process::Output;
use tokio::process::Command;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BIN: &str = env!("CARGO_BIN_EXE_revtrack_scrape");

fn review(stars: Option<&str>, body: &str) -> String {
    let stars = stars
        .map(|s| format!(r#"<i data-hook="review-star-rating"><span class="a-icon-alt">{s}</span></i>"#))
        .unwrap_or_default();
    format!(
        r#"<div data-hook="review" class="a-section review">{stars}<span data-hook="review-body"><span>{body}</span></span></div>"#
    )
}

fn listing(reviews: &[String]) -> String {
    format!("<html><body>{}</body></html>", reviews.join("\n"))
}

async fn mount_page(server: &MockServer, page: u32, body: String, hits: u64) {
    Mock::given(method("GET"))
        .and(path("/product-reviews/B0TEST"))
        .and(query_param("pageNumber", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(hits)
        .mount(server)
        .await;
}

async fn run(args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .env("RUST_LOG", "info")
        .output()
        .await
        .expect("binary should run")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be a JSON document")
}

#[tokio::test]
async fn missing_url_exits_with_usage() {
    let output = run(&[]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr was: {stderr}");
}

#[tokio::test]
async fn invalid_url_exits_with_failure() {
    let output = run(&["definitely not a url"]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[tokio::test]
async fn two_pages_then_end_of_listing() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        listing(&[
            review(Some("5.0 out of 5 stars"), "Great kettle."),
            review(Some("4.0 out of 5 stars"), "Boils fast."),
        ]),
        1,
    )
    .await;
    mount_page(
        &server,
        2,
        listing(&[
            review(None, "Lid broke."),
            review(Some("1.0 out of 5 stars"), "Leaks."),
        ]),
        1,
    )
    .await;
    // Page 3 is not mounted: the mock server answers 404 and the crawl ends.

    let url = format!("{}/product-reviews/B0TEST", server.uri());
    let output = run(&[&url, "--delay-ms", "0"]).await;

    assert_eq!(output.status.code(), Some(0));
    let json = stdout_json(&output);
    let items = json.as_array().expect("top level array");
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["Stars"], "5.0");
    assert_eq!(items[0]["Description"], "Great kettle.");
    assert_eq!(items[2]["Stars"], "N/A");
    assert_eq!(items[2]["Description"], "Lid broke.");
    assert_eq!(items[3]["Stars"], "1.0");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("[\n  {\n    \"Stars\""), "stdout was: {stdout}");
}

#[tokio::test]
async fn large_pool_is_sampled_to_cap() {
    let server = MockServer::start().await;
    for page in 1..=3 {
        let reviews: Vec<String> = (0..10)
            .map(|i| review(Some("3.0 out of 5 stars"), &format!("page {page} review {i}")))
            .collect();
        // Each page is served once per run, and the test runs twice.
        mount_page(&server, page, listing(&reviews), 2).await;
    }

    let url = format!("{}/product-reviews/B0TEST", server.uri());
    let output = run(&[
        &url,
        "--max-pages",
        "3",
        "--sample-cap",
        "12",
        "--delay-ms",
        "0",
        "--seed",
        "5",
    ])
    .await;

    assert_eq!(output.status.code(), Some(0));
    let json = stdout_json(&output);
    let descriptions: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["Description"].as_str().unwrap())
        .collect();
    assert_eq!(descriptions.len(), 12);

    let mut unique = descriptions.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 12);
    assert!(descriptions.iter().all(|d| d.starts_with("page ")));

    // Same seed, same sample.
    let again = run(&[
        &url,
        "--max-pages",
        "3",
        "--sample-cap",
        "12",
        "--delay-ms",
        "0",
        "--seed",
        "5",
    ])
    .await;
    assert_eq!(stdout_json(&again), json);
}

#[tokio::test]
async fn first_page_failure_emits_empty_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let url = format!("{}/product-reviews/B0TEST", server.uri());
    let output = run(&[&url, "--delay-ms", "0"]).await;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_json(&output), serde_json::json!([]));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("503"), "stderr was: {stderr}");
}

#[tokio::test]
async fn output_file_leaves_stdout_empty() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        listing(&[review(Some("2.0 out of 5 stars"), "Meh.")]),
        1,
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested/reviews.json");
    let url = format!("{}/product-reviews/B0TEST", server.uri());
    let output = run(&[
        &url,
        "--max-pages",
        "1",
        "-o",
        out.to_str().unwrap(),
    ])
    .await;

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written[0]["Stars"], "2.0");
}

#[tokio::test]
async fn header_profile_file_is_applied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(wiremock::matchers::header("authority", "reviews.example.test"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing(&[review(
            Some("4.0 out of 5 stars"),
            "Custom headers ok.",
        )])))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let headers = dir.path().join("headers.yaml");
    std::fs::write(&headers, "authority: reviews.example.test\n").unwrap();

    let url = format!("{}/product-reviews/B0TEST", server.uri());
    let output = run(&[
        &url,
        "--max-pages",
        "1",
        "--headers",
        headers.to_str().unwrap(),
    ])
    .await;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_json(&output)[0]["Description"], "Custom headers ok.");
}

#[tokio::test]
async fn bad_header_profile_fails_run() {
    let dir = tempfile::tempdir().unwrap();
    let headers = dir.path().join("headers.yaml");
    std::fs::write(&headers, "not_a_header: x\n").unwrap();

    let output = run(&[
        "https://www.example.com/product-reviews/B0TEST",
        "--headers",
        headers.to_str().unwrap(),
    ])
    .await;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

// Unit tests for feed retrieval and parsing.
//
// Parsing tests use canned Atom documents. Retrieval tests talk to a
// one-shot HTTP responder on 127.0.0.1, never the real API.

use std::time::Duration;

use chrono::{TimeZone, Utc};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use paperscope::arxiv::client::ArxivClient;
use paperscope::arxiv::feed::{parse_feed, FeedItem};
use paperscope::error::{ParseError, RetrievalError, SearchError};

fn entry(title: &str, published: &str, category: &str) -> String {
    format!(
        r#"<entry>
    <id>http://arxiv.org/abs/2305.00001v1</id>
    <title>{title}</title>
    <published>{published}</published>
    <category term="{category}" scheme="http://arxiv.org/schemas/atom"/>
  </entry>"#
    )
}

fn feed(entries: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom"
      xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/"
      xmlns:arxiv="http://arxiv.org/schemas/atom">
  <title type="html">ArXiv Query: search_query=all:graph</title>
  <opensearch:totalResults>2</opensearch:totalResults>
  <opensearch:startIndex>0</opensearch:startIndex>
  {}
</feed>"#,
        entries.join("\n  ")
    )
}

const ERROR_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>http://arxiv.org/api/errors#incorrect_id_format_for_1234</id>
    <title>Error</title>
    <summary>incorrect id format for 1234</summary>
  </entry>
</feed>"#;

// ============================================================
// parse_feed — happy path
// ============================================================

#[test]
fn parses_entries_in_feed_order() {
    let xml = feed(&[
        entry("Graph Neural Networks for Vision", "2023-05-01T12:00:00Z", "cs.CV"),
        entry("Deep Learning on Graphs", "2021-01-15T08:30:00Z", "cs.LG"),
    ]);
    let page = parse_feed(&xml).unwrap();

    assert_eq!(page.total_results, Some(2));
    assert_eq!(
        page.items,
        vec![
            FeedItem {
                title: "Graph Neural Networks for Vision".to_string(),
                published_at: Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap(),
                category_code: "cs.CV".to_string(),
            },
            FeedItem {
                title: "Deep Learning on Graphs".to_string(),
                published_at: Utc.with_ymd_and_hms(2021, 1, 15, 8, 30, 0).unwrap(),
                category_code: "cs.LG".to_string(),
            },
        ]
    );
}

#[test]
fn empty_feed_is_valid() {
    let page = parse_feed(&feed(&[])).unwrap();
    assert!(page.items.is_empty());
}

#[test]
fn escaped_characters_in_title() {
    let xml = feed(&[entry(
        "Q&amp;A over &lt;Graphs&gt;",
        "2023-05-01T12:00:00Z",
        "cs.CL",
    )]);
    let page = parse_feed(&xml).unwrap();
    assert_eq!(page.items[0].title, "Q&A over <Graphs>");
}

// ============================================================
// parse_feed — failures abort the batch
// ============================================================

fn parse_err(xml: &str) -> ParseError {
    match parse_feed(xml) {
        Err(SearchError::Parse(e)) => e,
        other => panic!("expected ParseError, got {other:?}"),
    }
}

#[test]
fn timestamp_without_z_fails_batch() {
    let xml = feed(&[
        entry("Fine", "2023-05-01T12:00:00Z", "cs.CL"),
        entry("Broken", "2023-05-01T12:00:00", "cs.CL"),
    ]);
    assert_eq!(
        parse_err(&xml),
        ParseError::InvalidTimestamp {
            index: 1,
            value: "2023-05-01T12:00:00".to_string()
        }
    );
}

#[test]
fn missing_category_fails_batch() {
    let xml = feed(&[r#"<entry>
        <title>No category</title>
        <published>2023-05-01T12:00:00Z</published>
      </entry>"#
        .to_string()]);
    assert_eq!(parse_err(&xml), ParseError::MissingCategory { index: 0 });
}

#[test]
fn category_without_term_fails_batch() {
    let xml = feed(&[r#"<entry>
        <title>Bad category</title>
        <published>2023-05-01T12:00:00Z</published>
        <category scheme="http://arxiv.org/schemas/atom"/>
      </entry>"#
        .to_string()]);
    assert_eq!(parse_err(&xml), ParseError::MissingCategory { index: 0 });
}

#[test]
fn missing_title_fails_batch() {
    let xml = feed(&[r#"<entry>
        <published>2023-05-01T12:00:00Z</published>
        <category term="cs.CL"/>
      </entry>"#
        .to_string()]);
    assert_eq!(parse_err(&xml), ParseError::MissingTitle { index: 0 });
}

#[test]
fn missing_published_fails_batch() {
    let xml = feed(&[r#"<entry>
        <title>Undated</title>
        <category term="cs.CL"/>
      </entry>"#
        .to_string()]);
    assert_eq!(parse_err(&xml), ParseError::MissingPublished { index: 0 });
}

#[test]
fn non_xml_body_fails() {
    assert!(matches!(
        parse_err("<html><body>Service Unavailable"),
        ParseError::Document(_)
    ));
}

#[test]
fn arxiv_error_feed_is_retrieval_error() {
    match parse_feed(ERROR_FEED) {
        Err(SearchError::Retrieval(RetrievalError::Api(msg))) => {
            assert_eq!(msg, "incorrect id format for 1234");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

// ============================================================
// ArxivClient::fetch against a local one-shot responder
// ============================================================

/// Serve exactly one HTTP response, returning the base URL and a handle
/// resolving to the raw request head.
async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request: Vec<u8> = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/atom+xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{addr}/api/query"), handle)
}

/// Client for the local responder; bypasses any proxy set in the environment.
fn local_client(url: &str) -> ArxivClient {
    let http = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    ArxivClient::with_client(http, url)
}

#[tokio::test]
async fn fetch_parses_successful_response() {
    let body = feed(&[entry("Spectral Methods", "2022-03-04T05:06:07Z", "math.OC")]);
    let (url, server) = serve_once("200 OK", body).await;

    let client = local_client(&url);
    let page = client.fetch("spectral graph", 20).await.unwrap();
    let request = server.await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].category_code, "math.OC");
    assert!(
        request.starts_with(
            "GET /api/query?search_query=all:spectral%20graph&start=0&max_results=20 HTTP/1.1"
        ),
        "request was: {request}"
    );
}

#[tokio::test]
async fn fetch_non_2xx_is_retrieval_error() {
    let (url, server) = serve_once("503 Service Unavailable", "try later".to_string()).await;

    let client = local_client(&url);
    let err = client.fetch("graph", 20).await.unwrap_err();
    server.await.unwrap();

    match err {
        SearchError::Retrieval(RetrievalError::Status { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "try later");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_malformed_entry_is_parse_error() {
    let body = feed(&[entry("Broken", "not-a-date", "cs.CL")]);
    let (url, server) = serve_once("200 OK", body).await;

    let client = local_client(&url);
    let err = client.fetch("graph", 20).await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(
        err,
        SearchError::Parse(ParseError::InvalidTimestamp { index: 0, .. })
    ));
}

#[tokio::test]
async fn connection_refused_is_retrieval_error() {
    // Bind then drop to get a port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = local_client(&format!("http://{addr}/api/query"));
    let err = client.fetch("graph", 20).await.unwrap_err();
    assert!(matches!(
        err,
        SearchError::Retrieval(RetrievalError::Http(_))
    ));
}

// Atom feed parsing for arXiv query responses.
//
// The export API answers with an Atom document whose `entry` elements carry
// one paper each. We only need three fields per entry: the title, the
// `published` timestamp and the first category code. A single malformed
// entry fails the whole batch.

use chrono::{DateTime, NaiveDateTime, Utc};
use roxmltree::{Document, Node};
use serde::Serialize;

use crate::error::{ParseError, RetrievalError, SearchError};

/// Atom XML namespace used by the arXiv export API.
pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// OpenSearch namespace (carries `totalResults`).
pub const OPENSEARCH_NS: &str = "http://a9.com/-/spec/opensearch/1.1/";

/// Entry ids with this prefix mark an error report instead of a paper.
const API_ERROR_ID_PREFIX: &str = "http://arxiv.org/api/errors";

/// Strict timestamp format of `<published>`.
const PUBLISHED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One paper record from the feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedItem {
    pub title: String,
    pub published_at: DateTime<Utc>,
    pub category_code: String,
}

/// All items of one response, in feed order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedPage {
    pub items: Vec<FeedItem>,
    /// Total matches reported by the server, if it said so
    pub total_results: Option<u64>,
}

/// Parse a full feed document.
///
/// Returns `RetrievalError::Api` when arXiv reports a query error inside
/// an otherwise successful response.
pub fn parse_feed(xml: &str) -> Result<FeedPage, SearchError> {
    let doc = Document::parse(xml).map_err(|e| ParseError::Document(e.to_string()))?;
    let root = doc.root_element();

    let entries: Vec<Node> = root
        .children()
        .filter(|n| n.has_tag_name((ATOM_NS, "entry")))
        .collect();

    if let Some(message) = entries.iter().find_map(api_error_message) {
        return Err(RetrievalError::Api(message).into());
    }

    let items = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    let total_results = child_element(&root, OPENSEARCH_NS, "totalResults")
        .and_then(|n| n.text())
        .and_then(|t| t.trim().parse().ok());

    Ok(FeedPage {
        items,
        total_results,
    })
}

/// Parse a `<published>` value. Only `YYYY-MM-DDTHH:MM:SSZ` is accepted.
pub fn parse_published(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, PUBLISHED_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

fn parse_entry(index: usize, entry: &Node) -> Result<FeedItem, ParseError> {
    let title = child_element(entry, ATOM_NS, "title")
        .and_then(|n| n.text())
        .map(normalize_whitespace)
        .filter(|t| !t.is_empty())
        .ok_or(ParseError::MissingTitle { index })?;

    let published_raw = child_element(entry, ATOM_NS, "published")
        .and_then(|n| n.text())
        .map(str::trim)
        .ok_or(ParseError::MissingPublished { index })?;
    let published_at =
        parse_published(published_raw).ok_or_else(|| ParseError::InvalidTimestamp {
            index,
            value: published_raw.to_string(),
        })?;

    let category_code = child_element(entry, ATOM_NS, "category")
        .and_then(|n| n.attribute("term"))
        .ok_or(ParseError::MissingCategory { index })?
        .to_string();

    Ok(FeedItem {
        title,
        published_at,
        category_code,
    })
}

/// If this entry is an arXiv error report, return its message.
fn api_error_message(entry: &Node) -> Option<String> {
    let id = child_element(entry, ATOM_NS, "id")?.text()?.trim();
    if !id.starts_with(API_ERROR_ID_PREFIX) {
        return None;
    }
    let message = child_element(entry, ATOM_NS, "summary")
        .and_then(|n| n.text())
        .map(normalize_whitespace)
        .unwrap_or_else(|| id.to_string());
    Some(message)
}

fn child_element<'a, 'input>(
    node: &Node<'a, 'input>,
    namespace: &str,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name((namespace, name)))
}

/// arXiv wraps long titles across lines with indentation.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

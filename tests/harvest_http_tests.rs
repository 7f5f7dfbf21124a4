//! End-to-end harvest runs against a mock form endpoint

use mockito::{Matcher, Mock, Server, ServerGuard};
use paged_harvester::domain::{PageRequest, PageSource, SortDirection};
use paged_harvester::infrastructure::{ExtractionMode, FormPageFetcher, HarvestConfig};
use paged_harvester::{HarvestDriver, HarvestError, PageOutcome};
use std::path::Path;
use tempfile::TempDir;

const COOKIE: &str = "ASP.NET_SessionId=test-session";
const AGENT: &str = "Mozilla/5.0 (compatible; NodeFetchBot/1.0)";

fn table(rows: &[[&str; 4]]) -> String {
    let body: String = rows
        .iter()
        .map(|cells| {
            let tds: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
            format!("<tr>{tds}</tr>\n")
        })
        .collect();
    format!("<html><body><table>\n<tr><th>Last</th><th>First</th><th>Id</th><th>Tier</th></tr>\n{body}</table></body></html>")
}

fn config(server: &ServerGuard, output: &Path, total: u32, size: u32) -> HarvestConfig {
    HarvestConfig {
        target_url: format!("{}/members", server.url()),
        credential: COOKIE.to_string(),
        user_agent: AGENT.to_string(),
        total_records: total,
        page_size: size,
        output_path: output.to_path_buf(),
        page_delay_ms: 0,
        request_timeout_seconds: 5,
        ..Default::default()
    }
}

async fn page_mock(server: &mut ServerGuard, start_row: &str, order: &str, status: usize, body: &str) -> Mock {
    server
        .mock("POST", "/members")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_header("cookie", COOKIE)
        .match_header("user-agent", AGENT)
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("SortCol".into(), "LastName".into()),
            Matcher::UrlEncoded("SortOrder".into(), order.into()),
            Matcher::UrlEncoded("StartRow".into(), start_row.into()),
        ]))
        .with_status(status)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(body)
        .expect(1)
        .create_async()
        .await
}

#[tokio::test]
async fn single_page_run_writes_two_lines() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("member_records.txt");

    let page = page_mock(
        &mut server,
        "1",
        "ASC",
        200,
        &table(&[
            ["Adams", "Ann", "1001", "Gold"],
            ["Baker", "Bob", "1002", "Silver"],
        ]),
    )
    .await;

    let driver = HarvestDriver::from_config(&config(&server, &output, 50, 50)).unwrap();
    let report = driver.run().await;

    page.assert_async().await;
    assert!(report.is_complete());
    assert_eq!(report.total_records(), 2);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Adams, Ann, 1001, Gold\nBaker, Bob, 1002, Silver"
    );
}

#[tokio::test]
async fn failing_second_page_keeps_first_page_records() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("member_records.txt");

    let first = page_mock(&mut server, "1", "ASC", 200, &table(&[["Adams", "Ann", "1001", "Gold"]])).await;
    let second = page_mock(&mut server, "51", "ASC", 500, "Internal Server Error").await;

    let driver = HarvestDriver::from_config(&config(&server, &output, 100, 50)).unwrap();
    let report = driver.run().await;

    first.assert_async().await;
    second.assert_async().await;

    assert_eq!(report.page_count, 2);
    assert_eq!(report.total_records(), 1);
    assert_eq!(report.failed_pages(), vec![2]);
    assert!(matches!(
        &report.outcomes[1],
        PageOutcome::Failed { start_row: 51, status: Some(500), .. }
    ));
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "Adams, Ann, 1001, Gold");
    assert!(report.summary().contains("1 of 2 pages failed"));
}

#[tokio::test]
async fn pattern_mode_with_descending_sort() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out").join("records.txt");

    let page = page_mock(
        &mut server,
        "1",
        "DESC",
        200,
        "<tr>\n<td>Zed</td>\n<td>Zoe</td>\n<td>9</td>\n<td>Bronze</td>\n</tr>\n<tr><td>short</td></tr>",
    )
    .await;

    let mut cfg = config(&server, &output, 10, 25);
    cfg.sort_direction = SortDirection::Descending;
    cfg.extraction_mode = ExtractionMode::Pattern;

    let report = HarvestDriver::from_config(&cfg).unwrap().run().await;

    page.assert_async().await;
    assert_eq!(report.total_records(), 1);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "Zed, Zoe, 9, Bronze");
}

#[tokio::test]
async fn rerun_overwrites_previous_output() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("member_records.txt");
    std::fs::write(&output, "Old, Row, 1, X\nOld, Row, 2, Y\nOld, Row, 3, Z").unwrap();

    let _page = page_mock(&mut server, "1", "ASC", 200, &table(&[["New", "Row", "1", "A"]])).await;

    HarvestDriver::from_config(&config(&server, &output, 5, 50))
        .unwrap()
        .run()
        .await;

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "New, Row, 1, A");
}

#[tokio::test]
async fn fetcher_reports_status_of_rejected_page() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let _page = page_mock(&mut server, "101", "ASC", 403, "Forbidden").await;

    let fetcher = FormPageFetcher::from_harvest_config(&config(&server, &dir.path().join("x.txt"), 200, 50)).unwrap();
    let err = fetcher
        .fetch_page(&PageRequest::new("LastName", SortDirection::Ascending, 101))
        .await
        .unwrap_err();

    assert!(matches!(err, HarvestError::RequestFailed { status: 403, .. }));
    assert_eq!(err.status(), Some(403));
}

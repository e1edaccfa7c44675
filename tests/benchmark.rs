use answerbench::benchmark::{
    Benchmark, BenchmarkConfig, CRAWL_FAILED_ANSWER, OverallScores, QueryStatus,
};
use answerbench::crawler::{CrawlerConfig, HttpFetcher};
use answerbench::model::MockCompletionModel;
use answerbench::search::SYSTEM_PROMPT;
use mockito::{Server, ServerGuard};

fn config() -> BenchmarkConfig {
    BenchmarkConfig::builder()
        .crawler(CrawlerConfig::builder().priority_paths(Vec::new()).build())
        .build()
}

fn benchmark(model: MockCompletionModel) -> Benchmark<HttpFetcher, MockCompletionModel> {
    let config = config();
    let fetcher = HttpFetcher::new(&config.crawler).unwrap();
    Benchmark::new(config, fetcher, model).unwrap()
}

async fn acme_site() -> ServerGuard {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(
            r#"<html><head><title>Acme</title></head>
               <body><p>Welcome to Acme.</p><a href="/services">Services</a></body></html>"#,
        )
        .create_async()
        .await;
    server
        .mock("GET", "/services")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(
            "<html><body><p>We offer consulting and design services for $500/month.</p></body></html>",
        )
        .create_async()
        .await;
    server
}

#[tokio::test]
async fn test_end_to_end_benchmark() {
    let server = acme_site().await;
    let services_url = format!("{}/services", server.url());
    let model = MockCompletionModel::with_text("We offer consulting and design services [1].");

    let report = benchmark(model.clone())
        .run(
            &server.url(),
            Some(vec![
                "What services do you offer?".to_string(),
                "What is your refund policy?".to_string(),
            ]),
        )
        .await
        .unwrap();

    assert_eq!(report.crawled_pages, 2);
    assert_eq!(report.indexed_chunks, 2);
    assert_eq!(report.queries_run, 2);

    let answered = &report.query_results[0];
    assert_eq!(answered.status, QueryStatus::Answered);
    assert_eq!(answered.citations.len(), 1);
    assert_eq!(answered.citations[0].url, services_url);
    assert_eq!(answered.citations[0].section, "page");
    assert!(answered.metrics.citation_ok);
    assert_eq!(answered.metrics.completeness, 0.4);

    let missing = &report.query_results[1];
    assert_eq!(missing.status, QueryStatus::NotFound);
    assert_eq!(missing.answer, "NOT FOUND");

    assert_eq!(report.overall_scores.answerability_rate, 0.5);
    assert_eq!(report.overall_scores.citation_coverage, 0.5);
    assert_eq!(report.overall_scores.hallucination_rate, 0.0);
    assert_eq!(report.overall_scores.completeness, 0.2);
    assert_eq!(report.missing_topics, vec!["What is your refund policy?".to_string()]);

    // only the relevant question reached the model, with the services page first
    let calls = model.calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].preamble, SYSTEM_PROMPT);
    assert!(calls[0].prompt.starts_with("Question: What services do you offer?"));
    assert!(calls[0].prompt.contains(&format!("[1] {services_url}\n")));
    assert!(calls[0].prompt.contains("consulting and design services for $500/month."));
}

#[tokio::test]
async fn test_unreachable_site_reports_crawl_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .with_status(503)
        .create_async()
        .await;
    let model = MockCompletionModel::with_text("unused");

    let report = benchmark(model.clone()).run(&server.url(), None).await.unwrap();

    assert_eq!(report.crawled_pages, 0);
    assert_eq!(report.indexed_chunks, 0);
    assert_eq!(report.queries_run, 5);
    assert_eq!(report.overall_scores, OverallScores::zero());
    assert_eq!(report.missing_topics.len(), 5);
    assert!(
        report
            .query_results
            .iter()
            .all(|r| r.answer == CRAWL_FAILED_ANSWER && r.citations.is_empty())
    );
    assert_eq!(model.call_count().await, 0);
}

#[tokio::test]
async fn test_report_json_shape() {
    let server = acme_site().await;
    let model = MockCompletionModel::with_text("NOT FOUND");

    let report = benchmark(model)
        .run(&server.url(), Some(vec!["What services do you offer?".to_string()]))
        .await
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["crawledPages"], 2);
    assert_eq!(json["queriesRun"], 1);
    assert_eq!(json["queryResults"][0]["status"], "not_found");
    assert_eq!(json["queryResults"][0]["metrics"]["answerable"], false);
    assert_eq!(json["missingTopics"][0], "What services do you offer?");
    assert_eq!(json["overallScores"]["answerabilityRate"], 0.0);
}

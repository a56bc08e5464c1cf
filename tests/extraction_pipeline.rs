//! End-to-end tests for the offer letter extraction pipeline, with both
//! the offer letter page and the model endpoint served by wiremock.

use job_tracker::config::ExtractorConfig;
use job_tracker::extraction::{ExtractionError, ExtractionRequest, OfferExtractionService};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OFFER_HTML: &str = "<html><body><script>evil()</script>\
    Salary: $150,000. Start: June 1, 2024.</body></html>";

fn service_for(model_server: &MockServer) -> OfferExtractionService {
    let config = ExtractorConfig {
        api_url: model_server.uri(),
        api_key: "test-key".to_string(),
        model: "gpt-4o-mini".to_string(),
        timeout_seconds: 5,
    };
    OfferExtractionService::new(&config).unwrap()
}

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}

fn request_for(page_server: &MockServer, page_path: &str) -> ExtractionRequest {
    ExtractionRequest {
        offer_letter_url: format!("{}{}", page_server.uri(), page_path),
    }
}

#[tokio::test]
async fn extracts_offer_facts_from_html_page() {
    let page_server = MockServer::start().await;
    let model_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/offer"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(OFFER_HTML, "text/html"))
        .mount(&page_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            r#"{"compensation": "$150,000", "startDate": "June 1, 2024"}"#,
        )))
        .mount(&model_server)
        .await;

    let service = service_for(&model_server);
    let result = service
        .run(&request_for(&page_server, "/offer"))
        .await
        .unwrap();

    assert_eq!(result.compensation, "$150,000");
    assert_eq!(result.start_date, "June 1, 2024");

    // The model must see the visible text but never the script body.
    let requests = model_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let prompt = String::from_utf8_lossy(&requests[0].body).to_string();
    assert!(prompt.contains("Salary: $150,000. Start: June 1, 2024."));
    assert!(!prompt.contains("evil()"));
}

#[tokio::test]
async fn http_error_never_reaches_the_model() {
    let page_server = MockServer::start().await;
    let model_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/offer"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&page_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("{}")))
        .expect(0)
        .mount(&model_server)
        .await;

    let service = service_for(&model_server);
    let error = service
        .run(&request_for(&page_server, "/offer"))
        .await
        .unwrap_err();

    assert!(matches!(error, ExtractionError::FetchFailed(_)));
    assert_eq!(error.code(), "FETCH_FAILED");
}

#[tokio::test]
async fn invalid_url_fails_without_any_request() {
    let model_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("{}")))
        .expect(0)
        .mount(&model_server)
        .await;

    let service = service_for(&model_server);

    for url in ["not-a-url", "ftp://example.com/offer", ""] {
        let error = service
            .run(&ExtractionRequest {
                offer_letter_url: url.to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(error, ExtractionError::InvalidUrl(_)), "{}", url);
        assert_eq!(error.user_message(), "Please enter a valid URL.");
    }
}

#[tokio::test]
async fn empty_page_is_a_parse_failure() {
    let page_server = MockServer::start().await;
    let model_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/offer"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><body><script>only_code()</script></body></html>",
            "text/html",
        ))
        .mount(&page_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("{}")))
        .expect(0)
        .mount(&model_server)
        .await;

    let service = service_for(&model_server);
    let error = service
        .run(&request_for(&page_server, "/offer"))
        .await
        .unwrap_err();

    assert!(matches!(error, ExtractionError::ParseFailed(_)));
}

#[tokio::test]
async fn missing_field_is_an_extraction_failure() {
    let page_server = MockServer::start().await;
    let model_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/offer"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(OFFER_HTML, "text/html"))
        .mount(&page_server)
        .await;

    // Schema-non-conformant output: startDate is missing entirely.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body(r#"{"compensation": "$150,000"}"#)),
        )
        .mount(&model_server)
        .await;

    let service = service_for(&model_server);
    let error = service
        .run(&request_for(&page_server, "/offer"))
        .await
        .unwrap_err();

    assert!(matches!(error, ExtractionError::ExtractionFailed(_)));
    assert_eq!(error.code(), "EXTRACTION_FAILED");
    assert!(error.user_message().contains("check the URL"));
}

#[tokio::test]
async fn model_api_error_is_an_extraction_failure() {
    let page_server = MockServer::start().await;
    let model_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/offer"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(OFFER_HTML, "text/html"))
        .mount(&page_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream overloaded"))
        .mount(&model_server)
        .await;

    let service = service_for(&model_server);
    let error = service
        .run(&request_for(&page_server, "/offer"))
        .await
        .unwrap_err();

    assert!(matches!(error, ExtractionError::ExtractionFailed(_)));
}

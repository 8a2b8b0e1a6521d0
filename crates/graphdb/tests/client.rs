use graphdb::{GraphDbClient, GraphDbError, RepositoryClient};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_delete_repository() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/repositories/kegg_drug_ttl"))
        .and(header("accept", "*/*"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    GraphDbClient::new(server.uri())
        .delete_repository("kegg_drug_ttl")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_missing_repository_is_noop() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    GraphDbClient::new(server.uri())
        .delete_repository("absent")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_repository_sanitizes_id() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/rest/repositories/"))
        .and(body_json(serde_json::json!({
            "id": "kegg_drug_ttl",
            "params": {},
            "title": "kegg-drug.ttl - Data Quality Computational Metrics",
            "type": "free"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    GraphDbClient::new(server.uri())
        .create_repository("kegg-drug.ttl", "kegg-drug.ttl - Data Quality Computational Metrics")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_existing_repository_fails() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Repository kegg already exists"))
        .mount(&server)
        .await;

    let err = GraphDbClient::new(server.uri())
        .create_repository("kegg", "kegg")
        .await
        .unwrap_err();

    match err {
        GraphDbError::Status { status, body, .. } => {
            assert_eq!(status, 400);
            assert!(body.contains("already exists"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_import_from_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/data/import/url/kegg_drug_ttl"))
        .and(query_param("url", "file:///data/results/kegg.aggregate.ttl"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    GraphDbClient::new(format!("{}/", server.uri()))
        .import_from_url("kegg_drug_ttl", "file:///data/results/kegg.aggregate.ttl")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = GraphDbClient::new(server.uri())
        .import_from_url("r", "file:///x.ttl")
        .await
        .unwrap_err();
    assert!(matches!(err, GraphDbError::Status { status: 500, .. }));
}

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use campus_cms::quiz::{QuizClient, QuizClientError};

fn chain_payload() -> Value {
    json!({
        "payload": { "model": { "layers": [
            { "type": "diagram-nodes", "models": {
                "q-track": {
                    "id": "q-track",
                    "name": "Which track?",
                    "ports": [
                        { "label": "In", "links": [] },
                        { "name": "Out", "links": ["l1"] },
                    ],
                },
                "a-web": {
                    "id": "a-web",
                    "name": "Web Development",
                    "ports": [
                        { "label": "In", "links": ["l1"] },
                        { "name": "Out", "links": [] },
                    ],
                },
            } },
            { "type": "diagram-links", "models": {
                "l1": { "id": "l1", "source": "q-track", "target": "a-web" },
            } },
        ] } },
    })
}

async fn mock_fetch(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/v1/questions/fetch"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetches_and_validates_a_graph() {
    let server = MockServer::start().await;
    mock_fetch(
        &server,
        ResponseTemplate::new(200).set_body_json(chain_payload()),
    )
    .await;

    let client = QuizClient::new(server.uri());
    let graph = client.fetch_graph().await.unwrap();

    assert_eq!(graph.start().name, "Which track?");
    assert_eq!(graph.answers_of("q-track").len(), 1);
}

#[tokio::test]
async fn a_missing_diagram_maps_to_not_found() {
    let server = MockServer::start().await;
    mock_fetch(&server, ResponseTemplate::new(404)).await;

    let client = QuizClient::new(server.uri());
    let err = client.fetch_graph().await.unwrap_err();
    assert!(matches!(err, QuizClientError::NotFound));
}

#[tokio::test]
async fn a_server_error_is_surfaced_with_its_status() {
    let server = MockServer::start().await;
    mock_fetch(&server, ResponseTemplate::new(500)).await;

    let client = QuizClient::new(server.uri());
    let err = client.fetch_graph().await.unwrap_err();
    assert!(matches!(err, QuizClientError::Server(status) if status.as_u16() == 500));
}

#[tokio::test]
async fn an_invalid_diagram_is_rejected() {
    // Two nodes with no inbound links: no unique start node.
    let payload = json!({
        "payload": { "model": { "layers": [
            { "type": "diagram-nodes", "models": {
                "a": { "id": "a", "name": "A", "ports": [] },
                "b": { "id": "b", "name": "B", "ports": [] },
            } },
            { "type": "diagram-links", "models": {} },
        ] } },
    });

    let server = MockServer::start().await;
    mock_fetch(&server, ResponseTemplate::new(200).set_body_json(payload)).await;

    let client = QuizClient::new(server.uri());
    let err = client.fetch_graph().await.unwrap_err();
    assert!(matches!(err, QuizClientError::Graph(_)));
}

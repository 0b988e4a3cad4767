use movie_catalog::api::{ApiError, CatalogService, TmdbClient};
use movie_catalog::model::Keyword;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn client_for(server: &MockServer) -> TmdbClient {
    TmdbClient::new(server.uri(), "test-key", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_movie_keywords_sends_api_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/123/keywords"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 123,
            "keywords": [{"id": 1, "name": "K1"}, {"id": 2, "name": "K2"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client_for(&mock_server).movie_keywords(123).await.unwrap();
    assert_eq!(response.id, 123);
    assert_eq!(
        response.keywords,
        vec![Keyword::new(1, "K1"), Keyword::new(2, "K2")]
    );
}

#[tokio::test]
async fn test_tv_keywords_arrive_under_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tv/7/keywords"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "results": [{"id": 3, "name": "dragons"}]
        })))
        .mount(&mock_server)
        .await;

    let response = client_for(&mock_server).tv_keywords(7).await.unwrap();
    assert_eq!(response.keywords, vec![Keyword::new(3, "dragons")]);
}

#[tokio::test]
async fn test_discover_sends_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/discover/tv"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 3,
            "results": [{"id": 1399, "name": "Game of Thrones", "vote_average": 8.4}],
            "total_results": 1,
            "total_pages": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client_for(&mock_server).discover_tvs(3).await.unwrap();
    assert_eq!(response.page, 3);
    assert_eq!(response.results[0].name, "Game of Thrones");
    assert_eq!(response.results[0].page, 0);
}

#[tokio::test]
async fn test_error_status_uses_tmdb_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/person/popular"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status_code": 7,
            "status_message": "Invalid API key: You must be granted a valid key."
        })))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).popular_people(1).await;
    assert_eq!(
        result,
        Err(ApiError::Status {
            code: 401,
            message: "Invalid API key: You must be granted a valid key.".to_string(),
        })
    );
}

#[tokio::test]
async fn test_error_status_without_body_uses_reason() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/1/videos"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).movie_videos(1).await;
    assert_eq!(
        result,
        Err(ApiError::Status {
            code: 500,
            message: "Internal Server Error".to_string(),
        })
    );
}

#[tokio::test]
async fn test_undecodable_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/1/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).movie_reviews(1).await;
    assert!(matches!(result, Err(ApiError::Decode(_))), "got {result:?}");
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    // Reserve a free port, then close it so connections are refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = TmdbClient::new(uri, "test-key", Duration::from_secs(2)).unwrap();
    let result = client.discover_movies(1).await;
    assert!(matches!(result, Err(ApiError::Network(_))), "got {result:?}");
}

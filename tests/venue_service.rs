use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use venue_console::config::{BackendConfig, CircuitBreakerConfig};
use venue_console::models::{GridMode, SeatGrid, VenuePayload};
use venue_console::services::{VenueServiceClient, VenueServiceError};

fn client(base_url: String, failure_threshold: u32) -> VenueServiceClient {
    VenueServiceClient::from_config(
        &BackendConfig {
            base_url,
            timeout_seconds: 5,
        },
        &CircuitBreakerConfig {
            failure_threshold,
            timeout_seconds: 60,
        },
    )
    .unwrap()
}

#[tokio::test]
async fn create_venue_forwards_token_and_embeds_seat_map() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/venues"))
        .and(header("authorization", "Bearer org-token"))
        .and(body_partial_json(json!({
            "name": "Главный зал",
            "capacity": 6,
            "seatMap": {
                "rows": 2,
                "cols": 3,
                "rowLabels": ["A", "B"],
            },
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 42,
            "name": "Главный зал",
            "capacity": 6,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let grid = SeatGrid::create(2, 3).unwrap();
    let payload = VenuePayload {
        name: "Главный зал".to_string(),
        address: None,
        capacity: grid.capacity(GridMode::Layout),
        seat_map: grid,
    };

    let venue = client(server.uri(), 5)
        .create_venue("org-token", &payload)
        .await
        .unwrap();
    assert_eq!(venue.id, 42);
    assert_eq!(venue.capacity, 6);
}

#[tokio::test]
async fn update_venue_puts_to_the_venue_resource() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/venues/42"))
        .and(body_partial_json(json!({"capacity": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "name": "Главный зал",
            "capacity": 3,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut grid = SeatGrid::create(2, 3).unwrap();
    grid.cycle_seat(0, 0).unwrap();
    grid.cycle_seat(0, 1).unwrap();
    grid.cycle_seat(1, 2).unwrap();
    let payload = VenuePayload {
        name: "Главный зал".to_string(),
        address: None,
        capacity: grid.capacity(GridMode::Classification),
        seat_map: grid,
    };

    let venue = client(server.uri(), 5)
        .update_venue("org-token", 42, &payload)
        .await
        .unwrap();
    assert_eq!(venue.capacity, 3);
}

#[tokio::test]
async fn search_passes_paging_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/venues"))
        .and(query_param("query", "зал"))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Малый зал", "capacity": 40},
        ])))
        .mount(&server)
        .await;

    let venues = client(server.uri(), 5)
        .search_venues("org-token", "зал", 20, 40)
        .await
        .unwrap();
    assert_eq!(venues.len(), 1);
    assert_eq!(venues[0].name, "Малый зал");
}

#[tokio::test]
async fn missing_venue_is_a_typed_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/venues/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such venue"))
        .mount(&server)
        .await;

    let err = client(server.uri(), 5)
        .get_venue("org-token", 99)
        .await
        .unwrap_err();
    match err {
        VenueServiceError::Backend { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "no such venue");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn breaker_short_circuits_after_repeated_server_errors() {
    let server = MockServer::start().await;
    // ровно два запроса дойдут до бэкенда, третий блокируется выключателем
    Mock::given(method("GET"))
        .and(path("/api/v1/venues/1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(server.uri(), 2);
    for _ in 0..2 {
        let err = client.get_venue("org-token", 1).await.unwrap_err();
        assert!(matches!(err, VenueServiceError::Backend { status: 500, .. }));
    }

    let err = client.get_venue("org-token", 1).await.unwrap_err();
    assert!(matches!(err, VenueServiceError::Unavailable));
}

#[tokio::test]
async fn client_errors_do_not_open_the_breaker() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/venues/99"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&server)
        .await;

    let client = client(server.uri(), 2);
    for _ in 0..3 {
        let err = client.get_venue("org-token", 99).await.unwrap_err();
        assert!(matches!(err, VenueServiceError::Backend { status: 404, .. }));
    }
}

use httpmock::prelude::*;
use place_finder::adapters::GooglePlacesClient;
use place_finder::domain::model::{
    AutocompleteRequest, LatLng, LocationBias, NearbySearchRequest, TextSearchRequest,
};
use place_finder::domain::ports::PlacesProvider;
use place_finder::FinderError;

fn client(server: &MockServer) -> GooglePlacesClient {
    GooglePlacesClient::with_base_url(server.url("/maps/api/place"), "test-key")
}

#[tokio::test]
async fn test_text_search_sends_query_type_and_key() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/maps/api/place/textsearch/json")
            .query_param("query", "coffee")
            .query_param("type", "cafe")
            .query_param("key", "test-key");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "status": "OK",
                "results": [
                    {
                        "name": "Bean There",
                        "formatted_address": "1 Nile St, Cairo",
                        "place_id": "p1",
                        "geometry": {"location": {"lat": 30.05, "lng": 31.23}}
                    },
                    {"name": "Hidden Cup", "place_id": "p2"}
                ]
            }));
    });

    let request = TextSearchRequest {
        query: "coffee".to_string(),
        category: Some("cafe".to_string()),
        bias: None,
    };
    let places = client(&server).text_search(&request).await.unwrap();

    api_mock.assert();
    assert_eq!(places.len(), 2);
    assert_eq!(places[0].name, "Bean There");
    assert_eq!(places[0].formatted_address.as_deref(), Some("1 Nile St, Cairo"));
    assert_eq!(places[0].location, Some(LatLng::new(30.05, 31.23)));
    assert_eq!(places[0].id.as_deref(), Some("p1"));
    assert!(places[1].location.is_none());
    assert!(places[1].formatted_address.is_none());
}

#[tokio::test]
async fn test_text_search_with_viewport_bias() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/maps/api/place/textsearch/json")
            .query_param("query", "museum")
            .query_param("location", "30.0444,31.2357")
            .query_param("radius", "5000");
        then.status(200)
            .json_body(serde_json::json!({"status": "ZERO_RESULTS", "results": []}));
    });

    let request = TextSearchRequest {
        query: "museum".to_string(),
        category: None,
        bias: Some(LocationBias {
            center: LatLng::new(30.0444, 31.2357),
            radius_m: 5000,
        }),
    };
    let places = client(&server).text_search(&request).await.unwrap();

    api_mock.assert();
    assert!(places.is_empty());
}

#[tokio::test]
async fn test_nearby_search_sends_location_radius_and_type() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/maps/api/place/nearbysearch/json")
            .query_param("location", "29.97,31.13")
            .query_param("radius", "1000")
            .query_param("type", "restaurant");
        then.status(200).json_body(serde_json::json!({
            "status": "OK",
            "results": [{
                "name": "Felfela",
                "vicinity": "15 Hoda Shaarawy",
                "geometry": {"location": {"lat": 29.98, "lng": 31.14}}
            }]
        }));
    });

    let request = NearbySearchRequest {
        location: LatLng::new(29.97, 31.13),
        radius_m: 1000,
        category: "restaurant".to_string(),
    };
    let places = client(&server).nearby_search(&request).await.unwrap();

    api_mock.assert();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].formatted_address.as_deref(), Some("15 Hoda Shaarawy"));
}

#[tokio::test]
async fn test_non_ok_status_is_provider_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/maps/api/place/textsearch/json");
        then.status(200).json_body(serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        }));
    });

    let request = TextSearchRequest {
        query: "coffee".to_string(),
        category: None,
        bias: None,
    };
    let err = client(&server).text_search(&request).await.unwrap_err();

    match err {
        FinderError::ProviderStatus { status, message } => {
            assert_eq!(status, "REQUEST_DENIED");
            assert_eq!(message.as_deref(), Some("The provided API key is invalid."));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_http_failure_is_provider_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/maps/api/place/nearbysearch/json");
        then.status(500);
    });

    let request = NearbySearchRequest {
        location: LatLng::new(0.0, 0.0),
        radius_m: 1000,
        category: "cafe".to_string(),
    };
    let err = client(&server).nearby_search(&request).await.unwrap_err();

    api_mock.assert();
    assert!(matches!(
        err,
        FinderError::ProviderStatus { ref status, .. } if status == "HTTP 500"
    ));
}

#[tokio::test]
async fn test_autocomplete_reads_predictions() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/maps/api/place/autocomplete/json")
            .query_param("input", "Tah");
        then.status(200).json_body(serde_json::json!({
            "status": "OK",
            "predictions": [
                {"description": "Tahrir Square, Cairo", "place_id": "t1"},
                {"description": "Tahrir St, Giza"}
            ]
        }));
    });

    let request = AutocompleteRequest {
        input: "Tah".to_string(),
        bias: None,
    };
    let predictions = client(&server).autocomplete(&request).await.unwrap();

    api_mock.assert();
    assert_eq!(predictions.len(), 2);
    assert_eq!(predictions[0].description, "Tahrir Square, Cairo");
    assert_eq!(predictions[0].place_id.as_deref(), Some("t1"));
    assert!(predictions[1].place_id.is_none());
}

//! Integration tests for the catalog browsing endpoints in mock mode.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

fn ids(page: &serde_json::Value) -> Vec<String> {
    page["movies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_finds_shawshank_in_mock_catalog() {
    let app = common::build_test_app();

    let uri = format!("/api/search?q={}", urlencoding::encode("肖申克"));
    let response = get(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["total"], 1);
    assert_eq!(json["start"], 0);
    assert_eq!(ids(&json), vec!["278"]);
    assert_eq!(json["movies"][0]["title"], "肖申克的救赎");
    assert_eq!(json["movies"][0]["rating"], 8.7);
    assert_eq!(json["movies"][0]["year"], "1994");

    let history = body_json(get(app, "/api/search_history").await).await;
    assert_eq!(history["total"], 1);
    assert_eq!(history["history"][0]["keyword"], "肖申克");
    assert_eq!(history["history"][0]["result_count"], 1);
}

#[tokio::test]
async fn search_without_query_is_validation_error() {
    let app = common::build_test_app();

    for uri in ["/api/search", "/api/search?q=", "/api/search?q=%20%20"] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["error"], "ValidationFailed");
    }
}

#[tokio::test]
async fn search_rejects_out_of_range_parameters() {
    let app = common::build_test_app();

    for uri in [
        "/api/search?q=godfather&count=0",
        "/api/search?q=godfather&count=51",
        "/api/search?q=godfather&count=many",
        "/api/search?q=godfather&start=-1",
    ] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
    }
}

#[tokio::test]
async fn search_start_is_page_aligned() {
    let app = common::build_test_app();
    let json = body_json(get(app, "/api/search?q=godfather&start=27").await).await;

    assert_eq!(json["start"], 20);
    assert_eq!(json["count"], 0);
    assert_eq!(json["total"], 2);
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn movie_detail_has_flat_fields_and_extra() {
    let app = common::build_test_app();
    let response = get(app, "/api/movie/278").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], "278");
    assert_eq!(json["is_favorite"], false);
    assert_eq!(json["duration"], "142 分钟");
    assert_eq!(json["directors"][0], "Frank Darabont");
    assert_eq!(json["extra"]["duration"], "142 分钟");
    assert_eq!(json["extra"]["countries"][0], "美国");
    assert_eq!(
        json["extra"]["external_url"],
        "https://www.themoviedb.org/movie/278"
    );
}

#[tokio::test]
async fn unknown_movie_is_404() {
    let app = common::build_test_app();
    let response = get(app, "/api/movie/999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "NotFound");
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ranked_lists_return_pages() {
    let app = common::build_test_app();

    let popular = body_json(get(app.clone(), "/api/popular").await).await;
    assert_eq!(ids(&popular), vec!["278", "238", "240"]);
    assert_eq!(popular["total"], 3);

    let top = body_json(get(app.clone(), "/api/top_rated?count=1").await).await;
    assert_eq!(top["count"], 1);
    assert_eq!(top["movies"][0]["genres"][0], "剧情");

    let second_page = body_json(get(app, "/api/popular?page=2").await).await;
    assert_eq!(second_page["start"], 20);
    assert_eq!(second_page["count"], 0);
}

#[tokio::test]
async fn dated_lists_return_first_page() {
    let app = common::build_test_app();

    let now = body_json(get(app.clone(), "/api/in_theaters?count=2").await).await;
    assert_eq!(now["count"], 2);
    assert_eq!(now["start"], 0);

    let soon = body_json(get(app, "/api/coming_soon").await).await;
    assert_eq!(soon["count"], 3);
}

#[tokio::test]
async fn list_page_out_of_range_is_validation_error() {
    let app = common::build_test_app();

    let response = get(app.clone(), "/api/popular?page=0").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = get(app, "/api/top_rated?page=501").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn recommendations_filter_by_min_rating() {
    let app = common::build_test_app();

    let default = body_json(get(app.clone(), "/api/recommendations").await).await;
    assert_eq!(default["count"], 3);

    let strict = body_json(get(app.clone(), "/api/recommendations?min_rating=8.65").await).await;
    assert_eq!(ids(&strict), vec!["278", "238"]);

    let response = get(app, "/api/recommendations?min_rating=12").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn search_history_limit_is_validated() {
    let app = common::build_test_app();

    for q in ["a", "b", "c"] {
        get(app.clone(), &format!("/api/search?q={q}")).await;
    }

    let json = body_json(get(app.clone(), "/api/search_history?limit=2").await).await;
    assert_eq!(json["total"], 3);
    assert_eq!(json["history"].as_array().unwrap().len(), 2);
    assert_eq!(json["history"][0]["keyword"], "c");

    let response = get(app, "/api/search_history?limit=101").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

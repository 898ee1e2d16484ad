//! Integration tests: REST client against a local JSON server.

mod common;

use std::time::Duration;

use common::api_server::{self, Recorded, Route};
use schoolinv_core::api::{ApiClient, ApiError, AssetFilter};
use schoolinv_core::config::SchoolinvConfig;
use schoolinv_core::models::{
    AcceptInvitation, AssetStatus, BulkAssetChanges, CreateAsset, Credentials, Id, PageRequest,
};
use schoolinv_core::retry::RetryPolicy;
use schoolinv_core::session;

const ASSET_ID: &str = "5f0e7c52-8a43-4f2e-9c1b-2d6a9b1e3c77";
const TEMPLATE_ID: &str = "11111111-2222-3333-4444-555555555555";

fn asset_json() -> String {
    format!(
        r#"{{"id":"{}","template_id":"{}","status":"active",
            "created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-01T00:00:00Z"}}"#,
        ASSET_ID, TEMPLATE_ID
    )
}

fn user_json() -> &'static str {
    r#"{"id":"aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee","email":"ana@colegio.es",
        "full_name":"Ana","role":"admin",
        "created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-01T00:00:00Z"}"#
}

fn client(base: &str) -> ApiClient {
    ApiClient::new(base)
        .unwrap()
        .with_retry(RetryPolicy::none())
        .with_token("tok-abc")
}

#[tokio::test]
async fn list_assets_sends_filters_and_bearer() {
    let page = format!(
        r#"{{"items":[{}],"total":1,"page":1,"size":25,"pages":1}}"#,
        asset_json()
    );
    let server = api_server::start(vec![Route::new("GET", "/assets", 200, page)]);

    let filter = AssetFilter {
        status: Some(AssetStatus::Active),
        search: Some("proyector".into()),
        ..Default::default()
    };
    let page = client(&server.base_url)
        .list_assets(&filter, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id.to_string(), ASSET_ID);
    assert!(!page.has_next());

    let reqs = server.requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(
        reqs[0].target,
        "/api/assets?page=1&size=25&status=active&search=proyector"
    );
    assert_eq!(reqs[0].header("authorization"), Some("Bearer tok-abc"));
}

#[tokio::test]
async fn create_asset_posts_json() {
    let server = api_server::start(vec![Route::new("POST", "/assets", 201, asset_json())]);
    let body = CreateAsset {
        template_id: TEMPLATE_ID.parse().unwrap(),
        classroom_id: None,
        serial_number: Some("SN-1".into()),
        status: AssetStatus::Active,
        purchase_date: None,
        notes: None,
    };
    let asset = client(&server.base_url).create_asset(&body).await.unwrap();
    assert_eq!(asset.status, AssetStatus::Active);

    let req = &server.requests()[0];
    assert_eq!(req.method, "POST");
    assert_eq!(req.header("content-type"), Some("application/json"));
    let sent = req.json();
    assert_eq!(sent["serial_number"], "SN-1");
    assert!(sent.get("classroom_id").is_none());
}

#[tokio::test]
async fn validation_detail_maps_to_fields() {
    let detail = r#"{"detail":[
        {"loc":["body","serial_number"],"msg":"already exists","type":"value_error"},
        {"loc":["body"],"msg":"invalid payload","type":"value_error"}
    ]}"#;
    let server = api_server::start(vec![Route::new("POST", "/assets", 422, detail)]);
    let body = CreateAsset {
        template_id: TEMPLATE_ID.parse().unwrap(),
        classroom_id: None,
        serial_number: Some("dup".into()),
        status: AssetStatus::Active,
        purchase_date: None,
        notes: None,
    };
    let err = client(&server.base_url).create_asset(&body).await.unwrap_err();
    let fields = err.field_errors().expect("validation error");
    assert_eq!(fields.get("serial_number"), Some("already exists"));
    assert_eq!(fields.general, vec!["invalid payload".to_string()]);
}

#[tokio::test]
async fn missing_asset_is_not_found_and_delete_accepts_empty_body() {
    let server = api_server::start(vec![Route::new(
        "DELETE",
        &format!("/assets/{}", ASSET_ID),
        204,
        "",
    )]);
    let id: Id = ASSET_ID.parse().unwrap();
    let c = client(&server.base_url);

    match c.get_asset(id).await {
        Err(ApiError::NotFound(msg)) => assert_eq!(msg, "Not Found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
    c.delete_asset(id).await.unwrap();
}

#[tokio::test]
async fn bulk_update_sends_ids_and_changes() {
    let server = api_server::start(vec![Route::new(
        "POST",
        "/assets/bulk-update",
        200,
        r#"{"affected":2}"#,
    )]);
    let ids: Vec<Id> = vec![ASSET_ID.parse().unwrap(), TEMPLATE_ID.parse().unwrap()];
    let changes = BulkAssetChanges {
        status: Some(AssetStatus::Retired),
        classroom_id: None,
    };
    let result = client(&server.base_url)
        .bulk_update_assets(&ids, &changes)
        .await
        .unwrap();
    assert_eq!(result.affected, 2);

    let sent = server.requests()[0].json();
    assert_eq!(sent["ids"].as_array().unwrap().len(), 2);
    assert_eq!(sent["changes"]["status"], "retired");
}

#[tokio::test]
async fn unauthorized_response() {
    let server = api_server::start(vec![Route::new(
        "GET",
        "/auth/me",
        401,
        r#"{"detail":"Could not validate credentials"}"#,
    )]);
    let err = client(&server.base_url).me().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized), "{:?}", err);
}

#[tokio::test]
async fn gets_are_retried_but_posts_are_not() {
    let server = api_server::start(vec![
        Route::new("GET", "/reports/summary", 503, r#"{"detail":"maintenance"}"#),
        Route::new("POST", "/assets/bulk-delete", 503, r#"{"detail":"maintenance"}"#),
    ]);
    let c = ApiClient::new(&server.base_url)
        .unwrap()
        .with_retry(RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(10),
        });

    let err = c.report_summary().await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 503, .. }), "{:?}", err);
    let err = c.bulk_delete_assets(&[]).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 503, .. }), "{:?}", err);

    let reqs = server.requests();
    assert_eq!(reqs.iter().filter(|r| r.method == "GET").count(), 3);
    assert_eq!(reqs.iter().filter(|r| r.method == "POST").count(), 1);
}

#[tokio::test]
async fn login_builds_session_with_profile() {
    let server = api_server::start(vec![
        Route::new(
            "POST",
            "/auth/login",
            200,
            r#"{"access_token":"jwt-xyz","token_type":"bearer"}"#,
        ),
        Route::new("GET", "/auth/me", 200, user_json()),
    ]);
    let cfg = SchoolinvConfig {
        api_base_url: server.base_url.clone(),
        ..Default::default()
    };
    let creds = Credentials {
        email: "ana@colegio.es".into(),
        password: "hunter22".into(),
    };
    let s = session::login(&cfg, &creds).await.unwrap();
    assert_eq!(s.access_token, "jwt-xyz");
    assert_eq!(s.user.as_ref().map(|u| u.email.as_str()), Some("ana@colegio.es"));
    assert!(s.matches(&cfg));

    let reqs = server.requests();
    let me = reqs.iter().find(|r| r.target == "/api/auth/me").unwrap();
    assert_eq!(me.header("authorization"), Some("Bearer jwt-xyz"));
}

#[tokio::test]
async fn login_is_refused_when_offline() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let cfg = SchoolinvConfig {
        api_base_url: format!("http://127.0.0.1:{}/api", port),
        ..Default::default()
    };
    let creds = Credentials {
        email: "a@b.c".into(),
        password: "x".into(),
    };
    let err = session::login(&cfg, &creds).await.unwrap_err();
    assert!(matches!(err, ApiError::Offline(_)), "{:?}", err);
}

/// `GET /assets` over `total` assets, paged by the requested `page`/`size`.
/// The reply never echoes `page`; past the end it either repeats the last
/// page or returns an empty one.
fn paged_assets(total: usize, extra: &'static str, repeat_last: bool) -> Route {
    Route::with("GET", "/assets", move |req: &Recorded| {
        let page: usize = req.query("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        let size: usize = req.query("size").and_then(|s| s.parse().ok()).unwrap_or(25);
        let last = total.div_ceil(size).max(1);
        let page = if repeat_last { page.min(last) } else { page };
        let start = (page - 1) * size;
        let count = total.saturating_sub(start).min(size);
        let items = vec![asset_json(); count].join(",");
        (200, format!(r#"{{"items":[{}]{}}}"#, items, extra))
    })
}

fn requested_pages(server: &api_server::ApiServer) -> Vec<String> {
    server
        .requests()
        .iter()
        .filter_map(|r| r.query("page"))
        .collect()
}

#[tokio::test]
async fn list_all_assets_stops_at_total_when_server_repeats_last_page() {
    let server = api_server::start(vec![paged_assets(300, r#","total":300,"size":100"#, true)]);
    let assets = client(&server.base_url)
        .list_all_assets(&AssetFilter::default())
        .await
        .unwrap();
    assert_eq!(assets.len(), 300);
    assert_eq!(requested_pages(&server), vec!["1", "2", "3"]);
}

#[tokio::test]
async fn list_all_assets_stops_at_page_count() {
    let server = api_server::start(vec![paged_assets(250, r#","pages":3"#, true)]);
    let assets = client(&server.base_url)
        .list_all_assets(&AssetFilter::default())
        .await
        .unwrap();
    assert_eq!(assets.len(), 250);
    assert_eq!(requested_pages(&server), vec!["1", "2", "3"]);
}

#[tokio::test]
async fn list_all_assets_without_totals_stops_on_short_page() {
    let server = api_server::start(vec![paged_assets(130, "", false)]);
    let filter = AssetFilter {
        status: Some(AssetStatus::Active),
        ..Default::default()
    };
    let assets = client(&server.base_url).list_all_assets(&filter).await.unwrap();
    assert_eq!(assets.len(), 130);
    let reqs = server.requests();
    assert_eq!(reqs.len(), 2);
    assert_eq!(reqs[1].target, "/api/assets?page=2&size=100&status=active");
}

#[tokio::test]
async fn list_all_assets_stops_on_empty_page() {
    let server = api_server::start(vec![paged_assets(200, "", false)]);
    let assets = client(&server.base_url)
        .list_all_assets(&AssetFilter::default())
        .await
        .unwrap();
    assert_eq!(assets.len(), 200);
    assert_eq!(requested_pages(&server), vec!["1", "2", "3"]);
}

#[tokio::test]
async fn generate_qr_posts_without_body() {
    let qr = format!(
        r#"{{"id":"{}","asset_id":"{}","url":"https://inv.example.org/assets/{}",
            "created_at":"2024-01-01T00:00:00Z"}}"#,
        TEMPLATE_ID, ASSET_ID, ASSET_ID
    );
    let server = api_server::start(vec![Route::new(
        "POST",
        &format!("/assets/{}/qr", ASSET_ID),
        201,
        qr,
    )]);
    let qr = client(&server.base_url)
        .generate_qr(ASSET_ID.parse().unwrap())
        .await
        .unwrap();
    assert_eq!(qr.url, format!("https://inv.example.org/assets/{}", ASSET_ID));

    let req = &server.requests()[0];
    assert_eq!(req.method, "POST");
    assert_eq!(req.target, format!("/api/assets/{}/qr", ASSET_ID));
    assert!(req.body.is_empty());
}

#[tokio::test]
async fn update_asset_image_puts_data_url() {
    let server = api_server::start(vec![Route::new(
        "PUT",
        &format!("/assets/{}/image", ASSET_ID),
        200,
        asset_json(),
    )]);
    let data_url = "data:image/png;base64,iVBORw0KGgo=".to_string();
    client(&server.base_url)
        .update_asset_image(ASSET_ID.parse().unwrap(), data_url.clone())
        .await
        .unwrap();

    let req = &server.requests()[0];
    assert_eq!(req.method, "PUT");
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.json(), serde_json::json!({ "image": data_url }));
}

#[tokio::test]
async fn asset_events_are_listed() {
    let events = format!(
        r#"[{{"id":"{}","asset_id":"{}","event_type":"moved","description":"Aula 3 -> Aula 5",
             "created_at":"2024-03-01T09:30:00Z"}},
            {{"id":"{}","asset_id":"{}","event_type":"repaired",
             "created_at":"2024-04-01T09:30:00Z"}}]"#,
        TEMPLATE_ID, ASSET_ID, TEMPLATE_ID, ASSET_ID
    );
    let server = api_server::start(vec![Route::new(
        "GET",
        &format!("/assets/{}/events", ASSET_ID),
        200,
        events,
    )]);
    let events = client(&server.base_url)
        .list_asset_events(ASSET_ID.parse().unwrap())
        .await
        .unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event_type, "moved");
    assert_eq!(events[0].description.as_deref(), Some("Aula 3 -> Aula 5"));
    assert!(events[1].description.is_none());
    assert_eq!(server.requests()[0].method, "GET");
}

#[tokio::test]
async fn accept_invitation_escapes_token_in_path() {
    let server = api_server::start(vec![Route::new(
        "POST",
        "/invitations/abc%2Fdef%2Bghi%3D/accept",
        200,
        r#"{"access_token":"jwt-new","token_type":"bearer"}"#,
    )]);
    let body = AcceptInvitation {
        password: "correct horse".into(),
        full_name: Some("Luis".into()),
    };
    let token = ApiClient::new(&server.base_url)
        .unwrap()
        .accept_invitation(" abc/def+ghi= ", &body)
        .await
        .unwrap();
    assert_eq!(token.access_token, "jwt-new");

    let req = &server.requests()[0];
    assert_eq!(req.method, "POST");
    assert_eq!(req.target, "/api/invitations/abc%2Fdef%2Bghi%3D/accept");
    assert!(req.header("authorization").is_none());
    assert_eq!(
        req.json(),
        serde_json::json!({ "password": "correct horse", "full_name": "Luis" })
    );
}

#[tokio::test]
async fn activate_and_deactivate_user() {
    let user_id = "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee";
    let inactive = user_json().replace(r#""role":"admin","#, r#""role":"admin","is_active":false,"#);
    let server = api_server::start(vec![
        Route::new("POST", &format!("/users/{}/activate", user_id), 200, user_json()),
        Route::new("POST", &format!("/users/{}/deactivate", user_id), 200, inactive),
    ]);
    let c = client(&server.base_url);
    let id: Id = user_id.parse().unwrap();

    assert!(!c.deactivate_user(id).await.unwrap().is_active);
    assert!(c.activate_user(id).await.unwrap().is_active);

    let reqs = server.requests();
    assert_eq!(reqs[0].method, "POST");
    assert_eq!(reqs[0].target, format!("/api/users/{}/deactivate", user_id));
    assert_eq!(reqs[1].target, format!("/api/users/{}/activate", user_id));
    assert!(reqs.iter().all(|r| r.body.is_empty()));
    assert!(reqs
        .iter()
        .all(|r| r.header("authorization") == Some("Bearer tok-abc")));
}

#[tokio::test]
async fn bulk_delete_sends_ids() {
    let server = api_server::start(vec![Route::new(
        "POST",
        "/assets/bulk-delete",
        200,
        r#"{"affected":1}"#,
    )]);
    let ids: Vec<Id> = vec![ASSET_ID.parse().unwrap()];
    let result = client(&server.base_url).bulk_delete_assets(&ids).await.unwrap();
    assert_eq!(result.affected, 1);
    assert_eq!(
        server.requests()[0].json(),
        serde_json::json!({ "ids": [ASSET_ID] })
    );
}

#[tokio::test]
async fn accepted_invitation_session_survives_profile_failure() {
    let server = api_server::start(vec![
        Route::new(
            "POST",
            "/invitations/inv-1/accept",
            200,
            r#"{"access_token":"jwt-new","token_type":"bearer"}"#,
        ),
        Route::new("GET", "/auth/me", 503, r#"{"detail":"maintenance"}"#),
    ]);
    let cfg = SchoolinvConfig {
        api_base_url: server.base_url.clone(),
        ..Default::default()
    };
    let body = AcceptInvitation {
        password: "correct horse".into(),
        full_name: None,
    };
    let s = session::accept_invitation(&cfg, "inv-1", &body).await.unwrap();
    assert_eq!(s.access_token, "jwt-new");
    assert!(s.user.is_none());
    assert!(s.matches(&cfg));

    let me = server
        .requests()
        .into_iter()
        .filter(|r| r.target == "/api/auth/me")
        .last()
        .unwrap();
    assert_eq!(me.header("authorization"), Some("Bearer jwt-new"));
}

#[tokio::test]
async fn accepted_invitation_session_carries_profile() {
    let server = api_server::start(vec![
        Route::new(
            "POST",
            "/invitations/inv-2/accept",
            200,
            r#"{"access_token":"jwt-2"}"#,
        ),
        Route::new("GET", "/auth/me", 200, user_json()),
    ]);
    let cfg = SchoolinvConfig {
        api_base_url: server.base_url.clone(),
        ..Default::default()
    };
    let body = AcceptInvitation {
        password: "pw".into(),
        full_name: Some("Ana".into()),
    };
    let s = session::accept_invitation(&cfg, "inv-2", &body).await.unwrap();
    assert_eq!(s.user.map(|u| u.email), Some("ana@colegio.es".to_string()));
}

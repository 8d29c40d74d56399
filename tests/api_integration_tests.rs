// API Integration Tests
//
// Purpose: Drive the JSON API and the HTML form routes through the router
// Run with: cargo test --features api --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use irrigation_report::{create_router, AppState, ServerConfig, DOCX_MIME};
    use serde_json::{json, Value};
    use tower::ServiceExt; // for oneshot

    // Helper: Create a fresh app with its own session store
    fn create_test_app() -> Router {
        create_router(AppState::new(ServerConfig::default()))
    }

    async fn send(app: &Router, request: Request<Body>) -> axum::response::Response {
        app.clone().oneshot(request).await.unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn form_request(uri: &str, body: &str, htmx: bool) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if htmx {
            builder = builder.header("HX-Request", "true");
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body")
            .to_vec()
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).expect("Failed to parse JSON")
    }

    async fn text_response(response: axum::response::Response) -> String {
        String::from_utf8(body_bytes(response).await).expect("utf-8 body")
    }

    async fn new_session(app: &Router) -> String {
        let response = send(app, json_request("POST", "/api/sessions", json!({}))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_response(response).await["session_id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    fn location(response: &axum::response::Response) -> String {
        response.headers()[header::LOCATION]
            .to_str()
            .unwrap()
            .to_string()
    }

    // =========================================================================
    // Section 1: Health and sessions
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let app = create_test_app();
        let response = send(&app, get("/health")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_response(response).await;
        assert_eq!(json["status"], "healthy");
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_new_session_starts_empty() {
        let app = create_test_app();
        let id = new_session(&app).await;
        assert_eq!(id.len(), 32);

        let response = send(&app, get(&format!("/api/sessions/{}", id))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let form = json_response(response).await;
        assert_eq!(form["officer_name"], "");
        assert_eq!(form["staffing"], json!([]));
        assert_eq!(form["stakeholders"], json!([]));
        assert_eq!(form["challenges"], "");
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let app = create_test_app();
        let first = new_session(&app).await;
        let second = new_session(&app).await;
        assert_ne!(first, second);

        send(
            &app,
            json_request(
                "PUT",
                &format!("/api/sessions/{}/metadata", first),
                json!({ "officer_name": "Grace Phiri" }),
            ),
        )
        .await;

        let other = json_response(send(&app, get(&format!("/api/sessions/{}", second))).await).await;
        assert_eq!(other["officer_name"], "");
    }

    #[tokio::test]
    async fn test_discarded_session_is_gone() {
        let app = create_test_app();
        let id = new_session(&app).await;
        let uri = format!("/api/sessions/{}", id);

        let response = send(
            &app,
            Request::builder().method("DELETE").uri(&uri).body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, get(&uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(json_response(response).await["error"].is_string());
    }

    // =========================================================================
    // Section 2: Metadata, text and tables
    // =========================================================================

    #[tokio::test]
    async fn test_update_metadata() {
        let app = create_test_app();
        let id = new_session(&app).await;

        let response = send(
            &app,
            json_request(
                "PUT",
                &format!("/api/sessions/{}/metadata", id),
                json!({ "officer_name": "Grace Phiri", "report_month": "2026-09-01" }),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_response(response).await;
        assert_eq!(json["officer_name"], "Grace Phiri");
        assert_eq!(json["report_month"], "2026-09");
    }

    #[tokio::test]
    async fn test_invalid_month_rejected() {
        let app = create_test_app();
        let id = new_session(&app).await;

        let response = send(
            &app,
            json_request(
                "PUT",
                &format!("/api/sessions/{}/metadata", id),
                json!({ "report_month": "Smarch 2026" }),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_table_row_lifecycle() {
        let app = create_test_app();
        let id = new_session(&app).await;
        let rows = format!("/api/sessions/{}/tables/vehicles/rows", id);

        for reg in ["MZ 101", "MZ 202"] {
            let response = send(
                &app,
                json_request(
                    "POST",
                    &rows,
                    json!({ "Vehicle Type": "Pickup", "Reg. No.": reg, "Station": "Mwanza" }),
                ),
            )
            .await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = send(
            &app,
            json_request(
                "PUT",
                &format!("{}/1", rows),
                json!({ "Vehicle Type": "Motorcycle", "Reg. No.": "MZ 202", "Remarks": "Grounded" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let table = json_response(response).await;
        assert_eq!(
            table["columns"],
            json!(["Vehicle Type", "Reg. No.", "Station", "Remarks"])
        );
        assert_eq!(table["rows"][1], json!(["Motorcycle", "MZ 202", "", "Grounded"]));

        let response = send(
            &app,
            Request::builder()
                .method("DELETE")
                .uri(format!("{}/0", rows))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let table = json_response(response).await;
        assert_eq!(table["rows"].as_array().unwrap().len(), 1);
        assert_eq!(table["rows"][0][1], "MZ 202");
    }

    #[tokio::test]
    async fn test_replace_table_coerces_cells() {
        let app = create_test_app();
        let id = new_session(&app).await;

        let response = send(
            &app,
            json_request(
                "PUT",
                &format!("/api/sessions/{}/tables/budget", id),
                json!([{ "Cost Centre": "ORT", "Approved": 1500000, "Remarks": null }]),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let table = json_response(response).await;
        assert_eq!(table["rows"][0][0], "ORT");
        assert_eq!(table["rows"][0][1], "1500000");
        assert_eq!(table["rows"][0][5], "");
    }

    #[tokio::test]
    async fn test_unknown_section_and_row() {
        let app = create_test_app();
        let id = new_session(&app).await;

        let response = send(&app, get(&format!("/api/sessions/{}/tables/tractors", id))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(
            &app,
            json_request(
                "PUT",
                &format!("/api/sessions/{}/tables/staffing/rows/3", id),
                json!({ "Grade": "P8" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_text_update_reaches_preview() {
        let app = create_test_app();
        let id = new_session(&app).await;

        let response = send(
            &app,
            json_request(
                "PUT",
                &format!("/api/sessions/{}/text/challenges", id),
                json!({ "value": "Late disbursement of ORT funds" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, get(&format!("/api/sessions/{}/report.md", id))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let markdown = text_response(response).await;
        assert!(markdown.contains("Late disbursement of ORT funds"));
        assert!(markdown.contains("Scheme Utilisation"));

        let response = send(&app, get(&format!("/api/sessions/{}/report.json", id))).await;
        let json = json_response(response).await;
        assert!(json["blocks"].as_array().unwrap().len() > 20);
    }

    // =========================================================================
    // Section 3: Downloads
    // =========================================================================

    #[tokio::test]
    async fn test_download_report() {
        let app = create_test_app();
        let id = new_session(&app).await;

        let response = send(&app, get(&format!("/api/sessions/{}/report", id))).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], DOCX_MIME);
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("Mwanza_Monthly_Report.docx"));

        let bytes = body_bytes(response).await;
        assert!(bytes.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn test_stateless_render() {
        let app = create_test_app();
        let form = json!({
            "officer_name": "Grace Phiri",
            "report_month": "October 2026",
            "staffing": [{ "Post Description": "Engineer", "Filled": 1 }],
            "recommendations": "Recruit two technicians"
        });

        let response = send(&app, json_request("POST", "/api/report", form)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], DOCX_MIME);
        assert!(body_bytes(response).await.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn test_download_unknown_session() {
        let app = create_test_app();
        let response = send(&app, get("/api/sessions/nope/report")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // =========================================================================
    // Section 4: Images
    // =========================================================================

    fn multipart_request(uri: &str, file_name: &str, content_type: &str) -> Request<Body> {
        let boundary = "XBOUNDARYX";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"images\"; filename=\"{f}\"\r\n\
             Content-Type: {c}\r\n\r\nfake-bytes\r\n--{b}--\r\n",
            b = boundary,
            f = file_name,
            c = content_type
        );
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_image_upload_recorded() {
        let app = create_test_app();
        let id = new_session(&app).await;

        let response = send(
            &app,
            multipart_request(&format!("/api/sessions/{}/images", id), "canal.JPG", "image/jpeg"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_response(response).await;
        assert_eq!(json["total"], 1);
        assert_eq!(json["accepted"][0]["file_name"], "canal.JPG");
        assert_eq!(json["accepted"][0]["size_bytes"], 10);
    }

    #[tokio::test]
    async fn test_non_image_upload_rejected() {
        let app = create_test_app();
        let id = new_session(&app).await;

        let response = send(
            &app,
            multipart_request(&format!("/api/sessions/{}/images", id), "notes.txt", "text/plain"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // =========================================================================
    // Section 5: HTML form
    // =========================================================================

    #[tokio::test]
    async fn test_landing_page_starts_session() {
        let app = create_test_app();
        let response = send(&app, get("/")).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let page = location(&response);
        assert!(page.starts_with("/sessions/"));

        let response = send(&app, get(&page)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = text_response(response).await;
        assert!(html.contains("Mwanza Irrigation Monthly Report"));
        assert!(html.contains("Generate Word Report"));
    }

    #[tokio::test]
    async fn test_unknown_session_page_redirects_home() {
        let app = create_test_app();
        let response = send(&app, get("/sessions/expired")).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
    }

    #[tokio::test]
    async fn test_form_post_adds_row() {
        let app = create_test_app();
        let id = new_session(&app).await;
        let uri = format!("/sessions/{}/tables/stakeholders/rows", id);

        // Plain browser post: redirect back to the page
        let response = send(
            &app,
            form_request(&uri, "Stakeholder=World+Vision&Activity=Training", false),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), format!("/sessions/{}", id));

        // htmx post: the re-rendered table comes back
        let response = send(&app, form_request(&uri, "Stakeholder=JICA&Activity=Survey", true)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = text_response(response).await;
        assert!(html.contains("id=\"section-stakeholders\""));
        assert!(html.contains("World Vision"));
        assert!(html.contains("JICA"));
    }

    #[tokio::test]
    async fn test_details_generate_redirects_to_download() {
        let app = create_test_app();
        let id = new_session(&app).await;

        let response = send(
            &app,
            form_request(
                &format!("/sessions/{}/details", id),
                "officer_name=Grace+Phiri&report_month=2026-10&challenges=Floods&recommendations=&action=generate",
                false,
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), format!("/sessions/{}/report.docx", id));

        let form = json_response(send(&app, get(&format!("/api/sessions/{}", id))).await).await;
        assert_eq!(form["officer_name"], "Grace Phiri");
        assert_eq!(form["report_month"], "2026-10");
        assert_eq!(form["challenges"], "Floods");

        let response = send(&app, get(&format!("/sessions/{}/report.docx", id))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], DOCX_MIME);
    }

    #[tokio::test]
    async fn test_page_upload_shows_rejection() {
        let app = create_test_app();
        let id = new_session(&app).await;
        let uri = format!("/sessions/{}/images", id);

        let response = send(&app, multipart_request(&uri, "notes.txt", "text/plain")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        let html = text_response(response).await;
        assert!(html.contains("class=\"upload-error\""));
        assert!(html.contains("notes.txt"));

        let response = send(&app, multipart_request(&uri, "weir.png", "image/png")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), format!("/sessions/{}", id));
    }

    #[tokio::test]
    async fn test_preview_page_escapes_input() {
        let app = create_test_app();
        let id = new_session(&app).await;

        send(
            &app,
            json_request(
                "PUT",
                &format!("/api/sessions/{}/text/recommendations", id),
                json!({ "value": "<script>alert(1)</script>" }),
            ),
        )
        .await;

        let response = send(&app, get(&format!("/sessions/{}/preview", id))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = text_response(response).await;
        assert!(html.contains("Recommendations"));
        assert!(!html.contains("<script>alert(1)</script>"));
    }
}

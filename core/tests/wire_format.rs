//! Verify build/parse methods against inline JSON vectors.
//!
//! Each vector describes an input, the expected request, a simulated
//! response, and the expected parse result. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use taskboard_core::{ApiError, CreateTask, HttpMethod, HttpResponse, TaskClient, UpdateTask};

const BASE_URL: &str = "http://localhost:8000";

fn client() -> TaskClient {
    TaskClient::new(BASE_URL)
}

/// Parse the method string from a vector into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn body_json(req: &taskboard_core::HttpRequest) -> serde_json::Value {
    serde_json::from_str(req.body.as_deref().expect("request has no body")).unwrap()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_vectors() {
    let vectors = serde_json::json!({
        "cases": [
            {
                "name": "fresh task",
                "input": {"title": "Water plants", "description": "Balcony only", "completed": false},
                "expected_request": {
                    "method": "POST",
                    "path": "/todos/",
                    "body": {"title": "Water plants", "description": "Balcony only", "completed": false}
                },
                "response": {
                    "status": 201,
                    "body": {"id": 1, "title": "Water plants", "description": "Balcony only", "completed": false}
                }
            },
            {
                "name": "pre-completed task",
                "input": {"title": "Imported", "description": "From old list", "completed": true},
                "expected_request": {
                    "method": "POST",
                    "path": "/todos/",
                    "body": {"title": "Imported", "description": "From old list", "completed": true}
                },
                "response": {
                    "status": 201,
                    "body": {"id": 2, "title": "Imported", "description": "From old list", "completed": true}
                }
            }
        ]
    });

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: CreateTask = serde_json::from_value(case["input"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        let req = c.build_create_task(&input).unwrap();
        assert_eq!(
            req.method,
            parse_method(expected_req["method"].as_str().unwrap()),
            "{name}: method"
        );
        assert_eq!(
            req.path,
            format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()),
            "{name}: path"
        );
        assert_eq!(body_json(&req), expected_req["body"].clone(), "{name}: body");

        let response = HttpResponse {
            status: case["response"]["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: case["response"]["body"].to_string(),
        };
        let created = c.parse_create_task(response).unwrap();
        assert_eq!(created.title, input.title, "{name}: parsed title");
        assert_eq!(created.completed, input.completed, "{name}: parsed flag");
    }
}

// ---------------------------------------------------------------------------
// Update — exact partial bodies
// ---------------------------------------------------------------------------

#[test]
fn toggle_sends_exactly_the_completed_field() {
    let req = client().build_update_task(1, &UpdateTask::toggle(true)).unwrap();
    assert_eq!(req.method, HttpMethod::Patch);
    assert_eq!(req.path, format!("{BASE_URL}/todos/1"));
    assert_eq!(body_json(&req), serde_json::json!({"completed": true}));
}

#[test]
fn untoggle_sends_exactly_the_completed_field() {
    let req = client().build_update_task(1, &UpdateTask::toggle(false)).unwrap();
    assert_eq!(body_json(&req), serde_json::json!({"completed": false}));
}

#[test]
fn edit_save_sends_exactly_title_and_description() {
    let input = UpdateTask::edit("New title".to_string(), "New description".to_string());
    let req = client().build_update_task(5, &input).unwrap();
    assert_eq!(req.method, HttpMethod::Patch);
    assert_eq!(req.path, format!("{BASE_URL}/todos/5"));
    assert_eq!(
        body_json(&req),
        serde_json::json!({"title": "New title", "description": "New description"})
    );
}

// ---------------------------------------------------------------------------
// Toggle scenario: PATCH response and decoded result
// ---------------------------------------------------------------------------

#[test]
fn toggle_scenario_roundtrip() {
    // List returns one pending task; the toggle patches it to completed.
    let c = client();

    let list_response = HttpResponse {
        status: 200,
        headers: Vec::new(),
        body: r#"[{"id":1,"title":"A","description":"d","completed":false}]"#.to_string(),
    };
    let tasks = c.parse_list_tasks(list_response).unwrap();
    assert_eq!(tasks.len(), 1);
    let task = &tasks[0];
    assert!(!task.completed);

    let req = c
        .build_update_task(task.id, &UpdateTask::toggle(!task.completed))
        .unwrap();
    assert_eq!(body_json(&req), serde_json::json!({"completed": true}));

    let patch_response = HttpResponse {
        status: 200,
        headers: Vec::new(),
        body: r#"{"id":1,"title":"A","description":"d","completed":true}"#.to_string(),
    };
    let updated = c.parse_update_task(patch_response).unwrap();
    assert!(updated.completed);
}

// ---------------------------------------------------------------------------
// Delete and error mapping
// ---------------------------------------------------------------------------

#[test]
fn delete_request_and_no_content_response() {
    let c = client();
    let req = c.build_delete_task(8);
    assert_eq!(req.method, HttpMethod::Delete);
    assert_eq!(req.path, format!("{BASE_URL}/todos/8"));
    assert!(req.body.is_none());

    let response = HttpResponse {
        status: 204,
        headers: Vec::new(),
        body: String::new(),
    };
    assert!(c.parse_delete_task(response).is_ok());
}

#[test]
fn server_error_carries_status_and_body() {
    let response = HttpResponse {
        status: 503,
        headers: Vec::new(),
        body: "maintenance".to_string(),
    };
    match client().parse_list_tasks(response).unwrap_err() {
        ApiError::HttpError { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected HttpError, got {other:?}"),
    }
}

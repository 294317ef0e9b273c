mod common;

use common::{TestApp, code};
use http::StatusCode;
use serde_json::{Value, json};
use shared::models::Role;

fn employee_body(email: &str, status: &str) -> Value {
    json!({
        "full_name": "Asha Rao",
        "email": email,
        "phone": "9845000000",
        "gender": "Female",
        "joining_date": "2024-04-01",
        "department": "DEPT001",
        "designation": "DES001",
        "status": status
    })
}

#[tokio::test]
async fn test_department_crud() {
    let app = TestApp::new();
    let hr = app.token(Role::Hr).await;

    let (status, created) = app
        .request(
            "POST",
            "/departments",
            Some(&hr),
            Some(json!({"department_code": " DEPT009 ", "department_name": "Legal"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["department_code"], "DEPT009");
    assert_eq!(created["status"], "active");
    let id = created["id"].as_i64().unwrap();

    let (status, dup) = app
        .request(
            "POST",
            "/departments",
            Some(&hr),
            Some(json!({"department_code": "DEPT009", "department_name": "Other"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(dup["details"]["field"], "department_code");

    let (status, updated) = app
        .request(
            "PUT",
            &format!("/departments/{id}"),
            Some(&hr),
            Some(json!({"department_name": "Legal & Compliance"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["department_name"], "Legal & Compliance");
    assert_eq!(updated["department_code"], "DEPT009");

    let (status, fetched) = app.get(&format!("/departments/{id}"), &hr).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, updated);

    let (status, deleted) = app
        .request("DELETE", &format!("/departments/{id}"), Some(&hr), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({"deleted": true}));

    let (status, _) = app
        .request("DELETE", &format!("/departments/{id}"), Some(&hr), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_toggle_twice_restores_status() {
    let app = TestApp::new();
    let hr = app.token(Role::Hr).await;
    let (_, created) = app
        .request(
            "POST",
            "/departments",
            Some(&hr),
            Some(json!({"department_code": "DEPT001", "department_name": "Engineering"})),
        )
        .await;
    let uri = format!("/departments/{}/status", created["id"]);

    let (_, once) = app.request("PATCH", &uri, Some(&hr), None).await;
    let (_, twice) = app.request("PATCH", &uri, Some(&hr), None).await;
    assert_eq!(once["status"], "inactive");
    assert_eq!(twice["status"], created["status"]);
}

#[tokio::test]
async fn test_create_validation() {
    let app = TestApp::new();
    let hr = app.token(Role::Hr).await;

    let (status, body) = app
        .request(
            "POST",
            "/departments",
            Some(&hr),
            Some(json!({"department_code": "   ", "department_name": "X"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "department_code");

    let (status, _) = app
        .request(
            "POST",
            "/departments",
            Some(&hr),
            Some(json!({"department_code": "D1", "department_name": "X", "status": "archived"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut bad_date = employee_body("e@x.com", "active");
    bad_date["joining_date"] = json!("01/04/2024");
    let (status, _) = app
        .request("POST", "/employees", Some(&hr), Some(bad_date))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_designation_filter_by_department() {
    let app = TestApp::new();
    let hr = app.token(Role::Hr).await;
    hr_server::seed::seed_reference_data(&app.state.stores)
        .await
        .unwrap();

    let (status, all) = app.get("/designations", &hr).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 10);

    let (_, engineering) = app.get("/designations?department=DEPT001", &hr).await;
    let engineering = engineering.as_array().unwrap();
    assert_eq!(engineering.len(), 3);
    assert!(engineering.iter().all(|d| d["department_code"] == "DEPT001"));
}

#[tokio::test]
async fn test_company_stamps_creator() {
    let app = TestApp::new();
    let (admin, token) = app
        .account(
            "admin@x.com",
            "secret1",
            Role::Admin,
            shared::models::ApprovalStatus::Approved,
        )
        .await;

    let (status, company) = app
        .request(
            "POST",
            "/companies",
            Some(&token),
            Some(json!({
                "company_code": "C001",
                "company_name": "Acme",
                "email": "info@acme.test",
                "phone": "080",
                "address": "1 Main St",
                "city": "Bengaluru",
                "state": "KA",
                "country": "India",
                "pincode": "560001",
                "date_of_incorporation": "2020-01-15",
                "created_by": "someone-else"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(company["created_by"], admin.id.as_str());
    assert_eq!(company["date_of_incorporation"], "2020-01-15");
}

#[tokio::test]
async fn test_employee_lifecycle_and_count() {
    let app = TestApp::new();
    let hr = app.token(Role::Hr).await;

    let (status, active) = app
        .request("POST", "/employees", Some(&hr), Some(employee_body("a@x.com", "active")))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, onboarding) = app
        .request(
            "POST",
            "/employees",
            Some(&hr),
            Some(employee_body("b@x.com", "onboarding")),
        )
        .await;

    let (status, dup) = app
        .request("POST", "/employees", Some(&hr), Some(employee_body("a@x.com", "active")))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code(&dup), 5002);

    let (status, count) = app.get("/employees/count", &hr).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count, json!({"total": 2, "active": 1, "onboarding": 1}));

    let (status, toggled) = app
        .request(
            "PATCH",
            &format!("/employee/{}/status", active["id"]),
            Some(&hr),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["status"], "inactive");

    let (status, body) = app
        .request(
            "PATCH",
            &format!("/employee/{}/status", onboarding["id"]),
            Some(&hr),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), 5003);

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/employee/{}", onboarding["id"]),
            Some(&hr),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = app.get("/employees", &hr).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert!(list[0].get("password").is_none());
}

#[tokio::test]
async fn test_unknown_ids_are_404() {
    let app = TestApp::new();
    let admin = app.token(Role::Admin).await;
    for uri in [
        "/departments/42",
        "/designations/42",
        "/companies/42",
        "/employee/42",
    ] {
        let (status, _) = app.get(uri, &admin).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_malformed_ids_are_validation_errors() {
    let app = TestApp::new();
    let admin = app.token(Role::Admin).await;
    for uri in [
        "/departments/abc",
        "/designations/1.5",
        "/companies/-x",
        "/employee/99999999999999999999",
    ] {
        let (status, body) = app.get(uri, &admin).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(code(&body), 2, "{uri}");
        assert_eq!(body["details"]["location"], "path", "{uri}");
    }

    let (status, body) = app
        .request("PUT", "/departments/abc", Some(&admin), Some(json!({"department_name": "X"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), 2);
}

#[tokio::test]
async fn test_malformed_designation_filter_is_validation_error() {
    let app = TestApp::new();
    let hr = app.token(Role::Hr).await;
    let (status, body) = app
        .get("/designations?department=DEPT001&department=DEPT002", &hr)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), 2);
    assert_eq!(body["details"]["location"], "query");
}

use serde_json::json;
use tera::{Context, Tera};

fn tera() -> Tera {
    Tera::new("templates/**/*.html").expect("templates parse")
}

fn base() -> serde_json::Value {
    json!({
        "alerts": [["Invoice issued successfully.", "success"]],
        "role": {"role": "admin", "is_admin": true, "is_officer": false, "is_resident": false},
        "current_email": "admin@society.in",
        "current_page": "requests",
        "notifications": [],
    })
}

fn capabilities(granted: &[&str]) -> serde_json::Value {
    let all = [
        "submit_request",
        "approve_request",
        "complete_request",
        "reschedule_request",
        "cancel_request",
        "give_feedback",
        "view_all_requests",
        "issue_invoice",
        "issue_notice",
        "manage_users",
    ];
    all.iter()
        .map(|name| (name.to_string(), json!(granted.contains(name))))
        .collect::<serde_json::Map<_, _>>()
        .into()
}

fn render(template: &str, page: serde_json::Value) -> String {
    let mut value = base();
    value["page"] = page;
    let context = Context::from_serialize(value).unwrap();
    tera().render(template, &context).unwrap()
}

#[test]
fn every_template_parses() {
    let tera = tera();
    let names: Vec<_> = tera.get_template_names().collect();
    for expected in [
        "base.html",
        "auth/login.html",
        "requests/index.html",
        "invoices/index.html",
        "notices/index.html",
        "feedback/index.html",
        "profile/index.html",
        "users/index.html",
    ] {
        assert!(names.contains(&expected), "missing {expected}");
    }
}

#[test]
fn requests_page_shows_staff_actions_for_pending_rows() {
    let html = render(
        "requests/index.html",
        json!({
            "capabilities": capabilities(&["approve_request", "cancel_request", "view_all_requests"]),
            "requests": [{
                "id": "R7", "status": "Pending", "service_type": "Plumber",
                "assigned_to": null, "timeslot": "10:00 - 11:00", "slot_id": 2,
                "resident_id": null, "resident_name": "Asha", "flat": "B-12",
                "date": null, "feedback_given": false
            }],
            "counts": {"pending": 1, "approved": 0, "completed": 0, "total": 1},
            "service_options": [{"label": "Plumber", "value": "Plumber"}],
            "status_options": [{"label": "Pending", "value": "Pending"}],
            "slot_options": [],
            "selection": {"year": "", "month": "", "service": "", "status": ""},
            "submit_dialog": {"visible": false, "draft": {"service_type": "", "slot_index": null}},
            "reschedule_dialog": {"visible": false, "draft": {"request_id": "", "service_type": "", "slot_index": null}},
            "approve_dialog": {"visible": true, "draft": {"request_id": "R7", "assigned_to": ""}},
            "feedback_dialog": {"visible": false, "draft": {"request_id": "", "rating": 0, "content": ""}},
        }),
    );

    assert!(html.contains("/requests?approve=R7"));
    assert!(html.contains("action=\"/requests/approve\""));
    assert!(html.contains("B-12"));
    assert!(html.contains("Invoice issued successfully."));
    assert!(!html.contains("No requests found."));
}

#[test]
fn empty_invoice_listing_hides_issue_button_for_residents() {
    let html = render(
        "invoices/index.html",
        json!({
            "capabilities": capabilities(&["submit_request"]),
            "rows": [],
            "year_options": [{"label": "2024", "value": "2024"}],
            "month_options": [],
            "issue_dialog": {"visible": false, "draft": {"amount": 0.0}},
        }),
    );

    assert!(html.contains("No invoices found."));
    assert!(!html.contains("/invoices?issue=true"));
    assert!(html.contains("<option value=\"2024\">2024</option>"));
}

#[test]
fn login_page_renders_signup_tab() {
    let mut value = base();
    value["current_email"] = serde_json::Value::Null;
    value["page"] = json!({"active_tab": "signup", "error_message": "Invalid details", "email": ""});
    let context = Context::from_serialize(value).unwrap();
    let html = tera().render("auth/login.html", &context).unwrap();

    assert!(html.contains("action=\"/signup\""));
    assert!(html.contains("Invalid details"));
    assert!(!html.contains("/logout"));
}

//! Full adapter lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every adapter
//! operation over real HTTP using ureq: the client lifecycle with nested
//! invoice/recurring flows, embedded-failure classification, and
//! transport-level classification.

use freshbooks_core::{ApiError, Config, FreshbooksClient, HttpRequest, HttpResponse, Operation};
use serde_json::{json, Map, Value};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut builder = agent.post(&req.url);
    for (name, value) in &req.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    let mut response = builder
        .send(req.body.as_bytes())
        .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(m) => m,
        other => panic!("expected object, got {other}"),
    }
}

fn lines(count: usize, name_prefix: &str, unit_cost: f64) -> Value {
    let line: Vec<Value> = (1..=count)
        .map(|i| json!({"name": format!("{name_prefix} {i}"), "unit_cost": unit_cost, "quantity": 1}))
        .collect();
    json!({ "line": line })
}

#[test]
fn adapter_lifecycle() {
    // Start mock server on a random port.
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    let mut config = Config::new("acme", "secret-token");
    config.base_url = Some(format!("http://{addr}/api/2.1/xml-in"));
    let client = FreshbooksClient::new(config);

    // Unknown client id — embedded failure, classified as an API error.
    let req = client
        .build_find_client_by_id(map(json!({"client_id": "123456789"})))
        .unwrap();
    let err = client
        .parse_response(Operation::FindClientById, execute(req))
        .unwrap_err();
    match &err {
        ApiError::Api {
            message,
            code,
            response,
        } => {
            assert_eq!(message, "FreshBooks error [Client not found] ");
            assert_eq!(*code, 400);
            assert_eq!(response["@status"], "fail");
        }
        other => panic!("expected Api error, got {other:?}"),
    }

    // No clients yet.
    let req = client.build_find_clients(Map::new()).unwrap();
    let body = client
        .parse_response(Operation::FindClients, execute(req))
        .unwrap();
    assert_eq!(body["response"]["clients"]["@total"], 0);

    // Create a client.
    let req = client
        .build_create_client(map(json!({
            "email": "test.integrations@example.com",
            "first_name": "Test",
            "last_name": "U001"
        })))
        .unwrap();
    let body = client
        .parse_response(Operation::CreateClient, execute(req))
        .unwrap();
    assert_eq!(body["response"]["@status"], "ok");
    let client_id = body["response"]["client_id"].as_str().unwrap().to_string();

    // Fetch it back.
    let req = client
        .build_find_client_by_id(map(json!({"client_id": client_id})))
        .unwrap();
    let body = client
        .parse_response(Operation::FindClientById, execute(req))
        .unwrap();
    let fetched = &body["response"]["client"];
    assert_eq!(fetched["email"], "test.integrations@example.com");
    assert_eq!(fetched["last_name"], "U001");

    // Update the last name and verify.
    let req = client
        .build_update_client(map(json!({"client_id": client_id, "last_name": "U002"})))
        .unwrap();
    client
        .parse_response(Operation::UpdateClient, execute(req))
        .unwrap();

    let req = client
        .build_find_client_by_id(map(json!({"client_id": client_id})))
        .unwrap();
    let body = client
        .parse_response(Operation::FindClientById, execute(req))
        .unwrap();
    assert_eq!(body["response"]["client"]["last_name"], "U002");
    assert_eq!(body["response"]["client"]["first_name"], "Test");

    // List filtered by email.
    let req = client
        .build_find_clients(map(json!({"email": "test.integrations@example.com"})))
        .unwrap();
    let body = client
        .parse_response(Operation::FindClients, execute(req))
        .unwrap();
    assert_eq!(body["response"]["clients"]["@total"], 1);

    // Invoice flow: create with four lines.
    let req = client
        .build_create_invoice(map(json!({
            "client_id": client_id,
            "number": "I-00001",
            "lines": lines(4, "Product", 1.0)
        })))
        .unwrap();
    let body = client
        .parse_response(Operation::CreateInvoice, execute(req))
        .unwrap();
    let invoice_id = body["response"]["invoice_id"].as_str().unwrap().to_string();

    let req = client
        .build_find_invoice_by_id(map(json!({"invoice_id": invoice_id})))
        .unwrap();
    let body = client
        .parse_response(Operation::FindInvoiceById, execute(req))
        .unwrap();
    let invoice = &body["response"]["invoice"];
    assert_eq!(invoice["number"], "I-00001");
    assert_eq!(invoice["lines"]["line"].as_array().unwrap().len(), 4);

    let req = client
        .build_find_invoices(map(json!({"client_id": client_id})))
        .unwrap();
    let body = client
        .parse_response(Operation::FindInvoices, execute(req))
        .unwrap();
    assert_eq!(body["response"]["invoices"]["@total"], 1);

    // Shrink the invoice to two lines.
    let req = client
        .build_update_invoice(map(json!({
            "invoice_id": invoice_id,
            "lines": lines(2, "Updated Product", 1.75)
        })))
        .unwrap();
    client
        .parse_response(Operation::UpdateInvoice, execute(req))
        .unwrap();

    let req = client
        .build_find_invoice_by_id(map(json!({"invoice_id": invoice_id})))
        .unwrap();
    let body = client
        .parse_response(Operation::FindInvoiceById, execute(req))
        .unwrap();
    assert_eq!(
        body["response"]["invoice"]["lines"]["line"]
            .as_array()
            .unwrap()
            .len(),
        2
    );

    let req = client
        .build_remove_invoice(map(json!({"invoice_id": invoice_id})))
        .unwrap();
    client
        .parse_response(Operation::RemoveInvoice, execute(req))
        .unwrap();

    let req = client
        .build_find_invoices(map(json!({"client_id": client_id})))
        .unwrap();
    let body = client
        .parse_response(Operation::FindInvoices, execute(req))
        .unwrap();
    assert_eq!(body["response"]["invoices"]["@total"], 0);

    // Recurring profile flow.
    let req = client
        .build_create_recurring(map(json!({
            "client_id": client_id,
            "lines": lines(4, "Product", 1.0)
        })))
        .unwrap();
    let body = client
        .parse_response(Operation::CreateRecurring, execute(req))
        .unwrap();
    let recurring_id = body["response"]["recurring_id"]
        .as_str()
        .unwrap()
        .to_string();

    let req = client
        .build_find_recurring_by_id(map(json!({"recurring_id": recurring_id})))
        .unwrap();
    let body = client
        .parse_response(Operation::FindRecurringById, execute(req))
        .unwrap();
    assert_eq!(
        body["response"]["recurring"]["lines"]["line"]
            .as_array()
            .unwrap()
            .len(),
        4
    );

    let req = client
        .build_find_recurring(map(json!({"client_id": client_id})))
        .unwrap();
    let body = client
        .parse_response(Operation::FindRecurring, execute(req))
        .unwrap();
    assert_eq!(body["response"]["recurrings"]["@total"], 1);

    let req = client
        .build_remove_recurring(map(json!({"recurring_id": recurring_id})))
        .unwrap();
    client
        .parse_response(Operation::RemoveRecurring, execute(req))
        .unwrap();

    // Currencies — no payload.
    let req = client.build_find_currencies().unwrap();
    let body = client
        .parse_response(Operation::FindCurrencies, execute(req))
        .unwrap();
    assert!(body["response"]["currencies"]["@total"].as_u64().unwrap() > 0);

    // Remove the client, then fetching it is an embedded failure again.
    let req = client
        .build_remove_client(map(json!({"client_id": client_id})))
        .unwrap();
    client
        .parse_response(Operation::RemoveClient, execute(req))
        .unwrap();

    let req = client
        .build_find_client_by_id(map(json!({"client_id": client_id})))
        .unwrap();
    let err = client
        .parse_response(Operation::FindClientById, execute(req))
        .unwrap_err();
    assert!(matches!(err, ApiError::Api { code: 400, .. }));

    // Transport classification: a path the server does not serve yields a
    // plain 404, not an embedded failure.
    let mut req = client.build_find_currencies().unwrap();
    req.url = format!("http://{addr}/no-such-path");
    let err = client
        .parse_response(Operation::FindCurrencies, execute(req))
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport { code: 404, .. }));
}

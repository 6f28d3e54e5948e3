//! In-memory emulation of the FreshBooks `xml-in` endpoint.
//!
//! Accepts the deserialized mapping form of the request envelope as JSON
//! (`{"request": {"@method": "...", ...}}`) on a single POST route and
//! dispatches on `@method`. Application errors are reported the way the
//! real service reports them: HTTP 200 with an embedded
//! `{"@status": "fail", "error": "..."}` response. Response shapes follow
//! the real replies — string ids, entities under their singular key, lists
//! as `{<plural>: {"@total": n, <singular>: [...]}}`.

use std::{collections::BTreeMap, sync::Arc};

use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

/// One entity family (clients, invoices or recurring profiles) with its
/// upstream naming: `client.get` answers under `client`, lists under
/// `clients` keyed by `client_id`, and so on.
struct Entities {
    singular: &'static str,
    plural: &'static str,
    id_field: &'static str,
    items: BTreeMap<u64, Map<String, Value>>,
}

impl Entities {
    fn new(singular: &'static str, plural: &'static str, id_field: &'static str) -> Self {
        Self {
            singular,
            plural,
            id_field,
            items: BTreeMap::new(),
        }
    }
}

pub struct Store {
    next_id: u64,
    clients: Entities,
    invoices: Entities,
    recurrings: Entities,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            next_id: 1,
            clients: Entities::new("client", "clients", "client_id"),
            invoices: Entities::new("invoice", "invoices", "invoice_id"),
            recurrings: Entities::new("recurring", "recurrings", "recurring_id"),
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/2.1/xml-in", post(handle))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn handle(State(db): State<Db>, Json(body): Json<Value>) -> Json<Value> {
    let request = match body.get("request") {
        Some(Value::Object(request)) => request.clone(),
        _ => return fail("Invalid XML-RPC request"),
    };
    let method = match request.get("@method").and_then(Value::as_str) {
        Some(method) => method.to_string(),
        None => return fail("Invalid XML-RPC request"),
    };
    debug!("dispatching {method}");

    let mut store = db.write().await;
    match method.as_str() {
        "client.create" => create(&mut store, |s| &mut s.clients, &request),
        "client.update" => update(&mut store.clients, &request),
        "client.delete" => delete(&mut store.clients, &request),
        "client.get" => get(&store.clients, &request),
        "client.list" => list(&store.clients, &request, &["email"]),
        "invoice.create" => create(&mut store, |s| &mut s.invoices, &request),
        "invoice.update" => update(&mut store.invoices, &request),
        "invoice.delete" => delete(&mut store.invoices, &request),
        "invoice.get" => get(&store.invoices, &request),
        "invoice.list" => list(&store.invoices, &request, &["client_id"]),
        "recurring.create" => create(&mut store, |s| &mut s.recurrings, &request),
        "recurring.update" => update(&mut store.recurrings, &request),
        "recurring.delete" => delete(&mut store.recurrings, &request),
        "recurring.get" => get(&store.recurrings, &request),
        "recurring.list" => list(&store.recurrings, &request, &["client_id"]),
        "currency.list" => currencies(),
        other => fail(&format!("Method does not exist: {other}")),
    }
}

fn ok(mut fields: Map<String, Value>) -> Json<Value> {
    fields.insert("@status".to_string(), Value::String("ok".to_string()));
    Json(json!({ "response": fields }))
}

/// Embedded failure: HTTP 200 with `"@status": "fail"`, like the real
/// service.
fn fail(error: &str) -> Json<Value> {
    Json(json!({ "response": { "@status": "fail", "error": error } }))
}

fn not_found(entities: &Entities) -> Json<Value> {
    // "Client not found", "Invoice not found", ...
    let mut name: Vec<char> = entities.singular.chars().collect();
    name[0] = name[0].to_ascii_uppercase();
    let name: String = name.into_iter().collect();
    fail(&format!("{name} not found"))
}

/// Resolve the entity id named by `id_field`, either inside the singular
/// payload object (update) or at the top level of the request (get/delete).
fn requested_id(entities: &Entities, request: &Map<String, Value>) -> Option<u64> {
    let from_entity = request
        .get(entities.singular)
        .and_then(|e| e.get(entities.id_field));
    from_entity
        .or_else(|| request.get(entities.id_field))
        .and_then(Value::as_str)
        .and_then(|id| id.parse().ok())
}

fn create(
    store: &mut Store,
    select: impl Fn(&mut Store) -> &mut Entities,
    request: &Map<String, Value>,
) -> Json<Value> {
    let id = store.next_id;
    store.next_id += 1;

    let entities = select(store);
    let mut entity = match request.get(entities.singular) {
        Some(Value::Object(fields)) => fields.clone(),
        _ => return fail(&format!("{} not specified", entities.singular)),
    };
    entity.insert(
        entities.id_field.to_string(),
        Value::String(id.to_string()),
    );
    entities.items.insert(id, entity);

    let mut fields = Map::new();
    fields.insert(
        entities.id_field.to_string(),
        Value::String(id.to_string()),
    );
    ok(fields)
}

fn update(entities: &mut Entities, request: &Map<String, Value>) -> Json<Value> {
    let Some(id) = requested_id(entities, request) else {
        return not_found(entities);
    };
    let incoming = match request.get(entities.singular) {
        Some(Value::Object(fields)) => fields.clone(),
        _ => return fail(&format!("{} not specified", entities.singular)),
    };
    match entities.items.get_mut(&id) {
        Some(entity) => {
            for (key, value) in incoming {
                if key != entities.id_field {
                    entity.insert(key, value);
                }
            }
            ok(Map::new())
        }
        None => not_found(entities),
    }
}

fn delete(entities: &mut Entities, request: &Map<String, Value>) -> Json<Value> {
    match requested_id(entities, request).and_then(|id| entities.items.remove(&id)) {
        Some(_) => ok(Map::new()),
        None => not_found(entities),
    }
}

fn get(entities: &Entities, request: &Map<String, Value>) -> Json<Value> {
    match requested_id(entities, request).and_then(|id| entities.items.get(&id)) {
        Some(entity) => {
            let mut fields = Map::new();
            fields.insert(
                entities.singular.to_string(),
                Value::Object(entity.clone()),
            );
            ok(fields)
        }
        None => not_found(entities),
    }
}

/// List entities, filtered by exact match on any of `filter_fields` present
/// in the request.
fn list(
    entities: &Entities,
    request: &Map<String, Value>,
    filter_fields: &[&str],
) -> Json<Value> {
    let matches: Vec<Value> = entities
        .items
        .values()
        .filter(|entity| {
            filter_fields.iter().all(|field| match request.get(*field) {
                Some(wanted) => entity.get(*field) == Some(wanted),
                None => true,
            })
        })
        .map(|entity| Value::Object(entity.clone()))
        .collect();

    let mut collection = Map::new();
    collection.insert("@total".to_string(), Value::from(matches.len()));
    collection.insert(entities.singular.to_string(), Value::Array(matches));

    let mut fields = Map::new();
    fields.insert(entities.plural.to_string(), Value::Object(collection));
    ok(fields)
}

fn currencies() -> Json<Value> {
    let list = json!([
        { "code": "USD", "name": "U.S. Dollar" },
        { "code": "EUR", "name": "Euro" },
        { "code": "GBP", "name": "Pound Sterling" },
    ]);
    let total = list.as_array().map(Vec::len).unwrap_or(0);
    let mut fields = Map::new();
    fields.insert(
        "currencies".to_string(),
        json!({ "@total": total, "currency": list }),
    );
    ok(fields)
}

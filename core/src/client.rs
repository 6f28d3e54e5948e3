//! Stateless HTTP request builder and response parser for the FreshBooks
//! API.
//!
//! # Design
//! `FreshbooksClient` holds only a `Config` and carries no mutable state
//! between calls. Every operation is a POST of an envelope to the single
//! `xml-in` endpoint, so one `build_operation` / `parse_response` pair
//! carries all the logic; the per-operation methods are thin wrappers over
//! the `CATALOG` rows. The caller executes the actual HTTP round-trip
//! between `build_*` and `parse_response`, keeping the core deterministic
//! and free of I/O dependencies.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::catalog::Operation;
use crate::classify::{classify, convert_transport_error};
use crate::envelope::build_request;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

const USER_AGENT: &str = concat!("freshbooks-adapter/", env!("CARGO_PKG_VERSION"));

/// Static credentials and addressing for one FreshBooks account.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Account subdomain, e.g. `acme` for `acme.freshbooks.com`.
    pub account: String,
    /// Authentication token. Sent as the basic-auth user with the fixed
    /// password `"x"`, as the upstream requires.
    pub token: String,
    /// Overrides the account-derived API URL. Used to point the client at
    /// a local test server.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Config {
    pub fn new(account: &str, token: &str) -> Self {
        Self {
            account: account.to_string(),
            token: token.to_string(),
            base_url: None,
        }
    }
}

/// Synchronous, stateless client for the FreshBooks API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip.
#[derive(Debug, Clone)]
pub struct FreshbooksClient {
    config: Config,
}

impl FreshbooksClient {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Endpoint URL all operations POST to.
    pub fn api_url(&self) -> String {
        match &self.config.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!(
                "https://{}.freshbooks.com/api/2.1/xml-in",
                self.config.account
            ),
        }
    }

    /// Build the request for any catalog operation.
    ///
    /// Applies the catalog wrap key, constructs the envelope, and emits the
    /// envelope's `body` field as the HTTP body. The full envelope shape is
    /// `{body: {request: {...}}}`; the outer `body` level is the transport
    /// convention for a single-field request body.
    pub fn build_operation(
        &self,
        operation: Operation,
        payload: Option<Map<String, Value>>,
    ) -> Result<HttpRequest, ApiError> {
        let entry = operation.entry();

        let payload = match (entry.wrap_key, payload) {
            (Some(key), fields) => {
                let mut wrapped = Map::new();
                wrapped.insert(
                    key.to_string(),
                    Value::Object(fields.unwrap_or_default()),
                );
                Some(wrapped)
            }
            (None, fields) => fields,
        };

        let envelope = build_request(entry.method, payload.as_ref())?;
        debug!("{} [{}]", entry.request_label, envelope);

        let body = serde_json::to_string(&envelope["body"]).map_err(|e| {
            ApiError::InvalidRequest(format!("payload could not be serialized: {e}"))
        })?;

        Ok(HttpRequest {
            url: self.api_url(),
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("authorization".to_string(), self.auth_header()),
                ("user-agent".to_string(), USER_AGENT.to_string()),
            ],
            body,
        })
    }

    /// Classify the response of any catalog operation.
    ///
    /// Non-2xx statuses go through the transport converter; 2xx bodies are
    /// deserialized and checked for an embedded failure. A body with
    /// `response."@status"` equal to `"fail"` never escapes untranslated.
    pub fn parse_response(
        &self,
        operation: Operation,
        response: HttpResponse,
    ) -> Result<Value, ApiError> {
        let entry = operation.entry();

        if !(200..300).contains(&response.status) {
            return Err(convert_transport_error(response.status, &response.body));
        }

        let body: Value = serde_json::from_str(&response.body).map_err(|e| {
            ApiError::Transport {
                message: format!("malformed FreshBooks response: {e}"),
                code: response.status,
                body: Value::String(response.body.clone()),
            }
        })?;

        let body = classify(body)?;
        debug!("{} [{}]", entry.response_label, body);
        Ok(body)
    }

    pub fn build_create_client(&self, client: Map<String, Value>) -> Result<HttpRequest, ApiError> {
        self.build_operation(Operation::CreateClient, Some(client))
    }

    pub fn build_update_client(&self, client: Map<String, Value>) -> Result<HttpRequest, ApiError> {
        self.build_operation(Operation::UpdateClient, Some(client))
    }

    pub fn build_remove_client(&self, payload: Map<String, Value>) -> Result<HttpRequest, ApiError> {
        self.build_operation(Operation::RemoveClient, Some(payload))
    }

    pub fn build_find_client_by_id(
        &self,
        payload: Map<String, Value>,
    ) -> Result<HttpRequest, ApiError> {
        self.build_operation(Operation::FindClientById, Some(payload))
    }

    pub fn build_find_clients(&self, payload: Map<String, Value>) -> Result<HttpRequest, ApiError> {
        self.build_operation(Operation::FindClients, Some(payload))
    }

    pub fn build_create_invoice(
        &self,
        invoice: Map<String, Value>,
    ) -> Result<HttpRequest, ApiError> {
        self.build_operation(Operation::CreateInvoice, Some(invoice))
    }

    pub fn build_update_invoice(
        &self,
        invoice: Map<String, Value>,
    ) -> Result<HttpRequest, ApiError> {
        self.build_operation(Operation::UpdateInvoice, Some(invoice))
    }

    pub fn build_remove_invoice(
        &self,
        payload: Map<String, Value>,
    ) -> Result<HttpRequest, ApiError> {
        self.build_operation(Operation::RemoveInvoice, Some(payload))
    }

    pub fn build_find_invoice_by_id(
        &self,
        payload: Map<String, Value>,
    ) -> Result<HttpRequest, ApiError> {
        self.build_operation(Operation::FindInvoiceById, Some(payload))
    }

    pub fn build_find_invoices(
        &self,
        payload: Map<String, Value>,
    ) -> Result<HttpRequest, ApiError> {
        self.build_operation(Operation::FindInvoices, Some(payload))
    }

    pub fn build_create_recurring(
        &self,
        recurring: Map<String, Value>,
    ) -> Result<HttpRequest, ApiError> {
        self.build_operation(Operation::CreateRecurring, Some(recurring))
    }

    pub fn build_update_recurring(
        &self,
        recurring: Map<String, Value>,
    ) -> Result<HttpRequest, ApiError> {
        self.build_operation(Operation::UpdateRecurring, Some(recurring))
    }

    pub fn build_remove_recurring(
        &self,
        payload: Map<String, Value>,
    ) -> Result<HttpRequest, ApiError> {
        self.build_operation(Operation::RemoveRecurring, Some(payload))
    }

    pub fn build_find_recurring_by_id(
        &self,
        payload: Map<String, Value>,
    ) -> Result<HttpRequest, ApiError> {
        self.build_operation(Operation::FindRecurringById, Some(payload))
    }

    pub fn build_find_recurring(
        &self,
        payload: Map<String, Value>,
    ) -> Result<HttpRequest, ApiError> {
        self.build_operation(Operation::FindRecurring, Some(payload))
    }

    /// Currency listing takes no payload.
    pub fn build_find_currencies(&self) -> Result<HttpRequest, ApiError> {
        self.build_operation(Operation::FindCurrencies, None)
    }

    /// Fixed reply for the disabled webhook surface.
    pub fn webhook_response() -> HttpResponse {
        HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: "Invalid request".to_string(),
        }
    }

    fn auth_header(&self) -> String {
        let credentials = STANDARD.encode(format!("{}:x", self.config.token));
        format!("Basic {credentials}")
    }
}

//! Static catalog of adapter operations.
//!
//! Pure configuration data: each external operation maps to an upstream
//! method identifier, an optional singular key the payload is wrapped
//! under, and the log labels emitted around the call. The create/update
//! operations wrap their payload (`client.create` expects the fields under
//! `client`) while get/delete/list pass the caller's fields unwrapped —
//! that asymmetry is the upstream's, preserved as observed.

/// External operations exposed by the adapter, one per upstream call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateClient,
    UpdateClient,
    RemoveClient,
    FindClientById,
    FindClients,
    CreateInvoice,
    UpdateInvoice,
    RemoveInvoice,
    FindInvoiceById,
    FindInvoices,
    CreateRecurring,
    UpdateRecurring,
    RemoveRecurring,
    FindRecurringById,
    FindRecurring,
    FindCurrencies,
}

/// One row of the operation catalog.
#[derive(Debug)]
pub struct CatalogEntry {
    pub operation: Operation,
    /// External name of the operation.
    pub name: &'static str,
    /// Upstream method identifier, set under `@method`.
    pub method: &'static str,
    /// Singular key the payload is wrapped under, when the upstream
    /// expects one.
    pub wrap_key: Option<&'static str>,
    /// Log label emitted before the call.
    pub request_label: &'static str,
    /// Log label emitted after the response.
    pub response_label: &'static str,
}

/// The full operation table. Row order matches the `Operation`
/// discriminant order; `Operation::entry` relies on it.
pub static CATALOG: [CatalogEntry; 16] = [
    CatalogEntry {
        operation: Operation::CreateClient,
        name: "createClient",
        method: "client.create",
        wrap_key: Some("client"),
        request_label: "Create client",
        response_label: "Client created",
    },
    CatalogEntry {
        operation: Operation::UpdateClient,
        name: "updateClient",
        method: "client.update",
        wrap_key: Some("client"),
        request_label: "Update client",
        response_label: "Client updated",
    },
    CatalogEntry {
        operation: Operation::RemoveClient,
        name: "removeClient",
        method: "client.delete",
        wrap_key: None,
        request_label: "Remove client",
        response_label: "Client removed",
    },
    CatalogEntry {
        operation: Operation::FindClientById,
        name: "findClientById",
        method: "client.get",
        wrap_key: None,
        request_label: "Find client by id",
        response_label: "Found client",
    },
    CatalogEntry {
        operation: Operation::FindClients,
        name: "findClients",
        method: "client.list",
        wrap_key: None,
        request_label: "Find clients",
        response_label: "Found clients",
    },
    CatalogEntry {
        operation: Operation::CreateInvoice,
        name: "createInvoice",
        method: "invoice.create",
        wrap_key: Some("invoice"),
        request_label: "Create invoice",
        response_label: "Invoice created",
    },
    CatalogEntry {
        operation: Operation::UpdateInvoice,
        name: "updateInvoice",
        method: "invoice.update",
        wrap_key: Some("invoice"),
        request_label: "Update invoice",
        response_label: "Invoice updated",
    },
    CatalogEntry {
        operation: Operation::RemoveInvoice,
        name: "removeInvoice",
        method: "invoice.delete",
        wrap_key: None,
        request_label: "Remove invoice",
        response_label: "Invoice removed",
    },
    CatalogEntry {
        operation: Operation::FindInvoiceById,
        name: "findInvoiceById",
        method: "invoice.get",
        wrap_key: None,
        request_label: "Find invoice by id",
        response_label: "Found invoice",
    },
    CatalogEntry {
        operation: Operation::FindInvoices,
        name: "findInvoices",
        method: "invoice.list",
        wrap_key: None,
        request_label: "Find invoices",
        response_label: "Found invoices",
    },
    CatalogEntry {
        operation: Operation::CreateRecurring,
        name: "createRecurring",
        method: "recurring.create",
        wrap_key: Some("recurring"),
        request_label: "Create recurring profile",
        response_label: "Recurring profile created",
    },
    CatalogEntry {
        operation: Operation::UpdateRecurring,
        name: "updateRecurring",
        method: "recurring.update",
        wrap_key: Some("recurring"),
        request_label: "Update recurring profile",
        response_label: "Recurring profile updated",
    },
    CatalogEntry {
        operation: Operation::RemoveRecurring,
        name: "removeRecurring",
        method: "recurring.delete",
        wrap_key: None,
        request_label: "Remove recurring profile",
        response_label: "Recurring profile removed",
    },
    CatalogEntry {
        operation: Operation::FindRecurringById,
        name: "findRecurringById",
        method: "recurring.get",
        wrap_key: None,
        request_label: "Find recurring profile by id",
        response_label: "Found recurring profile",
    },
    CatalogEntry {
        operation: Operation::FindRecurring,
        name: "findRecurring",
        method: "recurring.list",
        wrap_key: None,
        request_label: "Find recurring profiles",
        response_label: "Found recurring profiles",
    },
    CatalogEntry {
        operation: Operation::FindCurrencies,
        name: "findCurrencies",
        method: "currency.list",
        wrap_key: None,
        request_label: "Find currencies",
        response_label: "Found currencies",
    },
];

impl Operation {
    /// Catalog row for this operation.
    pub fn entry(self) -> &'static CatalogEntry {
        &CATALOG[self as usize]
    }

    /// Resolve an external operation name to its `Operation`.
    pub fn from_name(name: &str) -> Option<Operation> {
        CATALOG
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.operation)
    }
}

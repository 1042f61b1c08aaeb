//! Command Catalog
//!
//! The operations the server exposes, with their input schemas, drawn either from the
//! built-in endpoint table or from the configured endpoint map.

use crate::config::{EndpointMap, EndpointSpec, FieldMap};
use serde::Serialize;
use serde_json::{json, Value};

/// The closed set of operations this server knows how to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateTestProducts,
    CreateTestCustomers,
    ClearTestData,
}

impl Operation {
    /// Listing order.
    pub const ALL: [Operation; 3] = [
        Operation::CreateTestProducts,
        Operation::CreateTestCustomers,
        Operation::ClearTestData,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateTestProducts => "create_test_products",
            Operation::CreateTestCustomers => "create_test_customers",
            Operation::ClearTestData => "clear_test_data",
        }
    }

    /// Key of this operation in the `[endpoints]` map.
    pub fn endpoint_key(&self) -> &'static str {
        match self {
            Operation::CreateTestProducts => "products",
            Operation::CreateTestCustomers => "customers",
            Operation::ClearTestData => "reset",
        }
    }

    /// Key under which a successful batch entry carries its generated record.
    pub fn record_key(&self) -> Option<&'static str> {
        match self {
            Operation::CreateTestProducts => Some("product"),
            Operation::CreateTestCustomers => Some("customer"),
            Operation::ClearTestData => None,
        }
    }

    /// Whether this operation generates records in a `count` loop.
    pub fn is_generation(&self) -> bool {
        self.record_key().is_some()
    }

    pub fn from_name(name: &str) -> Option<Operation> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    pub fn from_endpoint_key(key: &str) -> Option<Operation> {
        Self::ALL.into_iter().find(|op| op.endpoint_key() == key)
    }

    fn description(&self) -> &'static str {
        match self {
            Operation::CreateTestProducts => {
                "Creates realistic test products by making POST requests to the /products API endpoint."
            }
            Operation::CreateTestCustomers => {
                "Creates realistic test customer profiles by making POST requests to the /customers API endpoint."
            }
            Operation::ClearTestData => {
                "**DANGER**: Deletes all data from the test database. Only use on a test environment!"
            }
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the catalog's operations and endpoints come from.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSource {
    /// All three operations over the fixed endpoint table
    BuiltIn,
    /// Only operations whose endpoint key is present in the map
    Configured(EndpointMap),
}

impl CatalogSource {
    pub fn is_builtin(&self) -> bool {
        matches!(self, CatalogSource::BuiltIn)
    }
}

/// One listed operation, in the MCP `tools/list` shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// An operation bound to the endpoint it posts to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOperation {
    pub operation: Operation,
    pub endpoint: EndpointSpec,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    source: CatalogSource,
}

impl Catalog {
    pub fn new(source: CatalogSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Operations available under the current source, in fixed order.
    pub fn list_operations(&self) -> Vec<OperationDescriptor> {
        self.available()
            .map(|operation| OperationDescriptor {
                name: operation.name().to_string(),
                description: operation.description().to_string(),
                input_schema: self.input_schema(operation),
            })
            .collect()
    }

    /// Look up an operation by name; `None` when unknown or not configured.
    pub fn resolve(&self, name: &str) -> Option<ResolvedOperation> {
        let operation = Operation::from_name(name)?;
        let endpoint = match &self.source {
            CatalogSource::BuiltIn => builtin_endpoint(operation),
            CatalogSource::Configured(endpoints) => {
                endpoints.get(operation.endpoint_key())?.clone()
            }
        };
        Some(ResolvedOperation {
            operation,
            endpoint,
        })
    }

    fn available(&self) -> impl Iterator<Item = Operation> + '_ {
        Operation::ALL.into_iter().filter(move |op| match &self.source {
            CatalogSource::BuiltIn => true,
            CatalogSource::Configured(endpoints) => endpoints.contains_key(op.endpoint_key()),
        })
    }

    fn input_schema(&self, operation: Operation) -> Value {
        match operation {
            Operation::CreateTestProducts if self.source.is_builtin() => json!({
                "type": "object",
                "properties": {
                    "count": {
                        "type": "number",
                        "description": "Number of test products to create."
                    },
                    "category": {
                        "type": "string",
                        "description": "Primary category for the products (e.g., 'electronics', 'clothing').",
                        "nullable": true
                    }
                },
                "required": ["count"]
            }),
            Operation::CreateTestProducts => count_schema("Number of test products to create."),
            Operation::CreateTestCustomers => {
                count_schema("Number of test customers to create.")
            }
            Operation::ClearTestData => json!({
                "type": "object",
                "properties": {
                    "confirm": {
                        "type": "boolean",
                        "description": "You must set this to true to confirm you want to delete all data."
                    }
                },
                "required": ["confirm"]
            }),
        }
    }
}

fn count_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "count": { "type": "number", "description": description }
        },
        "required": ["count"]
    })
}

/// Endpoint table used in built-in mode.
pub fn builtin_endpoint(operation: Operation) -> EndpointSpec {
    match operation {
        Operation::CreateTestProducts => EndpointSpec::new(
            "/products/products",
            [
                ("name", "catch_phrase"),
                ("description", "paragraph"),
                ("category", "word"),
                ("price", "price"),
                ("quantity", "int"),
            ]
            .into_iter()
            .collect(),
        ),
        Operation::CreateTestCustomers => EndpointSpec::new(
            "/customers",
            [
                ("firstName", "first_name"),
                ("lastName", "last_name"),
                ("email", "unique_email"),
                ("address", "address"),
                ("phoneNumber", "phone_number"),
            ]
            .into_iter()
            .collect(),
        ),
        Operation::ClearTestData => EndpointSpec::new("/admin/reset-test-db", FieldMap::new()),
    }
}

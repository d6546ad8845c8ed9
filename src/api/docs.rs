//! API documentation generated from the route table, so the served document
//! always matches what the router actually mounts.

use serde_json::{json, Map, Value};

use super::routes::{Access, Body, Endpoint};

pub const API_TITLE: &str = "E-Commerce Product Management API";
pub const API_DESCRIPTION: &str = "An API for managing products in an e-commerce application.";

/// `/products/:id` -> `/products/{id}`
pub fn openapi_path(path: &str) -> String {
    path.split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => format!("{{{}}}", name),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn path_params(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter_map(|segment| segment.strip_prefix(':'))
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{}", name) })
}

fn body_schema(body: Body) -> Value {
    match body {
        Body::Product => schema_ref("Product"),
        Body::ProductList => json!({ "type": "array", "items": schema_ref("Product") }),
        Body::ProductInput => schema_ref("ProductInput"),
        Body::AccessToken => json!({
            "type": "object",
            "properties": { "access_token": { "type": "string" } }
        }),
        Body::Message => json!({
            "type": "object",
            "properties": { "message": { "type": "string" } }
        }),
        Body::Health => json!({
            "type": "object",
            "properties": {
                "status": { "type": "string" },
                "database": { "type": "string" },
                "timestamp": { "type": "string", "format": "date-time" }
            }
        }),
        Body::Error => schema_ref("Error"),
    }
}

fn operation(endpoint: &Endpoint) -> Value {
    let mut parameters: Vec<Value> = path_params(endpoint.path)
        .map(|name| {
            json!({
                "name": name,
                "in": "path",
                "required": true,
                "schema": { "type": "integer" }
            })
        })
        .collect();

    parameters.extend(endpoint.query.iter().map(|param| {
        json!({
            "name": param.name,
            "in": "query",
            "required": false,
            "description": param.description,
            "schema": { "type": "integer", "default": param.default }
        })
    }));

    let mut responses = Map::new();
    for (status, body) in endpoint.responses {
        let response = json!({
            "description": status.canonical_reason().unwrap_or("Response"),
            "content": { "application/json": { "schema": body_schema(*body) } }
        });
        responses.insert(status.as_u16().to_string(), response);
    }

    let mut op = json!({
        "summary": endpoint.summary,
        "parameters": parameters,
        "responses": responses,
    });

    if let Some(body) = endpoint.request {
        op["requestBody"] = json!({
            "required": true,
            "content": { "application/json": { "schema": body_schema(body) } }
        });
    }

    if endpoint.access == Access::Token {
        op["security"] = json!([{ "bearerAuth": [] }]);
    }

    op
}

/// Build an OpenAPI 3 document describing every endpoint.
pub fn openapi(endpoints: &[Endpoint]) -> Value {
    let mut paths = Map::new();
    for endpoint in endpoints {
        let entry = paths
            .entry(openapi_path(endpoint.path))
            .or_insert_with(|| Value::Object(Map::new()));
        entry[endpoint.method.as_str().to_lowercase()] = operation(endpoint);
    }

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": API_TITLE,
            "description": API_DESCRIPTION,
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": paths,
        "components": {
            "securitySchemes": {
                "bearerAuth": { "type": "http", "scheme": "bearer", "bearerFormat": "JWT" }
            },
            "schemas": {
                "Product": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer", "description": "Product ID" },
                        "title": { "type": "string", "description": "Product title" },
                        "description": { "type": "string", "description": "Product description" },
                        "price": { "type": "number", "description": "Product price" }
                    },
                    "required": ["id", "title", "description", "price"]
                },
                "ProductInput": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string", "description": "Product title" },
                        "description": { "type": "string", "description": "Product description" },
                        "price": { "type": "number", "description": "Product price" }
                    },
                    "required": ["title", "description", "price"]
                },
                "Error": {
                    "type": "object",
                    "properties": { "error": { "type": "string" } }
                }
            }
        }
    })
}

/// Summary served at `/`.
pub fn service_index(endpoints: &[Endpoint]) -> Value {
    let mut routes: Vec<Value> = endpoints
        .iter()
        .map(|endpoint| {
            json!({
                "method": endpoint.method.as_str(),
                "path": openapi_path(endpoint.path),
                "summary": endpoint.summary,
                "auth": endpoint.access == Access::Token,
            })
        })
        .collect();
    routes.push(json!({
        "method": "GET",
        "path": "/docs",
        "summary": "OpenAPI document",
        "auth": false,
    }));

    json!({
        "name": API_TITLE,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": routes,
    })
}

use axum::{
    http::{Method, StatusCode},
    routing::{delete, get, post, put, MethodRouter},
};

use crate::handlers::{protected, public};
use crate::state::AppState;

/// Whether a route sits behind the bearer-token gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Token,
}

/// Body shapes referenced by the generated API document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body {
    Product,
    ProductList,
    ProductInput,
    AccessToken,
    Message,
    Health,
    Error,
}

#[derive(Debug, Clone, Copy)]
pub struct QueryParam {
    pub name: &'static str,
    pub description: &'static str,
    pub default: i64,
}

/// One routed operation: how it is served and how it is documented.
pub struct Endpoint {
    pub method: Method,
    /// Router path, with `:name` segments for path parameters.
    pub path: &'static str,
    pub summary: &'static str,
    pub access: Access,
    pub query: &'static [QueryParam],
    pub request: Option<Body>,
    pub responses: &'static [(StatusCode, Body)],
    pub handler: MethodRouter<AppState>,
}

const LIST_QUERY: &[QueryParam] = &[
    QueryParam {
        name: "limit",
        description: "Maximum number of products to return",
        default: protected::products::DEFAULT_LIMIT,
    },
    QueryParam {
        name: "skip",
        description: "Number of products to skip",
        default: protected::products::DEFAULT_SKIP,
    },
];

pub fn endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint {
            method: Method::GET,
            path: "/health",
            summary: "Service and database health",
            access: Access::Public,
            query: &[],
            request: None,
            responses: &[(StatusCode::OK, Body::Health), (StatusCode::SERVICE_UNAVAILABLE, Body::Health)],
            handler: get(public::health),
        },
        Endpoint {
            method: Method::POST,
            path: "/login",
            summary: "Issue a bearer access token",
            access: Access::Public,
            query: &[],
            request: None,
            responses: &[(StatusCode::OK, Body::AccessToken)],
            handler: post(public::login_post),
        },
        Endpoint {
            method: Method::GET,
            path: "/products",
            summary: "List products",
            access: Access::Token,
            query: LIST_QUERY,
            request: None,
            responses: &[(StatusCode::OK, Body::ProductList), (StatusCode::UNAUTHORIZED, Body::Error)],
            handler: get(protected::products::list),
        },
        Endpoint {
            method: Method::POST,
            path: "/products",
            summary: "Create a product",
            access: Access::Token,
            query: &[],
            request: Some(Body::ProductInput),
            responses: &[
                (StatusCode::CREATED, Body::Product),
                (StatusCode::BAD_REQUEST, Body::Error),
                (StatusCode::UNAUTHORIZED, Body::Error),
            ],
            handler: post(protected::products::create),
        },
        Endpoint {
            method: Method::GET,
            path: "/products/:id",
            summary: "Get a product by id",
            access: Access::Token,
            query: &[],
            request: None,
            responses: &[
                (StatusCode::OK, Body::Product),
                (StatusCode::NOT_FOUND, Body::Error),
                (StatusCode::UNAUTHORIZED, Body::Error),
            ],
            handler: get(protected::products::get),
        },
        Endpoint {
            method: Method::PUT,
            path: "/products/:id",
            summary: "Update the supplied fields of a product",
            access: Access::Token,
            query: &[],
            request: Some(Body::ProductInput),
            responses: &[
                (StatusCode::OK, Body::Product),
                (StatusCode::BAD_REQUEST, Body::Error),
                (StatusCode::NOT_FOUND, Body::Error),
                (StatusCode::UNAUTHORIZED, Body::Error),
            ],
            handler: put(protected::products::update),
        },
        Endpoint {
            method: Method::DELETE,
            path: "/products/:id",
            summary: "Delete a product",
            access: Access::Token,
            query: &[],
            request: None,
            responses: &[
                (StatusCode::OK, Body::Message),
                (StatusCode::NOT_FOUND, Body::Error),
                (StatusCode::UNAUTHORIZED, Body::Error),
            ],
            handler: delete(protected::products::delete),
        },
    ]
}

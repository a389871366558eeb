pub mod storefront;

use std::collections::BTreeMap;

use thiserror::Error;

pub use storefront::Storefront;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub form: BTreeMap<String, String>,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            form: BTreeMap::new(),
        }
    }

    pub fn post<K, V>(path: impl Into<String>, form: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            method: Method::Post,
            path: path.into(),
            form: form
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.form.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    /// Redirect target for 3xx responses.
    pub location: Option<String>,
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            location: None,
            body: body.into(),
        }
    }

    pub fn redirect(to: impl Into<String>) -> Self {
        Self {
            status: 302,
            location: Some(to.into()),
            body: String::new(),
        }
    }

    pub fn not_found(path: &str) -> Self {
        Self {
            status: 404,
            location: None,
            body: format!("<h1>Not Found</h1><p>{}</p>", crate::html::escape(path)),
        }
    }

    /// The redirect target, or an empty string when the response is not a redirect.
    pub fn url(&self) -> &str {
        self.location.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Reverse for '{0}' not found")]
    NoReverseMatch(String),
}

/// Named URL patterns of an application.
#[derive(Debug, Clone, Default)]
pub struct Routes {
    entries: Vec<(String, String)>,
}

impl Routes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.entries.push((name.into(), path.into()));
        self
    }

    /// Resolve a route name to its path.
    pub fn reverse(&self, name: &str) -> Result<String, ClientError> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, path)| path.clone())
            .ok_or_else(|| ClientError::NoReverseMatch(name.to_string()))
    }

    /// Resolve a path back to its route name.
    pub fn resolve(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, p)| p == path)
            .map(|(name, _)| name.as_str())
    }
}

/// Anything that can take a request and hand back a response.
pub trait Client {
    fn send(&self, request: Request) -> Result<Response, ClientError>;

    /// Resolve a route name to a path on the application behind this client.
    fn reverse(&self, name: &str) -> Result<String, ClientError>;

    fn get(&self, path: &str) -> Result<Response, ClientError> {
        self.send(Request::get(path))
    }

    fn post(&self, path: &str, form: &[(&str, &str)]) -> Result<Response, ClientError> {
        self.send(Request::post(path, form.iter().copied()))
    }
}

/// An application that can serve requests in-process.
pub trait Application {
    fn routes(&self) -> &Routes;

    fn handle(&self, request: &Request) -> Result<Response, ClientError>;
}

/// Client that dispatches straight into an in-process [`Application`].
pub struct TestClient<A> {
    app: A,
}

impl<A: Application> TestClient<A> {
    pub fn new(app: A) -> Self {
        Self { app }
    }
}

impl<A: Application> Client for TestClient<A> {
    fn send(&self, request: Request) -> Result<Response, ClientError> {
        let response = self.app.handle(&request)?;
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status = response.status,
            "in-process request"
        );
        Ok(response)
    }

    fn reverse(&self, name: &str) -> Result<String, ClientError> {
        self.app.routes().reverse(name)
    }
}

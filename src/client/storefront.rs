//! In-process storefront application used as the system under test.

use std::collections::BTreeMap;

use super::{Application, ClientError, Method, Request, Response, Routes};
use crate::html::escape;

pub struct Storefront {
    routes: Routes,
    accounts: BTreeMap<String, String>,
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new().with_account("user@test.com", "Test@123")
    }
}

impl Storefront {
    /// A storefront without any registered accounts.
    pub fn new() -> Self {
        Self {
            routes: Routes::new()
                .with("login", "/accounts/login/")
                .with("dashboard", "/dashboard/")
                .with("search", "/search/"),
            accounts: BTreeMap::new(),
        }
    }

    pub fn with_account(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.accounts.insert(email.into(), password.into());
        self
    }

    fn login(&self, request: &Request) -> Result<Response, ClientError> {
        let (Some(email), Some(password)) = (request.field("email"), request.field("password"))
        else {
            return Ok(Response::ok(login_page(Some("This field is required."))));
        };

        if self.accounts.get(email).is_some_and(|p| p == password) {
            Ok(Response::redirect(self.routes.reverse("dashboard")?))
        } else {
            Ok(Response::ok(login_page(Some("Invalid login credentials"))))
        }
    }

    fn search(&self, request: &Request) -> Response {
        let query = request.field("query").unwrap_or_default();
        Response::ok(format!(
            "<h1>Search</h1><p>Results for: {}</p><ul></ul>",
            escape(query)
        ))
    }
}

impl Application for Storefront {
    fn routes(&self) -> &Routes {
        &self.routes
    }

    fn handle(&self, request: &Request) -> Result<Response, ClientError> {
        match (request.method, self.routes.resolve(&request.path)) {
            (Method::Get, Some("login")) => Ok(Response::ok(login_page(None))),
            (Method::Post, Some("login")) => self.login(request),
            (Method::Get, Some("dashboard")) => Ok(Response::ok("<h1>Dashboard</h1>")),
            (_, Some("search")) => Ok(self.search(request)),
            _ => Ok(Response::not_found(&request.path)),
        }
    }
}

fn login_page(error: Option<&str>) -> String {
    let error = error
        .map(|e| format!("<p class=\"error\">{}</p>", escape(e)))
        .unwrap_or_default();
    format!(
        "<h1>Login</h1>{}<form method=\"post\"><input name=\"email\"><input name=\"password\" type=\"password\"></form>",
        error
    )
}

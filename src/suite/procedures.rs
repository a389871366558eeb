//! Functional checks against the storefront, one function per manual test case.

use crate::capture::Capture;
use crate::client::Client;
use crate::harness::{ProcedureError, text_field};
use crate::models::Payload;
use crate::{verify, verify_eq};

/// Valid credentials log in and redirect to the dashboard.
pub fn login_valid(
    client: &dyn Client,
    data: &Payload,
    out: &mut Capture,
) -> Result<(), ProcedureError> {
    let response = client.post(
        &client.reverse("login")?,
        &[
            ("email", text_field(data, "email")?),
            ("password", text_field(data, "password")?),
        ],
    )?;

    verify_eq!(response.status, 302);
    verify_eq!(response.url(), client.reverse("dashboard")?);
    out.line("Login successful, redirected to dashboard");
    Ok(())
}

/// A wrong password keeps the user on the login page with an error.
pub fn login_invalid(
    client: &dyn Client,
    data: &Payload,
    out: &mut Capture,
) -> Result<(), ProcedureError> {
    let response = client.post(
        &client.reverse("login")?,
        &[
            ("email", text_field(data, "email")?),
            ("password", text_field(data, "password")?),
        ],
    )?;

    verify!(response.body.contains("Invalid login credentials"));
    out.line("Proper error message displayed");
    Ok(())
}

/// Script tags submitted to search never come back unescaped.
pub fn xss_protection(
    client: &dyn Client,
    data: &Payload,
    out: &mut Capture,
) -> Result<(), ProcedureError> {
    let response = client.post(
        &client.reverse("search")?,
        &[("query", text_field(data, "input")?)],
    )?;

    verify!(!response.body.contains("<script>"));
    out.line("Input properly sanitized");
    Ok(())
}

//! HTML Form Handlers
//!
//! `POST /submit-form` receives the visitor form, records the visitor and
//! renders a confirmation page. Failures are reported as the raw error text.

use std::fmt::Write;
use std::sync::Arc;

use axum::{
    response::{Html, IntoResponse, Response},
    Extension, Form,
};

use crate::error::VisitorError;
use crate::model::NewVisitor;
use crate::rest::dto::VisitorForm;
use crate::rest::error::status_for;
use crate::rest::AppState;

pub async fn submit_form(
    Extension(state): Extension<Arc<AppState>>,
    Form(form): Form<VisitorForm>,
) -> Response {
    let visitor = match visitor_from_form(&form) {
        Ok(visitor) => visitor,
        Err(e) => return error_response(&e),
    };

    match state.service.add_visitor(&visitor).await {
        Ok(created) => {
            tracing::info!(id = created.id, "visitor_form_submitted");
            Html(render_thank_you(&form, created.id)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// The form posts age as text; anything that is not a whole number is an
/// invalid age.
pub fn visitor_from_form(form: &VisitorForm) -> Result<NewVisitor, VisitorError> {
    let visitor_age = form
        .visitor_age
        .trim()
        .parse::<i64>()
        .map_err(|_| VisitorError::InvalidAge)?;

    Ok(NewVisitor {
        full_name: form.visitor_name.clone(),
        visitor_age,
        date_of_visit: form.date_of_visit.clone(),
        time_of_visit: form.time_of_visit.clone(),
        assistant_name: form.assistant_name.clone(),
        comments: form.comments.clone(),
    })
}

fn error_response(err: &VisitorError) -> Response {
    if !err.is_client_error() {
        tracing::error!(error = %err, "visitor_form_failed");
    }
    (status_for(err), err.to_string()).into_response()
}

pub fn render_thank_you(form: &VisitorForm, id: i64) -> String {
    let fields = [
        ("Visitor ID", id.to_string()),
        ("Visitor name", form.visitor_name.clone()),
        ("Assistant name", form.assistant_name.clone()),
        ("Age", form.visitor_age.clone()),
        ("Date of visit", form.date_of_visit.clone()),
        ("Time of visit", form.time_of_visit.clone()),
        ("Comments", form.comments.clone()),
    ];

    let mut rows = String::new();
    for (label, value) in &fields {
        let _ = writeln!(
            rows,
            "      <tr><th>{label}</th><td>{}</td></tr>",
            escape_html(value)
        );
    }

    format!(
        "<!DOCTYPE html>
<html lang=\"en\">
<head>
  <meta charset=\"utf-8\">
  <title>Thank you</title>
</head>
<body>
  <h1>Thank you, {name}!</h1>
  <p>Your visit has been recorded.</p>
  <table>
{rows}  </table>
  <p><a href=\"/new_visitor\">Record another visitor</a></p>
</body>
</html>
",
        name = escape_html(&form.visitor_name),
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> VisitorForm {
        VisitorForm {
            visitor_name: "John Doe".to_string(),
            assistant_name: "Jane Smith".to_string(),
            visitor_age: "30".to_string(),
            date_of_visit: "2024-04-12".to_string(),
            time_of_visit: "10:30".to_string(),
            comments: "<script>alert(1)</script>".to_string(),
        }
    }

    #[test]
    fn test_visitor_from_form_parses_age() {
        let visitor = visitor_from_form(&form()).unwrap();
        assert_eq!(visitor.visitor_age, 30);
        assert_eq!(visitor.full_name, "John Doe");
    }

    #[test]
    fn test_visitor_from_form_rejects_non_numeric_age() {
        for age in ["", "thirty", "12.5"] {
            let f = VisitorForm {
                visitor_age: age.to_string(),
                ..form()
            };
            assert!(matches!(visitor_from_form(&f), Err(VisitorError::InvalidAge)));
        }
    }

    #[test]
    fn test_thank_you_escapes_fields() {
        let page = render_thank_you(&form(), 12);
        assert!(page.contains("<td>12</td>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!page.contains("<script>"));
    }
}

use crate::models::RewriteResult;

/// Render the landing page
///
/// Mirrors the CLI's human-readable report: regulation picker, resolved
/// regulation text, one card per changed policy, or an error banner when a
/// run failed.
pub fn render_index(
    regulation_ids: &[String],
    selected: Option<&str>,
    regulation_text: &str,
    mapped: &[RewriteResult],
    error: Option<&str>,
) -> String {
    let mut page = String::new();

    page.push_str("<!doctype html>\n<html>\n<head>\n");
    page.push_str("<meta charset=\"utf-8\">\n<title>Regulation Mapping</title>\n");
    page.push_str("<style>\n");
    page.push_str("body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; }\n");
    page.push_str(".error { color: #a00; border: 1px solid #a00; padding: 0.5rem; }\n");
    page.push_str(".policy { border: 1px solid #ccc; padding: 0.5rem 1rem; margin: 1rem 0; }\n");
    page.push_str(".current { color: #555; }\n");
    page.push_str("</style>\n</head>\n<body>\n");

    page.push_str("<h1>Regulation Mapping</h1>\n");

    // Regulation picker
    page.push_str("<form method=\"get\" action=\"/\">\n<select name=\"reg_id\">\n");
    page.push_str("<option value=\"\">-- select a regulation --</option>\n");
    for id in regulation_ids {
        let marker = if selected == Some(id.as_str()) {
            " selected"
        } else {
            ""
        };
        page.push_str(&format!(
            "<option value=\"{id}\"{marker}>{id}</option>\n",
            id = escape_html(id)
        ));
    }
    page.push_str("</select>\n<button type=\"submit\">Map policies</button>\n</form>\n");

    if let Some(message) = error {
        page.push_str(&format!(
            "<p class=\"error\">{}</p>\n",
            escape_html(message)
        ));
    }

    if let Some(reg_id) = selected {
        if regulation_text.is_empty() && error.is_none() {
            page.push_str(&format!(
                "<p>No regulation found for <strong>{}</strong>.</p>\n",
                escape_html(reg_id)
            ));
        } else if !regulation_text.is_empty() {
            page.push_str(&format!("<h2>{}</h2>\n", escape_html(reg_id)));
            page.push_str(&format!("<p>{}</p>\n", escape_html(regulation_text)));

            page.push_str(&format!(
                "<h2>Policies requiring changes ({})</h2>\n",
                mapped.len()
            ));
            if mapped.is_empty() {
                page.push_str("<p>All policies already comply.</p>\n");
            }
            for result in mapped {
                page.push_str("<div class=\"policy\">\n");
                page.push_str(&format!(
                    "<h3>{} ({})</h3>\n",
                    escape_html(&result.title),
                    escape_html(&result.id)
                ));
                page.push_str(&format!(
                    "<p class=\"current\"><strong>Current:</strong> {}</p>\n",
                    escape_html(&result.current)
                ));
                page.push_str(&format!(
                    "<p><strong>Proposed:</strong> {}</p>\n",
                    escape_html(&result.proposed)
                ));
                page.push_str("</div>\n");
            }
        }
    }

    page.push_str("</body>\n</html>\n");
    page
}

/// Minimal HTML escaping for text interpolated into the page
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

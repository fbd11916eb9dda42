//! Minimal HTML rendering for the resource pages.

use axum::response::Html;

/// Escapes text for embedding in HTML content or attribute values.
#[must_use]
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps page content in the shared document shell.
#[must_use]
pub fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <link rel=\"stylesheet\" href=\"/public/css/dashboard.css\">\n\
         </head>\n<body>\n{nav}\n<main>\n<h1>{title}</h1>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape(title),
        nav = nav(),
        body = body,
    ))
}

fn nav() -> &'static str {
    r#"<nav>
<a href="/">Profile</a>
<a href="/invites">Invites</a>
<a href="/clients">Clients</a>
<a href="/resourceservers">Resource servers</a>
<a href="/access">Access</a>
<a href="/publishings">Publishings</a>
<a href="/subscriptions">Subscriptions</a>
<a href="/consents">Consents</a>
<a href="/roles">Roles</a>
<a href="/shadows">Shadows</a>
<a href="/logout">Logout</a>
</nav>"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn page_contains_title_and_body() {
        let Html(html) = page("Clients", "<p>none yet</p>");
        assert!(html.contains("<title>Clients</title>"));
        assert!(html.contains("<p>none yet</p>"));
    }
}

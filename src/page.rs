//! HTML for the translation page.
//!
//! The provider's output is inserted as-is, markup included. Only the user's
//! own input is escaped, because it is echoed back inside a `<textarea>`.

use chrono::{Datelike, Utc};

use crate::form::Notice;

const PLACEHOLDER: &str = "Example: Translate to Urdu: I am learning Python programming.";

const STYLE: &str = r#"
    body { font-family: sans-serif; max-width: 720px; margin: 2em auto; padding: 0 1em; }
    .title { font-size: 2.5em; font-weight: bold; text-align: center; margin-bottom: 0.2em; }
    .subtitle { font-size: 1.1em; text-align: center; color: #888; margin-bottom: 2em; }
    .credit { color: #4caf50; }
    textarea { width: 100%; height: 150px; font-size: 1em; }
    .actions { text-align: center; margin: 1em 0; }
    .actions button { width: 50%; padding: 0.6em; font-size: 1em; }
    .notice { padding: 0.6em 1em; border-radius: 6px; margin: 1em 0; }
    .warning { background: #fff4ce; }
    .success { background: #dff6dd; }
    .failure { background: #fde7e9; }
    .result { padding: 15px; border-radius: 10px; font-size: 1.1em; }
    .footer { margin-top: 2em; text-align: center; font-size: 0.9em; color: #999; }
"#;

/// What the page shows for one session.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub session_id: String,
    pub input: String,
    pub notice: Option<Notice>,
    pub result: Option<String>,
}

/// Renders the whole page. `provider_name` is the human name of the backend,
/// e.g. "Gemini API".
pub fn render_page(
    app_title: &str,
    author: &str,
    provider_name: &str,
    view: &PageView,
) -> String {
    let notice = view.notice.as_ref().map(render_notice).unwrap_or_default();
    let result = view
        .result
        .as_deref()
        .map(|text| format!(r#"<div class="result">{}</div>"#, text))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="icon" href="data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>🌍</text></svg>">
<style>{style}</style>
</head>
<body>
<div class="title">🌐 {title}</div>
<div class="subtitle">Powered by {provider} | Created by <strong class="credit">{author}</strong></div>
<form method="post" action="/translate">
<h3>📝 Enter your text below</h3>
<input type="hidden" name="session_id" value="{session_id}">
<textarea name="text" placeholder="{placeholder}">{input}</textarea>
<div class="actions"><button type="submit">🌍 Translate</button></div>
</form>
{notice}
{result}
<div class="footer">&copy; {year} {author}. All rights reserved.</div>
</body>
</html>
"#,
        title = escape_html(app_title),
        style = STYLE,
        provider = escape_html(provider_name),
        author = escape_html(author),
        year = Utc::now().year(),
        session_id = escape_html(&view.session_id),
        placeholder = PLACEHOLDER,
        input = escape_html(&view.input),
        notice = notice,
        result = result,
    )
}

fn render_notice(notice: &Notice) -> String {
    let (class, icon, msg) = match notice {
        Notice::Warning(msg) => ("warning", "⚠️", msg),
        Notice::Success(msg) => ("success", "✅", msg),
        Notice::Failure(msg) => ("failure", "❌", msg),
    };
    format!(
        r#"<div class="notice {}">{} {}</div>"#,
        class,
        icon,
        escape_html(msg)
    )
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

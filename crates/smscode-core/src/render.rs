//! HTML page rendering for the codes listing.
//!
//! All message fields and the title are HTML-escaped before being written.

use std::fmt::Write;

use smscode_types::error::RenderError;
use smscode_types::message::Message;

/// Per-request values fed into the page.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub app_title: String,
    pub messages: Vec<Message>,
}

const PAGE_HEAD: &str = r##"<!doctype html>
<html lang="ru" dir="ltr">
<head>
	<meta charset="UTF-8">
	<meta name="viewport" content="width=device-width, user-scalable=no, initial-scale=1.0, maximum-scale=1.0, minimum-scale=1.0">
	<meta http-equiv="X-UA-Compatible" content="ie=edge">
	<meta name="theme-color" content="#4188c9">
	<meta name="apple-mobile-web-app-status-bar-style" content="black-translucent"/>
	<meta name="apple-mobile-web-app-capable" content="yes">
	<meta name="mobile-web-app-capable" content="yes">
	<meta name="HandheldFriendly" content="True">
	<meta name="MobileOptimized" content="320">
"##;

const PAGE_STYLE: &str = r#"<style>
	html {
		font-family: system-ui, -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
		font-size: 150%;
	}
	body {
		margin: 0 auto;
		max-width: 50em;
		line-height: 1.5;
		padding: 4em 1em;
	}
</style>
"#;

/// Render the full HTML document for `ctx`.
pub fn render_page(ctx: &RenderContext) -> Result<String, RenderError> {
    let mut out = String::with_capacity(2048 + ctx.messages.len() * 160);
    let title = escape_html(&ctx.app_title);

    out.push_str(PAGE_HEAD);
    writeln!(out, "\t<title>{title}</title>")?;
    out.push_str("</head>\n");
    out.push_str(PAGE_STYLE);
    out.push_str("<body>\n");
    for msg in &ctx.messages {
        write_message(&mut out, msg)?;
    }
    out.push_str("</body>\n</html>\n");

    Ok(out)
}

fn write_message(out: &mut String, msg: &Message) -> Result<(), RenderError> {
    writeln!(
        out,
        "\t<p>[{}] <b>{}:</b> {}</p>",
        msg.time_str(),
        escape_html(&msg.sender),
        escape_html(&msg.text)
    )?;
    Ok(())
}

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

//! Hero section markup.
//!
//! The star badge is only emitted for a known count. An unknown stat renders
//! the section without it; no placeholder text, no error.

use std::fmt::Write;

use stargaze_core::{format_compact, StatOutcome};

use crate::config::HeroContent;

pub fn render_hero(hero: &HeroContent, stars: StatOutcome, repo_url: &str) -> String {
    let mut out = String::with_capacity(1024);

    out.push_str("<section class=\"hero\">\n");
    let _ = writeln!(out, "  <h1>{}</h1>", escape_html(&hero.title));
    let _ = writeln!(out, "  <p class=\"hero-subtitle\">{}</p>", escape_html(&hero.subtitle));

    out.push_str("  <div class=\"hero-actions\">\n");
    let _ = writeln!(
        out,
        "    <a class=\"cta\" href=\"{}\">{}</a>",
        escape_html(&hero.cta_href),
        escape_html(&hero.cta_label)
    );
    if let StatOutcome::Known(n) = stars {
        let _ = writeln!(
            out,
            "    <a class=\"stars\" href=\"{}\" target=\"_blank\" rel=\"noreferrer\">Star on GitHub <span>{}</span></a>",
            escape_html(repo_url),
            format_compact(n, 1)
        );
    }
    out.push_str("  </div>\n");

    let _ = writeln!(out, "  <p class=\"hero-note\">{}</p>", escape_html(&hero.note));
    out.push_str("</section>\n");
    out
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

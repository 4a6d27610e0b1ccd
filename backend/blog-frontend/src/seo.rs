//! robots.txt and sitemap.xml generation
//!
//! Both documents are rebuilt on every request from configuration and the
//! current blog list; caching is left to the HTTP cache headers.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write;

use crate::models::Blog;

pub const ROBOTS_CACHE_CONTROL: &str = "public, max-age=86400, s-maxage=86400";
pub const SITEMAP_CACHE_CONTROL: &str = "public, max-age=3600, s-maxage=3600";

/// Paths crawlers should stay out of: authentication and mutation pages.
const DISALLOWED: &[&str] = &["/login", "/register", "/create", "/api/"];

pub fn robots_txt(site_url: &str) -> String {
    let mut out = String::from("User-agent: *\nAllow: /\n");
    for path in DISALLOWED {
        let _ = writeln!(out, "Disallow: {path}");
    }
    let _ = write!(out, "\nSitemap: {}/sitemap.xml\n", site_url.trim_end_matches('/'));
    out
}

pub fn sitemap_xml(site_url: &str, blogs: &[Blog], now: DateTime<Utc>) -> String {
    let site = xml_escape(site_url.trim_end_matches('/'));
    let now = now.to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    push_url(&mut out, &site, &now, "daily", "1.0");

    for blog in blogs {
        let lastmod = match blog.last_modified() {
            "" => now.clone(),
            ts => xml_escape(ts),
        };
        push_url(&mut out, &format!("{site}/blog/{}", blog.id), &lastmod, "weekly", "0.8");
    }

    out.push_str("</urlset>");
    out
}

fn push_url(out: &mut String, loc: &str, lastmod: &str, changefreq: &str, priority: &str) {
    let _ = write!(
        out,
        "  <url>\n    <loc>{loc}</loc>\n    <lastmod>{lastmod}</lastmod>\n    \
         <changefreq>{changefreq}</changefreq>\n    <priority>{priority}</priority>\n  </url>\n"
    );
}

fn xml_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

//! Quiz prompts and options arrive as markdown or pre-rendered HTML with
//! code samples. Everything shown to the learner goes through the sanitizer.

use std::collections::{HashMap, HashSet};

#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "em", "strong", "b", "i", "code", "pre", "blockquote", "ul",
        "ol", "li", "a", "table", "thead", "tbody", "tr", "th", "td", "del",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());
    // language-* classes drive code highlighting
    attributes.insert("code", ["class"].into_iter().collect());
    attributes.insert("pre", ["class"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}

/// Pre-rendered content always opens with a block or inline tag; markdown that
/// merely mentions a tag inside backticks does not.
#[must_use]
pub fn looks_like_html(input: &str) -> bool {
    let lower = input.trim_start().to_ascii_lowercase();
    if !lower.starts_with('<') || !lower.contains('>') {
        return false;
    }

    let tags = ["<p", "<div", "<span", "<br", "<code", "<pre", "<a ", "<ul", "<ol"];
    tags.iter().any(|tag| lower.starts_with(tag))
}

/// Safe HTML for a prompt or option, whichever form the content uses.
#[must_use]
pub fn quiz_text_to_html(input: &str) -> String {
    if looks_like_html(input) {
        sanitize_html(input)
    } else {
        markdown_to_html(input)
    }
}

/// Plain rendering for text-only hosts.
#[must_use]
pub fn quiz_text_to_plain(input: &str) -> String {
    let text = strip_html_tags(&quiz_text_to_html(input));
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[must_use]
pub fn strip_html_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    let mut tag_buf = String::new();

    for ch in input.chars() {
        if in_tag {
            if ch == '>' {
                in_tag = false;
                let tag = tag_buf.trim().to_ascii_lowercase();
                if tag.starts_with("br") || tag.starts_with("/p") || tag.starts_with("/li")
                    || tag.starts_with("/pre")
                {
                    out.push('\n');
                }
                tag_buf.clear();
            } else {
                tag_buf.push(ch);
            }
            continue;
        }

        if ch == '<' {
            in_tag = true;
            tag_buf.clear();
            continue;
        }

        out.push(ch);
    }

    out.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

//! Tree-art renderers for document maps.

use docmap_document::{Document, Section};

use crate::{Highlighter, Palette};

/// Minimum inner width of the header box.
const MIN_BOX_WIDTH: usize = 60;

/// Maximum rendered length of the joined key-terms line.
const MAX_TERMS_LEN: usize = 55;

/// Maximum rendered length of a section title in multi-document views.
const MAX_MULTI_TITLE_LEN: usize = 40;

/// Maximum content lines shown by [`expand_section`] before truncation.
const MAX_EXPAND_LINES: usize = 50;

/// Renders the full tree view of a single document.
pub fn document_map(doc: &Document, palette: &Palette) -> String {
    let info = format!(
        "Sections: {} | ~{} tokens",
        doc.get_all_sections().len(),
        format_tokens(doc.total_tokens)
    );
    let mut out = header_box(&doc.filename, &info, palette);
    out.push('\n');
    render_sections(&doc.sections, "", false, palette, &mut out);
    out
}

/// Renders the tree rooted at the first section matching `filter`,
/// or a not-found message.
pub fn filtered_tree(doc: &Document, filter: &str, palette: &Palette) -> String {
    let Some(section) = doc.get_section(filter) else {
        return format!("Section '{filter}' not found\n");
    };
    let mut out = format!(
        "{}╭── {}{}{} {}({} tokens){}\n",
        palette.dim,
        palette.bold,
        section.title,
        palette.reset,
        palette.dim,
        format_tokens(section.tokens),
        palette.reset,
    );
    render_sections(&section.children, "", true, palette, &mut out);
    out
}

/// Renders the full content of the first section matching `name`.
///
/// Content is capped at [`MAX_EXPAND_LINES`] lines; when a highlighter is
/// provided the (truncated) content is syntax highlighted as markdown.
pub fn expand_section(
    doc: &Document,
    name: &str,
    palette: &Palette,
    highlighter: Option<&Highlighter>,
) -> String {
    let Some(section) = doc.get_section(name) else {
        return format!("Section '{name}' not found\n");
    };
    let mut out = format!(
        "{}{}{}{} {}({} tokens){}\n{}{}{}\n",
        palette.bold,
        palette.cyan,
        section.title,
        palette.reset,
        palette.dim,
        format_tokens(section.tokens),
        palette.reset,
        palette.dim,
        "─".repeat(50),
        palette.reset,
    );

    let lines: Vec<&str> = section.content.lines().collect();
    let shown = lines.len().min(MAX_EXPAND_LINES);
    let body = lines[..shown].join("\n");
    match highlighter {
        Some(hl) => out.push_str(&hl.highlight_markdown(&body)),
        None => out.push_str(&body),
    }
    out.push('\n');
    if lines.len() > shown {
        out.push_str(&format!(
            "{}... ({} more lines){}\n",
            palette.dim,
            lines.len() - shown,
            palette.reset,
        ));
    }
    out
}

/// Renders the directory overview for a set of documents.
///
/// Each document shows its top root sections (levels 1 and 2, at most
/// five) with token counts.
pub fn multi_tree(docs: &[Document], dir_name: &str, palette: &Palette) -> String {
    let total_sections: usize = docs.iter().map(|d| d.get_all_sections().len()).sum();
    let total_tokens: usize = docs.iter().map(|d| d.total_tokens).sum();
    let info = format!(
        "{} files | {} sections | ~{} tokens",
        docs.len(),
        total_sections,
        format_tokens(total_tokens)
    );
    let title = format!("{}/", dir_name.trim_end_matches('/'));
    let mut out = header_box(&title, &info, palette);
    out.push('\n');

    for (i, doc) in docs.iter().enumerate() {
        let connector = if i == docs.len() - 1 {
            "└── "
        } else {
            "├── "
        };
        let child_prefix = if i == docs.len() - 1 { "    " } else { "│   " };
        out.push_str(&format!(
            "{}{}{}{}{}{}{} {}(~{} tokens){}\n",
            palette.dim,
            connector,
            palette.reset,
            palette.green,
            palette.bold,
            doc.filename,
            palette.reset,
            palette.dim,
            format_tokens(doc.total_tokens),
            palette.reset,
        ));

        let roots: Vec<&Section> = doc
            .sections
            .iter()
            .filter(|s| s.level <= 2)
            .take(5)
            .collect();
        for (j, section) in roots.iter().enumerate() {
            let sub = if j == roots.len() - 1 {
                "└── "
            } else {
                "├── "
            };
            out.push_str(&format!(
                "{}{}{}{}{} {}({}){}\n",
                palette.dim,
                child_prefix,
                sub,
                palette.reset,
                truncate(&section.title, MAX_MULTI_TITLE_LEN),
                palette.dim,
                format_tokens(section.tokens),
                palette.reset,
            ));
        }
    }
    out
}

/// Renders the cross-reference view for a set of documents.
///
/// Lists each document's outgoing references, then the hub targets that
/// at least two distinct documents point at.
pub fn refs_tree(docs: &[Document], palette: &Palette) -> String {
    let with_refs: Vec<&Document> = docs.iter().filter(|d| !d.references.is_empty()).collect();
    if with_refs.is_empty() {
        return "No cross-references found.\n".to_string();
    }

    let mut out = format!("{}Cross-references{}\n\n", palette.bold, palette.reset);
    for doc in &with_refs {
        out.push_str(&format!(
            "{}{}{}{}\n",
            palette.green, palette.bold, doc.filename, palette.reset,
        ));
        for (i, reference) in doc.references.iter().enumerate() {
            let connector = if i == doc.references.len() - 1 {
                "└── "
            } else {
                "├── "
            };
            out.push_str(&format!(
                "{}{}{}{} {}→ {} (line {}){}\n",
                palette.dim,
                connector,
                palette.reset,
                reference.text,
                palette.dim,
                reference.target,
                reference.line,
                palette.reset,
            ));
        }
    }

    // Targets referenced from two or more documents are hubs.
    let mut counts: Vec<(String, usize)> = Vec::new();
    for doc in &with_refs {
        let mut seen: Vec<&str> = Vec::new();
        for reference in &doc.references {
            if seen.contains(&reference.target.as_str()) {
                continue;
            }
            seen.push(&reference.target);
            match counts.iter_mut().find(|(t, _)| t == &reference.target) {
                Some((_, n)) => *n += 1,
                None => counts.push((reference.target.clone(), 1)),
            }
        }
    }
    let mut hubs: Vec<(String, usize)> = counts.into_iter().filter(|(_, n)| *n >= 2).collect();
    hubs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    if !hubs.is_empty() {
        out.push_str(&format!(
            "\n{}Most referenced{}\n",
            palette.bold, palette.reset
        ));
        for (target, n) in &hubs {
            out.push_str(&format!(
                "{}  {} {}← {} documents{}\n",
                palette.yellow, target, palette.dim, n, palette.reset,
            ));
        }
    }
    out
}

/// Renders the boxed header shared by single- and multi-document views.
fn header_box(title: &str, info: &str, palette: &Palette) -> String {
    let inner = (info.chars().count() + 4).max(MIN_BOX_WIDTH);
    let titled = format!(" {title} ");
    let mut out = String::new();
    out.push_str(&format!(
        "{}╭{}╮{}\n",
        palette.dim,
        center_text(&titled, inner, '─'),
        palette.reset,
    ));
    out.push_str(&format!(
        "{}│{}{}{}│{}\n",
        palette.dim,
        palette.reset,
        center_text(info, inner, ' '),
        palette.dim,
        palette.reset,
    ));
    out.push_str(&format!(
        "{}╰{}╯{}\n",
        palette.dim,
        "─".repeat(inner),
        palette.reset,
    ));
    out
}

/// Renders a slice of sibling sections with tree connectors.
fn render_sections(
    sections: &[Section],
    prefix: &str,
    filtered: bool,
    palette: &Palette,
    out: &mut String,
) {
    for (i, section) in sections.iter().enumerate() {
        let last = i == sections.len() - 1;
        let connector = if last { "└── " } else { "├── " };
        let (color, bold) = title_style(section.level, palette);
        out.push_str(&format!(
            "{}{}{}{}{}{}{}{} {}({}){}\n",
            palette.dim,
            prefix,
            connector,
            palette.reset,
            bold,
            color,
            section.title,
            palette.reset,
            palette.dim,
            format_tokens(section.tokens),
            palette.reset,
        ));

        let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });

        if !section.key_terms.is_empty() && (section.level <= 2 || filtered) {
            let joined = truncate(&section.key_terms.join(", "), MAX_TERMS_LEN);
            out.push_str(&format!(
                "{}{}└─ {}{}\n",
                palette.dim, child_prefix, joined, palette.reset,
            ));
        }

        render_sections(&section.children, &child_prefix, filtered, palette, out);
    }
}

/// Picks the title color and weight for a heading level.
fn title_style(level: u8, palette: &Palette) -> (&'static str, &'static str) {
    match level {
        1 => (palette.cyan, palette.bold),
        2 => (palette.blue, palette.bold),
        3 => (palette.yellow, ""),
        _ => ("", ""),
    }
}

/// Formats a token count, abbreviating thousands as "1.5k".
fn format_tokens(tokens: usize) -> String {
    if tokens >= 1000 {
        format!("{:.1}k", tokens as f64 / 1000.0)
    } else {
        tokens.to_string()
    }
}

/// Truncates `text` to at most `max` characters, ending with "...".
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}

/// Centers `text` within `width` columns, padding with `filler`.
fn center_text(text: &str, width: usize, filler: char) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let pad = width - len;
    let left = pad / 2;
    let right = pad - left;
    format!(
        "{}{}{}",
        filler.to_string().repeat(left),
        text,
        filler.to_string().repeat(right)
    )
}

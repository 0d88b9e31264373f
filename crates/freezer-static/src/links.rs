//! Link rewriting for the two output layouts.
//!
//! Rewriting is plain ordered string substitution over rendered markup. There
//! is no HTML parsing: attributes written with extra whitespace or unusual
//! quoting (`href = "..."`, unquoted values) pass through untouched.

/// Where a rendered page is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Directly under the output directory.
    Root,
    /// One level down, under `templates/`.
    Preview,
}

/// A literal substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub pattern: String,
    pub replacement: String,
}

impl Rule {
    fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Ordered rewrite rules for each layout.
#[derive(Debug, Clone)]
pub struct LinkRewriter {
    root: Vec<Rule>,
    preview: Vec<Rule>,
}

const QUOTES: [char; 2] = ['"', '\''];

impl LinkRewriter {
    /// Rules for pages nested under `preview_dir` with assets in `asset_dir`.
    pub fn new(preview_dir: &str, asset_dir: &str) -> Self {
        let preview_dir = preview_dir.trim_matches('/');
        let asset_dir = asset_dir.trim_matches('/');

        let mut root = Vec::new();
        let mut preview = Vec::new();

        for q in QUOTES {
            for prefix in [format!("/{preview_dir}/"), format!("{preview_dir}/")] {
                root.push(Rule::new(format!("href={q}{prefix}"), format!("href={q}")));
            }
        }

        // Assets first, so the later same-directory rules never see them.
        for q in QUOTES {
            for attr in ["href", "src"] {
                preview.push(Rule::new(
                    format!("{attr}={q}/{asset_dir}/"),
                    format!("{attr}={q}../{asset_dir}/"),
                ));
                preview.push(Rule::new(
                    format!("{attr}={q}{asset_dir}/"),
                    format!("{attr}={q}../{asset_dir}/"),
                ));
            }
        }
        for q in QUOTES {
            for prefix in [format!("/{preview_dir}/"), format!("{preview_dir}/")] {
                preview.push(Rule::new(format!("href={q}{prefix}"), format!("href={q}")));
            }
        }
        for q in QUOTES {
            for target in ["/index.html", "/"] {
                preview.push(Rule::new(
                    format!("href={q}{target}{q}"),
                    format!("href={q}../index.html{q}"),
                ));
            }
        }

        Self { root, preview }
    }

    /// Rules applied for `layout`, in order.
    pub fn rules(&self, layout: Layout) -> &[Rule] {
        match layout {
            Layout::Root => &self.root,
            Layout::Preview => &self.preview,
        }
    }

    /// Rewrite rendered HTML for `layout`.
    pub fn rewrite(&self, html: &str, layout: Layout) -> String {
        let mut out = html.to_string();
        for rule in self.rules(layout) {
            if out.contains(&rule.pattern) {
                tracing::debug!("{:?}: {} -> {}", layout, rule.pattern, rule.replacement);
                out = out.replace(&rule.pattern, &rule.replacement);
            }
        }
        out
    }
}

impl Default for LinkRewriter {
    fn default() -> Self {
        Self::new("templates", "static")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn root_drops_templates_prefix() {
        let rw = LinkRewriter::default();
        let html = r#"<a href="/templates/login.html">a</a><a href='templates/register.html'>b</a>"#;

        assert_eq!(
            rw.rewrite(html, Layout::Root),
            r#"<a href="login.html">a</a><a href='register.html'>b</a>"#
        );
    }

    #[test]
    fn root_leaves_assets_alone() {
        let rw = LinkRewriter::default();
        let html = r#"<link href="/static/site.css"><script src="static/site.js"></script>"#;

        assert_eq!(rw.rewrite(html, Layout::Root), html);
    }

    #[test]
    fn preview_moves_assets_up_a_level() {
        let rw = LinkRewriter::default();
        let html = concat!(
            r#"<link href="/static/site.css">"#,
            r#"<script src='/static/site.js'></script>"#,
            r#"<img src="static/logo.png">"#,
        );

        let out = rw.rewrite(html, Layout::Preview);

        assert_eq!(
            out,
            concat!(
                r#"<link href="../static/site.css">"#,
                r#"<script src='../static/site.js'></script>"#,
                r#"<img src="../static/logo.png">"#,
            )
        );
        assert!(!out.contains(r#""/static/"#));
        assert!(!out.contains("'/static/"));
    }

    #[test]
    fn preview_makes_template_links_local() {
        let rw = LinkRewriter::default();
        let html = r#"<a href="/templates/pointshop.html">x</a><a href='templates/login.html'>y</a>"#;

        assert_eq!(
            rw.rewrite(html, Layout::Preview),
            r#"<a href="pointshop.html">x</a><a href='login.html'>y</a>"#
        );
    }

    #[test]
    fn preview_points_root_index_up() {
        let rw = LinkRewriter::default();
        let html = r#"<a href="/index.html">home</a><a href='/'>logo</a>"#;

        assert_eq!(
            rw.rewrite(html, Layout::Preview),
            r#"<a href="../index.html">home</a><a href='../index.html'>logo</a>"#
        );
    }

    #[test]
    fn preview_keeps_relative_page_links() {
        let rw = LinkRewriter::default();
        let html = r#"<a href="index.html">home</a><a href="login.html">in</a>"#;

        assert_eq!(rw.rewrite(html, Layout::Preview), html);
    }

    #[test]
    fn unusual_formatting_is_not_rewritten() {
        let rw = LinkRewriter::default();
        let html = r#"<a href = "/templates/login.html">x</a><img src=/static/a.png>"#;

        assert_eq!(rw.rewrite(html, Layout::Root), html);
        assert_eq!(rw.rewrite(html, Layout::Preview), html);
    }

    #[test]
    fn preview_rewrite_is_stable() {
        let rw = LinkRewriter::default();
        let once = rw.rewrite(r#"<img src="/static/a.png"><a href="/">h</a>"#, Layout::Preview);

        assert_eq!(rw.rewrite(&once, Layout::Preview), once);
    }
}

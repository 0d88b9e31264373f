//! Route table and page list.

use std::path::Path;

/// Logical endpoint names mapped to output filenames.
pub const DEFAULT_ROUTES: &[(&str, &str)] = &[
    ("home", "index.html"),
    ("todaystasks", "todaystasks.html"),
    ("leaderboards", "leaderboards.html"),
    ("pointshop", "pointshop.html"),
    ("login", "login.html"),
    ("register", "register.html"),
    ("profile_settings", "profile_settings.html"),
    ("logout", "index.html"),
];

/// Templates rendered into standalone pages, in build order.
pub const DEFAULT_PAGES: &[&str] = &[
    "home.html",
    "todaystasks.html",
    "leaderboards.html",
    "pointshop.html",
    "login.html",
    "register.html",
    "profile_settings.html",
];

/// Endpoint whose filename the root redirect points at.
pub const HOME_ENDPOINT: &str = "home";

/// Ordered endpoint-to-filename mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<(String, String)>,
}

impl RouteTable {
    /// Build a table from `(endpoint, filename)` pairs. Earlier pairs win on duplicates.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Filename mapped to `endpoint`, if any.
    pub fn lookup(&self, endpoint: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == endpoint)
            .map(|(_, v)| v.as_str())
    }

    /// Output filename for a template.
    ///
    /// The template's stem is looked up as an endpoint (`home.html` -> `home`);
    /// unmapped templates keep their own filename.
    pub fn output_name(&self, template: &str) -> String {
        let stem = Path::new(template)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(template);

        self.lookup(stem)
            .map(str::to_string)
            .unwrap_or_else(|| template.to_string())
    }

    /// Filename of the home page.
    pub fn home(&self) -> &str {
        self.lookup(HOME_ENDPOINT).unwrap_or("index.html")
    }

    /// Iterate pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(DEFAULT_ROUTES.iter().copied())
    }
}

/// The default page list as owned strings.
pub fn default_pages() -> Vec<String> {
    DEFAULT_PAGES.iter().map(|p| p.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_known_endpoints() {
        let routes = RouteTable::default();

        assert_eq!(routes.lookup("home"), Some("index.html"));
        assert_eq!(routes.lookup("logout"), Some("index.html"));
        assert_eq!(routes.lookup("pointshop"), Some("pointshop.html"));
        assert_eq!(routes.lookup("admin"), None);
    }

    #[test]
    fn maps_template_to_output_name() {
        let routes = RouteTable::default();

        assert_eq!(routes.output_name("home.html"), "index.html");
        assert_eq!(routes.output_name("login.html"), "login.html");
        assert_eq!(routes.output_name("about.html"), "about.html");
    }

    #[test]
    fn home_falls_back_to_index() {
        let routes = RouteTable::new([("login", "signin.html")]);

        assert_eq!(routes.home(), "index.html");
        assert_eq!(RouteTable::new([("home", "start.html")]).home(), "start.html");
    }

    #[test]
    fn keeps_declaration_order() {
        let routes = RouteTable::default();
        let keys: Vec<&str> = routes.iter().map(|(k, _)| k).collect();

        assert_eq!(keys.first(), Some(&"home"));
        assert_eq!(keys.last(), Some(&"logout"));
        assert_eq!(keys.len(), DEFAULT_ROUTES.len());
    }
}

//! Stand-ins for the web framework's request globals.
//!
//! Templates written for a live app call `url_for`, read `session`, `g` and
//! `user`, and ask for flashed messages. None of that exists offline, so a
//! [`MockContext`] supplies fixed placeholder values that every page shares.

use minijinja::value::{Kwargs, Value};
use minijinja::Environment;
use serde::Serialize;

use crate::routes::RouteTable;

/// Endpoint name that resolves to an asset path instead of a page.
pub const ASSET_ENDPOINT: &str = "static";

/// Placeholder for the URL returned for unknown endpoints.
pub const UNKNOWN_URL: &str = "#";

/// Session state of a logged-out visitor.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Session {
    pub logged_in: bool,
}

/// Per-request scratch space with no authenticated user.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RequestGlobals {
    pub user: Option<User>,
}

/// A user record with every field blank.
#[derive(Debug, Clone, Default, Serialize)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub account_name: String,
    pub username: String,
}

/// Fixed placeholder data injected once per build.
#[derive(Debug, Clone)]
pub struct MockContext {
    routes: RouteTable,
    asset_dir: String,
    session: Session,
    g: RequestGlobals,
    user: User,
}

impl MockContext {
    /// Create a context resolving endpoints through `routes` and assets under `asset_dir`.
    pub fn new(routes: RouteTable, asset_dir: impl Into<String>) -> Self {
        Self {
            routes,
            asset_dir: asset_dir.into(),
            session: Session::default(),
            g: RequestGlobals::default(),
            user: User::default(),
        }
    }

    /// Resolve an endpoint the way `url_for` does in templates.
    pub fn url_for(&self, endpoint: &str, filename: Option<&str>) -> String {
        if endpoint == ASSET_ENDPOINT {
            let filename = filename.unwrap_or("");
            return format!("{}/{}", self.asset_dir.trim_end_matches('/'), filename);
        }

        self.routes
            .lookup(endpoint)
            .unwrap_or(UNKNOWN_URL)
            .to_string()
    }

    /// Install the mock globals into a template environment.
    pub fn register(&self, env: &mut Environment<'_>) {
        let resolver = self.clone();
        env.add_function(
            "url_for",
            move |endpoint: String, kwargs: Kwargs| -> Result<Value, minijinja::Error> {
                let filename: Option<String> = kwargs.get("filename")?;
                // Route parameters like `user_id=` mean nothing for static output.
                let extra: Vec<String> = kwargs
                    .args()
                    .filter(|k| *k != "filename")
                    .map(str::to_string)
                    .collect();
                for key in &extra {
                    let _: Value = kwargs.get(key.as_str())?;
                }
                // Paths are ours, and HTML escaping would turn `/` into `&#x2f;`.
                Ok(Value::from_safe_string(
                    resolver.url_for(&endpoint, filename.as_deref()),
                ))
            },
        );

        env.add_function(
            "get_flashed_messages",
            |kwargs: Kwargs| -> Result<Vec<Value>, minijinja::Error> {
                let keys: Vec<String> = kwargs.args().map(str::to_string).collect();
                for key in &keys {
                    let _: Value = kwargs.get(key.as_str())?;
                }
                Ok(Vec::new())
            },
        );

        env.add_global("session", Value::from_serialize(&self.session));
        env.add_global("g", Value::from_serialize(&self.g));
        env.add_global("user", Value::from_serialize(&self.user));
    }
}

impl Default for MockContext {
    fn default() -> Self {
        Self::new(RouteTable::default(), ASSET_ENDPOINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(source: &str) -> String {
        let mut env = Environment::new();
        MockContext::default().register(&mut env);
        env.render_str(source, ()).unwrap()
    }

    #[test]
    fn resolves_asset_paths() {
        let ctx = MockContext::default();

        assert_eq!(ctx.url_for("static", Some("x")), "static/x");
        assert_eq!(ctx.url_for("static", Some("css/site.css")), "static/css/site.css");
        assert_eq!(ctx.url_for("static", None), "static/");
    }

    #[test]
    fn resolves_routes_and_unknowns() {
        let ctx = MockContext::default();

        assert_eq!(ctx.url_for("home", None), "index.html");
        assert_eq!(ctx.url_for("leaderboards", None), "leaderboards.html");
        assert_eq!(ctx.url_for("no_such_page", None), "#");
    }

    #[test]
    fn uses_custom_asset_dir() {
        let ctx = MockContext::new(RouteTable::default(), "assets/");

        assert_eq!(ctx.url_for("static", Some("app.js")), "assets/app.js");
    }

    #[test]
    fn url_for_in_templates() {
        assert_eq!(
            render("{{ url_for('static', filename='site.js') }}|{{ url_for('login') }}"),
            "static/site.js|login.html"
        );
        assert_eq!(render("{{ url_for('profile', user_id=3) }}"), "#");
    }

    #[test]
    fn flashed_messages_are_empty() {
        assert_eq!(
            render("{% for m in get_flashed_messages() %}{{ m }}{% else %}none{% endfor %}"),
            "none"
        );
        assert_eq!(
            render("{{ get_flashed_messages(with_categories=true) | length }}"),
            "0"
        );
    }

    #[test]
    fn placeholders_look_logged_out() {
        assert_eq!(
            render("{% if session.logged_in %}in{% else %}out{% endif %}"),
            "out"
        );
        assert_eq!(render("{% if g.user %}user{% else %}anon{% endif %}"), "anon");
        assert_eq!(render("[{{ user.first_name }}{{ user.username }}]"), "[]");
    }
}

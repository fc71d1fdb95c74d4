use log::{debug, error};
use stride_domain::{TokenRepository, User};
use strum::IntoEnumIterator;
use web_sys::Document;

use crate::Config;

const SIDEBAR_NAV_ID: &str = "sidebar-nav";
const SIDEBAR_USER_ID: &str = "sidebar-user";

pub trait Navigator {
    fn current_path(&self) -> String;
    fn navigate(&self, path: &str);
}

/// Navigates by assigning `window.location`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|window| window.location().pathname().ok())
            .unwrap_or_default()
    }

    fn navigate(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            error!("failed to get window to navigate to {path}");
            return;
        };
        if let Err(err) = window.location().set_href(path) {
            error!("failed to navigate to {path}: {err:?}");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
pub enum NavItem {
    Dashboard,
    Workouts,
    Programs,
    Progress,
    Profile,
    Subscription,
}

impl NavItem {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            NavItem::Dashboard => "Dashboard",
            NavItem::Workouts => "Workouts",
            NavItem::Programs => "Programs",
            NavItem::Progress => "Progress",
            NavItem::Profile => "Profile",
            NavItem::Subscription => "Subscription",
        }
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            NavItem::Dashboard => "/dashboard",
            NavItem::Workouts => "/workouts",
            NavItem::Programs => "/programs",
            NavItem::Progress => "/progress",
            NavItem::Profile => "/profile",
            NavItem::Subscription => "/subscription",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            NavItem::Dashboard => "fa-house",
            NavItem::Workouts => "fa-dumbbell",
            NavItem::Programs => "fa-calendar-days",
            NavItem::Progress => "fa-chart-line",
            NavItem::Profile => "fa-user",
            NavItem::Subscription => "fa-crown",
        }
    }

    /// The item a page belongs to. Detail pages belong to their list item, so
    /// `/workouts/42` and `/workouts.html` both select [`NavItem::Workouts`].
    #[must_use]
    pub fn active(path: &str) -> Option<NavItem> {
        let path = path.trim_end_matches('/');
        let path = path.strip_suffix(".html").unwrap_or(path);
        NavItem::iter().find(|item| {
            path == item.path()
                || path
                    .strip_prefix(item.path())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

/// Sends unauthenticated visitors to the login page, remembering where they wanted to go.
///
/// Returns whether the current page may be shown.
pub fn require_auth(
    session: &impl TokenRepository,
    navigator: &impl Navigator,
    config: &Config,
) -> bool {
    if session.is_authenticated() {
        return true;
    }

    let path = navigator.current_path();
    if path != config.login_path {
        if let Err(err) = session.write_redirect_after_login(&path) {
            error!("failed to remember page before login: {err}");
        }
    }
    debug!("not authenticated, redirecting to login");
    navigator.navigate(&config.login_path);
    false
}

/// Where to go after a successful login. Consumes the remembered page.
///
/// Only same-origin absolute paths are accepted.
pub fn post_login_destination(session: &impl TokenRepository, config: &Config) -> String {
    session
        .take_redirect_after_login()
        .filter(|path| path.starts_with('/') && !path.starts_with("//"))
        .filter(|path| *path != config.login_path)
        .unwrap_or_else(|| config.home_path.clone())
}

#[must_use]
pub fn sidebar_nav_html(current_path: &str) -> String {
    let active = NavItem::active(current_path);
    NavItem::iter()
        .map(|item| {
            format!(
                r#"<a href="{}" class="nav-item{}"><i class="fa {}"></i><span>{}</span></a>"#,
                item.path(),
                if Some(item) == active { " active" } else { "" },
                item.icon(),
                item.label()
            )
        })
        .collect()
}

#[must_use]
pub fn sidebar_user_html(user: Option<&User>) -> String {
    match user {
        Some(user) => format!(
            r#"<div class="user-avatar">{}</div><div class="user-info"><div class="user-name">{}</div><div class="user-email">{}</div></div>"#,
            escape_html(&user.initials()),
            escape_html(&user.name),
            escape_html(&user.email)
        ),
        None => String::new(),
    }
}

/// Fills the sidebar placeholders of the page, if present.
pub fn populate_sidebar(
    document: &Document,
    session: &impl TokenRepository,
    navigator: &impl Navigator,
) {
    if let Some(nav) = document.get_element_by_id(SIDEBAR_NAV_ID) {
        nav.set_inner_html(&sidebar_nav_html(&navigator.current_path()));
    }
    if let Some(user) = document.get_element_by_id(SIDEBAR_USER_ID) {
        user.set_inner_html(&sidebar_user_html(session.read_user().as_ref()));
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

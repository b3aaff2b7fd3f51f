use crate::domain::entities::Identity;

// Paths views redirect to after a guard decision or a login.
pub const LOGIN_PATH: &str = "/login";
pub const ADMIN_HOME_PATH: &str = "/admin";
pub const HOME_PATH: &str = "/";

// What a view needs from the session before it may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRequirement {
    Public,
    Authenticated,
    AdminOnly,
}

// Deterministic result of guarding a view; never a partial render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Granted,
    RedirectToLogin,
    AccessDenied,
}

pub fn authorize(identity: Option<&Identity>, requirement: AccessRequirement) -> GuardOutcome {
    match (requirement, identity) {
        (AccessRequirement::Public, _) => GuardOutcome::Granted,
        (_, None) => GuardOutcome::RedirectToLogin,
        (AccessRequirement::Authenticated, Some(_)) => GuardOutcome::Granted,
        (AccessRequirement::AdminOnly, Some(identity)) if identity.is_admin() => {
            GuardOutcome::Granted
        }
        (AccessRequirement::AdminOnly, Some(_)) => GuardOutcome::AccessDenied,
    }
}

// Where to send a user right after login: admins land on their dashboard.
pub fn landing_path(identity: &Identity, requested: Option<&str>) -> String {
    if identity.is_admin() {
        return ADMIN_HOME_PATH.to_string();
    }
    requested
        .filter(|path| is_local_path(path))
        .unwrap_or(HOME_PATH)
        .to_string()
}

// Router-internal paths only; `//host` and `/\host` leave the site.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\")
}

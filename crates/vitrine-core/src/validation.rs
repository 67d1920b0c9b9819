//! Route validation: keeps the config `pages` table and the routes pages
//! register for themselves in agreement.
//!
//! ```text
//! Unvalidated -> YamlLoaded -> RoutesRegistering -> Validated
//!                                      |
//!                                      +-----------> Failed
//! ```
//!
//! Route names are compared without their leading slash.
use indexmap::IndexSet;

use crate::error::RouteError;

/// Leading-slash form used for storage and lookup. Idempotent.
pub fn normalize_route(route: &str) -> String {
    if route.starts_with('/') {
        route.to_string()
    } else {
        format!("/{}", route)
    }
}

/// Route name as written in the config `pages` table
pub fn route_name(route: &str) -> &str {
    route.strip_prefix('/').unwrap_or(route)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationState {
    #[default]
    Unvalidated,
    YamlLoaded,
    RoutesRegistering,
    Validated,
    Failed,
}

impl ValidationState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Validated | Self::Failed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteValidation {
    yaml_routes: IndexSet<String>,
    registered_routes: IndexSet<String>,
    state: ValidationState,
}

impl RouteValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ValidationState {
        self.state
    }

    pub fn yaml_routes(&self) -> impl Iterator<Item = &str> {
        self.yaml_routes.iter().map(String::as_str)
    }

    pub fn registered_routes(&self) -> impl Iterator<Item = &str> {
        self.registered_routes.iter().map(String::as_str)
    }

    /// Replace the config-declared route set wholesale
    pub fn set_yaml_routes<I, S>(&mut self, routes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.yaml_routes = routes.into_iter().map(Into::into).collect();
        if self.state == ValidationState::Unvalidated {
            self.state = ValidationState::YamlLoaded;
        }
    }

    /// Refuse new registrations once the table is validated
    pub fn ensure_open(&self, route: &str) -> Result<(), RouteError> {
        if self.state == ValidationState::Validated {
            return Err(RouteError::Frozen {
                route: route.to_string(),
            });
        }
        Ok(())
    }

    /// Record a page registration and check it against the config routes
    pub fn record_registration(&mut self, route: &str) -> Result<(), RouteError> {
        self.ensure_open(route)?;
        let name = route_name(route);
        self.registered_routes.insert(name.to_string());
        if matches!(
            self.state,
            ValidationState::Unvalidated | ValidationState::YamlLoaded
        ) {
            self.state = ValidationState::RoutesRegistering;
        }

        let checked = self.check_declared(name);
        if checked.is_err() {
            self.state = ValidationState::Failed;
        }
        checked
    }

    /// An empty config route set accepts every route
    pub fn check_declared(&self, route: &str) -> Result<(), RouteError> {
        let name = route_name(route);
        if !self.yaml_routes.is_empty() && !self.yaml_routes.contains(name) {
            return Err(RouteError::Undeclared {
                route: name.to_string(),
                declared: self.yaml_routes.iter().cloned().collect(),
            });
        }
        Ok(())
    }

    /// Config routes with no registration, in config order
    pub fn missing_routes(&self) -> Vec<String> {
        self.yaml_routes
            .iter()
            .filter(|r| !self.registered_routes.contains(*r))
            .cloned()
            .collect()
    }

    /// End-of-load check
    pub fn finish(&mut self) -> Result<(), RouteError> {
        let missing = self.missing_routes();
        if !missing.is_empty() {
            self.state = ValidationState::Failed;
            return Err(RouteError::Missing { routes: missing });
        }
        if self.state == ValidationState::Failed {
            return Err(RouteError::AlreadyFailed);
        }
        self.state = ValidationState::Validated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_is_idempotent() {
        for route in ["", "/", "home", "/home", "//x", "a/b", "/a/b/"] {
            let once = normalize_route(route);
            assert!(once.starts_with('/'), "{:?}", route);
            assert_eq!(normalize_route(&once), once, "{:?}", route);
        }
    }

    #[test]
    fn test_route_name_strips_one_slash() {
        assert_eq!(route_name("/home"), "home");
        assert_eq!(route_name("home"), "home");
        assert_eq!(route_name("/"), "");
    }

    #[test]
    fn test_happy_path_states() {
        let mut v = RouteValidation::new();
        assert_eq!(v.state(), ValidationState::Unvalidated);
        v.set_yaml_routes(["home", "about"]);
        assert_eq!(v.state(), ValidationState::YamlLoaded);
        v.record_registration("/home").unwrap();
        assert_eq!(v.state(), ValidationState::RoutesRegistering);
        v.record_registration("/about").unwrap();
        v.finish().unwrap();
        assert_eq!(v.state(), ValidationState::Validated);
        assert!(v.state().is_terminal());
    }

    #[test]
    fn test_undeclared_route_fails_immediately() {
        let mut v = RouteValidation::new();
        v.set_yaml_routes(["home", "about"]);
        let err = v.record_registration("/contact").unwrap_err();
        assert_eq!(
            err,
            RouteError::Undeclared {
                route: "contact".to_string(),
                declared: vec!["home".to_string(), "about".to_string()],
            }
        );
        assert_eq!(v.state(), ValidationState::Failed);
    }

    #[test]
    fn test_missing_route_fails_at_finish() {
        let mut v = RouteValidation::new();
        v.set_yaml_routes(["home", "about"]);
        v.record_registration("/home").unwrap();
        let err = v.finish().unwrap_err();
        assert_eq!(
            err,
            RouteError::Missing {
                routes: vec!["about".to_string()]
            }
        );
        assert!(err.to_string().contains("about"));
        assert_eq!(v.state(), ValidationState::Failed);
    }

    #[test]
    fn test_failed_is_terminal() {
        let mut v = RouteValidation::new();
        v.set_yaml_routes(["home"]);
        assert!(v.record_registration("/nope").is_err());
        v.record_registration("/home").unwrap();
        assert_eq!(v.state(), ValidationState::Failed);
        assert_eq!(v.finish(), Err(RouteError::AlreadyFailed));
        assert_eq!(v.state(), ValidationState::Failed);
    }

    #[test]
    fn test_validated_table_is_frozen() {
        let mut v = RouteValidation::new();
        v.finish().unwrap();
        assert_eq!(
            v.record_registration("/late"),
            Err(RouteError::Frozen {
                route: "/late".to_string()
            })
        );
    }

    #[test]
    fn test_empty_yaml_accepts_any_route() {
        let mut v = RouteValidation::new();
        v.record_registration("/anything").unwrap();
        assert_eq!(v.state(), ValidationState::RoutesRegistering);
        v.finish().unwrap();
    }
}

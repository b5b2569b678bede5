//! Ordered access-rule table + the pure decision function over it.
//!
//! The table is built once at startup and only read afterwards. The first rule whose
//! method and path pattern match decides; when nothing matches the terminal default
//! (`Requirement::Authenticated`) applies, so every request resolves to a decision.

use axum::http::Method;

use crate::api::extractors::AuthCtx;
use crate::services::auth::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Public,
    Authenticated,
    Role(Role),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenial {
    NotAuthenticated,
    InsufficientRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(AccessDenial),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    // `*`: exactly one segment
    One,
    // `**`: zero or more segments
    Rest,
}

/// Ant-style path pattern (`/api/offers/**`, `/users/*/avatar`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s {
                "**" => Segment::Rest,
                "*" => Segment::One,
                lit => Segment::Literal(lit.to_string()),
            })
            .collect();

        Self { segments }
    }

    /// Paths with `.` / `..` segments match nothing, so they fall through to the default rule.
    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if parts.iter().any(|p| *p == "." || *p == "..") {
            return false;
        }
        match_segments(&self.segments, &parts)
    }
}

fn match_segments(pattern: &[Segment], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((Segment::Rest, rest)) => (0..=path.len()).any(|i| match_segments(rest, &path[i..])),
        Some((Segment::One, rest)) => !path.is_empty() && match_segments(rest, &path[1..]),
        Some((Segment::Literal(lit), rest)) => {
            path.first().is_some_and(|p| *p == lit.as_str()) && match_segments(rest, &path[1..])
        }
    }
}

#[derive(Debug, Clone)]
pub struct AccessRule {
    /// `None` matches every method.
    pub method: Option<Method>,
    pub pattern: PathPattern,
    pub requirement: Requirement,
}

impl AccessRule {
    pub fn any(pattern: &str, requirement: Requirement) -> Self {
        Self {
            method: None,
            pattern: PathPattern::parse(pattern),
            requirement,
        }
    }

    pub fn method(method: Method, pattern: &str, requirement: Requirement) -> Self {
        Self {
            method: Some(method),
            pattern: PathPattern::parse(pattern),
            requirement,
        }
    }

    fn matches(&self, method: &Method, path: &str) -> bool {
        self.method.as_ref().is_none_or(|m| m == method) && self.pattern.matches(path)
    }
}

#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
    fallback: Requirement,
}

impl AccessPolicy {
    pub fn new(rules: Vec<AccessRule>) -> Self {
        Self {
            rules,
            fallback: Requirement::Authenticated,
        }
    }

    /// Rule table for the offers API.
    pub fn standard() -> Self {
        let admin = Requirement::Role(Role::Admin);

        Self::new(vec![
            AccessRule::any("/swagger-ui.html", Requirement::Public),
            AccessRule::any("/swagger-ui/**", Requirement::Public),
            AccessRule::any("/v3/api-docs/**", Requirement::Public),
            AccessRule::any("/login/**", Requirement::Public),
            AccessRule::any("/register/**", Requirement::Public),
            AccessRule::method(Method::GET, "/health", Requirement::Public),
            AccessRule::method(Method::GET, "/api/offers/**", Requirement::Authenticated),
            AccessRule::method(Method::POST, "/api/offers/**", admin),
            AccessRule::method(Method::DELETE, "/api/offers/**", admin),
        ])
    }

    pub fn requirement_for(&self, method: &Method, path: &str) -> Requirement {
        self.rules
            .iter()
            .find(|rule| rule.matches(method, path))
            .map(|rule| rule.requirement)
            .unwrap_or(self.fallback)
    }

    pub fn decide(&self, method: &Method, path: &str, ctx: &AuthCtx) -> Decision {
        match (self.requirement_for(method, path), ctx.principal()) {
            (Requirement::Public, _) => Decision::Allow,
            (_, None) => Decision::Deny(AccessDenial::NotAuthenticated),
            (Requirement::Authenticated, Some(_)) => Decision::Allow,
            (Requirement::Role(role), Some(principal)) if principal.has_role(role) => {
                Decision::Allow
            }
            (Requirement::Role(_), Some(_)) => Decision::Deny(AccessDenial::InsufficientRole),
        }
    }
}

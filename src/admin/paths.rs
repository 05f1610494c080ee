//! URL layout of the admin surface under a configurable prefix.

use serde::Serialize;

/// Join URL path segments, collapsing repeated and trailing slashes and
/// resolving `.` and `..`.
///
/// The result is always absolute: `join_path("", "/admin")` is `/admin`,
/// `join_path("back/", "/admin/")` is `/back/admin`. A `..` at the root
/// stays at the root.
pub fn join_path(prefix: &str, segment: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for part in prefix.split('/').chain(segment.split('/')) {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            part => parts.push(part),
        }
    }

    format!("/{}", parts.join("/"))
}

/// Routes derived from the admin prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminPaths {
    pub admin: String,
    pub login: String,
    pub logout: String,
}

impl AdminPaths {
    pub fn new(prefix: &str) -> Self {
        Self {
            admin: join_path(prefix, "/admin"),
            login: join_path(prefix, "/login"),
            logout: join_path(prefix, "/logout"),
        }
    }

    /// Path of a resource collection, e.g. `/admin/products`.
    pub fn resource(&self, slug: &str) -> String {
        join_path(&self.admin, slug)
    }
}

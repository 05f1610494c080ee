//! Admin site registry.
//!
//! Models are exposed through explicit [`Resource`] descriptions instead of
//! being discovered from struct metadata.

mod paths;
mod resource;

use serde::Serialize;

use crate::config::{AdminConfig, MENU_USER_MANAGEMENT};

pub use paths::{join_path, AdminPaths};
pub use resource::{Meta, MetaKind, Resource};

pub const PRODUCTS_SLUG: &str = "products";
pub const ADMIN_USERS_SLUG: &str = "admin_users";

/// Everything the admin frontend needs to lay itself out
#[derive(Debug, Clone, Serialize)]
pub struct AdminSite {
    pub site_name: String,
    pub paths: AdminPaths,
    pub resources: Vec<Resource>,
}

impl AdminSite {
    /// Site with the product and admin user resources registered.
    pub fn new(config: &AdminConfig) -> Self {
        let paths = AdminPaths::new(&config.prefix);

        let resources = vec![product_resource(&paths), admin_user_resource(&paths)];

        Self {
            site_name: config.site_name.clone(),
            paths,
            resources,
        }
    }

    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }
}

fn product_resource(paths: &AdminPaths) -> Resource {
    Resource::new(
        "Product",
        paths.resource(PRODUCTS_SLUG),
        &["ID", "Name", "Price", "Tags", "CreatedAt", "UpdatedAt"],
    )
    .index_attrs(&["ID", "Name", "Price", "Tag"])
    .edit_attrs(&["Name", "Price", "Tags"])
    .new_attrs(&["Name", "Price", "Tags"])
    .meta(Meta::new("Price", MetaKind::Number))
    // comma separated text field
    .meta(Meta::new("Tags", MetaKind::String))
    // badges rendered from the tag list
    .meta(Meta::new("Tag", MetaKind::Html))
}

fn admin_user_resource(paths: &AdminPaths) -> Resource {
    Resource::new(
        "AdminUser",
        paths.resource(ADMIN_USERS_SLUG),
        &["ID", "Email", "FirstName", "LastName", "Password", "LastLogin"],
    )
    .menu(&[MENU_USER_MANAGEMENT])
    .index_attrs(&["-Password"])
    .meta(Meta::new("Password", MetaKind::Password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_product_pages() {
        let site = AdminSite::new(&AdminConfig::default());
        let product = site.resource("Product").unwrap();

        assert_eq!(product.path, "/admin/products");
        assert_eq!(product.index_attrs, vec!["ID", "Name", "Price", "Tag"]);
        assert_eq!(product.edit_attrs, vec!["Name", "Price", "Tags"]);
        assert_eq!(product.new_attrs, product.edit_attrs);
        assert_eq!(product.find_meta("Tag").unwrap().kind, MetaKind::Html);
        assert_eq!(product.find_meta("Tags").unwrap().kind, MetaKind::String);
    }

    #[test]
    fn admin_users_hide_password_on_index() {
        let site = AdminSite::new(&AdminConfig::default());
        let users = site.resource("AdminUser").unwrap();

        assert_eq!(users.menu, vec!["User Management"]);
        assert!(!users.index_attrs.contains(&"Password".to_string()));
        assert!(users.edit_attrs.contains(&"Password".to_string()));
        assert_eq!(users.find_meta("Password").unwrap().kind, MetaKind::Password);
    }

    #[test]
    fn uses_configured_name_and_prefix() {
        let mut config = AdminConfig::default();
        config.prefix = "/back".to_string();
        config.site_name = "Bar Admin".to_string();
        let site = AdminSite::new(&config);

        assert_eq!(site.site_name, "Bar Admin");
        assert_eq!(site.paths.login, "/back/login");
        assert_eq!(site.resource("AdminUser").unwrap().path, "/back/admin/admin_users");
    }

    #[test]
    fn serializes_without_internal_attr_list() {
        let json = serde_json::to_value(AdminSite::new(&AdminConfig::default())).unwrap();
        assert_eq!(json["site_name"], "My Admin Interface");
        assert!(json["resources"][0].get("attrs").is_none());
        assert!(json["resources"][0].get("menu").is_none());
    }
}

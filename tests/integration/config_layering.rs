//! Configuration layering and validation through the public loader

use super::test_utils::with_isolated_env;
use inventory_mcp::catalog::{Catalog, Operation};
use inventory_mcp::config::{CatalogMode, ConfigLoader};
use inventory_mcp::synth::GeneratorKind;
use std::fs;

#[test]
fn test_environment_profile_file_overrides_base() {
    with_isolated_env(|temp_dir| {
        let workspace = temp_dir.path().join("ws");
        fs::create_dir_all(workspace.join("config")).unwrap();
        fs::write(
            workspace.join("config/config.toml"),
            "[api]\nbase_url = \"http://base.local/\"\nmax_attempts = 2\n",
        )
        .unwrap();
        fs::write(
            workspace.join("config/staging.toml"),
            "[api]\nbase_url = \"http://staging.local/\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.api.base_url, "http://base.local/");

        std::env::set_var("INVENTORY_MCP_ENV", "staging");
        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.api.base_url, "http://staging.local/");
        assert_eq!(config.api.max_attempts, 2);
    });
}

#[test]
fn test_configured_catalog_from_array_fields() {
    with_isolated_env(|temp_dir| {
        let file = temp_dir.path().join("inventory.toml");
        fs::write(
            &file,
            r#"
[catalog]
mode = "configured"

[endpoints.customers]
path = "/v1/customers"
fields = [
    { name = "fullName", generator = "name" },
    { name = "email", generator = "unique.email" },
    { name = "company", generator = "company" },
]

[endpoints.warehouses]
path = "/v1/warehouses"
"#,
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&file).unwrap().validated().unwrap();
        assert_eq!(config.catalog.mode, CatalogMode::Configured);

        let catalog = Catalog::new(config.catalog_source());
        let names: Vec<_> = catalog
            .list_operations()
            .into_iter()
            .map(|op| op.name)
            .collect();
        assert_eq!(names, vec![Operation::CreateTestCustomers.name()]);

        let resolved = catalog.resolve("create_test_customers").unwrap();
        assert_eq!(resolved.endpoint.path, "/v1/customers");
        let fields: Vec<_> = resolved.endpoint.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, vec!["fullName", "email", "company"]);
        assert_eq!(
            resolved.endpoint.fields.get("email"),
            Some(&GeneratorKind::UniqueEmail)
        );
    });
}

#[test]
fn test_validation_collects_every_problem() {
    with_isolated_env(|temp_dir| {
        let file = temp_dir.path().join("broken.toml");
        fs::write(
            &file,
            r#"
[api]
base_url = "ftp://files.local"
max_attempts = 0

[catalog]
mode = "configured"

[generation]
max_batch_size = 0
"#,
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&file).unwrap();
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        let err = config.validated().unwrap_err().to_string();
        assert!(err.contains("API:"));
        assert!(err.contains("Catalog:"));
        assert!(err.contains("Generation:"));
    });
}

#[test]
fn test_missing_explicit_file_is_error() {
    with_isolated_env(|temp_dir| {
        assert!(ConfigLoader::load_from_file(&temp_dir.path().join("nope.toml")).is_err());
    });
}

#[test]
fn test_global_config_path_under_xdg_home() {
    with_isolated_env(|temp_dir| {
        let path = ConfigLoader::global_config_path().unwrap();
        assert!(path.starts_with(temp_dir.path()));
        assert!(path.ends_with("inventory-mcp/config.toml"));
    });
}

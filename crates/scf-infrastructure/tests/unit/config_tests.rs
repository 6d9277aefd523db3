//! Configuration loading tests
//!
//! Every test runs inside a figment `Jail`, which serializes tests that
//! touch the working directory or environment and restores both after.

use figment::Jail;
use scf_domain::error::Error;
use scf_infrastructure::config::{AppConfig, ConfigLoader};
use scf_infrastructure::constants::{DEFAULT_CACHE_DIR, DEFAULT_CONTAINER_CLASS};

#[test]
fn test_defaults_without_file_or_env() {
    Jail::expect_with(|_jail| {
        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;

        assert_eq!(config, AppConfig::default());
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.directory.to_str(), Some(DEFAULT_CACHE_DIR));
        assert_eq!(config.cache.class_name, DEFAULT_CONTAINER_CLASS);
        assert!(config.container.services_file.is_none());
        Ok(())
    });
}

#[test]
fn test_toml_file_in_working_directory() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "scf.toml",
            r#"
                [bootstrap]
                manifests = ["config/*.yml"]

                [container]
                services_file = "config/services.yml"

                [container.parameters]
                mailer_transport = "smtp"
                retries = 3

                [cache]
                class_name = "AppContainer"
            "#,
        )?;

        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;

        assert_eq!(config.bootstrap.manifests, vec!["config/*.yml".to_string()]);
        assert_eq!(
            config.container.services_file.as_deref().and_then(|p| p.to_str()),
            Some("config/services.yml")
        );
        assert_eq!(
            config.container.parameters.get("mailer_transport"),
            Some(&serde_json::json!("smtp"))
        );
        assert_eq!(
            config.container.parameters.get("retries"),
            Some(&serde_json::json!(3))
        );
        assert_eq!(config.cache.class_name, "AppContainer");
        assert_eq!(config.logging, AppConfig::default().logging);
        Ok(())
    });
}

#[test]
fn test_environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("scf.toml", "[cache]\nenabled = false\n")?;
        jail.set_env("SCF__CACHE__ENABLED", "true");
        jail.set_env("SCF__LOGGING__LEVEL", "debug");

        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;

        assert!(config.cache.enabled);
        assert_eq!(config.logging.level, "debug");
        Ok(())
    });
}

#[test]
fn test_custom_env_prefix() {
    Jail::expect_with(|jail| {
        jail.set_env("MYAPP__CACHE__CLASS_NAME", "Custom");

        let config = ConfigLoader::new()
            .with_env_prefix("MYAPP")
            .load()
            .map_err(|e| e.to_string())?;

        assert_eq!(config.cache.class_name, "Custom");
        Ok(())
    });
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    Jail::expect_with(|_jail| {
        let result = ConfigLoader::new().with_config_path("missing.toml").load();

        assert!(matches!(result, Err(Error::Configuration { .. })));
        Ok(())
    });
}

#[test]
fn test_validation_rejects_bad_values() {
    Jail::expect_with(|jail| {
        jail.create_file("bad-level.toml", "[logging]\nlevel = \"chatty\"\n")?;
        jail.create_file("bad-class.toml", "[cache]\nclass_name = \"  \"\n")?;
        jail.create_file("bad-path.toml", "[cache]\nclass_name = \"a/b\"\n")?;

        for file in ["bad-level.toml", "bad-class.toml", "bad-path.toml"] {
            let result = ConfigLoader::new().with_config_path(file).load();
            assert!(
                matches!(result, Err(Error::Configuration { .. })),
                "{file} should fail validation"
            );
        }
        Ok(())
    });
}

#[test]
fn test_save_and_reload() {
    Jail::expect_with(|jail| {
        let mut config = AppConfig::default();
        config.cache.enabled = true;
        config.cache.class_name = "Saved".to_string();
        config.bootstrap.manifests = vec!["bootstrap/*.yml".to_string()];

        let path = jail.directory().join("saved.toml");
        let loader = ConfigLoader::new().with_config_path(&path);
        loader.save_to_file(&config, &path).map_err(|e| e.to_string())?;

        let reloaded = loader.load().map_err(|e| e.to_string())?;
        assert_eq!(reloaded, config);
        assert_eq!(loader.config_path(), Some(path.as_path()));
        Ok(())
    });
}

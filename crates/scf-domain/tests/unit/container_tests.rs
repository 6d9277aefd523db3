//! Unit tests for the container lifecycle

use std::sync::{Arc, Mutex};

use scf_domain::{
    Alias, CompilerPass, Container, Definition, Error, Extension, PassPhase, Result,
};
use serde_json::{Value, json};

struct RecordingExtension {
    alias: &'static str,
    seen: Arc<Mutex<Vec<Value>>>,
}

impl Extension for RecordingExtension {
    fn alias(&self) -> &str {
        self.alias
    }

    fn load(&self, configs: &[Value], container: &mut Container) -> Result<()> {
        self.seen
            .lock()
            .expect("lock poisoned")
            .extend(configs.iter().cloned());
        container.set_definition(
            format!("{}.service", self.alias),
            Definition::new("App\\Loaded").with_tag(self.alias, Default::default()),
        )
    }
}

struct OrderPass {
    name: &'static str,
    log: Arc<Mutex<Vec<&'static str>>>,
}

impl CompilerPass for OrderPass {
    fn id(&self) -> &str {
        self.name
    }

    fn process(&self, _container: &mut Container) -> Result<()> {
        self.log.lock().expect("lock poisoned").push(self.name);
        Ok(())
    }
}

#[test]
fn test_new_container_is_empty() {
    let container = Container::new();
    assert!(container.definitions().is_empty());
    assert!(container.aliases().is_empty());
    assert!(container.parameters().is_empty());
    assert!(!container.is_compiled());
}

#[test]
fn test_empty_container_compiles() {
    let mut container = Container::new();
    container.compile().expect("empty container compiles");
    assert!(container.is_compiled());
}

#[test]
fn test_definition_and_alias_replace_each_other() {
    let mut container = Container::new();
    container
        .set_definition("mailer", Definition::new("App\\Mailer"))
        .expect("mutable");
    container
        .set_alias("mailer", Alias::new("other"))
        .expect("mutable");
    assert!(!container.has_definition("mailer"));
    assert!(container.alias("mailer").is_some());

    container
        .set_definition("mailer", Definition::new("App\\Mailer"))
        .expect("mutable");
    assert!(container.has_definition("mailer"));
    assert!(container.alias("mailer").is_none());
}

#[test]
fn test_alias_cannot_reference_itself() {
    let mut container = Container::new();
    let result = container.set_alias("a", Alias::new("a"));
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}

#[test]
fn test_resolve_alias_chain() {
    let mut container = Container::new();
    container
        .set_definition("real", Definition::new("App\\Real"))
        .expect("mutable");
    container.set_alias("one", Alias::new("two")).expect("mutable");
    container.set_alias("two", Alias::new("real")).expect("mutable");

    assert_eq!(container.resolve_alias("one").expect("resolves"), "real");
    assert_eq!(
        container.find_definition("one").expect("found").class.as_deref(),
        Some("App\\Real")
    );
    assert!(container.has("one"));
    assert!(!container.has("three"));
}

#[test]
fn test_find_tagged_service_ids_in_definition_order() {
    let mut container = Container::new();
    container
        .register("first", "App\\First")
        .expect("mutable")
        .add_tag("dummy", Default::default());
    container.register("untagged", "App\\Untagged").expect("mutable");
    container
        .register("second", "App\\Second")
        .expect("mutable")
        .add_tag("dummy", Default::default());

    let tagged = container.find_tagged_service_ids("dummy");
    let ids: Vec<&String> = tagged.keys().collect();
    assert_eq!(ids, vec!["first", "second"]);
    assert_eq!(container.find_tags(), vec!["dummy".to_string()]);
}

#[test]
fn test_load_from_unknown_extension_fails() {
    let mut container = Container::new();
    let result = container.load_from_extension("missing", Value::Null);
    assert!(matches!(result, Err(Error::ExtensionNotFound { alias }) if alias == "missing"));
}

#[test]
fn test_extension_loads_only_when_configured() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut container = Container::new();
    container
        .register_extension(Arc::new(RecordingExtension {
            alias: "idle",
            seen: Arc::clone(&seen),
        }))
        .expect("mutable");
    container.compile().expect("compiles");

    assert!(seen.lock().expect("lock poisoned").is_empty());
    assert!(!container.has_definition("idle.service"));
}

#[test]
fn test_extension_receives_every_config_block() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut container = Container::new();
    container
        .register_extension(Arc::new(RecordingExtension {
            alias: "dummy",
            seen: Arc::clone(&seen),
        }))
        .expect("mutable");
    container
        .load_from_extension("dummy", json!({"a": 1}))
        .expect("registered");
    container
        .load_from_extension("dummy", Value::Null)
        .expect("registered");

    assert_eq!(container.extension_config("dummy").len(), 2);
    container.compile().expect("compiles");

    assert_eq!(
        *seen.lock().expect("lock poisoned"),
        vec![json!({"a": 1}), json!({})]
    );
    assert!(container.has_definition("dummy.service"));
}

#[test]
fn test_registered_extension_is_retrievable() {
    let extension: Arc<dyn Extension> = Arc::new(RecordingExtension {
        alias: "dummy",
        seen: Arc::new(Mutex::new(Vec::new())),
    });
    let mut container = Container::new();
    container
        .register_extension(Arc::clone(&extension))
        .expect("mutable");

    let fetched = container.extension("dummy").expect("registered");
    assert!(Arc::ptr_eq(&fetched, &extension));
}

#[test]
fn test_passes_run_in_phase_then_registration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut container = Container::new();
    let pass = |name| -> Arc<dyn CompilerPass> {
        Arc::new(OrderPass {
            name,
            log: Arc::clone(&log),
        })
    };

    container
        .add_compiler_pass(pass("removing"), PassPhase::Removing)
        .expect("mutable");
    container
        .add_compiler_pass(pass("before-1"), PassPhase::BeforeOptimization)
        .expect("mutable");
    container
        .add_compiler_pass(pass("after"), PassPhase::AfterRemoving)
        .expect("mutable");
    container
        .add_compiler_pass(pass("before-2"), PassPhase::BeforeOptimization)
        .expect("mutable");
    container
        .add_compiler_pass(pass("optimize"), PassPhase::Optimization)
        .expect("mutable");

    container.compile().expect("compiles");

    assert_eq!(
        *log.lock().expect("lock poisoned"),
        vec!["before-1", "before-2", "optimize", "removing", "after"]
    );
}

#[test]
fn test_compile_twice_is_noop() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut container = Container::new();
    container
        .add_compiler_pass(
            Arc::new(OrderPass {
                name: "once",
                log: Arc::clone(&log),
            }),
            PassPhase::default(),
        )
        .expect("mutable");

    container.compile().expect("compiles");
    container.compile().expect("second compile is a no-op");

    assert_eq!(log.lock().expect("lock poisoned").len(), 1);
}

#[test]
fn test_compiled_container_is_frozen() {
    let mut container = Container::new();
    container.compile().expect("compiles");

    assert!(matches!(
        container.set_definition("late", Definition::default()),
        Err(Error::FrozenContainer { .. })
    ));
    assert!(matches!(
        container.set_parameter("late", 1),
        Err(Error::FrozenContainer { .. })
    ));
    assert!(matches!(
        container.set_alias("late", Alias::new("x")),
        Err(Error::FrozenContainer { .. })
    ));
}

#[test]
fn test_restore_builds_compiled_container() {
    let mut parameters = indexmap::IndexMap::new();
    parameters.insert("literal".to_string(), json!("%not-a-placeholder%"));
    let mut definitions = indexmap::IndexMap::new();
    definitions.insert("svc".to_string(), Definition::new("App\\Svc"));

    let container = Container::restore(
        parameters,
        definitions,
        indexmap::IndexMap::new(),
        vec!["/tmp/services.yml".into()],
    );

    assert!(container.is_compiled());
    assert!(container.parameters().is_resolved());
    assert_eq!(
        container.parameter("literal"),
        Some(&json!("%not-a-placeholder%"))
    );
    assert_eq!(container.resources().len(), 1);
}

#[test]
fn test_resources_are_deduplicated() {
    let mut container = Container::new();
    container.add_resource("/a.yml");
    container.add_resource("/a.yml");
    container.add_resource("/b.yml");
    assert_eq!(container.resources().len(), 2);
}

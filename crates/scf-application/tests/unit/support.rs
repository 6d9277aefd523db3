//! Shared extensions, passes and catalog entries for the test suite

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use scf_application::ContainerFactory;
use scf_application::bootstrap::{COMPILER_PASSES, CompilerPassEntry, EXTENSIONS, ExtensionEntry};
use scf_domain::ports::{CompilerPass, Extension, ServiceFileLoader};
use scf_domain::{Container, PassPhase, Result};
use scf_infrastructure::{YamlDumper, YamlFileLoader};
use serde_json::Value;

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

pub fn factory() -> ContainerFactory {
    ContainerFactory::new(Arc::new(YamlFileLoader::new()), Arc::new(YamlDumper::new()))
}

/// Loads `fixtures/services.yml`, which tags service `test` with `dummy`
#[derive(Debug, Default)]
pub struct DummyExtension;

impl Extension for DummyExtension {
    fn alias(&self) -> &str {
        "dummy"
    }

    fn load(&self, _configs: &[Value], container: &mut Container) -> Result<()> {
        YamlFileLoader::new().load(&fixture("services.yml"), container)
    }
}

/// Extension with a configurable alias that registers nothing
#[derive(Debug)]
pub struct AliasedExtension(pub &'static str);

impl Extension for AliasedExtension {
    fn alias(&self) -> &str {
        self.0
    }

    fn load(&self, _configs: &[Value], _container: &mut Container) -> Result<()> {
        Ok(())
    }
}

/// Sets `env` and `region` parameters when loaded
#[derive(Debug, Default)]
pub struct ParameterExtension;

impl Extension for ParameterExtension {
    fn alias(&self) -> &str {
        "parameters_ext"
    }

    fn load(&self, _configs: &[Value], container: &mut Container) -> Result<()> {
        container.set_parameter("env", "from_extension")?;
        container.set_parameter("region", "eu")
    }
}

/// Writes the id of every service tagged `dummy`
#[derive(Debug, Default)]
pub struct DummyCompilerPass {
    output: Arc<Mutex<String>>,
}

impl DummyCompilerPass {
    pub fn new() -> (Self, Arc<Mutex<String>>) {
        let output = Arc::new(Mutex::new(String::new()));
        let pass = Self {
            output: Arc::clone(&output),
        };
        (pass, output)
    }
}

impl CompilerPass for DummyCompilerPass {
    fn process(&self, container: &mut Container) -> Result<()> {
        let mut output = self.output.lock().expect("output lock");
        for id in container.find_tagged_service_ids("dummy").keys() {
            output.push_str(id);
        }
        Ok(())
    }
}

/// Pass doing nothing, identified by the given name
#[derive(Debug)]
pub struct NamedPass(pub &'static str);

impl CompilerPass for NamedPass {
    fn id(&self) -> &str {
        self.0
    }

    fn process(&self, _container: &mut Container) -> Result<()> {
        Ok(())
    }
}

fn dummy_extension() -> Arc<dyn Extension> {
    Arc::new(DummyExtension)
}

fn noop_pass() -> Arc<dyn CompilerPass> {
    Arc::new(NamedPass("noop"))
}

fn late_noop_pass() -> Arc<dyn CompilerPass> {
    Arc::new(NamedPass("late_noop"))
}

#[linkme::distributed_slice(EXTENSIONS)]
static DUMMY_EXTENSION: ExtensionEntry = ExtensionEntry {
    name: "dummy",
    description: "Loads the dummy fixture services",
    factory: dummy_extension,
};

#[linkme::distributed_slice(COMPILER_PASSES)]
static NOOP_PASS: CompilerPassEntry = CompilerPassEntry {
    name: "noop",
    description: "Does nothing",
    default_phase: PassPhase::BeforeOptimization,
    factory: noop_pass,
};

#[linkme::distributed_slice(COMPILER_PASSES)]
static LATE_NOOP_PASS: CompilerPassEntry = CompilerPassEntry {
    name: "late_noop",
    description: "Does nothing, late",
    default_phase: PassPhase::Optimization,
    factory: late_noop_pass,
};

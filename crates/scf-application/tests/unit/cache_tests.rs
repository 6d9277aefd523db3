//! Container cache tests

use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};

use indexmap::IndexMap;
use tempfile::TempDir;

use crate::support::factory;

fn touch_later(path: &Path) {
    let later = SystemTime::now() + Duration::from_secs(120);
    File::options()
        .write(true)
        .open(path)
        .expect("open resource")
        .set_modified(later)
        .expect("set mtime");
}

fn services_file(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("services.yml");
    fs::write(&path, "parameters:\n  greeting: hello\nservices:\n  app: ~\n").expect("write");
    path
}

#[test]
fn test_cache_path_uses_dumper_extension() {
    let cache = factory().cache("/var/cache", "AppContainer");

    assert_eq!(cache.path(), Path::new("/var/cache/AppContainer.yml"));
    assert_eq!(cache.class_name(), "AppContainer");
    assert_eq!(cache.directory(), Path::new("/var/cache"));
}

#[test]
fn test_missing_dump_is_not_fresh() {
    let dir = TempDir::new().expect("temp dir");
    let cache = factory().cache(dir.path(), "AppContainer");

    assert!(!cache.is_fresh().expect("check freshness"));
    assert!(cache.load().expect("load").is_none());
}

#[test]
fn test_load_or_create_dumps_then_reuses() {
    let dir = TempDir::new().expect("temp dir");
    let services = services_file(dir.path());
    let factory = factory();
    let cache = factory.cache(dir.path(), "AppContainer");

    let built = factory
        .load_or_create(&cache, IndexMap::new(), Some(&services))
        .expect("build");
    assert!(built.is_compiled());
    assert!(cache.path().exists());
    assert!(cache.is_fresh().expect("check freshness"));

    let cached = cache.load().expect("load").expect("fresh dump");
    assert_eq!(cached.definitions(), built.definitions());
    assert_eq!(cached.parameter("greeting"), built.parameter("greeting"));
}

#[test]
fn test_touching_a_resource_makes_the_cache_stale() {
    let dir = TempDir::new().expect("temp dir");
    let services = services_file(dir.path());
    let factory = factory();
    let cache = factory.cache(dir.path(), "AppContainer");
    factory
        .load_or_create(&cache, IndexMap::new(), Some(&services))
        .expect("build");
    assert!(cache.is_fresh().expect("check freshness"));

    touch_later(&services);

    assert!(!cache.is_fresh().expect("check freshness"));
}

#[test]
fn test_removing_a_resource_makes_the_cache_stale() {
    let dir = TempDir::new().expect("temp dir");
    let services = services_file(dir.path());
    let factory = factory();
    let cache = factory.cache(dir.path(), "AppContainer");
    factory
        .load_or_create(&cache, IndexMap::new(), Some(&services))
        .expect("build");

    fs::remove_file(&services).expect("remove resource");

    assert!(cache.load().expect("load").is_none());
}

#[test]
fn test_unreadable_dump_is_stale() {
    let dir = TempDir::new().expect("temp dir");
    let cache = factory().cache(dir.path(), "AppContainer");
    fs::write(cache.path(), "not: [a, container").expect("write garbage");

    assert!(!cache.is_fresh().expect("check freshness"));
}

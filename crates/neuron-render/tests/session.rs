use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use neuron_core::config::JsConfig;
use neuron_core::tree::DependencyTree;
use neuron_render::session::SessionState;
use neuron_render::{DebugMode, MemoryCache, Neuron, OutputCache, PrefixResolver, Resource};
use neuron_util::errors::NeuronError;
use serde_json::json;

fn leaf() -> Vec<(&'static str, &'static str)> {
    Vec::new()
}

fn simple_tree() -> DependencyTree {
    DependencyTree::new()
        .with_package("a", "*", [("b", "*")])
        .with_package("b", "*", leaf())
}

fn diamond_tree() -> DependencyTree {
    DependencyTree::new()
        .with_package("a", "*", [("b", "*"), ("c", "*")])
        .with_package("b", "*", [("d", "*")])
        .with_package("c", "*", [("d", "*")])
        .with_package("d", "*", leaf())
}

fn script_position(output: &str, id: &str) -> usize {
    output
        .find(&format!("src=\"/{id}\""))
        .unwrap_or_else(|| panic!("{id} not emitted in {output}"))
}

#[test]
fn test_single_dependency_renders_in_load_order() {
    let mut neuron = Neuron::new(simple_tree());
    neuron.facade("a", None).unwrap();

    let output = neuron.output().unwrap();
    assert_eq!(
        output,
        concat!(
            "<script src=\"/neuron.js\"></script>",
            "<script async src=\"/b@*/b.js\"></script>",
            "<script async src=\"/a@*/a.js\"></script>",
            "<script>",
            "neuron.config({loaded:[\"b@*\",\"a@*\"],graph:{\"b@*\":{},\"a@*\":{\"b\":\"*\"}}});",
            "facade('a');",
            "</script>"
        )
    );
}

#[test]
fn test_combo_replaces_individual_tags() {
    let mut neuron = Neuron::new(simple_tree());
    neuron.facade("a", None).unwrap();
    neuron.combo(["a", "b"]).unwrap();

    let output = neuron.output().unwrap();
    assert!(output.contains("<script async src=\"/a@*/a.js,b@*/b.js\"></script>"));
    assert!(!output.contains("<script async src=\"/a@*/a.js\">"));
    assert!(!output.contains("<script async src=\"/b@*/b.js\">"));
    assert!(output.contains("loaded:[\"a@*\",\"b@*\"]"));
}

#[test]
fn test_empty_facades_render_loader_only_and_bypass_cache() {
    let cache = Arc::new(MemoryCache::new());
    let mut neuron = Neuron::new(simple_tree()).with_cache(cache.clone());

    let output = neuron.output().unwrap();
    assert!(output.starts_with("<script src=\"/neuron.js\"></script>"));
    assert!(!output.contains("async"));
    assert!(!output.contains("facade("));
    assert!(output.ends_with("});</script>"));
    assert!(cache.is_empty());
}

#[test]
fn test_diamond_dependency_emitted_once_before_dependents() {
    let mut neuron = Neuron::new(diamond_tree());
    neuron.facade("a", None).unwrap();
    let output = neuron.output().unwrap();

    assert_eq!(output.matches("d@*/d.js").count(), 1);
    let d = script_position(&output, "d@*/d.js");
    let b = script_position(&output, "b@*/b.js");
    let c = script_position(&output, "c@*/c.js");
    let a = script_position(&output, "a@*/a.js");
    assert!(d < b && d < c);
    assert!(b < a && c < a);
}

#[test]
fn test_dependency_shared_with_later_sibling_loads_first() {
    let tree = DependencyTree::new()
        .with_package("x", "*", [("b", "*"), ("a", "*")])
        .with_package("a", "*", [("b", "*")])
        .with_package("b", "*", [("c", "*")])
        .with_package("c", "*", leaf());
    let mut neuron = Neuron::new(tree);
    neuron.facade("x", None).unwrap();
    let output = neuron.output().unwrap();

    let c = script_position(&output, "c@*/c.js");
    let b = script_position(&output, "b@*/b.js");
    let a = script_position(&output, "a@*/a.js");
    let x = script_position(&output, "x@*/x.js");
    assert!(c < b && b < a && a < x);
    assert!(output.contains("loaded:[\"c@*\",\"b@*\",\"a@*\",\"x@*\"]"));
}

#[test]
fn test_facade_outside_tree_is_loaded() {
    let mut neuron = Neuron::new(DependencyTree::new());
    neuron.facade("x", None).unwrap();
    let output = neuron.output().unwrap();

    assert_eq!(
        output,
        concat!(
            "<script src=\"/neuron.js\"></script>",
            "<script async src=\"/x@*/x.js\"></script>",
            "<script>",
            "neuron.config({loaded:[\"x@*\"],graph:{\"x@*\":{}}});",
            "facade('x');",
            "</script>",
        )
    );
}

#[test]
fn test_cyclic_dependencies_terminate() {
    let tree = DependencyTree::new()
        .with_package("a", "*", [("b", "*")])
        .with_package("b", "*", [("a", "*")]);
    let mut neuron = Neuron::new(tree);
    neuron.facade("a", None).unwrap();
    let output = neuron.output().unwrap();

    assert_eq!(output.matches("src=\"/a@*/a.js\"").count(), 1);
    assert_eq!(output.matches("src=\"/b@*/b.js\"").count(), 1);
}

#[test]
fn test_combo_of_unknown_packages_emits_nothing() {
    let mut neuron = Neuron::new(simple_tree());
    neuron.facade("a", None).unwrap();
    neuron.combo(["x", "y"]).unwrap();
    let output = neuron.output().unwrap();

    assert!(!output.contains("x@"));
    assert_eq!(output.matches("<script async").count(), 2);
}

#[test]
fn test_single_surviving_combo_member_is_a_plain_tag() {
    let mut neuron = Neuron::new(simple_tree());
    neuron.facade("a", None).unwrap();
    neuron.combo(["b", "ghost"]).unwrap();
    let output = neuron.output().unwrap();

    assert!(output.contains("<script async src=\"/b@*/b.js\"></script>"));
    assert!(!output.contains("ghost"));
}

#[test]
fn test_output_is_idempotent() {
    let mut neuron = Neuron::new(diamond_tree());
    neuron.facade("a", Some(json!({"a": 1}))).unwrap();
    neuron.combo(["b", "c"]).unwrap();

    let first = neuron.output().unwrap();
    let second = neuron.output().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_registration_after_output_is_ignored() {
    let mut neuron = Neuron::new(simple_tree());
    neuron.facade("a", None).unwrap();
    assert_eq!(neuron.state(), SessionState::Open);

    let first = neuron.output().unwrap();
    assert_eq!(neuron.state(), SessionState::Rendered);

    neuron.facade("b", None).unwrap();
    neuron.combo(["a", "b"]).unwrap();
    assert_eq!(neuron.facades().len(), 1);
    assert!(neuron.combos().is_empty());
    assert_eq!(neuron.output().unwrap(), first);
}

#[test]
fn test_facade_data_is_passed_to_activation() {
    let mut neuron = Neuron::new(simple_tree());
    neuron.facade("home/a.js", Some(json!({"a": 1}))).unwrap();
    neuron.facade("b", Some(serde_json::Value::Null)).unwrap();
    let output = neuron.output().unwrap();

    assert!(output.contains("facade('home/a.js', {\"a\":1});\nfacade('b');"));
}

#[test]
fn test_facade_id_quotes_are_escaped() {
    let mut neuron = Neuron::new(simple_tree());
    neuron.facade("it's", None).unwrap();
    let output = neuron.output().unwrap();
    assert!(output.contains("facade('it\\'s');"));
}

#[test]
fn test_empty_tokens_are_rejected() {
    let mut neuron = Neuron::new(simple_tree());
    let err = neuron.facade("", None).unwrap_err();
    assert!(matches!(err, NeuronError::InvalidInput { .. }));

    let err = neuron.combo(["a", ""]).unwrap_err();
    assert!(matches!(err, NeuronError::InvalidInput { .. }));
    assert!(neuron.combos().is_empty());
}

#[test]
fn test_single_token_combo_is_ignored() {
    let mut neuron = Neuron::new(simple_tree());
    neuron.combo(["a"]).unwrap();
    assert!(neuron.combos().is_empty());
}

#[test]
fn test_debug_output() {
    let mut neuron = Neuron::new(simple_tree()).with_debug(true);
    neuron.facade("a", Some(json!({"x": true}))).unwrap();
    neuron.combo(["a", "b"]).unwrap();
    assert!(neuron.combos().is_empty());

    let output = neuron.output().unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "<script src=\"/neuron.js\"></script>");
    assert_eq!(lines[1], "<script>");
    assert_eq!(lines[2], "neuron.config({loaded:[],graph:{");
    assert_eq!(*lines.last().unwrap(), "</script>");
    assert!(!output.contains("async"));
    assert!(output.contains("\"a@*\": {\n    \"b\": \"*\"\n  }"));
    assert!(output.contains("facade('a', {\n  \"x\": true\n});"));
}

#[test]
fn test_dynamic_debug_is_evaluated_per_output() {
    let flag = Arc::new(AtomicBool::new(false));
    let probe = flag.clone();
    let mut neuron =
        Neuron::new(simple_tree()).with_debug(DebugMode::dynamic(move || probe.load(Ordering::SeqCst)));
    neuron.facade("a", None).unwrap();

    let release = neuron.output().unwrap();
    assert!(release.contains("async"));

    flag.store(true, Ordering::SeqCst);
    let debug = neuron.output().unwrap();
    assert!(!debug.contains("async"));
    assert!(debug.contains('\n'));
}

#[test]
fn test_js_config_pass_through() {
    let mut neuron = Neuron::new(simple_tree()).with_js_config(JsConfig {
        path: Some("'//cdn.example.com'".to_string()),
        resolve: Some(String::new()),
    });
    neuron.facade("a", None).unwrap();
    let output = neuron.output().unwrap();
    assert!(output.contains(",path:'//cdn.example.com'});"));
    assert!(!output.contains("resolve:"));
}

#[test]
fn test_custom_resolver() {
    let mut neuron = Neuron::new(simple_tree()).with_resolver(PrefixResolver::new("/mod", "/concat"));
    neuron.facade("a", None).unwrap();
    neuron.combo(["a", "b"]).unwrap();
    let output = neuron.output().unwrap();
    assert!(output.starts_with("<script src=\"/mod/neuron.js\"></script>"));
    assert!(output.contains("src=\"/concat~mod~a~*~a.js,~mod~b~*~b.js\""));
}

#[test]
fn test_closure_resolver() {
    let mut neuron = Neuron::new(simple_tree()).with_resolver(|resource: Resource<'_>| match resource {
        Resource::Module(id) => format!("//cdn/{id}"),
        Resource::Combo(ids) => format!("//cdn/??{}", ids.join(",")),
    });
    neuron.facade("b", None).unwrap();
    let output = neuron.output().unwrap();
    assert!(output.contains("<script async src=\"//cdn/b@*/b.js\"></script>"));
}

#[test]
fn test_cache_key_ignores_registration_order() {
    let mut first = Neuron::new(simple_tree());
    first.facade("a", None).unwrap();
    first.facade("b", None).unwrap();

    let mut second = Neuron::new(simple_tree());
    second.facade("b", None).unwrap();
    second.facade("a", None).unwrap();

    assert_eq!(first.cache_key(), second.cache_key());
    assert_eq!(first.cache_key().len(), 8);
    assert_eq!(
        first.cache_key(),
        neuron_util::hash::short_hash(b"neuron:0:a,b")
    );
}

#[test]
fn test_cache_key_depends_on_version() {
    let mut stamped = simple_tree();
    stamped.set_version_stamp("2.0.0");
    let mut from_tree = Neuron::new(stamped);
    from_tree.facade("a", None).unwrap();
    assert_eq!(from_tree.version(), "2.0.0");

    let mut overridden = Neuron::new(simple_tree()).with_version("3.0.0");
    overridden.facade("a", None).unwrap();

    assert_ne!(from_tree.cache_key(), overridden.cache_key());
}

#[test]
fn test_output_is_cached_by_key() {
    let cache = Arc::new(MemoryCache::new());

    let mut neuron = Neuron::new(simple_tree()).with_cache(cache.clone());
    neuron.facade("a", None).unwrap();
    let rendered = neuron.output().unwrap();
    assert_eq!(cache.get(&neuron.cache_key()).as_deref(), Some(rendered.as_str()));

    // A second page with the same facades is served from the cache.
    cache.save(&neuron.cache_key(), "cached");
    let mut other = Neuron::new(simple_tree()).with_cache(cache.clone());
    other.facade("a", None).unwrap();
    assert_eq!(other.output().unwrap(), "cached");
}

#[test]
fn test_cache_key_ignores_debug_mode() {
    let mut release = Neuron::new(simple_tree()).with_debug(false);
    release.facade("a", None).unwrap();
    let mut debug = Neuron::new(simple_tree()).with_debug(true);
    debug.facade("a", None).unwrap();

    assert_eq!(release.cache_key(), debug.cache_key());
}

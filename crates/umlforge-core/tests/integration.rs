//! End-to-end scenarios and cross-cutting invariants from spec.md §8,
//! exercised through the public `Facade` API only.

#![allow(clippy::unwrap_used)]

use umlforge_core::{Facade, GeneratorRegistry};

fn src(filename: &str, code: &str) -> (String, String) {
    (filename.to_string(), code.to_string())
}

#[test]
fn single_class() {
    let facade = Facade::new();
    let result = facade.convert(vec![src(
        "A.java",
        "public class A { private int x; public void f(){} }",
    )]);
    let class = &result.diagrams["class"];
    assert!(class.contains("class A {"));
    assert!(class.contains("-x : int"));
    assert!(class.contains("  --"));
    assert!(class.contains("+f() : void"));
    assert!(class.contains("}"));
    assert!(!class.contains("<|--"));
    assert!(!class.contains("<|.."));
}

#[test]
fn inheritance_and_interface() {
    let facade = Facade::new();
    let result = facade.convert(vec![
        src("Base.java", "public class Base{}"),
        src("Iface.java", "public interface Iface{}"),
        src("Sub.java", "public class Sub extends Base implements Iface{}"),
    ]);
    let class = &result.diagrams["class"];
    assert!(class.contains("Base <|-- Sub"));
    assert!(class.contains("Iface <|.. Sub"));
}

#[test]
fn service_detection() {
    let facade = Facade::new();
    let result = facade.convert(vec![
        src(
            "UserService.java",
            "public class UserService { public User get(String id){return null;} }",
        ),
        src("User.java", "public class User {}"),
    ]);
    let usecase = &result.diagrams["usecase"];
    assert!(usecase.contains("actor \"User\" as User"));
    assert!(usecase.contains("rectangle \"UserService\" {"));
    assert!(usecase.contains("usecase \"Get\" as UserService_get"));
    assert!(usecase.contains("User --> UserService_get"));
}

#[test]
fn flow_if_else() {
    let facade = Facade::new();
    let result = facade.convert(vec![src(
        "F.java",
        "class F { void f(int x){ if(x>0){return;} else { x=0; } } }",
    )]);
    let flow = &result.diagrams["flow"];
    assert!(flow.contains("if (x > 0) then (yes)"));
    assert!(flow.contains(":Return;"));
    assert!(flow.contains("else (no)"));
    assert!(flow.contains(":x = 0;"));
    assert!(flow.contains("endif"));
}

#[test]
fn parse_failure_mixed() {
    let facade = Facade::new();
    let result = facade.convert(vec![
        src("good.java", "public class Good { public void f(){} }"),
        src("bad.java", "this is not java"),
    ]);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("bad.java:"));
    assert!(result.diagrams["class"].contains("Good"));
}

#[test]
fn eviction_after_129_inserts() {
    let facade = Facade::new();
    for i in 0..129 {
        facade.convert(vec![src(&format!("F{i}.java"), &format!("class C{i} {{}}"))]);
    }
    // fp for input 0 should have been evicted; re-submitting it should miss
    // the cache and still succeed (a fresh parse, not a panic/error).
    let result = facade.convert(vec![src("F0.java", "class C0 {}")]);
    assert!(result.diagrams["class"].contains("C0"));
}

#[test]
fn touching_protects_from_eviction() {
    let facade = Facade::new();
    for i in 0..128 {
        facade.convert(vec![src(&format!("G{i}.java"), &format!("class D{i} {{}}"))]);
    }
    // Touch entry 0 again (cache hit, promotes to MRU).
    facade.convert(vec![src("G0.java", "class D0 {}")]);
    // One more distinct insert should now evict entry 1, not entry 0.
    facade.convert(vec![src("G128.java", "class D128 {}")]);
    let result = facade.convert(vec![src("G0.java", "class D0 {}")]);
    assert!(result.diagrams["class"].contains("D0"));
}

#[test]
fn order_independent_fingerprint_hits_same_cache_entry() {
    let facade = Facade::new();
    let forward = vec![
        src("A.java", "class A {}"),
        src("B.java", "class B {}"),
    ];
    let backward = vec![
        src("B.java", "class B {}"),
        src("A.java", "class A {}"),
    ];
    let first = facade.convert(forward);
    let second = facade.convert(backward);
    assert_eq!(first.diagrams, second.diagrams);
    assert_eq!(first.sources.len(), second.sources.len());
}

#[test]
fn empty_aggregate_has_empty_diagrams_but_present_keys() {
    let facade = Facade::new();
    let result = facade.convert(vec![src("bad.java", "not java at all")]);
    assert_eq!(result.diagrams.len(), 3);
    assert!(result.diagrams.values().all(|d| d.is_empty()));
}

#[test]
fn unknown_generator_is_surfaced() {
    let registry = GeneratorRegistry::with_default_generators();
    let err = registry.create("sequence").unwrap_err();
    assert!(err.to_string().contains("sequence"));
}

#[test]
fn custom_generator_registration_extends_the_registry() {
    struct EchoGenerator;
    impl umlforge_core::DiagramGenerator for EchoGenerator {
        fn diagram_type(&self) -> &'static str {
            "echo"
        }
        fn body(&self, classes: &[umlforge_core::ClassInfo]) -> Vec<String> {
            vec![format!("{} classes", classes.len())]
        }
    }

    let mut registry = GeneratorRegistry::with_default_generators();
    registry.register("echo", || Box::new(EchoGenerator));
    assert_eq!(registry.available(), vec!["class", "usecase", "flow", "echo"]);

    let facade = Facade::with_registry(registry);
    let result = facade.convert(vec![src("A.java", "class A {}")]);
    assert_eq!(result.diagrams["echo"], "@startuml\n\n1 classes\n@enduml");
}

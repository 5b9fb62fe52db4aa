use tsbindgen_naming::{PrimitiveLift, TypeMap};

#[test]
fn core_primitives_map_to_builtins() {
    let map = TypeMap::new();
    assert_eq!(map.try_map_builtin("System.Boolean"), Some("boolean"));
    assert_eq!(map.try_map_builtin("System.Int32"), Some("number"));
    assert_eq!(map.try_map_builtin("System.Int64"), Some("bigint"));
    assert_eq!(map.try_map_builtin("System.String"), Some("string"));
    assert_eq!(map.try_map_builtin("System.Void"), Some("void"));
    assert_eq!(map.try_map_builtin("Acme.Widget"), None);
}

#[test]
fn generic_builtins_instantiate_templates() {
    let map = TypeMap::new();
    assert_eq!(
        map.try_map_generic("System.Nullable`1", &["number".to_string()]),
        Some("number | null".to_string())
    );
    assert_eq!(
        map.try_map_generic("System.Threading.Tasks.Task`1", &["string".to_string()]),
        Some("Promise<string>".to_string())
    );
    assert_eq!(
        map.try_map_generic(
            "System.Collections.Generic.Dictionary`2",
            &["string".to_string(), "number".to_string()]
        ),
        Some("Map<string, number>".to_string())
    );
    assert_eq!(map.try_map_generic("Acme.Box`1", &["string".to_string()]), None);
}

#[test]
fn lift_table_covers_every_generic_builtin_position() {
    let lift = PrimitiveLift::new();
    assert!(lift.covers("System.Nullable`1", 0));
    assert!(lift.covers("System.Collections.Generic.Dictionary`2", 1));
    assert!(!lift.covers("System.Nullable`1", 1));
    assert!(lift.lift_positions("Acme.Box`1").is_none());
}

#[test]
fn primitive_classification() {
    let map = TypeMap::new();
    assert!(map.is_primitive("System.Int32"));
    assert!(map.is_primitive("System.String"));
    assert!(!map.is_primitive("System.Object"));
    assert!(!map.is_primitive("Acme.Widget"));
}

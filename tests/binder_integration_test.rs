//! Integration tests for struct binding against a parsed configuration file

use arbor::adapters::FileProvider;
use arbor::bindable;
use arbor::domain::StoreError;
use arbor::store::TreeStore;
use std::collections::HashMap;

const CONFIG: &str = r#"
# integration fixture
[test]
test.int = 1020
test.string = "my name string"
test.bool = true
test.float.32 = 102.00
test.float.64 = 100.04324323

[comp]
comp.struct.int = 55
comp.struct.string = stringv
comp.struct.bool = 1
comp.struct.float32 = 101.101
comp.struct.float64 = 1011.1011
comp.struct.struct.string = ReString
comp.struct.struct.bools = true;false

comp.array.ints = 1;2;3;4;5
comp.array.strings = my;name;string
comp.array.bools = t;0
comp.array.float32 = 1;2;10.1
comp.array.float64 = 11.11;22.22
comp.array.0.struct.string = first
comp.array.0.struct.bools = true
comp.array.1.struct.string = second
comp.array.1.struct.bools = false;true

comp.map.alpha = a
comp.map.beta = b

[wmds]
wmds.wxoauth2.redirects.home = /index
wmds.wxoauth2.redirects.login = /auth

[map]
map.struct.key1.field1 = k1f1
map.struct.key1.field2 = k1f2
map.struct.key2.field1 = k2f1
map.struct.key2.field2 = k2f2
"#;

#[derive(Debug, Default, Clone, PartialEq)]
struct InlineValue {
    in_string: String,
    in_bools: Vec<bool>,
}

bindable!(InlineValue {
    scalar in_string: "struct.string",
    list in_bools: "struct.bools",
});

#[derive(Debug, Default, Clone, PartialEq)]
struct MapStruct {
    field1: String,
    field2: String,
}

bindable!(MapStruct {
    scalar field1: "",
    scalar field2: "",
});

#[derive(Debug, Default)]
struct CustomConfig {
    int_value: i32,
    string_value: String,
    omit_value: bool,
    bool_value: bool,
    float32_value: f32,
    float64_value: f64,
    string_def_value: String,
    inline_value: Option<InlineValue>,
    inline_array: Vec<InlineValue>,
    inline_boxed_array: Vec<Box<InlineValue>>,
    map_value: HashMap<String, String>,
    omit_inline: Option<InlineValue>,
    another_map: HashMap<String, String>,
    map_struct: HashMap<String, MapStruct>,
    map_struct_boxed: HashMap<String, Box<MapStruct>>,
}

bindable!(CustomConfig {
    scalar int_value: "comp.struct.int",
    scalar string_value: "comp.struct.string",
    scalar omit_value: "comp.struct.omit,omit",
    scalar bool_value: "comp.struct.bool",
    scalar float32_value: "comp.struct.float32",
    scalar float64_value: "comp.struct.float64",
    scalar string_def_value: "comp.string.def,default(defaultvalue)",
    optional inline_value: "comp.struct",
    struct_list inline_array: "comp.array",
    struct_list inline_boxed_array: "comp.array",
    map map_value: "comp.map",
    optional omit_inline: "comp.omit,omit",
    map another_map: "wmds.wxoauth2.redirects",
    struct_map map_struct: "map.struct",
    struct_map map_struct_boxed: "map.struct",
});

fn fixture() -> TreeStore {
    FileProvider::parse_contents(CONFIG).expect("fixture parses")
}

#[test]
fn test_typed_accessors_on_fixture() {
    let store = fixture();

    assert_eq!(store.get_i32("test.int", None).unwrap(), 1020);
    assert_eq!(store.get_string("test.string", None).unwrap(), "my name string");
    assert!(store.get_bool("test.bool", None).unwrap());
    assert_eq!(store.get_f32("test.float.32", None).unwrap(), 102.0);
    assert_eq!(store.get_f64("test.float.64", None).unwrap(), 100.04324323);

    assert_eq!(
        store.get_i32s("comp.array.ints", None).unwrap(),
        vec![1, 2, 3, 4, 5]
    );
    assert_eq!(
        store.get_strings("comp.array.strings", None).unwrap(),
        vec!["my", "name", "string"]
    );
    assert_eq!(
        store.get_bools("comp.array.bools", None).unwrap(),
        vec![true, false]
    );
    assert_eq!(
        store.get_f32s("comp.array.float32", None).unwrap(),
        vec![1.0, 2.0, 10.1]
    );
    assert_eq!(
        store.get_f64s("comp.array.float64", None).unwrap(),
        vec![11.11, 22.22]
    );
}

#[test]
fn test_bind_full_config() {
    let store = fixture();
    let mut cfg = CustomConfig::default();
    store.bind(&mut cfg).unwrap();

    assert_eq!(cfg.int_value, 55);
    assert_eq!(cfg.string_value, "stringv");
    assert!(!cfg.omit_value);
    assert!(cfg.bool_value);
    assert_eq!(cfg.float32_value, 101.101);
    assert_eq!(cfg.float64_value, 1011.1011);
    assert_eq!(cfg.string_def_value, "defaultvalue");

    let inline = cfg.inline_value.as_ref().unwrap();
    assert_eq!(inline.in_string, "ReString");
    assert_eq!(inline.in_bools, vec![true, false]);

    assert_eq!(cfg.inline_array.len(), 2);
    assert_eq!(cfg.inline_array[0].in_string, "first");
    assert_eq!(cfg.inline_array[1].in_bools, vec![false, true]);
    assert_eq!(cfg.inline_boxed_array.len(), 2);
    assert_eq!(*cfg.inline_boxed_array[1], cfg.inline_array[1]);

    assert_eq!(cfg.map_value.len(), 2);
    assert_eq!(cfg.map_value["alpha"], "a");
    assert!(cfg.omit_inline.is_none());
    assert_eq!(cfg.another_map["login"], "/auth");

    assert_eq!(cfg.map_struct.len(), 2);
    assert_eq!(
        cfg.map_struct["key1"],
        MapStruct {
            field1: "k1f1".to_string(),
            field2: "k1f2".to_string(),
        }
    );
    assert_eq!(cfg.map_struct_boxed["key2"].field2, "k2f2");
}

#[test]
fn test_struct_list_gap_is_reported() {
    let store = fixture();
    store.set("comp.array.3.struct.string", "gap").unwrap();
    store.set("comp.array.3.struct.bools", "true").unwrap();

    let mut cfg = CustomConfig::default();
    let err = store.bind(&mut cfg).unwrap_err();
    assert!(matches!(err, StoreError::ListGap { index: 2, .. }));
}

#[test]
fn test_struct_map_error_names_entry() {
    let store = fixture();
    store.delete("map.struct.key2.field2").unwrap();

    let mut cfg = CustomConfig::default();
    let err = store.bind(&mut cfg).unwrap_err();
    match err {
        StoreError::Nested { path, source } => {
            assert_eq!(path, "map.struct.key2");
            assert_eq!(*source, StoreError::not_found("field2"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_omit_does_not_swallow_conversion_errors() {
    let store = fixture();

    #[derive(Default)]
    struct Strict {
        retries: u8,
    }
    bindable!(Strict {
        scalar retries: "comp.struct.string,omit",
    });

    let mut strict = Strict::default();
    let err = store.bind(&mut strict).unwrap_err();
    assert!(matches!(err, StoreError::ConversionFailed { .. }));
    assert_eq!(strict.retries, 0);
}

#[test]
fn test_nested_field_paths_resolve_under_parent() {
    #[derive(Default)]
    struct Pool {
        size: u32,
        idle: u32,
    }
    bindable!(Pool {
        scalar size: "",
        scalar idle: "IDLE,default(2)",
    });

    #[derive(Default)]
    struct Database {
        pool: Pool,
    }
    bindable!(Database {
        nested pool: "db.pool",
    });

    let store = TreeStore::new();
    store.set("db.pool.size", "16").unwrap();

    let mut db = Database::default();
    store.bind(&mut db).unwrap();
    assert_eq!(db.pool.size, 16);
    assert_eq!(db.pool.idle, 2);
}

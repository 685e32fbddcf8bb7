//! JSON Schema generation for tool inputs and outputs.

/// Cached schema generation using Draft 2020-12 with nullable options.
///
/// MCP requires Draft 2020-12. `Option<T>` fields get `nullable: true`, and
/// integer formats that clients reject (`uint32` and friends) are stripped.
/// Schemas are cached per thread, keyed by `TypeId`.
pub mod mcp_schema {
    use schemars::generate::SchemaSettings;
    use schemars::transform::{AddNullable, RestrictFormats, Transform};
    use schemars::{JsonSchema, Schema};
    use serde_json::{Map, Value};
    use std::any::TypeId;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::sync::Arc;

    thread_local! {
        static CACHE_FOR_TYPE: RefCell<HashMap<TypeId, Arc<Schema>>> = RefCell::new(HashMap::new());
        static CACHE_FOR_OUTPUT: RefCell<HashMap<TypeId, Result<Arc<Schema>, String>>> = RefCell::new(HashMap::new());
    }

    /// Rewrites `{"const": null, "nullable": true}` (no type) to `{"type": "null"}`.
    #[derive(Clone, Copy, Default)]
    struct SanitizeNullBranches;

    impl Transform for SanitizeNullBranches {
        fn transform(&mut self, schema: &mut Schema) {
            if let Some(map) = schema.as_object_mut() {
                sanitize_map(map);
            }
        }
    }

    fn sanitize_map(map: &mut Map<String, Value>) {
        let nullable = map.get("nullable").and_then(Value::as_bool) == Some(true);
        let const_null = map.get("const").is_some_and(Value::is_null);
        if nullable && const_null && !map.contains_key("type") {
            map.remove("const");
            map.remove("nullable");
            map.insert("type".to_string(), Value::String("null".to_string()));
        }
        for value in map.values_mut() {
            sanitize_value(value);
        }
    }

    fn sanitize_value(node: &mut Value) {
        match node {
            Value::Object(map) => sanitize_map(map),
            Value::Array(items) => items.iter_mut().for_each(sanitize_value),
            _ => {}
        }
    }

    fn settings() -> SchemaSettings {
        SchemaSettings::draft2020_12()
            .with_transform(AddNullable::default())
            .with_transform(RestrictFormats::default())
            .with_transform(SanitizeNullBranches)
    }

    /// Generate (or fetch the cached) schema for `T`.
    pub fn cached_schema_for<T: JsonSchema + 'static>() -> Arc<Schema> {
        CACHE_FOR_TYPE.with(|cache| {
            let mut cache = cache.borrow_mut();
            if let Some(x) = cache.get(&TypeId::of::<T>()) {
                return Arc::clone(x);
            }
            let root = settings().into_generator().into_root_schema_for::<T>();
            let arc = Arc::new(root);
            cache.insert(TypeId::of::<T>(), Arc::clone(&arc));
            arc
        })
    }

    /// Generate the output schema for `T`, which must have an object root.
    ///
    /// # Errors
    ///
    /// Returns a description of the root type when it is not `object`.
    pub fn cached_output_schema_for<T: JsonSchema + 'static>() -> Result<Arc<Schema>, String> {
        CACHE_FOR_OUTPUT.with(|cache| {
            if let Some(r) = cache.borrow().get(&TypeId::of::<T>()) {
                return r.clone();
            }
            let root = cached_schema_for::<T>();
            let result = match root.get("type") {
                Some(Value::String(t)) if t == "object" => Ok(Arc::clone(&root)),
                Some(Value::String(t)) => Err(format!(
                    "output_schema root type must be 'object', found '{t}'"
                )),
                None if root.get("properties").is_some() => Ok(Arc::clone(&root)),
                None => Err("output_schema is missing a root 'type'".to_string()),
                Some(other) => Err(format!("unexpected 'type' value: {other}")),
            };
            cache.borrow_mut().insert(TypeId::of::<T>(), result.clone());
            result
        })
    }
}

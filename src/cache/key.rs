//! Cache key derivation.
//!
//! A cache key is `function_name + ":" + canonical JSON of the arguments`.
//! Serializing through [`serde_json::to_value`] first normalizes objects into
//! sorted-key maps, so two argument values that differ only in field
//! insertion order derive the same key. `None` fields are emitted as `null`,
//! which keeps the encoding total over the argument shapes the dashboard
//! uses (primitives, arrays, flat records).

use serde::Serialize;

/// Separator between the function-name portion and the argument portion.
pub const KEY_SEPARATOR: char = ':';

/// Derives the cache key for a named fetch function and its arguments.
pub fn cache_key<A: Serialize>(name: &str, args: &A) -> Result<String, serde_json::Error> {
    let canonical = serde_json::to_value(args)?;
    Ok(format!("{name}{KEY_SEPARATOR}{canonical}"))
}

/// Extracts the function-name portion of a key.
///
/// Invalidation patterns match against this portion only, so one pattern can
/// purge every parameterized variant of the same read function.
pub fn function_name(key: &str) -> &str {
    key.split_once(KEY_SEPARATOR).map_or(key, |(name, _)| name)
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::*;

    #[test]
    fn key_includes_name_and_arguments() {
        let key = cache_key("get_meal", &42u64).unwrap();
        assert_eq!(key, "get_meal:42");
    }

    #[test]
    fn nullary_arguments_serialize_as_null() {
        let key = cache_key("get_dashboard_stats", &()).unwrap();
        assert_eq!(key, "get_dashboard_stats:null");
    }

    #[test]
    fn object_key_order_does_not_change_the_key() {
        let a = json!({"food_group": "go", "search": "rice"});
        let b = json!({"search": "rice", "food_group": "go"});

        let key_a = cache_key("get_all_meals", &a).unwrap();
        let key_b = cache_key("get_all_meals", &b).unwrap();
        assert_eq!(key_a, key_b);
    }

    #[test]
    fn none_fields_emit_null() {
        #[derive(Serialize)]
        struct Filter {
            search: Option<String>,
        }

        let key = cache_key("get_all_meals", &Filter { search: None }).unwrap();
        assert_eq!(key, r#"get_all_meals:{"search":null}"#);
    }

    #[test]
    fn function_name_splits_on_first_separator() {
        assert_eq!(function_name("get_all_meals:{\"a\":1}"), "get_all_meals");
        assert_eq!(function_name("get_meal:\"a:b\""), "get_meal");
        assert_eq!(function_name("bare_key"), "bare_key");
    }
}

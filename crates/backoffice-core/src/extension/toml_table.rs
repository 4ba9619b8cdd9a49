use toml::value::{Array, Table};

/// Extension trait for [`Table`](toml::Table).
pub trait TomlTableExt {
    /// Extracts the boolean value corresponding to the key.
    fn get_bool(&self, key: &str) -> Option<bool>;

    /// Extracts the integer value corresponding to the key.
    fn get_i64(&self, key: &str) -> Option<i64>;

    /// Extracts the string corresponding to the key.
    fn get_str(&self, key: &str) -> Option<&str>;

    /// Extracts the array corresponding to the key.
    fn get_array(&self, key: &str) -> Option<&Array>;

    /// Extracts the array value corresponding to the key and parses it as `Vec<&str>`.
    fn get_str_array(&self, key: &str) -> Option<Vec<&str>>;

    /// Extracts the table corresponding to the key.
    fn get_table(&self, key: &str) -> Option<&Table>;
}

impl TomlTableExt for Table {
    #[inline]
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    #[inline]
    fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.as_integer())
    }

    #[inline]
    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    #[inline]
    fn get_array(&self, key: &str) -> Option<&Array> {
        self.get(key).and_then(|v| v.as_array())
    }

    #[inline]
    fn get_str_array(&self, key: &str) -> Option<Vec<&str>> {
        self.get_array(key)
            .map(|values| values.iter().filter_map(|v| v.as_str()).collect())
    }

    #[inline]
    fn get_table(&self, key: &str) -> Option<&Table> {
        self.get(key).and_then(|v| v.as_table())
    }
}

#[cfg(test)]
mod tests {
    use super::TomlTableExt;
    use toml::Table;

    #[test]
    fn it_extracts_config_values() {
        let config = r#"
            [i18n]
            default-locale = "zh-CN"
            fallback-locales = ["en-US", 1]

            [tracing]
            display-target = false
        "#
        .parse::<Table>()
        .unwrap();
        let i18n = config.get_table("i18n").unwrap();
        assert_eq!(i18n.get_str("default-locale"), Some("zh-CN"));
        assert_eq!(i18n.get_str_array("fallback-locales"), Some(vec!["en-US"]));

        let tracing = config.get_table("tracing").unwrap();
        assert_eq!(tracing.get_bool("display-target"), Some(false));
        assert_eq!(tracing.get_i64("display-target"), None);
        assert!(config.get_table("state").is_none());
    }
}

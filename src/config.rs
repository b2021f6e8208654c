use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;

/// Options handed to the plugin through the host's JSON plugin config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PluginOptions {
    /// Callee names treated as higher-order component factories: `hoc(opts)(Inner)`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hoc: Vec<String>,
    pub transforms: Vec<TransformSpec>,
}

/// One entry of the `transforms` array. Order is wiring order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransformSpec {
    /// Module the transform factory is default-imported from.
    pub transform: String,
    /// Names of existing local bindings forwarded to the factory.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub locals: Vec<String>,
    /// Extra modules default-imported and forwarded to the factory.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub imports: Vec<String>,
}

/// `null` lists read as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl PluginOptions {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        let obj = value.as_object().ok_or(ConfigError::NotAnObject)?;
        match obj.get("transforms") {
            Some(serde_json::Value::Array(_)) => {}
            _ => return Err(ConfigError::MissingTransforms),
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn is_hoc(&self, name: &str) -> bool {
        self.hoc.iter().any(|h| h == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fills_defaults_for_optional_fields() {
        let opts = PluginOptions::from_json(r#"{"transforms":[{"transform":"hmr"}]}"#).unwrap();
        assert_eq!(
            opts,
            PluginOptions {
                hoc: vec![],
                transforms: vec![TransformSpec {
                    transform: "hmr".into(),
                    locals: vec![],
                    imports: vec![],
                }],
            }
        );
    }

    #[test]
    fn null_lists_read_as_empty() {
        let opts = PluginOptions::from_json(
            r#"{"hoc":null,"transforms":[{"transform":"t","locals":null,"imports":null}]}"#,
        )
        .unwrap();
        assert!(opts.hoc.is_empty());
        assert!(opts.transforms[0].locals.is_empty());
        assert!(opts.transforms[0].imports.is_empty());
    }

    #[test]
    fn keeps_configured_order() {
        let opts = PluginOptions::from_json(
            r#"{
                "hoc": ["connect"],
                "transforms": [
                    {"transform": "a", "locals": ["module"]},
                    {"transform": "b", "imports": ["react"]}
                ]
            }"#,
        )
        .unwrap();
        assert!(opts.is_hoc("connect"));
        assert!(!opts.is_hoc("component"));
        let names: Vec<_> = opts.transforms.iter().map(|t| t.transform.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(opts.transforms[0].locals, ["module"]);
        assert_eq!(opts.transforms[1].imports, ["react"]);
    }

    #[test]
    fn empty_transforms_is_valid() {
        let opts = PluginOptions::from_json(r#"{"transforms":[]}"#).unwrap();
        assert!(opts.transforms.is_empty());
    }

    #[test]
    fn rejects_missing_transforms() {
        assert!(matches!(
            PluginOptions::from_json("{}"),
            Err(ConfigError::MissingTransforms)
        ));
    }

    #[test]
    fn rejects_non_array_transforms() {
        assert!(matches!(
            PluginOptions::from_json(r#"{"transforms":"not-an-array"}"#),
            Err(ConfigError::MissingTransforms)
        ));
    }

    #[test]
    fn rejects_non_object_options() {
        assert!(matches!(
            PluginOptions::from_json("[]"),
            Err(ConfigError::NotAnObject)
        ));
        assert!(matches!(
            PluginOptions::from_json("not json"),
            Err(ConfigError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_malformed_entries() {
        let err = PluginOptions::from_json(r#"{"transforms":[{"locals":[]}]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
        assert!(err.to_string().starts_with("invalid component transform options"));
    }
}

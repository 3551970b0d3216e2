use serde::{Deserialize, Deserializer, Serialize};

/// One node of an input dataset tree. Leaves carry `value`; internal nodes
/// only group their children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataNode {
    pub name: String,
    #[serde(
        default,
        deserialize_with = "deserialize_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DataNode>,
}

impl DataNode {
    pub fn leaf(name: impl Into<String>, category: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            category: Some(category.into()),
            children: Vec::new(),
        }
    }

    pub fn branch(name: impl Into<String>, children: Vec<DataNode>) -> Self {
        Self {
            name: name.into(),
            value: None,
            category: None,
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Text(String),
}

// Some sources export values as numeric strings ("20338986.27").
fn deserialize_value<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawValue::Number(value)) => Ok(Some(value)),
        Some(RawValue::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("invalid numeric value `{text}`")))
        }
    }
}

/// A named, described dataset selectable by key.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub key: String,
    pub title: String,
    pub description: String,
    pub root: DataNode,
}

impl Dataset {
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        root: DataNode,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            description: description.into(),
            root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_and_string_values() {
        let json = r#"{
            "name": "root",
            "children": [
                { "name": "A", "category": "x", "value": 12.5 },
                { "name": "B", "category": "x", "value": "7.25" }
            ]
        }"#;
        let node: DataNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.value, None);
        assert_eq!(node.children[0].value, Some(12.5));
        assert_eq!(node.children[1].value, Some(7.25));
        assert!(node.children[1].is_leaf());
    }

    #[test]
    fn rejects_non_numeric_string_value() {
        let json = r#"{ "name": "A", "value": "lots" }"#;
        assert!(serde_json::from_str::<DataNode>(json).is_err());
    }

    #[test]
    fn missing_and_null_values_are_none() {
        let a: DataNode = serde_json::from_str(r#"{ "name": "A" }"#).unwrap();
        let b: DataNode = serde_json::from_str(r#"{ "name": "B", "value": null }"#).unwrap();
        assert_eq!(a.value, None);
        assert_eq!(b.value, None);
    }
}

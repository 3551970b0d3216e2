use crate::ir::{DataNode, Dataset};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to parse dataset `{key}`: {message}")]
    Parse { key: String, message: String },
}

/// Parses a dataset document. Strict JSON first, then JSON5 for
/// hand-edited files with comments or trailing commas.
pub fn parse_data_node(key: &str, input: &str) -> Result<DataNode, DatasetError> {
    match serde_json::from_str::<DataNode>(input) {
        Ok(node) => Ok(node),
        Err(json_err) => json5::from_str::<DataNode>(input).map_err(|json5_err| {
            DatasetError::Parse {
                key: key.to_string(),
                message: format!("{json_err}; as JSON5: {json5_err}"),
            }
        }),
    }
}

const BUNDLED: [(&str, &str, &str, &str); 3] = [
    (
        "videogames",
        "Video Game Sales",
        "Top Selling Video Games Grouped by Platform (millions of units)",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/videogames.json")),
    ),
    (
        "movies",
        "Movie Sales",
        "Highest Grossing Movies Grouped by Genre (US dollars)",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/movies.json")),
    ),
    (
        "kickstarter",
        "Kickstarter Pledges",
        "Most Pledged Kickstarter Campaigns Grouped by Category (US dollars)",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/kickstarter.json")),
    ),
];

/// Dispatch table from dataset key to dataset, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct DatasetCatalog {
    datasets: Vec<Dataset>,
}

impl DatasetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The datasets compiled into the crate.
    pub fn bundled() -> Result<Self, DatasetError> {
        let mut catalog = Self::new();
        for (key, title, description, source) in BUNDLED {
            let root = parse_data_node(key, source)?;
            catalog.insert(Dataset::new(key, title, description, root));
        }
        Ok(catalog)
    }

    /// Adds a dataset, replacing any existing one with the same key.
    pub fn insert(&mut self, dataset: Dataset) {
        match self.datasets.iter_mut().find(|d| d.key == dataset.key) {
            Some(slot) => *slot = dataset,
            None => self.datasets.push(dataset),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.datasets.iter().map(|d| d.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.iter()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::build;

    #[test]
    fn bundled_datasets_parse_and_build() {
        let catalog = DatasetCatalog::bundled().unwrap();
        let keys: Vec<&str> = catalog.keys().collect();
        assert_eq!(keys, ["videogames", "movies", "kickstarter"]);
        for dataset in catalog.iter() {
            let tree = build(&dataset.root).unwrap();
            assert!(tree.top_level().len() > 1, "{}", dataset.key);
            assert!(tree.root().value > 0.0, "{}", dataset.key);
        }
    }

    #[test]
    fn json5_fallback_accepts_comments() {
        let input = r#"{
            // hand written
            name: "root",
            children: [ { name: "A", category: "x", value: 1, }, ],
        }"#;
        let node = parse_data_node("custom", input).unwrap();
        assert_eq!(node.children[0].value, Some(1.0));
    }

    #[test]
    fn parse_error_names_the_dataset() {
        let err = parse_data_node("broken", "{ not json").unwrap_err();
        assert!(err.to_string().contains("`broken`"));
    }

    #[test]
    fn insert_replaces_by_key() {
        let mut catalog = DatasetCatalog::new();
        let root = DataNode::branch("r", vec![DataNode::leaf("a", "c", 1.0)]);
        catalog.insert(Dataset::new("k", "One", "", root.clone()));
        catalog.insert(Dataset::new("k", "Two", "", root));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("k").unwrap().title, "Two");
        assert!(!catalog.contains("missing"));
    }
}

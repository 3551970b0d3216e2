use std::collections::HashMap;

/// Ordinal colour scale: the first key requested gets the first palette
/// colour, the next new key the second, wrapping around once the palette
/// runs out. Assignments are kept for the scale's lifetime.
#[derive(Debug, Clone)]
pub struct ColorScale {
    palette: Vec<String>,
    domain: Vec<String>,
    index: HashMap<String, usize>,
}

impl ColorScale {
    pub fn new(palette: Vec<String>) -> Self {
        let palette = if palette.is_empty() {
            vec!["#cccccc".to_string()]
        } else {
            palette
        };
        Self {
            palette,
            domain: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn color(&mut self, key: &str) -> &str {
        let slot = match self.index.get(key) {
            Some(slot) => *slot,
            None => {
                let slot = self.domain.len();
                self.domain.push(key.to_string());
                self.index.insert(key.to_string(), slot);
                slot
            }
        };
        &self.palette[slot % self.palette.len()]
    }

    /// Colour already assigned to `key`, without assigning a new one.
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|slot| self.palette[slot % self.palette.len()].as_str())
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

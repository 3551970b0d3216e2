use crate::config::{LabelConfig, LabelStrategyKind};
use regex::Regex;
use std::fmt::Debug;

/// Turns a tile name into the lines drawn inside the tile.
pub trait LabelStrategy: Debug {
    fn lines(&self, name: &str) -> Vec<String>;
}

/// Starts a new line before every ASCII capital that is followed by a
/// non-capital ("Wii Sports" -> "Wii", "Sports"). Listed names are kept whole.
#[derive(Debug, Clone, Default)]
pub struct CapitalBoundary {
    pub unsplittable: Vec<String>,
}

impl LabelStrategy for CapitalBoundary {
    fn lines(&self, name: &str) -> Vec<String> {
        if self.unsplittable.iter().any(|token| token == name.trim()) {
            return vec![name.trim().to_string()];
        }
        let chars: Vec<(usize, char)> = name.char_indices().collect();
        let mut lines = Vec::new();
        let mut start = 0;
        for (pos, &(idx, ch)) in chars.iter().enumerate() {
            if idx == 0 || !ch.is_ascii_uppercase() {
                continue;
            }
            let Some(&(_, next)) = chars.get(pos + 1) else {
                continue;
            };
            if !next.is_ascii_uppercase() {
                push_trimmed(&mut lines, &name[start..idx]);
                start = idx;
            }
        }
        push_trimmed(&mut lines, &name[start..]);
        lines
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Whitespace;

impl LabelStrategy for Whitespace {
    fn lines(&self, name: &str) -> Vec<String> {
        name.split_whitespace().map(str::to_string).collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Whole;

impl LabelStrategy for Whole {
    fn lines(&self, name: &str) -> Vec<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed.to_string()]
        }
    }
}

/// Splits on every match of a user supplied pattern.
#[derive(Debug, Clone)]
pub struct PatternSplit {
    pattern: Regex,
}

impl PatternSplit {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl LabelStrategy for PatternSplit {
    fn lines(&self, name: &str) -> Vec<String> {
        let mut lines = Vec::new();
        for part in self.pattern.split(name) {
            push_trimmed(&mut lines, part);
        }
        lines
    }
}

fn push_trimmed(lines: &mut Vec<String>, part: &str) {
    let part = part.trim();
    if !part.is_empty() {
        lines.push(part.to_string());
    }
}

pub fn strategy_from_config(config: &LabelConfig) -> Result<Box<dyn LabelStrategy>, regex::Error> {
    Ok(match config.strategy {
        LabelStrategyKind::CapitalBoundary => Box::new(CapitalBoundary {
            unsplittable: config.unsplittable.clone(),
        }),
        LabelStrategyKind::Whitespace => Box::new(Whitespace),
        LabelStrategyKind::Whole => Box::new(Whole),
        LabelStrategyKind::Pattern => {
            Box::new(PatternSplit::new(config.pattern.as_deref().unwrap_or(r"\s+"))?)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capital_boundary_splits_words() {
        let strategy = CapitalBoundary::default();
        assert_eq!(strategy.lines("Wii Sports Resort"), ["Wii", "Sports", "Resort"]);
        assert_eq!(strategy.lines("New Super Mario Bros."), ["New", "Super", "Mario", "Bros."]);
    }

    #[test]
    fn capital_boundary_keeps_lowercase_runs_together() {
        let strategy = CapitalBoundary::default();
        assert_eq!(strategy.lines("Call of Duty"), ["Call of", "Duty"]);
        assert_eq!(strategy.lines("the witcher"), ["the witcher"]);
    }

    #[test]
    fn capital_boundary_splits_inside_acronyms() {
        // The heuristic is known to break acronyms; unsplittable names avoid it.
        let strategy = CapitalBoundary::default();
        assert_eq!(strategy.lines("FIFA 16"), ["FIF", "A 16"]);

        let strategy = CapitalBoundary {
            unsplittable: vec!["FIFA 16".to_string()],
        };
        assert_eq!(strategy.lines("FIFA 16"), ["FIFA 16"]);
    }

    #[test]
    fn other_strategies() {
        assert_eq!(Whitespace.lines("  Grand Theft  Auto "), ["Grand", "Theft", "Auto"]);
        assert_eq!(Whole.lines(" Tetris "), ["Tetris"]);
        assert!(Whole.lines("   ").is_empty());
        let pattern = PatternSplit::new(r"[:/]").unwrap();
        assert_eq!(pattern.lines("Halo: Reach/Deluxe"), ["Halo", "Reach", "Deluxe"]);
    }

    #[test]
    fn config_selects_strategy() {
        let mut config = LabelConfig::default();
        let strategy = strategy_from_config(&config).unwrap();
        assert_eq!(
            strategy.lines("LEGO Star Wars: The Complete Saga"),
            ["LEGO Star Wars: The Complete Saga"]
        );

        config.strategy = LabelStrategyKind::Pattern;
        config.pattern = Some("(".to_string());
        assert!(strategy_from_config(&config).is_err());
    }
}

//! Built-in level catalog, keyed by difficulty.

use crate::grid::{Grid, LevelError};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    fn layouts(self) -> &'static [&'static [&'static str]] {
        match self {
            Difficulty::Easy => EASY,
            Difficulty::Medium => MEDIUM,
            Difficulty::Hard => HARD,
        }
    }
}

const EASY: &[&[&str]] = &[
    &[
        "# # # # # # # # # #",
        "#     E           #",
        "#   #   # #       #",
        "#   P       #     #",
        "# # # # # # # # # #",
    ],
    &[
        "# # # # # # # # # # #",
        "# P       #         #",
        "#   # #   #   #     #",
        "#       #     E     #",
        "# # # # # # # # # # #",
    ],
];

const MEDIUM: &[&[&str]] = &[
    &[
        "# # # # # # # # # # # #",
        "# P     #   #         #",
        "#   # #   #   #   #   #",
        "#       #       #     #",
        "#   #       #       E #",
        "# # # # # # # # # # # #",
    ],
    &[
        "# # # # # # # # # # # # #",
        "# P     #     #   #      #",
        "#   #   # # #   #   #    #",
        "#       #     #       E  #",
        "# # # # # # # # # # # # #",
    ],
];

const HARD: &[&[&str]] = &[&[
    "# # # # # # # # # # # # # #",
    "# P   #     #   #     #    #",
    "#   #   # #   #   # #   #  #",
    "#       #     #         E  #",
    "# # # # # # # # # # # # # #",
]];

/// An ordered run of layouts. Owned copies so tests can inject ad-hoc
/// catalogs next to the built-in ones.
#[derive(Clone, Debug)]
pub struct Catalog {
    layouts: Vec<Vec<String>>,
}

impl Catalog {
    pub fn for_difficulty(difficulty: Difficulty) -> Catalog {
        Catalog::from_layouts(difficulty.layouts())
    }

    pub fn from_layouts<S: AsRef<str>>(layouts: &[&[S]]) -> Catalog {
        Catalog {
            layouts: layouts
                .iter()
                .map(|rows| rows.iter().map(|r| r.as_ref().to_owned()).collect())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn load(&self, index: usize) -> Result<Grid, LevelError> {
        let layout = self.layouts.get(index).ok_or(LevelError::EmptyCatalog)?;
        Grid::load(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_layout_loads() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let catalog = Catalog::for_difficulty(difficulty);
            assert!(!catalog.is_empty());
            for index in 0..catalog.len() {
                let grid = catalog.load(index).unwrap_or_else(|err| {
                    panic!("{} level {} failed to load: {err}", difficulty.label(), index)
                });
                assert!(grid.rows() > 0);
                assert!(grid.cols() > 0);
            }
        }
    }

    #[test]
    fn every_builtin_layout_is_solvable() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let catalog = Catalog::for_difficulty(difficulty);
            for index in 0..catalog.len() {
                let grid = catalog.load(index).unwrap();
                assert!(
                    crate::path::hint(&grid).is_some(),
                    "{} level {} has no player-to-exit path",
                    difficulty.label(),
                    index
                );
            }
        }
    }

    #[test]
    fn load_past_the_end_is_an_error() {
        let catalog = Catalog::for_difficulty(Difficulty::Hard);
        assert!(catalog.load(catalog.len()).is_err());
    }
}

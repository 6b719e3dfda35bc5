//! Status and direction enums shared by the stores.

use serde::{Deserialize, Serialize};

/// Publication status of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
    /// Not visible on the rendered site.
    #[default]
    Draft,
    /// Visible on the rendered site.
    Published,
}

impl PageStatus {
    /// The opposite status, used by the publish toggle.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Draft => Self::Published,
            Self::Published => Self::Draft,
        }
    }

    /// Returns `true` for [`PageStatus::Published`].
    #[must_use]
    pub const fn is_published(self) -> bool {
        matches!(self, Self::Published)
    }
}

impl std::fmt::Display for PageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Published => write!(f, "published"),
        }
    }
}

impl std::str::FromStr for PageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            _ => Err(format!("invalid page status: {s}")),
        }
    }
}

/// Direction for single-step reordering of fields and sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    /// Towards the start of the sequence.
    Up,
    /// Towards the end of the sequence.
    Down,
}

/// Swap the element at `index` with its neighbour in `direction`.
///
/// Returns `false` (leaving the slice untouched) when `index` is out of
/// range or the element already sits at the boundary it is moving towards.
pub fn swap_adjacent<T>(items: &mut [T], index: usize, direction: MoveDirection) -> bool {
    if index >= items.len() {
        return false;
    }
    let neighbour = match direction {
        MoveDirection::Up if index > 0 => index - 1,
        MoveDirection::Down if index + 1 < items.len() => index + 1,
        _ => return false,
    };
    items.swap(index, neighbour);
    true
}

/// Move the element at `from` to `to` by successive adjacent swaps.
///
/// `to` is clamped to the last index. Returns the number of swaps performed.
pub fn move_by_swaps<T>(items: &mut [T], from: usize, to: usize) -> usize {
    if from >= items.len() {
        return 0;
    }
    let to = to.min(items.len() - 1);
    let mut current = from;
    let mut swaps = 0;
    while current != to {
        let direction = if to < current {
            MoveDirection::Up
        } else {
            MoveDirection::Down
        };
        if !swap_adjacent(items, current, direction) {
            break;
        }
        current = match direction {
            MoveDirection::Up => current - 1,
            MoveDirection::Down => current + 1,
        };
        swaps += 1;
    }
    swaps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_status_roundtrip() {
        assert_eq!("draft".parse::<PageStatus>(), Ok(PageStatus::Draft));
        assert_eq!("published".parse::<PageStatus>(), Ok(PageStatus::Published));
        assert!("archived".parse::<PageStatus>().is_err());
        assert_eq!(PageStatus::Published.to_string(), "published");
        assert_eq!(
            serde_json::to_string(&PageStatus::Draft).expect("serialize"),
            "\"draft\""
        );
    }

    #[test]
    fn test_toggle() {
        assert_eq!(PageStatus::Draft.toggled(), PageStatus::Published);
        assert_eq!(PageStatus::Published.toggled(), PageStatus::Draft);
    }

    #[test]
    fn test_swap_adjacent_boundaries() {
        let mut items = vec!['a', 'b', 'c'];
        assert!(!swap_adjacent(&mut items, 0, MoveDirection::Up));
        assert!(!swap_adjacent(&mut items, 2, MoveDirection::Down));
        assert!(!swap_adjacent(&mut items, 7, MoveDirection::Down));
        assert_eq!(items, vec!['a', 'b', 'c']);

        assert!(swap_adjacent(&mut items, 1, MoveDirection::Up));
        assert_eq!(items, vec!['b', 'a', 'c']);
    }

    #[test]
    fn test_move_by_swaps_counts_steps() {
        let mut items = vec![1, 2, 3, 4];
        assert_eq!(move_by_swaps(&mut items, 0, 3), 3);
        assert_eq!(items, vec![2, 3, 4, 1]);

        assert_eq!(move_by_swaps(&mut items, 3, 99), 0);
        assert_eq!(move_by_swaps(&mut items, 3, 1), 2);
        assert_eq!(items, vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_swaps_preserve_elements() {
        let mut items: Vec<u32> = (0..8).collect();
        let script = [(0, 5), (7, 2), (3, 3), (6, 0), (1, 7)];
        for (from, to) in script {
            move_by_swaps(&mut items, from, to);
            swap_adjacent(&mut items, to, MoveDirection::Up);
        }
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..8).collect::<Vec<_>>());
    }
}

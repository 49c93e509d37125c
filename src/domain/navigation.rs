use serde::{Deserialize, Serialize};

/// Direction of a keyboard move within an option list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Up,
    Down,
}

/// Moves the focused index one step, clamped to `[0, len - 1]`.
///
/// With nothing focused, `Up` starts from `-1` and clamps to `0`, like `Down`.
/// Returns `None` only when the list is empty.
pub fn step(current: Option<usize>, movement: Move, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let index = match (current, movement) {
        (None, _) => 0,
        (Some(i), Move::Up) => i.saturating_sub(1),
        (Some(i), Move::Down) => i + 1,
    };
    Some(index.min(len - 1))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, Move::Up, 3, Some(0))]
    #[case(None, Move::Down, 3, Some(0))]
    #[case(Some(0), Move::Up, 3, Some(0))]
    #[case(Some(0), Move::Down, 3, Some(1))]
    #[case(Some(2), Move::Down, 3, Some(2))]
    #[case(Some(2), Move::Up, 3, Some(1))]
    #[case(Some(7), Move::Up, 3, Some(2))]
    #[case(None, Move::Down, 0, None)]
    fn test_step_clamps(
        #[case] current: Option<usize>,
        #[case] movement: Move,
        #[case] len: usize,
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(step(current, movement, len), expected);
    }
}

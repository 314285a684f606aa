//! Turning parent maps back into move sequences.

use std::collections::HashMap;

use crate::error::SearchError;
use crate::puzzle::Puzzle;

/// For each discovered grid, the move and predecessor that first reached it.
/// Roots map to `None`.
pub type ParentMap = HashMap<Puzzle, Option<(u32, Puzzle)>>;

/// Walks back from `state` to its root and returns the moves root-first.
///
/// The map is only read, so the same map can be walked any number of times.
pub fn find_parent_path(state: &Puzzle, parents: &ParentMap) -> Result<Vec<String>, SearchError> {
    let mut moves = Vec::new();
    let mut current = state;

    loop {
        match parents.get(current) {
            None => return Err(SearchError::MissingParent),
            Some(None) => break,
            Some(Some((moved, previous))) => {
                if moves.len() >= parents.len() {
                    return Err(SearchError::ParentCycle);
                }
                moves.push(moved.to_string());
                current = previous;
            }
        }
    }

    moves.reverse();
    Ok(moves)
}

/// Joins a forward tree (rooted at the start) and a backward tree (rooted at
/// the goal) through a grid both contain.
///
/// The backward half is appended in reverse. Sliding a tile is undone by
/// sliding the same label back, so the labels recorded goal-to-meeting read
/// meeting-to-goal once reversed.
pub fn stitch(
    meeting: &Puzzle,
    forward: &ParentMap,
    backward: &ParentMap,
) -> Result<Vec<String>, SearchError> {
    let mut path = find_parent_path(meeting, forward)?;
    let mut back = find_parent_path(meeting, backward)?;
    back.reverse();
    path.extend(back);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(root: &Puzzle, labels: &[u32]) -> (ParentMap, Puzzle) {
        let mut parents = ParentMap::new();
        parents.insert(root.clone(), None);
        let mut current = root.clone();
        for &label in labels {
            let next = current.slide(label).unwrap();
            parents.insert(next.clone(), Some((label, current)));
            current = next;
        }
        (parents, current)
    }

    #[test]
    fn walks_back_to_root() {
        let root = Puzzle::goal(3);
        let (parents, tip) = chain(&root, &[8, 5, 4, 7]);

        let path = find_parent_path(&tip, &parents).unwrap();
        assert_eq!(path, vec!["8", "5", "4", "7"]);
        // Non-destructive: a second walk gives the same answer.
        assert_eq!(find_parent_path(&tip, &parents).unwrap(), path);
        assert_eq!(parents.len(), 5);

        assert!(find_parent_path(&root, &parents).unwrap().is_empty());
    }

    #[test]
    fn unknown_state_is_a_contract_violation() {
        let (parents, _) = chain(&Puzzle::goal(2), &[3]);
        let stranger = Puzzle::goal(3);
        assert_eq!(
            find_parent_path(&stranger, &parents),
            Err(SearchError::MissingParent)
        );
    }

    #[test]
    fn cycles_are_detected() {
        let a = Puzzle::goal(2);
        let b = a.slide(3).unwrap();
        let mut parents = ParentMap::new();
        parents.insert(a.clone(), Some((3, b.clone())));
        parents.insert(b.clone(), Some((3, a.clone())));
        assert_eq!(find_parent_path(&a, &parents), Err(SearchError::ParentCycle));
    }

    #[test]
    fn stitched_path_reaches_goal() {
        let goal = Puzzle::goal(3);
        let start = goal.apply_moves(&["8", "5", "4", "1", "2", "3"]).unwrap();

        // Forward: start -> meeting in three moves; backward: goal -> meeting.
        let (forward, meeting) = chain(&start, &[3, 2, 1]);
        let (backward, meeting_back) = chain(&goal, &[8, 5, 4]);
        assert_eq!(meeting, meeting_back);

        let path = stitch(&meeting, &forward, &backward).unwrap();
        assert_eq!(path, vec!["3", "2", "1", "4", "5", "8"]);
        assert_eq!(start.apply_moves(&path).unwrap(), goal);
    }
}

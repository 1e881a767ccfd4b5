//! Terminal-condition checks for a snake whose new head has already been
//! prepended.

use super::geometry::Grid;
use super::state::{CollisionType, Position};

/// Classify the collision of `snake[0]`, if any.
///
/// Wall collisions take precedence: a head outside the board never counts
/// as hitting the body.
pub fn detect_collision(snake: &[Position], grid: &Grid) -> Option<CollisionType> {
    let (head, rest) = snake.split_first()?;

    if !grid.contains(*head) {
        return Some(CollisionType::Wall);
    }

    if rest.contains(head) {
        return Some(CollisionType::SelfCollision);
    }

    None
}

/// True if the head lies outside the board or on another segment
pub fn check_collision(snake: &[Position], grid: &Grid) -> bool {
    detect_collision(snake, grid).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_no_collision() {
        let grid = Grid::new(10, 10, 20);
        assert!(!check_collision(&[p(5, 5), p(5, 6)], &grid));
        assert!(!check_collision(&[p(0, 0)], &grid));
        assert!(!check_collision(&[p(9, 9), p(8, 9)], &grid));
    }

    #[test]
    fn test_wall_collision_each_side() {
        let grid = Grid::new(10, 10, 20);
        for head in [p(-1, 5), p(10, 5), p(5, -1), p(5, 10)] {
            assert_eq!(
                detect_collision(&[head, p(5, 5)], &grid),
                Some(CollisionType::Wall),
                "head {head:?}"
            );
        }
    }

    #[test]
    fn test_self_collision() {
        let grid = Grid::new(10, 10, 20);
        // Head loops back onto the fourth segment
        let snake = [p(4, 4), p(5, 4), p(5, 5), p(4, 5), p(4, 4), p(3, 4)];
        assert_eq!(
            detect_collision(&snake, &grid),
            Some(CollisionType::SelfCollision)
        );

        // The tail counts too: it has not moved yet when the head is checked
        let snake = [p(2, 2), p(3, 2), p(3, 3), p(2, 3), p(2, 2)];
        assert!(check_collision(&snake, &grid));
    }

    #[test]
    fn test_overlap_anywhere_behind_head() {
        let grid = Grid::new(8, 8, 20);
        let body: Vec<Position> = (0..8).map(|x| p(x, 3)).collect();

        for (i, seg) in body.iter().enumerate() {
            let mut snake = vec![*seg];
            snake.extend(body.iter().copied());
            // Head equal to segment i of the remaining body
            assert!(check_collision(&snake, &grid), "overlap at {i}");
        }

        let mut snake = vec![p(0, 4)];
        snake.extend(body.iter().copied());
        assert!(!check_collision(&snake, &grid));
    }

    #[test]
    fn test_wall_wins_over_body() {
        let grid = Grid::new(4, 4, 20);
        let snake = [p(4, 0), p(4, 0)];
        assert_eq!(detect_collision(&snake, &grid), Some(CollisionType::Wall));
    }

    #[test]
    fn test_empty_snake() {
        let grid = Grid::new(4, 4, 20);
        assert!(!check_collision(&[], &grid));
    }
}

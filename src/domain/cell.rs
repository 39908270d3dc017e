/// State of one board square. Boards start out all `Dead`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub const fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }

    /// Opposite state, used when a pointer press flips a cell
    pub const fn toggle(self) -> Self {
        match self {
            Cell::Alive => Cell::Dead,
            Cell::Dead => Cell::Alive,
        }
    }

    /// B3/S23: three live neighbors give life, two keep a live cell as it is
    pub const fn evolve(self, neighbors: u8) -> Self {
        match neighbors {
            3 => Cell::Alive,
            2 => self,
            _ => Cell::Dead,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn births() -> Vec<u8> {
        (0..=8).filter(|&n| Cell::Dead.evolve(n).is_alive()).collect()
    }

    fn survivals() -> Vec<u8> {
        (0..=8).filter(|&n| Cell::Alive.evolve(n).is_alive()).collect()
    }

    #[test]
    fn test_birth_needs_exactly_three() {
        assert_eq!(births(), vec![3]);
    }

    #[test]
    fn test_survival_on_two_or_three() {
        assert_eq!(survivals(), vec![2, 3]);
    }

    #[test]
    fn test_lonely_and_crowded_cells_die() {
        for n in [0, 1, 4, 8] {
            assert_eq!(Cell::Alive.evolve(n), Cell::Dead, "{n} neighbors");
        }
    }

    #[test]
    fn test_toggle_and_from_bool() {
        assert_eq!(Cell::Dead.toggle(), Cell::Alive);
        assert_eq!(Cell::Alive.toggle().toggle(), Cell::Alive);
        assert_eq!(Cell::from(true), Cell::Alive);
        assert_eq!(Cell::from(false), Cell::default());
    }
}

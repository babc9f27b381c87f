use crate::points::Position;

/// One of the two drivers whose finishing position is picked by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Rival {
    A,
    B,
}

impl Rival {
    pub fn other(self) -> Rival {
        match self {
            Rival::A => Rival::B,
            Rival::B => Rival::A,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("{position} is already taken by rival {holder}")]
    Taken { position: Position, holder: Rival },
}

/// Each rival's current pick. Both picks are never equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    a: Option<Position>,
    b: Option<Position>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, rival: Rival) -> Option<Position> {
        match rival {
            Rival::A => self.a,
            Rival::B => self.b,
        }
    }

    fn slot(&mut self, rival: Rival) -> &mut Option<Position> {
        match rival {
            Rival::A => &mut self.a,
            Rival::B => &mut self.b,
        }
    }

    /// A position is disabled for a rival while the other rival holds it.
    pub fn is_disabled(&self, rival: Rival, position: Position) -> bool {
        self.get(rival.other()) == Some(position)
    }

    /// Picks `position` for `rival` unless the other rival already holds it.
    pub fn select(&mut self, rival: Rival, position: Position) -> Result<(), SelectionError> {
        if self.is_disabled(rival, position) {
            return Err(SelectionError::Taken {
                position,
                holder: rival.other(),
            });
        }
        *self.slot(rival) = Some(position);
        Ok(())
    }

    /// Picks `position` for `rival` unconditionally, clearing the other rival
    /// if it held the same position.
    pub fn claim(&mut self, rival: Rival, position: Position) {
        let other = self.slot(rival.other());
        if *other == Some(position) {
            *other = None;
        }
        *self.slot(rival) = Some(position);
    }

    pub fn clear(&mut self, rival: Rival) {
        *self.slot(rival) = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Both picks, if both rivals have one.
    pub fn both(&self) -> Option<(Position, Position)> {
        self.a.zip(self.b)
    }
}

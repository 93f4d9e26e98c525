//! Player and the fixed-capacity monster pool.
//!
//! Monsters live in an arena of slots that is allocated once. A slot is a
//! brand-new monster every time it goes from inactive to active; nothing
//! carries over between occupants.

use glam::DVec2;

use wavedodge_core::config::ArenaConfig;
use wavedodge_core::enums::MonsterKind;
use wavedodge_core::types::Rect;

/// The player-controlled square.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner.
    pub pos: DVec2,
    pub size: DVec2,
    /// Pixels per tick per held direction.
    pub speed: f64,
}

/// One pool slot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Monster {
    pub active: bool,
    pub kind: MonsterKind,
    /// Top-left corner.
    pub pos: DVec2,
    /// Stored velocity in px/tick. Zero whenever the slot is inactive.
    pub vel: DVec2,
    pub size: DVec2,
}

/// Fixed array of monster slots with explicit free-slot scanning.
#[derive(Debug, Clone)]
pub struct MonsterPool {
    slots: Vec<Monster>,
}

impl Player {
    pub fn spawn(arena: &ArenaConfig) -> Self {
        Self {
            pos: arena.player_spawn,
            size: arena.player_size(),
            speed: arena.player_speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> DVec2 {
        self.pos + self.size / 2.0
    }

    /// Clamp the top-left corner so the whole player stays inside the arena.
    pub fn clamp_to(&mut self, arena: &ArenaConfig) {
        self.pos = self.pos.clamp(DVec2::ZERO, arena.player_max().max(DVec2::ZERO));
    }
}

impl Monster {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> DVec2 {
        self.pos + self.size / 2.0
    }

    /// Return the slot to the free state.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.vel = DVec2::ZERO;
    }
}

impl MonsterPool {
    pub fn new(capacity: usize, size: DVec2) -> Self {
        Self {
            slots: vec![
                Monster {
                    size,
                    ..Default::default()
                };
                capacity
            ],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Index of the first inactive slot, if any.
    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(|m| !m.active)
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|m| m.active).count()
    }

    pub fn slot(&self, index: usize) -> Option<&Monster> {
        self.slots.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Monster> {
        self.slots.get_mut(index)
    }

    /// Active monsters with their slot index.
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Monster)> {
        self.slots.iter().enumerate().filter(|(_, m)| m.active)
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut Monster)> {
        self.slots.iter_mut().enumerate().filter(|(_, m)| m.active)
    }

    /// Deactivate every slot and zero every velocity.
    pub fn reset(&mut self) {
        for monster in &mut self.slots {
            monster.deactivate();
        }
    }
}

//! Fixture entities.

use std::cell::RefCell;
use std::rc::Rc;

use atomark_store::{Entity, UpdateContext};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// An entity that loses one health point per tick and destroys itself
/// when health reaches zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Countdown {
    pub health: i32,
    /// Number of times `update` has run on this entity.
    pub ticks: u32,
}

impl Countdown {
    pub fn new(health: i32) -> Self {
        Self { health, ticks: 0 }
    }
}

impl Entity for Countdown {
    fn update(&mut self, ctx: &mut UpdateContext<'_, Self>) {
        self.ticks += 1;
        self.health -= 1;
        if self.health <= 0 {
            ctx.destroy_self();
        }
    }
}

/// Deterministic source of [`Countdown`]s with health in `10..60`.
pub struct CountdownFactory {
    rng: ChaCha8Rng,
}

impl CountdownFactory {
    pub const MIN_HEALTH: i32 = 10;
    pub const HEALTH_SPREAD: u32 = 50;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn next_countdown(&mut self) -> Countdown {
        let spread = (self.rng.next_u32() % Self::HEALTH_SPREAD) as i32;
        Countdown::new(Self::MIN_HEALTH + spread)
    }
}

/// Shared record of dropped [`DropProbe`] ids, in drop order.
#[derive(Clone, Debug, Default)]
pub struct DropLog(Rc<RefCell<Vec<u32>>>);

impl DropLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A probe that reports to this log and never destroys itself.
    pub fn probe(&self, id: u32) -> DropProbe {
        DropProbe {
            id,
            ttl: None,
            log: self.clone(),
        }
    }

    /// A probe that destroys itself on its `ttl`-th update.
    pub fn probe_with_ttl(&self, id: u32, ttl: u32) -> DropProbe {
        DropProbe {
            id,
            ttl: Some(ttl),
            log: self.clone(),
        }
    }

    pub fn dropped(&self) -> Vec<u32> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// How many times the probe with `id` has been dropped.
    pub fn count_of(&self, id: u32) -> usize {
        self.0.borrow().iter().filter(|&&d| d == id).count()
    }
}

/// An entity that appends its id to a [`DropLog`] when dropped.
#[derive(Debug)]
pub struct DropProbe {
    pub id: u32,
    pub ttl: Option<u32>,
    log: DropLog,
}

impl Drop for DropProbe {
    fn drop(&mut self) {
        self.log.0.borrow_mut().push(self.id);
    }
}

impl Entity for DropProbe {
    fn update(&mut self, ctx: &mut UpdateContext<'_, Self>) {
        if let Some(ttl) = self.ttl.as_mut() {
            *ttl = ttl.saturating_sub(1);
            if *ttl == 0 {
                ctx.destroy_self();
            }
        }
    }
}

//! Fixed-capacity particle storage
//!
//! A ring of slots with a single recycling cursor. Spawning never fails: when
//! the cursor lands on a live particle that particle is overwritten early.

use std::num::NonZeroUsize;

use glam::Vec2;

use super::mode::Integrator;
use super::state::{Particle, ParticleView};

/// Absorbs f64 drift from repeated TTL decrements.
/// A TTL within 1e-9 above a multiple of the decrement rounds down a tick.
const TTL_EPSILON: f64 = 1e-9;

/// Ring buffer of particles
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    /// Next slot to overwrite
    cursor: usize,
    /// Lifetime given to new spawns
    max_ttl: f64,
}

impl ParticlePool {
    pub fn new(capacity: NonZeroUsize, max_ttl: f64) -> Self {
        Self {
            particles: vec![Particle::dormant(max_ttl); capacity.get()],
            cursor: 0,
            max_ttl,
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_ttl(&self) -> f64 {
        self.max_ttl
    }

    /// Slot by index (live or not)
    pub fn get(&self, slot: usize) -> Option<&Particle> {
        self.particles.get(slot)
    }

    pub fn live_count(&self) -> usize {
        self.particles.iter().filter(|p| p.exists).count()
    }

    /// Overwrite the slot at the cursor and advance it. Returns the slot used.
    pub fn spawn(&mut self, pos: Vec2, vel: Vec2) -> usize {
        let slot = self.cursor;
        let particle = &mut self.particles[slot];
        if particle.exists {
            log::trace!("Recycling live particle in slot {} (ttl {:.2})", slot, particle.ttl);
        }
        particle.revive(pos, vel, self.max_ttl);

        self.cursor = (self.cursor + 1) % self.particles.len();
        slot
    }

    /// Count down every live particle and retire the ones that run out
    pub fn age(&mut self, decrement: f64) {
        let max_ttl = self.max_ttl;
        for particle in self.particles.iter_mut().filter(|p| p.exists) {
            particle.ttl -= decrement;
            if particle.ttl <= TTL_EPSILON {
                particle.expire(max_ttl);
            }
        }
    }

    /// Retire every slot. The cursor keeps its position.
    pub fn clear(&mut self) {
        for particle in &mut self.particles {
            particle.exists = false;
            particle.ttl = self.max_ttl;
        }
    }

    /// Rescale live lifetimes so each keeps its remaining fraction
    pub fn rescale_ttl(&mut self, old_max: f64, new_max: f64) {
        let factor = new_max / old_max;
        for particle in self.particles.iter_mut().filter(|p| p.exists) {
            particle.ttl *= factor;
        }
        self.max_ttl = new_max;
    }

    /// Read-only view of live particles, tagged with the active integrator
    pub fn snapshot(&self, integrator: Integrator) -> Snapshot<'_> {
        Snapshot {
            particles: &self.particles,
            max_ttl: self.max_ttl,
            integrator,
        }
    }

    pub(crate) fn live_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut().filter(|p| p.exists)
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        use crate::consts::{DEFAULT_MAX_TTL, POOL_CAPACITY};
        let capacity = NonZeroUsize::new(POOL_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self::new(capacity, DEFAULT_MAX_TTL)
    }
}

/// Borrowed render snapshot. Copyable, so it can be iterated any number of times.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    particles: &'a [Particle],
    max_ttl: f64,
    integrator: Integrator,
}

impl<'a> Snapshot<'a> {
    pub fn iter(&self) -> SnapshotIter<'a> {
        SnapshotIter {
            inner: self.particles.iter(),
            max_ttl: self.max_ttl,
            integrator: self.integrator,
        }
    }

    /// Number of live particles
    pub fn len(&self) -> usize {
        self.particles.iter().filter(|p| p.exists).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.particles.iter().any(|p| p.exists)
    }
}

impl<'a> IntoIterator for Snapshot<'a> {
    type Item = ParticleView;
    type IntoIter = SnapshotIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over live particle views
#[derive(Debug, Clone)]
pub struct SnapshotIter<'a> {
    inner: std::slice::Iter<'a, Particle>,
    max_ttl: f64,
    integrator: Integrator,
}

impl Iterator for SnapshotIter<'_> {
    type Item = ParticleView;

    fn next(&mut self) -> Option<ParticleView> {
        let particle = self.inner.by_ref().find(|p| p.exists)?;
        Some(ParticleView {
            pos: particle.pos,
            ttl_ratio: (particle.ttl / self.max_ttl) as f32,
            integrator: self.integrator,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

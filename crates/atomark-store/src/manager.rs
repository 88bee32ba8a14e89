//! The slot manager: creation, deferred destruction, compaction and growth.
//!
//! [`Manager`] owns two parallel arrays of equal length:
//!
//! ```text
//!             0    1    2    3    4   ...
//!   atoms:  | A  | B  | C  | .  | .  |      payload + alive + mark index
//!   marks:  | 0  | 1  | 2  | 3  | 4  |      atom index
//!           | g0 | g0 | g0 | g0 | g0 |      generation
//!
//!   [0, size)            visible: iterated by update()
//!   [size, size_next)    created since the last refresh, not yet visible
//!   [size_next, cap)     reserve
//! ```
//!
//! Handles point at marks. A refresh pass moves survivors to the front of
//! the atom array and re-points their marks, so handles follow the entity
//! without ever storing its position. Reclaimed entities have their mark's
//! generation advanced, which invalidates every outstanding handle to them.

use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

use atomark_core::{AtomIndex, Generation, ManagerId, MarkIndex};

use crate::atom::Atom;
use crate::config::ManagerConfig;
use crate::entity::{Entity, UpdateContext};
use crate::error::{ConfigError, StoreError};
use crate::handle::Handle;
use crate::mark::Mark;
use crate::metrics::{ManagerMetrics, RefreshStats, UpdateReport};

/// Generation-checked storage for entities of a single type.
///
/// Creation and destruction are O(1) amortised; destruction is deferred
/// until [`refresh`](Self::refresh), which compacts the live set into a
/// contiguous prefix of the atom array in one linear pass.
///
/// References returned by [`get`](Self::get), [`iter`](Self::iter) and
/// friends are plain borrows of the atom array: a refresh pass may move
/// the entity they point at, which the borrow checker already prevents
/// from being observed. Only [`Handle`]s persist across refreshes.
pub struct Manager<T> {
    id: ManagerId,
    config: ManagerConfig,
    atoms: Vec<Atom<T>>,
    marks: Vec<Mark>,
    /// Number of visible entities.
    size: usize,
    /// Visible entities plus those created since the last refresh.
    size_next: usize,
    metrics: ManagerMetrics,
}

impl<T> Manager<T> {
    /// Create an empty manager with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(ManagerConfig::default())
    }

    /// Create a manager with the given configuration.
    ///
    /// Reserves `initial_capacity` slots up front.
    pub fn with_config(config: ManagerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let initial = config.initial_capacity;
        let mut manager = Self::from_valid_config(config);
        if initial > 0 {
            manager.extend_to(initial);
        }
        Ok(manager)
    }

    fn from_valid_config(config: ManagerConfig) -> Self {
        Self {
            id: ManagerId::next(),
            config,
            atoms: Vec::new(),
            marks: Vec::new(),
            size: 0,
            size_next: 0,
            metrics: ManagerMetrics::default(),
        }
    }

    /// This manager's unique id, recorded in every handle it mints.
    pub fn id(&self) -> ManagerId {
        self.id
    }

    /// The configuration this manager was built with.
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Number of visible entities: those compacted by the last refresh.
    ///
    /// Entities destroyed since that refresh are still counted.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether there are no visible entities.
    ///
    /// Entities created since the last refresh are not considered.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of entities created since the last refresh.
    pub fn pending_len(&self) -> usize {
        self.size_next - self.size
    }

    /// Number of slots in the atom and mark arrays.
    pub fn capacity(&self) -> usize {
        self.atoms.len()
    }

    /// Cumulative activity counters.
    pub fn metrics(&self) -> &ManagerMetrics {
        &self.metrics
    }

    /// Memory held by the atom and mark arrays in bytes.
    ///
    /// Heap memory owned by the entities themselves is not included.
    pub fn memory_bytes(&self) -> usize {
        self.atoms.capacity() * mem::size_of::<Atom<T>>()
            + self.marks.capacity() * mem::size_of::<Mark>()
    }

    // ── Growth ─────────────────────────────────────────────────

    /// Append slots until the arrays hold `new_capacity` of each.
    ///
    /// Callers guarantee `new_capacity` fits the mark index space.
    fn extend_to(&mut self, new_capacity: usize) {
        let old_capacity = self.capacity();
        debug_assert!(new_capacity > old_capacity);
        debug_assert!(new_capacity as u64 <= MarkIndex::MAX_SLOTS);

        let additional = new_capacity - old_capacity;
        self.atoms.reserve_exact(additional);
        self.marks.reserve_exact(additional);
        for i in old_capacity..new_capacity {
            let i = i as u32;
            self.atoms.push(Atom::new(MarkIndex(i)));
            self.marks.push(Mark::new(AtomIndex(i)));
        }

        self.metrics.growth_events += 1;
        log::debug!(
            "manager {}: grew slot arrays from {old_capacity} to {new_capacity}",
            self.id
        );
    }

    /// Grow by one `growth_chunk`, clamped to the capacity limit.
    fn grow_step(&mut self) -> Result<(), StoreError> {
        let capacity = self.capacity() as u64;
        let limit = self.config.capacity_limit();
        if capacity >= limit {
            return Err(StoreError::CapacityExceeded {
                requested: capacity + 1,
                max: limit,
            });
        }
        let step = (self.config.growth_chunk as u64).min(limit - capacity);
        self.extend_to((capacity + step) as usize);
        Ok(())
    }

    /// Make room for `additional` more creations without further growth.
    ///
    /// Grows in whole `growth_chunk` steps, clamped to the capacity limit.
    pub fn reserve(&mut self, additional: usize) -> Result<(), StoreError> {
        let needed = (self.size_next as u64).saturating_add(additional as u64);
        let capacity = self.capacity() as u64;
        if needed <= capacity {
            return Ok(());
        }
        let limit = self.config.capacity_limit();
        if needed > limit {
            return Err(StoreError::CapacityExceeded {
                requested: needed,
                max: limit,
            });
        }
        let chunk = self.config.growth_chunk as u64;
        let steps = (needed - capacity).div_ceil(chunk);
        let target = capacity.saturating_add(steps.saturating_mul(chunk)).min(limit);
        self.extend_to(target as usize);
        Ok(())
    }

    // ── Creation and destruction ───────────────────────────────

    /// Store `value` and return a handle to it.
    ///
    /// The entity is placed after every existing one and is not visited
    /// by [`update`](Self::update) or [`iter`](Self::iter) until the next
    /// [`refresh`](Self::refresh), so it is safe to create entities while
    /// walking the visible range.
    ///
    /// # Panics
    ///
    /// Panics if the slot arrays cannot grow. Running out of slots is
    /// treated like running out of memory; use
    /// [`try_create`](Self::try_create) to handle it instead.
    pub fn create(&mut self, value: T) -> Handle<T> {
        match self.try_create(value) {
            Ok(handle) => handle,
            Err(err) => panic!("manager {}: {err}", self.id),
        }
    }

    /// Store `value`, or report that the slot arrays are exhausted.
    ///
    /// `value` is dropped on failure.
    pub fn try_create(&mut self, value: T) -> Result<Handle<T>, StoreError> {
        if self.size_next == self.capacity() {
            self.grow_step()?;
        }

        let index = self.size_next;
        let atom = &mut self.atoms[index];
        atom.init(value);
        let mark_index = atom.mark;

        let mark = &mut self.marks[mark_index.index()];
        mark.atom = AtomIndex(index as u32);
        let generation = mark.generation;

        self.size_next += 1;
        self.metrics.created += 1;
        Ok(Handle::new(self.id, mark_index, generation))
    }

    /// Mark the entity behind `handle` dead.
    ///
    /// The entity stays in place, and stays reachable through `handle`,
    /// until the next [`refresh`](Self::refresh) drops it. Returns `true`
    /// if this call changed the entity from alive to dead; destroying a
    /// dead entity or presenting a stale or foreign handle does nothing.
    pub fn destroy(&mut self, handle: Handle<T>) -> bool {
        let Ok(index) = self.resolve(handle) else {
            return false;
        };
        let atom = &mut self.atoms[index.index()];
        let was_alive = atom.alive;
        atom.set_dead();
        was_alive
    }

    /// Destroy every entity, visible or pending, and compact.
    ///
    /// All outstanding handles become invalid. Capacity is kept.
    pub fn clear(&mut self) -> RefreshStats {
        for atom in &mut self.atoms[..self.size_next] {
            atom.set_dead();
        }
        log::debug!(
            "manager {}: clearing {} entities",
            self.id,
            self.size_next
        );
        self.refresh()
    }

    // ── Compaction ─────────────────────────────────────────────

    /// Compact the atom array and reclaim dead entities.
    ///
    /// Two cursors walk the used range `[0, size_next)`: one from the left
    /// looking for dead atoms, one from the right looking for alive ones.
    /// Each pair found is swapped, moving a survivor into the hole. When
    /// the cursors meet, `[0, boundary)` holds exactly the alive entities
    /// and `[boundary, size_next)` the dead ones, which are dropped and
    /// have their mark's generation advanced. Entities created since the
    /// last refresh become visible.
    ///
    /// Entity order within the visible range is not preserved.
    pub fn refresh(&mut self) -> RefreshStats {
        let used = self.size_next;
        let mut lo = 0;
        let mut hi = used;
        let mut relocations = 0;

        // Invariant: [0, lo) alive, [hi, used) dead.
        loop {
            while lo < hi && self.atoms[lo].alive {
                lo += 1;
            }
            while hi > lo && !self.atoms[hi - 1].alive {
                hi -= 1;
            }
            if lo == hi {
                break;
            }

            // atoms[lo] is dead and atoms[hi - 1] alive, so lo < hi - 1.
            let survivor = hi - 1;
            self.atoms.swap(lo, survivor);
            self.relink(lo);
            self.relink(survivor);
            relocations += 1;

            lo += 1;
            hi = survivor;
        }

        let boundary = lo;
        let mut reclaimed = 0;
        for atom in &mut self.atoms[boundary..used] {
            if atom.deinit() {
                reclaimed += 1;
            }
            self.marks[atom.mark.index()].bump();
        }

        self.size = boundary;
        self.size_next = boundary;

        self.metrics.refreshes += 1;
        self.metrics.reclaimed += reclaimed as u64;
        self.metrics.relocations += relocations as u64;
        log::trace!(
            "manager {}: refresh retained {boundary}, reclaimed {reclaimed}, relocated {relocations}",
            self.id
        );

        RefreshStats {
            retained: boundary,
            reclaimed,
            relocations,
        }
    }

    /// Point the mark of the atom at `index` back at `index`.
    fn relink(&mut self, index: usize) {
        let mark = self.atoms[index].mark;
        self.marks[mark.index()].atom = AtomIndex(index as u32);
    }

    // ── Update ─────────────────────────────────────────────────

    /// Run [`Entity::update`] once on every visible, alive entity.
    ///
    /// Entities are visited in array order. Entities destroyed earlier in
    /// the same pass are skipped; entities spawned through the context are
    /// created after the pass and stay invisible until the next refresh.
    /// A spawn that does not fit the capacity limit is dropped and counted
    /// in [`UpdateReport::rejected_spawns`].
    pub fn update(&mut self, dt: f64) -> UpdateReport<T>
    where
        T: Entity,
    {
        self.update_with(dt, |entity, ctx| entity.update(ctx))
    }

    /// Like [`update`](Self::update), but drives each entity with `f`.
    pub fn update_with<F>(&mut self, dt: f64, mut f: F) -> UpdateReport<T>
    where
        F: FnMut(&mut T, &mut UpdateContext<'_, T>),
    {
        let mut report = UpdateReport::default();
        let mut queued = Vec::new();

        for atom in &mut self.atoms[..self.size] {
            if !atom.alive {
                continue;
            }
            let mark = atom.mark;
            let handle = Handle::new(self.id, mark, self.marks[mark.index()].generation);
            let Some(value) = atom.get_mut() else {
                continue;
            };

            let mut ctx = UpdateContext::new(dt, handle, &mut queued);
            f(value, &mut ctx);
            report.visited += 1;
            if ctx.is_destroyed() {
                atom.set_dead();
                report.self_destroyed += 1;
            }
        }

        for value in queued {
            match self.try_create(value) {
                Ok(handle) => report.spawned.push(handle),
                Err(err) => {
                    log::warn!("manager {}: dropped spawned entity: {err}", self.id);
                    report.rejected_spawns += 1;
                }
            }
        }
        report
    }

    // ── Access ─────────────────────────────────────────────────

    /// Map a handle to the atom currently holding its entity.
    fn resolve(&self, handle: Handle<T>) -> Result<AtomIndex, StoreError> {
        if handle.manager != self.id {
            return Err(StoreError::ForeignHandle {
                expected: self.id,
                found: handle.manager,
            });
        }
        let mark = self
            .marks
            .get(handle.mark.index())
            .ok_or(StoreError::UnknownMark {
                mark: handle.mark,
                capacity: self.capacity(),
            })?;
        if mark.generation != handle.generation {
            return Err(stale(handle, mark.generation));
        }
        Ok(mark.atom)
    }

    /// Whether `handle` still refers to an entity in this manager.
    ///
    /// This is a pure generation comparison. An entity that has been
    /// destroyed but not yet reclaimed by a refresh is still alive in this
    /// sense; its handle stops being alive the moment the refresh runs.
    pub fn is_alive(&self, handle: Handle<T>) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Whether the entity behind `handle` has been destroyed and is
    /// waiting to be reclaimed. `false` for invalid handles.
    pub fn is_doomed(&self, handle: Handle<T>) -> bool {
        self.resolve(handle)
            .is_ok_and(|index| !self.atoms[index.index()].alive)
    }

    /// Current position of the entity behind `handle` in the atom array.
    ///
    /// Positions change across refreshes; handles do not.
    pub fn atom_index(&self, handle: Handle<T>) -> Option<AtomIndex> {
        self.resolve(handle).ok()
    }

    /// Borrow the entity behind `handle`, or explain why it is gone.
    pub fn try_get(&self, handle: Handle<T>) -> Result<&T, StoreError> {
        let index = self.resolve(handle)?;
        let current = self.marks[handle.mark.index()].generation;
        self.atoms[index.index()]
            .get()
            .ok_or(stale(handle, current))
    }

    /// Mutably borrow the entity behind `handle`, or explain why it is gone.
    pub fn try_get_mut(&mut self, handle: Handle<T>) -> Result<&mut T, StoreError> {
        let index = self.resolve(handle)?;
        let current = self.marks[handle.mark.index()].generation;
        self.atoms[index.index()]
            .get_mut()
            .ok_or(stale(handle, current))
    }

    /// Borrow the entity behind `handle` if the handle is valid.
    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        self.try_get(handle).ok()
    }

    /// Mutably borrow the entity behind `handle` if the handle is valid.
    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        self.try_get_mut(handle).ok()
    }

    /// Visible, alive entities with their handles, in array order.
    ///
    /// Entities destroyed since the last refresh are skipped; entities
    /// created since then are not yet visible.
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> + '_ {
        let id = self.id;
        let marks = &self.marks;
        self.atoms[..self.size]
            .iter()
            .filter(|atom| atom.alive)
            .filter_map(move |atom| {
                let value = atom.get()?;
                let generation = marks[atom.mark.index()].generation;
                Some((Handle::new(id, atom.mark, generation), value))
            })
    }

    /// Mutable counterpart of [`iter`](Self::iter).
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle<T>, &mut T)> + '_ {
        let id = self.id;
        let marks = &self.marks;
        self.atoms[..self.size]
            .iter_mut()
            .filter(|atom| atom.alive)
            .filter_map(move |atom| {
                let mark = atom.mark;
                let generation = marks[mark.index()].generation;
                let value = atom.get_mut()?;
                Some((Handle::new(id, mark, generation), value))
            })
    }

    /// Handles of every visible, alive entity.
    pub fn handles(&self) -> impl Iterator<Item = Handle<T>> + '_ {
        self.iter().map(|(handle, _)| handle)
    }
}

fn stale<T>(handle: Handle<T>, current: Generation) -> StoreError {
    StoreError::StaleHandle {
        mark: handle.mark,
        handle_generation: handle.generation,
        current_generation: current,
    }
}

impl<T> Default for Manager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Manager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("id", &self.id)
            .field("len", &self.size)
            .field("pending", &self.pending_len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

/// Dereference a handle, panicking if it is stale or foreign.
///
/// Check [`Manager::is_alive`] first, or use [`Manager::get`], when the
/// handle's validity is not guaranteed by program logic.
impl<T> Index<Handle<T>> for Manager<T> {
    type Output = T;

    fn index(&self, handle: Handle<T>) -> &T {
        match self.try_get(handle) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<Handle<T>> for Manager<T> {
    fn index_mut(&mut self, handle: Handle<T>) -> &mut T {
        match self.try_get_mut(handle) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

//! Id-keyed bookkeeping: at most one view per server id.

use std::collections::{HashMap, VecDeque};

use crate::net::messages::{PlayerId, SnowballId};

/// Number of snowball sprites created up front and recycled.
pub const SNOWBALL_POOL_SIZE: usize = 50;

/// Locally killed ids remembered while waiting for the server to delete
/// them. Past this, the oldest are forgotten.
pub const MAX_SUPPRESSED: usize = 256;

/// Outcome of adding a remote player.
#[derive(Debug, PartialEq)]
pub enum Join<T> {
    Added,
    /// The id was already present; the old view is returned for cleanup.
    Replaced(T),
    /// Remote announcements of the local player's own id are ignored.
    RejectedLocal,
}

/// Local player plus remote players, keyed by server id.
#[derive(Debug, Clone)]
pub struct Roster<T> {
    local_id: Option<PlayerId>,
    players: HashMap<PlayerId, T>,
}

impl<T> Default for Roster<T> {
    fn default() -> Self {
        Self {
            local_id: None,
            players: HashMap::new(),
        }
    }
}

impl<T> Roster<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the local player. Returns whatever view that id had before.
    pub fn set_local(&mut self, id: PlayerId, view: T) -> Option<T> {
        if let Some(previous) = self.local_id.take()
            && previous != id
        {
            self.players.remove(&previous);
        }
        self.local_id = Some(id.clone());
        self.players.insert(id, view)
    }

    pub fn local_id(&self) -> Option<&PlayerId> {
        self.local_id.as_ref()
    }

    pub fn is_local(&self, id: &str) -> bool {
        self.local_id.as_deref() == Some(id)
    }

    pub fn local(&self) -> Option<&T> {
        self.local_id.as_ref().and_then(|id| self.players.get(id))
    }

    pub fn local_mut(&mut self) -> Option<&mut T> {
        let id = self.local_id.as_ref()?;
        self.players.get_mut(id)
    }

    pub fn insert_remote(&mut self, id: PlayerId, view: T) -> Join<T> {
        if self.is_local(&id) {
            return Join::RejectedLocal;
        }
        match self.players.insert(id, view) {
            Some(old) => Join::Replaced(old),
            None => Join::Added,
        }
    }

    /// Remove a remote player. The local player cannot be removed this way.
    pub fn remove_remote(&mut self, id: &str) -> Option<T> {
        if self.is_local(id) {
            return None;
        }
        self.players.remove(id)
    }

    /// The local player for the local id, otherwise the remote player.
    pub fn resolve(&self, id: &str) -> Option<&T> {
        self.players.get(id)
    }

    pub fn resolve_mut(&mut self, id: &str) -> Option<&mut T> {
        self.players.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &T)> {
        self.players.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&PlayerId, &mut T)> {
        self.players.iter_mut()
    }

    pub fn clear(&mut self) {
        self.local_id = None;
        self.players.clear();
    }
}

/// Index of a pooled snowball sprite.
pub type SlotIndex = usize;

/// Outcome of looking up a snowball id in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// The id already owns a live slot.
    Live(SlotIndex),
    /// A dead slot was assigned to the id and reset.
    Revived(SlotIndex),
    /// The id's sprite was killed locally; further updates are ignored
    /// until the server deletes it.
    Suppressed,
    /// Every slot is in use.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    Slot(SlotIndex),
    Suppressed,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    value: T,
    alive: bool,
}

/// Fixed set of recycled snowball views.
#[derive(Debug, Clone)]
pub struct SnowballPool<T> {
    slots: Vec<Slot<T>>,
    bindings: HashMap<SnowballId, Binding>,
    /// Suppressed ids, oldest first.
    suppressed: VecDeque<SnowballId>,
}

impl<T: Default> SnowballPool<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity)
                .map(|_| Slot {
                    value: T::default(),
                    alive: false,
                })
                .collect(),
            bindings: HashMap::new(),
            suppressed: VecDeque::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn claim(&mut self, id: SnowballId) -> Claim {
        match self.bindings.get(&id) {
            Some(Binding::Slot(index)) => return Claim::Live(*index),
            Some(Binding::Suppressed) => return Claim::Suppressed,
            None => {},
        }

        let Some(index) = self.slots.iter().position(|s| !s.alive) else {
            return Claim::Exhausted;
        };
        let slot = &mut self.slots[index];
        slot.alive = true;
        slot.value = T::default();
        self.bindings.insert(id, Binding::Slot(index));
        Claim::Revived(index)
    }

    /// Forget the id. Its slot stays alive (e.g. for a splash) until killed.
    pub fn release(&mut self, id: SnowballId) -> Option<SlotIndex> {
        match self.bindings.remove(&id)? {
            Binding::Slot(index) => Some(index),
            Binding::Suppressed => {
                self.suppressed.retain(|s| *s != id);
                None
            },
        }
    }

    /// Return a slot to the free list. An id still bound to it is suppressed
    /// so a stale server update cannot resurrect the sprite.
    pub fn kill(&mut self, index: SlotIndex) {
        let Some(slot) = self.slots.get_mut(index) else {
            return;
        };
        slot.alive = false;
        for (id, binding) in &mut self.bindings {
            if *binding == Binding::Slot(index) {
                *binding = Binding::Suppressed;
                self.suppressed.push_back(*id);
            }
        }
        while self.suppressed.len() > MAX_SUPPRESSED {
            if let Some(oldest) = self.suppressed.pop_front() {
                self.bindings.remove(&oldest);
            }
        }
    }

    pub fn is_alive(&self, index: SlotIndex) -> bool {
        self.slots.get(index).is_some_and(|s| s.alive)
    }

    pub fn get(&self, index: SlotIndex) -> Option<&T> {
        self.slots.get(index).map(|s| &s.value)
    }

    pub fn get_mut(&mut self, index: SlotIndex) -> Option<&mut T> {
        self.slots.get_mut(index).map(|s| &mut s.value)
    }

    pub fn alive_count(&self) -> usize {
        self.slots.iter().filter(|s| s.alive).count()
    }

    /// Live slots with their index.
    pub fn iter_alive_mut(&mut self) -> impl Iterator<Item = (SlotIndex, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| s.alive)
            .map(|(i, s)| (i, &mut s.value))
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.alive = false;
            slot.value = T::default();
        }
        self.bindings.clear();
        self.suppressed.clear();
    }
}

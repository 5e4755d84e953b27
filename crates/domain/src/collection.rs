use crate::{Exercise, ExerciseID, PlanID, WorkoutID, WorkoutPlan, WorkoutRecord};

pub trait Entity: Clone + PartialEq {
    type ID: Copy + PartialEq;

    fn id(&self) -> Self::ID;
}

impl Entity for Exercise {
    type ID = ExerciseID;

    fn id(&self) -> ExerciseID {
        self.id
    }
}

impl Entity for WorkoutPlan {
    type ID = PlanID;

    fn id(&self) -> PlanID {
        self.id
    }
}

impl Entity for WorkoutRecord {
    type ID = WorkoutID;

    fn id(&self) -> WorkoutID {
        self.id
    }
}

/// Local copy of a remote collection.
///
/// After a successful remote write, the same change is applied to the local copy instead of
/// refetching the whole collection. This assumes that the remote side does not modify the
/// entity in any other way than reported back by the write. `refresh` replaces the local copy
/// by a fresh fetch and tells whether the assumption was violated.
///
/// The revision is incremented on every change and can be used as a key to memoize values
/// derived from the collection.
#[derive(Debug, Clone)]
pub struct Collection<T: Entity> {
    entries: Vec<T>,
    revision: u64,
}

impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            revision: 0,
        }
    }
}

impl<T: Entity> Collection<T> {
    #[must_use]
    pub fn new(entries: Vec<T>) -> Self {
        Self {
            entries,
            revision: 0,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn get(&self, id: T::ID) -> Option<&T> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn apply_created(&mut self, entity: T) {
        self.entries.push(entity);
        self.revision += 1;
    }

    /// Returns `false` if the entity is not part of the collection.
    pub fn apply_replaced(&mut self, entity: T) -> bool {
        match self.entries.iter_mut().find(|e| e.id() == entity.id()) {
            Some(existing) => {
                *existing = entity;
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    /// Returns `false` if the entity is not part of the collection.
    pub fn apply_deleted(&mut self, id: T::ID) -> bool {
        let len = self.entries.len();
        self.entries.retain(|e| e.id() != id);
        if self.entries.len() == len {
            return false;
        }
        self.revision += 1;
        true
    }

    /// Replace the local copy by `fresh`. Returns `true` if the local copy had diverged.
    pub fn refresh(&mut self, fresh: Vec<T>) -> bool {
        let diverged = self.entries.len() != fresh.len()
            || fresh.iter().any(|f| self.get(f.id()) != Some(f));
        if diverged {
            log::debug!("local copy diverged from remote collection");
            self.revision += 1;
        }
        self.entries = fresh;
        diverged
    }
}

use slotmap::{Key, SlotMap};

use super::object::SceneObject;

/// Storage for one object kind.
///
/// Objects live in a generational slot map; `order` keeps insertion order so
/// hit tests and the visible set iterate deterministically.
#[derive(Debug)]
pub(super) struct KindStore<K: Key, T> {
    objects: SlotMap<K, T>,
    order: Vec<K>,
}

impl<K: Key, T> Default for KindStore<K, T> {
    fn default() -> Self {
        Self { objects: SlotMap::with_key(), order: Vec::new() }
    }
}

impl<K: Key, T: SceneObject> KindStore<K, T> {
    pub(super) fn insert(&mut self, object: T) -> K {
        let id = self.objects.insert(object);
        self.order.push(id);
        id
    }

    pub(super) fn remove(&mut self, id: K) -> Option<T> {
        let object = self.objects.remove(id)?;
        self.order.retain(|k| *k != id);
        Some(object)
    }

    #[inline]
    pub(super) fn get(&self, id: K) -> Option<&T> {
        self.objects.get(id)
    }

    #[inline]
    pub(super) fn get_mut(&mut self, id: K) -> Option<&mut T> {
        self.objects.get_mut(id)
    }

    #[inline]
    pub(super) fn len(&self) -> usize {
        self.order.len()
    }

    /// Ids in insertion order.
    #[inline]
    pub(super) fn ids(&self) -> &[K] {
        &self.order
    }

    /// Objects in insertion order.
    pub(super) fn iter(&self) -> impl Iterator<Item = (K, &T)> {
        self.order
            .iter()
            .filter_map(|&id| self.objects.get(id).map(|object| (id, object)))
    }

    /// Visits every object mutably, in insertion order.
    pub(super) fn for_each_mut(&mut self, mut f: impl FnMut(&mut T)) {
        for &id in &self.order {
            if let Some(object) = self.objects.get_mut(id) {
                f(object);
            }
        }
    }

    /// First object, in insertion order, containing `(x, y)`.
    pub(super) fn find_at(&self, x: f32, y: f32) -> Option<K> {
        self.iter().find(|(_, o)| o.contains(x, y)).map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::CircleColor;
    use crate::scene::{CircleId, GradientCircle};

    fn circle(diameter: f32) -> GradientCircle {
        GradientCircle::new(0.0, 0.0, diameter, CircleColor::Red)
    }

    #[test]
    fn mutable_visit_follows_insertion_order_after_slot_reuse() {
        let mut store: KindStore<CircleId, GradientCircle> = KindStore::default();
        store.insert(circle(1.0));
        let middle = store.insert(circle(2.0));
        store.insert(circle(3.0));
        store.remove(middle);
        // Reuses the freed slot, ahead of 3.0 in storage order.
        store.insert(circle(4.0));

        let mut visited = Vec::new();
        store.for_each_mut(|c| visited.push(c.diameter()));
        assert_eq!(visited, vec![1.0, 3.0, 4.0]);

        let listed: Vec<f32> = store.iter().map(|(_, c)| c.diameter()).collect();
        assert_eq!(listed, visited);
    }
}

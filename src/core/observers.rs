//! Viewport intersection observers.
//!
//! Mirrors the browser's IntersectionObserver: each observer has a
//! visibility threshold and a set of observed nodes. Commands are queued
//! for the browser host; headless runs ask `observers_of` who should be told
//! about a node entering or leaving the viewport.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub u32);

/// Queued change for the browser host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObserverCommand<N> {
    Create { observer: ObserverId, threshold: f64 },
    Observe { observer: ObserverId, node: N },
    Unobserve { observer: ObserverId, node: N },
}

#[derive(Debug, Clone)]
struct ObserverEntry<N> {
    id: ObserverId,
    threshold: f64,
    nodes: Vec<N>,
}

#[derive(Debug, Clone)]
pub struct IntersectionRegistry<N> {
    observers: Vec<ObserverEntry<N>>,
    commands: Vec<ObserverCommand<N>>,
    queue_for_host: bool,
}

impl<N> Default for IntersectionRegistry<N> {
    fn default() -> Self {
        Self {
            observers: Vec::new(),
            commands: Vec::new(),
            queue_for_host: false,
        }
    }
}

impl<N: Copy + PartialEq> IntersectionRegistry<N> {
    /// Headless registry; no commands are queued.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_host() -> Self {
        Self {
            queue_for_host: true,
            ..Self::default()
        }
    }

    fn queue(&mut self, command: ObserverCommand<N>) {
        if self.queue_for_host {
            self.commands.push(command);
        }
    }

    pub fn create(&mut self, threshold: f64) -> ObserverId {
        let id = ObserverId(self.observers.len() as u32 + 1);
        self.observers.push(ObserverEntry {
            id,
            threshold,
            nodes: Vec::new(),
        });
        self.queue(ObserverCommand::Create {
            observer: id,
            threshold,
        });
        id
    }

    fn entry_mut(&mut self, observer: ObserverId) -> Option<&mut ObserverEntry<N>> {
        self.observers.iter_mut().find(|entry| entry.id == observer)
    }

    pub fn observe(&mut self, observer: ObserverId, node: N) {
        if let Some(entry) = self.entry_mut(observer) {
            if !entry.nodes.contains(&node) {
                entry.nodes.push(node);
                self.queue(ObserverCommand::Observe { observer, node });
            }
        }
    }

    pub fn unobserve(&mut self, observer: ObserverId, node: N) {
        if let Some(entry) = self.entry_mut(observer) {
            let before = entry.nodes.len();
            entry.nodes.retain(|&observed| observed != node);
            if entry.nodes.len() != before {
                self.queue(ObserverCommand::Unobserve { observer, node });
            }
        }
    }

    pub fn is_observing(&self, observer: ObserverId, node: N) -> bool {
        self.observers
            .iter()
            .any(|entry| entry.id == observer && entry.nodes.contains(&node))
    }

    pub fn threshold(&self, observer: ObserverId) -> Option<f64> {
        self.observers
            .iter()
            .find(|entry| entry.id == observer)
            .map(|entry| entry.threshold)
    }

    /// Every observer currently watching `node`.
    pub fn observers_of(&self, node: N) -> Vec<ObserverId> {
        self.observers
            .iter()
            .filter(|entry| entry.nodes.contains(&node))
            .map(|entry| entry.id)
            .collect()
    }

    pub fn observed_count(&self, observer: ObserverId) -> usize {
        self.observers
            .iter()
            .find(|entry| entry.id == observer)
            .map_or(0, |entry| entry.nodes.len())
    }

    pub fn take_commands(&mut self) -> Vec<ObserverCommand<N>> {
        std::mem::take(&mut self.commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_and_unobserve() {
        let mut registry = IntersectionRegistry::<u32>::new();
        let lazy = registry.create(0.0);
        let anim = registry.create(0.1);

        registry.observe(lazy, 1);
        registry.observe(anim, 1);
        registry.observe(anim, 2);
        assert_eq!(registry.observers_of(1), vec![lazy, anim]);

        registry.unobserve(lazy, 1);
        assert_eq!(registry.observers_of(1), vec![anim]);
        assert!(!registry.is_observing(lazy, 1));
        assert_eq!(registry.threshold(anim), Some(0.1));
    }

    #[test]
    fn test_commands_queue_for_host() {
        let mut registry = IntersectionRegistry::<u32>::for_host();
        let id = registry.create(0.5);
        registry.observe(id, 9);
        registry.observe(id, 9);
        registry.unobserve(id, 9);
        registry.unobserve(id, 9);

        let commands = registry.take_commands();
        assert_eq!(
            commands,
            vec![
                ObserverCommand::Create {
                    observer: id,
                    threshold: 0.5
                },
                ObserverCommand::Observe {
                    observer: id,
                    node: 9
                },
                ObserverCommand::Unobserve {
                    observer: id,
                    node: 9
                },
            ]
        );
        assert!(registry.take_commands().is_empty());
    }

    #[test]
    fn test_headless_registry_queues_nothing() {
        let mut registry = IntersectionRegistry::<u32>::new();
        let id = registry.create(0.0);
        registry.observe(id, 1);
        registry.unobserve(id, 1);
        assert!(registry.take_commands().is_empty());
    }
}

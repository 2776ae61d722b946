//! Subscription registry for the in-memory bus.
//!
//! Holds the broadcast registry (pattern -> handlers), the group registry
//! (pattern -> group -> handlers) and one round-robin cursor per
//! (pattern, group). The registry is always used behind the bus's
//! `RwLock`: registration takes `&mut self`, planning a publish takes
//! `&self` and advances cursors atomically so concurrent publishes can
//! share the read lock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::handler::Handler;
use crate::subject::SubjectPattern;

/// Broadcast subscriptions under one pattern.
struct Subscription {
    key: Arc<str>,
    pattern: SubjectPattern,
    handlers: Vec<Handler>,
}

/// Handler groups under one pattern.
struct GroupSubscription {
    key: Arc<str>,
    pattern: SubjectPattern,
    groups: Vec<HandlerGroup>,
}

struct HandlerGroup {
    name: Arc<str>,
    handlers: Vec<Handler>,
}

/// One handler invocation planned by `Registry::plan`.
pub(crate) struct Dispatch {
    pub(crate) pattern: Arc<str>,
    pub(crate) group: Option<Arc<str>>,
    pub(crate) handler: Handler,
}

#[derive(Default)]
pub(crate) struct Registry {
    broadcast: Vec<Subscription>,
    broadcast_index: HashMap<Arc<str>, usize>,
    groups: Vec<GroupSubscription>,
    groups_index: HashMap<Arc<str>, usize>,
    /// pattern -> group -> next handler index
    cursors: HashMap<Arc<str>, HashMap<Arc<str>, AtomicUsize>>,
}

impl Registry {
    /// Append a broadcast handler under `pattern`.
    pub(crate) fn subscribe(&mut self, pattern: &str, handler: Handler) {
        if let Some(&i) = self.broadcast_index.get(pattern) {
            self.broadcast[i].handlers.push(handler);
            return;
        }

        let key: Arc<str> = Arc::from(pattern);
        self.broadcast_index
            .insert(Arc::clone(&key), self.broadcast.len());
        self.broadcast.push(Subscription {
            key,
            pattern: SubjectPattern::parse(pattern),
            handlers: vec![handler],
        });
    }

    /// Append a handler to `group` under `pattern`.
    ///
    /// Never resets the group's cursor.
    pub(crate) fn subscribe_group(&mut self, pattern: &str, group: &str, handler: Handler) {
        let i = match self.groups_index.get(pattern) {
            Some(&i) => i,
            None => {
                let key: Arc<str> = Arc::from(pattern);
                self.groups_index.insert(Arc::clone(&key), self.groups.len());
                self.groups.push(GroupSubscription {
                    key,
                    pattern: SubjectPattern::parse(pattern),
                    groups: Vec::new(),
                });
                self.groups.len() - 1
            }
        };

        let subscription = &mut self.groups[i];
        let name = match subscription
            .groups
            .iter_mut()
            .find(|g| g.name.as_ref() == group)
        {
            Some(existing) => {
                existing.handlers.push(handler);
                Arc::clone(&existing.name)
            }
            None => {
                let name: Arc<str> = Arc::from(group);
                subscription.groups.push(HandlerGroup {
                    name: Arc::clone(&name),
                    handlers: vec![handler],
                });
                name
            }
        };

        self.cursors
            .entry(Arc::clone(&subscription.key))
            .or_default()
            .entry(name)
            .or_default();
    }

    /// Work out which handlers receive an event published on `subject`.
    ///
    /// Broadcast handlers come first, pattern by pattern in registration
    /// order. Then every non-empty group under every matching pattern
    /// contributes exactly one handler, chosen by its cursor, and that
    /// cursor advances by one.
    pub(crate) fn plan(&self, subject: &str) -> Vec<Dispatch> {
        let mut plan = Vec::new();

        for subscription in &self.broadcast {
            if !subscription.pattern.matches(subject) {
                continue;
            }
            plan.extend(subscription.handlers.iter().map(|handler| Dispatch {
                pattern: Arc::clone(&subscription.key),
                group: None,
                handler: Arc::clone(handler),
            }));
        }

        for subscription in &self.groups {
            if !subscription.pattern.matches(subject) {
                continue;
            }
            let cursors = self.cursors.get(&subscription.key);

            for group in &subscription.groups {
                if group.handlers.is_empty() {
                    continue;
                }
                let Some(cursor) = cursors.and_then(|c| c.get(&group.name)) else {
                    continue;
                };

                let index = cursor.fetch_add(1, Ordering::Relaxed) % group.handlers.len();
                plan.push(Dispatch {
                    pattern: Arc::clone(&subscription.key),
                    group: Some(Arc::clone(&group.name)),
                    handler: Arc::clone(&group.handlers[index]),
                });
            }
        }

        plan
    }

    /// Total number of registered handlers across both registries.
    pub(crate) fn handler_count(&self) -> usize {
        let broadcast: usize = self.broadcast.iter().map(|s| s.handlers.len()).sum();
        let grouped: usize = self
            .groups
            .iter()
            .flat_map(|s| s.groups.iter())
            .map(|g| g.handlers.len())
            .sum();
        broadcast + grouped
    }

    /// Distinct registered patterns, broadcast first, in registration order.
    pub(crate) fn patterns(&self) -> Vec<String> {
        let mut patterns: Vec<String> = self.broadcast.iter().map(|s| s.key.to_string()).collect();
        for subscription in &self.groups {
            if !self.broadcast_index.contains_key(&subscription.key) {
                patterns.push(subscription.key.to_string());
            }
        }
        patterns
    }

    /// Current cursor value for (pattern, group), if the group exists.
    #[cfg(test)]
    pub(crate) fn cursor(&self, pattern: &str, group: &str) -> Option<usize> {
        self.cursors
            .get(pattern)?
            .get(group)
            .map(|c| c.load(Ordering::Relaxed))
    }
}

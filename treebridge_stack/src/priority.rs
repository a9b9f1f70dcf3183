use crate::tree::RouteNode;

#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub name: String,
    pub priority: i64,
    serial: u64,
    pub node: RouteNode,
}

/// Routes ordered by priority, highest first; equal priorities are tried
/// last-added first.
#[derive(Debug, Clone, Default)]
pub(crate) struct PriorityList {
    entries: Vec<Entry>,
    serial: u64,
}

impl PriorityList {
    /// Insert a route, replacing any route already registered under `name`
    pub(crate) fn insert(&mut self, name: &str, priority: i64, node: RouteNode) {
        self.entries.retain(|e| e.name != name);
        self.serial += 1;
        self.entries.push(Entry {
            name: name.to_string(),
            priority,
            serial: self.serial,
            node,
        });
        self.entries.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| b.serial.cmp(&a.serial))
        });
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Split a `route/child/...` name into the entry it starts with and the rest.
    ///
    /// Route names may themselves contain `/`, so the longest registered name
    /// that is either equal to `name` or followed by `/` in it wins.
    pub(crate) fn resolve<'n>(&self, name: &'n str) -> Option<(&Entry, Option<&'n str>)> {
        self.entries
            .iter()
            .filter_map(|e| {
                if e.name == name {
                    Some((e, None))
                } else {
                    name.strip_prefix(e.name.as_str())
                        .and_then(|rest| rest.strip_prefix('/'))
                        .map(|rest| (e, Some(rest)))
                }
            })
            .max_by_key(|(e, _)| e.name.len())
    }
}

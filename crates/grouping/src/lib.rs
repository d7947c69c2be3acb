use std::collections::{HashMap, HashSet};

use serde_json::Value;
use shared::{
    display::{display_alias, display_group_name},
    domain::{Catalog, Sequence},
    protocol::{GroupMemberView, GroupView},
};

mod stats;

pub use stats::{GroupingStats, WidestSequence};

pub const UNGROUPED: &str = "Ungrouped";

/// Members of one group, as positions into the catalog the index was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    name: String,
    members: Vec<usize>,
}

impl Group {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[usize] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Group name to member sequences. A sequence shows up once under every distinct group
/// it declares, or once under [`UNGROUPED`] if it declares none.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupIndex<'a> {
    catalog: &'a Catalog,
    groups: Vec<Group>,
    by_name: HashMap<String, usize>,
}

/// Builds the index in a single pass over `catalog`. Group lists keep catalog order.
pub fn group(catalog: &Catalog) -> GroupIndex<'_> {
    let mut index = GroupIndex {
        catalog,
        groups: Vec::new(),
        by_name: HashMap::new(),
    };

    for (position, sequence) in catalog.iter().enumerate() {
        let names = distinct_groups(sequence);
        if names.is_empty() {
            index.push(UNGROUPED, position);
            continue;
        }
        for name in names {
            index.push(name, position);
        }
    }

    index
}

/// Declared group names with exact duplicates removed, first occurrence kept.
/// A `groups` value that is not an array counts as no groups; non-string entries are skipped.
pub fn distinct_groups(sequence: &Sequence) -> Vec<&str> {
    let Some(Value::Array(declared)) = &sequence.groups else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    declared
        .iter()
        .filter_map(Value::as_str)
        .filter(|name| seen.insert(*name))
        .collect()
}

impl<'a> GroupIndex<'a> {
    fn push(&mut self, name: &str, position: usize) {
        let slot = match self.by_name.get(name) {
            Some(slot) => *slot,
            None => {
                self.groups.push(Group {
                    name: name.to_string(),
                    members: Vec::new(),
                });
                self.by_name.insert(name.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[slot].members.push(position);
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Group> {
        self.by_name.get(name).map(|slot| &self.groups[*slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Groups in the order they were first seen. This order carries no meaning.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn members(&self, group: &Group) -> Vec<&'a Sequence> {
        let catalog: &'a Catalog = self.catalog;
        group
            .members
            .iter()
            .filter_map(|position| catalog.get(*position))
            .collect()
    }

    pub fn members_of(&self, name: &str) -> Vec<&'a Sequence> {
        self.get(name)
            .map(|group| self.members(group))
            .unwrap_or_default()
    }

    pub fn total_memberships(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Groups by descending size; equal sizes keep first-seen order.
    pub fn largest_first(&self) -> Vec<&Group> {
        let mut ordered: Vec<&Group> = self.groups.iter().collect();
        ordered.sort_by(|a, b| b.len().cmp(&a.len()));
        ordered
    }

    pub fn views(&self) -> Vec<GroupView> {
        self.largest_first()
            .into_iter()
            .map(|group| GroupView {
                name: group.name.clone(),
                display_name: display_group_name(&group.name),
                members: group
                    .members
                    .iter()
                    .filter_map(|position| {
                        self.catalog.get(*position).map(|sequence| GroupMemberView {
                            id: sequence.id.clone(),
                            alias: display_alias(sequence, *position),
                        })
                    })
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

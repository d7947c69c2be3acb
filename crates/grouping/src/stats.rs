use serde::Serialize;
use shared::display::display_alias;

use crate::{distinct_groups, GroupIndex};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidestSequence {
    pub position: usize,
    pub alias: String,
    pub group_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupingStats {
    pub total_sequences: usize,
    pub total_groups: usize,
    pub total_memberships: usize,
    /// Sequences that belong to more than one distinct group.
    pub multi_group_sequences: usize,
    pub widest: Option<WidestSequence>,
}

impl GroupingStats {
    pub fn from_index(index: &GroupIndex<'_>) -> Self {
        let mut multi_group_sequences = 0;
        let mut widest: Option<WidestSequence> = None;

        for (position, sequence) in index.catalog().iter().enumerate() {
            let group_count = distinct_groups(sequence).len();
            if group_count < 2 {
                continue;
            }
            multi_group_sequences += 1;
            if widest
                .as_ref()
                .map_or(true, |current| group_count > current.group_count)
            {
                widest = Some(WidestSequence {
                    position,
                    alias: display_alias(sequence, position),
                    group_count,
                });
            }
        }

        Self {
            total_sequences: index.catalog().len(),
            total_groups: index.len(),
            total_memberships: index.total_memberships(),
            multi_group_sequences,
            widest,
        }
    }

    /// Every sequence is placed at least once.
    pub fn is_consistent(&self) -> bool {
        self.total_memberships >= self.total_sequences
    }
}

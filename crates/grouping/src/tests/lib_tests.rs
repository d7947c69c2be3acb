use serde_json::json;
use shared::domain::SequenceId;

use super::*;

fn catalog(raw: serde_json::Value) -> Catalog {
    serde_json::from_value(raw).expect("catalog")
}

fn ids(sequences: &[&Sequence]) -> Vec<String> {
    sequences
        .iter()
        .map(|sequence| sequence.id.as_str().to_string())
        .collect()
}

fn halloween_catalog() -> Catalog {
    catalog(json!([
        {
            "id": "1",
            "alias": "Spooky",
            "pattern": ["orange", "purple"],
            "colorMode": "rgb",
            "effects": [],
            "groups": ["Halloween", "Party"]
        },
        {
            "id": "2",
            "alias": "Plain",
            "pattern": ["white"],
            "colorMode": "rgb",
            "effects": [],
            "groups": []
        }
    ]))
}

#[test]
fn multi_membership_and_ungrouped_scenario() {
    let catalog = halloween_catalog();
    let index = group(&catalog);

    assert_eq!(index.len(), 3);
    assert_eq!(ids(&index.members_of("Halloween")), vec!["1"]);
    assert_eq!(ids(&index.members_of("Party")), vec!["1"]);
    assert_eq!(ids(&index.members_of(UNGROUPED)), vec!["2"]);
}

#[test]
fn sequence_without_groups_lands_only_in_ungrouped() {
    let catalog = catalog(json!([
        { "id": "a", "pattern": [], "colorMode": "rgb", "effects": [] },
        { "id": "b", "pattern": [], "colorMode": "rgb", "effects": [], "groups": null },
        { "id": "c", "pattern": [], "colorMode": "rgb", "effects": [], "groups": [] }
    ]));
    let index = group(&catalog);

    assert_eq!(index.len(), 1);
    assert_eq!(ids(&index.members_of(UNGROUPED)), vec!["a", "b", "c"]);
}

#[test]
fn duplicate_group_names_collapse() {
    let catalog = catalog(json!([
        { "id": "x", "pattern": [], "colorMode": "rgb", "effects": [], "groups": ["A", "A", "B"] }
    ]));
    let index = group(&catalog);

    assert_eq!(index.get("A").map(Group::positions), Some(&[0][..]));
    assert_eq!(index.get("B").map(Group::positions), Some(&[0][..]));
    assert!(!index.contains(UNGROUPED));
    assert_eq!(index.total_memberships(), 2);
}

#[test]
fn group_names_are_case_sensitive_and_untrimmed() {
    let catalog = catalog(json!([
        {
            "id": "x",
            "pattern": [],
            "colorMode": "rgb",
            "effects": [],
            "groups": ["party", "Party", " Party", "EverLights/Party/"]
        }
    ]));
    let index = group(&catalog);

    assert_eq!(index.len(), 4);
    assert!(index.contains("EverLights/Party/"));
    assert!(index.contains(" Party"));
}

#[test]
fn malformed_groups_count_as_ungrouped() {
    let catalog = catalog(json!([
        { "id": "a", "pattern": [], "colorMode": "rgb", "effects": [], "groups": "Halloween" },
        { "id": "b", "pattern": [], "colorMode": "rgb", "effects": [], "groups": { "x": 1 } },
        { "id": "c", "pattern": [], "colorMode": "rgb", "effects": [], "groups": [1, null] },
        { "id": "d", "pattern": [], "colorMode": "rgb", "effects": [], "groups": ["A", 3, "A"] }
    ]));
    let index = group(&catalog);

    assert_eq!(ids(&index.members_of(UNGROUPED)), vec!["a", "b", "c"]);
    assert_eq!(ids(&index.members_of("A")), vec!["d"]);
    assert_eq!(index.len(), 2);
}

#[test]
fn members_keep_catalog_order() {
    let catalog = catalog(json!([
        { "id": "3", "pattern": [], "colorMode": "rgb", "effects": [], "groups": ["Xmas"] },
        { "id": "1", "pattern": [], "colorMode": "rgb", "effects": [], "groups": ["Winter", "Xmas"] },
        { "id": "2", "pattern": [], "colorMode": "rgb", "effects": [], "groups": ["Xmas"] }
    ]));
    let index = group(&catalog);

    assert_eq!(ids(&index.members_of("Xmas")), vec!["3", "1", "2"]);
    assert_eq!(ids(&index.members_of("Winter")), vec!["1"]);
}

#[test]
fn grouping_twice_is_identical() {
    let catalog = halloween_catalog();
    assert_eq!(group(&catalog), group(&catalog));
}

#[test]
fn membership_sum_matches_catalog_only_without_multi_group_sequences() {
    let single = catalog(json!([
        { "id": "1", "pattern": [], "colorMode": "rgb", "effects": [], "groups": ["A", "A"] },
        { "id": "2", "pattern": [], "colorMode": "rgb", "effects": [], "groups": [] }
    ]));
    assert_eq!(group(&single).total_memberships(), single.len());

    let multi = halloween_catalog();
    assert!(group(&multi).total_memberships() > multi.len());
}

#[test]
fn empty_catalog_has_no_groups() {
    let catalog = Catalog::default();
    let index = group(&catalog);
    assert!(index.is_empty());
    assert_eq!(GroupingStats::from_index(&index).total_memberships, 0);
}

#[test]
fn largest_first_breaks_ties_by_first_appearance() {
    let catalog = catalog(json!([
        { "id": "1", "pattern": [], "colorMode": "rgb", "effects": [], "groups": ["Small", "Big"] },
        { "id": "2", "pattern": [], "colorMode": "rgb", "effects": [], "groups": ["Big"] },
        { "id": "3", "pattern": [], "colorMode": "rgb", "effects": [], "groups": ["Other"] }
    ]));
    let index = group(&catalog);

    let order: Vec<_> = index.largest_first().into_iter().map(Group::name).collect();
    assert_eq!(order, vec!["Big", "Small", "Other"]);
}

#[test]
fn views_use_display_names_and_placeholder_aliases() {
    let catalog = catalog(json!([
        { "id": "1", "pattern": [], "colorMode": "rgb", "effects": [], "groups": ["EverLights/Halloween/"] },
        { "id": "2", "alias": "Pumpkin", "pattern": [], "colorMode": "rgb", "effects": [], "groups": ["EverLights/Halloween/"] }
    ]));
    let views = group(&catalog).views();

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].name, "EverLights/Halloween/");
    assert_eq!(views[0].display_name, "Halloween");
    assert_eq!(views[0].members[0].id, SequenceId("1".into()));
    assert_eq!(views[0].members[0].alias, "Light Pattern 1");
    assert_eq!(views[0].members[1].alias, "Pumpkin");
}

#[test]
fn stats_report_widest_sequence() {
    let catalog = catalog(json!([
        { "id": "1", "alias": "Two", "pattern": [], "colorMode": "rgb", "effects": [], "groups": ["A", "B"] },
        { "id": "2", "alias": "Three", "pattern": [], "colorMode": "rgb", "effects": [], "groups": ["A", "B", "C", "C"] },
        { "id": "3", "pattern": [], "colorMode": "rgb", "effects": [] }
    ]));
    let stats = GroupingStats::from_index(&group(&catalog));

    assert_eq!(stats.total_sequences, 3);
    assert_eq!(stats.total_groups, 4);
    assert_eq!(stats.total_memberships, 6);
    assert_eq!(stats.multi_group_sequences, 2);
    assert_eq!(
        stats.widest,
        Some(WidestSequence {
            position: 1,
            alias: "Three".into(),
            group_count: 3,
        })
    );
    assert!(stats.is_consistent());
}

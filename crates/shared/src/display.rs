use crate::domain::Sequence;

const GROUP_NAMESPACE: &str = "EverLights/";
const UNGROUPED_LABEL: &str = "Ungrouped";

/// Alias to show for the sequence at `position` (0-based) in its catalog.
pub fn display_alias(sequence: &Sequence, position: usize) -> String {
    match sequence.alias().map(str::trim) {
        Some(alias) if !alias.is_empty() => alias.to_string(),
        _ => format!("Light Pattern {}", position + 1),
    }
}

/// Group name without the controller's namespace and its first remaining `/`.
/// A name that cleans down to nothing is shown as `Ungrouped`.
pub fn display_group_name(raw: &str) -> String {
    let cleaned = raw.replacen(GROUP_NAMESPACE, "", 1).replacen('/', "", 1);
    if cleaned.is_empty() {
        UNGROUPED_LABEL.to_string()
    } else {
        cleaned
    }
}

use itertools::Itertools;

use crate::forms::{FieldKind, FieldSpec};
use crate::model::{ParamValue, ParameterSet, QueryDescriptor, QueryRegistry};

pub fn render_menu(registry: &QueryRegistry) -> String {
    let entries = registry
        .iter()
        .enumerate()
        .map(|(index, descriptor)| format!("{:>3}. {} [{}]", index + 1, descriptor.label, descriptor.id()))
        .join("\n");
    format!("-- Select a query --\n{}", entries)
}

fn field_hint(field: &FieldSpec) -> String {
    match field.kind {
        FieldKind::Date => "YYYY-MM-DD".to_string(),
        FieldKind::DateTime => "YYYY-MM-DDTHH:MM".to_string(),
        FieldKind::Limit { min, max } => format!("{}..{}", min, max),
        FieldKind::Choice(options) => options.join("|"),
        FieldKind::MultiChoice(options) => format!("comma separated: {}", options.join("|")),
        FieldKind::Text => "text".to_string(),
    }
}

fn field_value(value: Option<&ParamValue>) -> String {
    match value {
        Some(ParamValue::Number(n)) => n.to_string(),
        Some(ParamValue::Text(text)) if !text.is_empty() => text.clone(),
        Some(ParamValue::List(items)) if !items.is_empty() => items.join(", "),
        _ => "-".to_string(),
    }
}

/// The active query with its current field values
pub fn render_form(descriptor: &QueryDescriptor, params: &ParameterSet) -> String {
    let mut lines = vec![format!("> {}  (back: choose another query)", descriptor.label)];
    if descriptor.fields.is_empty() {
        lines.push("  no parameters".to_string());
    }
    for field in descriptor.fields {
        lines.push(format!(
            "  {}{} [{}] = {}   ({})",
            field.label,
            if field.required { "" } else { " (optional)" },
            field.name,
            field_value(params.get(field.name)),
            field_hint(field),
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QueryKind;

    #[test]
    fn test_menu_lists_every_query_in_order() {
        let registry = QueryRegistry::new();
        let menu = render_menu(&registry);
        assert_eq!(menu.lines().count(), registry.len() + 1);
        assert!(menu.contains("  1. Find all employees that are a given position [employees_by_position]"));
    }

    #[test]
    fn test_form_shows_blank_and_filled_fields() {
        let descriptor = QueryKind::ContractOverlap.descriptor();
        let params = ParameterSet::new()
            .with("start_date", "2024-01-01")
            .with("end_date", "");
        let text = render_form(descriptor, &params);
        assert!(text.contains("From [start_date] = 2024-01-01"));
        assert!(text.contains("Until [end_date] = -"));
        assert!(text.contains("Name contains (optional) [name_search] = -"));
    }
}

//! Field lookup within a fetched item.

use std::collections::HashMap;

use crate::domain::Item;
use crate::errors::{ConnectError, Result};

/// Section label to section id. Sections without a label are left out.
pub fn section_ids(item: &Item) -> HashMap<&str, &str> {
    item.sections
        .iter()
        .filter_map(|section| section.label.as_deref().map(|label| (label, section.id.as_str())))
        .collect()
}

/// Find the value of `field` in `section` of an item.
///
/// Fields are matched on their label, never their id. A field without a
/// section matches whatever section was asked for; a field inside a section
/// matches only when that section's label is `section`. The first match in
/// item order wins and a field without a value reads as the empty string.
pub fn locate<'a>(item: &'a Item, section: &str, field: &str) -> Result<&'a str> {
    let sections = section_ids(item);
    let wanted_section = sections.get(section).copied();

    item.fields
        .iter()
        .find(|candidate| {
            candidate.label.as_deref() == Some(field)
                && match candidate.section_id() {
                    None => true,
                    Some(id) => wanted_section == Some(id),
                }
        })
        .map(|found| found.value.as_deref().unwrap_or(""))
        .ok_or_else(|| ConnectError::UnknownSectionOrField {
            section: section.to_string(),
            field: field.to_string(),
        })
}

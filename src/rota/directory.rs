use super::CodeTables;
use crate::models::RegulationDocument;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

lazy_static! {
    static ref NAME_SEPARATORS: Regex = Regex::new(r"[/,&()]+").expect("valid name separator regex");
}

/// A selectable department: display name and the abbreviation used in the
/// at-a-glance schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentRef {
    pub name: String,
    pub code: String,
}

/// Department list plus a free-text search index over it
#[derive(Debug, Clone, Default)]
pub struct DepartmentDirectory {
    departments: Vec<DepartmentRef>,
    terms: BTreeMap<String, usize>,
}

impl DepartmentDirectory {
    pub fn new(regulations: &RegulationDocument, tables: &CodeTables) -> Self {
        let mut directory = Self::default();

        for entry in regulations.departments() {
            let position = directory.departments.len();
            directory.departments.push(DepartmentRef {
                name: entry.department.clone(),
                code: entry.abbreviation.clone(),
            });

            let name = entry.department.to_lowercase();
            let mut terms: Vec<String> = NAME_SEPARATORS
                .split(&name)
                .map(str::trim)
                .filter(|term| term.len() > 1)
                .map(str::to_string)
                .collect();
            terms.push(name.clone());
            terms.push(entry.abbreviation.replace('*', "").to_lowercase());
            if let Some(aliases) = tables.aliases.get(&entry.abbreviation) {
                terms.extend(aliases.iter().map(|alias| alias.to_lowercase()));
            }

            // Later departments win shared terms
            for term in terms {
                directory.terms.insert(term, position);
            }
        }

        debug!(
            "Department directory: {} departments, {} search terms",
            directory.departments.len(),
            directory.terms.len()
        );
        directory
    }

    /// Departments in regulation order
    pub fn list(&self) -> &[DepartmentRef] {
        &self.departments
    }

    /// Find a department by abbreviation, name, or search term
    pub fn resolve(&self, query: &str) -> Option<&DepartmentRef> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(found) = self
            .departments
            .iter()
            .find(|d| d.code.eq_ignore_ascii_case(query))
        {
            return Some(found);
        }
        if let Some(found) = self
            .departments
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(query))
        {
            return Some(found);
        }

        let lowered = query.to_lowercase();
        self.terms
            .get(&lowered)
            .or_else(|| {
                self.terms
                    .iter()
                    .find(|(term, _)| term.starts_with(&lowered))
                    .map(|(_, position)| position)
            })
            .and_then(|&position| self.departments.get(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegulationEntry;

    fn regulations() -> RegulationDocument {
        let row = |abbreviation: &str, department: &str| RegulationEntry {
            abbreviation: abbreviation.to_string(),
            department: department.to_string(),
            duration: "2 weeks".to_string(),
        };
        RegulationDocument {
            regulations: vec![
                row("GM", "General Medicine"),
                row("OBG", "Obstetrics & Gynaecology"),
                row("RD*", "Radio-Diagnosis"),
                row("", "TOTAL"),
            ],
            note: String::new(),
        }
    }

    #[test]
    fn test_list_skips_totals() {
        let directory = DepartmentDirectory::new(&regulations(), &CodeTables::default());
        let codes: Vec<&str> = directory.list().iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["GM", "OBG", "RD*"]);
    }

    #[test]
    fn test_resolve_by_code_name_and_alias() {
        let directory = DepartmentDirectory::new(&regulations(), &CodeTables::default());

        // Exact abbreviation, any case
        assert_eq!(directory.resolve("obg").unwrap().code, "OBG");
        // Exact name
        assert_eq!(directory.resolve("general medicine").unwrap().code, "GM");
        // Piece of a split name
        assert_eq!(directory.resolve("Gynaecology").unwrap().code, "OBG");
        // Alias from the code tables
        assert_eq!(directory.resolve("radiology").unwrap().code, "RD*");
        // Abbreviation without the star
        assert_eq!(directory.resolve("rd").unwrap().code, "RD*");
        // Prefix of a term
        assert_eq!(directory.resolve("obstet").unwrap().code, "OBG");
    }

    #[test]
    fn test_resolve_unknown() {
        let directory = DepartmentDirectory::new(&regulations(), &CodeTables::default());
        assert!(directory.resolve("").is_none());
        assert!(directory.resolve("astronomy").is_none());
    }
}

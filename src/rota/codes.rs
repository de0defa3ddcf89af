use crate::error::{config_error, RotaResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Data-driven code mappings.
///
/// `canonical` fixes cosmetic spelling drift in posting codes before a legend
/// lookup and must stay one-to-one. `equivalents` lists the literal schedule
/// codes that satisfy a department query. `aliases` feeds free-text
/// department search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTables {
    #[serde(default)]
    pub canonical: BTreeMap<String, String>,
    #[serde(default)]
    pub equivalents: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
}

fn owned_map<V: Clone>(pairs: &[(&str, V)]) -> BTreeMap<String, V> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for CodeTables {
    fn default() -> Self {
        let canonical = owned_map(&[
            ("GM - FMTW", "GM - FMW".to_string()),
            ("FP & AY", "FP&AY".to_string()),
        ]);

        let equivalents = owned_map(&[
            ("RD*", owned_list(&["R&L", "RD"])),
            ("LAB*", owned_list(&["R&L", "LABS"])),
            ("LABS*", owned_list(&["R&L", "LABS"])),
            ("FP", owned_list(&["FP&AY", "FWP"])),
            ("AY*", owned_list(&["FP&AY", "AYUSH"])),
            ("AYUSH*", owned_list(&["FP&AY", "AYUSH"])),
            ("TB*", owned_list(&["TB"])),
        ]);

        let aliases = owned_map(&[
            ("PSM", owned_list(&["psm", "cm", "community", "social", "preventive"])),
            ("GM", owned_list(&["gm", "medicine", "general"])),
            ("GS", owned_list(&["gs", "surgery"])),
            (
                "OBG",
                owned_list(&["obg", "obs", "gyn", "gynae", "obstetrics", "gynaecology"]),
            ),
            ("PED", owned_list(&["ped", "paediatrics", "pediatrics"])),
            (
                "ORT",
                owned_list(&["ort", "ortho", "pmr", "rehabilitation", "physical medicine"]),
            ),
            ("OPT", owned_list(&["opt", "eye", "ophth", "ophthalmology"])),
            (
                "ENT",
                owned_list(&["ent", "ear", "nose", "throat", "otorhinolaryngology"]),
            ),
            ("EM", owned_list(&["em", "emergency", "casualty", "trauma"])),
            (
                "ANS",
                owned_list(&["ans", "anesthesia", "anaesthesia", "critical", "care"]),
            ),
            ("PSY", owned_list(&["psy", "psych", "psychiatry"])),
            (
                "DVL",
                owned_list(&["dvl", "derm", "skin", "venereology", "leprosy", "dermatology"]),
            ),
            ("FP", owned_list(&["fp", "family", "welfare", "planning"])),
            ("FMT", owned_list(&["fmt", "forensic", "toxicology"])),
            ("RD*", owned_list(&["rd", "radio", "radiology", "diagnosis"])),
            (
                "LAB*",
                owned_list(&["lab", "labs", "path", "micro", "pathology", "microbiology"]),
            ),
            ("TB*", owned_list(&["tb", "dots", "tuberculosis"])),
            ("AY*", owned_list(&["ay", "ayur", "ayurvedic", "ayush"])),
        ]);

        Self {
            canonical,
            equivalents,
            aliases,
        }
    }
}

impl CodeTables {
    /// Overlay another table set: its keys replace ours
    pub fn merge(&mut self, other: CodeTables) {
        self.canonical.extend(other.canonical);
        self.equivalents.extend(other.equivalents);
        self.aliases.extend(other.aliases);
    }

    /// Reject canonicalization tables where a target is itself remapped,
    /// which would make canonicalization depend on how often it is applied.
    pub fn validate(&self) -> RotaResult<()> {
        for (raw, target) in &self.canonical {
            if let Some(next) = self.canonical.get(target) {
                if next != target {
                    return Err(config_error(&format!(
                        "canonical code \"{}\" for \"{}\" is itself remapped to \"{}\"",
                        target, raw, next
                    )));
                }
            }
        }
        Ok(())
    }

    /// Map a raw posting code to its reference spelling
    pub fn canonicalize<'a>(&'a self, code: &'a str) -> &'a str {
        let code = code.trim();
        self.canonical.get(code).map(String::as_str).unwrap_or(code)
    }

    /// Every literal schedule code that satisfies a department query: the
    /// input, the input without any `prefix/` disambiguation, and the
    /// configured equivalents of the stripped code.
    pub fn equivalent_codes(&self, department: &str) -> BTreeSet<String> {
        let department = department.trim();
        let stripped = department.rsplit('/').next().unwrap_or(department);

        let mut codes = BTreeSet::new();
        codes.insert(department.to_string());
        codes.insert(stripped.to_string());
        if let Some(mapped) = self.equivalents.get(stripped) {
            codes.extend(mapped.iter().cloned());
        }
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize() {
        let tables = CodeTables::default();
        assert_eq!(tables.canonicalize("GM - FMTW"), "GM - FMW");
        assert_eq!(tables.canonicalize(" FP & AY "), "FP&AY");
        assert_eq!(tables.canonicalize("PSM - UHC"), "PSM - UHC");
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        let tables = CodeTables::default();
        let known = tables
            .canonical
            .keys()
            .chain(tables.canonical.values())
            .cloned()
            .collect::<Vec<_>>();
        for code in known {
            let once = tables.canonicalize(&code).to_string();
            assert_eq!(tables.canonicalize(&once), once);
        }
    }

    #[test]
    fn test_validate_rejects_chains() {
        assert!(CodeTables::default().validate().is_ok());

        let mut tables = CodeTables::default();
        tables
            .canonical
            .insert("FP&AY".to_string(), "FWP".to_string());
        assert!(tables.validate().is_err());
    }

    #[test]
    fn test_equivalent_codes() {
        let tables = CodeTables::default();

        let codes = tables.equivalent_codes("RD*");
        assert!(codes.contains("RD*"));
        assert!(codes.contains("R&L"));
        assert!(codes.contains("RD"));
        assert_eq!(codes.len(), 3);

        let codes = tables.equivalent_codes("CM/AY*");
        assert!(codes.contains("CM/AY*"));
        assert!(codes.contains("AY*"));
        assert!(codes.contains("FP&AY"));
        assert!(codes.contains("AYUSH"));

        let codes = tables.equivalent_codes("ENT");
        assert_eq!(codes.into_iter().collect::<Vec<_>>(), vec!["ENT"]);
    }

    #[test]
    fn test_equivalents_always_include_input() {
        let tables = CodeTables::default();
        for code in ["GM", "A/B/TB*", "", "R&L", "LABS*"] {
            assert!(tables.equivalent_codes(code).contains(code));
        }
    }

    #[test]
    fn test_merge_from_toml() {
        let overlay: CodeTables = toml::from_str(
            r#"
            [canonical]
            "R&L" = "RD*"

            [equivalents]
            "TB*" = ["TB", "DOTS"]
            "#,
        )
        .unwrap();
        assert!(overlay.aliases.is_empty());

        let mut tables = CodeTables::default();
        tables.merge(overlay);
        assert_eq!(tables.canonicalize("R&L"), "RD*");
        assert_eq!(tables.canonicalize("GM - FMTW"), "GM - FMW");
        assert_eq!(tables.equivalents["TB*"], vec!["TB", "DOTS"]);
        assert!(tables.validate().is_ok());
    }
}

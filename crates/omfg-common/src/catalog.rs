//! Lookup tables for varnos, columns and vertical coordinate types.
//!
//! A [`Catalog`] is built once and then only read. Two lookup styles are
//! offered on purpose:
//!
//! - strict lookups (`varno`, `column`, `vertco_type`) return an error for
//!   unknown keys and are used when resolving chart requests;
//! - tolerant lookups (`varno_name`, `varno_desc`, `varno_type_by_name`,
//!   `vertco_label`) return [`UNKNOWN`] or an empty group and are used for
//!   descriptive output such as collation indexes.

use std::collections::HashMap;
use std::sync::Arc;

use crate::column::{Column, COLUMN_LABELS};
use crate::error::{OmfgError, OmfgResult};
use crate::varno::{Varno, VarnoType, VARNO_TABLE};
use crate::vertco::{VertcoType, VERTCO_LABELS};

/// Sentinel returned by tolerant lookups.
pub const UNKNOWN: &str = "unknown";

/// Read-only domain tables.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    varnos: HashMap<i32, Varno>,
    varno_codes: HashMap<String, i32>,
    varno_types: HashMap<String, Arc<VarnoType>>,
    columns: HashMap<String, Column>,
    vertco_types: HashMap<i32, VertcoType>,
}

impl Catalog {
    /// Create empty tables.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in tables.
    pub fn standard() -> Self {
        let mut catalog = Self::empty();

        for varno_type in VarnoType::builtin() {
            catalog.add_varno_type(varno_type);
        }

        for (code, name, desc, group) in VARNO_TABLE {
            let group = group.and_then(|g| catalog.group(g));
            catalog.insert_varno(*code, name, desc, group);
        }

        for (name, label) in COLUMN_LABELS {
            catalog.add_column(*name, label.map(str::to_string));
        }

        for (code, label) in VERTCO_LABELS {
            catalog.add_vertco_type(*code, *label);
        }

        catalog
    }

    /// Register a varno group. Replaces any group with the same name.
    pub fn add_varno_type(&mut self, varno_type: VarnoType) {
        self.varno_types
            .insert(varno_type.name.clone(), Arc::new(varno_type));
    }

    /// Register a varno, optionally as a member of an already registered group.
    pub fn add_varno(
        &mut self,
        code: i32,
        name: &str,
        desc: &str,
        group: Option<&str>,
    ) -> OmfgResult<()> {
        let group = match group {
            Some(group_name) => Some(self.group(group_name).ok_or_else(|| {
                OmfgError::invalid_parameter("varno_type", format!("unknown group {}", group_name))
            })?),
            None => None,
        };
        self.insert_varno(code, name, desc, group);
        Ok(())
    }

    pub fn add_column(&mut self, name: impl Into<String>, label: Option<String>) {
        let name = name.into();
        self.columns.insert(name.clone(), Column::new(name, label));
    }

    pub fn add_vertco_type(&mut self, code: i32, label: impl Into<String>) {
        self.vertco_types.insert(code, VertcoType::new(code, label));
    }

    fn group(&self, name: &str) -> Option<Arc<VarnoType>> {
        self.varno_types.get(name).cloned()
    }

    fn insert_varno(&mut self, code: i32, name: &str, desc: &str, group: Option<Arc<VarnoType>>) {
        self.varno_codes.insert(name.to_string(), code);
        self.varnos.insert(code, Varno::new(code, name, desc, group));
    }

    // === Strict lookups ===

    /// Look up a varno by code.
    pub fn varno(&self, code: i32) -> OmfgResult<Varno> {
        self.varnos
            .get(&code)
            .cloned()
            .ok_or_else(|| OmfgError::UnknownVarno(code.to_string()))
    }

    /// Look up a column by its raw field name.
    pub fn column(&self, name: &str) -> OmfgResult<Column> {
        self.columns
            .get(name)
            .cloned()
            .ok_or_else(|| OmfgError::UnknownColumn(name.to_string()))
    }

    /// Look up a vertical coordinate type by code.
    pub fn vertco_type(&self, code: i32) -> OmfgResult<VertcoType> {
        self.vertco_types
            .get(&code)
            .cloned()
            .ok_or_else(|| OmfgError::InvalidVertcoType(code.to_string()))
    }

    // === Tolerant lookups ===

    /// Varno name for a code, or [`UNKNOWN`].
    pub fn varno_name(&self, code: i32) -> &str {
        self.varnos.get(&code).map(Varno::name).unwrap_or(UNKNOWN)
    }

    /// Varno code for a name.
    pub fn varno_code(&self, name: &str) -> Option<i32> {
        self.varno_codes.get(name).copied()
    }

    /// Varno description for a name, or [`UNKNOWN`].
    pub fn varno_desc(&self, name: &str) -> &str {
        self.varno_code(name)
            .and_then(|code| self.varnos.get(&code))
            .map(Varno::desc)
            .unwrap_or(UNKNOWN)
    }

    /// The group of a varno by name; an empty group when there is none.
    pub fn varno_type_by_name(&self, name: &str) -> VarnoType {
        self.varno_code(name)
            .and_then(|code| self.varnos.get(&code))
            .and_then(Varno::varno_type)
            .cloned()
            .unwrap_or_else(|| VarnoType::empty(UNKNOWN))
    }

    /// Label for a vertco type code, or [`UNKNOWN`].
    pub fn vertco_label(&self, code: i32) -> &str {
        self.vertco_types
            .get(&code)
            .map(VertcoType::label)
            .unwrap_or(UNKNOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::varno::Formula;

    #[test]
    fn test_standard_varno() {
        let catalog = Catalog::standard();
        let t2m = catalog.varno(39).unwrap();
        let temperature = VarnoType::temperature();
        assert_eq!(t2m.name(), "t2m");
        assert_eq!(t2m.code(), 39);
        assert_eq!(t2m.desc(), "2m Temperature");
        assert_eq!(t2m.cmap(), temperature.cmap.as_ref());
        assert_eq!(t2m.formula(), temperature.formula.as_ref());
        assert_eq!(t2m.levels(), temperature.levels.as_ref());
        assert_eq!(t2m.units(), temperature.units.as_deref());
    }

    #[test]
    fn test_varno_without_type_has_no_metadata() {
        let varno = Catalog::standard().varno(215).unwrap();
        assert!(varno.cmap().is_none());
        assert!(varno.formula().is_none());
        assert!(varno.levels().is_none());
        assert!(varno.units().is_none());
    }

    #[test]
    fn test_strict_lookups_fail() {
        let catalog = Catalog::standard();
        assert!(matches!(catalog.varno(-1), Err(OmfgError::UnknownVarno(_))));
        assert!(matches!(catalog.column("lat@hdr"), Err(OmfgError::UnknownColumn(_))));
        assert!(matches!(catalog.vertco_type(17), Err(OmfgError::InvalidVertcoType(_))));
        assert!(matches!(catalog.vertco_type(0), Err(OmfgError::InvalidVertcoType(_))));
    }

    #[test]
    fn test_lookups_are_exact() {
        let catalog = Catalog::standard();
        assert!(catalog.column("AN_DEPAR@BODY").is_err());
        assert!(catalog.column("an_depar").is_err());
        assert_eq!(catalog.varno_code("T2M"), None);
    }

    #[test]
    fn test_tolerant_lookups() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.varno_name(39), "t2m");
        assert_eq!(catalog.varno_name(-1), UNKNOWN);
        assert_eq!(catalog.varno_code("t2m"), Some(39));
        assert_eq!(catalog.varno_code("foo"), None);
        assert_eq!(catalog.varno_desc("t2m"), "2m Temperature");
        assert_eq!(catalog.varno_desc("foo"), UNKNOWN);
        assert_eq!(catalog.vertco_label(7), "Channel Number");
        assert_eq!(catalog.vertco_label(99), UNKNOWN);
    }

    #[test]
    fn test_varno_type_by_name() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.varno_type_by_name("t2m").units.as_deref(), Some("Degrees Celsius"));

        for name in ["1dvar", "foo"] {
            let group = catalog.varno_type_by_name(name);
            assert!(group.cmap.is_none());
            assert!(group.formula.is_none());
            assert!(group.levels.is_none());
            assert!(group.units.is_none());
        }
    }

    #[test]
    fn test_columns_and_labels() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.column("an_depar@body").unwrap().label(), Some("O-A"));
        assert_eq!(catalog.column("fg_depar@body").unwrap().label(), Some("O-B"));
        assert_eq!(catalog.column("obsvalue@body").unwrap().label(), None);
    }

    #[test]
    fn test_custom_catalog() {
        let mut catalog = Catalog::empty();
        let mut group = VarnoType::empty("scaled");
        group.formula = Some(crate::ByKind::new(Formula::Identity, Formula::PascalToHectopascal));
        catalog.add_varno_type(group);
        catalog.add_varno(900, "test", "Test Variable", Some("scaled")).unwrap();
        catalog.add_varno(901, "plain", "Plain Variable", None).unwrap();

        assert!(catalog.add_varno(902, "bad", "Bad Group", Some("missing")).is_err());
        assert!(catalog.varno(39).is_err());
        assert_eq!(
            catalog.varno(900).unwrap().formula().map(|f| f.value),
            Some(Formula::PascalToHectopascal)
        );
        assert!(catalog.varno(901).unwrap().formula().is_none());
    }
}

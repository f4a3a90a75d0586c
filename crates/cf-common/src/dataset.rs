//! Labeled datasets: dimensions, coordinate and data variables, global
//! attributes.

use std::collections::BTreeMap;

use crate::attrs::Attributes;
use crate::error::{CfError, CfResult};
use crate::variable::Variable;

/// A collection of named variables sharing a dimension namespace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Dimension name -> extent
    pub dims: BTreeMap<String, usize>,
    pub coords: BTreeMap<String, Variable>,
    pub data_vars: BTreeMap<String, Variable>,
    pub attrs: Attributes,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }

    /// Add (or replace) a coordinate variable.
    ///
    /// A name already used by a data variable is rejected.
    pub fn add_coord(&mut self, name: impl Into<String>, var: Variable) -> CfResult<()> {
        let name = name.into();
        if self.data_vars.contains_key(&name) {
            return Err(CfError::DuplicateVariable(name));
        }
        self.register_dims(&name, &var)?;
        let replaced = self.coords.insert(name, var);
        self.prune_dims(replaced);
        Ok(())
    }

    /// Add (or replace) a data variable.
    ///
    /// A 1-D variable named after its own dimension is a dimension coordinate
    /// and is stored with the coordinates instead. Any other name already used
    /// by a coordinate is rejected.
    pub fn add_data_var(&mut self, name: impl Into<String>, var: Variable) -> CfResult<()> {
        let name = name.into();
        if var.dims.len() == 1 && var.dims[0] == name {
            return self.add_coord(name, var);
        }
        if self.coords.contains_key(&name) {
            return Err(CfError::DuplicateVariable(name));
        }
        self.register_dims(&name, &var)?;
        let replaced = self.data_vars.insert(name, var);
        self.prune_dims(replaced);
        Ok(())
    }

    /// Record the variable's dimension extents, rejecting conflicts.
    fn register_dims(&mut self, name: &str, var: &Variable) -> CfResult<()> {
        if var.dims.len() != var.data.ndim() {
            return Err(CfError::RankMismatch {
                variable: name.to_string(),
                dims: var.dims.len(),
                rank: var.data.ndim(),
            });
        }
        for (dim, size) in var.sizes() {
            if let Some(&existing) = self.dims.get(dim) {
                // Replacing a variable may legitimately resize a dimension
                // only it uses; everything else must agree.
                if existing != size && self.dim_used_elsewhere(dim, name) {
                    return Err(CfError::DimensionConflict {
                        dim: dim.to_string(),
                        variable: name.to_string(),
                        existing,
                        found: size,
                    });
                }
            }
        }
        for (dim, size) in var.sizes() {
            self.dims.insert(dim.to_string(), size);
        }
        Ok(())
    }

    /// Drop dimensions of a replaced variable that nothing uses any more.
    fn prune_dims(&mut self, replaced: Option<Variable>) {
        let old = match replaced {
            Some(old) => old,
            None => return,
        };
        for dim in old.dims {
            let in_use = self
                .variables()
                .any(|(_, var)| var.dims.iter().any(|d| *d == dim));
            if !in_use {
                self.dims.remove(&dim);
            }
        }
    }

    fn dim_used_elsewhere(&self, dim: &str, except: &str) -> bool {
        self.variables()
            .any(|(name, var)| name != except && var.dims.iter().any(|d| d == dim))
    }

    /// Look up a variable among coordinates, then data variables.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.coords.get(name).or_else(|| self.data_vars.get(name))
    }

    /// Like [`Dataset::variable`] but returns an error for unknown names.
    pub fn get(&self, name: &str) -> CfResult<&Variable> {
        self.variable(name)
            .ok_or_else(|| CfError::VariableNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.coords.contains_key(name) || self.data_vars.contains_key(name)
    }

    pub fn is_coord(&self, name: &str) -> bool {
        self.coords.contains_key(name)
    }

    /// Iterate over all variables, coordinates first.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.coords
            .iter()
            .chain(self.data_vars.iter())
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn variable_names(&self) -> Vec<&str> {
        self.variables().map(|(name, _)| name).collect()
    }

    pub fn coord_names(&self) -> Vec<&str> {
        self.coords.keys().map(String::as_str).collect()
    }

    pub fn data_var_names(&self) -> Vec<&str> {
        self.data_vars.keys().map(String::as_str).collect()
    }

    /// Extent of a dimension.
    pub fn size(&self, dim: &str) -> Option<usize> {
        self.dims.get(dim).copied()
    }

    pub fn sizes(&self) -> &BTreeMap<String, usize> {
        &self.dims
    }

    /// Deep copy with every variable's attributes emptied.
    ///
    /// Values, encodings and global attributes are kept.
    pub fn strip_attrs(&self) -> Self {
        let mut copy = self.clone();
        for var in copy.coords.values_mut().chain(copy.data_vars.values_mut()) {
            var.attrs.clear();
        }
        copy
    }

    /// Move a data variable into the coordinates.
    pub fn set_coord(&mut self, name: &str) -> CfResult<()> {
        let var = self
            .data_vars
            .remove(name)
            .ok_or_else(|| CfError::VariableNotFound(name.to_string()))?;
        self.coords.insert(name.to_string(), var);
        Ok(())
    }
}

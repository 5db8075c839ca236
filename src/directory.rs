//! Insertion-ordered collection of groups looked up by name

use crate::error::{try_own, FatalError, GroupError, LedgerError};
use crate::group::Group;
use std::collections::HashMap;

/// Groups in creation order with a name-to-position index
#[derive(Debug, Clone, Default)]
pub struct GroupDirectory {
    groups: Vec<Group>,
    index: HashMap<String, usize>,
}

impl GroupDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a group after every existing one.
    ///
    /// Fails with `GroupError::Duplicate` when the name is taken, or with
    /// `FatalError::OutOfMemory` when the record cannot be allocated.
    pub fn add_group(&mut self, name: &str) -> Result<&mut Group, LedgerError> {
        if self.index.contains_key(name) {
            return Err(GroupError::Duplicate {
                name: name.to_string(),
            }
            .into());
        }

        self.groups
            .try_reserve(1)
            .map_err(FatalError::out_of_memory("group record"))?;
        self.index
            .try_reserve(1)
            .map_err(FatalError::out_of_memory("group index entry"))?;
        let group_name = try_own(name, "group name")?;
        let index_name = try_own(name, "group name")?;

        let position = self.groups.len();
        self.index.insert(index_name, position);
        self.groups.push(Group::new(group_name));
        Ok(&mut self.groups[position])
    }

    /// Look up a group by name
    pub fn find_group(&self, name: &str) -> Result<&Group, GroupError> {
        self.index
            .get(name)
            .map(|&i| &self.groups[i])
            .ok_or_else(|| GroupError::NotFound {
                name: name.to_string(),
            })
    }

    /// Look up a group by name for mutation
    pub fn find_group_mut(&mut self, name: &str) -> Result<&mut Group, GroupError> {
        match self.index.get(name) {
            Some(&i) => Ok(&mut self.groups[i]),
            None => Err(GroupError::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Group names in creation order
    pub fn list_groups(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.iter().map(Group::name)
    }

    /// Groups in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Group> + '_ {
        self.groups.iter()
    }

    /// Get the number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

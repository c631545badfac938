// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Bridge to a host's named-variable store.
//!
//! Lookups try the shared stage scope first and fall back to the calling
//! actor's own scope.

use serde_json::Value;
use std::collections::HashMap;

/// Namespace a variable lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Shared by every actor.
    Stage,
    /// Private to the calling actor.
    Actor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Scalar,
    List,
}

impl VariableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scalar => "",
            Self::List => "list",
        }
    }
}

/// A host variable. `value` is written in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueHolder {
    pub value: Value,
    /// Cleared whenever the value changes so the host redraws any monitor.
    pub monitor_up_to_date: bool,
}

impl ValueHolder {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            monitor_up_to_date: true,
        }
    }
}

/// Host-provided variable lookup.
pub trait VariableStore {
    fn lookup(&self, scope: Scope, name: &str, kind: VariableKind) -> Option<&ValueHolder>;

    fn lookup_mut(
        &mut self,
        scope: Scope,
        name: &str,
        kind: VariableKind,
    ) -> Option<&mut ValueHolder>;
}

/// The scope that holds `name`, stage first.
fn resolve_scope(store: &dyn VariableStore, name: &str, kind: VariableKind) -> Option<Scope> {
    [Scope::Stage, Scope::Actor]
        .into_iter()
        .find(|&scope| store.lookup(scope, name, kind).is_some())
}

/// Renders the named list as JSON, or returns an empty string when no such
/// list exists.
pub fn list_to_array(store: &dyn VariableStore, name: &str) -> String {
    resolve_scope(store, name, VariableKind::List)
        .and_then(|scope| store.lookup(scope, name, VariableKind::List))
        .and_then(|holder| serde_json::to_string(&holder.value).ok())
        .unwrap_or_default()
}

/// Replaces the named list's contents with the JSON array in `text`.
///
/// Returns whether the list was updated. A missing list, text that is not
/// JSON, or JSON that is not an array leaves the store untouched.
pub fn array_to_list(store: &mut dyn VariableStore, name: &str, text: &str) -> bool {
    let Some(scope) = resolve_scope(store, name, VariableKind::List) else {
        tracing::debug!(name, "list not found");
        return false;
    };
    let array = match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Array(_)) => value,
        _ => return false,
    };
    match store.lookup_mut(scope, name, VariableKind::List) {
        Some(holder) => {
            holder.value = array;
            holder.monitor_up_to_date = false;
            true
        }
        None => false,
    }
}

/// A [`VariableStore`] backed by a hash map.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    variables: HashMap<(Scope, VariableKind, String), ValueHolder>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, scope: Scope, name: &str, kind: VariableKind, value: Value) {
        self.variables
            .insert((scope, kind, name.to_string()), ValueHolder::new(value));
    }

    pub fn insert_list(&mut self, scope: Scope, name: &str, items: Vec<Value>) {
        self.insert(scope, name, VariableKind::List, Value::Array(items));
    }
}

impl VariableStore for InMemoryStore {
    fn lookup(&self, scope: Scope, name: &str, kind: VariableKind) -> Option<&ValueHolder> {
        self.variables.get(&(scope, kind, name.to_string()))
    }

    fn lookup_mut(
        &mut self,
        scope: Scope,
        name: &str,
        kind: VariableKind,
    ) -> Option<&mut ValueHolder> {
        self.variables.get_mut(&(scope, kind, name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> InMemoryStore {
        let mut s = InMemoryStore::new();
        s.insert_list(Scope::Actor, "scores", vec![json!(1), json!("two")]);
        s
    }

    #[test]
    fn test_list_to_array() {
        let s = store();
        assert_eq!(list_to_array(&s, "scores"), r#"[1,"two"]"#);
        assert_eq!(list_to_array(&s, "missing"), "");
    }

    #[test]
    fn test_stage_scope_wins() {
        let mut s = store();
        s.insert_list(Scope::Stage, "scores", vec![json!(9)]);
        assert_eq!(list_to_array(&s, "scores"), "[9]");
    }

    #[test]
    fn test_scalar_variable_is_not_a_list() {
        let mut s = InMemoryStore::new();
        s.insert(Scope::Stage, "x", VariableKind::Scalar, json!(3));
        assert_eq!(list_to_array(&s, "x"), "");
    }

    #[test]
    fn test_array_to_list_replaces_and_marks_stale() {
        let mut s = store();
        assert!(array_to_list(&mut s, "scores", "[[1,2],3]"));
        let holder = s.lookup(Scope::Actor, "scores", VariableKind::List).unwrap();
        assert_eq!(holder.value, json!([[1, 2], 3]));
        assert!(!holder.monitor_up_to_date);
    }

    #[test]
    fn test_array_to_list_rejects_non_arrays() {
        let mut s = store();
        assert!(!array_to_list(&mut s, "scores", "{\"a\":1}"));
        assert!(!array_to_list(&mut s, "scores", "not json"));
        assert!(!array_to_list(&mut s, "missing", "[1]"));
        let holder = s.lookup(Scope::Actor, "scores", VariableKind::List).unwrap();
        assert!(holder.monitor_up_to_date);
    }
}

//! Lexical scopes
//!
//! A stack of insertion-ordered symbol tables. Lookups walk from the
//! innermost scope outwards; declarations only check the innermost one.

use indexmap::IndexMap;

use crate::frontend::core::parser::ast::TypeName;
use crate::util::span::Span;

/// What a name refers to
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    Variable(TypeName),
    Parameter(TypeName),
    Function { return_type: Option<TypeName> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub span: Span,
}

impl Symbol {
    /// Type of the value this symbol holds; functions have none
    pub fn value_type(&self) -> Option<TypeName> {
        match self.kind {
            SymbolKind::Variable(ty) | SymbolKind::Parameter(ty) => Some(ty),
            SymbolKind::Function { .. } => None,
        }
    }
}

/// Scope stack. Starts with the global scope.
#[derive(Debug)]
pub struct ScopeStack {
    scopes: Vec<IndexMap<String, Symbol>>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            scopes: vec![IndexMap::new()],
        }
    }

    pub fn enter(&mut self) {
        self.scopes.push(IndexMap::new());
    }

    /// Leave the innermost scope; the global scope is never popped
    pub fn exit(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Declare in the innermost scope. Returns the existing symbol on conflict.
    pub fn declare(
        &mut self,
        name: &str,
        symbol: Symbol,
    ) -> Result<(), Symbol> {
        let Some(scope) = self.scopes.last_mut() else {
            return Ok(());
        };
        if let Some(existing) = scope.get(name) {
            return Err(existing.clone());
        }
        scope.insert(name.to_string(), symbol);
        Ok(())
    }

    pub fn lookup(
        &self,
        name: &str,
    ) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Names of the global scope, in declaration order
    pub fn globals(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.scopes
            .first()
            .into_iter()
            .flat_map(|scope| scope.iter().map(|(name, symbol)| (name.as_str(), symbol)))
    }
}

//! Symbol table and scope management

use std::collections::HashMap;
use std::fmt;
use std::fmt::Write as _;

use crate::ast::{Param, PrimType, StmtId};
use crate::common::{AnalysisError, AnalysisResult, Span};

/// Index of a symbol in a [`SymbolTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

impl SymbolId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a scope frame in a [`SymbolTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The frame that lives for the whole analysis
    pub const GLOBAL: ScopeId = ScopeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A symbol in the symbol table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Where the symbol was declared
    pub span: Span,
}

/// Kind of symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    Variable {
        ty: PrimType,
    },
    Function {
        return_type: PrimType,
        params: Vec<Param>,
    },
}

impl Symbol {
    pub fn variable(name: impl Into<String>, ty: PrimType, span: Span) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Variable { ty },
            span,
        }
    }

    pub fn function(name: impl Into<String>, return_type: PrimType, params: Vec<Param>, span: Span) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Function { return_type, params },
            span,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self.kind, SymbolKind::Variable { .. })
    }

    pub fn is_function(&self) -> bool {
        matches!(self.kind, SymbolKind::Function { .. })
    }

    /// Declared parameter count, for functions
    pub fn arity(&self) -> Option<usize> {
        match &self.kind {
            SymbolKind::Function { params, .. } => Some(params.len()),
            SymbolKind::Variable { .. } => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SymbolKind::Variable { ty } => write!(f, "variable {}: {}", self.name, ty),
            SymbolKind::Function { return_type, params } => {
                write!(f, "function {}(", self.name)?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ") -> {}", return_type)
            }
        }
    }
}

#[derive(Debug)]
struct Frame {
    parent: Option<ScopeId>,
    symbols: HashMap<String, SymbolId>,
}

impl Frame {
    fn new(parent: Option<ScopeId>) -> Self {
        Self {
            parent,
            symbols: HashMap::new(),
        }
    }
}

/// Stack of scope frames plus the declaration cross-reference map
///
/// Frames are never destroyed: [`exit_scope`](Self::exit_scope) only removes
/// a frame from the active stack. Anything that remembered a [`ScopeId`] can
/// later resolve names against that frame's final contents with
/// [`resolve_from`](Self::resolve_from).
#[derive(Debug)]
pub struct SymbolTable {
    frames: Vec<Frame>,
    active: Vec<ScopeId>,
    symbols: Vec<Symbol>,
    links: HashMap<StmtId, SymbolId>,
}

impl SymbolTable {
    /// Create a table holding only the global frame
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new(None)],
            active: vec![ScopeId::GLOBAL],
            symbols: Vec::new(),
            links: HashMap::new(),
        }
    }

    /// Push a new empty frame, child of the current one
    pub fn enter_scope(&mut self) -> ScopeId {
        let id = ScopeId(self.frames.len() as u32);
        self.frames.push(Frame::new(Some(self.current_scope())));
        self.active.push(id);
        id
    }

    /// Pop the innermost frame
    pub fn exit_scope(&mut self) -> AnalysisResult<()> {
        if self.active.len() <= 1 {
            return Err(AnalysisError::ScopeUnderflow);
        }
        self.active.pop();
        Ok(())
    }

    /// Innermost active frame
    pub fn current_scope(&self) -> ScopeId {
        self.active.last().copied().unwrap_or(ScopeId::GLOBAL)
    }

    /// Number of active frames, global included
    pub fn depth(&self) -> usize {
        self.active.len()
    }

    /// Define a symbol in the innermost frame
    ///
    /// Outer frames are not consulted, so shadowing always succeeds. If the
    /// name already exists in this frame nothing changes and the id of the
    /// existing symbol is returned as the error.
    pub fn define_in_current_scope(&mut self, symbol: Symbol) -> Result<SymbolId, SymbolId> {
        let scope = self.current_scope();
        if let Some(&existing) = self.frames[scope.index()].symbols.get(&symbol.name) {
            return Err(existing);
        }

        let id = SymbolId(self.symbols.len() as u32);
        self.frames[scope.index()].symbols.insert(symbol.name.clone(), id);
        self.symbols.push(symbol);
        Ok(id)
    }

    /// Look a name up from the innermost frame outwards
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        self.resolve_from(self.current_scope(), name)
    }

    /// Look a name up in the innermost frame only
    pub fn resolve_in_current_scope(&self, name: &str) -> Option<&Symbol> {
        self.frames[self.current_scope().index()]
            .symbols
            .get(name)
            .map(|&id| self.symbol(id))
    }

    /// Look a name up starting at `scope` and walking its parents
    pub fn resolve_from(&self, scope: ScopeId, name: &str) -> Option<&Symbol> {
        let mut next = Some(scope);
        while let Some(scope) = next {
            let frame = self.frames.get(scope.index())?;
            if let Some(&id) = frame.symbols.get(name) {
                return Some(self.symbol(id));
            }
            next = frame.parent;
        }
        None
    }

    /// Resolve a deferred call target from `scope` outwards
    ///
    /// Functions count wherever they appear in the chain, so forward calls
    /// resolve. Variables only count if their id is below `visible`, the
    /// symbol count when the call was seen; a later variable does not
    /// capture an earlier call.
    pub fn resolve_call_target(&self, scope: ScopeId, name: &str, visible: usize) -> Option<&Symbol> {
        let mut next = Some(scope);
        while let Some(scope) = next {
            let frame = self.frames.get(scope.index())?;
            if let Some(&id) = frame.symbols.get(name) {
                let symbol = self.symbol(id);
                if symbol.is_function() || id.index() < visible {
                    return Some(symbol);
                }
            }
            next = frame.parent;
        }
        None
    }

    /// Record which symbol a declaring node introduced
    pub fn link(&mut self, node: StmtId, symbol: SymbolId) {
        self.links.insert(node, symbol);
    }

    pub fn get_linked(&self, node: StmtId) -> Option<&Symbol> {
        self.linked_id(node).map(|id| self.symbol(id))
    }

    pub fn linked_id(&self, node: StmtId) -> Option<SymbolId> {
        self.links.get(&node).copied()
    }

    /// All cross-references, ordered by node
    pub fn links(&self) -> Vec<(StmtId, SymbolId)> {
        let mut links: Vec<_> = self.links.iter().map(|(&node, &sym)| (node, sym)).collect();
        links.sort_unstable();
        links
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    /// Every symbol ever defined, in definition order
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Debug listing of the innermost frame, sorted by name
    pub fn dump_current_scope(&self) -> String {
        let frame = &self.frames[self.current_scope().index()];
        let mut names: Vec<_> = frame.symbols.iter().collect();
        names.sort_by(|a, b| a.0.cmp(b.0));

        let mut out = String::new();
        for (name, &id) in names {
            let _ = writeln!(out, "{} -> {}", name, self.symbol(id));
        }
        out
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn int_var(name: &str) -> Symbol {
        Symbol::variable(name, PrimType::Int, Span::default())
    }

    #[test]
    fn test_define_rejects_same_frame_duplicate() {
        let mut table = SymbolTable::new();
        let first = table.define_in_current_scope(int_var("x")).unwrap();
        let clash = table.define_in_current_scope(Symbol::variable("x", PrimType::Bool, Span::default()));

        assert_eq!(clash, Err(first));
        assert_eq!(table.symbols().len(), 1);
        assert_eq!(table.resolve("x").unwrap().kind, SymbolKind::Variable { ty: PrimType::Int });
    }

    #[test]
    fn test_shadowing_in_inner_frame() {
        let mut table = SymbolTable::new();
        table.define_in_current_scope(int_var("x")).unwrap();

        table.enter_scope();
        assert!(table.resolve_in_current_scope("x").is_none());
        table
            .define_in_current_scope(Symbol::variable("x", PrimType::String, Span::default()))
            .unwrap();
        assert_eq!(table.resolve("x").unwrap().kind, SymbolKind::Variable { ty: PrimType::String });

        table.exit_scope().unwrap();
        assert_eq!(table.resolve("x").unwrap().kind, SymbolKind::Variable { ty: PrimType::Int });
    }

    #[test]
    fn test_resolve_walks_outwards() {
        let mut table = SymbolTable::new();
        table.define_in_current_scope(int_var("g")).unwrap();
        table.enter_scope();
        table.enter_scope();
        assert_eq!(table.depth(), 3);
        assert!(table.resolve("g").is_some());
        assert!(table.resolve("missing").is_none());
    }

    #[test]
    fn test_exit_global_scope_fails() {
        let mut table = SymbolTable::new();
        assert_eq!(table.exit_scope(), Err(AnalysisError::ScopeUnderflow));

        table.enter_scope();
        assert_eq!(table.exit_scope(), Ok(()));
        assert_eq!(table.exit_scope(), Err(AnalysisError::ScopeUnderflow));
        assert_eq!(table.current_scope(), ScopeId::GLOBAL);
    }

    #[test]
    fn test_exited_frames_stay_resolvable() {
        let mut table = SymbolTable::new();
        let inner = table.enter_scope();
        table.define_in_current_scope(int_var("local")).unwrap();
        table.exit_scope().unwrap();

        // Defined in the global frame after `inner` was left.
        table
            .define_in_current_scope(Symbol::function("late", PrimType::Int, vec![], Span::default()))
            .unwrap();

        assert!(table.resolve("local").is_none());
        assert!(table.resolve_from(inner, "local").is_some());
        assert!(table.resolve_from(inner, "late").unwrap().is_function());
    }

    #[test]
    fn test_call_target_skips_later_variables() {
        let mut table = SymbolTable::new();
        table
            .define_in_current_scope(Symbol::function("g", PrimType::Int, vec![], Span::default()))
            .unwrap();
        let inner = table.enter_scope();
        let visible = table.symbols().len();
        table.define_in_current_scope(int_var("g")).unwrap();
        table
            .define_in_current_scope(Symbol::function("h", PrimType::Int, vec![], Span::default()))
            .unwrap();
        table.exit_scope().unwrap();

        assert!(table.resolve_from(inner, "g").unwrap().is_variable());
        assert!(table.resolve_call_target(inner, "g", visible).unwrap().is_function());
        assert!(table.resolve_call_target(inner, "h", visible).unwrap().is_function());
        assert!(table.resolve_call_target(inner, "g", visible + 1).unwrap().is_variable());
    }

    #[test]
    fn test_sibling_frames_do_not_see_each_other() {
        let mut table = SymbolTable::new();
        let then_scope = table.enter_scope();
        table.define_in_current_scope(int_var("y")).unwrap();
        table.exit_scope().unwrap();

        let else_scope = table.enter_scope();
        assert!(table.resolve("y").is_none());
        table.define_in_current_scope(int_var("y")).unwrap();
        table.exit_scope().unwrap();

        assert_ne!(then_scope, else_scope);
        assert!(table.resolve_from(else_scope, "y").is_some());
    }

    #[test]
    fn test_link_and_get_linked() {
        let mut table = SymbolTable::new();
        let id = table.define_in_current_scope(int_var("x")).unwrap();
        let node = StmtId::from_raw(4);
        table.link(node, id);

        assert_eq!(table.linked_id(node), Some(id));
        assert_eq!(table.get_linked(node).unwrap().name, "x");
        assert!(table.get_linked(StmtId::from_raw(5)).is_none());
        assert_eq!(table.links(), vec![(node, id)]);
    }

    #[test]
    fn test_dump_current_scope_is_sorted() {
        let mut table = SymbolTable::new();
        table.define_in_current_scope(int_var("b")).unwrap();
        table
            .define_in_current_scope(Symbol::function(
                "a",
                PrimType::Bool,
                vec![Param::new(PrimType::Int, "n")],
                Span::default(),
            ))
            .unwrap();

        assert_eq!(
            table.dump_current_scope(),
            "a -> function a(int n) -> bool\nb -> variable b: int\n"
        );
    }
}

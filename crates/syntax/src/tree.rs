use crate::ast::{AstArena, CommentGroupId, Interner, SourceFile, Span, Symbol};

/// A fully materialized syntax tree for one Go source file.
///
/// Bundles the arena, the interner that owns every identifier, and the source
/// text that literal and comment spans point into. Trees are immutable once
/// built and can be shared across threads.
#[derive(Debug)]
pub struct SyntaxTree {
    pub arena: AstArena,
    pub interner: Interner,
    pub source: String,
    pub root: SourceFile,
}

impl SyntaxTree {
    #[inline]
    pub fn name(&self, sym: Symbol) -> &str {
        self.interner.resolve(sym)
    }

    /// Source text under `span`; empty when the span falls outside the source.
    #[inline]
    pub fn text(&self, span: Span) -> &str {
        self.source.get(span.to_range()).unwrap_or("")
    }

    pub fn package_name(&self) -> &str {
        self.name(self.root.name)
    }

    /// Raw text of each comment in `group`, markers included.
    pub fn comment_lines(&self, group: Option<CommentGroupId>) -> Vec<String> {
        let Some(group) = group else {
            return Vec::new();
        };
        let ids = self.arena.list(self.arena.comment_groups[group].comments);
        ids.iter()
            .map(|&id| self.text(self.arena.comments.span(id)).to_string())
            .collect()
    }
}

//! # Go Declaration AST
//!
//! Arena-allocated syntax tree for the top-level declarations of one Go source
//! file. Only the shapes a declaration extractor needs are modeled: imports,
//! const/var/type specs, function and method headers, and the expression
//! subset that can appear in a package-level initializer. Function bodies are
//! kept as opaque spans.
//!
//! ## Architecture
//!
//! - **Nodes**: allocated in typed arenas (`SpannedArena<T>`) and addressed by `Id<T>`
//! - **Lists**: stored in centralized buffers and referenced by `ListRef<T>`
//! - **Spans**: kept in side tables next to each arena
//! - **Symbols**: identifiers are interned; literal and comment text is recovered
//!   from the source string through spans
//!
//! Declaration-level traversal lives in `walk.rs`.

use core::marker::PhantomData;
use core::ops::{Index, IndexMut};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::hash::{BuildHasher, BuildHasherDefault, Hasher, RandomState};

// =============================================================================
// Core Foundation Types
// =============================================================================

/// Byte range into the source text.
///
/// Positions are `u32`; sources larger than 4GiB are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Creates a span from byte offsets.
    ///
    /// # Panics
    /// In debug builds, panics if an offset exceeds `u32::MAX`.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= u32::MAX as usize);
        debug_assert!(end <= u32::MAX as usize);
        Self {
            start: start as u32,
            end: end as u32,
        }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    pub fn cover(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    #[inline]
    pub const fn to_range(self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Type-safe handle for an arena-allocated node.
#[derive(Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Id<T> {
    raw: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Copy for Id<T> {}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Id<T> {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn to_usize(&self) -> usize {
        self.raw as usize
    }

    #[inline]
    pub const fn raw(&self) -> u32 {
        self.raw
    }
}

/// Typed reference into one of the arena's list buffers.
#[derive(Debug, PartialEq, Eq)]
pub struct ListRef<T> {
    start: u32,
    len: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Copy for ListRef<T> {}

impl<T> Clone for ListRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Default for ListRef<T> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<T> ListRef<T> {
    pub const EMPTY: Self = Self {
        start: 0,
        len: 0,
        _marker: PhantomData,
    };

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    fn range(&self) -> std::ops::Range<usize> {
        self.start as usize..(self.start + self.len) as usize
    }
}

// =============================================================================
// Symbol Interning
// =============================================================================

/// Interned identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Symbol(u32);

pub type Ident = Symbol;

impl Symbol {
    #[inline]
    pub const fn from_raw(v: u32) -> Self {
        Self(v)
    }

    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// Identifier occurrence: symbol plus the position it was written at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentName {
    pub sym: Ident,
    pub pos: Span,
}

#[derive(Default)]
struct U64IdentityHasher(u64);

impl Hasher for U64IdentityHasher {
    fn write(&mut self, _b: &[u8]) {
        unreachable!("U64IdentityHasher only supports write_u64")
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }
}

type U64IdentityBuild = BuildHasherDefault<U64IdentityHasher>;

/// String interner.
///
/// Strings are hashed once with a seeded hasher; buckets keyed by that hash
/// hold the candidate symbols.
#[derive(Debug, Default)]
pub struct Interner {
    strings: Vec<Box<str>>,
    buckets: HashMap<u64, SmallVec<[Symbol; 1]>, U64IdentityBuild>,
    state: RandomState,
}

impl Interner {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Interns `s`, returning the existing symbol when already present.
    pub fn intern(&mut self, s: &str) -> Symbol {
        let h = self.state.hash_one(s);
        let entry = self.buckets.entry(h).or_default();

        for &sym in entry.iter() {
            if self.strings[sym.0 as usize].as_ref() == s {
                return sym;
            }
        }

        let sym = Symbol(self.strings.len() as u32);
        self.strings.push(s.into());
        entry.push(sym);
        sym
    }

    /// Returns the text of `sym`.
    ///
    /// Symbols from a different interner resolve to the empty string.
    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        debug_assert!((sym.0 as usize) < self.strings.len());
        self.strings
            .get(sym.0 as usize)
            .map(AsRef::as_ref)
            .unwrap_or("")
    }
}

// =============================================================================
// Arena Allocation
// =============================================================================

/// Arena storing nodes and their spans in parallel vectors.
#[derive(Debug)]
pub struct SpannedArena<T> {
    data: Vec<T>,
    spans: Vec<Span>,
}

impl<T> Default for SpannedArena<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            spans: Vec::new(),
        }
    }
}

impl<T> SpannedArena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self, node: T, span: Span) -> Id<T> {
        let id = Id::from_raw(self.data.len() as u32);
        self.data.push(node);
        self.spans.push(span);
        id
    }

    #[inline]
    pub fn get(&self, id: Id<T>) -> &T {
        &self.data[id.to_usize()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: Id<T>) -> &mut T {
        &mut self.data[id.to_usize()]
    }

    #[inline]
    pub fn span(&self, id: Id<T>) -> Span {
        self.spans[id.to_usize()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> Index<Id<T>> for SpannedArena<T> {
    type Output = T;
    fn index(&self, id: Id<T>) -> &T {
        self.get(id)
    }
}

impl<T> IndexMut<Id<T>> for SpannedArena<T> {
    fn index_mut(&mut self, id: Id<T>) -> &mut T {
        self.get_mut(id)
    }
}

// =============================================================================
// Node IDs
// =============================================================================

pub type DeclId = Id<Decl>;
pub type ExprId = Id<Expr>;
pub type TypeId = Id<Type>;
pub type FieldId = Id<Field>;
pub type SignatureId = Id<Signature>;
pub type FuncDeclId = Id<FuncDecl>;
pub type TypeParamsId = Id<TypeParams>;
pub type CommentId = Id<Comment>;
pub type CommentGroupId = Id<CommentGroup>;

// =============================================================================
// List Storage
// =============================================================================

/// Flat buffer shared by every `ListRef<T>` of one element type.
#[derive(Debug)]
pub struct ListBuf<T>(Vec<T>);

impl<T> Default for ListBuf<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> ListBuf<T> {
    /// Appends `items` as one contiguous list.
    pub fn push(&mut self, items: impl IntoIterator<Item = T>) -> ListRef<T> {
        let start = self.0.len();
        self.0.extend(items);
        debug_assert!(self.0.len() <= u32::MAX as usize);
        ListRef {
            start: start as u32,
            len: (self.0.len() - start) as u32,
            _marker: PhantomData,
        }
    }

    /// Panics if `r` came from another buffer and falls outside this one.
    pub fn get(&self, r: ListRef<T>) -> &[T] {
        &self.0[r.range()]
    }
}

/// Element types that [`AstArena`] can store lists of.
pub trait ListStore<T> {
    fn buf(&self) -> &ListBuf<T>;
    fn buf_mut(&mut self) -> &mut ListBuf<T>;
}

#[derive(Debug, Default)]
struct Lists {
    ident_names: ListBuf<IdentName>,
    exprs: ListBuf<ExprId>,
    types: ListBuf<TypeId>,
    fields: ListBuf<FieldId>,
    specs: ListBuf<Spec>,
    top_decls: ListBuf<TopLevelDecl>,
    interface_elems: ListBuf<InterfaceElem>,
    comments: ListBuf<CommentId>,
}

macro_rules! list_stores {
    ($($t:ty => $field:ident),* $(,)?) => {
        $(
            impl ListStore<$t> for AstArena {
                #[inline]
                fn buf(&self) -> &ListBuf<$t> {
                    &self.lists.$field
                }

                #[inline]
                fn buf_mut(&mut self) -> &mut ListBuf<$t> {
                    &mut self.lists.$field
                }
            }
        )*
    };
}

list_stores! {
    IdentName => ident_names,
    ExprId => exprs,
    TypeId => types,
    FieldId => fields,
    Spec => specs,
    TopLevelDecl => top_decls,
    InterfaceElem => interface_elems,
    CommentId => comments,
}

// =============================================================================
// Main AST Arena
// =============================================================================

/// Owner of every node of one syntax tree.
#[derive(Debug, Default)]
pub struct AstArena {
    pub decls: SpannedArena<Decl>,
    pub exprs: SpannedArena<Expr>,
    pub types: SpannedArena<Type>,
    pub signatures: SpannedArena<Signature>,
    pub funcs: SpannedArena<FuncDecl>,
    pub fields: SpannedArena<Field>,
    pub type_params: SpannedArena<TypeParams>,
    pub comments: SpannedArena<Comment>,
    pub comment_groups: SpannedArena<CommentGroup>,
    lists: Lists,
}

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elements of `r`.
    #[inline]
    pub fn list<T>(&self, r: ListRef<T>) -> &[T]
    where
        Self: ListStore<T>,
    {
        <Self as ListStore<T>>::buf(self).get(r)
    }

    #[inline]
    pub fn alloc_list<T>(&mut self, items: impl IntoIterator<Item = T>) -> ListRef<T>
    where
        Self: ListStore<T>,
    {
        <Self as ListStore<T>>::buf_mut(self).push(items)
    }
}

// =============================================================================
// Comments
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
}

/// Comment token; its text (markers included) is the source under its span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comment {
    pub kind: CommentKind,
}

/// Adjacent comments forming one doc block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentGroup {
    pub comments: ListRef<CommentId>,
}

// =============================================================================
// Source File (Root Node)
// =============================================================================

/// `SourceFile = PackageClause ";" { ImportDecl ";" } { TopLevelDecl ";" }`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFile {
    pub package_pos: Span,
    /// Package name
    pub name: Ident,
    /// Top-level declarations in source order, import blocks included
    pub decls: ListRef<TopLevelDecl>,
    /// Comment group directly above the package clause
    pub doc: Option<CommentGroupId>,
}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopLevelDecl {
    Decl(DeclId),
    Func(FuncDeclId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decl {
    Gen(GenDecl),
    /// Declaration the supplier could not make sense of
    Bad(Span),
}

/// `import`, `const`, `type` or `var` declaration, grouped or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenDecl {
    pub doc: Option<CommentGroupId>,
    pub kw_pos: Span,
    pub kind: GenDeclKind,
    pub l_paren: Option<Span>,
    pub specs: ListRef<Spec>,
    pub r_paren: Option<Span>,
}

impl GenDecl {
    /// Doc of a spec in this declaration. The declaration's own comment
    /// applies only when it holds exactly one spec.
    pub fn spec_doc(&self, spec_doc: Option<CommentGroupId>) -> Option<CommentGroupId> {
        if self.specs.len() == 1 { spec_doc.or(self.doc) } else { spec_doc }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GenDeclKind {
    Import,
    Const,
    Type,
    Var,
}

impl GenDeclKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            GenDeclKind::Import => "import",
            GenDeclKind::Const => "const",
            GenDeclKind::Type => "type",
            GenDeclKind::Var => "var",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spec {
    Import(ImportSpec),
    Value(ValueSpec),
    Type(TypeSpec),
}

/// `ImportSpec = [ "." | PackageName ] ImportPath`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSpec {
    pub doc: Option<CommentGroupId>,
    pub name: Option<ImportName>,
    /// Quoted import path
    pub path: StringLit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportName {
    /// `import . "pkg"`
    Dot(Span),
    /// `import _ "pkg"`
    Blank(Span),
    /// `import name "pkg"`
    Name(Ident, Span),
}

/// `ConstSpec`/`VarSpec`: `IdentifierList [ Type ] [ "=" ExpressionList ]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueSpec {
    pub doc: Option<CommentGroupId>,
    pub names: ListRef<IdentName>,
    pub typ: Option<TypeId>,
    pub values: ListRef<ExprId>,
}

/// `TypeSpec = AliasDecl | TypeDef`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSpec {
    pub doc: Option<CommentGroupId>,
    pub name: Ident,
    pub name_pos: Span,
    pub type_params: Option<TypeParamsId>,
    /// Position of `=` in an alias declaration
    pub assign_pos: Option<Span>,
    pub typ: TypeId,
    pub alias: bool,
}

/// Function or method declaration.
///
/// The receiver is a full parameter list so that malformed receivers
/// (`func () M()`) stay representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuncDecl {
    pub doc: Option<CommentGroupId>,
    pub func_pos: Span,
    pub recv: Option<FieldList>,
    pub name: Ident,
    pub name_pos: Span,
    pub type_params: Option<TypeParamsId>,
    pub signature: SignatureId,
    /// Body braces; `None` for external (assembly) declarations
    pub body: Option<Span>,
}

/// `[T any, U comparable]`; each entry is a field whose type is the constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeParams {
    pub l_brack: Span,
    pub params: ListRef<FieldId>,
    pub r_brack: Span,
}

// =============================================================================
// Signatures and Fields
// =============================================================================

/// `Signature = Parameters [ Result ]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub params: FieldList,
    pub results: Option<Results>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Results {
    /// Parenthesized results: `(x int, err error)` or `(int, error)`
    Params(FieldList),
    /// Single bare result: `int`
    Type(TypeId),
}

/// Parenthesized or braced list of fields (parameters, results, struct fields).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldList {
    pub l_paren: Span,
    pub fields: ListRef<FieldId>,
    pub r_paren: Span,
}

/// `ParameterDecl = [ IdentifierList ] [ "..." ] Type`, or a struct field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub doc: Option<CommentGroupId>,
    /// Empty for anonymous parameters and embedded fields
    pub names: ListRef<IdentName>,
    /// Position of `...` for variadic parameters
    pub ellipsis_pos: Option<Span>,
    pub typ: TypeId,
    /// Struct tag literal (struct fields only)
    pub tag: Option<StringLit>,
    pub is_embed: bool,
    /// Trailing line comment
    pub comment: Option<CommentGroupId>,
}

// =============================================================================
// Expressions
// =============================================================================

/// Callee of a call: an expression, or a type in a conversion (`[]byte(s)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallCallee {
    Expr(ExprId),
    Type(TypeId),
}

/// Expression subset reachable from package-level initializers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expr {
    Ident(Ident, Span),

    BasicLit(BasicLit),

    /// `func(x int) int { ... }`; the body is opaque
    FuncLit {
        func_pos: Span,
        sig: SignatureId,
        body: Span,
    },

    /// `T{...}`; `typ` is absent for elided element types
    CompositeLit {
        typ: Option<TypeId>,
        l_brace: Span,
        elts: ListRef<ExprId>,
        r_brace: Span,
    },

    Paren {
        l_paren: Span,
        expr: ExprId,
        r_paren: Span,
    },

    /// `x.y`
    Selector {
        expr: ExprId,
        dot_pos: Span,
        ident: Ident,
        ident_pos: Span,
    },

    Call {
        callee: CallCallee,
        l_paren: Span,
        args: ListRef<ExprId>,
        ellipsis: Option<Span>,
        r_paren: Span,
    },

    /// `m[k]`
    Index {
        base: ExprId,
        l_brack: Span,
        index: ExprId,
        r_brack: Span,
    },

    /// `x.(T)`
    TypeAssert {
        expr: ExprId,
        dot_pos: Span,
        l_paren: Span,
        typ: Option<TypeId>,
        r_paren: Span,
    },

    Unary {
        op: UnaryOp,
        op_pos: Span,
        expr: ExprId,
    },

    /// `a + b`; the operator's spelling is the source under `op_pos`
    Binary {
        left: ExprId,
        op_pos: Span,
        right: ExprId,
    },

    Bad(Span),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicLit {
    pub kind: BasicLitKind,
    pub raw: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BasicLitKind {
    Int,
    Float,
    Imag,
    Rune,
    String,
}

/// String literal, quotes included in `raw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringLit {
    pub raw: Span,
}

// =============================================================================
// Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    /// `Name`, `pkg.Name`, `Name[T]`
    Named {
        pkg: Option<Ident>,
        pkg_pos: Option<Span>,
        name: Ident,
        name_pos: Span,
        /// Type arguments of an instantiation
        args: ListRef<TypeId>,
    },

    /// `*T`
    Pointer { star_pos: Span, elem: TypeId },

    /// `[N]T` or `[...]T`
    Array {
        l_brack: Span,
        len: ArrayLen,
        r_brack: Span,
        elem: TypeId,
    },

    /// `[]T`
    Slice {
        l_brack: Span,
        r_brack: Span,
        elem: TypeId,
    },

    /// `map[K]V`
    Map {
        map_pos: Span,
        key: TypeId,
        val: TypeId,
    },

    /// `chan T`, `<-chan T`, `chan<- T`
    Chan {
        dir: ChanDir,
        chan_pos: Span,
        elem: TypeId,
    },

    Struct {
        struct_pos: Span,
        l_brace: Span,
        fields: ListRef<FieldId>,
        r_brace: Span,
    },

    Interface {
        interface_pos: Span,
        l_brace: Span,
        elems: ListRef<InterfaceElem>,
        r_brace: Span,
    },

    /// `func(...) ...`
    Func { func_pos: Span, sig: SignatureId },

    /// `(T)`
    Paren {
        l_paren: Span,
        typ: TypeId,
        r_paren: Span,
    },

    Bad(Span),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayLen {
    /// `[N]T`; any constant expression
    Expr(ExprId),
    /// `[...]T`
    Ellipsis(Span),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

/// Interface element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceElem {
    /// `Method(...) ...`
    Method {
        doc: Option<CommentGroupId>,
        name: Ident,
        name_pos: Span,
        sig: SignatureId,
    },

    /// Embedded interface: `io.Reader`
    Embedded(TypeId),
}

// =============================================================================
// Operators
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Add,   // +
    Sub,   // -
    Not,   // !
    Xor,   // ^
    Deref, // *
    Addr,  // &
    Recv,  // <-
}

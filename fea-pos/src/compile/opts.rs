//! Options used during compilation

/// Where a repeated rule key is checked against earlier rules.
///
/// A repeated key with an identical value is accepted; a repeated key with a
/// different value is an error. This determines how far back we look.
///
/// Variants are ordered from narrowest to widest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum RedefinitionScope {
    /// Only rules in the same lookup (named or implicit) are compared.
    #[default]
    Lookup,
    /// All rules in the same feature block are compared, across lookups.
    Feature,
    /// All rules in the compilation unit are compared.
    Unit,
}

/// Options for configuring compilation behaviour.
#[derive(Clone, Debug, Default)]
pub struct Opts {
    pub(crate) redefinition_scope: RedefinitionScope,
}

impl Opts {
    /// Create a new empty set of options
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the scope in which redefined rules are detected.
    ///
    /// Default is [`RedefinitionScope::Lookup`].
    pub fn redefinition_scope(mut self, scope: RedefinitionScope) -> Self {
        self.redefinition_scope = scope;
        self
    }
}

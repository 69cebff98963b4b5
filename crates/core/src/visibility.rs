//! Declared accessibility of types and members.

/// Declared visibility, ordered from least to most accessible.
///
/// The ordering matters: anything at or below `Protected` can only be
/// reached from inside its declaring scope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Visibility {
    /// Declaring type only
    Private,
    /// Derived types within the same assembly
    ProtectedAndInternal,
    /// Declaring type and derived types
    Protected,
    /// Same assembly
    Internal,
    /// Derived types or same assembly
    ProtectedOrInternal,
    /// Anywhere
    #[default]
    Public,
}

impl Visibility {
    /// Returns true if this visibility is narrower than externally accessible.
    #[inline]
    pub fn is_scope_limited(self) -> bool {
        self <= Visibility::Protected
    }

    /// Returns the less visible of the two.
    #[inline]
    pub fn least(self, other: Visibility) -> Visibility {
        self.min(other)
    }

    /// Returns the modifier keywords used when rendering a declaration.
    pub fn keywords(self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::ProtectedAndInternal => "private protected",
            Visibility::Protected => "protected",
            Visibility::Internal => "internal",
            Visibility::ProtectedOrInternal => "protected internal",
            Visibility::Public => "public",
        }
    }
}

//! Named scalars, arrays, and value records

use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
};

use smol_str::SmolStr;

use crate::compile::ResolveError;

use super::ValueRecord;

/// A token that resolves to one or more integers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    /// A literal number
    Number(i16),
    /// A reference to a named scalar
    Scalar(SmolStr),
    /// A reference to a named array, written `@name`
    Array(SmolStr),
}

/// The namespace a name was looked up in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NameKind {
    /// A named integer
    Scalar,
    /// A named list of integers
    Array,
    /// A `valueRecordDef`
    ValueRecord,
}

/// The names defined in a single compilation unit.
///
/// Each kind of name lives in its own namespace, and every name is immutable
/// once defined.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    scalars: HashMap<SmolStr, i16>,
    arrays: HashMap<SmolStr, Vec<i16>>,
    value_records: HashMap<SmolStr, ValueRecord>,
}

impl Literal {
    /// A reference to the scalar `name`
    pub fn scalar(name: impl Into<SmolStr>) -> Self {
        Literal::Scalar(name.into())
    }

    /// A reference to the array `@name`
    pub fn array(name: impl Into<SmolStr>) -> Self {
        Literal::Array(name.into())
    }
}

impl From<i16> for Literal {
    fn from(src: i16) -> Literal {
        Literal::Number(src)
    }
}

impl SymbolTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a scalar.
    ///
    /// Fails if a scalar with this name already exists.
    pub fn define_scalar(&mut self, name: SmolStr, value: i16) -> Result<(), ResolveError> {
        if self.scalars.contains_key(&name) {
            return Err(ResolveError::DuplicateDefinition {
                kind: NameKind::Scalar,
                name,
            });
        }
        self.scalars.insert(name, value);
        Ok(())
    }

    /// Define an array; the items are resolved immediately.
    pub fn define_array(&mut self, name: SmolStr, items: &[Literal]) -> Result<(), ResolveError> {
        if self.arrays.contains_key(&name) {
            return Err(ResolveError::DuplicateDefinition {
                kind: NameKind::Array,
                name,
            });
        }
        let values = items
            .iter()
            .map(|item| self.resolve_one(item))
            .collect::<Result<Vec<_>, _>>()?;
        self.arrays.insert(name, values);
        Ok(())
    }

    /// Define a named value record, which must already be normalized.
    pub fn define_value_record(
        &mut self,
        name: SmolStr,
        record: ValueRecord,
    ) -> Result<(), ResolveError> {
        if self.value_records.contains_key(&name) {
            return Err(ResolveError::DuplicateDefinition {
                kind: NameKind::ValueRecord,
                name,
            });
        }
        self.value_records.insert(name, record);
        Ok(())
    }

    /// Resolve a literal to exactly `arity` integers.
    ///
    /// Numbers and scalars always produce a single value; an array must have
    /// exactly `arity` items.
    pub fn resolve(&self, literal: &Literal, arity: usize) -> Result<Vec<i16>, ResolveError> {
        let values = match literal {
            Literal::Number(value) => vec![*value],
            Literal::Scalar(name) => vec![self.scalar(name)?],
            Literal::Array(name) => self.array(name)?.to_vec(),
        };
        if values.len() != arity {
            return Err(ResolveError::WrongArity {
                name: literal.to_string().into(),
                expected: arity,
                found: values.len(),
            });
        }
        Ok(values)
    }

    /// Resolve a literal that must produce a single integer.
    pub fn resolve_one(&self, literal: &Literal) -> Result<i16, ResolveError> {
        let values = self.resolve(literal, 1)?;
        Ok(values[0])
    }

    /// The value of a scalar.
    pub fn scalar(&self, name: &str) -> Result<i16, ResolveError> {
        self.scalars
            .get(name)
            .copied()
            .ok_or_else(|| ResolveError::undefined(NameKind::Scalar, name))
    }

    /// The resolved items of an array, in definition order.
    pub fn array(&self, name: &str) -> Result<&[i16], ResolveError> {
        self.arrays
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| ResolveError::undefined(NameKind::Array, name))
    }

    /// A named value record, as it was when defined.
    pub fn value_record(&self, name: &str) -> Result<&ValueRecord, ResolveError> {
        self.value_records
            .get(name)
            .ok_or_else(|| ResolveError::undefined(NameKind::ValueRecord, name))
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Number(value) => write!(f, "{value}"),
            Literal::Scalar(name) => write!(f, "{name}"),
            Literal::Array(name) => write!(f, "@{name}"),
        }
    }
}

impl Display for NameKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NameKind::Scalar => f.write_str("scalar"),
            NameKind::Array => f.write_str("array"),
            NameKind::ValueRecord => f.write_str("value record"),
        }
    }
}

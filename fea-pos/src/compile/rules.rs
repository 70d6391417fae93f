//! Detecting redefined rules

use indexmap::IndexMap;

use crate::types::{PosKey, PosRule};

use super::ResolveError;

/// The outcome of adding a rule to a [`RuleTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Insertion {
    /// The key was new
    Added,
    /// The key existed with an identical rule; nothing changed
    Unchanged,
}

/// An insertion-ordered set of rules with unique keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: IndexMap<PosKey, PosRule>,
}

impl RuleTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule, checking it against any previous rule with the same key.
    ///
    /// Identical redefinitions are accepted and leave the original in place;
    /// anything else is a [`ResolveError::ConflictingRedefinition`].
    pub fn insert(&mut self, key: PosKey, rule: PosRule) -> Result<Insertion, ResolveError> {
        if let Some(existing) = self.rules.get(&key) {
            if *existing == rule {
                log::debug!("ignoring identical redefinition of '{key}'");
                return Ok(Insertion::Unchanged);
            }
            return Err(ResolveError::ConflictingRedefinition {
                previous: Box::new(existing.clone()),
                new: Box::new(rule),
                key,
            });
        }
        self.rules.insert(key, rule);
        Ok(Insertion::Added)
    }

    /// The rule stored for `key`, if any.
    pub fn get(&self, key: &PosKey) -> Option<&PosRule> {
        self.rules.get(key)
    }

    /// The number of distinct keys.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// `true` if no rule has been added.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Forget every rule, at the end of a redefinition scope.
    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Rules in the order their keys were first added.
    pub fn iter(&self) -> impl Iterator<Item = (&PosKey, &PosRule)> + '_ {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GlyphOrClass, ValueRecord};

    fn four() -> PosKey {
        PosKey::Single(GlyphOrClass::glyph("four"))
    }

    fn x_adv(value: i16) -> PosRule {
        PosRule::Single(ValueRecord::x_advance(value))
    }

    #[test]
    fn identical_redefinition_is_accepted() {
        let mut table = RuleTable::new();
        assert_eq!(table.insert(four(), x_adv(400)), Ok(Insertion::Added));
        let padded = PosRule::Single(ValueRecord::new(0, 0, 400, 0));
        assert_eq!(table.insert(four(), padded), Ok(Insertion::Unchanged));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&four()), Some(&x_adv(400)));
    }

    #[test]
    fn conflicting_redefinition() {
        let mut table = RuleTable::new();
        table.insert(four(), x_adv(400)).unwrap();
        assert_eq!(
            table.insert(four(), x_adv(401)),
            Err(ResolveError::ConflictingRedefinition {
                key: four(),
                previous: Box::new(x_adv(400)),
                new: Box::new(x_adv(401)),
            })
        );
        // the original is untouched
        assert_eq!(table.get(&four()), Some(&x_adv(400)));
    }

    #[test]
    fn pair_keys_are_ordered() {
        let a = GlyphOrClass::glyph("A");
        let v = GlyphOrClass::glyph("V");
        let mut table = RuleTable::new();
        let rule = PosRule::Pair {
            first: ValueRecord::x_advance(-50),
            second: None,
        };
        let av = PosKey::pair(a.clone(), v.clone());
        let va = PosKey::pair(v, a);
        assert_eq!(table.insert(av, rule.clone()), Ok(Insertion::Added));
        assert_eq!(table.insert(va, rule), Ok(Insertion::Added));
        assert_eq!(table.len(), 2);
    }
}

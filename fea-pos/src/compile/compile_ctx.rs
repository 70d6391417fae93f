use smol_str::SmolStr;
use write_fonts::types::Tag;

use crate::{
    ast::{PosStatement, Statement},
    types::{PosKey, PosRule, SymbolTable},
};

use super::{
    context::ContextTag,
    opts::{Opts, RedefinitionScope},
    output::{Compilation, LookupKind, PosLookup},
    rules::{Insertion, RuleTable},
    CompilerError, ResolveError,
};

/// The state of a single pass over one compilation unit.
pub(crate) struct CompilationCtx<'a> {
    opts: &'a Opts,
    symbols: SymbolTable,
    lookups: Vec<PosLookup>,
    /// index into `lookups` of the lookup receiving rules, if any
    cur_lookup: Option<usize>,
    cur_feature: Option<Tag>,
    cur_lookup_block: Option<SmolStr>,
    context: ContextTag,
    /// rules in the current redefinition scope
    seen_rules: RuleTable,
    n_statements: usize,
}

impl<'a> CompilationCtx<'a> {
    pub(crate) fn new(opts: &'a Opts) -> Self {
        CompilationCtx {
            opts,
            symbols: Default::default(),
            lookups: Default::default(),
            cur_lookup: None,
            cur_feature: None,
            cur_lookup_block: None,
            context: Default::default(),
            seen_rules: Default::default(),
            n_statements: 0,
        }
    }

    pub(crate) fn compile(
        &mut self,
        statements: impl IntoIterator<Item = Statement>,
    ) -> Result<(), CompilerError> {
        for (index, statement) in statements.into_iter().enumerate() {
            self.n_statements = index + 1;
            self.resolve_statement(statement)
                .map_err(|error| CompilerError { index, error })?;
        }
        self.finish().map_err(|error| CompilerError {
            index: self.n_statements,
            error,
        })
    }

    pub(crate) fn build(self) -> Compilation {
        let lookups = self
            .lookups
            .into_iter()
            .filter(|lookup| !lookup.rules.is_empty())
            .collect();
        Compilation { lookups }
    }

    fn resolve_statement(&mut self, statement: Statement) -> Result<(), ResolveError> {
        match statement {
            Statement::DefineScalar { name, value } => self.symbols.define_scalar(name, value),
            Statement::DefineArray { name, items } => self.symbols.define_array(name, &items),
            Statement::DefineValueRecord { name, value } => {
                let record = value.normalize(&self.symbols, self.context)?;
                self.symbols.define_value_record(name, record)
            }
            Statement::FeatureStart(tag) => self.start_feature(tag),
            Statement::FeatureEnd(tag) => self.end_feature(tag),
            Statement::LookupStart(name) => self.start_lookup_block(name),
            Statement::LookupEnd(name) => self.end_lookup_block(name),
            Statement::Pos(PosStatement::Single { target, value }) => {
                let record = value.normalize(&self.symbols, self.context)?;
                self.add_rule(
                    LookupKind::Single,
                    PosKey::Single(target),
                    PosRule::Single(record),
                )
            }
            Statement::Pos(PosStatement::Pair {
                first,
                second,
                first_value,
                second_value,
            }) => {
                let first_value = first_value.normalize(&self.symbols, self.context)?;
                let second_value = second_value
                    .map(|value| value.normalize(&self.symbols, self.context))
                    .transpose()?;
                self.add_rule(
                    LookupKind::Pair,
                    PosKey::Pair(first, second),
                    PosRule::Pair {
                        first: first_value,
                        second: second_value,
                    },
                )
            }
            Statement::Subtable => {
                log::trace!("ignoring subtable break");
                Ok(())
            }
        }
    }

    fn start_feature(&mut self, tag: Tag) -> Result<(), ResolveError> {
        if let Some(outer) = self.current_block() {
            return Err(ResolveError::NestedBlock {
                outer,
                inner: feature_block(tag),
            });
        }
        self.cur_feature = Some(tag);
        self.context = ContextTag::for_feature(tag);
        self.cur_lookup = None;
        self.cross_boundary(RedefinitionScope::Feature);
        log::debug!("begin feature '{tag}' ({:?})", self.context);
        Ok(())
    }

    fn end_feature(&mut self, tag: Tag) -> Result<(), ResolveError> {
        let found = feature_block(tag);
        match self.current_block() {
            None => return Err(ResolveError::UnopenedBlock(found)),
            Some(expected) if self.cur_lookup_block.is_some() || self.cur_feature != Some(tag) => {
                return Err(ResolveError::MismatchedBlockEnd { expected, found })
            }
            Some(_) => (),
        }
        self.cur_feature = None;
        self.context = ContextTag::Horizontal;
        self.cur_lookup = None;
        self.cross_boundary(RedefinitionScope::Feature);
        Ok(())
    }

    fn start_lookup_block(&mut self, name: SmolStr) -> Result<(), ResolveError> {
        if let Some(outer) = self.cur_lookup_block.as_deref() {
            return Err(ResolveError::NestedBlock {
                outer: lookup_block(outer),
                inner: lookup_block(&name),
            });
        }
        log::debug!("begin lookup '{name}'");
        self.cur_lookup_block = Some(name);
        self.cur_lookup = None;
        if self.cur_feature.is_none() {
            self.cross_boundary(RedefinitionScope::Feature);
        }
        Ok(())
    }

    fn end_lookup_block(&mut self, name: SmolStr) -> Result<(), ResolveError> {
        let found = lookup_block(&name);
        match self.cur_lookup_block.as_deref() {
            None => {
                return Err(match self.current_block() {
                    Some(expected) => ResolveError::MismatchedBlockEnd { expected, found },
                    None => ResolveError::UnopenedBlock(found),
                })
            }
            Some(open) if open != name.as_str() => {
                return Err(ResolveError::MismatchedBlockEnd {
                    expected: lookup_block(open),
                    found,
                })
            }
            Some(_) => (),
        }
        self.cur_lookup_block = None;
        self.cur_lookup = None;
        if self.cur_feature.is_none() {
            self.cross_boundary(RedefinitionScope::Feature);
        }
        Ok(())
    }

    fn finish(&self) -> Result<(), ResolveError> {
        match self.current_block() {
            Some(block) => Err(ResolveError::UnclosedBlock(block)),
            None => Ok(()),
        }
    }

    /// The innermost open block, for error reporting
    fn current_block(&self) -> Option<SmolStr> {
        self.cur_lookup_block
            .as_deref()
            .map(lookup_block)
            .or_else(|| self.cur_feature.map(feature_block))
    }

    /// Forget previously seen rules if `boundary` ends the redefinition scope.
    fn cross_boundary(&mut self, boundary: RedefinitionScope) {
        if self.opts.redefinition_scope <= boundary {
            self.seen_rules.clear();
        }
    }

    fn add_rule(
        &mut self,
        kind: LookupKind,
        key: PosKey,
        rule: PosRule,
    ) -> Result<(), ResolveError> {
        let lookup_idx = self.ensure_current_lookup_type(kind)?;
        if self.seen_rules.insert(key.clone(), rule.clone())? == Insertion::Added {
            log::trace!("pos {key} {rule}");
            self.lookups[lookup_idx].rules.insert(key, rule);
        }
        Ok(())
    }

    /// Return the lookup for the next rule, starting a new one if needed.
    ///
    /// Rules outside of a lookup block start a new implicit lookup whenever
    /// the rule type changes; a lookup block may only contain one type.
    fn ensure_current_lookup_type(&mut self, kind: LookupKind) -> Result<usize, ResolveError> {
        if let Some(idx) = self.cur_lookup {
            if self.lookups[idx].kind == kind {
                return Ok(idx);
            }
            if let Some(name) = self.cur_lookup_block.as_deref() {
                return Err(ResolveError::MixedLookupTypes(lookup_block(name)));
            }
        }
        self.lookups.push(PosLookup::new(
            self.cur_lookup_block.clone(),
            self.cur_feature,
            self.context,
            kind,
        ));
        self.cross_boundary(RedefinitionScope::Lookup);
        let idx = self.lookups.len() - 1;
        self.cur_lookup = Some(idx);
        Ok(idx)
    }
}

fn feature_block(tag: Tag) -> SmolStr {
    SmolStr::new(format!("feature {tag}"))
}

fn lookup_block(name: &str) -> SmolStr {
    SmolStr::new(format!("lookup {name}"))
}

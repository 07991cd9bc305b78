//! Condition compiler
//!
//! Turns a criteria object into one predicate over an entity:
//!
//! 1. Enumerate every criteria field with its current value
//! 2. Apply the field's routing rule (exclusion, target entity, remap)
//! 3. Drop "no filter" values: null, blank, `"null"`, `"[]"`
//! 4. Resolve the field, infer the operator, strip wildcards, coerce
//! 5. OR-combine what is left; nothing left means `Predicate::Always`
//!
//! A field that does not resolve against the entity is skipped silently.
//! Coercion failures propagate: they mean the request is malformed.
//!
//! The OR policy fits keyword search (one keyword across several columns).
//! Forms that expect AND across distinct fields get OR semantics here.

use super::criteria::{Criteria, CriteriaEntry};
use super::errors::{SearchError, SearchResult};
use super::operator::{strip_wildcards, OperatorKind};
use super::path::{EntityPath, PathResolver};
use super::predicate::Predicate;
use super::text::is_blank;
use crate::observability::{log_event_with_fields, Event};

/// True for values that mean "no filter on this field"
pub fn is_unfiltered(raw: &str) -> bool {
    is_blank(raw) || raw.eq_ignore_ascii_case("null") || raw == "[]"
}

/// The per-field predicates produced for one criteria object
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConditionSet {
    predicates: Vec<Predicate>,
}

impl ConditionSet {
    pub fn as_slice(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// OR of every predicate, `Always` when empty
    pub fn combined(&self) -> Predicate {
        Predicate::any(self.predicates.iter().cloned())
    }

    pub fn into_predicate(self) -> Predicate {
        Predicate::any(self.predicates)
    }
}

/// Compiles criteria into predicates
pub struct ConditionCompiler;

impl ConditionCompiler {
    /// Compiles every criteria field, keeping the ones that contribute.
    pub fn compile<C: Criteria + ?Sized>(
        path: &EntityPath,
        criteria: &C,
    ) -> SearchResult<ConditionSet> {
        let mut predicates = Vec::new();
        for entry in criteria.entries() {
            if let Some(predicate) = Self::entry_predicate(path, &entry)? {
                predicates.push(predicate);
            }
        }

        let count = predicates.len().to_string();
        log_event_with_fields(
            Event::PredicateCompiled,
            &[("entity", path.name()), ("predicates", count.as_str())],
        );

        Ok(ConditionSet { predicates })
    }

    /// Applies the entry's routing rule, then builds its predicate.
    fn entry_predicate(path: &EntityPath, entry: &CriteriaEntry) -> SearchResult<Option<Predicate>> {
        let field_name = match &entry.routing {
            None => entry.name.as_str(),
            Some(rule) if !path.matches_target(&rule.target) => {
                log_event_with_fields(
                    Event::CriteriaFieldRouted,
                    &[
                        ("entity", path.name()),
                        ("field", entry.name.as_str()),
                        ("reason", "target_mismatch"),
                        ("target", rule.target.as_str()),
                    ],
                );
                return Ok(None);
            }
            Some(rule) if rule.exclude => {
                log_event_with_fields(
                    Event::CriteriaFieldRouted,
                    &[
                        ("entity", path.name()),
                        ("field", entry.name.as_str()),
                        ("reason", "excluded"),
                    ],
                );
                return Ok(None);
            }
            Some(rule) => match rule.field.as_deref() {
                Some(remapped) if !is_blank(remapped) => remapped,
                _ => entry.name.as_str(),
            },
        };

        Self::field_predicate(path, field_name, &entry.value.to_raw())
    }

    /// Builds the predicate for one (entity field, raw value) pair.
    ///
    /// Returns `Ok(None)` when the value means "no filter", when the field
    /// does not exist on the entity, or when nothing is left after the
    /// wildcards are stripped.
    pub fn field_predicate(
        path: &EntityPath,
        field_name: &str,
        raw: &str,
    ) -> SearchResult<Option<Predicate>> {
        if is_unfiltered(raw) {
            return Ok(None);
        }

        let descriptor = match PathResolver::resolve(path, field_name) {
            Ok(descriptor) => descriptor,
            Err(SearchError::FieldNotFound { .. }) => {
                log_event_with_fields(
                    Event::CriteriaFieldUnresolved,
                    &[("entity", path.name()), ("field", field_name)],
                );
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let kind = OperatorKind::infer(raw);
        let cleaned = strip_wildcards(raw);
        if is_blank(&cleaned) {
            return Ok(None);
        }

        let value = PathResolver::coerce(&descriptor, &cleaned).map_err(|e| {
            log_event_with_fields(
                Event::CoercionFailed,
                &[
                    ("field", descriptor.name()),
                    ("target", descriptor.field_type().type_name()),
                    ("value", cleaned.as_str()),
                ],
            );
            e
        })?;

        let field_type = descriptor.field_type();
        let path_name = descriptor.with_prefix(path.alias()).path_name();
        let predicate = match kind.like_pattern(&value.to_string()) {
            Some(pattern) => Predicate::like(path_name, field_type, pattern),
            None => Predicate::eq(path_name, value),
        };

        Ok(Some(predicate))
    }
}

/// Compiles criteria into a single OR-combined predicate
pub fn compile_predicate<C: Criteria + ?Sized>(
    path: &EntityPath,
    criteria: &C,
) -> SearchResult<Predicate> {
    ConditionCompiler::compile(path, criteria).map(ConditionSet::into_predicate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EntityDef, FieldDef, FieldType};
    use crate::search::criteria::{DynamicCriteria, RoutingRule};
    use crate::search::path::TypedValue;
    use std::sync::Arc;

    fn pot() -> EntityPath {
        EntityPath::new(pot_def())
    }

    fn pot_def() -> Arc<EntityDef> {
        Arc::new(EntityDef::new(
            "pot",
            vec![
                FieldDef::long("id"),
                FieldDef::string("title"),
                FieldDef::string("address"),
                FieldDef::double("latitude"),
                FieldDef::date_time("dueDate"),
            ],
        ))
    }

    #[test]
    fn test_is_unfiltered() {
        for raw in ["", "   ", "null", "NULL", "Null", "[]"] {
            assert!(is_unfiltered(raw), "{:?}", raw);
        }
        assert!(!is_unfiltered("nullable"));
        assert!(!is_unfiltered("[a]"));
    }

    #[test]
    fn test_contains_strips_wildcards() {
        let predicate = ConditionCompiler::field_predicate(&pot(), "title", "%pizza%")
            .unwrap()
            .unwrap();
        assert_eq!(predicate, Predicate::like("pot.title", FieldType::String, "%pizza%"));
    }

    #[test]
    fn test_equals_is_typed() {
        let predicate = ConditionCompiler::field_predicate(&pot(), "id", "7")
            .unwrap()
            .unwrap();
        assert_eq!(predicate, Predicate::eq("pot.id", TypedValue::Long(7)));
    }

    #[test]
    fn test_contains_on_numeric_stays_like() {
        let predicate = ConditionCompiler::field_predicate(&pot(), "latitude", "%37.5%")
            .unwrap()
            .unwrap();
        assert_eq!(
            predicate,
            Predicate::like("pot.latitude", FieldType::Double, "%37.5%")
        );
    }

    #[test]
    fn test_path_rooted_at_alias() {
        let aliased = EntityPath::with_alias(pot_def(), "p");
        let predicate = ConditionCompiler::field_predicate(&aliased, "TITLE", "bread%")
            .unwrap()
            .unwrap();
        assert_eq!(predicate, Predicate::like("p.title", FieldType::String, "bread%"));
    }

    #[test]
    fn test_unknown_field_contributes_nothing() {
        assert_eq!(
            ConditionCompiler::field_predicate(&pot(), "nickname", "bob").unwrap(),
            None
        );
    }

    #[test]
    fn test_wildcards_only_contributes_nothing() {
        assert_eq!(
            ConditionCompiler::field_predicate(&pot(), "title", "%%").unwrap(),
            None
        );
    }

    #[test]
    fn test_coercion_failure_propagates() {
        let err = ConditionCompiler::field_predicate(&pot(), "id", "%abc%").unwrap_err();
        assert_eq!(err, SearchError::type_coercion("abc", "long"));

        let err = ConditionCompiler::field_predicate(&pot(), "dueDate", "soon").unwrap_err();
        assert_eq!(err, SearchError::date_format("soon"));
    }

    #[test]
    fn test_routing_remap_and_exclusion() {
        let criteria = DynamicCriteria::new()
            .routed("keyword", "bread%", RoutingRule::target("pot").remap("title"))
            .routed("address", "%market", RoutingRule::target("pot").excluded())
            .routed("email", "a@b.c", RoutingRule::target("user"));

        let set = ConditionCompiler::compile(&pot(), &criteria).unwrap();
        assert_eq!(
            set.as_slice(),
            &[Predicate::like("pot.title", FieldType::String, "bread%")]
        );
    }

    #[test]
    fn test_blank_remap_falls_back_to_own_name() {
        let criteria =
            DynamicCriteria::new().routed("title", "x%", RoutingRule::target("pot").remap(" "));
        let predicate = compile_predicate(&pot(), &criteria).unwrap();
        assert_eq!(predicate, Predicate::like("pot.title", FieldType::String, "x%"));
    }

    #[test]
    fn test_list_values_are_joined() {
        let criteria = DynamicCriteria::new()
            .field("title", vec!["%a".to_string(), "b%".to_string()])
            .field("address", Vec::<String>::new());

        // "%a,b%" is a Contains probe hit
        let predicate = compile_predicate(&pot(), &criteria).unwrap();
        assert_eq!(predicate, Predicate::like("pot.title", FieldType::String, "%a,b%"));
    }

    #[test]
    fn test_empty_criteria_is_always() {
        let criteria = DynamicCriteria::new()
            .field("title", None::<String>)
            .field("address", "null")
            .field("id", "  ");
        let set = ConditionCompiler::compile(&pot(), &criteria).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.combined(), Predicate::Always);
    }
}

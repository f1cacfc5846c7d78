use crate::generator::ast::{ObjectType, PropertySignature, TypeExpr};

#[test]
fn test_union_of_collapses_trivial_cases() {
  assert_eq!(TypeExpr::union_of(vec![]), TypeExpr::Never);
  assert_eq!(TypeExpr::union_of(vec![TypeExpr::String]), TypeExpr::String);
}

#[test]
fn test_union_of_flattens_and_deduplicates() {
  let nested = TypeExpr::Union(vec![TypeExpr::String, TypeExpr::Null]);
  let union = TypeExpr::union_of(vec![TypeExpr::Number, nested, TypeExpr::String]);

  assert_eq!(
    union,
    TypeExpr::Union(vec![TypeExpr::Number, TypeExpr::String, TypeExpr::Null])
  );
}

#[test]
fn test_intersection_of_collapses_trivial_cases() {
  assert_eq!(TypeExpr::intersection_of(vec![]), TypeExpr::Unknown);
  assert_eq!(TypeExpr::intersection_of(vec![TypeExpr::Boolean]), TypeExpr::Boolean);

  let flattened = TypeExpr::intersection_of(vec![
    TypeExpr::Intersection(vec![TypeExpr::Reference(vec!["A".into()]), TypeExpr::Reference(vec!["B".into()])]),
    TypeExpr::Reference(vec!["C".into()]),
  ]);
  let TypeExpr::Intersection(members) = flattened else {
    panic!("expected intersection");
  };
  assert_eq!(members.len(), 3);
}

#[test]
fn test_object_builders() {
  let object = ObjectType::empty()
    .with_property(PropertySignature::required("id", TypeExpr::Number))
    .with_property(PropertySignature::optional("name", TypeExpr::String));

  assert!(!object.is_empty());
  assert!(!object.properties[0].optional);
  assert!(object.properties[1].optional);
  assert!(ObjectType::empty().is_empty());
}

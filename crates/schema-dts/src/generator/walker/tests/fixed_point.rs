use serde_json::json;

use super::support::{find, path, walk, walk_with};
use crate::generator::{
  ast::TypeExpr,
  fragments::{DeclarationPayload, Fragment, Redirect},
  options::GeneratorOptions,
  walker::normalize_document,
};

fn chained_document() -> serde_json::Value {
  json!({
    "openapi": "3.1.0",
    "paths": {
      "/pets/{petId}": {
        "get": {
          "operationId": "getPet",
          "parameters": [{ "$ref": "#/components/parameters/PetId" }],
          "responses": {
            "200": { "$ref": "#/components/responses/PetFound" },
            "404": { "$ref": "#/components/responses/PetFound" }
          }
        }
      }
    },
    "components": {
      "parameters": {
        "PetId": { "name": "petId", "in": "path", "schema": { "$ref": "#/components/schemas/Id" } }
      },
      "responses": {
        "PetFound": {
          "headers": { "X-Trace": { "$ref": "#/components/headers/Trace" } },
          "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } } }
        }
      },
      "headers": {
        "Trace": { "required": true, "schema": { "$ref": "#/components/schemas/Id" } }
      },
      "schemas": {
        "Id": { "type": "string" },
        "Pet": { "type": "object", "properties": { "id": { "$ref": "#/components/schemas/Id" } } }
      }
    }
  })
}

#[test]
fn test_normalize_document_adds_component_buckets() {
  let document = normalize_document(json!({ "openapi": "3.1.0", "components": { "schemas": { "A": {} } } }));

  for bucket in [
    "schemas",
    "requestBodies",
    "parameters",
    "responses",
    "headers",
    "callbacks",
    "pathItems",
  ] {
    assert!(document["components"][bucket].is_object(), "missing bucket {bucket}");
  }
  assert_eq!(document["components"]["schemas"]["A"], json!({}));
}

#[test]
fn test_fixed_point_expands_every_named_entity_once() {
  let (set, stats) = walk(chained_document());

  for reference in [
    "#/components/parameters/PetId",
    "#/components/responses/PetFound",
    "#/components/headers/Trace",
    "#/components/schemas/Id",
    "#/components/schemas/Pet",
  ] {
    let matching = set
      .fragments
      .iter()
      .filter(|fragment| fragment.reference() == reference)
      .collect::<Vec<_>>();
    assert_eq!(matching.len(), 1, "{reference} should appear exactly once");
    assert!(!matching[0].is_assumed(), "{reference} should be concrete");
  }

  assert_eq!(set.assumed_refs().count(), 0);
  assert!(stats.fixed_point_passes >= 2);
  assert_eq!(stats.references_expanded, 5);
}

#[test]
fn test_expanded_component_declarations() {
  let (set, _) = walk(chained_document());

  assert_eq!(
    find(&set, "#/components/schemas/Id"),
    &Fragment::declaration(
      "#/components/schemas/Id",
      path(&["Components", "Schemas", "Id"]),
      DeclarationPayload::Type(TypeExpr::non_nullable(TypeExpr::String)),
    )
  );
  assert_eq!(
    find(&set, "#/components/headers/Trace"),
    &Fragment::declaration(
      "#/components/headers/Trace",
      path(&["Components", "Headers", "Trace"]),
      DeclarationPayload::Type(TypeExpr::Reference(path(&["Components", "Schemas", "Id"]))),
    )
  );
  assert_eq!(
    find(&set, "#/components/parameters/PetId"),
    &Fragment::declaration(
      "#/components/parameters/PetId",
      path(&["Components", "Parameters", "PetId"]),
      DeclarationPayload::Type(TypeExpr::Reference(path(&["Components", "Schemas", "Id"]))),
    )
  );
}

#[test]
fn test_component_aliasing_another_component_redirects() {
  let document = json!({
    "openapi": "3.1.0",
    "paths": {
      "/a": { "post": { "operationId": "a", "requestBody": { "$ref": "#/components/requestBodies/Alias" }, "responses": {} } }
    },
    "components": {
      "requestBodies": {
        "Alias": { "$ref": "#/components/requestBodies/Real" },
        "Real": { "content": { "text/plain": { "schema": { "type": "string" } } } }
      }
    }
  });
  let (set, _) = walk(document);

  assert_eq!(
    find(&set, "#/components/requestBodies/Alias"),
    &Fragment::declaration(
      "#/components/requestBodies/Alias",
      path(&["Components", "RequestBodies", "Alias"]),
      DeclarationPayload::Redirect(Redirect::new(
        "#/components/requestBodies/Real",
        path(&["Components", "RequestBodies", "Real"])
      )),
    )
  );
  assert!(!find(&set, "#/components/requestBodies/Real").is_assumed());
}

#[test]
fn test_unused_schemas_are_seeded() {
  let document = json!({
    "openapi": "3.1.0",
    "paths": {},
    "components": { "schemas": { "Orphan": { "type": "boolean" } } }
  });

  let (set, _) = walk(document.clone());
  assert!(set.fragments.is_empty());

  let options = GeneratorOptions::builder().generate_unused_schemas(true).build();
  let (set, _) = walk_with(document, &options).unwrap();
  assert!(!find(&set, "#/components/schemas/Orphan").is_assumed());
}

#[test]
fn test_unresolvable_reference_fails() {
  let document = json!({
    "openapi": "3.1.0",
    "paths": {
      "/a": {
        "get": {
          "operationId": "a",
          "responses": { "200": { "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Missing" } } } } }
        }
      }
    }
  });
  let error = walk_with(document, &GeneratorOptions::default()).unwrap_err();

  assert_eq!(error.code(), "E_RESOLVE");
  assert!(error.to_string().contains("Missing"));
}

#[test]
fn test_path_item_references_are_expanded() {
  let document = json!({
    "openapi": "3.1.0",
    "paths": { "/pets": { "$ref": "#/components/pathItems/Pets" } },
    "components": {
      "pathItems": {
        "Pets": { "get": { "operationId": "listPets", "responses": { "204": { "description": "empty" } } } }
      }
    }
  });
  let (set, _) = walk(document);

  assert_eq!(set.operations, vec!["listPets".to_string()]);
  assert!(!find(&set, "#/operations/listPets/output").is_assumed());
}

#[test]
fn test_cyclic_schemas_terminate() {
  let document = json!({
    "openapi": "3.1.0",
    "paths": {},
    "components": {
      "schemas": {
        "Node": { "type": "object", "properties": { "next": { "$ref": "#/components/schemas/Node" } } }
      }
    }
  });
  let options = GeneratorOptions::builder().generate_unused_schemas(true).build();
  let (set, stats) = walk_with(document, &options).unwrap();

  assert_eq!(set.fragments.len(), 1);
  assert_eq!(stats.fixed_point_passes, 1);
}

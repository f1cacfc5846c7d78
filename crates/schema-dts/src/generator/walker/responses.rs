use serde_json::Value;

use super::{DocumentWalker, Site};
use crate::{
  generator::{
    ast::{ObjectType, TypeExpr},
    error::TranslationResult,
    fragments::{DeclarationPayload, Fragment, FragmentSet, MemberPayload, Redirect},
  },
  utils::{
    SchemaExt,
    refs::{child_ref, ensure_resolved},
  },
};

const BODY_MEMBER: &str = "body";
const HEADERS_MEMBER: &str = "headers";

impl DocumentWalker<'_> {
  pub(super) fn visit_response(&self, site: &Site, response: &Value) -> TranslationResult<FragmentSet> {
    self.response_declaration(site, &site.reference, response)
  }

  /// An alias whose members are `body` (union of media types) and `headers`.
  ///
  /// A response with neither gets an optional empty-object `body`.
  pub(super) fn response_declaration(
    &self,
    site: &Site,
    location: &str,
    response: &Value,
  ) -> TranslationResult<FragmentSet> {
    if let Some(reference) = response.schema_ref() {
      return self.redirect_declaration(site, reference);
    }

    let mut set = FragmentSet::default();
    set.push(Fragment::declaration(
      &site.reference,
      site.namespace.clone(),
      DeclarationPayload::Alias,
    ));

    let content = response.entries("content").filter(|content| !content.is_empty());
    let headers = response.entries("headers").filter(|headers| !headers.is_empty());
    let body = site.child(BODY_MEMBER, BODY_MEMBER);

    if let Some(content) = content {
      let ty = self.content_type(&child_ref(location, "content"), site.name(), Some(content), &mut set)?;
      set.push(Fragment::member(body.reference, body.namespace, false, MemberPayload::Type(ty)));
    } else if headers.is_none() {
      set.push(Fragment::member(
        body.reference,
        body.namespace,
        true,
        MemberPayload::Type(TypeExpr::Object(ObjectType::empty())),
      ));
    }

    if let Some(headers) = headers {
      let headers_location = child_ref(location, HEADERS_MEMBER);
      let headers_site = site.child(HEADERS_MEMBER, HEADERS_MEMBER);
      let mut any_required = false;

      for (name, header) in headers {
        let member = headers_site.child(name, name.as_str());
        let required = ensure_resolved(self.ctx.root, header)?.is_required();
        any_required |= required;

        let payload = match header.schema_ref() {
          Some(reference) => {
            set.push(Fragment::assumed(reference));
            MemberPayload::Redirect(Redirect::new(reference, self.ctx.names.resolve(reference)?))
          }
          None => {
            let ty = self.header_type(&child_ref(&headers_location, name), name, header, &mut set)?;
            MemberPayload::Type(ty)
          }
        };
        set.push(Fragment::member(member.reference, member.namespace, !required, payload));
      }

      set.push(Fragment::member(
        headers_site.reference,
        headers_site.namespace,
        !any_required,
        MemberPayload::Alias,
      ));
    }

    Ok(set)
  }
}

use proc_macro2::Span;
use quote::format_ident;
use syn::{Fields, GenericArgument, Ident, Member, Path, PathArguments, Type};

use crate::attrs::parse_wire_field_attrs;

/// One field of a struct or enum variant.
pub(crate) struct WireField<'a> {
    /// `self.<member>` access for structs, field name for enum constructors.
    pub(crate) member: Member,
    /// Local binding used in match arms and enum decoding.
    pub(crate) binding: Ident,
    pub(crate) ty: &'a Type,
    /// The type refers back to the deriving type, so no where-bound is emitted for it.
    pub(crate) recursive: bool,
}

/// Fields split into the traversed prefix and the rest.
pub(crate) struct FieldSet<'a> {
    pub(crate) wired: Vec<WireField<'a>>,
    pub(crate) untouched: Vec<WireField<'a>>,
}

impl FieldSet<'_> {
    pub(crate) fn bound_types(&self) -> impl Iterator<Item = &Type> {
        self.wired.iter().filter(|f| !f.recursive).map(|f| f.ty)
    }
}

/// Split `fields` into traversed and untouched fields.
///
/// `#[wire(skip)]` fields are untouched. With `limit`, only the first `limit` non-skipped fields
/// are traversed.
pub(crate) fn collect_fields<'a>(
    self_ident: &Ident,
    fields: &'a Fields,
    limit: Option<usize>,
) -> syn::Result<FieldSet<'a>> {
    let mut wired = Vec::new();
    let mut untouched = Vec::new();

    for (idx, field) in fields.iter().enumerate() {
        let attr = parse_wire_field_attrs(&field.attrs)?;
        let member = field
            .ident
            .clone()
            .map_or_else(|| Member::Unnamed(idx.into()), Member::Named);
        let entry = WireField {
            member,
            binding: format_ident!("__f{idx}"),
            ty: &field.ty,
            recursive: type_mentions_self(&field.ty, self_ident),
        };
        if attr.skip {
            untouched.push(entry);
        } else {
            wired.push(entry);
        }
    }

    if let Some(limit) = limit {
        if limit > wired.len() {
            return Err(syn::Error::new(
                Span::call_site(),
                format!(
                    "`wire(fields = {limit})` exceeds the {} encodable fields of `{self_ident}`",
                    wired.len()
                ),
            ));
        }
        untouched.extend(wired.drain(limit..));
    }

    Ok(FieldSet { wired, untouched })
}

fn path_might_be_self(path: &Path, self_ident: &Ident) -> bool {
    let Some(last) = path.segments.last() else {
        return false;
    };
    if last.ident == "Self" {
        return true;
    }
    if last.ident != *self_ident {
        return false;
    }
    if path.segments.len() == 1 {
        return true;
    }
    path.segments
        .iter()
        .take(path.segments.len() - 1)
        .all(|seg| matches!(seg.ident.to_string().as_str(), "crate" | "self" | "super"))
}

pub(crate) fn type_mentions_self(ty: &Type, self_ident: &Ident) -> bool {
    match ty {
        Type::Path(tp) => {
            if tp.qself.is_none() && path_might_be_self(&tp.path, self_ident) {
                return true;
            }
            if let Some(q) = &tp.qself {
                if type_mentions_self(&q.ty, self_ident) {
                    return true;
                }
            }
            tp.path.segments.iter().any(|seg| match &seg.arguments {
                PathArguments::AngleBracketed(args) => args.args.iter().any(|arg| match arg {
                    GenericArgument::Type(inner) => type_mentions_self(inner, self_ident),
                    _ => false,
                }),
                _ => false,
            })
        }
        Type::Reference(tr) => type_mentions_self(&tr.elem, self_ident),
        Type::Tuple(tt) => tt.elems.iter().any(|t| type_mentions_self(t, self_ident)),
        Type::Array(ta) => type_mentions_self(&ta.elem, self_ident),
        Type::Slice(ts) => type_mentions_self(&ts.elem, self_ident),
        Type::Group(tg) => type_mentions_self(&tg.elem, self_ident),
        Type::Paren(tp) => type_mentions_self(&tp.elem, self_ident),
        _ => false,
    }
}

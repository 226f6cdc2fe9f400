use syn::{spanned::Spanned, Attribute, LitInt};

#[derive(Default, Clone, Copy)]
pub(crate) struct WireFieldAttr {
    pub(crate) skip: bool,
}

#[derive(Default, Clone, Copy)]
pub(crate) struct WireContainerAttr {
    pub(crate) fields: Option<usize>,
}

pub(crate) fn ensure_no_wire_attrs(attrs: &[Attribute], ctx: &str) -> syn::Result<()> {
    for a in attrs {
        if a.path().is_ident("wire") {
            return Err(syn::Error::new(
                a.span(),
                format!("`#[wire(...)]` is not supported on {ctx}"),
            ));
        }
    }
    Ok(())
}

pub(crate) fn parse_wire_field_attrs(attrs: &[Attribute]) -> syn::Result<WireFieldAttr> {
    let mut out = WireFieldAttr::default();
    for attr in attrs {
        if !attr.path().is_ident("wire") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                if out.skip {
                    return Err(meta.error("duplicate `wire(skip)`"));
                }
                out.skip = true;
                return Ok(());
            }
            Err(meta.error("unsupported `wire(...)` field attribute (allowed: skip)"))
        })?;
    }
    Ok(out)
}

pub(crate) fn parse_wire_container_attrs(attrs: &[Attribute]) -> syn::Result<WireContainerAttr> {
    let mut out = WireContainerAttr::default();
    for attr in attrs {
        if !attr.path().is_ident("wire") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("fields") {
                if out.fields.is_some() {
                    return Err(meta.error("duplicate `wire(fields = ...)`"));
                }
                let lit: LitInt = meta.value()?.parse()?;
                out.fields = Some(lit.base10_parse()?);
                return Ok(());
            }
            Err(meta.error("unsupported `wire(...)` container attribute (allowed: fields)"))
        })?;
    }
    Ok(out)
}

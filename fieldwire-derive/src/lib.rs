//! Derive macros for `fieldwire`.
//!
//! `#[derive(Encode)]` and `#[derive(Decode)]` traverse a struct's fields in declaration order,
//! or write an enum's variant index followed by that variant's fields.
//!
//! Attributes:
//! - `#[wire(skip)]` on a field: never written; on decode the field keeps its current value
//!   (enum variants rebuild it from `Default`).
//! - `#[wire(fields = N)]` on a struct: traverse only the first `N` non-skipped fields.

extern crate proc_macro;

mod attrs;
mod decode;
mod encode;
mod types;
mod util;

use proc_macro::TokenStream;
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput};

use crate::attrs::parse_wire_container_attrs;

fn enum_container_attrs(input: &DeriveInput) -> syn::Result<()> {
    if parse_wire_container_attrs(&input.attrs)?.fields.is_some() {
        return Err(syn::Error::new(
            input.ident.span(),
            "`wire(fields = ...)` is only supported on structs",
        ));
    }
    Ok(())
}

/// Derive `fieldwire::Encode`.
#[proc_macro_derive(Encode, attributes(wire))]
pub fn derive_encode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let out = match &input.data {
        Data::Struct(data) => parse_wire_container_attrs(&input.attrs)
            .and_then(|c| encode::encode_struct(&input.ident, &input.generics, data, c)),
        Data::Enum(data) => enum_container_attrs(&input)
            .and_then(|()| encode::encode_enum(&input.ident, &input.generics, data)),
        Data::Union(u) => Err(syn::Error::new(
            u.union_token.span(),
            "fieldwire::Encode is not supported for unions",
        )),
    };
    TokenStream::from(out.unwrap_or_else(syn::Error::into_compile_error))
}

/// Derive `fieldwire::Decode`.
#[proc_macro_derive(Decode, attributes(wire))]
pub fn derive_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let out = match &input.data {
        Data::Struct(data) => parse_wire_container_attrs(&input.attrs)
            .and_then(|c| decode::decode_struct(&input.ident, &input.generics, data, c)),
        Data::Enum(data) => enum_container_attrs(&input)
            .and_then(|()| decode::decode_enum(&input.ident, &input.generics, data)),
        Data::Union(u) => Err(syn::Error::new(
            u.union_token.span(),
            "fieldwire::Decode is not supported for unions",
        )),
    };
    TokenStream::from(out.unwrap_or_else(syn::Error::into_compile_error))
}

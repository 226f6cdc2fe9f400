use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataEnum, DataStruct, Fields, Generics, Ident};

use crate::attrs::{ensure_no_wire_attrs, WireContainerAttr};
use crate::types::{collect_fields, FieldSet};
use crate::util::add_where_bounds;

fn describe_fields(set: &FieldSet<'_>) -> Vec<TokenStream> {
    set.wired
        .iter()
        .map(|f| {
            let ty = f.ty;
            quote! { <#ty as ::fieldwire::Decode>::describe(shape); }
        })
        .collect()
}

/// Lower bound used by enclosing containers.
///
/// A record may end early, but one that is not at the end of input reads at least its first
/// field that takes any bytes. Recursive fields count as one byte: they sit behind an
/// `Option` flag or a length prefix, and reading their own bound would be a cycle.
fn min_wire_len(set: &FieldSet<'_>) -> TokenStream {
    if set.wired.is_empty() {
        return quote!(0);
    }
    let steps = set.wired.iter().map(|f| {
        let ty = f.ty;
        let field_min = if f.recursive {
            quote!(1)
        } else {
            quote!(<#ty as ::fieldwire::Decode>::MIN_WIRE_LEN)
        };
        quote! {
            if min == 0 {
                min = #field_min;
            }
        }
    });
    quote! {{
        let mut min = 0usize;
        #(#steps)*
        min
    }}
}

pub(crate) fn decode_struct(
    name: &Ident,
    generics: &Generics,
    data: &DataStruct,
    container: WireContainerAttr,
) -> syn::Result<TokenStream> {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let set = collect_fields(name, &data.fields, container.fields)?;

    let mut wc = where_clause.cloned();
    add_where_bounds(&mut wc, set.bound_types(), &quote!(::fieldwire::Decode));

    let count = set.wired.len();
    let min = min_wire_len(&set);
    let describes = describe_fields(&set);
    let shape_arg = if describes.is_empty() {
        quote!(_)
    } else {
        quote!(shape)
    };

    let body = if set.wired.is_empty() {
        quote! {
            let _ = dec;
            ::core::result::Result::Ok(())
        }
    } else {
        let reads = set.wired.iter().map(|f| {
            let member = &f.member;
            quote! {
                if dec.is_exhausted() {
                    return ::core::result::Result::Ok(());
                }
                ::fieldwire::Decode::decode_in_place(&mut self.#member, dec)?;
            }
        });
        quote! {
            dec.nested(|dec| {
                #(#reads)*
                ::core::result::Result::Ok(())
            })
        }
    };

    Ok(quote! {
        impl #impl_generics ::fieldwire::Decode for #name #ty_generics #wc {
            const MIN_WIRE_LEN: usize = #min;

            fn describe(shape: &mut ::fieldwire::ShapeWriter) {
                shape.record(::core::any::type_name::<Self>(), #count, |#shape_arg| {
                    #(#describes)*
                });
            }

            fn decode_in_place(
                &mut self,
                dec: &mut ::fieldwire::Decoder<'_>,
            ) -> ::core::result::Result<(), ::fieldwire::WireError> {
                #body
            }
        }
    })
}

pub(crate) fn decode_enum(
    name: &Ident,
    generics: &Generics,
    data: &DataEnum,
) -> syn::Result<TokenStream> {
    if data.variants.is_empty() {
        return Err(syn::Error::new(
            name.span(),
            "fieldwire cannot decode an enum with no variants",
        ));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let mut wc = where_clause.cloned();

    let variant_count = data.variants.len();
    let mut describes = Vec::new();
    let mut arms = Vec::new();

    for (index, variant) in data.variants.iter().enumerate() {
        ensure_no_wire_attrs(&variant.attrs, "enum variants")?;
        let set = collect_fields(name, &variant.fields, None)?;
        add_where_bounds(
            &mut wc,
            set.bound_types(),
            &quote!(::fieldwire::Decode + ::core::default::Default),
        );
        add_where_bounds(
            &mut wc,
            set.untouched.iter().filter(|f| !f.recursive).map(|f| f.ty),
            &quote!(::core::default::Default),
        );

        let count = set.wired.len();
        let fields = describe_fields(&set);
        describes.push(quote! {
            shape.count(#count);
            #(#fields)*
        });

        let reads = set.wired.iter().map(|f| {
            let (bind, ty) = (&f.binding, f.ty);
            quote! {
                let mut #bind: #ty = ::core::default::Default::default();
                ::fieldwire::Decode::decode_in_place(&mut #bind, dec)?;
            }
        });
        let defaults = set.untouched.iter().map(|f| {
            let (bind, ty) = (&f.binding, f.ty);
            quote! { let #bind: #ty = ::core::default::Default::default(); }
        });
        let v_ident = &variant.ident;
        let construct = if matches!(variant.fields, Fields::Unit) {
            quote! {}
        } else {
            let members = set.wired.iter().chain(&set.untouched).map(|f| &f.member);
            let binds = set.wired.iter().chain(&set.untouched).map(|f| &f.binding);
            quote! { { #(#members: #binds,)* } }
        };
        // The index is already bounded, so the last variant takes every remaining value.
        let pat = if index + 1 == variant_count {
            quote!(_)
        } else {
            quote!(#index)
        };
        arms.push(quote! {
            #pat => {
                #(#reads)*
                #(#defaults)*
                *self = Self::#v_ident #construct;
            }
        });
    }

    Ok(quote! {
        impl #impl_generics ::fieldwire::Decode for #name #ty_generics #wc {
            fn describe(shape: &mut ::fieldwire::ShapeWriter) {
                shape.sum(::core::any::type_name::<Self>(), #variant_count, |shape| {
                    #(#describes)*
                });
            }

            fn decode_in_place(
                &mut self,
                dec: &mut ::fieldwire::Decoder<'_>,
            ) -> ::core::result::Result<(), ::fieldwire::WireError> {
                dec.nested(|dec| {
                    match dec.read_variant_index(#variant_count)? {
                        #(#arms)*
                    }
                    ::core::result::Result::Ok(())
                })
            }
        }
    })
}

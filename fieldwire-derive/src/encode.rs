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
            quote! { <#ty as ::fieldwire::Encode>::describe(shape); }
        })
        .collect()
}

fn variant_pattern(fields: &Fields, set: &FieldSet<'_>) -> TokenStream {
    let names = set.wired.iter().map(|f| &f.member);
    let binds = set.wired.iter().map(|f| &f.binding);
    if matches!(fields, Fields::Unit) {
        return quote! {};
    }
    quote! { { #(#names: #binds,)* .. } }
}

pub(crate) fn encode_struct(
    name: &Ident,
    generics: &Generics,
    data: &DataStruct,
    container: WireContainerAttr,
) -> syn::Result<TokenStream> {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let set = collect_fields(name, &data.fields, container.fields)?;

    let mut wc = where_clause.cloned();
    add_where_bounds(&mut wc, set.bound_types(), &quote!(::fieldwire::Encode));

    let count = set.wired.len();
    let describes = describe_fields(&set);
    let shape_arg = if describes.is_empty() {
        quote!(_)
    } else {
        quote!(shape)
    };
    let writes: Vec<TokenStream> = if set.wired.is_empty() {
        vec![quote! { let _ = enc; }]
    } else {
        set.wired
            .iter()
            .map(|f| {
                let member = &f.member;
                quote! { ::fieldwire::Encode::encode(&self.#member, enc)?; }
            })
            .collect()
    };

    Ok(quote! {
        impl #impl_generics ::fieldwire::Encode for #name #ty_generics #wc {
            fn describe(shape: &mut ::fieldwire::ShapeWriter) {
                shape.record(::core::any::type_name::<Self>(), #count, |#shape_arg| {
                    #(#describes)*
                });
            }

            fn encode<__S: ::fieldwire::Sink>(
                &self,
                enc: &mut ::fieldwire::Encoder<__S>,
            ) -> ::core::result::Result<(), ::fieldwire::WireError> {
                #(#writes)*
                ::core::result::Result::Ok(())
            }
        }
    })
}

pub(crate) fn encode_enum(
    name: &Ident,
    generics: &Generics,
    data: &DataEnum,
) -> syn::Result<TokenStream> {
    if data.variants.is_empty() {
        return Err(syn::Error::new(
            name.span(),
            "fieldwire cannot encode an enum with no variants",
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
        add_where_bounds(&mut wc, set.bound_types(), &quote!(::fieldwire::Encode));

        let count = set.wired.len();
        let fields = describe_fields(&set);
        describes.push(quote! {
            shape.count(#count);
            #(#fields)*
        });

        let v_ident = &variant.ident;
        let pat = variant_pattern(&variant.fields, &set);
        let binds = set.wired.iter().map(|f| &f.binding);
        arms.push(quote! {
            Self::#v_ident #pat => {
                enc.write_variant_index(#index)?;
                #(::fieldwire::Encode::encode(#binds, enc)?;)*
            }
        });
    }

    Ok(quote! {
        impl #impl_generics ::fieldwire::Encode for #name #ty_generics #wc {
            fn describe(shape: &mut ::fieldwire::ShapeWriter) {
                shape.sum(::core::any::type_name::<Self>(), #variant_count, |shape| {
                    #(#describes)*
                });
            }

            fn encode<__S: ::fieldwire::Sink>(
                &self,
                enc: &mut ::fieldwire::Encoder<__S>,
            ) -> ::core::result::Result<(), ::fieldwire::WireError> {
                match self {
                    #(#arms)*
                }
                ::core::result::Result::Ok(())
            }
        }
    })
}

use proc_macro2::TokenStream;
use syn::{parse_quote, Type, WhereClause, WherePredicate};

pub(crate) fn add_where_bound(wc: &mut WhereClause, ty: &Type, bound: TokenStream) {
    let pred: WherePredicate = parse_quote!(#ty: #bound);
    wc.predicates.push(pred);
}

/// Extend `wc` with `ty: bound` for every type, creating the clause on first use.
pub(crate) fn add_where_bounds<'a>(
    wc: &mut Option<WhereClause>,
    types: impl IntoIterator<Item = &'a Type>,
    bound: &TokenStream,
) {
    for ty in types {
        let wc = wc.get_or_insert_with(|| WhereClause {
            where_token: Default::default(),
            predicates: Default::default(),
        });
        add_where_bound(wc, ty, bound.clone());
    }
}

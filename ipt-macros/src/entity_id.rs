use crate::utils::{apply_derives, parse_flag};
use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, Path, parse_quote};

/// `#[entity_id]` 宏实现
///
/// 仅支持单字段 tuple struct。派生 Default、Clone、Debug（可关闭）、Serialize、Deserialize、
/// PartialEq、Eq、Hash，并提供 `new`、`Display`、`FromStr`、`AsRef` 与双向 `From`。
/// 不派生 `Ord`：标识的排序规则由使用方决定。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let mut debug = true;
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("debug") {
            debug = parse_flag(&meta)?;
            Ok(())
        } else {
            Err(meta.error("unknown key in attribute; expected 'debug'"))
        }
    });
    syn::parse::Parser::parse2(parser, attr)?;

    let mut st = match syn::parse2::<Item>(item)? {
        Item::Struct(st) => st,
        other => return Err(syn::Error::new(other.span(), "#[entity_id] only on struct")),
    };

    let inner_ty = match &st.fields {
        syn::Fields::Unnamed(f) if f.unnamed.len() == 1 => f.unnamed[0].ty.clone(),
        syn::Fields::Unnamed(f) => {
            return Err(syn::Error::new(
                f.span(),
                "#[entity_id] requires a tuple struct with exactly one field",
            ));
        }
        _ => {
            return Err(syn::Error::new(
                st.span(),
                "#[entity_id] supports only tuple struct, e.g., struct X(String);",
            ));
        }
    };

    let mut required: Vec<Path> = vec![
        parse_quote!(Default),
        parse_quote!(Clone),
        parse_quote!(serde::Serialize),
        parse_quote!(serde::Deserialize),
        parse_quote!(PartialEq),
        parse_quote!(Eq),
        parse_quote!(Hash),
    ];
    if debug {
        required.insert(0, parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, &required)?;

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    Ok(quote! {
        #st

        impl #impl_generics #ident #ty_generics #where_clause {
            pub fn new(value: #inner_ty) -> Self { Self(value) }
        }

        impl #impl_generics ::std::str::FromStr for #ident #ty_generics #where_clause
        where #inner_ty: ::std::str::FromStr
        {
            type Err = <#inner_ty as ::std::str::FromStr>::Err;
            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                ::std::result::Result::Ok(Self(s.parse()?))
            }
        }

        impl #impl_generics ::std::fmt::Display for #ident #ty_generics #where_clause
        where #inner_ty: ::std::fmt::Display
        {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl #impl_generics ::core::convert::AsRef<#inner_ty> for #ident #ty_generics #where_clause {
            fn as_ref(&self) -> &#inner_ty { &self.0 }
        }

        impl #impl_generics ::core::convert::From<#inner_ty> for #ident #ty_generics #where_clause {
            fn from(value: #inner_ty) -> Self { Self(value) }
        }

        impl #impl_generics ::core::convert::From<#ident #ty_generics> for #inner_ty #where_clause {
            fn from(value: #ident #ty_generics) -> Self { value.0 }
        }
    })
}

use crate::utils::{apply_derives, ensure_leading_fields, parse_flag};
use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, Path, Type, parse_quote};

/// `#[entity]` 宏实现
/// - 若缺失则追加 `id: IdType`、`revision: usize`，并置于字段最前；
/// - 派生 Debug（可关闭）、Default、Serialize、Deserialize；
/// - 实现 `::ipt_domain::entity::Entity`。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let args = EntityArgs::parse(attr)?;

    let mut st = match syn::parse2::<Item>(item)? {
        Item::Struct(st) => st,
        other => return Err(syn::Error::new(other.span(), "#[entity] only on struct")),
    };

    let span = st.span();
    let syn::Fields::Named(fields) = &mut st.fields else {
        return Err(syn::Error::new(span, "#[entity] only supports named-field struct"));
    };

    let id_ty = args.id.unwrap_or_else(|| parse_quote!(String));
    let revision_ty: Type = parse_quote!(usize);
    ensure_leading_fields(fields, &[("id", &id_ty), ("revision", &revision_ty)], true);

    let mut required: Vec<Path> = vec![
        parse_quote!(Default),
        parse_quote!(serde::Serialize),
        parse_quote!(serde::Deserialize),
    ];
    if args.debug {
        required.insert(0, parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, &required)?;

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    Ok(quote! {
        #st

        impl #impl_generics ::ipt_domain::entity::Entity for #ident #ty_generics #where_clause {
            type Id = #id_ty;

            fn new(id: Self::Id) -> Self {
                Self { id, revision: 0, ..::core::default::Default::default() }
            }

            fn id(&self) -> &Self::Id { &self.id }

            fn revision(&self) -> usize { self.revision }
        }
    })
}

struct EntityArgs {
    id: Option<Type>,
    debug: bool,
}

impl EntityArgs {
    fn parse(attr: TokenStream) -> syn::Result<Self> {
        let mut id: Option<Type> = None;
        let mut debug: Option<bool> = None;

        let parser = syn::meta::parser(|meta| {
            if meta.path.is_ident("id") {
                if id.is_some() {
                    return Err(meta.error("duplicate key 'id' in attribute"));
                }
                id = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("debug") {
                if debug.is_some() {
                    return Err(meta.error("duplicate key 'debug' in attribute"));
                }
                debug = Some(parse_flag(&meta)?);
                Ok(())
            } else {
                Err(meta.error("unknown key in attribute; expected 'id' or 'debug'"))
            }
        });
        syn::parse::Parser::parse2(parser, attr)?;

        Ok(Self {
            id,
            debug: debug.unwrap_or(true),
        })
    }
}

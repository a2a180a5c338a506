use crate::utils::{apply_derives, parse_flag};
use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, Path, parse_quote};

/// `#[value_object]` 宏实现
/// - 支持结构体（具名或 tuple）与枚举；
/// - 合并派生：Clone、PartialEq、Eq、Serialize、Deserialize，
///   以及可关闭的 Debug、Default（枚举需标注 `#[default]` 变体）。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let mut debug = true;
    let mut default = true;
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("debug") {
            debug = parse_flag(&meta)?;
            Ok(())
        } else if meta.path.is_ident("default") {
            default = parse_flag(&meta)?;
            Ok(())
        } else {
            Err(meta.error("unknown key in attribute; expected 'debug' or 'default'"))
        }
    });
    syn::parse::Parser::parse2(parser, attr)?;

    let mut required: Vec<Path> = vec![
        parse_quote!(Clone),
        parse_quote!(serde::Serialize),
        parse_quote!(serde::Deserialize),
        parse_quote!(PartialEq),
        parse_quote!(Eq),
    ];
    if default {
        required.insert(0, parse_quote!(Default));
    }
    if debug {
        required.insert(0, parse_quote!(Debug));
    }

    let mut item = syn::parse2::<Item>(item)?;
    match &mut item {
        Item::Struct(st) => apply_derives(&mut st.attrs, &required)?,
        Item::Enum(en) => apply_derives(&mut en.attrs, &required)?,
        other => {
            return Err(syn::Error::new(
                other.span(),
                "#[value_object] only supports struct or enum",
            ));
        }
    }

    Ok(quote! { #item })
}

use crate::utils::{apply_derives, ensure_leading_fields};
use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, LitInt, LitStr, Path, Type, parse_quote};

/// `#[domain_event]` 宏实现
/// - 仅支持具名字段变体：`Variant { .. }`；
/// - 缺失时为每个变体补充 `id: IdType`、`aggregate_revision: usize`；
/// - 派生 Debug、Clone、PartialEq、Serialize、Deserialize；
/// - 实现 `::ipt_domain::domain_event::DomainEvent`，事件类型默认为 `Enum.Variant`。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let mut id_ty: Option<Type> = None;
    let mut version: Option<LitInt> = None;
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("id") {
            id_ty = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("version") {
            version = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unknown key; expected 'id' | 'version'"))
        }
    });
    syn::parse::Parser::parse2(parser, attr)?;

    let id_ty = id_ty.unwrap_or_else(|| parse_quote!(String));
    let default_version = version.unwrap_or_else(|| parse_quote!(1));
    let revision_ty: Type = parse_quote!(usize);

    let mut enum_item = match syn::parse2::<Item>(item)? {
        Item::Enum(en) => en,
        other => {
            return Err(syn::Error::new(
                other.span(),
                "#[domain_event] can only be used on enum types",
            ));
        }
    };

    let required: Vec<Path> = vec![
        parse_quote!(Debug),
        parse_quote!(Clone),
        parse_quote!(PartialEq),
        parse_quote!(serde::Serialize),
        parse_quote!(serde::Deserialize),
    ];
    apply_derives(&mut enum_item.attrs, &required)?;

    let enum_ident = enum_item.ident.clone();
    let mut type_arms = Vec::new();
    let mut version_arms = Vec::new();

    for variant in &mut enum_item.variants {
        let span = variant.span();
        let syn::Fields::Named(fields) = &mut variant.fields else {
            return Err(syn::Error::new(
                span,
                "#[domain_event] supports only named-field enum variants, e.g., Variant { x: T }",
            ));
        };
        ensure_leading_fields(
            fields,
            &[("id", &id_ty), ("aggregate_revision", &revision_ty)],
            false,
        );

        let overrides = VariantOverrides::take_from(&mut variant.attrs)?;
        let v_ident = &variant.ident;

        let event_type = overrides.event_type.unwrap_or_else(|| {
            LitStr::new(&format!("{enum_ident}.{v_ident}"), v_ident.span())
        });
        type_arms.push(quote! { Self::#v_ident { .. } => #event_type });

        let event_version = overrides
            .event_version
            .unwrap_or_else(|| default_version.clone());
        version_arms.push(quote! { Self::#v_ident { .. } => #event_version });
    }

    let idents: Vec<_> = enum_item.variants.iter().map(|v| &v.ident).collect();

    Ok(quote! {
        #enum_item

        impl ::ipt_domain::domain_event::DomainEvent for #enum_ident {
            fn event_id(&self) -> &str {
                match self { #( Self::#idents { id, .. } => id.as_str(), )* }
            }

            fn event_type(&self) -> &str {
                match self { #( #type_arms, )* }
            }

            fn event_version(&self) -> usize {
                match self { #( #version_arms, )* }
            }

            fn aggregate_revision(&self) -> usize {
                match self { #( Self::#idents { aggregate_revision, .. } => *aggregate_revision, )* }
            }
        }
    })
}

/// 变体级覆写：`#[event(event_type = "...", event_version = N)]`
#[derive(Default)]
struct VariantOverrides {
    event_type: Option<LitStr>,
    event_version: Option<LitInt>,
}

impl VariantOverrides {
    /// 解析并移除变体上的 `#[event(..)]` 属性，其余属性保持不变
    fn take_from(attrs: &mut Vec<syn::Attribute>) -> syn::Result<Self> {
        let mut overrides = Self::default();
        let mut retained = Vec::with_capacity(attrs.len());

        for attr in attrs.drain(..) {
            if !attr.path().is_ident("event") {
                retained.push(attr);
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("event_type") {
                    if overrides.event_type.is_some() {
                        return Err(meta.error("duplicate 'event_type' specified for this variant"));
                    }
                    overrides.event_type = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("event_version") {
                    if overrides.event_version.is_some() {
                        return Err(
                            meta.error("duplicate 'event_version' specified for this variant")
                        );
                    }
                    overrides.event_version = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unknown key; expected 'event_type' | 'event_version'"))
                }
            })?;
        }

        *attrs = retained;
        Ok(overrides)
    }
}
